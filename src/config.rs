//! Engine configuration.
//!
//! Everything here is either fixed at construction or freely settable by
//! the host between frames. The rendering backend reports font metrics
//! through [`TextMetrics`]; the engine never touches glyph data itself.

use serde::{Deserialize, Serialize};

use crate::layout::Margin;

/// Tunable chart parameters with the engine's stock defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Target number of major steps on the X axis.
    pub target_x_steps: f64,
    /// Target number of major steps on each Y axis.
    pub target_y_steps: f64,
    /// Target number of minor steps per major step on the X axis.
    pub target_minor_x_steps: f64,
    /// Target number of minor steps per major step on each Y axis.
    pub target_minor_y_steps: f64,
    /// Gap between stacked axes, in device units.
    pub axis_gap: f32,
    /// Extra width reserved for numeric value labels on Y axes.
    pub num_space: f32,
    /// Legend entries per row.
    pub legend_columns: usize,
    /// Sample capacity for buffers the pane creates itself.
    pub buffer_capacity: usize,
    /// Outer pane margins.
    pub margin: Margin,
}

impl Default for ChartSettings {
    fn default() -> Self {
        let mut margin = Margin::default();
        // The pane reserves less space on the label-free edges.
        margin.left = 2.0;
        margin.top = 8.0;
        Self {
            target_x_steps: 7.0,
            target_y_steps: 7.0,
            target_minor_x_steps: 5.0,
            target_minor_y_steps: 5.0,
            axis_gap: 2.0,
            num_space: 20.0,
            legend_columns: 5,
            buffer_capacity: 10_000,
            margin,
        }
    }
}

impl ChartSettings {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Font metrics reported by the rendering backend. The layout pass uses
/// them to size axis label space and legend rows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Nominal font size in device units.
    pub font_size: f32,
    /// Height of a rendered glyph row in device units.
    pub glyph_height: f32,
}

impl TextMetrics {
    /// Height of one legend line.
    pub fn legend_line_height(&self) -> f32 {
        self.font_size * 0.8
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            glyph_height: 15.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_values() {
        let s = ChartSettings::default();
        assert_eq!(s.target_x_steps, 7.0);
        assert_eq!(s.target_minor_y_steps, 5.0);
        assert_eq!(s.axis_gap, 2.0);
        assert_eq!(s.num_space, 20.0);
        assert_eq!(s.legend_columns, 5);
        assert_eq!(s.buffer_capacity, 10_000);
        assert_eq!(s.margin.left, 2.0);
        assert_eq!(s.margin.top, 8.0);
        assert_eq!(s.margin.right, 10.0);
        assert_eq!(s.margin.bottom, 5.0);
    }

    #[test]
    fn settings_json_round_trip() {
        let mut s = ChartSettings::default();
        s.legend_columns = 3;
        s.margin.set_all(7.0);
        let json = s.to_json().unwrap();
        let back = ChartSettings::from_json(&json).unwrap();
        assert_eq!(back, s);
    }
}
