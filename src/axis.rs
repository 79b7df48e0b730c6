//! Axes: one X axis plus an ordered, stackable list of Y axes.

use glam::{Mat4, Vec3};
use tracing::debug;

use crate::config::{ChartSettings, TextMetrics};
use crate::layout::Rect;
use crate::scale::Scale;

/// Which edge an axis lives on. Y axes carry their position in the Y-axis
/// list; the slot determines where their screen-space stack sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisKind {
    X,
    Y { index: usize },
}

impl AxisKind {
    pub fn is_y(&self) -> bool {
        matches!(self, AxisKind::Y { .. })
    }
}

/// Major graduation mark sizing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MajorTickStyle {
    pub size: f32,
}

impl Default for MajorTickStyle {
    fn default() -> Self {
        Self { size: 5.0 }
    }
}

/// Minor graduation mark sizing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinorTickStyle {
    pub size: f32,
}

impl Default for MinorTickStyle {
    fn default() -> Self {
        Self { size: 3.0 }
    }
}

/// A single axis: label, scale, tick sizing, the screen space it reserves,
/// and the drift-correction scalars maintained by the gesture machine.
#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub kind: AxisKind,
    pub scale: Scale,
    pub major_tick: MajorTickStyle,
    pub minor_tick: MinorTickStyle,
    /// Screen space reserved for ticks and labels; recomputed every layout
    /// pass, never persisted across resizes.
    fixed_space: f32,
    /// Accumulated gesture translation since the last reset.
    pub zoom_diff: f64,
    /// Accumulated transform residual folded back into the bounds.
    pub zoom_correction: f64,
    /// Data-to-NDC transform for curves bound to this axis; rebuilt every
    /// frame. Identity for the X axis.
    transform: Mat4,
}

impl Axis {
    pub fn new_x(label: impl Into<String>) -> Self {
        Self::new(label, AxisKind::X)
    }

    pub fn new_y(label: impl Into<String>, index: usize) -> Self {
        Self::new(label, AxisKind::Y { index })
    }

    fn new(label: impl Into<String>, kind: AxisKind) -> Self {
        Self {
            label: label.into(),
            kind,
            scale: Scale::new(),
            major_tick: MajorTickStyle::default(),
            minor_tick: MinorTickStyle::default(),
            fixed_space: 0.0,
            zoom_diff: 0.0,
            zoom_correction: 0.0,
            transform: Mat4::IDENTITY,
        }
    }

    /// Screen space this axis needs: the axis gap, the major tick, and one
    /// glyph row, plus the numeric label reservation on Y axes.
    pub fn calc_space(&mut self, settings: &ChartSettings, text: &TextMetrics) -> f32 {
        let mut space = settings.axis_gap + self.major_tick.size + text.glyph_height;
        if self.kind.is_y() {
            space += settings.num_space;
        }
        self.fixed_space = space;
        space
    }

    pub fn fixed_space(&self) -> f32 {
        self.fixed_space
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn reset_zoom_diffs(&mut self) {
        self.zoom_diff = 0.0;
        self.zoom_correction = 0.0;
    }
}

/// One X axis plus the ordered Y-axis list.
#[derive(Clone, Debug)]
pub struct AxisSet {
    pub x: Axis,
    y: Vec<Axis>,
}

impl AxisSet {
    pub fn new() -> Self {
        Self {
            x: Axis::new_x("X Axis"),
            y: Vec::new(),
        }
    }

    /// Append a Y axis; its index is its position in the list.
    pub fn add_y_axis(&mut self, label: impl Into<String>) -> usize {
        let index = self.y.len();
        self.y.push(Axis::new_y(label, index));
        index
    }

    /// Guarantee the fallback target of curve axis resolution exists.
    pub fn ensure_default_y(&mut self) {
        if self.y.is_empty() {
            self.add_y_axis("Y Axis");
        }
    }

    pub fn y_axes(&self) -> &[Axis] {
        &self.y
    }

    pub fn y_axes_mut(&mut self) -> &mut [Axis] {
        &mut self.y
    }

    pub fn y_axis(&self, index: usize) -> Option<&Axis> {
        self.y.get(index)
    }

    pub fn y_axis_mut(&mut self, index: usize) -> Option<&mut Axis> {
        self.y.get_mut(index)
    }

    /// Case-insensitive Y-axis lookup by label.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.y
            .iter()
            .position(|axis| axis.label.eq_ignore_ascii_case(label))
    }

    /// The Y axis a curve is bound to. An index beyond the current axis
    /// count falls back to axis 0: a common transient state while
    /// reconfiguring a live chart, not an error.
    ///
    /// Axis 0 must exist; the pane guarantees it through
    /// [`ensure_default_y`](AxisSet::ensure_default_y).
    pub fn resolve_y(&self, index: usize) -> &Axis {
        if index >= self.y.len() {
            debug!(index, count = self.y.len(), "y-axis index out of range, using axis 0");
            &self.y[0]
        } else {
            &self.y[index]
        }
    }

    /// Per-frame scale preparation, after layout fixed the chart rect:
    /// repair degenerate bounds, bind pixel ranges, recompute steps, and
    /// rebuild each Y axis's data-to-NDC transform.
    pub fn prepare(&mut self, chart_rect: Rect, settings: &ChartSettings) {
        self.ensure_default_y();

        self.x.scale.sanitize();
        self.x
            .scale
            .set_pixel_range(chart_rect.left() as f64, chart_rect.right() as f64);
        self.x
            .scale
            .compute_steps(settings.target_x_steps, settings.target_minor_x_steps);

        let x_min = self.x.scale.min;
        let x_span = self.x.scale.span();

        for axis in &mut self.y {
            axis.scale.sanitize();
            axis.scale
                .set_pixel_range(chart_rect.bottom() as f64, chart_rect.top() as f64);
            axis.scale
                .compute_steps(settings.target_y_steps, settings.target_minor_y_steps);

            // NDC mapping: shift the scale minimum to the origin, scale
            // both spans onto [0, 2], then drop the origin into the
            // bottom-left corner.
            let to_corner = Mat4::from_translation(Vec3::new(-1.0, -1.0, 0.0));
            let scale = Mat4::from_scale(Vec3::new(
                (2.0 / x_span) as f32,
                (2.0 / axis.scale.span()) as f32,
                1.0,
            ));
            let to_min =
                Mat4::from_translation(Vec3::new(-x_min as f32, -axis.scale.min as f32, 0.0));
            axis.transform = to_corner * scale * to_min;
        }
    }
}

impl Default for AxisSet {
    fn default() -> Self {
        Self::new()
    }
}
