//! The rendering boundary: everything a backend consumes, regenerated
//! each frame by [`Pane::frame`](crate::pane::Pane::frame).
//!
//! Vertex data is flat and `Pod` so a GPU backend can upload it without
//! repacking. Tick lines are expressed in the per-axis NDC convention of
//! the tick strips: the strip viewport spans the axis, the cross
//! direction covers `[-1, 1]`.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::axis::{Axis, AxisKind};
use crate::curve::{ColorToken, RenderHandle};
use crate::layout::Rect;
use crate::stream_buffer::Sample;

/// One 2-D vertex in normalized device coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TickVertex {
    pub x: f32,
    pub y: f32,
}

impl TickVertex {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A labeled major graduation ready to draw.
#[derive(Clone, Debug)]
pub struct MajorTickMark {
    pub value: f64,
    /// Pixel offset in the owning scale's convention.
    pub pixel: f64,
    pub label: String,
    /// Line segment across the tick strip.
    pub line: [TickVertex; 2],
}

/// Per-axis draw data.
#[derive(Clone, Debug)]
pub struct AxisFrame {
    pub label: String,
    pub kind: AxisKind,
    /// Screen space the axis reserves this frame.
    pub fixed_space: f32,
    /// Data-to-NDC transform for curves bound to this axis (identity for
    /// the X axis).
    pub transform: Mat4,
    pub major: Vec<MajorTickMark>,
    pub minor: Vec<[TickVertex; 2]>,
    /// Axis spine for stacked Y axes that do not border the chart area.
    pub spine: Option<[TickVertex; 2]>,
    pub major_tick_size: f32,
    pub minor_tick_size: f32,
}

/// Per-curve draw data. `samples` is populated only when the curve's
/// buffer saw new data since the previous frame; the backend re-uploads
/// exactly then and reuses its existing vertex buffer otherwise.
#[derive(Clone, Debug)]
pub struct CurveFrame {
    pub handle: RenderHandle,
    pub label: String,
    pub color: ColorToken,
    pub y_axis_index: usize,
    pub transform: Mat4,
    pub sample_count: usize,
    pub samples: Option<Vec<Sample>>,
}

/// One legend entry ready to draw.
#[derive(Clone, Debug)]
pub struct LegendEntryFrame {
    pub label: String,
    pub color: ColorToken,
    /// NDC text anchor within the pane.
    pub anchor: TickVertex,
    /// Color swatch segment.
    pub swatch: [TickVertex; 2],
}

#[derive(Clone, Debug)]
pub struct LegendFrame {
    pub rect: Rect,
    pub entries: Vec<LegendEntryFrame>,
}

/// The complete handoff for one frame.
#[derive(Clone, Debug)]
pub struct FrameData {
    pub pane_rect: Rect,
    pub chart_rect: Rect,
    pub x_axis: AxisFrame,
    pub y_axes: Vec<AxisFrame>,
    pub curves: Vec<CurveFrame>,
    pub legend: LegendFrame,
}

/// Build the draw data for one prepared axis against the chart rect.
pub(crate) fn build_axis_frame(axis: &Axis, chart_rect: Rect) -> AxisFrame {
    let major = axis
        .scale
        .major_ticks()
        .into_iter()
        .map(|tick| {
            let line = tick_line(axis.kind, tick.pixel, chart_rect);
            MajorTickMark {
                value: tick.value,
                pixel: tick.pixel,
                label: tick.label,
                line,
            }
        })
        .collect();

    let minor = axis
        .scale
        .minor_ticks()
        .into_iter()
        .map(|tick| tick_line(axis.kind, tick.pixel, chart_rect))
        .collect();

    // Stacked Y axes away from the chart edge draw their own spine.
    let spine = match axis.kind {
        AxisKind::Y { index } if index != 0 => Some([
            TickVertex::new(0.0, -1.0),
            TickVertex::new(0.0, 1.0),
        ]),
        _ => None,
    };

    AxisFrame {
        label: axis.label.clone(),
        kind: axis.kind,
        fixed_space: axis.fixed_space(),
        transform: axis.transform(),
        major,
        minor,
        spine,
        major_tick_size: axis.major_tick.size,
        minor_tick_size: axis.minor_tick.size,
    }
}

fn tick_line(kind: AxisKind, pixel: f64, chart_rect: Rect) -> [TickVertex; 2] {
    match kind {
        AxisKind::X => {
            let x = -2.0 * pixel as f32 / chart_rect.width + 1.0;
            [TickVertex::new(x, -1.0), TickVertex::new(x, 1.0)]
        }
        AxisKind::Y { .. } => {
            let y = -2.0 * pixel as f32 / chart_rect.height + 1.0;
            [TickVertex::new(-1.0, y), TickVertex::new(1.0, y)]
        }
    }
}
