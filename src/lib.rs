//! stripchart: a real-time multi-axis line-chart engine.
//!
//! The engine ingests streaming 2-D samples per curve, keeps a bounded
//! history in fixed-capacity circular buffers, auto-scales and labels its
//! axes, negotiates screen space between plot area, axes, and legend, and
//! turns pointer gestures into zoom/pan. Drawing itself is someone else's
//! job: each frame the [`Pane`] emits a [`render::FrameData`] handoff with
//! transforms, tick geometry, label strings, and dirty-gated sample
//! snapshots for a rendering backend to consume.

pub mod axis;
pub mod config;
pub mod curve;
pub mod error;
pub mod layout;
pub mod legend;
pub mod pane;
pub mod render;
pub mod scale;
pub mod stream_buffer;
pub mod zoom_pan;

pub use axis::{Axis, AxisKind, AxisSet, MajorTickStyle, MinorTickStyle};
pub use config::{ChartSettings, TextMetrics};
pub use curve::{ColorToken, Curve, CurveSet, RenderHandle};
pub use error::{ChartError, Result};
pub use layout::{DevicePoint, Margin, Rect};
pub use legend::{Legend, LegendEntry};
pub use pane::Pane;
pub use render::FrameData;
pub use scale::Scale;
pub use stream_buffer::{BufferHandle, Sample, StreamBuffer};
pub use zoom_pan::ZoomPanState;
