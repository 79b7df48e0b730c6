//! Curves and the ordered curve collection.

use crate::error::{ChartError, Result};
use crate::stream_buffer::BufferHandle;

/// Opaque color token. The engine never interprets it; the rendering
/// backend maps it to an actual color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColorToken(pub u32);

/// Opaque handle identifying a curve at the rendering boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u64);

/// One plotted line: a label, its sample buffer, the Y axis it is bound
/// to, and the tokens the backend needs to draw it.
#[derive(Clone, Debug)]
pub struct Curve {
    label: String,
    buffer: BufferHandle,
    pub y_axis_index: usize,
    pub color: ColorToken,
    handle: RenderHandle,
}

impl Curve {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn buffer(&self) -> &BufferHandle {
        &self.buffer
    }

    pub fn handle(&self) -> RenderHandle {
        self.handle
    }
}

/// Ordered collection of curves with unique (case-insensitive) labels.
#[derive(Clone, Debug, Default)]
pub struct CurveSet {
    curves: Vec<Curve>,
    next_handle: u64,
}

impl CurveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a curve bound to Y axis 0. Rejects a label already present.
    pub fn add(
        &mut self,
        label: impl Into<String>,
        buffer: BufferHandle,
        color: ColorToken,
    ) -> Result<RenderHandle> {
        let label = label.into();
        if self.index_of(&label).is_some() {
            return Err(ChartError::DuplicateCurve(label));
        }
        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;
        self.curves.push(Curve {
            label,
            buffer,
            y_axis_index: 0,
            color,
            handle,
        });
        Ok(handle)
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Curve> {
        self.curves.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Curve> {
        self.curves.iter_mut()
    }

    /// Case-insensitive label lookup.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.curves
            .iter()
            .position(|curve| curve.label.eq_ignore_ascii_case(label))
    }

    pub fn get(&self, index: usize) -> Option<&Curve> {
        self.curves.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Curve> {
        self.curves.get_mut(index)
    }

    pub fn by_label(&self, label: &str) -> Option<&Curve> {
        self.index_of(label).and_then(|i| self.get(i))
    }

    pub fn by_label_mut(&mut self, label: &str) -> Option<&mut Curve> {
        match self.index_of(label) {
            Some(i) => self.curves.get_mut(i),
            None => None,
        }
    }

    /// The newest X value across all curves; drives auto-follow panning.
    /// Empty buffers peek a zero sample, so a chart with curves but no
    /// data yet reports `Some(0.0)`.
    pub fn max_x(&self) -> Option<f64> {
        self.curves
            .iter()
            .map(|curve| curve.buffer.peek().x)
            .fold(None, |acc, x| match acc {
                None => Some(x),
                Some(current) => Some(current.max(x)),
            })
    }
}
