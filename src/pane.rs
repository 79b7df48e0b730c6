//! The pane: top-level chart object owning axes, curves, legend, and
//! layout, and running the per-frame pass.

use tracing::debug;

use crate::axis::AxisSet;
use crate::config::{ChartSettings, TextMetrics};
use crate::curve::{ColorToken, CurveSet, RenderHandle};
use crate::error::Result;
use crate::layout::{DevicePoint, Rect};
use crate::legend::Legend;
use crate::render::{self, CurveFrame, FrameData, LegendEntryFrame, LegendFrame, TickVertex};
use crate::stream_buffer::BufferHandle;
use crate::zoom_pan::ZoomPanState;

/// A complete chart: the host feeds samples and gestures in, calls
/// [`frame`](Pane::frame) on every tick, and hands the returned
/// [`FrameData`] to its rendering backend.
#[derive(Debug)]
pub struct Pane {
    rect: Rect,
    chart_rect: Rect,
    pub settings: ChartSettings,
    pub text: TextMetrics,
    axes: AxisSet,
    curves: CurveSet,
    legend: Legend,
    zoom_pan: ZoomPanState,
}

impl Pane {
    pub fn new(rect: Rect) -> Self {
        Self::with_settings(rect, ChartSettings::default())
    }

    pub fn with_settings(rect: Rect, settings: ChartSettings) -> Self {
        let legend = Legend::new(settings.legend_columns);
        Self {
            rect,
            chart_rect: Rect::default(),
            settings,
            text: TextMetrics::default(),
            axes: AxisSet::new(),
            curves: CurveSet::new(),
            legend,
            zoom_pan: ZoomPanState::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The plot area resolved by the most recent layout pass.
    pub fn chart_rect(&self) -> Rect {
        self.chart_rect
    }

    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut AxisSet {
        &mut self.axes
    }

    pub fn curves(&self) -> &CurveSet {
        &self.curves
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Add a curve over a host-owned buffer; also creates its legend
    /// entry. The curve starts on Y axis 0.
    pub fn add_curve(
        &mut self,
        label: &str,
        buffer: BufferHandle,
        color: ColorToken,
    ) -> Result<RenderHandle> {
        self.axes.ensure_default_y();
        let handle = self.curves.add(label, buffer, color)?;
        self.legend.add_entry(label, color);
        Ok(handle)
    }

    /// Add a curve over a fresh buffer sized by the settings; returns the
    /// producer handle alongside the render handle.
    pub fn add_stream(
        &mut self,
        label: &str,
        color: ColorToken,
    ) -> Result<(RenderHandle, BufferHandle)> {
        let buffer = BufferHandle::new(self.settings.buffer_capacity)?;
        let handle = self.add_curve(label, buffer.clone(), color)?;
        Ok((handle, buffer))
    }

    /// Bind a curve to a Y axis by index. Unknown labels are ignored.
    pub fn set_curve_axis(&mut self, label: &str, axis_index: usize) {
        if let Some(curve) = self.curves.by_label_mut(label) {
            curve.y_axis_index = axis_index;
        } else {
            debug!(label, "set_curve_axis: no such curve");
        }
    }

    pub fn add_y_axis(&mut self, label: &str) -> usize {
        self.axes.add_y_axis(label)
    }

    /// Case-insensitive Y-axis lookup.
    pub fn y_axis_index_of(&self, label: &str) -> Option<usize> {
        self.axes.index_of(label)
    }

    /// Programmatic rescale of one Y axis. An out-of-range index targets
    /// axis 0, consistent with curve axis resolution.
    pub fn set_axis_range(&mut self, axis_index: usize, min: f64, max: f64) {
        self.axes.ensure_default_y();
        let index = if self.axes.y_axis(axis_index).is_some() {
            axis_index
        } else {
            debug!(axis_index, "set_axis_range: index out of range, using axis 0");
            0
        };
        if let Some(axis) = self.axes.y_axis_mut(index) {
            axis.scale.set_range(min, max);
        }
    }

    pub fn set_x_range(&mut self, min: f64, max: f64) {
        self.axes.x.scale.set_range(min, max);
    }

    // Gesture entry points. Hit tests against the chart rect happen here
    // so the state machine itself stays geometry-free.

    pub fn start_pan(&mut self, point: DevicePoint) {
        if self.chart_rect.contains(point.x, point.y) {
            self.zoom_pan.start_pan(point, &mut self.axes);
        }
    }

    pub fn pan(&mut self, point: DevicePoint) {
        self.zoom_pan.pan(point, &mut self.axes);
    }

    pub fn end_pan(&mut self) {
        self.zoom_pan.end_pan();
    }

    pub fn zoom(&mut self, point: DevicePoint, wheel_delta: f64) {
        if self.chart_rect.contains(point.x, point.y) {
            self.zoom_pan.zoom(point, wheel_delta, &mut self.axes);
        }
    }

    pub fn set_auto_pan(&mut self, enabled: bool) {
        self.zoom_pan.set_auto_pan(enabled);
    }

    pub fn is_panning(&self) -> bool {
        self.zoom_pan.is_panning()
    }

    pub fn reset_zoom_diffs(&mut self) {
        self.zoom_pan.reset_zoom_diffs(&mut self.axes);
    }

    /// Resize the pane. Axis fixed spaces are recomputed on the next
    /// frame; legend entry positions are invalidated here.
    pub fn resize(&mut self, rect: Rect) {
        self.rect = rect;
        self.legend.invalidate_positions();
    }

    /// Fit every axis to the data currently buffered, then clear the
    /// accumulated gesture drift.
    pub fn rescale_to_fit(&mut self) {
        self.axes.ensure_default_y();

        let mut x_bounds: Option<(f64, f64)> = None;
        let mut y_bounds: Vec<Option<(f64, f64)>> = vec![None; self.axes.y_axes().len()];

        for curve in self.curves.iter() {
            let Some((min, max)) = curve.buffer().bounds() else {
                continue;
            };
            x_bounds = Some(match x_bounds {
                None => (min.x, max.x),
                Some((lo, hi)) => (lo.min(min.x), hi.max(max.x)),
            });
            let slot = if curve.y_axis_index < y_bounds.len() {
                curve.y_axis_index
            } else {
                0
            };
            y_bounds[slot] = Some(match y_bounds[slot] {
                None => (min.y, max.y),
                Some((lo, hi)) => (lo.min(min.y), hi.max(max.y)),
            });
        }

        if let Some((lo, hi)) = x_bounds {
            self.axes.x.scale.set_range(lo, hi);
        }
        for (index, bounds) in y_bounds.into_iter().enumerate() {
            if let (Some((lo, hi)), Some(axis)) = (bounds, self.axes.y_axis_mut(index)) {
                axis.scale.set_range(lo, hi);
            }
        }

        self.zoom_pan.reset_zoom_diffs(&mut self.axes);
    }

    /// One cooperative frame pass, in fixed order: auto-follow, layout,
    /// scale preparation, then the render handoff. Axis bounds are never
    /// mutated after layout within a pass, so tick and transform data can
    /// never be consumed stale.
    pub fn frame(&mut self) -> FrameData {
        if let Some(max_x) = self.curves.max_x() {
            self.zoom_pan.auto_pan(max_x, &mut self.axes);
        }

        self.layout();
        self.axes.prepare(self.chart_rect, &self.settings);
        self.legend.layout_entries(self.rect);

        let x_axis = render::build_axis_frame(&self.axes.x, self.chart_rect);
        let y_axes = self
            .axes
            .y_axes()
            .iter()
            .map(|axis| render::build_axis_frame(axis, self.chart_rect))
            .collect();

        let curves = self
            .curves
            .iter()
            .map(|curve| {
                let axis = self.axes.resolve_y(curve.y_axis_index);
                CurveFrame {
                    handle: curve.handle(),
                    label: curve.label().to_owned(),
                    color: curve.color,
                    y_axis_index: curve.y_axis_index,
                    transform: axis.transform(),
                    sample_count: curve.buffer().len(),
                    samples: curve.buffer().export_ordered_if_dirty(),
                }
            })
            .collect();

        let legend = LegendFrame {
            rect: self.legend.rect(),
            entries: self
                .legend
                .entries()
                .iter()
                .map(|entry| LegendEntryFrame {
                    label: entry.label.clone(),
                    color: entry.color,
                    anchor: TickVertex::new(entry.x_pos, entry.y_pos),
                    swatch: [
                        TickVertex::new(entry.swatch[0], entry.swatch[1]),
                        TickVertex::new(entry.swatch[2], entry.swatch[3]),
                    ],
                })
                .collect(),
        };

        FrameData {
            pane_rect: self.rect,
            chart_rect: self.chart_rect,
            x_axis,
            y_axes,
            curves,
            legend,
        }
    }

    /// Resolve the plot rect from the outer rect: margins first, then the
    /// legend strip, then per-axis fixed space (Y axes stacked on the
    /// left, the X axis on the bottom).
    fn layout(&mut self) {
        self.axes.ensure_default_y();
        self.legend.set_columns(self.settings.legend_columns);

        let mut client = self.settings.margin.apply(self.rect);
        self.legend.reserve(self.rect, &mut client, &self.text);

        let bottom_space = self.axes.x.calc_space(&self.settings, &self.text);
        let mut left_space = 0.0;
        for axis in self.axes.y_axes_mut() {
            left_space += axis.calc_space(&self.settings, &self.text);
        }

        self.chart_rect = Rect::new(
            client.x + left_space,
            client.y + bottom_space,
            client.width - left_space,
            client.height - bottom_space,
        );
    }
}
