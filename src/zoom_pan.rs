//! Gesture state machine translating pointer and wheel events into axis
//! bound mutations.
//!
//! Two states, `Idle` and `Panning`, plus an orthogonal auto-pan flag.
//! Nothing here fails: calls that do not fit the current state are no-ops.
//! Repeatedly re-deriving data deltas from pixel ranges accumulates
//! floating-point drift; after every transform the anchor (or zoom pivot)
//! is mapped back through the new bounds and the residual folded into the
//! bounds and recorded in each axis's `zoom_correction`. The accumulated
//! terms are zeroed only through [`ZoomPanState::reset_zoom_diffs`].

use crate::axis::{Axis, AxisSet};
use crate::layout::DevicePoint;

#[derive(Clone, Copy, Debug, PartialEq)]
enum PanPhase {
    Idle,
    Panning { anchor: DevicePoint },
}

/// Gesture state shared by all axes of a pane.
#[derive(Clone, Debug)]
pub struct ZoomPanState {
    phase: PanPhase,
    auto_pan: bool,
}

impl ZoomPanState {
    pub fn new() -> Self {
        Self {
            phase: PanPhase::Idle,
            auto_pan: false,
        }
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.phase, PanPhase::Panning { .. })
    }

    pub fn is_auto_pan(&self) -> bool {
        self.auto_pan
    }

    /// Auto-follow is evaluated each frame only while not actively
    /// panning.
    pub fn set_auto_pan(&mut self, enabled: bool) {
        self.auto_pan = enabled;
    }

    /// Begin a pan: record the anchor and stage every axis's bounds as the
    /// gesture baseline. Only meaningful in `Idle`; the caller has already
    /// hit-tested the point against the chart rect.
    pub fn start_pan(&mut self, point: DevicePoint, axes: &mut AxisSet) {
        if self.is_panning() {
            return;
        }
        axes.x.scale.stage();
        for axis in axes.y_axes_mut() {
            axis.scale.stage();
        }
        self.phase = PanPhase::Panning { anchor: point };
    }

    /// Translate every axis from its staged baseline by the data-space
    /// delta between the anchor and the current pointer.
    pub fn pan(&mut self, point: DevicePoint, axes: &mut AxisSet) {
        let PanPhase::Panning { anchor } = self.phase else {
            return;
        };
        pan_axis(&mut axes.x, anchor.x as f64, point.x as f64);
        for axis in axes.y_axes_mut() {
            pan_axis(axis, anchor.y as f64, point.y as f64);
        }
    }

    /// Pointer release.
    pub fn end_pan(&mut self) {
        self.phase = PanPhase::Idle;
    }

    /// Wheel zoom about the pointer position; `Idle` only. The span scales
    /// by `1.1^(-delta/120)`, so a positive wheel delta zooms in.
    pub fn zoom(&mut self, point: DevicePoint, wheel_delta: f64, axes: &mut AxisSet) {
        if self.is_panning() {
            return;
        }
        let factor = 1.1f64.powf(-wheel_delta / 120.0);
        zoom_axis(&mut axes.x, point.x as f64, factor);
        for axis in axes.y_axes_mut() {
            zoom_axis(axis, point.y as f64, factor);
        }
    }

    /// Sliding-window follow: when enabled and not panning, shift the X
    /// window (width unchanged) so the newest data stays visible.
    pub fn auto_pan(&mut self, current_max_x: f64, axes: &mut AxisSet) {
        if !self.auto_pan || self.is_panning() {
            return;
        }
        let scale = &mut axes.x.scale;
        if current_max_x > scale.max {
            let shift = current_max_x - scale.max;
            scale.min += shift;
            scale.max += shift;
        }
    }

    /// Zero the accumulated drift terms on every axis. Called after any
    /// explicit rescale so stale corrections cannot persist.
    pub fn reset_zoom_diffs(&mut self, axes: &mut AxisSet) {
        axes.x.reset_zoom_diffs();
        for axis in axes.y_axes_mut() {
            axis.reset_zoom_diffs();
        }
    }
}

impl Default for ZoomPanState {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate one axis from its staged baseline. The anchor's data
/// coordinate at gesture start must end up under the pointer; the
/// floating-point residual of that invariant is folded back into the
/// bounds and accumulated.
fn pan_axis(axis: &mut Axis, anchor_c: f64, point_c: f64) {
    let pixel_span = axis.scale.pixel_span();
    if pixel_span == 0.0 {
        return;
    }
    let span = axis.scale.tmp_span();
    let delta = (point_c - anchor_c) / pixel_span * span;

    let before = axis.scale.min;
    let mut new_min = axis.scale.tmp_min - delta;
    let mut new_max = axis.scale.tmp_max - delta;

    let pixel_min = axis.scale.pixel_min();
    let under_anchor_at_start =
        axis.scale.tmp_min + (anchor_c - pixel_min) / pixel_span * span;
    let under_pointer_now = new_min + (point_c - pixel_min) / pixel_span * span;
    let residual = under_pointer_now - under_anchor_at_start;

    new_min -= residual;
    new_max -= residual;
    axis.zoom_correction += residual;

    axis.scale.min = new_min;
    axis.scale.max = new_max;
    axis.zoom_diff += new_min - before;
}

/// Rescale one axis about the data coordinate under the pointer, keeping
/// that coordinate's pixel position fixed.
fn zoom_axis(axis: &mut Axis, point_c: f64, factor: f64) {
    let pixel_span = axis.scale.pixel_span();
    if pixel_span == 0.0 || factor == 1.0 {
        return;
    }
    let before = axis.scale.min;
    let pivot = axis.scale.device_to_data(point_c);

    axis.scale.min = pivot + (axis.scale.min - pivot) * factor;
    axis.scale.max = pivot + (axis.scale.max - pivot) * factor;

    let pivot_after = axis.scale.device_to_data(point_c);
    let residual = pivot_after - pivot;
    axis.scale.min -= residual;
    axis.scale.max -= residual;
    axis.zoom_correction += residual;

    axis.zoom_diff += axis.scale.min - before;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartSettings;
    use crate::layout::Rect;

    fn axes() -> AxisSet {
        let mut axes = AxisSet::new();
        axes.x.scale.set_range(0.0, 100.0);
        axes.add_y_axis("left");
        axes.y_axis_mut(0).unwrap().scale.set_range(0.0, 50.0);
        // Chart rect 400x200 at origin: X pixels 0..400, Y pixels 0..200.
        axes.prepare(Rect::new(0.0, 0.0, 400.0, 200.0), &ChartSettings::default());
        axes
    }

    #[test]
    fn pan_in_idle_is_a_no_op() {
        let mut axes = axes();
        let mut state = ZoomPanState::new();
        state.pan(DevicePoint::new(50.0, 50.0), &mut axes);
        assert_eq!(axes.x.scale.min, 0.0);
        assert_eq!(axes.x.scale.max, 100.0);
    }

    #[test]
    fn pan_translates_without_rescaling() {
        let mut axes = axes();
        let mut state = ZoomPanState::new();
        state.start_pan(DevicePoint::new(200.0, 100.0), &mut axes);
        assert!(state.is_panning());

        // Drag 40px right: a tenth of the width, so the window slides a
        // tenth of its span to the left.
        state.pan(DevicePoint::new(240.0, 100.0), &mut axes);
        assert!((axes.x.scale.min + 10.0).abs() < 1e-9);
        assert!((axes.x.scale.max - 90.0).abs() < 1e-9);
        assert!((axes.x.scale.span() - 100.0).abs() < 1e-9);
        // Y untouched by a horizontal drag.
        let y = axes.y_axis(0).unwrap();
        assert!((y.scale.min).abs() < 1e-9);
        assert!((y.scale.max - 50.0).abs() < 1e-9);

        state.end_pan();
        assert!(!state.is_panning());
    }

    #[test]
    fn pan_keeps_anchor_data_under_pointer() {
        let mut axes = axes();
        let mut state = ZoomPanState::new();
        let anchor = DevicePoint::new(120.0, 60.0);
        let grabbed = axes.x.scale.device_to_data(anchor.x as f64);

        state.start_pan(anchor, &mut axes);
        let target = DevicePoint::new(310.0, 140.0);
        // Many intermediate moves must not drift the grabbed coordinate.
        for i in 1..=50 {
            let t = i as f32 / 50.0;
            let p = DevicePoint::new(
                anchor.x + (target.x - anchor.x) * t,
                anchor.y + (target.y - anchor.y) * t,
            );
            state.pan(p, &mut axes);
        }
        let under_pointer = axes.x.scale.device_to_data(target.x as f64);
        assert!((under_pointer - grabbed).abs() < 1e-9);
    }

    #[test]
    fn zoom_preserves_pivot_pixel() {
        let mut axes = axes();
        let mut state = ZoomPanState::new();
        let point = DevicePoint::new(300.0, 150.0);
        let pivot = axes.x.scale.device_to_data(point.x as f64);

        state.zoom(point, 120.0, &mut axes);
        let pivot_after = axes.x.scale.device_to_data(point.x as f64);
        assert!((pivot_after - pivot).abs() < 1e-9);
        // Positive delta zooms in.
        assert!(axes.x.scale.span() < 100.0);
    }

    #[test]
    fn midpoint_zoom_scenario() {
        let mut axes = axes();
        // Pivot at device center maps to data 50 on [0, 100].
        let point = DevicePoint::new(200.0, 100.0);
        let before = axes.x.scale.span();

        let mut state = ZoomPanState::new();
        // Wheel delta shrinking the span by exactly 0.9.
        let delta = -120.0 * 0.9f64.ln() / 1.1f64.ln();
        state.zoom(point, delta, &mut axes);

        assert!((axes.x.scale.min - 5.0).abs() < 1e-6);
        assert!((axes.x.scale.max - 95.0).abs() < 1e-6);
        assert!((axes.x.scale.span() - before * 0.9).abs() < 1e-6);
    }

    #[test]
    fn zoom_ignored_while_panning() {
        let mut axes = axes();
        let mut state = ZoomPanState::new();
        state.start_pan(DevicePoint::new(200.0, 100.0), &mut axes);
        state.zoom(DevicePoint::new(200.0, 100.0), 120.0, &mut axes);
        assert_eq!(axes.x.scale.span(), 100.0);
    }

    #[test]
    fn auto_pan_slides_window_without_resizing() {
        let mut axes = axes();
        let mut state = ZoomPanState::new();

        // Disabled: nothing moves.
        state.auto_pan(150.0, &mut axes);
        assert_eq!(axes.x.scale.max, 100.0);

        state.set_auto_pan(true);
        state.auto_pan(150.0, &mut axes);
        assert_eq!(axes.x.scale.max, 150.0);
        assert_eq!(axes.x.scale.min, 50.0);

        // Data inside the window: no movement.
        state.auto_pan(120.0, &mut axes);
        assert_eq!(axes.x.scale.max, 150.0);
    }

    #[test]
    fn auto_pan_suspended_during_gesture() {
        let mut axes = axes();
        let mut state = ZoomPanState::new();
        state.set_auto_pan(true);
        state.start_pan(DevicePoint::new(200.0, 100.0), &mut axes);
        state.auto_pan(500.0, &mut axes);
        assert_eq!(axes.x.scale.max, 100.0);
    }

    #[test]
    fn reset_zoom_diffs_clears_all_axes() {
        let mut axes = axes();
        let mut state = ZoomPanState::new();
        state.start_pan(DevicePoint::new(200.0, 100.0), &mut axes);
        state.pan(DevicePoint::new(260.0, 130.0), &mut axes);
        state.end_pan();
        assert!(axes.x.zoom_diff != 0.0);

        state.reset_zoom_diffs(&mut axes);
        assert_eq!(axes.x.zoom_diff, 0.0);
        assert_eq!(axes.x.zoom_correction, 0.0);
        let y = axes.y_axis(0).unwrap();
        assert_eq!(y.zoom_diff, 0.0);
        assert_eq!(y.zoom_correction, 0.0);
    }
}
