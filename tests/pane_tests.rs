use stripchart::{
    AxisKind, BufferHandle, ChartError, ColorToken, Pane, Rect,
};

fn pane() -> Pane {
    Pane::new(Rect::new(0.0, 0.0, 640.0, 480.0))
}

#[test]
fn test_add_curve_creates_legend_entry_and_handle() {
    let mut p = pane();
    let buffer = BufferHandle::new(128).unwrap();
    let a = p.add_curve("rpm", buffer.clone(), ColorToken(0xff0000)).unwrap();
    let b = p
        .add_curve("boost", BufferHandle::new(128).unwrap(), ColorToken(0x00ff00))
        .unwrap();
    assert_ne!(a, b);
    assert_eq!(p.legend().entries().len(), 2);
    assert_eq!(p.curves().len(), 2);

    let err = p
        .add_curve("RPM", BufferHandle::new(8).unwrap(), ColorToken(0))
        .unwrap_err();
    assert_eq!(err, ChartError::DuplicateCurve("RPM".into()));
    assert_eq!(p.legend().entries().len(), 2);
}

#[test]
fn test_axis_lookup_round_trip() {
    let mut p = pane();
    let first = p.add_y_axis("Engine Speed");
    let second = p.add_y_axis("Manifold Pressure");
    assert_eq!(first, 0);
    assert_eq!(second, 1);
    assert_eq!(p.y_axis_index_of("engine speed"), Some(0));
    assert_eq!(p.y_axis_index_of("MANIFOLD PRESSURE"), Some(1));
    assert_eq!(p.y_axis_index_of("unknown"), None);
}

#[test]
fn test_frame_data_carries_everything_a_backend_needs() {
    let mut p = pane();
    let left = p.add_y_axis("left");
    let right = p.add_y_axis("right");
    let (_, fast) = p.add_stream("fast", ColorToken(1)).unwrap();
    let (_, slow) = p.add_stream("slow", ColorToken(2)).unwrap();
    p.set_curve_axis("slow", right);
    p.set_axis_range(left, 0.0, 10.0);
    p.set_axis_range(right, 0.0, 1000.0);
    p.set_x_range(0.0, 60.0);

    for i in 0..100 {
        fast.push_xy(i as f64 * 0.6, (i as f64 * 0.1).sin());
        slow.push_xy(i as f64 * 0.6, i as f64 * 10.0);
    }

    let frame = p.frame();

    assert_eq!(frame.pane_rect, p.rect());
    assert!(frame.chart_rect.width > 0.0 && frame.chart_rect.height > 0.0);
    assert_eq!(frame.y_axes.len(), 2);
    assert_eq!(frame.curves.len(), 2);
    assert_eq!(frame.legend.entries.len(), 2);

    // Axis frames carry ticks with labels and per-axis transforms.
    assert!(matches!(frame.x_axis.kind, AxisKind::X));
    assert!(!frame.x_axis.major.is_empty());
    for mark in &frame.x_axis.major {
        assert!(!mark.label.is_empty());
    }
    assert!(!frame.y_axes[0].major.is_empty());
    assert!(frame.y_axes[1].spine.is_some());

    // Curves resolve to their axis's transform and carry fresh samples.
    assert_eq!(frame.curves[0].transform, frame.y_axes[0].transform);
    assert_eq!(frame.curves[1].transform, frame.y_axes[1].transform);
    assert_eq!(frame.curves[0].samples.as_ref().unwrap().len(), 100);

    // Second frame without new data: no re-export.
    let second = p.frame();
    assert!(second.curves[0].samples.is_none());
    assert!(second.curves[1].samples.is_none());
}

#[test]
fn test_curve_on_missing_axis_renders_on_axis_zero() {
    let mut p = pane();
    let (_, buf) = p.add_stream("orphan", ColorToken(7)).unwrap();
    buf.push_xy(1.0, 2.0);
    p.set_curve_axis("orphan", 42);

    let frame = p.frame();
    assert_eq!(frame.curves[0].transform, frame.y_axes[0].transform);
}

#[test]
fn test_degenerate_axis_range_is_repaired_by_the_frame_pass() {
    let mut p = pane();
    p.set_x_range(5.0, 5.0);
    p.set_axis_range(0, 3.0, 3.0);

    let frame = p.frame();
    // The pass widened the bounds instead of emitting NaN geometry.
    assert!(p.axes().x.scale.min < p.axes().x.scale.max);
    for mark in frame.x_axis.major.iter().chain(frame.y_axes[0].major.iter()) {
        assert!(mark.pixel.is_finite());
        assert!(mark.line[0].x.is_finite() && mark.line[0].y.is_finite());
    }
}

#[test]
fn test_tick_counts_stay_within_caps() {
    let mut p = pane();
    p.set_x_range(0.0, 1e9);
    p.set_axis_range(0, -1e-9, 1e-9);
    let frame = p.frame();
    assert!(frame.x_axis.major.len() <= 1000);
    assert!(frame.x_axis.minor.len() <= 300);
    assert!(frame.y_axes[0].major.len() <= 1000);
    assert!(frame.y_axes[0].minor.len() <= 300);
}

#[test]
fn test_ticks_regenerate_after_range_change() {
    let mut p = pane();
    p.set_x_range(0.0, 100.0);
    let wide: Vec<f64> = p.frame().x_axis.major.iter().map(|m| m.value).collect();
    p.set_x_range(0.0, 10.0);
    let narrow: Vec<f64> = p.frame().x_axis.major.iter().map(|m| m.value).collect();
    assert_ne!(wide, narrow);
    assert!(narrow.iter().all(|v| (0.0..=10.0).contains(v)));
}
