use rand::Rng;
use stripchart::{ChartError, Sample, StreamBuffer};

#[test]
fn test_rolling_overwrite_keeps_last_five() {
    let mut buf = StreamBuffer::new(5).unwrap();
    for i in 0..=5 {
        buf.push_xy(i as f64, i as f64);
    }
    assert_eq!(buf.len(), 5);
    let points: Vec<(f64, f64)> = buf.export_ordered().iter().map(|s| (s.x, s.y)).collect();
    assert_eq!(
        points,
        vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0), (5.0, 5.0)]
    );
}

#[test]
fn test_overfill_always_holds_last_capacity_samples() {
    let mut rng = rand::rng();
    for _ in 0..20 {
        let capacity = rng.random_range(1..=64);
        let pushes = rng.random_range(capacity..capacity * 5);
        let mut buf = StreamBuffer::new(capacity).unwrap();
        for i in 0..pushes {
            buf.push_xy(i as f64, -(i as f64));
        }
        assert_eq!(buf.len(), capacity);
        let exported = buf.export_ordered();
        assert_eq!(exported.len(), capacity);
        for (k, sample) in exported.iter().enumerate() {
            let expected = (pushes - capacity + k) as f64;
            assert_eq!(sample.x, expected);
            assert_eq!(sample.y, -expected);
        }
    }
}

#[test]
fn test_empty_buffer_errors() {
    let mut buf = StreamBuffer::new(3).unwrap();
    assert_eq!(buf.pop().unwrap_err(), ChartError::EmptyBuffer);
    assert_eq!(buf.remove_first().unwrap_err(), ChartError::EmptyBuffer);
    assert!(matches!(buf.get(0), Err(ChartError::OutOfRange { .. })));
    assert_eq!(buf.peek(), Sample::ZERO);
}

#[test]
fn test_remove_then_readd_restores_count_not_position() {
    let mut buf = StreamBuffer::new(8).unwrap();
    for i in 0..5 {
        buf.push_xy(i as f64, 0.0);
    }
    let removed = buf.remove_at(2).unwrap();
    assert_eq!(removed.x, 2.0);
    assert_eq!(buf.len(), 4);

    buf.push(removed);
    assert_eq!(buf.len(), 5);
    let xs: Vec<f64> = buf.export_ordered().iter().map(|s| s.x).collect();
    // The sample is back, at the head rather than its old slot.
    assert_eq!(xs, vec![0.0, 1.0, 3.0, 4.0, 2.0]);
}

#[test]
fn test_remove_range_bounds_checking() {
    let mut buf = StreamBuffer::new(10).unwrap();
    for i in 0..6 {
        buf.push_xy(i as f64, 0.0);
    }
    assert!(matches!(
        buf.remove_range(6, 1),
        Err(ChartError::OutOfRange { .. })
    ));
    assert!(matches!(
        buf.remove_range(4, 3),
        Err(ChartError::OutOfRange { .. })
    ));
    assert_eq!(buf.len(), 6);

    buf.remove_range(2, 2).unwrap();
    let xs: Vec<f64> = buf.export_ordered().iter().map(|s| s.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 4.0, 5.0]);
}

#[test]
fn test_fifo_and_lifo_removal_against_wrap() {
    let mut buf = StreamBuffer::new(4).unwrap();
    for i in 0..7 {
        buf.push_xy(i as f64, 0.0);
    }
    // Buffer holds 3, 4, 5, 6 with wrapped indices.
    assert_eq!(buf.remove_first().unwrap().x, 3.0);
    assert_eq!(buf.pop().unwrap().x, 6.0);
    assert_eq!(buf.len(), 2);
    let xs: Vec<f64> = buf.export_ordered().iter().map(|s| s.x).collect();
    assert_eq!(xs, vec![4.0, 5.0]);
}

#[test]
fn test_capacity_zero_is_rejected() {
    assert_eq!(
        StreamBuffer::new(0).unwrap_err(),
        ChartError::InvalidCapacity
    );
}
