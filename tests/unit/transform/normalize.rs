use super::*;

fn layer(values: Vec<i64>) -> Layer<i64> {
    let n = values.len();
    Layer::from_vec(1, 1, n, values).unwrap()
}

#[test]
fn endpoints_and_bounds() {
    let signals = layer(vec![-4, 0, 6, 16]);
    let objects = layer(vec![0; 4]);
    let out = normalize_signal(&signals, &objects).unwrap();
    assert_eq!(
        out.range,
        SignalRange {
            min: -4,
            max: 16,
            degenerate: false
        }
    );
    assert_eq!(out.values.as_slice(), &[0.0, 0.2, 0.5, 1.0]);
}

#[test]
fn normalization_is_monotonic() {
    let range = SignalRange {
        min: -50,
        max: 70,
        degenerate: false,
    };
    let mut prev = range.normalize(-50);
    assert_eq!(prev, 0.0);
    for s in -49..=70 {
        let v = range.normalize(s);
        assert!((0.0..=1.0).contains(&v));
        assert!(v >= prev, "{s}");
        prev = v;
    }
    assert_eq!(prev, 1.0);
}

#[test]
fn range_is_dataset_wide_not_per_frame() {
    let signals = Layer::from_vec(2, 1, 2, vec![0, 5, 5, 10]).unwrap();
    let objects = Layer::from_vec(2, 1, 2, vec![0; 4]).unwrap();
    let out = normalize_signal(&signals, &objects).unwrap();
    assert_eq!(out.values.frame(0), &[0.0, 0.5]);
    assert_eq!(out.values.frame(1), &[0.5, 1.0]);
}

#[test]
fn occupied_cells_are_suppressed() {
    let signals = layer(vec![0, 10, 10, 5]);
    let objects = layer(vec![0, 1, 0, 2]);
    let out = normalize_signal(&signals, &objects).unwrap();
    assert_eq!(out.values.as_slice(), &[0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn all_zero_signal_is_degenerate_not_an_error() {
    let signals = layer(vec![0; 6]);
    let objects = layer(vec![0, 1, 0, 0, 2, 0]);
    let out = normalize_signal(&signals, &objects).unwrap();
    assert!(out.range.degenerate);
    assert!(out.values.as_slice().iter().all(|v| *v == 0.0));
}

#[test]
fn shape_mismatch_is_rejected() {
    let signals = layer(vec![0; 3]);
    let objects = layer(vec![0; 4]);
    assert!(normalize_signal(&signals, &objects).is_err());
}
