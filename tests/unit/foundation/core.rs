use super::*;

#[test]
fn frame_index_one_based_round_trip() {
    assert_eq!(FrameIndex::from_one_based(0), None);
    assert_eq!(FrameIndex::from_one_based(1), Some(FrameIndex(0)));
    assert_eq!(FrameIndex(4).one_based(), 5);
}

#[test]
fn fps_from_interval() {
    let fps = Fps::from_interval_ms(500).unwrap();
    assert_eq!(fps, Fps { num: 1000, den: 500 });
    assert!((fps.as_f64() - 2.0).abs() < 1e-12);
    assert!((fps.frame_duration_secs() - 0.5).abs() < 1e-12);
    assert!(Fps::from_interval_ms(0).is_err());
    assert!(Fps::new(0, 1).is_err());
}

#[test]
fn rgb_add_clamps_and_quantizes() {
    let c = Rgb::new(0.8, 0.2, 1.0).saturating_add(Rgb::new(0.5, 0.0, 0.5));
    assert_eq!(c, Rgb::new(1.0, 0.2, 1.0));
    assert_eq!(Rgb::WHITE.scaled(0.5).to_u8(), [128, 128, 128]);
    assert_eq!(Rgb::from_u8(255, 0, 0), Rgb::new(1.0, 0.0, 0.0));
}
