use super::*;

fn two_by_one() -> Frame {
    Frame {
        index: FrameIndex(0),
        rows: 1,
        cols: 2,
        rgb: vec![1.0, 0.0, 0.0, 0.0, 0.5, 1.0],
    }
}

#[test]
fn quantizes_without_scaling() {
    let px = two_by_one().to_rgb8(1).unwrap();
    assert_eq!((px.width, px.height), (2, 1));
    assert_eq!(px.data, vec![255, 0, 0, 0, 128, 255]);
}

#[test]
fn upscales_cells_into_blocks() {
    let px = two_by_one().to_rgb8(2).unwrap();
    assert_eq!((px.width, px.height), (4, 2));
    let row = [255u8, 0, 0, 255, 0, 0, 0, 128, 255, 0, 128, 255];
    assert_eq!(&px.data[..12], &row);
    assert_eq!(&px.data[12..], &row);
}

#[test]
fn zero_scale_is_rejected() {
    assert!(two_by_one().to_rgb8(0).is_err());
}

#[test]
fn pixel_reads_back_cell() {
    assert_eq!(two_by_one().pixel(0, 1), Rgb::new(0.0, 0.5, 1.0));
}
