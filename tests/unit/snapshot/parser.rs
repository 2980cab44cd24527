use super::*;
use crate::test_support::{cell, scratch_dir, snapshot_text, write_worker};

#[test]
fn parse_strips_halo() {
    let text = snapshot_text(2, 3, |r, c| cell((r * 10 + c) as i64, 0));
    let snap = parse_snapshot(&text, "t").unwrap();
    assert_eq!((snap.x, snap.y), (4, 5));
    assert_eq!((snap.rows(), snap.cols()), (2, 3));
    let objects: Vec<i64> = snap.interior.chunks(CHANNELS).map(|c| c[0]).collect();
    assert_eq!(objects, vec![0, 1, 2, 10, 11, 12]);
    assert!(!snap.interior.contains(&-1));
}

#[test]
fn parse_accepts_newlines_between_values() {
    let text = snapshot_text(1, 1, |_, _| cell(3, 1)).replace(' ', "\n");
    let snap = parse_snapshot(&text, "t").unwrap();
    assert_eq!(snap.interior, cell(3, 1).to_vec());
}

#[test]
fn parse_rejects_wrong_count() {
    let mut text = snapshot_text(1, 1, |_, _| cell(0, 0));
    text.push_str(" 5");
    let err = parse_snapshot(&text, "w/grid_1.txt").unwrap_err();
    assert!(matches!(err, GridError::Format(_)));
    assert!(err.to_string().contains("w/grid_1.txt"));
}

#[test]
fn parse_rejects_garbage_and_tiny_tiles() {
    assert!(matches!(
        parse_snapshot("3 3 x", "t"),
        Err(GridError::Format(_))
    ));
    assert!(matches!(parse_snapshot("", "t"), Err(GridError::Format(_))));
    assert!(matches!(
        parse_snapshot(&format!("2 2 {}", "0 ".repeat(36)), "t"),
        Err(GridError::Format(_))
    ));
}

#[test]
fn parse_rejects_header_whose_cell_count_overflows() {
    let err = parse_snapshot("4294967296 4294967296 0 0 0", "huge.txt").unwrap_err();
    assert!(matches!(err, GridError::Format(_)));
    assert!(err.to_string().contains("too large"));
    assert!(err.to_string().contains("huge.txt"));

    let err = parse_snapshot(&format!("{} 3 0", i64::MAX), "t").unwrap_err();
    assert!(matches!(err, GridError::Format(_)));
}

#[test]
fn frame_index_from_names() {
    assert_eq!(frame_index_from_file_name("grid_1.txt").unwrap(), FrameIndex(0));
    assert_eq!(frame_index_from_file_name("grid_12.txt").unwrap(), FrameIndex(11));
    assert_eq!(frame_index_from_file_name("a_b_3.txt").unwrap(), FrameIndex(2));
    assert_eq!(frame_index_from_file_name("7").unwrap(), FrameIndex(6));
    assert!(frame_index_from_file_name("grid_0.txt").is_err());
    assert!(frame_index_from_file_name("grid_x.txt").is_err());
    assert!(frame_index_from_file_name("notes.md").is_err());
}

#[test]
fn load_orders_frames_by_index() {
    let root = scratch_dir("unit_fixtures", "parser_load_orders");
    let frames: Vec<String> = (0..12)
        .map(|f| snapshot_text(2, 2, move |_, _| cell(f, 0)))
        .collect();
    let dir = write_worker(&root, 1, 1, &frames);
    std::fs::write(dir.join(".DS_Store"), "junk").unwrap();

    let tile = load_worker_tile(&dir).unwrap();
    assert_eq!((tile.frames(), tile.rows(), tile.cols()), (12, 2, 2));
    for f in 0..12 {
        assert_eq!(tile.volume().cell(f, 1, 1)[0], f as i64);
    }
}

#[test]
fn load_reports_missing_frames() {
    let root = scratch_dir("unit_fixtures", "parser_missing_frames");
    let dir = root.join("1_1");
    std::fs::create_dir_all(&dir).unwrap();
    let text = snapshot_text(1, 1, |_, _| cell(0, 0));
    std::fs::write(dir.join("grid_1.txt"), &text).unwrap();
    std::fs::write(dir.join("grid_3.txt"), &text).unwrap();

    let err = load_worker_tile(&dir).unwrap_err();
    assert!(matches!(err, GridError::Format(_)));
    assert!(err.to_string().contains("missing frame(s) [2]"), "{err}");
}

#[test]
fn load_rejects_duplicate_and_resized_frames() {
    let root = scratch_dir("unit_fixtures", "parser_duplicates");
    let dir = root.join("1_1");
    std::fs::create_dir_all(&dir).unwrap();
    let text = snapshot_text(1, 1, |_, _| cell(0, 0));
    std::fs::write(dir.join("grid_1.txt"), &text).unwrap();
    std::fs::write(dir.join("other_1.txt"), &text).unwrap();
    assert!(matches!(
        load_worker_tile(&dir),
        Err(GridError::Format(_))
    ));

    let root = scratch_dir("unit_fixtures", "parser_resized");
    write_worker(
        &root,
        1,
        1,
        &[
            snapshot_text(1, 1, |_, _| cell(0, 0)),
            snapshot_text(2, 1, |_, _| cell(0, 0)),
        ],
    );
    let err = load_worker_tile(&root.join("1_1")).unwrap_err();
    assert!(err.to_string().contains("grid_2.txt"), "{err}");
}

#[test]
fn load_rejects_empty_directory() {
    let root = scratch_dir("unit_fixtures", "parser_empty");
    let dir = root.join("1_1");
    std::fs::create_dir_all(&dir).unwrap();
    assert!(matches!(
        load_worker_tile(&dir),
        Err(GridError::Format(_))
    ));
}
