use super::*;
use crate::foundation::core::CHANNELS;
use crate::grid::volume::StateVolume;
use crate::test_support::{cell, scratch_dir, snapshot_text, write_worker};

fn tile(frames: usize, rows: usize, cols: usize) -> WorkerTile {
    let volume =
        StateVolume::from_vec(frames, rows, cols, vec![0; frames * rows * cols * CHANNELS])
            .unwrap();
    WorkerTile::new("mem", volume)
}

fn key(row: u32, col: u32) -> PartitionKey {
    PartitionKey::new(row, col).unwrap()
}

#[test]
fn parses_directory_names() {
    assert_eq!(PartitionKey::from_dir_name("2_3").unwrap(), key(2, 3));
    assert_eq!(PartitionKey::from_dir_name("10_1").unwrap(), key(10, 1));
    for bad in ["0_1", "1_0", "1-1", "a_b", "1_2_3", "12", ""] {
        assert!(
            matches!(PartitionKey::from_dir_name(bad), Err(GridError::Topology(_))),
            "{bad}"
        );
    }
}

#[test]
fn keys_order_by_row_then_col() {
    let mut keys = vec![key(2, 1), key(1, 2), key(1, 1), key(2, 2)];
    keys.sort();
    assert_eq!(keys, vec![key(1, 1), key(1, 2), key(2, 1), key(2, 2)]);
    assert_eq!(key(2, 1).to_string(), "(2, 1)");
}

#[test]
fn validate_accepts_rectangle_with_mixed_extents() {
    let mesh = PartitionMesh::from_tiles([
        (key(1, 1), tile(2, 3, 4)),
        (key(1, 2), tile(2, 3, 5)),
        (key(2, 1), tile(2, 6, 4)),
        (key(2, 2), tile(2, 6, 5)),
    ]);
    assert_eq!(mesh.validate().unwrap(), MeshShape { rows: 2, cols: 2 });
    let summary = mesh.summary().unwrap();
    assert_eq!((summary.total_rows, summary.total_cols), (9, 9));
    assert_eq!(summary.frames, 2);
    assert_eq!(summary.workers.len(), 4);
}

#[test]
fn validate_names_missing_partition() {
    let mesh = PartitionMesh::from_tiles([
        (key(1, 1), tile(1, 3, 3)),
        (key(1, 2), tile(1, 3, 3)),
        (key(2, 2), tile(1, 3, 3)),
    ]);
    let err = mesh.validate().unwrap_err();
    assert!(matches!(err, GridError::Topology(_)));
    assert!(err.to_string().contains("(2, 1)"), "{err}");
}

#[test]
fn validate_rejects_gap_before_first_row() {
    let mesh = PartitionMesh::from_tiles([(key(2, 1), tile(1, 3, 3))]);
    let err = mesh.validate().unwrap_err();
    assert!(err.to_string().contains("(1, 1)"), "{err}");
}

#[test]
fn validate_rejects_inconsistent_extents_and_frames() {
    let mesh = PartitionMesh::from_tiles([
        (key(1, 1), tile(1, 3, 3)),
        (key(1, 2), tile(1, 4, 3)),
    ]);
    let err = mesh.validate().unwrap_err();
    assert!(err.to_string().contains("(1, 2) has 4 rows"), "{err}");

    let mesh = PartitionMesh::from_tiles([
        (key(1, 1), tile(1, 3, 3)),
        (key(2, 1), tile(1, 3, 2)),
    ]);
    let err = mesh.validate().unwrap_err();
    assert!(err.to_string().contains("(2, 1) has 2 columns"), "{err}");

    let mesh = PartitionMesh::from_tiles([
        (key(1, 1), tile(2, 3, 3)),
        (key(1, 2), tile(3, 3, 3)),
    ]);
    assert!(matches!(mesh.validate(), Err(GridError::Topology(_))));
}

#[test]
fn validate_rejects_empty_mesh() {
    assert!(matches!(
        PartitionMesh::default().validate(),
        Err(GridError::Topology(_))
    ));
}

#[test]
fn discover_loads_workers_and_skips_files() {
    let root = scratch_dir("unit_fixtures", "registry_discover");
    let frame = snapshot_text(2, 2, |_, _| cell(0, 1));
    for (r, c) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
        write_worker(&root, r, c, std::slice::from_ref(&frame));
    }
    std::fs::write(root.join("README.txt"), "not a worker").unwrap();

    for parallel in [false, true] {
        let mesh = discover_partitions(&root, parallel).unwrap();
        assert_eq!(mesh.len(), 4);
        assert_eq!(mesh.validate().unwrap(), MeshShape { rows: 2, cols: 2 });
        let keys: Vec<PartitionKey> = mesh.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![key(1, 1), key(1, 2), key(2, 1), key(2, 2)]);
    }
}

#[test]
fn discover_rejects_badly_named_and_duplicate_workers() {
    let root = scratch_dir("unit_fixtures", "registry_bad_name");
    let frame = snapshot_text(1, 1, |_, _| cell(0, 0));
    write_worker(&root, 1, 1, std::slice::from_ref(&frame));
    std::fs::create_dir_all(root.join("worker-a")).unwrap();
    assert!(matches!(
        discover_partitions(&root, false),
        Err(GridError::Topology(_))
    ));

    let root = scratch_dir("unit_fixtures", "registry_duplicate_key");
    write_worker(&root, 1, 1, std::slice::from_ref(&frame));
    let dup = root.join("01_1");
    std::fs::create_dir_all(&dup).unwrap();
    std::fs::write(dup.join("grid_1.txt"), &frame).unwrap();
    let err = discover_partitions(&root, false).unwrap_err();
    assert!(err.to_string().contains("claimed by both"), "{err}");
}
