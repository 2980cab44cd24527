//! Snapshot fixture writers shared by the unit and integration tests. The including module
//! provides `CHANNELS`.

use std::path::{Path, PathBuf};

use super::CHANNELS;

/// Fresh, empty directory under `target/<group>/<name>`.
pub fn scratch_dir(group: &str, name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join(group).join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Snapshot file content for an interior of `rows x cols` cells. Halo cells are filled with
/// `-1` so tests notice when they leak through.
pub fn snapshot_text(
    rows: usize,
    cols: usize,
    cell: impl Fn(usize, usize) -> [i64; CHANNELS],
) -> String {
    let (x, y) = (rows + 2, cols + 2);
    let mut out = vec![x.to_string(), y.to_string()];
    for i in 0..x {
        for j in 0..y {
            let halo = i == 0 || j == 0 || i == x - 1 || j == y - 1;
            let v = if halo {
                [-1; CHANNELS]
            } else {
                cell(i - 1, j - 1)
            };
            out.extend(v.iter().map(|n| n.to_string()));
        }
    }
    out.join(" ")
}

/// Write `frames` as `grid_1.txt`, `grid_2.txt`, ... into `<root>/<row>_<col>/`.
pub fn write_worker(root: &Path, row: u32, col: u32, frames: &[String]) -> PathBuf {
    let dir = root.join(format!("{row}_{col}"));
    std::fs::create_dir_all(&dir).unwrap();
    for (i, text) in frames.iter().enumerate() {
        std::fs::write(dir.join(format!("grid_{}.txt", i + 1)), text).unwrap();
    }
    dir
}

/// Cell with object `obj` and every signal channel set to `sig`.
pub fn cell(obj: i64, sig: i64) -> [i64; CHANNELS] {
    let mut c = [sig; CHANNELS];
    c[0] = obj;
    c
}
