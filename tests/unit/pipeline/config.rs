use super::*;
use crate::test_support::scratch_dir;

#[test]
fn defaults_are_enumerated() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.grids_dir, PathBuf::from("lib/grid_iterations"));
    assert_eq!(cfg.color_config, PathBuf::from("config/animation_config.csv"));
    assert_eq!(cfg.interval_ms, 500);
    assert_eq!(cfg.scale, 1);
    assert!(!cfg.parallel);
    assert_eq!(cfg.threads, None);
    assert_eq!(cfg.fps().unwrap(), Fps { num: 1000, den: 500 });
}

#[test]
fn project_layout_resolves_under_project_dir() {
    let cfg = RenderConfig::for_project(Path::new("sim/rabbits"));
    assert_eq!(cfg.grids_dir, PathBuf::from("sim/rabbits/lib/grid_iterations"));
    assert_eq!(
        cfg.color_config,
        PathBuf::from("sim/rabbits/config/animation_config.csv")
    );
}

#[test]
fn validate_rejects_zeroes() {
    for cfg in [
        RenderConfig {
            interval_ms: 0,
            ..RenderConfig::default()
        },
        RenderConfig {
            scale: 0,
            ..RenderConfig::default()
        },
        RenderConfig {
            threads: Some(0),
            ..RenderConfig::default()
        },
    ] {
        assert!(matches!(cfg.validate(), Err(GridError::Validation(_))));
    }
}

#[test]
fn json_config_fills_missing_fields() {
    let dir = scratch_dir("unit_fixtures", "pipeline_json_config");
    let path = dir.join("run.json");
    std::fs::write(&path, r#"{ "grids_dir": "g", "scale": 4, "parallel": true }"#).unwrap();
    let cfg = RenderConfig::from_json_path(&path).unwrap();
    assert_eq!(cfg.grids_dir, PathBuf::from("g"));
    assert_eq!(cfg.scale, 4);
    assert!(cfg.parallel);
    assert_eq!(cfg.interval_ms, 500);

    std::fs::write(&path, r#"{ "grid_dir": "typo" }"#).unwrap();
    assert!(RenderConfig::from_json_path(&path).is_err());
}
