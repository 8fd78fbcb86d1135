use fixturekit_core::{FootprintSize, ToolPreset, ToolShape, ValidationMode};
use fixturekit_settings::{Config, MeasurementSystem, SettingsError};
use tempfile::TempDir;

fn customized() -> Config {
    let mut config = Config::default();
    config.measurement_system = MeasurementSystem::Imperial;
    config.workspace.width = 1500.0;
    config.placement.validation_mode = ValidationMode::Clamp;
    config.placement.nudge_step = 5.0;
    config.placement.initial_preset = "jig".to_string();
    config.presets.push(
        ToolPreset::new(
            "jig",
            "Welding jig",
            FootprintSize::new(200.0, 150.0, 60.0),
            ToolShape::Custom,
        )
        .unwrap()
        .with_model("/models/jig.glb"),
    );
    config
}

#[test]
fn toml_file_survives_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
    assert_eq!(loaded.initial_preset().unwrap().label, "Welding jig");
}

#[test]
fn json_file_survives_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = customized();
    config.save_to_file(&path).unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn hand_written_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bench.toml");
    std::fs::write(
        &path,
        r#"
measurement_system = "metric"

[workspace]
width = 800.0
depth = 400.0
safe_zone_margin = 20.0

[placement]
validation_mode = "clamp"
initial_preset = "vise"

[[presets]]
id = "vise"
label = "Bench vise"
shape = "box"
size = { w = 150.0, d = 100.0, h = 80.0 }
"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.presets.len(), 1);
    assert_eq!(config.placement.nudge_step, 10.0);

    let ws = config.workspace_geometry().unwrap();
    let bounds = ws.safe_zone_bounds();
    assert_eq!(bounds.max_x, 780.0);
    assert_eq!(bounds.max_z, 380.0);
    assert_eq!(config.initial_preset().unwrap().resting_height(), 40.0);
}

#[test]
fn invalid_file_is_rejected_at_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"
[workspace]
width = 100.0
depth = 100.0
safe_zone_margin = 60.0
"#,
    )
    .unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Config(_)));
}

#[test]
fn invalid_config_is_not_saved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.presets.clear();
    assert!(config.save_to_file(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn malformed_and_missing_files() {
    let dir = TempDir::new().unwrap();

    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::JsonError(_))
    ));

    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "workspace = [").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));

    let missing = dir.path().join("missing.toml");
    assert!(matches!(
        Config::load_from_file(&missing),
        Err(SettingsError::IoError(_))
    ));
}
