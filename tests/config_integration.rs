//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use gyro4d::config::AppConfig;
use gyro4d_input::InputMode;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("G4D_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("G4D_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_nested_numbers() {
    std::env::set_var("G4D_DRAG__DECAY_RATE", "0.95");
    std::env::set_var("G4D_INPUT__START_MODE", "drag");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("G4D_DRAG__DECAY_RATE");
    std::env::remove_var("G4D_INPUT__START_MODE");

    assert_eq!(config.drag.decay_rate, 0.95);
    assert_eq!(config.input.start_mode, InputMode::Drag);
    assert!(config.validate().is_empty());
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    std::env::remove_var("G4D_WINDOW__TITLE");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let loaded = AppConfig::load_from("config").unwrap();
    let builtin = AppConfig::default();
    if !cwd.join("config/user.toml").exists() {
        assert_eq!(loaded.window.title, builtin.window.title);
        assert_eq!(loaded.drag.tick_interval_ms, builtin.drag.tick_interval_ms);
        assert_eq!(loaded.sensor.smoothing_alpha, builtin.sensor.smoothing_alpha);
        assert_eq!(loaded.input.start_mode, InputMode::Sensor);
    }
    assert!(loaded.validate().is_empty());
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.tesseract.half_size, 100.0);
    assert_eq!(config.rendering.stroke_width, 6.0);
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = std::env::temp_dir().join(format!("gyro4d_config_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("default.toml"), "[tesseract]\nhalf_size = 50.0\n").unwrap();
    std::fs::write(dir.join("user.toml"), "[tesseract]\nhalf_size = 80.0\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config.tesseract.half_size, 80.0);
    assert_eq!(config.tesseract.viewer_distance_4d, 300.0);
}

#[test]
#[serial]
fn test_serialized_config_round_trips_through_figment() {
    let dir = std::env::temp_dir().join(format!("gyro4d_roundtrip_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let mut config = AppConfig::default();
    config.drag.sensitivity = 0.02;
    config.rendering.line_color = [1.0, 0.0, 0.0, 1.0];
    std::fs::write(dir.join("default.toml"), toml::to_string(&config).unwrap()).unwrap();

    let loaded = AppConfig::load_from(&dir).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(loaded.drag.sensitivity, 0.02);
    assert_eq!(loaded.to_line_style().color, [1.0, 0.0, 0.0, 1.0]);
}
