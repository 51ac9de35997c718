// ABOUTME: Tests for configuration file loading, validation, and merging
// ABOUTME: Tests TOML parsing, XDG path resolution, and hierarchical config precedence

use kitcat::config::Config;
use kitcat_core::ResizeFilter;
use serial_test::serial;
use tempfile::TempDir;

#[test]
fn test_config_deserialize_complete() {
    let toml_content = r#"
        max_width = 1280
        max_height = 720
        filter = "lanczos3"
    "#;

    let config: Config = toml::from_str(toml_content).expect("Should parse valid TOML");

    assert_eq!(config.max_width, Some(1280));
    assert_eq!(config.max_height, Some(720));
    assert_eq!(config.filter, Some(ResizeFilter::Lanczos3));
}

#[test]
fn test_config_deserialize_empty() {
    let config: Config = toml::from_str("").expect("Should parse empty TOML");
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_invalid_filter() {
    let result: Result<Config, _> = toml::from_str(r#"filter = "bicubic""#);
    let err = result.expect_err("Should reject unknown filter");
    assert!(err.to_string().contains("Invalid filter 'bicubic'"));
}

#[test]
fn test_config_invalid_type() {
    let result: Result<Config, _> = toml::from_str(r#"max_width = "wide""#);
    assert!(result.is_err());
}

#[test]
fn test_load_from_file_rejects_zero_limit() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "max_width = 0\n").unwrap();

    let err = Config::load_from_file(&path).expect_err("Zero width should be invalid");
    assert!(err.to_string().contains("max_width"));
}

#[test]
fn test_load_from_file_missing() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let err = Config::load_from_file(temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_load_from_paths_precedence() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let project = temp_dir.path().join("kitcat.toml");
    let user = temp_dir.path().join("user.toml");

    std::fs::write(&project, "max_width = 400\n").unwrap();
    std::fs::write(&user, "max_width = 900\nmax_height = 300\nfilter = \"gaussian\"\n").unwrap();

    // Highest precedence first
    let config = Config::load_from_paths(&[&project, &user]).expect("Should load configs");
    assert_eq!(config.max_width, Some(400));
    assert_eq!(config.max_height, Some(300));
    assert_eq!(config.filter, Some(ResizeFilter::Gaussian));
}

#[test]
fn test_load_from_paths_skips_missing_files() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let present = temp_dir.path().join("present.toml");
    std::fs::write(&present, "max_height = 200\n").unwrap();

    let config = Config::load_from_paths(&[temp_dir.path().join("missing.toml"), present])
        .expect("Should load available config");
    assert_eq!(config.max_height, Some(200));
    assert_eq!(config.max_width, None);
}

#[test]
#[serial]
fn test_config_paths_follow_xdg_config_home() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let previous = std::env::var_os("XDG_CONFIG_HOME");

    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    let paths = Config::get_config_paths();

    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }

    let expected = temp_dir.path().join("kitcat").join("config.toml");
    assert!(paths.contains(&expected), "paths: {:?}", paths);
    assert!(paths[0].ends_with("kitcat.toml"));
}

#[test]
#[serial]
fn test_load_uses_xdg_config() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let config_dir = temp_dir.path().join("kitcat");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "max_width = 321\n").unwrap();

    // An empty working directory, so no project kitcat.toml can shadow the XDG file
    let work_dir = TempDir::new().expect("Should create temp dir");
    let previous_dir = std::env::current_dir().expect("Should read current dir");
    let previous = std::env::var_os("XDG_CONFIG_HOME");

    std::env::set_current_dir(work_dir.path()).expect("Should enter temp dir");
    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    let result = Config::load();
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    std::env::set_current_dir(previous_dir).expect("Should restore current dir");

    let config = result.expect("Should load XDG config");
    assert_eq!(config.max_width, Some(321));
}

#[test]
#[serial]
fn test_project_config_overrides_xdg_config() {
    let xdg_dir = TempDir::new().expect("Should create temp dir");
    let config_dir = xdg_dir.path().join("kitcat");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "max_width = 321\nmax_height = 99\n").unwrap();

    let work_dir = TempDir::new().expect("Should create temp dir");
    std::fs::write(work_dir.path().join("kitcat.toml"), "max_width = 50\n").unwrap();

    let previous_dir = std::env::current_dir().expect("Should read current dir");
    let previous = std::env::var_os("XDG_CONFIG_HOME");

    std::env::set_current_dir(work_dir.path()).expect("Should enter temp dir");
    std::env::set_var("XDG_CONFIG_HOME", xdg_dir.path());
    let result = Config::load();
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    std::env::set_current_dir(previous_dir).expect("Should restore current dir");

    let config = result.expect("Should load layered config");
    assert_eq!(config.max_width, Some(50));
    assert_eq!(config.max_height, Some(99));
}
