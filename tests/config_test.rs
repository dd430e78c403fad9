use teambox::config::*;
use tempfile::TempDir;

#[test]
fn test_default_config_targets_hosted_service() {
    let config = ClientConfig::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.api_version, "1");
    assert!(config.materialize_responses);
    assert!(config.username.is_none());
}

#[test]
fn test_api_root_strips_trailing_slash() {
    let config = ClientConfig {
        base_url: "https://teambox.example.org/".to_string(),
        ..ClientConfig::default()
    };
    assert_eq!(config.api_root(), "https://teambox.example.org/api/1");
}

#[test]
fn test_load_missing_config_returns_default() {
    let dir = TempDir::new().unwrap();
    let loaded = load_config(&dir.path().join("absent.json")).unwrap();
    assert_eq!(loaded, ClientConfig::default());
}

#[test]
fn test_save_and_load_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join(CONFIG_FILENAME);
    let config = ClientConfig {
        username: Some("alice".to_string()),
        password: Some("secret".to_string()),
        materialize_responses: false,
        ..ClientConfig::default()
    };
    save_config(&path, &config).unwrap();
    assert!(!path.with_extension("tmp").exists());

    let loaded = load_config(&path).unwrap();
    assert_eq!(config, loaded);
}

#[test]
fn test_partial_config_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILENAME);
    std::fs::write(&path, r#"{"username": "bob"}"#).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.username.as_deref(), Some("bob"));
    assert_eq!(loaded.base_url, DEFAULT_BASE_URL);
    assert!(loaded.materialize_responses);
}

#[test]
fn test_invalid_config_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILENAME);
    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(
        load_config(&path),
        Err(teambox::errors::TeamboxError::Config { .. })
    ));
}

#[test]
fn test_default_config_path_ends_with_teambox_config() {
    let path = default_config_path();
    assert!(path.ends_with("teambox/config.json"));
}

// Environment variables are process-wide, so every override is checked here.
#[test]
fn test_env_overrides_replace_connection_settings() {
    std::env::set_var("TEAMBOX_BASE_URL", "http://teambox.internal/");
    std::env::set_var("TEAMBOX_USERNAME", "carol");
    std::env::set_var("TEAMBOX_PASSWORD", "hunter2");

    let mut config = ClientConfig {
        username: Some("alice".to_string()),
        ..ClientConfig::default()
    };
    config.apply_env_overrides();

    std::env::remove_var("TEAMBOX_BASE_URL");
    std::env::remove_var("TEAMBOX_USERNAME");
    std::env::remove_var("TEAMBOX_PASSWORD");

    assert_eq!(config.base_url, "http://teambox.internal/");
    assert_eq!(config.username.as_deref(), Some("carol"));
    assert_eq!(config.password.as_deref(), Some("hunter2"));
    assert_eq!(config.api_root(), "http://teambox.internal/api/1");
    assert_eq!(config.api_version, "1");
    assert!(config.materialize_responses);

    let mut untouched = ClientConfig::default();
    untouched.apply_env_overrides();
    assert_eq!(untouched, ClientConfig::default());
}
