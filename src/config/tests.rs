use super::*;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
    assert!(config.fallback.window);
    assert!(config.fallback.default_open);
    assert_eq!(config.batch.exit_policy, ExitPolicy::Any);
    assert!(!config.tool.candidates.is_empty());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[tool]\nstartup_timeout = \"750ms\"\n\n[batch]\nexit_policy = \"all\"\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.tool.startup_timeout, Duration::from_millis(750));
    assert_eq!(config.tool.poll_interval, POLL_INTERVAL);
    assert_eq!(config.batch.exit_policy, ExitPolicy::All);
    assert!(config.fallback.default_open);
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[batch]\nexit_policy = \"sometimes\"\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_save_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.fallback.window = false;
    config.save_to(&path).unwrap();

    assert!(!Config::load_from(&path).unwrap().fallback.window);
}

#[test]
fn test_set_and_get_values() {
    let mut config = Config::default();
    config.set_value("tool.startup_timeout", "5s").unwrap();
    config.set_value("fallback.default_open", "false").unwrap();
    config.set_value("batch.exit_policy", "ALL").unwrap();

    assert_eq!(config.get_value("tool.startup_timeout").unwrap(), "5s");
    assert_eq!(config.get_value("fallback.default_open").unwrap(), "false");
    assert_eq!(config.get_value("batch.exit_policy").unwrap(), "all");
}

#[test]
fn test_invalid_values_are_rejected() {
    let mut config = Config::default();
    assert!(config.set_value("fallback.window", "maybe").is_err());
    assert!(config.set_value("tool.poll_interval", "soon").is_err());
    assert!(config.set_value("batch.exit_policy", "most").is_err());
    assert!(config.set_value("editor.command", "code .").is_err());
    assert!(config.get_value("nope").is_err());
}

#[test]
fn test_every_listed_key_round_trips() {
    let mut config = Config::default();
    for key in Config::KEYS {
        let value = config.get_value(key).unwrap();
        config.set_value(key, &value).unwrap();
        assert_eq!(config.get_value(key).unwrap(), value, "{key}");
    }
}

#[test]
fn test_unknown_key_error_lists_valid_keys() {
    let err = Config::default().get_value("tool.colour").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("tool.colour"));
    assert!(message.contains("batch.exit_policy"));
}
