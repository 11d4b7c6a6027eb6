use super::*;

use std::collections::HashMap;

#[test]
fn defaults_point_at_local_server_and_data_dir() {
    let settings = Settings::default();
    assert_eq!(settings.server_url, "http://127.0.0.1:8000");
    assert_eq!(settings.store_url, "sqlite://./data/incident_chat.db");
    assert!(!settings.reject_empty_questions);
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(CONFIG_FILE);
    fs::write(
        &path,
        "server_url = \"http://chat.internal:9000\"\nreject_empty_questions = \"true\"\n",
    )
    .expect("write config");

    let mut settings = Settings::default();
    apply_file(&mut settings, &path);

    assert_eq!(settings.server_url, "http://chat.internal:9000");
    assert_eq!(settings.store_url, Settings::default().store_url);
    assert!(settings.reject_empty_questions);
}

#[test]
fn bare_toml_bool_is_read_alongside_strings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(CONFIG_FILE);
    fs::write(
        &path,
        "server_url = \"http://chat.internal:9000\"\n\
         store_url = \"sqlite::memory:\"\n\
         reject_empty_questions = true\n",
    )
    .expect("write config");

    let mut settings = Settings::default();
    apply_file(&mut settings, &path);

    assert_eq!(settings.server_url, "http://chat.internal:9000");
    assert_eq!(settings.store_url, "sqlite::memory:");
    assert!(settings.reject_empty_questions);
}

#[test]
fn wrongly_typed_value_is_skipped_without_dropping_the_rest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "server_url = 8000\nstore_url = \"./cache.db\"\n").expect("write config");

    let mut settings = Settings::default();
    apply_file(&mut settings, &path);

    assert_eq!(settings.server_url, Settings::default().server_url);
    assert_eq!(settings.store_url, "./cache.db");
}

#[test]
fn missing_or_malformed_file_keeps_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = Settings::default();
    apply_file(&mut settings, &dir.path().join("absent.toml"));
    assert_eq!(settings, Settings::default());

    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "server_url = [1, 2").expect("write config");
    apply_file(&mut settings, &path);
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_short_name() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("CHAT_SERVER_URL", "http://short:1"),
        ("APP__SERVER_URL", "http://prefixed:2"),
        ("CHAT_STORE_URL", "sqlite::memory:"),
        ("APP__REJECT_EMPTY_QUESTIONS", "yes"),
    ]);

    let mut settings = Settings::default();
    apply_env(&mut settings, |name| env.get(name).map(|v| v.to_string()));

    assert_eq!(settings.server_url, "http://prefixed:2");
    assert_eq!(settings.store_url, "sqlite::memory:");
    assert!(settings.reject_empty_questions);
}

#[test]
fn unparseable_flag_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, |name| {
        (name == "APP__REJECT_EMPTY_QUESTIONS").then(|| "maybe".to_string())
    });
    assert!(!settings.reject_empty_questions);
}

#[test]
fn server_url_must_be_http() {
    assert_eq!(
        validate_server_url(" http://localhost:8000/ ").expect("valid"),
        "http://localhost:8000"
    );
    assert!(validate_server_url("localhost:8000").is_err());
    assert!(validate_server_url("ftp://localhost").is_err());
    assert!(validate_server_url("not a url").is_err());
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_store_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(normalize_store_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(normalize_store_url("   "), Settings::default().store_url);
}
