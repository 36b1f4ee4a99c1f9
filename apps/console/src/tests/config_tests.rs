use super::{load_settings_from, Settings};

use std::{
    env, fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_settings_file(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("verify_console_settings_{suffix}.toml"));
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn missing_file_yields_defaults() {
    let settings = load_settings_from(Path::new("/nonexistent/console.toml"), no_env);
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        "api_base_url = \"https://verify.example.org\"\nlog_filter = \"debug\"\n",
    );
    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings.api_base_url, "https://verify.example.org");
    assert_eq!(settings.log_filter, "debug");
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn unparseable_file_is_ignored() {
    let path = temp_settings_file("api_base_url = [1, 2]\n");
    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings, Settings::default());
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn app_prefixed_env_wins_over_short_name_and_file() {
    let path = temp_settings_file("api_base_url = \"https://from-file.example.org\"\n");
    let settings = load_settings_from(&path, |key| match key {
        "VERIFY_API_URL" => Some("https://short.example.org".into()),
        "APP__API_BASE_URL" => Some("https://prefixed.example.org".into()),
        _ => None,
    });
    assert_eq!(settings.api_base_url, "https://prefixed.example.org");
    assert_eq!(settings.log_filter, "info");
    fs::remove_file(path).expect("cleanup");
}
