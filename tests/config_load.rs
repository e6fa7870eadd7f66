// tests/config_load.rs
use linkwatch::config::{load_default, load_from, ENV_CONFIG_PATH};
use std::{env, fs};

const MINIMAL: &str = r#"
bot_token = "ENV"
chat_id = "-1001"
youtube_channels = ["UC1", "UC1", ""]

[threads]
youtube = "2"
medium = "3"
blog = "4"

[pacing]
fetch_delay_ms = 0
"#;

#[serial_test::serial]
#[test]
fn env_token_is_resolved() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("linkwatch.toml");
    fs::write(&p, MINIMAL).unwrap();

    env::set_var("TELEGRAM_BOT_TOKEN", "999:secret");
    let cfg = load_from(&p).unwrap();
    env::remove_var("TELEGRAM_BOT_TOKEN");

    assert_eq!(cfg.bot_token, "999:secret");
    assert_eq!(cfg.youtube_channels, vec!["UC1".to_string()]);
    assert_eq!(cfg.pacing.fetch_delay_ms, 0);
    assert_eq!(cfg.pacing.notify_delay_ms, 3_000);
}

#[serial_test::serial]
#[test]
fn env_token_missing_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("linkwatch.toml");
    fs::write(&p, MINIMAL).unwrap();

    env::remove_var("TELEGRAM_BOT_TOKEN");
    let err = load_from(&p).unwrap_err();
    assert!(format!("{err:#}").contains("TELEGRAM_BOT_TOKEN"));
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // Isolate CWD so a real config/ in the repo is never picked up
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_CONFIG_PATH);
    env::set_var("TELEGRAM_BOT_TOKEN", "t");

    // 1) nothing on disk -> error
    assert!(load_default().is_err());

    // 2) fallback config/linkwatch.toml
    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(tmp.path().join("config/linkwatch.toml"), MINIMAL).unwrap();
    assert_eq!(load_default().unwrap().chat_id, "-1001");

    // 3) env wins, json by extension
    let p_json = tmp.path().join("other.json");
    fs::write(
        &p_json,
        r#"{"bot_token":"x","chat_id":"-2","threads":{"youtube":"1","medium":"2","blog":"3"}}"#,
    )
    .unwrap();
    env::set_var(ENV_CONFIG_PATH, p_json.display().to_string());
    assert_eq!(load_default().unwrap().chat_id, "-2");

    // 4) env pointing nowhere is an error, not a silent fallback
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml").display().to_string());
    assert!(load_default().is_err());

    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var("TELEGRAM_BOT_TOKEN");
    env::set_current_dir(&old).unwrap();
}

#[test]
fn unparseable_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("bad.toml");
    fs::write(&p, "bot_token = [").unwrap();
    assert!(load_from(&p).is_err());
}
