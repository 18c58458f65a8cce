use std::time::Duration;

use anyhow::Result;
use clap::Command;
use codenote_types::{CommentLevel, Language};
use serial_test::serial;

use super::*;

fn command() -> Command {
    return Command::new("codenote").args(Config::args());
}

#[tokio::test]
#[serial]
async fn it_uses_defaults_without_a_config_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing.toml");
    let matches = command().try_get_matches_from(vec![
        "codenote",
        "--config-file",
        missing.to_str().unwrap(),
    ])?;

    Config::load(command(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::BackendUrl), "http://localhost:8000");
    assert_eq!(Config::language()?, Language::Python);
    assert_eq!(Config::comment_level()?, CommentLevel::Standard);
    assert_eq!(Config::request_timeout()?, Duration::from_secs(60));

    return Ok(());
}

#[tokio::test]
#[serial]
async fn it_reads_the_config_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "backend-url = \"http://annotate.internal:9000\"\nlanguage = \"go\"\nrequest-timeout = 1500\n",
    )?;
    let matches =
        command().try_get_matches_from(vec!["codenote", "--config-file", path.to_str().unwrap()])?;

    Config::load(command(), vec![&matches]).await?;

    assert_eq!(
        Config::get(ConfigKey::BackendUrl),
        "http://annotate.internal:9000"
    );
    assert_eq!(Config::language()?, Language::Go);
    assert_eq!(Config::request_timeout()?, Duration::from_millis(1500));

    return Ok(());
}

#[tokio::test]
#[serial]
async fn it_lets_arguments_override_the_config_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "comment-level = \"minimal\"\n")?;
    let matches = command().try_get_matches_from(vec![
        "codenote",
        "--config-file",
        path.to_str().unwrap(),
        "--comment-level",
        "detailed",
    ])?;

    Config::load(command(), vec![&matches]).await?;

    assert_eq!(Config::comment_level()?, CommentLevel::Detailed);

    return Ok(());
}

#[tokio::test]
#[serial]
async fn it_rejects_unknown_values_in_the_config_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "language = \"cobol\"\n")?;
    let matches =
        command().try_get_matches_from(vec!["codenote", "--config-file", path.to_str().unwrap()])?;

    let err = Config::load(command(), vec![&matches]).await.unwrap_err();

    assert!(err.to_string().contains("invalid value for key 'language': cobol"));

    return Ok(());
}

#[test]
fn it_rejects_unknown_values_on_the_command_line() {
    let res = command().try_get_matches_from(vec!["codenote", "--language", "cobol"]);

    assert!(res.is_err());
}

#[test]
#[serial]
fn it_rejects_a_zero_timeout() {
    Config::set(ConfigKey::RequestTimeout, "0");

    assert!(Config::request_timeout().is_err());

    Config::set(ConfigKey::RequestTimeout, &Config::default(ConfigKey::RequestTimeout));
}

#[test]
fn it_serializes_a_commented_default_config() {
    let toml_str = Config::serialize_default(command());

    assert!(toml_str.contains("# Base URL of the annotation backend\nbackend-url = \"http://localhost:8000\""));
    assert!(toml_str.contains("language = \"python\""));
    assert!(toml_str.contains("[possible values: minimal, standard, detailed]"));
    assert!(toml_str.contains("request-timeout = 60000"));
    assert!(!toml_str.contains("config-file"));

    let doc = toml_str.parse::<toml_edit::Document>().unwrap();
    assert_eq!(doc["comment-level"].as_str(), Some("standard"));
}
