use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    insta::assert_snapshot!(res, @r###"
    # Base URL of the log analysis service.
    api-url = "http://localhost:8000"

    # Time to wait in milliseconds before timing out when health checking the log analysis service.
    backend-health-check-timeout = 1000

    # Sets code syntax highlighting theme.
    theme = "base16-ocean.dark"

    # Your user name displayed in all chat bubbles.
    # username = ""
    "###);
}

#[test]
fn it_has_a_loopback_default_api_url() {
    assert_eq!(Config::default(ConfigKey::ApiUrl), "http://localhost:8000");
}

#[test]
fn it_defaults_to_a_username() {
    assert!(!Config::default(ConfigKey::Username).is_empty());
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec!["logchat", "-c", "./config.example.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["logchat", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}
