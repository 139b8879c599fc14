//! Config tests.

use crate::config::{BotConfig, RecapConfig};
use chrono::NaiveTime;
use serial_test::serial;
use std::env;

const KEYS: &[&str] = &[
    "BOT_TOKEN",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "LOG_FILE",
    "REPORT_MAX_ITEMS",
    "REPORT_MAX_TEXT_LEN",
    "CHUNK_MAX_LEN",
    "GET_DEFAULT_LIMIT",
    "DAILY_RECAP_TIME",
    "HISTORY_GATEWAY_URL",
    "HISTORY_GATEWAY_TOKEN",
    "HISTORY_PAGE_SIZE",
    "HISTORY_MAX_PAGES",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "MODEL",
    "LLM_MAX_TOKENS",
    "LLM_SYSTEM_PROMPT",
    "SYSTEM_PROMPT",
];

fn reset_env() {
    for key in KEYS {
        env::remove_var(key);
    }
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("HISTORY_GATEWAY_URL", "http://127.0.0.1:8081");
    env::set_var("OPENAI_API_KEY", "test_key");
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    reset_env();

    let config = BotConfig::load(None).unwrap();
    config.validate().unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.log_file(), "logs/recap-bot.log");
    assert_eq!(config.recap.report_max_items, 20);
    assert_eq!(config.recap.report_max_text_len, 100);
    assert_eq!(config.recap.chunk_max_len, 4000);
    assert_eq!(config.recap.get_default_limit, 10);
    assert_eq!(config.recap.daily_recap_time, None);
    assert_eq!(config.history.page_size, 100);
    assert_eq!(config.history.max_pages, Some(50));

    let settings = config.recap.settings();
    assert_eq!(settings.max_chunk_len, 4000);
    assert!(settings.report.include_dates);
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    reset_env();
    env::set_var("LOG_FILE", "/tmp/recap.log");
    env::set_var("TELOXIDE_API_URL", "http://localhost:8081");
    env::set_var("REPORT_MAX_ITEMS", "5");
    env::set_var("CHUNK_MAX_LEN", "1000");
    env::set_var("GET_DEFAULT_LIMIT", "30");
    env::set_var("DAILY_RECAP_TIME", "08:30");

    let config = BotConfig::load(None).unwrap();
    config.validate().unwrap();

    assert_eq!(config.log_file(), "/tmp/recap.log");
    assert_eq!(config.telegram_api_url(), Some("http://localhost:8081"));
    assert_eq!(config.recap.report_max_items, 5);
    assert_eq!(config.recap.chunk_max_len, 1000);
    assert_eq!(config.recap.get_default_limit, 30);
    assert_eq!(
        config.recap.daily_recap_time,
        Some(NaiveTime::from_hms_opt(8, 30, 0).unwrap())
    );

    reset_env();
}

#[test]
#[serial]
fn test_load_config_with_override_token() {
    reset_env();
    let config = BotConfig::load(Some("override_token".to_string())).unwrap();
    assert_eq!(config.bot_token(), "override_token");

    env::remove_var("BOT_TOKEN");
    assert!(BotConfig::load(None).is_err());
    assert!(BotConfig::load(Some("cli_token".to_string())).is_ok());
    reset_env();
}

#[test]
#[serial]
fn test_validate_rejects_bad_urls() {
    reset_env();
    env::set_var("TELEGRAM_API_URL", "not-a-valid-url");
    assert!(BotConfig::load(None).unwrap().validate().is_err());

    reset_env();
    env::set_var("HISTORY_GATEWAY_URL", "gateway");
    assert!(BotConfig::load(None).unwrap().validate().is_err());
    reset_env();
}

#[test]
#[serial]
fn test_recap_config_rejects_invalid_values() {
    reset_env();
    env::set_var("DAILY_RECAP_TIME", "25:00");
    assert!(RecapConfig::from_env().is_err());

    reset_env();
    env::set_var("REPORT_MAX_ITEMS", "many");
    assert!(RecapConfig::from_env().is_err());

    reset_env();
    env::set_var("CHUNK_MAX_LEN", "5000");
    assert!(RecapConfig::from_env().unwrap().validate().is_err());

    reset_env();
    env::set_var("GET_DEFAULT_LIMIT", "0");
    assert!(RecapConfig::from_env().unwrap().validate().is_err());
    reset_env();
}
