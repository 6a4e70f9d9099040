mod common;

use common::temp_home;
use savings_core::config::{Config, ConfigManager};
use savings_core::currency::{format_currency_value, CurrencyCode, LocaleConfig};

#[test]
fn config_round_trips_through_disk() {
    let manager = ConfigManager::with_base_dir(temp_home()).unwrap();
    let config = Config {
        participant: Some("Ana Maria".into()),
        savings_goal: 1200.0,
        last_deposits_file: Some("/tmp/deposits.json".into()),
        ..Config::default()
    };
    manager.save(&config).unwrap();
    assert_eq!(manager.load().unwrap(), config);
}

#[test]
fn unknown_keys_in_saved_config_are_ignored() {
    let home = temp_home();
    std::fs::write(
        savings_core::utils::paths::config_file_in(&home),
        r#"{"savings_goal": 900.0, "theme": "dark"}"#,
    )
    .unwrap();
    let manager = ConfigManager::with_base_dir(home).unwrap();
    let config = manager.load().unwrap();
    assert_eq!(config.savings_goal, 900.0);
    assert_eq!(config.participant, None);
}

#[test]
fn nested_home_is_created() {
    let base = temp_home().join("nested").join("home");
    let manager = ConfigManager::with_base_dir(base.clone()).unwrap();
    assert!(base.is_dir());
    assert_eq!(manager.path(), base.join("config.json"));
}

#[test]
fn default_currency_formats_bolivianos() {
    let config = Config::default();
    assert_eq!(
        format_currency_value(1250.5, &config.currency, &config.locale),
        "Bs. 1,250.50"
    );
}

#[test]
fn locale_separators_are_honoured() {
    let locale = LocaleConfig {
        decimal_separator: ',',
        grouping_separator: '.',
        ..LocaleConfig::default()
    };
    assert_eq!(
        format_currency_value(1234567.891, &CurrencyCode::new("usd"), &locale),
        "$ 1.234.567,89"
    );
}
