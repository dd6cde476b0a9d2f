//! Integration tests for configuration loading

use pamm_calc::config::Config;
use pamm_calc::design::DesignVersion;
use rust_decimal_macros::dec;
use std::io::Write;

#[test]
fn test_load_partial_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        [design]
        version = "v2"

        [design.buckets]
        early = 60
        mid = 30
        late = 10
        "#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.design.version, DesignVersion::V2);
    assert_eq!(config.design.policy.buckets.early, dec!(60));
    assert_eq!(config.design.policy.pot_split.prediction, dec!(70));
    assert_eq!(config.view_settings().policy.buckets.late, dec!(10));
}

#[test]
fn test_load_rejects_bad_buckets() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[design.buckets]\nearly = 90\n").unwrap();
    assert!(Config::load(file.path()).is_err());
}
