//! Multi-section load tests without environment overlay.
//!
//! Responsibilities:
//! - Test binding several sections from one source.
//! - Test optional, mandatory, invalid, and mistyped sections.
//! - Test ordering and fail-fast behavior across sections.
//! - Test renamed fields and values set before the load.

use super::fixtures::{ConnPool, Database, Invalid, Mandatory, Other, TWO_SECTIONS, ValidJWT};
use crate::loader::builder::ConfigLoader;
use crate::section::{Section, section, section_with_key};
use crate::source::ConfigSource;

fn loader() -> ConfigLoader {
    ConfigLoader::new().with_automatic_env(false)
}

#[test]
fn test_loads_two_sections_from_one_source() {
    let mut source = ConfigSource::from_toml_str(TWO_SECTIONS).unwrap();
    let mut valid = ValidJWT::default();
    let mut other = Other::default();

    loader()
        .load(&mut source, [section(&mut valid), section(&mut other)])
        .unwrap();

    assert_eq!(valid.port, 8081);
    assert_eq!(valid.url, "localhost:3000");
    assert!(valid.enabled(), "should be enabled");

    assert_eq!(other.port, 80800);
    assert_eq!(other.url, "localhost:13000");
    assert!(other.enabled(), "should be enabled");
}

#[test]
fn test_empty_source_leaves_optional_section_disabled() {
    let mut source = ConfigSource::new();
    let mut conf = ValidJWT::default();

    loader().load(&mut source, [section(&mut conf)]).unwrap();

    assert!(!conf.enabled());
    assert_eq!(conf.port, 0);
    assert!(conf.url.is_empty());
}

#[test]
fn test_empty_table_with_failing_validation_is_invalid_configuration() {
    let mut source = ConfigSource::from_toml_str("[invalid]\n").unwrap();
    let mut conf = Invalid::default();

    let err = loader().load(&mut source, [section(&mut conf)]).unwrap_err();

    assert!(err.is_invalid_configuration());
    assert_eq!(err.key(), Some("invalid"));
    assert!(conf.enabled());
}

#[test]
fn test_zero_sections_is_ok() {
    let mut source = ConfigSource::from_toml_str(TWO_SECTIONS).unwrap();
    assert!(loader().load(&mut source, []).is_ok());
}

#[test]
fn test_first_failure_stops_remaining_sections() {
    let mut source =
        ConfigSource::from_toml_str(&format!("{TWO_SECTIONS}\n[invalid]\n")).unwrap();
    let mut valid = ValidJWT::default();
    let mut invalid = Invalid::default();
    let mut other = Other::default();

    let err = loader()
        .load(
            &mut source,
            [
                section(&mut valid),
                section(&mut invalid),
                section(&mut other),
            ],
        )
        .unwrap_err();

    assert!(err.is_invalid_configuration());
    // Sections bound before the failure keep their values.
    assert!(valid.enabled());
    assert_eq!(valid.port, 8081);
    assert!(!other.enabled());
    assert_eq!(other.port, 0);
}

#[test]
fn test_missing_mandatory_section_fails() {
    let mut source = ConfigSource::from_toml_str(TWO_SECTIONS).unwrap();
    let mut mandatory = Mandatory::default();

    let err = loader()
        .load(&mut source, [section(&mut mandatory)])
        .unwrap_err();

    assert!(err.is_missing_configuration());
    assert_eq!(
        err.to_string(),
        "reading key: missing conf key configuration: mandatory"
    );
}

#[test]
fn test_present_mandatory_section_binds() {
    let mut source = ConfigSource::from_toml_str("[mandatory]\nname = \"core\"\n").unwrap();
    let mut mandatory = Mandatory::default();

    loader()
        .load(&mut source, [section(&mut mandatory)])
        .unwrap();

    assert!(mandatory.enabled());
    assert_eq!(mandatory.name, "core");
}

#[test]
fn test_mistyped_field_is_bind_failure() {
    let mut source =
        ConfigSource::from_toml_str("[validjwt]\nport = \"not-a-number\"\n").unwrap();
    let mut conf = ValidJWT::default();

    let err = loader().load(&mut source, [section(&mut conf)]).unwrap_err();

    assert!(err.is_bind_failure());
    assert!(
        err.to_string().starts_with("reading key: reading config [validjwt]: "),
        "unexpected message: {err}"
    );
}

#[test]
fn test_sections_do_not_share_fields() {
    let mut source = ConfigSource::from_toml_str("[other]\nport = 1\nurl = \"x\"\n").unwrap();
    let mut valid = ValidJWT::default();
    let mut other = Other::default();

    loader()
        .load(&mut source, [section(&mut valid), section(&mut other)])
        .unwrap();

    assert!(!valid.enabled());
    assert_eq!(valid.port, 0);
    assert!(other.enabled());
    assert_eq!(other.port, 1);
}

#[test]
fn test_explicit_key_registration_binds_any_key() {
    let mut source = ConfigSource::from_toml_str(
        "[auth.primary]\nport = 443\nurl = \"auth.example.com\"\n",
    )
    .unwrap();
    let mut conf = ValidJWT::default();

    loader()
        .load(&mut source, [section_with_key(&mut conf, "Auth.Primary")])
        .unwrap();

    assert!(conf.enabled());
    assert_eq!(conf.port, 443);
}

#[test]
fn test_nested_section_fields_bind() {
    let mut source = ConfigSource::from_toml_str(
        r#"
[database]
host = "db.internal"
port = 5432
tls = true
replicas = ["r1", "r2"]
unknown_key = "ignored"

[database.pool]
max = 20
idle_timeout = 1.5
"#,
    )
    .unwrap();
    let mut database = Database::default();

    loader()
        .load(&mut source, [section(&mut database)])
        .unwrap();

    assert!(database.enabled());
    assert_eq!(database.host, "db.internal");
    assert_eq!(database.port, 5432);
    assert!(database.tls);
    assert_eq!(database.replicas, vec!["r1", "r2"]);
    assert_eq!(database.pool.max, 20);
}

#[test]
fn test_uppercase_file_keys_match_lowercase_section_keys() {
    let mut source = ConfigSource::from_toml_str("[ValidJWT]\nPort = 1\nURL = \"u\"\n").unwrap();
    let mut conf = ValidJWT::default();

    loader().load(&mut source, [section(&mut conf)]).unwrap();

    assert!(conf.enabled());
    assert_eq!(conf.port, 1);
    assert_eq!(conf.url, "u");
}

#[test]
fn test_renamed_fields_bind_through_loader() {
    let mut source =
        ConfigSource::from_toml_str("[connpool]\nmaxConns = 5\nIdleTimeoutSecs = 30\n").unwrap();
    let mut pool = ConnPool::default();

    loader().load(&mut source, [section(&mut pool)]).unwrap();

    assert!(pool.enabled());
    assert_eq!(pool.max_conns, 5);
    assert_eq!(pool.idle_timeout, 30);
}

#[test]
fn test_renamed_field_mismatch_is_still_bind_failure() {
    let mut source = ConfigSource::from_toml_str("[connpool]\nmaxConns = \"five\"\n").unwrap();
    let mut pool = ConnPool::default();

    let err = loader()
        .load(&mut source, [section(&mut pool)])
        .unwrap_err();

    assert!(err.is_bind_failure());
    assert_eq!(err.key(), Some("connpool"));
}

#[test]
fn test_fields_absent_from_source_keep_preset_values() {
    let mut source = ConfigSource::from_toml_str("[database]\nhost = \"db\"\n").unwrap();
    let mut database = Database::default();
    database.port = 8080;
    database.replicas = vec!["r0".to_string()];
    database.pool.max = 4;

    loader()
        .load(&mut source, [section(&mut database)])
        .unwrap();

    assert!(database.enabled());
    assert_eq!(database.host, "db");
    assert_eq!(database.port, 8080);
    assert_eq!(database.replicas, vec!["r0"]);
    assert_eq!(database.pool.max, 4);
}

#[test]
fn test_source_values_override_preset_values() {
    let mut source =
        ConfigSource::from_toml_str("[database]\nhost = \"db\"\nport = 5432\n[database.pool]\nmax = 9\n")
            .unwrap();
    let mut database = Database::default();
    database.host = "localhost".to_string();
    database.port = 8080;
    database.pool.idle_timeout = 2.5;

    loader()
        .load(&mut source, [section(&mut database)])
        .unwrap();

    assert_eq!(database.host, "db");
    assert_eq!(database.port, 5432);
    assert_eq!(database.pool.max, 9);
    assert_eq!(database.pool.idle_timeout, 2.5);
}
