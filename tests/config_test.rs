use std::io::Write;

use spycat::ConfigLoader;
use tempfile::NamedTempFile;

fn yaml_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_env_overrides_defaults() {
    temp_env::with_vars(
        [
            ("SPYCAT_SERVER__PORT", Some("9100")),
            ("SPYCAT_CATALOG__MAX_RETRIES", Some("5")),
            ("SPYCAT_MISSIONS__STRICT_TARGET_OWNERSHIP", Some("true")),
        ],
        || {
            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.catalog.max_retries, 5);
            assert!(config.missions.strict_target_ownership);
        },
    );
}

#[test]
fn test_invalid_env_value_fails_validation() {
    temp_env::with_var("SPYCAT_LOGGING__LEVEL", Some("shouting"), || {
        let err = ConfigLoader::load().unwrap_err();
        assert!(format!("{err:#}").contains("shouting"), "{err:#}");
    });
}

#[test]
fn test_load_from_file() {
    let file = yaml_file(
        "server:\n  port: 7070\n  shutdown_grace_secs: 3\ndatabase:\n  url: \"sqlite::memory:\"\nlogging:\n  format: json\n",
    );

    temp_env::with_var_unset("SPYCAT_SERVER__PORT", || {
        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 7070);
        assert_eq!(config.server.shutdown_grace_secs, 3);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info", "Unset keys keep their defaults");
    });
}

#[test]
fn test_env_beats_explicit_file() {
    let file = yaml_file("server:\n  port: 7070\n");

    temp_env::with_var("SPYCAT_SERVER__PORT", Some("7171"), || {
        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 7171);
    });
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");
    assert!(ConfigLoader::load_from_file(&missing).is_err());
}

#[test]
fn test_invalid_file_value_rejected() {
    let file = yaml_file("database:\n  max_connections: 0\n");
    assert!(ConfigLoader::load_from_file(file.path()).is_err());
}
