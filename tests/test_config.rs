use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use wicket::config::{Cli, Config, DEFAULT_LISTEN_ADDR, DEFAULT_MAX_REQUEST_BYTES};

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr, DEFAULT_LISTEN_ADDR);
    assert_eq!(cfg.listen_addr, "0.0.0.0:4221");
    assert_eq!(cfg.directory, None);
    assert_eq!(cfg.max_request_bytes, DEFAULT_MAX_REQUEST_BYTES);
    assert!(cfg.file_store().is_none());
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_from_env() {
    let mut cfg = Config::default();
    cfg.apply_env(env(&[
        ("LISTEN", "127.0.0.1:8000"),
        ("WICKET_DIRECTORY", "/tmp/files"),
        ("WICKET_MAX_REQUEST_BYTES", "4096"),
    ]))
    .unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:8000");
    assert_eq!(cfg.directory, Some(PathBuf::from("/tmp/files")));
    assert_eq!(cfg.max_request_bytes, 4096);
}

#[test]
fn test_config_env_rejects_bad_number() {
    let mut cfg = Config::default();
    let result = cfg.apply_env(env(&[("WICKET_MAX_REQUEST_BYTES", "lots")]));

    assert!(result.is_err());
}

#[test]
fn test_config_from_yaml_partial() {
    let cfg = Config::from_yaml("directory: /srv/files\n").unwrap();

    assert_eq!(cfg.directory, Some(PathBuf::from("/srv/files")));
    assert_eq!(cfg.listen_addr, DEFAULT_LISTEN_ADDR);
    assert_eq!(cfg.max_request_bytes, DEFAULT_MAX_REQUEST_BYTES);
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wicket.yaml");
    std::fs::write(
        &path,
        "listen_addr: \"127.0.0.1:9000\"\nmax_request_bytes: 1024\n",
    )
    .unwrap();

    let cfg = Config::from_file(&path).unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.max_request_bytes, 1024);
}

#[test]
fn test_config_missing_file_is_error() {
    assert!(Config::from_file(std::path::Path::new("/definitely/not/here.yaml")).is_err());
}

#[test]
fn test_cli_overrides_env() {
    let cli = Cli::parse_from(["wicket", "--directory", "/from/cli", "--listen", "127.0.0.1:1"]);

    let mut cfg = Config::default();
    cfg.apply_env(env(&[("WICKET_DIRECTORY", "/from/env")])).unwrap();
    cfg.apply_cli(&cli);

    assert_eq!(cfg.directory, Some(PathBuf::from("/from/cli")));
    assert_eq!(cfg.listen_addr, "127.0.0.1:1");

    let store = cfg.file_store().unwrap();
    assert_eq!(store.root(), std::path::Path::new("/from/cli"));
}

#[test]
fn test_validate_rejects_zero_limit() {
    let cfg = Config {
        max_request_bytes: 0,
        ..Config::default()
    };

    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();

    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
}
