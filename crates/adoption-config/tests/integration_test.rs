//! Integration tests for adoption-config crate.

use adoption_config::{Config, ConfigLoader};
use std::io::Write;
use validator::Validate;

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_from_file_converts_errors() {
    let result = ConfigLoader::load_from_file("/definitely/not/here.yaml");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}

#[test]
fn test_load_from_file_reads_dashboard_labels() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "dashboard:\n  title: 'Q3 Adoption'\n  all_regions_label: 'Every Region'\n  all_specialties_label: 'Every Specialty'"
    )
    .unwrap();

    let config = ConfigLoader::load_config_with(file.path(), |_| None).unwrap();
    assert_eq!(config.dashboard.title, "Q3 Adoption");
    assert_eq!(config.dashboard.all_regions_label, "Every Region");
    assert_eq!(config.dashboard.all_specialties_label, "Every Specialty");
}
