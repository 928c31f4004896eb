//! Tests for the show-config CLI command

use crate::cli::test_helpers::create_cli_test_services;
use chunkdex::cli::commands::config::{execute, ConfigArgs};
use chunkdex::cli::OutputFormat;

#[test]
fn test_show_config_human() {
    let services = create_cli_test_services();
    assert!(execute(ConfigArgs {}, &services, OutputFormat::Human).is_ok());
}

#[test]
fn test_show_config_json() {
    let services = create_cli_test_services();
    assert!(execute(ConfigArgs {}, &services, OutputFormat::Json).is_ok());
}
