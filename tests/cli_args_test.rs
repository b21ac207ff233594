use clap::error::ErrorKind;
use clap::Parser;
use pass_convert::{CandidateLists, CliConfig, OutputFiles};

#[test]
fn test_cli_default_values() {
    let config = CliConfig::parse_from(["convert", "export.csv"]);

    assert_eq!(config.input, "export.csv");
    assert!(!config.debug, "Debug output should be off by default");
    assert_eq!(config.output_dir, ".");
    assert!(config.mapping.is_none());
    assert_eq!(config.candidates, CandidateLists::default());
    assert_eq!(config.output_files, OutputFiles::default());
}

#[test]
fn test_cli_debug_flag_after_input() {
    let config = CliConfig::parse_from(["convert", "export.csv", "--debug"]);
    assert!(config.debug);
}

#[test]
fn test_cli_missing_input_is_reported() {
    let err = CliConfig::try_parse_from(["convert"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_cli_output_and_mapping_options() {
    let config = CliConfig::parse_from([
        "convert",
        "export.csv",
        "--output-dir",
        "/tmp/out",
        "--mapping",
        "mapping.toml",
    ]);

    assert_eq!(config.output_dir, "/tmp/out");
    assert_eq!(config.mapping.as_deref(), Some("mapping.toml"));
}
