use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use pass_convert::domain::model::{DUPLICATES_OUTPUT, PRIMARY_OUTPUT};
use pass_convert::utils::{logger, validation::Validate};
use pass_convert::{
    CliConfig, ConvertEngine, ConvertError, ConvertPipeline, LocalStorage, MappingConfig,
};

fn print_usage() {
    eprintln!("Usage: convert <proton_export.csv> [--debug]");
    eprintln!("Output will be saved as '{}'", PRIMARY_OUTPUT);
    eprintln!("Duplicates will be saved to '{}'", DUPLICATES_OUTPUT);
    eprintln!();
    eprintln!("Add --debug flag to see detailed column analysis");
}

fn exit_with(e: &ConvertError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

fn main() -> anyhow::Result<()> {
    let mut config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            print_usage();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    logger::init_cli_logger(config.debug);

    if config.debug {
        tracing::info!("🔧 Debug mode enabled");
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Some(path) = config.mapping.clone() {
        tracing::info!("📁 Loading header mapping from: {}", path);
        match MappingConfig::from_file(&path) {
            Ok(mapping) => config.apply_mapping(mapping),
            Err(e) => exit_with(&e),
        }
    }

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let input = config.input.clone();
    let storage = LocalStorage::new(config.output_dir.clone());
    let pipeline = ConvertPipeline::new(storage, config);
    let engine = ConvertEngine::new(pipeline);

    let report = engine
        .run()
        .inspect_err(|e| {
            tracing::error!("❌ Conversion failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        })
        .with_context(|| format!("failed to convert '{}'", input))?;

    println!("{}", report);
    println!("{}", report.import_instructions());

    Ok(())
}
