use clap::Parser;
use gcodescan::cli::Cli;
use gcodescan::{init_logging, Config, GcodeAnalyzer};

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_or_default(&Config::default_path()?)?,
    };
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;

    let config = load_config(&cli)?;
    tracing::info!(profile = %config.profile.name, "Using printer profile");

    let mut analyzer = GcodeAnalyzer::new(config).with_progress(|percent| {
        tracing::info!("Analyzing... {:.1}%", percent);
        Ok(())
    });
    let result = analyzer.analyze_file(&cli.file)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
