use clap::{CommandFactory, FromArgMatches};
use lead_scrape::core::ConfigProvider;
use lead_scrape::utils::{logger, validation::Validate};
use lead_scrape::{CliConfig, FileConfig, LocalStorage, ScrapeEngine, SearchScrapePipeline};

#[tokio::main]
async fn main() {
    // Parsed through ArgMatches so user-set flags can be told apart
    // from defaulted ones when layering over a config file.
    let matches = CliConfig::command().get_matches();
    let cli = match CliConfig::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting lead-scrape");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config_file = cli.config.clone();
    let result = match config_file {
        Some(path) => match FileConfig::from_path(&path) {
            Ok(mut config) => {
                config.apply_cli_overrides(&cli, &matches);
                if let Err(e) = config.validate() {
                    tracing::error!("Configuration validation failed: {}", e);
                    eprintln!("❌ {}", e);
                    std::process::exit(2);
                }
                run(config).await
            }
            Err(e) => {
                tracing::error!("Configuration error: {}", e);
                eprintln!("❌ {}", e);
                std::process::exit(2);
            }
        },
        None => {
            if let Err(e) = cli.validate() {
                tracing::error!("Configuration validation failed: {}", e);
                eprintln!("❌ {}", e);
                std::process::exit(2);
            }
            run(cli).await
        }
    };

    match result {
        Ok(output_path) => {
            tracing::info!("Scrape completed successfully");
            println!("✅ Scrape complete!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

async fn run<C: ConfigProvider>(config: C) -> lead_scrape::Result<String> {
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = SearchScrapePipeline::new(storage, config)?;
    ScrapeEngine::new(pipeline).run().await
}
