use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::display;
use cli::input;
use gemstone_core::config::{self, AppConfig};
use gemstone_core::pipeline;
use gemstone_core::session::ValuationSession;
use gemstone_core::validate;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;
    debug!(db = %cfg.database.path, provider = %cfg.classifier.provider, "config loaded");

    match cli.command {
        Commands::Analyze {
            image,
            provider,
            json,
        } => run_analyze(cfg, image, provider, json).await,
        Commands::Estimate {
            weight,
            quality,
            purity,
            category,
            image,
            provider,
            json,
        } => {
            run_estimate(
                cfg,
                EstimateArgs {
                    weight,
                    quality,
                    purity,
                    category,
                    image,
                    provider,
                },
                json,
            )
            .await
        }
        Commands::History { clear, json } => run_history(cfg, clear, json).await,
        Commands::Settings {
            currency,
            rate,
            json,
        } => run_settings(cfg, currency, rate, json).await,
    }
}

#[derive(Parser)]
#[command(name = "gemstone")]
#[command(about = "Gemstone recognition and value estimation", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Label an image and infer its gemstone category
    Analyze {
        /// Image file (JPEG, PNG, ...)
        image: PathBuf,
        /// Label provider to use instead of the configured one
        #[arg(long)]
        provider: Option<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Estimate a value and record it in the history
    Estimate {
        /// Weight in carats; a comma decimal separator is accepted
        #[arg(short, long)]
        weight: String,
        /// Quality grade: A|B|C
        #[arg(short, long, default_value = "B")]
        quality: String,
        /// Purity grade: IF|VVS|VS|SI|I1
        #[arg(short, long, default_value = "VS")]
        purity: String,
        /// Category to price; overrides the one inferred from --image
        #[arg(long)]
        category: Option<String>,
        /// Image to classify first
        #[arg(long)]
        image: Option<PathBuf>,
        /// Label provider to use instead of the configured one
        #[arg(long)]
        provider: Option<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// List recorded estimates, newest first
    History {
        /// Delete every recorded estimate
        #[arg(long, default_value_t = false)]
        clear: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change the display currency and its rate to USD
    Settings {
        /// Currency code, e.g. USD, EUR, SAR
        #[arg(long)]
        currency: Option<String>,
        /// Value of one unit of the currency in USD
        #[arg(long)]
        rate: Option<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

struct EstimateArgs {
    weight: String,
    quality: String,
    purity: String,
    category: Option<String>,
    image: Option<PathBuf>,
    provider: Option<String>,
}

async fn session_for(cfg: &AppConfig, provider: Option<&str>) -> Result<ValuationSession> {
    let session = pipeline::build_session(cfg).await?;
    Ok(match provider {
        Some(name) => session.with_provider(name),
        None => session,
    })
}

async fn run_analyze(
    cfg: AppConfig,
    image: PathBuf,
    provider: Option<String>,
    json: bool,
) -> Result<()> {
    let session = session_for(&cfg, provider.as_deref()).await?;
    let bytes = input::read_image(&image)?;
    let analysis = session.classify(&bytes).await?;

    if json {
        #[derive(Serialize)]
        struct Out<'a> {
            category: gemstone_core::GemCategory,
            labels: &'a [gemstone_core::LabelPrediction],
        }
        let out = Out {
            category: analysis.category,
            labels: analysis.predictions.top(cfg.display.top_labels),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in display::analysis_lines(&analysis, cfg.display.top_labels) {
            println!("{line}");
        }
    }
    Ok(())
}

async fn run_estimate(cfg: AppConfig, args: EstimateArgs, json: bool) -> Result<()> {
    // Parse everything up front so a typo never reaches the label service.
    let quality = validate::parse_quality(&args.quality)?;
    let purity = validate::parse_purity(&args.purity)?;
    let category = args
        .category
        .as_deref()
        .map(validate::parse_category)
        .transpose()?;
    validate::parse_weight(&args.weight)?;

    let session = session_for(&cfg, args.provider.as_deref()).await?;
    if let Some(path) = &args.image {
        let bytes = input::read_image(path)?;
        let analysis = session.classify(&bytes).await?;
        if !json {
            for line in display::analysis_lines(&analysis, cfg.display.top_labels) {
                println!("{line}");
            }
        }
    }
    if let Some(category) = category {
        session.select_category(category).await;
    }

    let estimate = session.estimate(&args.weight, quality, purity).await?;
    if json {
        #[derive(Serialize)]
        struct Out<'a> {
            category: gemstone_core::GemCategory,
            #[serde(flatten)]
            estimate: &'a gemstone_core::PriceEstimate,
        }
        let out = Out {
            category: session.category().await,
            estimate: &estimate,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in display::estimate_lines(&estimate) {
            println!("{line}");
        }
    }
    Ok(())
}

async fn run_history(cfg: AppConfig, clear: bool, json: bool) -> Result<()> {
    let prefs = pipeline::open_prefs(&cfg).await?;
    if clear {
        prefs.clear_history().await?;
        if !json {
            println!("History cleared.");
        }
        return Ok(());
    }

    let entries = prefs.history().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No history yet.");
    } else {
        for entry in &entries {
            println!("{}", display::history_line(entry));
        }
    }
    Ok(())
}

async fn run_settings(
    cfg: AppConfig,
    currency: Option<String>,
    rate: Option<String>,
    json: bool,
) -> Result<()> {
    let prefs = pipeline::open_prefs(&cfg).await?;
    match (currency.as_deref(), rate.as_deref()) {
        (Some(code), Some(rate)) => prefs.save_settings(code, rate).await?,
        (Some(code), None) => prefs.save_currency(code).await?,
        (None, Some(rate)) => prefs.save_rate_to_usd(validate::parse_rate(rate)?).await?,
        (None, None) => {}
    }

    let currency = prefs.currency().await?;
    let rate = prefs.rate_to_usd().await?;
    if json {
        println!(
            "{}",
            serde_json::json!({ "currency": currency, "rate_to_usd": rate })
        );
    } else {
        println!("Currency: {currency}");
        println!("1 {currency} = {rate} USD");
    }
    Ok(())
}
