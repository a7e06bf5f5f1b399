use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use headless_chrome::{Browser, LaunchOptions};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hltv_stats_scraper::config::AppConfig;
use hltv_stats_scraper::export;
use hltv_stats_scraper::models::{DateRange, StatsTable};
use hltv_stats_scraper::pipeline;
use hltv_stats_scraper::scraper::browser::BrowserFetcher;
use hltv_stats_scraper::scraper::throttle::Throttle;
use hltv_stats_scraper::utils;
use hltv_stats_scraper::Scraper;

#[derive(Parser)]
#[command(name = "hltv-stats-scraper", about = "HLTV statistics scraper", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape one category once for a date range
    Scrape {
        /// Category, optionally with a sub-category:
        /// players[/flashbangs|openingkills|pistols], teams[/ftu|pistols], matches
        #[arg(short, long)]
        category: String,

        /// Named window (1m/3m/6m/12m), a single date, or a start:end pair
        #[arg(short, long, default_value = "3m")]
        date_range: String,

        /// Map filter, e.g. de_mirage ("all" for no filter)
        #[arg(short, long, default_value = "all")]
        map: String,

        /// Ranking filter, e.g. Top30 ("all" for no filter)
        #[arg(short, long, default_value = "all")]
        ranking: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Scrape a category once per day across a rolling window
    Range {
        #[arg(short, long)]
        category: String,

        /// Named window: 1m, 3m, 6m or 12m
        #[arg(short, long, default_value = "1m")]
        window: String,

        #[arg(short, long, default_value = "all")]
        map: String,

        #[arg(short, long, default_value = "all")]
        ranking: String,

        /// Width of each per-day window, in days (config default: 30)
        #[arg(long)]
        width: Option<i64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "hltv_stats_scraper=info,warn",
        1 => "hltv_stats_scraper=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;

    // The browser session is owned here; the library only navigates it.
    let browser = Browser::new(LaunchOptions {
        headless: config.scraper.headless,
        ..Default::default()
    })
    .context("Failed to launch browser")?;
    let tab = browser.new_tab().context("Failed to open tab")?;

    let scraper = Scraper::new(BrowserFetcher::new(tab), &config.scraper);

    match cli.command {
        Command::Scrape {
            category,
            date_range,
            map,
            ranking,
            format,
            out,
        } => {
            let _t = utils::Stopwatch::start(format!("scrape {}", category));
            let range = DateRange::parse(&date_range);
            let table = scraper.scrape(&category, &range, &map, &ranking).await?;
            info!("{}: {}", category, utils::table_summary(&table));
            write_output(&table, format, out.as_deref())?;
        }

        Command::Range {
            category,
            window,
            map,
            ranking,
            width,
            format,
            out,
        } => {
            let _t = utils::Stopwatch::start(format!("range scrape {}", category));
            let width = width.unwrap_or(config.range.width_days);
            let throttle = Throttle::from_millis(config.range.delay_ms, config.range.jitter_ms);
            let table = pipeline::scrape_range(
                &scraper, &category, &window, &map, &ranking, width, &throttle,
            )
            .await?;
            info!("{}: {}", category, utils::table_summary(&table));
            write_output(&table, format, out.as_deref())?;
        }
    }

    Ok(())
}

fn write_output(
    table: &StatsTable,
    format: OutputFormat,
    out: Option<&std::path::Path>,
) -> Result<()> {
    match out {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
            match format {
                OutputFormat::Csv => export::write_csv(table, file)?,
                OutputFormat::Json => export::write_json(table, file)?,
            }
            info!("wrote {:?}", path);
        }
        None => match format {
            OutputFormat::Csv => export::write_csv(table, io::stdout().lock())?,
            OutputFormat::Json => export::write_json(table, io::stdout().lock())?,
        },
    }
    Ok(())
}
