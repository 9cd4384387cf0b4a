use std::sync::Arc;

use anyhow::{Context, Result};
use binance::BinanceRest;
use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use types::TimestampMs;

use engine::alert::HEARTBEAT;
use engine::config::MonitorConfig;
use engine::driver::{build_sink, delay_until_next_boundary, dispatch_alerts, run_pass};
use engine::feed::BinanceFeed;
use engine::render;
use engine::report::BatchReport;
use engine::sink::{AlertSink, notify_best_effort};

/// Signal monitor: один проход на каждый short-бар
#[derive(Parser, Debug)]
struct Args {
    /// Run a single pass and exit
    #[arg(long, default_value_t = false)]
    once: bool,
    /// Start immediately instead of waiting for the next bar
    #[arg(long, default_value_t = false)]
    no_wait: bool,
    /// Do not send alerts
    #[arg(long, default_value_t = false)]
    no_alerts: bool,
    /// Print the JSON report instead of the table
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "engine=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = MonitorConfig::from_env()?;

    let rest = BinanceRest::new(&config.binance_base_url, config.http_timeout)
        .context("binance client init failed")?;
    let feed = BinanceFeed::new(rest, config.timeframes);
    let sink = if args.no_alerts {
        None
    } else {
        Some(build_sink(&config)?)
    };

    info!(
        symbols = ?config.symbols,
        reference = %config.reference_symbol,
        short = %config.timeframes.short,
        confirmation = %config.timeframes.confirmation,
        "monitor started"
    );

    let short = config.timeframes.short;
    if !args.no_wait {
        wait_for_boundary(short).await;
    }

    loop {
        run_once(&feed, sink.as_ref(), &config, args.json).await;

        if args.once {
            break;
        }
        wait_for_boundary(short).await;
    }

    Ok(())
}

async fn wait_for_boundary(timeframe: indicators::Timeframe) {
    let now = TimestampMs(Utc::now().timestamp_millis());
    let delay = delay_until_next_boundary(timeframe, now);
    info!("waiting {}s for the next {} bar", delay.as_secs(), timeframe);
    tokio::time::sleep(delay).await;
}

async fn run_once(
    feed: &BinanceFeed,
    sink: Option<&Arc<dyn AlertSink>>,
    config: &MonitorConfig,
    json: bool,
) {
    if let Some(sink) = sink {
        notify_best_effort(sink.as_ref(), HEARTBEAT).await;
    }

    let batch = match run_pass(feed, config).await {
        Ok(b) => b,
        Err(e) => {
            error!("pass aborted: {}", e);
            return;
        }
    };

    if json {
        match serde_json::to_string_pretty(&BatchReport::from(&batch)) {
            Ok(s) => println!("{}", s),
            Err(e) => error!("report encoding failed: {}", e),
        }
    } else {
        println!("\n{}", render::headline(&batch));
        println!("{}", render::table(&batch));
    }

    if let Some(sink) = sink {
        dispatch_alerts(sink.as_ref(), &batch).await;
    }
}
