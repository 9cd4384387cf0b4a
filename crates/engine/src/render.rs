//! Консольный вывод прохода

use chrono::Local;
use colored::{ColoredString, Colorize};
use indicators::Trend;
use policy::Signal;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::analyzer::AnalysisResult;
use crate::basket::BatchResult;

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Pair")]
    pair: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Trend (short)")]
    short_trend: String,
    #[tabled(rename = "Trend (confirmation)")]
    confirmation_trend: String,
    #[tabled(rename = "RSI")]
    rsi: String,
    #[tabled(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// `[10:15:00] 📈 BTCUSDT (up)`
pub fn headline(batch: &BatchResult) -> String {
    let time = batch.started_at.with_timezone(&Local).format("%H:%M:%S");
    let symbol = &batch.reference_symbol;

    let label = match batch.reference_trend {
        Trend::Up => format!("📈 {} (up)", symbol).green().bold(),
        Trend::Down => format!("📉 {} (down)", symbol).red().bold(),
        Trend::Sideways => format!("➖ {} (sideways)", symbol).dimmed().bold(),
    };

    format!("{} {}", format!("[{}]", time).dimmed(), label)
}

pub fn table(batch: &BatchResult) -> String {
    let rows = batch.entries.iter().map(|e| match &e.outcome {
        Ok(r) => row(r),
        Err(err) => Row {
            pair: e.symbol.bold().to_string(),
            price: "-".into(),
            short_trend: "-".into(),
            confirmation_trend: "-".into(),
            rsi: "-".into(),
            volume: "-".into(),
            status: format!("failed: {}", err).red().to_string(),
        },
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

fn row(r: &AnalysisResult) -> Row {
    let volume_note = if r.volume_above_average {
        "above avg"
    } else {
        "below"
    };

    Row {
        pair: r.symbol.bold().to_string(),
        price: r.price.to_string(),
        short_trend: trend_cell(r.short_term_trend).to_string(),
        confirmation_trend: trend_cell(r.confirmation_trend).to_string(),
        rsi: format!("{:.2}", r.rsi),
        volume: format!("{} ({})", r.volume, volume_note),
        status: status_cell(r.signal).to_string(),
    }
}

fn trend_cell(trend: Trend) -> ColoredString {
    match trend {
        Trend::Up => "Up".green(),
        Trend::Down => "Down".red(),
        Trend::Sideways => "Sideways".dimmed(),
    }
}

fn status_cell(signal: Signal) -> ColoredString {
    match signal {
        Signal::Long => "✅ LONG".green().bold(),
        Signal::Short => "✅ SHORT".red().bold(),
        Signal::Watching => "🔍 WATCHING".yellow(),
        Signal::None => "⛔ no signal".dimmed(),
    }
}
