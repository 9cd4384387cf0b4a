use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use indicators::Timeframe;
use telegram::TelegramBot;
use tracing::info;
use types::TimestampMs;

use crate::alert::alerts_for;
use crate::basket::{BatchResult, PassError, evaluate_basket};
use crate::config::MonitorConfig;
use crate::feed::CandleProvider;
use crate::sink::{AlertSink, LogSink, notify_best_effort};

/// Один проход по корзине. Состояния между вызовами нет,
/// проходы могут пересекаться.
pub async fn run_pass<P: CandleProvider + ?Sized>(
    provider: &P,
    config: &MonitorConfig,
) -> Result<BatchResult, PassError> {
    info!(
        reference = %config.reference_symbol,
        symbols = config.symbols.len(),
        "pass started"
    );

    let batch = evaluate_basket(
        &config.reference_symbol,
        &config.symbols,
        provider,
        &config.basket_params(),
    )
    .await?;

    info!(
        reference_trend = %batch.reference_trend,
        analyzed = batch.results().count(),
        failed = batch.failures().count(),
        "pass finished"
    );

    Ok(batch)
}

/// Алерт на каждый сигнал. Возвращает число доставленных.
pub async fn dispatch_alerts<S: AlertSink + ?Sized>(sink: &S, batch: &BatchResult) -> usize {
    let mut delivered = 0;

    for text in alerts_for(batch) {
        if notify_best_effort(sink, &text).await {
            delivered += 1;
        }
    }

    delivered
}

/// Telegram, если есть креды, иначе лог
pub fn build_sink(config: &MonitorConfig) -> Result<Arc<dyn AlertSink>> {
    match &config.telegram {
        Some(tg) => {
            let bot = TelegramBot::new(&tg.token, &tg.chat_id, config.http_timeout)
                .context("telegram client init failed")?;
            Ok(Arc::new(bot))
        }
        None => Ok(Arc::new(LogSink)),
    }
}

/// Сколько ждать до открытия следующего бара
pub fn delay_until_next_boundary(timeframe: Timeframe, now: TimestampMs) -> Duration {
    let next = timeframe.next_boundary(now);
    Duration::from_millis((next.0 - now.0).max(0) as u64)
}
