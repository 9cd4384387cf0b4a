use policy::Signal;

use crate::analyzer::AnalysisResult;
use crate::basket::BatchResult;

/// Отправляется в начале каждого прохода
pub const HEARTBEAT: &str = "🤖 Monitoring!";

/// Markdown-алерт по результату, `None` если сигнала нет
pub fn format_alert(r: &AnalysisResult) -> Option<String> {
    let (head, trend) = match r.signal {
        Signal::None => return None,
        Signal::Watching => ("🔍 *WATCHING*", r.short_term_trend.to_string()),
        Signal::Long => ("✅ *LONG*", "up".to_string()),
        Signal::Short => ("✅ *SHORT*", "down".to_string()),
    };

    Some(format!(
        "{} - {}\nPrice: {}\nRSI: {:.2}\nTrend: {} confirmed",
        head, r.symbol, r.price, r.rsi, trend
    ))
}

/// Алерты прохода в порядке корзины
pub fn alerts_for(batch: &BatchResult) -> Vec<String> {
    batch.results().filter_map(format_alert).collect()
}
