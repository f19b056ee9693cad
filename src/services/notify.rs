//! Scan alerts handed to the notification layer

use async_trait::async_trait;
use tracing::info;

use crate::models::scan::ScanReport;
use crate::models::signal::SignalRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub subject: String,
    pub body: String,
}

/// Build the alert for a scan; `None` when nothing crossed
pub fn format_alert(signals: &[SignalRecord]) -> Option<Alert> {
    if signals.is_empty() {
        return None;
    }

    let subject = format!("CCI Scanner: {} Stocks Crossed CCI ±100", signals.len());
    let mut body = String::from("The following stocks crossed ±100 CCI on the 15m timeframe:\n\n");
    for s in signals {
        body.push_str(&format!(
            "{} [{}] {}: Price {:.2}, CCI {:.2}, Win rate {:.1}% ({}/{}), Confidence {}%\n",
            s.symbol,
            s.market.label(),
            s.direction,
            s.price,
            s.cci,
            s.win_rate,
            s.wins,
            s.total_trades,
            s.confidence
        ));
    }

    Some(Alert { subject, body })
}

#[async_trait]
pub trait SignalNotifier: Send + Sync {
    async fn notify(&self, report: &ScanReport);
}

/// Writes alerts to the structured log
pub struct LogNotifier;

#[async_trait]
impl SignalNotifier for LogNotifier {
    async fn notify(&self, report: &ScanReport) {
        match format_alert(&report.signals) {
            Some(alert) => info!(
                signals = report.signals.len(),
                subject = %alert.subject,
                "{}",
                alert.body
            ),
            None => info!("No signals found this run."),
        }
    }
}
