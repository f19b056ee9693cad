//! One-shot scan: runs a single scan over the configured markets and prints the ranked signals.

use cci_scanner::config::ScannerConfig;
use cci_scanner::core::bootstrap::build_service;
use cci_scanner::logging;
use cci_scanner::models::scan::ScanReport;
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = ScannerConfig::from_env();
    let service = build_service(&config, None)?;

    let report = service.run_scan(config.scan_nse, config.scan_us).await;
    print_report(&report);

    Ok(())
}

fn print_report(report: &ScanReport) {
    let stats = &report.stats;
    println!(
        "Markets: {} | Scanned: {} | Successful: {} | Breadth: {:.1}% ({}) | {} ms",
        stats.market_label,
        stats.total_scanned,
        stats.successful,
        stats.breadth_pct,
        stats.sentiment,
        stats.duration_ms
    );

    if !stats.top_sectors.is_empty() {
        println!("Hot sectors:");
        for sector in &stats.top_sectors {
            println!(
                "  {} ({}): {}",
                sector.sector,
                sector.count,
                sector.symbols.join(", ")
            );
        }
    }

    if report.signals.is_empty() {
        println!("No signals.");
        return;
    }

    println!();
    println!(
        "{:<14} {:<4} {:<8} {:>10} {:>9} {:>6} {:>7} {:>5}  {}",
        "SYMBOL", "MKT", "TYPE", "PRICE", "CCI", "WHALE", "WIN%", "CONF", "SECTOR"
    );
    for s in &report.signals {
        println!(
            "{:<14} {:<4} {:<8} {:>10.2} {:>9.2} {:>6} {:>7.1} {:>5}  {}",
            s.symbol,
            s.market.label(),
            s.direction.as_str(),
            s.price,
            s.cci,
            if s.whale_vol { "yes" } else { "no" },
            s.win_rate,
            s.confidence,
            s.sector
        );
    }
}
