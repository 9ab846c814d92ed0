//! Terminal output formatting for scan progress.

use seedsweep_core::Discovery;
use seedsweep_scanner::ScanSnapshot;

/// Format a second count as `Xh Ym Zs`.
pub fn format_elapsed(secs: u64) -> String {
    let hrs = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;
    format!("{hrs}h {mins}m {secs}s")
}

/// Format a success probability as a percentage, flooring tiny values.
pub fn format_probability(probability: f64) -> String {
    let pct = probability * 100.0;
    if pct == 0.0 {
        "0%".to_string()
    } else if pct < 0.0001 {
        "< 0.0001%".to_string()
    } else {
        format!("{pct:.4}%")
    }
}

/// Print one statistics line.
pub fn print_snapshot(snapshot: &ScanSnapshot) {
    println!(
        "elapsed {} | processed {} | rate {:.2}/s | funded {} | success rate {}",
        format_elapsed(snapshot.elapsed.as_secs()),
        snapshot.processed_count,
        snapshot.rate(),
        snapshot.found_with_funds,
        format_probability(snapshot.success_probability()),
    );
}

/// Print a funded discovery.
pub fn print_discovery(discovery: &Discovery) {
    println!("==============================");
    println!("FUNDED WALLET FOUND");
    println!("Address: {}", discovery.address);
    println!("Balance: {}", discovery.balance);
    println!("Phrase:  {}", discovery.phrase);
    println!("==============================");
}
