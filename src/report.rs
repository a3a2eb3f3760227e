// Console rendering of a scan result. Presentation only; nothing in here
// feeds back into the scan.
use chrono::Utc;

use crate::model::ScanResult;

/// Qualitative read of the adoption velocity index.
pub fn verdict(adoption_index: f64) -> &'static str {
    if adoption_index > 75.0 {
        "Very high inflow of new users. The contract may be going viral."
    } else if adoption_index > 50.0 {
        "Healthy growth of the user base, worth a closer look."
    } else {
        "Activity is mostly sustained by the existing community."
    }
}

pub fn render(result: &ScanResult) {
    println!();
    println!(
        "📊 Activity pulse for blocks {} through {}",
        result.window.start, result.window.end
    );
    println!("{}", "-".repeat(50));
    println!("Transactions to contract:           {}", result.total_transactions);
    println!("Unique interacting wallets:         {}", result.unique_senders.len());
    println!("Engagement (tx per wallet):         {:.2}", result.engagement_ratio);
    println!();
    println!("💥 Adoption velocity index:         {:.2}%", result.adoption_index);
    println!("   (share of newly discovered wallets among all active ones)");
    if !result.failed_blocks.is_empty() {
        println!(
            "⚠️  {} of {} blocks could not be fetched and were skipped",
            result.failed_blocks.len(),
            result.window.len()
        );
    }
    println!("{}", "-".repeat(50));
    println!("{}", verdict(result.adoption_index));
    println!("Generated at {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
}
