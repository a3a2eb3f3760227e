use std::collections::HashSet;

use alloy_primitives::Address;
use tracing::{debug, info, warn};

use crate::model::{BlockWindow, ScanError, ScanResult};
use crate::provider::ChainProvider;

pub struct PulseAnalyzer;

impl PulseAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Scans the `num_blocks` most recent blocks for transactions addressed
    /// to `target` and aggregates sender activity into a [`ScanResult`].
    ///
    /// Blocks are visited one at a time in ascending order. A block that
    /// fails to fetch is logged and skipped, so the result is best-effort
    /// over the blocks that could be read. A malformed address, a zero
    /// window, or an unreachable provider abort the scan before any
    /// aggregation happens.
    ///
    /// `known_senders` holds addresses already seen in earlier periods;
    /// senders outside it count as newly discovered for the adoption index.
    /// Callers without sender history pass an empty set, which makes the
    /// index 100% whenever any sender is active.
    pub async fn scan<P: ChainProvider + ?Sized>(
        &self,
        provider: &P,
        target: &str,
        num_blocks: u64,
        known_senders: &HashSet<Address>,
    ) -> Result<ScanResult, ScanError> {
        let target: Address = target
            .parse()
            .map_err(|_| ScanError::InvalidAddress(target.to_string()))?;
        if num_blocks == 0 {
            return Err(ScanError::InvalidArgument(
                "block count must be at least 1".into(),
            ));
        }

        let head = provider.current_block_height().await?;
        let window = BlockWindow::trailing(head, num_blocks);
        info!(
            start = window.start,
            end = window.end,
            target = %target,
            "scanning block window"
        );

        let mut total_transactions = 0u64;
        let mut unique_senders: HashSet<Address> = HashSet::new();
        let mut failed_blocks = Vec::new();

        for number in window.blocks() {
            let transactions = match provider.block_transactions(number).await {
                Ok(txs) => txs,
                Err(e) => {
                    // Some nodes prune old blocks; skip and keep scanning.
                    warn!(block = number, error = %e, "could not process block");
                    failed_blocks.push(number);
                    continue;
                }
            };
            for tx in &transactions {
                if tx.to == Some(target) {
                    total_transactions += 1;
                    unique_senders.insert(tx.from);
                }
            }
            debug!(block = number, matched_so_far = total_transactions, "block processed");
        }

        let sender_count = unique_senders.len() as u64;
        let new_senders = unique_senders.difference(known_senders).count() as u64;
        let (engagement_ratio, adoption_index) = if sender_count > 0 {
            (
                total_transactions as f64 / sender_count as f64,
                new_senders as f64 / sender_count as f64 * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        Ok(ScanResult {
            window,
            total_transactions,
            unique_senders,
            new_senders,
            engagement_ratio,
            adoption_index,
            failed_blocks,
        })
    }
}
