// Core structs: BlockWindow, Transaction, ScanResult
use std::collections::HashSet;

use alloy_primitives::Address;
use serde::Deserialize;
use thiserror::Error;

/// Inclusive, contiguous range of block numbers covered by one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockWindow {
    pub start: u64,
    pub end: u64,
}

impl BlockWindow {
    /// Window over the `num_blocks` most recent blocks up to and including
    /// `head`, clamped at genesis when the chain is shorter than the window.
    /// `num_blocks` must be at least 1.
    pub fn trailing(head: u64, num_blocks: u64) -> Self {
        Self {
            start: head.saturating_sub(num_blocks - 1),
            end: head,
        }
    }

    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Block numbers in ascending order.
    pub fn blocks(&self) -> impl Iterator<Item = u64> {
        self.start..=self.end
    }
}

/// Read-only view of a chain transaction. `to` is absent for contract
/// creations. Matches the shape returned by `eth_getBlockByNumber` with
/// full transactions; extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Transaction {
    pub from: Address,
    pub to: Option<Address>,
}

/// Aggregated outcome of one scan. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub window: BlockWindow,
    /// Transactions in the window addressed to the target contract.
    pub total_transactions: u64,
    pub unique_senders: HashSet<Address>,
    /// Senders not present in the supplied known-senders set.
    pub new_senders: u64,
    /// Average matching transactions per unique sender; 0 when no senders.
    pub engagement_ratio: f64,
    /// Share of new senders among all unique senders, in percent;
    /// 0 when no senders.
    pub adoption_index: f64,
    /// Block numbers that could not be fetched and were skipped.
    pub failed_blocks: Vec<u64>,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid contract address `{0}`")]
    InvalidAddress(String),
    #[error("invalid scan window: {0}")]
    InvalidArgument(String),
    #[error("provider connection failed: {0}")]
    Connection(#[from] ProviderError),
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("block {0} is unavailable")]
    BlockUnavailable(u64),
    #[error("malformed rpc response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_window_covers_requested_depth() {
        let window = BlockWindow::trailing(1_000, 100);
        assert_eq!(window.start, 901);
        assert_eq!(window.end, 1_000);
        assert_eq!(window.len(), 100);
    }

    #[test]
    fn single_block_window() {
        let window = BlockWindow::trailing(42, 1);
        assert_eq!(window.start, 42);
        assert_eq!(window.end, 42);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn window_clamps_at_genesis() {
        let window = BlockWindow::trailing(5, 100);
        assert_eq!(window.start, 0);
        assert_eq!(window.end, 5);
        assert_eq!(window.len(), 6);
    }

    #[test]
    fn blocks_iterate_ascending() {
        let window = BlockWindow::trailing(12, 3);
        let numbers: Vec<u64> = window.blocks().collect();
        assert_eq!(numbers, vec![10, 11, 12]);
    }
}
