use crate::model::{ProviderError, Transaction};

#[async_trait::async_trait]
pub trait ChainProvider: Send + Sync {
    async fn current_block_height(&self) -> Result<u64, ProviderError>;
    async fn block_transactions(&self, number: u64) -> Result<Vec<Transaction>, ProviderError>;
}
