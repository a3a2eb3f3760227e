// Chain data access: the provider trait seam plus the JSON-RPC implementation.

pub mod rpc;
pub mod traits;

pub use rpc::HttpRpcProvider;
pub use traits::ChainProvider;
