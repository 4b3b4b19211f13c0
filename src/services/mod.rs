pub mod aggregator;
pub mod large_transactions;
pub mod price;
pub mod rich_list;
pub mod ttl_cache;
pub mod upstream;
pub mod volume;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::{Aggregator, SourceCacheStats};
pub use large_transactions::LargeTransactionSource;
pub use price::PriceSource;
pub use rich_list::RichListSource;
pub use ttl_cache::{CacheStats, TtlCache};
pub use upstream::{HttpUpstream, Upstream};
pub use volume::VolumeSource;
