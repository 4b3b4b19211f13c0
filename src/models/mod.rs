mod aggregate;
mod app_config;
mod rich_list;
mod transaction;
mod volume_point;

pub use aggregate::AggregateResponse;
pub use app_config::{AppConfig, UpstreamUrls};
pub use rich_list::RichListEntry;
pub use transaction::LargeTransaction;
pub use volume_point::VolumePoint;
