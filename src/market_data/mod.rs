/// Remote market data access
///
/// Wraps the third-party historical-price API behind the `PriceFetcher`
/// trait and exposes the raw response as a `PriceRecordSet`.

pub mod errors;
pub mod fetcher;
pub mod record_set;

pub use errors::{FetchError, RecordSetError};
pub use fetcher::{HistoricalPriceClient, PriceFetcher};
pub use record_set::{HistoricalRecord, PriceRecordSet};
