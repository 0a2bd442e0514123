//! In-process repository implementations
//!
//! Used when no `DATABASE_URL` is configured and as test doubles. They honor
//! the same key semantics as the PostgreSQL tables.

use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;

use super::{PriceRepository, VersionRepository};
use crate::database::connection::StoreError;
use crate::database::models::{NewStockPrice, StockPrice, Version};

/// Price points kept in a map keyed by (ticker, date)
#[derive(Default)]
pub struct InMemoryPriceRepository {
    rows: RwLock<BTreeMap<(String, NaiveDate), StockPrice>>,
}

impl InMemoryPriceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Every stored key in (ticker, date) order
    pub fn keys(&self) -> Vec<(String, NaiveDate)> {
        self.rows.read().keys().cloned().collect()
    }
}

impl PriceRepository for InMemoryPriceRepository {
    fn save_batch(&self, prices: Vec<NewStockPrice>) -> Result<usize, StoreError> {
        let mut rows = self.rows.write();
        let now = Utc::now();
        let mut inserted = 0;

        for price in prices {
            let key = (price.ticker.clone(), price.price_date);
            if rows.contains_key(&key) {
                continue;
            }
            rows.insert(
                key,
                StockPrice {
                    ticker: price.ticker,
                    price_date: price.price_date,
                    created_at: now,
                },
            );
            inserted += 1;
        }

        Ok(inserted)
    }

    fn find(&self, ticker: &str, price_date: NaiveDate) -> Result<Option<StockPrice>, StoreError> {
        Ok(self
            .rows
            .read()
            .get(&(ticker.to_string(), price_date))
            .cloned())
    }

    fn find_by_ticker(&self, ticker: &str) -> Result<Vec<StockPrice>, StoreError> {
        Ok(self
            .rows
            .read()
            .values()
            .filter(|row| row.ticker == ticker)
            .rev()
            .cloned()
            .collect())
    }
}

/// Version markers seeded at construction
#[derive(Default)]
pub struct InMemoryVersionRepository {
    versions: Vec<Version>,
}

impl InMemoryVersionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            versions: ids
                .into_iter()
                .map(|id| Version {
                    version_id: id.into(),
                })
                .collect(),
        }
    }
}

impl VersionRepository for InMemoryVersionRepository {
    fn find_latest(&self) -> Result<Option<Version>, StoreError> {
        Ok(self
            .versions
            .iter()
            .max_by(|a, b| a.version_id.cmp(&b.version_id))
            .cloned())
    }
}
