use crate::database::connection::{PgPooledConnection, StoreError};
use crate::database::models::{NewStockPrice, StockPrice};
use crate::database::schema::stock_prices;
use chrono::NaiveDate;
use diesel::prelude::*;
use std::sync::Arc;

/// Price repository trait - persistence of (ticker, date) price points
///
/// Rows are keyed by the (ticker, price_date) pair; writing a pair that
/// already exists leaves the stored row untouched.
pub trait PriceRepository: Send + Sync {
    /// Insert price points, skipping pairs already stored
    ///
    /// Returns the number of rows actually inserted
    fn save_batch(&self, prices: Vec<NewStockPrice>) -> Result<usize, StoreError>;

    /// Find a single price point by its key
    fn find(&self, ticker: &str, price_date: NaiveDate) -> Result<Option<StockPrice>, StoreError>;

    /// All stored price points for a ticker, newest date first
    fn find_by_ticker(&self, ticker: &str) -> Result<Vec<StockPrice>, StoreError>;
}

/// Diesel implementation of PriceRepository
pub struct PriceRepositoryImpl {
    get_conn: Arc<dyn Fn() -> Result<PgPooledConnection, StoreError> + Send + Sync>,
}

impl PriceRepositoryImpl {
    /// Create new price repository with connection provider
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<PgPooledConnection, StoreError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }
}

impl PriceRepository for PriceRepositoryImpl {
    fn save_batch(&self, prices: Vec<NewStockPrice>) -> Result<usize, StoreError> {
        if prices.is_empty() {
            return Ok(0);
        }

        let mut conn = (self.get_conn)()?;

        diesel::insert_into(stock_prices::table)
            .values(&prices)
            .on_conflict((stock_prices::ticker, stock_prices::price_date))
            .do_nothing()
            .execute(&mut conn)
            .map_err(StoreError::from)
    }

    fn find(&self, ticker: &str, price_date: NaiveDate) -> Result<Option<StockPrice>, StoreError> {
        let mut conn = (self.get_conn)()?;

        stock_prices::table
            .filter(stock_prices::ticker.eq(ticker))
            .filter(stock_prices::price_date.eq(price_date))
            .select(StockPrice::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StoreError::from)
    }

    fn find_by_ticker(&self, ticker: &str) -> Result<Vec<StockPrice>, StoreError> {
        let mut conn = (self.get_conn)()?;

        stock_prices::table
            .filter(stock_prices::ticker.eq(ticker))
            .order(stock_prices::price_date.desc())
            .select(StockPrice::as_select())
            .load(&mut conn)
            .map_err(StoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{establish_connection_pool, run_migrations};

    // Tests require actual database connection - skip in CI
    #[test]
    #[ignore]
    fn test_price_repository_round_trip() {
        let database_url = std::env::var("DATABASE_URL").unwrap();
        let pool = establish_connection_pool(&database_url, 2).unwrap();
        run_migrations(&pool).unwrap();

        let repository = PriceRepositoryImpl::new(move || {
            pool.get()
                .map_err(|e| StoreError::ConnectionPoolError(e.to_string()))
        });

        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        repository
            .save_batch(vec![NewStockPrice::new("ZZTEST", date)])
            .unwrap();

        let stored = repository.find("ZZTEST", date).unwrap().unwrap();
        assert_eq!(stored.ticker, "ZZTEST");
        assert_eq!(stored.price_date, date);

        // Second write of the same pair is a no-op
        let inserted = repository
            .save_batch(vec![NewStockPrice::new("ZZTEST", date)])
            .unwrap();
        assert_eq!(inserted, 0);
    }

    #[test]
    #[ignore]
    fn test_long_ticker_is_stored() {
        let database_url = std::env::var("DATABASE_URL").unwrap();
        let pool = establish_connection_pool(&database_url, 2).unwrap();
        run_migrations(&pool).unwrap();

        let repository = PriceRepositoryImpl::new(move || {
            pool.get()
                .map_err(|e| StoreError::ConnectionPoolError(e.to_string()))
        });

        let ticker = "ZZTEST-LONG-CLASS-B-PREFERRED";
        let date = NaiveDate::from_ymd_opt(1999, 12, 30).unwrap();
        let inserted = repository
            .save_batch(vec![NewStockPrice::new(ticker, date)])
            .unwrap();

        assert!(inserted <= 1);
        assert_eq!(repository.find(ticker, date).unwrap().unwrap().ticker, ticker);
    }
}
