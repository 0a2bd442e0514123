pub mod stock_price;
pub mod version;

pub use stock_price::{NewStockPrice, StockPrice};
pub use version::Version;
