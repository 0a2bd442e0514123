/// Repository traits and their implementations
///
/// - Diesel implementations over the PostgreSQL pool
/// - In-memory implementations for running without a database and for tests

pub mod memory;
pub mod price_repository;
pub mod version_repository;

pub use memory::{InMemoryPriceRepository, InMemoryVersionRepository};
pub use price_repository::{PriceRepository, PriceRepositoryImpl};
pub use version_repository::{VersionRepository, VersionRepositoryImpl};
