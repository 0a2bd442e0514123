use crate::database::connection::{PgPooledConnection, StoreError};
use crate::database::models::Version;
use crate::database::schema::versions;
use diesel::prelude::*;
use std::sync::Arc;

/// Version repository trait - read-only access to version markers
pub trait VersionRepository: Send + Sync {
    /// Marker with the greatest identifier, if any exist
    fn find_latest(&self) -> Result<Option<Version>, StoreError>;
}

/// Diesel implementation of VersionRepository
pub struct VersionRepositoryImpl {
    get_conn: Arc<dyn Fn() -> Result<PgPooledConnection, StoreError> + Send + Sync>,
}

impl VersionRepositoryImpl {
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<PgPooledConnection, StoreError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }
}

impl VersionRepository for VersionRepositoryImpl {
    fn find_latest(&self) -> Result<Option<Version>, StoreError> {
        let mut conn = (self.get_conn)()?;

        versions::table
            .order(versions::version_id.desc())
            .select(Version::as_select())
            .first(&mut conn)
            .optional()
            .map_err(StoreError::from)
    }
}
