use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Version marker - opaque build/release identifier reported to clients
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::database::schema::versions)]
#[diesel(primary_key(version_id))]
pub struct Version {
    pub version_id: String,
}
