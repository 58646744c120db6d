pub use std::collections::HashMap;

pub use chrono::{NaiveDateTime as DateTime, Utc};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait,
  FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect,
  RelationTrait, Set,
};
pub use sea_orm_migration::MigratorTrait;
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result};
pub(crate) use crate::utils;
