use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Patch;

/// Stored when a project is created without a location.
pub const DEFAULT_LOCATION: &str = "Location not specified";

/// SeaORM entity for the `projects` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    /// Public path of the stored 450x350 image, e.g. `/uploads/hero-1700000000000-1a2b3c4d.png`.
    pub image: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub location: Option<String>,
    pub image: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub name: Patch,
    pub description: Patch,
    pub location: Patch,
    pub image: Option<String>,
}
