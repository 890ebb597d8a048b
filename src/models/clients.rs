use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::Patch;

/// SeaORM entity for the `clients` table (testimonials shown on the site).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub designation: String,
    pub image: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone)]
pub struct CreateClient {
    pub name: String,
    pub description: String,
    pub designation: String,
    pub image: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateClient {
    pub name: Patch,
    pub description: Patch,
    pub designation: Patch,
    pub image: Option<String>,
}
