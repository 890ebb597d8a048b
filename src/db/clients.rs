use sea_orm::*;
use uuid::Uuid;

use crate::models::Patch;
use crate::models::clients::{self, CreateClient, UpdateClient};

/// Insert a new client.
pub async fn insert_client(
    db: &DatabaseConnection,
    input: CreateClient,
) -> Result<clients::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_client = clients::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        description: Set(input.description),
        designation: Set(input.designation),
        image: Set(input.image),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_client.insert(db).await
}

/// Fetch all clients, newest first.
pub async fn get_all_clients(db: &DatabaseConnection) -> Result<Vec<clients::Model>, DbErr> {
    clients::Entity::find()
        .order_by_desc(clients::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single client by ID.
pub async fn get_client_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<clients::Model>, DbErr> {
    clients::Entity::find_by_id(id).one(db).await
}

/// Apply a partial update to an already-loaded client.
pub async fn update_client(
    db: &DatabaseConnection,
    client: clients::Model,
    input: UpdateClient,
) -> Result<clients::Model, DbErr> {
    let mut active: clients::ActiveModel = client.into();

    if let Patch::Set(name) = input.name {
        active.name = Set(name);
    }
    if let Patch::Set(description) = input.description {
        active.description = Set(description);
    }
    if let Patch::Set(designation) = input.designation {
        active.designation = Set(designation);
    }
    if let Some(image) = input.image {
        active.image = Set(image);
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

/// Delete a client by ID.
pub async fn delete_client(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    clients::Entity::delete_by_id(id).exec(db).await
}
