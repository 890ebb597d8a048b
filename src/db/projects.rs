use sea_orm::*;
use uuid::Uuid;

use crate::models::Patch;
use crate::models::projects::{self, CreateProject, DEFAULT_LOCATION, UpdateProject};

/// Insert a new project.
pub async fn insert_project(
    db: &DatabaseConnection,
    input: CreateProject,
) -> Result<projects::Model, DbErr> {
    let now = chrono::Utc::now();
    let new_project = projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        description: Set(input.description),
        location: Set(input
            .location
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string())),
        image: Set(input.image),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_project.insert(db).await
}

/// Fetch all projects, newest first.
pub async fn get_all_projects(db: &DatabaseConnection) -> Result<Vec<projects::Model>, DbErr> {
    projects::Entity::find()
        .order_by_desc(projects::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single project by ID.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(db).await
}

/// Apply a partial update to an already-loaded project.
pub async fn update_project(
    db: &DatabaseConnection,
    project: projects::Model,
    input: UpdateProject,
) -> Result<projects::Model, DbErr> {
    let mut active: projects::ActiveModel = project.into();

    if let Patch::Set(name) = input.name {
        active.name = Set(name);
    }
    if let Patch::Set(description) = input.description {
        active.description = Set(description);
    }
    if let Patch::Set(location) = input.location {
        active.location = Set(location);
    }
    if let Some(image) = input.image {
        active.image = Set(image);
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

/// Delete a project by ID.
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    projects::Entity::delete_by_id(id).exec(db).await
}
