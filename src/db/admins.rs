use sea_orm::*;
use uuid::Uuid;

use crate::models::admins::{self, CreateAdmin};

/// Insert a new admin account.
pub async fn insert_admin(
    db: &DatabaseConnection,
    input: CreateAdmin,
) -> Result<admins::Model, DbErr> {
    let admin = admins::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(input.username),
        password_hash: Set(input.password_hash),
        email: Set(input.email),
        last_login: Set(None),
        created_at: Set(chrono::Utc::now()),
    };

    admin.insert(db).await
}

pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<admins::Model>, DbErr> {
    admins::Entity::find()
        .filter(admins::Column::Username.eq(username))
        .one(db)
        .await
}

/// Stamp `last_login` after a successful login.
pub async fn record_login(
    db: &DatabaseConnection,
    admin: admins::Model,
) -> Result<admins::Model, DbErr> {
    let mut active: admins::ActiveModel = admin.into();
    active.last_login = Set(Some(chrono::Utc::now()));
    active.update(db).await
}
