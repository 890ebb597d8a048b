use sea_orm::*;
use uuid::Uuid;

use crate::models::contacts::{self, CreateContact};

/// Insert a new contact form submission.
pub async fn insert_contact(
    db: &DatabaseConnection,
    input: CreateContact,
) -> Result<contacts::Model, DbErr> {
    let new_contact = contacts::ActiveModel {
        id: Set(Uuid::new_v4()),
        full_name: Set(input.full_name),
        email: Set(input.email),
        mobile_number: Set(input.mobile_number),
        city: Set(input.city),
        submitted_at: Set(chrono::Utc::now()),
        is_read: Set(false),
    };

    new_contact.insert(db).await
}

/// Fetch all submissions, most recent first.
pub async fn get_all_contacts(db: &DatabaseConnection) -> Result<Vec<contacts::Model>, DbErr> {
    contacts::Entity::find()
        .order_by_desc(contacts::Column::SubmittedAt)
        .all(db)
        .await
}

pub async fn get_contact_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<contacts::Model>, DbErr> {
    contacts::Entity::find_by_id(id).one(db).await
}

pub async fn delete_contact(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    contacts::Entity::delete_by_id(id).exec(db).await
}
