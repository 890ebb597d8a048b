use sea_orm::*;
use uuid::Uuid;

use crate::models::newsletters;

/// Insert a new active subscription. Fails with a unique-constraint violation
/// if the email is already present.
pub async fn insert_subscription(
    db: &DatabaseConnection,
    email: String,
) -> Result<newsletters::Model, DbErr> {
    let subscription = newsletters::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        subscribed_at: Set(chrono::Utc::now()),
        is_active: Set(true),
    };

    subscription.insert(db).await
}

/// Look a subscription up by its (already lowercased) email.
pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<newsletters::Model>, DbErr> {
    newsletters::Entity::find()
        .filter(newsletters::Column::Email.eq(email))
        .one(db)
        .await
}

/// Flip an inactive subscription back on and refresh `subscribed_at` in place.
pub async fn reactivate(
    db: &DatabaseConnection,
    subscription: newsletters::Model,
) -> Result<newsletters::Model, DbErr> {
    let mut active: newsletters::ActiveModel = subscription.into();
    active.is_active = Set(true);
    active.subscribed_at = Set(chrono::Utc::now());
    active.update(db).await
}

/// Mark a subscription inactive without deleting it.
pub async fn deactivate(
    db: &DatabaseConnection,
    subscription: newsletters::Model,
) -> Result<newsletters::Model, DbErr> {
    let mut active: newsletters::ActiveModel = subscription.into();
    active.is_active = Set(false);
    active.update(db).await
}

/// Fetch all subscriptions, most recent first.
pub async fn get_all_subscriptions(
    db: &DatabaseConnection,
) -> Result<Vec<newsletters::Model>, DbErr> {
    newsletters::Entity::find()
        .order_by_desc(newsletters::Column::SubscribedAt)
        .all(db)
        .await
}

pub async fn get_subscription_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<newsletters::Model>, DbErr> {
    newsletters::Entity::find_by_id(id).one(db).await
}

pub async fn delete_subscription(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<DeleteResult, DbErr> {
    newsletters::Entity::delete_by_id(id).exec(db).await
}
