use actix_web::{HttpResponse, web};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use super::parse_id;
use crate::auth::middleware::AdminAccess;
use crate::db::newsletters as newsletter_db;
use crate::error::AppError;
use crate::response::ApiResponse;
use crate::validation::{NEWSLETTER_RULES, fields_from_json, validate};

const ALREADY_SUBSCRIBED: &str = "This email is already subscribed to the newsletter";

type JsonBody = web::Json<serde_json::Map<String, serde_json::Value>>;

/// POST /api/newsletter/subscribe
///
/// New emails are inserted (201). An inactive subscription is switched back on
/// in place (200). An active one is rejected as a duplicate.
pub async fn subscribe(
    db: web::Data<DatabaseConnection>,
    body: JsonBody,
) -> Result<HttpResponse, AppError> {
    let mut valid = validate(NEWSLETTER_RULES, &fields_from_json(body.into_inner()))?;
    let email = valid.take_required("email");

    if let Some(existing) = newsletter_db::find_by_email(db.get_ref(), &email).await? {
        if existing.is_active {
            return Err(AppError::DuplicateResource(ALREADY_SUBSCRIBED.to_string()));
        }

        let subscription = newsletter_db::reactivate(db.get_ref(), existing).await?;
        return Ok(HttpResponse::Ok().json(ApiResponse::with_data(
            "Newsletter subscription reactivated successfully",
            subscription,
        )));
    }

    // A concurrent subscribe for the same email can slip past the lookup;
    // the unique key on `email` catches it here.
    let subscription = newsletter_db::insert_subscription(db.get_ref(), email)
        .await
        .map_err(duplicate_or_db)?;

    tracing::info!("New newsletter subscription {}", subscription.id);
    Ok(HttpResponse::Created().json(ApiResponse::with_data(
        "Successfully subscribed to newsletter",
        subscription,
    )))
}

/// POST /api/newsletter/unsubscribe - deactivates without deleting.
pub async fn unsubscribe(
    db: web::Data<DatabaseConnection>,
    body: JsonBody,
) -> Result<HttpResponse, AppError> {
    let mut valid = validate(NEWSLETTER_RULES, &fields_from_json(body.into_inner()))?;
    let email = valid.take_required("email");

    let subscription = newsletter_db::find_by_email(db.get_ref(), &email)
        .await?
        .filter(|s| s.is_active)
        .ok_or_else(|| AppError::NotFound("Subscription not found".to_string()))?;

    let subscription = newsletter_db::deactivate(db.get_ref(), subscription).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_data(
        "Successfully unsubscribed from newsletter",
        subscription,
    )))
}

/// GET /api/admin/subscriptions
pub async fn admin_list_subscriptions(
    _admin: AdminAccess,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let subscriptions = newsletter_db::get_all_subscriptions(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(subscriptions)))
}

/// DELETE /api/admin/subscriptions/{id}
pub async fn delete_subscription(
    _admin: AdminAccess,
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path, "Invalid subscription ID")?;

    if newsletter_db::get_subscription_by_id(db.get_ref(), id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(
            "Newsletter subscription not found".to_string(),
        ));
    }
    newsletter_db::delete_subscription(db.get_ref(), id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(
        "Newsletter subscription deleted successfully",
    )))
}

pub(crate) fn duplicate_or_db(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::DuplicateResource(ALREADY_SUBSCRIBED.to_string())
        }
        _ => AppError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    #[actix_web::test]
    async fn racing_insert_of_same_email_is_a_duplicate() {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        newsletter_db::insert_subscription(&db, "race@news.io".to_string())
            .await
            .unwrap();
        let err = newsletter_db::insert_subscription(&db, "race@news.io".to_string())
            .await
            .unwrap_err();

        match duplicate_or_db(err) {
            AppError::DuplicateResource(message) => assert_eq!(message, ALREADY_SUBSCRIBED),
            other => panic!("expected duplicate, got {other:?}"),
        }
    }

    #[test]
    fn other_database_errors_pass_through() {
        let err = duplicate_or_db(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, AppError::Database(_)));
    }
}
