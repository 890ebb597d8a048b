use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use super::parse_id;
use crate::auth::middleware::AdminAccess;
use crate::db::contacts as contact_db;
use crate::error::AppError;
use crate::models::contacts::CreateContact;
use crate::response::ApiResponse;
use crate::validation::{CONTACT_RULES, fields_from_json, validate};

/// POST /api/contact - public contact form.
pub async fn submit_contact(
    db: web::Data<DatabaseConnection>,
    body: web::Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<HttpResponse, AppError> {
    let fields = fields_from_json(body.into_inner());
    let mut valid = validate(CONTACT_RULES, &fields)?;

    let contact = contact_db::insert_contact(
        db.get_ref(),
        CreateContact {
            full_name: valid.take_required("fullName"),
            email: valid.take_required("email"),
            mobile_number: valid.take_required("mobileNumber"),
            city: valid.take_required("city"),
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_data(
        "Contact form submitted successfully",
        contact,
    )))
}

/// GET /api/admin/contacts - all submissions, most recent first.
pub async fn admin_list_contacts(
    _admin: AdminAccess,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let contacts = contact_db::get_all_contacts(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(contacts)))
}

/// DELETE /api/admin/contacts/{id}
pub async fn delete_contact(
    _admin: AdminAccess,
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path, "Invalid contact ID")?;

    let result = contact_db::delete_contact(db.get_ref(), id).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(
            "Contact submission not found".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message(
        "Contact submission deleted successfully",
    )))
}
