use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use super::{discard_image, parse_id};
use crate::auth::middleware::AdminAccess;
use crate::db::projects as project_db;
use crate::error::AppError;
use crate::images::ImageStore;
use crate::models::Patch;
use crate::models::projects::{CreateProject, UpdateProject};
use crate::response::ApiResponse;
use crate::upload::{UploadLimits, read_image_form};
use crate::validation::{PROJECT_RULES, validate};

const NOT_FOUND: &str = "Project not found";
const INVALID_ID: &str = "Invalid project ID";

/// GET /api/projects - public listing, newest first.
pub async fn list_projects(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    let projects = project_db::get_all_projects(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::list(projects)))
}

/// GET /api/admin/projects - same listing behind the admin gate.
pub async fn admin_list_projects(
    _admin: AdminAccess,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    list_projects(db).await
}

/// POST /api/admin/projects - multipart form with a mandatory `image`.
pub async fn create_project(
    _admin: AdminAccess,
    db: web::Data<DatabaseConnection>,
    images: web::Data<ImageStore>,
    limits: web::Data<UploadLimits>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = read_image_form(payload, &limits).await?;
    let mut fields = validate(PROJECT_RULES, &form.fields)?;
    let upload = form
        .image
        .ok_or_else(|| AppError::MissingRequiredUpload("Project image is required".to_string()))?;

    let image = images.store(upload).await?;
    let input = CreateProject {
        name: fields.take_required("name"),
        description: fields.take_required("description"),
        location: fields.take("location"),
        image: image.clone(),
    };

    match project_db::insert_project(db.get_ref(), input).await {
        Ok(project) => {
            tracing::info!("Created project {}", project.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::with_data("Project created successfully", project)))
        }
        Err(e) => {
            discard_image(&images, &image).await;
            Err(e.into())
        }
    }
}

/// PUT /api/admin/projects/{id} - partial update, optionally replacing the image.
pub async fn update_project(
    _admin: AdminAccess,
    db: web::Data<DatabaseConnection>,
    images: web::Data<ImageStore>,
    limits: web::Data<UploadLimits>,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = read_image_form(payload, &limits).await?;
    let mut fields = validate(PROJECT_RULES, &form.fields)?;

    let id = parse_id(&path, INVALID_ID)?;
    let project = project_db::get_project_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;
    let old_image = project.image.clone();

    let new_image = match form.image {
        Some(upload) => Some(images.store(upload).await?),
        None => None,
    };

    let input = UpdateProject {
        name: Patch::non_empty(fields.take("name")),
        description: Patch::non_empty(fields.take("description")),
        location: Patch::present(fields.take("location")),
        image: new_image.clone(),
    };

    let updated = match project_db::update_project(db.get_ref(), project, input).await {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(image) = &new_image {
                discard_image(&images, image).await;
            }
            return Err(e.into());
        }
    };

    if new_image.is_some() {
        discard_image(&images, &old_image).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::with_data("Project updated successfully", updated)))
}

/// DELETE /api/admin/projects/{id} - removes the record and its stored image.
pub async fn delete_project(
    _admin: AdminAccess,
    db: web::Data<DatabaseConnection>,
    images: web::Data<ImageStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path, INVALID_ID)?;
    let project = project_db::get_project_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    discard_image(&images, &project.image).await;
    project_db::delete_project(db.get_ref(), id).await?;

    tracing::info!("Deleted project {id}");
    Ok(HttpResponse::Ok().json(ApiResponse::message("Project deleted successfully")))
}
