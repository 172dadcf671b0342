//! Apartment CRUD and image endpoints.

use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, patch, post, web};
use serde::Deserialize;
use validator::Validate;

use crate::domain::apartment::Apartment;
use crate::domain::types::ApartmentId;
use crate::dto::api::ApiResponse;
use crate::dto::schemas::{
    ApartmentListResponseSchema, ApartmentResponseSchema, ErrorResponseSchema, UploadImagesSchema,
};
use crate::forms::apartments::{
    CreateApartmentForm, MAX_UPLOAD_FILES, RemoveImageForm, UpdateApartmentForm, UploadImagesForm,
};
use crate::repository::DieselRepository;
use crate::routes::{ApiError, ApiResult};
use crate::services::apartments as apartments_service;
use crate::storage::FsImageStorage;

const APARTMENT_NOT_FOUND: &str = "Apartment not found";
const APARTMENT_OR_IMAGE_NOT_FOUND: &str = "Apartment or image not found";

#[derive(Debug, Deserialize)]
struct ListApartmentsQuery {
    search: Option<String>,
}

/// Ids that are not UUIDs cannot belong to any apartment.
fn parse_id(raw: &str, not_found: &'static str) -> ApiResult<ApartmentId> {
    raw.parse().map_err(|_| ApiError::NotFound(not_found))
}

#[utoipa::path(
    post,
    path = "/apartments",
    request_body(
        content = CreateApartmentForm,
        description = "Apartment to create",
        example = json!({
            "unitName": "A",
            "unitNumber": "101",
            "project": "ProjectX",
            "address": "123 Main St",
            "bedrooms": 2,
            "bathrooms": 1,
            "price": 1000,
            "description": "Nice apartment"
        })
    ),
    responses(
        (status = 201, description = "Apartment created successfully", body = ApartmentResponseSchema),
        (status = 400, description = "Malformed or invalid body", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorResponseSchema)
    ),
    tag = "apartments",
    operation_id = "createApartment"
)]
#[post("/apartments")]
pub async fn create_apartment(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateApartmentForm>,
) -> ApiResult<ApiResponse<Apartment>> {
    form.validate()?;

    let apartment = apartments_service::create_apartment(repo.get_ref(), &form.into())?;
    log::info!("Created apartment {}", apartment.id);

    Ok(ApiResponse::created(
        "Apartment created successfully",
        apartment,
    ))
}

#[utoipa::path(
    get,
    path = "/apartments",
    params(
        ("search" = Option<String>, Query, description = "Search by unitName, unitNumber, or project")
    ),
    responses(
        (status = 200, description = "Apartments fetched successfully", body = ApartmentListResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorResponseSchema)
    ),
    tag = "apartments",
    operation_id = "listApartments"
)]
#[get("/apartments")]
pub async fn list_apartments(
    repo: web::Data<DieselRepository>,
    params: web::Query<ListApartmentsQuery>,
) -> ApiResult<ApiResponse<Vec<Apartment>>> {
    let apartments = apartments_service::list_apartments(repo.get_ref(), params.into_inner().search)?;

    Ok(ApiResponse::ok("Apartments fetched successfully", apartments))
}

#[utoipa::path(
    get,
    path = "/apartments/{id}",
    params(("id" = String, Path, description = "Apartment identifier")),
    responses(
        (status = 200, description = "Apartment fetched successfully", body = ApartmentResponseSchema),
        (status = 404, description = "Apartment not found", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorResponseSchema)
    ),
    tag = "apartments",
    operation_id = "getApartment"
)]
#[get("/apartments/{id}")]
pub async fn get_apartment(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> ApiResult<ApiResponse<Apartment>> {
    let id = parse_id(&id, APARTMENT_NOT_FOUND)?;

    apartments_service::get_apartment(repo.get_ref(), id)?
        .map(|apartment| ApiResponse::ok("Apartment fetched successfully", apartment))
        .ok_or(ApiError::NotFound(APARTMENT_NOT_FOUND))
}

#[utoipa::path(
    patch,
    path = "/apartments/{id}",
    params(("id" = String, Path, description = "Apartment identifier")),
    request_body(
        content = UpdateApartmentForm,
        description = "Fields to change; absent keys stay as they are",
        example = json!({
            "price": 1200,
            "description": "Updated description"
        })
    ),
    responses(
        (status = 200, description = "Apartment updated successfully", body = ApartmentResponseSchema),
        (status = 400, description = "Malformed or invalid body", body = ErrorResponseSchema),
        (status = 404, description = "Apartment not found", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorResponseSchema)
    ),
    tag = "apartments",
    operation_id = "updateApartment"
)]
#[patch("/apartments/{id}")]
pub async fn update_apartment(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
    web::Json(form): web::Json<UpdateApartmentForm>,
) -> ApiResult<ApiResponse<Apartment>> {
    let id = parse_id(&id, APARTMENT_NOT_FOUND)?;
    form.validate()?;

    apartments_service::update_apartment(repo.get_ref(), id, &form.into())?
        .map(|apartment| ApiResponse::ok("Apartment updated successfully", apartment))
        .ok_or(ApiError::NotFound(APARTMENT_NOT_FOUND))
}

#[utoipa::path(
    delete,
    path = "/apartments/{id}",
    params(("id" = String, Path, description = "Apartment identifier")),
    responses(
        (status = 200, description = "Apartment deleted successfully", body = ApartmentResponseSchema),
        (status = 404, description = "Apartment not found", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorResponseSchema)
    ),
    tag = "apartments",
    operation_id = "deleteApartment"
)]
#[delete("/apartments/{id}")]
pub async fn delete_apartment(
    repo: web::Data<DieselRepository>,
    id: web::Path<String>,
) -> ApiResult<ApiResponse<Apartment>> {
    let id = parse_id(&id, APARTMENT_NOT_FOUND)?;

    let apartment = apartments_service::delete_apartment(repo.get_ref(), id)?
        .ok_or(ApiError::NotFound(APARTMENT_NOT_FOUND))?;
    log::info!("Deleted apartment {id}");

    Ok(ApiResponse::ok("Apartment deleted successfully", apartment))
}

#[utoipa::path(
    post,
    path = "/apartments/{id}/images",
    params(("id" = String, Path, description = "Apartment identifier")),
    request_body(
        content = UploadImagesSchema,
        description = "Up to 10 files in the `images` field",
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, description = "Images uploaded successfully", body = ApartmentResponseSchema),
        (status = 400, description = "No files uploaded, or too many", body = ErrorResponseSchema),
        (status = 404, description = "Apartment not found", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorResponseSchema)
    ),
    tag = "apartments",
    operation_id = "uploadApartmentImages"
)]
#[post("/apartments/{id}/images")]
pub async fn upload_images(
    repo: web::Data<DieselRepository>,
    storage: web::Data<FsImageStorage>,
    id: web::Path<String>,
    MultipartForm(form): MultipartForm<UploadImagesForm>,
) -> ApiResult<ApiResponse<Apartment>> {
    if form.images.is_empty() {
        return Err(ApiError::BadRequest("No files uploaded".to_string()));
    }
    if form.images.len() > MAX_UPLOAD_FILES {
        return Err(ApiError::BadRequest("Too many files uploaded".to_string()));
    }
    let id = parse_id(&id, APARTMENT_NOT_FOUND)?;

    let uploads = form.uploads();
    apartments_service::add_images(repo.get_ref(), storage.get_ref(), id, &uploads)?
        .map(|apartment| ApiResponse::ok("Images uploaded successfully", apartment))
        .ok_or(ApiError::NotFound(APARTMENT_NOT_FOUND))
}

#[utoipa::path(
    delete,
    path = "/apartments/{id}/images",
    params(("id" = String, Path, description = "Apartment identifier")),
    request_body(
        content = RemoveImageForm,
        description = "Public path of the image to detach",
        example = json!({"image": "/uploads/apartments/0b6d3c7e-8d6c-4f3b-9a55-5b0f4a1e9f11.png"})
    ),
    responses(
        (status = 200, description = "Image deleted successfully", body = ApartmentResponseSchema),
        (status = 400, description = "Malformed body", body = ErrorResponseSchema),
        (status = 404, description = "Apartment or image not found", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorResponseSchema)
    ),
    tag = "apartments",
    operation_id = "removeApartmentImage"
)]
#[delete("/apartments/{id}/images")]
pub async fn remove_image(
    repo: web::Data<DieselRepository>,
    storage: web::Data<FsImageStorage>,
    id: web::Path<String>,
    web::Json(form): web::Json<RemoveImageForm>,
) -> ApiResult<ApiResponse<Apartment>> {
    let id = parse_id(&id, APARTMENT_OR_IMAGE_NOT_FOUND)?;
    form.validate()?;

    apartments_service::remove_image(repo.get_ref(), storage.get_ref(), id, &form.image)?
        .map(|apartment| ApiResponse::ok("Image deleted successfully", apartment))
        .ok_or(ApiError::NotFound(APARTMENT_OR_IMAGE_NOT_FOUND))
}
