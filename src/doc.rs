//! OpenAPI documentation for the apartment endpoints.
//!
//! The document is served as JSON at [`OPENAPI_JSON_URL`] and browsable
//! through Swagger UI under `/api`.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dto::schemas::{
    ApartmentListResponseSchema, ApartmentResponseSchema, ApartmentSchema, ErrorResponseSchema,
    UploadImagesSchema,
};
use crate::forms::apartments::{CreateApartmentForm, RemoveImageForm, UpdateApartmentForm};

/// Location of the raw OpenAPI document.
pub const OPENAPI_JSON_URL: &str = "/api-json";

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Apartment API",
        description = "Apartment listings with search and image uploads.",
        version = "1.0"
    ),
    paths(
        crate::routes::apartments::create_apartment,
        crate::routes::apartments::list_apartments,
        crate::routes::apartments::get_apartment,
        crate::routes::apartments::update_apartment,
        crate::routes::apartments::delete_apartment,
        crate::routes::apartments::upload_images,
        crate::routes::apartments::remove_image,
    ),
    components(schemas(
        ApartmentSchema,
        ApartmentResponseSchema,
        ApartmentListResponseSchema,
        ErrorResponseSchema,
        UploadImagesSchema,
        CreateApartmentForm,
        UpdateApartmentForm,
        RemoveImageForm,
    )),
    tags((name = "apartments", description = "Apartment listings and their images"))
)]
pub struct ApiDoc;

/// Swagger UI at `/api`, backed by the generated document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api/{_:.*}").url(OPENAPI_JSON_URL, ApiDoc::openapi())
}
