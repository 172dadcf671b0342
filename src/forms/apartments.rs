use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::apartment::{NewApartment, UpdateApartment};
use crate::storage::UploadedImage;

/// Maximum number of files accepted by a single upload request.
pub const MAX_UPLOAD_FILES: usize = 10;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
/// JSON body for creating an apartment.
pub struct CreateApartmentForm {
    #[validate(length(min = 1))]
    pub unit_name: String,
    #[validate(length(min = 1))]
    pub unit_number: String,
    #[validate(length(min = 1))]
    pub project: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(range(min = 0))]
    pub bedrooms: i32,
    #[validate(range(min = 0))]
    pub bathrooms: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
/// JSON body for a partial apartment update. Absent keys are left unchanged.
pub struct UpdateApartmentForm {
    #[validate(length(min = 1))]
    pub unit_name: Option<String>,
    #[validate(length(min = 1))]
    pub unit_number: Option<String>,
    #[validate(length(min = 1))]
    pub project: Option<String>,
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 0))]
    pub bathrooms: Option<i32>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
/// JSON body naming the image to detach from an apartment.
pub struct RemoveImageForm {
    #[validate(length(min = 1))]
    pub image: String,
}

#[derive(MultipartForm)]
/// Multipart body carrying the images to attach to an apartment.
pub struct UploadImagesForm {
    #[multipart(limit = "10MB")]
    pub images: Vec<TempFile>,
}

impl From<CreateApartmentForm> for NewApartment {
    fn from(form: CreateApartmentForm) -> Self {
        Self {
            unit_name: form.unit_name,
            unit_number: form.unit_number,
            project: form.project,
            address: form.address,
            bedrooms: form.bedrooms,
            bathrooms: form.bathrooms,
            price: form.price,
            description: form.description,
            images: form.images,
        }
    }
}

impl From<UpdateApartmentForm> for UpdateApartment {
    fn from(form: UpdateApartmentForm) -> Self {
        Self {
            unit_name: form.unit_name,
            unit_number: form.unit_number,
            project: form.project,
            address: form.address,
            bedrooms: form.bedrooms,
            bathrooms: form.bathrooms,
            price: form.price,
            description: form.description,
            images: form.images,
        }
    }
}

impl UploadImagesForm {
    /// Describes the received files for the storage layer. The temporary files
    /// stay alive as long as the form does.
    pub fn uploads(&self) -> Vec<UploadedImage> {
        self.images
            .iter()
            .map(|file| UploadedImage {
                original_name: file.file_name.clone(),
                path: file.file.path().to_path_buf(),
            })
            .collect()
    }
}
