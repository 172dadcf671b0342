//! OpenAPI schema definitions for the response envelope and domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here mirror the JSON
//! they serialize to, so the documentation lives in the HTTP layer.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::apartment::Apartment`].
#[derive(ToSchema)]
#[schema(as = Apartment, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApartmentSchema {
    /// Identifier assigned on creation.
    #[schema(format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "A")]
    unit_name: String,
    #[schema(example = "101")]
    unit_number: String,
    #[schema(example = "ProjectX")]
    project: String,
    #[schema(example = "123 Main St")]
    address: String,
    #[schema(example = 2)]
    bedrooms: i32,
    #[schema(example = 1)]
    bathrooms: i32,
    #[schema(example = 1000.0)]
    price: f64,
    #[schema(example = "Nice apartment")]
    description: String,
    /// Public paths of the uploaded images, in upload order.
    #[schema(example = json!(["/uploads/apartments/0b6d3c7e-8d6c-4f3b-9a55-5b0f4a1e9f11.png"]))]
    images: Vec<String>,
    #[schema(format = DateTime, example = "2025-06-01T10:00:00Z")]
    created_at: String,
    #[schema(format = DateTime, example = "2025-06-01T10:00:00Z")]
    updated_at: String,
}

/// [`crate::dto::api::ApiResponse`] carrying a single apartment.
#[derive(ToSchema)]
#[schema(as = ApartmentResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApartmentResponseSchema {
    #[schema(example = 200)]
    code: u16,
    #[schema(example = "Apartment fetched successfully")]
    message: String,
    data: Option<ApartmentSchema>,
}

/// [`crate::dto::api::ApiResponse`] carrying a list of apartments.
#[derive(ToSchema)]
#[schema(as = ApartmentListResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApartmentListResponseSchema {
    #[schema(example = 200)]
    code: u16,
    #[schema(example = "Apartments fetched successfully")]
    message: String,
    data: Option<Vec<ApartmentSchema>>,
}

/// [`crate::dto::api::ApiResponse`] returned for failures; `data` is always `null`.
#[derive(ToSchema)]
#[schema(as = ErrorResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorResponseSchema {
    #[schema(example = 404)]
    code: u16,
    #[schema(example = "Apartment not found")]
    message: String,
    #[schema(value_type = Option<Object>)]
    data: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::forms::apartments::UploadImagesForm`].
#[derive(ToSchema)]
#[schema(as = UploadImages)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UploadImagesSchema {
    /// Between one and ten image files.
    #[schema(value_type = Vec<String>, format = Binary)]
    images: Vec<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use utoipa::PartialSchema;

    use super::*;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).unwrap()
    }

    #[test]
    fn apartment_schema_uses_camel_case() {
        let schema_json = schema_to_json::<ApartmentSchema>();
        assert_eq!(ApartmentSchema::name(), "Apartment");
        for field in ["unitName", "unitNumber", "createdAt", "updatedAt", "images"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
        assert!(!schema_json.contains("unit_name"));
    }

    #[test]
    fn envelope_schemas_have_code_message_data() {
        for schema_json in [
            schema_to_json::<ApartmentResponseSchema>(),
            schema_to_json::<ApartmentListResponseSchema>(),
            schema_to_json::<ErrorResponseSchema>(),
        ] {
            for field in ["code", "message", "data"] {
                assert!(schema_json.contains(field), "missing {field}");
            }
        }
    }
}
