use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::apartment::{
    Apartment as DomainApartment, NewApartment as DomainNewApartment,
    UpdateApartment as DomainUpdateApartment,
};
use crate::domain::types::{ApartmentId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::apartments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::apartment::Apartment`].
pub struct Apartment {
    pub id: String,
    pub unit_name: String,
    pub unit_number: String,
    pub project: String,
    pub address: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub price: f64,
    pub description: String,
    /// JSON encoded array of image paths.
    pub images: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::apartments)]
/// Insertable form of [`Apartment`].
pub struct NewApartment<'a> {
    pub id: String,
    pub unit_name: &'a str,
    pub unit_number: &'a str,
    pub project: &'a str,
    pub address: &'a str,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub price: f64,
    pub description: &'a str,
    pub images: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::apartments)]
/// Data used when updating an [`Apartment`] record. `None` leaves the column untouched.
pub struct UpdateApartment<'a> {
    pub unit_name: Option<&'a str>,
    pub unit_number: Option<&'a str>,
    pub project: Option<&'a str>,
    pub address: Option<&'a str>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub price: Option<f64>,
    pub description: Option<&'a str>,
    pub images: Option<String>,
    pub updated_at: NaiveDateTime,
}

fn encode_images(images: &[String]) -> String {
    // A list of strings always serializes.
    serde_json::to_string(images).unwrap_or_else(|_| "[]".to_string())
}

fn decode_images(raw: &str) -> Result<Vec<String>, TypeConstraintError> {
    serde_json::from_str(raw)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("images column: {e}")))
}

impl TryFrom<Apartment> for DomainApartment {
    type Error = TypeConstraintError;

    fn try_from(apartment: Apartment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: apartment.id.parse::<ApartmentId>()?,
            images: decode_images(&apartment.images)?,
            unit_name: apartment.unit_name,
            unit_number: apartment.unit_number,
            project: apartment.project,
            address: apartment.address,
            bedrooms: apartment.bedrooms,
            bathrooms: apartment.bathrooms,
            price: apartment.price,
            description: apartment.description,
            created_at: apartment.created_at.and_utc(),
            updated_at: apartment.updated_at.and_utc(),
        })
    }
}

impl<'a> NewApartment<'a> {
    /// Builds the insertable row, stamping the identifier and both timestamps.
    pub fn from_domain(
        apartment: &'a DomainNewApartment,
        id: ApartmentId,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.to_string(),
            unit_name: apartment.unit_name.as_str(),
            unit_number: apartment.unit_number.as_str(),
            project: apartment.project.as_str(),
            address: apartment.address.as_str(),
            bedrooms: apartment.bedrooms,
            bathrooms: apartment.bathrooms,
            price: apartment.price,
            description: apartment.description.as_str(),
            images: encode_images(&apartment.images),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateApartment<'a> {
    /// Builds the changeset, always refreshing `updated_at`.
    pub fn from_domain(updates: &'a DomainUpdateApartment, now: NaiveDateTime) -> Self {
        Self {
            unit_name: updates.unit_name.as_deref(),
            unit_number: updates.unit_number.as_deref(),
            project: updates.project.as_deref(),
            address: updates.address.as_deref(),
            bedrooms: updates.bedrooms,
            bathrooms: updates.bathrooms,
            price: updates.price,
            description: updates.description.as_deref(),
            images: updates.images.as_deref().map(encode_images),
            updated_at: now,
        }
    }
}
