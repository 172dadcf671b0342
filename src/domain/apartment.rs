use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::ApartmentId;

/// Apartment listing as exposed to API consumers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Apartment {
    pub id: ApartmentId,
    pub unit_name: String,
    pub unit_number: String,
    pub project: String,
    pub address: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub price: f64,
    pub description: String,
    /// Public paths of the uploaded images, in upload order.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Apartment {
    /// Returns the image list with the first occurrence of `image` removed.
    ///
    /// The second element tells whether anything was removed.
    pub fn images_without(&self, image: &str) -> (Vec<String>, bool) {
        let mut images = self.images.clone();
        match images.iter().position(|existing| existing == image) {
            Some(index) => {
                images.remove(index);
                (images, true)
            }
            None => (images, false),
        }
    }

    /// Returns the image list with `uploaded` appended after the existing entries.
    pub fn images_with(&self, uploaded: &[String]) -> Vec<String> {
        self.images.iter().chain(uploaded).cloned().collect()
    }
}

/// Data required to create an apartment. Identifier and timestamps are
/// assigned by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct NewApartment {
    pub unit_name: String,
    pub unit_number: String,
    pub project: String,
    pub address: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
}

/// Partial update of an apartment. Only the fields that are `Some` change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateApartment {
    pub unit_name: Option<String>,
    pub unit_number: Option<String>,
    pub project: Option<String>,
    pub address: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
}

impl UpdateApartment {
    /// Update that only replaces the image list.
    pub fn images(images: Vec<String>) -> Self {
        Self {
            images: Some(images),
            ..Self::default()
        }
    }
}
