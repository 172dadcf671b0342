//! Record store abstraction for apartments and its Diesel implementation.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::apartment::{Apartment, NewApartment, UpdateApartment};
use crate::domain::types::ApartmentId;
use crate::repository::errors::RepositoryResult;

pub mod apartment;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Filter applied when listing apartments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApartmentListQuery {
    /// Substring matched against unit name, unit number and project.
    ///
    /// `None` lists everything. `Some("")` is kept as a literal empty
    /// substring, which matches every record.
    pub search: Option<String>,
}

impl ApartmentListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

pub trait ApartmentReader {
    fn get_apartment_by_id(&self, id: ApartmentId) -> RepositoryResult<Option<Apartment>>;
    fn list_apartments(&self, query: ApartmentListQuery) -> RepositoryResult<Vec<Apartment>>;
}

pub trait ApartmentWriter {
    fn create_apartment(&self, new_apartment: &NewApartment) -> RepositoryResult<Apartment>;
    /// Returns `None` when no apartment has the given id.
    fn update_apartment(
        &self,
        id: ApartmentId,
        updates: &UpdateApartment,
    ) -> RepositoryResult<Option<Apartment>>;
    /// Returns the deleted apartment, or `None` when it did not exist.
    fn delete_apartment(&self, id: ApartmentId) -> RepositoryResult<Option<Apartment>>;
}

/// Diesel-backed record store shared by every request handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
