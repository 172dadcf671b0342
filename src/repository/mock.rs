//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::apartment::{Apartment, NewApartment, UpdateApartment};
use crate::domain::types::ApartmentId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApartmentListQuery, ApartmentReader, ApartmentWriter};

mock! {
    pub Repository {}

    impl ApartmentReader for Repository {
        fn get_apartment_by_id(&self, id: ApartmentId) -> RepositoryResult<Option<Apartment>>;
        fn list_apartments(&self, query: ApartmentListQuery) -> RepositoryResult<Vec<Apartment>>;
    }

    impl ApartmentWriter for Repository {
        fn create_apartment(&self, new_apartment: &NewApartment) -> RepositoryResult<Apartment>;
        fn update_apartment(
            &self,
            id: ApartmentId,
            updates: &UpdateApartment,
        ) -> RepositoryResult<Option<Apartment>>;
        fn delete_apartment(&self, id: ApartmentId) -> RepositoryResult<Option<Apartment>>;
    }
}
