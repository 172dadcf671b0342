//! Apartment domain service.
//!
//! Every function returns raw domain values; `None` signals that the
//! requested apartment does not exist. Shaping responses is left to the
//! routes.

use crate::domain::apartment::{Apartment, NewApartment, UpdateApartment};
use crate::domain::types::ApartmentId;
use crate::repository::{ApartmentListQuery, ApartmentReader, ApartmentWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::storage::{ImageStorage, UploadedImage};

/// Persists a new apartment and returns it with its id and timestamps.
pub fn create_apartment<R>(repo: &R, new_apartment: &NewApartment) -> ServiceResult<Apartment>
where
    R: ApartmentWriter + ?Sized,
{
    repo.create_apartment(new_apartment)
        .map_err(ServiceError::from)
}

/// Lists apartments, optionally filtered by a case-insensitive substring of
/// unit name, unit number or project.
///
/// An absent term lists everything. An empty term is passed through as-is.
pub fn list_apartments<R>(repo: &R, search: Option<String>) -> ServiceResult<Vec<Apartment>>
where
    R: ApartmentReader + ?Sized,
{
    let query = match search {
        Some(term) => ApartmentListQuery::new().search(term),
        None => ApartmentListQuery::new(),
    };

    repo.list_apartments(query).map_err(ServiceError::from)
}

/// Fetches a single apartment.
pub fn get_apartment<R>(repo: &R, id: ApartmentId) -> ServiceResult<Option<Apartment>>
where
    R: ApartmentReader + ?Sized,
{
    repo.get_apartment_by_id(id).map_err(ServiceError::from)
}

/// Applies a shallow partial update.
pub fn update_apartment<R>(
    repo: &R,
    id: ApartmentId,
    updates: &UpdateApartment,
) -> ServiceResult<Option<Apartment>>
where
    R: ApartmentWriter + ?Sized,
{
    repo.update_apartment(id, updates)
        .map_err(ServiceError::from)
}

/// Deletes an apartment, returning its last state.
///
/// Image files are left on disk.
pub fn delete_apartment<R>(repo: &R, id: ApartmentId) -> ServiceResult<Option<Apartment>>
where
    R: ApartmentWriter + ?Sized,
{
    repo.delete_apartment(id).map_err(ServiceError::from)
}

/// Stores the uploaded files and appends their public paths to the
/// apartment's image list.
///
/// Nothing is stored for an unknown apartment. If any file fails to store,
/// the files already stored by this call are discarded and the record is left
/// untouched.
pub fn add_images<R, S>(
    repo: &R,
    storage: &S,
    id: ApartmentId,
    uploads: &[UploadedImage],
) -> ServiceResult<Option<Apartment>>
where
    R: ApartmentReader + ApartmentWriter + ?Sized,
    S: ImageStorage + ?Sized,
{
    let Some(apartment) = repo.get_apartment_by_id(id)? else {
        return Ok(None);
    };

    let mut stored = Vec::with_capacity(uploads.len());
    for upload in uploads {
        match storage.store(upload) {
            Ok(public_path) => stored.push(public_path),
            Err(err) => {
                log::error!("Failed to store image for apartment {id}: {err}");
                discard_all(storage, &stored);
                return Err(err.into());
            }
        }
    }

    let updates = UpdateApartment::images(apartment.images_with(&stored));
    let updated = match repo.update_apartment(id, &updates) {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            discard_all(storage, &stored);
            return Ok(None);
        }
        Err(err) => {
            discard_all(storage, &stored);
            return Err(err.into());
        }
    };

    log::info!("Added {} image(s) to apartment {id}", stored.len());
    Ok(Some(updated))
}

/// Removes the first occurrence of `image` from the apartment's image list
/// and schedules the file for deletion.
///
/// An image that is not in the list leaves the list unchanged and the
/// apartment is still returned. The file cleanup is best-effort and never
/// affects the result.
pub fn remove_image<R, S>(
    repo: &R,
    storage: &S,
    id: ApartmentId,
    image: &str,
) -> ServiceResult<Option<Apartment>>
where
    R: ApartmentReader + ApartmentWriter + ?Sized,
    S: ImageStorage + ?Sized,
{
    let Some(apartment) = repo.get_apartment_by_id(id)? else {
        return Ok(None);
    };

    let (images, removed) = apartment.images_without(image);

    // Last write wins if two removals race on the same apartment.
    let Some(updated) = repo.update_apartment(id, &UpdateApartment::images(images))? else {
        return Ok(None);
    };

    if removed {
        storage.discard(image);
    } else {
        log::debug!("Image {image} is not attached to apartment {id}");
    }

    Ok(Some(updated))
}

fn discard_all<S>(storage: &S, public_paths: &[String])
where
    S: ImageStorage + ?Sized,
{
    for path in public_paths {
        storage.discard(path);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;
    use std::path::PathBuf;

    use chrono::Utc;
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::repository::mock::MockRepository;

    /// In-memory record store.
    #[derive(Default)]
    struct MemoryRepo {
        stored: RefCell<Vec<Apartment>>,
    }

    impl ApartmentReader for MemoryRepo {
        fn get_apartment_by_id(&self, id: ApartmentId) -> RepositoryResult<Option<Apartment>> {
            Ok(self.stored.borrow().iter().find(|a| a.id == id).cloned())
        }

        fn list_apartments(&self, query: ApartmentListQuery) -> RepositoryResult<Vec<Apartment>> {
            let items = self.stored.borrow().clone();
            Ok(match query.search {
                Some(term) => {
                    let term = term.to_lowercase();
                    items
                        .into_iter()
                        .filter(|a| {
                            [&a.unit_name, &a.unit_number, &a.project]
                                .iter()
                                .any(|field| field.to_lowercase().contains(&term))
                        })
                        .collect()
                }
                None => items,
            })
        }
    }

    impl ApartmentWriter for MemoryRepo {
        fn create_apartment(&self, new: &NewApartment) -> RepositoryResult<Apartment> {
            let now = Utc::now();
            let apartment = Apartment {
                id: ApartmentId::new(),
                unit_name: new.unit_name.clone(),
                unit_number: new.unit_number.clone(),
                project: new.project.clone(),
                address: new.address.clone(),
                bedrooms: new.bedrooms,
                bathrooms: new.bathrooms,
                price: new.price,
                description: new.description.clone(),
                images: new.images.clone(),
                created_at: now,
                updated_at: now,
            };
            self.stored.borrow_mut().push(apartment.clone());
            Ok(apartment)
        }

        fn update_apartment(
            &self,
            id: ApartmentId,
            updates: &UpdateApartment,
        ) -> RepositoryResult<Option<Apartment>> {
            let mut stored = self.stored.borrow_mut();
            let Some(apartment) = stored.iter_mut().find(|a| a.id == id) else {
                return Ok(None);
            };
            if let Some(price) = updates.price {
                apartment.price = price;
            }
            if let Some(images) = &updates.images {
                apartment.images = images.clone();
            }
            apartment.updated_at = Utc::now();
            Ok(Some(apartment.clone()))
        }

        fn delete_apartment(&self, id: ApartmentId) -> RepositoryResult<Option<Apartment>> {
            let mut stored = self.stored.borrow_mut();
            let index = stored.iter().position(|a| a.id == id);
            Ok(index.map(|i| stored.remove(i)))
        }
    }

    /// Storage that hands out sequential paths and records discards.
    #[derive(Default)]
    struct RecordingStorage {
        fail_on: Option<usize>,
        stored: RefCell<usize>,
        discarded: RefCell<Vec<String>>,
    }

    impl ImageStorage for RecordingStorage {
        fn store(&self, _upload: &UploadedImage) -> io::Result<String> {
            let mut count = self.stored.borrow_mut();
            if self.fail_on == Some(*count) {
                return Err(io::Error::other("disk full"));
            }
            *count += 1;
            Ok(format!("/uploads/apartments/{count}.png"))
        }

        fn discard(&self, public_path: &str) {
            self.discarded.borrow_mut().push(public_path.to_string());
        }
    }

    fn sample_new(unit_name: &str, unit_number: &str, project: &str) -> NewApartment {
        NewApartment {
            unit_name: unit_name.to_string(),
            unit_number: unit_number.to_string(),
            project: project.to_string(),
            address: "123 Main St".to_string(),
            bedrooms: 2,
            bathrooms: 1,
            price: 1000.0,
            description: "Nice apartment".to_string(),
            images: Vec::new(),
        }
    }

    fn uploads(count: usize) -> Vec<UploadedImage> {
        (0..count)
            .map(|i| UploadedImage {
                original_name: Some(format!("{i}.png")),
                path: PathBuf::from(format!("/tmp/{i}")),
            })
            .collect()
    }

    #[test]
    fn created_apartment_can_be_found() {
        let repo = MemoryRepo::default();
        let created = create_apartment(&repo, &sample_new("A", "101", "ProjectX")).unwrap();

        let found = get_apartment(&repo, created.id).unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.unit_name, "A");
        assert!(found.images.is_empty());
    }

    #[test]
    fn list_without_search_returns_everything() {
        let repo = MemoryRepo::default();
        create_apartment(&repo, &sample_new("A", "101", "ProjectX")).unwrap();
        create_apartment(&repo, &sample_new("B", "202", "Other")).unwrap();

        assert_eq!(list_apartments(&repo, None).unwrap().len(), 2);
        assert_eq!(list_apartments(&repo, Some(String::new())).unwrap().len(), 2);
        assert_eq!(
            list_apartments(&repo, Some("projectx".to_string()))
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn list_forwards_absent_and_empty_search_distinctly() {
        let mut repo = MockRepository::new();
        repo.expect_list_apartments()
            .with(eq(ApartmentListQuery::new()))
            .times(1)
            .returning(|_| Ok(Vec::new()));
        repo.expect_list_apartments()
            .with(eq(ApartmentListQuery::new().search("")))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        list_apartments(&repo, None).unwrap();
        list_apartments(&repo, Some(String::new())).unwrap();
    }

    #[test]
    fn update_changes_only_given_fields() {
        let repo = MemoryRepo::default();
        let created = create_apartment(&repo, &sample_new("A", "101", "ProjectX")).unwrap();

        let updates = UpdateApartment {
            price: Some(1200.0),
            ..UpdateApartment::default()
        };
        let updated = update_apartment(&repo, created.id, &updates)
            .unwrap()
            .unwrap();

        assert_eq!(updated.price, 1200.0);
        assert_eq!(updated.unit_name, created.unit_name);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn update_unknown_apartment_returns_none() {
        let repo = MemoryRepo::default();
        let result = update_apartment(&repo, ApartmentId::new(), &UpdateApartment::default());
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn delete_then_get_returns_none() {
        let repo = MemoryRepo::default();
        let created = create_apartment(&repo, &sample_new("A", "101", "ProjectX")).unwrap();

        let deleted = delete_apartment(&repo, created.id).unwrap().unwrap();
        assert_eq!(deleted.id, created.id);
        assert!(get_apartment(&repo, created.id).unwrap().is_none());
        assert!(delete_apartment(&repo, created.id).unwrap().is_none());
    }

    #[test]
    fn add_images_appends_in_upload_order() {
        let repo = MemoryRepo::default();
        let mut new = sample_new("A", "101", "ProjectX");
        new.images = vec!["/uploads/apartments/existing.png".to_string()];
        let created = create_apartment(&repo, &new).unwrap();
        let storage = RecordingStorage::default();

        let updated = add_images(&repo, &storage, created.id, &uploads(2))
            .unwrap()
            .unwrap();

        assert_eq!(
            updated.images,
            vec![
                "/uploads/apartments/existing.png",
                "/uploads/apartments/1.png",
                "/uploads/apartments/2.png",
            ]
        );
        assert!(storage.discarded.borrow().is_empty());
    }

    #[test]
    fn add_images_to_unknown_apartment_stores_nothing() {
        let repo = MemoryRepo::default();
        let storage = RecordingStorage::default();

        let result = add_images(&repo, &storage, ApartmentId::new(), &uploads(3)).unwrap();

        assert!(result.is_none());
        assert_eq!(*storage.stored.borrow(), 0);
    }

    #[test]
    fn add_images_rolls_back_stored_files_on_failure() {
        let repo = MemoryRepo::default();
        let created = create_apartment(&repo, &sample_new("A", "101", "ProjectX")).unwrap();
        let storage = RecordingStorage {
            fail_on: Some(2),
            ..RecordingStorage::default()
        };

        let result = add_images(&repo, &storage, created.id, &uploads(3));

        assert!(matches!(result, Err(ServiceError::Storage(_))));
        assert_eq!(
            *storage.discarded.borrow(),
            vec!["/uploads/apartments/1.png", "/uploads/apartments/2.png"]
        );
        let unchanged = get_apartment(&repo, created.id).unwrap().unwrap();
        assert!(unchanged.images.is_empty());
    }

    #[test]
    fn remove_image_drops_one_occurrence_and_discards_file() {
        let repo = MemoryRepo::default();
        let mut new = sample_new("A", "101", "ProjectX");
        new.images = ["/a.png", "/b.png", "/a.png"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let created = create_apartment(&repo, &new).unwrap();
        let storage = RecordingStorage::default();

        let updated = remove_image(&repo, &storage, created.id, "/a.png")
            .unwrap()
            .unwrap();

        assert_eq!(updated.images, vec!["/b.png", "/a.png"]);
        assert_eq!(*storage.discarded.borrow(), vec!["/a.png"]);
    }

    #[test]
    fn remove_unknown_image_is_a_noop_that_returns_the_record() {
        let repo = MemoryRepo::default();
        let mut new = sample_new("A", "101", "ProjectX");
        new.images = vec!["/a.png".to_string()];
        let created = create_apartment(&repo, &new).unwrap();
        let storage = RecordingStorage::default();

        let updated = remove_image(&repo, &storage, created.id, "/missing.png")
            .unwrap()
            .unwrap();

        assert_eq!(updated.images, vec!["/a.png"]);
        assert!(storage.discarded.borrow().is_empty());
    }

    #[test]
    fn remove_image_from_unknown_apartment_returns_none() {
        let mut repo = MockRepository::new();
        repo.expect_get_apartment_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_update_apartment().never();
        let storage = RecordingStorage::default();

        let result = remove_image(&repo, &storage, ApartmentId::new(), "/a.png").unwrap();

        assert!(result.is_none());
        assert!(storage.discarded.borrow().is_empty());
    }

    #[test]
    fn store_failures_propagate_unchanged() {
        let mut repo = MockRepository::new();
        repo.expect_create_apartment()
            .returning(|_| Err(RepositoryError::ConnectionError("pool closed".to_string())));

        let err = create_apartment(&repo, &sample_new("A", "101", "ProjectX")).unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::ConnectionError(_))
        ));
    }
}
