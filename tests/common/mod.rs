//! Shared helpers for integration tests.
#![allow(dead_code)]

use apartments_api::db::{DbPool, establish_connection_pool, run_migrations};
use apartments_api::domain::apartment::NewApartment;
use tempfile::TempDir;

/// SQLite database living in a temporary directory, migrated on creation and
/// removed together with the directory on drop.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(filename);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 temp path"))
            .expect("establish connection pool");
        run_migrations(&pool).expect("run migrations");
        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

pub fn new_apartment(unit_name: &str, unit_number: &str, project: &str) -> NewApartment {
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
