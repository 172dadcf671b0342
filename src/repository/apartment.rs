//! Repository implementation for apartments.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    db::unicode_lower,
    domain::{
        apartment::{Apartment, NewApartment, UpdateApartment},
        types::ApartmentId,
    },
    models::apartment::{
        Apartment as DbApartment, NewApartment as DbNewApartment,
        UpdateApartment as DbUpdateApartment,
    },
    repository::{
        ApartmentListQuery, ApartmentReader, ApartmentWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

const LIKE_ESCAPE: char = '\\';

/// Builds a `LIKE` pattern matching `term` literally anywhere in the column.
///
/// The term is lowercased here and the columns through [`unicode_lower`], so
/// the match ignores case beyond ASCII.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn into_domain(apartment: DbApartment) -> RepositoryResult<Apartment> {
    Apartment::try_from(apartment).map_err(RepositoryError::from)
}

impl ApartmentReader for DieselRepository {
    fn get_apartment_by_id(&self, id: ApartmentId) -> RepositoryResult<Option<Apartment>> {
        use crate::schema::apartments;

        let mut conn = self.conn()?;
        apartments::table
            .find(id.to_string())
            .select(DbApartment::as_select())
            .first(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn list_apartments(&self, query: ApartmentListQuery) -> RepositoryResult<Vec<Apartment>> {
        use crate::schema::apartments;

        let mut conn = self.conn()?;
        let mut items = apartments::table
            .select(DbApartment::as_select())
            .order(apartments::created_at.asc())
            .into_boxed();

        if let Some(term) = &query.search {
            let pattern = contains_pattern(term);
            items = items.filter(
                unicode_lower(apartments::unit_name)
                    .like(pattern.clone())
                    .escape(LIKE_ESCAPE)
                    .or(unicode_lower(apartments::unit_number)
                        .like(pattern.clone())
                        .escape(LIKE_ESCAPE))
                    .or(unicode_lower(apartments::project)
                        .like(pattern)
                        .escape(LIKE_ESCAPE)),
            );
        }

        items
            .load::<DbApartment>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect()
    }
}

impl ApartmentWriter for DieselRepository {
    fn create_apartment(&self, new_apartment: &NewApartment) -> RepositoryResult<Apartment> {
        use crate::schema::apartments;

        let mut conn = self.conn()?;
        let insertable =
            DbNewApartment::from_domain(new_apartment, ApartmentId::new(), Utc::now().naive_utc());

        let created = diesel::insert_into(apartments::table)
            .values(&insertable)
            .get_result::<DbApartment>(&mut conn)?;

        into_domain(created)
    }

    fn update_apartment(
        &self,
        id: ApartmentId,
        updates: &UpdateApartment,
    ) -> RepositoryResult<Option<Apartment>> {
        use crate::schema::apartments;

        let mut conn = self.conn()?;
        let changes = DbUpdateApartment::from_domain(updates, Utc::now().naive_utc());

        diesel::update(apartments::table.find(id.to_string()))
            .set(&changes)
            .get_result::<DbApartment>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn delete_apartment(&self, id: ApartmentId) -> RepositoryResult<Option<Apartment>> {
        use crate::schema::apartments;

        let mut conn = self.conn()?;

        diesel::delete(apartments::table.find(id.to_string()))
            .get_result::<DbApartment>(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn pattern_wraps_term() {
        assert_eq!(contains_pattern("ProjectX"), "%projectx%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn pattern_lowercases_non_ascii() {
        assert_eq!(contains_pattern("ÉLYSÉE"), "%élysée%");
        assert_eq!(contains_pattern("Ägypten"), "%ägypten%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
