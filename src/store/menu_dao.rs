//! Data access for menu rows.
//!
//! Every method is a single blocking statement against the store. Mutations
//! report a [`MutationOutcome`]; reads return rows. Nothing is cached.

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use super::error::{mutation_outcome, MutationOutcome, StoreError};
use super::models::{Menu, MenuPatch, MenuSearchRow};
use super::schema::{menu, restaurant};

/// Optional filters for the user-facing menu search. `None` means the field
/// places no constraint on the result.
#[derive(Debug, Default, Clone)]
pub struct MenuSearchFilter {
    pub restaurant_name: Option<String>,
    pub menu_name: Option<String>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
}

/// Thin DAO over the `menu` table.
#[derive(Debug, Default, Clone, Copy)]
pub struct MenuDao;

impl MenuDao {
    pub fn add(
        &self,
        conn: &mut SqliteConnection,
        record: &Menu,
    ) -> Result<MutationOutcome, StoreError> {
        mutation_outcome(diesel::insert_into(menu::table).values(record).execute(conn))
    }

    /// Partial update addressed by the composite key. The caller guarantees
    /// the patch is non-empty; Diesel rejects changesets with no columns.
    pub fn update(
        &self,
        conn: &mut SqliteConnection,
        res_id: i32,
        menu_id: i32,
        patch: &MenuPatch,
    ) -> Result<MutationOutcome, StoreError> {
        mutation_outcome(
            diesel::update(menu::table.find((res_id, menu_id)))
                .set(patch)
                .execute(conn),
        )
    }

    pub fn delete(
        &self,
        conn: &mut SqliteConnection,
        res_id: i32,
        menu_id: i32,
    ) -> Result<MutationOutcome, StoreError> {
        mutation_outcome(diesel::delete(menu::table.find((res_id, menu_id))).execute(conn))
    }

    /// User-facing search across all restaurants. Name filters match as
    /// case-sensitive substrings; price bounds are inclusive.
    pub fn search_by_users(
        &self,
        conn: &mut SqliteConnection,
        filter: &MenuSearchFilter,
    ) -> Result<Vec<MenuSearchRow>, StoreError> {
        let mut query = menu::table
            .inner_join(restaurant::table)
            .select((restaurant::res_name, menu::menu_name, menu::price))
            .order((restaurant::res_name.asc(), menu::menu_id.asc()))
            .into_boxed::<Sqlite>();

        if let Some(res_name) = &filter.restaurant_name {
            query = query.filter(restaurant::res_name.like(format!("%{res_name}%")));
        }
        if let Some(menu_name) = &filter.menu_name {
            query = query.filter(menu::menu_name.like(format!("%{menu_name}%")));
        }
        if let Some(min) = filter.min_price {
            query = query.filter(menu::price.ge(min));
        }
        if let Some(max) = filter.max_price {
            query = query.filter(menu::price.le(max));
        }

        Ok(query.load::<MenuSearchRow>(conn)?)
    }

    /// All menu rows for one restaurant, ordered by menu id. Backs the
    /// overview table and both per-restaurant search views.
    pub fn list_by_restaurant(
        &self,
        conn: &mut SqliteConnection,
        res_id: i32,
    ) -> Result<Vec<Menu>, StoreError> {
        Ok(menu::table
            .filter(menu::res_id.eq(res_id))
            .order(menu::menu_id.asc())
            .select(Menu::as_select())
            .load(conn)?)
    }

    pub fn get(
        &self,
        conn: &mut SqliteConnection,
        res_id: i32,
        menu_id: i32,
    ) -> Result<Option<Menu>, StoreError> {
        Ok(menu::table
            .find((res_id, menu_id))
            .select(Menu::as_select())
            .first(conn)
            .optional()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;

    fn seeded_db() -> Database {
        let mut db = Database::in_memory().expect("in-memory database");
        let dao = MenuDao;
        for (menu_id, name, price) in [(1, "Kimchi Stew", 6500), (2, "Bulgogi Bowl", 7800)] {
            let record = Menu {
                res_id: 1,
                menu_id,
                menu_name: name.to_string(),
                price,
            };
            assert_eq!(
                dao.add(db.conn(), &record).expect("insert"),
                MutationOutcome::Applied
            );
        }
        db
    }

    #[test]
    fn add_reports_applied_and_row_is_readable() {
        let mut db = seeded_db();
        let found = MenuDao.get(db.conn(), 1, 1).expect("get");
        assert_eq!(found.map(|m| m.menu_name), Some("Kimchi Stew".to_string()));
    }

    #[test]
    fn duplicate_composite_key_is_a_constraint_violation() {
        let mut db = seeded_db();
        let dup = Menu {
            res_id: 1,
            menu_id: 1,
            menu_name: "Shadow Stew".to_string(),
            price: 100,
        };
        assert_eq!(
            MenuDao.add(db.conn(), &dup).expect("insert"),
            MutationOutcome::ConstraintViolation
        );
    }

    #[test]
    fn partial_update_leaves_unset_fields_alone() {
        let mut db = seeded_db();
        let patch = MenuPatch {
            menu_name: None,
            price: Some(9000),
        };
        assert_eq!(
            MenuDao.update(db.conn(), 1, 1, &patch).expect("update"),
            MutationOutcome::Applied
        );
        let row = MenuDao.get(db.conn(), 1, 1).expect("get").expect("row");
        assert_eq!(row.menu_name, "Kimchi Stew");
        assert_eq!(row.price, 9000);
    }

    #[test]
    fn zero_is_a_storable_price() {
        let mut db = seeded_db();
        let patch = MenuPatch {
            menu_name: None,
            price: Some(0),
        };
        MenuDao.update(db.conn(), 1, 2, &patch).expect("update");
        let row = MenuDao.get(db.conn(), 1, 2).expect("get").expect("row");
        assert_eq!(row.price, 0);
    }

    #[test]
    fn update_of_missing_key_reports_not_found() {
        let mut db = seeded_db();
        let patch = MenuPatch {
            menu_name: Some("Ghost".to_string()),
            price: None,
        };
        assert_eq!(
            MenuDao.update(db.conn(), 9, 9, &patch).expect("update"),
            MutationOutcome::NotFound
        );
    }

    #[test]
    fn delete_removes_exactly_the_addressed_row() {
        let mut db = seeded_db();
        assert_eq!(
            MenuDao.delete(db.conn(), 1, 1).expect("delete"),
            MutationOutcome::Applied
        );
        assert!(MenuDao.get(db.conn(), 1, 1).expect("get").is_none());
        assert!(MenuDao.get(db.conn(), 1, 2).expect("get").is_some());
    }

    #[test]
    fn blank_search_returns_every_row() {
        let mut db = seeded_db();
        let rows = MenuDao
            .search_by_users(db.conn(), &MenuSearchFilter::default())
            .expect("search");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn search_filters_combine() {
        let mut db = seeded_db();
        let filter = MenuSearchFilter {
            restaurant_name: Some("Union".to_string()),
            menu_name: Some("Bulgogi".to_string()),
            min_price: Some(7000),
            max_price: Some(8000),
        };
        let rows = MenuDao.search_by_users(db.conn(), &filter).expect("search");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].menu_name, "Bulgogi Bowl");
        assert_eq!(rows[0].res_name, "Student Union Cafeteria");
        assert_eq!(rows[0].price, 7800);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let mut db = seeded_db();
        let filter = MenuSearchFilter {
            min_price: Some(6500),
            max_price: Some(6500),
            ..MenuSearchFilter::default()
        };
        let rows = MenuDao.search_by_users(db.conn(), &filter).expect("search");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].menu_name, "Kimchi Stew");
    }

    #[test]
    fn list_by_restaurant_is_ordered_and_scoped() {
        let mut db = seeded_db();
        let other = Menu {
            res_id: 2,
            menu_id: 1,
            menu_name: "Toast".to_string(),
            price: 3000,
        };
        MenuDao.add(db.conn(), &other).expect("insert");
        let rows = MenuDao.list_by_restaurant(db.conn(), 1).expect("list");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].menu_id, 1);
        assert_eq!(rows[1].menu_id, 2);
    }
}
