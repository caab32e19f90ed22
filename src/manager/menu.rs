//! Menu record workflows: add, partial update, delete and the search views.

use crate::store::{
    Database, Menu, MenuDao, MenuPatch, MenuSearchFilter, MenuSearchRow, MutationOutcome,
    StoreError,
};

/// Orchestrates menu CRUD and search against the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct MenuManager {
    dao: MenuDao,
}

impl MenuManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_menu(&self, db: &mut Database, record: &Menu) -> Result<MutationOutcome, StoreError> {
        self.dao.add(db.conn(), record)
    }

    /// Partial update: fields left `None` in the patch keep their stored
    /// values. An all-blank patch never reaches the store and counts as
    /// applied.
    pub fn update_menu(
        &self,
        db: &mut Database,
        res_id: i32,
        menu_id: i32,
        patch: &MenuPatch,
    ) -> Result<MutationOutcome, StoreError> {
        if patch.is_empty() {
            return Ok(MutationOutcome::Applied);
        }
        self.dao.update(db.conn(), res_id, menu_id, patch)
    }

    pub fn delete_menu(
        &self,
        db: &mut Database,
        res_id: i32,
        menu_id: i32,
    ) -> Result<MutationOutcome, StoreError> {
        self.dao.delete(db.conn(), res_id, menu_id)
    }

    /// User-facing search across all restaurants; every filter optional.
    pub fn search_by_users(
        &self,
        db: &mut Database,
        filter: &MenuSearchFilter,
    ) -> Result<Vec<MenuSearchRow>, StoreError> {
        self.dao.search_by_users(db.conn(), filter)
    }

    /// One restaurant's menus, as shown to ordering users.
    pub fn search_by_restaurant(
        &self,
        db: &mut Database,
        res_id: i32,
    ) -> Result<Vec<Menu>, StoreError> {
        self.dao.list_by_restaurant(db.conn(), res_id)
    }

    /// One restaurant's menus, manager view. Same rows as
    /// [`Self::search_by_restaurant`]; the UI additionally renders the
    /// restaurant id column.
    pub fn search_by_manager(
        &self,
        db: &mut Database,
        res_id: i32,
    ) -> Result<Vec<Menu>, StoreError> {
        self.dao.list_by_restaurant(db.conn(), res_id)
    }

    /// Rows for the fixed-width id/name overview printed before update and
    /// delete so the operator can pick a valid menu id.
    pub fn menu_overview(&self, db: &mut Database, res_id: i32) -> Result<Vec<Menu>, StoreError> {
        self.dao.list_by_restaurant(db.conn(), res_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_with_menu() -> (Database, MenuManager) {
        let mut db = Database::in_memory().expect("in-memory database");
        let manager = MenuManager::new();
        let record = Menu {
            res_id: 3,
            menu_id: 10,
            menu_name: "Bibimbap".to_string(),
            price: 8000,
        };
        assert!(manager
            .add_menu(&mut db, &record)
            .expect("insert")
            .is_applied());
        (db, manager)
    }

    #[test]
    fn empty_patch_is_a_noop_success() {
        let (mut db, manager) = db_with_menu();
        let outcome = manager
            .update_menu(&mut db, 3, 10, &MenuPatch::default())
            .expect("update");
        assert_eq!(outcome, MutationOutcome::Applied);

        let rows = manager.search_by_restaurant(&mut db, 3).expect("search");
        assert_eq!(rows[0].menu_name, "Bibimbap");
        assert_eq!(rows[0].price, 8000);
    }

    // The lifecycle from the acceptance notes: add, search, reprice with the
    // name left blank, then delete.
    #[test]
    fn add_update_delete_lifecycle() {
        let (mut db, manager) = db_with_menu();

        let rows = manager.search_by_restaurant(&mut db, 3).expect("search");
        assert!(rows
            .iter()
            .any(|m| m.menu_name == "Bibimbap" && m.price == 8000));

        let patch = MenuPatch {
            menu_name: None,
            price: Some(9000),
        };
        assert!(manager
            .update_menu(&mut db, 3, 10, &patch)
            .expect("update")
            .is_applied());
        let rows = manager.search_by_restaurant(&mut db, 3).expect("search");
        assert!(rows
            .iter()
            .any(|m| m.menu_name == "Bibimbap" && m.price == 9000));

        assert!(manager
            .delete_menu(&mut db, 3, 10)
            .expect("delete")
            .is_applied());
        let rows = manager.search_by_restaurant(&mut db, 3).expect("search");
        assert!(rows.iter().all(|m| m.menu_id != 10));
    }

    #[test]
    fn overview_and_manager_view_see_the_same_rows() {
        let (mut db, manager) = db_with_menu();
        let overview = manager.menu_overview(&mut db, 3).expect("overview");
        let managed = manager.search_by_manager(&mut db, 3).expect("search");
        assert_eq!(overview, managed);
        assert_eq!(managed[0].res_id, 3);
    }
}
