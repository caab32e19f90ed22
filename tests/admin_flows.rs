// End-to-end flows through the public library surface, against a real
// SQLite database (in-memory, plus one on-disk persistence check).

use campus_eats_cli::manager::{MenuManager, UserManager};
use campus_eats_cli::session::Session;
use campus_eats_cli::store::{
    Database, Menu, MenuPatch, MenuSearchFilter, MutationOutcome, UserPatch, UserRecord,
};

fn menu(res_id: i32, menu_id: i32, name: &str, price: i32) -> Menu {
    Menu {
        res_id,
        menu_id,
        menu_name: name.to_string(),
        price,
    }
}

fn user(id: &str, pw: &str, name: &str) -> UserRecord {
    UserRecord {
        user_id: id.to_string(),
        user_pw: pw.to_string(),
        name: name.to_string(),
        student_id: 20240001,
        email: format!("{id}@campus.test"),
        location: "Main Campus".to_string(),
    }
}

// Add a menu, find it, reprice it with the name left blank, delete it, and
// confirm it is gone.
#[test]
fn menu_lifecycle_end_to_end() {
    let mut db = Database::in_memory().expect("open database");
    let menus = MenuManager::new();

    assert_eq!(
        menus
            .add_menu(&mut db, &menu(3, 10, "Bibimbap", 8000))
            .expect("add"),
        MutationOutcome::Applied
    );

    let rows = menus.search_by_restaurant(&mut db, 3).expect("search");
    assert!(rows
        .iter()
        .any(|m| m.menu_name == "Bibimbap" && m.price == 8000));

    let patch = MenuPatch {
        menu_name: None,
        price: Some(9000),
    };
    assert_eq!(
        menus.update_menu(&mut db, 3, 10, &patch).expect("update"),
        MutationOutcome::Applied
    );
    let rows = menus.search_by_restaurant(&mut db, 3).expect("search");
    assert!(rows
        .iter()
        .any(|m| m.menu_name == "Bibimbap" && m.price == 9000));

    assert_eq!(
        menus.delete_menu(&mut db, 3, 10).expect("delete"),
        MutationOutcome::Applied
    );
    let rows = menus.search_by_restaurant(&mut db, 3).expect("search");
    assert!(rows.iter().all(|m| m.menu_id != 10));
}

#[test]
fn cross_restaurant_search_joins_restaurant_names() {
    let mut db = Database::in_memory().expect("open database");
    let menus = MenuManager::new();

    menus
        .add_menu(&mut db, &menu(1, 1, "Kimchi Stew", 6500))
        .expect("add");
    menus
        .add_menu(&mut db, &menu(3, 1, "Bibimbap", 8000))
        .expect("add");

    let all = menus
        .search_by_users(&mut db, &MenuSearchFilter::default())
        .expect("search");
    assert_eq!(all.len(), 2);

    let filter = MenuSearchFilter {
        restaurant_name: Some("Dormitory".to_string()),
        ..MenuSearchFilter::default()
    };
    let dorm = menus.search_by_users(&mut db, &filter).expect("search");
    assert_eq!(dorm.len(), 1);
    assert_eq!(dorm[0].res_name, "Dormitory Dining Center");
    assert_eq!(dorm[0].menu_name, "Bibimbap");
}

#[test]
fn account_session_round_trip() {
    let mut db = Database::in_memory().expect("open database");
    let users = UserManager::new();
    let mut session = Session::new();

    assert_eq!(
        users
            .add_user(&mut db, &user("mina", "swordfish", "Mina Park"))
            .expect("add"),
        MutationOutcome::Applied
    );

    assert!(!users
        .login(&mut db, &mut session, "mina", "wrong")
        .expect("login"));
    assert!(!session.is_signed_in());

    assert!(users
        .login(&mut db, &mut session, "mina", "swordfish")
        .expect("login"));
    assert_eq!(session.current().map(|u| u.user_id.as_str()), Some("mina"));

    let patch = UserPatch {
        location: Some("East Dorm".to_string()),
        ..UserPatch::default()
    };
    assert_eq!(
        users
            .update_self(&mut db, &mut session, &patch)
            .expect("update"),
        MutationOutcome::Applied
    );
    let info = users
        .my_info(&mut db, &session)
        .expect("query")
        .expect("record");
    assert_eq!(info.location, "East Dorm");
    assert_eq!(info.name, "Mina Park");

    users.logout(&mut session);
    assert!(!session.is_signed_in());
}

#[test]
fn deleting_an_account_ends_the_session() {
    let mut db = Database::in_memory().expect("open database");
    let users = UserManager::new();
    let mut session = Session::new();

    users
        .add_user(&mut db, &user("jae", "pw123", "Jae Lee"))
        .expect("add");
    assert!(users
        .login(&mut db, &mut session, "jae", "pw123")
        .expect("login"));

    assert_eq!(
        users
            .delete_account(&mut db, &mut session, "pw123")
            .expect("delete"),
        MutationOutcome::Applied
    );
    assert!(!session.is_signed_in());
    assert!(users
        .search_other_user(&mut db, "jae")
        .expect("query")
        .is_none());
}

#[test]
fn data_survives_a_reopen_on_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("campus-eats.db");
    let url = path.to_string_lossy().into_owned();
    let menus = MenuManager::new();

    {
        let mut db = Database::open(&url).expect("open database");
        menus
            .add_menu(&mut db, &menu(2, 7, "Egg Toast", 3500))
            .expect("add");
    }

    let mut db = Database::open(&url).expect("reopen database");
    let rows = menus.search_by_restaurant(&mut db, 2).expect("search");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].menu_name, "Egg Toast");
}
