//! Diesel table definitions for the campus-eats SQLite schema.
//!
//! These must match the embedded migrations exactly; Diesel uses them for
//! type-safe query generation.

diesel::table! {
    /// Campus restaurants. Referenced by menus through `res_id`.
    restaurant (res_id) {
        res_id -> Integer,
        res_name -> Text,
    }
}

diesel::table! {
    /// Menu items. A menu belongs to exactly one restaurant, enforced by
    /// the composite primary key on every query.
    menu (res_id, menu_id) {
        res_id -> Integer,
        menu_id -> Integer,
        menu_name -> Text,
        price -> Integer,
    }
}

diesel::table! {
    /// User accounts. Passwords are stored in plaintext to match the
    /// behaviour of the system this tool administers.
    users (user_id) {
        user_id -> Text,
        user_pw -> Text,
        name -> Text,
        student_id -> Integer,
        email -> Text,
        location -> Text,
    }
}

diesel::joinable!(menu -> restaurant (res_id));
diesel::allow_tables_to_appear_in_same_query!(menu, restaurant);
