// UI layer: provides the interactive menus using `dialoguer`.
// The menu loop owns the database handle and the session and passes both
// into each manager call. All console input parsing and fixed-width table
// rendering lives here; the parsing and rendering helpers are pure
// functions so the visible contract is testable.

use anyhow::Result;
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use crate::manager::{MenuManager, UserManager};
use crate::session::Session;
use crate::store::{
    Database, Menu, MenuPatch, MenuSearchFilter, MenuSearchRow, MutationOutcome, StoreError,
    UserPatch, UserRecord,
};

/// Three-way reading of the delete-account confirmation prompt. Only an
/// explicit yes proceeds; 'n' and anything else both cancel, with different
/// messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Confirmation {
    Yes,
    No,
    Invalid,
}

pub(crate) fn parse_confirmation(raw: &str) -> Confirmation {
    match raw.trim().to_lowercase().as_str() {
        "y" => Confirmation::Yes,
        "n" => Confirmation::No,
        _ => Confirmation::Invalid,
    }
}

/// Blank input means "no value"; anything else must parse as a number.
/// Used for the optional price bounds and the optional student id, where an
/// unparseable entry aborts the operation instead of being ignored.
pub(crate) fn parse_optional_number(raw: &str) -> Result<Option<i32>, std::num::ParseIntError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Marker for a price entry that is unparseable or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InvalidPrice;

/// Price variant of [`parse_optional_number`]: prices are non-negative, so a
/// negative entry is rejected here and can never reach the store as a real
/// price.
pub(crate) fn parse_optional_price(raw: &str) -> Result<Option<i32>, InvalidPrice> {
    match parse_optional_number(raw) {
        Ok(Some(price)) if price < 0 => Err(InvalidPrice),
        Ok(value) => Ok(value),
        Err(_) => Err(InvalidPrice),
    }
}

/// Main interactive menu. Blocks until the user chooses "Exit".
pub fn main_menu(mut db: Database) -> Result<()> {
    let menus = MenuManager::new();
    let users = UserManager::new();
    let mut session = Session::new();

    loop {
        let items = vec![
            "Login",
            "Sign up",
            "Search menus",
            "Menus by restaurant",
            "Manager mode",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                if handle_login(&mut db, &users, &mut session)? {
                    signed_in_menu(&mut db, &menus, &users, &mut session)?;
                }
            }
            1 => handle_sign_up(&mut db, &users)?,
            2 => handle_search_menus(&mut db, &menus)?,
            3 => handle_menus_by_restaurant(&mut db, &menus)?,
            4 => manager_menu(&mut db, &menus, &users)?,
            5 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Menu shown while a user is signed in. Returns to the main menu when the
/// user logs out or deletes their account.
fn signed_in_menu(
    db: &mut Database,
    menus: &MenuManager,
    users: &UserManager,
    session: &mut Session,
) -> Result<()> {
    while session.is_signed_in() {
        let items = vec![
            "My info",
            "Update my info",
            "Search menus",
            "Menus by restaurant",
            "Find another user",
            "Delete my account",
            "Logout",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_my_info(db, users, session),
            1 => handle_update_self(db, users, session)?,
            2 => handle_search_menus(db, menus)?,
            3 => handle_menus_by_restaurant(db, menus)?,
            4 => handle_search_other_user(db, users)?,
            5 => handle_delete_account(db, users, session)?,
            6 => {
                users.logout(session);
                println!("Logged out.");
            }
            _ => {}
        }
    }
    Ok(())
}

/// Manager-privileged menu. Anyone who can reach it is implicitly trusted;
/// there is no separate manager credential.
fn manager_menu(db: &mut Database, menus: &MenuManager, users: &UserManager) -> Result<()> {
    loop {
        let items = vec![
            "Add menu",
            "Update menu",
            "Delete menu",
            "Restaurant menu (manager view)",
            "List all users",
            "Add account",
            "Update account",
            "Search account",
            "Delete account",
            "Back",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_add_menu(db, menus)?,
            1 => handle_update_menu(db, menus)?,
            2 => handle_delete_menu(db, menus)?,
            3 => handle_search_by_manager(db, menus)?,
            4 => handle_display_all_users(db, users),
            5 => handle_add_account_by_manager(db, users)?,
            6 => handle_update_account_by_manager(db, users)?,
            7 => handle_search_account_by_manager(db, users)?,
            8 => handle_delete_account_by_manager(db, users)?,
            9 => break,
            _ => {}
        }
    }
    Ok(())
}

/* ----------------------------- account flows ---------------------------- */

fn handle_login(db: &mut Database, users: &UserManager, session: &mut Session) -> Result<bool> {
    let user_id: String = Input::new().with_prompt("User ID").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;
    match users.login(db, session, &user_id, &password) {
        Ok(true) => {
            println!("Welcome, {user_id}!");
            Ok(true)
        }
        Ok(false) => {
            println!("Login failed. Check your ID and password.");
            Ok(false)
        }
        Err(e) => {
            report_store_error(&e);
            Ok(false)
        }
    }
}

fn handle_sign_up(db: &mut Database, users: &UserManager) -> Result<()> {
    match prompt_new_user()? {
        Some(record) => match users.add_user(db, &record) {
            Ok(outcome) => report_mutation(
                outcome,
                "Account created. You can log in now.",
                "Failed to create the account.",
            ),
            Err(e) => report_store_error(&e),
        },
        None => println!("Invalid student ID. Account creation aborted."),
    }
    Ok(())
}

/// Collect the fields for a brand-new account. Returns `None` when the
/// student id does not parse.
fn prompt_new_user() -> Result<Option<UserRecord>> {
    let user_id: String = Input::new().with_prompt("ID").interact_text()?;
    let user_pw = Password::new().with_prompt("Password").interact()?;
    let name: String = Input::new().with_prompt("Name").interact_text()?;
    let student_raw: String = Input::new().with_prompt("Student ID").interact_text()?;
    let Ok(Some(student_id)) = parse_optional_number(&student_raw) else {
        return Ok(None);
    };
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let location: String = Input::new().with_prompt("Location").interact_text()?;
    Ok(Some(UserRecord {
        user_id,
        user_pw,
        name,
        student_id,
        email,
        location,
    }))
}

fn handle_my_info(db: &mut Database, users: &UserManager, session: &Session) {
    match users.my_info(db, session) {
        Ok(Some(user)) => println!("{}", render_user_details(&user)),
        Ok(None) => println!("No account information available."),
        Err(e) => report_store_error(&e),
    }
}

fn handle_update_self(db: &mut Database, users: &UserManager, session: &mut Session) -> Result<()> {
    println!("\n===== Update my information =====\n");
    let patch = match prompt_user_patch(true)? {
        Some(patch) => patch,
        None => {
            println!("Invalid student ID. Update aborted.");
            return Ok(());
        }
    };
    match users.update_self(db, session, &patch) {
        Ok(MutationOutcome::Applied) => println!("Update successful!"),
        Ok(_) => println!("Failed to update information."),
        Err(e) => report_store_error(&e),
    }
    Ok(())
}

/// Prompt for each account field; pressing enter keeps the current value.
/// Returns `None` when the optional student id fails to parse.
fn prompt_user_patch(allow_id_change: bool) -> Result<Option<UserPatch>> {
    let user_id = if allow_id_change {
        optional_text("New ID (Press enter to skip)")?
    } else {
        None
    };
    let user_pw = {
        let raw = Password::new()
            .with_prompt("New Password (Press enter to skip)")
            .allow_empty_password(true)
            .interact()?;
        (!raw.is_empty()).then_some(raw)
    };
    let name = optional_text("New Name (Press enter to skip)")?;
    let student_raw: String = Input::new()
        .with_prompt("New Student ID (Press enter to skip)")
        .allow_empty(true)
        .interact_text()?;
    let Ok(student_id) = parse_optional_number(&student_raw) else {
        return Ok(None);
    };
    let email = optional_text("New Email (Press enter to skip)")?;
    let location = optional_text("New Location (Press enter to skip)")?;
    Ok(Some(UserPatch {
        user_id,
        user_pw,
        name,
        student_id,
        email,
        location,
    }))
}

fn handle_search_other_user(db: &mut Database, users: &UserManager) -> Result<()> {
    let user_id: String = Input::new().with_prompt("Enter the user ID").interact_text()?;
    match users.search_other_user(db, &user_id) {
        Ok(Some(summary)) => {
            println!("\n== User Information ==\n");
            println!("ID: {}", summary.user_id);
            println!("Name: {}", summary.name);
            println!("\n======================");
        }
        Ok(None) => println!("The user could not be found."),
        Err(e) => report_store_error(&e),
    }
    Ok(())
}

fn handle_delete_account(
    db: &mut Database,
    users: &UserManager,
    session: &mut Session,
) -> Result<()> {
    println!("\nAre you sure you want to delete your account?");
    println!("All data related to you will be deleted.\n");
    let raw: String = Input::new()
        .with_prompt("Enter 'y' if you want to delete, or 'n'")
        .allow_empty(true)
        .interact_text()?;
    match parse_confirmation(&raw) {
        Confirmation::Yes => {
            let password = Password::new()
                .with_prompt("Please enter your PASSWORD")
                .interact()?;
            match users.delete_account(db, session, &password) {
                Ok(MutationOutcome::Applied) => println!("Membership withdrawal completed."),
                Ok(_) => println!("The password does not match."),
                Err(e) => report_store_error(&e),
            }
        }
        Confirmation::No => println!("Membership withdrawal canceled."),
        Confirmation::Invalid => println!("Invalid input. Membership withdrawal canceled."),
    }
    Ok(())
}

fn handle_display_all_users(db: &mut Database, users: &UserManager) {
    match users.all_users(db) {
        Ok(rows) => println!("{}", render_user_table(&rows)),
        Err(e) => report_store_error(&e),
    }
}

fn handle_add_account_by_manager(db: &mut Database, users: &UserManager) -> Result<()> {
    println!("\nEnter the new user information:");
    match prompt_new_user()? {
        Some(record) => match users.add_account_by_manager(db, &record) {
            Ok(outcome) => report_mutation(
                outcome,
                "The new user has been successfully added.",
                "Failed to add the new user.",
            ),
            Err(e) => report_store_error(&e),
        },
        None => println!("Invalid student ID. Aborted."),
    }
    Ok(())
}

fn handle_update_account_by_manager(db: &mut Database, users: &UserManager) -> Result<()> {
    let target_id: String = Input::new()
        .with_prompt("Enter the ID of the user to update")
        .interact_text()?;
    match users.find_account_for_update(db, &target_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            println!("User not found.");
            return Ok(());
        }
        Err(e) => {
            report_store_error(&e);
            return Ok(());
        }
    }
    let patch = match prompt_user_patch(false)? {
        Some(patch) => patch,
        None => {
            println!("Invalid student ID. Update aborted.");
            return Ok(());
        }
    };
    match users.update_account_by_manager(db, &target_id, &patch) {
        Ok(MutationOutcome::Applied) => println!("User information updated successfully!"),
        Ok(_) => println!("Failed to update user information."),
        Err(e) => report_store_error(&e),
    }
    Ok(())
}

fn handle_search_account_by_manager(db: &mut Database, users: &UserManager) -> Result<()> {
    let target_id: String = Input::new()
        .with_prompt("Enter the ID of the user to search")
        .interact_text()?;
    match users.search_account_by_manager(db, &target_id) {
        Ok(Some(user)) => println!("{}", render_user_table(std::slice::from_ref(&user))),
        Ok(None) => println!("User not found."),
        Err(e) => report_store_error(&e),
    }
    Ok(())
}

fn handle_delete_account_by_manager(db: &mut Database, users: &UserManager) -> Result<()> {
    let target_id: String = Input::new()
        .with_prompt("Enter the user ID you want to delete")
        .interact_text()?;
    let password = Password::new().with_prompt("Enter the password").interact()?;
    match users.delete_account_by_manager(db, &target_id, &password) {
        Ok(MutationOutcome::Applied) => {
            println!("The user account has been successfully deleted.");
        }
        Ok(MutationOutcome::NotFound) => println!("The password does not match."),
        Ok(MutationOutcome::ConstraintViolation) => {
            println!("An error occurred while deleting the user account.");
        }
        Err(e) => report_store_error(&e),
    }
    Ok(())
}

/* ------------------------------ menu flows ------------------------------ */

fn handle_add_menu(db: &mut Database, menus: &MenuManager) -> Result<()> {
    let menu_id: i32 = Input::new().with_prompt("Enter Menu ID").interact_text()?;
    let menu_name: String = Input::new().with_prompt("Enter Menu Name").interact_text()?;
    let res_id: i32 = Input::new().with_prompt("Enter Restaurant ID").interact_text()?;
    let price_raw: String = Input::new().with_prompt("Enter Price").interact_text()?;
    let Ok(Some(price)) = parse_optional_price(&price_raw) else {
        println!("Invalid price input. Menu not added.");
        return Ok(());
    };
    let record = Menu {
        res_id,
        menu_id,
        menu_name,
        price,
    };
    match menus.add_menu(db, &record) {
        Ok(outcome) => report_mutation(outcome, "Menu added successfully.", "Error adding menu."),
        Err(e) => report_store_error(&e),
    }
    Ok(())
}

fn handle_update_menu(db: &mut Database, menus: &MenuManager) -> Result<()> {
    let res_id: i32 = Input::new().with_prompt("Enter Restaurant ID").interact_text()?;
    show_menu_overview(db, menus, res_id);

    let menu_id: i32 = Input::new().with_prompt("Enter Menu ID").interact_text()?;
    let menu_name = optional_text("Enter New Menu Name (Press enter to skip)")?;
    let price_raw: String = Input::new()
        .with_prompt("Enter New Price (Press enter to skip)")
        .allow_empty(true)
        .interact_text()?;
    let Ok(price) = parse_optional_price(&price_raw) else {
        println!("Invalid price input. Update aborted.");
        return Ok(());
    };

    let patch = MenuPatch { menu_name, price };
    match menus.update_menu(db, res_id, menu_id, &patch) {
        Ok(outcome) => {
            report_mutation(outcome, "Menu updated successfully.", "Error updating menu.");
        }
        Err(e) => report_store_error(&e),
    }
    Ok(())
}

fn handle_delete_menu(db: &mut Database, menus: &MenuManager) -> Result<()> {
    let res_id: i32 = Input::new().with_prompt("Enter Restaurant ID").interact_text()?;
    show_menu_overview(db, menus, res_id);

    let menu_id: i32 = Input::new().with_prompt("Enter Menu ID").interact_text()?;
    match menus.delete_menu(db, res_id, menu_id) {
        Ok(outcome) => {
            report_mutation(outcome, "Menu deleted successfully.", "Error deleting menu.");
        }
        Err(e) => report_store_error(&e),
    }
    Ok(())
}

/// The four-filter search open to everyone. Invalid numeric input aborts
/// before any query runs.
fn handle_search_menus(db: &mut Database, menus: &MenuManager) -> Result<()> {
    let restaurant_name = optional_text("Enter Restaurant Name (or press Enter to skip)")?;
    let menu_name = optional_text("Enter Menu Name (or press Enter to skip)")?;

    let min_raw: String = Input::new()
        .with_prompt("Enter Minimum Price (or press Enter to skip)")
        .allow_empty(true)
        .interact_text()?;
    let Ok(min_price) = parse_optional_number(&min_raw) else {
        println!(
            "Invalid minimum price input. Please enter a valid number or press Enter to skip."
        );
        return Ok(());
    };
    let max_raw: String = Input::new()
        .with_prompt("Enter Maximum Price (or press Enter to skip)")
        .allow_empty(true)
        .interact_text()?;
    let Ok(max_price) = parse_optional_number(&max_raw) else {
        println!(
            "Invalid maximum price input. Please enter a valid number or press Enter to skip."
        );
        return Ok(());
    };

    let filter = MenuSearchFilter {
        restaurant_name,
        menu_name,
        min_price,
        max_price,
    };
    let spinner = searching_spinner();
    let result = menus.search_by_users(db, &filter);
    spinner.finish_and_clear();
    match result {
        Ok(rows) => print!("{}", render_search_results(&rows)),
        Err(e) => report_store_error(&e),
    }
    Ok(())
}

fn handle_menus_by_restaurant(db: &mut Database, menus: &MenuManager) -> Result<()> {
    let res_id: i32 = Input::new().with_prompt("Enter Restaurant ID").interact_text()?;
    let spinner = searching_spinner();
    let result = menus.search_by_restaurant(db, res_id);
    spinner.finish_and_clear();
    match result {
        Ok(rows) => print!("{}", render_restaurant_menus(&rows, false)),
        Err(e) => report_store_error(&e),
    }
    Ok(())
}

fn handle_search_by_manager(db: &mut Database, menus: &MenuManager) -> Result<()> {
    let res_id: i32 = Input::new().with_prompt("Enter Restaurant ID").interact_text()?;
    let spinner = searching_spinner();
    let result = menus.search_by_manager(db, res_id);
    spinner.finish_and_clear();
    match result {
        Ok(rows) => print!("{}", render_restaurant_menus(&rows, true)),
        Err(e) => report_store_error(&e),
    }
    Ok(())
}

/// Print the id/name overview used before update and delete so the operator
/// can pick a valid menu id.
fn show_menu_overview(db: &mut Database, menus: &MenuManager, res_id: i32) {
    match menus.menu_overview(db, res_id) {
        Ok(rows) => print!("{}", render_menu_overview(&rows)),
        Err(e) => report_store_error(&e),
    }
}

/* ------------------------------- helpers -------------------------------- */

/// Prompt that treats blank input as "no value".
fn optional_text(prompt: &str) -> Result<Option<String>> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    let trimmed = raw.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

// A spinner while the query runs, keyboard-free feedback like the rest of
// the prompts.
fn searching_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("Searching...");
    spinner
}

fn report_mutation(outcome: MutationOutcome, success: &str, failure: &str) {
    if outcome.is_applied() {
        println!("{success}");
    } else {
        println!("{failure}");
    }
}

/// Infrastructure failures are reported once and the menu loop carries on.
fn report_store_error(e: &StoreError) {
    error!(error = %e, "store operation failed");
    println!("A storage error occurred: {e}");
}

/* ------------------------------ rendering ------------------------------- */

fn render_menu_overview(rows: &[Menu]) -> String {
    let mut out = String::new();
    out.push_str("--------------------------------\n");
    out.push_str("Menu ID\t\tMenu Name\n");
    out.push_str("--------------------------------\n");
    for row in rows {
        out.push_str(&format!("{:<8}\t{:<30}\n", row.menu_id, row.menu_name));
    }
    out.push_str("--------------------------------\n");
    out
}

fn render_restaurant_menus(rows: &[Menu], manager_view: bool) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!("Menu ID: {}\n", row.menu_id));
        if manager_view {
            out.push_str(&format!("Restaurant ID: {}\n", row.res_id));
        }
        out.push_str(&format!("Menu Name: {}\n", row.menu_name));
        out.push_str(&format!("Price: {}\n", row.price));
        out.push_str("----------------------------\n");
    }
    out
}

fn render_search_results(rows: &[MenuSearchRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!("Restaurant Name: {}\n", row.res_name));
        out.push_str(&format!("Menu Name: {}\n", row.menu_name));
        out.push_str(&format!("Price: {}\n", row.price));
        out.push_str("----------------------------\n");
    }
    out
}

fn render_user_details(user: &UserRecord) -> String {
    format!(
        "\n=== My Information ===\n\n\
         ID: {}\n\
         Name: {}\n\
         Student ID: {}\n\
         Email: {}\n\
         Location: {}\n\n\
         ======================",
        user.user_id, user.name, user.student_id, user.email, user.location
    )
}

fn render_user_table(rows: &[UserRecord]) -> String {
    let mut out = String::new();
    out.push_str("\n=== All Users ===\n\n");
    out.push_str(&format!(
        "{:<15}{:<15}{:<15}{:<25}{:<15}\n",
        "ID", "Name", "Student ID", "Email", "Location"
    ));
    out.push_str(
        "-------------------------------------------------------------------------------\n",
    );
    for user in rows {
        out.push_str(&format!(
            "{:<15}{:<15}{:<15}{:<25}{:<15}\n",
            user.user_id, user.name, user.student_id, user.email, user.location
        ));
    }
    out
}
