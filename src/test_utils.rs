use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::{
    db,
    structs::{BloodGroup, Inventory, InventoryType, NewInventory, Register, User, UserType},
    token::TokenSigner,
    AppState,
};

pub const TEST_PASSWORD: &str = "hunter2-but-longer";

/// Fresh in-memory database with migrations applied. A single connection is kept alive so
/// every query sees the same database.
pub async fn test_state() -> AppState {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await
        .unwrap();
    sqlx::migrate!().run(&db_pool).await.unwrap();

    AppState {
        db_pool,
        tokens: TokenSigner::new("test-secret", 7),
    }
}

pub fn registration(user_type: UserType, email: &str) -> Register {
    Register {
        email: email.to_owned(),
        password: TEST_PASSWORD.to_owned(),
        user_type,
        name: Some("Test User".to_owned()),
        organization_name: None,
        hospital_name: None,
        website: None,
        address: Some("1 Test Street".to_owned()),
        phone: Some("555-0100".to_owned()),
    }
}

pub async fn seed_user(state: &AppState, user_type: UserType, email: &str) -> User {
    db::create_user(state, registration(user_type, email)).await.unwrap()
}

pub async fn seed_inventory(
    state: &AppState,
    organization_id: i64,
    counterparty: &User,
    inventory_type: InventoryType,
    blood_group: BloodGroup,
    quantity: u32,
) -> Inventory {
    let record = NewInventory {
        inventory_type,
        blood_group,
        quantity,
        email: counterparty.email.clone(),
    };
    db::create_inventory(state, organization_id, &record, counterparty)
        .await
        .unwrap()
}
