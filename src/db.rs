use sqlx::{QueryBuilder, Sqlite};

use crate::{
    errors::AppError,
    structs::{BloodGroup, Inventory, InventoryType, NewInventory, Register, User},
    utils::{hash_password, now},
    AppState,
};

/// A side of an inventory transaction, mapped to its reference column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Organization,
    Donar,
    Hospital,
}

impl Party {
    fn column(&self) -> &'static str {
        match self {
            Party::Organization => "organization_id",
            Party::Donar => "donar_id",
            Party::Hospital => "hospital_id",
        }
    }
}

pub async fn get_user_by_id(state: &AppState, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db_pool)
        .await
}

pub async fn get_user_by_email(state: &AppState, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email.to_lowercase())
        .fetch_optional(&state.db_pool)
        .await
}

pub async fn create_user(state: &AppState, form: Register) -> Result<User, AppError> {
    let created_at = now();
    let pwd_hash = hash_password(form.password).await?;
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (user_type, name, organization_name, hospital_name, website, address, phone, email, pwd_hash, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
    )
    .bind(form.user_type)
    .bind(form.name)
    .bind(form.organization_name)
    .bind(form.hospital_name)
    .bind(form.website)
    .bind(form.address)
    .bind(form.phone)
    .bind(form.email.to_lowercase())
    .bind(pwd_hash)
    .bind(&created_at)
    .bind(&created_at)
    .fetch_one(&state.db_pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::UserAlreadyExists,
        e => AppError::DatabaseError(e),
    })?;
    log::info!("User created: id={} type={}", user.id, user.user_type);
    Ok(user)
}

pub async fn get_users_by_ids(state: &AppState, ids: &[i64]) -> Result<Vec<User>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM users WHERE id IN (");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
    query.build_query_as::<User>().fetch_all(&state.db_pool).await
}

/// Distinct, non-null `select` references over every transaction where `scope` is `id`.
pub async fn distinct_references(
    state: &AppState,
    select: Party,
    scope: Party,
    id: i64,
) -> Result<Vec<i64>, sqlx::Error> {
    let sql = format!(
        "SELECT DISTINCT {select} FROM inventories WHERE {scope} = $1 AND {select} IS NOT NULL",
        select = select.column(),
        scope = scope.column(),
    );
    sqlx::query_scalar::<_, i64>(&sql)
        .bind(id)
        .fetch_all(&state.db_pool)
        .await
}

/// Users referenced as `select` by the transactions of `id`.
pub async fn get_related_users(
    state: &AppState,
    select: Party,
    scope: Party,
    id: i64,
) -> Result<Vec<User>, sqlx::Error> {
    let ids = distinct_references(state, select, scope, id).await?;
    get_users_by_ids(state, &ids).await
}

/// Sum of `quantity` for one organization, group and direction; 0 when nothing matches.
pub async fn sum_quantity(
    state: &AppState,
    organization_id: i64,
    blood_group: BloodGroup,
    inventory_type: InventoryType,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(quantity), 0) FROM inventories \
         WHERE organization_id = $1 AND blood_group = $2 AND inventory_type = $3",
    )
    .bind(organization_id)
    .bind(blood_group)
    .bind(inventory_type)
    .fetch_one(&state.db_pool)
    .await
}

const INSERT_INVENTORY: &str = "INSERT INTO inventories \
    (inventory_type, blood_group, quantity, email, organization_id, donar_id, hospital_id, created_at, updated_at)";

fn log_recorded(inventory: &Inventory) {
    log::info!(
        "Inventory recorded: organization={} {:?} {} x{}",
        inventory.organization_id,
        inventory.inventory_type,
        inventory.blood_group,
        inventory.quantity
    );
}

/// Stores a transaction as-is, without looking at the current balance.
pub async fn create_inventory(
    state: &AppState,
    organization_id: i64,
    record: &NewInventory,
    counterparty: &User,
) -> Result<Inventory, sqlx::Error> {
    let created_at = now();
    let (donar_id, hospital_id) = match record.inventory_type {
        InventoryType::In => (Some(counterparty.id), None),
        InventoryType::Out => (None, Some(counterparty.id)),
    };
    let sql = format!(
        "{} VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        INSERT_INVENTORY
    );
    let inventory = sqlx::query_as::<_, Inventory>(&sql)
        .bind(record.inventory_type)
        .bind(record.blood_group)
        .bind(i64::from(record.quantity))
        .bind(&counterparty.email)
        .bind(organization_id)
        .bind(donar_id)
        .bind(hospital_id)
        .bind(&created_at)
        .bind(&created_at)
        .fetch_one(&state.db_pool)
        .await?;
    log_recorded(&inventory);
    Ok(inventory)
}

/// Stores an outgoing transaction only if the organization's balance for that blood group
/// covers it; `None` when it does not. Balance check and insert are a single statement and
/// run under one write lock.
pub async fn withdraw_inventory(
    state: &AppState,
    organization_id: i64,
    record: &NewInventory,
    counterparty: &User,
) -> Result<Option<Inventory>, sqlx::Error> {
    let created_at = now();
    let sql = format!(
        "{} SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9 \
         WHERE (SELECT COALESCE(SUM(CASE inventory_type WHEN 'in' THEN quantity ELSE -quantity END), 0) \
                FROM inventories WHERE organization_id = $5 AND blood_group = $2) >= $3 \
         RETURNING *",
        INSERT_INVENTORY
    );
    let inventory = sqlx::query_as::<_, Inventory>(&sql)
        .bind(InventoryType::Out)
        .bind(record.blood_group)
        .bind(i64::from(record.quantity))
        .bind(&counterparty.email)
        .bind(organization_id)
        .bind(None::<i64>)
        .bind(counterparty.id)
        .bind(&created_at)
        .bind(&created_at)
        .fetch_optional(&state.db_pool)
        .await?;
    match &inventory {
        Some(inventory) => log_recorded(inventory),
        None => log::info!(
            "Withdrawal of {} x{} refused for organization={}",
            record.blood_group,
            record.quantity,
            organization_id
        ),
    }
    Ok(inventory)
}

pub async fn get_inventory_by_organization(
    state: &AppState,
    organization_id: i64,
) -> Result<Vec<Inventory>, sqlx::Error> {
    sqlx::query_as::<_, Inventory>(
        "SELECT * FROM inventories WHERE organization_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(organization_id)
    .fetch_all(&state.db_pool)
    .await
}
