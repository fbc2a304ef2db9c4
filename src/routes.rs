use actix_web::{
    get, post,
    web::{self, Data},
    HttpResponse, Responder,
};

use crate::{
    auth::AuthenticatedUser,
    db::{self, Party},
    errors::AppError,
    stock,
    structs::{ApiResponse, InventoryType, Login, NewInventory, Register, UserType},
    utils::verify_password,
    AppState,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(register_handler)
        .service(login_handler)
        .service(current_user_handler)
        .service(donars_handler)
        .service(hospitals_handler)
        .service(donar_organizations_handler)
        .service(hospital_organizations_handler)
        .service(blood_groups_data_handler)
        .service(add_inventory_handler)
        .service(inventory_handler);
}

/// Malformed bodies get the same `success: false` envelope as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

pub async fn default_handler() -> impl Responder {
    HttpResponse::NotFound().json(ApiResponse::failure("Route not found"))
}

#[post("/register")]
pub async fn register_handler(
    web::Json(form): web::Json<Register>,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if db::get_user_by_email(&state, &form.email).await?.is_some() {
        return Err(AppError::UserAlreadyExists);
    }

    db::create_user(&state, form).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("User registered successfully")))
}

#[post("/login")]
pub async fn login_handler(
    web::Json(form): web::Json<Login>,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = db::get_user_by_email(&state, &form.email)
        .await?
        .ok_or(AppError::UserNotFound)?;

    if user.user_type != form.user_type {
        return Err(AppError::RoleMismatch(form.user_type));
    }

    if !verify_password(form.password, user.pwd_hash.clone()).await? {
        log::warn!("Invalid password for user ID: {}", user.id);
        return Err(AppError::InvalidPassword);
    }

    let token = state.tokens.issue(user.id)?;
    log::info!("User logged in: id={}", user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::ok("User logged in successfully", token)))
}

#[get("/get-current-user")]
pub async fn current_user_handler(
    caller: AuthenticatedUser,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    // A token can outlive its user; that case answers with null data.
    let user = db::get_user_by_id(&state, caller.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("User fetched successfully", user)))
}

async fn related_users(
    state: &AppState,
    caller: AuthenticatedUser,
    select: Party,
    scope: Party,
    message: &str,
) -> Result<HttpResponse, AppError> {
    let users = db::get_related_users(state, select, scope, caller.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(message, users)))
}

#[get("/get-all-donars")]
pub async fn donars_handler(
    caller: AuthenticatedUser,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    related_users(&state, caller, Party::Donar, Party::Organization, "Donars fetched successfully").await
}

#[get("/get-all-hospitals")]
pub async fn hospitals_handler(
    caller: AuthenticatedUser,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    related_users(
        &state,
        caller,
        Party::Hospital,
        Party::Organization,
        "Hospitals fetched successfully",
    )
    .await
}

#[get("/get-all-organizations-of-a-donar")]
pub async fn donar_organizations_handler(
    caller: AuthenticatedUser,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    related_users(
        &state,
        caller,
        Party::Organization,
        Party::Donar,
        "Organizations fetched successfully",
    )
    .await
}

#[get("/get-all-organizations-of-a-hospital")]
pub async fn hospital_organizations_handler(
    caller: AuthenticatedUser,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    related_users(
        &state,
        caller,
        Party::Organization,
        Party::Hospital,
        "Organizations fetched successfully",
    )
    .await
}

#[get("/blood-groups-data")]
pub async fn blood_groups_data_handler(
    caller: AuthenticatedUser,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let data = stock::blood_groups_data(&state, caller.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Blood group data", data)))
}

#[post("/add-inventory")]
pub async fn add_inventory_handler(
    caller: AuthenticatedUser,
    web::Json(record): web::Json<NewInventory>,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let counterparty = db::get_user_by_email(&state, &record.email)
        .await?
        .ok_or(AppError::InvalidEmail)?;

    match record.inventory_type {
        InventoryType::In => {
            if counterparty.user_type != UserType::Donar {
                return Err(AppError::WrongCounterparty(UserType::Donar));
            }
            db::create_inventory(&state, caller.user_id, &record, &counterparty).await?;
        }
        InventoryType::Out => {
            if counterparty.user_type != UserType::Hospital {
                return Err(AppError::WrongCounterparty(UserType::Hospital));
            }
            if db::withdraw_inventory(&state, caller.user_id, &record, &counterparty)
                .await?
                .is_none()
            {
                let current =
                    stock::blood_group_stock(&state, caller.user_id, record.blood_group).await?;
                return Err(AppError::InsufficientStock {
                    blood_group: record.blood_group,
                    available: current.available,
                });
            }
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message("New blood record added")))
}

#[get("/get-inventory")]
pub async fn inventory_handler(
    caller: AuthenticatedUser,
    state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let records = db::get_inventory_by_organization(&state, caller.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Inventory fetched successfully", records)))
}
