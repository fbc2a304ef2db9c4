use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum UserType {
    #[serde(alias = "donor")]
    Donar,
    Organization,
    Hospital,
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Donar => "donar",
            UserType::Organization => "organization",
            UserType::Hospital => "hospital",
            UserType::Admin => "admin",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the eight canonical blood-group labels.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
pub enum BloodGroup {
    #[serde(rename = "a+")]
    #[sqlx(rename = "a+")]
    APositive,
    #[serde(rename = "a-")]
    #[sqlx(rename = "a-")]
    ANegative,
    #[serde(rename = "b+")]
    #[sqlx(rename = "b+")]
    BPositive,
    #[serde(rename = "b-")]
    #[sqlx(rename = "b-")]
    BNegative,
    #[serde(rename = "ab+")]
    #[sqlx(rename = "ab+")]
    AbPositive,
    #[serde(rename = "ab-")]
    #[sqlx(rename = "ab-")]
    AbNegative,
    #[serde(rename = "o+")]
    #[sqlx(rename = "o+")]
    OPositive,
    #[serde(rename = "o-")]
    #[sqlx(rename = "o-")]
    ONegative,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "a+",
            BloodGroup::ANegative => "a-",
            BloodGroup::BPositive => "b+",
            BloodGroup::BNegative => "b-",
            BloodGroup::AbPositive => "ab+",
            BloodGroup::AbNegative => "ab-",
            BloodGroup::OPositive => "o+",
            BloodGroup::ONegative => "o-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of an inventory movement.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum InventoryType {
    In,
    Out,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: i64,
    pub user_type: UserType,
    pub name: Option<String>,
    pub organization_name: Option<String>,
    pub hospital_name: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub pwd_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    #[serde(rename = "_id")]
    pub id: i64,
    pub inventory_type: InventoryType,
    pub blood_group: BloodGroup,
    pub quantity: i64,
    pub email: String,
    #[serde(rename = "organization")]
    pub organization_id: i64,
    #[serde(rename = "donar")]
    pub donar_id: Option<i64>,
    #[serde(rename = "hospital")]
    pub hospital_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Stock level of one blood group within an organization.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BloodGroupData {
    pub blood_group: BloodGroup,
    pub total_in: i64,
    pub total_out: i64,
    /// Signed; negative values are passed through as-is.
    pub available: i64,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    pub email: String,
    pub password: String,
    pub user_type: UserType,
    pub name: Option<String>,
    pub organization_name: Option<String>,
    pub hospital_name: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewInventory {
    pub inventory_type: InventoryType,
    pub blood_group: BloodGroup,
    pub quantity: u32,
    pub email: String,
}

/// Envelope shared by every endpoint: `{success, message, data?}`.
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}
