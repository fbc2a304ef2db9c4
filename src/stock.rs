//! Per-blood-group stock levels for an organization.
//!
//! Every group is computed by its own future; the futures are joined once all of them have
//! resolved, and the first failing query fails the whole computation.

use futures::future::try_join_all;

use crate::{
    db,
    errors::AppError,
    structs::{BloodGroup, BloodGroupData, InventoryType},
    AppState,
};

pub async fn blood_group_stock(
    state: &AppState,
    organization_id: i64,
    blood_group: BloodGroup,
) -> Result<BloodGroupData, AppError> {
    let total_in = db::sum_quantity(state, organization_id, blood_group, InventoryType::In).await?;
    let total_out = db::sum_quantity(state, organization_id, blood_group, InventoryType::Out).await?;

    Ok(BloodGroupData {
        blood_group,
        total_in,
        total_out,
        available: total_in - total_out,
    })
}

/// One entry for each of the eight canonical groups, zeroed where nothing was recorded.
pub async fn blood_groups_data(
    state: &AppState,
    organization_id: i64,
) -> Result<Vec<BloodGroupData>, AppError> {
    try_join_all(
        BloodGroup::ALL
            .into_iter()
            .map(|blood_group| blood_group_stock(state, organization_id, blood_group)),
    )
    .await
}
