//! Team commands.

use tracing::debug;

use showroom_core::{NewSalesperson, Salesperson};

use crate::error::ApiError;
use crate::team::TeamRoster;

pub async fn create_salesperson(team: &TeamRoster, input: NewSalesperson) -> Result<Salesperson, ApiError> {
    debug!(username = %input.username, role = %input.role, "create_salesperson command");
    Ok(team.create(input).await?)
}

pub async fn delete_salesperson(team: &TeamRoster, salesperson_id: &str) -> Result<(), ApiError> {
    debug!(salesperson_id, "delete_salesperson command");
    Ok(team.delete(salesperson_id).await?)
}

pub async fn list_salespeople(team: &TeamRoster) -> Result<Vec<Salesperson>, ApiError> {
    Ok(team.list().await?)
}
