//! First-run provisioning.
//!
//! A fresh database has no way to log in, so when the user table is
//! empty a default administrator is created from the configured
//! credentials. Production deployments must override the defaults.

use tracing::{info, warn};

use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::AppError;
use shared::models::user::ROLE_ADMIN;

pub async fn seed_default_admin(state: &ServerState) -> Result<(), AppError> {
    if user::count(&state.pool).await? > 0 {
        return Ok(());
    }

    let config = &state.config;
    user::create(
        &state.pool,
        &config.default_admin_username,
        &config.default_admin_password,
        ROLE_ADMIN,
        None,
        None,
    )
    .await?;

    info!(
        username = %config.default_admin_username,
        "Seeded default administrator account"
    );
    if config.is_production() {
        warn!("Default admin credentials in use in production, change them immediately");
    }
    Ok(())
}
