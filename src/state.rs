//! Shared application state for all routes.

use crate::admin::AdminSite;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub admin: Arc<AdminSite>,
}
