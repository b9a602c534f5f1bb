mod admin;
mod catalog;
mod common;

pub use admin::admin_routes;
pub use catalog::catalog_routes;
pub use common::{common_routes, common_routes_with_ready};
