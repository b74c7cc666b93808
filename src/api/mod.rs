pub mod handlers;
pub mod routes;

pub use routes::{
    health_routes, notification_routes, profile_routes, protected_notification_routes,
    protected_profile_routes, protected_results_routes, results_routes,
};
