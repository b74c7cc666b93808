pub mod aggregation;
pub mod notification;
pub mod patient;
pub mod profile;
pub mod results;

pub use aggregation::{build_groups, reference_bounds, reported_value};
pub use notification::NotificationService;
pub use patient::{compose_name, ordering_professional};
pub use profile::ProfileService;
pub use results::ResultsService;
