pub mod audit;
pub mod notification;
pub mod profile;
pub mod results;

pub use audit::AuditRepository;
pub use notification::NotificationRepository;
pub use profile::ProfileRepository;
pub use results::ResultsRepository;
