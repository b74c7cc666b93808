pub mod audit;
pub mod notification;
pub mod patient;
pub mod profile;
pub mod report;
pub mod result;
pub mod statistics;
pub mod traits;

pub use audit::{AuditEntry, AuditPayload};
pub use notification::{
    MarkRead, NewNotification, Notification, UnreadCount, DEFAULT_NOTIFICATION_KIND,
};
pub use patient::{Order, OrderHeader, Patient, PatientAndOrder, PatientOrderRow};
pub use profile::{PatientProfile, PersonRow};
pub use report::{Aggregation, LabReport};
pub use result::{
    GroupWithProcedures, ProcedureInfo, ProcedureWithTests, ReportedValue, ResultInfo, ResultRow,
    TestInfo, TestWithResult, ValueKind,
};
pub use statistics::ResultStatistics;
pub use traits::{AuditSink, NotificationStore, ProfileSource, ResultSource};
