pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    Condition, LabResult, MedicalHistoryError, MedicalHistoryRecord, Medication, PriorAppointment,
};
pub use router::medical_history_routes;
