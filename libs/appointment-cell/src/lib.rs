pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    Appointment, AppointmentError, AppointmentStatus, AvailableTime, Hospital, Timeslot,
    UpcomingAppointment,
};
pub use router::appointment_routes;
