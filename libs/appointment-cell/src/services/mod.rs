pub mod availability;
pub mod booking;
pub mod hospital;
pub mod lifecycle;

pub use availability::AvailabilityService;
pub use booking::AppointmentBookingService;
pub use hospital::HospitalService;
pub use lifecycle::AppointmentLifecycleService;
