//! Patient-facing client for the MedTrack API: typed endpoint calls plus the
//! state behind the login, dashboard, scheduler, history and FAQ screens.

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod faq;
pub mod history;
pub mod models;
pub mod scheduler;
pub mod session;
pub mod widgets;

pub use api::{ApiClient, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
