pub mod history;

pub use history::MedicalHistoryService;
