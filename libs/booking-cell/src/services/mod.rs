pub mod employees;
pub mod catalog;
pub mod compatibility;
pub mod selection;
pub mod booking;

pub use employees::{EmployeeDirectory, SupabaseEmployeeDirectory};
pub use catalog::CatalogService;
pub use selection::ServiceEmployeeSelection;
pub use booking::BookingSelectionService;
