pub mod token;
pub mod links;
pub mod lifecycle;
pub mod appointment;

pub use token::{ActionTokenService, TokenError};
pub use links::ActionLinkBuilder;
pub use lifecycle::AppointmentLifecycleService;
pub use appointment::AppointmentActionService;
