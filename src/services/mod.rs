pub mod code_service;
pub mod qr;
pub mod registration_service;

pub use code_service::{CodeService, IssuedCode};
pub use registration_service::{RegistrationService, SubmitForm, SubmitOutcome};
