//! Views: the registration form and the analysis pages

pub mod analysis;
pub mod registration;

pub use analysis::{follow_store, AnalysisSnapshot, AnalysisView, Phase};
pub use registration::{PendingRegistration, RegistrationResult, RegistrationView, SharedNotifier};
