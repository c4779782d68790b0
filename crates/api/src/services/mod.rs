//! Application services.

pub mod reconciliation;

pub use reconciliation::CreditReconciliationService;
