//! Repository traits for contact operations.

pub mod contacts;
pub mod imports;

pub use contacts::ContactRepo;
pub use imports::{ImportRepo, ImportSummary};
