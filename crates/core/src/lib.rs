//! Core domain types and shared logic for the Rolodex address book.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Contacts and their typed contact details
//! - Create/import validation policies
//! - Aggregation of detail rows onto their owning contacts
//! - Configuration shared by the server and store

pub mod config;
pub mod contact;
pub mod error;

pub use contact::{
    Contact, ContactDetail, DetailInput, NewContact, ValidationPolicy, attach_details,
};
pub use error::{Error, Result};

/// Sheet name used for exported workbooks.
pub const EXPORT_SHEET_NAME: &str = "Contacts";

/// File name offered for exported workbooks.
pub const EXPORT_FILE_NAME: &str = "contacts.xlsx";
