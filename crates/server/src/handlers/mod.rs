//! HTTP request handlers.

pub mod common;
pub mod contacts;
pub mod health;
pub mod transfer;

pub use common::*;
pub use contacts::*;
pub use health::*;
pub use transfer::*;
