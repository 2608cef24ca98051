//! fieldmerge Core - Record model and presence classification
//!
//! This crate defines the types the reconciliation engine reads from:
//! - Field values (`Value`, `Date`)
//! - Field declarations (`Schema`, `FieldSpec`, `FieldKind`)
//! - Records with per-field presence (`Record`)
//! - The record provider contract (`Model`)
//! - Presence classification (`Category`, `Toggle`)
//! - Error types

pub mod value;
pub mod schema;
pub mod model;
pub mod category;
pub mod record;
pub mod error;

pub use value::*;
pub use schema::*;
pub use model::*;
pub use category::*;
pub use record::*;
pub use error::*;
