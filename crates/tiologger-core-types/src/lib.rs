//! Core types shared across the tiologger crates
//!
//! - **Schema constants**: record keys, named-error labels, environment
//!   variable names and well-known sink names
//! - **Sensitive data**: `Sensitive<T>` marker that redacts itself when
//!   printed or serialized into a record

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;
