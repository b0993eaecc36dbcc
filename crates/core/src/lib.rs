//! `titanium-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no console).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::SerialNumber;
pub use value_object::{Price, ValueObject};
