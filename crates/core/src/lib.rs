//! `salepack-core` — shared building blocks for the sales package rules.
//!
//! Nothing in here knows about sales or products; it only provides identity,
//! value semantics and the domain error model the other crates build on.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::AggregateRoot;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AggregateId, TenantId};
pub use value_object::ValueObject;
