//! Generic object model.
//!
//! # Data Flow
//! ```text
//! JSON text
//!     → value.rs (decode into own entries)
//!     → property lookup: own entries first
//!     → prototype.rs (ambient template, shared by all objects)
//! ```
//!
//! # Design Decisions
//! - Own entries are exactly the keys present in the payload, including a
//!   literal `__proto__` key
//! - Template values are placeholders, never payload data

pub mod prototype;
pub mod value;

pub use prototype::{AmbientKind, AmbientProperty, OBJECT_PROTOTYPE};
pub use value::{JsObject, PropertyValue};
