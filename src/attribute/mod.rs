//! Typed per-point attribute storage.
//!
//! An attribute is described by an [`AttributeDescriptor`] (semantic kind,
//! component count, scalar type) and stored in an [`AttributeStore`] - a
//! contiguous value buffer plus a point-to-value [`PointMapping`].

mod descriptor;
mod store;

pub use descriptor::*;
pub use store::*;
