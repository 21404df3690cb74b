//! Immutable, fixed-length arrays with zero-copy publication.
//!
//! [`ImmutableArray<T>`] is a cheaply cloneable value whose contents never change once
//! it has been published. Values are obtained either by staging elements in a
//! [`FixedSizeBuilder`] and freezing it, which moves the staged buffer into the array
//! without copying, or through the functions in [`create`], which copy caller-owned
//! data and reuse the buffers of existing arrays wherever that is safe.
//!
//! # Modules
//!
//! - [`create`]: construction entry points (copying, slicing, mapping, range sources)
//! - [`source`]: source shapes accepted by [`create::from_source`]
//! - [`covariant`]: zero-copy views of an array under a covariant element type
//! - [`search`]: binary search with insertion-point encoding

pub mod array;
pub mod builder;
pub mod covariant;
pub mod create;
pub mod search;
pub mod source;

pub use array::ImmutableArray;
pub use builder::FixedSizeBuilder;
pub use covariant::{CovariantArray, Upcast};
