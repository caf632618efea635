//! Ember IR - shared identifiers for the Ember runtime.
//!
//! This crate provides the small, `Copy`-or-cheap types that every other
//! runtime crate agrees on:
//!
//! - [`Address`]: fixed-width account address; the zero address means "unrooted"
//! - [`Location`] and type IDs for composite types
//! - [`LocationRange`]: diagnostic source range threaded through value operations
//! - [`CompositeKind`] and [`PathDomain`] tags
//! - [`StaticType`] / [`PrimitiveStaticType`]: declared (not reified) types
//!
//! Everything here is `Hash + Eq` so that values and dynamic types built on
//! top of it stay hashable.

mod address;
mod composite_kind;
mod location;
mod path_domain;
mod static_type;

pub use address::{Address, AddressError};
pub use composite_kind::CompositeKind;
pub use location::{Location, LocationRange, Span};
pub use path_domain::PathDomain;
pub use static_type::{PrimitiveStaticType, StaticType};
