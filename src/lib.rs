//! Name-keyed dependency builder.
//!
//! Objects are registered in a [`DependencyContainer`] under a name, together with a
//! [`Scope`]. A [`Builder`] resolves them on request: prototype objects are materialized on
//! every call, singleton objects once per holder, and the caller can pass per-resolution
//! arguments which factories read back through the builder.

#![no_std]

extern crate alloc;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod builder;
pub(crate) mod cache;
pub(crate) mod container;
pub(crate) mod context;
pub(crate) mod entry;
pub(crate) mod errors;
pub(crate) mod instantiator;
pub(crate) mod scope;

pub use any::{AnyObject, TypeInfo};
pub use builder::Builder;
pub use cache::SingletonHolder;
pub use container::{Container, ContainerExt, DependencyContainer, EmptyContainer};
pub use context::Arguments;
pub use entry::{validate_name, Entries, Entry, EntryKey, Namespace, Recipe, Signature};
pub use errors::{ContainerErrorKind, InstantiateErrorKind, NameErrorKind, ResolveErrorKind};
pub use instantiator::{BoxedCloneInstantiator, Instantiator};
pub use scope::Scope;

#[doc(hidden)]
pub mod __private {
    pub use alloc::sync::Arc;
}
