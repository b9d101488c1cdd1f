mod container;
mod dependency_resolver;
mod instantiator;

pub use container::{ContainerErrorKind, NameErrorKind};
pub use dependency_resolver::ResolveErrorKind;
pub use instantiator::InstantiateErrorKind;
