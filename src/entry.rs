use alloc::{
    borrow::ToOwned as _,
    collections::BTreeMap,
    string::{String, ToString as _},
    sync::Arc,
};
use core::fmt::{self, Debug, Display, Formatter};

use crate::{
    any::{into_object, AnyObject},
    builder::Builder,
    cache::SingletonHolder,
    errors::{InstantiateErrorKind, NameErrorKind},
    instantiator::{boxed_instantiator, BoxedCloneInstantiator, Instantiator},
    scope::Scope,
};

/// Export snapshot of a container, ordered by key.
pub type Entries = BTreeMap<EntryKey, Entry>;

/// Logical partition of the keys of a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Namespace {
    Object,
    Argument,
    Singleton,
}

impl Namespace {
    /// Prefix used when a key of this namespace is rendered.
    #[inline]
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Namespace::Object => "",
            Namespace::Argument => "arg_",
            Namespace::Singleton => "sing_",
        }
    }
}

const RESERVED_PREFIXES: [&str; 2] = [Namespace::Argument.prefix(), Namespace::Singleton.prefix()];

/// Checks that `name` can be used as an object or argument name.
///
/// # Errors
/// - Returns [`NameErrorKind::Empty`] if `name` is empty
/// - Returns [`NameErrorKind::Reserved`] if `name` starts with `arg_` or `sing_`
pub fn validate_name(name: &str) -> Result<(), NameErrorKind> {
    if name.is_empty() {
        return Err(NameErrorKind::Empty);
    }
    match RESERVED_PREFIXES.into_iter().find(|prefix| name.starts_with(prefix)) {
        Some(prefix) => Err(NameErrorKind::Reserved {
            name: name.to_owned(),
            prefix,
        }),
        None => Ok(()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey {
    pub namespace: Namespace,
    pub name: String,
}

impl EntryKey {
    #[inline]
    #[must_use]
    pub fn new(namespace: Namespace, name: &str) -> Self {
        Self {
            namespace,
            name: name.to_string(),
        }
    }

    #[inline]
    #[must_use]
    pub fn object(name: &str) -> Self {
        Self::new(Namespace::Object, name)
    }

    #[inline]
    #[must_use]
    pub fn argument(name: &str) -> Self {
        Self::new(Namespace::Argument, name)
    }

    #[inline]
    #[must_use]
    pub fn singleton(name: &str) -> Self {
        Self::new(Namespace::Singleton, name)
    }
}

impl Display for EntryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.namespace.prefix(), self.name)
    }
}

/// How an object is produced: either a literal value or a factory receiving the builder.
#[derive(Clone)]
pub enum Signature {
    Value(AnyObject),
    Factory(BoxedCloneInstantiator),
}

impl Signature {
    #[inline]
    #[must_use]
    pub fn value<T: Send + Sync + 'static>(value: T) -> Self {
        Self::Value(into_object(value))
    }

    /// Literal created outside the container and shared with it.
    #[inline]
    #[must_use]
    pub fn shared<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self::Value(value)
    }

    #[inline]
    #[must_use]
    pub fn factory<F, Response, Err>(factory: F) -> Self
    where
        F: FnMut(&mut Builder) -> Result<Response, Err> + Clone + Send + Sync + 'static,
        Response: Send + Sync + 'static,
        Err: Into<InstantiateErrorKind>,
    {
        Self::Factory(boxed_instantiator(factory))
    }

    #[inline]
    #[must_use]
    pub fn instantiator<Inst: Instantiator>(instantiator: Inst) -> Self {
        Self::Factory(boxed_instantiator(instantiator))
    }

    #[inline]
    #[must_use]
    pub const fn is_factory(&self) -> bool {
        matches!(self, Signature::Factory(_))
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Signature::Value(_) => f.write_str("Value(..)"),
            Signature::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Registration of a named object.
#[derive(Clone, Debug)]
pub struct Recipe {
    pub signature: Signature,
    pub scope: Scope,
}

impl Recipe {
    #[inline]
    #[must_use]
    pub const fn new(signature: Signature, scope: Scope) -> Self {
        Self { signature, scope }
    }
}

#[derive(Clone)]
pub enum Entry {
    Recipe(Recipe),
    Argument(AnyObject),
    Singleton(SingletonHolder),
}

impl Entry {
    /// Namespace the entry is stored under.
    #[inline]
    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        match self {
            Entry::Recipe(_) => Namespace::Object,
            Entry::Argument(_) => Namespace::Argument,
            Entry::Singleton(_) => Namespace::Singleton,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_recipe(&self) -> Option<&Recipe> {
        match self {
            Entry::Recipe(recipe) => Some(recipe),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_argument(&self) -> Option<&AnyObject> {
        match self {
            Entry::Argument(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_singleton(&self) -> Option<&SingletonHolder> {
        match self {
            Entry::Singleton(holder) => Some(holder),
            _ => None,
        }
    }
}

impl Debug for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Recipe(recipe) => f.debug_tuple("Recipe").field(recipe).finish(),
            Entry::Argument(_) => f.write_str("Argument(..)"),
            Entry::Singleton(holder) => f.debug_tuple("Singleton").field(holder).finish(),
        }
    }
}
