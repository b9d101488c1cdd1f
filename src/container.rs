use alloc::sync::Arc;
use tracing::debug;

use crate::{
    builder::Builder,
    entry::{validate_name, Entries, Entry, EntryKey, Recipe, Signature},
    errors::{ContainerErrorKind, InstantiateErrorKind, NameErrorKind},
    instantiator::Instantiator,
    scope::Scope,
};

/// Key-value registry holding recipes, arguments and singleton holders.
pub trait DependencyContainer: Send + Sync {
    #[must_use]
    fn has(&self, key: &EntryKey) -> bool;

    /// # Errors
    /// Returns [`ContainerErrorKind::NotFound`] if nothing is stored under `key`
    fn get(&self, key: &EntryKey) -> Result<&Entry, ContainerErrorKind>;

    /// Inserts or overwrites the entry stored under `name` in the namespace of `entry`.
    fn set(&mut self, name: &str, entry: Entry) -> Option<Entry>;

    /// Unions `entries` into the container, overwriting on key collision.
    fn merge(&mut self, entries: Entries);

    #[must_use]
    fn to_entries(&self) -> Entries;

    #[must_use]
    fn len(&self) -> usize;

    #[inline]
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registration helpers available on every [`DependencyContainer`].
pub trait ContainerExt: DependencyContainer {
    /// # Errors
    /// Returns [`NameErrorKind`] if `name` is empty or uses a reserved prefix
    fn register_object(&mut self, name: &str, signature: Signature, scope: Scope) -> Result<&mut Self, NameErrorKind> {
        validate_name(name)?;
        self.set(name, Entry::Recipe(Recipe::new(signature, scope)));
        debug!(name, scope = scope.name(), "Object registered");
        Ok(self)
    }

    /// Registers a literal value with prototype scope.
    ///
    /// # Errors
    /// Returns [`NameErrorKind`] if `name` is empty or uses a reserved prefix
    fn register_value<T: Send + Sync + 'static>(&mut self, name: &str, value: T) -> Result<&mut Self, NameErrorKind> {
        self.register_object(name, Signature::value(value), Scope::Prototype)
    }

    /// # Errors
    /// Returns [`NameErrorKind`] if `name` is empty or uses a reserved prefix
    fn register_shared<T: Send + Sync + 'static>(&mut self, name: &str, value: Arc<T>) -> Result<&mut Self, NameErrorKind> {
        self.register_object(name, Signature::shared(value), Scope::Prototype)
    }

    /// # Errors
    /// Returns [`NameErrorKind`] if `name` is empty or uses a reserved prefix
    fn register_factory<F, Response, Err>(&mut self, name: &str, scope: Scope, factory: F) -> Result<&mut Self, NameErrorKind>
    where
        F: FnMut(&mut Builder) -> Result<Response, Err> + Clone + Send + Sync + 'static,
        Response: Send + Sync + 'static,
        Err: Into<InstantiateErrorKind>,
    {
        self.register_object(name, Signature::factory(factory), scope)
    }

    /// # Errors
    /// Returns [`NameErrorKind`] if `name` is empty or uses a reserved prefix
    fn register_instantiator<Inst: Instantiator>(
        &mut self,
        name: &str,
        scope: Scope,
        instantiator: Inst,
    ) -> Result<&mut Self, NameErrorKind> {
        self.register_object(name, Signature::instantiator(instantiator), scope)
    }

    #[inline]
    #[must_use]
    fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.get(&EntryKey::object(name)).ok().and_then(Entry::as_recipe)
    }
}

impl<C: DependencyContainer + ?Sized> ContainerExt for C {}

/// Ordered container, optionally pre-populated.
///
/// # Examples
/// ```
/// use dibuilder::{Builder, Container, Scope, Signature};
///
/// struct Title(&'static str);
///
/// let container = Container::new()
///     .provide("Title", Signature::value(Title("Main Page")), Scope::Singleton)
///     .unwrap();
/// let mut builder = Builder::with_container(container);
///
/// assert_eq!(builder.build::<Title>("Title").unwrap().0, "Main Page");
/// ```
#[derive(Clone, Default, Debug)]
pub struct Container {
    entries: Entries,
}

impl Container {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Entries::new() }
    }

    #[inline]
    #[must_use]
    pub const fn with_entries(entries: Entries) -> Self {
        Self { entries }
    }

    /// Registers an object and returns the container.
    ///
    /// # Errors
    /// Returns [`NameErrorKind`] if `name` is empty or uses a reserved prefix
    #[inline]
    pub fn provide(mut self, name: &str, signature: Signature, scope: Scope) -> Result<Self, NameErrorKind> {
        self.register_object(name, signature, scope)?;
        Ok(self)
    }
}

impl DependencyContainer for Container {
    #[inline]
    fn has(&self, key: &EntryKey) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    fn get(&self, key: &EntryKey) -> Result<&Entry, ContainerErrorKind> {
        self.entries.get(key).ok_or_else(|| ContainerErrorKind::NotFound { key: key.clone() })
    }

    #[inline]
    fn set(&mut self, name: &str, entry: Entry) -> Option<Entry> {
        self.entries.insert(EntryKey::new(entry.namespace(), name), entry)
    }

    #[inline]
    fn merge(&mut self, mut entries: Entries) {
        debug!(count = entries.len(), "Entries merged");
        self.entries.append(&mut entries);
    }

    #[inline]
    fn to_entries(&self) -> Entries {
        self.entries.clone()
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Container without entries, used by [`Builder::new`].
#[derive(Clone, Default, Debug)]
pub struct EmptyContainer {
    inner: Container,
}

impl EmptyContainer {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { inner: Container::new() }
    }
}

impl DependencyContainer for EmptyContainer {
    #[inline]
    fn has(&self, key: &EntryKey) -> bool {
        self.inner.has(key)
    }

    #[inline]
    fn get(&self, key: &EntryKey) -> Result<&Entry, ContainerErrorKind> {
        self.inner.get(key)
    }

    #[inline]
    fn set(&mut self, name: &str, entry: Entry) -> Option<Entry> {
        self.inner.set(name, entry)
    }

    #[inline]
    fn merge(&mut self, entries: Entries) {
        self.inner.merge(entries);
    }

    #[inline]
    fn to_entries(&self) -> Entries {
        self.inner.to_entries()
    }

    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}
