use alloc::{borrow::ToOwned as _, boxed::Box, string::String, sync::Arc};
use core::any::type_name;
use tracing::{debug, error, info_span};

use crate::{
    any::{into_object, AnyObject, TypeInfo},
    cache::SingletonHolder,
    container::{ContainerExt as _, DependencyContainer, EmptyContainer},
    context::Arguments,
    entry::{validate_name, Entry, EntryKey, Recipe, Signature},
    errors::{NameErrorKind, ResolveErrorKind},
    scope::Scope,
};

/// Resolves registered names into objects.
///
/// The builder owns one container, composed from any number of merged
/// containers. Factories receive the builder itself, so they can resolve
/// other names and read injected arguments.
///
/// # Examples
/// ```
/// use dibuilder::{Builder, ContainerExt as _, InstantiateErrorKind, Scope};
///
/// struct Title(String);
/// struct Page(std::sync::Arc<Title>);
///
/// let mut builder = Builder::new();
/// builder
///     .container_mut()
///     .register_factory("Page", Scope::Prototype, |builder| {
///         Ok::<_, InstantiateErrorKind>(Page(builder.get_argument::<Title>("Title")?))
///     })
///     .unwrap();
///
/// builder.add_argument("Title", Title("Main Page".to_owned())).unwrap();
///
/// let page = builder.build::<Page>("Page").unwrap();
/// assert_eq!(page.0 .0, "Main Page");
/// ```
pub struct Builder {
    container: Box<dyn DependencyContainer>,
    scope: Option<Scope>,
    depth: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates builder with an [`EmptyContainer`], to be filled through [`Self::container_mut`]
    /// or [`Self::register_container`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_container(EmptyContainer::new())
    }

    #[inline]
    #[must_use]
    pub fn with_container(container: impl DependencyContainer + 'static) -> Self {
        Self {
            container: Box::new(container),
            scope: None,
            depth: 0,
        }
    }

    /// Merges entries of `container` into the owned container.
    /// Entries of `container` win on name collision.
    pub fn register_container(&mut self, container: &dyn DependencyContainer) {
        self.container.merge(container.to_entries());
        debug!(len = self.container.len(), "Container registered");
    }

    #[inline]
    #[must_use]
    pub fn container(&self) -> &dyn DependencyContainer {
        &*self.container
    }

    #[inline]
    #[must_use]
    pub fn container_mut(&mut self) -> &mut dyn DependencyContainer {
        &mut *self.container
    }

    /// Stores `value` in the argument namespace under `key`.
    ///
    /// # Errors
    /// Returns [`NameErrorKind`] if `key` is empty or uses a reserved prefix
    #[inline]
    pub fn add_argument<T: Send + Sync + 'static>(&mut self, key: &str, value: T) -> Result<&mut Self, NameErrorKind> {
        self.add_argument_object(key, into_object(value))?;
        Ok(self)
    }

    /// Same as [`Self::add_argument`], for a value created and shared outside the builder.
    ///
    /// # Errors
    /// Returns [`NameErrorKind`] if `key` is empty or uses a reserved prefix
    #[inline]
    pub fn add_shared_argument<T: Send + Sync + 'static>(&mut self, key: &str, value: Arc<T>) -> Result<&mut Self, NameErrorKind> {
        self.add_argument_object(key, value)?;
        Ok(self)
    }

    fn add_argument_object(&mut self, key: &str, value: AnyObject) -> Result<(), NameErrorKind> {
        validate_name(key)?;
        self.container.set(key, Entry::Argument(value));
        debug!(key, "Argument added");
        Ok(())
    }

    /// # Errors
    /// Returns [`NameErrorKind`] if `key` is empty or uses a reserved prefix
    #[inline]
    pub fn has_argument(&self, key: &str) -> Result<bool, NameErrorKind> {
        validate_name(key)?;
        Ok(self.container.has(&EntryKey::argument(key)))
    }

    /// Gets an argument added by [`Self::add_argument`] or passed to [`Self::new_object`].
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::InvalidName`] if `key` is empty or uses a reserved prefix
    /// - Returns [`ResolveErrorKind::NoArgument`] if the argument was never added
    /// - Returns [`ResolveErrorKind::IncorrectType`] if the argument isn't a `T`
    pub fn get_argument<T: Send + Sync + 'static>(&self, key: &str) -> Result<Arc<T>, ResolveErrorKind> {
        if let Err(err) = validate_name(key) {
            return Err(self.report(err.into()));
        }

        let Some(value) = self.container.get(&EntryKey::argument(key)).ok().and_then(Entry::as_argument) else {
            return Err(self.report(ResolveErrorKind::NoArgument { key: key.to_owned() }));
        };

        downcast(key, value.clone()).map_err(|err| self.report(err))
    }

    /// Gets an argument keyed by the short type name of `T`, as added by [`Arguments::push`].
    ///
    /// # Errors
    /// Returns [`ResolveErrorKind::NoArgument`] if there is no such argument
    #[inline]
    pub fn get_typed_argument<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolveErrorKind> {
        self.get_argument(&TypeInfo::of::<T>().short_name())
    }

    /// Overrides the registered scope for the next resolution only.
    ///
    /// The override is cleared as soon as that resolution starts, so objects the
    /// factory builds in turn are resolved with their registered scopes.
    #[inline]
    pub fn set_scope(&mut self, scope: Scope) -> &mut Self {
        self.scope = Some(scope);
        self
    }

    /// Registers `arguments` and builds the object registered under `name`.
    ///
    /// # Errors
    /// See [`Self::build`]
    #[inline]
    pub fn new_object<T: Send + Sync + 'static>(&mut self, name: &str, arguments: impl Into<Arguments>) -> Result<Arc<T>, ResolveErrorKind> {
        let object = self.resolve_any(name, arguments)?;
        downcast(name, object).map_err(|err| self.report(err))
    }

    /// Untyped counterpart of [`Self::new_object`].
    ///
    /// Arguments are registered only if all of their keys are valid.
    ///
    /// # Errors
    /// See [`Self::build_any`]
    pub fn resolve_any(&mut self, name: &str, arguments: impl Into<Arguments>) -> Result<AnyObject, ResolveErrorKind> {
        let arguments = arguments.into();

        if let Some(err) = arguments.keys().find_map(|key| validate_name(key).err()) {
            self.scope = None;
            return Err(self.report(err.into()));
        }

        for (key, value) in arguments.entries {
            self.container.set(&key, Entry::Argument(value));
            debug!(key, "Argument added");
        }
        self.build_any(name)
    }

    /// Builds the object registered under `name` and downcasts it to `T`.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::IncorrectType`] if the object isn't a `T`
    /// - See [`Self::build_any`] for other errors
    #[inline]
    pub fn build<T: Send + Sync + 'static>(&mut self, name: &str) -> Result<Arc<T>, ResolveErrorKind> {
        let object = self.build_any(name)?;
        downcast(name, object).map_err(|err| self.report(err))
    }

    /// Builds the object registered under `name` according to its scope.
    ///
    /// The scope set by [`Self::set_scope`] takes priority over the registered one
    /// and is consumed by this call, whatever its result.
    /// Objects with singleton scope are built once and shared by later calls.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::InvalidName`] if `name` is empty or uses a reserved prefix
    /// - Returns [`ResolveErrorKind::NoRecipe`] if `name` isn't registered
    /// - Returns [`ResolveErrorKind::Instantiator`] if the factory failed
    pub fn build_any(&mut self, name: &str) -> Result<AnyObject, ResolveErrorKind> {
        let span = info_span!("build", name);
        let _guard = span.enter();

        let scope_override = self.scope.take();

        self.depth += 1;
        let result = self.resolve(name, scope_override);
        self.depth -= 1;

        result.map_err(|err| self.report(err))
    }
}

impl Builder {
    fn resolve(&mut self, name: &str, scope_override: Option<Scope>) -> Result<AnyObject, ResolveErrorKind> {
        validate_name(name)?;

        let Some(Recipe { signature, scope }) = self.container.recipe(name).cloned() else {
            return Err(ResolveErrorKind::NoRecipe { name: name.to_owned() });
        };
        let scope = scope_override.unwrap_or(scope);

        debug!(scope = scope.name(), overridden = scope_override.is_some(), "Scope resolved");

        match scope {
            Scope::Singleton => self.load_singleton(name, &signature),
            Scope::Prototype => self.materialize(name, &signature),
        }
    }

    fn load_singleton(&mut self, name: &str, signature: &Signature) -> Result<AnyObject, ResolveErrorKind> {
        let key = EntryKey::singleton(name);

        if let Some(holder) = self.singleton_holder(&key) {
            debug!("Found in cache");
            return holder.get_or_try_init(|| self.materialize(name, signature));
        }
        debug!("Not found in cache");

        let value = self.materialize(name, signature)?;

        // The factory may have stored a holder for this name in the meantime
        let holder = match self.singleton_holder(&key) {
            Some(holder) => holder,
            None => {
                let holder = SingletonHolder::with_value(value.clone());
                self.container.set(name, Entry::Singleton(holder.clone()));
                debug!("Singleton materialized");
                holder
            }
        };

        Ok(holder.get_or_insert(value))
    }

    #[inline]
    fn singleton_holder(&self, key: &EntryKey) -> Option<SingletonHolder> {
        self.container.get(key).ok().and_then(Entry::as_singleton).cloned()
    }

    fn materialize(&mut self, name: &str, signature: &Signature) -> Result<AnyObject, ResolveErrorKind> {
        match signature {
            Signature::Value(value) => Ok(value.clone()),
            Signature::Factory(instantiator) => {
                instantiator
                    .clone()
                    .call(self)
                    .map_err(|err| ResolveErrorKind::Instantiator {
                        name: name.to_owned(),
                        source: err,
                    })
            }
        }
    }

    /// Logs `err` unless it's returned to a factory, which propagates it to the outermost resolution.
    fn report(&self, err: ResolveErrorKind) -> ResolveErrorKind {
        if self.depth == 0 {
            error!("{}", err);
        }
        err
    }
}

fn downcast<T: Send + Sync + 'static>(name: &str, object: AnyObject) -> Result<Arc<T>, ResolveErrorKind> {
    object.downcast::<T>().map_err(|_| ResolveErrorKind::IncorrectType {
        name: String::from(name),
        expected: type_name::<T>(),
    })
}
