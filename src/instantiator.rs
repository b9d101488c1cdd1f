use alloc::boxed::Box;
use tracing::debug;

use crate::{
    any::{into_object, AnyObject},
    builder::Builder,
    errors::InstantiateErrorKind,
};

/// Produces an object, resolving whatever it needs through the builder.
///
/// Implemented for every `FnMut(&mut Builder) -> Result<T, E>` closure, and
/// can be implemented by types which carry their own definition.
pub trait Instantiator: Clone + Send + Sync + 'static {
    type Provides: Send + Sync + 'static;
    type Error: Into<InstantiateErrorKind>;

    fn instantiate(&mut self, builder: &mut Builder) -> Result<Self::Provides, Self::Error>;
}

impl<F, Response, Err> Instantiator for F
where
    F: FnMut(&mut Builder) -> Result<Response, Err> + Clone + Send + Sync + 'static,
    Response: Send + Sync + 'static,
    Err: Into<InstantiateErrorKind>,
{
    type Provides = Response;
    type Error = Err;

    #[inline]
    fn instantiate(&mut self, builder: &mut Builder) -> Result<Self::Provides, Self::Error> {
        self(builder)
    }
}

pub(crate) trait CloneInstantiator: Send + Sync {
    fn call(&mut self, builder: &mut Builder) -> Result<AnyObject, InstantiateErrorKind>;

    #[must_use]
    fn clone_box(&self) -> Box<dyn CloneInstantiator>;
}

#[derive(Clone)]
struct ErasedInstantiator<Inst>(Inst);

impl<Inst: Instantiator> CloneInstantiator for ErasedInstantiator<Inst> {
    #[inline]
    fn call(&mut self, builder: &mut Builder) -> Result<AnyObject, InstantiateErrorKind> {
        let dependency = self.0.instantiate(builder).map_err(Into::into)?;

        debug!("Instantiated");

        Ok(into_object(dependency))
    }

    #[inline]
    fn clone_box(&self) -> Box<dyn CloneInstantiator> {
        Box::new(self.clone())
    }
}

/// Type-erased instantiator stored in a [`crate::Recipe`].
pub struct BoxedCloneInstantiator(Box<dyn CloneInstantiator>);

impl BoxedCloneInstantiator {
    #[inline]
    pub(crate) fn call(&mut self, builder: &mut Builder) -> Result<AnyObject, InstantiateErrorKind> {
        self.0.call(builder)
    }
}

impl Clone for BoxedCloneInstantiator {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

#[must_use]
pub(crate) fn boxed_instantiator<Inst: Instantiator>(instantiator: Inst) -> BoxedCloneInstantiator {
    BoxedCloneInstantiator(Box::new(ErasedInstantiator(instantiator)))
}
