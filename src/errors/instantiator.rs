use alloc::boxed::Box;

use super::dependency_resolver::ResolveErrorKind;

/// Error returned by a factory.
///
/// Resolution errors convert into it, so factories can use `?` on nested
/// [`crate::Builder`] calls.
#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error(transparent)]
    Resolve(Box<ResolveErrorKind>),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ResolveErrorKind> for InstantiateErrorKind {
    #[inline]
    fn from(err: ResolveErrorKind) -> Self {
        Self::Resolve(Box::new(err))
    }
}
