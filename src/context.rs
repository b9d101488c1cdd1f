use alloc::{string::String, sync::Arc, vec::Vec};

use crate::any::{AnyObject, TypeInfo};

/// Batch of caller-supplied values registered as arguments before a single resolution.
///
/// Keys are either explicit ([`Self::insert`]) or the short type name of the
/// value ([`Self::push`]), which [`crate::Builder::get_typed_argument`] reads back.
#[derive(Clone, Default)]
pub struct Arguments {
    pub(crate) entries: Vec<(String, AnyObject)>,
}

impl Arguments {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Adds `value` keyed by the short name of its type, e.g. `Title` or `Vec<Title>`.
    #[inline]
    #[must_use]
    pub fn push<T: Send + Sync + 'static>(self, value: T) -> Self {
        self.insert(TypeInfo::of::<T>().short_name(), value)
    }

    #[inline]
    #[must_use]
    pub fn insert<T: Send + Sync + 'static>(self, key: impl Into<String>, value: T) -> Self {
        self.insert_shared(key, Arc::new(value))
    }

    #[inline]
    #[must_use]
    pub fn insert_shared<T: Send + Sync + 'static>(mut self, key: impl Into<String>, value: Arc<T>) -> Self {
        let value: AnyObject = value;
        self.entries.push((key.into(), value));
        self
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl From<()> for Arguments {
    #[inline]
    fn from((): ()) -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> From<(T,)> for Arguments {
    #[inline]
    fn from((value,): (T,)) -> Self {
        Self::new().push(value)
    }
}

impl<T1, T2> From<(T1, T2)> for Arguments
where
    T1: Send + Sync + 'static,
    T2: Send + Sync + 'static,
{
    #[inline]
    fn from((value_1, value_2): (T1, T2)) -> Self {
        Self::new().push(value_1).push(value_2)
    }
}
