use alloc::sync::Arc;
use core::fmt::{self, Debug, Formatter};
use parking_lot::Mutex;

use crate::any::AnyObject;

#[derive(Clone, Default)]
enum SingletonState {
    #[default]
    Unresolved,
    Resolved(AnyObject),
}

/// Memoizing cell holding the object of a singleton-scoped name.
///
/// Clones share the same cell, so a holder exported to another container
/// keeps returning the same object.
#[derive(Clone, Default)]
pub struct SingletonHolder {
    state: Arc<Mutex<SingletonState>>,
}

impl SingletonHolder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_value(value: AnyObject) -> Self {
        Self {
            state: Arc::new(Mutex::new(SingletonState::Resolved(value))),
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<AnyObject> {
        match &*self.state.lock() {
            SingletonState::Resolved(value) => Some(value.clone()),
            SingletonState::Unresolved => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(&*self.state.lock(), SingletonState::Resolved(_))
    }

    /// Stores `value` unless the holder is already resolved, and returns the memoized object.
    pub fn get_or_insert(&self, value: AnyObject) -> AnyObject {
        let mut guard = self.state.lock();
        match &*guard {
            SingletonState::Resolved(value) => value.clone(),
            SingletonState::Unresolved => {
                *guard = SingletonState::Resolved(value.clone());
                value
            }
        }
    }

    /// Returns the memoized object, calling `init` if the holder is unresolved.
    ///
    /// The lock isn't held while `init` runs, so `init` may resolve other objects.
    /// If the holder gets resolved meanwhile, the value produced by `init` is discarded.
    ///
    /// # Errors
    /// Returns the error of `init`, leaving the holder unresolved.
    pub fn get_or_try_init<E>(&self, init: impl FnOnce() -> Result<AnyObject, E>) -> Result<AnyObject, E> {
        if let Some(value) = self.get() {
            return Ok(value);
        }
        let value = init()?;
        Ok(self.get_or_insert(value))
    }

    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl Debug for SingletonHolder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonHolder").field("resolved", &self.is_resolved()).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use core::{
        convert::Infallible,
        sync::atomic::{AtomicU8, Ordering},
    };

    use super::SingletonHolder;
    use crate::any::{into_object, AnyObject};

    #[test]
    fn test_first_value_wins() {
        let holder = SingletonHolder::new();
        assert!(holder.get().is_none());

        let first = into_object(1u8);
        let second = into_object(2u8);

        let stored = holder.get_or_insert(first.clone());
        let again = holder.get_or_insert(second);

        assert!(Arc::ptr_eq(&stored, &first));
        assert!(Arc::ptr_eq(&again, &first));
        assert!(holder.is_resolved());
    }

    #[test]
    fn test_init_called_once() {
        let call_count = AtomicU8::new(0);
        let holder = SingletonHolder::new();
        let init = || {
            call_count.fetch_add(1, Ordering::SeqCst);
            Ok::<AnyObject, Infallible>(into_object(call_count.load(Ordering::SeqCst)))
        };

        let value_1 = holder.get_or_try_init(init).unwrap();
        let value_2 = holder.get_or_try_init(init).unwrap();

        assert!(Arc::ptr_eq(&value_1, &value_2));
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert_eq!(*value_1.downcast::<u8>().unwrap(), 1);
    }

    #[test]
    fn test_failed_init_keeps_unresolved() {
        let holder = SingletonHolder::new();

        assert!(holder.get_or_try_init(|| Err("failed")).is_err());
        assert!(!holder.is_resolved());
        assert!(holder.get_or_try_init(|| Ok::<_, &str>(into_object(()))).is_ok());
    }

    #[test]
    fn test_clones_share_state() {
        let holder = SingletonHolder::new();
        let shared = holder.clone();

        shared.get_or_insert(into_object(1u8));

        assert!(holder.ptr_eq(&shared));
        assert!(holder.is_resolved());
        assert!(!holder.ptr_eq(&SingletonHolder::with_value(into_object(1u8))));
    }
}
