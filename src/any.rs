use alloc::{string::String, sync::Arc};
use core::any::{type_name, Any, TypeId};

/// Shared, type-erased object stored in a container.
pub type AnyObject = Arc<dyn Any + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl TypeInfo {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// Type name with module paths stripped from every segment,
    /// e.g. `Title` for `app::page::Title` and `Vec<Title>` for `alloc::vec::Vec<app::page::Title>`.
    #[must_use]
    pub fn short_name(&self) -> String {
        let mut short_name = String::with_capacity(self.name.len());
        let mut segment_start = 0;
        let mut chars = self.name.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == ':' && chars.peek() == Some(&':') {
                chars.next();
                short_name.truncate(segment_start);
            } else {
                short_name.push(ch);
                if !(ch.is_alphanumeric() || ch == '_') {
                    segment_start = short_name.len();
                }
            }
        }
        short_name
    }
}

#[inline]
#[must_use]
pub(crate) fn into_object<T: Send + Sync + 'static>(value: T) -> AnyObject {
    Arc::new(value)
}

#[cfg(test)]
mod tests {
    use super::TypeInfo;

    use alloc::{collections::BTreeMap, string::String, sync::Arc, vec::Vec};

    mod app {
        pub struct Title;
    }

    use app::Title;

    #[test]
    fn test_short_name() {
        assert_eq!(TypeInfo::of::<Title>().short_name(), "Title");
        assert_eq!(TypeInfo::of::<u8>().short_name(), "u8");
        assert!(TypeInfo::of::<Title>().name.ends_with("::app::Title"));
    }

    #[test]
    fn test_short_name_of_generics() {
        assert_eq!(TypeInfo::of::<Vec<Title>>().short_name(), "Vec<Title>");
        assert_eq!(TypeInfo::of::<Option<Title>>().short_name(), "Option<Title>");
        assert_eq!(TypeInfo::of::<Arc<[Title]>>().short_name(), "Arc<[Title]>");
        assert_eq!(
            TypeInfo::of::<BTreeMap<String, (Title, u8)>>().short_name(),
            "BTreeMap<String, (Title, u8)>"
        );
        assert_eq!(TypeInfo::of::<&'static str>().short_name(), "&str");
    }
}
