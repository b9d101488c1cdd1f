/// Creates a [`crate::Container`] populated with the listed objects.
///
/// Each entry is `name => kind(expr)`, where `kind` is one of:
/// - `value`: a literal with prototype scope
/// - `shared`: an `Arc` created outside the container, with prototype scope
/// - `prototype`: a factory called on every resolution
/// - `singleton`: a factory called once, on the first resolution
///
/// Evaluates to `Result<Container, NameErrorKind>`.
///
/// # Examples
/// ```rust
/// use dibuilder::{container, Builder, InstantiateErrorKind};
///
/// struct Title(&'static str);
/// struct Page(std::sync::Arc<Title>);
///
/// let container = container! {
///     "Title" => value(Title("Main Page")),
///     "Page" => singleton(|builder| Ok::<_, InstantiateErrorKind>(Page(builder.build("Title")?))),
/// }
/// .unwrap();
///
/// let mut builder = Builder::with_container(container);
/// let page = builder.build::<Page>("Page").unwrap();
///
/// assert_eq!(page.0 .0, "Main Page");
/// ```
#[macro_export]
macro_rules! container {
    (@provide $container:ident, $name:expr, value($value:expr)) => {
        $container.provide($name, $crate::Signature::value($value), $crate::Scope::Prototype)
    };
    (@provide $container:ident, $name:expr, shared($value:expr)) => {
        $container.provide($name, $crate::Signature::shared($value), $crate::Scope::Prototype)
    };
    (@provide $container:ident, $name:expr, prototype($factory:expr)) => {
        $container.provide($name, $crate::Signature::factory($factory), $crate::Scope::Prototype)
    };
    (@provide $container:ident, $name:expr, singleton($factory:expr)) => {
        $container.provide($name, $crate::Signature::factory($factory), $crate::Scope::Singleton)
    };
    (
        $( $name:literal => $kind:ident ( $value:expr ) ),* $(,)?
    ) => {{
        let provide = || -> ::core::result::Result<$crate::Container, $crate::NameErrorKind> {
            let container = $crate::Container::new();
            $(
                let container = $crate::container!(@provide container, $name, $kind($value))?;
            )*
            ::core::result::Result::Ok(container)
        };
        provide()
    }};
}

/// Generates a trait with one typed accessor per registered name and implements it for
/// [`crate::Builder`].
///
/// Every accessor takes the arguments of the resolution, anything convertible into
/// [`crate::Arguments`] (`()` for none), and is equivalent to [`crate::Builder::new_object`].
///
/// # Examples
/// ```rust
/// use dibuilder::{accessors, container, Builder, InstantiateErrorKind};
///
/// struct Title(&'static str);
/// struct Page(std::sync::Arc<Title>);
///
/// accessors! {
///     pub trait Pages {
///         fn page("Page") -> Page;
///     }
/// }
///
/// let container = container! {
///     "Page" => prototype(|builder| Ok::<_, InstantiateErrorKind>(Page(builder.get_typed_argument()?))),
/// }
/// .unwrap();
///
/// let mut builder = Builder::with_container(container);
/// let page = builder.page((Title("Main Page"),)).unwrap();
///
/// assert_eq!(page.0 .0, "Main Page");
/// ```
#[macro_export]
macro_rules! accessors {
    (
        $(#[$meta:meta])*
        $vis:vis trait $trait:ident {
            $( fn $method:ident ( $name:literal ) -> $ty:ty ; )*
        }
    ) => {
        $(#[$meta])*
        $vis trait $trait {
            $(
                #[doc = concat!("Resolves `", $name, "`.")]
                fn $method(
                    &mut self,
                    arguments: impl ::core::convert::Into<$crate::Arguments>,
                ) -> ::core::result::Result<$crate::__private::Arc<$ty>, $crate::ResolveErrorKind>;
            )*
        }

        impl $trait for $crate::Builder {
            $(
                #[inline]
                fn $method(
                    &mut self,
                    arguments: impl ::core::convert::Into<$crate::Arguments>,
                ) -> ::core::result::Result<$crate::__private::Arc<$ty>, $crate::ResolveErrorKind> {
                    self.new_object::<$ty>($name, arguments)
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    extern crate std;

    use crate::{Builder, ContainerExt as _, DependencyContainer as _, InstantiateErrorKind, NameErrorKind, Scope};

    use alloc::{
        format,
        string::{String, ToString as _},
        sync::Arc,
    };
    use core::sync::atomic::{AtomicU8, Ordering};
    use tracing_test::traced_test;

    struct Title(&'static str);
    struct Page(Arc<Title>);

    accessors! {
        /// Accessors used by tests.
        trait Objects {
            fn title("Title") -> Title;
            fn page("Page") -> Page;
        }
    }

    #[test]
    #[traced_test]
    fn test_container_macro() {
        let call_count = Arc::new(AtomicU8::new(0));

        let container = container! {
            "Title" => value(Title("Main Page")),
            "Page" => singleton({
                let call_count = call_count.clone();
                move |builder| {
                    call_count.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, InstantiateErrorKind>(Page(builder.build("Title")?))
                }
            }),
            "Revision" => prototype(|_| Ok::<_, InstantiateErrorKind>(5u32)),
            "Shared" => shared(Arc::new(1u8)),
        }
        .unwrap();

        assert_eq!(container.recipe("Page").map(|recipe| recipe.scope), Some(Scope::Singleton));

        let mut builder = Builder::with_container(container);

        let page_1 = builder.build::<Page>("Page").unwrap();
        let page_2 = builder.build::<Page>("Page").unwrap();

        assert!(Arc::ptr_eq(&page_1, &page_2));
        assert_eq!(page_1.0 .0, "Main Page");
        assert_eq!(*builder.build::<u32>("Revision").unwrap(), 5);
        assert_eq!(*builder.build::<u8>("Shared").unwrap(), 1);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    #[traced_test]
    fn test_container_macro_rejects_reserved_names() {
        let container = container! {
            "Title" => value(()),
            "arg_Title" => value(()),
        };

        assert!(matches!(container, Err(NameErrorKind::Reserved { .. })));
        assert!(container! {}.unwrap().is_empty());
    }

    #[test]
    #[traced_test]
    fn test_accessors() {
        let mut builder = Builder::new();
        builder
            .container_mut()
            .register_value("Title", Title("Help"))
            .unwrap()
            .register_factory("Page", Scope::Prototype, |builder| {
                Ok::<_, InstantiateErrorKind>(Page(builder.get_typed_argument::<Title>()?))
            })
            .unwrap();

        let page = builder.page((Title("Main Page"),)).unwrap();
        let title = builder.title(()).unwrap();

        assert_eq!(page.0 .0, "Main Page");
        assert_eq!(title.0, "Help");
        assert!(builder.page(()).is_ok());
    }
}
