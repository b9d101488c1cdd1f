/// Lifecycle policy of a registered object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Scope {
    /// A new object is produced by every resolution.
    #[default]
    Prototype,
    /// The object is produced once and reused for the lifetime of the owning container.
    Singleton,
}

impl Scope {
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Scope::Prototype => "prototype",
            Scope::Singleton => "singleton",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        matches!(self, Scope::Singleton)
    }
}
