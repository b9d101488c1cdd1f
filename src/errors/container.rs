use alloc::string::String;

use crate::entry::EntryKey;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameErrorKind {
    #[error("Name is empty")]
    Empty,
    #[error("Name `{name}` starts with reserved prefix `{prefix}`")]
    Reserved { name: String, prefix: &'static str },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerErrorKind {
    #[error("`{key}` not found in container")]
    NotFound { key: EntryKey },
}
