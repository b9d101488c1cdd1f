use alloc::string::String;

use super::{container::NameErrorKind, instantiator::InstantiateErrorKind};

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error(transparent)]
    InvalidName(#[from] NameErrorKind),
    #[error("`{name}` is not registered")]
    NoRecipe { name: String },
    #[error("`{key}` argument is invalid or unknown")]
    NoArgument { key: String },
    #[error("Incorrect type of `{name}`, expected: {expected}")]
    IncorrectType { name: String, expected: &'static str },
    #[error("Instantiator of `{name}` failed: {source}")]
    Instantiator { name: String, source: InstantiateErrorKind },
}
