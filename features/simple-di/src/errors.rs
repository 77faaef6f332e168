use std::sync::Arc;

use thiserror::Error;

use crate::types::{DynError, TypeInfo};

/// Errors when binding an existing instance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// An instance of the type is already held by the container
    #[error("A singleton instance of '{0}' already exists")]
    Duplicate(TypeInfo),
}

/// Errors when trying to resolve a certain type
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    /// The type was requested while it was still being constructed
    #[error("Circular dependency detected for '{requested}' through {}", format_chain(.chain))]
    CircularDependency {
        requested: TypeInfo,
        chain: Vec<TypeInfo>,
    },
    /// The type has no usable constructor
    #[error(transparent)]
    Constructor(#[from] ConstructorError),
    /// The constructor of the type returned an error
    #[error("Constructor of '{product}' failed - error: {error}")]
    ConstructionFailed {
        product: TypeInfo,
        error: Arc<DynError>,
    },
    /// A type depends on itself through `Arc<T>` instead of `Lazy<T>`
    #[error("'{0}' depends on itself, such a dependency must be declared as `Lazy`")]
    SelfReference(TypeInfo),
    /// A lazy dependency was accessed after its container was dropped
    #[error("Lazy '{0}' was accessed after the container was dropped")]
    ContainerDropped(TypeInfo),
    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
    /// Generic error raised by a custom resolver
    #[error("Error during resolution: {0}")]
    Other(Arc<DynError>),
}

/// A type must expose exactly one constructor to be resolvable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructorError {
    #[error("No constructor is registered for '{0}'")]
    Missing(TypeInfo),
    #[error("'{product}' has {count} registered constructors, expected exactly one")]
    Multiple { product: TypeInfo, count: usize },
}

/// Formats a resolution chain as `A -> B -> A`
pub(crate) fn format_chain(chain: &[TypeInfo]) -> String {
    chain
        .iter()
        .map(TypeInfo::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
