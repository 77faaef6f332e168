use std::any::type_name;
use std::sync::Arc;

use crate::{
    errors::ResolveError,
    types::{Injectable, Instance, TypeInfo},
};

pub mod arc;
pub mod lazy;

pub use lazy::{Deferred, Lazy};

/// A single constructor parameter
///
/// Allows custom behaviour on injection, e.g. to extract a part of a resolved instance.
pub trait Resolver: Sized {
    /// The type the container has to resolve for this parameter
    fn dependency() -> TypeInfo;

    /// Builds the parameter from what the container resolved for [Resolver::dependency]
    fn from_resolved(resolved: Resolved) -> Result<Self, ResolveError>;
}

/// What the container resolved for one constructor parameter
pub enum Resolved {
    /// The dependency was resolved to its singleton
    Ready(Instance),
    /// The dependency is the type under construction itself
    Deferred(Deferred),
}

impl Resolved {
    /// Returns the resolved singleton
    ///
    /// Fails with [ResolveError::SelfReference] for a deferred self reference.
    pub fn into_ready<T: Injectable>(self) -> Result<Arc<T>, ResolveError> {
        match self {
            Resolved::Ready(instance) => downcast(&instance),
            Resolved::Deferred(deferred) => Err(ResolveError::SelfReference(deferred.info())),
        }
    }
}

pub(crate) fn downcast<T: Injectable>(instance: &Instance) -> Result<Arc<T>, ResolveError> {
    instance
        .downcast::<T>()
        .map_err(|actual_type| ResolveError::DowncastFailed {
            required_type: type_name::<T>(),
            actual_type,
        })
}
