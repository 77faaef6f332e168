use std::sync::Arc;

use crate::{
    errors::ResolveError,
    resolver::{Resolved, Resolver},
    types::{Injectable, TypeInfo},
};

impl<T: Injectable> Resolver for Arc<T> {
    fn dependency() -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn from_resolved(resolved: Resolved) -> Result<Self, ResolveError> {
        resolved.into_ready()
    }
}
