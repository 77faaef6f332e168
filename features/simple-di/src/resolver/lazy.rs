use std::{
    fmt::Debug,
    ops::Deref,
    sync::{Arc, OnceLock, Weak},
};

use crate::{
    container::{DiContainer, DiContainerInner},
    errors::ResolveError,
    resolver::{downcast, Resolved, Resolver},
    types::{Injectable, Instance, TypeInfo},
};

/// Deferred resolution of a type, handed out for a self referencing constructor parameter
///
/// Creating it does nothing. [Deferred::resolve] asks the container for the type, by which
/// point the construction that created this handle is expected to have finished.
pub struct Deferred {
    container: Weak<DiContainerInner>,
    info: TypeInfo,
}
impl Deferred {
    pub(crate) fn new(container: Weak<DiContainerInner>, info: TypeInfo) -> Self {
        Deferred { container, info }
    }

    pub fn info(&self) -> TypeInfo {
        self.info
    }

    /// Resolves the deferred type through the container
    pub fn resolve(&self) -> Result<Instance, ResolveError> {
        let inner = self
            .container
            .upgrade()
            .ok_or(ResolveError::ContainerDropped(self.info))?;

        DiContainer::from_inner(inner).resolve_instance(self.info)
    }
}

/// Lazily resolved dependency
///
/// Required for a constructor parameter of the constructed type itself. The value is
/// resolved on first access and memoized, clones share the memo.
///
/// ### Panics
///
/// [Lazy::get] and [Deref] panic if the dependency can not be resolved, which happens when:
/// - It is accessed while its own construction is still running
/// - It is accessed after the container was dropped
///
/// Use [Lazy::try_get] to handle these cases.
pub struct Lazy<T: Injectable>(Arc<LazyInner<T>>);
struct LazyInner<T: Injectable> {
    once: OnceLock<Arc<T>>,
    /// None if the value was available on creation
    deferred: Option<Deferred>,
}
impl<T: Injectable> Clone for Lazy<T> {
    fn clone(&self) -> Self {
        Lazy(self.0.clone())
    }
}
impl<T: Injectable + Debug> Debug for Lazy<T> {
    // Never forces evaluation
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.once.get() {
            Some(value) => f.debug_tuple("Lazy").field(value).finish(),
            None => f.debug_tuple("Lazy").field(&"<unevaluated>").finish(),
        }
    }
}
impl<T: Injectable> Deref for Lazy<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Self::Target {
        self.get()
    }
}
impl<T: Injectable> Resolver for Lazy<T> {
    fn dependency() -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn from_resolved(resolved: Resolved) -> Result<Self, ResolveError> {
        let inner = match resolved {
            Resolved::Ready(instance) => LazyInner {
                once: OnceLock::from(downcast::<T>(&instance)?),
                deferred: None,
            },
            Resolved::Deferred(deferred) => LazyInner {
                once: OnceLock::new(),
                deferred: Some(deferred),
            },
        };

        Ok(Lazy(Arc::new(inner)))
    }
}
impl<T: Injectable> Lazy<T> {
    /// Accesses the Lazy Dependency
    ///
    /// # Panics
    /// - When the dependency can not be resolved, see [Lazy::try_get]
    pub fn get(&self) -> &Arc<T> {
        match self.try_get() {
            Ok(value) => value,
            Err(e) => panic!("Lazy dependency could not be resolved: {e}"),
        }
    }

    /// Try to access the lazy dependency, resolving it on first access
    ///
    /// Errors are not memoized, a later access resolves again.
    pub fn try_get(&self) -> Result<&Arc<T>, ResolveError> {
        if let Some(value) = self.0.once.get() {
            return Ok(value);
        }

        let deferred = self
            .0
            .deferred
            .as_ref()
            .expect("a lazy without a deferred source is created evaluated");

        let value = downcast::<T>(&deferred.resolve()?)?;

        // Another clone may have won the race - both hold the same singleton
        Ok(self.0.once.get_or_init(|| value))
    }

    /// Whether the dependency was already resolved
    pub fn is_evaluated(&self) -> bool {
        self.0.once.get().is_some()
    }
}
