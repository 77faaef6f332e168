use std::{
    any::{Any, TypeId},
    sync::Arc,
};

/// Error a [crate::Construct] implementation may fail with
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Bound for anything the container can hold
///
/// Singletons live as long as their container and [crate::DiContainer::global] is reachable
/// from every thread.
pub trait Injectable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Injectable for T {}

/// A cached singleton with its type erased
///
/// Clones point at the same allocation, which is what identity checks compare.
#[derive(Clone)]
pub struct Instance {
    pub info: TypeInfo,
    pub instance: Arc<dyn Any + Send + Sync + 'static>,
}

impl Instance {
    pub(crate) fn new<T: Injectable>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    pub(crate) fn from_arc<T: Injectable>(shared: Arc<T>) -> Self {
        Instance {
            info: TypeInfo::of::<T>(),
            instance: shared,
        }
    }

    /// Recovers the typed singleton, or the name of the stored type if `T` does not match
    pub fn downcast<T: Injectable>(&self) -> Result<Arc<T>, &'static str> {
        Arc::downcast::<T>(self.instance.clone()).map_err(|_| self.info.type_name)
    }
}

/// Identifies a type for binding and resolution
///
/// Keys the singleton cache and the constructor table, and makes up resolution chains.
/// Displays as the type name.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct TypeInfo {
    pub type_name: &'static str,
    pub type_id: TypeId,
}
impl std::fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
impl TypeInfo {
    pub fn of<T: 'static + ?Sized>() -> TypeInfo {
        TypeInfo {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }
}
