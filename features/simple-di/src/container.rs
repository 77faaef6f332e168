use std::{
    any::TypeId,
    collections::{hash_map::Entry, HashMap},
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak},
    thread::{self, ThreadId},
};

use crate::{
    constructor::{Construct, ConstructorOf, DynConstructor},
    errors::{format_chain, BindError, ConstructorError, ResolveError},
    resolver::{downcast, Deferred, Resolved},
    types::{Injectable, Instance, TypeInfo},
};

/// The process wide default container
static GLOBAL: OnceLock<DiContainer> = OnceLock::new();

/// Container holding all singletons
///
/// Clones share the same singletons.
#[derive(Clone)]
pub struct DiContainer(Arc<DiContainerInner>);
pub struct DiContainerInner {
    state: Mutex<ContainerState>,
}

#[derive(Default)]
struct ContainerState {
    /// The singleton cache - entries are never replaced or removed
    instances: HashMap<TypeId, Instance>,
    /// Registered constructors, more than one per type is a configuration error
    constructors: HashMap<TypeId, Vec<Arc<dyn DynConstructor>>>,
    /// Types currently under construction, per resolving thread
    resolving: HashMap<ThreadId, Vec<TypeInfo>>,
}

impl Debug for DiContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        let mut map = f.debug_struct("DiContainer");
        for instance in state.instances.values() {
            map.field(instance.info.type_name, &"ready");
        }
        for constructors in state.constructors.values() {
            let Some(product) = constructors.first().map(|c| c.product()) else {
                continue;
            };
            if !state.instances.contains_key(&product.type_id) {
                map.field(product.type_name, &"registered");
            }
        }
        map.finish()
    }
}

impl Default for DiContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl DiContainer {
    pub fn new() -> Self {
        Self(Arc::new(DiContainerInner {
            state: Mutex::new(ContainerState::default()),
        }))
    }

    /// The process wide default container
    ///
    /// Created on first access and shared for the rest of the process.
    /// Prefer an owned [DiContainer] where independent state is needed, e.g. in tests.
    pub fn global() -> &'static DiContainer {
        GLOBAL.get_or_init(DiContainer::new)
    }

    pub(crate) fn from_inner(inner: Arc<DiContainerInner>) -> Self {
        Self(inner)
    }

    pub(crate) fn downgrade(&self) -> Weak<DiContainerInner> {
        Arc::downgrade(&self.0)
    }

    /// Registers the constructor of `T`
    ///
    /// Registering the same type twice makes it unresolvable, see [ConstructorError::Multiple].
    pub fn register<T: Construct>(&self) -> &Self {
        let constructor = ConstructorOf::<T>::new();
        tracing::debug!(
            "Registered constructor for {} with dependencies {:?}",
            constructor.product(),
            constructor.dependencies()
        );

        self.state()
            .constructors
            .entry(TypeId::of::<T>())
            .or_default()
            .push(constructor);
        self
    }

    /// Binds an already created instance as the singleton of `T`
    ///
    /// Returns the shared instance now held by the container.
    pub fn bind<T: Injectable>(&self, instance: T) -> Result<Arc<T>, BindError> {
        self.bind_shared(Arc::new(instance))
    }

    /// Same as [DiContainer::bind], for an instance that is already shared
    pub fn bind_shared<T: Injectable>(&self, instance: Arc<T>) -> Result<Arc<T>, BindError> {
        let info = TypeInfo::of::<T>();
        match self.state().instances.entry(info.type_id) {
            Entry::Occupied(_) => Err(BindError::Duplicate(info)),
            Entry::Vacant(slot) => {
                slot.insert(Instance::from_arc(instance.clone()));
                tracing::debug!("Bound instance of {info}");
                Ok(instance)
            }
        }
    }

    /// Returns the singleton of `T`, constructing it and its dependencies if needed
    pub fn resolve<T: Injectable>(&self) -> Result<Arc<T>, ResolveError> {
        let instance = self.resolve_instance(TypeInfo::of::<T>())?;
        downcast(&instance)
    }

    /// Returns the singleton of the given type, constructing it and its dependencies if needed
    pub fn resolve_instance(&self, info: TypeInfo) -> Result<Instance, ResolveError> {
        // Popped again on every exit path
        let _guard = self.enter(info)?;

        let cached = self.state().instances.get(&info.type_id).cloned();
        if let Some(instance) = cached {
            tracing::trace!("Resolved cached instance of {info}");
            return Ok(instance);
        }

        let constructor = self.constructor(info)?;

        let mut arguments = Vec::new();
        for dependency in constructor.dependencies() {
            if dependency == info {
                tracing::trace!("Deferring self reference of {info}");
                arguments.push(Resolved::Deferred(Deferred::new(self.downgrade(), info)));
            } else {
                arguments.push(Resolved::Ready(self.resolve_instance(dependency)?));
            }
        }

        let instance = constructor.construct(arguments)?;
        tracing::debug!("Constructed instance of {info}");

        Ok(self.store(instance))
    }

    /// Whether a singleton of `T` is held by the container
    pub fn contains<T: Injectable>(&self) -> bool {
        self.state().instances.contains_key(&TypeId::of::<T>())
    }
}

impl DiContainer {
    fn state(&self) -> MutexGuard<'_, ContainerState> {
        // Constructors never run while the lock is held, so poisoning can't leave it half written
        self.0.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pushes the type onto this thread's resolution stack
    ///
    /// Fails if the type is already under construction.
    fn enter(&self, info: TypeInfo) -> Result<ResolutionGuard<'_>, ResolveError> {
        let thread = thread::current().id();
        let mut state = self.state();
        let stack = state.resolving.entry(thread).or_default();

        if stack.contains(&info) {
            let mut chain = stack.clone();
            chain.push(info);
            tracing::error!(
                "Circular dependency detected for {info} through {}",
                format_chain(&chain)
            );
            return Err(ResolveError::CircularDependency {
                requested: info,
                chain,
            });
        }

        stack.push(info);
        Ok(ResolutionGuard {
            container: self,
            thread,
        })
    }

    fn constructor(&self, info: TypeInfo) -> Result<Arc<dyn DynConstructor>, ConstructorError> {
        match self.state().constructors.get(&info.type_id).map(Vec::as_slice) {
            Some([constructor]) => Ok(constructor.clone()),
            None | Some([]) => {
                tracing::error!("No constructor registered for {info}");
                Err(ConstructorError::Missing(info))
            }
            Some(constructors) => {
                tracing::error!(
                    "{} constructors registered for {info}, expected exactly one",
                    constructors.len()
                );
                Err(ConstructorError::Multiple {
                    product: info,
                    count: constructors.len(),
                })
            }
        }
    }

    /// Inserts a constructed instance, keeping an existing one
    fn store(&self, instance: Instance) -> Instance {
        match self.state().instances.entry(instance.info.type_id) {
            Entry::Occupied(existing) => {
                tracing::warn!(
                    "Instance of {} was created concurrently, discarding the duplicate",
                    instance.info
                );
                existing.get().clone()
            }
            Entry::Vacant(slot) => slot.insert(instance).clone(),
        }
    }
}

/// Pops its type from the resolution stack when dropped
struct ResolutionGuard<'a> {
    container: &'a DiContainer,
    thread: ThreadId,
}
impl Drop for ResolutionGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.container.state();
        if let Entry::Occupied(mut stack) = state.resolving.entry(self.thread) {
            stack.get_mut().pop();
            if stack.get().is_empty() {
                stack.remove();
            }
        }
    }
}
