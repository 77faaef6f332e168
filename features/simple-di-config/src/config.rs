use std::{ops::Deref, sync::Arc};

use simple_di::{DynError, Resolved, ResolveError, Resolver, TypeInfo};

use crate::provider::ConfigProvider;

/// A wrapper type to allow for config injections
///
/// This provides a simple way to retrieve configs from the [ConfigProvider] bound in the
/// container, and inject them into a constructor as a dependency
///
/// # Example
/// ```rust
/// use simple_di::{Construct, DiContainer, DynError};
/// use simple_di_config::{Config, ConfigProvider};
///
/// pub struct MyModuleConfig {
///     enabled: bool,
/// }
///
/// pub struct MyModule {
///     config: Config<MyModuleConfig>,
/// }
/// impl Construct for MyModule {
///     type Dependencies = (Config<MyModuleConfig>,);
///
///     fn construct((config,): Self::Dependencies) -> Result<Self, DynError> {
///         Ok(MyModule { config })
///     }
/// }
///
/// let mut config_provider = ConfigProvider::new();
/// config_provider
///     .add_config(MyModuleConfig { enabled: true })
///     .unwrap();
///
/// let container = DiContainer::new();
/// container.bind(config_provider).unwrap();
/// container.register::<MyModule>();
///
/// assert!(container.resolve::<MyModule>().unwrap().config.enabled);
/// ```
pub struct Config<T> {
    inner: Arc<T>,
}
impl<T> Deref for Config<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl<T> Config<T> {
    pub fn inner(&self) -> Arc<T> {
        self.inner.clone()
    }

    pub fn into_inner(self) -> Arc<T> {
        self.inner
    }
}

impl<T: Send + Sync + 'static> Resolver for Config<T> {
    fn dependency() -> TypeInfo {
        TypeInfo::of::<ConfigProvider>()
    }

    fn from_resolved(resolved: Resolved) -> Result<Self, ResolveError> {
        let config_provider = resolved.into_ready::<ConfigProvider>()?;

        let config = config_provider
            .get_config::<T>()
            .map_err(|e| ResolveError::Other(Arc::new(DynError::from(e))))?;

        Ok(Config { inner: config })
    }
}
