use std::{marker::PhantomData, sync::Arc};

use crate::{
    errors::ResolveError,
    resolver::{Resolved, Resolver},
    types::{DynError, Injectable, Instance, TypeInfo},
};

/// The single constructor of a type the container can build
///
/// The container resolves every entry of [Construct::Dependencies] in order and passes them
/// to [Construct::construct]. A dependency on `Self` must be declared as [crate::Lazy].
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use simple_di::{Construct, DiContainer, DynError};
///
/// struct Greeting(String);
///
/// struct Greeter {
///     greeting: Arc<Greeting>,
/// }
/// impl Construct for Greeter {
///     type Dependencies = (Arc<Greeting>,);
///
///     fn construct((greeting,): Self::Dependencies) -> Result<Self, DynError> {
///         Ok(Greeter { greeting })
///     }
/// }
///
/// let container = DiContainer::new();
/// container.bind(Greeting("hi".to_string())).unwrap();
/// container.register::<Greeter>();
///
/// let greeter = container.resolve::<Greeter>().unwrap();
/// assert_eq!(greeter.greeting.0, "hi");
/// ```
pub trait Construct: Injectable + Sized {
    /// The constructor parameters, a tuple of [Resolver]s
    type Dependencies: Dependencies;

    /// Builds the instance from its resolved dependencies
    fn construct(dependencies: Self::Dependencies) -> Result<Self, DynError>;
}

/// An ordered list of constructor parameters
pub trait Dependencies: Sized {
    /// Returns the type of every parameter, in declaration order
    fn describe() -> Vec<TypeInfo>;

    /// Rebuilds the parameters from the arguments the container resolved
    ///
    /// `arguments` holds exactly one entry per type returned by [Dependencies::describe].
    fn from_resolved(arguments: Vec<Resolved>) -> Result<Self, ResolveError>;
}

macro_rules! impl_dependencies {
    ($($dependency:ident),*) => {
        impl<$($dependency: Resolver),*> Dependencies for ($($dependency,)*) {
            fn describe() -> Vec<TypeInfo> {
                vec![$(<$dependency as Resolver>::dependency()),*]
            }

            #[allow(unused_variables, unused_mut)]
            fn from_resolved(arguments: Vec<Resolved>) -> Result<Self, ResolveError> {
                let mut arguments = arguments.into_iter();
                Ok(($(
                    <$dependency as Resolver>::from_resolved(
                        arguments
                            .next()
                            .expect("container resolves one argument per dependency"),
                    )?,
                )*))
            }
        }
    };
}

impl_dependencies!();
impl_dependencies!(A);
impl_dependencies!(A, B);
impl_dependencies!(A, B, C);
impl_dependencies!(A, B, C, D);
impl_dependencies!(A, B, C, D, E);
impl_dependencies!(A, B, C, D, E, F);
impl_dependencies!(A, B, C, D, E, F, G);
impl_dependencies!(A, B, C, D, E, F, G, H);

/// Type erased constructor descriptor, as stored in the registration table
pub(crate) trait DynConstructor: Send + Sync {
    fn product(&self) -> TypeInfo;

    /// Returns the constructor parameter types, in order
    fn dependencies(&self) -> Vec<TypeInfo>;

    /// Invokes the constructor with the resolved arguments
    fn construct(&self, arguments: Vec<Resolved>) -> Result<Instance, ResolveError>;
}

pub(crate) struct ConstructorOf<T>(PhantomData<fn() -> T>);
impl<T: Construct> ConstructorOf<T> {
    pub(crate) fn new() -> Arc<dyn DynConstructor> {
        Arc::new(ConstructorOf::<T>(PhantomData))
    }
}
impl<T: Construct> DynConstructor for ConstructorOf<T> {
    fn product(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn dependencies(&self) -> Vec<TypeInfo> {
        T::Dependencies::describe()
    }

    fn construct(&self, arguments: Vec<Resolved>) -> Result<Instance, ResolveError> {
        let dependencies = T::Dependencies::from_resolved(arguments)?;

        T::construct(dependencies)
            .map(Instance::new)
            .map_err(|error| ResolveError::ConstructionFailed {
                product: TypeInfo::of::<T>(),
                error: Arc::new(error),
            })
    }
}
