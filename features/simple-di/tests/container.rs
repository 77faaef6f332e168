use std::{fmt, sync::Arc, thread};

use simple_di::{
    BindError, Construct, ConstructorError, DiContainer, DynError, Lazy, ResolveError, TypeInfo,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Default)]
struct TestClassA {
    message: String,
}
impl Construct for TestClassA {
    type Dependencies = ();

    fn construct(_: Self::Dependencies) -> Result<Self, DynError> {
        Ok(TestClassA::default())
    }
}

struct TestClassB {
    dependency: Arc<TestClassA>,
}
impl Construct for TestClassB {
    type Dependencies = (Arc<TestClassA>,);

    fn construct((dependency,): Self::Dependencies) -> Result<Self, DynError> {
        Ok(TestClassB { dependency })
    }
}

#[derive(Debug)]
struct CycleX {
    _y: Arc<CycleY>,
}
impl Construct for CycleX {
    type Dependencies = (Arc<CycleY>,);

    fn construct((y,): Self::Dependencies) -> Result<Self, DynError> {
        Ok(CycleX { _y: y })
    }
}

#[derive(Debug)]
struct CycleY {
    _x: Arc<CycleX>,
}
impl Construct for CycleY {
    type Dependencies = (Arc<CycleX>,);

    fn construct((x,): Self::Dependencies) -> Result<Self, DynError> {
        Ok(CycleY { _x: x })
    }
}

struct SelfReferencing {
    me: Lazy<SelfReferencing>,
    dependency: Arc<TestClassA>,
}
impl Construct for SelfReferencing {
    type Dependencies = (Lazy<SelfReferencing>, Arc<TestClassA>);

    fn construct((me, dependency): Self::Dependencies) -> Result<Self, DynError> {
        Ok(SelfReferencing { me, dependency })
    }
}

#[derive(Debug)]
struct BrokenConfig;
impl fmt::Display for BrokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("broken config")
    }
}
impl std::error::Error for BrokenConfig {}

#[derive(Debug)]
struct Failing;
impl Construct for Failing {
    type Dependencies = ();

    fn construct(_: Self::Dependencies) -> Result<Self, DynError> {
        Err(Box::new(BrokenConfig))
    }
}

#[derive(Debug)]
struct DependsOnFailing {
    _failing: Arc<Failing>,
}
impl Construct for DependsOnFailing {
    type Dependencies = (Arc<Failing>,);

    fn construct((failing,): Self::Dependencies) -> Result<Self, DynError> {
        Ok(DependsOnFailing { _failing: failing })
    }
}

fn container() -> DiContainer {
    init_tracing();
    let container = DiContainer::new();
    container
        .register::<TestClassA>()
        .register::<TestClassB>()
        .register::<CycleX>()
        .register::<CycleY>()
        .register::<SelfReferencing>()
        .register::<Failing>()
        .register::<DependsOnFailing>();
    container
}

#[test]
fn bind_existing_singleton_fails() {
    let container = container();
    container
        .bind(TestClassA {
            message: "Hello world!".to_string(),
        })
        .unwrap();

    let err = container
        .bind(TestClassA {
            message: "Hello again!".to_string(),
        })
        .unwrap_err();
    assert_eq!(err, BindError::Duplicate(TypeInfo::of::<TestClassA>()));

    assert_eq!(
        container.resolve::<TestClassA>().unwrap().message,
        "Hello world!"
    );
}

#[test]
fn resolve_without_binding_returns_new_instance() {
    let container = container();

    let a = container.resolve::<TestClassA>().unwrap();
    assert_eq!(a.message, "");
    assert!(container.contains::<TestClassA>());
}

#[test]
fn resolve_returns_bound_singleton() {
    let container = container();
    let bound = container
        .bind(TestClassA {
            message: "Hello world!".to_string(),
        })
        .unwrap();

    let first = container.resolve::<TestClassA>().unwrap();
    let second = container.resolve::<TestClassA>().unwrap();
    assert!(Arc::ptr_eq(&bound, &first));
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn bind_shared_keeps_identity() {
    let container = container();
    let shared = Arc::new(TestClassA {
        message: "shared".to_string(),
    });

    container.bind_shared(shared.clone()).unwrap();
    assert!(Arc::ptr_eq(&shared, &container.resolve::<TestClassA>().unwrap()));
}

#[test]
fn resolve_injects_bound_dependency() {
    let container = container();
    let a = container
        .bind(TestClassA {
            message: "hi".to_string(),
        })
        .unwrap();

    let b = container.resolve::<TestClassB>().unwrap();
    assert!(Arc::ptr_eq(&a, &b.dependency));
    assert_eq!(b.dependency.message, "hi");
}

#[test]
fn resolve_constructs_missing_dependencies_once() {
    let container = container();

    let b = container.resolve::<TestClassB>().unwrap();
    let a = container.resolve::<TestClassA>().unwrap();
    assert!(Arc::ptr_eq(&a, &b.dependency));
    assert!(Arc::ptr_eq(&b, &container.resolve::<TestClassB>().unwrap()));
}

#[test]
fn circular_dependency_fails_and_caches_nothing() {
    let container = container();

    let err = container.resolve::<CycleX>().unwrap_err();
    assert!(matches!(
        err,
        ResolveError::CircularDependency { requested, .. } if requested == TypeInfo::of::<CycleX>()
    ));
    assert!(!container.contains::<CycleX>());
    assert!(!container.contains::<CycleY>());
}

#[test]
fn circular_dependency_names_the_chain() {
    let container = container();

    let err = container.resolve::<CycleX>().unwrap_err();
    let x = TypeInfo::of::<CycleX>().type_name;
    let y = TypeInfo::of::<CycleY>().type_name;
    assert_eq!(
        err.to_string(),
        format!("Circular dependency detected for '{x}' through {x} -> {y} -> {x}")
    );
}

#[test]
fn self_reference_resolves_to_the_same_instance() {
    let container = container();

    let resolved = container.resolve::<SelfReferencing>().unwrap();
    assert!(!resolved.me.is_evaluated());

    assert!(Arc::ptr_eq(resolved.me.get(), &resolved));
    assert!(Arc::ptr_eq(
        resolved.me.get(),
        &container.resolve::<SelfReferencing>().unwrap()
    ));
    assert!(Arc::ptr_eq(
        &resolved.dependency,
        &container.resolve::<TestClassA>().unwrap()
    ));
}

#[test]
fn self_reference_touched_during_construction_is_a_cycle() {
    #[derive(Debug)]
    struct Eager;
    impl Construct for Eager {
        type Dependencies = (Lazy<Eager>,);

        fn construct((me,): Self::Dependencies) -> Result<Self, DynError> {
            me.try_get()?;
            Ok(Eager)
        }
    }

    let container = container();
    container.register::<Eager>();

    let err = container.resolve::<Eager>().unwrap_err();
    let ResolveError::ConstructionFailed { product, error } = err else {
        panic!("expected a failed construction");
    };
    assert_eq!(product, TypeInfo::of::<Eager>());
    assert!(matches!(
        error.downcast_ref::<ResolveError>(),
        Some(ResolveError::CircularDependency { .. })
    ));
    assert!(!container.contains::<Eager>());
}

#[test]
fn resolve_after_failure_succeeds() {
    let container = container();

    assert!(container.resolve::<CycleX>().is_err());
    assert!(container.resolve::<DependsOnFailing>().is_err());

    let b = container.resolve::<TestClassB>().unwrap();
    assert!(Arc::ptr_eq(
        &b.dependency,
        &container.resolve::<TestClassA>().unwrap()
    ));
}

#[test]
fn constructor_error_propagates_unchanged() {
    let container = container();

    let err = container.resolve::<DependsOnFailing>().unwrap_err();
    let ResolveError::ConstructionFailed { product, error } = err else {
        panic!("expected a failed construction");
    };
    assert_eq!(product, TypeInfo::of::<Failing>());
    assert!(error.downcast_ref::<BrokenConfig>().is_some());
    assert!(!container.contains::<DependsOnFailing>());
}

#[test]
fn unregistered_type_is_missing_a_constructor() {
    let container = container();

    let err = container.resolve::<String>().unwrap_err();
    assert!(matches!(
        err,
        ResolveError::Constructor(ConstructorError::Missing(info)) if info == TypeInfo::of::<String>()
    ));
}

#[test]
fn concurrent_resolution_yields_one_instance() {
    struct Counted;
    impl Construct for Counted {
        type Dependencies = (Arc<TestClassA>,);

        fn construct(_: Self::Dependencies) -> Result<Self, DynError> {
            Ok(Counted)
        }
    }

    let container = container();
    container.register::<Counted>();

    let resolved: Vec<Arc<Counted>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| container.resolve::<Counted>().unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let cached = container.resolve::<Counted>().unwrap();
    for instance in &resolved {
        assert!(Arc::ptr_eq(instance, &cached));
    }
}

#[test]
fn global_container_is_shared() {
    struct GlobalOnly(u32);

    assert!(std::ptr::eq(DiContainer::global(), DiContainer::global()));

    let bound = DiContainer::global().bind(GlobalOnly(7)).unwrap();
    let resolved = DiContainer::global().resolve::<GlobalOnly>().unwrap();
    assert!(Arc::ptr_eq(&bound, &resolved));
    assert_eq!(resolved.0, 7);

    // Independent containers don't see it
    assert!(!container().contains::<GlobalOnly>());
}
