use std::sync::Arc;

use simple_di::{Construct, DiContainer, DynError, Lazy};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let container = DiContainer::global();
    container
        .bind(Greeting {
            message: "hi".to_string(),
        })
        .unwrap();
    container.register::<Greeter>();

    let greeter = container.resolve::<Greeter>().unwrap();
    println!("{:?}", container);
    println!("{}", greeter.greeting.message);
    println!("{}", Arc::ptr_eq(greeter.this.get(), &greeter));
}

#[derive(Debug)]
struct Greeting {
    message: String,
}

struct Greeter {
    greeting: Arc<Greeting>,
    this: Lazy<Greeter>,
}
impl Construct for Greeter {
    type Dependencies = (Arc<Greeting>, Lazy<Greeter>);

    fn construct((greeting, this): Self::Dependencies) -> Result<Self, DynError> {
        Ok(Greeter { greeting, this })
    }
}
