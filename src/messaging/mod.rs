mod router;
mod subscription;

pub use router::MessageRouter;
pub use subscription::{Binding, Handler, Subscription};
