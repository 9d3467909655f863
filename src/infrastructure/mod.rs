// Infrastructure module - background services and utilities
pub mod backoff;
pub mod endpoint;
pub mod task_manager;

pub use backoff::Backoff;
pub use endpoint::{event_stream_endpoint, socket_endpoint};
pub use task_manager::TaskManager;
