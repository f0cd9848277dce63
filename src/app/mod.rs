pub mod runner;
pub mod shutdown;

pub use runner::{HeadlessRunner, StopReason};
pub use shutdown::ShutdownManager;
