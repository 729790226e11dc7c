//! Process execution adapters.

mod system;

pub use system::SystemCommandRunner;
