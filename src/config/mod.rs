pub mod app;
pub mod lookups;
pub mod session;

pub use app::{AppConfig, AuthStrategy, DemoCredential};
pub use lookups::{lookups, LookupOption, LookupTables};
