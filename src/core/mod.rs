pub mod lifecycle;
pub mod registry;
pub mod report;
pub mod username;

pub use lifecycle::SessionLifecycle;
pub use registry::RegistryLogic;
pub use report::ReportAggregator;
