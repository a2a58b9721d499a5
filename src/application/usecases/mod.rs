pub mod check_versions;
pub mod dispatch;
pub mod run_once;

pub use check_versions::*;
pub use dispatch::*;
pub use run_once::*;
