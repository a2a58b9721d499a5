pub mod types;
pub mod event;
pub mod watched_item;
pub mod state;
pub mod policy;

pub use types::*;
pub use event::*;
pub use watched_item::*;
pub use state::*;
pub use policy::*;
