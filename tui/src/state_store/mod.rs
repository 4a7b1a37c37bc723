pub mod action;
mod state;
#[allow(clippy::module_inception)]
mod state_store;

pub use state::{ActivityItem, ServerConnectionStatus, State};
pub use state_store::StateStore;
