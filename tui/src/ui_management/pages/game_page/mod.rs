mod components;
#[allow(clippy::module_inception)]
mod game_page;
mod usage;

pub use game_page::GamePage;
