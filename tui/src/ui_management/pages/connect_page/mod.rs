#[allow(clippy::module_inception)]
mod connect_page;

pub use connect_page::ConnectPage;
