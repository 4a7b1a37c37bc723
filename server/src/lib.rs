/// Authoritative per-room game state behind a lazily populated room store
pub mod room_manager;
/// Per-connection session loop speaking the wire protocol
pub mod session;
