/// Commands a client may send to the server
pub mod command;
/// Events the server answers and broadcasts with; Reply events go to one
/// session, Broadcast events to a whole room
pub mod event;
/// Pure board state and rules, shared by the server for validation and by clients for rendering
pub mod game;
/// Newline-delimited JSON transport over TCP; the 'server' and 'client'
/// features select which half is compiled and pull in tokio
pub mod transport;
