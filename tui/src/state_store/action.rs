#[derive(Debug, Clone)]
pub enum Action {
    ConnectToServerRequest {
        addr: String,
        username: String,
        room: String,
    },
    PlaceMark {
        index: usize,
    },
    RequestReset,
    Exit,
}
