use comms::{event::PlayerInfo, game::Symbol};

#[derive(Debug, Clone)]
struct Seat {
    session_id: String,
    username: String,
    symbol: Symbol,
}

/// [PlayerRoster] keeps track of which session holds which symbol in a room
///
/// A room seats two players at most; spectators are never listed here.
/// Seats stay in join order since that order is shown to clients.
#[derive(Debug)]
pub struct PlayerRoster {
    seats: Vec<Seat>,
}

impl PlayerRoster {
    pub fn new() -> Self {
        PlayerRoster { seats: Vec::new() }
    }

    /// Seat a session at the first free symbol, X before O
    /// Returns None when both seats are already taken
    pub fn assign_seat(&mut self, session_id: &str, username: &str) -> Option<Symbol> {
        let symbol = [Symbol::X, Symbol::O]
            .into_iter()
            .find(|symbol| !self.seats.iter().any(|seat| seat.symbol == *symbol))?;

        self.seats.push(Seat {
            session_id: String::from(session_id),
            username: String::from(username),
            symbol,
        });

        Some(symbol)
    }

    /// Free the seat held by a session, returns the username and symbol it held
    /// Does nothing and returns None for sessions without a seat
    pub fn release_seat(&mut self, session_id: &str) -> Option<(String, Symbol)> {
        let position = self
            .seats
            .iter()
            .position(|seat| seat.session_id == session_id)?;
        let seat = self.seats.remove(position);

        Some((seat.username, seat.symbol))
    }

    pub fn symbol_of(&self, session_id: &str) -> Option<Symbol> {
        self.seats
            .iter()
            .find(|seat| seat.session_id == session_id)
            .map(|seat| seat.symbol)
    }

    pub fn is_full(&self) -> bool {
        self.seats.len() == 2
    }

    /// The seats in join order, in the shape state snapshots carry them
    pub fn players(&self) -> Vec<PlayerInfo> {
        self.seats
            .iter()
            .map(|seat| PlayerInfo {
                username: seat.username.clone(),
                symbol: seat.symbol,
            })
            .collect()
    }
}
