use serde::{Deserialize, Serialize};

/// One of the two marks a player can place on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// Returns the symbol of the other player.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

/// A single cell of the board.
/// Serializes as `""`, `"X"` or `"O"` to stay readable on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[serde(rename = "")]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The symbol occupying this cell, if any.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Symbol::X),
            Cell::O => Some(Symbol::O),
        }
    }
}

impl From<Symbol> for Cell {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Cell::X,
            Symbol::O => Cell::O,
        }
    }
}

/// The 8 lines that can decide a game: 3 rows, 3 columns, 2 diagonals.
/// [Board::winner] scans them in exactly this order, so which line is
/// reported for a multi-line board is deterministic.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A completed winning line: the symbol that made it and the cells forming it.
///
/// Carrying the line alongside the symbol keeps "no winner yet" structurally
/// distinct from any symbol value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Win {
    pub symbol: Symbol,
    pub line: [usize; 3],
}

/// A 3x3 board stored in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([Cell; 9]);

impl Board {
    pub const SIZE: usize = 9;

    pub fn new() -> Self {
        Board([Cell::Empty; 9])
    }

    /// The cell at `index`, or [None] when the index is out of range.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.0.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.0
    }

    /// Places `symbol` at `index`.
    ///
    /// Returns false and leaves the board untouched when the index is out of
    /// range or the cell is already taken. Callers that need to distinguish
    /// the two failure reasons must check them before calling; this function
    /// never silently corrects its input.
    pub fn place(&mut self, index: usize, symbol: Symbol) -> bool {
        match self.0.get(index) {
            Some(Cell::Empty) => {
                self.0[index] = symbol.into();
                true
            }
            _ => false,
        }
    }

    /// Scans [WINNING_LINES] in their fixed order and returns the first line
    /// that is uniformly marked by one symbol.
    pub fn winner(&self) -> Option<Win> {
        for line in WINNING_LINES {
            let [a, b, c] = line;
            if let Some(symbol) = self.0[a].symbol() {
                if self.0[a] == self.0[b] && self.0[b] == self.0[c] {
                    return Some(Win { symbol, line });
                }
            }
        }

        None
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|cell| !cell.is_empty())
    }

    /// True when the game ended without a winner: every cell is taken and no
    /// line is complete.
    pub fn is_draw(&self) -> bool {
        self.winner().is_none() && self.is_full()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // plays the given symbols onto a fresh board, panicking on illegal input
    fn board_of(moves: &[(usize, Symbol)]) -> Board {
        let mut board = Board::new();
        for &(index, symbol) in moves {
            assert!(board.place(index, symbol), "illegal setup move at {index}");
        }
        board
    }

    #[test]
    fn place_fills_an_empty_cell() {
        let mut board = Board::new();

        assert!(board.place(4, Symbol::X));
        assert_eq!(board.cell(4), Some(Cell::X));
    }

    #[test]
    fn place_refuses_taken_cells_and_bad_indices() {
        let mut board = board_of(&[(4, Symbol::X)]);
        let before = board;

        assert!(!board.place(4, Symbol::O));
        assert!(!board.place(9, Symbol::O));
        assert_eq!(board, before);
    }

    #[test]
    fn winner_is_none_for_empty_and_undecided_boards() {
        assert_eq!(Board::new().winner(), None);

        let board = board_of(&[(0, Symbol::X), (4, Symbol::O), (8, Symbol::X)]);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn winner_detects_rows_columns_and_diagonals() {
        let row = board_of(&[
            (3, Symbol::O),
            (4, Symbol::O),
            (5, Symbol::O),
            (0, Symbol::X),
            (8, Symbol::X),
        ]);
        assert_eq!(
            row.winner(),
            Some(Win {
                symbol: Symbol::O,
                line: [3, 4, 5]
            })
        );

        let column = board_of(&[(2, Symbol::X), (5, Symbol::X), (8, Symbol::X)]);
        assert_eq!(
            column.winner(),
            Some(Win {
                symbol: Symbol::X,
                line: [2, 5, 8]
            })
        );

        let diagonal = board_of(&[(2, Symbol::O), (4, Symbol::O), (6, Symbol::O)]);
        assert_eq!(
            diagonal.winner(),
            Some(Win {
                symbol: Symbol::O,
                line: [2, 4, 6]
            })
        );
    }

    #[test]
    fn winner_reports_the_first_line_in_scan_order() {
        // Two complete X rows cannot arise from alternating play, but the
        // scan order still has to make the reported line deterministic.
        let board = board_of(&[
            (0, Symbol::X),
            (1, Symbol::X),
            (2, Symbol::X),
            (6, Symbol::X),
            (7, Symbol::X),
            (8, Symbol::X),
        ]);

        assert_eq!(board.winner().map(|win| win.line), Some([0, 1, 2]));
    }

    #[test]
    fn full_board_without_a_line_is_a_draw() {
        // X O X / O O X / X X O
        let board = board_of(&[
            (0, Symbol::X),
            (1, Symbol::O),
            (2, Symbol::X),
            (3, Symbol::O),
            (5, Symbol::X),
            (4, Symbol::O),
            (6, Symbol::X),
            (8, Symbol::O),
            (7, Symbol::X),
        ]);

        assert_eq!(board.winner(), None);
        assert!(board.is_full());
        assert!(board.is_draw());
    }

    #[test]
    fn a_won_board_is_not_a_draw_even_when_full() {
        let board = board_of(&[
            (0, Symbol::X),
            (1, Symbol::O),
            (2, Symbol::X),
            (3, Symbol::O),
            (4, Symbol::X),
            (6, Symbol::O),
            (7, Symbol::X),
            (5, Symbol::O),
            (8, Symbol::X),
        ]);

        assert!(board.is_full());
        assert_eq!(
            board.winner(),
            Some(Win {
                symbol: Symbol::X,
                line: [0, 4, 8]
            })
        );
        assert!(!board.is_draw());
    }

    #[test]
    fn opponent_flips_between_the_two_symbols() {
        assert_eq!(Symbol::X.opponent(), Symbol::O);
        assert_eq!(Symbol::O.opponent(), Symbol::X);
        assert_eq!(Symbol::X.opponent().opponent(), Symbol::X);
    }
}
