use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    prelude::{Alignment, Backend, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use comms::{
    event::LastMove,
    game::{Board, Cell, Symbol},
};

use crate::{
    state_store::{action::Action, State},
    ui_management::components::{Component, ComponentRender},
};

struct Props {
    board: Board,
    current_turn: Symbol,
    game_active: bool,
    my_symbol: Option<Symbol>,
    winning_line: Option<[usize; 3]>,
    last_move: Option<LastMove>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        match state.game.as_ref() {
            Some(game) => Props {
                board: game.board,
                current_turn: game.current_turn,
                game_active: game.game_active,
                my_symbol: state.my_symbol,
                winning_line: game.winning_indices,
                last_move: game.last_move,
            },
            // nothing arrived from the server yet, show an inert empty board
            None => Props {
                board: Board::new(),
                current_turn: Symbol::X,
                game_active: false,
                my_symbol: None,
                winning_line: None,
                last_move: None,
            },
        }
    }
}

/// BoardPanel renders the 3x3 grid and turns key presses into moves
pub struct BoardPanel {
    /// Sending actions to the state store
    action_tx: UnboundedSender<Action>,
    /// State Mapped BoardPanel Props
    props: Props,
    // Internal Component State
    /// The cell the keyboard cursor sits on
    cursor: usize,
}

impl BoardPanel {
    fn cursor_up(&mut self) {
        self.cursor = if self.cursor < 3 {
            self.cursor + 6
        } else {
            self.cursor - 3
        };
    }

    fn cursor_down(&mut self) {
        self.cursor = if self.cursor >= 6 {
            self.cursor - 6
        } else {
            self.cursor + 3
        };
    }

    fn cursor_left(&mut self) {
        self.cursor = if self.cursor % 3 == 0 {
            self.cursor + 2
        } else {
            self.cursor - 1
        };
    }

    fn cursor_right(&mut self) {
        self.cursor = if self.cursor % 3 == 2 {
            self.cursor - 2
        } else {
            self.cursor + 1
        };
    }

    /// Sends the move only when it looks legal from here; the server still
    /// has the final say
    fn try_place(&mut self, index: usize) {
        let looks_legal = self.props.game_active
            && self.props.my_symbol == Some(self.props.current_turn)
            && self
                .props
                .board
                .cell(index)
                .map(|cell| cell.is_empty())
                .unwrap_or(false);

        if looks_legal {
            let _ = self.action_tx.send(Action::PlaceMark { index });
        }
    }

    fn calculate_cell_style(&self, index: usize) -> Style {
        let is_winning_cell = self
            .props
            .winning_line
            .map(|line| line.contains(&index))
            .unwrap_or(false);
        let is_last_move = self
            .props
            .last_move
            .map(|last_move| last_move.index == index)
            .unwrap_or(false);
        let is_empty = self
            .props
            .board
            .cell(index)
            .map(|cell| cell.is_empty())
            .unwrap_or(false);

        let style = if is_winning_cell {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else if is_last_move {
            Style::default().add_modifier(Modifier::BOLD)
        } else if is_empty {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        if index == self.cursor {
            // yellow that would work for both dark / light modes
            style.bg(Color::Rgb(255, 223, 102)).fg(Color::Black)
        } else {
            style
        }
    }
}

impl Component for BoardPanel {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            props: Props::from(state),
            //
            cursor: 4,
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        Self {
            props: Props::from(state),
            ..self
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Up => self.cursor_up(),
            KeyCode::Down => self.cursor_down(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Enter | KeyCode::Char(' ') => self.try_place(self.cursor),
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '1' as usize;

                self.cursor = index;
                self.try_place(index);
            }
            _ => (),
        }
    }
}

pub struct RenderProps {
    pub border_color: Color,
    pub area: Rect,
}

impl ComponentRender<RenderProps> for BoardPanel {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps) {
        let mut lines: Vec<Line> = Vec::with_capacity(5);

        for row in 0..3 {
            if row > 0 {
                lines.push(Line::from("───┼───┼───"));
            }

            let mut spans: Vec<Span> = Vec::with_capacity(5);
            for column in 0..3 {
                if column > 0 {
                    spans.push(Span::raw("│"));
                }

                let index = row * 3 + column;
                let mark = match self.props.board.cell(index).and_then(Cell::symbol) {
                    Some(symbol) => symbol.to_string(),
                    // a digit hint showing which key places here
                    None => (index + 1).to_string(),
                };

                spans.push(Span::styled(
                    format!(" {} ", mark),
                    self.calculate_cell_style(index),
                ));
            }

            lines.push(Line::from(spans));
        }

        let board = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::new().fg(props.border_color))
                    .title("Board"),
            );
        frame.render_widget(board, props.area);
    }
}
