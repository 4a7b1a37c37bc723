use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    prelude::{Backend, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};

use super::{Component, ComponentRender};

/// A single-line text editor with a movable cursor.
pub struct InputBox {
    text: String,
    /// Cursor position counted in characters, not bytes
    cursor_position: usize,
}

impl InputBox {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, new_text: &str) {
        self.text = String::from(new_text);
        self.cursor_position = self.text.chars().count();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    // The byte offset of the given character position, so edits stay on
    // character boundaries even for multi-byte input
    fn byte_index_of(&self, char_position: usize) -> usize {
        self.text
            .char_indices()
            .map(|(index, _)| index)
            .nth(char_position)
            .unwrap_or(self.text.len())
    }

    fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        if self.cursor_position < self.text.chars().count() {
            self.cursor_position += 1;
        }
    }

    fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index_of(self.cursor_position);
        self.text.insert(index, new_char);

        self.move_cursor_right();
    }

    fn delete_char_before(&mut self) {
        if self.cursor_position == 0 {
            return;
        }

        let index = self.byte_index_of(self.cursor_position - 1);
        self.text.remove(index);
        self.move_cursor_left();
    }

    fn delete_char_under(&mut self) {
        if self.cursor_position >= self.text.chars().count() {
            return;
        }

        let index = self.byte_index_of(self.cursor_position);
        self.text.remove(index);
    }
}

impl Component for InputBox {
    fn new(_state: &State, _action_tx: UnboundedSender<Action>) -> Self {
        Self {
            text: String::new(),
            cursor_position: 0,
        }
    }

    fn move_with_state(self, _state: &State) -> Self
    where
        Self: Sized,
    {
        Self { ..self }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char(to_insert) => {
                self.enter_char(to_insert);
            }
            KeyCode::Backspace => {
                self.delete_char_before();
            }
            KeyCode::Delete => {
                self.delete_char_under();
            }
            KeyCode::Left => {
                self.move_cursor_left();
            }
            KeyCode::Right => {
                self.move_cursor_right();
            }
            KeyCode::Home => {
                self.cursor_position = 0;
            }
            KeyCode::End => {
                self.cursor_position = self.text.chars().count();
            }
            _ => {}
        }
    }
}

pub struct RenderProps {
    pub title: String,
    pub area: Rect,
    pub border_color: Color,
    pub show_cursor: bool,
}

impl ComponentRender<RenderProps> for InputBox {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps) {
        let input = Paragraph::new(self.text.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .fg(props.border_color)
                    .title(props.title),
            );
        frame.render_widget(input, props.area);

        // The cursor is hidden unless this input box has the focus
        if props.show_cursor {
            frame.set_cursor(
                // one column per character, shifted past the left border
                props.area.x + self.cursor_position as u16 + 1,
                // one line down, from the border to the text line
                props.area.y + 1,
            )
        }
    }
}
