use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, ServerConnectionStatus, State};

use crate::ui_management::components::{input_box, Component, ComponentRender, InputBox};

const DEFAULT_SERVER_ADDR: &str = "localhost:8080";
const DEFAULT_ROOM: &str = "room-1";

#[derive(Debug, Clone, PartialEq)]
enum Field {
    ServerAddr,
    Username,
    Room,
}

impl Field {
    pub const COUNT: usize = 3;

    fn to_usize(&self) -> usize {
        match self {
            Field::ServerAddr => 0,
            Field::Username => 1,
            Field::Room => 2,
        }
    }
}

impl TryFrom<usize> for Field {
    type Error = ();

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Field::ServerAddr),
            1 => Ok(Field::Username),
            2 => Ok(Field::Room),
            _ => Err(()),
        }
    }
}

struct Props {
    /// Connection error to surface under the inputs
    error_message: Option<String>,
    /// A connection attempt is in flight
    connecting: bool,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            error_message: match &state.server_connection_status {
                ServerConnectionStatus::Errored { err } => Some(err.clone()),
                _ => None,
            },
            connecting: matches!(
                state.server_connection_status,
                ServerConnectionStatus::Connecting
            ),
        }
    }
}

/// ConnectPage collects the server address and join details
pub struct ConnectPage {
    /// Action sender
    pub action_tx: UnboundedSender<Action>,
    /// State Mapped ConnectPage Props
    props: Props,
    // Internal State
    addr_input: InputBox,
    username_input: InputBox,
    room_input: InputBox,
    /// The field currently receiving typed characters
    active_field: Field,
}

impl ConnectPage {
    fn input_for_field(&self, field: &Field) -> &InputBox {
        match field {
            Field::ServerAddr => &self.addr_input,
            Field::Username => &self.username_input,
            Field::Room => &self.room_input,
        }
    }

    fn input_for_field_mut(&mut self, field: &Field) -> &mut InputBox {
        match field {
            Field::ServerAddr => &mut self.addr_input,
            Field::Username => &mut self.username_input,
            Field::Room => &mut self.room_input,
        }
    }

    fn focus_next(&mut self) {
        let idx: usize = self.active_field.to_usize();
        let next_idx = (idx + 1) % Field::COUNT;
        self.active_field = Field::try_from(next_idx).unwrap();
    }

    fn focus_previous(&mut self) {
        let idx: usize = self.active_field.to_usize();
        let previous_idx = if idx == 0 { Field::COUNT - 1 } else { idx - 1 };
        self.active_field = Field::try_from(previous_idx).unwrap();
    }

    fn calculate_border_color(&self, field: Field) -> Color {
        if self.active_field.eq(&field) {
            Color::Yellow
        } else {
            Color::Reset
        }
    }

    fn connect(&mut self) {
        // focus the first field that still needs a value instead of sending a bad request
        for idx in 0..Field::COUNT {
            let field = Field::try_from(idx).unwrap();
            if self.input_for_field(&field).is_empty() {
                self.active_field = field;
                return;
            }
        }

        let _ = self.action_tx.send(Action::ConnectToServerRequest {
            addr: String::from(self.addr_input.text()),
            username: String::from(self.username_input.text()),
            room: String::from(self.room_input.text()),
        });
    }
}

impl Component for ConnectPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        let mut addr_input = InputBox::new(state, action_tx.clone());
        addr_input.set_text(DEFAULT_SERVER_ADDR);
        let mut room_input = InputBox::new(state, action_tx.clone());
        room_input.set_text(DEFAULT_ROOM);

        ConnectPage {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            //
            addr_input,
            username_input: InputBox::new(state, action_tx),
            room_input,
            // the address and room come prefilled, the username is what is missing
            active_field: Field::Username,
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        ConnectPage {
            props: Props::from(state),
            ..self
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Enter => self.connect(),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            KeyCode::Esc => {
                let _ = self.action_tx.send(Action::Exit);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let _ = self.action_tx.send(Action::Exit);
            }
            _ => {
                let active_field = self.active_field.clone();
                self.input_for_field_mut(&active_field).handle_key_event(key);
            }
        }
    }
}

impl ComponentRender<()> for ConnectPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let [_, vertical_centered, _] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Ratio(1, 4),
                    Constraint::Min(14),
                    Constraint::Ratio(1, 4),
                ]
                .as_ref(),
            )
            .split(frame.size())
        else {
            panic!("The main layout should have 3 chunks")
        };

        let [_, both_centered, _] = *Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                [
                    Constraint::Ratio(1, 3),
                    Constraint::Min(1),
                    Constraint::Ratio(1, 3),
                ]
                .as_ref(),
            )
            .split(vertical_centered)
        else {
            panic!("The horizontal layout should have 3 chunks")
        };

        let [container_addr_input, container_username_input, container_room_input, container_help_text, container_status] =
            *Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Length(3),
                        Constraint::Length(3),
                        Constraint::Length(2),
                        Constraint::Min(1),
                    ]
                    .as_ref(),
                )
                .split(both_centered)
        else {
            panic!("The centered layout should have 5 chunks")
        };

        self.addr_input.render(
            frame,
            input_box::RenderProps {
                title: String::from("Server Host and Port"),
                area: container_addr_input,
                border_color: self.calculate_border_color(Field::ServerAddr),
                show_cursor: self.active_field.eq(&Field::ServerAddr),
            },
        );

        self.username_input.render(
            frame,
            input_box::RenderProps {
                title: String::from("Username"),
                area: container_username_input,
                border_color: self.calculate_border_color(Field::Username),
                show_cursor: self.active_field.eq(&Field::Username),
            },
        );

        self.room_input.render(
            frame,
            input_box::RenderProps {
                title: String::from("Room Key"),
                area: container_room_input,
                border_color: self.calculate_border_color(Field::Room),
                show_cursor: self.active_field.eq(&Field::Room),
            },
        );

        let help_text = Paragraph::new(Text::from(Line::from(vec![
            "Press ".into(),
            "<Enter>".bold(),
            " to join, ".into(),
            "<Tab>".bold(),
            " to switch fields, ".into(),
            "<Esc>".bold(),
            " to quit.".into(),
        ])));
        frame.render_widget(help_text, container_help_text);

        let status_line = if let Some(err) = self.props.error_message.as_ref() {
            Line::from(Span::raw(format!("could not connect: {}", err)).red())
        } else if self.props.connecting {
            Line::from(Span::raw("connecting to the server...").italic())
        } else {
            Line::default()
        };
        frame.render_widget(
            Paragraph::new(Text::from(status_line)).wrap(Wrap { trim: true }),
            container_status,
        );
    }
}
