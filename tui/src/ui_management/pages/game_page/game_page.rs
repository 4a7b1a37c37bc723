use circular_queue::CircularQueue;
use comms::{event::GameStateEvent, game::Symbol};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, ActivityItem, State};

use super::{
    components::board_panel::{self, BoardPanel},
    usage::{widget_usage_to_text, HasUsageInfo, UsageInfo, UsageInfoLine},
};
use crate::ui_management::components::{Component, ComponentRender};

struct Props {
    /// The name this client plays under
    username: String,
    /// The joined room's key
    room: String,
    /// The seat held by this client, if any
    my_symbol: Option<Symbol>,
    /// The latest server snapshot
    game: Option<GameStateEvent>,
    /// The rolling activity log
    activity: CircularQueue<ActivityItem>,
    /// The timer for the game page
    timer: usize,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            username: state.username.clone(),
            room: state.room.clone(),
            my_symbol: state.my_symbol,
            game: state.game.clone(),
            activity: state.activity.clone(),
            timer: state.timer,
        }
    }
}

/// GamePage handles the UI and the state of the running game
pub struct GamePage {
    /// Action sender
    pub action_tx: UnboundedSender<Action>,
    /// State Mapped GamePage Props
    props: Props,
    // Child Components
    /// The board widget handling the cursor and move submission
    pub board_panel: BoardPanel,
}

impl GamePage {
    fn status_line(&self) -> Line {
        let game = match self.props.game.as_ref() {
            Some(game) => game,
            None => return Line::from(Span::raw("joining the room...").italic()),
        };

        if !game.game_active {
            return match game.winner {
                Some(winner) if self.props.my_symbol == Some(winner) => Line::from(
                    Span::raw("you win! press (r) for a rematch")
                        .green()
                        .bold(),
                ),
                Some(winner) => Line::from(
                    Span::raw(format!("{} wins. press (r) for a rematch", winner)).bold(),
                ),
                None if game.board.is_full() => {
                    Line::from(Span::raw("a draw. press (r) for a rematch").bold())
                }
                None => Line::from(Span::raw("the game was halted, press (r) to restart").italic()),
            };
        }

        if game.players.len() < 2 {
            return Line::from(Span::raw("waiting for an opponent to join...").italic());
        }

        match self.props.my_symbol {
            Some(symbol) if symbol == game.current_turn => {
                Line::from(Span::raw(format!("your turn, place an {}", symbol)).bold())
            }
            Some(_) => Line::from(Span::raw(format!("waiting for {} to move", game.current_turn))),
            None => Line::from(Span::raw(format!("watching, {} to move", game.current_turn))),
        }
    }

    fn seat_lines(&self) -> Vec<Line> {
        let players = match self.props.game.as_ref() {
            Some(game) => game.players.as_slice(),
            None => &[],
        };

        let mut lines: Vec<Line> = players
            .iter()
            .map(|player| {
                let mut spans = vec![
                    Span::from(format!("{}", player.symbol)).bold(),
                    Span::from(format!(" @{}", player.username)),
                ];
                if self.props.my_symbol == Some(player.symbol) {
                    spans.push(" (you)".into());
                }

                Line::from(spans)
            })
            .collect();

        while lines.len() < 2 {
            lines.push(Line::from(Span::raw("an empty seat").italic()));
        }

        if self.props.my_symbol.is_none() && self.props.game.is_some() {
            lines.push(Line::from(
                Span::raw(format!("@{} (watching)", self.props.username)).italic(),
            ));
        }

        lines
    }
}

impl Component for GamePage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        GamePage {
            action_tx: action_tx.clone(),
            // set the props
            props: Props::from(state),
            // child components
            board_panel: BoardPanel::new(state, action_tx),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        GamePage {
            props: Props::from(state),
            // propagate the update to the child components
            board_panel: self.board_panel.move_with_state(state),
            ..self
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                let _ = self.action_tx.send(Action::Exit);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let _ = self.action_tx.send(Action::Exit);
            }
            KeyCode::Char('r') => {
                let _ = self.action_tx.send(Action::RequestReset);
            }
            _ => self.board_panel.handle_key_event(key),
        }
    }
}

fn calculate_list_offset(height: u16, items_len: usize) -> usize {
    // keep only the newest items that fit inside the borders
    items_len.saturating_sub((height as usize).saturating_sub(2))
}

impl ComponentRender<()> for GamePage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let [left, right] = *Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
            .split(frame.size())
        else {
            panic!("The main layout should have 2 chunks")
        };

        let [container_room_info, container_board] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(7)].as_ref())
            .split(left)
        else {
            panic!("The left layout should have 2 chunks")
        };

        let seat_note = match self.props.my_symbol {
            Some(symbol) => format!(" playing {}", symbol),
            None => String::new(),
        };
        let room_info = Paragraph::new(Text::from(vec![
            Line::from(vec![
                "on ".into(),
                Span::from(format!("#{}", self.props.room)).bold(),
                format!(" as @{}{}", self.props.username, seat_note).into(),
            ]),
            Line::from(format!("playing for: {} secs", self.props.timer)),
            self.status_line(),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Room Information"),
        );
        frame.render_widget(room_info, container_room_info);

        let my_turn = self
            .props
            .game
            .as_ref()
            .map(|game| game.game_active && self.props.my_symbol == Some(game.current_turn))
            .unwrap_or(false);

        self.board_panel.render(
            frame,
            board_panel::RenderProps {
                border_color: if my_turn { Color::Yellow } else { Color::Reset },
                area: container_board,
            },
        );

        let [container_seats, container_activity, container_usage] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(5),
                    Constraint::Min(1),
                    Constraint::Length(7),
                ]
                .as_ref(),
            )
            .split(right)
        else {
            panic!("The right layout should have 3 chunks")
        };

        let seats = Paragraph::new(Text::from(self.seat_lines()))
            .block(Block::default().borders(Borders::ALL).title("Seats"));
        frame.render_widget(seats, container_seats);

        let activity_offset =
            calculate_list_offset(container_activity.height, self.props.activity.len());
        let activity_items: Vec<ListItem> = self
            .props
            .activity
            .asc_iter()
            .skip(activity_offset)
            .map(|item| {
                let line = match item {
                    ActivityItem::Notice(content) => Line::from(Span::raw(content.clone())),
                    ActivityItem::Rejection(content) => {
                        Line::from(Span::raw(content.clone()).red().italic())
                    }
                };

                ListItem::new(line)
            })
            .collect();

        let activity =
            List::new(activity_items).block(Block::default().borders(Borders::ALL).title("Activity"));
        frame.render_widget(activity, container_activity);

        let mut usage_text: Text = widget_usage_to_text(self.usage_info());
        usage_text.patch_style(Style::default());
        let usage = Paragraph::new(usage_text)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Usage"));
        frame.render_widget(usage, container_usage);
    }
}

impl HasUsageInfo for GamePage {
    fn usage_info(&self) -> UsageInfo {
        let description = match self.props.my_symbol {
            Some(symbol) => Some(format!("You play {}", symbol)),
            None => Some(String::from("You are watching")),
        };

        UsageInfo {
            description,
            lines: vec![
                UsageInfoLine {
                    keys: vec!["←".into(), "↑".into(), "↓".into(), "→".into()],
                    description: "to pick a cell".into(),
                },
                UsageInfoLine {
                    keys: vec!["Enter".into(), "1-9".into()],
                    description: "to place your mark".into(),
                },
                UsageInfoLine {
                    keys: vec!["r".into()],
                    description: "to restart the game".into(),
                },
                UsageInfoLine {
                    keys: vec!["q".into()],
                    description: "to quit".into(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::calculate_list_offset;

    #[test]
    fn list_offset_keeps_the_newest_items_that_fit() {
        // a 7-row container has 5 usable lines inside its borders
        assert_eq!(calculate_list_offset(7, 10), 5);
        assert_eq!(calculate_list_offset(12, 10), 0);
        assert_eq!(calculate_list_offset(7, 0), 0);
    }

    #[test]
    fn list_offset_handles_containers_shorter_than_their_borders() {
        assert_eq!(calculate_list_offset(0, 10), 10);
        assert_eq!(calculate_list_offset(1, 10), 10);
        assert_eq!(calculate_list_offset(2, 10), 10);
    }
}
