use crossterm::event::KeyEvent;
use ratatui::{prelude::Backend, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, ServerConnectionStatus, State};

use self::{connect_page::ConnectPage, game_page::GamePage};

use super::components::{Component, ComponentRender};

mod connect_page;
mod game_page;

/// AppRouter switches between the connect form and the game view based on
/// the connection status. Both pages stay alive across switches, so a
/// dropped connection brings the connect form back with its inputs intact.
pub struct AppRouter {
    show_game_page: bool,
    connect_page: ConnectPage,
    game_page: GamePage,
}

impl AppRouter {
    fn active_page_mut(&mut self) -> &mut dyn Component {
        if self.show_game_page {
            &mut self.game_page
        } else {
            &mut self.connect_page
        }
    }
}

impl Component for AppRouter {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            show_game_page: false,
            connect_page: ConnectPage::new(state, action_tx.clone()),
            game_page: GamePage::new(state, action_tx.clone()),
        }
        .move_with_state(state)
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        AppRouter {
            show_game_page: matches!(
                state.server_connection_status,
                ServerConnectionStatus::Connected { .. }
            ),
            connect_page: self.connect_page.move_with_state(state),
            game_page: self.game_page.move_with_state(state),
        }
    }

    // key events go to whichever page is visible
    fn handle_key_event(&mut self, key: KeyEvent) {
        self.active_page_mut().handle_key_event(key)
    }
}

impl ComponentRender<()> for AppRouter {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: ()) {
        if self.show_game_page {
            self.game_page.render(frame, props)
        } else {
            self.connect_page.render(frame, props)
        }
    }
}
