use crossterm::event::KeyEvent;
use ratatui::{prelude::Backend, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};

/// A widget that derives its props from the shared [State] and emits
/// [Action]s back to the state store.
///
/// Components never mutate game state directly; key presses either adjust
/// purely local concerns (cursor, focus) or turn into an [Action].
pub trait Component {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized;

    /// Consumes the component and returns it with props recalculated from
    /// the given state, keeping any internal state it holds.
    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized;

    fn handle_key_event(&mut self, key: KeyEvent);
}

pub trait ComponentRender<Props> {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: Props);
}
