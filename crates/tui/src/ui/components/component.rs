//! Component system for the reader.
//!
//! Components are self-contained views: they read [`App`] state, render into
//! a `Rect`, and translate input into [`Effect`]s. Effects are executed by
//! the app, never by the component itself, which keeps every view testable
//! without a terminal.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect, text::Span};

use crate::app::{App, Effect};

pub(crate) trait Component {
    /// Handle a key while this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle a mouse event anywhere on screen; components hit-test themselves.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hint bar while this component has focus.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        Vec::new()
    }
}
