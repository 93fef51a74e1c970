use super::{entry_form, entry_list, footer, log, nav_bar, toasts, Frame};
use crate::state::{State, View};
use ratatui::layout::{Constraint, Direction, Layout};

/// Render every widget according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(6)];
    if state.is_log_visible() {
        constraints.push(Constraint::Percentage(30));
    }
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    nav_bar(frame, rows[0], state);
    match state.current_view() {
        View::EntryList => entry_list(frame, rows[1], state),
        View::CreateEntry | View::EditEntry(_) => entry_form(frame, rows[1], state),
    }
    if state.is_log_visible() {
        log(frame, rows[2], state);
    }
    footer(frame, rows[rows.len() - 1], state);
    toasts(frame, size, state);
}
