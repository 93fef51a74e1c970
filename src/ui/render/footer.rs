use super::Frame;
use crate::state::{State, View};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the key hints for the current mode.
///
fn hints(state: &State) -> &'static str {
    if state.has_delete_confirmation() {
        return " y/Enter: delete  n/Esc: cancel";
    }
    if state.is_search_mode() {
        return " Type to search  Enter: done  Esc: clear";
    }
    match state.current_view() {
        View::EntryList if state.is_ready() => {
            " j/k: move  /: search  f: field  a: add  e: edit  d: delete  r: reload  l: log  q: quit"
        }
        View::EntryList => " r: reload  l: log  q: quit",
        View::CreateEntry | View::EditEntry(_) => {
            " Tab/S-Tab: field  ←/→: status  Enter/Ctrl-S: submit  Esc: cancel"
        }
    }
}

/// Render the key hint line.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let line = Line::from(Span::styled(hints(state), styling::muted_text_style(theme)));
    frame.render_widget(Paragraph::new(line), size);
}
