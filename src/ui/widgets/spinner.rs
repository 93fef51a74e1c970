use super::styling;
use crate::state::State;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::Paragraph,
};

pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Return a centered spinner paragraph sized to the given height.
///
pub fn widget(state: &State, height: u16) -> Paragraph<'static> {
    let frame = FRAMES[*state.get_spinner_index() % FRAMES.len()];
    let theme = state.get_theme();
    let mut lines: Vec<Line> = (0..height.saturating_sub(2) / 2).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        format!("{} Loading...", frame),
        styling::active_list_item_style(theme),
    )));
    Paragraph::new(lines).alignment(Alignment::Center)
}
