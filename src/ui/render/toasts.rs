use super::Frame;
use crate::state::{NotificationKind, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::time::Instant;

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 3;

/// Render live notifications stacked in the top-right corner, newest first.
///
pub fn toasts(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let now = Instant::now();
    let width = TOAST_WIDTH.min(size.width);
    let x = size.x + size.width - width;
    let mut y = size.y + 1;

    for notification in state.notifications().items().iter().rev() {
        if !notification.is_live(now) {
            continue;
        }
        if y + TOAST_HEIGHT > size.y + size.height {
            break;
        }
        let area = Rect::new(x, y, width, TOAST_HEIGHT);
        let (color, label) = match notification.kind {
            NotificationKind::Success => (theme.success.to_color(), "✓"),
            NotificationKind::Error => (theme.error.to_color(), "✗"),
        };
        let paragraph = Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", label), Style::default().fg(color)),
            Span::styled(notification.message.as_str(), styling::normal_text_style(theme)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
        y += TOAST_HEIGHT;
    }
}
