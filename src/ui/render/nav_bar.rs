use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const BRAND: &str = "taskTracker";
const SEARCH_PLACEHOLDER: &str = "Search by Staff Name or Status";
const CLOCK_FORMAT: &str = "%a, %b %-d, %I:%M %p";

/// Render the nav bar with brand, search input and clock.
///
pub fn nav_bar(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BRAND.len() as u16 + 4),
            Constraint::Min(20),
            Constraint::Length(24),
        ])
        .split(size);

    let brand = Paragraph::new(Line::from(Span::styled(BRAND, styling::banner_style(theme))))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(theme)),
        );
    frame.render_widget(brand, columns[0]);

    let query = state.search().query();
    let mut block = Block::default().borders(Borders::ALL);
    block = if state.is_search_mode() {
        block
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled("Search", styling::active_block_title_style()))
    } else {
        block
            .border_style(styling::normal_block_border_style(theme))
            .title("Search (/)")
    };
    let input = if query.is_empty() && !state.is_search_mode() {
        Line::from(Span::styled(SEARCH_PLACEHOLDER, styling::muted_text_style(theme)))
    } else {
        let mut spans = vec![Span::styled(query.to_owned(), styling::normal_text_style(theme))];
        if state.is_search_mode() {
            spans.push(Span::styled("█", styling::active_list_item_style(theme)));
        }
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(input).block(block), columns[1]);

    let clock = Paragraph::new(Local::now().format(CLOCK_FORMAT).to_string())
        .style(styling::normal_text_style(theme))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styling::normal_block_border_style(theme)),
        );
    frame.render_widget(clock, columns[2]);
}
