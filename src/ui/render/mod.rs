mod all;
mod entry_form;
mod entry_list;
mod footer;
mod log;
mod nav_bar;
mod toasts;

use self::log::log;
use super::*;
use entry_form::entry_form;
use entry_list::entry_list;
use footer::footer;
use nav_bar::nav_bar;
use toasts::toasts;

pub use all::all as render;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Return a rectangle centered in `r` taking the given share of each axis.
///
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
