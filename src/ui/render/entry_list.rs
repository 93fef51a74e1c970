use super::widgets::spinner;
use super::{centered_rect, Frame};
use crate::state::{LoadState, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

const BLOCK_TITLE: &str = "Employee Task Records";
const COLUMNS: [&str; 4] = [
    "Employee Name",
    "Date Of Entry",
    "Task Description",
    "Performance Status",
];
const DATE_DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// Render the entry list screen according to state.
///
pub fn entry_list(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let title = format!(
        "{} ({} total)  Filter: {} (f)",
        BLOCK_TITLE,
        state.entries().len(),
        state.get_filter_field().label()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(&theme))
        .title(Span::styled(title, styling::active_block_title_style()));

    match state.store().load_state() {
        LoadState::Uninitialized | LoadState::Loading => {
            frame.render_widget(spinner::widget(state, size.height).block(block), size);
            return;
        }
        LoadState::LoadFailed(message) => {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(message.to_owned(), styling::error_text_style(&theme))),
                Line::from(""),
                Line::from(Span::styled("Press r to reload", styling::muted_text_style(&theme))),
            ];
            let paragraph = Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, size);
            return;
        }
        LoadState::Ready => {}
    }

    let rows: Vec<Row> = state
        .get_filtered_entries()
        .into_iter()
        .map(|entry| {
            let description = entry.task_description.lines().next().unwrap_or_default();
            Row::new(vec![
                Cell::from(entry.employee_name.to_owned()),
                Cell::from(entry.date.format(DATE_DISPLAY_FORMAT).to_string()),
                Cell::from(description.to_owned()),
                Cell::from(entry.status.label())
                    .style(Style::default().fg(theme.status_color(entry.status))),
            ])
            .style(styling::normal_text_style(&theme))
        })
        .collect();

    if rows.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("No results found", styling::current_list_item_style(&theme))),
            Line::from(""),
            Line::from(Span::styled("Press r to reload", styling::muted_text_style(&theme))),
        ];
        frame.render_widget(
            Paragraph::new(text).block(block).alignment(Alignment::Center),
            size,
        );
    } else {
        let header = Row::new(COLUMNS.to_vec()).style(styling::active_list_item_style(&theme));
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(22),
                Constraint::Percentage(16),
                Constraint::Percentage(42),
                Constraint::Percentage(20),
            ],
        )
        .header(header)
        .block(block)
        .column_spacing(1)
        .highlight_style(styling::highlighted_row_style(&theme));
        frame.render_stateful_widget(table, size, state.get_entries_table_state());
    }

    if let Some(name) = state.get_delete_target().map(|e| e.employee_name.clone()) {
        render_delete_confirmation(frame, size, &name, state);
    }
}

fn render_delete_confirmation(frame: &mut Frame, size: Rect, name: &str, state: &State) {
    let popup_area = centered_rect(50, 30, size);
    frame.render_widget(Clear, popup_area);

    let theme = state.get_theme();
    let block = Block::default()
        .title(Span::styled("Delete Task?", styling::error_text_style(theme)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error.to_color()));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner);

    let question = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Are you sure you want to delete {}'s task?", name),
            styling::current_list_item_style(theme),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(question, parts[0]);

    let buttons = Line::from(vec![
        Span::styled("[y] Delete", styling::error_text_style(theme)),
        Span::raw("   "),
        Span::styled("[n] Cancel", styling::muted_text_style(theme)),
    ]);
    frame.render_widget(Paragraph::new(buttons).alignment(Alignment::Center), parts[1]);
}
