use super::widgets::spinner;
use super::{centered_rect, Frame};
use crate::state::{EntryForm, FormField, State, View};
use crate::tracker::Status;
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the create or edit form according to state.
///
pub fn entry_form(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let title = match state.current_view() {
        View::EditEntry(_) => "Update Record",
        _ => "Add Task",
    };
    let area = centered_rect(70, 90, size);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(&theme))
        .title(Span::styled(title, styling::active_block_title_style()));

    let Some(form) = state.get_form().filter(|f| !f.is_initializing()) else {
        frame.render_widget(spinner::widget(state, area.height).block(block), area);
        return;
    };
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let focus = form.focus();
    frame.render_widget(text_input(&theme, FormField::Name, form.name(), focus), rows[0]);
    frame.render_widget(text_input(&theme, FormField::Date, form.date(), focus), rows[1]);
    frame.render_widget(status_select(&theme, form.status(), focus), rows[3]);
    frame.render_widget(footer_line(&theme, form), rows[4]);

    if let Some(form) = state.get_form_mut() {
        let textarea = form.description_textarea();
        textarea.set_block(field_block(&theme, FormField::Description, focus));
        textarea.set_cursor_line_style(Style::default());
        textarea.set_cursor_style(if focus == FormField::Description {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });
        frame.render_widget(textarea.widget(), rows[2]);
    }
}

fn field_block(theme: &Theme, field: FormField, focus: FormField) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL);
    if field == focus {
        block
            .border_style(styling::active_block_border_style(theme))
            .title(Span::styled(field.label(), styling::active_block_title_style()))
    } else {
        block
            .border_style(styling::normal_block_border_style(theme))
            .title(field.label())
    }
}

fn text_input<'a>(theme: &Theme, field: FormField, value: &'a str, focus: FormField) -> Paragraph<'a> {
    let mut spans = vec![Span::styled(value, styling::normal_text_style(theme))];
    if field == focus {
        spans.push(Span::styled("█", styling::active_list_item_style(theme)));
    } else if value.is_empty() && field == FormField::Date {
        spans.push(Span::styled("YYYY-MM-DD", styling::muted_text_style(theme)));
    }
    Paragraph::new(Line::from(spans)).block(field_block(theme, field, focus))
}

fn status_select(theme: &Theme, selected: Status, focus: FormField) -> Paragraph<'static> {
    let mut spans = vec![];
    for status in Status::ALL {
        let style = if status == selected {
            styling::highlighted_row_style(theme).fg(theme.status_color(status))
        } else {
            styling::muted_text_style(theme)
        };
        spans.push(Span::styled(format!(" {} ", status.label()), style));
        spans.push(Span::raw(" "));
    }
    Paragraph::new(Line::from(spans)).block(field_block(theme, FormField::Status, focus))
}

fn footer_line<'a>(theme: &Theme, form: &'a EntryForm) -> Paragraph<'a> {
    let line = if form.is_submitting() {
        Line::from(Span::styled("Saving...", styling::active_list_item_style(theme)))
    } else if let Some(error) = form.error() {
        Line::from(Span::styled(error, styling::error_text_style(theme)))
    } else {
        Line::from(Span::styled("Ctrl-S: submit", styling::muted_text_style(theme)))
    };
    Paragraph::new(line)
}
