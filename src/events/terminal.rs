use crate::state::{FormField, State, View};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => {
                        if let Ok(CrosstermEvent::Key(key)) = event::read() {
                            if key.kind == KeyEventKind::Press
                                && tx_clone.send(Event::Input(key)).is_err()
                            {
                                break;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(state, key)),
            Event::Tick => {
                state.tick();
                Ok(true)
            }
        }
    }
}

/// Apply a key press to state. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }

    if state.has_delete_confirmation() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                state.confirm_delete_entry();
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                state.cancel_delete_confirmation();
            }
            _ => {}
        }
        return true;
    }

    if state.is_search_mode() {
        match key.code {
            KeyCode::Enter => {
                state.exit_search_mode();
            }
            KeyCode::Esc => {
                state.clear_search().exit_search_mode();
            }
            KeyCode::Backspace => {
                state.remove_search_char();
            }
            KeyCode::Char(c) => {
                state.add_search_char(c);
            }
            _ => {}
        }
        return true;
    }

    match state.current_view() {
        View::EntryList => handle_list_key(state, key),
        View::CreateEntry | View::EditEntry(_) => {
            handle_form_key(state, key);
            true
        }
    }
}

fn handle_list_key(state: &mut State, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return false,
        KeyCode::Char('j') | KeyCode::Down => {
            state.next_entry_index();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.previous_entry_index();
        }
        KeyCode::Char('/') => {
            state.enter_search_mode();
        }
        KeyCode::Char('f') => {
            state.next_filter_field();
        }
        KeyCode::Char('r') => {
            state.reload();
        }
        KeyCode::Char('l') => {
            state.toggle_log();
        }
        KeyCode::Char('a') if state.is_ready() => {
            state.open_create_form();
        }
        KeyCode::Char('e') | KeyCode::Enter if state.is_ready() => {
            state.open_edit_form();
        }
        KeyCode::Char('d') if state.is_ready() => {
            state.delete_selected_entry();
        }
        _ => {}
    }
    true
}

fn handle_form_key(state: &mut State, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        state.close_form();
        return;
    }
    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.submit_form();
        return;
    }
    let Some(form) = state.get_form_mut() else {
        return;
    };
    if form.is_initializing() {
        return;
    }
    match (form.focus(), key.code) {
        (_, KeyCode::Tab) => {
            form.focus_next();
        }
        (_, KeyCode::BackTab) => {
            form.focus_previous();
        }
        (FormField::Description, KeyCode::Enter) => {
            form.new_line();
        }
        (FormField::Status, KeyCode::Left | KeyCode::Char('h') | KeyCode::Up) => {
            form.previous_status();
        }
        (
            FormField::Status,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Down | KeyCode::Char(' '),
        ) => {
            form.next_status();
        }
        (_, KeyCode::Enter) => {
            state.submit_form();
        }
        (_, KeyCode::Backspace) => {
            form.pop_char();
        }
        (_, KeyCode::Char(c)) => {
            form.push_char(c);
        }
        _ => {}
    }
}
