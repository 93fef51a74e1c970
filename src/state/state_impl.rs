use crate::app::NetworkEventSender;
use crate::events::network::Event as NetworkEvent;
use crate::logger::LogBuffer;
use crate::tracker::{Entry, EntryId};
use crate::ui::SPINNER_FRAME_COUNT;
use crate::utils::filter::{filter_entries, FilterField};
use log::*;
use ratatui::widgets::TableState;
use std::time::Instant;

use super::entries::{EntryStore, LoadState};
use super::error::StateError;
use super::form::EntryForm;
use super::navigation::View;
use super::notification::Notifications;
use super::search::SearchContext;

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    spinner_index: usize,
    view_stack: Vec<View>,
    store: EntryStore,
    entries_table_state: TableState,
    search: SearchContext,
    search_mode: bool,
    filter_field: FilterField,
    delete_confirmation: Option<EntryId>, // id of entry pending deletion confirmation
    form: Option<EntryForm>,
    notifications: Notifications,
    show_log: bool,
    log_buffer: LogBuffer,
    theme: crate::ui::Theme,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            spinner_index: 0,
            view_stack: vec![View::EntryList],
            store: EntryStore::default(),
            entries_table_state: TableState::default(),
            search: SearchContext::default(),
            search_mode: false,
            filter_field: FilterField::All,
            delete_confirmation: None,
            form: None,
            notifications: Notifications::default(),
            show_log: false,
            log_buffer: LogBuffer::default(),
            theme: crate::ui::Theme::default(),
        }
    }
}

impl State {
    pub fn new(net_sender: NetworkEventSender, notifications: Notifications) -> Self {
        State {
            net_sender: Some(net_sender),
            notifications,
            ..State::default()
        }
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &crate::ui::Theme {
        &self.theme
    }

    /// Advance the spinner and drop expired notifications.
    ///
    pub fn tick(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self.notifications.prune(Instant::now());
        self
    }

    /// Return the current spinner index.
    ///
    pub fn get_spinner_index(&self) -> &usize {
        &self.spinner_index
    }

    /// Return the current view.
    ///
    pub fn current_view(&self) -> &View {
        self.view_stack.last().unwrap_or(&View::EntryList)
    }

    /// Push a view onto the stack.
    ///
    pub fn push_view(&mut self, view: View) -> &mut Self {
        debug!("Pushing view {:?}...", view);
        self.view_stack.push(view);
        self
    }

    /// Pop the top view, never removing the list at the bottom.
    ///
    pub fn pop_view(&mut self) -> Option<View> {
        if self.view_stack.len() > 1 {
            self.view_stack.pop()
        } else {
            None
        }
    }

    /// Return the cached entries and their load state.
    ///
    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Return every cached entry.
    ///
    pub fn entries(&self) -> &[Entry] {
        self.store.entries()
    }

    /// Start the initial load of the collection.
    ///
    pub fn load_entries(&mut self) -> &mut Self {
        info!("Loading entries...");
        self.store.begin_load();
        self.dispatch(NetworkEvent::LoadEntries);
        self
    }

    /// Reset the list filters and load the collection again.
    ///
    pub fn reload(&mut self) -> &mut Self {
        self.filter_field = FilterField::All;
        self.search.clear();
        self.search_mode = false;
        self.load_entries()
    }

    /// Apply the outcome of a full load.
    ///
    pub fn set_entries_loaded(&mut self, result: Result<Vec<Entry>, String>) -> &mut Self {
        match &result {
            Ok(entries) => info!("Loaded {} entries.", entries.len()),
            Err(message) => error!("Failed to load entries: {}", message),
        }
        self.store.finish_load(result);
        self.clamp_selection();
        self
    }

    /// Reconcile a created entry and close its form.
    ///
    pub fn entry_created(&mut self, entry: Entry) -> &mut Self {
        self.store.apply_created(entry);
        self.notifications.success("Entry added");
        if *self.current_view() == View::CreateEntry && self.is_form_submitting() {
            self.close_form();
        }
        self.clamp_selection();
        self
    }

    /// Report a failed create, keeping the form open.
    ///
    pub fn entry_create_failed(&mut self) -> &mut Self {
        self.notifications.error("Could not add entry");
        if *self.current_view() == View::CreateEntry {
            self.finish_form_submit();
        }
        self
    }

    /// Reconcile an updated entry and close its form.
    ///
    pub fn entry_updated(&mut self, entry: Entry) -> &mut Self {
        let editing = *self.current_view() == View::EditEntry(entry.id.clone());
        self.store.apply_updated(entry);
        self.notifications.success("Entry updated");
        if editing && self.is_form_submitting() {
            self.close_form();
        }
        self
    }

    /// Report a failed update, keeping the form open.
    ///
    pub fn entry_update_failed(&mut self, id: &EntryId) -> &mut Self {
        self.notifications.error("Could not update entry");
        if *self.current_view() == View::EditEntry(id.clone()) {
            self.finish_form_submit();
        }
        self
    }

    /// Reconcile a deleted entry.
    ///
    pub fn entry_deleted(&mut self, id: &EntryId) -> &mut Self {
        self.store.apply_deleted(id);
        self.notifications.success("Entry deleted");
        self.clamp_selection();
        self
    }

    /// Report a failed delete.
    ///
    pub fn entry_delete_failed(&mut self) -> &mut Self {
        self.notifications.error("Could not delete entry");
        self
    }

    /// Return the entries that pass the current search query and field.
    ///
    pub fn get_filtered_entries(&self) -> Vec<&Entry> {
        filter_entries(self.store.entries(), self.search.query(), self.filter_field)
    }

    /// Return the entries table state.
    ///
    pub fn get_entries_table_state(&mut self) -> &mut TableState {
        &mut self.entries_table_state
    }

    /// Return the selected entry among the filtered entries.
    ///
    pub fn selected_entry(&self) -> Option<&Entry> {
        let index = self.entries_table_state.selected()?;
        self.get_filtered_entries().get(index).copied()
    }

    /// Activate the next entry.
    ///
    pub fn next_entry_index(&mut self) -> &mut Self {
        let len = self.get_filtered_entries().len();
        if len == 0 {
            self.entries_table_state.select(None);
            return self;
        }
        let next = match self.entries_table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.entries_table_state.select(Some(next));
        self
    }

    /// Activate the previous entry.
    ///
    pub fn previous_entry_index(&mut self) -> &mut Self {
        let len = self.get_filtered_entries().len();
        if len == 0 {
            self.entries_table_state.select(None);
            return self;
        }
        let prev = match self.entries_table_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        };
        self.entries_table_state.select(Some(prev));
        self
    }

    /// Keep the selection inside the filtered list.
    ///
    fn clamp_selection(&mut self) {
        let len = self.get_filtered_entries().len();
        let selected = match self.entries_table_state.selected() {
            _ if len == 0 => None,
            Some(i) if i < len => Some(i),
            Some(_) => Some(len - 1),
            None => Some(0),
        };
        self.entries_table_state.select(selected);
    }

    /// Return the current field selector.
    ///
    pub fn get_filter_field(&self) -> FilterField {
        self.filter_field
    }

    /// Cycle the field selector.
    ///
    pub fn next_filter_field(&mut self) -> &mut Self {
        self.filter_field = self.filter_field.next();
        self.clamp_selection();
        self
    }

    /// Return the shared search query.
    ///
    pub fn search(&self) -> &SearchContext {
        &self.search
    }

    /// Check if search mode is active.
    ///
    pub fn is_search_mode(&self) -> bool {
        self.search_mode
    }

    /// Focus the nav bar search input.
    ///
    pub fn enter_search_mode(&mut self) -> &mut Self {
        self.search_mode = true;
        self
    }

    /// Leave the nav bar search input, keeping the query.
    ///
    pub fn exit_search_mode(&mut self) -> &mut Self {
        self.search_mode = false;
        self
    }

    /// Type into the search input.
    ///
    pub fn add_search_char(&mut self, c: char) -> &mut Self {
        self.search.push(c);
        self.clamp_selection();
        self
    }

    /// Delete from the search input.
    ///
    pub fn remove_search_char(&mut self) -> &mut Self {
        self.search.pop();
        self.clamp_selection();
        self
    }

    /// Clear the search query.
    ///
    pub fn clear_search(&mut self) -> &mut Self {
        self.search.clear();
        self.clamp_selection();
        self
    }

    /// Ask for confirmation before deleting the selected entry.
    ///
    pub fn delete_selected_entry(&mut self) -> &mut Self {
        if let Some(id) = self.selected_entry().map(|e| e.id.clone()) {
            self.delete_confirmation = Some(id);
        }
        self
    }

    /// Check if there's a pending delete confirmation.
    ///
    pub fn has_delete_confirmation(&self) -> bool {
        self.delete_confirmation.is_some()
    }

    /// Return the entry pending deletion.
    ///
    pub fn get_delete_target(&self) -> Option<&Entry> {
        self.delete_confirmation
            .as_ref()
            .and_then(|id| self.store.find(id))
    }

    /// Cancel delete confirmation.
    ///
    pub fn cancel_delete_confirmation(&mut self) -> &mut Self {
        self.delete_confirmation = None;
        self
    }

    /// Confirm and delete the entry with pending confirmation.
    ///
    pub fn confirm_delete_entry(&mut self) -> &mut Self {
        if let Some(id) = self.delete_confirmation.take() {
            self.dispatch(NetworkEvent::DeleteEntry { id });
        }
        self
    }

    /// Open an empty create form.
    ///
    pub fn open_create_form(&mut self) -> &mut Self {
        self.form = Some(EntryForm::default());
        self.push_view(View::CreateEntry)
    }

    /// Open the edit form for the selected entry and look it up on the server.
    ///
    pub fn open_edit_form(&mut self) -> &mut Self {
        if let Some(id) = self.selected_entry().map(|e| e.id.clone()) {
            self.form = Some(EntryForm::initializing());
            self.push_view(View::EditEntry(id.clone()));
            self.dispatch(NetworkEvent::LoadEditTarget { id });
        }
        self
    }

    /// Fill the edit form once its target lookup completes. A lookup for a
    /// screen that is no longer showing is ignored.
    ///
    pub fn edit_target_loaded(
        &mut self,
        id: &EntryId,
        result: Result<Vec<Entry>, String>,
    ) -> &mut Self {
        if *self.current_view() != View::EditEntry(id.clone()) {
            debug!("Ignoring edit lookup for entry {} after leaving its screen.", id);
            return self;
        }
        let found = result.map(|entries| entries.into_iter().find(|e| &e.id == id));
        match found {
            Ok(Some(entry)) => {
                if let Some(form) = self.form.as_mut() {
                    form.fill_from(&entry);
                }
            }
            Ok(None) => {
                warn!("{}", StateError::EntryNotFound { id: id.to_string() });
                self.notifications.error("Task not found");
                self.close_form();
            }
            Err(message) => {
                self.notifications.error(message);
                self.close_form();
            }
        }
        self
    }

    /// Return the open form.
    ///
    pub fn get_form(&self) -> Option<&EntryForm> {
        self.form.as_ref()
    }

    /// Return the open form mutably.
    ///
    pub fn get_form_mut(&mut self) -> Option<&mut EntryForm> {
        self.form.as_mut()
    }

    fn is_form_submitting(&self) -> bool {
        self.form.as_ref().map_or(false, EntryForm::is_submitting)
    }

    fn finish_form_submit(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.set_submitting(false);
        }
    }

    /// Validate the open form and dispatch its create or update.
    ///
    pub fn submit_form(&mut self) -> &mut Self {
        let view = self.current_view().clone();
        let Some(form) = self.form.as_mut() else {
            return self;
        };
        if form.is_submitting() || form.is_initializing() {
            return self;
        }
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(e) => {
                debug!("Form not submitted: {}", e);
                return self;
            }
        };
        form.set_submitting(true);
        match view {
            View::CreateEntry => self.dispatch(NetworkEvent::CreateEntry { draft }),
            View::EditEntry(id) => self.dispatch(NetworkEvent::UpdateEntry {
                entry: draft.with_id(id),
            }),
            View::EntryList => {}
        }
        self
    }

    /// Close the open form and return to the list.
    ///
    pub fn close_form(&mut self) -> &mut Self {
        self.form = None;
        if self.current_view().is_form() {
            self.pop_view();
        }
        self
    }

    /// Return the notification queue.
    ///
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Check if the log panel is visible.
    ///
    pub fn is_log_visible(&self) -> bool {
        self.show_log
    }

    /// Toggle the log panel.
    ///
    pub fn toggle_log(&mut self) -> &mut Self {
        self.show_log = !self.show_log;
        self
    }

    /// Get log entries, oldest first.
    ///
    pub fn get_log_entries(&self) -> Vec<String> {
        self.log_buffer.lines()
    }

    /// Return a handle on the log buffer for the logger to write into.
    ///
    pub fn log_buffer(&self) -> LogBuffer {
        self.log_buffer.clone()
    }

    /// Whether the list has finished loading.
    ///
    pub fn is_ready(&self) -> bool {
        *self.store.load_state() == LoadState::Ready
    }

    /// Dispatches an asynchronous network event.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Received error from network dispatch: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::MAX_LOG_LINES;
    use crate::state::NotificationKind;
    use crate::tracker::Status;
    use chrono::NaiveDate;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn entry(id: u64, name: &str, status: Status) -> Entry {
        Entry {
            id: EntryId::Number(id),
            employee_name: name.to_owned(),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            task_description: "work".to_owned(),
            status,
        }
    }

    fn loaded_state() -> (State, UnboundedReceiver<NetworkEvent>) {
        let (tx, rx) = unbounded_channel();
        let mut state = State::new(tx, Notifications::default());
        state.set_entries_loaded(Ok(vec![
            entry(1, "Ann", Status::Completed),
            entry(2, "Bo", Status::Blocked),
        ]));
        (state, rx)
    }

    fn latest_toast(state: &State) -> (NotificationKind, String) {
        let latest = state.notifications().latest().unwrap();
        (latest.kind, latest.message.clone())
    }

    #[test]
    fn load_entries_dispatches_and_enters_loading() {
        let (tx, mut rx) = unbounded_channel();
        let mut state = State::new(tx, Notifications::default());
        state.load_entries();
        assert!(state.store().is_loading());
        assert!(matches!(rx.try_recv(), Ok(NetworkEvent::LoadEntries)));
    }

    #[test]
    fn reload_resets_query_and_field() {
        let (mut state, mut rx) = loaded_state();
        state.add_search_char('b');
        state.next_filter_field();
        state.set_entries_loaded(Err("Network Error".to_owned()));
        state.reload();
        assert_eq!(state.search().query(), "");
        assert_eq!(state.get_filter_field(), FilterField::All);
        assert_eq!(state.store().load_error(), None);
        assert!(state.store().is_loading());
        assert!(matches!(rx.try_recv(), Ok(NetworkEvent::LoadEntries)));
    }

    #[test]
    fn search_filters_and_clamps_selection() {
        let (mut state, _rx) = loaded_state();
        state.next_entry_index();
        assert_eq!(state.selected_entry().map(|e| e.id.clone()), Some(EntryId::Number(2)));
        for c in "ann".chars() {
            state.add_search_char(c);
        }
        assert_eq!(state.get_filtered_entries().len(), 1);
        assert_eq!(state.selected_entry().map(|e| e.id.clone()), Some(EntryId::Number(1)));
        state.clear_search();
        assert_eq!(state.get_filtered_entries().len(), 2);
    }

    #[test]
    fn selection_wraps() {
        let (mut state, _rx) = loaded_state();
        assert_eq!(state.selected_entry().map(|e| e.id.clone()), Some(EntryId::Number(1)));
        state.previous_entry_index();
        assert_eq!(state.selected_entry().map(|e| e.id.clone()), Some(EntryId::Number(2)));
        state.next_entry_index();
        assert_eq!(state.selected_entry().map(|e| e.id.clone()), Some(EntryId::Number(1)));
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut state, mut rx) = loaded_state();
        state.next_entry_index();
        state.delete_selected_entry();
        assert!(state.has_delete_confirmation());
        assert_eq!(state.get_delete_target().map(|e| e.employee_name.as_str()), Some("Bo"));
        assert!(rx.try_recv().is_err());

        state.cancel_delete_confirmation();
        assert!(!state.has_delete_confirmation());
        assert!(rx.try_recv().is_err());

        state.delete_selected_entry();
        state.confirm_delete_entry();
        assert!(!state.has_delete_confirmation());
        match rx.try_recv() {
            Ok(NetworkEvent::DeleteEntry { id }) => assert_eq!(id, EntryId::Number(2)),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn entry_deleted_reconciles_and_notifies() {
        let (mut state, _rx) = loaded_state();
        state.entry_deleted(&EntryId::Number(2));
        assert_eq!(state.entries(), &[entry(1, "Ann", Status::Completed)]);
        assert_eq!(
            latest_toast(&state),
            (NotificationKind::Success, "Entry deleted".to_owned())
        );
    }

    #[test]
    fn invalid_form_dispatches_nothing() {
        let (mut state, mut rx) = loaded_state();
        state.open_create_form();
        state.submit_form();
        assert!(rx.try_recv().is_err());
        let form = state.get_form().unwrap();
        assert!(!form.is_submitting());
        assert_eq!(form.error(), Some("Full Name is required"));
    }

    fn fill_form(state: &mut State) {
        let form = state.get_form_mut().unwrap();
        for c in "Cy".chars() {
            form.push_char(c);
        }
        form.focus_next();
        for c in "2024-06-01".chars() {
            form.push_char(c);
        }
        form.focus_next();
        for c in "Inventory".chars() {
            form.push_char(c);
        }
    }

    #[test]
    fn create_success_closes_form() {
        let (mut state, mut rx) = loaded_state();
        state.open_create_form();
        fill_form(&mut state);
        state.submit_form();
        assert!(state.get_form().unwrap().is_submitting());
        let draft = match rx.try_recv() {
            Ok(NetworkEvent::CreateEntry { draft }) => draft,
            other => panic!("unexpected event {:?}", other),
        };

        state.submit_form();
        assert!(rx.try_recv().is_err());

        let created = draft.with_id(EntryId::Number(3));
        state.entry_created(created.clone());
        assert_eq!(*state.current_view(), View::EntryList);
        assert!(state.get_form().is_none());
        assert_eq!(state.entries().last(), Some(&created));
        assert_eq!(
            latest_toast(&state),
            (NotificationKind::Success, "Entry added".to_owned())
        );
    }

    #[test]
    fn create_failure_keeps_form_open() {
        let (mut state, mut rx) = loaded_state();
        state.open_create_form();
        fill_form(&mut state);
        state.submit_form();
        let _ = rx.try_recv();
        state.entry_create_failed();
        assert_eq!(*state.current_view(), View::CreateEntry);
        assert!(!state.get_form().unwrap().is_submitting());
        assert_eq!(state.entries().len(), 2);
        assert_eq!(
            latest_toast(&state),
            (NotificationKind::Error, "Could not add entry".to_owned())
        );
    }

    #[test]
    fn edit_form_lookup_and_update() {
        let (mut state, mut rx) = loaded_state();
        state.open_edit_form();
        assert_eq!(*state.current_view(), View::EditEntry(EntryId::Number(1)));
        assert!(state.get_form().unwrap().is_initializing());
        assert!(matches!(
            rx.try_recv(),
            Ok(NetworkEvent::LoadEditTarget { .. })
        ));

        let fetched = vec![
            entry(1, "Ann", Status::Completed),
            entry(2, "Bo", Status::Blocked),
        ];
        state.edit_target_loaded(&EntryId::Number(1), Ok(fetched));
        let form = state.get_form_mut().unwrap();
        assert_eq!(form.name(), "Ann");
        form.focus_previous();
        form.next_status();
        state.submit_form();
        let updated = match rx.try_recv() {
            Ok(NetworkEvent::UpdateEntry { entry }) => entry,
            other => panic!("unexpected event {:?}", other),
        };
        assert_eq!(updated.id, EntryId::Number(1));
        assert_eq!(updated.status, Status::InProgress);

        state.entry_updated(updated.clone());
        assert_eq!(*state.current_view(), View::EntryList);
        assert_eq!(state.entries()[0], updated);
        assert_eq!(state.entries().len(), 2);
    }

    #[test]
    fn edit_target_missing_redirects() {
        let (mut state, mut rx) = loaded_state();
        state.open_edit_form();
        let _ = rx.try_recv();
        state.edit_target_loaded(
            &EntryId::Number(1),
            Ok(vec![entry(2, "Bo", Status::Blocked)]),
        );
        assert_eq!(*state.current_view(), View::EntryList);
        assert!(state.get_form().is_none());
        assert_eq!(
            latest_toast(&state),
            (NotificationKind::Error, "Task not found".to_owned())
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn late_edit_lookup_is_ignored() {
        let (mut state, mut rx) = loaded_state();
        state.open_edit_form();
        let _ = rx.try_recv();
        state.close_form();
        state.edit_target_loaded(&EntryId::Number(1), Ok(vec![]));
        assert_eq!(*state.current_view(), View::EntryList);
        assert!(state.notifications().items().is_empty());
    }

    #[test]
    fn update_failure_keeps_form_open() {
        let (mut state, mut rx) = loaded_state();
        state.open_edit_form();
        let _ = rx.try_recv();
        state.edit_target_loaded(
            &EntryId::Number(1),
            Ok(vec![entry(1, "Ann", Status::Completed)]),
        );
        state.submit_form();
        let _ = rx.try_recv();
        state.entry_update_failed(&EntryId::Number(1));
        assert_eq!(*state.current_view(), View::EditEntry(EntryId::Number(1)));
        assert!(!state.get_form().unwrap().is_submitting());
        assert_eq!(state.entries()[0], entry(1, "Ann", Status::Completed));
    }

    #[test]
    fn pop_view_keeps_list() {
        let mut state = State::default();
        assert_eq!(state.pop_view(), None);
        state.push_view(View::CreateEntry);
        assert_eq!(state.pop_view(), Some(View::CreateEntry));
        assert_eq!(*state.current_view(), View::EntryList);
    }

    #[test]
    fn log_entries_are_capped() {
        let mut state = State::default();
        for i in 0..(MAX_LOG_LINES + 10) {
            state.log_buffer().push(format!("line {}", i));
        }
        assert_eq!(state.get_log_entries().len(), MAX_LOG_LINES);
        assert_eq!(state.get_log_entries()[0], "line 10");
    }

    #[test]
    fn tick_advances_spinner() {
        let mut state = State::default();
        state.tick();
        assert_eq!(*state.get_spinner_index(), 1);
        for _ in 0..SPINNER_FRAME_COUNT {
            state.tick();
        }
        assert_eq!(*state.get_spinner_index(), 1);
    }
}
