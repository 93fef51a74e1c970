use crate::state::State;
use crate::tracker::{Entry, EntryDraft, EntryId, Tracker};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    LoadEntries,
    LoadEditTarget { id: EntryId },
    CreateEntry { draft: EntryDraft },
    UpdateEntry { entry: Entry },
    DeleteEntry { id: EntryId },
}

/// Specify struct for managing state with network events.
///
/// Every event runs as its own task against shared state. Tasks are never
/// queued behind one another, so two mutations of the same entry finish in
/// whatever order their responses arrive and the last one to finish wins.
#[derive(Clone)]
pub struct Handler {
    state: Arc<Mutex<State>>,
    tracker: Tracker,
}

impl Handler {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: Arc<Mutex<State>>, tracker: Tracker) -> Self {
        Handler { state, tracker }
    }

    /// Spawn a task handling the event, logging any failure it returns.
    ///
    pub fn spawn(&self, event: Event) -> tokio::task::JoinHandle<()> {
        let handler = self.clone();
        tokio::spawn(async move {
            if let Err(e) = handler.handle(event).await {
                error!("Failed to handle network event: {}", e);
            }
        })
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::LoadEntries => self.load_entries().await,
            Event::LoadEditTarget { id } => self.load_edit_target(id).await,
            Event::CreateEntry { draft } => self.create_entry(draft).await.map(|_| ()),
            Event::UpdateEntry { entry } => self.update_entry(entry).await.map(|_| ()),
            Event::DeleteEntry { id } => self.delete_entry(id).await.map(|_| ()),
        }
    }

    /// Replace the cached list with the full collection. Failures are kept
    /// in state for display rather than returned.
    ///
    async fn load_entries(&self) -> Result<()> {
        info!("Fetching entries...");
        let result = self.tracker.list().await.map_err(|e| e.to_string());
        self.state.lock().await.set_entries_loaded(result);
        Ok(())
    }

    /// Fetch the collection and hand it to the edit screen waiting on `id`.
    ///
    async fn load_edit_target(&self, id: EntryId) -> Result<()> {
        info!("Fetching entry {} for editing...", id);
        let result = self.tracker.list().await.map_err(|e| e.to_string());
        self.state.lock().await.edit_target_loaded(&id, result);
        Ok(())
    }

    /// Create an entry and append the stored record to the cache.
    ///
    pub async fn create_entry(&self, draft: EntryDraft) -> Result<Entry> {
        info!("Creating entry for '{}'...", draft.employee_name);
        match self.tracker.create(&draft).await {
            Ok(created) => {
                info!("Entry created with id {}", created.id);
                self.state.lock().await.entry_created(created.clone());
                Ok(created)
            }
            Err(e) => {
                error!("Failed to create entry: {}", e);
                self.state.lock().await.entry_create_failed();
                Err(e.into())
            }
        }
    }

    /// Replace an entry and swap the returned record into the cache.
    ///
    pub async fn update_entry(&self, entry: Entry) -> Result<Entry> {
        info!("Updating entry {}...", entry.id);
        match self.tracker.update(&entry.id, &entry).await {
            Ok(updated) => {
                info!("Entry {} updated.", updated.id);
                self.state.lock().await.entry_updated(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                error!("Failed to update entry {}: {}", entry.id, e);
                self.state.lock().await.entry_update_failed(&entry.id);
                Err(e.into())
            }
        }
    }

    /// Delete an entry and drop it from the cache.
    ///
    pub async fn delete_entry(&self, id: EntryId) -> Result<EntryId> {
        info!("Deleting entry {}...", id);
        match self.tracker.delete(&id).await {
            Ok(deleted) => {
                info!("Entry {} deleted.", deleted);
                self.state.lock().await.entry_deleted(&deleted);
                Ok(deleted)
            }
            Err(e) => {
                error!("Failed to delete entry {}: {}", id, e);
                self.state.lock().await.entry_delete_failed();
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{LoadState, NotificationKind, View};
    use crate::tracker::Status;
    use chrono::NaiveDate;
    use httpmock::MockServer;
    use serde_json::json;

    fn sample_json() -> serde_json::Value {
        json!([
            {
                "id": 1,
                "employeeName": "Ann",
                "date": "2024-05-01",
                "taskDescription": "Audit",
                "status": "Completed"
            },
            {
                "id": 2,
                "employeeName": "Bo",
                "date": "2024-05-02",
                "taskDescription": "Review",
                "status": "Blocked"
            }
        ])
    }

    fn handler(server: &MockServer) -> Handler {
        Handler::new(
            Arc::new(Mutex::new(State::default())),
            Tracker::new(&server.base_url()).unwrap(),
        )
    }

    async fn loaded_handler(server: &MockServer) -> Handler {
        server
            .mock_async(|when, then| {
                when.method("GET").path("/entries");
                then.status(200).json_body(sample_json());
            })
            .await;
        let handler = handler(server);
        handler.handle(Event::LoadEntries).await.unwrap();
        handler
    }

    fn latest_toast(state: &State) -> Option<(NotificationKind, String)> {
        state
            .notifications()
            .latest()
            .map(|n| (n.kind, n.message.clone()))
    }

    #[tokio::test]
    async fn load_entries_success() {
        let server = MockServer::start_async().await;
        let handler = loaded_handler(&server).await;
        let state = handler.state.lock().await;
        assert_eq!(*state.store().load_state(), LoadState::Ready);
        assert_eq!(state.entries().len(), 2);
        assert_eq!(state.entries()[1].status, Status::Blocked);
    }

    #[tokio::test]
    async fn load_entries_failure_is_stored() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/entries");
                then.status(503);
            })
            .await;
        let handler = handler(&server);
        assert!(handler.handle(Event::LoadEntries).await.is_ok());
        let state = handler.state.lock().await;
        assert!(state.entries().is_empty());
        assert!(matches!(state.store().load_state(), LoadState::LoadFailed(_)));
        assert!(state.store().load_error().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn create_failure_leaves_list_unchanged() {
        let server = MockServer::start_async().await;
        let handler = loaded_handler(&server).await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/entries");
                then.status(500);
            })
            .await;

        let before = handler.state.lock().await.entries().to_vec();
        let draft = EntryDraft {
            employee_name: "Cy".to_owned(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            task_description: "Inventory".to_owned(),
            status: Status::NeedsReview,
        };
        let result = handler.create_entry(draft).await;
        assert!(result.is_err());

        let state = handler.state.lock().await;
        assert_eq!(state.entries(), &before[..]);
        assert_eq!(
            latest_toast(&state),
            Some((NotificationKind::Error, "Could not add entry".to_owned()))
        );
    }

    #[tokio::test]
    async fn create_success_appends() {
        let server = MockServer::start_async().await;
        let handler = loaded_handler(&server).await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/entries");
                then.status(201).json_body(json!({
                    "id": 3,
                    "employeeName": "Cy",
                    "date": "2024-06-01",
                    "taskDescription": "Inventory",
                    "status": "Needs Review"
                }));
            })
            .await;

        let draft = EntryDraft {
            employee_name: "Cy".to_owned(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            task_description: "Inventory".to_owned(),
            status: Status::NeedsReview,
        };
        let created = handler.create_entry(draft).await.unwrap();

        let state = handler.state.lock().await;
        assert_eq!(state.entries().len(), 3);
        assert_eq!(state.entries().last(), Some(&created));
        assert_eq!(
            latest_toast(&state),
            Some((NotificationKind::Success, "Entry added".to_owned()))
        );
    }

    #[tokio::test]
    async fn delete_success_removes_entry() {
        let server = MockServer::start_async().await;
        let handler = loaded_handler(&server).await;
        let mock = server
            .mock_async(|when, then| {
                when.method("DELETE").path("/entries/2");
                then.status(200).json_body(json!({}));
            })
            .await;

        handler.handle(Event::DeleteEntry { id: EntryId::Number(2) }).await.unwrap();
        mock.assert_async().await;

        let state = handler.state.lock().await;
        assert_eq!(state.entries().len(), 1);
        assert_eq!(state.entries()[0].id, EntryId::Number(1));
        assert_eq!(
            latest_toast(&state),
            Some((NotificationKind::Success, "Entry deleted".to_owned()))
        );
    }

    #[tokio::test]
    async fn delete_failure_keeps_entry() {
        let server = MockServer::start_async().await;
        let handler = loaded_handler(&server).await;
        server
            .mock_async(|when, then| {
                when.method("DELETE").path("/entries/2");
                then.status(404);
            })
            .await;

        assert!(handler.delete_entry(EntryId::Number(2)).await.is_err());
        let state = handler.state.lock().await;
        assert_eq!(state.entries().len(), 2);
        assert_eq!(
            latest_toast(&state),
            Some((NotificationKind::Error, "Could not delete entry".to_owned()))
        );
    }

    #[tokio::test]
    async fn update_success_replaces_entry() {
        let server = MockServer::start_async().await;
        let handler = loaded_handler(&server).await;
        let updated = json!({
            "id": 2,
            "employeeName": "Bo",
            "date": "2024-05-02",
            "taskDescription": "Review",
            "status": "Completed"
        });
        server
            .mock_async(|when, then| {
                when.method("PUT").path("/entries/2");
                then.status(200).json_body(updated.clone());
            })
            .await;

        let mut entry = handler.state.lock().await.entries()[1].clone();
        entry.status = Status::Completed;
        handler.update_entry(entry.clone()).await.unwrap();

        let state = handler.state.lock().await;
        assert_eq!(state.entries().len(), 2);
        assert_eq!(state.entries()[1], entry);
        assert_eq!(state.entries()[0].employee_name, "Ann");
    }

    #[tokio::test]
    async fn update_failure_keeps_entry() {
        let server = MockServer::start_async().await;
        let handler = loaded_handler(&server).await;
        server
            .mock_async(|when, then| {
                when.method("PUT").path("/entries/2");
                then.status(500).body("boom");
            })
            .await;

        let before = handler.state.lock().await.entries().to_vec();
        let mut entry = before[1].clone();
        entry.status = Status::Completed;
        assert!(handler.update_entry(entry).await.is_err());

        let state = handler.state.lock().await;
        assert_eq!(state.entries(), &before[..]);
        assert_eq!(state.entries()[1].status, Status::Blocked);
        assert_eq!(
            latest_toast(&state),
            Some((NotificationKind::Error, "Could not update entry".to_owned()))
        );
    }

    #[tokio::test]
    async fn edit_target_missing_redirects_without_update() {
        let server = MockServer::start_async().await;
        let handler = loaded_handler(&server).await;
        let put = server
            .mock_async(|when, then| {
                when.method("PUT");
                then.status(200);
            })
            .await;

        {
            let mut state = handler.state.lock().await;
            state.push_view(View::EditEntry(EntryId::Number(99)));
        }
        handler
            .handle(Event::LoadEditTarget { id: EntryId::Number(99) })
            .await
            .unwrap();

        let state = handler.state.lock().await;
        assert_eq!(*state.current_view(), View::EntryList);
        assert_eq!(
            latest_toast(&state),
            Some((NotificationKind::Error, "Task not found".to_owned()))
        );
        assert_eq!(put.hits_async().await, 0);
    }

    #[tokio::test]
    async fn concurrent_mutations_all_reconcile() {
        let server = MockServer::start_async().await;
        let handler = loaded_handler(&server).await;
        server
            .mock_async(|when, then| {
                when.method("DELETE").path("/entries/1");
                then.status(200);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method("DELETE").path("/entries/2");
                then.status(200);
            })
            .await;

        let first = handler.spawn(Event::DeleteEntry { id: EntryId::Number(1) });
        let second = handler.spawn(Event::DeleteEntry { id: EntryId::Number(2) });
        first.await.unwrap();
        second.await.unwrap();

        let state = handler.state.lock().await;
        assert!(state.entries().is_empty());
        assert_eq!(state.notifications().items().len(), 2);
    }
}
