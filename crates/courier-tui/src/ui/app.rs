use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use courier_core::api::ApiClient;
use courier_core::cache::{FetchOutcome, QueryCache, QueryData, QueryKey, QueryState, RemoteData};
use courier_core::config::CoreConfig;
use courier_core::models::{Item, Notification};

use crate::mutations::{spawn_mutation, MutationKind, MutationOutcome};
use crate::ui::status::{StatusLevel, StatusMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Notifications,
    Items,
}

impl View {
    /// Cache key a table view renders from, if any.
    pub fn query_key(&self) -> Option<QueryKey> {
        match self {
            View::Login => None,
            View::Notifications => Some(QueryKey::Notifications),
            View::Items => Some(QueryKey::Items),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Entity behind the cursor row, cloned out of the cache.
#[derive(Debug, Clone)]
pub enum RowTarget {
    Notification(Notification),
    Item(Item),
}

impl RowTarget {
    pub fn id(&self) -> Uuid {
        match self {
            RowTarget::Notification(n) => n.id,
            RowTarget::Item(i) => i.id,
        }
    }
}

/// One command in a row's action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    MarkAsRead,
    Delete,
}

impl RowAction {
    pub fn is_destructive(&self) -> bool {
        matches!(self, RowAction::Delete)
    }
}

/// Commands offered for a row. Mark-as-read is only offered while the row
/// is unread; delete is always offered.
pub fn row_actions(target: &RowTarget) -> Vec<RowAction> {
    match target {
        RowTarget::Notification(n) if !n.is_read => vec![RowAction::MarkAsRead, RowAction::Delete],
        RowTarget::Notification(_) | RowTarget::Item(_) => vec![RowAction::Delete],
    }
}

/// Open action menu for the cursor row.
#[derive(Debug, Clone)]
pub struct RowMenuState {
    pub target: RowTarget,
    pub actions: Vec<RowAction>,
    pub selected: usize,
}

impl RowMenuState {
    pub fn new(target: RowTarget) -> Self {
        let actions = row_actions(&target);
        Self {
            target,
            actions,
            selected: 0,
        }
    }

    pub fn select_next(&mut self) {
        if !self.actions.is_empty() {
            self.selected = (self.selected + 1) % self.actions.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.actions.is_empty() {
            self.selected = (self.selected + self.actions.len() - 1) % self.actions.len();
        }
    }

    pub fn selected_action(&self) -> Option<RowAction> {
        self.actions.get(self.selected).copied()
    }
}

pub struct App {
    pub running: bool,
    pub view: View,
    pub input_mode: InputMode,
    pub config: CoreConfig,
    /// Token being typed on the login view.
    pub input: String,
    pub pending_quit: bool,
    pub notifications_cursor: usize,
    pub items_cursor: usize,
    pub row_menu: Option<RowMenuState>,
    pub mark_all_in_flight: bool,
    cache: Option<QueryCache>,
    client: Option<Arc<ApiClient>>,
    fetch_tx: UnboundedSender<FetchOutcome>,
    mutation_tx: UnboundedSender<MutationOutcome>,
    /// Entities with a mutation currently in flight; no re-entrant
    /// commands for the same row.
    pending_mutations: HashSet<Uuid>,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(
        config: CoreConfig,
        fetch_tx: UnboundedSender<FetchOutcome>,
        mutation_tx: UnboundedSender<MutationOutcome>,
    ) -> Self {
        Self {
            running: true,
            view: View::Login,
            input_mode: InputMode::Editing,
            config,
            input: String::new(),
            pending_quit: false,
            notifications_cursor: 0,
            items_cursor: 0,
            row_menu: None,
            mark_all_in_flight: false,
            cache: None,
            client: None,
            fetch_tx,
            mutation_tx,
            pending_mutations: HashSet::new(),
            status: None,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    // ===== Session =====

    /// Start a session with the given token: build the client and cache,
    /// subscribe the badge query, and open the notifications table.
    pub fn connect(&mut self, token: &str) {
        let client = Arc::new(ApiClient::new(self.config.api_base_url.clone(), token));
        let remote = client.clone();
        self.install_session(client, remote);
    }

    /// Install a session without touching the network; reads stay pending
    /// until a test applies an outcome by hand.
    #[cfg(test)]
    pub(crate) fn connect_offline(&mut self) {
        let client = Arc::new(ApiClient::new(self.config.api_base_url.clone(), "test-token"));
        self.install_session(client, Arc::new(idle_remote::IdleRemote));
    }

    fn install_session(&mut self, client: Arc<ApiClient>, remote: Arc<dyn RemoteData>) {
        let mut cache = QueryCache::new(remote, self.config.page, self.fetch_tx.clone());
        // The badge outlives any table view.
        cache.subscribe(QueryKey::NotificationsUnreadCount);
        cache.subscribe(QueryKey::Notifications);
        self.client = Some(client);
        self.cache = Some(cache);
        self.view = View::Notifications;
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.notifications_cursor = 0;
        self.items_cursor = 0;
        self.row_menu = None;
        self.pending_mutations.clear();
        self.mark_all_in_flight = false;
    }

    /// Tear the session down and return to the login boundary. The caller
    /// is responsible for deleting the stored credential.
    pub fn force_login(&mut self, reason: &str) {
        self.cache = None;
        self.client = None;
        self.pending_mutations.clear();
        self.mark_all_in_flight = false;
        self.row_menu = None;
        self.view = View::Login;
        self.input_mode = InputMode::Editing;
        self.input.clear();
        self.set_warning_status(reason);
    }

    pub fn has_session(&self) -> bool {
        self.client.is_some()
    }

    // ===== Queries =====

    pub fn query_state(&self, key: QueryKey) -> QueryState {
        self.cache
            .as_ref()
            .map(|cache| cache.state(key))
            .unwrap_or(QueryState::Loading)
    }

    pub fn unread_count(&self) -> i64 {
        self.cache
            .as_ref()
            .map(|cache| cache.unread_count())
            .unwrap_or(0)
    }

    pub fn apply_fetch(&mut self, outcome: FetchOutcome) {
        if let Some(cache) = self.cache.as_mut() {
            cache.apply(outcome);
        }
    }

    pub fn invalidate(&mut self, key: QueryKey) {
        if let Some(cache) = self.cache.as_mut() {
            cache.invalidate(key);
        }
    }

    /// Switch table views, moving the list subscription with the cursor.
    pub fn open_view(&mut self, view: View) {
        if self.view == view || !self.has_session() {
            return;
        }
        let old_key = self.view.query_key();
        let new_key = view.query_key();
        if let Some(cache) = self.cache.as_mut() {
            if let Some(key) = old_key {
                cache.unsubscribe(key);
            }
            if let Some(key) = new_key {
                cache.subscribe(key);
            }
        }
        self.row_menu = None;
        self.view = view;
    }

    /// Rows currently rendered by the active table view.
    pub fn visible_row_count(&self) -> usize {
        let Some(key) = self.view.query_key() else {
            return 0;
        };
        match self.query_state(key) {
            QueryState::Success(QueryData::Notifications(page)) => page.data.len(),
            QueryState::Success(QueryData::Items(page)) => page.data.len(),
            _ => 0,
        }
    }

    pub fn cursor(&self) -> usize {
        let cursor = match self.view {
            View::Notifications => self.notifications_cursor,
            View::Items => self.items_cursor,
            View::Login => 0,
        };
        cursor.min(self.visible_row_count().saturating_sub(1))
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let rows = self.visible_row_count();
        if rows == 0 {
            return;
        }
        let current = self.cursor();
        let next = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            (current + delta as usize).min(rows - 1)
        };
        match self.view {
            View::Notifications => self.notifications_cursor = next,
            View::Items => self.items_cursor = next,
            View::Login => {}
        }
    }

    /// Entity behind the cursor row, if the active view has rows.
    pub fn selected_target(&self) -> Option<RowTarget> {
        let key = self.view.query_key()?;
        let cursor = self.cursor();
        match self.query_state(key) {
            QueryState::Success(QueryData::Notifications(page)) => page
                .data
                .get(cursor)
                .cloned()
                .map(RowTarget::Notification),
            QueryState::Success(QueryData::Items(page)) => {
                page.data.get(cursor).cloned().map(RowTarget::Item)
            }
            _ => None,
        }
    }

    // ===== Mutations =====

    pub fn is_mutation_pending(&self, id: Uuid) -> bool {
        self.pending_mutations.contains(&id)
    }

    /// Dispatch a row command unless one is already in flight for that
    /// row. Returns whether the mutation was dispatched.
    pub fn begin_row_mutation(&mut self, target: &RowTarget, action: RowAction) -> bool {
        let Some(client) = self.client.clone() else {
            return false;
        };
        let id = target.id();
        if self.pending_mutations.contains(&id) {
            return false;
        }
        let kind = match (target, action) {
            (RowTarget::Notification(_), RowAction::MarkAsRead) => MutationKind::MarkAsRead,
            (RowTarget::Notification(_), RowAction::Delete) => MutationKind::DeleteNotification,
            (RowTarget::Item(_), RowAction::Delete) => MutationKind::DeleteItem,
            // Items cannot be marked as read.
            (RowTarget::Item(_), RowAction::MarkAsRead) => return false,
        };
        self.pending_mutations.insert(id);
        spawn_mutation(client, kind, Some(id), self.mutation_tx.clone());
        true
    }

    /// Dispatch the bulk mark-all-read command. Returns whether it was
    /// dispatched.
    pub fn begin_mark_all_read(&mut self) -> bool {
        let Some(client) = self.client.clone() else {
            return false;
        };
        if self.mark_all_in_flight {
            return false;
        }
        self.mark_all_in_flight = true;
        spawn_mutation(client, MutationKind::MarkAllRead, None, self.mutation_tx.clone());
        true
    }

    /// Release the in-flight marker for a completed mutation.
    pub fn finish_mutation(&mut self, outcome: &MutationOutcome) {
        match outcome.kind {
            MutationKind::MarkAllRead => self.mark_all_in_flight = false,
            _ => {
                if let Some(id) = outcome.id {
                    self.pending_mutations.remove(&id);
                }
            }
        }
    }

    // ===== Status =====

    pub fn set_status(&mut self, text: &str) {
        self.status = Some(StatusMessage::new(text, StatusLevel::Info));
    }

    pub fn set_success_status(&mut self, text: &str) {
        self.status = Some(StatusMessage::new(text, StatusLevel::Success));
    }

    pub fn set_warning_status(&mut self, text: &str) {
        self.status = Some(StatusMessage::new(text, StatusLevel::Warning));
    }

    pub fn current_status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Periodic upkeep driven by the event loop.
    pub fn tick(&mut self, now: Instant) {
        if let Some(cache) = self.cache.as_mut() {
            cache.tick(now);
        }
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.expired(now))
        {
            self.status = None;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn notification(is_read: bool) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            message: "alice mentioned you".into(),
            kind: "mention".into(),
            is_read,
            created_at: Some(Utc::now()),
        }
    }

    fn item() -> Item {
        Item {
            id: Uuid::new_v4(),
            title: "First item".into(),
            description: None,
        }
    }

    fn new_app() -> App {
        let (fetch_tx, _fetch_rx) = mpsc::unbounded_channel();
        let (mutation_tx, _mutation_rx) = mpsc::unbounded_channel();
        App::new(CoreConfig::default(), fetch_tx, mutation_tx)
    }

    #[test]
    fn unread_rows_offer_mark_as_read_then_delete() {
        let target = RowTarget::Notification(notification(false));
        assert_eq!(
            row_actions(&target),
            vec![RowAction::MarkAsRead, RowAction::Delete]
        );
    }

    #[test]
    fn read_rows_offer_delete_only() {
        let target = RowTarget::Notification(notification(true));
        assert_eq!(row_actions(&target), vec![RowAction::Delete]);
    }

    #[test]
    fn item_rows_offer_delete_only() {
        let target = RowTarget::Item(item());
        assert_eq!(row_actions(&target), vec![RowAction::Delete]);
    }

    #[test]
    fn menu_selection_wraps() {
        let mut menu = RowMenuState::new(RowTarget::Notification(notification(false)));
        assert_eq!(menu.selected_action(), Some(RowAction::MarkAsRead));
        menu.select_next();
        assert_eq!(menu.selected_action(), Some(RowAction::Delete));
        menu.select_next();
        assert_eq!(menu.selected_action(), Some(RowAction::MarkAsRead));
        menu.select_prev();
        assert_eq!(menu.selected_action(), Some(RowAction::Delete));
    }

    #[tokio::test]
    async fn connect_opens_the_notifications_view() {
        let mut app = new_app();
        assert_eq!(app.view, View::Login);
        app.connect_offline();
        assert_eq!(app.view, View::Notifications);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.has_session());
        assert_eq!(
            app.query_state(QueryKey::Notifications),
            QueryState::Loading
        );
    }

    #[tokio::test]
    async fn force_login_tears_the_session_down() {
        let mut app = new_app();
        app.connect_offline();
        app.force_login("Session expired - please log in again");
        assert_eq!(app.view, View::Login);
        assert_eq!(app.input_mode, InputMode::Editing);
        assert!(!app.has_session());
        assert_eq!(app.unread_count(), 0);
        assert!(app.current_status().is_some());
    }

    #[tokio::test]
    async fn row_mutations_are_not_reentrant() {
        let mut app = new_app();
        app.connect_offline();
        let target = RowTarget::Notification(notification(false));
        assert!(app.begin_row_mutation(&target, RowAction::MarkAsRead));
        assert!(app.is_mutation_pending(target.id()));
        // Same row again while in flight: refused.
        assert!(!app.begin_row_mutation(&target, RowAction::Delete));

        app.finish_mutation(&MutationOutcome {
            kind: MutationKind::MarkAsRead,
            id: Some(target.id()),
            result: Ok(()),
        });
        assert!(!app.is_mutation_pending(target.id()));
        assert!(app.begin_row_mutation(&target, RowAction::Delete));
    }

    #[tokio::test]
    async fn mark_all_read_is_not_reentrant() {
        let mut app = new_app();
        app.connect_offline();
        assert!(app.begin_mark_all_read());
        assert!(!app.begin_mark_all_read());
        app.finish_mutation(&MutationOutcome {
            kind: MutationKind::MarkAllRead,
            id: None,
            result: Ok(()),
        });
        assert!(app.begin_mark_all_read());
    }

    #[test]
    fn cursor_stays_put_without_rows() {
        let mut app = new_app();
        app.move_cursor(1);
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn status_expires_on_tick() {
        let mut app = new_app();
        app.set_warning_status("something went wrong");
        assert!(app.current_status().is_some());
        app.tick(Instant::now() + Duration::from_secs(30));
        assert!(app.current_status().is_none());
    }
}
