//! UI event loop
//!
//! The controller owns the application state and the channel that async
//! work reports back on. HTTP exchanges are spawned onto the runtime and
//! resolve through [`AppEvent`]s drained between frames, so every state
//! mutation still happens on the loop.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::Backend;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use crate::api::{ApiClient, ApiError, AuthSession};
use crate::session::SessionStore;
use crate::tui::app::{AppState, EssayField, ExchangeId, Panel, TestField};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme::Theme;
use crate::tui::widgets::{
    AuthModal, EssayPanel, HistoryPanel, InputWidget, MessageArea, ProfilePanel, SettingsPanel,
    Sidebar, StatusBar, TestPanel,
};

/// Results delivered back to the loop by spawned tasks
#[derive(Debug)]
pub enum AppEvent {
    /// A chat exchange finished; stale ids are discarded by the state
    ExchangeResolved {
        id: ExchangeId,
        result: Result<String, ApiError>,
    },
    /// An auth exchange finished
    AuthResolved(Result<AuthSession, ApiError>),
}

pub struct Controller {
    state: AppState,
    client: Arc<ApiClient>,
    store: SessionStore,
    theme: Theme,
    events: EventHandler,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl Controller {
    pub fn new(state: AppState, client: Arc<ApiClient>, store: SessionStore) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            state,
            client,
            store,
            theme: Theme::default(),
            events: EventHandler::new(Duration::from_millis(50)),
            event_tx,
            event_rx,
        }
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            match self.events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(_, _) | Event::Tick => {}
            }

            while let Ok(event) = self.event_rx.try_recv() {
                self.handle_app_event(event);
            }

            if self.state.should_quit {
                return Ok(());
            }
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ExchangeResolved { id, result } => {
                self.state.resolve_exchange(id, result);
            }
            AppEvent::AuthResolved(Ok(session)) => {
                if let Err(err) = self.store.save(&session) {
                    tracing::warn!("Failed to persist session: {err:#}");
                }
                self.state.auth_succeeded(session);
            }
            AppEvent::AuthResolved(Err(err)) => {
                // The modal stays open without an error banner; the failure
                // is only visible in the logs.
                tracing::warn!("Authentication failed: {err}");
                self.state.auth_failed();
            }
        }
    }

    // --- input --------------------------------------------------------------

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.state.quit();
            return;
        }

        if self.state.auth_modal_open {
            self.handle_auth_key(key);
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.state.next_panel();
                return;
            }
            KeyCode::BackTab => {
                self.state.prev_panel();
                return;
            }
            _ => {}
        }

        match self.state.active_panel {
            Panel::Solve => self.handle_solve_key(key),
            Panel::Essay => self.handle_essay_key(key),
            Panel::Test => self.handle_test_key(key),
            Panel::History => self.handle_history_key(key),
            Panel::Settings => self.handle_settings_key(key),
            Panel::Profile => self.handle_profile_key(key),
        }
    }

    fn handle_auth_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Tab => self.state.auth_cursor_toggle(),
            KeyCode::Enter => self.spawn_auth(),
            _ => {}
        }
    }

    fn handle_solve_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.spawn_exchange(),
            KeyCode::Backspace => self.state.delete_char_before(),
            KeyCode::Esc => self.state.clear_input(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.subject = self.state.subject.next();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.insert_char(c);
            }
            _ => {}
        }
    }

    fn handle_essay_key(&mut self, key: KeyEvent) {
        let essay = &mut self.state.essay;
        match key.code {
            KeyCode::Down => essay.field = essay.field.next(),
            KeyCode::Up => essay.field = essay.field.prev(),
            KeyCode::Left if essay.field == EssayField::Subject => {
                essay.subject = essay.subject.prev();
            }
            KeyCode::Right if essay.field == EssayField::Subject => {
                essay.subject = essay.subject.next();
            }
            KeyCode::Backspace if essay.field == EssayField::Topic => {
                essay.topic.pop();
            }
            KeyCode::Char(c)
                if essay.field == EssayField::Topic
                    && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                essay.topic.push(c);
            }
            // Generate is a visible no-op until the endpoint supports it
            KeyCode::Enter => {}
            _ => {}
        }
    }

    fn handle_test_key(&mut self, key: KeyEvent) {
        let test = &mut self.state.test;
        match key.code {
            KeyCode::Down => test.field = test.field.next(),
            KeyCode::Up => test.field = test.field.prev(),
            KeyCode::Left => match test.field {
                TestField::Subject => test.subject = test.subject.prev(),
                TestField::Difficulty => test.difficulty = test.difficulty.prev(),
                TestField::Questions => test.fewer_questions(),
                TestField::Generate => {}
            },
            KeyCode::Right => match test.field {
                TestField::Subject => test.subject = test.subject.next(),
                TestField::Difficulty => test.difficulty = test.difficulty.next(),
                TestField::Questions => test.more_questions(),
                TestField::Generate => {}
            },
            KeyCode::Enter => {}
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down => {
                let max = self.state.history.len().saturating_sub(1);
                self.state.history_cursor = (self.state.history_cursor + 1).min(max);
            }
            KeyCode::Up => {
                self.state.history_cursor = self.state.history_cursor.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down => self.state.settings.row = self.state.settings.row.next(),
            KeyCode::Up => self.state.settings.row = self.state.settings.row.prev(),
            KeyCode::Right => self.state.settings.adjust_up(),
            KeyCode::Left => self.state.settings.adjust_down(),
            _ => {}
        }
    }

    fn handle_profile_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter && self.state.session.is_some() {
            if let Err(err) = self.store.clear() {
                tracing::warn!("Failed to clear stored session: {err:#}");
            }
            self.state.logout();
        }
    }

    // --- spawned exchanges --------------------------------------------------

    fn spawn_exchange(&mut self) {
        let Some(outbound) = self.state.submit_message() else {
            return;
        };
        let client = Arc::clone(&self.client);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = client
                .send_message(&outbound.message, outbound.task_type, outbound.subject)
                .await;
            let _ = tx.send(AppEvent::ExchangeResolved {
                id: outbound.id,
                result,
            });
        });
    }

    fn spawn_auth(&mut self) {
        if !self.state.begin_auth() {
            return;
        }
        let provider = self.state.selected_provider();
        let client = Arc::clone(&self.client);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = client.authenticate(provider).await;
            let _ = tx.send(AppEvent::AuthResolved(result));
        });
    }

    // --- rendering ----------------------------------------------------------

    fn render(&self, frame: &mut Frame) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(40)])
            .split(frame.area());

        let user = self.state.session.as_ref().map(|s| &s.user);
        frame.render_widget(
            Sidebar::new(self.state.active_panel, user, &self.theme),
            columns[0],
        );

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(columns[1]);

        self.render_panel(frame, rows[0]);
        frame.render_widget(
            StatusBar::new(
                self.state.active_panel,
                self.state.is_awaiting_response(),
                &self.theme,
            ),
            rows[1],
        );

        if self.state.auth_modal_open {
            frame.render_widget(
                AuthModal::new(self.state.auth_cursor, self.state.auth_in_flight, &self.theme),
                frame.area(),
            );
        }
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect) {
        match self.state.active_panel {
            Panel::Solve => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(3), Constraint::Length(3)])
                    .split(area);
                frame.render_widget(
                    MessageArea::new(&self.state.messages, self.state.subject, &self.theme),
                    rows[0],
                );
                frame.render_widget(
                    InputWidget::new(&self.state.input_text, self.state.input_cursor, &self.theme)
                        .awaiting(self.state.is_awaiting_response()),
                    rows[1],
                );
            }
            Panel::Essay => {
                frame.render_widget(EssayPanel::new(&self.state.essay, &self.theme), area);
            }
            Panel::Test => {
                frame.render_widget(TestPanel::new(&self.state.test, &self.theme), area);
            }
            Panel::History => {
                frame.render_widget(
                    HistoryPanel::new(&self.state.history, self.state.history_cursor, &self.theme),
                    area,
                );
            }
            Panel::Settings => {
                frame.render_widget(SettingsPanel::new(&self.state.settings, &self.theme), area);
            }
            Panel::Profile => {
                let user = self.state.session.as_ref().map(|s| &s.user);
                frame.render_widget(ProfilePanel::new(user, &self.theme), area);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;

    fn controller() -> Controller {
        let state = AppState::new(&ModelConfig::default(), None);
        let client = Arc::new(ApiClient::new(&crate::config::EndpointsConfig::default()));
        let store = SessionStore::at_path(std::env::temp_dir().join("megachat-test-session.json"));
        Controller::new(state, client, store)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_quits_even_with_modal_open() {
        let mut c = controller();
        assert!(c.state.auth_modal_open);
        c.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(c.state.should_quit);
    }

    #[test]
    fn modal_swallows_panel_navigation() {
        let mut c = controller();
        c.handle_key(key(KeyCode::Tab));
        assert_eq!(c.state.active_panel, Panel::Solve);
        assert_eq!(c.state.auth_cursor, 1);
    }

    #[test]
    fn tab_cycles_panels_once_signed_in() {
        let mut c = controller();
        c.state.auth_modal_open = false;
        c.handle_key(key(KeyCode::Tab));
        assert_eq!(c.state.active_panel, Panel::Essay);
        c.handle_key(key(KeyCode::BackTab));
        assert_eq!(c.state.active_panel, Panel::Solve);
    }

    #[test]
    fn solve_keys_edit_the_input() {
        let mut c = controller();
        c.state.auth_modal_open = false;
        c.handle_key(key(KeyCode::Char('п')));
        c.handle_key(key(KeyCode::Char('и')));
        c.handle_key(key(KeyCode::Backspace));
        assert_eq!(c.state.input_text, "п");
        c.handle_key(key(KeyCode::Esc));
        assert!(c.state.input_text.is_empty());
    }

    #[test]
    fn test_panel_question_count_stays_in_range() {
        let mut c = controller();
        c.state.auth_modal_open = false;
        c.state.active_panel = Panel::Test;
        c.state.test.field = TestField::Questions;
        for _ in 0..10 {
            c.handle_key(key(KeyCode::Right));
        }
        assert_eq!(c.state.test.questions, 30);
        for _ in 0..10 {
            c.handle_key(key(KeyCode::Left));
        }
        assert_eq!(c.state.test.questions, 5);
    }

    #[test]
    fn history_cursor_clamps_to_entries() {
        let mut c = controller();
        c.state.auth_modal_open = false;
        c.state.active_panel = Panel::History;
        for _ in 0..10 {
            c.handle_key(key(KeyCode::Down));
        }
        assert_eq!(c.state.history_cursor, c.state.history.len() - 1);
        c.handle_key(key(KeyCode::Up));
        assert_eq!(c.state.history_cursor, c.state.history.len() - 2);
    }
}
