//! Application state for the MegaChat TUI
//!
//! Pure state: every mutation here is synchronous and happens on the UI
//! loop. The chat exchange is the only process-like behavior - submission
//! appends the user message plus an in-flight placeholder and hands the
//! controller an outbound request; resolution swaps the placeholder for the
//! terminal assistant message. Each exchange carries a correlation id and
//! stale resolutions are discarded, so overlapping sends cannot interleave
//! responses out of order.

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::api::{ApiError, AuthProvider, AuthSession, Subject, TaskType};
use crate::config::ModelConfig;

/// Fixed id of the transient in-flight placeholder message
pub const LOADING_MESSAGE_ID: &str = "loading";

/// Placeholder text shown while a request is in flight
pub const LOADING_TEXT: &str = "Думаю над ответом...";

/// Greeting seeded into a fresh chat
pub const WELCOME_TEXT: &str = "Привет! Я MegaChat — твой AI-помощник в учёбе. Чем могу помочь?";

/// Fixed connectivity-error message, shown verbatim on transport failure
pub const CONNECTION_ERROR_TEXT: &str =
    "Ошибка соединения. Проверьте подключение к интернету и попробуйте ещё раз.";

/// Who produced a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSender {
    User,
    Ai,
}

/// A single message in the chat panel
///
/// Immutable once appended; the list is append-only within a session apart
/// from placeholder removal.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: MessageSender,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender: MessageSender::User,
            timestamp: Local::now(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender: MessageSender::Ai,
            timestamp: Local::now(),
        }
    }

    /// The transient in-flight marker
    pub fn placeholder() -> Self {
        Self {
            id: LOADING_MESSAGE_ID.to_string(),
            text: LOADING_TEXT.to_string(),
            sender: MessageSender::Ai,
            timestamp: Local::now(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == LOADING_MESSAGE_ID
    }
}

/// The mutually exclusive top-level panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Solve,
    Essay,
    Test,
    History,
    Settings,
    Profile,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Solve,
        Panel::Essay,
        Panel::Test,
        Panel::History,
        Panel::Settings,
        Panel::Profile,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Panel::Solve => "Решение задач",
            Panel::Essay => "Сочинения",
            Panel::Test => "Контрольные",
            Panel::History => "История",
            Panel::Settings => "Настройки",
            Panel::Profile => "Профиль",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Correlation identifier for one chat exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeId(Uuid);

impl ExchangeId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Everything the controller needs to issue the HTTP request for an exchange
#[derive(Debug, Clone)]
pub struct OutboundExchange {
    pub id: ExchangeId,
    pub message: String,
    pub task_type: TaskType,
    pub subject: Subject,
}

/// Focusable rows of the essay form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EssayField {
    #[default]
    Topic,
    Subject,
    Generate,
}

impl EssayField {
    pub fn next(self) -> Self {
        match self {
            EssayField::Topic => EssayField::Subject,
            EssayField::Subject => EssayField::Generate,
            EssayField::Generate => EssayField::Topic,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            EssayField::Topic => EssayField::Generate,
            EssayField::Subject => EssayField::Topic,
            EssayField::Generate => EssayField::Subject,
        }
    }
}

/// Essay panel form - a pure state holder, not wired to a request
#[derive(Debug, Clone, Default)]
pub struct EssayForm {
    pub topic: String,
    pub subject: Subject,
    pub field: EssayField,
}

/// Test difficulty selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Лёгкая",
            Difficulty::Medium => "Средняя",
            Difficulty::Hard => "Сложная",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

/// Focusable rows of the test form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestField {
    #[default]
    Subject,
    Difficulty,
    Questions,
    Generate,
}

impl TestField {
    pub fn next(self) -> Self {
        match self {
            TestField::Subject => TestField::Difficulty,
            TestField::Difficulty => TestField::Questions,
            TestField::Questions => TestField::Generate,
            TestField::Generate => TestField::Subject,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            TestField::Subject => TestField::Generate,
            TestField::Difficulty => TestField::Subject,
            TestField::Questions => TestField::Difficulty,
            TestField::Generate => TestField::Questions,
        }
    }
}

/// Test panel form - also a pure state holder
#[derive(Debug, Clone)]
pub struct TestForm {
    pub subject: Subject,
    pub difficulty: Difficulty,
    pub questions: u8,
    pub field: TestField,
}

impl Default for TestForm {
    fn default() -> Self {
        Self {
            subject: Subject::Math,
            difficulty: Difficulty::Medium,
            questions: 10,
            field: TestField::Subject,
        }
    }
}

impl TestForm {
    pub fn more_questions(&mut self) {
        self.questions = (self.questions + 5).min(30);
    }

    pub fn fewer_questions(&mut self) {
        self.questions = self.questions.saturating_sub(5).max(5);
    }
}

/// Kind of a past task in the history panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Math,
    Essay,
    Test,
}

impl TaskKind {
    pub fn icon(self) -> &'static str {
        match self {
            TaskKind::Math => "∑",
            TaskKind::Essay => "✎",
            TaskKind::Test => "✓",
        }
    }
}

/// One entry of the (static demo) task history
#[derive(Debug, Clone)]
pub struct TaskHistoryEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub subject: &'static str,
    pub date: &'static str,
    pub kind: TaskKind,
}

/// Demo history data; no lifecycle
pub fn demo_history() -> Vec<TaskHistoryEntry> {
    vec![
        TaskHistoryEntry {
            id: "1",
            title: "Квадратные уравнения",
            subject: "Математика",
            date: "5 декабря 2024",
            kind: TaskKind::Math,
        },
        TaskHistoryEntry {
            id: "2",
            title: "Сочинение «Образ Печорина»",
            subject: "Литература",
            date: "4 декабря 2024",
            kind: TaskKind::Essay,
        },
        TaskHistoryEntry {
            id: "3",
            title: "Контрольная по физике",
            subject: "Физика",
            date: "3 декабря 2024",
            kind: TaskKind::Test,
        },
    ]
}

/// Assistant response style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStyle {
    Concise,
    #[default]
    Balanced,
    Detailed,
    Technical,
    Simple,
}

impl ResponseStyle {
    pub const ALL: [ResponseStyle; 5] = [
        ResponseStyle::Concise,
        ResponseStyle::Balanced,
        ResponseStyle::Detailed,
        ResponseStyle::Technical,
        ResponseStyle::Simple,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ResponseStyle::Concise => "Краткий — минимум слов",
            ResponseStyle::Balanced => "Сбалансированный — оптимальная детализация",
            ResponseStyle::Detailed => "Детальный — подробные объяснения",
            ResponseStyle::Technical => "Технический — для специалистов",
            ResponseStyle::Simple => "Простой — доступный язык",
        }
    }

    pub fn from_config(name: &str) -> Self {
        match name {
            "concise" => ResponseStyle::Concise,
            "detailed" => ResponseStyle::Detailed,
            "technical" => ResponseStyle::Technical,
            "simple" => ResponseStyle::Simple,
            _ => ResponseStyle::Balanced,
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Focusable rows of the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsRow {
    #[default]
    Temperature,
    MaxTokens,
    Style,
}

impl SettingsRow {
    pub fn next(self) -> Self {
        match self {
            SettingsRow::Temperature => SettingsRow::MaxTokens,
            SettingsRow::MaxTokens => SettingsRow::Style,
            SettingsRow::Style => SettingsRow::Temperature,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SettingsRow::Temperature => SettingsRow::Style,
            SettingsRow::MaxTokens => SettingsRow::Temperature,
            SettingsRow::Style => SettingsRow::MaxTokens,
        }
    }
}

/// Model settings panel state
///
/// Transient UI state seeded from the config file; the backend currently
/// fixes generation parameters server-side.
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub temperature: f32,
    pub max_tokens: u32,
    pub style: ResponseStyle,
    pub row: SettingsRow,
}

impl SettingsState {
    pub fn from_config(model: &ModelConfig) -> Self {
        Self {
            temperature: model.temperature.clamp(0.0, 2.0),
            max_tokens: model.max_tokens.clamp(100, 4000),
            style: ResponseStyle::from_config(&model.response_style),
            row: SettingsRow::Temperature,
        }
    }

    pub fn adjust_up(&mut self) {
        match self.row {
            SettingsRow::Temperature => {
                self.temperature = (self.temperature + 0.1).clamp(0.0, 2.0);
            }
            SettingsRow::MaxTokens => {
                self.max_tokens = (self.max_tokens + 100).min(4000);
            }
            SettingsRow::Style => self.style = self.style.next(),
        }
    }

    pub fn adjust_down(&mut self) {
        match self.row {
            SettingsRow::Temperature => {
                self.temperature = (self.temperature - 0.1).clamp(0.0, 2.0);
            }
            SettingsRow::MaxTokens => {
                self.max_tokens = self.max_tokens.saturating_sub(100).max(100);
            }
            SettingsRow::Style => self.style = self.style.prev(),
        }
    }
}

/// Application state
#[derive(Debug)]
pub struct AppState {
    /// Whether the application should exit
    pub should_quit: bool,
    /// Active panel
    pub active_panel: Panel,
    /// Ordered chat message list, append-only apart from the placeholder
    pub messages: Vec<ChatMessage>,
    /// Current chat input text
    pub input_text: String,
    /// Chat input cursor (byte offset)
    pub input_cursor: usize,
    /// Subject attached to solve requests
    pub subject: Subject,
    /// Latest outstanding exchange; stale resolutions are discarded
    pub pending_exchange: Option<ExchangeId>,
    /// Essay panel form
    pub essay: EssayForm,
    /// Test panel form
    pub test: TestForm,
    /// Static task history
    pub history: Vec<TaskHistoryEntry>,
    /// History panel selection
    pub history_cursor: usize,
    /// Model settings panel
    pub settings: SettingsState,
    /// Signed-in session, if any; at most one at a time
    pub session: Option<AuthSession>,
    /// Whether the auth modal is open (forced while signed out)
    pub auth_modal_open: bool,
    /// Which provider button the modal cursor is on
    pub auth_cursor: usize,
    /// Whether an auth request is in flight
    pub auth_in_flight: bool,
}

impl AppState {
    /// Build startup state from config defaults and the persisted session
    pub fn new(model: &ModelConfig, session: Option<AuthSession>) -> Self {
        let auth_modal_open = session.is_none();
        Self {
            should_quit: false,
            active_panel: Panel::Solve,
            messages: vec![ChatMessage::ai(WELCOME_TEXT)],
            input_text: String::new(),
            input_cursor: 0,
            subject: Subject::Math,
            pending_exchange: None,
            essay: EssayForm::default(),
            test: TestForm::default(),
            history: demo_history(),
            history_cursor: 0,
            settings: SettingsState::from_config(model),
            session,
            auth_modal_open,
            auth_cursor: 0,
            auth_in_flight: false,
        }
    }

    /// Signal application to quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn select_panel(&mut self, panel: Panel) {
        self.active_panel = panel;
    }

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    // --- chat input editing -------------------------------------------------

    pub fn insert_char(&mut self, c: char) {
        self.input_text.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
    }

    pub fn delete_char_before(&mut self) {
        if self.input_cursor > 0 {
            let prev_char_boundary = self.input_text[..self.input_cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.input_text.remove(prev_char_boundary);
            self.input_cursor = prev_char_boundary;
        }
    }

    pub fn clear_input(&mut self) {
        self.input_text.clear();
        self.input_cursor = 0;
    }

    // --- chat exchange ------------------------------------------------------

    /// Submit the current chat input as a new exchange
    ///
    /// Whitespace-only input produces no state change at all. Otherwise the
    /// user message is appended, the input cleared, and a placeholder pushed;
    /// the returned request must be issued by the caller. A resubmission
    /// while a request is outstanding replaces the placeholder and makes the
    /// new exchange the latest one - the older response will be discarded on
    /// arrival. The input deliberately stays editable while a request is in
    /// flight.
    pub fn submit_message(&mut self) -> Option<OutboundExchange> {
        if self.input_text.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.input_text);
        self.input_cursor = 0;

        self.messages.push(ChatMessage::user(text.clone()));
        self.remove_placeholder();
        self.messages.push(ChatMessage::placeholder());

        let id = ExchangeId::new();
        self.pending_exchange = Some(id);

        Some(OutboundExchange {
            id,
            message: text,
            task_type: TaskType::Solve,
            subject: self.subject,
        })
    }

    /// Apply the result of an exchange
    ///
    /// A resolution whose id does not match the latest outstanding exchange
    /// is discarded without touching the message list.
    pub fn resolve_exchange(&mut self, id: ExchangeId, result: Result<String, ApiError>) {
        if self.pending_exchange != Some(id) {
            tracing::debug!("Discarding stale exchange resolution");
            return;
        }
        self.pending_exchange = None;
        self.remove_placeholder();

        let text = match result {
            Ok(text) => text,
            Err(err) => failure_text(&err),
        };
        self.messages.push(ChatMessage::ai(text));
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.pending_exchange.is_some()
    }

    fn remove_placeholder(&mut self) {
        self.messages.retain(|m| !m.is_placeholder());
    }

    // --- auth ---------------------------------------------------------------

    /// Provider currently under the modal cursor
    pub fn selected_provider(&self) -> AuthProvider {
        if self.auth_cursor == 0 {
            AuthProvider::Google
        } else {
            AuthProvider::Yandex
        }
    }

    pub fn auth_cursor_toggle(&mut self) {
        self.auth_cursor = 1 - self.auth_cursor;
    }

    /// Mark an auth request as started; returns false if one is already
    /// in flight (the modal buttons are disabled meanwhile).
    pub fn begin_auth(&mut self) -> bool {
        if self.auth_in_flight {
            return false;
        }
        self.auth_in_flight = true;
        true
    }

    /// Adopt a successful auth exchange: the user becomes the session and
    /// the modal closes. Persistence is the caller's job.
    pub fn auth_succeeded(&mut self, session: AuthSession) {
        self.auth_in_flight = false;
        self.session = Some(session);
        self.auth_modal_open = false;
    }

    /// A failed auth exchange leaves prior state unchanged: no session, the
    /// modal stays open. The failure is logged by the caller, not surfaced
    /// in the modal.
    pub fn auth_failed(&mut self) {
        self.auth_in_flight = false;
    }

    /// Drop the session and force the modal back open. Clearing the durable
    /// entries is the caller's job.
    pub fn logout(&mut self) {
        self.session = None;
        self.auth_modal_open = true;
        self.auth_cursor = 0;
    }
}

/// User-facing text for a failed exchange
///
/// Application-level failures embed the server-provided error text;
/// transport failures map to the fixed connectivity message.
pub fn failure_text(err: &ApiError) -> String {
    match err {
        ApiError::Network(_) => CONNECTION_ERROR_TEXT.to_string(),
        ApiError::Endpoint { .. } => match err.server_message() {
            Some(message) => format!("Произошла ошибка: {}", message),
            None => "Произошла ошибка: неизвестная ошибка сервера".to_string(),
        },
        ApiError::Malformed(_) => "Произошла ошибка: некорректный ответ сервера".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserData;

    fn state() -> AppState {
        AppState::new(&ModelConfig::default(), None)
    }

    fn state_with_session() -> AppState {
        AppState::new(&ModelConfig::default(), Some(demo_session()))
    }

    fn demo_session() -> AuthSession {
        AuthSession {
            token: "jwt".to_string(),
            user: UserData {
                id: "google_1".to_string(),
                email: "student@example.com".to_string(),
                name: "Школьник".to_string(),
                provider: "google".to_string(),
            },
        }
    }

    fn type_str(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.insert_char(c);
        }
    }

    #[test]
    fn whitespace_only_input_is_a_no_op() {
        let mut state = state();
        type_str(&mut state, "   \t ");
        let before = state.messages.len();

        assert!(state.submit_message().is_none());
        assert_eq!(state.messages.len(), before);
        assert_eq!(state.input_text, "   \t ");
        assert!(state.pending_exchange.is_none());
    }

    #[test]
    fn submit_appends_user_message_and_placeholder_in_order() {
        let mut state = state();
        type_str(&mut state, "Реши 2+2");

        let out = state.submit_message().expect("outbound exchange");
        assert_eq!(out.message, "Реши 2+2");
        assert_eq!(out.task_type, TaskType::Solve);
        assert_eq!(out.subject, Subject::Math);

        assert!(state.input_text.is_empty());
        let n = state.messages.len();
        assert_eq!(state.messages[n - 2].sender, MessageSender::User);
        assert_eq!(state.messages[n - 2].text, "Реши 2+2");
        assert!(state.messages[n - 1].is_placeholder());
        assert_eq!(state.messages[n - 1].id, "loading");
        assert!(state.is_awaiting_response());
    }

    #[test]
    fn success_replaces_placeholder_with_response() {
        let mut state = state();
        type_str(&mut state, "вопрос");
        let out = state.submit_message().unwrap();

        state.resolve_exchange(out.id, Ok("X".to_string()));

        let last = state.messages.last().unwrap();
        assert_eq!(last.sender, MessageSender::Ai);
        assert_eq!(last.text, "X");
        assert!(!state.messages.iter().any(|m| m.is_placeholder()));
        assert!(!state.is_awaiting_response());
    }

    #[test]
    fn endpoint_error_embeds_server_text() {
        let mut state = state();
        type_str(&mut state, "вопрос");
        let out = state.submit_message().unwrap();

        state.resolve_exchange(
            out.id,
            Err(ApiError::Endpoint {
                status: 500,
                message: "Y".to_string(),
            }),
        );

        let last = state.messages.last().unwrap();
        assert_eq!(last.sender, MessageSender::Ai);
        assert!(last.text.contains('Y'), "got: {}", last.text);
        assert!(!state.messages.iter().any(|m| m.is_placeholder()));
    }

    #[test]
    fn network_failure_uses_fixed_connectivity_text() {
        let mut state = state();
        type_str(&mut state, "вопрос");
        let out = state.submit_message().unwrap();

        state.resolve_exchange(out.id, Err(ApiError::Network("refused".to_string())));

        assert_eq!(state.messages.last().unwrap().text, CONNECTION_ERROR_TEXT);
    }

    #[test]
    fn missing_field_is_an_error_message() {
        let mut state = state();
        type_str(&mut state, "вопрос");
        let out = state.submit_message().unwrap();

        state.resolve_exchange(out.id, Err(ApiError::Malformed("missing field".to_string())));

        let last = state.messages.last().unwrap();
        assert!(last.text.starts_with("Произошла ошибка"));
    }

    #[test]
    fn stale_resolution_is_discarded() {
        let mut state = state();
        type_str(&mut state, "первый");
        let first = state.submit_message().unwrap();
        type_str(&mut state, "второй");
        let second = state.submit_message().unwrap();

        let len_before = state.messages.len();
        state.resolve_exchange(first.id, Ok("устаревший".to_string()));
        assert_eq!(state.messages.len(), len_before);
        assert!(state.is_awaiting_response());

        state.resolve_exchange(second.id, Ok("актуальный".to_string()));
        assert_eq!(state.messages.last().unwrap().text, "актуальный");
    }

    #[test]
    fn resubmission_keeps_a_single_placeholder() {
        let mut state = state();
        type_str(&mut state, "первый");
        state.submit_message().unwrap();
        type_str(&mut state, "второй");
        state.submit_message().unwrap();

        let placeholders = state
            .messages
            .iter()
            .filter(|m| m.is_placeholder())
            .count();
        assert_eq!(placeholders, 1);
    }

    #[test]
    fn exactly_one_terminal_ai_message_per_exchange() {
        let mut state = state();
        let before_ai = state
            .messages
            .iter()
            .filter(|m| m.sender == MessageSender::Ai)
            .count();

        type_str(&mut state, "вопрос");
        let out = state.submit_message().unwrap();
        state.resolve_exchange(out.id, Ok("ответ".to_string()));
        // A second resolution for the same id must be discarded.
        state.resolve_exchange(out.id, Ok("дубль".to_string()));

        let after_ai = state
            .messages
            .iter()
            .filter(|m| m.sender == MessageSender::Ai)
            .count();
        assert_eq!(after_ai, before_ai + 1);
    }

    #[test]
    fn missing_session_forces_modal_open() {
        let state = state();
        assert!(state.auth_modal_open);
        assert!(state.session.is_none());
    }

    #[test]
    fn persisted_session_is_adopted_without_modal() {
        let state = state_with_session();
        assert!(!state.auth_modal_open);
        assert_eq!(
            state.session.as_ref().unwrap().user.email,
            "student@example.com"
        );
    }

    #[test]
    fn auth_success_closes_modal() {
        let mut state = state();
        assert!(state.begin_auth());
        assert!(!state.begin_auth(), "second begin while in flight");

        state.auth_succeeded(demo_session());
        assert!(!state.auth_modal_open);
        assert!(!state.auth_in_flight);
        assert!(state.session.is_some());
    }

    #[test]
    fn auth_failure_leaves_modal_open_and_state_unchanged() {
        let mut state = state();
        state.begin_auth();
        state.auth_failed();

        assert!(state.auth_modal_open);
        assert!(state.session.is_none());
        assert!(!state.auth_in_flight);
    }

    #[test]
    fn logout_reopens_modal() {
        let mut state = state_with_session();
        state.logout();
        assert!(state.auth_modal_open);
        assert!(state.session.is_none());
    }

    #[test]
    fn settings_adjustments_stay_in_range() {
        let mut state = state();
        state.settings.row = SettingsRow::Temperature;
        for _ in 0..40 {
            state.settings.adjust_up();
        }
        assert!(state.settings.temperature <= 2.0);

        state.settings.row = SettingsRow::MaxTokens;
        for _ in 0..60 {
            state.settings.adjust_down();
        }
        assert_eq!(state.settings.max_tokens, 100);
    }

    #[test]
    fn input_editing_handles_multibyte_chars() {
        let mut state = state();
        type_str(&mut state, "привет");
        state.delete_char_before();
        assert_eq!(state.input_text, "приве");
        state.clear_input();
        assert!(state.input_text.is_empty());
        assert_eq!(state.input_cursor, 0);
    }

    #[test]
    fn panel_cycling_wraps() {
        let mut state = state();
        state.select_panel(Panel::Profile);
        state.next_panel();
        assert_eq!(state.active_panel, Panel::Solve);
        state.prev_panel();
        assert_eq!(state.active_panel, Panel::Profile);
    }
}
