//! Application state management for City Weather CLI
//!
//! This module contains the main application state: the query being typed,
//! the lookup state machine, transient notifications, and keyboard handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::cli::StartupConfig;
use crate::config::Config;
use crate::data::{FetchError, Query, QueryError, WeatherClient, WeatherSnapshot};
use crate::lookup::{LookupHandle, LookupMessage};

/// State of the current lookup
///
/// Each lookup replaces the whole state: Idle/Success/Failed -> Loading -> Success/Failed.
#[derive(Debug, Default)]
pub enum RequestState {
    /// Nothing looked up yet
    #[default]
    Idle,
    /// A request for this city is in flight
    Loading(Query),
    /// The last lookup succeeded
    Success(WeatherSnapshot),
    /// The last lookup failed; any previous snapshot is gone
    Failed(FetchError),
}

/// A dismissible message shown on top of the main view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short headline
    pub title: String,
    /// Longer explanation
    pub description: String,
    /// When the notification appeared
    pub shown_at: Instant,
}

impl Notification {
    /// Creates a notification shown now
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            shown_at: Instant::now(),
        }
    }

    /// Notification for input rejected before any lookup
    pub fn from_query_error(error: &QueryError) -> Self {
        match error {
            QueryError::Empty => Self::new("Enter a city", error.to_string()),
        }
    }

    /// Notification for a failed lookup
    pub fn from_fetch_error(error: &FetchError) -> Self {
        match error {
            FetchError::NotFound(city) => Self::new(
                "City not found",
                format!("Could not find \"{}\". Check the name and try again.", city),
            ),
            FetchError::Provider { status, message } => Self::new(
                "Weather provider error",
                format!("The provider responded with {}: {}", status, message),
            ),
            FetchError::Network(_) => Self::new(
                "Connection problem",
                "Could not reach the weather service. Check your connection and try again.",
            ),
            FetchError::Parse(_) => Self::new(
                "Unexpected response",
                "The weather service sent data that could not be read.",
            ),
        }
    }

    /// Whether the notification has been visible for at least `ttl`
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= ttl
    }
}

/// Main application struct managing state and data
#[derive(Debug)]
pub struct App {
    /// Text currently typed into the city field
    pub input: String,
    /// Current lookup state
    pub state: RequestState,
    /// Toast currently on screen, if any
    pub notification: Option<Notification>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Animation frame for the loading spinner
    pub spinner_frame: usize,
    /// How long notifications stay on screen
    notification_ttl: Duration,
    /// Runs lookups in the background
    lookups: LookupHandle,
}

impl App {
    /// Creates a new App that fetches through the given client
    pub fn new(client: WeatherClient, notification_ttl: Duration) -> Self {
        Self {
            input: String::new(),
            state: RequestState::Idle,
            notification: None,
            should_quit: false,
            show_help: false,
            spinner_frame: 0,
            notification_ttl,
            lookups: LookupHandle::new(client),
        }
    }

    /// Creates a new App from resolved configuration and CLI startup options.
    ///
    /// If a city was given on the command line it is typed into the field and
    /// looked up right away, so this must run inside a tokio runtime.
    pub fn with_startup_config(config: &Config, startup: StartupConfig) -> Self {
        let mut app = Self::new(config.weather_client(), config.notification_ttl);

        if let Some(query) = startup.initial_query {
            app.input = query.as_str().to_string();
            app.begin_lookup(query);
        }

        app
    }

    /// Whether a lookup is in flight (input and trigger are disabled)
    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading(_))
    }

    /// Returns the last successful result, if the current state holds one
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match &self.state {
            RequestState::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - printable keys: type into the city field
    /// - `Backspace`: delete the last character
    /// - `Ctrl+U`: clear the field
    /// - `Enter`: look up the typed city
    /// - `F1`: toggle help overlay
    /// - `Esc`: dismiss notification, or quit if none is shown
    /// - `Ctrl+C`: quit
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key_event.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::F(1)) {
                self.show_help = false;
            }
            return;
        }

        match key_event.code {
            KeyCode::F(1) => {
                self.show_help = true;
            }
            KeyCode::Esc => {
                if self.notification.is_some() {
                    self.dismiss_notification();
                } else {
                    self.should_quit = true;
                }
            }
            // Input and trigger are disabled while a lookup is in flight
            _ if self.is_loading() => {}
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char('u') if ctrl => {
                self.input.clear();
            }
            KeyCode::Char(c)
                if !key_event
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input.push(c);
            }
            _ => {}
        }
    }

    /// Validates the typed city and starts a lookup.
    ///
    /// Empty or whitespace-only input shows a validation notification and
    /// makes no request; the current state is left as it is.
    pub fn submit(&mut self) {
        if self.is_loading() {
            return;
        }

        match Query::parse(&self.input) {
            Ok(query) => self.begin_lookup(query),
            Err(e) => {
                debug!("rejected empty city input");
                self.notification = Some(Notification::from_query_error(&e));
            }
        }
    }

    /// Moves to Loading and spawns the fetch
    fn begin_lookup(&mut self, query: Query) {
        self.notification = None;
        self.state = RequestState::Loading(query.clone());
        self.lookups.spawn(query);
    }

    /// Applies the outcome of a lookup, replacing the current state
    pub fn finish_lookup(&mut self, result: Result<WeatherSnapshot, FetchError>) {
        self.state = match result {
            Ok(snapshot) => RequestState::Success(snapshot),
            Err(e) => {
                self.notification = Some(Notification::from_fetch_error(&e));
                RequestState::Failed(e)
            }
        };
    }

    /// Applies any lookups that finished since the last call
    pub fn poll_lookups(&mut self) {
        while let Some(message) = self.lookups.try_recv() {
            self.apply(message);
        }
    }

    /// Waits for the in-flight lookup to finish and applies it
    ///
    /// Returns `false` if no lookup could complete.
    pub async fn wait_for_lookup(&mut self) -> bool {
        if !self.is_loading() {
            return false;
        }
        match self.lookups.recv().await {
            Some(message) => {
                self.apply(message);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, message: LookupMessage) {
        match message {
            LookupMessage::Completed { query, result } => {
                debug!(city = %query, ok = result.is_ok(), "applying lookup result");
                self.finish_lookup(result);
            }
        }
    }

    /// Advances animations and expires old notifications
    pub fn tick(&mut self, now: Instant) {
        if self.is_loading() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now, self.notification_ttl))
        {
            self.notification = None;
        }
    }

    /// Removes the notification from the screen
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ConditionCategory;
    use chrono::Utc;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn test_app() -> App {
        // Lookups spawned here are never awaited; keep them off the real provider
        let client = WeatherClient::new("KEY").with_endpoint("http://127.0.0.1:9/weather");
        App::new(client, Duration::from_secs(5))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
    }

    fn sample_snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            location: "Paris".to_string(),
            temperature: 18.2,
            feels_like: 17.5,
            humidity: 60,
            wind_kmh: 10.8,
            condition: ConditionCategory::Clear,
            description: "céu limpo".to_string(),
            icon_code: Some("01d".to_string()),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_app_starts_idle() {
        let app = test_app();
        assert!(matches!(app.state, RequestState::Idle));
        assert!(app.input.is_empty());
        assert!(app.notification.is_none());
        assert!(!app.is_loading());
    }

    #[test]
    fn test_typing_updates_input() {
        let mut app = test_app();
        type_text(&mut app, "Rio");
        assert_eq!(app.input, "Rio");

        app.handle_key(key_event(KeyCode::Backspace));
        assert_eq!(app.input, "Ri");

        app.handle_key(ctrl('u'));
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_typing_q_does_not_quit() {
        let mut app = test_app();
        type_text(&mut app, "Quebec");
        assert!(!app.should_quit);
        assert_eq!(app.input, "Quebec");
    }

    #[test]
    fn test_submit_whitespace_shows_validation() {
        let mut app = test_app();
        type_text(&mut app, "   ");
        app.handle_key(key_event(KeyCode::Enter));

        assert!(matches!(app.state, RequestState::Idle));
        let notification = app.notification.as_ref().expect("validation notification");
        assert_eq!(notification.title, "Enter a city");
    }

    #[test]
    fn test_validation_keeps_previous_snapshot() {
        let mut app = test_app();
        app.state = RequestState::Success(sample_snapshot());
        app.submit();

        assert!(app.snapshot().is_some());
        assert!(app.notification.is_some());
    }

    #[tokio::test]
    async fn test_submit_valid_query_enters_loading() {
        let mut app = test_app();
        type_text(&mut app, "  Paris ");
        app.handle_key(key_event(KeyCode::Enter));

        match &app.state {
            RequestState::Loading(query) => assert_eq!(query.as_str(), "Paris"),
            other => panic!("Expected Loading, got {:?}", other),
        }
        assert!(app.is_loading());
    }

    #[tokio::test]
    async fn test_input_disabled_while_loading() {
        let mut app = test_app();
        type_text(&mut app, "Paris");
        app.handle_key(key_event(KeyCode::Enter));

        type_text(&mut app, "xyz");
        app.handle_key(key_event(KeyCode::Backspace));
        app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(app.input, "Paris");
        assert!(app.is_loading());
    }

    #[test]
    fn test_finish_lookup_success() {
        let mut app = test_app();
        app.finish_lookup(Ok(sample_snapshot()));

        assert!(!app.is_loading());
        assert_eq!(app.snapshot().unwrap().location, "Paris");
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_finish_lookup_failure_clears_snapshot() {
        let mut app = test_app();
        app.state = RequestState::Success(sample_snapshot());

        app.finish_lookup(Err(FetchError::NotFound("Atlantis".to_string())));

        assert!(!app.is_loading());
        assert!(app.snapshot().is_none());
        assert!(matches!(app.state, RequestState::Failed(FetchError::NotFound(_))));
        let notification = app.notification.as_ref().expect("error notification");
        assert_eq!(notification.title, "City not found");
        assert!(notification.description.contains("Atlantis"));
    }

    #[test]
    fn test_notifications_distinguish_error_kinds() {
        let provider = Notification::from_fetch_error(&FetchError::Provider {
            status: 401,
            message: "Invalid API key".to_string(),
        });
        assert_eq!(provider.title, "Weather provider error");
        assert!(provider.description.contains("401"));

        let parse = Notification::from_fetch_error(&FetchError::Parse("bad".to_string()));
        assert_eq!(parse.title, "Unexpected response");
    }

    #[test]
    fn test_esc_dismisses_notification_before_quitting() {
        let mut app = test_app();
        app.notification = Some(Notification::new("t", "d"));

        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.notification.is_none());
        assert!(!app.should_quit);

        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = test_app();
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = test_app();
        app.handle_key(key_event(KeyCode::F(1)));
        assert!(app.show_help);

        // Typing is swallowed by the overlay
        type_text(&mut app, "abc");
        assert!(app.input.is_empty());

        app.handle_key(key_event(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tick_expires_notification() {
        let mut app = test_app();
        let notification = Notification::new("t", "d");
        let shown = notification.shown_at;
        app.notification = Some(notification);

        app.tick(shown + Duration::from_secs(1));
        assert!(app.notification.is_some());

        app.tick(shown + Duration::from_secs(5));
        assert!(app.notification.is_none());
    }

    #[tokio::test]
    async fn test_wait_for_lookup_without_request() {
        let mut app = test_app();
        assert!(!app.wait_for_lookup().await);
    }
}
