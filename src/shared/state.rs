//! Shared application state between the dashboard and the worker

use crate::config::AppConfig;

/// Ordered set of games currently downloading
///
/// Each identifier appears at most once; insertion order is preserved so
/// the status poll reports games in the order they were started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveDownloads {
    games: Vec<String>,
}

impl ActiveDownloads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a game; returns false if it was already present
    pub fn insert(&mut self, game: &str) -> bool {
        if self.contains(game) {
            return false;
        }
        self.games.push(game.to_string());
        true
    }

    /// Remove a game; returns false if it was not present
    pub fn remove(&mut self, game: &str) -> bool {
        match self.games.iter().position(|g| g == game) {
            Some(pos) => {
                self.games.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, game: &str) -> bool {
        self.games.iter().any(|g| g == game)
    }

    /// Replace the whole set with the server's list, dropping duplicates
    pub fn replace_all<I, S>(&mut self, games: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.games.clear();
        for game in games {
            self.insert(game.as_ref());
        }
    }

    /// Copy of the identifiers, for sending to the server
    pub fn snapshot(&self) -> Vec<String> {
        self.games.clone()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Login session state reported by `/user_status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    /// Logged in to the game store
    LoggedOn,
    /// Login in progress
    Running,
    /// Login waiting for a two-factor code
    RunningTwoFactor,
    /// Login blocked by a reCAPTCHA challenge
    Recaptcha,
    /// No session
    Unauthenticated,
}

impl UserStatus {
    /// Map the wire value; anything unrecognised counts as no session
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("logon") => UserStatus::LoggedOn,
            Some("running") => UserStatus::Running,
            Some("running_2fa") => UserStatus::RunningTwoFactor,
            Some("recaptcha") => UserStatus::Recaptcha,
            _ => UserStatus::Unauthenticated,
        }
    }

    /// Status line shown next to the user icon
    pub fn status_line(&self) -> &'static str {
        match self {
            UserStatus::LoggedOn => "Logged in",
            UserStatus::Running => "Logging in...",
            UserStatus::RunningTwoFactor => "Waiting for two-factor code",
            UserStatus::Recaptcha => "reCAPTCHA required",
            UserStatus::Unauthenticated => "Not logged in",
        }
    }
}

/// Central shared state between the dashboard and the worker
#[derive(Debug, Clone, Default)]
pub struct SharedAppState {
    /// Application configuration
    pub config: AppConfig,
    /// Games currently downloading
    pub downloads: ActiveDownloads,
}

impl SharedAppState {
    /// Create a new shared state with the given configuration
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            downloads: ActiveDownloads::new(),
        }
    }
}
