//! Dashboard view state
//!
//! Everything the views draw lives here. Each game has one [`GameRow`]
//! holding the state of its controls; rows are looked up by game id and
//! never by building element names out of the id.

use std::collections::HashMap;

use crate::api::Platform;
use crate::shared::UserStatus;
use crate::storage::catalog::CatalogGame;

/// A platform toggle of a row or of the default-platform bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformControl {
    pub platform: Platform,
    pub disabled: bool,
}

impl PlatformControl {
    pub fn toggle(&mut self) {
        self.disabled = !self.disabled;
    }
}

fn all_platforms(enabled: &[Platform]) -> Vec<PlatformControl> {
    Platform::ALL
        .into_iter()
        .map(|platform| PlatformControl {
            platform,
            disabled: !enabled.contains(&platform),
        })
        .collect()
}

/// UI state of one game in the library list
#[derive(Debug, Clone, PartialEq)]
pub struct GameRow {
    pub id: String,
    pub title: String,
    pub platforms: Vec<PlatformControl>,
    pub download_visible: bool,
    pub update_visible: bool,
    pub progress_visible: bool,
    pub progress_text: String,
    pub spinner_visible: bool,
    /// "In repository" indicator
    pub repo_visible: bool,
    /// Whether the row passes the current filters
    pub visible: bool,
}

impl GameRow {
    pub fn from_catalog(game: &CatalogGame) -> Self {
        Self {
            id: game.id.clone(),
            title: game.title.clone(),
            platforms: all_platforms(&game.platforms),
            download_visible: !game.in_library,
            update_visible: game.in_library,
            progress_visible: false,
            progress_text: String::new(),
            spinner_visible: false,
            repo_visible: game.in_library,
            visible: true,
        }
    }

    /// Row for a game the catalog does not know about
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: id.to_string(),
            platforms: all_platforms(&Platform::ALL),
            download_visible: true,
            update_visible: false,
            progress_visible: false,
            progress_text: String::new(),
            spinner_visible: false,
            repo_visible: false,
            visible: true,
        }
    }

    /// Text the search filter runs against
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.id)
    }

    pub fn platform_mut(&mut self, platform: Platform) -> Option<&mut PlatformControl> {
        self.platforms.iter_mut().find(|c| c.platform == platform)
    }

    #[cfg(test)]
    pub fn platform(&self, platform: Platform) -> Option<&PlatformControl> {
        self.platforms.iter().find(|c| c.platform == platform)
    }

    /// Download button is shown exactly when files are missing
    pub fn set_missing(&mut self, missing: bool) {
        self.download_visible = missing;
    }

    pub fn show_downloading(&mut self) {
        self.progress_visible = true;
        self.spinner_visible = true;
        self.download_visible = false;
        self.update_visible = false;
    }

    pub fn show_stopped(&mut self) {
        self.progress_visible = false;
        self.spinner_visible = false;
        self.download_visible = true;
        self.repo_visible = true;
    }

    pub fn show_finished(&mut self) {
        self.progress_visible = false;
        self.spinner_visible = false;
        self.repo_visible = true;
    }
}

/// All rows, in display order, indexed by game id
#[derive(Debug, Clone, Default)]
pub struct LibraryState {
    rows: Vec<GameRow>,
    index: HashMap<String, usize>,
}

impl LibraryState {
    /// Build from rows; later duplicates of an id are dropped
    pub fn from_rows(rows: impl IntoIterator<Item = GameRow>) -> Self {
        let mut library = Self::default();
        for row in rows {
            if !library.index.contains_key(&row.id) {
                library.push(row);
            }
        }
        library
    }

    fn push(&mut self, row: GameRow) -> usize {
        let pos = self.rows.len();
        self.index.insert(row.id.clone(), pos);
        self.rows.push(row);
        pos
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&GameRow> {
        self.index.get(id).map(|&pos| &self.rows[pos])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut GameRow> {
        match self.index.get(id) {
            Some(&pos) => self.rows.get_mut(pos),
            None => None,
        }
    }

    /// Row for `id`, adding a placeholder row if there is none
    pub fn ensure(&mut self, id: &str) -> &mut GameRow {
        let pos = match self.index.get(id) {
            Some(&pos) => pos,
            None => self.push(GameRow::placeholder(id)),
        };
        &mut self.rows[pos]
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameRow> {
        self.rows.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameRow> {
        self.rows.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.rows.iter().filter(|r| r.visible).count()
    }
}

/// Icon next to the session status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserIcon {
    /// Logged in
    User,
    /// Login in progress
    Spinner,
    /// Needs attention
    Warning,
    /// Not logged in
    #[default]
    SignIn,
}

impl UserIcon {
    pub fn for_status(status: UserStatus) -> Self {
        match status {
            UserStatus::LoggedOn => UserIcon::User,
            UserStatus::Running | UserStatus::RunningTwoFactor => UserIcon::Spinner,
            UserStatus::Recaptcha => UserIcon::Warning,
            UserStatus::Unauthenticated => UserIcon::SignIn,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            UserIcon::User => "👤",
            UserIcon::Spinner => "🔄",
            UserIcon::Warning => "⚠",
            UserIcon::SignIn => "🔑",
        }
    }
}

/// Session badge in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBadge {
    pub icon: UserIcon,
    pub status_line: String,
}

impl Default for UserBadge {
    fn default() -> Self {
        Self {
            icon: UserIcon::SignIn,
            status_line: "Checking session...".to_string(),
        }
    }
}

/// "Downloads in progress" indicator in the header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadsIndicator {
    pub visible: bool,
    pub count: usize,
}

/// Modal dialogs; opened by session changes, closed only by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modals {
    pub login: bool,
    pub two_factor: bool,
}

impl Modals {
    pub fn any_open(&self) -> bool {
        self.login || self.two_factor
    }

    pub fn close_all(&mut self) {
        self.login = false;
        self.two_factor = false;
    }
}

/// Search bar state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Text of the search field
    pub query: String,
    /// Whether the clear button is shown
    pub clear_visible: bool,
    /// Only list games that are downloading
    pub downloads_only: bool,
}

/// Non-blocking failure message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub action: String,
    pub reason: String,
}

/// Overall dashboard state
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Whether the server's active-downloads list has arrived
    pub bootstrapped: bool,
    pub library: LibraryState,
    pub default_platforms: Vec<PlatformControl>,
    pub user: UserBadge,
    pub downloads: DownloadsIndicator,
    pub modals: Modals,
    pub filter: FilterState,
    pub notice: Option<Notice>,
}

impl DashboardState {
    pub fn new(library: LibraryState) -> Self {
        Self {
            bootstrapped: false,
            library,
            default_platforms: all_platforms(&Platform::ALL),
            user: UserBadge::default(),
            downloads: DownloadsIndicator::default(),
            modals: Modals::default(),
            filter: FilterState::default(),
            notice: None,
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(LibraryState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_game(id: &str, in_library: bool) -> CatalogGame {
        CatalogGame {
            id: id.to_string(),
            title: id.to_uppercase(),
            platforms: vec![Platform::Linux],
            in_library,
        }
    }

    #[test]
    fn test_row_from_catalog() {
        let row = GameRow::from_catalog(&catalog_game("owned", true));
        assert!(row.repo_visible);
        assert!(row.update_visible);
        assert!(!row.download_visible);
        assert!(row.platform(Platform::Windows).unwrap().disabled);
        assert!(!row.platform(Platform::Linux).unwrap().disabled);

        let row = GameRow::from_catalog(&catalog_game("missing", false));
        assert!(row.download_visible);
        assert!(!row.repo_visible);
    }

    #[test]
    fn test_library_lookup_and_ensure() {
        let mut library = LibraryState::from_rows(vec![
            GameRow::placeholder("a"),
            GameRow::placeholder("b"),
            GameRow::placeholder("a"),
        ]);
        assert_eq!(library.len(), 2);
        assert!(library.get("b").is_some());
        assert!(library.get("c").is_none());

        library.ensure("c").progress_text = "1 %".to_string();
        assert_eq!(library.len(), 3);
        assert_eq!(library.get("c").unwrap().progress_text, "1 %");

        library.ensure("a");
        assert_eq!(library.len(), 3);
    }

    #[test]
    fn test_user_icons() {
        assert_eq!(UserIcon::for_status(UserStatus::LoggedOn), UserIcon::User);
        assert_eq!(UserIcon::for_status(UserStatus::RunningTwoFactor), UserIcon::Spinner);
        assert_eq!(UserIcon::for_status(UserStatus::Recaptcha), UserIcon::Warning);
        assert_eq!(UserIcon::for_status(UserStatus::Unauthenticated), UserIcon::SignIn);
    }
}
