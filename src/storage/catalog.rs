//! Game catalog loading
//!
//! lgogdownloader caches the account's game list in `gamedetails.json`.
//! The dashboard builds one row per game from it.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::api::Platform;

#[derive(Debug, Deserialize)]
struct GameDetailsFile {
    #[serde(default)]
    games: Vec<GameDetails>,
}

#[derive(Debug, Deserialize)]
struct GameDetails {
    gamename: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    installers: Vec<Installer>,
}

#[derive(Debug, Deserialize)]
struct Installer {
    #[serde(default)]
    platform: u32,
}

/// A game of the user's library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogGame {
    /// Identifier used by the server (`gamename`)
    pub id: String,
    /// Display title
    pub title: String,
    /// Platforms the game has installers for
    pub platforms: Vec<Platform>,
    /// Whether the game's directory exists in the library
    pub in_library: bool,
}

/// Parse `gamedetails.json` content
pub fn parse_catalog(content: &str) -> Result<Vec<CatalogGame>> {
    let file: GameDetailsFile = serde_json::from_str(content)?;
    let mut games: Vec<CatalogGame> = file
        .games
        .into_iter()
        .map(|details| {
            let mask = details.installers.iter().fold(0, |mask, i| mask | i.platform);
            let title = if details.title.is_empty() {
                details.gamename.clone()
            } else {
                details.title
            };
            CatalogGame {
                id: details.gamename,
                title,
                platforms: Platform::from_mask(mask),
                in_library: false,
            }
        })
        .collect();
    games.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    games.dedup_by(|a, b| a.id == b.id);
    Ok(games)
}

/// Load the catalog and mark games already present in `library_dir`
pub fn load_catalog(details_path: &Path, library_dir: &Path) -> Result<Vec<CatalogGame>> {
    let content = std::fs::read_to_string(details_path)
        .with_context(|| format!("Unable to load the GOG games database {:?}", details_path))?;
    let mut games = parse_catalog(&content)?;
    for game in &mut games {
        game.in_library = library_dir.join(&game.id).is_dir();
    }
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DETAILS: &str = r#"{
        "date": "2024-01-01",
        "games": [
            {
                "gamename": "witcher_3",
                "title": "The Witcher 3",
                "installers": [{"platform": 1}, {"platform": 1}]
            },
            {
                "gamename": "baldurs_gate",
                "title": "Baldur's Gate",
                "installers": [{"platform": 1}, {"platform": 2}, {"platform": 4}]
            },
            {
                "gamename": "untitled"
            }
        ]
    }"#;

    #[test]
    fn test_parse_catalog() {
        let games = parse_catalog(DETAILS).unwrap();

        assert_eq!(games.len(), 3);
        assert_eq!(games[0].id, "baldurs_gate");
        assert_eq!(games[0].platforms, Platform::ALL.to_vec());
        assert_eq!(games[1].id, "witcher_3");
        assert_eq!(games[1].platforms, vec![Platform::Windows]);
        assert_eq!(games[2].title, "untitled");
        assert!(games[2].platforms.is_empty());
    }

    #[test]
    fn test_parse_invalid_catalog() {
        assert!(parse_catalog("not json").is_err());
    }

    #[test]
    fn test_load_catalog_marks_library_games() {
        let cache = TempDir::new().unwrap();
        let library = TempDir::new().unwrap();
        let details = cache.path().join("gamedetails.json");
        std::fs::write(&details, DETAILS).unwrap();
        std::fs::create_dir(library.path().join("witcher_3")).unwrap();

        let games = load_catalog(&details, library.path()).unwrap();

        let witcher = games.iter().find(|g| g.id == "witcher_3").unwrap();
        let baldur = games.iter().find(|g| g.id == "baldurs_gate").unwrap();
        assert!(witcher.in_library);
        assert!(!baldur.in_library);
    }

    #[test]
    fn test_load_missing_catalog() {
        let dir = TempDir::new().unwrap();
        assert!(load_catalog(&dir.path().join("nope.json"), dir.path()).is_err());
    }
}
