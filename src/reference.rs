//! Read-only team reference snapshot.
//!
//! The relational reference store is an external collaborator; this module
//! consumes its exported snapshot: a JSON array of team rows. Display names
//! and abbreviations resolve from here first, and the bracket engine uses the
//! league column as its last-resort league inference.

use log::{info, warn};
use mlb_api::{League, TeamIdentity, TeamMap};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TeamRow {
    id: u32,
    name: String,
    abbreviation: String,
    league: Option<String>, // "AL" | "NL"
}

#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    identities: TeamMap,
    leagues: HashMap<u32, League>,
}

impl TeamDirectory {
    /// Load a snapshot file. A missing or unreadable file yields an empty
    /// directory — every consumer falls back to upstream-supplied names.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let contents = match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => contents,
            Err(_) => {
                info!(
                    "no team snapshot at {:?}, display names fall back to upstream",
                    path.as_ref()
                );
                return Self::default();
            }
        };

        let rows: Vec<TeamRow> = match serde_json::from_str(&contents) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("failed to parse team snapshot {:?}: {e}", path.as_ref());
                return Self::default();
            }
        };

        let mut directory = Self::default();
        for row in rows {
            if let Some(league) = row.league.as_deref().and_then(parse_league) {
                directory.leagues.insert(row.id, league);
            }
            directory.identities.insert(
                row.id,
                TeamIdentity {
                    name: row.name,
                    abbreviation: row.abbreviation,
                },
            );
        }
        directory
    }

    pub fn identities(&self) -> &TeamMap {
        &self.identities
    }

    pub fn leagues(&self) -> &HashMap<u32, League> {
        &self.leagues
    }

    pub fn get(&self, team_id: u32) -> Option<&TeamIdentity> {
        self.identities.get(&team_id)
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

fn parse_league(s: &str) -> Option<League> {
    match s {
        "AL" => Some(League::American),
        "NL" => Some(League::National),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_identities_and_leagues() {
        let file = std::env::temp_dir().join(".dugout_teams_test.json");
        std::fs::write(
            &file,
            r#"[
                {"id":147,"name":"New York Yankees","abbreviation":"NYY","league":"AL"},
                {"id":121,"name":"New York Mets","abbreviation":"NYM","league":"NL"},
                {"id":531,"name":"Affiliate Club","abbreviation":"AFF"}
            ]"#,
        )
        .unwrap();

        let directory = TeamDirectory::load_from(&file);
        let _ = std::fs::remove_file(&file);

        assert_eq!(directory.get(147).unwrap().abbreviation, "NYY");
        assert_eq!(directory.leagues().get(&147), Some(&League::American));
        assert_eq!(directory.leagues().get(&121), Some(&League::National));
        assert!(directory.leagues().get(&531).is_none());
        assert_eq!(directory.get(531).unwrap().name, "Affiliate Club");
    }

    #[test]
    fn missing_or_corrupt_snapshot_is_empty_not_fatal() {
        let missing = TeamDirectory::load_from("/nonexistent/teams.json");
        assert!(missing.is_empty());

        let file = std::env::temp_dir().join(".dugout_teams_corrupt.json");
        std::fs::write(&file, "{ not json").unwrap();
        let corrupt = TeamDirectory::load_from(&file);
        let _ = std::fs::remove_file(&file);
        assert!(corrupt.is_empty());
    }
}
