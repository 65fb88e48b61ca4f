//! Typed cache keys — one variant per logical document category.

use chrono::NaiveDate;
use std::fmt;

/// Logical identity of one cached upstream document. At most one entry exists
/// per key; the file name is stable so restarts keep warm entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Schedule {
        sport_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    },
    GameFeed {
        game_pk: u64,
    },
    PostseasonSeries {
        sport_id: u32,
        season: i32,
    },
    SeasonStandings {
        season: i32,
    },
    WildCardStandings {
        season: i32,
    },
    DivisionStandings {
        sport_id: u32,
        season: i32,
    },
    TeamProfile {
        team_id: u32,
    },
    TeamRoster {
        team_id: u32,
    },
}

impl CacheKey {
    pub fn file_name(&self) -> String {
        match self {
            CacheKey::Schedule {
                sport_id,
                start,
                end,
            } => format!("mlb_schedule_{sport_id}_{start}_{end}.json"),
            CacheKey::GameFeed { game_pk } => format!("mlb_game_{game_pk}.json"),
            CacheKey::PostseasonSeries { sport_id, season } => {
                format!("mlb_postseason_{sport_id}_{season}.json")
            }
            CacheKey::SeasonStandings { season } => {
                format!("mlb_standings_season_{season}.json")
            }
            CacheKey::WildCardStandings { season } => format!("mlb_wildcard_{season}.json"),
            CacheKey::DivisionStandings { sport_id, season } => {
                format!("milb_standings_{sport_id}_{season}.json")
            }
            CacheKey::TeamProfile { team_id } => format!("mlb_team_{team_id}.json"),
            CacheKey::TeamRoster { team_id } => format!("mlb_roster_{team_id}.json"),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name().trim_end_matches(".json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_stable_per_parameter_set() {
        let key = CacheKey::Schedule {
            sport_id: 1,
            start: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
        };
        assert_eq!(key.file_name(), "mlb_schedule_1_2025-06-01_2025-06-03.json");
        assert_eq!(key.to_string(), "mlb_schedule_1_2025-06-01_2025-06-03");

        let other = CacheKey::GameFeed { game_pk: 717626 };
        assert_eq!(other.file_name(), "mlb_game_717626.json");
        assert_ne!(key, other);
    }
}
