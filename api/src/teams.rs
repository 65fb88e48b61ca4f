//! Team profile and roster normalizers.

use crate::wire::{RosterResponse, TeamsResponse};
use crate::{RosterPlayer, TeamProfile};

/// Profile of the first (only) team in a `/teams/{id}` response.
pub fn normalize_team_profile(raw: &TeamsResponse, team_id: u32) -> TeamProfile {
    let team = raw
        .teams
        .as_ref()
        .and_then(|t| t.first())
        .cloned()
        .unwrap_or_default();

    TeamProfile {
        id: team.id.unwrap_or(team_id),
        name: team.name.unwrap_or_default(),
        short_name: team.short_name.unwrap_or_default(),
        abbreviation: team.abbreviation.unwrap_or_default(),
        location: team.location_name.unwrap_or_default(),
        first_year_of_play: team.first_year_of_play.unwrap_or_default(),
        league: team.league.and_then(|l| l.name).unwrap_or_default(),
        division: team.division.and_then(|d| d.name).unwrap_or_default(),
        venue: team.venue.and_then(|v| v.name).unwrap_or_default(),
    }
}

/// Active roster with season-stat passthrough, pitchers first and each group
/// ordered by jersey number string.
pub fn normalize_roster(raw: &RosterResponse) -> Vec<RosterPlayer> {
    let mut roster: Vec<RosterPlayer> = raw
        .roster
        .iter()
        .flatten()
        .map(|entry| {
            let person = entry.person.clone().unwrap_or_default();
            let position = entry.position.clone().unwrap_or_default();

            // First non-empty stat split is the season line.
            let stats = person
                .stats
                .iter()
                .flatten()
                .filter_map(|group| group.splits.as_ref())
                .filter_map(|splits| splits.first())
                .find_map(|split| split.stat.clone())
                .unwrap_or(serde_json::Value::Null);

            RosterPlayer {
                id: person.id.unwrap_or(0),
                name: person.full_name.unwrap_or_default(),
                number: entry.jersey_number.clone().unwrap_or_default(),
                position: position.abbreviation.unwrap_or_default(),
                position_type: position.kind.unwrap_or_default(),
                bats: person.bat_side.and_then(|b| b.code),
                throws: person.pitch_hand.and_then(|h| h.code),
                age: person.current_age.unwrap_or(0),
                stats,
            }
        })
        .collect();

    roster.sort_by(|a, b| {
        let a_group = usize::from(a.position_type != "Pitcher");
        let b_group = usize::from(b.position_type != "Pitcher");
        a_group.cmp(&b_group).then_with(|| a.number.cmp(&b.number))
    });
    roster
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_maps_nested_names() {
        let raw: TeamsResponse = serde_json::from_str(
            r#"{"teams":[{
                "id":147,"name":"New York Yankees","shortName":"NY Yankees",
                "abbreviation":"NYY","locationName":"Bronx","firstYearOfPlay":"1903",
                "league":{"id":103,"name":"American League"},
                "division":{"id":201,"name":"American League East"},
                "venue":{"id":3313,"name":"Yankee Stadium"}
            }]}"#,
        )
        .unwrap();
        let profile = normalize_team_profile(&raw, 147);
        assert_eq!(profile.name, "New York Yankees");
        assert_eq!(profile.league, "American League");
        assert_eq!(profile.venue, "Yankee Stadium");
        assert_eq!(profile.first_year_of_play, "1903");
    }

    #[test]
    fn missing_team_keeps_the_requested_id() {
        let profile = normalize_team_profile(&TeamsResponse::default(), 145);
        assert_eq!(profile.id, 145);
        assert!(profile.name.is_empty());
    }

    #[test]
    fn roster_sorts_pitchers_first_then_by_number() {
        let raw: RosterResponse = serde_json::from_str(
            r#"{"roster":[
                {"person":{"id":1,"fullName":"Shortstop"},"jerseyNumber":"2",
                 "position":{"abbreviation":"SS","type":"Infielder"}},
                {"person":{"id":2,"fullName":"Closer","stats":[{"splits":[{"stat":{"era":"2.10"}}]}]},
                 "jerseyNumber":"54","position":{"abbreviation":"P","type":"Pitcher"}},
                {"person":{"id":3,"fullName":"Starter"},"jerseyNumber":"22",
                 "position":{"abbreviation":"P","type":"Pitcher"}}
            ]}"#,
        )
        .unwrap();
        let roster = normalize_roster(&raw);
        assert_eq!(roster[0].name, "Starter");
        assert_eq!(roster[1].name, "Closer");
        assert_eq!(roster[2].name, "Shortstop");
        assert_eq!(roster[1].stats["era"], "2.10");
        assert!(roster[0].stats.is_null());
    }
}
