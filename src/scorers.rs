use serde::Deserialize;
use serde_json::Value;

use crate::standings::round_to;

#[derive(Debug, Clone, PartialEq)]
pub struct ScorerRow {
    pub player: String,
    pub team: String,
    pub goals: u32,
    pub matches: u32,
    pub average: f64,
    pub assists: Option<u32>,
    pub penalties: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawScorer {
    player: RawName,
    team: RawName,
    goals: u32,
    #[serde(rename = "playedMatches", default)]
    played_matches: Option<u32>,
    #[serde(default)]
    assists: Option<u32>,
    #[serde(default)]
    penalties: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawName {
    name: String,
}

/// Scorer rows in upstream order (goals descending, as served).
pub fn build_scorers_table(payload: &Value) -> Option<Vec<ScorerRow>> {
    let scorers = payload.get("scorers")?.as_array()?;
    let rows = scorers
        .iter()
        .filter_map(|s| RawScorer::deserialize(s).ok())
        .map(|raw| {
            let matches = raw.played_matches.unwrap_or(0);
            ScorerRow {
                player: raw.player.name,
                team: raw.team.name,
                goals: raw.goals,
                matches,
                average: goals_per_match(raw.goals, matches),
                assists: raw.assists,
                penalties: raw.penalties,
            }
        })
        .collect();
    Some(rows)
}

pub fn goals_per_match(goals: u32, matches: u32) -> f64 {
    if matches == 0 {
        return 0.0;
    }
    round_to(goals as f64 / matches as f64, 2)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScorerHighlights {
    pub top: ScorerRow,
}

impl ScorerHighlights {
    pub fn headline(&self) -> String {
        format!("{} ({})", self.top.player, self.top.team)
    }

    pub fn detail(&self) -> String {
        format!("{} goals in {} matches", self.top.goals, self.top.matches)
    }

    pub fn average_line(&self) -> String {
        format!("{:.2} per match", self.top.average)
    }

    pub fn total_line(&self) -> String {
        format!("Total: {} goals", self.top.goals)
    }
}

/// The first row is the top scorer; the list is not re-sorted here.
pub fn scorer_highlights(rows: &[ScorerRow]) -> Option<ScorerHighlights> {
    rows.first().map(|top| ScorerHighlights { top: top.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_matches_average_is_zero() {
        assert_eq!(goals_per_match(3, 0), 0.0);
        assert_eq!(goals_per_match(15, 10), 1.5);
        assert_eq!(goals_per_match(2, 3), 0.67);
    }

    #[test]
    fn played_matches_defaults_to_zero() {
        let payload = json!({"scorers": [{
            "player": {"name": "Striker"},
            "team": {"name": "Club"},
            "goals": 4
        }]});
        let rows = build_scorers_table(&payload).expect("scorers present");
        assert_eq!(rows[0].matches, 0);
        assert_eq!(rows[0].average, 0.0);
        assert_eq!(rows[0].assists, None);
    }

    #[test]
    fn highlights_take_first_entry() {
        let payload = json!({"scorers": [
            {"player": {"name": "A"}, "team": {"name": "X"}, "goals": 15, "playedMatches": 10, "assists": 3},
            {"player": {"name": "B"}, "team": {"name": "Y"}, "goals": 18, "playedMatches": 12}
        ]});
        let rows = build_scorers_table(&payload).expect("scorers present");
        let highlights = scorer_highlights(&rows).expect("non-empty");
        assert_eq!(highlights.top.player, "A");
        assert_eq!(highlights.headline(), "A (X)");
        assert_eq!(highlights.average_line(), "1.50 per match");
    }

    #[test]
    fn missing_key_is_none() {
        assert!(build_scorers_table(&json!({"errorCode": 403})).is_none());
        assert!(scorer_highlights(&[]).is_none());
    }
}
