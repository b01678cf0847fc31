use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct StandingsRow {
    pub position: u32,
    pub team: String,
    // Negative after a points deduction.
    pub points: i32,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub goal_difference_label: String,
    // None when no games have been played.
    pub win_percentage: Option<f64>,
    pub goals_per_game: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawTableEntry {
    position: u32,
    team: RawTeam,
    points: i32,
    #[serde(rename = "playedGames")]
    played_games: u32,
    won: u32,
    draw: u32,
    lost: u32,
    #[serde(rename = "goalsFor")]
    goals_for: u32,
    #[serde(rename = "goalsAgainst")]
    goals_against: u32,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    name: String,
}

/// Builds the league table from a standings payload.
///
/// Returns `None` when the payload carries no `standings` key. The `TOTAL`
/// group is preferred over home/away splits; without a type tag the first
/// group is used. Entries missing required fields are skipped.
pub fn build_standings_table(payload: &Value) -> Option<Vec<StandingsRow>> {
    let groups = payload.get("standings")?.as_array()?;
    let group = groups
        .iter()
        .find(|g| g.get("type").and_then(|t| t.as_str()) == Some("TOTAL"))
        .or_else(|| groups.first())?;
    let table = group.get("table")?.as_array()?;

    let rows = table
        .iter()
        .filter_map(|entry| RawTableEntry::deserialize(entry).ok())
        .map(standings_row)
        .collect();
    Some(rows)
}

fn standings_row(raw: RawTableEntry) -> StandingsRow {
    let goal_difference = raw.goals_for as i32 - raw.goals_against as i32;
    StandingsRow {
        position: raw.position,
        team: raw.team.name,
        points: raw.points,
        played: raw.played_games,
        won: raw.won,
        drawn: raw.draw,
        lost: raw.lost,
        goals_for: raw.goals_for,
        goals_against: raw.goals_against,
        goal_difference,
        goal_difference_label: format_goal_difference(goal_difference),
        win_percentage: win_percentage(raw.points, raw.played_games),
        goals_per_game: per_game(raw.goals_for, raw.played_games),
    }
}

/// `+n` for positive values, the plain integer otherwise (`0`, `-3`).
pub fn format_goal_difference(value: i32) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// Share of available points won, in percent with one decimal. A deduction
/// that leaves the total below zero reads as 0%.
pub fn win_percentage(points: i32, played: u32) -> Option<f64> {
    if played == 0 {
        return None;
    }
    let pct = points as f64 / (played as f64 * 3.0) * 100.0;
    Some(round_to(pct.clamp(0.0, 100.0), 1))
}

fn per_game(goals: u32, played: u32) -> Option<f64> {
    if played == 0 {
        return None;
    }
    Some(round_to(goals as f64 / played as f64, 2))
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
