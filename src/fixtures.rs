use chrono::NaiveDateTime;
use serde_json::Value;

use crate::standings::StandingsRow;

const UTC_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub kickoff: NaiveDateTime,
    pub home: String,
    pub away: String,
    pub matchday: Option<u32>,
    // Full-time (home, away); only set once the match is finished.
    pub score: Option<(u32, u32)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedFixture {
    pub fixture: Fixture,
    pub home_goal_difference_label: String,
    pub away_goal_difference_label: String,
}

impl AnnotatedFixture {
    pub fn date_label(&self) -> String {
        self.fixture.kickoff.format("%d/%m/%Y").to_string()
    }

    pub fn time_label(&self) -> String {
        self.fixture.kickoff.format("%H:%M").to_string()
    }

    pub fn home_label(&self) -> String {
        team_with_label(&self.fixture.home, &self.home_goal_difference_label)
    }

    pub fn away_label(&self) -> String {
        team_with_label(&self.fixture.away, &self.away_goal_difference_label)
    }

    /// `MD n`, or `-` when the payload carries no matchday.
    pub fn matchday_label(&self) -> String {
        match self.fixture.matchday {
            Some(day) => format!("MD {day}"),
            None => "-".to_string(),
        }
    }

    pub fn score_label(&self) -> String {
        match self.fixture.score {
            Some((home, away)) => format!("{home} x {away}"),
            None => "-".to_string(),
        }
    }
}

fn team_with_label(team: &str, label: &str) -> String {
    if label.is_empty() {
        team.to_string()
    } else {
        format!("{team} {label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureSelection {
    /// Head of an ascending list: the next matches to be played.
    Upcoming,
    /// Tail of an ascending list: the most recent results.
    Recent,
}

/// Parses, selects and annotates fixtures from a matches payload.
///
/// The payload is expected in ascending kickoff order; no sorting happens
/// here. Returns `None` when the `matches` key is absent.
pub fn build_fixture_list(
    payload: &Value,
    standings: &[StandingsRow],
    limit: usize,
    selection: FixtureSelection,
) -> Option<Vec<AnnotatedFixture>> {
    let matches = payload.get("matches")?.as_array()?;
    let parsed: Vec<Fixture> = matches.iter().filter_map(parse_fixture).collect();

    let selected = match selection {
        FixtureSelection::Upcoming => &parsed[..limit.min(parsed.len())],
        FixtureSelection::Recent => &parsed[parsed.len().saturating_sub(limit)..],
    };

    Some(
        selected
            .iter()
            .map(|fixture| annotate_fixture(fixture.clone(), standings))
            .collect(),
    )
}

pub fn parse_fixture(v: &Value) -> Option<Fixture> {
    let raw_date = v.get("utcDate")?.as_str()?;
    let kickoff = NaiveDateTime::parse_from_str(raw_date, UTC_DATE_FORMAT).ok()?;
    let home = team_name(v.get("homeTeam")?)?;
    let away = team_name(v.get("awayTeam")?)?;
    let matchday = v.get("matchday").and_then(|x| x.as_u64()).map(|x| x as u32);

    let full_time = v.get("score").and_then(|s| s.get("fullTime"));
    let score = full_time.and_then(|ft| {
        let home = ft.get("home")?.as_u64()? as u32;
        let away = ft.get("away")?.as_u64()? as u32;
        Some((home, away))
    });

    Some(Fixture {
        kickoff,
        home,
        away,
        matchday,
        score,
    })
}

fn team_name(team: &Value) -> Option<String> {
    team.get("name")?.as_str().map(|s| s.to_string())
}

pub fn annotate_fixture(fixture: Fixture, standings: &[StandingsRow]) -> AnnotatedFixture {
    let home_goal_difference_label = goal_difference_label(&fixture.home, standings);
    let away_goal_difference_label = goal_difference_label(&fixture.away, standings);
    AnnotatedFixture {
        fixture,
        home_goal_difference_label,
        away_goal_difference_label,
    }
}

/// `(GD: +n)` for a team found by exact name in the table, empty otherwise.
pub fn goal_difference_label(team: &str, standings: &[StandingsRow]) -> String {
    match standings.iter().find(|row| row.team == team) {
        Some(row) => format!("(GD: {:+})", row.goal_difference),
        None => String::new(),
    }
}
