use anyhow::{Context, Result};
use serde_json::Value;

use crate::competitions::{Competition, SeasonInfo, season_info};
use crate::config::Config;
use crate::fixtures::{AnnotatedFixture, FixtureSelection, build_fixture_list};
use crate::football_api::{FootballApi, MatchStatus, Transport};
use crate::league_metrics::{GoalsPerGameModel, LeagueMetrics, league_metrics};
use crate::scorers::{ScorerHighlights, ScorerRow, build_scorers_table, scorer_highlights};
use crate::standings::{StandingsRow, build_standings_table};

#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    pub fixture_limit: usize,
    pub goals_model: GoalsPerGameModel,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            fixture_limit: 5,
            goals_model: GoalsPerGameModel::UniformSchedule,
        }
    }
}

impl From<&Config> for DashboardOptions {
    fn from(config: &Config) -> Self {
        Self {
            fixture_limit: config.fixture_limit,
            goals_model: config.goals_model,
        }
    }
}

/// Everything one competition tab renders. A `None` section means the
/// payload lacked its key and the section is left empty.
#[derive(Debug, Clone)]
pub struct CompetitionDashboard {
    pub competition: Competition,
    pub season: Option<SeasonInfo>,
    pub standings: Option<Vec<StandingsRow>>,
    pub metrics: Option<LeagueMetrics>,
    pub scorers: Option<Vec<ScorerRow>>,
    pub scorer_highlights: Option<ScorerHighlights>,
    pub upcoming: Option<Vec<AnnotatedFixture>>,
    pub recent: Option<Vec<AnnotatedFixture>>,
}

pub struct RawPayloads {
    pub competition: Value,
    pub standings: Value,
    pub scheduled: Value,
    pub finished: Value,
    pub scorers: Value,
}

/// Fetches the five payloads one after another; the first failure aborts.
pub fn fetch_payloads<T: Transport>(
    api: &mut FootballApi<T>,
    competition: &Competition,
) -> Result<RawPayloads> {
    let id = competition.id;
    let name = competition.name;
    Ok(RawPayloads {
        competition: api
            .competition_info(id)
            .with_context(|| format!("{name}: competition"))?,
        standings: api
            .standings(id)
            .with_context(|| format!("{name}: standings"))?,
        scheduled: api
            .matches(id, MatchStatus::Scheduled)
            .with_context(|| format!("{name}: upcoming matches"))?,
        finished: api
            .matches(id, MatchStatus::Finished)
            .with_context(|| format!("{name}: results"))?,
        scorers: api
            .scorers(id)
            .with_context(|| format!("{name}: scorers"))?,
    })
}

pub fn build_dashboard(
    competition: &Competition,
    payloads: &RawPayloads,
    options: &DashboardOptions,
) -> CompetitionDashboard {
    let standings = build_standings_table(&payloads.standings);
    let table: &[StandingsRow] = standings.as_deref().unwrap_or(&[]);
    let metrics = league_metrics(table, options.goals_model);
    let scorers = build_scorers_table(&payloads.scorers);
    let highlights = scorers.as_deref().and_then(scorer_highlights);
    let upcoming = build_fixture_list(
        &payloads.scheduled,
        table,
        options.fixture_limit,
        FixtureSelection::Upcoming,
    );
    let recent = build_fixture_list(
        &payloads.finished,
        table,
        options.fixture_limit,
        FixtureSelection::Recent,
    );

    CompetitionDashboard {
        competition: *competition,
        season: season_info(&payloads.competition),
        standings,
        metrics,
        scorers,
        scorer_highlights: highlights,
        upcoming,
        recent,
    }
}

pub fn load_competition<T: Transport>(
    api: &mut FootballApi<T>,
    competition: &Competition,
    options: &DashboardOptions,
) -> Result<CompetitionDashboard> {
    let payloads = fetch_payloads(api, competition)?;
    Ok(build_dashboard(competition, &payloads, options))
}
