use crate::standings::{StandingsRow, round_to};

/// How the league-wide goals-per-game figure is normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoalsPerGameModel {
    /// Total goals over `teams * games played by the first team`. Assumes every
    /// team has played the same number of games.
    #[default]
    UniformSchedule,
    /// Mean of each team's own goals-for per game played.
    PerTeam,
}

impl GoalsPerGameModel {
    pub fn from_env_value(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "uniform" | "uniform_schedule" => Some(Self::UniformSchedule),
            "per_team" | "per-team" | "perteam" => Some(Self::PerTeam),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamHighlight {
    pub team: String,
    pub goals_for: u32,
    pub goals_per_game: Option<f64>,
    pub goal_difference_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueMetrics {
    pub total_goals: u32,
    pub average_goals_per_game: Option<f64>,
    pub highest_scoring: TeamHighlight,
    pub best_goal_difference: TeamHighlight,
}

pub fn league_metrics(rows: &[StandingsRow], model: GoalsPerGameModel) -> Option<LeagueMetrics> {
    let highest = first_max_by(rows, |r| r.goals_for as i64)?;
    let best_gd = first_max_by(rows, |r| r.goal_difference as i64)?;

    Some(LeagueMetrics {
        total_goals: total_goals(rows),
        average_goals_per_game: average_goals_per_game(rows, model),
        highest_scoring: highlight(highest),
        best_goal_difference: highlight(best_gd),
    })
}

pub fn total_goals(rows: &[StandingsRow]) -> u32 {
    rows.iter().map(|r| r.goals_for).sum()
}

pub fn average_goals_per_game(rows: &[StandingsRow], model: GoalsPerGameModel) -> Option<f64> {
    match model {
        GoalsPerGameModel::UniformSchedule => {
            let games = rows.first()?.played as u64;
            let denom = rows.len() as u64 * games;
            if denom == 0 {
                return None;
            }
            Some(round_to(total_goals(rows) as f64 / denom as f64, 2))
        }
        GoalsPerGameModel::PerTeam => {
            let per_team: Vec<f64> = rows
                .iter()
                .filter(|r| r.played > 0)
                .map(|r| r.goals_for as f64 / r.played as f64)
                .collect();
            if per_team.is_empty() {
                return None;
            }
            let mean = per_team.iter().sum::<f64>() / per_team.len() as f64;
            Some(round_to(mean, 2))
        }
    }
}

// Ties go to the earliest row, i.e. the higher table position.
fn first_max_by<F>(rows: &[StandingsRow], key: F) -> Option<&StandingsRow>
where
    F: Fn(&StandingsRow) -> i64,
{
    let mut best: Option<&StandingsRow> = None;
    for row in rows {
        match best {
            Some(current) if key(row) <= key(current) => {}
            _ => best = Some(row),
        }
    }
    best
}

fn highlight(row: &StandingsRow) -> TeamHighlight {
    TeamHighlight {
        team: row.team.clone(),
        goals_for: row.goals_for,
        goals_per_game: row.goals_per_game,
        goal_difference_label: row.goal_difference_label.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::format_goal_difference;

    fn row(team: &str, played: u32, gf: u32, ga: u32) -> StandingsRow {
        let gd = gf as i32 - ga as i32;
        StandingsRow {
            position: 0,
            team: team.to_string(),
            points: 0,
            played,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: gf,
            goals_against: ga,
            goal_difference: gd,
            goal_difference_label: format_goal_difference(gd),
            win_percentage: None,
            goals_per_game: if played == 0 {
                None
            } else {
                Some(round_to(gf as f64 / played as f64, 2))
            },
        }
    }

    #[test]
    fn uniform_average_uses_first_row_games() {
        let rows = vec![row("A", 10, 20, 5), row("B", 10, 10, 10), row("C", 10, 0, 15)];
        let metrics = league_metrics(&rows, GoalsPerGameModel::UniformSchedule).unwrap();
        assert_eq!(metrics.total_goals, 30);
        assert_eq!(metrics.average_goals_per_game, Some(1.0));
        assert_eq!(metrics.highest_scoring.team, "A");
        assert_eq!(metrics.best_goal_difference.goal_difference_label, "+15");
    }

    #[test]
    fn per_team_average_handles_uneven_schedules() {
        let rows = vec![row("A", 10, 20, 5), row("B", 5, 5, 5)];
        assert_eq!(
            average_goals_per_game(&rows, GoalsPerGameModel::UniformSchedule),
            Some(1.25)
        );
        assert_eq!(
            average_goals_per_game(&rows, GoalsPerGameModel::PerTeam),
            Some(1.5)
        );
    }

    #[test]
    fn ties_pick_first_occurrence() {
        let rows = vec![row("First", 10, 15, 5), row("Second", 10, 15, 5)];
        let metrics = league_metrics(&rows, GoalsPerGameModel::default()).unwrap();
        assert_eq!(metrics.highest_scoring.team, "First");
        assert_eq!(metrics.best_goal_difference.team, "First");
    }

    #[test]
    fn season_not_started() {
        let rows = vec![row("A", 0, 0, 0), row("B", 0, 0, 0)];
        let metrics = league_metrics(&rows, GoalsPerGameModel::UniformSchedule).unwrap();
        assert_eq!(metrics.average_goals_per_game, None);
        assert_eq!(average_goals_per_game(&rows, GoalsPerGameModel::PerTeam), None);
        assert!(league_metrics(&[], GoalsPerGameModel::UniformSchedule).is_none());
    }

    #[test]
    fn model_names_from_env() {
        assert_eq!(
            GoalsPerGameModel::from_env_value("per_team"),
            Some(GoalsPerGameModel::PerTeam)
        );
        assert_eq!(
            GoalsPerGameModel::from_env_value(" Uniform "),
            Some(GoalsPerGameModel::UniformSchedule)
        );
        assert_eq!(GoalsPerGameModel::from_env_value("median"), None);
    }
}
