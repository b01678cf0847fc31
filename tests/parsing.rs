use std::fs;
use std::path::PathBuf;

use scoreboard_analytics::competitions::season_info;
use scoreboard_analytics::scorers::{build_scorers_table, scorer_highlights};
use scoreboard_analytics::standings::build_standings_table;
use serde_json::Value;

fn read_fixture(name: &str) -> Value {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    serde_json::from_str(&raw).expect("fixture should be valid json")
}

#[test]
fn parses_standings_fixture() {
    let rows = build_standings_table(&read_fixture("standings.json")).expect("standings key");
    assert_eq!(rows.len(), 4);

    let positions: Vec<u32> = rows.iter().map(|r| r.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);

    assert_eq!(rows[0].team, "Arsenal FC");
    assert_eq!(rows[0].win_percentage, Some(100.0));
    assert_eq!(rows[1].win_percentage, Some(73.3));
    assert_eq!(rows[3].goal_difference_label, "-12");
    assert_eq!(rows[2].goal_difference_label, "+8");
}

#[test]
fn standings_rows_hold_invariants() {
    let rows = build_standings_table(&read_fixture("standings.json")).expect("standings key");
    for row in &rows {
        assert_eq!(
            row.goal_difference,
            row.goals_for as i32 - row.goals_against as i32
        );
        if row.played > 0 {
            let pct = row.win_percentage.expect("played games give a percentage");
            assert!((0.0..=100.0).contains(&pct));
        }
        if row.goal_difference > 0 {
            assert!(row.goal_difference_label.starts_with('+'));
        } else {
            assert_eq!(row.goal_difference_label, row.goal_difference.to_string());
        }
    }
}

#[test]
fn parses_scorers_fixture() {
    let rows = build_scorers_table(&read_fixture("scorers.json")).expect("scorers key");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].player, "Erling Haaland");
    assert_eq!(rows[0].average, 1.5);
    assert_eq!(rows[0].assists, Some(3));
    assert_eq!(rows[1].average, 0.7);
    assert_eq!(rows[1].penalties, None);
    assert_eq!(rows[2].matches, 0);
    assert_eq!(rows[2].average, 0.0);

    let highlights = scorer_highlights(&rows).expect("top scorer");
    assert_eq!(highlights.top.average, rows[0].average);
    assert_eq!(highlights.detail(), "15 goals in 10 matches");
}

#[test]
fn parses_competition_season() {
    let info = season_info(&read_fixture("competition.json")).expect("current season");
    assert_eq!(info.label(), "Season 2024/2025");
    assert_eq!(info.current_matchday, Some(21));
}

#[test]
fn error_payloads_render_nothing() {
    let error: Value = serde_json::json!({
        "message": "The resource you are looking for is restricted.",
        "errorCode": 403
    });
    assert!(build_standings_table(&error).is_none());
    assert!(build_scorers_table(&error).is_none());
    assert!(season_info(&error).is_none());
}
