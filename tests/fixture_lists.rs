use std::fs;
use std::path::PathBuf;

use scoreboard_analytics::fixtures::{FixtureSelection, build_fixture_list};
use scoreboard_analytics::standings::{StandingsRow, build_standings_table};
use serde_json::Value;

fn read_fixture(name: &str) -> Value {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    serde_json::from_str(&raw).expect("fixture should be valid json")
}

fn standings() -> Vec<StandingsRow> {
    build_standings_table(&read_fixture("standings.json")).expect("standings key")
}

fn match_ids(payload: &Value) -> Vec<String> {
    payload["matches"]
        .as_array()
        .expect("matches array")
        .iter()
        .map(|m| format!("{} vs {}", m["homeTeam"]["name"], m["awayTeam"]["name"]))
        .collect()
}

#[test]
fn upcoming_takes_first_entries_in_order() {
    let payload = read_fixture("matches_scheduled.json");
    let table = standings();
    let list = build_fixture_list(&payload, &table, 5, FixtureSelection::Upcoming)
        .expect("matches key");
    assert_eq!(list.len(), 5);

    let days: Vec<String> = list.iter().map(|m| m.date_label()).collect();
    assert_eq!(
        days,
        vec!["01/01/2025", "02/01/2025", "03/01/2025", "04/01/2025", "05/01/2025"]
    );
    assert_eq!(list[0].time_label(), "12:30");
    assert_eq!(list[0].home_label(), "Arsenal FC (GD: +35)");
    assert_eq!(list[0].away_label(), "Chelsea FC (GD: +8)");
    assert!(list.iter().all(|m| m.fixture.score.is_none()));
}

#[test]
fn recent_takes_last_entries_in_order() {
    let payload = read_fixture("matches_finished.json");
    let table = standings();
    let list =
        build_fixture_list(&payload, &table, 5, FixtureSelection::Recent).expect("matches key");
    assert_eq!(list.len(), 5);

    let all = match_ids(&payload);
    let tail: Vec<String> = list
        .iter()
        .map(|m| format!("\"{}\" vs \"{}\"", m.fixture.home, m.fixture.away))
        .collect();
    assert_eq!(tail, all[7..].to_vec());

    assert_eq!(list[0].date_label(), "08/01/2025");
    assert_eq!(list[4].score_label(), "3 x 0");
    assert_eq!(list[4].home_label(), "Liverpool FC (GD: +22)");
    assert_eq!(list[4].away_label(), "Everton FC (GD: -12)");
}

#[test]
fn unknown_team_gets_blank_annotation() {
    let payload = read_fixture("matches_finished.json");
    let table = standings();
    let list =
        build_fixture_list(&payload, &table, 5, FixtureSelection::Recent).expect("matches key");

    let promoted = list
        .iter()
        .find(|m| m.fixture.away == "Leeds United FC")
        .expect("promoted side present");
    assert_eq!(promoted.away_goal_difference_label, "");
    assert_eq!(promoted.away_label(), "Leeds United FC");
    assert_eq!(promoted.home_goal_difference_label, "(GD: +8)");
}

#[test]
fn limit_larger_than_payload_returns_everything() {
    let payload = read_fixture("matches_scheduled.json");
    let upcoming = build_fixture_list(&payload, &[], 50, FixtureSelection::Upcoming)
        .expect("matches key");
    let recent =
        build_fixture_list(&payload, &[], 50, FixtureSelection::Recent).expect("matches key");
    assert_eq!(upcoming.len(), 12);
    assert_eq!(recent, upcoming);
}

#[test]
fn empty_match_list_is_empty_not_missing() {
    let payload = serde_json::json!({"matches": []});
    let list = build_fixture_list(&payload, &[], 5, FixtureSelection::Upcoming);
    assert_eq!(list, Some(Vec::new()));
    assert!(build_fixture_list(&serde_json::json!({}), &[], 5, FixtureSelection::Recent).is_none());
}

fn dated_match(day: u32, home: &str, away: &str) -> Value {
    serde_json::json!({
        "utcDate": format!("2025-02-{day:02}T20:45:00Z"),
        "homeTeam": {"name": home},
        "awayTeam": {"name": away}
    })
}

#[test]
fn malformed_entries_are_dropped_before_selection() {
    let mut matches: Vec<Value> = (1..=7)
        .map(|day| dated_match(day, &format!("Home {day}"), &format!("Away {day}")))
        .collect();
    matches[2]["utcDate"] = Value::from("03/02/2025 20:45");
    matches[5]["homeTeam"] = serde_json::json!({});
    let payload = serde_json::json!({"matches": matches});

    let upcoming = build_fixture_list(&payload, &[], 5, FixtureSelection::Upcoming)
        .expect("matches key");
    let homes: Vec<&str> = upcoming.iter().map(|m| m.fixture.home.as_str()).collect();
    assert_eq!(homes, vec!["Home 1", "Home 2", "Home 4", "Home 5", "Home 7"]);

    let recent =
        build_fixture_list(&payload, &[], 3, FixtureSelection::Recent).expect("matches key");
    let homes: Vec<&str> = recent.iter().map(|m| m.fixture.home.as_str()).collect();
    assert_eq!(homes, vec!["Home 4", "Home 5", "Home 7"]);
}

#[test]
fn deducted_side_keeps_its_row_and_annotation() {
    let standings_payload = serde_json::json!({"standings": [{"type": "TOTAL", "table": [
        {
            "position": 1, "team": {"name": "Inter"}, "playedGames": 2,
            "won": 2, "draw": 0, "lost": 0, "points": 6,
            "goalsFor": 5, "goalsAgainst": 1
        },
        {
            "position": 2, "team": {"name": "Reggina"}, "playedGames": 2,
            "won": 0, "draw": 1, "lost": 1, "points": -8,
            "goalsFor": 2, "goalsAgainst": 4
        }
    ]}]});
    let table = build_standings_table(&standings_payload).expect("standings key");
    let rows: Vec<(u32, &str, i32)> = table
        .iter()
        .map(|r| (r.position, r.team.as_str(), r.points))
        .collect();
    assert_eq!(rows, vec![(1, "Inter", 6), (2, "Reggina", -8)]);

    let payload = serde_json::json!({"matches": [dated_match(9, "Reggina", "Inter")]});
    let list = build_fixture_list(&payload, &table, 5, FixtureSelection::Upcoming)
        .expect("matches key");
    assert_eq!(list[0].home_goal_difference_label, "(GD: -2)");
    assert_eq!(list[0].home_label(), "Reggina (GD: -2)");
    assert_eq!(list[0].away_label(), "Inter (GD: +4)");
}
