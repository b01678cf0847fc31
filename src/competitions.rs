use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Competition {
    pub id: u32,
    pub name: &'static str,
    pub country: &'static str,
}

/// Tab order of the dashboard.
pub const COMPETITIONS: [Competition; 4] = [
    Competition {
        id: 2021,
        name: "Premier League",
        country: "England",
    },
    Competition {
        id: 2014,
        name: "La Liga",
        country: "Spain",
    },
    Competition {
        id: 2019,
        name: "Italy Serie A",
        country: "Italy",
    },
    Competition {
        id: 2002,
        name: "Bundesliga",
        country: "Germany",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonInfo {
    pub start_year: String,
    pub end_year: String,
    pub current_matchday: Option<u32>,
}

impl SeasonInfo {
    pub fn label(&self) -> String {
        format!("Season {}/{}", self.start_year, self.end_year)
    }
}

/// Reads `currentSeason` from a competition payload.
pub fn season_info(payload: &Value) -> Option<SeasonInfo> {
    let season = payload.get("currentSeason")?;
    let start = season.get("startDate")?.as_str()?;
    let end = season.get("endDate")?.as_str()?;
    let current_matchday = season
        .get("currentMatchday")
        .and_then(|v| v.as_u64())
        .map(|v| v as u32);

    Some(SeasonInfo {
        start_year: year_prefix(start),
        end_year: year_prefix(end),
        current_matchday,
    })
}

fn year_prefix(date: &str) -> String {
    date.chars().take(4).collect()
}
