use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::competitions::{COMPETITIONS, Competition};
use crate::feed::CompetitionDashboard;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Standings,
    Scorers,
    Upcoming,
    Results,
}

pub const VIEWS: [View; 4] = [View::Standings, View::Scorers, View::Upcoming, View::Results];

pub fn view_label(view: View) -> &'static str {
    match view {
        View::Standings => "Table",
        View::Scorers => "Scorers",
        View::Upcoming => "Upcoming",
        View::Results => "Results",
    }
}

#[derive(Debug, Clone)]
pub enum TabData {
    NotLoaded,
    Loaded {
        dashboard: Box<CompetitionDashboard>,
        loaded_at: Instant,
    },
    Failed {
        error: String,
        failed_at: Instant,
    },
}

#[derive(Debug, Clone)]
pub enum Delta {
    Loaded {
        competition_id: u32,
        dashboard: Box<CompetitionDashboard>,
        at: Instant,
    },
    Failed {
        competition_id: u32,
        error: String,
        at: Instant,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub competition_index: usize,
    pub view: View,
    pub tabs: Vec<TabData>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub scroll: u16,
    pub last_updated: Option<DateTime<Local>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            competition_index: 0,
            view: View::Standings,
            tabs: COMPETITIONS.iter().map(|_| TabData::NotLoaded).collect(),
            logs: VecDeque::new(),
            help_overlay: false,
            scroll: 0,
            last_updated: None,
        }
    }

    pub fn active_competition(&self) -> &'static Competition {
        &COMPETITIONS[self.competition_index]
    }

    pub fn active_tab(&self) -> &TabData {
        &self.tabs[self.competition_index]
    }

    pub fn active_dashboard(&self) -> Option<&CompetitionDashboard> {
        match self.active_tab() {
            TabData::Loaded { dashboard, .. } => Some(dashboard.as_ref()),
            _ => None,
        }
    }

    pub fn select_competition(&mut self, index: usize) {
        if index < COMPETITIONS.len() && index != self.competition_index {
            self.competition_index = index;
            self.scroll = 0;
        }
    }

    pub fn next_competition(&mut self) {
        let next = (self.competition_index + 1) % COMPETITIONS.len();
        self.select_competition(next);
    }

    pub fn prev_competition(&mut self) {
        let len = COMPETITIONS.len();
        let prev = (self.competition_index + len - 1) % len;
        self.select_competition(prev);
    }

    pub fn next_view(&mut self) {
        self.set_view_offset(1);
    }

    pub fn prev_view(&mut self) {
        self.set_view_offset(VIEWS.len() - 1);
    }

    fn set_view_offset(&mut self, offset: usize) {
        let idx = VIEWS.iter().position(|v| *v == self.view).unwrap_or(0);
        self.view = VIEWS[(idx + offset) % VIEWS.len()];
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// The active tab needs a load when it was never loaded or its data is
    /// older than `refresh`. Failed tabs wait out the same interval.
    pub fn needs_load(&self, now: Instant, refresh: Duration) -> bool {
        match self.active_tab() {
            TabData::NotLoaded => true,
            TabData::Loaded { loaded_at, .. } => now.duration_since(*loaded_at) >= refresh,
            TabData::Failed { failed_at, .. } => now.duration_since(*failed_at) >= refresh,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

fn tab_index(competition_id: u32) -> Option<usize> {
    COMPETITIONS.iter().position(|c| c.id == competition_id)
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::Loaded {
            competition_id,
            dashboard,
            at,
        } => {
            let Some(idx) = tab_index(competition_id) else {
                return;
            };
            state.push_log(format!("[INFO] {} loaded", dashboard.competition.name));
            state.tabs[idx] = TabData::Loaded {
                dashboard,
                loaded_at: at,
            };
            state.last_updated = Some(Local::now());
        }
        Delta::Failed {
            competition_id,
            error,
            at,
        } => {
            let Some(idx) = tab_index(competition_id) else {
                return;
            };
            state.push_log(format!("[WARN] {error}"));
            state.tabs[idx] = TabData::Failed {
                error,
                failed_at: at,
            };
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
