use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap,
};

use scoreboard_analytics::competitions::COMPETITIONS;
use scoreboard_analytics::config::Config;
use scoreboard_analytics::display::{
    column_range, format_decimal, format_percent, scaled_color,
};
use scoreboard_analytics::feed::{self, CompetitionDashboard, DashboardOptions};
use scoreboard_analytics::fixtures::AnnotatedFixture;
use scoreboard_analytics::football_api::{FootballApi, HttpTransport};
use scoreboard_analytics::scorers::ScorerRow;
use scoreboard_analytics::standings::StandingsRow;
use scoreboard_analytics::state::{
    AppState, Delta, TabData, VIEWS, View, apply_delta, view_label,
};

struct App {
    state: AppState,
    api: FootballApi<HttpTransport>,
    options: DashboardOptions,
    refresh: Duration,
    reload_requested: bool,
    loading: bool,
    should_quit: bool,
}

impl App {
    fn new(config: &Config, transport: HttpTransport) -> Self {
        let mut state = AppState::new();
        state.push_log(format!("[INFO] API base: {}", config.api_base));
        if config.api_key.is_none() {
            state.push_log("[WARN] FOOTBALL_API_KEY not set; requests are unauthenticated");
        }
        Self {
            state,
            api: FootballApi::new(transport, config.api_base.clone(), config.api_key.clone()),
            options: DashboardOptions::from(config),
            refresh: config.refresh,
            reload_requested: false,
            loading: false,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.state.select_competition(idx);
            }
            KeyCode::Tab => self.state.next_competition(),
            KeyCode::BackTab => self.state.prev_competition(),
            KeyCode::Char('l') | KeyCode::Right => self.state.next_view(),
            KeyCode::Char('h') | KeyCode::Left => self.state.prev_view(),
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reload_requested = true;
                self.state.push_log(format!(
                    "[INFO] Reload requested: {}",
                    self.state.active_competition().name
                ));
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }

    fn should_load(&self) -> bool {
        self.reload_requested || self.state.needs_load(Instant::now(), self.refresh)
    }

    // Blocks the loop until every request for the tab has finished.
    fn load_active(&mut self) {
        self.reload_requested = false;
        let competition = *self.state.active_competition();
        let delta = match feed::load_competition(&mut self.api, &competition, &self.options) {
            Ok(dashboard) => Delta::Loaded {
                competition_id: competition.id,
                dashboard: Box::new(dashboard),
                at: Instant::now(),
            },
            Err(err) => Delta::Failed {
                competition_id: competition.id,
                error: format!("{err:#}"),
                at: Instant::now(),
            },
        };
        apply_delta(&mut self.state, delta);
        self.loading = false;
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = Config::from_env();
    let transport = HttpTransport::new()?;
    let mut app = App::new(&config, transport);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        if app.should_load() {
            app.loading = true;
            terminal.draw(|f| ui(f, app))?;
            app.load_active();
        }

        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    frame.render_widget(competition_tabs(&app.state), chunks[1]);
    frame.render_widget(view_tabs(&app.state), chunks[2]);

    render_body(frame, chunks[3], app);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[4]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[5]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let competition = state.active_competition();
    let season = state
        .active_dashboard()
        .and_then(|d| d.season.as_ref())
        .map(|s| match s.current_matchday {
            Some(day) => format!(" | {} | Matchday {day}", s.label()),
            None => format!(" | {}", s.label()),
        })
        .unwrap_or_default();
    format!(
        "SCOREBOARD ANALYTICS | {} ({}){season}",
        competition.name, competition.country
    )
}

fn competition_tabs(state: &AppState) -> Tabs<'static> {
    let titles: Vec<String> = COMPETITIONS
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} {}", i + 1, c.name))
        .collect();
    Tabs::new(titles)
        .block(Block::default().title("Competition").borders(Borders::ALL))
        .select(state.competition_index)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|")
}

fn view_tabs(state: &AppState) -> Tabs<'static> {
    let selected = VIEWS.iter().position(|v| *v == state.view).unwrap_or(0);
    Tabs::new(VIEWS.iter().map(|v| view_label(*v)).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|")
}

fn footer_text(state: &AppState) -> String {
    let updated = state
        .last_updated
        .map(|t| t.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    format!(
        "Last updated: {updated} | 1-4/Tab League | ←/→ View | j/k Scroll | r Reload | ? Help | q Quit"
    )
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(2);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    if app.loading {
        let name = app.state.active_competition().name;
        render_placeholder(frame, area, &format!("Loading {name}..."));
        return;
    }

    match app.state.active_tab() {
        TabData::NotLoaded => render_placeholder(frame, area, "Not loaded yet"),
        TabData::Failed { error, .. } => {
            let paragraph = Paragraph::new(format!("Failed to load: {error}"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(paragraph, area);
        }
        TabData::Loaded { dashboard, .. } => match app.state.view {
            View::Standings => render_standings(frame, area, dashboard, app.state.scroll),
            View::Scorers => render_scorers(frame, area, dashboard, app.state.scroll),
            View::Upcoming => render_upcoming(frame, area, dashboard, app.state.scroll),
            View::Results => render_results(frame, area, dashboard, app.state.scroll),
        },
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, text: &str) {
    let empty = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(empty, area);
}

fn render_standings(frame: &mut Frame, area: Rect, dashboard: &CompetitionDashboard, scroll: u16) {
    let Some(rows) = dashboard.standings.as_deref() else {
        render_placeholder(frame, area, "No standings available");
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(10),
            Constraint::Length(4),
        ])
        .split(area);

    let tables = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(sections[0]);

    frame.render_widget(general_table(rows, scroll), tables[0]);
    frame.render_widget(goals_table(rows, scroll), tables[1]);
    frame.render_widget(goals_chart(rows), sections[1]);
    render_league_metrics(frame, sections[2], dashboard);
}

fn general_table(rows: &[StandingsRow], scroll: u16) -> Table<'static> {
    let points_range = column_range(rows.iter().map(|r| Some(r.points as f64)));
    let pct_range = column_range(rows.iter().map(|r| r.win_percentage));

    let body = rows.iter().skip(scroll as usize).map(|r| {
        Row::new(vec![
            Cell::from(r.position.to_string()),
            Cell::from(r.team.clone()),
            Cell::from(r.points.to_string())
                .style(Style::default().fg(scaled_color(Some(r.points as f64), points_range))),
            Cell::from(r.played.to_string()),
            Cell::from(r.goal_difference_label.clone()),
            Cell::from(format_percent(r.win_percentage))
                .style(Style::default().fg(scaled_color(r.win_percentage, pct_range))),
        ])
    });

    Table::new(
        body,
        [
            Constraint::Length(4),
            Constraint::Min(16),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(7),
        ],
    )
    .header(header_row(&["Pos", "Team", "Pts", "P", "GD", "Win%"]))
    .block(Block::default().title("Standings").borders(Borders::ALL))
}

fn goals_table(rows: &[StandingsRow], scroll: u16) -> Table<'static> {
    let gf_range = column_range(rows.iter().map(|r| Some(r.goals_for as f64)));
    let gpg_range = column_range(rows.iter().map(|r| r.goals_per_game));

    let body = rows.iter().skip(scroll as usize).map(|r| {
        Row::new(vec![
            Cell::from(r.team.clone()),
            Cell::from(r.goals_for.to_string())
                .style(Style::default().fg(scaled_color(Some(r.goals_for as f64), gf_range))),
            Cell::from(r.goals_against.to_string()),
            Cell::from(r.goal_difference_label.clone()),
            Cell::from(format_decimal(r.goals_per_game, 2))
                .style(Style::default().fg(scaled_color(r.goals_per_game, gpg_range))),
        ])
    });

    Table::new(
        body,
        [
            Constraint::Min(16),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(8),
        ],
    )
    .header(header_row(&["Team", "GF", "GA", "GD", "G/Game"]))
    .block(Block::default().title("Goals").borders(Borders::ALL))
}

fn goals_chart(rows: &[StandingsRow]) -> BarChart<'static> {
    let mut chart = BarChart::default()
        .block(
            Block::default()
                .title("Goals for (green) vs against (red)")
                .borders(Borders::ALL),
        )
        .bar_width(1)
        .bar_gap(0)
        .group_gap(1);

    for r in rows {
        let bars = [
            Bar::default()
                .value(r.goals_for as u64)
                .text_value(String::new())
                .style(Style::default().fg(Color::Green)),
            Bar::default()
                .value(r.goals_against as u64)
                .text_value(String::new())
                .style(Style::default().fg(Color::Red)),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(abbreviate_team(&r.team)))
                .bars(&bars),
        );
    }
    chart
}

fn render_league_metrics(frame: &mut Frame, area: Rect, dashboard: &CompetitionDashboard) {
    let Some(metrics) = dashboard.metrics.as_ref() else {
        return;
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let average = format_decimal(metrics.average_goals_per_game, 2);
    render_metric(
        frame,
        cols[0],
        "League goals per game",
        &average,
        &format!("{} goals in total", metrics.total_goals),
    );

    let top = &metrics.highest_scoring;
    render_metric(
        frame,
        cols[1],
        "Highest scoring",
        &top.team,
        &format!(
            "{} goals ({}/game)",
            top.goals_for,
            format_decimal(top.goals_per_game, 2)
        ),
    );

    let best = &metrics.best_goal_difference;
    render_metric(
        frame,
        cols[2],
        "Best goal difference",
        &best.team,
        &best.goal_difference_label,
    );
}

fn render_metric(frame: &mut Frame, area: Rect, title: &str, value: &str, delta: &str) {
    let text = vec![
        Line::from(Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            delta.to_string(),
            Style::default().fg(Color::Green),
        )),
    ];
    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL),
    );
    frame.render_widget(paragraph, area);
}

fn render_scorers(frame: &mut Frame, area: Rect, dashboard: &CompetitionDashboard, scroll: u16) {
    let Some(rows) = dashboard.scorers.as_deref() else {
        render_placeholder(frame, area, "No scorer data available");
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(10),
            Constraint::Min(4),
        ])
        .split(area);

    if let Some(highlights) = dashboard.scorer_highlights.as_ref() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(sections[0]);
        render_metric(
            frame,
            cols[0],
            "Top scorer",
            &highlights.headline(),
            &highlights.detail(),
        );
        render_metric(
            frame,
            cols[1],
            "Goals per match",
            &highlights.average_line(),
            &highlights.total_line(),
        );
    }

    frame.render_widget(scorers_chart(rows), sections[1]);
    frame.render_widget(scorers_table(rows, scroll), sections[2]);
}

fn scorers_chart(rows: &[ScorerRow]) -> BarChart<'static> {
    let bars: Vec<Bar<'static>> = rows
        .iter()
        .map(|s| {
            Bar::default()
                .value(s.goals as u64)
                .label(Line::from(surname(&s.player)))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();
    BarChart::default()
        .block(Block::default().title("Goals by player").borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(6)
        .bar_gap(1)
}

fn scorers_table(rows: &[ScorerRow], scroll: u16) -> Table<'static> {
    let goals_range = column_range(rows.iter().map(|s| Some(s.goals as f64)));
    let avg_range = column_range(rows.iter().map(|s| Some(s.average)));

    let body = rows.iter().skip(scroll as usize).map(|s| {
        Row::new(vec![
            Cell::from(s.player.clone()),
            Cell::from(s.team.clone()),
            Cell::from(s.goals.to_string())
                .style(Style::default().fg(scaled_color(Some(s.goals as f64), goals_range))),
            Cell::from(s.matches.to_string()),
            Cell::from(format!("{:.2}", s.average))
                .style(Style::default().fg(scaled_color(Some(s.average), avg_range))),
            Cell::from(optional_count(s.assists)),
            Cell::from(optional_count(s.penalties)),
        ])
    });

    Table::new(
        body,
        [
            Constraint::Min(18),
            Constraint::Min(16),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(5),
        ],
    )
    .header(header_row(&[
        "Player", "Team", "Goals", "Matches", "Avg", "Assists", "Pens",
    ]))
    .block(Block::default().title("Scorers").borders(Borders::ALL))
}

fn render_upcoming(frame: &mut Frame, area: Rect, dashboard: &CompetitionDashboard, scroll: u16) {
    let Some(fixtures) = dashboard.upcoming.as_deref() else {
        render_placeholder(frame, area, "No upcoming matches available");
        return;
    };
    let body = fixtures.iter().skip(scroll as usize).map(|m| {
        Row::new(vec![
            Cell::from(m.matchday_label()),
            Cell::from(m.date_label()),
            Cell::from(m.time_label()),
            Cell::from(m.home_label()),
            Cell::from(m.away_label()),
        ])
    });
    let table = Table::new(
        body,
        [
            Constraint::Length(6),
            Constraint::Length(11),
            Constraint::Length(6),
            Constraint::Min(20),
            Constraint::Min(20),
        ],
    )
    .header(header_row(&["MD", "Date", "UTC", "Home", "Away"]))
    .block(Block::default().title("Upcoming matches").borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn render_results(frame: &mut Frame, area: Rect, dashboard: &CompetitionDashboard, scroll: u16) {
    let Some(fixtures) = dashboard.recent.as_deref() else {
        render_placeholder(frame, area, "No results available");
        return;
    };
    let body = fixtures.iter().skip(scroll as usize).map(result_row);
    let table = Table::new(
        body,
        [
            Constraint::Length(6),
            Constraint::Length(11),
            Constraint::Min(20),
            Constraint::Length(7),
            Constraint::Min(20),
        ],
    )
    .header(header_row(&["MD", "Date", "Home", "Score", "Away"]))
    .block(Block::default().title("Latest results").borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn result_row(m: &AnnotatedFixture) -> Row<'static> {
    Row::new(vec![
        Cell::from(m.matchday_label()),
        Cell::from(m.date_label()),
        Cell::from(m.home_label()),
        Cell::from(m.score_label()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(m.away_label()),
    ])
}

fn header_row(titles: &[&str]) -> Row<'static> {
    Row::new(
        titles
            .iter()
            .map(|t| Cell::from(t.to_string()))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD))
}

fn optional_count(value: Option<u32>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn abbreviate_team(name: &str) -> String {
    let abbr: String = name
        .chars()
        .filter(|c| c.is_alphabetic())
        .take(3)
        .collect::<String>()
        .to_uppercase();
    if abbr.is_empty() { "?".to_string() } else { abbr }
}

fn surname(player: &str) -> String {
    player
        .split_whitespace()
        .last()
        .unwrap_or(player)
        .to_string()
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Scoreboard Analytics - Help",
        "",
        "Competitions:",
        "  1-4          Jump to league",
        "  Tab / S-Tab  Next / previous league",
        "",
        "Views:",
        "  ←/→ or h/l   Table, Scorers, Upcoming, Results",
        "  ↑/↓ or j/k   Scroll",
        "",
        "  r            Reload league (cached for 30 min)",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
