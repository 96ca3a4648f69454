use std::env;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Result;
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
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use matchday_terminal::state::{
    AppState, Delta, Feedback, FocusField, ProviderCommand, SUBMIT_MISSING_SCORES, apply_delta,
};
use matchday_terminal::status::DayBucket;
use matchday_terminal::view::{Container, MountOp, Node, NodeKind};
use matchday_terminal::{backend, demo_feed, page, provider};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
    scroll: usize,
}

impl App {
    fn new(cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
            scroll: 0,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('t') | KeyCode::Tab => {
                self.state.toggle_day();
                self.scroll = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('h') | KeyCode::Left => self.state.focus = FocusField::HomeGoals,
            KeyCode::Char('l') | KeyCode::Right => self.state.focus = FocusField::AwayGoals,
            KeyCode::Char('w') => {
                if let Some(entry) = self.state.selected_entry_mut()
                    && entry.record.can_users_place_bets
                    && !entry.form.submitting
                {
                    entry.form.click_booster();
                }
            }
            KeyCode::Char('p') => {
                if let Some(entry) = self.state.selected_entry_mut()
                    && !entry.record.bets.is_empty()
                {
                    entry.predictions_expanded = !entry.predictions_expanded;
                }
            }
            KeyCode::Backspace => {
                let focus = self.state.focus;
                if let Some(entry) = self.state.selected_entry_mut()
                    && entry.record.can_users_place_bets
                    && !entry.form.submitting
                {
                    entry.form.pop_digit(focus);
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let focus = self.state.focus;
                if let Some(entry) = self.state.selected_entry_mut()
                    && entry.record.can_users_place_bets
                    && !entry.form.submitting
                {
                    entry.form.push_digit(focus, c as u8 - b'0');
                }
            }
            KeyCode::Enter => self.submit_selected(),
            _ => {}
        }
    }

    fn reload(&mut self) {
        self.state.begin_reload();
        self.scroll = 0;
        self.state.push_log("[INFO] Reloading page");
        if self.cmd_tx.send(ProviderCommand::FetchPage).is_err() {
            self.state.push_log("[WARN] Fetch channel closed");
        }
    }

    fn submit_selected(&mut self) {
        let submission = {
            let Some(entry) = self.state.selected_entry_mut() else {
                return;
            };
            if !entry.record.can_users_place_bets || entry.form.submitting {
                return;
            }
            entry.form.feedback = None;
            let Some(submission) = entry.submission() else {
                entry.form.feedback = Some(Feedback::Error(SUBMIT_MISSING_SCORES.to_string()));
                return;
            };
            entry.form.submitting = true;
            submission
        };
        let match_id = submission.fixture_id;
        if self
            .cmd_tx
            .send(ProviderCommand::PlaceBet(submission))
            .is_err()
        {
            if let Some(entry) = self.state.entry_mut_by_match(match_id) {
                entry.form.submitting = false;
            }
            self.state.push_log("[WARN] Submission channel closed");
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let base_url = opt_env("API_BASE_URL");

    if env::var("MATCHDAY_DUMP").is_ok_and(|val| val == "1") {
        return dump_page(base_url.as_deref());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(term_backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    provider::spawn_provider(tx, cmd_rx, base_url);

    let mut app = App::new(cmd_tx);
    app.state.push_log("[INFO] Fetching fixtures");
    let _ = app.cmd_tx.send(ProviderCommand::FetchPage);

    let res = run_app(&mut terminal, &mut app, rx);

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

/// Render one page load as its mount-operation list and print it as JSON.
fn dump_page(base_url: Option<&str>) -> Result<()> {
    let (matches, bets) = match base_url {
        Some(base) => backend::fetch_page(base)?,
        None => (demo_feed::demo_matches(), demo_feed::demo_bets()),
    };
    let ops = page::build_page(matches, bets);
    println!("{}", serde_json::to_string_pretty(&ops)?);
    Ok(())
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|val| {
        if val.trim().is_empty() {
            None
        } else {
            Some(val)
        }
    })
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_fixtures(frame, chunks[1], app);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let day = match state.day {
        DayBucket::Today => "TODAY",
        DayBucket::Tomorrow => "TOMORROW",
    };
    format!(
        "MATCHDAY | {} | Boosters left: {}",
        day, state.wildcards_remaining
    )
}

fn footer_text() -> &'static str {
    "t Day | j/k Move | h/l Field | 0-9 Score | w Booster | p Predictions | Enter Submit | r Reload | ? Help | q Quit"
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_fixtures(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.state.loading {
        let loading =
            Paragraph::new("Loading fixtures...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, area);
        return;
    }

    let ops = page::render_ops(
        &app.state.today,
        &app.state.tomorrow,
        app.state.wildcards_remaining,
    );
    let target = match app.state.day {
        DayBucket::Today => Container::TodaysFixtures,
        DayBucket::Tomorrow => Container::TomorrowsFixtures,
    };
    let nodes: Vec<&Node> = ops
        .iter()
        .filter_map(|op| match op {
            MountOp::Append { container, node } if *container == target => Some(node),
            _ => None,
        })
        .collect();

    let has_selection = !app.state.entries().is_empty();
    let cards: Vec<Vec<Line>> = nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            node_lines(node, has_selection && idx == app.state.selected, app.state.focus)
        })
        .collect();

    let heights: Vec<u16> = cards
        .iter()
        .map(|lines| lines.len() as u16 + 2)
        .collect();
    adjust_scroll(&mut app.scroll, &heights, app.state.selected, area.height);

    let mut y = area.y;
    for idx in app.scroll..cards.len() {
        let remaining = area.bottom().saturating_sub(y);
        if remaining == 0 {
            break;
        }
        let height = heights[idx].min(remaining);
        let rect = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        let border_style = if has_selection && idx == app.state.selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let card = Paragraph::new(cards[idx].clone()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(card, rect);
        y = y.saturating_add(heights[idx]);
    }
}

fn adjust_scroll(scroll: &mut usize, heights: &[u16], selected: usize, viewport: u16) {
    if heights.is_empty() {
        *scroll = 0;
        return;
    }
    let selected = selected.min(heights.len() - 1);
    if *scroll > selected {
        *scroll = selected;
    }
    while *scroll < selected {
        let used: u16 = heights[*scroll..=selected].iter().sum();
        if used <= viewport {
            break;
        }
        *scroll += 1;
    }
}

/// Walk a view node into styled terminal lines. This is the whole mount
/// step: classes pick styles, image and hidden nodes have no terminal
/// representation, `hidden` subtrees are skipped.
fn node_lines(node: &Node, selected: bool, focus: FocusField) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    push_node_lines(node, selected, focus, &mut lines);
    lines
}

fn push_node_lines(node: &Node, selected: bool, focus: FocusField, out: &mut Vec<Line<'static>>) {
    if node.has_class("hidden") {
        return;
    }
    if node.has_class("teams-info") {
        out.push(teams_line(node));
        if let Some(note) = node.find("score-note") {
            out.push(Line::from(Span::styled(
                note.as_text().unwrap_or_default().to_string(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        return;
    }
    match &node.kind {
        NodeKind::Text(content) => out.push(text_line(node, content)),
        NodeKind::Image { .. } | NodeKind::Hidden { .. } | NodeKind::Block => {}
        NodeKind::NumberInput {
            name,
            value,
            placeholder,
            disabled,
        } => out.push(input_line(name, *value, placeholder, *disabled, selected, focus)),
        NodeKind::Button { label, disabled } => out.push(button_line(node, label, *disabled)),
        NodeKind::Table { header, rows } => {
            out.push(Line::from(Span::styled(
                table_row(header),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for row in rows {
                out.push(Line::from(table_row(row)));
            }
        }
    }
    for child in &node.children {
        push_node_lines(child, selected, focus, out);
    }
}

fn teams_line(node: &Node) -> Line<'static> {
    let mut name_nodes = Vec::new();
    node.find_all("team-name", &mut name_nodes);
    let home = name_nodes
        .first()
        .and_then(|n| n.as_text())
        .unwrap_or_default()
        .to_string();
    let away = name_nodes
        .get(1)
        .and_then(|n| n.as_text())
        .unwrap_or_default()
        .to_string();
    let score = node
        .find("fixture-scores")
        .and_then(|n| n.as_text())
        .unwrap_or("VS")
        .to_string();
    Line::from(vec![
        Span::styled(home, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(score, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(away, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

fn text_line(node: &Node, content: &str) -> Line<'static> {
    let style = if node.has_class("fixture-time") {
        Style::default().add_modifier(Modifier::BOLD)
    } else if node.has_class("bet-error") {
        Style::default().fg(Color::Red)
    } else if node.has_class("bet-success") {
        Style::default().fg(Color::Green)
    } else if node.has_class("league-name")
        || node.has_class("no-matches")
        || node.has_class("score-note")
    {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    Line::from(Span::styled(content.to_string(), style))
}

fn input_line(
    name: &str,
    value: Option<u8>,
    placeholder: &str,
    disabled: bool,
    selected: bool,
    focus: FocusField,
) -> Line<'static> {
    let focused = selected
        && !disabled
        && matches!(
            (name, focus),
            ("home_goals", FocusField::HomeGoals) | ("away_goals", FocusField::AwayGoals)
        );
    let marker = if focused { "> " } else { "  " };
    let shown = match value {
        Some(goals) => goals.to_string(),
        None => placeholder.to_string(),
    };
    let mut style = if value.is_some() {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    if disabled {
        style = Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM);
    }
    if focused {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    Line::from(vec![
        Span::raw(marker.to_string()),
        Span::styled(shown, style),
    ])
}

fn button_line(node: &Node, label: &str, disabled: bool) -> Line<'static> {
    let prefix = if node.has_class("wildcard-toggle") {
        "Booster: "
    } else {
        ""
    };
    let style = if disabled {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Line::from(Span::styled(format!("{prefix}[ {label} ]"), style))
}

fn table_row(cells: &[String]) -> String {
    let mut text = String::new();
    for (idx, cell) in cells.iter().enumerate() {
        if idx == 0 {
            text.push_str(&format!("{cell:<14}"));
        } else {
            text.push_str(&format!("{cell:>8}"));
        }
    }
    text
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Matchday Terminal - Help",
        "",
        "  t / Tab      Today / Tomorrow",
        "  j/k or ↑/↓   Select fixture",
        "  h/l or ←/→   Home / away score field",
        "  0-9          Type predicted goals",
        "  Backspace    Erase a digit",
        "  w            Cycle point booster",
        "  p            Show/hide user predictions",
        "  Enter        Submit prediction",
        "  r            Reload page",
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
