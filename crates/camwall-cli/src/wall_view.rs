use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use camwall_core::{
    BorderColor, CameraIndex, Command as WallCommand, FeedSource, Footprint, PlayerPosition,
    PlayerTransition, SourceKind, WallController, WallLayout, WallRuntime, WallSurface,
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use crate::feed_probe::FeedProber;
use crate::playlist::PlaylistPlayer;

const GRID_COLUMNS: u16 = 2;
const CHROME_ROWS: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraCell {
    pub source: Option<FeedSource>,
    pub border: BorderColor,
    pub visible: bool,
}

/// Wall surface drawn into the terminal. Cell 0 holds the player, cameras
/// follow left to right, top to bottom.
pub struct TerminalWall {
    cells: Vec<CameraCell>,
    player_position: PlayerPosition,
    player_footprint: Option<Footprint>,
    title: String,
    area: Footprint,
    prober: Option<FeedProber>,
}

impl TerminalWall {
    pub fn new(camera_count: u8, prober: Option<FeedProber>) -> Self {
        let cells = (0..camera_count)
            .map(|_| CameraCell {
                source: None,
                border: BorderColor::Idle,
                visible: true,
            })
            .collect();

        Self {
            cells,
            player_position: PlayerPosition::Normal,
            player_footprint: None,
            title: String::new(),
            area: Footprint::new(80, 20),
            prober,
        }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.area = Footprint::new(
            u32::from(columns),
            u32::from(rows.saturating_sub(CHROME_ROWS)),
        );
    }

    pub fn cell(&self, cam: CameraIndex) -> Option<&CameraCell> {
        self.cells.get(usize::from(cam.get()) - 1)
    }

    pub fn player_position(&self) -> PlayerPosition {
        self.player_position
    }

    pub fn player_footprint(&self) -> Option<Footprint> {
        self.player_footprint
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn cell_mut(&mut self, cam: CameraIndex) -> Option<&mut CameraCell> {
        self.cells.get_mut(usize::from(cam.get()) - 1)
    }

    fn grid_rows(&self) -> u32 {
        grid_rows(self.cells.len() + 1).into()
    }
}

impl WallSurface for TerminalWall {
    fn layout(&self) -> WallLayout {
        let cell = Footprint::new(
            self.area.width / u32::from(GRID_COLUMNS),
            self.area.height / self.grid_rows().max(1),
        );
        WallLayout {
            cell,
            full: self.area,
        }
    }

    fn set_source(&mut self, cam: CameraIndex, source: &FeedSource) {
        if let Some(cell) = self.cell_mut(cam) {
            cell.source = Some(source.clone());
        }
        if let Some(prober) = &self.prober {
            prober.probe(cam, source);
        }
    }

    fn set_border(&mut self, cam: CameraIndex, color: BorderColor) {
        if let Some(cell) = self.cell_mut(cam) {
            cell.border = color;
        }
    }

    fn transition_player(&mut self, transition: PlayerTransition) {
        self.player_position = transition.position;
        self.player_footprint = Some(transition.to);
    }

    fn show(&mut self, cam: CameraIndex) {
        if let Some(cell) = self.cell_mut(cam) {
            cell.visible = true;
        }
    }

    fn hide(&mut self, cam: CameraIndex) {
        if let Some(cell) = self.cell_mut(cam) {
            cell.visible = false;
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
}

pub fn grid_rows(slots: usize) -> u16 {
    let columns = usize::from(GRID_COLUMNS);
    u16::try_from(slots.div_ceil(columns)).unwrap_or(u16::MAX)
}

pub fn grid_slots(area: Rect, slots: usize) -> Vec<Rect> {
    let rows = grid_rows(slots).max(1);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints((0..rows).map(|_| Constraint::Ratio(1, u32::from(rows))))
        .split(area);

    let mut out = Vec::with_capacity(slots);
    for row_area in row_areas.iter().copied() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row_area);
        for col in cols.iter().copied() {
            if out.len() < slots {
                out.push(col);
            }
        }
    }
    out
}

pub async fn run_terminal_wall(runtime: &mut WallRuntime<TerminalWall, PlaylistPlayer>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = async {
        loop {
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char(c) => {
                            if let Some(command) = WallCommand::from_key(c.to_ascii_lowercase()) {
                                runtime.controller_mut().on_command(command, Instant::now());
                            }
                        }
                        _ => {}
                    }
                }
            }

            let size = terminal.size()?;
            runtime
                .controller_mut()
                .surface_mut()
                .resize(size.width, size.height);
            runtime.step(Instant::now());

            terminal.draw(|frame| draw_wall(frame.size(), frame, runtime.controller()))?;
        }

        Ok::<(), anyhow::Error>(())
    }
    .await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

fn draw_wall(
    area: Rect,
    frame: &mut ratatui::Frame<'_>,
    controller: &WallController<TerminalWall, PlaylistPlayer>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(render_header(controller), rows[0]);

    let wall = controller.surface();
    if wall.player_position() == PlayerPosition::Fixed {
        frame.render_widget(render_player(controller), rows[1]);
    } else {
        let slots = grid_slots(rows[1], wall.cells.len() + 1);
        if let Some(first) = slots.first() {
            frame.render_widget(render_player(controller), *first);
        }
        for (cam, slot) in controller.config().cameras().zip(slots.iter().skip(1)) {
            frame.render_widget(render_camera(controller, cam), *slot);
        }
    }

    let help = "s shuffle  f fullscreen  1-9 highlight  n/p track  k play/pause  m mute  q quit";
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(help, Style::default().fg(Color::DarkGray)))),
        rows[2],
    );
}

fn render_header(controller: &WallController<TerminalWall, PlaylistPlayer>) -> Paragraph<'static> {
    let stats = controller.poller().stats();
    let last_ok = stats
        .last_ok_ts
        .map(|ts| ts.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let status = format!(
        "poll={:?} ok={} err={} in_row={} last_ok={} fullscreen={} shuffle={}",
        controller.poller().phase(),
        stats.polls_ok,
        stats.polls_err,
        stats.errors_in_row,
        last_ok,
        controller.fullscreen().is_fullscreen,
        controller.shuffle().enabled,
    );

    let mut lines = vec![Line::from(vec![
        Span::styled(
            "Camera Wall  ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(status),
    ])];
    if let Some(error) = &stats.last_error {
        lines.push(Line::from(Span::styled(
            format!("last error: {error}"),
            Style::default().fg(Color::Red),
        )));
    }

    Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(controller.config().status_url()))
}

fn render_player(controller: &WallController<TerminalWall, PlaylistPlayer>) -> Paragraph<'static> {
    let player = controller.player();
    let title = controller.surface().title();
    let size = player
        .size()
        .map(|s| format!("{}x{}", s.width, s.height))
        .unwrap_or_else(|| "cell".to_string());
    let audio = if player.muted() {
        "muted".to_string()
    } else {
        format!("volume {}%", player.volume())
    };

    let lines = vec![
        Line::from(Span::styled(
            player.title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("state:   {:?}", player.state())),
        Line::from(format!("shuffle: {}", if player.shuffle() { "on" } else { "off" })),
        Line::from(format!("audio:   {audio}")),
        Line::from(format!("size:    {size}")),
    ];

    let block_title = if title.is_empty() {
        "player".to_string()
    } else {
        title.to_string()
    };
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(block_title),
    )
}

fn render_camera(
    controller: &WallController<TerminalWall, PlaylistPlayer>,
    cam: CameraIndex,
) -> Paragraph<'static> {
    let Some(cell) = controller.surface().cell(cam) else {
        return Paragraph::new("");
    };
    if !cell.visible {
        return Paragraph::new("");
    }

    let border = match cell.border {
        BorderColor::Highlight => Color::Yellow,
        BorderColor::Idle => Color::Green,
    };

    let mut lines = Vec::new();
    match &cell.source {
        Some(source) => {
            let kind = match source.kind {
                SourceKind::Live => Span::styled("live", Style::default().fg(Color::Green)),
                SourceKind::Placeholder => {
                    Span::styled("placeholder", Style::default().fg(Color::Red))
                }
            };
            lines.push(Line::from(vec![Span::raw("source:  "), kind]));
            lines.push(Line::from(source.url.clone()));
        }
        None => lines.push(Line::from("no source")),
    }
    if let Some(stream) = controller.stream(cam) {
        lines.push(Line::from(format!(
            "attempt: {}  retries: {}{}",
            stream.attempt,
            stream.retries,
            if stream.retry_scheduled { "  (retrying)" } else { "" }
        )));
    }
    if controller.highlight(cam).is_some_and(|h| h.active) {
        lines.push(Line::from(Span::styled(
            "MOTION",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!("cam{cam}")),
    )
}
