use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io::{self, stdout},
    sync::mpsc::{self, Sender},
    thread,
    time::Duration,
};

use blockfall::board::{CellState, GRID_HEIGHT, GRID_WIDTH};
use blockfall::command::{command_for_key, dispatch, Command, CommandStream, Flow};
use blockfall::game::{Game, GameEvent, GameState};
use blockfall::snapshot::Snapshot;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "blockfall", version, about = "Falling-block puzzle for the terminal")]
struct Args {
    /// Seed for the piece sequence. A random seed is used if omitted.
    #[arg(long)]
    seed: Option<u64>,
}

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = "  ";

const INPUT_POLL: Duration = Duration::from_millis(100);

// ============================================================================
// Color Mapping
// ============================================================================

fn tag_color(tag: u8) -> Color {
    match tag {
        1 => Color::Cyan,
        2 => Color::Blue,
        3 => Color::Yellow,
        4 => Color::Green,
        5 => Color::Red,
        6 => Color::Magenta,
        7 => Color::White,
        _ => Color::Reset,
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render(frame: &mut Frame, snapshot: &Snapshot, status: &str) {
    let area = frame.size();

    render_game(frame, snapshot, status, area);
    match snapshot.state {
        GameState::Starting | GameState::Playing => {}
        GameState::Paused => render_paused(frame, area),
        GameState::GameOver => render_game_over(frame, snapshot, area),
    }
}

fn render_game(frame: &mut Frame, snapshot: &Snapshot, status: &str, area: Rect) {
    let grid_display_width = (GRID_WIDTH as u16 * CELL_WIDTH) + 2;
    let grid_display_height = GRID_HEIGHT as u16 + 2;
    let side_width = 14;
    let total_width = grid_display_width + side_width + 2;
    let total_height = grid_display_height + 2;

    let main_area = centered_rect(total_width, total_height, area);

    let vertical = Layout::vertical([
        Constraint::Length(grid_display_height),
        Constraint::Fill(1),
    ])
    .split(main_area);

    let game_row = vertical[0];

    // [Grid][Next / Info]
    let horizontal = Layout::horizontal([
        Constraint::Length(grid_display_width),
        Constraint::Length(side_width),
    ])
    .split(game_row);

    let side = Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).split(horizontal[1]);

    render_grid(frame, snapshot, horizontal[0]);
    render_next(frame, snapshot, side[0]);
    render_info(frame, snapshot, status, side[1]);

    let controls_area = Rect {
        x: area.x,
        y: game_row.y + game_row.height,
        width: area.width,
        height: 1,
    };

    if controls_area.y < area.height {
        let controls = Paragraph::new(Line::from(
            "←→↓: Move | ↑/Space: Rotate | Esc/P: Pause | R: Restart | Q: Quit",
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(controls, controls_area);
    }
}

fn render_grid(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Blockfall ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = snapshot
        .render_grid()
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell {
                    CellState::Empty => Span::raw(EMPTY_CHAR),
                    CellState::Filled(piece_type) => Span::styled(
                        BLOCK_CHAR,
                        Style::default().fg(tag_color(piece_type.color())),
                    ),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_next(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Next ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let color = tag_color(snapshot.next.color());
    let lines: Vec<Line> = snapshot
        .next
        .mask()
        .iter()
        .map(|mask_row| {
            let mut spans = vec![Span::raw(" ")];
            spans.extend(mask_row.iter().map(|&bit| {
                if bit != 0 {
                    Span::styled(BLOCK_CHAR, Style::default().fg(color))
                } else {
                    Span::raw(EMPTY_CHAR)
                }
            }));
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_info(frame: &mut Frame, snapshot: &Snapshot, status: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Info ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Score", Style::default().fg(Color::Yellow))),
        Line::from(format!("{}", snapshot.score)),
        Line::from(""),
        Line::from(Span::styled("Level", Style::default().fg(Color::Green))),
        Line::from(format!("{}", snapshot.level)),
        Line::from(""),
        Line::from(Span::styled(status, Style::default().fg(Color::Cyan))),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_game_over(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(format!("Score: {}", snapshot.score)),
        Line::from(format!("Level: {}", snapshot.level)),
        Line::from(""),
        Line::from(Span::styled(
            "Press R to restart",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game Over ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(paragraph, centered_rect(24, 10, area));
}

fn render_paused(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("PAUSED", Style::default().fg(Color::Yellow))),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Paused ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(paragraph, centered_rect(24, 7, area));
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}

/// Short message for the info panel, from the events of the last command.
fn status_for(events: &[GameEvent]) -> Option<String> {
    events.iter().rev().find_map(|event| match event {
        GameEvent::LevelUp(level) => Some(format!("Level {level}!")),
        GameEvent::LinesCleared(1) => Some("1 line".to_string()),
        GameEvent::LinesCleared(lines) => Some(format!("{lines} lines")),
        GameEvent::GameRestarted => Some(String::new()),
        _ => None,
    })
}

// ============================================================================
// Main Loop
// ============================================================================

/// Producer side of the input path: polls the terminal and forwards mapped
/// key presses until the consumer hangs up. A terminal error is forwarded
/// and ends the producer.
fn spawn_input(commands: Sender<io::Result<Command>>) {
    thread::spawn(move || loop {
        let key = match event::poll(INPUT_POLL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => key,
                Ok(_) => continue,
                Err(err) => {
                    let _ = commands.send(Err(err));
                    return;
                }
            },
            Ok(false) => continue,
            Err(err) => {
                let _ = commands.send(Err(err));
                return;
            }
        };

        if let Some(command) = command_for_key(key) {
            if commands.send(Ok(command)).is_err() {
                return;
            }
        }
    });
}

fn run(game: &mut Game) -> Result<()> {
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout())).context("failed to open terminal")?;

    let (tx, rx) = mpsc::channel();
    spawn_input(tx);
    let mut commands = CommandStream::new(rx, game.speed());
    let mut status = String::new();

    loop {
        let snapshot = game.snapshot();
        terminal.draw(|frame| render(frame, &snapshot, &status))?;

        let command = commands
            .next(game.speed())
            .context("failed to read input")?;
        if dispatch(game, command) == Flow::Quit {
            return Ok(());
        }

        if let Some(message) = status_for(&game.take_events()) {
            status = message;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut game = match args.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };

    enable_raw_mode().context("failed to enable raw mode")?;
    if let Err(err) = stdout().execute(EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err).context("failed to enter alternate screen");
    }

    let result = run(&mut game);

    // Always try to restore terminal state.
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
    result?;

    println!("Final score: {} (level {})", game.score(), game.level());
    Ok(())
}
