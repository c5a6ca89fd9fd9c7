//! Crossterm frontend: full clear-and-redraw rendering, blocking key
//! reads, one event per frame. All game rules live in [`crate::game`].

use std::io::{Stdout, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::game::{Effect, Event, Game, GameState};
use crate::grid::{Cell, Dir, Grid};
use crate::levels::Difficulty;
use crate::scores::ScoreStore;
use crate::session::format_mmss;

const CELL_W: usize = 2;
const DEFAULT_COUNTDOWN_MS: u64 = 600;
const BELL: char = '\u{0007}';

pub fn run(stdout: &mut Stdout) -> Result<()> {
    let mut game = Game::new();
    let store = ScoreStore::new(score_path());
    let countdown_ms = read_countdown_ms();
    // Save failures surface on the end screen instead of aborting.
    let mut save_error: Option<String> = None;

    loop {
        let input = match game.state() {
            GameState::Menu => {
                draw_menu(stdout, &game, &store)?;
                menu_event(stdout, &game)?
            }
            GameState::Playing => {
                draw_playing(stdout, &game)?;
                playing_event()?
            }
            GameState::Paused => {
                draw_paused(stdout, &game)?;
                paused_event()?
            }
            GameState::Ended => {
                draw_ended(stdout, &game, save_error.as_deref())?;
                ended_event()?
            }
        };
        let Some(input) = input else { continue };

        for effect in game.handle(input)? {
            match effect {
                Effect::Moved | Effect::Blocked => {
                    if game.sound_on() {
                        stdout.queue(Print(BELL))?;
                        stdout.flush()?;
                    }
                }
                Effect::Hint(hint) => show_hint(stdout, &game, hint)?,
                Effect::Countdown => countdown(stdout, countdown_ms)?,
                Effect::ShowScores => show_scores(stdout, &store)?,
                Effect::ScoreRecorded { steps, elapsed } => {
                    save_error = store
                        .record(steps, elapsed)
                        .err()
                        .map(|err| format!("Could not save score: {err}"));
                }
                Effect::Quit => return Ok(()),
            }
        }
    }
}

fn score_path() -> String {
    std::env::var("MAZE_ESCAPE_SCORES").unwrap_or_else(|_| "scores.txt".to_owned())
}

fn read_countdown_ms() -> u64 {
    std::env::var("MAZE_ESCAPE_COUNTDOWN_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_COUNTDOWN_MS)
}

/// Blocks until a key press and returns its code.
fn read_key() -> Result<KeyCode> {
    loop {
        if let TermEvent::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key.code);
            }
        }
    }
}

fn menu_event(stdout: &mut Stdout, game: &Game) -> Result<Option<Event>> {
    Ok(match read_key()? {
        KeyCode::Char('1') => Some(Event::Start),
        KeyCode::Char('2') => Some(Event::ShowScores),
        KeyCode::Char('3') => select_difficulty(stdout, game)?.map(Event::SetDifficulty),
        KeyCode::Char('4') => Some(Event::ToggleSound),
        KeyCode::Char('5') => Some(Event::Quit),
        _ => None,
    })
}

fn playing_event() -> Result<Option<Event>> {
    Ok(match read_key()? {
        KeyCode::Char('w' | 'W') | KeyCode::Up => Some(Event::Move(Dir::Up)),
        KeyCode::Char('s' | 'S') | KeyCode::Down => Some(Event::Move(Dir::Down)),
        KeyCode::Char('a' | 'A') | KeyCode::Left => Some(Event::Move(Dir::Left)),
        KeyCode::Char('d' | 'D') | KeyCode::Right => Some(Event::Move(Dir::Right)),
        KeyCode::Char('p' | 'P') => Some(Event::Pause),
        KeyCode::Char('h' | 'H') => Some(Event::Hint),
        KeyCode::Char('f' | 'F') => Some(Event::ToggleSound),
        _ => None,
    })
}

fn paused_event() -> Result<Option<Event>> {
    Ok(match read_key()? {
        KeyCode::Char('p' | 'P') => Some(Event::Resume),
        _ => None,
    })
}

fn ended_event() -> Result<Option<Event>> {
    Ok(match read_key()? {
        KeyCode::Char('m' | 'M') => Some(Event::ToMenu),
        KeyCode::Char('r' | 'R') => Some(Event::Replay),
        _ => None,
    })
}

fn select_difficulty(stdout: &mut Stdout, game: &Game) -> Result<Option<Difficulty>> {
    draw_lines(
        stdout,
        &[
            "Select Difficulty:".to_owned(),
            "1) Easy".to_owned(),
            "2) Medium".to_owned(),
            "3) Hard".to_owned(),
            format!("(Current: {})", game.difficulty().label()),
        ],
    )?;
    Ok(match read_key()? {
        KeyCode::Char('1') => Some(Difficulty::Easy),
        KeyCode::Char('2') => Some(Difficulty::Medium),
        KeyCode::Char('3') => Some(Difficulty::Hard),
        _ => None,
    })
}

fn draw_lines(stdout: &mut Stdout, lines: &[String]) -> Result<()> {
    stdout.queue(Clear(ClearType::All))?;
    for (row, line) in lines.iter().enumerate() {
        stdout.queue(MoveTo(0, row as u16))?;
        stdout.queue(Print(line))?;
    }
    stdout.flush()?;
    Ok(())
}

fn draw_menu(stdout: &mut Stdout, game: &Game, store: &ScoreStore) -> Result<()> {
    let saved = store.read().len();
    draw_lines(
        stdout,
        &[
            "=== Escape the Maze ===".to_owned(),
            "1) Start Game".to_owned(),
            format!("2) View High Scores ({saved} saved)"),
            format!("3) Difficulty (Current: {})", game.difficulty().label()),
            format!("4) Toggle Sound (Current: {})", on_off(game.sound_on())),
            "5) Exit".to_owned(),
            "Select:".to_owned(),
        ],
    )
}

fn draw_playing(stdout: &mut Stdout, game: &Game) -> Result<()> {
    stdout.queue(Clear(ClearType::All))?;
    if let Some(grid) = game.grid() {
        draw_grid(stdout, grid, 0)?;
        let hud = format!(
            "Steps={}  Time={}  (W/A/S/D move, P pause, H hint, F sound {})",
            game.session().steps(),
            format_mmss(game.session().elapsed()),
            on_off(game.sound_on()),
        );
        stdout.queue(MoveTo(0, grid.rows() as u16 + 1))?;
        stdout.queue(Print(hud))?;
    }
    stdout.flush()?;
    Ok(())
}

fn draw_grid(stdout: &mut Stdout, grid: &Grid, origin_y: u16) -> Result<()> {
    for r in 0..grid.rows() {
        stdout.queue(MoveTo(0, origin_y + r as u16))?;
        for c in 0..grid.cols() {
            let (text, color) = glyph(grid.cell(r, c));
            stdout.queue(SetForegroundColor(color))?;
            stdout.queue(Print(text))?;
            let w = UnicodeWidthStr::width(text);
            for _ in w..CELL_W {
                stdout.queue(Print(' '))?;
            }
        }
        stdout.queue(ResetColor)?;
    }
    Ok(())
}

fn glyph(cell: Cell) -> (&'static str, Color) {
    match cell {
        Cell::Wall => ("██", Color::Blue),
        Cell::Open => ("  ", Color::Reset),
        Cell::Player => ("☻", Color::Yellow),
        Cell::Exit => ("⌂", Color::Green),
        Cell::Visited => ("·", Color::DarkGrey),
    }
}

fn draw_paused(stdout: &mut Stdout, game: &Game) -> Result<()> {
    draw_playing(stdout, game)?;
    let row = game.grid().map_or(0, |g| g.rows() as u16 + 2);
    stdout.queue(MoveTo(0, row))?;
    stdout.queue(Print("Paused. Press P to resume."))?;
    stdout.flush()?;
    Ok(())
}

fn draw_ended(stdout: &mut Stdout, game: &Game, save_error: Option<&str>) -> Result<()> {
    let mut lines = vec!["=== Escape the Maze ===".to_owned()];
    if let Some((steps, elapsed)) = game.final_score() {
        lines.push(format!(
            "You finished all mazes! Steps={steps}, Time={}",
            format_mmss(elapsed)
        ));
    }
    if let Some(err) = save_error {
        lines.push(err.to_owned());
    }
    lines.push("Press M for Menu or R to Replay.".to_owned());
    draw_lines(stdout, &lines)
}

fn show_hint(stdout: &mut Stdout, game: &Game, hint: Option<Dir>) -> Result<()> {
    let row = game.grid().map_or(0, |g| g.rows() as u16 + 2);
    stdout.queue(MoveTo(0, row))?;
    match hint {
        Some(dir) => stdout.queue(Print(format!(
            "Hint: Move {} (press any key to continue)...",
            dir.label()
        )))?,
        None => stdout.queue(Print("No path available!"))?,
    };
    stdout.flush()?;
    if hint.is_some() {
        read_key()?;
    }
    Ok(())
}

fn show_scores(stdout: &mut Stdout, store: &ScoreStore) -> Result<()> {
    let mut lines = vec!["=== High Scores (Latest 10) ===".to_owned()];
    let entries = store.read();
    if entries.is_empty() {
        lines.push("No scores yet!".to_owned());
    } else {
        lines.extend(entries);
    }
    lines.push(String::new());
    lines.push("Press any key to return to menu...".to_owned());
    draw_lines(stdout, &lines)?;
    read_key()?;
    Ok(())
}

fn countdown(stdout: &mut Stdout, tick_ms: u64) -> Result<()> {
    for i in (1..=3).rev() {
        stdout.queue(Clear(ClearType::All))?;
        stdout.queue(MoveTo(0, 0))?;
        stdout.queue(Print(format!("Starting in {i}...")))?;
        stdout.flush()?;
        thread::sleep(Duration::from_millis(tick_ms));
    }
    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "On"
    } else {
        "Off"
    }
}
