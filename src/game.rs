//! Game state machine: Menu, Playing, Paused, Ended.
//!
//! The machine consumes one [`Event`] per frame and answers with the
//! [`Effect`]s the frontend should perform, so every transition is
//! testable without touching a terminal.

use std::time::Duration;

use crate::grid::{Dir, Grid, LevelError};
use crate::levels::{Catalog, Difficulty};
use crate::path;
use crate::session::Session;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    Ended,
}

/// One discrete input, already decoded from keys by the frontend.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    Start,
    ShowScores,
    SetDifficulty(Difficulty),
    ToggleSound,
    Quit,
    Move(Dir),
    Pause,
    Resume,
    Hint,
    ToMenu,
    Replay,
}

/// Side effects the frontend performs after a transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Effect {
    /// A move was accepted; chirp if sound is on.
    Moved,
    /// A move hit a wall or the edge; feedback only, nothing changed.
    Blocked,
    Hint(Option<Dir>),
    /// Show the 3-2-1 countdown before the level begins.
    Countdown,
    ShowScores,
    /// Emitted exactly once, on the transition into `Ended`.
    ScoreRecorded { steps: u32, elapsed: Duration },
    Quit,
}

pub struct Game {
    state: GameState,
    difficulty: Difficulty,
    sound_on: bool,
    catalog: Catalog,
    level_index: usize,
    grid: Option<Grid>,
    session: Session,
    // Run totals across levels; the session resets per level.
    total_steps: u32,
    total_play: Duration,
    final_score: Option<(u32, Duration)>,
}

impl Game {
    pub fn new() -> Game {
        Game {
            state: GameState::Menu,
            difficulty: Difficulty::Easy,
            sound_on: true,
            catalog: Catalog::for_difficulty(Difficulty::Easy),
            level_index: 0,
            grid: None,
            session: Session::new(),
            total_steps: 0,
            total_play: Duration::ZERO,
            final_score: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn sound_on(&self) -> bool {
        self.sound_on
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// Steps and play time recorded when the run ended.
    pub fn final_score(&self) -> Option<(u32, Duration)> {
        self.final_score
    }

    /// Loads the first level of `catalog` and enters `Playing`. Used by
    /// `Start` and `Replay`; tests call it directly to inject catalogs.
    pub fn begin(&mut self, catalog: Catalog) -> Result<Vec<Effect>, LevelError> {
        if catalog.is_empty() {
            return Err(LevelError::EmptyCatalog);
        }
        self.grid = Some(catalog.load(0)?);
        self.catalog = catalog;
        self.level_index = 0;
        self.session.reset();
        self.total_steps = 0;
        self.total_play = Duration::ZERO;
        self.final_score = None;
        self.state = GameState::Playing;
        Ok(vec![Effect::Countdown])
    }

    /// Advances one frame. Unrecognized state/event pairs are no-ops.
    pub fn handle(&mut self, event: Event) -> Result<Vec<Effect>, LevelError> {
        match (self.state, event) {
            (GameState::Menu, Event::Start) | (GameState::Ended, Event::Replay) => {
                self.begin(Catalog::for_difficulty(self.difficulty))
            }
            (GameState::Menu, Event::ShowScores) => Ok(vec![Effect::ShowScores]),
            (GameState::Menu, Event::SetDifficulty(difficulty)) => {
                self.difficulty = difficulty;
                Ok(Vec::new())
            }
            (GameState::Menu, Event::Quit) => Ok(vec![Effect::Quit]),
            (GameState::Menu | GameState::Playing, Event::ToggleSound) => {
                self.sound_on = !self.sound_on;
                Ok(Vec::new())
            }
            (GameState::Playing, Event::Pause) => {
                self.state = GameState::Paused;
                Ok(Vec::new())
            }
            (GameState::Playing, Event::Hint) => {
                let hint = self.grid.as_ref().and_then(path::hint);
                Ok(vec![Effect::Hint(hint)])
            }
            (GameState::Playing, Event::Move(dir)) => self.step(dir),
            (GameState::Paused, Event::Resume) => {
                self.state = GameState::Playing;
                Ok(Vec::new())
            }
            (GameState::Ended, Event::ToMenu) => {
                self.state = GameState::Menu;
                self.grid = None;
                Ok(Vec::new())
            }
            _ => Ok(Vec::new()),
        }
    }

    fn step(&mut self, dir: Dir) -> Result<Vec<Effect>, LevelError> {
        let Some(grid) = self.grid.as_mut() else {
            return Ok(Vec::new());
        };
        if !grid.move_player(dir) {
            return Ok(vec![Effect::Blocked]);
        }
        self.session.bump_step();
        let mut effects = vec![Effect::Moved];

        if grid.at_exit() {
            self.total_steps += self.session.steps();
            self.total_play += self.session.elapsed();
            if self.advance_level()? {
                self.session.reset();
                effects.push(Effect::Countdown);
            } else {
                let score = (self.total_steps, self.total_play);
                self.final_score = Some(score);
                self.state = GameState::Ended;
                effects.push(Effect::ScoreRecorded { steps: score.0, elapsed: score.1 });
            }
        }
        Ok(effects)
    }

    /// Loads the next catalog entry. False when the catalog is exhausted;
    /// the current grid is left untouched in that case.
    fn advance_level(&mut self) -> Result<bool, LevelError> {
        let next = self.level_index + 1;
        if next >= self.catalog.len() {
            return Ok(false);
        }
        self.grid = Some(self.catalog.load(next)?);
        self.level_index = next;
        Ok(true)
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    // 1x wide corridors keep test walks short.
    const TWO_STEPS: &[&str] = &["#####", "#P E#", "#####"];

    fn playing(layouts: &[&[&str]]) -> Game {
        let mut game = Game::new();
        let effects = game.begin(Catalog::from_layouts(layouts)).unwrap();
        assert_eq!(effects, vec![Effect::Countdown]);
        game
    }

    #[test]
    fn start_enters_playing_with_a_countdown() {
        let mut game = Game::new();
        let effects = game.handle(Event::Start).unwrap();
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(effects, vec![Effect::Countdown]);
        assert!(game.grid().is_some());
    }

    #[test]
    fn empty_catalog_is_fatal() {
        let mut game = Game::new();
        let empty: &[&[&str]] = &[];
        assert_eq!(
            game.begin(Catalog::from_layouts(empty)),
            Err(LevelError::EmptyCatalog)
        );
    }

    #[test]
    fn menu_settings_mutate_in_place() {
        let mut game = Game::new();
        assert!(game.sound_on());
        game.handle(Event::ToggleSound).unwrap();
        assert!(!game.sound_on());
        game.handle(Event::SetDifficulty(Difficulty::Hard)).unwrap();
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(game.state(), GameState::Menu);
    }

    #[test]
    fn blocked_move_changes_nothing() {
        let mut game = playing(&[TWO_STEPS]);
        let effects = game.handle(Event::Move(Dir::Up)).unwrap();
        assert_eq!(effects, vec![Effect::Blocked]);
        assert_eq!(game.session().steps(), 0);
        assert_eq!(game.grid().unwrap().player(), (1, 1));
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn pause_and_resume_round_trip() {
        let mut game = playing(&[TWO_STEPS]);
        game.handle(Event::Pause).unwrap();
        assert_eq!(game.state(), GameState::Paused);
        // Everything except resume is ignored while paused.
        game.handle(Event::Move(Dir::Right)).unwrap();
        assert_eq!(game.session().steps(), 0);
        game.handle(Event::Resume).unwrap();
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn hint_surfaces_the_next_move() {
        let mut game = playing(&[TWO_STEPS]);
        let effects = game.handle(Event::Hint).unwrap();
        assert_eq!(effects, vec![Effect::Hint(Some(Dir::Right))]);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn finishing_a_mid_catalog_level_advances_and_resets() {
        let mut game = playing(&[TWO_STEPS, TWO_STEPS]);
        game.handle(Event::Move(Dir::Right)).unwrap();
        let effects = game.handle(Event::Move(Dir::Right)).unwrap();
        assert_eq!(effects, vec![Effect::Moved, Effect::Countdown]);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.level_index(), 1);
        assert_eq!(game.session().steps(), 0);
        // Fresh grid, player back at its start marker.
        assert_eq!(game.grid().unwrap().player(), (1, 1));
        assert_eq!(game.grid().unwrap().cell(1, 1), Cell::Player);
    }

    #[test]
    fn finishing_the_last_level_ends_the_run_once() {
        let mut game = playing(&[TWO_STEPS]);
        game.handle(Event::Move(Dir::Right)).unwrap();
        let effects = game.handle(Event::Move(Dir::Right)).unwrap();
        assert_eq!(game.state(), GameState::Ended);
        assert!(matches!(
            effects.as_slice(),
            [Effect::Moved, Effect::ScoreRecorded { steps: 2, .. }]
        ));
        // The last level's grid is left as it was.
        assert!(game.grid().unwrap().at_exit());
        assert_eq!(game.final_score().map(|(steps, _)| steps), Some(2));
    }

    #[test]
    fn ended_returns_to_menu_or_replays() {
        let mut game = playing(&[TWO_STEPS]);
        game.handle(Event::Move(Dir::Right)).unwrap();
        game.handle(Event::Move(Dir::Right)).unwrap();
        assert_eq!(game.state(), GameState::Ended);

        let mut to_menu = playing(&[TWO_STEPS]);
        to_menu.handle(Event::Move(Dir::Right)).unwrap();
        to_menu.handle(Event::Move(Dir::Right)).unwrap();
        to_menu.handle(Event::ToMenu).unwrap();
        assert_eq!(to_menu.state(), GameState::Menu);

        // Replay reloads the difficulty catalog and starts over.
        let effects = game.handle(Event::Replay).unwrap();
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(effects, vec![Effect::Countdown]);
        assert_eq!(game.level_index(), 0);
        assert_eq!(game.session().steps(), 0);
        assert_eq!(game.final_score(), None);
    }

    #[test]
    fn unrecognized_events_are_ignored() {
        let mut game = playing(&[TWO_STEPS]);
        assert!(game.handle(Event::Start).unwrap().is_empty());
        assert!(game.handle(Event::Replay).unwrap().is_empty());
        assert_eq!(game.state(), GameState::Playing);
    }
}
