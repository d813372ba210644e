//! Scene state machine: main menu, gameplay, game over and high scores.
//!
//! The binary feeds key events and fixed ticks into [`App`] and draws
//! whatever [`App::render_into`] produces. Nothing here touches the
//! terminal directly, so the whole flow is testable.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::config::Config;
use crate::core::{GameSnapshot, GameState};
use crate::input::{
    handle_key_event, is_back_to_menu, menu_command, should_quit, InputHandler, MenuCommand,
};
use crate::scores::HighScores;
use crate::term::{
    render_game_over_into, render_high_scores_into, render_menu_into, FrameBuffer,
    GameOverSummary, GameView, MenuScreen, ScoreRow, Viewport,
};
use crate::types::{GameAction, GameMode, SOFT_DROP_GRACE_MS};

/// What the main loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    NormalMode,
    ItemMode,
    HighScores,
    Quit,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 4] = [
        MenuEntry::NormalMode,
        MenuEntry::ItemMode,
        MenuEntry::HighScores,
        MenuEntry::Quit,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MenuEntry::NormalMode => "Normal mode",
            MenuEntry::ItemMode => "Item mode",
            MenuEntry::HighScores => "High scores",
            MenuEntry::Quit => "Quit",
        }
    }
}

const MENU_LABELS: [&str; 4] = [
    MenuEntry::ALL[0].label(),
    MenuEntry::ALL[1].label(),
    MenuEntry::ALL[2].label(),
    MenuEntry::ALL[3].label(),
];

/// Cursor over a fixed number of entries, wrapping at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    selected: usize,
    len: usize,
}

impl MenuState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            len: len.max(1),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn move_up(&mut self) {
        self.selected = (self.selected + self.len - 1) % self.len;
    }

    pub fn move_down(&mut self) {
        self.selected = (self.selected + 1) % self.len;
    }
}

/// Which scene is showing, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    MainMenu,
    Playing,
    GameOver,
    HighScores,
}

/// A running game plus the input state that drives it.
struct Session {
    game: GameState,
    input: InputHandler,
    soft_drop_active: bool,
    soft_drop_timer_ms: i32,
}

impl Session {
    fn apply(&mut self, action: GameAction) {
        if action == GameAction::SoftDrop {
            self.soft_drop_active = true;
            self.soft_drop_timer_ms = SOFT_DROP_GRACE_MS as i32;
        }
        if action == GameAction::Restart {
            self.input.reset();
            self.soft_drop_active = false;
        }
        self.game.apply_action(action);
    }

    fn tick(&mut self, elapsed_ms: u32) {
        for action in self.input.update(elapsed_ms) {
            self.apply(action);
        }

        if self.soft_drop_active {
            self.soft_drop_timer_ms -= elapsed_ms as i32;
            if self.soft_drop_timer_ms <= 0 {
                self.soft_drop_active = false;
            }
        }

        self.game.tick(elapsed_ms, self.soft_drop_active);
    }
}

enum Scene {
    MainMenu,
    Playing(Box<Session>),
    GameOver(GameOverSummary),
    HighScores,
}

pub struct App {
    config: Config,
    seed: u64,
    games_started: u64,
    scores: HighScores,
    scores_path: Option<PathBuf>,
    menu: MenuState,
    scene: Scene,
    view: GameView,
    snapshot: GameSnapshot,
}

impl App {
    /// `seed` is the base seed; every new game from the menu offsets it.
    pub fn new(
        config: Config,
        seed: u64,
        scores: HighScores,
        scores_path: Option<PathBuf>,
    ) -> Self {
        Self {
            config,
            seed,
            games_started: 0,
            scores,
            scores_path,
            menu: MenuState::new(MenuEntry::ALL.len()),
            scene: Scene::MainMenu,
            view: GameView::default(),
            snapshot: GameSnapshot::default(),
        }
    }

    pub fn scene(&self) -> SceneKind {
        match self.scene {
            Scene::MainMenu => SceneKind::MainMenu,
            Scene::Playing(_) => SceneKind::Playing,
            Scene::GameOver(_) => SceneKind::GameOver,
            Scene::HighScores => SceneKind::HighScores,
        }
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    pub fn game(&self) -> Option<&GameState> {
        match &self.scene {
            Scene::Playing(session) => Some(&session.game),
            _ => None,
        }
    }

    pub fn game_mut(&mut self) -> Option<&mut GameState> {
        match &mut self.scene {
            Scene::Playing(session) => Some(&mut session.game),
            _ => None,
        }
    }

    pub fn game_over_summary(&self) -> Option<&GameOverSummary> {
        match &self.scene {
            Scene::GameOver(summary) => Some(summary),
            _ => None,
        }
    }

    /// Leave whatever is showing and start a fresh game.
    pub fn start_game(&mut self, mode: GameMode) {
        let seed = self.seed.wrapping_add(self.games_started);
        self.games_started += 1;

        let input = &self.config.input;
        let mut game = GameState::new(self.config.game_options(mode, seed));
        game.start();

        self.scene = Scene::Playing(Box::new(Session {
            game,
            input: InputHandler::with_config(input.das_ms, input.arr_ms)
                .with_key_release_timeout_ms(input.key_release_timeout_ms),
            soft_drop_active: false,
            soft_drop_timer_ms: 0,
        }));
        info!(scene = "playing", mode = mode.as_str(), seed, "scene changed");
    }

    fn show(&mut self, scene: Scene) {
        self.scene = scene;
        let name = match self.scene() {
            SceneKind::MainMenu => "menu",
            SceneKind::Playing => "playing",
            SceneKind::GameOver => "game_over",
            SceneKind::HighScores => "high_scores",
        };
        info!(scene = name, "scene changed");
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Control::Quit;
        }

        match &mut self.scene {
            Scene::MainMenu => return self.handle_menu_key(key),
            Scene::HighScores => {
                if matches!(
                    menu_command(key),
                    Some(MenuCommand::Back | MenuCommand::Select)
                ) || should_quit(key)
                {
                    self.show(Scene::MainMenu);
                }
            }
            Scene::GameOver(summary) => {
                let mode = summary.mode;
                match key.code {
                    KeyCode::Char('r' | 'R') => self.start_game(mode),
                    _ if menu_command(key) == Some(MenuCommand::Select)
                        || menu_command(key) == Some(MenuCommand::Back)
                        || should_quit(key) =>
                    {
                        self.show(Scene::MainMenu);
                    }
                    _ => {}
                }
            }
            Scene::Playing(session) => {
                if should_quit(key) {
                    return Control::Quit;
                }
                if is_back_to_menu(key) {
                    info!(score = session.game.score(), "game abandoned");
                    self.show(Scene::MainMenu);
                    return Control::Continue;
                }

                if let Some(action) = session.input.handle_key_press(key.code) {
                    session.apply(action);
                }
                if let Some(action) = handle_key_event(key) {
                    match action {
                        // Handled by the DAS/ARR handler above.
                        GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop => {}
                        _ => session.apply(action),
                    }
                }
                self.finish_if_over();
            }
        }
        Control::Continue
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Control {
        if should_quit(key) {
            return Control::Quit;
        }
        match menu_command(key) {
            Some(MenuCommand::Up) => self.menu.move_up(),
            Some(MenuCommand::Down) => self.menu.move_down(),
            Some(MenuCommand::Back) => return Control::Quit,
            Some(MenuCommand::Select) => match MenuEntry::ALL[self.menu.selected()] {
                MenuEntry::NormalMode => self.start_game(GameMode::Normal),
                MenuEntry::ItemMode => self.start_game(GameMode::Item),
                MenuEntry::HighScores => self.show(Scene::HighScores),
                MenuEntry::Quit => return Control::Quit,
            },
            None => {}
        }
        Control::Continue
    }

    pub fn handle_key_release(&mut self, key: KeyEvent) {
        if let Scene::Playing(session) = &mut self.scene {
            session.input.handle_key_release(key.code);
        }
    }

    /// Advance the active game by one fixed step.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if let Scene::Playing(session) = &mut self.scene {
            session.tick(elapsed_ms);
            self.finish_if_over();
        }
    }

    fn finish_if_over(&mut self) {
        let Scene::Playing(session) = &self.scene else {
            return;
        };
        let game = &session.game;
        if !game.game_over() {
            return;
        }

        let mode = game.mode();
        let mut summary = GameOverSummary {
            mode,
            score: game.score(),
            lines: game.lines(),
            level: game.level(),
            bombs_detonated: game.bombs_detonated(),
            rank: None,
        };
        info!(
            mode = mode.as_str(),
            score = summary.score,
            lines = summary.lines,
            level = summary.level,
            "game over"
        );

        summary.rank = self
            .scores
            .record(mode, summary.score, summary.lines, summary.level);
        if let Some(path) = &self.scores_path {
            if let Err(err) = self.scores.save(path) {
                warn!(error = %err, "could not save high scores");
            }
        }
        self.show(Scene::GameOver(summary));
    }

    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        match &self.scene {
            Scene::MainMenu => {
                let menu = MenuScreen {
                    title: "ITEM TETRIS",
                    entries: &MENU_LABELS,
                    selected: self.menu.selected(),
                    footer: "Up/Down: choose   Enter: select   q: quit",
                };
                render_menu_into(&menu, viewport, fb);
            }
            Scene::Playing(session) => {
                session.game.snapshot_into(&mut self.snapshot);
                self.view.render_into(&self.snapshot, viewport, fb);
            }
            Scene::GameOver(summary) => render_game_over_into(summary, viewport, fb),
            Scene::HighScores => {
                let rows = |mode| -> Vec<ScoreRow> {
                    self.scores
                        .for_mode(mode)
                        .map(|e| ScoreRow {
                            score: e.score,
                            lines: e.lines,
                            level: e.level,
                        })
                        .collect()
                };
                render_high_scores_into(
                    &rows(GameMode::Normal),
                    &rows(GameMode::Item),
                    viewport,
                    fb,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_state_wraps() {
        let mut menu = MenuState::new(3);
        menu.move_up();
        assert_eq!(menu.selected(), 2);
        menu.move_down();
        assert_eq!(menu.selected(), 0);
    }
}
