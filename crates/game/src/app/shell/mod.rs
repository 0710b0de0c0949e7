mod navigation;

use handheld_engine::{ControlSurface, Frame, InputSnapshot, Rgba, Scene, SceneMachine};
use tracing::{debug, info};

use super::chrome::{self, SCREEN_RECT};

pub(crate) use navigation::{AppScreen, GameId, NavigationState};

const TILE_SIZE: i32 = 80;
const TILE_GAP: i32 = 16;
const TILE_ROW_X: i32 = 12;
const TILE_ROW_Y: i32 = 70;
const HOME_BACKGROUND: Rgba = [235, 235, 235, 255];
const HOME_BAR: Rgba = [210, 210, 210, 255];
const SELECTION: Rgba = [0, 190, 255, 255];
const SLEEP_OVERLAY: Rgba = [0, 0, 0, 255];

fn tile_color(game: GameId) -> Rgba {
    match game {
        GameId::Platformer => [229, 57, 53, 255],
        GameId::Walker => [253, 216, 53, 255],
        GameId::Racer => [30, 136, 229, 255],
        GameId::Fighter => [251, 140, 0, 255],
    }
}

/// Root scene: the launcher plus whichever game it has started.
pub(crate) struct Shell {
    nav: NavigationState,
    games: SceneMachine<GameId>,
    catalog: Vec<GameId>,
    controls: ControlSurface,
    last_input: InputSnapshot,
}

impl Shell {
    pub(crate) fn new(games: SceneMachine<GameId>, controls: ControlSurface) -> Self {
        let catalog = GameId::ALL
            .into_iter()
            .filter(|game| games.contains(*game))
            .collect();
        Self {
            nav: NavigationState::new(),
            games,
            catalog,
            controls,
            last_input: InputSnapshot::empty(),
        }
    }

    fn render_home(&self, screen: &mut Frame<'_>) {
        screen.clear(HOME_BACKGROUND);
        screen.fill_rect(0, 0, screen.width() as i32, 24, HOME_BAR);
        for (index, game) in self.catalog.iter().enumerate() {
            let x = TILE_ROW_X + index as i32 * (TILE_SIZE + TILE_GAP);
            if index == self.nav.selected_index {
                screen.fill_rect(x - 4, TILE_ROW_Y - 4, TILE_SIZE + 8, TILE_SIZE + 8, SELECTION);
            }
            screen.fill_rect(x, TILE_ROW_Y, TILE_SIZE, TILE_SIZE, tile_color(*game));
        }
    }
}

impl Scene for Shell {
    fn load(&mut self) {
        info!(games = self.catalog.len(), "shell_loaded");
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        self.last_input = *input;
        let outcome = self.nav.step(input, &self.catalog);

        if outcome.sleep_toggled {
            info!(sleeping = self.nav.sleeping, "nav_sleep_toggled");
        }
        if outcome.selection_moved {
            debug!(selected_index = self.nav.selected_index, "nav_selection_moved");
        }
        if outcome.returned_home {
            info!("nav_home");
            self.games.stop();
        }
        if let Some(game) = outcome.launched {
            info!(game = ?game, title = game.title(), "nav_launch");
            self.games.start(game);
            return;
        }

        if !self.nav.sleeping && matches!(self.nav.current, AppScreen::Game(_)) {
            self.games.update_active(fixed_dt_seconds, input);
        }
    }

    fn render(&self, frame: &mut Frame<'_>) {
        chrome::draw_console(frame, &self.controls, &self.last_input);

        let mut screen = frame.region(
            SCREEN_RECT.x,
            SCREEN_RECT.y,
            SCREEN_RECT.width as u32,
            SCREEN_RECT.height as u32,
        );
        match self.nav.current {
            AppScreen::Home => self.render_home(&mut screen),
            AppScreen::Game(_) => {
                self.games.render_active(&mut screen);
            }
        }
        if self.nav.sleeping {
            screen.clear(SLEEP_OVERLAY);
        }
    }

    fn unload(&mut self) {
        self.games.shutdown_all();
        info!("shell_unloaded");
    }

    fn debug_title(&self) -> Option<String> {
        let mut title = match self.nav.current {
            AppScreen::Home => match self.nav.selected_game(&self.catalog) {
                Some(game) => format!("Home | {}", game.title()),
                None => "Home".to_string(),
            },
            AppScreen::Game(game) => match self.games.debug_title_active() {
                Some(status) => format!("{} | {}", game.title(), status),
                None => game.title().to_string(),
            },
        };
        if self.nav.sleeping {
            title.push_str(" (sleep)");
        }
        Some(title)
    }
}
