use handheld_engine::{Frame, InputSnapshot, LogicalButton, Rgba, Scene};

use super::timers::reference_frames;
use super::view::{draw_pips, WorldView};

const WORLD_WIDTH: f32 = 800.0;
const WORLD_HEIGHT: f32 = 360.0;
const FLOOR_Y: f32 = 300.0;
const PLAYER_SIZE: f32 = 30.0;
const PLAYER_START: (f32, f32) = (50.0, 200.0);
const GRAVITY: f32 = 0.8;
const FRICTION: f32 = 0.8;
const RUN_SPEED: f32 = 5.0;
const JUMP_STRENGTH: f32 = 15.0;
const COIN_SIZE: f32 = 20.0;
const COIN_VALUE: u32 = 100;
const COIN_POSITIONS: [(f32, f32); 4] = [(200.0, 250.0), (350.0, 200.0), (500.0, 250.0), (600.0, 150.0)];
const PATROL_SPEED: f32 = 2.0;
const PATROL_MIN_X: f32 = 300.0;
const PATROL_MAX_X: f32 = 750.0;
const PATROLLER_STARTS: [(f32, f32, f32); 2] = [(400.0, 270.0, -1.0), (700.0, 270.0, 1.0)];

const SKY: Rgba = [135, 206, 235, 255];
const DIRT: Rgba = [93, 64, 55, 255];
const GRASS: Rgba = [76, 175, 80, 255];
const CLOUD: Rgba = [240, 248, 255, 255];
const COIN: Rgba = [255, 215, 0, 255];
const PATROLLER: Rgba = [139, 69, 19, 255];
const SHIRT: Rgba = [244, 67, 54, 255];
const OVERALLS: Rgba = [25, 118, 210, 255];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Player {
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
    grounded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Coin {
    x: f32,
    y: f32,
    active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Patroller {
    x: f32,
    y: f32,
    dir: f32,
}

#[derive(Debug, Clone, PartialEq)]
struct PlatformerState {
    player: Player,
    coins: Vec<Coin>,
    patrollers: Vec<Patroller>,
    score: u32,
}

impl PlatformerState {
    fn initial() -> Self {
        Self {
            player: Player {
                x: PLAYER_START.0,
                y: PLAYER_START.1,
                dx: 0.0,
                dy: 0.0,
                grounded: false,
            },
            coins: COIN_POSITIONS
                .iter()
                .map(|&(x, y)| Coin { x, y, active: true })
                .collect(),
            patrollers: PATROLLER_STARTS
                .iter()
                .map(|&(x, y, dir)| Patroller { x, y, dir })
                .collect(),
            score: 0,
        }
    }

    fn step(&mut self, frames: f32, input: &InputSnapshot) {
        let player = &mut self.player;
        if input.is_down(LogicalButton::Right) {
            player.dx = RUN_SPEED;
        } else if input.is_down(LogicalButton::Left) {
            player.dx = -RUN_SPEED;
        } else {
            player.dx *= FRICTION.powf(frames);
        }

        if input.just_pressed(LogicalButton::B) && player.grounded {
            player.dy = -JUMP_STRENGTH;
            player.grounded = false;
        }

        player.dy += GRAVITY * frames;
        player.x += player.dx * frames;
        player.y += player.dy * frames;

        if player.y + PLAYER_SIZE > FLOOR_Y {
            player.y = FLOOR_Y - PLAYER_SIZE;
            player.dy = 0.0;
            player.grounded = true;
        }
        player.x = player.x.clamp(0.0, WORLD_WIDTH - PLAYER_SIZE);

        let player = *player;
        for coin in self.coins.iter_mut().filter(|coin| coin.active) {
            let overlaps = player.x < coin.x + COIN_SIZE
                && player.x + PLAYER_SIZE > coin.x
                && player.y < coin.y + COIN_SIZE
                && player.y + PLAYER_SIZE > coin.y;
            if overlaps {
                coin.active = false;
                self.score += COIN_VALUE;
            }
        }

        for patroller in &mut self.patrollers {
            patroller.x += patroller.dir * PATROL_SPEED * frames;
            if patroller.x < PATROL_MIN_X || patroller.x > PATROL_MAX_X {
                patroller.dir = -patroller.dir;
            }
        }
    }
}

/// Side-scrolling run-and-jump game.
#[derive(Debug, Default)]
pub(crate) struct Platformer {
    state: Option<PlatformerState>,
}

impl Platformer {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl Scene for Platformer {
    fn load(&mut self) {
        self.state = Some(PlatformerState::initial());
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        if let Some(state) = self.state.as_mut() {
            state.step(reference_frames(fixed_dt_seconds), input);
        }
    }

    fn render(&self, frame: &mut Frame<'_>) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let view = WorldView::fit(frame, WORLD_WIDTH, WORLD_HEIGHT);

        frame.clear(SKY);
        view.fill_rect(frame, 0.0, FLOOR_Y, WORLD_WIDTH, WORLD_HEIGHT - FLOOR_Y, DIRT);
        view.fill_rect(frame, 0.0, FLOOR_Y, WORLD_WIDTH, 10.0, GRASS);
        view.fill_circle(frame, 100.0, 50.0, 30.0, CLOUD);
        view.fill_circle(frame, 140.0, 60.0, 40.0, CLOUD);
        view.fill_circle(frame, 600.0, 80.0, 50.0, CLOUD);

        for coin in state.coins.iter().filter(|coin| coin.active) {
            let half = COIN_SIZE / 2.0;
            view.fill_circle(frame, coin.x + half, coin.y + half, half, COIN);
        }
        for patroller in &state.patrollers {
            view.fill_circle(frame, patroller.x + 15.0, patroller.y + 15.0, 15.0, PATROLLER);
            view.fill_rect(frame, patroller.x, patroller.y + 20.0, 10.0, 10.0, [0, 0, 0, 255]);
            view.fill_rect(frame, patroller.x + 20.0, patroller.y + 20.0, 10.0, 10.0, [0, 0, 0, 255]);
        }

        let player = state.player;
        view.fill_rect(frame, player.x, player.y, PLAYER_SIZE, PLAYER_SIZE, SHIRT);
        view.fill_rect(frame, player.x, player.y + 15.0, PLAYER_SIZE, 15.0, OVERALLS);

        draw_pips(frame, 6, 6, state.score / COIN_VALUE, COIN);
    }

    fn unload(&mut self) {
        self.state = None;
    }

    fn debug_title(&self) -> Option<String> {
        self.state
            .as_ref()
            .map(|state| format!("SCORE {:06} | WORLD 1-1", state.score))
    }
}

#[cfg(test)]
impl Platformer {
    fn state(&self) -> &PlatformerState {
        self.state.as_ref().expect("platformer should be loaded")
    }

    fn place_player(&mut self, x: f32, y: f32) {
        let state = self.state.as_mut().expect("platformer should be loaded");
        state.player.x = x;
        state.player.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn loaded() -> Platformer {
        let mut game = Platformer::new();
        game.load();
        game
    }

    fn settle(game: &mut Platformer) {
        for _ in 0..60 {
            game.update(DT, &InputSnapshot::empty());
        }
    }

    #[test]
    fn load_starts_at_initial_state() {
        let game = loaded();
        assert_eq!(game.state(), &PlatformerState::initial());
        assert_eq!(game.debug_title().as_deref(), Some("SCORE 000000 | WORLD 1-1"));
    }

    #[test]
    fn player_falls_to_floor_and_grounds() {
        let mut game = loaded();
        settle(&mut game);

        let player = game.state().player;
        assert!(player.grounded);
        assert_eq!(player.y, FLOOR_Y - PLAYER_SIZE);
        assert_eq!(player.dy, 0.0);
    }

    #[test]
    fn held_direction_sets_run_speed_then_friction_decays() {
        let mut game = loaded();
        let right = InputSnapshot::empty().with_button_down(LogicalButton::Right, true);
        game.update(DT, &right);
        assert_eq!(game.state().player.dx, RUN_SPEED);
        assert!((game.state().player.x - (PLAYER_START.0 + RUN_SPEED)).abs() < 1e-3);

        game.update(DT, &InputSnapshot::empty());
        assert!((game.state().player.dx - RUN_SPEED * FRICTION).abs() < 1e-4);
    }

    #[test]
    fn jump_needs_edge_and_ground() {
        let mut game = loaded();
        let jump = InputSnapshot::empty()
            .with_button_down(LogicalButton::B, true)
            .with_just_pressed(LogicalButton::B);

        game.update(DT, &jump);
        assert!(game.state().player.dy > 0.0, "airborne start cannot jump");

        settle(&mut game);
        game.update(DT, &jump);
        assert!(game.state().player.dy < 0.0);
        assert!(!game.state().player.grounded);

        let held = InputSnapshot::empty().with_button_down(LogicalButton::B, true);
        settle(&mut game);
        game.update(DT, &held);
        assert!(game.state().player.grounded, "holding B does not re-jump");
    }

    #[test]
    fn touching_coin_scores_once() {
        let mut game = loaded();
        game.place_player(195.0, 240.0);
        game.update(DT, &InputSnapshot::empty());
        assert_eq!(game.state().score, COIN_VALUE);
        assert!(!game.state().coins[0].active);

        game.update(DT, &InputSnapshot::empty());
        assert_eq!(game.state().score, COIN_VALUE);
    }

    #[test]
    fn player_is_clamped_to_world() {
        let mut game = loaded();
        let left = InputSnapshot::empty().with_button_down(LogicalButton::Left, true);
        for _ in 0..30 {
            game.update(DT, &left);
        }
        assert_eq!(game.state().player.x, 0.0);
    }

    #[test]
    fn patrollers_turn_at_patrol_bounds() {
        let mut game = loaded();
        for _ in 0..26 {
            game.update(DT, &InputSnapshot::empty());
        }
        let second = game.state().patrollers[1];
        assert_eq!(second.x, 752.0);
        assert_eq!(second.dir, -1.0);

        for _ in 26..51 {
            game.update(DT, &InputSnapshot::empty());
        }
        let first = game.state().patrollers[0];
        assert_eq!(first.x, 298.0);
        assert_eq!(first.dir, 1.0);
    }

    #[test]
    fn unloaded_game_ignores_updates_and_relaunch_resets() {
        let mut game = loaded();
        game.place_player(195.0, 240.0);
        game.update(DT, &InputSnapshot::empty());
        game.unload();
        game.update(DT, &InputSnapshot::empty());
        assert_eq!(game.debug_title(), None);

        game.load();
        assert_eq!(game.state(), &PlatformerState::initial());
    }
}
