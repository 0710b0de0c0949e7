use handheld_engine::{Frame, InputSnapshot, LogicalButton, Rgba, Scene};
use rand::Rng;

use super::timers::reference_frames;

const MAX_SPEED: f32 = 1.5;
const ACCELERATION: f32 = 0.02;
const COAST_DECAY: f32 = 0.01;
const STEER_RATE: f32 = 0.05;
const SPAWN_CHANCE_PER_SPEED: f64 = 0.01;
const SPAWN_LANE_SPREAD: f32 = 0.8;
const SPAWN_DEPTH: f32 = 100.0;
const SPEEDOMETER_SCALE: f32 = 200.0;

const SKY: Rgba = [135, 206, 235, 255];
const GRASS: Rgba = [46, 125, 50, 255];
const ROAD_DARK: Rgba = [97, 97, 97, 255];
const ROAD_LIGHT: Rgba = [117, 117, 117, 255];
const LANE_MARK: Rgba = [255, 255, 255, 255];
const RIVAL: Rgba = [30, 64, 220, 255];
const CAR_BODY: Rgba = [220, 20, 20, 255];
const WHEEL: Rgba = [0, 0, 0, 255];
const WINDSHIELD: Rgba = [173, 216, 230, 255];
const GAUGE: Rgba = [250, 204, 21, 255];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Rival {
    x: f32,
    z: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct RacerState {
    player_x: f32,
    speed: f32,
    road_offset: f32,
    rivals: Vec<Rival>,
}

impl RacerState {
    fn speedometer(&self) -> u32 {
        (self.speed * SPEEDOMETER_SCALE).floor() as u32
    }
}

/// Pseudo-3D road racer.
pub(crate) struct Racer<R> {
    rng: R,
    state: Option<RacerState>,
}

impl<R: Rng> Racer<R> {
    pub(crate) fn new(rng: R) -> Self {
        Self { rng, state: None }
    }
}

impl<R: Rng> Scene for Racer<R> {
    fn load(&mut self) {
        self.state = Some(RacerState::default());
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let frames = reference_frames(fixed_dt_seconds);

        state.speed = if input.is_down(LogicalButton::A) {
            (state.speed + ACCELERATION * frames).min(MAX_SPEED)
        } else {
            (state.speed - COAST_DECAY * frames).max(0.0)
        };

        if state.speed > 0.0 {
            if input.is_down(LogicalButton::Left) {
                state.player_x = (state.player_x - STEER_RATE * frames).max(-1.0);
            }
            if input.is_down(LogicalButton::Right) {
                state.player_x = (state.player_x + STEER_RATE * frames).min(1.0);
            }
        }

        let travel = state.speed * frames;
        state.road_offset += travel;

        let spawn_chance = SPAWN_CHANCE_PER_SPEED * f64::from(travel);
        if self.rng.gen::<f64>() < spawn_chance {
            let lane = self.rng.gen::<f32>() * 2.0 - 1.0;
            state.rivals.push(Rival {
                x: lane * SPAWN_LANE_SPREAD,
                z: SPAWN_DEPTH,
            });
        }

        for rival in &mut state.rivals {
            rival.z -= travel;
        }
        state.rivals.retain(|rival| rival.z > 0.0);
    }

    fn render(&self, frame: &mut Frame<'_>) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let width = frame.width() as i32;
        let height = frame.height() as i32;
        let horizon = height / 2;
        let center = width / 2;

        frame.fill_rect(0, 0, width, horizon, SKY);
        frame.fill_rect(0, horizon, width, height - horizon, GRASS);

        for y in horizon..height {
            let depth = (y - horizon + 1) as f32 / (height - horizon).max(1) as f32;
            let road_width = (width as f32 * (0.1 + 0.9 * depth)) as i32;
            let stripe = ((1.0 / depth) * 4.0 + state.road_offset).floor() as i64;
            let color = if stripe.rem_euclid(2) == 0 {
                ROAD_DARK
            } else {
                ROAD_LIGHT
            };
            frame.fill_rect(center - road_width / 2, y, road_width, 1, color);
            if stripe.rem_euclid(4) < 2 {
                let mark = (road_width / 50).max(1);
                frame.fill_rect(center - mark / 2, y, mark, 1, LANE_MARK);
            }
        }

        for rival in &state.rivals {
            let scale = (1.0 - rival.z / SPAWN_DEPTH).clamp(0.0, 1.0);
            let y = horizon + (scale * (height - horizon) as f32) as i32;
            let x = center + (rival.x * width as f32 * 0.5 * scale) as i32;
            let size = 4 + (28.0 * scale) as i32;
            frame.fill_rect(x - size / 2, y - size, size, size, RIVAL);
        }

        let car_x = center + (state.player_x * width as f32 * 0.5) as i32;
        let car_y = height - 40;
        frame.fill_rect(car_x - 20, car_y + 8, 40, 24, CAR_BODY);
        frame.fill_rect(car_x - 16, car_y, 32, 8, WINDSHIELD);
        frame.fill_rect(car_x - 22, car_y + 20, 6, 14, WHEEL);
        frame.fill_rect(car_x + 16, car_y + 20, 6, 14, WHEEL);

        let gauge = (state.speed / MAX_SPEED * 80.0) as i32;
        frame.fill_rect(width - 92, 8, gauge, 6, GAUGE);
    }

    fn unload(&mut self) {
        self.state = None;
    }

    fn debug_title(&self) -> Option<String> {
        self.state
            .as_ref()
            .map(|state| format!("{} km/h", state.speedometer()))
    }
}
