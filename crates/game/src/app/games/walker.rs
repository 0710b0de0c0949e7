use handheld_engine::{Frame, InputSnapshot, LogicalButton, Rgba, Scene};
use rand::Rng;
use tracing::debug;

use super::timers::Countdown;

const MAP_WIDTH: usize = 15;
const MAP_HEIGHT: usize = 8;

// 0 grass, 1 path, 2 tree, 3 water
const MAP: [[u8; MAP_WIDTH]; MAP_HEIGHT] = [
    [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
    [2, 0, 0, 0, 2, 0, 0, 1, 1, 1, 0, 0, 0, 0, 2],
    [2, 0, 3, 3, 2, 0, 0, 1, 0, 1, 0, 2, 2, 0, 2],
    [2, 0, 3, 3, 2, 0, 0, 1, 0, 1, 0, 2, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 2, 0, 0, 2],
    [2, 0, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 0, 0, 0, 2, 2, 2, 0, 0, 0, 0, 0, 0, 2],
    [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
];

const TILE_GRASS: u8 = 0;
const FIRST_BLOCKING_TILE: u8 = 2;
const START: (i32, i32) = (7, 4);
const STEP_COOLDOWN_SECONDS: f32 = 0.15;
const ENCOUNTER_CHANCE: f64 = 0.1;
const ENCOUNTER_MESSAGE_SECONDS: f32 = 2.0;
const TOWN_TEXT: &str = "PALLET TOWN";
const ENCOUNTER_TEXT: &str = "A wild PIDGEY appeared!";

const TILE_PX: i32 = 16;
const TILE_COLORS: [Rgba; 4] = [
    [74, 222, 128, 255],
    [254, 240, 138, 255],
    [22, 101, 52, 255],
    [96, 165, 250, 255],
];
const PLAYER_COLOR: Rgba = [239, 68, 68, 255];
const TEXT_BOX: Rgba = [245, 245, 245, 255];
const ENCOUNTER_ICON: Rgba = [161, 98, 7, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Highest-priority held direction.
    fn from_input(input: &InputSnapshot) -> Option<Self> {
        [
            (LogicalButton::Up, Facing::Up),
            (LogicalButton::Down, Facing::Down),
            (LogicalButton::Left, Facing::Left),
            (LogicalButton::Right, Facing::Right),
        ]
        .into_iter()
        .find(|(button, _)| input.is_down(*button))
        .map(|(_, facing)| facing)
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Facing::Up => (0, -1),
            Facing::Down => (0, 1),
            Facing::Left => (-1, 0),
            Facing::Right => (1, 0),
        }
    }
}

fn tile_at(x: i32, y: i32) -> Option<u8> {
    let row = MAP.get(usize::try_from(y).ok()?)?;
    row.get(usize::try_from(x).ok()?).copied()
}

fn is_walkable(x: i32, y: i32) -> bool {
    tile_at(x, y).is_some_and(|tile| tile < FIRST_BLOCKING_TILE)
}

#[derive(Debug, Clone, PartialEq)]
struct WalkerState {
    position: (i32, i32),
    facing: Facing,
    step_cooldown: Countdown,
    encounter: Countdown,
}

impl WalkerState {
    fn initial() -> Self {
        Self {
            position: START,
            facing: Facing::Down,
            step_cooldown: Countdown::default(),
            encounter: Countdown::default(),
        }
    }

    fn text(&self) -> &'static str {
        if self.encounter.is_running() {
            ENCOUNTER_TEXT
        } else {
            TOWN_TEXT
        }
    }
}

/// Tile-map overworld with random grass encounters.
pub(crate) struct Walker<R> {
    rng: R,
    state: Option<WalkerState>,
}

impl<R: Rng> Walker<R> {
    pub(crate) fn new(rng: R) -> Self {
        Self { rng, state: None }
    }
}

impl<R: Rng> Scene for Walker<R> {
    fn load(&mut self) {
        self.state = Some(WalkerState::initial());
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.encounter.tick(fixed_dt_seconds);
        state.step_cooldown.tick(fixed_dt_seconds);
        if state.step_cooldown.is_running() {
            return;
        }

        let Some(facing) = Facing::from_input(input) else {
            return;
        };
        state.facing = facing;
        let (dx, dy) = facing.delta();
        let target = (state.position.0 + dx, state.position.1 + dy);
        if !is_walkable(target.0, target.1) {
            return;
        }

        state.position = target;
        state.step_cooldown.start(STEP_COOLDOWN_SECONDS);
        if tile_at(target.0, target.1) == Some(TILE_GRASS)
            && self.rng.gen::<f64>() < ENCOUNTER_CHANCE
        {
            debug!(x = target.0, y = target.1, "walker_encounter");
            state.encounter.start(ENCOUNTER_MESSAGE_SECONDS);
        }
    }

    fn render(&self, frame: &mut Frame<'_>) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        frame.clear([0, 0, 0, 255]);

        let box_height = 28;
        frame.fill_rect(16, 6, frame.width() as i32 - 32, box_height, TEXT_BOX);
        if state.encounter.is_running() {
            frame.fill_circle(frame.width() as i32 / 2, 6 + box_height / 2, 9, ENCOUNTER_ICON);
        }

        let view_top = box_height + 12;
        let view_height = frame.height() as i32 - view_top;
        let mut view = frame.region(0, view_top, frame.width(), view_height.max(0) as u32);
        let center_x = view.width() as i32 / 2;
        let center_y = view.height() as i32 / 2;
        let offset_x = center_x - state.position.0 * TILE_PX - TILE_PX / 2;
        let offset_y = center_y - state.position.1 * TILE_PX - TILE_PX / 2;

        for (y, row) in MAP.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let color = TILE_COLORS[usize::from(*tile).min(TILE_COLORS.len() - 1)];
                view.fill_rect(
                    offset_x + x as i32 * TILE_PX,
                    offset_y + y as i32 * TILE_PX,
                    TILE_PX,
                    TILE_PX,
                    color,
                );
            }
        }

        let player_x = center_x - TILE_PX / 2;
        let player_y = center_y - TILE_PX / 2;
        view.fill_rect(player_x, player_y, TILE_PX, TILE_PX, PLAYER_COLOR);
        let (eye_x, eye_y) = match state.facing {
            Facing::Up => (5, 2),
            Facing::Down => (5, 11),
            Facing::Left => (2, 6),
            Facing::Right => (11, 6),
        };
        view.fill_rect(player_x + eye_x, player_y + eye_y, 4, 3, [0, 0, 0, 255]);
    }

    fn unload(&mut self) {
        self.state = None;
    }

    fn debug_title(&self) -> Option<String> {
        self.state.as_ref().map(|state| state.text().to_string())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn always_encounter() -> StepRng {
        StepRng::new(0, 0)
    }

    fn never_encounter() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn loaded(rng: StepRng) -> Walker<StepRng> {
        let mut walker = Walker::new(rng);
        walker.load();
        walker
    }

    fn state(walker: &Walker<StepRng>) -> &WalkerState {
        walker.state.as_ref().expect("walker should be loaded")
    }

    fn held(button: LogicalButton) -> InputSnapshot {
        InputSnapshot::empty().with_button_down(button, true)
    }

    fn idle(walker: &mut Walker<StepRng>, ticks: u32) {
        for _ in 0..ticks {
            walker.update(DT, &InputSnapshot::empty());
        }
    }

    #[test]
    fn starts_in_town_facing_down() {
        let walker = loaded(never_encounter());
        assert_eq!(state(&walker).position, (7, 4));
        assert_eq!(state(&walker).facing, Facing::Down);
        assert_eq!(walker.debug_title().as_deref(), Some("PALLET TOWN"));
    }

    #[test]
    fn held_direction_steps_once_per_cooldown() {
        let mut walker = loaded(never_encounter());
        walker.update(DT, &held(LogicalButton::Up));
        assert_eq!(state(&walker).position, (7, 3));

        for _ in 0..7 {
            walker.update(DT, &held(LogicalButton::Up));
        }
        assert_eq!(state(&walker).position, (7, 3), "cooldown blocks repeat");

        for _ in 0..4 {
            walker.update(DT, &held(LogicalButton::Up));
        }
        assert_eq!(state(&walker).position, (7, 2), "held key repeats");
    }

    #[test]
    fn vertical_direction_wins_priority() {
        let mut walker = loaded(never_encounter());
        let input = held(LogicalButton::Right)
            .with_button_down(LogicalButton::Left, true)
            .with_button_down(LogicalButton::Down, true);
        walker.update(DT, &input);

        assert_eq!(state(&walker).position, (7, 5));
        assert_eq!(state(&walker).facing, Facing::Down);
    }

    #[test]
    fn blocked_step_still_turns_player() {
        let mut walker = loaded(never_encounter());
        for _ in 0..3 {
            walker.update(DT, &held(LogicalButton::Up));
            idle(&mut walker, 12);
        }
        assert_eq!(state(&walker).position, (7, 1));

        walker.update(DT, &held(LogicalButton::Left));
        idle(&mut walker, 12);
        walker.update(DT, &held(LogicalButton::Up));
        assert_eq!(state(&walker).position, (6, 1));
        assert_eq!(state(&walker).facing, Facing::Up, "tree ahead");
        assert!(!state(&walker).step_cooldown.is_running());
    }

    #[test]
    fn map_edges_are_not_walkable() {
        assert_eq!(tile_at(-1, 0), None);
        assert_eq!(tile_at(0, MAP_HEIGHT as i32), None);
        assert!(!is_walkable(15, 4));
        assert!(!is_walkable(2, 2), "water");
        assert!(is_walkable(7, 4));
    }

    #[test]
    fn grass_step_can_trigger_timed_encounter() {
        let mut walker = loaded(always_encounter());
        walker.update(DT, &held(LogicalButton::Down));
        assert_eq!(walker.debug_title().as_deref(), Some(ENCOUNTER_TEXT));

        idle(&mut walker, 110);
        assert_eq!(walker.debug_title().as_deref(), Some(ENCOUNTER_TEXT));
        idle(&mut walker, 20);
        assert_eq!(walker.debug_title().as_deref(), Some(TOWN_TEXT));
    }

    #[test]
    fn path_step_never_rolls_encounter() {
        let mut walker = loaded(always_encounter());
        walker.update(DT, &held(LogicalButton::Up));
        assert_eq!(state(&walker).position, (7, 3));
        assert_eq!(walker.debug_title().as_deref(), Some(TOWN_TEXT));
    }

    #[test]
    fn failed_roll_keeps_town_text() {
        let mut walker = loaded(never_encounter());
        walker.update(DT, &held(LogicalButton::Down));
        assert_eq!(state(&walker).position, (7, 5));
        assert_eq!(walker.debug_title().as_deref(), Some(TOWN_TEXT));
    }

    #[test]
    fn unload_drops_state_and_reload_resets() {
        let mut walker = loaded(never_encounter());
        walker.update(DT, &held(LogicalButton::Down));
        walker.unload();
        walker.update(DT, &held(LogicalButton::Down));
        assert!(walker.state.is_none());

        walker.load();
        assert_eq!(state(&walker), &WalkerState::initial());
    }
}
