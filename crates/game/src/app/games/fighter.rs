use handheld_engine::{Frame, InputSnapshot, LogicalButton, Rgba, Scene};
use rand::Rng;
use tracing::debug;

use super::timers::{Countdown, IntervalTimer};
use super::view::draw_meter;

const MAX_HEALTH: u32 = 100;
const PLAYER_DAMAGE: u32 = 10;
const CPU_DAMAGE: u32 = 8;
const PLAYER_HIT_THRESHOLD: f64 = 0.3;
const ATTACK_COOLDOWN_SECONDS: f32 = 0.4;
const HIT_FLASH_SECONDS: f32 = 0.3;
const CPU_THINK_SECONDS: f32 = 0.1;
const CPU_ATTACK_CHANCE: f64 = 0.05;
const CPU_WINDUP_SECONDS: f32 = 0.4;

const BACKDROP_TOP: Rgba = [124, 45, 18, 255];
const BACKDROP_BOTTOM: Rgba = [88, 28, 135, 255];
const FLOOR: Rgba = [55, 65, 81, 255];
const HEALTH: Rgba = [234, 179, 8, 255];
const HEALTH_BACK: Rgba = [31, 41, 55, 255];
const GI: Rgba = [255, 255, 255, 255];
const HEADBAND: Rgba = [220, 38, 38, 255];
const FIST: Rgba = [113, 63, 18, 255];
const CPU_GI: Rgba = [220, 38, 38, 255];
const CPU_HAIR: Rgba = [250, 204, 21, 255];
const HIT_FLASH: Rgba = [156, 163, 175, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerAction {
    Idle,
    Attack,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CpuAction {
    Idle,
    Attack,
    Hit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundResult {
    Fighting,
    PlayerWins,
    CpuWins,
}

impl RoundResult {
    fn banner(self) -> &'static str {
        match self {
            RoundResult::Fighting => "FIGHT!",
            RoundResult::PlayerWins => "YOU WIN!",
            RoundResult::CpuWins => "CPU WINS!",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct FighterState {
    player_health: u32,
    cpu_health: u32,
    blocking: bool,
    attack_cooldown: Countdown,
    cpu_hit: Countdown,
    cpu_windup: Countdown,
    cpu_think: IntervalTimer,
}

impl FighterState {
    fn initial() -> Self {
        Self {
            player_health: MAX_HEALTH,
            cpu_health: MAX_HEALTH,
            blocking: false,
            attack_cooldown: Countdown::default(),
            cpu_hit: Countdown::default(),
            cpu_windup: Countdown::default(),
            cpu_think: IntervalTimer::new(CPU_THINK_SECONDS),
        }
    }

    fn result(&self) -> RoundResult {
        if self.cpu_health == 0 {
            RoundResult::PlayerWins
        } else if self.player_health == 0 {
            RoundResult::CpuWins
        } else {
            RoundResult::Fighting
        }
    }

    fn player_action(&self) -> PlayerAction {
        if self.attack_cooldown.is_running() {
            PlayerAction::Attack
        } else if self.blocking {
            PlayerAction::Block
        } else {
            PlayerAction::Idle
        }
    }

    fn cpu_action(&self) -> CpuAction {
        if self.cpu_hit.is_running() {
            CpuAction::Hit
        } else if self.cpu_windup.is_running() {
            CpuAction::Attack
        } else {
            CpuAction::Idle
        }
    }
}

/// One-round brawler against a randomly attacking CPU.
pub(crate) struct Fighter<R> {
    rng: R,
    state: Option<FighterState>,
}

impl<R: Rng> Fighter<R> {
    pub(crate) fn new(rng: R) -> Self {
        Self { rng, state: None }
    }
}

impl<R: Rng> Scene for Fighter<R> {
    fn load(&mut self) {
        self.state = Some(FighterState::initial());
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.result() != RoundResult::Fighting {
            return;
        }

        state.attack_cooldown.tick(fixed_dt_seconds);
        state.cpu_hit.tick(fixed_dt_seconds);

        if input.just_pressed(LogicalButton::Y) && !state.attack_cooldown.is_running() {
            state.attack_cooldown.start(ATTACK_COOLDOWN_SECONDS);
            state.blocking = false;
            if self.rng.gen::<f64>() > PLAYER_HIT_THRESHOLD {
                state.cpu_health = state.cpu_health.saturating_sub(PLAYER_DAMAGE);
                state.cpu_hit.start(HIT_FLASH_SECONDS);
                debug!(cpu_health = state.cpu_health, "fighter_player_hit");
            }
        } else {
            state.blocking =
                input.is_down(LogicalButton::Down) && !state.attack_cooldown.is_running();
        }
        if state.result() != RoundResult::Fighting {
            return;
        }

        if state.cpu_windup.tick(fixed_dt_seconds) && !state.blocking {
            state.player_health = state.player_health.saturating_sub(CPU_DAMAGE);
            debug!(player_health = state.player_health, "fighter_cpu_hit");
        }
        for _ in 0..state.cpu_think.tick(fixed_dt_seconds) {
            if !state.cpu_windup.is_running() && self.rng.gen::<f64>() < CPU_ATTACK_CHANCE {
                state.cpu_windup.start(CPU_WINDUP_SECONDS);
            }
        }
    }

    fn render(&self, frame: &mut Frame<'_>) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let width = frame.width() as i32;
        let height = frame.height() as i32;
        frame.fill_rect(0, 0, width, height / 2, BACKDROP_TOP);
        frame.fill_rect(0, height / 2, width, height - height / 2, BACKDROP_BOTTOM);
        let floor_y = height - 24;
        frame.fill_rect(0, floor_y, width, 24, FLOOR);

        let bar_width = width / 3;
        draw_meter(
            frame,
            8,
            8,
            bar_width,
            state.player_health as f32 / MAX_HEALTH as f32,
            HEALTH,
            HEALTH_BACK,
        );
        let cpu_fraction = state.cpu_health as f32 / MAX_HEALTH as f32;
        let cpu_bar_x = width - 8 - bar_width;
        frame.fill_rect(cpu_bar_x, 8, bar_width, 6, HEALTH_BACK);
        let cpu_fill = (bar_width as f32 * cpu_fraction).round() as i32;
        frame.fill_rect(cpu_bar_x + bar_width - cpu_fill, 8, cpu_fill, 6, HEALTH);

        let fighter_height = 64;
        let fighter_width = 48;
        let top = floor_y - fighter_height;

        let (player_x, player_height) = match state.player_action() {
            PlayerAction::Idle => (40, fighter_height),
            PlayerAction::Attack => (64, fighter_height),
            PlayerAction::Block => (40, fighter_height - 8),
        };
        let player_top = floor_y - player_height;
        frame.fill_rect(player_x, player_top, fighter_width, player_height, GI);
        frame.fill_rect(player_x, player_top, fighter_width, player_height / 3, HEADBAND);
        if state.player_action() == PlayerAction::Attack {
            frame.fill_rect(player_x + fighter_width, player_top + 16, 20, 12, FIST);
        }

        let cpu_x = match state.cpu_action() {
            CpuAction::Idle => width - 40 - fighter_width,
            CpuAction::Attack => width - 64 - fighter_width,
            CpuAction::Hit => width - 30 - fighter_width,
        };
        let cpu_body = if state.cpu_action() == CpuAction::Hit {
            HIT_FLASH
        } else {
            CPU_GI
        };
        frame.fill_rect(cpu_x, top, fighter_width, fighter_height, cpu_body);
        frame.fill_rect(cpu_x, top, fighter_width, fighter_height / 3, CPU_HAIR);
    }

    fn unload(&mut self) {
        self.state = None;
    }

    fn debug_title(&self) -> Option<String> {
        self.state.as_ref().map(|state| {
            format!(
                "{} {} - {}",
                state.result().banner(),
                state.player_health,
                state.cpu_health
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;

    const DT: f32 = 1.0 / 60.0;

    /// Every roll is 0.0: player attacks miss and the CPU always attacks.
    fn aggressive_cpu() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Every roll is just under 1.0: player attacks hit and the CPU never attacks.
    fn passive_cpu() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn loaded(rng: StepRng) -> Fighter<StepRng> {
        let mut fighter = Fighter::new(rng);
        fighter.load();
        fighter
    }

    fn state(fighter: &Fighter<StepRng>) -> &FighterState {
        fighter.state.as_ref().expect("fighter should be loaded")
    }

    fn punch() -> InputSnapshot {
        InputSnapshot::empty()
            .with_button_down(LogicalButton::Y, true)
            .with_just_pressed(LogicalButton::Y)
    }

    fn run(fighter: &mut Fighter<StepRng>, input: &InputSnapshot, ticks: u32) {
        for _ in 0..ticks {
            fighter.update(DT, input);
        }
    }

    #[test]
    fn round_opens_at_full_health() {
        let fighter = loaded(passive_cpu());
        assert_eq!(state(&fighter).result(), RoundResult::Fighting);
        assert_eq!(fighter.debug_title().as_deref(), Some("FIGHT! 100 - 100"));
    }

    #[test]
    fn landed_punch_damages_and_flashes_cpu() {
        let mut fighter = loaded(passive_cpu());
        fighter.update(DT, &punch());

        assert_eq!(state(&fighter).cpu_health, 90);
        assert_eq!(state(&fighter).player_action(), PlayerAction::Attack);
        assert_eq!(state(&fighter).cpu_action(), CpuAction::Hit);

        run(&mut fighter, &InputSnapshot::empty(), 20);
        assert_eq!(state(&fighter).cpu_action(), CpuAction::Idle);
    }

    #[test]
    fn punches_respect_cooldown() {
        let mut fighter = loaded(passive_cpu());
        fighter.update(DT, &punch());
        fighter.update(DT, &punch());
        assert_eq!(state(&fighter).cpu_health, 90);

        run(&mut fighter, &InputSnapshot::empty(), 25);
        assert_eq!(state(&fighter).player_action(), PlayerAction::Idle);
        fighter.update(DT, &punch());
        assert_eq!(state(&fighter).cpu_health, 80);
    }

    #[test]
    fn holding_punch_does_not_repeat() {
        let mut fighter = loaded(passive_cpu());
        fighter.update(DT, &punch());
        let held = InputSnapshot::empty().with_button_down(LogicalButton::Y, true);
        run(&mut fighter, &held, 60);
        assert_eq!(state(&fighter).cpu_health, 90);
    }

    #[test]
    fn missed_punch_still_costs_cooldown() {
        let mut fighter = loaded(aggressive_cpu());
        fighter.update(DT, &punch());
        assert_eq!(state(&fighter).cpu_health, 100);
        assert_eq!(state(&fighter).player_action(), PlayerAction::Attack);
    }

    #[test]
    fn cpu_attack_lands_after_windup() {
        let mut fighter = loaded(aggressive_cpu());
        run(&mut fighter, &InputSnapshot::empty(), 10);
        assert_eq!(state(&fighter).cpu_action(), CpuAction::Attack);
        assert_eq!(state(&fighter).player_health, 100);

        run(&mut fighter, &InputSnapshot::empty(), 30);
        assert_eq!(state(&fighter).player_health, 92);
    }

    #[test]
    fn blocking_when_attack_lands_prevents_damage() {
        let mut fighter = loaded(aggressive_cpu());
        let block = InputSnapshot::empty().with_button_down(LogicalButton::Down, true);
        run(&mut fighter, &block, 40);

        assert_eq!(state(&fighter).player_action(), PlayerAction::Block);
        assert_eq!(state(&fighter).player_health, 100);

        run(&mut fighter, &InputSnapshot::empty(), 1);
        assert_eq!(state(&fighter).player_action(), PlayerAction::Idle);
    }

    #[test]
    fn knockout_ends_round_and_freezes_play() {
        let mut fighter = loaded(passive_cpu());
        if let Some(state) = fighter.state.as_mut() {
            state.cpu_health = PLAYER_DAMAGE;
        }
        fighter.update(DT, &punch());
        assert_eq!(state(&fighter).result(), RoundResult::PlayerWins);
        assert_eq!(fighter.debug_title().as_deref(), Some("YOU WIN! 100 - 0"));

        let before = state(&fighter).clone();
        run(&mut fighter, &punch(), 60);
        assert_eq!(state(&fighter), &before);
    }

    #[test]
    fn cpu_knockout_reports_cpu_win() {
        let mut fighter = loaded(aggressive_cpu());
        if let Some(state) = fighter.state.as_mut() {
            state.player_health = CPU_DAMAGE;
        }
        run(&mut fighter, &InputSnapshot::empty(), 40);
        assert_eq!(state(&fighter).result(), RoundResult::CpuWins);
        assert_eq!(fighter.debug_title().as_deref(), Some("CPU WINS! 0 - 100"));
    }

    #[test]
    fn relaunch_starts_a_fresh_round() {
        let mut fighter = loaded(passive_cpu());
        fighter.update(DT, &punch());
        fighter.unload();
        assert_eq!(fighter.debug_title(), None);

        fighter.load();
        assert_eq!(state(&fighter), &FighterState::initial());
    }
}
