use handheld_engine::{InputSnapshot, LogicalButton};

/// Cartridges in carousel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum GameId {
    Platformer,
    Walker,
    Racer,
    Fighter,
}

impl GameId {
    pub(crate) const ALL: [GameId; 4] = [
        GameId::Platformer,
        GameId::Walker,
        GameId::Racer,
        GameId::Fighter,
    ];

    pub(crate) const fn title(self) -> &'static str {
        match self {
            GameId::Platformer => "Super Plumber Odyssey",
            GameId::Walker => "Pocket Monsters: Red",
            GameId::Racer => "Kart Legends 8",
            GameId::Fighter => "Street Brawler II",
        }
    }

    pub(crate) const fn seed_salt(self) -> u64 {
        match self {
            GameId::Platformer => 0x9e37_79b9_7f4a_7c15,
            GameId::Walker => 0xbf58_476d_1ce4_e5b9,
            GameId::Racer => 0x94d0_49bb_1331_11eb,
            GameId::Fighter => 0xd6e8_feb8_6659_fd93,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppScreen {
    Home,
    Game(GameId),
}

/// What a navigation step changed, for the shell to act on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct NavOutcome {
    pub(crate) launched: Option<GameId>,
    pub(crate) returned_home: bool,
    pub(crate) sleep_toggled: bool,
    pub(crate) selection_moved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NavigationState {
    pub(crate) current: AppScreen,
    pub(crate) selected_index: usize,
    pub(crate) sleeping: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current: AppScreen::Home,
            selected_index: 0,
            sleeping: false,
        }
    }
}

impl NavigationState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn selected_game(&self, catalog: &[GameId]) -> Option<GameId> {
        catalog.get(self.selected_index).copied()
    }

    /// Applies one tick of shell input. Launcher input is only honoured if
    /// the shell was on Home and awake when the tick began.
    pub(crate) fn step(&mut self, input: &InputSnapshot, catalog: &[GameId]) -> NavOutcome {
        let mut outcome = NavOutcome::default();
        let was_home = self.current == AppScreen::Home;

        if input.just_pressed(LogicalButton::Home) && !was_home {
            self.current = AppScreen::Home;
            outcome.returned_home = true;
        }

        if input.just_pressed(LogicalButton::Plus) {
            self.sleeping = !self.sleeping;
            outcome.sleep_toggled = true;
        }

        if !was_home || self.sleeping || catalog.is_empty() {
            return outcome;
        }

        let count = catalog.len();
        self.selected_index %= count;
        if input.just_pressed(LogicalButton::Right) {
            self.selected_index = (self.selected_index + 1) % count;
            outcome.selection_moved = true;
        }
        if input.just_pressed(LogicalButton::Left) {
            self.selected_index = (self.selected_index + count - 1) % count;
            outcome.selection_moved = true;
        }
        if input.just_pressed(LogicalButton::A) {
            let game = catalog[self.selected_index];
            self.current = AppScreen::Game(game);
            outcome.launched = Some(game);
        }

        outcome
    }
}
