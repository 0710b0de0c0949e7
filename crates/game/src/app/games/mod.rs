mod fighter;
mod platformer;
mod racer;
mod timers;
mod view;
mod walker;

use handheld_engine::SceneMachine;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::shell::GameId;

use fighter::Fighter;
use platformer::Platformer;
use racer::Racer;
use walker::Walker;

/// Every cartridge the launcher knows about, each with its own RNG stream.
pub(crate) fn build_library(seed: u64) -> SceneMachine<GameId> {
    let mut library = SceneMachine::new();
    for game in GameId::ALL {
        let rng = StdRng::seed_from_u64(seed ^ game.seed_salt());
        match game {
            GameId::Platformer => library.insert(game, Box::new(Platformer::new())),
            GameId::Walker => library.insert(game, Box::new(Walker::new(rng))),
            GameId::Racer => library.insert(game, Box::new(Racer::new(rng))),
            GameId::Fighter => library.insert(game, Box::new(Fighter::new(rng))),
        };
    }
    library
}
