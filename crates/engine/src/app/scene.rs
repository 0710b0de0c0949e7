use std::fmt::Debug;

use tracing::{info, warn};

use super::input::InputSnapshot;
use super::rendering::Frame;

pub trait Scene {
    fn load(&mut self);
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot);
    fn render(&self, frame: &mut Frame<'_>);
    fn unload(&mut self);
    fn debug_title(&self) -> Option<String> {
        None
    }
}

struct SceneRuntime<K> {
    key: K,
    scene: Box<dyn Scene>,
    is_loaded: bool,
}

impl<K> SceneRuntime<K> {
    fn load(&mut self) {
        if !self.is_loaded {
            self.scene.load();
            self.is_loaded = true;
        }
    }

    fn unload(&mut self) {
        if self.is_loaded {
            self.scene.unload();
            self.is_loaded = false;
        }
    }
}

/// Drives at most one scene at a time.
///
/// Starting a scene stops (unloads) the previously active one first, so a
/// scene that is not active never sees input or advances its simulation.
pub struct SceneMachine<K> {
    runtimes: Vec<SceneRuntime<K>>,
    active: Option<K>,
}

impl<K> Default for SceneMachine<K> {
    fn default() -> Self {
        Self {
            runtimes: Vec::new(),
            active: None,
        }
    }
}

impl<K: Copy + Eq + Debug> SceneMachine<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `scene` under `key`, returning the scene it replaces. A
    /// replaced scene is unloaded first; if it was active, the machine is left
    /// with nothing active.
    pub fn insert(&mut self, key: K, scene: Box<dyn Scene>) -> Option<Box<dyn Scene>> {
        if let Some(runtime) = self.runtimes.iter_mut().find(|runtime| runtime.key == key) {
            runtime.unload();
            if self.active == Some(key) {
                self.active = None;
            }
            return Some(std::mem::replace(&mut runtime.scene, scene));
        }
        self.runtimes.push(SceneRuntime {
            key,
            scene,
            is_loaded: false,
        });
        None
    }

    pub fn contains(&self, key: K) -> bool {
        self.runtimes.iter().any(|runtime| runtime.key == key)
    }

    pub fn active(&self) -> Option<K> {
        self.active
    }

    pub fn start(&mut self, key: K) -> bool {
        if self.active == Some(key) {
            return false;
        }
        if !self.contains(key) {
            warn!(scene = ?key, "scene_start_unknown");
            return false;
        }

        self.stop();
        if let Some(runtime) = self.runtime_mut(key) {
            runtime.load();
        }
        self.active = Some(key);
        info!(scene = ?key, "scene_started");
        true
    }

    pub fn stop(&mut self) -> Option<K> {
        let key = self.active.take()?;
        if let Some(runtime) = self.runtime_mut(key) {
            runtime.unload();
        }
        info!(scene = ?key, "scene_stopped");
        Some(key)
    }

    pub fn update_active(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> bool {
        let Some(runtime) = self.active_runtime_mut() else {
            return false;
        };
        runtime.scene.update(fixed_dt_seconds, input);
        true
    }

    pub fn render_active(&self, frame: &mut Frame<'_>) -> bool {
        let Some(runtime) = self.active_runtime_ref() else {
            return false;
        };
        runtime.scene.render(frame);
        true
    }

    pub fn debug_title_active(&self) -> Option<String> {
        self.active_runtime_ref()
            .and_then(|runtime| runtime.scene.debug_title())
    }

    pub fn shutdown_all(&mut self) {
        self.active = None;
        for runtime in &mut self.runtimes {
            runtime.unload();
        }
    }

    fn active_runtime_mut(&mut self) -> Option<&mut SceneRuntime<K>> {
        let key = self.active?;
        self.runtime_mut(key)
    }

    fn active_runtime_ref(&self) -> Option<&SceneRuntime<K>> {
        let key = self.active?;
        self.runtimes.iter().find(|runtime| runtime.key == key)
    }

    fn runtime_mut(&mut self, key: K) -> Option<&mut SceneRuntime<K>> {
        self.runtimes.iter_mut().find(|runtime| runtime.key == key)
    }
}
