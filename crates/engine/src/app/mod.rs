mod bindings;
mod input;
mod loop_runner;
mod metrics;
mod pointer;
mod rendering;
mod scene;

pub use bindings::{KeyBindings, KeyState};
pub use input::{ButtonStore, InputSnapshot, LogicalButton, BUTTON_COUNT};
pub use loop_runner::{run_app, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::LoopMetricsSnapshot;
pub use pointer::{ControlRect, ControlSurface, PointerTracker};
pub use rendering::{Frame, Renderer, Rgba};
pub use scene::{Scene, SceneMachine};
