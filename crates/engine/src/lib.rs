pub mod app;

pub use app::{
    run_app, AppError, ButtonStore, ControlRect, ControlSurface, Frame, InputSnapshot,
    KeyBindings, KeyState, LogicalButton, LoopConfig, LoopMetricsSnapshot, PointerTracker,
    Renderer, Rgba, Scene, SceneMachine, BUTTON_COUNT, SLOW_FRAME_ENV_VAR,
};
