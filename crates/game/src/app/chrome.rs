use handheld_engine::{ControlRect, ControlSurface, Frame, InputSnapshot, LogicalButton, Rgba};

pub(crate) const BUFFER_WIDTH: u32 = 640;
pub(crate) const BUFFER_HEIGHT: u32 = 320;

const LEFT_CONTROLLER: ControlRect = ControlRect::new(8, 24, 96, 288);
const RIGHT_CONTROLLER: ControlRect = ControlRect::new(536, 24, 96, 288);
const BEZEL: ControlRect = ControlRect::new(112, 24, 416, 288);
pub(crate) const SCREEN_RECT: ControlRect = ControlRect::new(124, 44, 392, 248);

const BUTTON_LAYOUT: [(LogicalButton, ControlRect); 18] = [
    (LogicalButton::Zl, ControlRect::new(16, 2, 80, 10)),
    (LogicalButton::L, ControlRect::new(16, 14, 80, 10)),
    (LogicalButton::Minus, ControlRect::new(80, 32, 16, 10)),
    (LogicalButton::L3, ControlRect::new(36, 48, 36, 36)),
    (LogicalButton::Up, ControlRect::new(44, 120, 20, 20)),
    (LogicalButton::Down, ControlRect::new(44, 164, 20, 20)),
    (LogicalButton::Left, ControlRect::new(22, 142, 20, 20)),
    (LogicalButton::Right, ControlRect::new(66, 142, 20, 20)),
    (LogicalButton::Capture, ControlRect::new(60, 220, 16, 16)),
    (LogicalButton::Zr, ControlRect::new(544, 2, 80, 10)),
    (LogicalButton::R, ControlRect::new(544, 14, 80, 10)),
    (LogicalButton::Plus, ControlRect::new(544, 32, 16, 10)),
    (LogicalButton::X, ControlRect::new(574, 52, 20, 20)),
    (LogicalButton::Y, ControlRect::new(552, 74, 20, 20)),
    (LogicalButton::A, ControlRect::new(596, 74, 20, 20)),
    (LogicalButton::B, ControlRect::new(574, 96, 20, 20)),
    (LogicalButton::R3, ControlRect::new(568, 140, 36, 36)),
    (LogicalButton::Home, ControlRect::new(576, 220, 16, 16)),
];

const BACKGROUND: Rgba = [24, 24, 27, 255];
const LEFT_SHELL: Rgba = [0, 174, 219, 255];
const RIGHT_SHELL: Rgba = [255, 76, 60, 255];
const BEZEL_COLOR: Rgba = [38, 38, 38, 255];
const BUTTON_IDLE: Rgba = [51, 51, 51, 255];
const BUTTON_HELD: Rgba = [229, 229, 229, 255];
const BUTTON_EDGE: Rgba = [15, 15, 15, 255];

/// On-screen controls for every logical button.
pub(crate) fn build_control_surface() -> ControlSurface {
    BUTTON_LAYOUT
        .iter()
        .fold(ControlSurface::new(), |surface, (button, rect)| {
            surface.with_control(*rect, *button)
        })
}

/// Draws the console body and its controls, lighting up held buttons.
pub(crate) fn draw_console(frame: &mut Frame<'_>, controls: &ControlSurface, input: &InputSnapshot) {
    frame.clear(BACKGROUND);
    fill(frame, LEFT_CONTROLLER, LEFT_SHELL);
    fill(frame, RIGHT_CONTROLLER, RIGHT_SHELL);
    fill(frame, BEZEL, BEZEL_COLOR);
    fill(frame, SCREEN_RECT, [0, 0, 0, 255]);

    for (rect, button) in controls.iter() {
        let color = if input.is_down(button) {
            BUTTON_HELD
        } else {
            BUTTON_IDLE
        };
        if is_round(button) {
            let radius = rect.width.min(rect.height) / 2;
            frame.fill_circle(rect.x + radius, rect.y + radius, radius, color);
        } else {
            fill(frame, rect, color);
            frame.outline_rect(rect.x, rect.y, rect.width, rect.height, BUTTON_EDGE);
        }
    }
}

fn is_round(button: LogicalButton) -> bool {
    matches!(
        button,
        LogicalButton::A
            | LogicalButton::B
            | LogicalButton::X
            | LogicalButton::Y
            | LogicalButton::L3
            | LogicalButton::R3
            | LogicalButton::Home
    )
}

fn fill(frame: &mut Frame<'_>, rect: ControlRect, color: Rgba) {
    frame.fill_rect(rect.x, rect.y, rect.width, rect.height, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlaps(a: ControlRect, b: ControlRect) -> bool {
        a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
    }

    #[test]
    fn every_button_has_exactly_one_control() {
        let surface = build_control_surface();
        assert_eq!(surface.len(), LogicalButton::ALL.len());
        for button in LogicalButton::ALL {
            let count = surface.iter().filter(|(_, candidate)| *candidate == button).count();
            assert_eq!(count, 1, "{button:?}");
        }
    }

    #[test]
    fn controls_do_not_overlap_each_other_or_screen() {
        let controls: Vec<_> = build_control_surface().iter().collect();
        for (index, (rect, button)) in controls.iter().enumerate() {
            assert!(!overlaps(*rect, SCREEN_RECT), "{button:?} covers the screen");
            for (other, other_button) in &controls[index + 1..] {
                assert!(!overlaps(*rect, *other), "{button:?} overlaps {other_button:?}");
            }
        }
    }

    #[test]
    fn controls_fit_in_buffer() {
        for (rect, button) in build_control_surface().iter() {
            assert!(rect.x >= 0 && rect.y >= 0, "{button:?}");
            assert!(rect.x + rect.width <= BUFFER_WIDTH as i32, "{button:?}");
            assert!(rect.y + rect.height <= BUFFER_HEIGHT as i32, "{button:?}");
        }
    }

    #[test]
    fn held_button_is_highlighted() {
        let surface = build_control_surface();
        let mut pixels = vec![0u8; (BUFFER_WIDTH * BUFFER_HEIGHT * 4) as usize];
        let mut frame = Frame::new(&mut pixels, BUFFER_WIDTH, BUFFER_HEIGHT);
        let input = InputSnapshot::empty().with_button_down(LogicalButton::Up, true);
        draw_console(&mut frame, &surface, &input);

        assert_eq!(frame.pixel(54, 130), Some(BUTTON_HELD));
        assert_eq!(frame.pixel(54, 174), Some(BUTTON_IDLE));
    }
}
