use handheld_engine::{Frame, Rgba};

/// Maps a fixed-size game world onto whatever screen region it is drawn into.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WorldView {
    scale_x: f32,
    scale_y: f32,
}

impl WorldView {
    pub(crate) fn fit(frame: &Frame<'_>, world_width: f32, world_height: f32) -> Self {
        Self {
            scale_x: frame.width() as f32 / world_width.max(1.0),
            scale_y: frame.height() as f32 / world_height.max(1.0),
        }
    }

    pub(crate) fn x(&self, world_x: f32) -> i32 {
        (world_x * self.scale_x).round() as i32
    }

    pub(crate) fn y(&self, world_y: f32) -> i32 {
        (world_y * self.scale_y).round() as i32
    }

    pub(crate) fn fill_rect(
        &self,
        frame: &mut Frame<'_>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgba,
    ) {
        let left = self.x(x);
        let top = self.y(y);
        let right = self.x(x + width);
        let bottom = self.y(y + height);
        frame.fill_rect(left, top, (right - left).max(1), (bottom - top).max(1), color);
    }

    pub(crate) fn fill_circle(&self, frame: &mut Frame<'_>, cx: f32, cy: f32, r: f32, color: Rgba) {
        let radius = (r * self.scale_x.min(self.scale_y)).round().max(1.0) as i32;
        frame.fill_circle(self.x(cx), self.y(cy), radius, color);
    }
}

/// Row of pips used in place of text for small counters.
pub(crate) fn draw_pips(frame: &mut Frame<'_>, x: i32, y: i32, count: u32, color: Rgba) {
    for index in 0..count.min(32) {
        frame.fill_rect(x + index as i32 * 6, y, 4, 4, color);
    }
}

/// Horizontal meter filled to `fraction` of `width`.
pub(crate) fn draw_meter(
    frame: &mut Frame<'_>,
    x: i32,
    y: i32,
    width: i32,
    fraction: f32,
    fill: Rgba,
    back: Rgba,
) {
    frame.fill_rect(x, y, width, 6, back);
    let filled = (width as f32 * fraction.clamp(0.0, 1.0)).round() as i32;
    frame.fill_rect(x, y, filled, 6, fill);
}
