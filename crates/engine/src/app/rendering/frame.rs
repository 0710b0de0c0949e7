pub type Rgba = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClipRect {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl ClipRect {
    fn intersect(self, other: ClipRect) -> ClipRect {
        ClipRect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && y >= self.top && x < self.right && y < self.bottom
    }
}

/// RGBA8 drawing surface over a borrowed pixel buffer.
///
/// Coordinates are local to the frame; everything outside the frame (or the
/// parent frame it was cut from) is clipped silently.
pub struct Frame<'a> {
    buffer: &'a mut [u8],
    stride: usize,
    origin_x: i32,
    origin_y: i32,
    width: u32,
    height: u32,
    clip: ClipRect,
}

impl<'a> Frame<'a> {
    pub fn new(buffer: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            buffer,
            stride: width as usize,
            origin_x: 0,
            origin_y: 0,
            width,
            height,
            clip: ClipRect {
                left: 0,
                top: 0,
                right: width as i32,
                bottom: height as i32,
            },
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sub-frame whose (0, 0) is at `(x, y)` of this frame.
    pub fn region(&mut self, x: i32, y: i32, width: u32, height: u32) -> Frame<'_> {
        let origin_x = self.origin_x + x;
        let origin_y = self.origin_y + y;
        let clip = self.clip.intersect(ClipRect {
            left: origin_x,
            top: origin_y,
            right: origin_x + width as i32,
            bottom: origin_y + height as i32,
        });
        Frame {
            buffer: &mut *self.buffer,
            stride: self.stride,
            origin_x,
            origin_y,
            width,
            height,
            clip,
        }
    }

    pub fn clear(&mut self, color: Rgba) {
        self.fill_rect(0, 0, self.width as i32, self.height as i32, color);
    }

    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        let abs_x = self.origin_x + x;
        let abs_y = self.origin_y + y;
        if !self.clip.contains(abs_x, abs_y) {
            return;
        }
        write_pixel_rgba_clipped(self.buffer, self.stride, abs_x, abs_y, color);
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        let abs_x = self.origin_x + x;
        let abs_y = self.origin_y + y;
        if !self.clip.contains(abs_x, abs_y) {
            return None;
        }
        let offset = (abs_y as usize * self.stride + abs_x as usize) * 4;
        let bytes = self.buffer.get(offset..offset + 4)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba) {
        if width <= 0 || height <= 0 {
            return;
        }
        let target = self.clip.intersect(ClipRect {
            left: self.origin_x + x,
            top: self.origin_y + y,
            right: self.origin_x + x + width,
            bottom: self.origin_y + y + height,
        });
        for abs_y in target.top..target.bottom {
            for abs_x in target.left..target.right {
                write_pixel_rgba_clipped(self.buffer, self.stride, abs_x, abs_y, color);
            }
        }
    }

    pub fn outline_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba) {
        if width <= 0 || height <= 0 {
            return;
        }
        let right = x + width - 1;
        let bottom = y + height - 1;
        for px in x..=right {
            self.put_pixel(px, y, color);
            self.put_pixel(px, bottom, color);
        }
        for py in y..=bottom {
            self.put_pixel(x, py, color);
            self.put_pixel(right, py, color);
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        if radius <= 0 {
            return;
        }
        let radius_sq = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius_sq {
                    self.put_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }
}

fn write_pixel_rgba_clipped(frame: &mut [u8], width: usize, x: i32, y: i32, color: Rgba) {
    if x < 0 || y < 0 {
        return;
    }
    let x = x as usize;
    let y = y as usize;
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    frame[byte_offset..end].copy_from_slice(&color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 255];
    const BLUE: Rgba = [0, 0, 255, 255];

    fn buffer(width: u32, height: u32) -> Vec<u8> {
        vec![0; width as usize * height as usize * 4]
    }

    #[test]
    fn fill_rect_is_clipped_to_frame() {
        let mut pixels = buffer(8, 8);
        let mut frame = Frame::new(&mut pixels, 8, 8);
        frame.fill_rect(-4, 6, 100, 100, RED);

        assert_eq!(frame.pixel(0, 6), Some(RED));
        assert_eq!(frame.pixel(7, 7), Some(RED));
        assert_eq!(frame.pixel(0, 5), Some([0, 0, 0, 0]));
        assert_eq!(frame.pixel(8, 7), None);
    }

    #[test]
    fn region_offsets_and_clips_drawing() {
        let mut pixels = buffer(10, 10);
        let mut frame = Frame::new(&mut pixels, 10, 10);
        {
            let mut region = frame.region(2, 3, 4, 4);
            region.clear(BLUE);
            region.put_pixel(10, 0, RED);
            assert_eq!(region.pixel(0, 0), Some(BLUE));
            assert_eq!(region.pixel(4, 0), None);
        }

        assert_eq!(frame.pixel(2, 3), Some(BLUE));
        assert_eq!(frame.pixel(5, 6), Some(BLUE));
        assert_eq!(frame.pixel(6, 3), Some([0, 0, 0, 0]));
        assert_eq!(frame.pixel(1, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn nested_region_cannot_escape_parent() {
        let mut pixels = buffer(10, 10);
        let mut frame = Frame::new(&mut pixels, 10, 10);
        {
            let mut outer = frame.region(0, 0, 5, 5);
            let mut inner = outer.region(3, 3, 10, 10);
            inner.clear(RED);
        }

        assert_eq!(frame.pixel(4, 4), Some(RED));
        assert_eq!(frame.pixel(5, 5), Some([0, 0, 0, 0]));
    }

    #[test]
    fn outline_leaves_interior_untouched() {
        let mut pixels = buffer(6, 6);
        let mut frame = Frame::new(&mut pixels, 6, 6);
        frame.outline_rect(1, 1, 4, 4, RED);

        assert_eq!(frame.pixel(1, 1), Some(RED));
        assert_eq!(frame.pixel(4, 4), Some(RED));
        assert_eq!(frame.pixel(2, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn circle_covers_center_not_corners() {
        let mut pixels = buffer(9, 9);
        let mut frame = Frame::new(&mut pixels, 9, 9);
        frame.fill_circle(4, 4, 3, RED);

        assert_eq!(frame.pixel(4, 4), Some(RED));
        assert_eq!(frame.pixel(4, 1), Some(RED));
        assert_eq!(frame.pixel(1, 1), Some([0, 0, 0, 0]));
    }
}
