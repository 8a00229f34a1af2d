use crate::colour::Colour;
use image::RgbaImage;

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Screen-space rectangle, top-left origin.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    /// Saturates at `i32::MAX` for rects reaching past the coordinate range.
    pub fn bottom(&self) -> i32 {
        edge(self.y, self.height)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        edge(self.x, self.width)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(edge(self.x, self.width / 2), edge(self.y, self.height / 2))
    }

    /// Half-open on both axes: the right and bottom edges are outside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (x as i64, y as i64);
        x >= self.x as i64
            && x < self.x as i64 + self.width as i64
            && y >= self.y as i64
            && y < self.y as i64 + self.height as i64
    }
}

fn edge(start: i32, length: u32) -> i32 {
    (start as i64 + length as i64).min(i32::MAX as i64) as i32
}

/// Anything a scene can draw on.
///
/// Implementations clip to their own bounds. Coordinates outside the surface are legal.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn fill(&mut self, colour: Colour);
    fn fill_rect(&mut self, rect: Rect, colour: Colour);
    /// Outline of `rect`, `border_width` pixels thick, drawn inside the rect.
    fn draw_rect(&mut self, rect: Rect, colour: Colour, border_width: u32);
    /// Draws `image` with its top-left corner at `top_left`, respecting its alpha channel.
    fn blit(&mut self, image: &RgbaImage, top_left: Point);
}

/// Software surface backed by an in-memory RGBA image.
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Colour::BLACK.to_rgba()),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        if x < self.image.width() && y < self.image.height() {
            Some((*self.image.get_pixel(x, y)).into())
        } else {
            None
        }
    }

    /// Intersection of `rect` with the surface as pixel ranges.
    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let left = rect.left().max(0) as i64;
        let top = rect.top().max(0) as i64;
        let right = (rect.x as i64 + rect.width as i64).min(self.image.width() as i64);
        let bottom = (rect.y as i64 + rect.height as i64).min(self.image.height() as i64);
        if left >= right || top >= bottom {
            return None;
        }
        Some((left as u32, top as u32, right as u32, bottom as u32))
    }

    /// Blends `src` over the existing pixel.
    fn blend(&mut self, x: u32, y: u32, src: image::Rgba<u8>) {
        let alpha = src[3] as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        for channel in 0..3 {
            let blended = src[channel] as f32 * alpha + dst[channel] as f32 * (1.0 - alpha);
            dst[channel] = blended.round() as u8;
        }
        dst[3] = 255;
    }
}

impl Surface for ImageSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn fill(&mut self, colour: Colour) {
        let pixel = colour.to_rgba();
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        if let Some((left, top, right, bottom)) = self.clip(rect) {
            let pixel = colour.to_rgba();
            for y in top..bottom {
                for x in left..right {
                    self.blend(x, y, pixel);
                }
            }
        }
    }

    fn draw_rect(&mut self, rect: Rect, colour: Colour, border_width: u32) {
        if border_width == 0 {
            return;
        }
        let horizontal = border_width.min(rect.height);
        let vertical = border_width.min(rect.width);

        let bottom_y = rect.bottom().saturating_sub(horizontal as i32);
        let right_x = rect.right().saturating_sub(vertical as i32);
        let inner_top = rect.y.saturating_add(horizontal as i32);
        let inner_height = rect.height.saturating_sub(horizontal.saturating_mul(2));

        // top, bottom, left, right
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, horizontal), colour);
        self.fill_rect(Rect::new(rect.x, bottom_y, rect.width, horizontal), colour);
        self.fill_rect(Rect::new(rect.x, inner_top, vertical, inner_height), colour);
        self.fill_rect(Rect::new(right_x, inner_top, vertical, inner_height), colour);
    }

    fn blit(&mut self, image: &RgbaImage, top_left: Point) {
        let target = Rect::new(top_left.x, top_left.y, image.width(), image.height());
        if let Some((left, top, right, bottom)) = self.clip(target) {
            for y in top..bottom {
                for x in left..right {
                    let src_x = (x as i64 - top_left.x as i64) as u32;
                    let src_y = (y as i64 - top_left.y as i64) as u32;
                    self.blend(x, y, *image.get_pixel(src_x, src_y));
                }
            }
        }
    }
}

/// A single call received by a `RecordingSurface`.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum DrawCall {
    Fill(Colour),
    FillRect(Rect, Colour),
    DrawRect(Rect, Colour, u32),
    Blit {
        top_left: Point,
        width: u32,
        height: u32,
    },
}

/// Surface that draws nothing and remembers every call in order.
pub struct RecordingSurface {
    width: u32,
    height: u32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill(&mut self, colour: Colour) {
        self.calls.push(DrawCall::Fill(colour));
    }

    fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        self.calls.push(DrawCall::FillRect(rect, colour));
    }

    fn draw_rect(&mut self, rect: Rect, colour: Colour, border_width: u32) {
        self.calls.push(DrawCall::DrawRect(rect, colour, border_width));
    }

    fn blit(&mut self, image: &RgbaImage, top_left: Point) {
        self.calls.push(DrawCall::Blit {
            top_left,
            width: image.width(),
            height: image.height(),
        });
    }
}
