use crate::surface::{Point, Rect};
use image::{Rgba, RgbaImage};

/// Rotates `image` counter-clockwise by `degrees` around its center.
///
/// The result grows to fit the rotated corners; uncovered pixels are transparent.
/// Sampling is nearest-neighbour.
pub fn rotate(image: &RgbaImage, degrees: f32) -> RgbaImage {
    let (w, h) = (image.width() as f64, image.height() as f64);
    let radians = (degrees as f64).to_radians();
    let (sin, cos) = radians.sin_cos();

    // Trim float noise so that multiples of 90 degrees keep exact sizes.
    let new_w = (w * cos.abs() + h * sin.abs() - 1e-6).ceil().max(0.0) as u32;
    let new_h = (w * sin.abs() + h * cos.abs() - 1e-6).ceil().max(0.0) as u32;

    let mut rotated = RgbaImage::from_pixel(new_w, new_h, Rgba([0, 0, 0, 0]));
    let (src_cx, src_cy) = (w / 2.0, h / 2.0);
    let (dst_cx, dst_cy) = (new_w as f64 / 2.0, new_h as f64 / 2.0);

    for (x, y, pixel) in rotated.enumerate_pixels_mut() {
        // Inverse mapping from the pixel center back into the source. Screen y points down,
        // so a counter-clockwise turn on screen is a clockwise turn in these coordinates.
        let dx = x as f64 + 0.5 - dst_cx;
        let dy = y as f64 + 0.5 - dst_cy;
        let src_x = dx * cos - dy * sin + src_cx;
        let src_y = dx * sin + dy * cos + src_cy;
        if src_x >= 0.0 && src_y >= 0.0 && src_x < w && src_y < h {
            *pixel = *image.get_pixel(src_x as u32, src_y as u32);
        }
    }

    rotated
}

/// A decorative piece that falls down the screen while spinning and reappears at the top.
pub struct FallingSprite {
    original_image: RgbaImage,
    image: RgbaImage,
    rect: Rect,
    speed_y: i32,
    angle: f32,
    rotate_speed: f32,
}

impl FallingSprite {
    pub fn new(image: RgbaImage, center: Point, speed: i32, rotate_speed: f32) -> Self {
        let (width, height) = image.dimensions();
        let rect = Rect::new(
            center.x - (width / 2) as i32,
            center.y - (height / 2) as i32,
            width,
            height,
        );
        Self {
            image: image.clone(),
            original_image: image,
            rect,
            speed_y: speed,
            angle: 0.0,
            rotate_speed,
        }
    }

    /// Advances one frame. Movement is per frame, `_dt` is not applied.
    pub fn update(&mut self, _dt: f32, screen_height: i32) {
        self.rect.y += self.speed_y;

        let half_width = (self.image.width() / 2) as f32;
        let half_height = (self.image.height() / 2) as f32;
        // Corner distance. Keeps the arc length per frame constant regardless of size.
        let max_distance = (half_width * half_width + half_height * half_height).sqrt();
        if max_distance > 0.0 {
            self.angle += self.rotate_speed / max_distance;
        }

        // Always from the original to avoid accumulating resampling artifacts
        self.image = rotate(&self.original_image, self.angle);

        if self.rect.top() > screen_height {
            self.rect.y = -(self.rect.height as i32);
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn original_image(&self) -> &RgbaImage {
        &self.original_image
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn top_left(&self) -> Point {
        self.rect.top_left()
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn speed(&self) -> i32 {
        self.speed_y
    }

    pub fn rotate_speed(&self) -> f32 {
        self.rotate_speed
    }
}
