use libremarkable::framebuffer::{
    cgmath::Point2, cgmath::Vector2, common::color, common::mxcfb_rect, common::DISPLAYHEIGHT,
    common::DISPLAYWIDTH, core::Framebuffer, storage::rgbimage_from_u8_slice, FramebufferBase,
    FramebufferDraw, FramebufferIO, FramebufferRefresh,
};
use chessframe::{Colour, Point, Rect, Surface};
use libremarkable::framebuffer::{
    common::display_temp, common::dither_mode, common::waveform_mode, refresh::PartialRefreshMode,
};
use libremarkable::image as rm_image;

/// The reMarkable framebuffer as a drawing surface.
pub struct Canvas<'a> {
    framebuffer: Box<Framebuffer<'a>>,
}

impl<'a> Canvas<'a> {
    pub fn new() -> Self {
        Self {
            framebuffer: Box::new(Framebuffer::from_path("/dev/fb0")),
        }
    }

    pub fn full_rect() -> mxcfb_rect {
        mxcfb_rect {
            top: 0,
            left: 0,
            width: DISPLAYWIDTH as u32,
            height: DISPLAYHEIGHT as u32,
        }
    }

    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    pub fn update_full(&mut self) -> u32 {
        self.framebuffer.full_refresh(
            waveform_mode::WAVEFORM_MODE_GC16,
            display_temp::TEMP_USE_REMARKABLE_DRAW,
            dither_mode::EPDC_FLAG_USE_DITHERING_PASSTHROUGH,
            0,
            true,
        )
    }

    pub fn update_partial(&mut self, region: &mxcfb_rect) -> u32 {
        self.framebuffer.partial_refresh(
            region,
            PartialRefreshMode::Async,
            waveform_mode::WAVEFORM_MODE_GC16_FAST,
            display_temp::TEMP_USE_REMARKABLE_DRAW,
            dither_mode::EPDC_FLAG_USE_REMARKABLE_DITHER,
            0, // See documentation on DRAWING_QUANT_BITS in libremarkable/framebuffer/common.rs
            false,
        )
    }

    /// Part of `rect` that is on the display.
    fn clip(rect: Rect) -> Option<(Point2<i32>, Vector2<u32>)> {
        let left = rect.left().max(0);
        let top = rect.top().max(0);
        let right = rect.right().min(DISPLAYWIDTH as i32);
        let bottom = rect.bottom().min(DISPLAYHEIGHT as i32);
        if left >= right || top >= bottom {
            return None;
        }
        Some((
            Point2 { x: left, y: top },
            Vector2 {
                x: (right - left) as u32,
                y: (bottom - top) as u32,
            },
        ))
    }

    /// Image that can be overlayed white respecting the previous pixels.
    /// This way transparent images can work.
    fn calc_overlay_image(&mut self, pos: Point2<i32>, img: &image::RgbaImage) -> Option<rm_image::RgbImage> {
        let region = mxcfb_rect {
            top: pos.y as u32,
            left: pos.x as u32,
            width: img.width(),
            height: img.height(),
        };
        let dump = self.framebuffer.dump_region(region).ok()?;
        let orig_rgb888 = rgbimage_from_u8_slice(img.width(), img.height(), &dump)?;

        let mut rgb = rm_image::RgbImage::new(img.width(), img.height());
        for (x, y, pixel) in img.enumerate_pixels() {
            let color_alpha = (255 - pixel[3]) as f32 / 255.0;
            let orig_pixel = orig_rgb888.get_pixel(x, y);
            let mut blended = [0u8; 3];
            for channel in 0..3 {
                blended[channel] = (pixel[channel] as f32 * (1.0 - color_alpha)
                    + orig_pixel[channel] as f32 * color_alpha) as u8;
            }
            rgb.put_pixel(x, y, rm_image::Rgb(blended));
        }
        Some(rgb)
    }
}

fn to_color(colour: Colour) -> color {
    color::RGB(colour.r, colour.g, colour.b)
}

impl<'a> Surface for Canvas<'a> {
    fn width(&self) -> u32 {
        DISPLAYWIDTH as u32
    }

    fn height(&self) -> u32 {
        DISPLAYHEIGHT as u32
    }

    fn fill(&mut self, colour: Colour) {
        self.fill_rect(Rect::new(0, 0, DISPLAYWIDTH as u32, DISPLAYHEIGHT as u32), colour);
    }

    fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        if let Some((pos, size)) = Self::clip(rect) {
            self.framebuffer.fill_rect(pos, size, to_color(colour));
        }
    }

    fn draw_rect(&mut self, rect: Rect, colour: Colour, border_width: u32) {
        if border_width == 0 {
            return;
        }
        if let Some((pos, size)) = Self::clip(rect) {
            self.framebuffer.draw_rect(pos, size, border_width, to_color(colour));
        }
    }

    fn blit(&mut self, img: &image::RgbaImage, top_left: Point) {
        let target = Rect::new(top_left.x, top_left.y, img.width(), img.height());
        let (pos, size) = match Self::clip(target) {
            Some(visible) => visible,
            None => return,
        };
        // The framebuffer doesn't clip images, so only hand it the visible part
        let visible = image::imageops::crop_imm(
            img,
            (pos.x - top_left.x) as u32,
            (pos.y - top_left.y) as u32,
            size.x,
            size.y,
        )
        .to_image();
        if let Some(rgb_img) = self.calc_overlay_image(pos, &visible) {
            self.framebuffer.draw_image(&rgb_img, pos);
        }
    }
}
