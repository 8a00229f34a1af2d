use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use std::path::Path;

const PIECE_FILES: [&str; 12] = [
    // Black set
    "king-black.png",
    "queen-black.png",
    "bishop-black.png",
    "rook-black.png",
    "knight-black.png",
    "pawn-black.png",
    // White set
    "king-white.png",
    "queen-white.png",
    "bishop-white.png",
    "rook-white.png",
    "knight-white.png",
    "pawn-white.png",
];

const PLACEHOLDER_SIZE: (u32, u32) = (60, 90);

/// Decodes the twelve piece images from `directory`, or draws stand-ins when there is none.
pub fn load_pieces(directory: Option<&Path>) -> Result<Vec<RgbaImage>> {
    let directory = match directory {
        Some(directory) => directory,
        None => {
            warn!("No asset directory given. Using placeholder pieces.");
            return Ok(placeholder_pieces());
        }
    };

    PIECE_FILES
        .iter()
        .map(|name| {
            let path = directory.join(name);
            let img = image::open(&path).with_context(|| format!("Decode {:?}", path))?;
            Ok(img.to_rgba8())
        })
        .collect()
}

fn placeholder_pieces() -> Vec<RgbaImage> {
    PIECE_FILES
        .iter()
        .enumerate()
        .map(|(i, _)| placeholder_piece(i % 6, i >= 6))
        .collect()
}

/// A pawn-like silhouette. `kind` only changes the head size so pieces are told apart.
fn placeholder_piece(kind: usize, white: bool) -> RgbaImage {
    let (width, height) = PLACEHOLDER_SIZE;
    let (fill, outline) = if white {
        (Rgba([240, 240, 240, 255]), Rgba([20, 20, 20, 255]))
    } else {
        (Rgba([30, 30, 30, 255]), Rgba([200, 200, 200, 255]))
    };

    let center_x = width as f32 / 2.0;
    let head_radius = 10.0 + 2.0 * (6 - kind) as f32;
    let head_y = head_radius + 4.0;
    let body_top = head_y + head_radius * 0.6;
    let base_top = height as f32 - 14.0;

    let inside = |x: f32, y: f32, grow: f32| -> bool {
        let head = (x - center_x).powi(2) + (y - head_y).powi(2) <= (head_radius + grow).powi(2);
        let body = if y >= body_top - grow && y < base_top {
            // Widens towards the base
            let t = (y - body_top) / (base_top - body_top);
            (x - center_x).abs() <= 8.0 + 12.0 * t + grow
        } else {
            false
        };
        let base = y >= base_top - grow && y < height as f32 - 2.0 + grow && (x - center_x).abs() <= 26.0 + grow;
        head || body || base
    };

    RgbaImage::from_fn(width, height, |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        if inside(px, py, -2.0) {
            fill
        } else if inside(px, py, 0.0) {
            outline
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}
