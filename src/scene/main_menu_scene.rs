use super::{GameScene, Scene, SceneHandle};
use crate::error::Result;
use crate::input::{Action, ActionBuffer, InputState, MouseBuffer, MouseButton};
use crate::sprite::FallingSprite;
use crate::surface::{Point, Surface};
use image::imageops::{self, FilterType};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Title screen with chess pieces tumbling down in the background.
/// Any START press or left click opens the game.
pub struct MainMenuScene {
    handle: SceneHandle,
    pieces: Vec<FallingSprite>,
    screen_height: i32,
}

impl MainMenuScene {
    pub fn pieces(&self) -> &[FallingSprite] {
        &self.pieces
    }
}

impl Scene for MainMenuScene {
    fn create(handle: SceneHandle) -> Result<Self> {
        let settings = handle.settings();
        let menu = &settings.menu;
        let (window_width, window_height) = (settings.window.width, settings.window.height);
        let (piece_width, piece_height) = menu.piece_size();

        let mut rng = match menu.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let pieces = handle
            .resources()
            .pieces
            .iter()
            .map(|image| {
                let scaled = imageops::resize(image, piece_width, piece_height, FilterType::Triangle);
                let center = Point::new(
                    rng.gen_range(0..=window_width as i32),
                    rng.gen_range(0..=window_height as i32),
                );
                let speed = rng.gen_range(menu.speed.0..=menu.speed.1);
                let direction = *[1, -1].choose(&mut rng).unwrap_or(&1);
                let rotate_speed = rng.gen_range(menu.rotate_speed.0..=menu.rotate_speed.1) * direction;
                FallingSprite::new(scaled, center, speed, rotate_speed as f32)
            })
            .collect::<Vec<_>>();
        debug!("Main menu spawned {} falling pieces", pieces.len());

        let screen_height = window_height as i32;
        Ok(Self {
            handle,
            pieces,
            screen_height,
        })
    }

    fn handle_input(&mut self, actions: &ActionBuffer, mouse: &MouseBuffer) {
        if actions[Action::Start][InputState::Pressed] || mouse[MouseButton::Left][InputState::Pressed] {
            if let Err(e) = self.handle.switch_scene::<GameScene>() {
                error!("Cannot open the game: {}", e);
            }
        }
    }

    fn update(&mut self, dt: f32) {
        for piece in self.pieces.iter_mut() {
            piece.update(dt, self.screen_height);
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill(self.handle.settings().colours.background);
        for piece in self.pieces.iter() {
            surface.blit(piece.image(), piece.top_left());
        }
    }
}
