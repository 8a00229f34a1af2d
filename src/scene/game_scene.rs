use super::{MainMenuScene, Scene, SceneHandle};
use crate::button::Button;
use crate::error::Result;
use crate::input::{Action, ActionBuffer, MouseBuffer, MouseButton};
use crate::surface::{Rect, Surface};

const BOARD_SIZE: u32 = 8;
const MARGIN: u32 = 80;

/// The board screen. Playing rules live elsewhere; this scene draws the board and
/// offers a way back to the menu.
pub struct GameScene {
    handle: SceneHandle,
    back_button: Button,
    board: Rect,
    back_button_hovered: bool,
}

impl GameScene {
    pub fn back_button(&self) -> &Button {
        &self.back_button
    }

    pub fn board(&self) -> Rect {
        self.board
    }

    fn square_size(&self) -> u32 {
        self.board.width / BOARD_SIZE
    }
}

impl Scene for GameScene {
    fn create(handle: SceneHandle) -> Result<Self> {
        let window = &handle.settings().window;
        let square_size = window.width.min(window.height).saturating_sub(MARGIN) / BOARD_SIZE;
        let board_size = square_size * BOARD_SIZE;
        let board = Rect::new(
            (window.width.saturating_sub(board_size) / 2) as i32,
            (MARGIN - MARGIN / 8) as i32,
            board_size,
            board_size,
        );
        let back_button = Button::new(10, 10, 120, 50)?;

        Ok(Self {
            handle,
            back_button,
            board,
            back_button_hovered: false,
        })
    }

    fn handle_input(&mut self, actions: &ActionBuffer, mouse: &MouseBuffer) {
        let cursor = mouse.position;
        self.back_button_hovered = self.back_button.inside(cursor.x, cursor.y);

        let clicked_back = mouse.pressed(MouseButton::Left) && self.back_button_hovered;
        if actions.pressed(Action::Back) || clicked_back {
            if let Err(e) = self.handle.switch_scene::<MainMenuScene>() {
                error!("Cannot return to the main menu: {}", e);
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let settings = self.handle.settings();
        let colours = &settings.colours;
        surface.fill(colours.background);

        let square_size = self.square_size();
        for rank in 0..BOARD_SIZE {
            for file in 0..BOARD_SIZE {
                let colour = if (rank + file) % 2 == 0 {
                    colours.light_square
                } else {
                    colours.dark_square
                };
                let square = Rect::new(
                    self.board.x + (file * square_size) as i32,
                    self.board.y + (rank * square_size) as i32,
                    square_size,
                    square_size,
                );
                surface.fill_rect(square, colour);
            }
        }

        let fill = if self.back_button_hovered {
            Some(colours.highlight)
        } else {
            None
        };
        self.back_button.render(surface, fill, settings.button);
    }
}
