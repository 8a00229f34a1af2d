/// The scene and input backbone of the chess shell.
/// Hosts (the `chessframe` binary, tests) feed one input snapshot per frame into a
/// `SceneManager` and hand it a `Surface` to draw on.

#[macro_use]
extern crate downcast_rs;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

mod colour;
mod error;

pub mod button;
pub mod input;
pub mod scene;
pub mod settings;
pub mod sprite;
pub mod surface;

pub use button::{BorderStyle, Button};
pub use colour::Colour;
pub use error::{ConfigurationError, Error, Result, StateError};
pub use input::{Action, ActionBuffer, InputState, MouseBuffer, MouseButton};
pub use scene::{Resources, Scene, SceneHandle, SceneManager};
pub use settings::Settings;
pub use surface::{Point, Rect, Surface};
