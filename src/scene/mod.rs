mod game_scene;
mod main_menu_scene;
mod manager;

pub use game_scene::GameScene;
pub use main_menu_scene::MainMenuScene;
pub use manager::SceneManager;

use crate::error::{Error, Result, StateError};
use crate::input::{ActionBuffer, MouseBuffer};
use crate::settings::Settings;
use crate::surface::Surface;
use downcast_rs::Downcast;
use image::RgbaImage;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// One screen of the application.
///
/// The host calls `handle_input`, `update` and `render` once per frame, in that order.
pub trait Scene: Downcast {
    /// Builds a fresh instance. `handle` is the way back to the owning manager.
    fn create(handle: SceneHandle) -> Result<Self>
    where
        Self: Sized;

    fn handle_input(&mut self, _actions: &ActionBuffer, _mouse: &MouseBuffer) {}
    fn update(&mut self, _dt: f32) {}
    fn render(&self, surface: &mut dyn Surface);

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
impl_downcast!(Scene);

/// Read-only data shared by all scenes. Built once before the first frame.
pub struct Resources {
    pub settings: Settings,
    /// Decoded piece images from the asset provider.
    pub pieces: Vec<RgbaImage>,
}

impl Resources {
    /// `pieces` are handed to scenes unscaled. Each scene sizes them itself.
    pub fn new(settings: Settings, pieces: Vec<RgbaImage>) -> Self {
        Self { settings, pieces }
    }
}

pub(crate) type TransitionSlot = RefCell<Option<Box<dyn Scene>>>;

/// Non-owning back-reference from a scene to its `SceneManager`.
#[derive(Clone)]
pub struct SceneHandle {
    slot: Weak<TransitionSlot>,
    resources: Rc<Resources>,
}

impl SceneHandle {
    pub(crate) fn new(slot: Weak<TransitionSlot>, resources: Rc<Resources>) -> Self {
        Self { slot, resources }
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn settings(&self) -> &Settings {
        &self.resources.settings
    }

    /// Builds a new `T` right away and hands it to the manager.
    ///
    /// The manager makes it current once the running `handle_input` returns. If `T` fails to
    /// construct nothing changes and the error is returned.
    pub fn switch_scene<T: Scene>(&self) -> Result<()> {
        let slot = self.slot.upgrade().ok_or(StateError::ManagerGone)?;
        let scene = construct::<T>(self.clone())?;

        let mut pending = slot.borrow_mut();
        if let Some(replaced) = pending.replace(Box::new(scene)) {
            debug!("Dropping queued {} in favour of {}", replaced.name(), std::any::type_name::<T>());
        }
        Ok(())
    }
}

pub(crate) fn construct<T: Scene>(handle: SceneHandle) -> Result<T> {
    T::create(handle).map_err(|e| {
        let scene = std::any::type_name::<T>();
        error!("Failed to construct {}: {}", scene, e);
        Error::SceneConstruction {
            scene,
            source: Box::new(e),
        }
    })
}
