use super::{construct, Resources, Scene, SceneHandle, TransitionSlot};
use crate::error::Result;
use crate::input::{ActionBuffer, MouseBuffer};
use crate::surface::Surface;
use std::cell::RefCell;
use std::rc::Rc;

/// Owns the one active scene and drives it.
///
/// A scene switching away during `handle_input` stays in charge of `update` and `render`
/// for the rest of that frame; its successor is dispatched from the next frame on.
pub struct SceneManager {
    current: Box<dyn Scene>,
    /// Scene that was current when this frame's dispatch started. Dropped at the end of `render`.
    outgoing: Option<Box<dyn Scene>>,
    pending: Rc<TransitionSlot>,
    resources: Rc<Resources>,
    transitions: u64,
}

impl SceneManager {
    pub fn new<T: Scene>(resources: Resources) -> Result<Self> {
        let pending = Rc::new(RefCell::new(None));
        let resources = Rc::new(resources);
        let handle = SceneHandle::new(Rc::downgrade(&pending), resources.clone());
        let initial = construct::<T>(handle)?;
        info!("Starting with {}", initial.name());

        Ok(Self {
            current: Box::new(initial),
            outgoing: None,
            pending,
            resources,
            transitions: 0,
        })
    }

    /// A new handle pointing at this manager, as given to scenes on construction.
    pub fn handle(&self) -> SceneHandle {
        SceneHandle::new(Rc::downgrade(&self.pending), self.resources.clone())
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Replaces the current scene with a new `T` immediately.
    ///
    /// On failure the current scene stays.
    pub fn switch_scene<T: Scene>(&mut self) -> Result<()> {
        let next = construct::<T>(self.handle())?;
        self.install(Box::new(next));
        Ok(())
    }

    pub fn handle_input(&mut self, actions: &ActionBuffer, mouse: &MouseBuffer) {
        // A previous frame that never reached render() is over now
        self.outgoing = None;
        self.current.handle_input(actions, mouse);

        let next = self.pending.borrow_mut().take();
        if let Some(next) = next {
            let previous = self.install(next);
            self.outgoing = Some(previous);
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.frame_scene_mut().update(dt);
    }

    pub fn render(&mut self, surface: &mut dyn Surface) {
        match &self.outgoing {
            Some(scene) => scene.render(surface),
            None => self.current.render(surface),
        }
        if let Some(outgoing) = self.outgoing.take() {
            // Whatever the replaced scene queued in its last frame dies with it
            self.discard_pending(outgoing.name());
        }
    }

    /// One full frame: `handle_input`, `update`, `render`.
    pub fn frame(
        &mut self,
        actions: &ActionBuffer,
        mouse: &MouseBuffer,
        dt: f32,
        surface: &mut dyn Surface,
    ) {
        self.handle_input(actions, mouse);
        self.update(dt);
        self.render(surface);
    }

    /// The scene that will be dispatched next.
    pub fn current(&self) -> &dyn Scene {
        self.current.as_ref()
    }

    pub fn current_is<T: Scene>(&self) -> bool {
        self.current.is::<T>()
    }

    pub fn current_as<T: Scene>(&self) -> Option<&T> {
        self.current.downcast_ref::<T>()
    }

    /// Number of completed transitions since startup.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    fn frame_scene_mut(&mut self) -> &mut dyn Scene {
        match &mut self.outgoing {
            Some(scene) => scene.as_mut(),
            None => self.current.as_mut(),
        }
    }

    fn install(&mut self, next: Box<dyn Scene>) -> Box<dyn Scene> {
        info!("Switching scene: {} -> {}", self.current.name(), next.name());
        self.discard_pending(self.current.name());
        self.transitions += 1;
        std::mem::replace(&mut self.current, next)
    }

    fn discard_pending(&self, requested_by: &str) {
        if let Some(stale) = self.pending.borrow_mut().take() {
            debug!("Dropping {} queued by replaced {}", stale.name(), requested_by);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigurationError, Error};
    use crate::input::{Action, InputTracker};
    use crate::settings::Settings;
    use crate::surface::{DrawCall, RecordingSurface};
    use crate::Colour;

    struct Red {
        handle: SceneHandle,
        updates: u32,
    }

    struct Blue;

    struct Broken;

    impl Scene for Red {
        fn create(handle: SceneHandle) -> Result<Self> {
            Ok(Red { handle, updates: 0 })
        }

        fn handle_input(&mut self, actions: &ActionBuffer, _mouse: &MouseBuffer) {
            if actions.pressed(Action::Start) {
                self.handle.switch_scene::<Blue>().unwrap();
            }
            if actions.pressed(Action::Back) {
                assert!(self.handle.switch_scene::<Broken>().is_err());
            }
        }

        fn update(&mut self, _dt: f32) {
            self.updates += 1;
        }

        fn render(&self, surface: &mut dyn Surface) {
            surface.fill(Colour::rgb(255, 0, 0));
        }
    }

    impl Scene for Blue {
        fn create(_handle: SceneHandle) -> Result<Self> {
            Ok(Blue)
        }

        fn render(&self, surface: &mut dyn Surface) {
            surface.fill(Colour::rgb(0, 0, 255));
        }
    }

    impl Scene for Broken {
        fn create(_handle: SceneHandle) -> Result<Self> {
            Err(ConfigurationError::NegativeDimensions { width: -1, height: -1 }.into())
        }

        fn render(&self, _surface: &mut dyn Surface) {}
    }

    fn manager() -> SceneManager {
        SceneManager::new::<Red>(Resources::new(Settings::default(), Vec::new())).unwrap()
    }

    fn press(action: Action) -> ActionBuffer {
        let mut tracker = InputTracker::new();
        tracker.press(action);
        tracker.snapshot()
    }

    #[test]
    fn starts_with_initial_scene() {
        let manager = manager();
        assert!(manager.current_is::<Red>());
        assert_eq!(manager.transitions(), 0);
    }

    #[test]
    fn switch_takes_effect_next_frame() {
        let mut manager = manager();
        let mut surface = RecordingSurface::new(10, 10);

        manager.handle_input(&press(Action::Start), &MouseBuffer::default());
        assert!(manager.current_is::<Blue>());

        manager.update(0.016);
        manager.render(&mut surface);
        assert_eq!(surface.take_calls(), vec![DrawCall::Fill(Colour::rgb(255, 0, 0))]);

        manager.frame(&ActionBuffer::empty(), &MouseBuffer::default(), 0.016, &mut surface);
        assert_eq!(surface.take_calls(), vec![DrawCall::Fill(Colour::rgb(0, 0, 255))]);
        assert_eq!(manager.transitions(), 1);
    }

    #[test]
    fn outgoing_scene_still_updates_for_the_frame() {
        let mut manager = manager();
        manager.update(0.016);
        assert_eq!(manager.current_as::<Red>().unwrap().updates, 1);

        manager.handle_input(&press(Action::Start), &MouseBuffer::default());
        manager.update(0.016);
        assert!(manager.current_as::<Red>().is_none());
        let outgoing = manager.outgoing.as_ref().unwrap();
        assert_eq!(outgoing.downcast_ref::<Red>().unwrap().updates, 2);

        manager.render(&mut RecordingSurface::new(1, 1));
        assert!(manager.outgoing.is_none());
    }

    #[test]
    fn failed_construction_keeps_current_scene() {
        let mut manager = manager();
        manager.handle_input(&press(Action::Back), &MouseBuffer::default());
        assert!(manager.current_is::<Red>());

        let err = manager.switch_scene::<Broken>().unwrap_err();
        assert!(matches!(err, Error::SceneConstruction { .. }));
        assert!(manager.current_is::<Red>());
        assert_eq!(manager.transitions(), 0);
    }

    #[test]
    fn host_switch_is_immediate() {
        let mut manager = manager();
        manager.switch_scene::<Blue>().unwrap();
        assert!(manager.current_is::<Blue>());

        let mut surface = RecordingSurface::new(4, 4);
        manager.render(&mut surface);
        assert_eq!(surface.calls, vec![DrawCall::Fill(Colour::rgb(0, 0, 255))]);
    }

    /// Switches to `Red` on START and asks for `Blue` in every `update`.
    struct Restless {
        handle: SceneHandle,
    }

    impl Scene for Restless {
        fn create(handle: SceneHandle) -> Result<Self> {
            Ok(Restless { handle })
        }

        fn handle_input(&mut self, actions: &ActionBuffer, _mouse: &MouseBuffer) {
            if actions.pressed(Action::Start) {
                self.handle.switch_scene::<Red>().unwrap();
            }
        }

        fn update(&mut self, _dt: f32) {
            self.handle.switch_scene::<Blue>().unwrap();
        }

        fn render(&self, _surface: &mut dyn Surface) {}
    }

    fn restless() -> SceneManager {
        SceneManager::new::<Restless>(Resources::new(Settings::default(), Vec::new())).unwrap()
    }

    #[test]
    fn host_switch_drops_switch_queued_by_replaced_scene() {
        let mut manager = restless();
        manager.update(0.016);
        manager.switch_scene::<Red>().unwrap();

        manager.handle_input(&ActionBuffer::empty(), &MouseBuffer::default());
        assert!(manager.current_is::<Red>());
        assert_eq!(manager.transitions(), 1);
    }

    #[test]
    fn outgoing_scene_cannot_switch_after_its_last_frame() {
        let mut manager = restless();
        manager.handle_input(&press(Action::Start), &MouseBuffer::default());
        assert!(manager.current_is::<Red>());
        // Restless is still outgoing here and queues Blue
        manager.update(0.016);
        manager.render(&mut RecordingSurface::new(1, 1));

        let mut surface = RecordingSurface::new(1, 1);
        manager.frame(&ActionBuffer::empty(), &MouseBuffer::default(), 0.016, &mut surface);
        assert!(manager.current_is::<Red>());
        assert_eq!(manager.transitions(), 1);
    }

    #[test]
    fn handle_outliving_manager_reports_state_error() {
        let handle = manager().handle();
        assert!(matches!(
            handle.switch_scene::<Blue>(),
            Err(Error::State(crate::StateError::ManagerGone))
        ));
    }

    #[test]
    fn initial_construction_failure_is_reported() {
        let result = SceneManager::new::<Broken>(Resources::new(Settings::default(), Vec::new()));
        assert!(result.is_err());
    }
}
