use chessframe::input::{InputFlags, InputTracker, MouseButton, MouseTracker};
use chessframe::scene::{GameScene, MainMenuScene};
use chessframe::surface::{DrawCall, RecordingSurface};
use chessframe::{
    Action, ActionBuffer, InputState, MouseBuffer, Resources, Result, Scene, SceneHandle, SceneManager,
    Settings, Surface,
};
use image::{Rgba, RgbaImage};
use std::sync::atomic::{AtomicU64, Ordering};

fn resources() -> Resources {
    let mut settings = Settings::default();
    settings.menu.seed = Some(1);
    let pieces = (0..12)
        .map(|i| RgbaImage::from_pixel(8, 12, Rgba([i * 20, 0, 0, 255])))
        .collect();
    Resources::new(settings, pieces)
}

#[test]
fn start_press_moves_from_menu_to_game_next_frame() {
    let mut manager = SceneManager::new::<MainMenuScene>(resources()).unwrap();
    let mut actions = InputTracker::new();
    let mut mouse = MouseTracker::new();
    let mut surface = RecordingSurface::new(800, 800);

    // Idle frame on the menu
    manager.frame(&actions.snapshot(), &mouse.snapshot(), 0.016, &mut surface);
    let menu_frame = surface.take_calls();
    assert_eq!(menu_frame.len(), 1 + 12);

    actions.press(Action::Start);
    let pressed = actions.snapshot();
    assert!(pressed[Action::Start][InputState::Pressed]);

    manager.handle_input(&pressed, &mouse.snapshot());
    assert!(manager.current_is::<GameScene>());

    // The rest of this frame still belongs to the menu
    manager.update(0.016);
    manager.render(&mut surface);
    let switch_frame = surface.take_calls();
    assert_eq!(switch_frame.len(), 1 + 12);
    assert!(switch_frame[1..].iter().all(|call| matches!(call, DrawCall::Blit { .. })));

    // Next frame draws the board (background, 64 squares, back button outline)
    manager.frame(&actions.snapshot(), &mouse.snapshot(), 0.016, &mut surface);
    let game_frame = surface.take_calls();
    assert_eq!(game_frame.len(), 1 + 64 + 1);
    assert!(!game_frame.iter().any(|call| matches!(call, DrawCall::Blit { .. })));
}

#[test]
fn back_and_forth_keeps_exactly_one_scene() {
    let mut manager = SceneManager::new::<MainMenuScene>(resources()).unwrap();
    let mut actions = InputTracker::new();

    for round in 0..5 {
        actions.press(Action::Start);
        manager.handle_input(&actions.snapshot(), &MouseBuffer::default());
        actions.release(Action::Start);
        assert!(manager.current_is::<GameScene>(), "round {}", round);
        manager.render(&mut RecordingSurface::new(1, 1));

        actions.press(Action::Back);
        manager.handle_input(&actions.snapshot(), &MouseBuffer::default());
        actions.release(Action::Back);
        assert!(manager.current_is::<MainMenuScene>(), "round {}", round);
        manager.render(&mut RecordingSurface::new(1, 1));
    }
    assert_eq!(manager.transitions(), 10);
}

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Re-enters itself whenever START is pressed.
struct Restarting {
    id: u64,
    handle: SceneHandle,
    frames: u32,
}

impl Scene for Restarting {
    fn create(handle: SceneHandle) -> Result<Self> {
        Ok(Self {
            id: NEXT_ID.fetch_add(1, Ordering::SeqCst),
            handle,
            frames: 0,
        })
    }

    fn handle_input(&mut self, actions: &ActionBuffer, _mouse: &MouseBuffer) {
        if actions.pressed(Action::Start) {
            self.handle.switch_scene::<Restarting>().unwrap();
        }
    }

    fn update(&mut self, _dt: f32) {
        self.frames += 1;
    }

    fn render(&self, _surface: &mut dyn Surface) {}
}

#[test]
fn self_transition_builds_fresh_instances() {
    let mut manager = SceneManager::new::<Restarting>(resources()).unwrap();
    let mut surface = RecordingSurface::new(1, 1);
    let mut ids = vec![manager.current_as::<Restarting>().unwrap().id];

    manager.frame(&ActionBuffer::empty(), &MouseBuffer::default(), 0.016, &mut surface);
    assert_eq!(manager.current_as::<Restarting>().unwrap().frames, 1);

    let mut actions = InputTracker::new();
    for _ in 0..5 {
        actions.press(Action::Start);
        manager.frame(&actions.snapshot(), &MouseBuffer::default(), 0.016, &mut surface);
        actions.release(Action::Start);
        actions.snapshot();

        let current = manager.current_as::<Restarting>().unwrap();
        assert_eq!(current.frames, 0, "state is reset on re-entry");
        ids.push(current.id);
    }

    for pair in ids.windows(2) {
        assert!(pair[1] > pair[0]);
    }
    ids.dedup();
    assert_eq!(ids.len(), 6);
    assert_eq!(manager.transitions(), 5);
}

#[test]
fn host_can_switch_directly() {
    let mut manager = SceneManager::new::<MainMenuScene>(resources()).unwrap();
    manager.switch_scene::<MainMenuScene>().unwrap();
    assert!(manager.current_is::<MainMenuScene>());
    manager.switch_scene::<GameScene>().unwrap();
    assert!(manager.current_is::<GameScene>());
    assert_eq!(manager.current().name(), std::any::type_name::<GameScene>());
}

/// Remembers what the left mouse button looked like in every frame.
struct MouseLog {
    left: Vec<InputFlags>,
}

impl Scene for MouseLog {
    fn create(_handle: SceneHandle) -> Result<Self> {
        Ok(Self { left: Vec::new() })
    }

    fn handle_input(&mut self, _actions: &ActionBuffer, mouse: &MouseBuffer) {
        self.left.push(mouse[MouseButton::Left]);
    }

    fn render(&self, _surface: &mut dyn Surface) {}
}

#[test]
fn tap_between_frames_reaches_the_scene_as_press_then_release() {
    let mut manager = SceneManager::new::<MouseLog>(resources()).unwrap();
    let mut mouse = MouseTracker::new();
    let mut surface = RecordingSurface::new(1, 1);

    mouse.press(MouseButton::Left);
    mouse.release(MouseButton::Left);
    for _ in 0..3 {
        manager.frame(&ActionBuffer::empty(), &mouse.snapshot(), 0.016, &mut surface);
    }

    let left = &manager.current_as::<MouseLog>().unwrap().left;
    let expected = vec![
        InputFlags::from_levels(true, false),
        InputFlags::from_levels(false, true),
        InputFlags::default(),
    ];
    assert_eq!(left, &expected);
    assert!(left[0][InputState::Pressed]);
    assert!(left[1][InputState::Released]);
    assert!(left[2].is_idle());
}
