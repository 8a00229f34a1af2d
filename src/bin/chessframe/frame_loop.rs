use chessframe::input::{InputTracker, MouseTracker};
use chessframe::{Action, SceneManager, Surface};
use std::thread::sleep;
use std::time::{Duration, Instant};

/// Paces frames and turns the device events collected in between into snapshots.
pub struct FrameLoop {
    frame_duration: Duration,
    last_frame: Instant,
    pub actions: InputTracker<Action>,
    pub mouse: MouseTracker,
}

impl FrameLoop {
    pub fn new(fps: u16) -> Self {
        Self {
            frame_duration: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last_frame: Instant::now(),
            actions: InputTracker::new(),
            mouse: MouseTracker::new(),
        }
    }

    /// Runs one frame and waits for the remaining frame time.
    pub fn tick(&mut self, manager: &mut SceneManager, surface: &mut dyn Surface) {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = frame_start;

        let actions = self.actions.snapshot();
        let mouse = self.mouse.snapshot();
        manager.frame(&actions, &mouse, dt, surface);

        // Wait remaining frame time
        let elapsed = frame_start.elapsed();
        if elapsed < self.frame_duration {
            sleep(self.frame_duration - elapsed);
        }
    }
}
