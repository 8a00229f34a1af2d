use crate::frame_loop::FrameLoop;
use crate::CLI_OPTS;
use anyhow::{Context, Result};
use chessframe::surface::ImageSurface;
use chessframe::{Action, SceneManager};

/// Runs the shell against an in-memory surface for a fixed number of frames.
pub fn run(manager: &mut SceneManager) -> Result<()> {
    let window = manager.resources().settings.window.clone();
    let mut surface = ImageSurface::new(window.width, window.height);
    let mut frame_loop = FrameLoop::new(window.fps);

    info!(
        "Running {} frames headless ({}x{} @ {} fps)",
        CLI_OPTS.frames, window.width, window.height, window.fps
    );
    for frame in 0..CLI_OPTS.frames {
        match start_edge(CLI_OPTS.press_start_at, frame) {
            Some(StartEdge::Press) => frame_loop.actions.press(Action::Start),
            Some(StartEdge::Release) => frame_loop.actions.release(Action::Start),
            None => {}
        }
        frame_loop.tick(manager, &mut surface);
    }
    info!(
        "Finished on {} after {} scene switches",
        manager.current().name(),
        manager.transitions()
    );

    if let Some(ref path) = CLI_OPTS.snapshot {
        surface
            .image()
            .save(path)
            .with_context(|| format!("Write snapshot to {:?}", path))?;
        info!("Saved last frame to {:?}", path);
    }
    Ok(())
}

#[derive(PartialEq, Debug)]
enum StartEdge {
    Press,
    Release,
}

/// START goes down in frame `press_at` and up again one frame later.
fn start_edge(press_at: Option<u64>, frame: u64) -> Option<StartEdge> {
    let at = press_at?;
    if at == frame {
        Some(StartEdge::Press)
    } else if at.checked_add(1) == Some(frame) {
        Some(StartEdge::Release)
    } else {
        None
    }
}
