use crate::canvas::Canvas;
use crate::frame_loop::FrameLoop;
use anyhow::Result;
use chessframe::input::MouseButton;
use chessframe::{Action, Point, SceneManager};
use libremarkable::input::gpio::{GPIOEvent, PhysicalButton};
use libremarkable::input::multitouch::MultitouchEvent;
use libremarkable::input::{ev::EvDevContext, InputDevice, InputEvent};

/// Drives the shell on the reMarkable until the process is killed.
pub fn run(manager: &mut SceneManager) -> Result<()> {
    let mut canvas = Canvas::new();
    canvas.clear();
    canvas.update_full();

    let (input_tx, input_rx) = std::sync::mpsc::channel::<InputEvent>();
    EvDevContext::new(InputDevice::GPIO, input_tx.clone()).start();
    EvDevContext::new(InputDevice::Multitouch, input_tx).start();
    //EvDevContext::new(InputDevice::Wacom, input_tx.clone()).start();

    let mut frame_loop = FrameLoop::new(manager.resources().settings.window.fps);
    info!("Running on the device display");
    loop {
        for event in input_rx.try_iter() {
            record(&mut frame_loop, event);
        }

        frame_loop.tick(manager, &mut canvas);
        canvas.update_partial(&Canvas::full_rect());
    }
}

fn action_for(button: PhysicalButton) -> Option<Action> {
    match button {
        PhysicalButton::MIDDLE => Some(Action::Start),
        PhysicalButton::LEFT => Some(Action::Back),
        _ => None,
    }
}

fn record(frame_loop: &mut FrameLoop, event: InputEvent) {
    match event {
        InputEvent::MultitouchEvent { event } => match event {
            MultitouchEvent::Press { finger, .. } => {
                frame_loop.mouse.move_to(Point::new(finger.pos.x as i32, finger.pos.y as i32));
                frame_loop.mouse.press(MouseButton::Left);
            }
            MultitouchEvent::Move { finger, .. } => {
                frame_loop.mouse.move_to(Point::new(finger.pos.x as i32, finger.pos.y as i32));
            }
            MultitouchEvent::Release { finger, .. } => {
                frame_loop.mouse.move_to(Point::new(finger.pos.x as i32, finger.pos.y as i32));
                frame_loop.mouse.release(MouseButton::Left);
            }
            _ => {}
        },
        InputEvent::GPIO { event } => match event {
            GPIOEvent::Press { button } => {
                if let Some(action) = action_for(button) {
                    frame_loop.actions.press(action);
                }
            }
            GPIOEvent::Unpress { button } => {
                if let Some(action) = action_for(button) {
                    frame_loop.actions.release(action);
                }
            }
            _ => {}
        },
        _ => {}
    }
}
