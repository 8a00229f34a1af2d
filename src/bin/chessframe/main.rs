#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod assets;
#[cfg(feature = "remarkable")]
mod canvas;
#[cfg(feature = "remarkable")]
mod device;
mod frame_loop;
mod headless;

use anyhow::Context;
use chessframe::scene::MainMenuScene;
use chessframe::{Resources, SceneManager, Settings};
use clap::Parser;
use std::env;

#[derive(Parser)]
#[clap(version, author)]
pub struct Opts {
    #[clap(
        long,
        short = 's',
        default_value = "chessframe.yml",
        help = "Path to the settings file. Defaults are used if it doesn't exist"
    )]
    settings: std::path::PathBuf,

    #[clap(
        long,
        short = 'a',
        help = "Directory containing the piece images (king-black.png, ...). Placeholders are drawn if omitted"
    )]
    assets: Option<std::path::PathBuf>,

    #[clap(
        long,
        short = 'n',
        default_value = "300",
        help = "Number of frames to run without a device"
    )]
    frames: u64,

    #[clap(
        long,
        help = "Frame at which a START press is simulated when running without a device"
    )]
    press_start_at: Option<u64>,

    #[clap(long, help = "Write the last frame as PNG to this path when running without a device")]
    snapshot: Option<std::path::PathBuf>,

    #[cfg(feature = "remarkable")]
    #[clap(long, short = 'D', help = "Run on the reMarkable display instead of headless")]
    device: bool,
}

lazy_static! {
    pub static ref CLI_OPTS: Opts = Opts::parse();
}

fn main() {
    let show_log_info = if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "DEBUG");
        true
    } else {
        false
    };
    env_logger::init();
    if show_log_info {
        debug!(concat!(
            "Debug Mode is enabled by default.\n",
            "To change this, set the env \"RUST_LOG\" something else ",
            "(e.g. info, warn, error or comma separated list of \"[module=]<level>\")."
        ));
    }

    if let Err(err) = run() {
        error!("{:?}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let settings = Settings::read(&CLI_OPTS.settings)
        .with_context(|| format!("Failed to read settings file at {:?}", &CLI_OPTS.settings))?;
    let pieces = assets::load_pieces(CLI_OPTS.assets.as_deref()).context("Load piece images")?;

    let mut manager = SceneManager::new::<MainMenuScene>(Resources::new(settings, pieces))
        .context("Create initial scene")?;

    #[cfg(feature = "remarkable")]
    {
        if CLI_OPTS.device {
            return device::run(&mut manager);
        }
    }

    headless::run(&mut manager)
}
