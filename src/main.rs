mod cli;
mod error;
mod files;
mod loader;
mod sequence;
mod ui;

use clap::Parser;
use winit::event_loop::EventLoop;

use crate::cli::Cli;
use crate::ui::state::ViewerState;
use crate::ui::App;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Could not create event loop: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(ViewerState::new(), (cli.width, cli.height), cli.folder);

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
