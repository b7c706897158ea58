use clap::Parser;
use kiss3d::window::Window;
use rand::rngs::StdRng;
use rand::SeedableRng;

use rust_blackhole::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use rust_blackhole::gui::Simulation;
use rust_blackhole::model::SimulationState;

/// A black hole with a spiralling accretion disk, in front of a field of stars.
#[derive(Debug, Parser)]
struct Args {
    /// Seed for the particle field. Random if not given.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let state = SimulationState::from_rng(rng);
    log::info!(
        "Starting with {} stars and {} disk particles",
        state.field().stars().len(),
        state.field().accretion().len()
    );

    let mut window = Window::new_with_size(
        "Black Hole - Accretion Disk",
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
    );
    window.set_framerate_limit(Some(60));

    let simulation = Simulation::new(state, &mut window);
    window.render_loop(simulation);
}
