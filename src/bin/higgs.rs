use clap::Parser;
use kiss3d::window::Window;
use rand::rngs::StdRng;
use rand::SeedableRng;

use rust_blackhole::gui::HiggsAnimation;
use rust_blackhole::model::higgs::{HiggsField, HiggsParams};

/// Particles in a box, slowed down by a toy Higgs field. The light ones fade
/// out and get revived every few seconds.
#[derive(Debug, Parser)]
struct Args {
    /// Seed for the initial particles. Random if not given.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let params = HiggsParams::default();
    // One animation frame per simulation tick
    let fps = (1.0 / params.tick).round() as u64;
    let field = HiggsField::new(params, &mut rng);
    log::info!("Light particles are the ones below mass {:.3}", field.light_threshold());

    let mut window = Window::new("Higgs Field Simulation");
    window.set_framerate_limit(Some(fps));

    let animation = HiggsAnimation::new(field, rng, &mut window);
    window.render_loop(animation);
}
