use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use kiss3d::window::Window;

use rust_blackhole::gui::plot::plot_trajectory;
use rust_blackhole::gui::GeodesicReplay;
use rust_blackhole::model::geodesic::{GeodesicParams, Trajectory, Variant};

/// Integrates a decaying polar orbit around a black hole, optionally one
/// that's moving, and replays it.
#[derive(Debug, Parser)]
struct Args {
    #[arg(long, value_enum, default_value_t = Variant::Stationary)]
    variant: Variant,
    /// Override the black hole's velocity, as a fraction of c
    #[arg(long)]
    boost: Option<f64>,
    /// Override the initial radius
    #[arg(long)]
    r0: Option<f64>,
    /// Override the number of output samples
    #[arg(long)]
    samples: Option<usize>,
    /// Override the final proper time
    #[arg(long)]
    end_time: Option<f64>,
    /// Override the number of RK4 steps per sample
    #[arg(long)]
    substeps: Option<usize>,
    /// Also write a polar plot to this PNG file
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Don't open the replay window
    #[arg(long)]
    no_window: bool,
}

impl Args {
    fn params(&self) -> GeodesicParams {
        let defaults = GeodesicParams::for_variant(self.variant);
        GeodesicParams {
            boost: self.boost.unwrap_or(defaults.boost),
            r0: self.r0.unwrap_or(defaults.r0),
            num_samples: self.samples.unwrap_or(defaults.num_samples),
            end_time: self.end_time.unwrap_or(defaults.end_time),
            substeps: self.substeps.unwrap_or(defaults.substeps),
            ..defaults
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let params = args.params();
    let trajectory = Trajectory::solve(&params)?;
    let title = params.title();

    if let Some(path) = &args.plot {
        plot_trajectory(trajectory.samples(), params.horizon_radius(), title, path)?;
    }

    if !args.no_window {
        let mut window = Window::new(title);
        window.set_framerate_limit(Some(60));
        let replay = GeodesicReplay::new(trajectory, title, params.horizon_radius());
        window.render_loop(replay);
    }

    Ok(())
}
