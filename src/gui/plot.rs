use std::path::Path;

use plotters::prelude::*;

use crate::error::PlotError;
use crate::model::geodesic::OrbitSample;

const IMAGE_SIZE: (u32, u32) = (800, 800);
const NUM_GRID_RINGS: usize = 4;
const CIRCLE_SEGMENTS: usize = 180;
const GRID_COLOR: RGBColor = RGBColor(200, 200, 200);

fn circle(radius: f64) -> impl Iterator<Item = (f64, f64)> {
    (0..=CIRCLE_SEGMENTS).map(move |i| {
        let theta = std::f64::consts::TAU * i as f64 / CIRCLE_SEGMENTS as f64;
        (radius * theta.cos(), radius * theta.sin())
    })
}

/// Writes the orbit as a polar plot to a PNG: concentric grid rings out to
/// the farthest point reached, the horizon, and the path itself.
pub fn plot_trajectory(
    samples: &[OrbitSample],
    horizon_radius: f64,
    title: &str,
    path: &Path,
) -> Result<(), PlotError> {
    if samples.is_empty() {
        return Err(PlotError::EmptyTrajectory);
    }

    let max_r = samples
        .iter()
        .map(|s| s.r)
        .fold(horizon_radius, f64::max);
    let extent = 1.1 * max_r;

    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    chart.configure_mesh().disable_mesh().draw()?;

    for i in 1..=NUM_GRID_RINGS {
        let r = max_r * i as f64 / NUM_GRID_RINGS as f64;
        chart.draw_series(LineSeries::new(circle(r), &GRID_COLOR))?;
    }

    chart
        .draw_series(LineSeries::new(circle(horizon_radius), &BLACK))?
        .label("horizon")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK));

    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| {
                let p = s.to_cartesian();
                (p.x, p.y)
            }),
            &BLUE,
        ))?
        .label("orbit")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    log::info!("Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}
