use nalgebra::SVector;

/// One step of classical fourth-order Runge-Kutta for y' = f(t, y).
pub fn rk4_step<F, const D: usize>(f: &F, t: f64, y: &SVector<f64, D>, h: f64) -> SVector<f64, D>
where
    F: Fn(f64, &SVector<f64, D>) -> SVector<f64, D>,
{
    let k1 = f(t, y);
    let k2 = f(t + h / 2.0, &(y + k1 * (h / 2.0)));
    let k3 = f(t + h / 2.0, &(y + k2 * (h / 2.0)));
    let k4 = f(t + h, &(y + k3 * h));

    y + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)
}

/// Integrates from `t_start` to `t_end`, reporting the state at `num_samples`
/// evenly spaced times (both endpoints included). Between samples we take
/// `substeps` RK4 steps.
///
/// `keep_going` is checked at every output sample; if it returns false, we stop
/// early and return what we have so far (including the offending sample).
pub fn integrate_fixed<F, const D: usize>(
    f: F,
    y0: SVector<f64, D>,
    t_start: f64,
    t_end: f64,
    num_samples: usize,
    substeps: usize,
    mut keep_going: impl FnMut(f64, &SVector<f64, D>) -> bool,
) -> Vec<(f64, SVector<f64, D>)>
where
    F: Fn(f64, &SVector<f64, D>) -> SVector<f64, D>,
{
    assert!(
        num_samples >= 2 && substeps >= 1,
        "Need at least two samples and one substep, got {} and {}",
        num_samples,
        substeps
    );

    let sample_dt = (t_end - t_start) / (num_samples - 1) as f64;
    let h = sample_dt / substeps as f64;

    let mut samples = Vec::with_capacity(num_samples);
    let mut y = y0;
    samples.push((t_start, y));
    if !keep_going(t_start, &y) {
        return samples;
    }

    for i in 1..num_samples {
        let t_prev = t_start + (i - 1) as f64 * sample_dt;
        for j in 0..substeps {
            y = rk4_step(&f, t_prev + j as f64 * h, &y, h);
        }

        let t = t_start + i as f64 * sample_dt;
        samples.push((t, y));
        if !keep_going(t, &y) {
            break;
        }
    }

    samples
}
