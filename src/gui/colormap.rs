use nalgebra::Point3;

// A handful of stops along matplotlib's viridis, dark purple to yellow.
const VIRIDIS: [[f32; 3]; 6] = [
    [0.267, 0.005, 0.329],
    [0.254, 0.265, 0.530],
    [0.164, 0.471, 0.558],
    [0.135, 0.659, 0.518],
    [0.478, 0.821, 0.318],
    [0.993, 0.906, 0.144],
];

/// Maps `value` in [lo, hi] to a color. Out-of-range values are clamped, and a
/// degenerate range maps everything to the middle.
pub fn viridis(value: f64, lo: f64, hi: f64) -> Point3<f32> {
    let u = if hi > lo {
        nalgebra::clamp((value - lo) / (hi - lo), 0.0, 1.0) as f32
    } else {
        0.5
    };

    let scaled = u * (VIRIDIS.len() - 1) as f32;
    let idx = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - idx as f32;

    let a = Point3::from(VIRIDIS[idx]);
    let b = Point3::from(VIRIDIS[idx + 1]);
    a + (b - a) * frac
}
