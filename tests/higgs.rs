use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_blackhole::math::stats::percentile;
use rust_blackhole::model::higgs::{HiggsField, HiggsParams};

#[test]
fn test_threshold_is_lower_quartile() {
    let mut rng = StdRng::seed_from_u64(11);
    let field = HiggsField::new(HiggsParams::default(), &mut rng);
    let masses: Vec<f64> = field.particles().iter().map(|p| p.mass).collect();
    approx::assert_relative_eq!(
        field.light_threshold(),
        percentile(&masses, 25.0).unwrap()
    );
}

#[test]
fn test_long_run() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut field = HiggsField::new(HiggsParams::default(), &mut rng);
    let threshold = field.light_threshold();

    // Two full revival cycles
    for tick in 1..=200 {
        field.step(&mut rng);
        for p in field.particles() {
            assert!(p.velocity.norm() <= 8.0 + 1e-9);
            // Heavy particles never disappear
            if !p.is_light(threshold) {
                assert!(p.visible);
            }
        }
        // Revived particles below m = 1 only feel the minimum drag, so they
        // survive their first tick back
        if tick % 100 == 0 {
            assert!(field
                .particles()
                .iter()
                .filter(|p| p.is_light(threshold) && p.mass < 1.0)
                .all(|p| p.visible));
        }
    }
    approx::assert_relative_eq!(field.time(), 10.0, epsilon = 1e-9);
}
