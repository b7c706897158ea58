use std::f64::consts::TAU;

use nalgebra::{Point3, Vector3};
use rand::Rng;

use crate::consts::*;
use crate::math::geometry::is_finite_vector;

fn sample<R: Rng + ?Sized>(rng: &mut R, range: (f64, f64)) -> f64 {
    rng.gen_range(range.0..range.1)
}

fn scale_color(base: [u8; 3], factor: f64) -> [u8; 3] {
    base.map(|c| (c as f64 * factor) as u8)
}

/// A background star. Stars never move.
#[derive(Debug, Clone)]
pub struct Star {
    pub position: Point3<f64>,
    pub size: f64,
    pub color: [u8; 3],
}

impl Star {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let position = Point3::new(
            sample(rng, STAR_XY_RANGE),
            sample(rng, STAR_XY_RANGE),
            sample(rng, STAR_Z_RANGE),
        );
        let size = sample(rng, STAR_SIZE);
        let brightness = sample(rng, STAR_BRIGHTNESS);

        Star {
            position,
            size,
            color: scale_color(STAR_COLOR, brightness),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Circling the hole at full brightness.
    Orbiting,
    /// Fell past the event horizon, and is dimming out. Once `life` hits zero,
    /// the particle gets respawned.
    Fading { life: f64 },
}

/// What happened to a particle during a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Orbiting,
    Fading,
    Respawned,
}

#[derive(Debug, Clone)]
pub struct AccretionParticle {
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    pub size: f64,
    spiral_factor: f64,
    phase: Phase,
}

impl AccretionParticle {
    /// Spawns a particle on a circular orbit around `center`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, center: &Point3<f64>) -> Self {
        let distance = sample(rng, SPAWN_DISTANCE);
        let angle = rng.gen_range(0.0..TAU);
        let inclination = sample(rng, SPAWN_INCLINATION);

        let offset = Vector3::new(
            distance * angle.cos(),
            distance * angle.sin(),
            inclination * distance,
        );

        // Circular orbit velocity, in the xy-plane
        let speed = get_circular_velocity(distance, G * M);
        let velocity = Vector3::new(-speed * angle.sin(), speed * angle.cos(), 0.0);

        AccretionParticle {
            position: center + offset,
            velocity,
            size: sample(rng, SPAWN_SIZE),
            spiral_factor: sample(rng, SPIRAL_FACTOR),
            phase: Phase::Orbiting,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn life(&self) -> f64 {
        match self.phase {
            Phase::Orbiting => 1.0,
            Phase::Fading { life } => life,
        }
    }

    pub fn spiral_factor(&self) -> f64 {
        self.spiral_factor
    }

    pub fn color(&self) -> [u8; 3] {
        scale_color(ACCRETION_COLOR, self.life())
    }

    fn is_finite(&self) -> bool {
        is_finite_vector(&self.position.coords)
            && is_finite_vector(&self.velocity)
            && self.size.is_finite()
    }

    /// Advances the particle by one timestep, pulled towards `center`.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R, center: &Point3<f64>) -> StepOutcome {
        let to_center = center - self.position;
        let distance = to_center.norm().max(MIN_FORCE_DISTANCE);

        let accel = (G * M / (distance * distance)) * (to_center / distance);
        self.velocity += accel * TIMESTEP;
        // Energy loss, so the orbit slowly spirals in
        self.velocity *= self.spiral_factor;
        self.position += self.velocity * TIMESTEP;

        if distance < EVENT_HORIZON_RADIUS && self.phase == Phase::Orbiting {
            self.phase = Phase::Fading { life: 1.0 };
        }

        let outcome = match self.phase {
            Phase::Orbiting => StepOutcome::Orbiting,
            Phase::Fading { life } => {
                let life = (life - FADE_DECREMENT).max(0.0);
                self.size *= FADE_GROWTH;
                if life <= 0.0 {
                    *self = Self::spawn(rng, center);
                    StepOutcome::Respawned
                } else {
                    self.phase = Phase::Fading { life };
                    StepOutcome::Fading
                }
            }
        };

        if !self.is_finite() {
            log::warn!("Particle state went non-finite; respawning it");
            *self = Self::spawn(rng, center);
            return StepOutcome::Respawned;
        }

        outcome
    }
}

/// The fixed-size pool of everything orbiting (or just sitting around) the hole.
#[derive(Debug, Clone)]
pub struct ParticleField {
    center: Point3<f64>,
    stars: Vec<Star>,
    accretion: Vec<AccretionParticle>,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, num_stars: usize, num_accretion: usize) -> Self {
        let center = Point3::origin();
        let stars = (0..num_stars).map(|_| Star::random(rng)).collect();
        let accretion = (0..num_accretion)
            .map(|_| AccretionParticle::spawn(rng, &center))
            .collect();

        ParticleField {
            center,
            stars,
            accretion,
        }
    }

    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn accretion(&self) -> &[AccretionParticle] {
        &self.accretion
    }

    pub fn len(&self) -> usize {
        self.stars.len() + self.accretion.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Steps every accretion particle, and returns how many got respawned.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let center = self.center;
        self.accretion
            .iter_mut()
            .map(|p| p.step(rng, &center))
            .filter(|outcome| *outcome == StepOutcome::Respawned)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = rng();
        let center = Point3::origin();
        for _ in 0..1000 {
            let p = AccretionParticle::spawn(&mut rng, &center);
            let r_xy = p.position.xy().coords.norm();
            assert!((500.0..1500.0).contains(&r_xy), "r = {}", r_xy);
            assert!(p.position.z.abs() <= 0.3 * r_xy + 1e-9);
            assert!((1.5..3.5).contains(&p.size));
            assert!((0.9993..0.9997).contains(&p.spiral_factor()));
            assert_eq!(p.phase(), Phase::Orbiting);

            // Circular velocity, perpendicular to the radius
            approx::assert_relative_eq!(
                p.velocity.norm(),
                (G * M / r_xy).sqrt(),
                max_relative = 1e-12
            );
            approx::assert_abs_diff_eq!(
                p.velocity.dot(&p.position.coords),
                0.0,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_star_ranges() {
        let mut rng = rng();
        for _ in 0..1000 {
            let s = Star::random(&mut rng);
            assert!((500.0..4000.0).contains(&s.position.z));
            assert!(s.position.x.abs() <= 3000.0 && s.position.y.abs() <= 3000.0);
            assert!(s.size > 0.0);
            assert!(s.color[0] <= 220 && s.color[2] <= 255 && s.color[0] >= 65);
        }
    }

    #[test]
    fn test_single_step() {
        let mut rng = rng();
        let center = Point3::origin();
        let mut p = AccretionParticle::spawn(&mut rng, &center);
        p.position = Point3::new(1000.0, 0.0, 0.0);
        p.velocity = Vector3::new(0.0, 25.0, 0.0);
        p.spiral_factor = 0.9995;

        assert_eq!(p.step(&mut rng, &center), StepOutcome::Orbiting);

        // a = 800 * 1000 / 1000^2 = 0.8, towards -x
        let expected_v = Vector3::new(-0.8 * 0.02, 25.0, 0.0) * 0.9995;
        approx::assert_relative_eq!(p.velocity, expected_v);
        approx::assert_relative_eq!(
            p.position,
            Point3::new(1000.0, 0.0, 0.0) + expected_v * 0.02
        );
    }

    #[test]
    fn test_distance_floor() {
        // Sitting right on the center shouldn't blow up
        let mut rng = rng();
        let center = Point3::origin();
        let mut p = AccretionParticle::spawn(&mut rng, &center);
        p.position = center;
        p.velocity = Vector3::zeros();

        p.step(&mut rng, &center);
        assert!(p.is_finite());
    }

    #[test]
    fn test_fade_and_respawn() {
        let mut rng = rng();
        let center = Point3::origin();
        let mut p = AccretionParticle::spawn(&mut rng, &center);
        p.position = Point3::new(10.0, 0.0, 0.0);
        p.velocity = Vector3::zeros();
        let initial_size = p.size;

        // First step inside the horizon starts the fade
        assert_eq!(p.step(&mut rng, &center), StepOutcome::Fading);
        let mut prev_life = p.life();
        assert!(prev_life < 1.0);
        approx::assert_relative_eq!(p.size, initial_size * 1.05);

        let mut num_steps = 1;
        loop {
            let outcome = p.step(&mut rng, &center);
            num_steps += 1;
            match outcome {
                StepOutcome::Fading => {
                    assert!(p.life() < prev_life);
                    assert!(p.life() > 0.0);
                    prev_life = p.life();
                }
                StepOutcome::Respawned => break,
                StepOutcome::Orbiting => panic!("Particle stopped fading without respawning"),
            }
            assert!(num_steps < 100, "Particle never respawned");
        }

        // About 20 steps of 0.05
        assert!((20..=21).contains(&num_steps), "took {} steps", num_steps);
        assert_eq!(p.phase(), Phase::Orbiting);
        approx::assert_relative_eq!(p.life(), 1.0);
        let distance = (p.position - center).xy().norm();
        assert!((500.0..1500.0).contains(&distance));
    }

    #[test]
    fn test_field_invariants() {
        let mut rng = rng();
        let mut field = ParticleField::new(&mut rng, 20, 100);
        assert_eq!(field.len(), 120);

        for _ in 0..2000 {
            field.step(&mut rng);
            for p in field.accretion() {
                assert!((0.0..=1.0).contains(&p.life()));
                assert!(p.size > 0.0);
            }
        }
        assert_eq!(field.stars().len(), 20);
        assert_eq!(field.accretion().len(), 100);
    }
}
