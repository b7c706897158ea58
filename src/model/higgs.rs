use nalgebra::{Point3, Vector3};
use rand::Rng;

use crate::math::geometry::clip_magnitude;
use crate::math::stats::percentile;

/// Knobs for the Higgs field toy. Times are in seconds of simulation time.
#[derive(Debug, Clone, PartialEq)]
pub struct HiggsParams {
    pub num_particles: usize,
    pub box_size: f64,
    pub mu: f64,
    pub lambda: f64,
    pub field_strength: f64,
    pub tick: f64,
    pub position_step: f64,
    pub min_velocity: f64,
    pub max_velocity: f64,
    pub boost_duration: f64,
    pub boost_factor: f64,
    pub decay_rate: f64,
    pub revival_interval: f64,
    pub revival_velocity: f64,
    pub bounce_damping: f64,
    pub light_percentile: f64,
}

impl Default for HiggsParams {
    fn default() -> Self {
        HiggsParams {
            num_particles: 50,
            box_size: 10.0,
            mu: 1.0,
            lambda: 1.0,
            field_strength: 5.0,
            tick: 0.05,
            position_step: 0.1,
            min_velocity: 0.2,
            max_velocity: 8.0,
            boost_duration: 0.4,
            boost_factor: 2.2,
            decay_rate: 0.98,
            revival_interval: 5.0,
            revival_velocity: 4.0,
            bounce_damping: 0.9,
            light_percentile: 25.0,
        }
    }
}

impl HiggsParams {
    /// Drag felt by a particle of the given mass, from the Mexican-hat potential
    /// V(phi) = -mu^2 phi^2 + lambda phi^4, evaluated at phi = mass.
    pub fn resistance(&self, mass: f64) -> f64 {
        let potential = -self.mu.powi(2) * mass.powi(2) + self.lambda * mass.powi(4);
        let potential = if potential == 0.0 { 1.0 } else { potential };
        nalgebra::clamp(self.field_strength / potential, 0.1, 100.0)
    }

    fn ticks_per_revival(&self) -> u64 {
        (self.revival_interval / self.tick).round().max(1.0) as u64
    }

    fn boost_ticks(&self) -> u64 {
        (self.boost_duration / self.tick).round() as u64
    }
}

#[derive(Debug, Clone)]
pub struct HiggsParticle {
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    pub mass: f64,
    pub visible: bool,
}

impl HiggsParticle {
    pub fn is_light(&self, threshold: f64) -> bool {
        self.mass < threshold
    }
}

pub struct HiggsField {
    params: HiggsParams,
    particles: Vec<HiggsParticle>,
    light_threshold: f64,
    ticks: u64,
}

fn random_vector<R: Rng + ?Sized>(rng: &mut R, half_width: f64) -> Vector3<f64> {
    Vector3::from_fn(|_, _| rng.gen_range(-half_width..half_width))
}

impl HiggsField {
    pub fn new<R: Rng + ?Sized>(params: HiggsParams, rng: &mut R) -> Self {
        let particles: Vec<_> = (0..params.num_particles)
            .map(|_| HiggsParticle {
                position: Point3::from(Vector3::from_fn(|_, _| {
                    rng.gen_range(0.0..params.box_size)
                })),
                velocity: random_vector(rng, 1.0),
                mass: rng.gen_range(0.5..2.5),
                visible: true,
            })
            .collect();

        let masses: Vec<f64> = particles.iter().map(|p| p.mass).collect();
        let light_threshold = percentile(&masses, params.light_percentile).unwrap_or(0.0);

        HiggsField {
            params,
            particles,
            light_threshold,
            ticks: 0,
        }
    }

    pub fn params(&self) -> &HiggsParams {
        &self.params
    }

    pub fn particles(&self) -> &[HiggsParticle] {
        &self.particles
    }

    pub fn light_threshold(&self) -> f64 {
        self.light_threshold
    }

    pub fn time(&self) -> f64 {
        self.ticks as f64 * self.params.tick
    }

    pub fn num_visible(&self) -> usize {
        self.particles.iter().filter(|p| p.visible).count()
    }

    /// Mass range, for coloring.
    pub fn mass_range(&self) -> (f64, f64) {
        self.particles
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.mass), hi.max(p.mass))
            })
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.ticks += 1;
        let params = &self.params;
        let phase = self.ticks % params.ticks_per_revival();

        // Every so often, the light particles come back with a kick
        if phase == 0 {
            let mut num_revived = 0;
            for p in self.particles.iter_mut() {
                if p.is_light(self.light_threshold) {
                    p.visible = true;
                    let v = random_vector(rng, params.revival_velocity / 2.0);
                    p.velocity = clip_magnitude(v, params.max_velocity);
                    num_revived += 1;
                }
            }
            log::debug!(
                "t = {:.2}: revived {} light particles",
                self.time(),
                num_revived
            );
        }
        let boosting = phase < params.boost_ticks();

        for p in self.particles.iter_mut().filter(|p| p.visible) {
            let drag = params.resistance(p.mass);
            p.velocity *= 1.0 - nalgebra::clamp(drag * 0.1, 0.0, 1.0);

            if p.is_light(self.light_threshold) {
                p.velocity *= params.decay_rate;
                if boosting {
                    let boosted = p.velocity * params.boost_factor;
                    p.velocity = clip_magnitude(boosted, params.max_velocity);
                }
                if p.velocity.norm() < params.min_velocity {
                    p.visible = false;
                }
            }

            p.velocity = clip_magnitude(p.velocity, params.max_velocity);

            // Bounce off the walls, losing a bit of energy
            for axis in 0..3 {
                if p.position[axis] < 0.0 {
                    p.position[axis] = 0.1;
                    p.velocity[axis] = p.velocity[axis].abs() * params.bounce_damping;
                } else if p.position[axis] > params.box_size {
                    p.position[axis] = params.box_size - 0.1;
                    p.velocity[axis] = -p.velocity[axis].abs() * params.bounce_damping;
                }
            }

            p.position += p.velocity * params.position_step;
        }
    }
}
