use nalgebra::{Point2, Vector6};

use crate::error::ConfigError;
use crate::math::ode::integrate_fixed;

// Geometrized units
pub const G: f64 = 1.0;
pub const M: f64 = 1.0;
pub const C: f64 = 1.0;

// Keeps the polar equation away from the poles
const MIN_SIN_THETA: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// Black hole at rest.
    Stationary,
    /// Black hole moving along x at half the speed of light.
    Boosted,
}

impl Variant {
    pub fn boost(self) -> f64 {
        match self {
            Variant::Stationary => 0.0,
            Variant::Boosted => 0.5,
        }
    }
}

/// Everything needed to set up and solve the orbit. State is (r, theta, phi)
/// and their derivatives with respect to proper time.
#[derive(Debug, Clone, PartialEq)]
pub struct GeodesicParams {
    pub boost: f64,
    pub drag: f64,
    pub r0: f64,
    pub theta0: f64,
    pub phi0: f64,
    pub dr0: f64,
    pub dtheta0: f64,
    pub dphi0: f64,
    pub end_time: f64,
    pub num_samples: usize,
    pub substeps: usize,
}

impl GeodesicParams {
    /// Describes the black hole by whether it's actually moving, whatever
    /// variant the parameters started from.
    pub fn title(&self) -> &'static str {
        if self.boost == 0.0 {
            "Spiral Orbit Around a Stationary Black Hole"
        } else {
            "Spiral Orbit Around a Moving Black Hole"
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        GeodesicParams {
            boost: variant.boost(),
            drag: 0.01,
            r0: 10.0,
            theta0: std::f64::consts::FRAC_PI_2,
            phi0: 0.0,
            dr0: -0.1,
            dtheta0: 0.0,
            dphi0: 0.8,
            end_time: 200.0,
            num_samples: 1000,
            substeps: 10,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.boost.abs() < C) {
            return Err(ConfigError::Superluminal(self.boost));
        }
        let horizon = self.horizon_radius();
        if !(self.r0 > horizon) {
            return Err(ConfigError::StartsInsideHorizon {
                r0: self.r0,
                horizon,
            });
        }
        if self.num_samples < 2 {
            return Err(ConfigError::TooFewSamples(self.num_samples));
        }
        if !(self.end_time > 0.0 && self.end_time.is_finite()) {
            return Err(ConfigError::BadEndTime(self.end_time));
        }
        if self.substeps == 0 {
            return Err(ConfigError::NoSubsteps);
        }
        Ok(())
    }

    pub fn lorentz_factor(&self) -> f64 {
        1.0 / (1.0 - (self.boost / C).powi(2)).sqrt()
    }

    /// Schwarzschild radius, 2GM/c^2.
    pub fn horizon_radius(&self) -> f64 {
        2.0 * G * M / (C * C)
    }

    pub fn initial_state(&self) -> Vector6<f64> {
        Vector6::new(
            self.r0,
            self.theta0,
            self.phi0,
            self.dr0,
            self.dtheta0,
            self.dphi0,
        )
    }

    /// Right-hand side of the equations of motion. The radial pull is weakened
    /// along the direction the hole is moving in.
    pub fn derivative(&self, y: &Vector6<f64>) -> Vector6<f64> {
        let (r, theta, phi) = (y[0], y[1], y[2]);
        let (dr, dtheta, dphi) = (y[3], y[4], y[5]);

        let gamma = self.lorentz_factor();
        let x = r * theta.sin() * phi.cos();
        let boost_term = gamma * gamma * (x * self.boost / r).powi(2);
        let d2r = -G * M / (r * r) / (1.0 + boost_term) - self.drag * dr * dr;

        let sin_theta = theta.sin();
        let sin_theta = if sin_theta.abs() < MIN_SIN_THETA {
            MIN_SIN_THETA.copysign(sin_theta)
        } else {
            sin_theta
        };
        let d2theta = dphi * dphi * theta.cos() / sin_theta;
        let d2phi = 0.0;

        Vector6::new(dr, dtheta, dphi, d2r, d2theta, d2phi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSample {
    pub tau: f64,
    pub r: f64,
    pub phi: f64,
}

impl OrbitSample {
    /// Position in the orbital plane.
    pub fn to_cartesian(&self) -> Point2<f64> {
        Point2::new(self.r * self.phi.cos(), self.r * self.phi.sin())
    }
}

/// A pre-solved orbit, sampled on an even grid of proper times.
#[derive(Debug, Clone)]
pub struct Trajectory {
    samples: Vec<OrbitSample>,
    capture_time: Option<f64>,
}

impl Trajectory {
    pub fn solve(params: &GeodesicParams) -> Result<Self, ConfigError> {
        params.validate()?;

        let horizon = params.horizon_radius();
        let mut capture_time = None;
        let raw = integrate_fixed(
            |_t, y| params.derivative(y),
            params.initial_state(),
            0.0,
            params.end_time,
            params.num_samples,
            params.substeps,
            |t, y| {
                if y[0] < horizon {
                    capture_time = Some(t);
                    return false;
                }
                y.iter().all(|v| v.is_finite())
            },
        );

        let samples: Vec<_> = raw
            .into_iter()
            .filter(|(_, y)| y.iter().all(|v| v.is_finite()))
            .map(|(tau, y)| OrbitSample {
                tau,
                r: y[0],
                phi: y[2],
            })
            .collect();

        match capture_time {
            Some(t) => log::info!("Orbit crossed the horizon at tau = {:.2}", t),
            None => log::info!("Orbit survived until tau = {}", params.end_time),
        }

        Ok(Trajectory {
            samples,
            capture_time,
        })
    }

    pub fn samples(&self) -> &[OrbitSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Proper time at which the orbit fell inside the horizon, if it did.
    pub fn capture_time(&self) -> Option<f64> {
        self.capture_time
    }

    pub fn max_radius(&self) -> f64 {
        self.samples.iter().map(|s| s.r).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lorentz_factor() {
        let params = GeodesicParams::for_variant(Variant::Boosted);
        approx::assert_relative_eq!(params.lorentz_factor(), 1.0 / 0.75f64.sqrt());
        let params = GeodesicParams::for_variant(Variant::Stationary);
        approx::assert_relative_eq!(params.lorentz_factor(), 1.0);
    }

    #[test]
    fn test_derivative() {
        let params = GeodesicParams::for_variant(Variant::Stationary);
        let d = params.derivative(&params.initial_state());

        // -1/100 - 0.01 * 0.01
        approx::assert_relative_eq!(d[3], -0.01 - 0.0001, max_relative = 1e-12);
        approx::assert_abs_diff_eq!(d[4], 0.0, epsilon = 1e-15);
        approx::assert_relative_eq!(d[2], 0.8);

        // At phi = 0 the boosted hole pulls less
        let boosted = GeodesicParams::for_variant(Variant::Boosted);
        let d_boosted = boosted.derivative(&boosted.initial_state());
        assert!(d_boosted[3].abs() < d[3].abs());
    }

    #[test]
    fn test_title_follows_boost() {
        let stationary = GeodesicParams::for_variant(Variant::Stationary);
        assert_eq!(
            stationary.title(),
            "Spiral Orbit Around a Stationary Black Hole"
        );

        let nudged = GeodesicParams {
            boost: 0.3,
            ..stationary
        };
        assert_eq!(nudged.title(), "Spiral Orbit Around a Moving Black Hole");

        let stopped = GeodesicParams {
            boost: 0.0,
            ..GeodesicParams::for_variant(Variant::Boosted)
        };
        assert_eq!(
            stopped.title(),
            "Spiral Orbit Around a Stationary Black Hole"
        );
    }

    #[test]
    fn test_pole_is_finite() {
        let params = GeodesicParams::for_variant(Variant::Stationary);
        let mut y = params.initial_state();
        y[1] = 0.0;
        let d = params.derivative(&y);
        assert!(d.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_stationary_capture() {
        let params = GeodesicParams::for_variant(Variant::Stationary);
        let trajectory = Trajectory::solve(&params).unwrap();

        let capture = trajectory.capture_time().expect("orbit should fall in");
        assert!(capture > 10.0 && capture < 100.0, "captured at {}", capture);
        assert!(trajectory.len() < 1000);
        approx::assert_relative_eq!(trajectory.max_radius(), 10.0);

        // phi just winds at a constant rate, and r only goes down
        for s in trajectory.samples() {
            approx::assert_relative_eq!(s.phi, 0.8 * s.tau, max_relative = 1e-9);
        }
        for pair in trajectory.samples().windows(2) {
            assert!(pair[1].r < pair[0].r);
        }
        let last = trajectory.samples().last().unwrap();
        assert!(last.r < 2.0);
    }

    #[test]
    fn test_boost_delays_capture() {
        let stationary =
            Trajectory::solve(&GeodesicParams::for_variant(Variant::Stationary)).unwrap();
        let boosted = Trajectory::solve(&GeodesicParams::for_variant(Variant::Boosted)).unwrap();
        assert!(boosted.capture_time().unwrap() >= stationary.capture_time().unwrap());
    }

    #[test]
    fn test_validation() {
        let base = GeodesicParams::for_variant(Variant::Stationary);

        let params = GeodesicParams {
            boost: 1.0,
            ..base.clone()
        };
        assert_eq!(params.validate(), Err(ConfigError::Superluminal(1.0)));

        let params = GeodesicParams {
            r0: 1.5,
            ..base.clone()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::StartsInsideHorizon {
                r0: 1.5,
                horizon: 2.0
            })
        );

        let params = GeodesicParams {
            num_samples: 1,
            ..base.clone()
        };
        assert!(Trajectory::solve(&params).is_err());

        let params = GeodesicParams {
            end_time: f64::NAN,
            ..base.clone()
        };
        assert!(matches!(params.validate(), Err(ConfigError::BadEndTime(_))));

        let params = GeodesicParams {
            substeps: 0,
            ..base
        };
        assert_eq!(params.validate(), Err(ConfigError::NoSubsteps));
    }

    #[test]
    fn test_to_cartesian() {
        let s = OrbitSample {
            tau: 0.0,
            r: 2.0,
            phi: std::f64::consts::FRAC_PI_2,
        };
        approx::assert_relative_eq!(s.to_cartesian(), Point2::new(0.0, 2.0), epsilon = 1e-12);
    }
}
