use crate::core::data::complex::Complex;
use crate::core::data::iteration_buffer::Escape;
use crate::core::fractals::fractal_kind::FractalKind;
use thiserror::Error;

pub const ESCAPE_RADIUS: f64 = 2.0;

/// The orbit left the finite numbers, e.g. zero raised to a negative power.
#[derive(Debug, Copy, Clone, PartialEq, Error)]
#[error("orbit became non-finite at iteration {iteration}: ({}, {})", .z.real, .z.imag)]
pub struct NumericAnomaly {
    pub iteration: u32,
    pub z: Complex,
}

/// Radius past which an orbit is known to diverge.
///
/// 2.0 is only a guarantee for squaring; other powers use `max(2, |c| + 2)`.
#[must_use]
pub fn escape_radius(power: f64, c: Complex) -> f64 {
    if power.abs() == 2.0 {
        ESCAPE_RADIUS
    } else {
        ESCAPE_RADIUS.max(c.magnitude() + 2.0)
    }
}

fn smoothed_value(iteration: u32, z: Complex, radius: f64, power: f64) -> f64 {
    let iterations = f64::from(iteration);
    let log_power = power.abs().ln();

    // |power| <= 1 has no meaningful continuous correction
    if log_power <= f64::EPSILON {
        return iterations;
    }

    let smoothed = iterations - (z.magnitude().ln() / radius.ln()).ln() / log_power;

    if smoothed.is_finite() {
        smoothed
    } else {
        iterations
    }
}

/// Iterates one plane point.
///
/// The escape test runs before each update and once more after the last
/// one, so at most `max_iterations` updates happen, an orbit leaving on the
/// final update still counts as escaped, and `iterations == 0` only when the
/// starting value is already outside the radius.
pub fn evaluate(
    point: Complex,
    kind: FractalKind,
    julia_constant: Complex,
    power: f64,
    max_iterations: u32,
) -> Result<Escape, NumericAnomaly> {
    let (mut z, c) = kind.initial_state(point, julia_constant);
    let radius = escape_radius(power, c);
    let radius_squared = radius * radius;

    for iteration in 0..max_iterations {
        if z.magnitude_squared() > radius_squared {
            return Ok(Escape::escaped(
                iteration,
                smoothed_value(iteration, z, radius, power),
            ));
        }

        z = kind.step(z, c, power);

        if !z.is_finite() {
            return Err(NumericAnomaly {
                iteration: iteration + 1,
                z,
            });
        }
    }

    if z.magnitude_squared() > radius_squared {
        return Ok(Escape::escaped(
            max_iterations,
            smoothed_value(max_iterations, z, radius, power),
        ));
    }

    Ok(Escape::interior(max_iterations))
}

#[cfg(test)]
mod tests {
    use super::*;

    const JULIA_C: Complex = Complex {
        real: -0.4,
        imag: 0.6,
    };

    #[test]
    fn origin_is_inside_the_main_cardioid() {
        let result = evaluate(Complex::ZERO, FractalKind::Mandelbrot, JULIA_C, 2.0, 100).unwrap();

        assert!(!result.escaped);
        assert_eq!(result.iterations, 100);
    }

    #[test]
    fn far_julia_point_escapes_immediately() {
        let result =
            evaluate(Complex::new(2.0, 2.0), FractalKind::Julia, JULIA_C, 2.0, 100).unwrap();

        assert!(result.escaped);
        assert!(result.iterations <= 2);
    }

    #[test]
    fn mandelbrot_point_outside_set_escapes_after_updates() {
        let result =
            evaluate(Complex::new(1.0, 1.0), FractalKind::Mandelbrot, JULIA_C, 2.0, 100).unwrap();

        // 0 -> 1+i -> 1+3i, |1+3i| > 2
        assert!(result.escaped);
        assert_eq!(result.iterations, 2);
    }

    #[test]
    fn escape_on_the_final_update_is_not_interior() {
        let result =
            evaluate(Complex::new(1.0, 1.0), FractalKind::Mandelbrot, JULIA_C, 2.0, 2).unwrap();

        // 0 -> 1+i -> 1+3i leaves on update 2 of 2
        assert!(result.escaped);
        assert_eq!(result.iterations, 2);
        assert!(result.smoothed.is_finite());
    }

    #[test]
    fn orbit_still_inside_after_the_last_update_is_interior() {
        let result =
            evaluate(Complex::new(1.0, 1.0), FractalKind::Mandelbrot, JULIA_C, 2.0, 1).unwrap();

        // 0 -> 1+i, |1+i| < 2
        assert!(!result.escaped);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn escape_at_iteration_zero_requires_starting_outside_radius() {
        for kind in FractalKind::ALL.iter().copied() {
            for &point in &[
                Complex::new(1.5, 0.5),
                Complex::new(-1.9, 0.0),
                Complex::new(3.0, -3.0),
                Complex::new(0.1, 0.2),
            ] {
                let result = evaluate(point, kind, JULIA_C, 2.0, 50).unwrap();
                let (z0, _) = kind.initial_state(point, JULIA_C);

                if result.escaped && result.iterations == 0 {
                    assert!(z0.magnitude() > ESCAPE_RADIUS, "{} at {:?}", kind, point);
                }
            }
        }
    }

    #[test]
    fn never_iterates_past_the_limit() {
        for kind in FractalKind::ALL.iter().copied() {
            for power in [2.0, 3.0, 2.5, -2.0, 0.5] {
                for i in 0..20 {
                    let point = Complex::new(-2.0 + 0.21 * f64::from(i), 1.3 - 0.13 * f64::from(i));

                    if let Ok(result) = evaluate(point, kind, JULIA_C, power, 37) {
                        assert!(result.iterations <= 37);
                        if !result.escaped {
                            assert_eq!(result.iterations, 37);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let point = Complex::new(-0.7435, 0.1314);

        for kind in FractalKind::ALL.iter().copied() {
            let first = evaluate(point, kind, JULIA_C, 2.7, 500);
            let second = evaluate(point, kind, JULIA_C, 2.7, 500);

            assert_eq!(first, second);
        }
    }

    #[test]
    fn smoothed_value_sits_just_below_the_integer_count() {
        let result =
            evaluate(Complex::new(0.4, 0.4), FractalKind::Mandelbrot, JULIA_C, 2.0, 100).unwrap();

        assert!(result.escaped);
        assert!(result.smoothed <= f64::from(result.iterations));
        assert!(result.smoothed > f64::from(result.iterations) - 1.5);
    }

    #[test]
    fn radius_grows_with_c_for_other_powers() {
        assert_eq!(escape_radius(2.0, Complex::new(5.0, 0.0)), 2.0);
        assert_eq!(escape_radius(3.0, Complex::new(0.0, 0.0)), 2.0);
        assert_eq!(escape_radius(3.0, Complex::new(3.0, 4.0)), 7.0);
    }

    #[test]
    fn zero_to_negative_power_is_an_anomaly() {
        let result = evaluate(Complex::new(0.3, 0.3), FractalKind::Mandelbrot, JULIA_C, -1.5, 100);

        assert_eq!(result.map_err(|anomaly| anomaly.iteration), Err(1));
    }

    #[test]
    fn julia_with_negative_power_away_from_zero_is_finite() {
        let result = evaluate(Complex::new(1.0, 1.0), FractalKind::Julia, JULIA_C, -2.0, 50);

        assert!(result.is_ok());
    }
}
