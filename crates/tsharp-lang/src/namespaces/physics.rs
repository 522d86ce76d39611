//! Closed-form physics formulas and the trajectory generators.
//!
//! Trajectories are sampled analytically (no integration), emit one
//! `PointSeries` each, and print a one-line summary.

use std::f64::consts::{PI, TAU};

use crate::error::{Arity, ErrorKind, RunError};
use crate::runtime::output::PointSeries;
use crate::Value;
use super::{Export, NamespaceInfo, NamespaceProvider, RuntimeState, as_numbers, domain_err, f, finite, fmt2};

/// Standard gravity, m/s².
pub const G_EARTH: f64 = 9.81;
/// Newtonian constant of gravitation, m³/(kg·s²).
pub const G_NEWTON: f64 = 6.67430e-11;

const DT: f64 = 0.01;
const ORBIT_DT: f64 = 1.0;
const ORBIT_DURATION: f64 = 100.0;
const OSCILLATION_SPAN: f64 = 10.0;
/// Upper bound on points in one series.
pub const MAX_SAMPLES: usize = 10_000;

use Arity::{Exact, Range};

pub struct PhysicsNamespace;

impl NamespaceInfo for PhysicsNamespace {
    fn name(&self) -> &'static str { "physics" }

    fn exports(&self) -> Vec<Export> {
        vec![
            // Formulas
            f("velocity",                Exact(2)),
            f("acceleration",            Exact(3)),
            f("distance2d",              Exact(4)),
            f("distance3d",              Exact(6)),
            f("kineticEnergy",           Exact(2)),
            f("potentialEnergy",         Exact(2)),
            f("work",                    Range(2, 3)),
            f("power",                   Exact(2)),
            f("momentum",                Exact(2)),
            f("force",                   Exact(2)),
            f("centripetalAcceleration", Exact(2)),
            f("escapeVelocity",          Exact(2)),
            f("gravitationalForce",      Exact(3)),

            // Trajectories
            f("projectile", Range(2, 3)),
            f("freefall",   Exact(1)),
            f("orbit",      Range(2, 3)),
            f("spring",     Exact(2)),
            f("pendulum",   Exact(2)),
        ]
    }
}

impl NamespaceProvider for PhysicsNamespace {
    fn call(
        &self,
        name: &str,
        args: &[Value],
        state: &mut RuntimeState,
        line: usize,
    ) -> Result<Option<Value>, RunError> {
        let x = as_numbers(args, name, line)?;
        if x.iter().any(|v| !v.is_finite()) {
            return Err(domain_err(line, format!("`{name}` expects finite arguments")));
        }
        let div = |num: f64, den: f64| -> Result<f64, RunError> {
            if den == 0.0 { Err(RunError::new(line, ErrorKind::DivisionByZero)) } else { Ok(num / den) }
        };

        let result = match name {
            "velocity"        => div(x[0], x[1])?,
            "acceleration"    => div(x[0] - x[1], x[2])?,
            "distance2d"      => (x[2] - x[0]).hypot(x[3] - x[1]),
            "distance3d"      => {
                let (dx, dy, dz) = (x[3] - x[0], x[4] - x[1], x[5] - x[2]);
                (dx * dx + dy * dy + dz * dz).sqrt()
            }
            "kineticEnergy"   => 0.5 * x[0] * x[1] * x[1],
            "potentialEnergy" => x[0] * G_EARTH * x[1],
            "work"            => x[0] * x[1] * x.get(2).copied().unwrap_or(0.0).to_radians().cos(),
            "power"           => div(x[0], x[1])?,
            "momentum"        => x[0] * x[1],
            "force"           => x[0] * x[1],
            "centripetalAcceleration" => div(x[0] * x[0], x[1])?,
            "escapeVelocity"  => {
                let ratio = div(2.0 * G_NEWTON * x[0], x[1])?;
                if ratio < 0.0 {
                    return Err(domain_err(line, "escape velocity needs mass and radius of the same sign"));
                }
                ratio.sqrt()
            }
            "gravitationalForce" => div(G_NEWTON * x[0] * x[1], x[2] * x[2])?,

            "projectile" => projectile(x[0], x[1], x.get(2).copied().unwrap_or(0.0), state, line)?,
            "freefall"   => freefall(x[0], state, line)?,
            "orbit"      => orbit(x[0], x[1], x.get(2).copied().unwrap_or(ORBIT_DURATION), state, line)?,
            "spring"     => spring(x[0], x[1], state, line)?,
            "pendulum"   => pendulum(x[0], x[1], state, line)?,

            _ => return Ok(None),
        };
        finite(result, name, line).map(Some)
    }
}

// ─── Sampling ────────────────────────────────────────────────────────────────

/// Number of samples at `t = i·dt` with `t < span`, and the step to use,
/// widened so the count stays within `cap`.
fn sample_plan(span: f64, dt: f64, cap: usize) -> (usize, f64) {
    let n = (span / dt).ceil().max(0.0) as usize;
    if n > cap { (cap, span / cap as f64) } else { (n, dt) }
}

fn series(label: String, points: Vec<(f64, f64)>, params: &[(&str, f64)]) -> PointSeries {
    PointSeries {
        label,
        points,
        params: params.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
    }
}

/// Summary figures are checked before anything is emitted, so a failing
/// call leaves no series or summary behind.
fn summary_figures<const N: usize>(figures: [f64; N], callee: &str, line: usize) -> Result<(), RunError> {
    for x in figures {
        finite(x, callee, line)?;
    }
    Ok(())
}

fn require_positive(value: f64, what: &str, line: usize) -> Result<(), RunError> {
    if value > 0.0 { Ok(()) } else { Err(domain_err(line, format!("{what} must be positive"))) }
}

// ─── Trajectories ────────────────────────────────────────────────────────────

/// Returns the horizontal range.
fn projectile(v0: f64, angle_deg: f64, height: f64, state: &mut RuntimeState, line: usize) -> Result<f64, RunError> {
    if height < 0.0 {
        return Err(domain_err(line, "launch height cannot be negative"));
    }
    let theta = angle_deg.to_radians();
    let (vx, vy) = (v0 * theta.cos(), v0 * theta.sin());
    let flight = (vy + (vy * vy + 2.0 * G_EARTH * height).sqrt()) / G_EARTH;
    let range = vx * flight;
    let peak = if vy > 0.0 { height + vy * vy / (2.0 * G_EARTH) } else { height };
    summary_figures([range, peak, flight], "projectile", line)?;

    let (n, dt) = sample_plan(flight, DT, MAX_SAMPLES - 1);
    let mut points: Vec<(f64, f64)> = (0..n.max(1))
        .map(|i| {
            let t = i as f64 * dt;
            (vx * t, (height + vy * t - 0.5 * G_EARTH * t * t).max(0.0))
        })
        .collect();
    if flight > 0.0 {
        points.push((range, 0.0));
    }

    state.push_series(series(
        format!("Projectile v0={} m/s, θ={}°", fmt2(v0), fmt2(angle_deg)),
        points,
        &[("v0", v0), ("angle", angle_deg), ("height", height)],
    ));
    state.success(format!(
        "Projectile: range {} m, max height {} m, flight time {} s",
        fmt2(range), fmt2(peak), fmt2(flight)
    ));
    Ok(range)
}

/// Returns the time to reach the ground.
fn freefall(height: f64, state: &mut RuntimeState, line: usize) -> Result<f64, RunError> {
    if height < 0.0 {
        return Err(domain_err(line, "drop height cannot be negative"));
    }
    let fall = (2.0 * height / G_EARTH).sqrt();
    summary_figures([fall, G_EARTH * fall], "freefall", line)?;
    let (n, dt) = sample_plan(fall, DT, MAX_SAMPLES - 1);
    let mut points: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let t = i as f64 * dt;
            (t, (height - 0.5 * G_EARTH * t * t).max(0.0))
        })
        .collect();
    points.push((fall, 0.0));

    state.push_series(series(format!("Free fall from {} m", fmt2(height)), points, &[("height", height)]));
    state.success(format!(
        "Free fall: height {} m, time {} s, impact speed {} m/s",
        fmt2(height), fmt2(fall), fmt2(G_EARTH * fall)
    ));
    Ok(fall)
}

/// Circular orbit; returns the period.
fn orbit(radius: f64, mass: f64, duration: f64, state: &mut RuntimeState, line: usize) -> Result<f64, RunError> {
    require_positive(radius, "orbit radius", line)?;
    require_positive(mass, "central mass", line)?;
    require_positive(duration, "orbit duration", line)?;

    let speed = (G_NEWTON * mass / radius).sqrt();
    let omega = speed / radius;
    let period = TAU / omega;
    summary_figures([speed, period], "orbit", line)?;

    let (n, dt) = sample_plan(duration, ORBIT_DT, MAX_SAMPLES);
    let points = (0..n)
        .map(|i| {
            let angle = omega * i as f64 * dt;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect();

    state.push_series(series(
        format!("Orbit r={} m", fmt2(radius)),
        points,
        &[("radius", radius), ("mass", mass), ("duration", duration)],
    ));
    state.success(format!(
        "Orbit: radius {} m, speed {} m/s, period {} s",
        fmt2(radius), fmt2(speed), fmt2(period)
    ));
    Ok(period)
}

/// Samples `t` over `[0, OSCILLATION_SPAN]` inclusive.
fn oscillation_times() -> impl Iterator<Item = f64> {
    let n = (OSCILLATION_SPAN / DT).round() as usize;
    (0..=n).map(|i| i as f64 * DT)
}

/// Simple harmonic motion `x = A·cos(2πft)`; returns the period.
fn spring(amplitude: f64, frequency: f64, state: &mut RuntimeState, line: usize) -> Result<f64, RunError> {
    require_positive(frequency, "spring frequency", line)?;
    let omega = TAU * frequency;
    let period = 1.0 / frequency;
    summary_figures([omega, period], "spring", line)?;
    let points = oscillation_times().map(|t| (t, amplitude * (omega * t).cos())).collect();

    state.push_series(series(
        format!("Spring A={} m, f={} Hz", fmt2(amplitude), fmt2(frequency)),
        points,
        &[("amplitude", amplitude), ("frequency", frequency)],
    ));
    state.success(format!(
        "Spring: amplitude {} m, frequency {} Hz, period {} s",
        fmt2(amplitude), fmt2(frequency), fmt2(period)
    ));
    Ok(period)
}

/// Small-angle pendulum; samples are `(t, angle in degrees)`. Returns the period.
fn pendulum(length: f64, angle0_deg: f64, state: &mut RuntimeState, line: usize) -> Result<f64, RunError> {
    require_positive(length, "pendulum length", line)?;
    let omega = (G_EARTH / length).sqrt();
    let period = 2.0 * PI * (length / G_EARTH).sqrt();
    summary_figures([omega, period], "pendulum", line)?;
    let points = oscillation_times().map(|t| (t, angle0_deg * (omega * t).cos())).collect();

    state.push_series(series(
        format!("Pendulum L={} m, θ0={}°", fmt2(length), fmt2(angle0_deg)),
        points,
        &[("length", length), ("angle0", angle0_deg)],
    ));
    state.success(format!(
        "Pendulum: length {} m, amplitude {}°, period {} s",
        fmt2(length), fmt2(angle0_deg), fmt2(period)
    ));
    Ok(period)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::super::test_support::{call_with, err_name, num};
    use super::*;

    fn run(name: &str, args: &[f64]) -> (f64, RuntimeState) {
        let mut state = RuntimeState::default();
        let args: Vec<Value> = args.iter().map(|x| Value::Number(*x)).collect();
        match call_with(&mut state, name, &args) {
            Ok(Value::Number(x)) => (x, state),
            other => panic!("`{name}` returned {other:?}"),
        }
    }

    fn close(a: f64, b: f64, tol: f64) -> bool { (a - b).abs() <= tol }

    #[test]
    fn formulas() {
        assert_eq!(num("velocity", &[100.0, 20.0]), 5.0);
        assert_eq!(num("acceleration", &[30.0, 10.0, 4.0]), 5.0);
        assert_eq!(num("distance2d", &[0.0, 0.0, 3.0, 4.0]), 5.0);
        assert_eq!(num("distance3d", &[0.0, 0.0, 0.0, 2.0, 3.0, 6.0]), 7.0);
        assert_eq!(num("kineticEnergy", &[2.0, 3.0]), 9.0);
        assert!(close(num("potentialEnergy", &[2.0, 10.0]), 196.2, 1e-9));
        assert_eq!(num("power", &[100.0, 4.0]), 25.0);
        assert_eq!(num("momentum", &[3.0, 4.0]), 12.0);
        assert_eq!(num("force", &[3.0, 4.0]), 12.0);
        assert_eq!(num("centripetalAcceleration", &[10.0, 5.0]), 20.0);
    }

    #[test]
    fn work_angle_defaults_to_zero() {
        assert_eq!(num("work", &[10.0, 5.0]), 50.0);
        assert!(close(num("work", &[10.0, 5.0, 60.0]), 25.0, 1e-9));
        assert!(close(num("work", &[10.0, 5.0, 90.0]), 0.0, 1e-9));
    }

    #[test]
    fn gravity_formulas() {
        // Earth: ~11.2 km/s
        let v = num("escapeVelocity", &[5.972e24, 6.371e6]);
        assert!(close(v, 11_186.0, 5.0), "got {v}");
        assert!(close(num("gravitationalForce", &[1.0, 1.0, 1.0]), G_NEWTON, 1e-20));
    }

    #[test]
    fn zero_divisors() {
        assert_eq!(err_name("velocity", &[1.0, 0.0]), "DivisionByZero");
        assert_eq!(err_name("power", &[1.0, 0.0]), "DivisionByZero");
        assert_eq!(err_name("centripetalAcceleration", &[1.0, 0.0]), "DivisionByZero");
        assert_eq!(err_name("gravitationalForce", &[1.0, 1.0, 0.0]), "DivisionByZero");
        assert_eq!(err_name("escapeVelocity", &[1.0, 0.0]), "DivisionByZero");
    }

    #[test]
    fn projectile_lands_at_analytic_range() {
        let (range, state) = run("projectile", &[30.0, 45.0, 0.0]);
        let expected = 30.0 * 30.0 * (90f64).to_radians().sin() / G_EARTH;
        assert!(close(range, expected, 1e-9));

        let s = &state.series[0];
        assert_eq!(s.points[0], (0.0, 0.0));
        let last = *s.points.last().unwrap();
        assert!(close(last.0, expected, 1e-9));
        assert_eq!(last.1, 0.0);
        assert!(s.points.iter().all(|p| p.1 >= 0.0));
        assert!(s.points.len() <= MAX_SAMPLES);
        assert_eq!(state.output[0].severity, crate::runtime::output::Severity::Success);
        assert!(state.output[0].text.starts_with("Projectile: range 91.74 m"));
    }

    #[test]
    fn projectile_height_is_optional() {
        let (a, _) = run("projectile", &[20.0, 30.0]);
        let (b, _) = run("projectile", &[20.0, 30.0, 0.0]);
        assert_eq!(a, b);
        let (elevated, state) = run("projectile", &[20.0, 30.0, 10.0]);
        assert!(elevated > a);
        assert_eq!(state.series[0].points[0], (0.0, 10.0));
    }

    #[test]
    fn projectile_negative_height() {
        assert_eq!(err_name("projectile", &[10.0, 45.0, -1.0]), "MathDomainError");
    }

    #[test]
    fn overflowing_trajectory_emits_nothing() {
        let mut state = RuntimeState::default();
        let args = [Value::Number(1e200), Value::Number(45.0)];
        let err = call_with(&mut state, "projectile", &args).unwrap_err();
        assert_eq!(err.name(), "MathDomainError");
        assert!(state.series.is_empty());
        assert!(state.output.is_empty());

        let err = call_with(&mut state, "spring", &[Value::Number(1.0), Value::Number(1e-320)]).unwrap_err();
        assert_eq!(err.name(), "MathDomainError");
        assert!(state.series.is_empty());
        assert!(state.output.is_empty());
    }

    #[test]
    fn huge_flight_is_capped() {
        let (_, state) = run("projectile", &[5000.0, 89.0, 0.0]);
        assert!(state.series[0].points.len() <= MAX_SAMPLES);
    }

    #[test]
    fn freefall_time() {
        let (t, state) = run("freefall", &[19.62]);
        assert!(close(t, 2.0, 1e-12));
        let s = &state.series[0];
        assert_eq!(s.points[0], (0.0, 19.62));
        assert_eq!(*s.points.last().unwrap(), (t, 0.0));
        assert_eq!(err_name("freefall", &[-5.0]), "MathDomainError");
    }

    #[test]
    fn orbit_period_and_radius() {
        let (period, state) = run("orbit", &[7.0e6, 5.972e24, 300.0]);
        assert!(close(period, 5828.5, 1.0), "got {period}");
        let s = &state.series[0];
        assert_eq!(s.points.len(), 300);
        assert!(s.points.iter().all(|&(x, y)| close(x.hypot(y), 7.0e6, 1e-3)));
        assert_eq!(err_name("orbit", &[0.0, 1.0]), "MathDomainError");
    }

    #[test]
    fn spring_and_pendulum_span_ten_seconds() {
        let (period, state) = run("spring", &[0.5, 2.0]);
        assert_eq!(period, 0.5);
        let s = &state.series[0];
        assert_eq!(s.points.len(), 1001);
        assert_eq!(s.points[0], (0.0, 0.5));
        assert!(close(s.points.last().unwrap().0, 10.0, 1e-9));

        let (period, state) = run("pendulum", &[1.0, 10.0]);
        assert!(close(period, 2.006, 1e-3));
        assert_eq!(state.series[0].points[0], (0.0, 10.0));
        assert_eq!(err_name("pendulum", &[0.0, 10.0]), "MathDomainError");
        assert_eq!(err_name("spring", &[1.0, 0.0]), "MathDomainError");
    }
}
