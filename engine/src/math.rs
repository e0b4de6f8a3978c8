//! Scalar Math Helpers
//!
//! Small interpolation and smoothing functions shared by the camera guard and
//! the locomotion controller. Everything here is a pure function of its inputs
//! so both controllers stay deterministic for a fixed tick duration.

/// Linear interpolation with `t` clamped to [0, 1].
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Wrap `t` into the range [0, length).
///
/// Unlike `%`, negative inputs wrap to the positive side:
/// `repeat(-0.25, 1.0) == 0.75`.
pub fn repeat(t: f32, length: f32) -> f32 {
    (t - (t / length).floor() * length).clamp(0.0, length)
}

/// Clamp that tolerates `min > max`.
///
/// `f32::clamp` panics on an inverted range. Configurations such as a probe
/// radius larger than the closest allowed camera distance can produce one at
/// runtime; in that case the lower bound wins.
pub fn clamp_unordered(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Critically damped spring toward `target`.
///
/// Moves `current` toward `target` over roughly `smooth_time` seconds without
/// overshooting. `velocity` carries the spring state between calls and must be
/// owned by the caller.
///
/// # Arguments
/// * `current` - Current value
/// * `target` - Value to approach
/// * `velocity` - Spring velocity, updated in place
/// * `smooth_time` - Approximate time to reach the target in seconds
/// * `dt` - Tick duration in seconds
///
/// # Returns
/// The new value. A non-positive `dt` leaves both value and velocity untouched.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;

    // Pade approximation of exp(-omega * dt)
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;

    let mut output = target + (change + temp) * decay;

    // Never step past the target
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }

    output
}
