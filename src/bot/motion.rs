//! Cursor motion: jitter, direct moves and human-like curves

use rand::Rng;

use crate::config::Span;
use crate::error::BotResult;
use crate::input::InputDevice;
use crate::screen_reader::Position;

/// Decides how the cursor travels to a target
#[derive(Debug, Clone, Copy)]
pub struct MotionPlanner {
    human_like: bool,
    speed: Span<f64>,
    curvature: Span<f64>,
}

impl MotionPlanner {
    pub fn new(human_like: bool, speed: Span<f64>, curvature: Span<f64>) -> Self {
        Self {
            human_like,
            speed,
            curvature,
        }
    }

    /// Move to `target`, perturbed by up to `jitter` pixels on each axis.
    /// Returns the point actually moved to.
    pub fn move_to(
        &self,
        device: &mut dyn InputDevice,
        target: Position,
        jitter_radius: Option<u32>,
    ) -> BotResult<Position> {
        let target = match jitter_radius {
            Some(r) => jitter(target, r),
            None => target,
        };

        if self.human_like {
            let mut curvature = self.curvature.sample();
            if rand::rng().random_bool(0.5) {
                curvature = -curvature;
            }
            device.move_curve_to(target, self.speed.sample(), curvature)?;
        } else {
            device.move_to(target)?;
        }
        Ok(target)
    }
}

/// Uniform integer offset in `[-radius, radius]` on both axes
pub fn jitter(target: Position, radius: u32) -> Position {
    if radius == 0 {
        return target;
    }
    let r = radius as i32;
    let mut rng = rand::rng();
    target.offset(rng.random_range(-r..=r), rng.random_range(-r..=r))
}

/// Points of a quadratic Bézier from `from` to `to`.
///
/// The control point sits on the perpendicular through the midpoint,
/// `curvature` percent of the path length away; negative values bend to
/// the other side. `speed` is the distance covered per step. The first
/// point is one step past `from` and the last point is exactly `to`.
pub fn curve_path(from: Position, to: Position, speed: f64, curvature: f64) -> Vec<Position> {
    let length = from.distance(to);
    if length == 0.0 {
        return vec![to];
    }

    let steps = if speed > 0.0 {
        ((length / speed).ceil() as usize).max(1)
    } else {
        1
    };

    let (x0, y0) = (from.x as f64, from.y as f64);
    let (x2, y2) = (to.x as f64, to.y as f64);
    let (nx, ny) = (-(y2 - y0) / length, (x2 - x0) / length);
    let bend = curvature / 100.0 * length;
    let cx = (x0 + x2) / 2.0 + nx * bend;
    let cy = (y0 + y2) / 2.0 + ny * bend;

    let mut points: Vec<Position> = (1..steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let u = 1.0 - t;
            let x = u * u * x0 + 2.0 * u * t * cx + t * t * x2;
            let y = u * u * y0 + 2.0 * u * t * cy + t * t * y2;
            Position::new(x.round() as i32, y.round() as i32)
        })
        .collect();
    points.push(to);
    points
}
