//! Line-interpolated drag injection
//!
//! Pointer motion events arrive far apart when the pointer moves fast. Sampling
//! the segment between the previous and current position keeps the wake
//! continuous instead of leaving isolated splashes.
//!
//! Only the part of a segment that can reach the grid is sampled, so a segment
//! with a far-off endpoint costs no more than one that crosses the grid.

use super::{inject_point, Kernel};
use crate::field::HeightField;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sampling and brush parameters of a drag stroke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStroke {
    /// Samples per cell of segment length (`steps = floor(distance · density) + 1`)
    pub density: f32,
    /// Intensity lost by the far end of the segment (`1 - t · fade`)
    pub fade: f32,
    /// Kernel injected at every sample
    pub brush: Kernel,
    /// Samples closer than this to an edge are skipped (0 disables the check)
    pub sample_margin: i32,
}

impl LineStroke {
    /// Dense stroke with a soft radius-2 disk at half weight per sample
    pub const fn smooth() -> Self {
        Self {
            density: 2.0,
            fade: 0.3,
            brush: Kernel::disk(2.0, 0.5),
            sample_margin: 0,
        }
    }

    /// Lighter stroke with one point per sample, kept 2 cells off the edges
    pub const fn sharp() -> Self {
        Self {
            density: 1.5,
            fade: 0.3,
            brush: Kernel::Point,
            sample_margin: 2,
        }
    }

    /// Number of sample intervals for a segment of length `distance`
    ///
    /// Samples are taken at `t = i / steps` for `i` in `0..=steps`.
    pub fn steps(&self, distance: f64) -> usize {
        ((distance * f64::from(self.density)) as usize).saturating_add(1)
    }
}

impl Default for LineStroke {
    fn default() -> Self {
        Self::sharp()
    }
}

/// Inject a stroke from `(x1, y1)` to `(x2, y2)`
///
/// When the endpoints are less than one cell apart the call degrades to a
/// single point injection at `(x1, y1)`.
pub fn inject_line(
    field: &mut HeightField,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    intensity: f32,
    stroke: &LineStroke,
) {
    let start = Vector2::new(f64::from(x1), f64::from(y1));
    let delta = Vector2::new(
        f64::from(x2) - f64::from(x1),
        f64::from(y2) - f64::from(y1),
    );
    let distance = delta.norm();

    if distance < 1.0 {
        inject_point(field, x1, y1, intensity);
        return;
    }

    let steps = stroke.steps(distance);
    let Some((t_enter, t_exit)) = visible_span(field, start, delta, brush_reach(&stroke.brush))
    else {
        debug!(
            "Line stroke ({}, {}) -> ({}, {}) misses the grid",
            x1, y1, x2, y2
        );
        return;
    };
    let first = (t_enter * steps as f64).ceil() as usize;
    let last = ((t_exit * steps as f64).floor() as usize).min(steps);
    debug!(
        "Line stroke ({}, {}) -> ({}, {}): distance={:.2}, samples {}..={} of {}",
        x1, y1, x2, y2, distance, first, last, steps
    );

    let inv_steps = 1.0 / steps as f64;
    for i in first..=last {
        let t = i as f64 * inv_steps;
        let sample = start + delta * t;
        let (cx, cy) = (sample.x as i32, sample.y as i32);

        if stroke.sample_margin > 0 && !field.has_margin(cx, cy, stroke.sample_margin) {
            continue;
        }

        let sample_intensity = intensity * (1.0 - t as f32 * stroke.fade);
        stroke.brush.apply(field, cx, cy, sample_intensity);
    }
}

/// Farthest cell, in cells from its center, a brush can write to
fn brush_reach(brush: &Kernel) -> f64 {
    match *brush {
        Kernel::Point => 0.0,
        Kernel::Splash { .. } => 1.0,
        Kernel::SplashDisk { radius, .. } => f64::from(radius.max(0.0)).floor() + 1.0,
        Kernel::Disk { radius, .. }
        | Kernel::Ripple { radius, .. }
        | Kernel::WaterDrop { radius, .. } => f64::from(radius.max(0.0)).floor(),
    }
}

/// Parameter range `[t_enter, t_exit]` of `start + delta·t` inside the grid
/// grown by `reach` cells (plus one for truncation toward zero)
///
/// Liang-Barsky clipping against the grown rectangle; `None` when the segment
/// never enters it.
fn visible_span(
    field: &HeightField,
    start: Vector2<f64>,
    delta: Vector2<f64>,
    reach: f64,
) -> Option<(f64, f64)> {
    let low = -reach - 1.0;
    let high_x = field.width() as f64 + reach;
    let high_y = field.height() as f64 + reach;

    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;
    for (p, q) in [
        (-delta.x, start.x - low),
        (delta.x, high_x - start.x),
        (-delta.y, start.y - low),
        (delta.y, high_y - start.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t_enter = t_enter.max(q / p);
        } else {
            t_exit = t_exit.min(q / p);
        }
    }
    (t_enter <= t_exit).then_some((t_enter, t_exit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_short_segment_degrades_to_point() {
        let mut line_field = HeightField::new(10, 10, 0.99).unwrap();
        let mut point_field = line_field.clone();

        inject_line(&mut line_field, 4, 4, 4, 4, 7.0, &LineStroke::smooth());
        inject_point(&mut point_field, 4, 4, 7.0);

        assert_eq!(line_field.previous(), point_field.previous());
    }

    #[test]
    fn test_steps_count() {
        assert_eq!(LineStroke::smooth().steps(5.0), 11);
        assert_eq!(LineStroke::sharp().steps(5.0), 8);
        assert_eq!(LineStroke::sharp().steps(1.0), 2);
    }

    #[test]
    fn test_sharp_stroke_fades_along_segment() {
        let mut field = HeightField::new(20, 20, 0.99).unwrap();
        // Horizontal segment of length 4: steps = 7, samples at t = i/7
        inject_line(&mut field, 4, 5, 8, 5, 10.0, &LineStroke::sharp());

        // Samples i=0 and i=1 both truncate onto x=4
        let start = field.previous()[field.index(4, 5)];
        let end = field.previous()[field.index(8, 5)];
        assert_relative_eq!(start, 10.0 + 10.0 * (1.0 - 0.3 / 7.0), max_relative = 1e-5);
        assert_relative_eq!(end, 7.0, max_relative = 1e-5);

        // Every cell on the segment was touched, nothing off the row
        for x in 4..=8 {
            assert!(field.previous()[field.index(x, 5)] > 0.0);
        }
        let touched = field.previous().iter().filter(|&&v| v != 0.0).count();
        assert_eq!(touched, 5);
    }

    #[test]
    fn test_sharp_stroke_respects_sample_margin() {
        let mut field = HeightField::new(20, 20, 0.99).unwrap();
        // Runs along row 1, which is interior but inside the 2-cell margin
        inject_line(&mut field, 3, 1, 12, 1, 10.0, &LineStroke::sharp());
        assert!(field.previous().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_far_endpoint_samples_only_the_grid() {
        let mut near = HeightField::new(20, 20, 0.99).unwrap();
        let mut far = near.clone();
        inject_line(&mut near, 2, 5, 17, 5, 10.0, &LineStroke::sharp());
        inject_line(&mut far, 2, 5, 1_000_000_000, 5, 10.0, &LineStroke::sharp());

        // Fade is negligible over the first 20 cells of a 1e9-cell segment
        for x in 2..18 {
            assert!(far.previous()[far.index(x, 5)] >= 10.0 * (1.0 - 1e-6));
        }
        for x in 18..20 {
            assert_eq!(far.previous()[far.index(x, 5)], 0.0);
        }
        let touched = |f: &HeightField| f.previous().iter().filter(|&&v| v != 0.0).count();
        assert_eq!(touched(&far), touched(&near));
    }

    #[test]
    fn test_extreme_endpoints_do_not_overflow() {
        let mut field = HeightField::new(20, 20, 0.99).unwrap();
        inject_line(&mut field, i32::MIN, 5, i32::MAX, 5, 10.0, &LineStroke::sharp());
        for x in 2..18 {
            assert!(field.previous()[field.index(x, 5)] > 0.0, "gap at x={x}");
        }

        let mut field = HeightField::new(20, 20, 0.99).unwrap();
        inject_line(
            &mut field,
            i32::MIN,
            i32::MIN,
            i32::MAX,
            i32::MAX,
            10.0,
            &LineStroke::smooth(),
        );
        assert!(field.previous().iter().all(|v| v.is_finite()));
        assert!(field.previous()[field.index(10, 10)] > 0.0);

        // Entirely off the grid
        let mut field = HeightField::new(20, 20, 0.99).unwrap();
        inject_line(
            &mut field,
            i32::MAX - 10,
            i32::MIN,
            i32::MAX,
            i32::MAX,
            10.0,
            &LineStroke::smooth(),
        );
        assert!(field.previous().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_smooth_stroke_is_continuous() {
        let mut field = HeightField::new(40, 20, 0.99).unwrap();
        inject_line(&mut field, 5, 10, 30, 10, 20.0, &LineStroke::smooth());
        for x in 5..=30 {
            assert!(
                field.previous()[field.index(x, 10)] > 0.0,
                "gap in stroke at x={x}"
            );
        }
        // Disk brush reaches one row above and below
        assert!(field.previous()[field.index(15, 9)] > 0.0);
        assert!(field.previous()[field.index(15, 11)] > 0.0);
        assert_eq!(field.previous()[field.index(15, 13)], 0.0);
    }
}
