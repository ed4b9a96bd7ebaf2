//! 5-point leapfrog stencil kernels
//!
//! Both kernels only touch interior cells (`1..width-1`, `1..height-1`); the
//! boundary ring of `current` keeps whatever value it already holds.

use rayon::prelude::*;

/// Serial leapfrog pass
///
/// # Arguments
///
/// * `current` - Height at t-1 on entry, overwritten with height at t+1
/// * `previous` - Height at t (read only)
/// * `width` - Grid width in cells
/// * `height` - Grid height in cells
/// * `coefficient` - Courant factor applied to the Laplacian
/// * `damping` - Multiplicative loss per step
pub fn step_wave_cpu(
    current: &mut [f32],
    previous: &[f32],
    width: usize,
    height: usize,
    coefficient: f32,
    damping: f32,
) {
    debug_assert_eq!(current.len(), width * height);
    debug_assert_eq!(previous.len(), current.len());

    for y in 1..height.saturating_sub(1) {
        let row_start = y * width;
        for x in 1..width - 1 {
            let idx = row_start + x;
            let laplacian = previous[idx - 1]
                + previous[idx + 1]
                + previous[idx - width]
                + previous[idx + width]
                - 4.0 * previous[idx];
            current[idx] =
                (2.0 * previous[idx] - current[idx] + laplacian * coefficient) * damping;
        }
    }
}

/// Row-band parallel leapfrog pass
///
/// Each Rayon task owns one row of `current` and only reads `previous`, so the
/// result is identical to [`step_wave_cpu`]. The call returns once every row has
/// been written.
pub fn step_wave_parallel(
    current: &mut [f32],
    previous: &[f32],
    width: usize,
    height: usize,
    coefficient: f32,
    damping: f32,
) {
    debug_assert_eq!(current.len(), width * height);
    debug_assert_eq!(previous.len(), current.len());

    current
        .par_chunks_mut(width)
        .enumerate()
        .skip(1)
        .take(height.saturating_sub(2))
        .for_each(|(y, row)| {
            let row_start = y * width;
            for x in 1..width - 1 {
                let idx = row_start + x;
                let laplacian = previous[idx - 1]
                    + previous[idx + 1]
                    + previous[idx - width]
                    + previous[idx + width]
                    - 4.0 * previous[idx];
                row[x] = (2.0 * previous[idx] - row[x] + laplacian * coefficient) * damping;
            }
        });
}
