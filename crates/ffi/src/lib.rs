//! C ABI for the ripple simulation
//!
//! Exposes [`ripple_sim_core::WaveSimulation`] to presentation layers written in
//! other languages. Every call returns a [`RippleSimErrorCode`]; on failure the
//! message is available from [`ripple_sim_get_last_error`] on the same thread.
//!
//! Enum-like parameters are passed as `uint8_t` and validated:
//! - preset: 0=Classic, 1=Grid, 2=Water
//! - kernel kind: 0=Point, 1=Splash, 2=Disk, 3=Ripple, 4=Water drop, 5=Splash disk
//! - color map: 0=Grayscale, 1=Grayscale with deadband, 2=Water, 3=Azure, 4=Foam
//!
//! The header `RippleSimFFI.h` is generated by `build.rs` at the workspace root.

mod error;
mod frame;
mod helpers;
mod input;
mod instance;
mod simulation;

pub use error::{ripple_sim_get_last_error, ripple_sim_get_last_error_code, RippleSimErrorCode};
pub use frame::{ripple_sim_get_pixels, ripple_sim_get_stats, RippleSimStats};
pub use input::{
    ripple_sim_add_disturbance, ripple_sim_drag, ripple_sim_inject, ripple_sim_press,
    ripple_sim_random_drop,
};
pub use instance::{ripple_sim_destroy, ripple_sim_new, ripple_sim_set_seed, RippleSimInstance};
pub use simulation::{
    ripple_sim_refresh, ripple_sim_reset, ripple_sim_set_color_map, ripple_sim_set_damping,
    ripple_sim_set_parallel, ripple_sim_step, ripple_sim_update,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::ptr;

    fn create(preset: u8, width: u32, height: u32) -> *mut RippleSimInstance {
        let mut sim = ptr::null_mut();
        let code = unsafe { ripple_sim_new(preset, width, height, 0.0, &mut sim) };
        assert_eq!(code, RippleSimErrorCode::Ok);
        assert!(!sim.is_null());
        sim
    }

    fn last_error() -> String {
        let msg = ripple_sim_get_last_error();
        assert!(!msg.is_null());
        unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
    }

    #[test]
    fn test_new_requires_out_pointer() {
        let code = unsafe { ripple_sim_new(2, 16, 16, 0.99, ptr::null_mut()) };
        assert_eq!(code, RippleSimErrorCode::NullPointer);
        assert_eq!(ripple_sim_get_last_error_code(), RippleSimErrorCode::NullPointer);
        assert!(last_error().contains("out_instance"));
    }

    #[test]
    fn test_new_rejects_unknown_preset() {
        let mut sim: *mut RippleSimInstance = ptr::NonNull::dangling().as_ptr();
        let code = unsafe { ripple_sim_new(3, 16, 16, 0.99, &mut sim) };
        assert_eq!(code, RippleSimErrorCode::InvalidParameter);
        assert!(sim.is_null());
        assert!(last_error().contains("preset"));
    }

    #[test]
    fn test_new_reports_oversized_grid() {
        let mut sim = ptr::null_mut();
        let code = unsafe { ripple_sim_new(0, u32::MAX, u32::MAX, 0.99, &mut sim) };
        assert_ne!(code, RippleSimErrorCode::Ok);
        assert!(sim.is_null());
    }

    #[test]
    fn test_zero_size_keeps_preset_dimensions() {
        let sim = create(0, 0, 0);
        let mut pixels = ptr::null();
        let (mut w, mut h, mut pitch) = (0, 0, 0);
        let code = unsafe { ripple_sim_get_pixels(sim, &mut pixels, &mut w, &mut h, &mut pitch) };
        assert_eq!(code, RippleSimErrorCode::Ok);
        assert_eq!((w, h, pitch), (400, 300, 1600));
        assert!(!pixels.is_null());
        unsafe { ripple_sim_destroy(sim) };
    }

    #[test]
    fn test_null_instance_is_reported() {
        let null = ptr::null_mut();
        unsafe {
            assert_eq!(ripple_sim_step(null), RippleSimErrorCode::NullPointer);
            assert_eq!(ripple_sim_update(null), RippleSimErrorCode::NullPointer);
            assert_eq!(ripple_sim_reset(null), RippleSimErrorCode::NullPointer);
            assert_eq!(ripple_sim_press(null, 1, 1), RippleSimErrorCode::NullPointer);
            assert_eq!(ripple_sim_drag(null, 1, 1, 2, 2), RippleSimErrorCode::NullPointer);
            assert_eq!(
                ripple_sim_random_drop(null, ptr::null_mut(), ptr::null_mut()),
                RippleSimErrorCode::NullPointer
            );
            ripple_sim_destroy(null);
        }
        assert!(last_error().contains("ptr"));
    }

    #[test]
    fn test_frame_follows_updates() {
        let sim = create(1, 40, 30);
        unsafe {
            assert_eq!(ripple_sim_press(sim, 20, 15), RippleSimErrorCode::Ok);
            assert_eq!(ripple_sim_update(sim), RippleSimErrorCode::Ok);
        }

        let mut pixels = ptr::null();
        let (mut w, mut h, mut pitch) = (0, 0, 0);
        unsafe {
            ripple_sim_get_pixels(sim, &mut pixels, &mut w, &mut h, &mut pitch);
        }
        let frame = unsafe { std::slice::from_raw_parts(pixels, (w * h) as usize) };
        // Grayscale: calm corner white, disturbed center darker
        assert_eq!(frame[0], 0xFFFF_FFFF);
        assert_ne!(frame[(15 * w + 20) as usize], 0xFFFF_FFFF);

        unsafe { ripple_sim_destroy(sim) };
    }

    #[test]
    fn test_inject_validates_kind() {
        let sim = create(2, 32, 32);
        unsafe {
            assert_eq!(ripple_sim_inject(sim, 5, 16, 16, 5.0), RippleSimErrorCode::Ok);
            assert_eq!(
                ripple_sim_inject(sim, 6, 16, 16, 5.0),
                RippleSimErrorCode::InvalidParameter
            );
        }
        assert!(last_error().contains("kind"));
        unsafe { ripple_sim_destroy(sim) };
    }

    #[test]
    fn test_extreme_coordinates_are_ignored() {
        for preset in 0..3 {
            let sim = create(preset, 32, 24);
            unsafe {
                for kind in 0..=5 {
                    assert_eq!(
                        ripple_sim_inject(sim, kind, i32::MAX, i32::MIN, 5.0),
                        RippleSimErrorCode::Ok
                    );
                }
                assert_eq!(
                    ripple_sim_drag(sim, i32::MIN, 5, i32::MAX, 5),
                    RippleSimErrorCode::Ok
                );
                assert_eq!(
                    ripple_sim_drag(sim, 0, 0, i32::MAX, i32::MAX),
                    RippleSimErrorCode::Ok
                );
                assert_eq!(ripple_sim_update(sim), RippleSimErrorCode::Ok);
                ripple_sim_destroy(sim);
            }
        }
    }

    #[test]
    fn test_set_color_map_validates() {
        let sim = create(2, 16, 16);
        unsafe {
            assert_eq!(ripple_sim_set_color_map(sim, 3), RippleSimErrorCode::Ok);
            assert_eq!(
                ripple_sim_set_color_map(sim, 9),
                RippleSimErrorCode::InvalidParameter
            );
            ripple_sim_destroy(sim);
        }
    }

    #[test]
    fn test_success_clears_last_error() {
        let sim = create(2, 16, 16);
        unsafe {
            ripple_sim_set_color_map(sim, 200);
            assert_eq!(ripple_sim_get_last_error_code(), RippleSimErrorCode::InvalidParameter);
            ripple_sim_step(sim);
        }
        assert_eq!(ripple_sim_get_last_error_code(), RippleSimErrorCode::Ok);
        assert!(ripple_sim_get_last_error().is_null());
        unsafe { ripple_sim_destroy(sim) };
    }

    #[test]
    fn test_seeded_random_drop_is_reproducible() {
        let a = create(2, 64, 48);
        let b = create(2, 64, 48);
        let mut first = Vec::new();
        let mut second = Vec::new();
        unsafe {
            ripple_sim_set_seed(a, 11);
            ripple_sim_set_seed(b, 11);
            for _ in 0..20 {
                let (mut x, mut y) = (0, 0);
                ripple_sim_random_drop(a, &mut x, &mut y);
                first.push((x, y));
                ripple_sim_random_drop(b, &mut x, &mut y);
                second.push((x, y));
            }
            ripple_sim_destroy(a);
            ripple_sim_destroy(b);
        }
        assert_eq!(first, second);
        assert!(first
            .iter()
            .all(|&(x, y)| (3..61).contains(&x) && (3..45).contains(&y)));
    }

    #[test]
    fn test_stats_and_reset() {
        let sim = create(2, 32, 32);
        let mut stats = RippleSimStats::default();
        unsafe {
            ripple_sim_add_disturbance(sim, 16, 16, 4.0);
            ripple_sim_step(sim);
            ripple_sim_step(sim);
            assert_eq!(ripple_sim_get_stats(sim, &mut stats), RippleSimErrorCode::Ok);
            assert!(stats.energy > 0.0);
            assert_eq!(stats.steps, 2);

            ripple_sim_reset(sim);
            ripple_sim_get_stats(sim, &mut stats);
            assert_eq!(stats, RippleSimStats::default());

            assert_eq!(
                ripple_sim_get_stats(sim, ptr::null_mut()),
                RippleSimErrorCode::NullPointer
            );
            ripple_sim_destroy(sim);
        }
    }
}
