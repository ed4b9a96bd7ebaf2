//! Spatial footprint of the disturbance kernels on a live field
use approx::assert_relative_eq;
use ripple_sim_core::{inject_line, HeightField, Kernel, LineStroke, WaveIntegrator};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn footprint(field: &HeightField, cx: usize, cy: usize) -> Vec<(i32, i32, f32)> {
    let mut cells = Vec::new();
    for y in 0..field.height() {
        for x in 0..field.width() {
            let v = field.previous()[field.index(x, y)];
            if v != 0.0 {
                cells.push((x as i32 - cx as i32, y as i32 - cy as i32, v));
            }
        }
    }
    cells
}

#[test]
fn test_water_drop_covers_radius_three_disk() {
    let mut field = HeightField::new(21, 21, 0.99).unwrap();
    Kernel::water_drop().apply(&mut field, 10, 10, 20.0);

    let cells = footprint(&field, 10, 10);
    assert_eq!(cells.len(), 29);
    for &(dx, dy, _) in &cells {
        assert!(dx * dx + dy * dy <= 9, "({dx}, {dy}) outside radius");
    }

    let at = |dx: i32, dy: i32| field.previous()[field.index((10 + dx) as usize, (10 + dy) as usize)];
    assert_eq!(at(0, 0), 20.0);
    // exp(-0.3)·cos(1.5) stays positive, the outer rings go negative
    assert!(at(1, 0) > 0.0);
    assert!(at(1, 1) < 0.0);
    assert!(at(0, 2) < 0.0);
    assert!(at(3, 0) < 0.0);
    assert_relative_eq!(
        at(2, 1),
        20.0 * (-5.0_f32 * 0.3).exp() * (5.0_f32.sqrt() * 1.5).cos(),
        max_relative = 1e-5
    );
}

#[test]
fn test_ripple_support_is_open_disk() {
    let mut field = HeightField::new(21, 21, 0.99).unwrap();
    Kernel::ripple().apply(&mut field, 10, 10, 25.0);

    let cells = footprint(&field, 10, 10);
    // dist == 3 gets weight (1 - 3/3) = 0
    assert_eq!(cells.len(), 25);
    for &(dx, dy, v) in &cells {
        let d2 = dx * dx + dy * dy;
        assert!(d2 < 9);
        if d2 <= 2 {
            assert!(v > 0.0, "({dx}, {dy}) = {v}");
        } else {
            assert!(v < 0.0, "({dx}, {dy}) = {v}");
        }
    }
}

#[test]
fn test_radial_kernels_are_point_symmetric() {
    for kernel in [Kernel::ripple(), Kernel::water_drop(), Kernel::disk(2.0, 0.5)] {
        let mut field = HeightField::new(15, 15, 0.99).unwrap();
        kernel.apply(&mut field, 7, 7, 12.0);
        for dy in -3..=3_i32 {
            for dx in -3..=3_i32 {
                let a = field.previous()[field.index((7 + dx) as usize, (7 + dy) as usize)];
                let b = field.previous()[field.index((7 - dx) as usize, (7 - dy) as usize)];
                let c = field.previous()[field.index((7 + dy) as usize, (7 + dx) as usize)];
                assert_eq!(a, b, "{kernel:?} ({dx}, {dy})");
                assert_eq!(a, c, "{kernel:?} ({dx}, {dy}) transposed");
            }
        }
    }
}

#[test]
fn test_margin_kernels_skip_near_edges() {
    let mut field = HeightField::new(16, 16, 0.99).unwrap();
    // Drop needs 3 cells of margin, ripple 2
    for (x, y) in [(2, 8), (13, 8), (8, 2), (8, 13)] {
        Kernel::water_drop().apply(&mut field, x, y, 10.0);
    }
    for (x, y) in [(1, 8), (14, 8), (8, 1), (8, 14)] {
        Kernel::ripple().apply(&mut field, x, y, 10.0);
    }
    assert!(field.previous().iter().all(|&v| v == 0.0));
}

#[test]
fn test_disk_near_edge_is_clipped_not_skipped() {
    let mut field = HeightField::new(16, 16, 0.99).unwrap();
    Kernel::disk(2.0, 1.0).apply(&mut field, 1, 8, 8.0);

    assert_eq!(field.previous()[field.index(1, 8)], 8.0);
    for y in 0..16 {
        assert_eq!(field.previous()[field.index(0, y)], 0.0);
    }
}

#[test]
fn test_injection_leaves_current_untouched() {
    let mut field = HeightField::new(30, 30, 0.99).unwrap();
    Kernel::splash().apply(&mut field, 10, 10, 15.0);
    Kernel::water_drop().apply(&mut field, 20, 20, 20.0);
    inject_line(&mut field, 4, 25, 25, 4, 15.0, &LineStroke::sharp());
    assert!(field.current().iter().all(|&v| v == 0.0));
}

#[test]
fn test_injection_feeds_next_step() {
    let mut field = HeightField::new(12, 12, 1.0).unwrap();
    Kernel::Point.apply(&mut field, 6, 6, 4.0);
    WaveIntegrator::default().step(&mut field);
    assert_eq!(field.previous()[field.index(6, 6)], 4.0);
    assert_eq!(field.previous()[field.index(7, 6)], 1.0);
}

#[test]
fn test_diagonal_line_is_unbroken() {
    let mut field = HeightField::new(40, 40, 0.99).unwrap();
    inject_line(&mut field, 5, 5, 30, 30, 15.0, &LineStroke::sharp());
    for i in 5..=30 {
        assert!(field.previous()[field.index(i, i)] > 0.0, "gap at ({i}, {i})");
    }
}
