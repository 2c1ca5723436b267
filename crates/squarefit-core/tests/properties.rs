//! Geometric and numeric properties that hold across many placements.

use squarefit_canonical::Quantizer;
use squarefit_core::{
    all_collisions, centroid_and_direction, corners_from_placement, objective_value, overlaps,
    packing_bounds, to_canonical, CornerSet, Placement,
};

const SIDE: f64 = 56.0;

fn sample_placements() -> Vec<Placement> {
    let mut out = Vec::new();
    for i in 0..7 {
        for j in 0..5 {
            let x = i as f64 * 37.5 - 90.0;
            let y = j as f64 * 41.0 - 60.0;
            let rotation = (i * 5 + j) as f64 * 13.7 - 120.0;
            out.push(Placement::new(x, y, rotation));
        }
    }
    out
}

fn corners(p: &Placement) -> CornerSet {
    corners_from_placement(p, SIDE)
}

#[test]
fn overlap_is_symmetric() {
    let squares: Vec<CornerSet> = sample_placements().iter().map(corners).collect();
    for a in &squares {
        for b in &squares {
            assert_eq!(overlaps(a, b, SIDE), overlaps(b, a, SIDE));
        }
    }
}

#[test]
fn translated_copies_one_side_away_never_overlap() {
    // exact contact only survives the trigonometry at 0 degrees
    for (rotation, offsets) in [
        (0.0, [56.0, 57.5, 200.0]),
        (90.0, [56.001, 57.5, 200.0]),
        (180.0, [56.001, 57.5, 200.0]),
        (-270.0, [56.001, 57.5, 200.0]),
    ] {
        let base = corners(&Placement::new(10.0, 10.0, rotation));
        assert!(overlaps(&base, &base, SIDE));
        for offset in offsets {
            for (dx, dy) in [(offset, 0.0), (-offset, 0.0), (0.0, offset), (0.0, -offset)] {
                let moved = corners(&Placement::new(10.0 + dx, 10.0 + dy, rotation));
                assert!(
                    !overlaps(&base, &moved, SIDE),
                    "rotation {rotation} offset ({dx}, {dy})"
                );
            }
        }
    }
}

#[test]
fn collision_pairs_are_ordered_and_unique() {
    let squares: Vec<CornerSet> = sample_placements().iter().map(corners).collect();
    let report = all_collisions(&squares, SIDE);
    assert!(report.any());
    for window in report.pairs.windows(2) {
        assert!(window[0] < window[1]);
    }
    for &(i, j) in &report.pairs {
        assert!(i < j);
        assert!(overlaps(&squares[i], &squares[j], SIDE));
    }
}

#[test]
fn single_square_objective_is_rotation_dependent() {
    for (rotation, expected) in [(0.0, 1.0), (90.0, 1.0), (45.0, 1.41421), (-45.0, 1.41421)] {
        let packing = [corners(&Placement::new(500.0, 500.0, rotation))];
        let objective = objective_value(&packing_bounds(&packing), SIDE);
        assert_eq!(objective.value, expected, "rotation {rotation}");
    }
}

#[test]
fn quantization_round_trips_within_one_step() {
    let quantizer = Quantizer::new(1_000_000_000).unwrap();
    let squares: Vec<CornerSet> = sample_placements().iter().map(corners).collect();
    let record = to_canonical(&squares, &quantizer).unwrap();
    for (square, corners) in record.squares.iter().zip(&squares) {
        let pose = centroid_and_direction(corners);
        let step = 1.0 / quantizer.scale() as f64;
        assert!((quantizer.dequantize(square.cx_q) - pose.cx).abs() <= step);
        assert!((quantizer.dequantize(square.cy_q) - pose.cy).abs() <= step);
        assert!((square.ux.hypot(square.uy) - 1.0).abs() < 1e-12);
    }
}
