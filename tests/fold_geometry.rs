use std::f64::consts::FRAC_PI_2;

use foldview::{Axis, FoldDirection, Rect, build_strips};

const EYE: f64 = 500.0;

#[test]
fn extents_sum_to_surface_for_every_fold_count() {
    let bounds = Rect::new(0.0, 0.0, 317.0, 251.0);
    for direction in FoldDirection::ALL {
        let total = direction.axis().extent(bounds);
        for folds in 1..=20u32 {
            let strips = build_strips(bounds, folds, direction, EYE).unwrap();
            assert_eq!(strips.len(), folds as usize);
            let sum: f64 = strips.iter().map(|s| s.extent).sum();
            assert_eq!(sum, total, "{direction:?} x {folds}");

            let region_sum: f64 = strips
                .iter()
                .map(|s| direction.axis().extent(s.region))
                .sum();
            assert_eq!(region_sum, total, "{direction:?} x {folds} regions");
        }
    }
}

#[test]
fn strips_tile_the_surface_without_gaps() {
    let bounds = Rect::new(10.0, 20.0, 330.0, 220.0);
    for direction in FoldDirection::ALL {
        let axis = direction.axis();
        let mut strips = build_strips(bounds, 6, direction, EYE).unwrap();
        strips.sort_by(|a, b| axis.span(a.region).0.total_cmp(&axis.span(b.region).0));
        let (lo, hi) = axis.span(bounds);
        assert_eq!(axis.span(strips[0].region).0, lo);
        assert_eq!(axis.span(strips[strips.len() - 1].region).1, hi);
        for pair in strips.windows(2) {
            assert_eq!(axis.span(pair[0].region).1, axis.span(pair[1].region).0);
        }
    }
}

#[test]
fn signs_alternate_and_strip_zero_sits_on_the_anchor() {
    let bounds = Rect::new(0.0, 0.0, 400.0, 300.0);
    for direction in FoldDirection::ALL {
        let strips = build_strips(bounds, 5, direction, EYE).unwrap();
        for pair in strips.windows(2) {
            assert_eq!(
                pair[0].folded.angle.signum(),
                -pair[1].folded.angle.signum(),
                "{direction:?}"
            );
            assert_eq!(pair[0].folded.angle.abs(), FRAC_PI_2);
        }

        let first = &strips[0].region;
        match direction {
            FoldDirection::FromLeft => assert_eq!(first.x0, 0.0),
            FoldDirection::FromRight => assert_eq!(first.x1, 400.0),
            FoldDirection::FromTop => assert_eq!(first.y0, 0.0),
            FoldDirection::FromBottom => assert_eq!(first.y1, 300.0),
        }
        let axis = direction.axis();
        assert_eq!(
            axis,
            match direction {
                FoldDirection::FromLeft | FoldDirection::FromRight => Axis::Horizontal,
                FoldDirection::FromTop | FoldDirection::FromBottom => Axis::Vertical,
            }
        );
    }
}

#[test]
fn folded_pose_recedes_with_perspective() {
    let bounds = Rect::new(0.0, 0.0, 300.0, 100.0);
    let strips = build_strips(bounds, 3, FoldDirection::FromLeft, EYE).unwrap();
    for s in &strips {
        assert_eq!(s.rest.perspective, 0.0);
        assert_eq!(s.folded.perspective, -1.0 / EYE);
    }
}
