use hand2voc::geometry::{BBoxXYXY, ExtentFloor};
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn enclosing_box_is_exact_per_axis_minmax(corners in proptest_helpers::arb_corners_with(proptest_helpers::arb_signed())) {
        let bbox = BBoxXYXY::enclosing(&corners, ExtentFloor::NegInfinity);

        let xs = corners.map(|c| c.x);
        let ys = corners.map(|c| c.y);
        prop_assert_eq!(bbox.xmin(), xs.iter().copied().fold(f64::INFINITY, f64::min));
        prop_assert_eq!(bbox.ymin(), ys.iter().copied().fold(f64::INFINITY, f64::min));
        prop_assert_eq!(bbox.xmax(), xs.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        prop_assert_eq!(bbox.ymax(), ys.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        prop_assert!(bbox.is_ordered());
    }

    #[test]
    fn enclosing_box_contains_every_corner(corners in proptest_helpers::arb_corners()) {
        let bbox = BBoxXYXY::enclosing(&corners, ExtentFloor::NegInfinity);
        for corner in corners {
            prop_assert!(bbox.xmin() <= corner.x && corner.x <= bbox.xmax());
            prop_assert!(bbox.ymin() <= corner.y && corner.y <= bbox.ymax());
        }
    }

    #[test]
    fn legacy_floor_matches_exact_on_pixel_coordinates(corners in proptest_helpers::arb_corners()) {
        prop_assert_eq!(
            BBoxXYXY::enclosing(&corners, ExtentFloor::Legacy),
            BBoxXYXY::enclosing(&corners, ExtentFloor::NegInfinity)
        );
    }

    #[test]
    fn legacy_floor_caps_maxima_at_minus_one(corners in proptest_helpers::arb_corners_with(proptest_helpers::arb_signed())) {
        let exact = BBoxXYXY::enclosing(&corners, ExtentFloor::NegInfinity);
        let legacy = BBoxXYXY::enclosing(&corners, ExtentFloor::Legacy);
        prop_assert_eq!(legacy.xmin(), exact.xmin());
        prop_assert_eq!(legacy.ymin(), exact.ymin());
        prop_assert_eq!(legacy.xmax(), exact.xmax().max(-1.0));
        prop_assert_eq!(legacy.ymax(), exact.ymax().max(-1.0));
    }

    #[test]
    fn corner_order_does_not_matter(corners in proptest_helpers::arb_corners(), rotation in 0usize..4) {
        let mut rotated = corners;
        rotated.rotate_left(rotation);
        prop_assert_eq!(
            BBoxXYXY::enclosing(&rotated, ExtentFloor::NegInfinity),
            BBoxXYXY::enclosing(&corners, ExtentFloor::NegInfinity)
        );
    }
}
