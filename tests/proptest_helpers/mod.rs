#![allow(dead_code)]

use hand2voc::geometry::Coord;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Pixel coordinate on a realistic image, quantised to 1/100 px like the dataset.
pub fn arb_pixel() -> impl Strategy<Value = f64> + Clone {
    (0u32..=400_000).prop_map(|hundredths| f64::from(hundredths) / 100.0)
}

/// Any finite coordinate, negatives included.
pub fn arb_signed() -> impl Strategy<Value = f64> + Clone {
    -1.0e6f64..1.0e6
}

pub fn arb_corners_with(coord: impl Strategy<Value = f64> + Clone) -> impl Strategy<Value = [Coord; 4]> {
    prop::array::uniform4((coord.clone(), coord))
        .prop_map(|points| points.map(|(x, y)| Coord::new(x, y)))
}

pub fn arb_corners() -> impl Strategy<Value = [Coord; 4]> {
    arb_corners_with(arb_pixel())
}

pub fn arb_objects(max: usize) -> impl Strategy<Value = Vec<[Coord; 4]>> {
    prop::collection::vec(arb_corners(), 0..=max)
}

pub fn as_tuples(corners: &[Coord; 4]) -> [(f64, f64); 4] {
    corners.map(|c| (c.x, c.y))
}
