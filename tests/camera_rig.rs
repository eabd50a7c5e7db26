//! Property tests for the orbital camera rig clamp.
//!
//! No sequence of drag and zoom gestures may push the polar angle out of
//! its band or the radius out of its range, because the per-frame apply
//! step clamps before every draw.

use bevy::math::Vec2;
use proptest::prelude::*;

use impactsim::camera::{CameraRig, MAX_RADIUS, MIN_RADIUS, POLAR_MARGIN};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_rig_stays_clamped_under_gesture_sequences(
        gestures in prop::collection::vec(
            (-800.0f32..800.0, -800.0f32..800.0, -6.0f32..6.0),
            0..120,
        ),
    ) {
        let mut rig = CameraRig::default();

        for (dx, dy, scroll) in gestures {
            rig.apply_drag(Vec2::new(dx, dy));
            if scroll != 0.0 {
                rig.apply_zoom(scroll);
            }
            // The apply step clamps once per frame, after all gestures
            rig.clamp();

            prop_assert!(rig.polar >= POLAR_MARGIN);
            prop_assert!(rig.polar <= std::f32::consts::PI - POLAR_MARGIN);
            prop_assert!(rig.radius >= MIN_RADIUS);
            prop_assert!(rig.radius <= MAX_RADIUS);
            prop_assert!(rig.position().is_finite());
        }
    }

    /// The camera position always sits exactly at the rig radius from the
    /// look-at target.
    #[test]
    fn prop_position_radius_matches_rig(
        polar in 0.1f32..3.0,
        azimuth in -10.0f32..10.0,
        radius in MIN_RADIUS..MAX_RADIUS,
    ) {
        let rig = CameraRig {
            radius,
            polar,
            azimuth,
            dirty: false,
        };
        let distance = rig.position().length();
        prop_assert!((distance - radius).abs() < 1e-3, "distance {distance} vs radius {radius}");
    }
}
