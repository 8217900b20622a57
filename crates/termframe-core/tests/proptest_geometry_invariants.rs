//! Property-based invariant tests for the `Rect` primitive.
//!
//! 1. `from_size` always places the origin at (0, 0).
//! 2. `is_empty` agrees with width == 0 || height == 0 for any inputs.
//! 3. Construction never panics on extreme `u16` values.

use proptest::prelude::*;
use termframe_core::geometry::Rect;

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (any::<u16>(), any::<u16>(), any::<u16>(), any::<u16>())
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn from_size_origin_is_always_zero(w in any::<u16>(), h in any::<u16>()) {
        let r = Rect::from_size(w, h);
        prop_assert_eq!(r.x, 0);
        prop_assert_eq!(r.y, 0);
        prop_assert_eq!(r.width, w);
        prop_assert_eq!(r.height, h);
    }

    #[test]
    fn is_empty_agrees_with_zero_dimensions(r in rect_strategy()) {
        prop_assert_eq!(r.is_empty(), r.width == 0 || r.height == 0);
    }

    #[test]
    fn construction_never_panics(x in any::<u16>(), y in any::<u16>(), w in any::<u16>(), h in any::<u16>()) {
        let r = Rect::new(x, y, w, h);
        prop_assert_eq!(r.x, x);
        prop_assert_eq!(r.y, y);
    }
}
