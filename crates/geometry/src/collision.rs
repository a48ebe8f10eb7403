use crate::Rect;

/// Returns true if any rectangle in `a` overlaps any rectangle in `b`.
///
/// Every pair is tested with [`Rect::overlaps`], so rectangles that merely
/// touch along an edge are not a collision. The check is O(|a| * |b|), which
/// is fine for per-entity collider sets of a few dozen boxes.
pub fn collides<T, U>(a: &[Rect<T, U>], b: &[Rect<T, U>]) -> bool
where
    T: PartialOrd,
{
    a.iter().any(|lhs| b.iter().any(|rhs| lhs.overlaps(rhs)))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::PixelRect;

    #[test]
    fn overlapping_sets() {
        assert!(collides(
            &[PixelRect::from_xywh(0, 0, 10, 10)],
            &[PixelRect::from_xywh(5, 5, 10, 10)]
        ));
    }

    #[test]
    fn touching_sets() {
        assert!(!collides(
            &[PixelRect::from_xywh(0, 0, 10, 10)],
            &[PixelRect::from_xywh(10, 0, 10, 10)]
        ));
    }

    #[test]
    fn empty_sets() {
        let some = [PixelRect::from_xywh(0, 0, 10, 10)];

        assert!(!collides::<i32, crate::Px>(&[], &[]));
        assert!(!collides(&some, &[]));
        assert!(!collides(&[], &some));
    }

    #[test]
    fn any_pair_is_enough() {
        let a = [
            PixelRect::from_xywh(0, 0, 2, 2),
            PixelRect::from_xywh(100, 100, 2, 2),
        ];
        let b = [
            PixelRect::from_xywh(50, 50, 2, 2),
            PixelRect::from_xywh(101, 101, 4, 4),
        ];

        assert!(collides(&a, &b));
        assert!(!collides(&a[..1], &b));
    }

    fn rect() -> impl Strategy<Value = PixelRect> {
        (-50..50i32, -50..50i32, 0..30i32, 0..30i32)
            .prop_map(|(x, y, w, h)| PixelRect::from_xywh(x, y, w, h))
    }

    proptest! {
        #[test]
        fn symmetric(
            a in prop::collection::vec(rect(), 0..8),
            b in prop::collection::vec(rect(), 0..8),
        ) {
            prop_assert_eq!(collides(&a, &b), collides(&b, &a));
        }

        #[test]
        fn separated_by_gap_never_collide(
            a in prop::collection::vec(rect(), 0..8),
            b in prop::collection::vec(rect(), 0..8),
        ) {
            // Shift every rectangle in `b` to start at or beyond the right
            // edge of everything in `a`.
            let right = a.iter().map(|r| r.right()).max().unwrap_or(0);
            let b: Vec<_> = b
                .iter()
                .map(|r| PixelRect::from_xywh(right + r.x().abs(), r.y(), r.width(), r.height()))
                .collect();

            prop_assert!(!collides(&a, &b));
        }
    }
}
