//! Collision detection
//!
//! Nearest-corners: among droppables overlapping the dragged rectangle,
//! pick the one whose four corners are closest in total to the dragged
//! rectangle's corners.

use crate::geometry::Rect;

#[derive(Clone, Debug, PartialEq)]
pub struct Droppable<K> {
    pub id: K,
    pub rect: Rect,
}

/// Sum of distances between matching corners.
pub fn corner_distance(a: &Rect, b: &Rect) -> f64 {
    a.corners()
        .iter()
        .zip(b.corners().iter())
        .map(|(p, q)| p.distance(q))
        .sum()
}

/// Pick the drop target for `active`.
///
/// `candidates` must be in traversal order; on equal distance the earlier
/// candidate wins. Returns `None` when nothing overlaps.
pub fn closest_corners<'a, K>(active: &Rect, candidates: &'a [Droppable<K>]) -> Option<&'a K> {
    let mut best: Option<(&Droppable<K>, f64)> = None;
    for candidate in candidates.iter().filter(|c| c.rect.intersects(active)) {
        let distance = corner_distance(active, &candidate.rect);
        match best {
            Some((_, d)) if d <= distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(c, _)| &c.id)
}

/// Sort droppables into layout traversal order: left to right, then top to
/// bottom within a lane.
pub fn sort_by_layout<K>(candidates: &mut [Droppable<K>]) {
    candidates.sort_by(|a, b| {
        a.rect
            .left
            .total_cmp(&b.rect.left)
            .then(a.rect.top.total_cmp(&b.rect.top))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_at(id: &'static str, left: f64, top: f64) -> Droppable<&'static str> {
        Droppable {
            id,
            rect: Rect::new(left, top, 100.0, 40.0),
        }
    }

    #[test]
    fn test_picks_nearest_overlapping() {
        let candidates = vec![drop_at("a", 0.0, 0.0), drop_at("b", 0.0, 40.0), drop_at("c", 0.0, 80.0)];
        let dragged = Rect::new(0.0, 50.0, 100.0, 40.0);
        assert_eq!(closest_corners(&dragged, &candidates), Some(&"b"));
    }

    #[test]
    fn test_ignores_far_candidates() {
        let candidates = vec![drop_at("a", 500.0, 500.0)];
        let dragged = Rect::new(0.0, 0.0, 100.0, 40.0);
        assert_eq!(closest_corners(&dragged, &candidates), None);
    }

    #[test]
    fn test_tie_goes_to_first_in_traversal_order() {
        let candidates = vec![drop_at("a", 0.0, 0.0), drop_at("b", 0.0, 40.0)];
        // exactly halfway between the two
        let dragged = Rect::new(0.0, 20.0, 100.0, 40.0);
        assert_eq!(closest_corners(&dragged, &candidates), Some(&"a"));
    }

    #[test]
    fn test_sort_by_layout() {
        let mut candidates = vec![drop_at("b2", 200.0, 40.0), drop_at("a1", 0.0, 0.0), drop_at("b1", 200.0, 0.0)];
        sort_by_layout(&mut candidates);
        let ids: Vec<_> = candidates.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["a1", "b1", "b2"]);
    }
}
