//! # Strip Ledger
//!
//! Per-corner vertex counts of a ring, computed once from the detail values.
//! Every index range used to slice a ring into corners, lateral runs and cap
//! sides comes from here.

use crate::corner::LateralCorner;
use crate::params::ShapeParameters;
use std::ops::Range;

/// Vertex layout shared by every ring of one shape.
///
/// Ring order is: corner arc 0, lateral run 0, corner arc 1, lateral run 1,
/// and so on. Lateral runs after corners 0 and 2 hold the Y-Z plane detail,
/// runs after corners 1 and 3 the X-Y plane detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripLedger {
    corner_counts: [usize; 4],
    lateral_counts: [usize; 4],
    starts: [usize; 4],
    unique_len: usize,
}

impl StripLedger {
    pub fn new(corner_details: [u32; 4], xy_detail: u32, yz_detail: u32) -> Self {
        // A sharp corner still contributes its single bisecting vertex
        let corner_counts = corner_details.map(|detail| detail as usize + 1);
        let lateral_counts = [yz_detail, xy_detail, yz_detail, xy_detail].map(|d| d as usize);

        let mut starts = [0; 4];
        let mut cursor = 0;
        for i in 0..4 {
            starts[i] = cursor;
            cursor += corner_counts[i] + lateral_counts[i];
        }

        Self {
            corner_counts,
            lateral_counts,
            starts,
            unique_len: cursor,
        }
    }

    pub fn from_params(params: &ShapeParameters) -> Self {
        Self::new(params.corner_details, params.xy_detail, params.yz_detail)
    }

    /// Vertices on the arc of `lateral`.
    #[inline]
    pub fn corner_count(&self, lateral: LateralCorner) -> usize {
        self.corner_counts[lateral.index()]
    }

    /// Extra vertices between `lateral` and the next corner.
    #[inline]
    pub fn lateral_count(&self, lateral: LateralCorner) -> usize {
        self.lateral_counts[lateral.index()]
    }

    pub fn corner_range(&self, lateral: LateralCorner) -> Range<usize> {
        let start = self.starts[lateral.index()];
        start..start + self.corner_count(lateral)
    }

    pub fn lateral_range(&self, lateral: LateralCorner) -> Range<usize> {
        let start = self.corner_range(lateral).end;
        start..start + self.lateral_count(lateral)
    }

    /// Distinct vertices in a ring.
    #[inline]
    pub fn unique_len(&self) -> usize {
        self.unique_len
    }

    /// Ring length including the closing duplicate of vertex 0.
    #[inline]
    pub fn closed_len(&self) -> usize {
        self.unique_len + 1
    }

    /// Number of arc edges, which collapse when a ring shrinks to its poles.
    pub fn arc_edges(&self) -> usize {
        self.corner_counts.iter().map(|count| count - 1).sum()
    }

    /// Corner arc owning ring index `index`, if any.
    pub fn corner_of(&self, index: usize) -> Option<LateralCorner> {
        LateralCorner::ALL
            .into_iter()
            .find(|&lateral| self.corner_range(lateral).contains(&index))
    }

    /// Ring indices of the cap side that starts at `lateral`: its last arc
    /// vertex, the lateral run, and the next corner's first arc vertex.
    pub fn side(&self, lateral: LateralCorner) -> Vec<usize> {
        let next = LateralCorner::ALL[(lateral.index() + 1) % 4];
        let mut side = Vec::with_capacity(self.lateral_count(lateral) + 2);
        side.push(self.corner_range(lateral).end - 1);
        side.extend(self.lateral_range(lateral));
        side.push(self.corner_range(next).start);
        side
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LateralCorner::*;

    fn mixed() -> StripLedger {
        StripLedger::new([2, 0, 3, 1], 2, 1)
    }

    #[test]
    fn test_counts() {
        let ledger = mixed();
        assert_eq!(ledger.corner_count(FrontRight), 3);
        assert_eq!(ledger.corner_count(FrontLeft), 1);
        assert_eq!(ledger.corner_count(BackLeft), 4);
        assert_eq!(ledger.corner_count(BackRight), 2);
        assert_eq!(ledger.lateral_count(FrontRight), 1);
        assert_eq!(ledger.lateral_count(FrontLeft), 2);
        assert_eq!(ledger.unique_len(), 16);
        assert_eq!(ledger.closed_len(), 17);
        assert_eq!(ledger.arc_edges(), 6);
    }

    #[test]
    fn test_ranges() {
        let ledger = mixed();
        assert_eq!(ledger.corner_range(FrontLeft), 4..5);
        assert_eq!(ledger.lateral_range(FrontLeft), 5..7);
        assert_eq!(ledger.corner_range(BackRight), 12..14);
        assert_eq!(ledger.lateral_range(BackRight), 14..16);
        assert_eq!(ledger.corner_of(8), Some(BackLeft));
        assert_eq!(ledger.corner_of(3), None);
    }

    #[test]
    fn test_sides() {
        let ledger = mixed();
        assert_eq!(ledger.side(FrontRight), vec![2, 3, 4]);
        assert_eq!(ledger.side(FrontLeft), vec![4, 5, 6, 7]);
        assert_eq!(ledger.side(BackLeft), vec![10, 11, 12]);
        assert_eq!(ledger.side(BackRight), vec![13, 14, 15, 0]);
    }

    #[test]
    fn test_all_sharp_corners() {
        let ledger = StripLedger::new([0; 4], 0, 0);
        assert_eq!(ledger.unique_len(), 4);
        assert_eq!(ledger.arc_edges(), 0);
        assert_eq!(ledger.side(BackRight), vec![3, 0]);
    }
}
