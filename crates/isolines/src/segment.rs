//! Marching squares case table and per-cell segment generation.

use isoline_common::{GridMapping, Point};

use crate::classify::{resolve_saddle, CellCase, Classification, Corners, SaddleJoin};
use crate::types::Segment;

/// A cell edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Bottom,
    Right,
    Top,
    Left,
}

/// (row, col) offset of each winding-order corner from the cell origin.
const CORNER_OFFSETS: [(f64, f64); 4] = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];

impl Edge {
    /// Winding-order corners bounding this edge.
    ///
    /// Always ordered from the lower grid index to the higher one, so the
    /// two cells sharing an edge compute bit-identical crossing points.
    pub fn corners(self) -> (usize, usize) {
        match self {
            Edge::Bottom => (0, 1),
            Edge::Right => (1, 2),
            Edge::Top => (3, 2),
            Edge::Left => (0, 3),
        }
    }
}

/// Which edges a case connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePattern {
    /// The contour does not enter the cell.
    None,
    /// One segment between two edges.
    Single([Edge; 2]),
    /// Two segments; the pairing depends on the saddle decision.
    Saddle {
        join_above: [[Edge; 2]; 2],
        join_below: [[Edge; 2]; 2],
    },
}

use Edge::{Bottom, Left, Right, Top};

/// Case code -> crossed edges, indexed by [`CellCase::bits`].
pub const CASE_TABLE: [EdgePattern; 16] = [
    EdgePattern::None,                  // 0000
    EdgePattern::Single([Left, Bottom]), // 0001
    EdgePattern::Single([Bottom, Right]), // 0010
    EdgePattern::Single([Left, Right]), // 0011
    EdgePattern::Single([Right, Top]),  // 0100
    EdgePattern::Saddle {
        // bottom-left and top-right above
        join_above: [[Bottom, Right], [Top, Left]],
        join_below: [[Left, Bottom], [Right, Top]],
    },
    EdgePattern::Single([Bottom, Top]), // 0110
    EdgePattern::Single([Left, Top]),   // 0111
    EdgePattern::Single([Top, Left]),   // 1000
    EdgePattern::Single([Top, Bottom]), // 1001
    EdgePattern::Saddle {
        // bottom-right and top-left above
        join_above: [[Left, Bottom], [Right, Top]],
        join_below: [[Bottom, Right], [Top, Left]],
    },
    EdgePattern::Single([Right, Top]),  // 1011
    EdgePattern::Single([Left, Right]), // 1100
    EdgePattern::Single([Bottom, Right]), // 1101
    EdgePattern::Single([Left, Bottom]), // 1110
    EdgePattern::None,                  // 1111
];

/// Table lookup for a case.
pub fn edge_pattern(case: CellCase) -> EdgePattern {
    CASE_TABLE[case.bits() as usize]
}

/// Fraction along `a -> b` where the isovalue is crossed.
///
/// A flat edge (`a == b`) yields its midpoint instead of dividing by zero.
pub fn interpolation_factor(a: f64, b: f64, isovalue: f64) -> f64 {
    if a == b {
        return 0.5;
    }
    ((isovalue - a) / (b - a)).clamp(0.0, 1.0)
}

/// World-space crossing point on one edge of the cell at (`row`, `col`).
pub fn crossing_point(
    row: usize,
    col: usize,
    edge: Edge,
    corners: &Corners,
    isovalue: f64,
    mapping: &GridMapping,
) -> Point {
    let (a, b) = edge.corners();
    let (ia, ja) = CORNER_OFFSETS[a];
    let (ib, jb) = CORNER_OFFSETS[b];
    let t = interpolation_factor(corners[a], corners[b], isovalue);

    let i = row as f64 + ia + t * (ib - ia);
    let j = col as f64 + ja + t * (jb - ja);
    mapping.to_world(i, j)
}

/// Segments contributed by one classified cell: zero, one, or two.
///
/// A saddle classification without a decision is resolved here from the
/// corners.
pub fn cell_segments(
    row: usize,
    col: usize,
    corners: &Corners,
    classification: &Classification,
    isovalue: f64,
    mapping: &GridMapping,
) -> Vec<Segment> {
    let point = |edge: Edge| crossing_point(row, col, edge, corners, isovalue, mapping);
    let segment = |[a, b]: [Edge; 2]| Segment::new(point(a), point(b));

    match edge_pattern(classification.case) {
        EdgePattern::None => vec![],
        EdgePattern::Single(edges) => vec![segment(edges)],
        EdgePattern::Saddle {
            join_above,
            join_below,
        } => {
            let join = classification
                .saddle
                .unwrap_or_else(|| resolve_saddle(corners, isovalue));
            let pairs = match join {
                SaddleJoin::Above => join_above,
                SaddleJoin::Below => join_below,
            };
            pairs.into_iter().map(segment).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use isoline_common::BoundingBox;

    const ALL_EDGES: [Edge; 4] = [Bottom, Right, Top, Left];

    fn crossed_edges(case: CellCase) -> Vec<Edge> {
        ALL_EDGES
            .into_iter()
            .filter(|e| {
                let (a, b) = e.corners();
                case.corner_above(a) != case.corner_above(b)
            })
            .collect()
    }

    fn sorted(mut edges: Vec<Edge>) -> Vec<Edge> {
        edges.sort_by_key(|e| *e as u8);
        edges
    }

    fn unit_mapping() -> GridMapping {
        GridMapping::new(BoundingBox::new(0.0, 0.0, 1.0, 1.0), 2, 2).unwrap()
    }

    #[test]
    fn test_table_covers_exactly_crossed_edges() {
        for bits in 0u8..16 {
            let case = CellCase::from_bits(bits);
            let expected = sorted(crossed_edges(case));
            match edge_pattern(case) {
                EdgePattern::None => assert!(expected.is_empty(), "case {:04b}", bits),
                EdgePattern::Single([a, b]) => {
                    assert_eq!(sorted(vec![a, b]), expected, "case {:04b}", bits)
                }
                EdgePattern::Saddle {
                    join_above,
                    join_below,
                } => {
                    assert!(case.is_saddle());
                    for pairs in [join_above, join_below] {
                        let used = sorted(pairs.iter().flatten().copied().collect());
                        assert_eq!(used, expected, "case {:04b}", bits);
                    }
                    assert_ne!(join_above, join_below);
                }
            }
        }
    }

    #[test]
    fn test_complementary_cases_share_edges() {
        for bits in 0u8..16 {
            let a = crossed_edges(CellCase::from_bits(bits));
            let b = crossed_edges(CellCase::from_bits(!bits & 0x0f));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_saddle_pairings_cut_expected_corners() {
        // Rising saddle joined above: segments isolate bottom-right and top-left.
        match CASE_TABLE[CellCase::SaddleRising.bits() as usize] {
            EdgePattern::Saddle { join_above, .. } => {
                assert_eq!(join_above, [[Bottom, Right], [Top, Left]]);
            }
            other => panic!("unexpected pattern {:?}", other),
        }
    }

    #[test]
    fn test_interpolation_factor() {
        assert_eq!(interpolation_factor(0.0, 10.0, 5.0), 0.5);
        assert_eq!(interpolation_factor(0.0, 10.0, 2.5), 0.25);
        assert_eq!(interpolation_factor(10.0, 0.0, 2.5), 0.75);
        assert_eq!(interpolation_factor(3.0, 3.0, 3.0), 0.5);
        assert_eq!(interpolation_factor(0.0, 1.0, 7.0), 1.0);
    }

    #[test]
    fn test_crossing_point_world_space() {
        let mapping = GridMapping::new(BoundingBox::new(100.0, 200.0, 120.0, 240.0), 3, 3).unwrap();
        let corners = [0.0, 10.0, 10.0, 0.0];
        // Bottom edge of cell (1, 0): from node (1,0) to (1,1)
        let p = crossing_point(1, 0, Bottom, &corners, 2.5, &mapping);
        assert!((p.x - 102.5).abs() < 1e-12);
        assert!((p.y - 220.0).abs() < 1e-12);
    }

    #[test]
    fn test_shared_edge_points_identical() {
        let mapping = unit_mapping();
        // Top edge of cell (0,0) equals bottom edge of cell (1,0).
        let lower = [0.0, 0.0, 3.0, 7.0];
        let upper = [7.0, 3.0, 1.0, 9.0];
        let a = crossing_point(0, 0, Top, &lower, 5.0, &mapping);
        let b = crossing_point(1, 0, Bottom, &upper, 5.0, &mapping);
        assert_eq!(a, b);
    }

    #[test]
    fn test_cell_segments_counts() {
        let mapping = unit_mapping();
        let v = 5.0;
        let count = |corners: Corners| {
            let c = classify(&corners, v);
            cell_segments(0, 0, &corners, &c, v, &mapping).len()
        };
        assert_eq!(count([0.0, 0.0, 0.0, 0.0]), 0);
        assert_eq!(count([9.0, 9.0, 9.0, 9.0]), 0);
        assert_eq!(count([9.0, 0.0, 0.0, 0.0]), 1);
        assert_eq!(count([9.0, 9.0, 0.0, 0.0]), 1);
        assert_eq!(count([9.0, 0.0, 9.0, 0.0]), 2);
        assert_eq!(count([0.0, 9.0, 0.0, 9.0]), 2);
    }

    #[test]
    fn test_undecided_saddle_resolved_from_corners() {
        let mapping = unit_mapping();
        // Center average 3.5 < 5: the low diagonal connects.
        let corners = [6.0, 0.0, 6.0, 2.0];
        let undecided = Classification {
            case: CellCase::SaddleRising,
            saddle: None,
        };
        let classified = classify(&corners, 5.0);
        assert_eq!(classified.saddle, Some(SaddleJoin::Below));
        assert_eq!(
            cell_segments(0, 0, &corners, &undecided, 5.0, &mapping),
            cell_segments(0, 0, &corners, &classified, 5.0, &mapping)
        );
    }

    #[test]
    fn test_single_segment_geometry() {
        let mapping = unit_mapping();
        // Left column low, right column high: vertical line at x = 0.5
        let corners = [0.0, 10.0, 10.0, 0.0];
        let c = classify(&corners, 5.0);
        let segs = cell_segments(0, 0, &corners, &c, 5.0, &mapping);
        assert_eq!(segs.len(), 1);
        assert!((segs[0].start.x - 0.5).abs() < 1e-12);
        assert!((segs[0].end.x - 0.5).abs() < 1e-12);
        assert!((segs[0].length() - 1.0).abs() < 1e-12);
    }
}
