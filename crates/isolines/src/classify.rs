//! Cell classification for marching squares.
//!
//! Corners are always given in the winding order bottom-left, bottom-right,
//! top-right, top-left. Bit `k` of the case code is set when corner `k` is at
//! or above the isovalue; equality counts as "above" so that two cells sharing
//! an edge always agree on whether that edge is crossed.

/// Corner samples of one cell in winding order (bl, br, tr, tl).
pub type Corners = [f64; 4];

/// The 16 marching squares configurations, named after the corners that are
/// at or above the isovalue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellCase {
    Empty = 0b0000,
    BottomLeft = 0b0001,
    BottomRight = 0b0010,
    Bottom = 0b0011,
    TopRight = 0b0100,
    /// bottom-left and top-right above
    SaddleRising = 0b0101,
    Right = 0b0110,
    AllButTopLeft = 0b0111,
    TopLeft = 0b1000,
    Left = 0b1001,
    /// bottom-right and top-left above
    SaddleFalling = 0b1010,
    AllButTopRight = 0b1011,
    Top = 0b1100,
    AllButBottomRight = 0b1101,
    AllButBottomLeft = 0b1110,
    Full = 0b1111,
}

const ALL_CASES: [CellCase; 16] = [
    CellCase::Empty,
    CellCase::BottomLeft,
    CellCase::BottomRight,
    CellCase::Bottom,
    CellCase::TopRight,
    CellCase::SaddleRising,
    CellCase::Right,
    CellCase::AllButTopLeft,
    CellCase::TopLeft,
    CellCase::Left,
    CellCase::SaddleFalling,
    CellCase::AllButTopRight,
    CellCase::Top,
    CellCase::AllButBottomRight,
    CellCase::AllButBottomLeft,
    CellCase::Full,
];

impl CellCase {
    /// Case for a 4-bit code; only the low four bits are used.
    pub fn from_bits(bits: u8) -> Self {
        ALL_CASES[(bits & 0x0f) as usize]
    }

    pub fn bits(self) -> u8 {
        self as u8
    }

    /// True for the two diagonal configurations with two valid pairings.
    pub fn is_saddle(self) -> bool {
        matches!(self, CellCase::SaddleRising | CellCase::SaddleFalling)
    }

    /// True when the contour does not enter the cell.
    pub fn is_trivial(self) -> bool {
        matches!(self, CellCase::Empty | CellCase::Full)
    }

    /// Whether corner `k` (winding order) is at or above the isovalue.
    pub fn corner_above(self, k: usize) -> bool {
        (self.bits() >> k) & 1 == 1
    }
}

/// How a saddle cell is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaddleJoin {
    /// The two above corners connect through the cell center; the segments
    /// cut off the two below corners.
    Above,
    /// The two below corners connect through the cell center; the segments
    /// cut off the two above corners.
    Below,
}

/// Case code plus the saddle decision for ambiguous cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub case: CellCase,
    pub saddle: Option<SaddleJoin>,
}

/// Compute the case code for four corner samples.
pub fn compute_case(corners: &Corners, isovalue: f64) -> CellCase {
    let mut bits = 0u8;
    for (k, &d) in corners.iter().enumerate() {
        if d >= isovalue {
            bits |= 1 << k;
        }
    }
    CellCase::from_bits(bits)
}

/// Decide a saddle from the mean of the four corners, using the same tie rule
/// as the corners themselves.
pub fn resolve_saddle(corners: &Corners, isovalue: f64) -> SaddleJoin {
    let center = corners.iter().sum::<f64>() / 4.0;
    if center >= isovalue {
        SaddleJoin::Above
    } else {
        SaddleJoin::Below
    }
}

/// Classify a cell: case code, and for saddles, which pairing to emit.
pub fn classify(corners: &Corners, isovalue: f64) -> Classification {
    let case = compute_case(corners, isovalue);
    let saddle = case.is_saddle().then(|| resolve_saddle(corners, isovalue));
    Classification { case, saddle }
}
