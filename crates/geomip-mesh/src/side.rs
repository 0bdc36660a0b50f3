//! Block sides and the set of sides that need stitching.

use crate::frame::BlockLod;

/// One side of a square block. North is `z = 0`, west is `x = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
}

impl Side {
    /// All four sides, in neighbour-array order.
    pub const ALL: [Side; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Order in which aligned edges are stitched each frame.
    pub const STITCH_ORDER: [Side; 4] = [Self::West, Self::East, Self::North, Self::South];

    /// The side facing this one across a shared border.
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Block-grid offset `(dx, dz)` of the neighbour on this side.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    /// Index into per-side arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Sides that border a visible, strictly coarser neighbour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AlignedSides(u8);

impl AlignedSides {
    /// No side needs stitching.
    pub const NONE: Self = Self(0);

    /// Every side needs stitching.
    pub const ALL: Self = Self(0b1111);

    /// Build a set from a list of sides.
    pub fn from_sides(sides: &[Side]) -> Self {
        sides.iter().fold(Self::NONE, |set, &side| set.with(side))
    }

    /// Derive alignment from this block's LOD and its neighbours' LODs
    /// (indexed by [`Side::index`]). Absent or hidden neighbours never align.
    pub fn from_neighbors(own: BlockLod, neighbors: &[Option<BlockLod>; 4]) -> Self {
        let mut set = Self::NONE;
        for side in Side::ALL {
            if let Some(neighbor) = neighbors[side.index()]
                && neighbor.visible
                && neighbor.level > own.level
            {
                set = set.with(side);
            }
        }
        set
    }

    /// Returns a copy with `side` added.
    pub fn with(self, side: Side) -> Self {
        Self(self.0 | 1 << side.index())
    }

    /// Returns true if `side` borders a coarser neighbour.
    pub fn contains(self, side: Side) -> bool {
        self.0 & (1 << side.index()) != 0
    }

    /// Returns true if no side is aligned.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of aligned sides.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Every subset of the four sides, for exhaustive checks.
    pub fn all_combinations() -> impl Iterator<Item = Self> {
        (0u8..16).map(Self)
    }
}
