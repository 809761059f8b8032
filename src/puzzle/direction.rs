//! Compass directions encoded as single-bit connector flags
//!
//! An orientation of a tile is a 4-bit mask over these flags describing
//! which sides carry a connector. The flag values match the hexadecimal
//! digits of the game identifier format: East=1, North=2, West=4, South=8.

/// One of the four sides of a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Positive x, flag 0x1
    East,
    /// Negative y, flag 0x2
    North,
    /// Negative x, flag 0x4
    West,
    /// Positive y, flag 0x8
    South,
}

impl Direction {
    /// All directions in their canonical iteration order
    ///
    /// Propagation and checking always walk directions in this order,
    /// which keeps every pass deterministic.
    pub const ALL: [Self; 4] = [Self::East, Self::North, Self::West, Self::South];

    /// The single-bit connector flag for this side
    pub const fn flag(self) -> u8 {
        match self {
            Self::East => 0x1,
            Self::North => 0x2,
            Self::West => 0x4,
            Self::South => 0x8,
        }
    }

    /// The facing side on an adjacent tile
    pub const fn opposite(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::North => Self::South,
            Self::West => Self::East,
            Self::South => Self::North,
        }
    }

    /// Whether an orientation mask carries a connector on this side
    pub const fn in_mask(self, mask: u8) -> bool {
        mask & self.flag() != 0
    }

    /// Human-readable name for log and error messages
    pub const fn name(self) -> &'static str {
        match self {
            Self::East => "east",
            Self::North => "north",
            Self::West => "west",
            Self::South => "south",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
