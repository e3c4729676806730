use std::fmt;

/// Identifier of a room, equal to its index in the dungeon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomId(pub u32);

impl RoomId {
    /// Room 0 is always the entrance.
    pub const ENTRANCE: Self = Self(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_entrance(self) -> bool {
        self.0 == Self::ENTRANCE.0
    }
}

impl From<usize> for RoomId {
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.0)
    }
}
