//! Optional contact fields and their header order.

use std::fmt;

/// An optional contact field selected by a header bit.
///
/// Declaration order is the header bit order and also the order in which
/// present fields' values follow the fixed leading slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Velocity,
    Altitude,
    DirectionTarget,
    VelocityTarget,
    Damage,
    EntityType,
    PlayerId,
    Reloads,
}

impl ContactField {
    /// All fields in bit order.
    pub const ORDER: [Self; 8] = [
        Self::Velocity,
        Self::Altitude,
        Self::DirectionTarget,
        Self::VelocityTarget,
        Self::Damage,
        Self::EntityType,
        Self::PlayerId,
        Self::Reloads,
    ];

    /// Bit position of this field in the header.
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Header mask for this field.
    #[must_use]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Wire name of this field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Velocity => "velocity",
            Self::Altitude => "altitude",
            Self::DirectionTarget => "direction_target",
            Self::VelocityTarget => "velocity_target",
            Self::Damage => "damage",
            Self::EntityType => "type",
            Self::PlayerId => "player_id",
            Self::Reloads => "reloads",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
