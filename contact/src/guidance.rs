//! Steering targets.

use envelope::WireMessage;
use serde::{Deserialize, Serialize};

/// Requested speed and heading for a ship.
///
/// Contacts report it when either target is sent; outbound control messages
/// carry it to steer the player's ship. Absent targets are omitted on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Guidance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity_target: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction_target: Option<f32>,
}

impl Guidance {
    #[must_use]
    pub const fn new(velocity_target: Option<i32>, direction_target: Option<f32>) -> Self {
        Self {
            velocity_target,
            direction_target,
        }
    }
}

impl WireMessage for Guidance {
    const TYPE_NAME: &'static str = "Guidance";
}
