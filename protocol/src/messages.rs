//! Session, chat, and game command messages.

use contact::{Guidance, PlayerId};
use envelope::WireMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use terrain::Coords;

/// Sent by the server once a session is established.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCreated {
    pub arena_id: u32,
    pub cohort_id: u32,
    pub session_id: u64,
    pub player_id: PlayerId,
    #[serde(default = "default_server_id")]
    pub server_id: u32,
}

const fn default_server_id() -> u32 {
    1
}

impl WireMessage for SessionCreated {
    const TYPE_NAME: &'static str = "SessionCreated";
    const OUTER_TAG: Option<&'static str> = Some("Client");
}

/// Sets the player's display name. The payload is the bare alias string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetAlias {
    pub alias: String,
}

impl SetAlias {
    #[must_use]
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
        }
    }
}

impl WireMessage for SetAlias {
    const TYPE_NAME: &'static str = "SetAlias";
    const OUTER_TAG: Option<&'static str> = Some("Client");
}

/// Posts a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendChat {
    pub message: String,
    #[serde(default)]
    pub whisper: bool,
}

impl SendChat {
    /// Creates a public chat message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            whisper: false,
        }
    }
}

impl WireMessage for SendChat {
    const TYPE_NAME: &'static str = "Send";
    const OUTER_TAG: Option<&'static str> = Some("Chat");
}

/// Requests a new ship of the given type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub entity_type: String,
}

impl Spawn {
    #[must_use]
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
        }
    }
}

impl WireMessage for Spawn {
    const TYPE_NAME: &'static str = "Spawn";
    const OUTER_TAG: Option<&'static str> = Some("Game");
}

/// Steers the player's ship for the next tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    #[serde(default)]
    pub guidance: Option<Guidance>,
    /// World position to aim weapons at, as `[x, y]`.
    #[serde(default)]
    pub aim_target: Option<[f32; 2]>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub submerge: bool,
    #[serde(default)]
    pub pay: Option<Value>,
    #[serde(default)]
    pub hint: Option<Value>,
}

const fn default_active() -> bool {
    true
}

impl Default for Control {
    fn default() -> Self {
        Self {
            guidance: None,
            aim_target: None,
            active: true,
            submerge: false,
            pay: None,
            hint: None,
        }
    }
}

impl Control {
    /// Returns this command with the given guidance.
    #[must_use]
    pub fn with_guidance(mut self, guidance: Guidance) -> Self {
        self.guidance = Some(guidance);
        self
    }

    /// Returns this command aiming at a world position.
    #[must_use]
    pub fn aim_at(mut self, target: Coords) -> Self {
        self.aim_target = Some([target.x, target.y]);
        self
    }
}

impl WireMessage for Control {
    const TYPE_NAME: &'static str = "Control";
    const OUTER_TAG: Option<&'static str> = Some("Game");
}
