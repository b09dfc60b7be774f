//! Message types and per-tick update aggregation for the warrior client.
//!
//! Outbound commands ([`Spawn`], [`Control`], [`SendChat`], [`SetAlias`])
//! and inbound session messages are plain serde types tagged through
//! [`envelope::WireMessage`]. Inbound game ticks go through
//! [`UpdateDecoder`], which fans each tick out to the contact and terrain
//! decoders and collects the results into one [`Update`].
//!
//! # Design Principles
//!
//! - **One bad record never drops a tick** - Failed contacts and chunks are
//!   logged and listed in [`Update::rejected`].
//! - **Envelope errors are the caller's** - A frame that is not a game tick
//!   fails the decode call.
//! - **Bounded work** - [`UpdateLimits`] caps records per tick.

mod error;
mod limits;
mod messages;
mod update;

pub use error::{LimitKind, UpdateError, UpdateResult};
pub use limits::UpdateLimits;
pub use messages::{Control, SendChat, SessionCreated, SetAlias, Spawn};
pub use update::{RecordKind, RejectedRecord, Update, UpdateDecoder};

pub use contact::{Contact, Guidance, PlayerId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = UpdateLimits::default();
        let _ = UpdateDecoder::default();
        let _ = Control::default();
        let _ = LimitKind::Contacts;
        let _: UpdateResult<()> = Ok(());
    }
}
