//! Capture inspection and decoding tools for the warrior client.
//!
//! A capture is a text file holding one inbound server frame per line, as
//! recorded from the game socket. These helpers decode captures with the same
//! code paths the client uses:
//!
//! - Summarize a capture's frames and records
//! - Decode game ticks into structured JSON or text
//! - Replay terrain into a world store and draw chunks
//!
//! # Design Principles
//!
//! - **Same decoders as the client** - No tool-only parsing of game data.
//! - **Human-readable output** - Make it easy to see what the server sent.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::{anyhow, Context, Result};
use contact::Contact;
use envelope::{split_frame, EnvelopeLimits};
use protocol::{Update, UpdateDecoder};
use serde::Serialize;
use terrain::{ApplyOutcome, ChunkId, ChunkKind, TerrainCoords, WorldTerrain};
use tracing::{debug, warn};

/// Tag of frames that carry game ticks.
pub const GAME_TAG: &str = "Game";

/// Iterates the non-blank lines of a capture with 1-based line numbers.
pub fn capture_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Counts over a whole capture.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InspectReport {
    pub frames: usize,
    pub game_frames: usize,
    /// Non-game frames by tag.
    pub other_frames: BTreeMap<String, usize>,
    /// Frames that failed at the envelope level.
    pub failed_frames: usize,
    pub contacts: usize,
    pub snapshots: usize,
    pub patches: usize,
    pub rejected: usize,
    pub last_score: Option<u32>,
    pub last_world_radius: Option<f32>,
    pub death_reasons: Vec<String>,
}

/// Summarizes every frame of a capture. Broken frames are counted, not fatal.
pub fn inspect_capture(text: &str, decoder: &UpdateDecoder) -> InspectReport {
    let mut report = InspectReport::default();
    for (line, frame_text) in capture_lines(text) {
        report.frames += 1;
        let frame = match envelope::peek_frame(frame_text, &EnvelopeLimits::default()) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(line, error = %err, "unreadable frame");
                report.failed_frames += 1;
                continue;
            }
        };
        if !frame.is(GAME_TAG) {
            *report.other_frames.entry(frame.tag).or_default() += 1;
            continue;
        }
        match decoder.decode_frame(frame) {
            Ok(update) => {
                report.game_frames += 1;
                report.add(&update);
            }
            Err(err) => {
                warn!(line, error = %err, "undecodable game frame");
                report.failed_frames += 1;
            }
        }
    }
    report
}

impl InspectReport {
    fn add(&mut self, update: &Update) {
        self.contacts += update.contacts().count();
        for chunk in update.chunks() {
            match chunk.kind() {
                ChunkKind::Snapshot => self.snapshots += 1,
                ChunkKind::Patch => self.patches += 1,
            }
        }
        self.rejected += update.rejected.len();
        if update.score.is_some() {
            self.last_score = update.score;
        }
        if update.world_radius.is_some() {
            self.last_world_radius = update.world_radius;
        }
        if let Some(reason) = &update.death_reason {
            self.death_reasons.push(reason.clone());
        }
    }
}

/// One decoded game tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedFrame {
    pub line: usize,
    pub contacts: Vec<Contact>,
    /// Terrain cell under each contact, in `contacts` order.
    pub contact_cells: Vec<TerrainCoords>,
    pub chunks: Vec<ChunkSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_reason: Option<String>,
    pub rejected: Vec<RejectedSummary>,
}

/// A chunk update reduced to what is useful on a terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkSummary {
    pub chunk_id: ChunkId,
    pub kind: String,
    /// Number of wire values (snapshot bytes or patch cells).
    pub values: usize,
    /// Land cells in a snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_cells: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedSummary {
    pub index: usize,
    pub kind: String,
    pub reason: String,
}

/// Decodes every game frame of a capture.
///
/// Non-game frames are skipped. A frame that fails at the envelope level
/// fails the whole decode with its line number.
pub fn decode_capture(text: &str, decoder: &UpdateDecoder) -> Result<Vec<DecodedFrame>> {
    let mut frames = Vec::new();
    for (line, frame_text) in capture_lines(text) {
        let Some(update) = decode_game_line(frame_text, decoder)
            .with_context(|| format!("decode frame on line {line}"))?
        else {
            continue;
        };
        frames.push(summarize(line, update, decoder));
    }
    Ok(frames)
}

fn decode_game_line(text: &str, decoder: &UpdateDecoder) -> Result<Option<Update>> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse frame json")?;
    let frame = split_frame(value)?;
    if !frame.is(GAME_TAG) {
        debug!(tag = %frame.tag, "skipping non-game frame");
        return Ok(None);
    }
    Ok(Some(decoder.decode_frame(frame)?))
}

fn summarize(line: usize, update: Update, decoder: &UpdateDecoder) -> DecodedFrame {
    let config = decoder.terrain_config();
    let chunks = update
        .chunks()
        .map(|chunk| ChunkSummary {
            chunk_id: chunk.chunk_id,
            kind: chunk.kind().to_string(),
            values: chunk.bytes.len(),
            land_cells: chunk
                .altitudes(config)
                .ok()
                .map(terrain::AltitudeGrid::land_cells),
        })
        .collect();
    let rejected = update
        .rejected
        .iter()
        .map(|r| RejectedSummary {
            index: r.index,
            kind: r.kind.to_string(),
            reason: r.reason.clone(),
        })
        .collect();
    let contacts = update.contacts.unwrap_or_default();
    let contact_cells = contacts
        .iter()
        .map(|contact| contact.position_to_terrain(config))
        .collect();
    DecodedFrame {
        line,
        contacts,
        contact_cells,
        chunks,
        score: update.score,
        world_radius: update.world_radius,
        death_reason: update.death_reason,
        rejected,
    }
}

/// Renders decoded frames as indented text.
pub fn format_decode_pretty(frames: &[DecodedFrame]) -> String {
    let mut out = String::new();
    for frame in frames {
        let _ = writeln!(out, "== line {} ==", frame.line);
        if let Some(score) = frame.score {
            let _ = writeln!(out, "score: {score}");
        }
        if let Some(radius) = frame.world_radius {
            let _ = writeln!(out, "world radius: {radius}");
        }
        if let Some(reason) = &frame.death_reason {
            let _ = writeln!(out, "death: {reason}");
        }
        if !frame.contacts.is_empty() {
            let _ = writeln!(out, "contacts:");
            for (contact, cell) in frame.contacts.iter().zip(&frame.contact_cells) {
                let _ = writeln!(
                    out,
                    "  #{} {} at ({:.1}, {:.1}) cell ({}, {}) heading {:.2} {}",
                    contact.id.raw(),
                    contact.entity_type.as_deref().unwrap_or("?"),
                    contact.position.x,
                    contact.position.y,
                    cell.x,
                    cell.y,
                    contact.direction,
                    contact.header,
                );
            }
        }
        if !frame.chunks.is_empty() {
            let _ = writeln!(out, "chunks:");
            for chunk in &frame.chunks {
                let land = chunk
                    .land_cells
                    .map(|n| format!(", {n} land cells"))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "  ({}, {}) {}: {} values{land}",
                    chunk.chunk_id.x, chunk.chunk_id.y, chunk.kind, chunk.values
                );
            }
        }
        for rejected in &frame.rejected {
            let _ = writeln!(
                out,
                "rejected {} {}: {}",
                rejected.kind, rejected.index, rejected.reason
            );
        }
    }
    out
}

/// What a terrain replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    pub frames: usize,
    pub created: usize,
    pub replaced: usize,
    pub patched_cells: usize,
    pub ignored_patches: usize,
    pub failed: usize,
}

/// Applies the terrain of every game frame to `world`, in capture order.
pub fn replay_terrain(
    text: &str,
    decoder: &UpdateDecoder,
    world: &mut WorldTerrain,
) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();
    for (line, frame_text) in capture_lines(text) {
        let Some(update) = decode_game_line(frame_text, decoder)
            .with_context(|| format!("decode frame on line {line}"))?
        else {
            continue;
        };
        stats.frames += 1;
        let Some(terrain) = &update.terrain else {
            continue;
        };
        for result in world.apply_all(terrain) {
            match result {
                Ok(ApplyOutcome::Created) => stats.created += 1,
                Ok(ApplyOutcome::Replaced) => stats.replaced += 1,
                Ok(ApplyOutcome::Patched { cells }) => stats.patched_cells += cells,
                Ok(ApplyOutcome::IgnoredPatch) => stats.ignored_patches += 1,
                Err(_) => stats.failed += 1,
            }
        }
    }
    Ok(stats)
}

/// Parses a chunk id written as `X,Y`.
pub fn parse_chunk_id(text: &str) -> Result<ChunkId> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| anyhow!("expected X,Y, got {text:?}"))?;
    let x = x.trim().parse().with_context(|| format!("chunk x {x:?}"))?;
    let y = y.trim().parse().with_context(|| format!("chunk y {y:?}"))?;
    Ok(ChunkId::new(x, y))
}

/// Draws one stored chunk, `#` for land.
pub fn render_chunk(world: &WorldTerrain, chunk_id: ChunkId) -> Option<String> {
    world
        .get(chunk_id)
        .map(|chunk| chunk.altitudes.render_land())
}

/// One line per stored chunk, ordered by chunk id.
pub fn chunk_summary_lines(world: &WorldTerrain) -> Vec<String> {
    let mut chunks: Vec<_> = world.iter().collect();
    chunks.sort_by_key(|chunk| chunk.chunk_id);
    chunks
        .into_iter()
        .map(|chunk| {
            format!(
                "({}, {}): {} land cells",
                chunk.chunk_id.x,
                chunk.chunk_id.y,
                chunk.altitudes.land_cells()
            )
        })
        .collect()
}
