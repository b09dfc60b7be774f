use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::Pattern;
use protocol::{UpdateDecoder, UpdateLimits};
use terrain::{TerrainConfig, WorldTerrain};
use warrior_tools::{
    chunk_summary_lines, decode_capture, format_decode_pretty, inspect_capture, parse_chunk_id,
    render_chunk, replay_terrain, InspectReport,
};

#[derive(Parser)]
#[command(
    name = "warrior-tools",
    version,
    about = "warrior capture inspection and decoding tools"
)]
struct Cli {
    /// Terrain chunk side length in cells.
    #[arg(long, global = true, default_value_t = terrain::CHUNK_SIZE)]
    chunk_size: usize,
    /// World units per terrain cell.
    #[arg(long, global = true, default_value_t = terrain::CELL_SIZE)]
    cell_size: f32,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize the frames in a capture file or directory.
    Inspect {
        /// Capture file, or a directory of captures.
        path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Limit the number of inspected captures.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Decode game frames into structured output.
    Decode {
        /// Capture file.
        capture_file: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Replay terrain from a capture and draw it.
    Terrain {
        /// Capture file.
        capture_file: PathBuf,
        /// Chunk to draw, as X,Y. Without it, every chunk is summarized.
        #[arg(long)]
        chunk: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = TerrainConfig::new(cli.chunk_size).context("invalid --chunk-size")?;
    if !(cli.cell_size.is_finite() && cli.cell_size > 0.0) {
        bail!("invalid --cell-size {}: must be positive", cli.cell_size);
    }
    let config = config.with_cell_size(cli.cell_size);
    let decoder = UpdateDecoder::new(config, UpdateLimits::default());

    match cli.command {
        Command::Inspect { path, glob, limit } => {
            if path.is_dir() {
                let mut entries = collect_capture_entries(&path, glob.as_deref())?;
                entries.sort();
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let text = read_capture(&entry)?;
                    println!("== {} ==", entry.display());
                    print_inspect_report(&inspect_capture(&text, &decoder));
                }
            } else {
                let text = read_capture(&path)?;
                print_inspect_report(&inspect_capture(&text, &decoder));
            }
        }
        Command::Decode {
            capture_file,
            format,
        } => {
            let text = read_capture(&capture_file)?;
            let frames = decode_capture(&text, &decoder)?;
            match format {
                DecodeFormat::Json => {
                    let json = serde_json::to_string_pretty(&frames).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_decode_pretty(&frames));
                }
            }
        }
        Command::Terrain {
            capture_file,
            chunk,
        } => {
            let text = read_capture(&capture_file)?;
            let mut world = WorldTerrain::new(config);
            let stats = replay_terrain(&text, &decoder, &mut world)?;
            println!(
                "frames: {} created: {} replaced: {} patched cells: {} ignored patches: {} failed: {}",
                stats.frames,
                stats.created,
                stats.replaced,
                stats.patched_cells,
                stats.ignored_patches,
                stats.failed
            );
            match chunk {
                Some(chunk) => {
                    let chunk_id = parse_chunk_id(&chunk)?;
                    let Some(drawing) = render_chunk(&world, chunk_id) else {
                        bail!("chunk {chunk} not in capture");
                    };
                    print!("{drawing}");
                }
                None => {
                    for line in chunk_summary_lines(&world) {
                        println!("{line}");
                    }
                }
            }
        }
    }
    Ok(())
}

fn read_capture(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read capture {}", path.display()))
}

fn collect_capture_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        entries.push(path);
    }
    Ok(entries)
}

fn print_inspect_report(report: &InspectReport) {
    println!(
        "frames: {} game: {} failed: {}",
        report.frames, report.game_frames, report.failed_frames
    );
    for (tag, count) in &report.other_frames {
        println!("  {tag}: {count}");
    }
    println!(
        "contacts: {} snapshots: {} patches: {} rejected: {}",
        report.contacts, report.snapshots, report.patches, report.rejected
    );
    if let Some(score) = report.last_score {
        println!("last score: {score}");
    }
    if let Some(radius) = report.last_world_radius {
        println!("last world radius: {radius}");
    }
    for reason in &report.death_reasons {
        println!("death: {reason}");
    }
}
