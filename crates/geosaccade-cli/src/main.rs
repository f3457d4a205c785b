//! Command-line interface for geosaccade saccade detection.

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use geosaccade::{
    AngvelConfig, DebugCollectConfig, DetectConfig, DetectionStats, Saccade, SaccadeDetector,
    SaccadeParams, Sample,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

const REPORT_SCHEMA_V1: &str = "geosaccade.report.v1";
const MERGED_SCHEMA_V1: &str = "geosaccade.merged.v1";
const UNKNOWN: &str = "unknown";

#[derive(Parser)]
#[command(name = "geosaccade")]
#[command(about = "Detect saccades (abrupt turns) in recorded animal trajectories")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[allow(clippy::large_enum_variant)]
enum Commands {
    /// Detect saccades with the geometric detector.
    Detect(CliDetectArgs),

    /// Detect saccades with the angular-velocity threshold detector.
    Angvel(CliAngvelArgs),

    /// Concatenate result files, numbering each file's saccades.
    Merge(CliMergeArgs),

    /// Print the default detection parameters as JSON.
    Params,
}

#[derive(Debug, Clone, Args)]
struct CliSourceArgs {
    /// Path to the input trajectory (JSON array of samples).
    #[arg(long)]
    trajectory: PathBuf,

    /// Path to write detection results (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Drop tracks with fewer samples than this before detection.
    #[arg(long, default_value = "0")]
    min_samples_per_track: usize,
}

#[derive(Debug, Clone, Args)]
struct CliMetadataArgs {
    /// Sample name recorded in the report.
    #[arg(long)]
    sample: Option<String>,

    /// Species recorded in the report.
    #[arg(long)]
    species: Option<String>,

    /// Stimulus condition recorded in the report.
    #[arg(long)]
    stimulus: Option<String>,
}

#[derive(Debug, Clone, Args)]
struct CliDetectArgs {
    #[command(flatten)]
    source: CliSourceArgs,

    #[command(flatten)]
    metadata: CliMetadataArgs,

    /// Load the full detection config (or bare thresholds) from JSON.
    /// Threshold flags are ignored when set.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to write the per-sample annotated trajectory (JSON).
    #[arg(long)]
    annotated_json: Option<PathBuf>,

    /// Path to write a versioned debug dump (JSON).
    #[arg(long)]
    debug_json: Option<PathBuf>,

    /// Maximum number of considered samples to record in the debug dump.
    #[arg(long, default_value = "300")]
    debug_max_candidates: usize,

    /// Inner edge of the orientation windows (s).
    #[arg(long, default_value_t = 4.0 / 60.0)]
    delta_t_inner_sec: f64,

    /// Outer edge of the orientation windows (s).
    #[arg(long, default_value_t = 10.0 / 60.0)]
    delta_t_outer_sec: f64,

    /// Minimum saccade amplitude (deg).
    #[arg(long, default_value_t = 25.0)]
    min_amplitude_deg: f64,

    /// Maximum orientation dispersion of either window (deg).
    #[arg(long, default_value_t = 15.0)]
    max_orientation_dispersion_deg: f64,

    /// Minimum linear velocity when saccading.
    #[arg(long, default_value_t = 0.1)]
    min_linear_velocity: f64,

    /// Maximum linear acceleration when saccading.
    #[arg(long, default_value_t = 20.0)]
    max_linear_acceleration: f64,

    /// Maximum angular velocity when saccading (deg/s).
    #[arg(long, default_value_t = 8000.0)]
    max_angular_velocity: f64,

    /// Minimum interval between saccades (s).
    #[arg(long, default_value_t = 10.0 / 60.0)]
    minimum_interval_sec: f64,
}

#[derive(Debug, Clone, Args)]
struct CliAngvelArgs {
    #[command(flatten)]
    source: CliSourceArgs,

    #[command(flatten)]
    metadata: CliMetadataArgs,

    /// Angular velocity threshold (deg/s).
    #[arg(long, default_value_t = 300.0)]
    threshold_deg: f64,

    /// Shortest accepted run (s).
    #[arg(long, default_value_t = 1.0 / 60.0)]
    min_duration: f64,

    /// Longest accepted run (s).
    #[arg(long, default_value_t = 1.0)]
    max_duration: f64,

    /// Frame rate used to derive time from frame numbers (Hz).
    #[arg(long, default_value_t = 60.0)]
    frame_rate: f64,
}

#[derive(Debug, Clone, Args)]
struct CliMergeArgs {
    /// Result files to merge, numbered in the order given.
    #[arg(long, num_args = 1.., required = true)]
    inputs: Vec<PathBuf>,

    /// Path to write the merged saccades (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Also write `<out>-<VALUE>.json` and `<out>-other.json`, split on the
    /// stimulus metadata.
    #[arg(long)]
    split_stimulus: Option<String>,
}

impl CliDetectArgs {
    fn to_params(&self) -> SaccadeParams {
        SaccadeParams {
            delta_t_inner_sec: self.delta_t_inner_sec,
            delta_t_outer_sec: self.delta_t_outer_sec,
            min_amplitude_deg: self.min_amplitude_deg,
            max_orientation_dispersion_deg: self.max_orientation_dispersion_deg,
            min_linear_velocity: self.min_linear_velocity,
            max_linear_acceleration: self.max_linear_acceleration,
            max_angular_velocity: self.max_angular_velocity,
            minimum_interval_sec: self.minimum_interval_sec,
        }
    }

    fn build_detect_config(&self) -> CliResult<DetectConfig> {
        match &self.config {
            Some(path) => {
                tracing::info!("Loading config: {}", path.display());
                DetectConfig::from_json_file(path)
            }
            None => Ok(DetectConfig::new(self.to_params())),
        }
    }
}

impl CliAngvelArgs {
    fn to_config(&self) -> AngvelConfig {
        AngvelConfig {
            angular_velocity_threshold_deg: self.threshold_deg,
            min_duration_sec: self.min_duration,
            max_duration_sec: self.max_duration,
            frame_rate_hz: self.frame_rate,
        }
    }
}

// ── Report types ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReportMetadata {
    sample: String,
    species: String,
    stimulus: String,
    trajectory: String,
    /// Tool and version that produced the report.
    processed: String,
}

impl ReportMetadata {
    fn new(args: &CliMetadataArgs, trajectory: &Path) -> Self {
        let or_unknown = |v: &Option<String>| v.clone().unwrap_or_else(|| UNKNOWN.to_string());
        Self {
            sample: or_unknown(&args.sample),
            species: or_unknown(&args.species),
            stimulus: or_unknown(&args.stimulus),
            trajectory: trajectory.display().to_string(),
            processed: format!("geosaccade {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaccadeReport {
    schema: String,
    detector: String,
    metadata: ReportMetadata,
    params: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<DetectionStats>,
    saccades: Vec<Saccade>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MergedSaccade {
    /// Position of the source file in the merge.
    sample_num: usize,
    sample: String,
    species: String,
    stimulus: String,
    #[serde(flatten)]
    saccade: Saccade,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MergedReport {
    schema: String,
    sources: Vec<String>,
    saccades: Vec<MergedSaccade>,
}

// ── I/O helpers ────────────────────────────────────────────────────────

fn read_trajectory(path: &Path, min_samples_per_track: usize) -> CliResult<Vec<Sample>> {
    tracing::info!("Loading trajectory: {}", path.display());
    let data = std::fs::read_to_string(path).map_err(|e| -> CliError {
        format!("Failed to read trajectory {}: {}", path.display(), e).into()
    })?;
    let samples: Vec<Sample> = serde_json::from_str(&data).map_err(|e| -> CliError {
        format!("Failed to parse trajectory {}: {}", path.display(), e).into()
    })?;

    let spans = geosaccade::track_spans(&samples);
    let n_tracks = spans.len();
    let kept: Vec<Sample> = spans
        .into_iter()
        .filter(|span| span.len() >= min_samples_per_track)
        .flat_map(|span| samples[span].iter().copied().collect::<Vec<_>>())
        .collect();
    if kept.len() < samples.len() {
        tracing::info!(
            "Dropped {} of {} samples in tracks shorter than {}",
            samples.len() - kept.len(),
            samples.len(),
            min_samples_per_track
        );
    }
    tracing::info!("Trajectory: {} samples in {} tracks", kept.len(), n_tracks);
    Ok(kept)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::Angvel(args) => run_angvel(&args),
        Commands::Merge(args) => run_merge(&args),
        Commands::Params => run_params(),
    }
}

// ── params ─────────────────────────────────────────────────────────────

fn run_params() -> CliResult<()> {
    let args = CliDetectArgs::parse_defaults();
    let config = DetectConfig::new(args.to_params());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

impl CliDetectArgs {
    /// Threshold defaults as clap would fill them in.
    fn parse_defaults() -> Self {
        #[derive(Parser)]
        struct Defaults {
            #[command(flatten)]
            detect: CliDetectArgs,
        }
        Defaults::parse_from(["geosaccade", "--trajectory", "-", "--out", "-"]).detect
    }
}

// ── detect ─────────────────────────────────────────────────────────────

fn run_detect(args: &CliDetectArgs) -> CliResult<()> {
    let samples = read_trajectory(&args.source.trajectory, args.source.min_samples_per_track)?;
    let config = args.build_detect_config()?;
    let detector = SaccadeDetector::with_config(config);

    let (result, debug_dump) = match &args.debug_json {
        Some(_) => {
            let dbg_cfg = DebugCollectConfig {
                trajectory_path: Some(args.source.trajectory.display().to_string()),
                max_candidates: args.debug_max_candidates,
            };
            let (r, d) = detector.detect_with_debug(&samples, &dbg_cfg)?;
            (r, Some(d))
        }
        None => (detector.detect(&samples)?, None),
    };

    tracing::info!(
        "Detected {} saccades ({} candidates, {} accepted)",
        result.saccades.len(),
        result.stats.n_candidates,
        result.stats.n_accepted,
    );

    let report = SaccadeReport {
        schema: REPORT_SCHEMA_V1.to_string(),
        detector: "geometric".to_string(),
        metadata: ReportMetadata::new(&args.metadata, &args.source.trajectory),
        params: serde_json::to_value(detector.config())?,
        stats: Some(result.stats),
        saccades: result.saccades.clone(),
    };
    write_json(&args.source.out, &report)?;
    tracing::info!("Results written to {}", args.source.out.display());

    if let Some(path) = &args.annotated_json {
        write_json(path, &result.annotated(&samples)?)?;
        tracing::info!("Annotated trajectory written to {}", path.display());
    }

    if let (Some(path), Some(dump)) = (&args.debug_json, &debug_dump) {
        write_json(path, dump)?;
        tracing::info!("Debug dump written to {}", path.display());
    }

    Ok(())
}

// ── angvel ─────────────────────────────────────────────────────────────

fn run_angvel(args: &CliAngvelArgs) -> CliResult<()> {
    let samples = read_trajectory(&args.source.trajectory, args.source.min_samples_per_track)?;
    let config = args.to_config();
    let result = geosaccade::detect_angvel(&samples, &config)?;

    let report = SaccadeReport {
        schema: REPORT_SCHEMA_V1.to_string(),
        detector: "angvel".to_string(),
        metadata: ReportMetadata::new(&args.metadata, &args.source.trajectory),
        params: serde_json::to_value(&config)?,
        stats: None,
        saccades: result.saccades,
    };
    write_json(&args.source.out, &report)?;
    tracing::info!(
        "{} saccades written to {}",
        report.saccades.len(),
        args.source.out.display()
    );
    Ok(())
}

// ── merge ──────────────────────────────────────────────────────────────

fn sibling_path(out: &Path, suffix: &str) -> PathBuf {
    let stem = out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "saccades".to_string());
    out.with_file_name(format!("{}-{}.json", stem, suffix))
}

fn run_merge(args: &CliMergeArgs) -> CliResult<()> {
    let mut merged = MergedReport {
        schema: MERGED_SCHEMA_V1.to_string(),
        sources: Vec::with_capacity(args.inputs.len()),
        saccades: Vec::new(),
    };

    for (sample_num, path) in args.inputs.iter().enumerate() {
        tracing::info!("Reading file {}", path.display());
        let data = std::fs::read_to_string(path)?;
        let report: SaccadeReport = serde_json::from_str(&data).map_err(|e| -> CliError {
            format!("Failed to parse report {}: {}", path.display(), e).into()
        })?;
        if report.schema != REPORT_SCHEMA_V1 {
            return Err(format!(
                "unsupported report schema '{}' in {} (expected '{}')",
                report.schema,
                path.display(),
                REPORT_SCHEMA_V1
            )
            .into());
        }
        merged.sources.push(path.display().to_string());
        let meta = report.metadata;
        merged
            .saccades
            .extend(report.saccades.into_iter().map(|saccade| MergedSaccade {
                sample_num,
                sample: meta.sample.clone(),
                species: meta.species.clone(),
                stimulus: meta.stimulus.clone(),
                saccade,
            }));
    }

    write_json(&args.out, &merged)?;
    tracing::info!(
        "Writing on {} ({} saccades)",
        args.out.display(),
        merged.saccades.len()
    );

    if let Some(value) = &args.split_stimulus {
        let (matching, other): (Vec<_>, Vec<_>) = merged
            .saccades
            .iter()
            .cloned()
            .partition(|s| &s.stimulus == value);
        for (saccades, suffix) in [(matching, value.as_str()), (other, "other")] {
            let path = sibling_path(&args.out, suffix);
            tracing::info!("Writing on {} ({} saccades)", path.display(), saccades.len());
            write_json(
                &path,
                &MergedReport {
                    schema: MERGED_SCHEMA_V1.to_string(),
                    sources: merged.sources.clone(),
                    saccades,
                },
            )?;
        }
    }

    Ok(())
}
