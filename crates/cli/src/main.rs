use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use restoinsight_core::identity::infrastructure::json_gallery_loader::JsonGalleryLoader;
use restoinsight_core::pipeline::replay_session_use_case::ReplaySessionUseCase;
use restoinsight_core::pipeline::session_logger::StdoutSessionLogger;
use restoinsight_core::session::session::Session;
use restoinsight_core::shared::config::{AnalysisConfig, ComparatorKind};

/// Replay a recorded observation stream and export the session report.
#[derive(Parser)]
#[command(name = "restoinsight")]
struct Cli {
    /// Recorded stream: JSON lines, one sampled frame per line.
    input: PathBuf,

    /// Write the report here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Staff gallery (JSON array of name/embedding pairs).
    #[arg(long)]
    gallery: Option<PathBuf>,

    /// Analysis config file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Histogram dissimilarity above which a new table starts (0.0-1.0).
    #[arg(long)]
    scene_threshold: Option<f64>,

    /// Maximum embedding distance for a staff match.
    #[arg(long)]
    staff_threshold: Option<f64>,

    /// Maximum embedding distance for re-identifying a guest.
    #[arg(long)]
    tracking_threshold: Option<f64>,

    /// Anger confidence that counts toward alerts (0.0-1.0).
    #[arg(long)]
    anomaly_confidence: Option<f64>,

    /// Faces narrower or shorter than this many pixels are ignored.
    #[arg(long)]
    min_face_size: Option<i32>,

    /// Faces classified below this confidence are ignored (0.0-1.0).
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Scene comparator: bhattacharyya or correlation.
    #[arg(long)]
    comparator: Option<ComparatorKind>,

    /// Progress line every N frames.
    #[arg(long, default_value = "300")]
    progress_every: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;
    let config = build_config(&cli)?;

    let gallery = JsonGalleryLoader::load_or_disabled(cli.gallery.as_deref());
    let mut session = Session::new(&config, gallery);

    let reader = BufReader::new(File::open(&cli.input)?);
    let mut use_case = ReplaySessionUseCase::new(
        Box::new(StdoutSessionLogger::new(cli.progress_every)),
        &config,
    );
    let replay = use_case.execute(reader, &mut session)?;
    if replay.skipped_lines > 0 || replay.skipped_faces > 0 {
        log::warn!(
            "Skipped {} unreadable lines and {} unreadable faces",
            replay.skipped_lines,
            replay.skipped_faces
        );
    }

    let report = session.report();
    let json = report.to_json_pretty()?;
    match &cli.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, json)?;
            log::info!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }

    log::info!(
        "{} frames, {} tables, {} guests, {} alerts, staff: {:?}",
        replay.frames,
        report.summary.total_tables,
        report.summary.total_guests,
        report.summary.total_alerts,
        report.summary.staff_detected
    );
    Ok(())
}

fn build_config(cli: &Cli) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(v) = cli.scene_threshold {
        config.scene_change_threshold = v;
    }
    if let Some(v) = cli.staff_threshold {
        config.staff_match_threshold = v;
    }
    if let Some(v) = cli.tracking_threshold {
        config.person_tracking_threshold = v;
    }
    if let Some(v) = cli.anomaly_confidence {
        config.anomaly_confidence = v;
    }
    if let Some(v) = cli.min_face_size {
        config.min_face_size = v;
    }
    if let Some(v) = cli.min_confidence {
        config.min_confidence = v;
    }
    if let Some(kind) = cli.comparator {
        config.comparator = kind;
    }
    Ok(config)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if let Some(t) = cli.scene_threshold {
        if !(0.0..=1.0).contains(&t) {
            return Err(format!("Scene threshold must be between 0.0 and 1.0, got {t}").into());
        }
    }
    if let Some(c) = cli.anomaly_confidence {
        if !(0.0..=1.0).contains(&c) {
            return Err(format!("Anomaly confidence must be between 0.0 and 1.0, got {c}").into());
        }
    }
    if let Some(c) = cli.min_confidence {
        if !(0.0..=1.0).contains(&c) {
            return Err(format!("Minimum confidence must be between 0.0 and 1.0, got {c}").into());
        }
    }
    if let Some(size) = cli.min_face_size {
        if size < 0 {
            return Err(format!("Minimum face size must not be negative, got {size}").into());
        }
    }
    for (flag, value) in [
        ("--staff-threshold", cli.staff_threshold),
        ("--tracking-threshold", cli.tracking_threshold),
    ] {
        if let Some(v) = value {
            if v.is_nan() || v <= 0.0 {
                return Err(format!("{flag} must be positive, got {v}").into());
            }
        }
    }
    if cli.progress_every == 0 {
        return Err("--progress-every must be at least 1".into());
    }
    Ok(())
}
