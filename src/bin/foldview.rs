use std::{
    cell::Cell,
    io::Write as _,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use foldview::{
    Ease, FoldConfig, FoldDirection, FoldMode, FoldSpec, FoldTransition, HeadlessTree,
    KeyframeSequence, Rect, StripGeometry,
};

#[derive(Parser, Debug)]
#[command(name = "foldview", version)]
struct Cli {
    /// Log engine activity to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one fold transition headlessly and print its strips and keyframes as JSON.
    Keyframes(KeyframesArgs),
    /// Print the effective configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct KeyframesArgs {
    /// Surface width.
    #[arg(long)]
    width: f64,

    /// Surface height.
    #[arg(long)]
    height: f64,

    /// Number of strips (defaults to the configured fold count).
    #[arg(long)]
    folds: Option<u32>,

    /// Fold direction: from_left, from_right, from_top, from_bottom (or 0-3).
    #[arg(long)]
    direction: Option<FoldDirection>,

    /// Duration in seconds (defaults to the configured duration).
    #[arg(long)]
    duration: Option<f64>,

    /// Easing curve.
    #[arg(long, value_enum, default_value_t = EaseChoice::Linear)]
    ease: EaseChoice,

    /// Whether the overlay unfolds (show) or folds away (hide).
    #[arg(long, value_enum, default_value_t = ModeChoice::Show)]
    mode: ModeChoice,

    /// Optional JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Accept fold counts and durations outside the configured bounds.
    #[arg(long)]
    no_bounds_check: bool,

    /// Write JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Optional JSON configuration file to load and validate.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EaseChoice {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    SineIn,
    SineOut,
    OutBack,
}

impl From<EaseChoice> for Ease {
    fn from(choice: EaseChoice) -> Self {
        match choice {
            EaseChoice::Linear => Ease::Linear,
            EaseChoice::InQuad => Ease::InQuad,
            EaseChoice::OutQuad => Ease::OutQuad,
            EaseChoice::InOutQuad => Ease::InOutQuad,
            EaseChoice::InCubic => Ease::InCubic,
            EaseChoice::OutCubic => Ease::OutCubic,
            EaseChoice::InOutCubic => Ease::InOutCubic,
            EaseChoice::SineIn => Ease::SineIn,
            EaseChoice::SineOut => Ease::SineOut,
            EaseChoice::OutBack => Ease::OutBack,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Show,
    Hide,
}

#[derive(serde::Serialize)]
struct Report<'a> {
    mode: FoldMode,
    direction: FoldDirection,
    fold_count: u32,
    duration_secs: f64,
    finished: bool,
    strips: Vec<StripReport<'a>>,
}

#[derive(serde::Serialize)]
struct StripReport<'a> {
    geometry: &'a StripGeometry,
    keyframes: &'a KeyframeSequence,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Keyframes(args) => cmd_keyframes(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<FoldConfig> {
    let cfg = match path {
        Some(p) => FoldConfig::from_json_file(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => FoldConfig::default(),
    };
    Ok(cfg)
}

fn cmd_keyframes(args: KeyframesArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if args.no_bounds_check {
        cfg.bounds_checking = false;
    }

    let mut spec = FoldSpec::from_config(&cfg)?.with_easing(Ease::from(args.ease));
    if let Some(folds) = args.folds {
        spec.fold_count = folds;
    }
    if let Some(direction) = args.direction {
        spec.direction = direction;
    }
    if let Some(secs) = args.duration {
        spec.duration = foldview::foundation::core::secs_to_duration(secs)?;
    }
    let (fold_count, direction, duration) = (spec.fold_count, spec.direction, spec.duration);

    let finished = Rc::new(Cell::new(false));
    let flag = Rc::clone(&finished);
    let spec = spec.on_completion(move |done| flag.set(done));

    let mut tree = HeadlessTree::new();
    let bounds = Rect::new(0.0, 0.0, args.width, args.height);
    let target = tree.add_surface(bounds);
    let overlay = tree.add_surface(bounds);

    let mut transition = FoldTransition::new(cfg);
    let mode = match args.mode {
        ModeChoice::Show => {
            transition.show(&mut tree, target, overlay, spec)?;
            FoldMode::Show
        }
        ModeChoice::Hide => {
            transition.hide(&mut tree, target, overlay, spec)?;
            FoldMode::Hide
        }
    };

    let strips = transition.strips().to_vec();
    transition.complete(&mut tree, true)?;

    let report = Report {
        mode,
        direction,
        fold_count,
        duration_secs: duration.as_secs_f64(),
        finished: finished.get(),
        strips: strips
            .iter()
            .map(|s| StripReport {
                geometry: &s.geometry,
                keyframes: &s.keyframes,
            })
            .collect(),
    };
    write_json(&report, args.out.as_deref())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    cfg.validate()?;
    write_json(&cfg, None)
}

fn write_json<T: serde::Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = std::fs::File::create(path)
                .with_context(|| format!("create '{}'", path.display()))?;
            serde_json::to_writer_pretty(f, value).with_context(|| "write JSON")?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value).with_context(|| "write JSON")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
