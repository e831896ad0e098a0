use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use polycraft::api::{
    audit, craft, format_segments, kept_segments, random_walk_soup, read_segments, ClassifyMode,
    DecomposeCfg, ResultSet, SoupCfg,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod figure;
mod provenance;
mod table;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "polycraft")]
#[command(about = "Reassemble unordered segments into ranked polylines")]
struct Cmd {
    /// Log at DEBUG instead of INFO
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Decompose a segment file and write the ranked result
    Run(RunArgs),
    /// Render a result JSON as an SVG chart
    Figure {
        #[arg(long)]
        from: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write a seeded random segment soup
    Gen(GenArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Branch vertices take part directly
    #[default]
    Include,
    /// Drop edges touching a branch, reclassify, decompose the rest
    Exclude,
}

impl From<Mode> for ClassifyMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Include => ClassifyMode::IncludeBranches,
            Mode::Exclude => ClassifyMode::ExcludeThenReclassify,
        }
    }
}

#[derive(Args)]
struct RunArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = Mode::Include)]
    mode: Mode,
    /// Long-format table, `.csv` or `.parquet`
    #[arg(long)]
    table: Option<PathBuf>,
}

#[derive(Args)]
struct GenArgs {
    #[arg(long)]
    out: PathBuf,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 8)]
    walks: usize,
    #[arg(long, default_value_t = 12)]
    max_len: usize,
    #[arg(long, default_value_t = 10)]
    extent: i64,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Run(args) => {
            let set = run(&args)?;
            for line in &set {
                println!("{line}");
            }
            Ok(())
        }
        Action::Figure { from, out } => figure(&from, &out),
        Action::Gen(args) => gen(&args),
        Action::Report => report(),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn run(args: &RunArgs) -> Result<ResultSet> {
    tracing::info!(input = %args.input.display(), out = %args.out.display(), mode = ?args.mode, "run");
    let segments = read_segments(&args.input)?;
    let cfg = DecomposeCfg::with_mode(args.mode.into());
    let set = craft(&segments, cfg)
        .with_context(|| format!("decomposing {}", args.input.display()))?;

    let report = audit(&kept_segments(&segments, cfg), &set);
    tracing::info!(
        segments = segments.len(),
        polylines = set.len(),
        closed = set.closed_count(),
        consistent = report.is_consistent(),
        "decomposed"
    );
    if !report.is_consistent() {
        bail!("result failed audit: {report:?}");
    }

    ensure_parent(&args.out)?;
    std::fs::write(&args.out, serde_json::to_vec_pretty(&set)?)
        .with_context(|| format!("writing {}", args.out.display()))?;

    let mut payload = Payload::new(json!({
        "cfg": serde_json::to_value(cfg)?,
        "segments": segments.len(),
        "polylines": set.len(),
        "total_length": set.total_length(),
    }))
    .input(&args.input);
    if let Some(path) = &args.table {
        ensure_parent(path)?;
        let mut df = table::result_frame(&set)?;
        table::write_table(&mut df, path)?;
        payload = payload.output(path);
    }
    provenance::write_sidecar(&args.out, payload)?;
    Ok(set)
}

fn figure(from: &Path, out: &Path) -> Result<()> {
    tracing::info!(from = %from.display(), out = %out.display(), "figure");
    let bytes = std::fs::read(from).with_context(|| format!("reading {}", from.display()))?;
    let set: ResultSet = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing result set {}", from.display()))?;
    ensure_parent(out)?;
    figure::write_svg(&set, out)?;
    provenance::write_sidecar(out, Payload::new(json!({"series": set.len()})).input(from))?;
    Ok(())
}

fn gen(args: &GenArgs) -> Result<()> {
    let cfg = SoupCfg {
        walks: args.walks,
        max_len: args.max_len,
        extent: args.extent,
    };
    let segments = random_walk_soup(cfg, args.seed);
    tracing::info!(seed = args.seed, segments = segments.len(), out = %args.out.display(), "gen");
    ensure_parent(&args.out)?;
    let text = format!(
        "# polycraft gen seed={} walks={} max_len={} extent={}\n{}",
        args.seed,
        args.walks,
        args.max_len,
        args.extent,
        format_segments(&segments)
    );
    std::fs::write(&args.out, text).with_context(|| format!("writing {}", args.out.display()))?;
    Ok(())
}

fn report() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&provenance::header())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn run_writes_result_table_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("segments.txt");
        std::fs::write(&input, "# spokes\n0 0 1 1\n2 0 1 1\n\n1 1 1 2\n").unwrap();
        let args = RunArgs {
            input: input.clone(),
            out: dir.path().join("out/result.json"),
            mode: Mode::Include,
            table: Some(dir.path().join("out/result.csv")),
        };
        let set = run(&args).unwrap();
        assert_eq!(set.len(), 3);

        let back: ResultSet =
            serde_json::from_slice(&std::fs::read(&args.out).unwrap()).unwrap();
        assert_eq!(back, set);
        assert!(dir.path().join("out/result.csv").exists());
        let prov: serde_json::Value = serde_json::from_slice(
            &std::fs::read(dir.path().join("out/result.provenance.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(prov["params"]["cfg"]["mode"], "IncludeBranches");
        assert_eq!(prov["params"]["polylines"], 3);
    }

    #[test]
    fn exclude_mode_and_bad_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("segments.txt");
        std::fs::write(&input, "0 0 1 1\n2 0 1 1\n1 1 1 2\n").unwrap();
        let args = RunArgs {
            input: input.clone(),
            out: dir.path().join("r.json"),
            mode: Mode::Exclude,
            table: None,
        };
        assert!(run(&args).unwrap().is_empty());
        let prov: serde_json::Value =
            serde_json::from_slice(&std::fs::read(dir.path().join("r.provenance.json")).unwrap())
                .unwrap();
        let cfg: DecomposeCfg = serde_json::from_value(prov["params"]["cfg"].clone()).unwrap();
        assert_eq!(cfg.mode, ClassifyMode::ExcludeThenReclassify);

        std::fs::write(&input, "0 0 1\n").unwrap();
        let err = run(&args).unwrap_err();
        assert!(format!("{err:#}").contains("line 1"));
    }

    #[test]
    fn gen_then_run_then_figure() {
        let dir = tempdir().unwrap();
        let soup = dir.path().join("soup.txt");
        gen(&GenArgs {
            out: soup.clone(),
            seed: 3,
            walks: 5,
            max_len: 10,
            extent: 4,
        })
        .unwrap();
        let result = dir.path().join("soup.json");
        run(&RunArgs {
            input: soup,
            out: result.clone(),
            mode: Mode::Include,
            table: None,
        })
        .unwrap();
        let chart = dir.path().join("soup.svg");
        figure(&result, &chart).unwrap();
        assert!(std::fs::read_to_string(chart).unwrap().contains("<path"));
    }
}
