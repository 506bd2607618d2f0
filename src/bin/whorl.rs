use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "whorl", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the storyboard's phase table.
    Phases(PhasesArgs),
    /// Evaluate a single frame and print its state as JSON.
    Frame(FrameArgs),
    /// Evaluate every frame and write a JSON-lines stream for a renderer.
    Dump(DumpArgs),
    /// Print a deterministic digest of the full frame stream.
    Fingerprint(FingerprintArgs),
}

#[derive(Parser, Debug)]
struct PhasesArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based). Indices past the end hold the final view.
    #[arg(long)]
    frame: u64,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON-lines path, one frame state per line, in frame order.
    #[arg(long)]
    out: PathBuf,

    /// Evaluate frames on a thread pool (output order is unchanged).
    #[arg(long)]
    parallel: bool,

    /// Thread count for --parallel (defaults to the rayon heuristic).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct FingerprintArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Phases(args) => cmd_phases(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Dump(args) => cmd_dump(args),
        Command::Fingerprint(args) => cmd_fingerprint(args),
    }
}

fn read_storyboard_json(path: &Path) -> anyhow::Result<whorl::Storyboard> {
    let f = File::open(path).with_context(|| format!("open storyboard '{}'", path.display()))?;
    let r = BufReader::new(f);
    let sb: whorl::Storyboard =
        serde_json::from_reader(r).with_context(|| "parse storyboard JSON")?;
    sb.validate()?;
    Ok(sb)
}

fn cmd_phases(args: PhasesArgs) -> anyhow::Result<()> {
    let sb = read_storyboard_json(&args.in_path)?;

    println!("{:<8} {:<8} {:>10} {:>10} {:>8}", "phase", "kind", "start", "end", "secs");
    for (i, phase) in sb.timeline.phases().iter().enumerate() {
        let start = sb
            .timeline
            .phase_start(i)
            .expect("phase index within timeline")
            .0;
        let end = start + phase.frames;
        println!(
            "{:<8} {:<8} {:>10} {:>10} {:>8.2}",
            i,
            phase.kind.name(),
            start,
            end,
            sb.fps.frames_to_secs(phase.frames),
        );
    }
    println!(
        "total    {} frames ({:.2}s at {:.2} fps)",
        sb.duration().0,
        sb.fps.frames_to_secs(sb.duration().0),
        sb.fps.as_f64(),
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let sb = read_storyboard_json(&args.in_path)?;
    let state = whorl::Evaluator::eval_frame(&sb, whorl::FrameIndex(args.frame))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&state)?
    } else {
        serde_json::to_string(&state)?
    };
    println!("{json}");
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let sb = read_storyboard_json(&args.in_path)?;

    let threading = whorl::EvalThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let frames = whorl::eval_frames(&sb, whorl::full_range(&sb), &threading)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    let mut w = BufWriter::new(f);
    for state in &frames {
        serde_json::to_writer(&mut w, state)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;

    eprintln!("wrote {} frames to {}", frames.len(), args.out.display());
    Ok(())
}

fn cmd_fingerprint(args: FingerprintArgs) -> anyhow::Result<()> {
    let sb = read_storyboard_json(&args.in_path)?;
    let frames = whorl::eval_frames(&sb, whorl::full_range(&sb), &whorl::EvalThreading::default())?;
    let fp = whorl::fingerprint_frames(&frames);
    println!("{:016x}{:016x}", fp.hi, fp.lo);
    Ok(())
}
