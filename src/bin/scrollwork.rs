use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollwork::{Page, PageConfig, ScrollInput};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "scrollwork", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the built-in studio page configuration as JSON.
    Page(PageArgs),
    /// Simulate frames of a page and print one JSON object per frame.
    Trace(TraceArgs),
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Output path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    /// Page configuration JSON (the built-in studio page when omitted).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Wheel input before a frame, as FRAME:DELTA. Repeatable.
    #[arg(long, value_parser = parse_wheel)]
    wheel: Vec<(u64, f64)>,

    /// Open the navigation menu before this frame.
    #[arg(long)]
    open_menu: Option<u64>,

    /// Close the navigation menu before this frame.
    #[arg(long)]
    close_menu: Option<u64>,

    /// Navigate to a section before a frame, as FRAME:SECTION.
    #[arg(long, value_parser = parse_navigate)]
    navigate: Option<(u64, String)>,

    /// Jump every animation straight to its end state.
    #[arg(long)]
    reduced_motion: bool,
}

fn parse_wheel(s: &str) -> Result<(u64, f64), String> {
    let (frame, delta) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FRAME:DELTA, got '{s}'"))?;
    let frame = frame
        .parse()
        .map_err(|e| format!("invalid frame '{frame}': {e}"))?;
    let delta = delta
        .parse()
        .map_err(|e| format!("invalid delta '{delta}': {e}"))?;
    Ok((frame, delta))
}

fn parse_navigate(s: &str) -> Result<(u64, String), String> {
    let (frame, section) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FRAME:SECTION, got '{s}'"))?;
    let frame = frame
        .parse()
        .map_err(|e| format!("invalid frame '{frame}': {e}"))?;
    Ok((frame, section.to_owned()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Page(args) => cmd_page(args),
        Command::Trace(args) => cmd_trace(args),
    }
}

fn cmd_page(args: PageArgs) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&PageConfig::studio())
        .context("serialize studio page")?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, json + "\n")
                .with_context(|| format!("write page config '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be > 0");
    }
    let mut config = match &args.in_path {
        Some(path) => PageConfig::from_path(path)
            .with_context(|| format!("load page config '{}'", path.display()))?,
        None => PageConfig::studio(),
    };
    config.reduced_motion |= args.reduced_motion;

    let mut page = Page::mount(config).context("mount page")?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for frame in 0..args.frames {
        for (_, delta) in args.wheel.iter().filter(|(f, _)| *f == frame) {
            page.push_input(ScrollInput::Wheel(*delta));
        }
        if args.open_menu == Some(frame) {
            page.open_menu().context("open menu")?;
        }
        if args.close_menu == Some(frame) {
            page.close_menu().context("close menu")?;
        }
        if let Some((at, section)) = &args.navigate
            && *at == frame
        {
            page.navigate(section)
                .with_context(|| format!("navigate to '{section}'"))?;
        }

        let report = page.frame(frame as f64 / args.fps);
        serde_json::to_writer(&mut out, &report).context("write frame")?;
        out.write_all(b"\n").context("write frame")?;
    }
    out.flush().context("flush output")?;
    page.unmount();
    Ok(())
}
