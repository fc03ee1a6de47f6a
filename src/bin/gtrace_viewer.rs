//! goroutine 调用历史查看器
//!
//! 读取 funcStart/funcEnd 日志，输出调用时间轴 SVG。

use clap::Parser;
use gtrace_viz::color::ColorRuleKind;
use gtrace_viz::config::ViewerConfig;
use gtrace_viz::render::{LayoutKind, OutputType};
use gtrace_viz::{render_trace, RenderOptions, VizError};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "gtrace-viewer", about = "Simple log visualizer")]
struct Args {
    /// read from FILE instead of stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// write to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// change output file type (choices from 'svg')
    #[arg(short = 't', long = "type", value_name = "TYPE", default_value = "svg")]
    output_type: String,

    /// change coloring rule: goroutine, function or module
    #[arg(short, long, value_name = "TYPE", default_value = "goroutine")]
    color_rule: String,

    /// change layout: goroutines or funccalls
    #[arg(short, long, value_name = "LAYOUT")]
    layout: Option<String>,

    /// JSON file overriding cell size and palette
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// 不打印日志
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::from(1);
        }
        Err(e) => e.exit(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(if args.quiet {
            tracing_subscriber::EnvFilter::new("off")
        } else {
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        })
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR {e}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<(), VizError> {
    let layout = match args.layout.as_deref() {
        Some(name) => name.parse::<LayoutKind>()?,
        None => return Err(VizError::UnknownLayout("<none>".to_string())),
    };
    let opts = RenderOptions {
        output_type: args.output_type.parse::<OutputType>()?,
        color_rule: args.color_rule.parse::<ColorRuleKind>()?,
        layout,
        config: match &args.config {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        },
    };

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    // 出错时不创建输出文件
    let mut svg = Vec::new();
    let summary = render_trace(input, &mut svg, &opts)?;

    match &args.output {
        Some(path) => {
            let mut w = BufWriter::new(File::create(path)?);
            w.write_all(&svg)?;
            w.flush()?;
            info!(path = %path.display(), "已写出 SVG");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&svg)?;
            stdout.flush()?;
        }
    }

    info!(
        events = summary.events,
        intervals = summary.intervals,
        open = summary.open_intervals,
        slots = summary.slots,
        last_time = summary.last_time,
        "done"
    );
    Ok(())
}
