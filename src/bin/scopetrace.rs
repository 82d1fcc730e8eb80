use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use scopetrace::{
    Canvas, Error, Point, RenderConfig, SampleRate, TableSet, Waveform, annotate_dir,
    annotate_file, load_trace, render, write_wav,
};

#[derive(Parser, Debug)]
#[command(name = "scopetrace", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a traced points file (or a calibration waveform) to a stereo WAV.
    Convert(ConvertArgs),
    /// Prepend a computed height|width line to raw points files.
    Annotate(AnnotateArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input points file (required unless --signal is given).
    points_file: Option<PathBuf>,

    /// Signal duration in seconds.
    #[arg(long, default_value_t = 10)]
    seconds: u32,

    /// Playback rate in path or wave cycles per second.
    #[arg(long, default_value_t = 500.0)]
    freq: f64,

    /// Render a calibration waveform instead of a traced path.
    #[arg(long, value_enum)]
    signal: Option<SignalChoice>,

    /// Output sample rate in Hz (44100 or 48000).
    #[arg(long, default_value_t = 48_000)]
    sample_rate: u32,

    /// Canvas as <height>x<width>, overriding the file's dimension line.
    #[arg(long, value_parser = parse_canvas)]
    canvas: Option<Canvas>,

    /// Output path (defaults to a name derived from the run parameters).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SignalChoice {
    Sine,
    Rect,
}

#[derive(Parser, Debug)]
struct AnnotateArgs {
    /// File to annotate; with none, every .txt file in the current directory.
    file: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Annotate(args) => cmd_annotate(args),
    };
    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn cmd_convert(args: ConvertArgs) -> scopetrace::Result<()> {
    if args.seconds < 1 {
        return Err(Error::InvalidSeconds);
    }
    if !(args.freq > 0.0 && args.freq <= 24_000.0) {
        return Err(Error::InvalidFrequency(args.freq));
    }
    let sample_rate = SampleRate::from_hz(args.sample_rate)?;
    let num_samples = args.seconds as usize * sample_rate.as_u32() as usize;
    let config = RenderConfig::default();

    let (waveform, label) = match args.signal {
        Some(SignalChoice::Sine) => (Waveform::Sine, "sine".to_string()),
        Some(SignalChoice::Rect) => (Waveform::Rectangle, "rect".to_string()),
        None => {
            let path = args
                .points_file
                .as_deref()
                .ok_or(Error::MissingPointsFile)?;
            let trace = load_trace(path)?;
            let canvas = args.canvas.or(trace.canvas).unwrap_or_default();
            let points: Vec<Point> = trace
                .points
                .iter()
                .map(|p| p.normalized(canvas, config.amplitude))
                .collect();
            (Waveform::Path(points), label_for(path))
        }
    };

    let tables = TableSet::build(&waveform, &config)?;
    let buffer = render(&tables, args.freq, sample_rate, num_samples)?;

    let out_path = args
        .out
        .unwrap_or_else(|| output_name(&label, args.seconds, args.freq));
    let file = File::create(&out_path)?;
    let mut sink = BufWriter::new(file);
    write_wav(&mut sink, sample_rate, &buffer)?;
    info!(
        samples = buffer.len(),
        "wrote {}", out_path.display()
    );
    Ok(())
}

fn cmd_annotate(args: AnnotateArgs) -> scopetrace::Result<()> {
    match args.file {
        Some(file) => {
            annotate_file(&file)?;
        }
        None => {
            let annotated = annotate_dir(Path::new("."))?;
            info!("annotated {annotated} file(s)");
        }
    }
    Ok(())
}

fn label_for(points_file: &Path) -> String {
    points_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trace".to_string())
}

fn output_name(label: &str, seconds: u32, freq: f64) -> PathBuf {
    PathBuf::from(format!("{label},{seconds}sec,{freq:.2}Hz.wav"))
}

fn parse_canvas(value: &str) -> Result<Canvas, String> {
    let (height, width) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected <height>x<width>".to_string())?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height `{height}`"))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width `{width}`"))?;
    Canvas::new(height, width).map_err(|err| err.to_string())
}
