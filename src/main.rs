use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use plexus::{Animation, Backdrop, FrameDriver, RasterSurface, Viewport};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: plexus [ember|circuit|cloud] [--config FILE] [--seed N]
              [--snapshot OUT.png --frames N --size WxH]

Without --snapshot a window opens; Escape closes it.
Set RUST_LOG=plexus=debug for frame and resize logging.";

struct Args {
    preset: String,
    config: Option<PathBuf>,
    seed: Option<u64>,
    snapshot: Option<PathBuf>,
    frames: u64,
    size: (u32, u32),
}

fn parse_size(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once(['x', 'X'])?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        preset: "ember".to_string(),
        config: None,
        seed: None,
        snapshot: None,
        frames: 60,
        size: (1280, 720),
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| iter.next().ok_or_else(|| format!("{} needs a value", name));
        match arg.as_str() {
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--seed" => {
                let v = value("--seed")?;
                args.seed = Some(v.parse().map_err(|_| format!("bad seed: {}", v))?);
            }
            "--snapshot" => args.snapshot = Some(PathBuf::from(value("--snapshot")?)),
            "--frames" => {
                let v = value("--frames")?;
                args.frames = v.parse().map_err(|_| format!("bad frame count: {}", v))?;
            }
            "--size" => {
                let v = value("--size")?;
                args.size = parse_size(&v).ok_or_else(|| format!("bad size (want WxH): {}", v))?;
            }
            "-h" | "--help" => return Err(String::new()),
            flag if flag.starts_with('-') => return Err(format!("unknown option: {}", flag)),
            name => args.preset = name.to_string(),
        }
    }
    Ok(args)
}

fn load_backdrop(args: &Args) -> Result<Backdrop, String> {
    let backdrop = match &args.config {
        Some(path) => Backdrop::load(path)
            .map_err(|e| format!("failed to load {}: {}", path.display(), e))?,
        None => Backdrop::preset(&args.preset)
            .ok_or_else(|| format!("unknown preset: {}", args.preset))?,
    };
    Ok(match args.seed {
        Some(seed) => backdrop.with_seed(seed),
        None => backdrop,
    })
}

fn snapshot(backdrop: &Backdrop, args: &Args, out: &Path) -> Result<(), String> {
    let (width, height) = args.size;
    let scene = backdrop.build(Viewport::new(width as f32, height as f32));
    let surface = RasterSurface::new(width, height, backdrop.background());

    let mut driver = FrameDriver::new(scene, Some(surface));
    let frames = driver.run_for(args.frames.max(1));
    let surface = driver
        .stop()
        .ok_or_else(|| "surface was released early".to_string())?;

    surface.save_png(out).map_err(|e| e.to_string())?;
    info!(path = %out.display(), frames, width, height, "wrote snapshot");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("plexus=info")),
        )
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("{}\n", msg);
            }
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let backdrop = match load_backdrop(&args) {
        Ok(b) => b,
        Err(msg) => {
            error!("{}", msg);
            return ExitCode::FAILURE;
        }
    };

    let result = match &args.snapshot {
        Some(out) => snapshot(&backdrop, &args, out),
        None => {
            let (width, height) = args.size;
            Animation::new(backdrop)
                .with_title(format!("Plexus - {}", args.preset))
                .with_window_size(width, height)
                .run()
                .map_err(|e| e.to_string())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            error!("{}", msg);
            ExitCode::FAILURE
        }
    }
}
