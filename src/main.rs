//! Headless command-line runner for the showroom library.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use showroom::backend::headless::HeadlessBackend;
use showroom::engine::bus::CommandBus;
use showroom::engine::command::ViewerCommand;
use showroom::options::Options;
use showroom::util::frame_timing::FrameTiming;
use showroom::Viewer;

#[derive(Parser)]
#[command(name = "showroom")]
#[command(about = "Headless runner for region/theming viewer configurations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount a viewer on the headless backend and replay a command script
    Run {
        /// Built-in preset to use when no config file is given
        #[arg(short, long, default_value = "robot")]
        preset: String,

        /// Options file (TOML); overrides --preset
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory model paths are resolved against
        #[arg(long, default_value = "assets")]
        assets: PathBuf,

        /// JSON-lines command script
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Frames between consecutive script commands
        #[arg(long, default_value_t = 30)]
        interval: usize,

        /// Total frames to run
        #[arg(long, default_value_t = 240)]
        frames: usize,

        /// Frame rate; also the pacing target with --realtime
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Pace frames against the wall clock instead of a fixed step
        #[arg(long)]
        realtime: bool,
    },

    /// Validate an options file
    Check {
        /// Options file (TOML)
        config: PathBuf,
    },

    /// List built-in presets and those found in a directory
    Presets {
        /// Directory of TOML presets
        dir: Option<PathBuf>,
    },

    /// Print the JSON schema of the options file
    Schema,
}

fn read_script(path: &Path) -> Result<Vec<ViewerCommand>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut commands = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command = serde_json::from_str(line)
            .with_context(|| format!("{}:{}", path.display(), n + 1))?;
        commands.push(command);
    }
    Ok(commands)
}

struct RunArgs {
    options: Options,
    assets: PathBuf,
    script: Vec<ViewerCommand>,
    interval: usize,
    frames: usize,
    fps: u32,
    realtime: bool,
}

fn run(args: RunArgs) -> Result<()> {
    if args.fps == 0 {
        bail!("--fps must be at least 1");
    }
    let bus = CommandBus::new();
    let backend = HeadlessBackend::new().with_model_root(&args.assets);
    let mut viewer = Viewer::mount(backend, args.options, &bus)?;

    let fixed_dt = 1.0 / args.fps as f32;
    let mut timing = FrameTiming::new(args.fps);
    let mut script = args.script.into_iter();

    for frame in 0..args.frames {
        if frame > 0 && frame % args.interval.max(1) == 0 {
            if let Some(command) = script.next() {
                log::info!("frame {frame}: {command:?}");
                if bus.dispatch(command) == 0 {
                    log::warn!("no viewer listening");
                }
            }
        }

        let dt = if args.realtime {
            if !timing.should_render() {
                std::thread::sleep(timing.time_until_next_frame());
            }
            timing.end_frame()
        } else {
            fixed_dt
        };
        viewer.frame(dt);
    }

    if args.realtime {
        log::info!("average {:.1} fps", timing.fps());
    }
    report(&viewer);
    let backend = viewer.unmount();
    log::info!("{} frames drawn", backend.frames_rendered());
    Ok(())
}

fn report(viewer: &Viewer<HeadlessBackend>) {
    let pose = viewer.camera().pose();
    let eye = viewer.eye();
    println!("load: {:?}", viewer.load_state());
    println!(
        "camera: alpha={:.3} beta={:.3} radius={:.3} eye=({:.2}, {:.2}, {:.2})",
        pose.alpha, pose.beta, pose.radius, eye.x, eye.y, eye.z
    );
    for part in &viewer.options().theming.parts {
        match viewer.backend().part_diffuse(part) {
            Some(c) => println!(
                "part {part}: rgba({:.3}, {:.3}, {:.3}, {:.3})",
                c.r, c.g, c.b, c.a
            ),
            None => println!("part {part}: absent"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            preset,
            config,
            assets,
            script,
            interval,
            frames,
            fps,
            realtime,
        } => {
            let options = match &config {
                Some(path) => Options::load(path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => Options::builtin(&preset)?,
            };
            let script = script.as_deref().map(read_script).transpose()?.unwrap_or_default();
            run(RunArgs {
                options,
                assets,
                script,
                interval,
                frames,
                fps,
                realtime,
            })
        }
        Commands::Check { config } => {
            let options = Options::load(&config)
                .with_context(|| format!("loading {}", config.display()))?;
            println!(
                "{}: ok ({} regions, {} colors, {} themeable parts)",
                config.display(),
                options.regions.len(),
                options.palette.len(),
                options.theming.parts.len()
            );
            Ok(())
        }
        Commands::Presets { dir } => {
            for name in Options::builtin_presets() {
                println!("{name} (built-in)");
            }
            if let Some(dir) = dir {
                for name in Options::list_presets(&dir) {
                    println!("{name}");
                }
            }
            Ok(())
        }
        Commands::Schema => {
            let schema = Options::json_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}
