use log::{debug, info, LevelFilter, Log, Metadata, Record};
use std::path::PathBuf;
use tinyraster::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use tinyraster::ppm::save_ppm;
use tinyraster::{RasterConfig, RasterResult, Scene};

/// Writes log records to stderr, leaving stdout for status lines
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

struct Options {
    scene: Option<PathBuf>,
    config: Option<PathBuf>,
    out: PathBuf,
    width: Option<u32>,
    height: Option<u32>,
    verbosity: u8,
    #[cfg(feature = "viewer")]
    show: bool,
}

fn print_help() {
    println!("Usage: tinyraster [OPTIONS]");
    println!();
    println!("Renders a JSON scene (or the built-in demo) and writes a binary PPM.");
    println!();
    println!("Options:");
    println!("  --scene FILE, -s FILE     Scene to render (default: built-in demo)");
    println!("  --out FILE, -o FILE       Output image (default: out.ppm)");
    println!("  --config FILE, -c FILE    Rasterizer config, overrides the scene's");
    println!(
        "  --width W, -w W           Buffer width (default: scene or {})",
        DEFAULT_WIDTH
    );
    println!(
        "  --height H, -h H          Buffer height (default: scene or {})",
        DEFAULT_HEIGHT
    );
    println!("  --resolution WxH, -r WxH  Set both (e.g., 320x240)");
    #[cfg(feature = "viewer")]
    println!("  --show                    Also present the image in a window");
    println!("  --verbose, -v             More logging on stderr (repeatable)");
    println!("  --help                    Show this help message");
}

/// Parse command line arguments
fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = Options {
        scene: None,
        config: None,
        out: PathBuf::from("out.ppm"),
        width: None,
        height: None,
        verbosity: 0,
        #[cfg(feature = "viewer")]
        show: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scene" | "-s" => {
                if i + 1 < args.len() {
                    opts.scene = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            },
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    opts.out = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            },
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    opts.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            },
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<u32>() {
                        opts.width = Some(w);
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<u32>() {
                        opts.height = Some(h);
                    }
                    i += 1;
                }
            },
            "--resolution" | "-r" => {
                if i + 1 < args.len() {
                    // WxH, e.g. 320x240
                    if let Some((w, h)) = args[i + 1].split_once('x') {
                        if let (Ok(w), Ok(h)) = (w.parse::<u32>(), h.parse::<u32>()) {
                            opts.width = Some(w);
                            opts.height = Some(h);
                        }
                    }
                    i += 1;
                }
            },
            #[cfg(feature = "viewer")]
            "--show" => opts.show = true,
            "--verbose" | "-v" => opts.verbosity = opts.verbosity.saturating_add(1),
            "--help" => {
                print_help();
                std::process::exit(0);
            },
            other => eprintln!("ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    opts
}

fn load_scene(opts: &Options) -> RasterResult<Scene> {
    let mut scene = match &opts.scene {
        Some(path) => {
            info!("loading scene from {}", path.display());
            Scene::load(path)?
        },
        None => Scene::demo(
            opts.width.unwrap_or(DEFAULT_WIDTH),
            opts.height.unwrap_or(DEFAULT_HEIGHT),
        ),
    };

    if let Some(w) = opts.width {
        scene.width = w;
    }
    if let Some(h) = opts.height {
        scene.height = h;
    }
    if let Some(path) = &opts.config {
        info!("loading config from {}", path.display());
        scene.config = Some(RasterConfig::load(path)?);
    }

    Ok(scene)
}

#[cfg(feature = "viewer")]
fn show(rasterizer: &tinyraster::Rasterizer) -> RasterResult<()> {
    use sdl2::keyboard::Keycode;
    use tinyraster::display::{Display, InputEvent, RenderTarget};

    let (width, height) = (rasterizer.width(), rasterizer.height());
    let (mut display, texture_creator) = Display::with_size("tinyraster", width, height)?;
    let mut target = RenderTarget::with_size(&texture_creator, width, height)?;

    println!("Escape or close the window to quit");
    'main: loop {
        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(_) => {},
            }
        }
        display.present(&mut target, rasterizer.buffer())?;
    }

    Ok(())
}

fn run(opts: &Options) -> RasterResult<()> {
    let scene = load_scene(opts)?;
    debug!(
        "scene '{}' at {}x{} with {} commands",
        scene.name,
        scene.width,
        scene.height,
        scene.commands.len()
    );

    let rasterizer = scene.render()?;
    save_ppm(rasterizer.buffer(), &opts.out)?;
    println!(
        "Rendered '{}' ({}x{}) to {}",
        scene.name,
        rasterizer.width(),
        rasterizer.height(),
        opts.out.display()
    );

    #[cfg(feature = "viewer")]
    if opts.show {
        show(&rasterizer)?;
    }

    Ok(())
}

fn main() {
    let opts = parse_args();
    init_logging(opts.verbosity);

    if let Err(e) = run(&opts) {
        eprintln!("tinyraster: {}", e);
        std::process::exit(1);
    }
}
