use anyhow::{Context, Result};
use clap::Parser;
use mintcanvas::draw::Background;
use mintcanvas::export::{self, ImageFile, ObjectUrl};
use mintcanvas::script::Script;
use mintcanvas::{CanvasEngine, Config, InputRouter, ToolKind};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "mintcanvas")]
#[command(version, about = "Raster canvas drawing engine for NFT artwork")]
struct Cli {
    /// Input script to replay (TOML, one [[events]] table per event)
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Configuration file (defaults to ~/.config/mintcanvas/config.toml)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory saved images are written to
    #[arg(long, short = 'o', value_name = "DIR")]
    output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, value_name = "PX")]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long, value_name = "PX")]
    height: Option<u32>,

    /// Background preset, hex color, or "#top..#bottom" gradient
    #[arg(long, short = 'b', value_name = "BACKGROUND")]
    background: Option<String>,

    /// Initial tool (brush, eraser, line, rectangle, circle, polygon, text,
    /// fill, eyedropper, selection)
    #[arg(long, short = 't', value_name = "TOOL")]
    tool: Option<ToolKind>,

    /// Initial brush color as #rrggbb
    #[arg(long, value_name = "HEX")]
    color: Option<String>,

    /// Initial brush size in pixels
    #[arg(long, value_name = "PX")]
    size: Option<f64>,

    /// Also write the displayed canvas (background included) to this PNG file
    #[arg(long, short = 'p', value_name = "FILE")]
    preview: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(script_path) = cli.script.as_deref() else {
        println!("mintcanvas: Raster canvas drawing engine for NFT artwork");
        println!();
        println!("Usage:");
        println!("  mintcanvas --script <FILE>    Replay an input script and save the artwork");
        println!("  mintcanvas --help             Show all options");
        println!();
        println!("Script example:");
        println!("  [[events]]");
        println!("  type = \"pointer_down\"");
        println!("  x = 10.0");
        println!("  y = 10.0");
        println!();
        println!("Saved images go to the [export] save_directory of the config file");
        println!("unless --output is given.");
        return Ok(());
    };

    let config = load_config(cli.config.as_deref())?;
    let script = Script::load(script_path)?;

    let mut options = config.mount_options();
    if let Some(width) = cli.width {
        options.width = width;
    }
    if let Some(height) = cli.height {
        options.height = height;
    }
    if let Some(background) = &cli.background {
        options.background = background
            .parse::<Background>()
            .with_context(|| format!("Invalid background '{background}'"))?;
    }
    if let Some(tool) = cli.tool {
        options.tool = tool;
    }
    if let Some(color) = &cli.color {
        options.color = color
            .parse()
            .with_context(|| format!("Invalid color '{color}'"))?;
    }
    if let Some(size) = cli.size {
        options.brush_size = size;
    }

    let output_dir = match &cli.output {
        Some(dir) => dir.clone(),
        None => export::expand_tilde(&config.export.save_directory),
    };

    let mut engine = CanvasEngine::mount(options, config.engine_settings());
    let mut router = InputRouter::from_config(&config.keybindings)
        .map_err(|err| anyhow::anyhow!("Invalid keybindings: {err}"))?;

    let saved: Rc<RefCell<Vec<PathBuf>>> = Rc::default();
    let failures: Rc<RefCell<Vec<String>>> = Rc::default();
    {
        let saved = saved.clone();
        let failures = failures.clone();
        let output_dir = output_dir.clone();
        engine.set_on_image_generated(move |file: &ImageFile, url: &ObjectUrl| {
            match export::save_image(file, &output_dir) {
                Ok(path) => {
                    log::debug!("{url} written to {}", path.display());
                    saved.borrow_mut().push(path);
                }
                Err(err) => failures.borrow_mut().push(format!("{}: {err}", file.name)),
            }
        });
    }

    log::info!(
        "Replaying {} events from {}",
        script.len(),
        script_path.display()
    );
    script.replay(&mut router, &mut engine);

    // A script without an explicit save still produces its artwork.
    let generated = !saved.borrow().is_empty() || !failures.borrow().is_empty();
    if !generated && !engine.save() {
        anyhow::bail!("Canvas has no size; nothing to save");
    }

    if let Some(message) = failures.borrow().first() {
        anyhow::bail!("Failed to save image {message}");
    }

    for path in saved.borrow().iter() {
        println!("Saved {}", path.display());
    }

    if let Some(preview_path) = &cli.preview {
        let composed = engine.compose()?;
        let mut file = std::fs::File::create(preview_path)
            .with_context(|| format!("Failed to create {}", preview_path.display()))?;
        composed
            .write_to_png(&mut file)
            .with_context(|| format!("Failed to write preview {}", preview_path.display()))?;
        println!("Preview {}", preview_path.display());
    }

    Ok(())
}
