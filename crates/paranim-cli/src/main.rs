mod dashboard;
mod output;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use paranim_core::hash::hash_frame;
use paranim_core::{
    AnimationConfig, AnimationOverrides, ParanimConfig, ValidConfig, DEFAULT_CONFIG_FILE,
};
use paranim_encode::{encode_png, write_artifact_atomic, ExportFormat, Exporter, LoopMode};
use paranim_render::{FrameGenerator, POINT_COUNT};

#[derive(Parser)]
#[command(
    name = "paranim",
    version,
    about = "Paranim: animated parametric point fields",
    long_about = "Paranim renders a 10,000 point parametric field as a scatter plot.\nPreview single frames, export looping GIF or APNG animations, or tune\nparameters live in the browser dashboard."
)]
struct Cli {
    /// Path to the configuration file (missing file means defaults)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single frame to PNG
    Preview {
        /// Parameter value to render (default: preview_t from the config)
        #[arg(long, allow_negative_numbers = true)]
        t: Option<f64>,

        /// Output file path (default: <output_dir>/preview.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        animation: AnimationArgs,
    },

    /// Export one full period as an animated image
    Export {
        /// Output file path (default: <output_dir>/parametric_<timestamp>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: gif, apng (auto-detected from extension if not set)
        #[arg(short, long)]
        format: Option<String>,

        /// Total number of plays; 0 loops forever
        #[arg(long)]
        loop_count: Option<u16>,

        #[command(flatten)]
        animation: AnimationArgs,
    },

    /// Start the interactive dashboard
    Serve {
        /// Address to bind (default: from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default: from config)
        #[arg(short, long)]
        port: Option<u16>,

        #[command(flatten)]
        animation: AnimationArgs,
    },

    /// Validate the configuration and print the resolved values
    Check {
        #[command(flatten)]
        animation: AnimationArgs,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display version and engine info
    Info,
}

/// Animation parameters that override the config file.
#[derive(Args, Debug, Clone, Default)]
struct AnimationArgs {
    /// Phase speed multiplier
    #[arg(long, allow_negative_numbers = true)]
    frequency: Option<f64>,

    /// Displacement scale
    #[arg(long, allow_negative_numbers = true)]
    amplitude: Option<f64>,

    /// Number of frames in the animation
    #[arg(long = "frames")]
    frame_count: Option<u32>,

    /// Playback rate in frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Marker area in points squared
    #[arg(long, allow_negative_numbers = true)]
    point_size: Option<f64>,

    /// Background color as hex (e.g. #090909)
    #[arg(long)]
    background: Option<String>,

    /// Dot color as hex (e.g. #FFFFFF)
    #[arg(long)]
    dot_color: Option<String>,

    /// Canvas edge length in pixels
    #[arg(long)]
    size: Option<u32>,
}

impl AnimationArgs {
    fn overrides(&self, preview_t: Option<f64>) -> AnimationOverrides {
        AnimationOverrides {
            frequency: self.frequency,
            amplitude: self.amplitude,
            frame_count: self.frame_count,
            fps: self.fps,
            point_size: self.point_size,
            background: self.background.clone(),
            dot_color: self.dot_color.clone(),
            size: self.size,
            preview_t,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Preview {
            t,
            output,
            animation,
        } => {
            let config = load_config(&cli.config)?;
            cmd_preview(&config, &animation, t, output)?;
        }
        Commands::Export {
            output,
            format,
            loop_count,
            animation,
        } => {
            let config = load_config(&cli.config)?;
            cmd_export(&config, &animation, output, format, loop_count)?;
        }
        Commands::Serve {
            host,
            port,
            animation,
        } => {
            let config = load_config(&cli.config)?;
            cmd_serve(&config, &animation, host, port)?;
        }
        Commands::Check { animation } => {
            cmd_check(&cli.config, &animation)?;
        }
        Commands::Init { force } => {
            cmd_init(&cli.config, force)?;
        }
        Commands::Info => {
            cmd_info()?;
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<ParanimConfig> {
    ParanimConfig::load_or_default(path)
        .with_context(|| format!("failed to load config: {}", path.display()))
}

fn validate(base: &AnimationConfig, overrides: &AnimationOverrides) -> Result<ValidConfig> {
    Ok(overrides.apply(base).validate()?)
}

/// Format from `--format`, then the output extension, then the config file.
fn resolve_format(
    flag: Option<&str>,
    output: Option<&Path>,
    configured: &str,
) -> Result<ExportFormat> {
    if let Some(name) = flag {
        return Ok(name.parse::<ExportFormat>()?);
    }
    if let Some(path) = output.filter(|p| p.extension().is_some()) {
        return Ok(ExportFormat::from_path(path)?);
    }
    configured
        .parse::<ExportFormat>()
        .context("invalid [export] format in config")
}

fn cmd_preview(
    config: &ParanimConfig,
    args: &AnimationArgs,
    t: Option<f64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let start = Instant::now();
    let valid = validate(&config.animation, &args.overrides(t))?;

    println!(
        "🖼️ Rendering preview at t = {:.3} ({}x{})",
        valid.preview_t(),
        valid.size(),
        valid.size()
    );
    let frame = FrameGenerator::new().render_preview(&valid);
    let png = encode_png(&frame)?;

    let path = output
        .unwrap_or_else(|| output::default_preview_path(Path::new(&config.export.output_dir)));
    write_artifact_atomic(&path, &png)
        .with_context(|| format!("failed to write preview: {}", path.display()))?;

    println!(
        "✅ Preview written to {} in {:.1}ms",
        path.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    println!("   Hash:     {}", &hash_frame(&frame).to_hex()[..16]);
    Ok(())
}

fn cmd_export(
    config: &ParanimConfig,
    args: &AnimationArgs,
    output: Option<PathBuf>,
    format: Option<String>,
    loop_count: Option<u16>,
) -> Result<()> {
    let start = Instant::now();
    let format = resolve_format(format.as_deref(), output.as_deref(), &config.export.format)?;
    let valid = validate(&config.animation, &args.overrides(None))?;
    let loop_mode = LoopMode::from_count(loop_count.or(config.export.loop_count));

    let path = output.unwrap_or_else(|| {
        output::default_export_path(Path::new(&config.export.output_dir), format)
    });

    println!(
        "🎬 Exporting {} frames at {} fps ({}x{}, {})",
        valid.frame_count(),
        valid.fps(),
        valid.size(),
        valid.size(),
        format
    );

    let artifact = Exporter::new(FrameGenerator::new())
        .with_loop_mode(loop_mode)
        .export_to_file(&valid, format, &path)
        .with_context(|| format!("export to {} failed", path.display()))?;

    println!("✅ Export complete!");
    println!("   Output:   {}", path.display());
    println!(
        "   Frames:   {} @ {:.1}ms",
        artifact.frame_count,
        artifact.delay.as_millis_f64()
    );
    println!("   Size:     {} KB", artifact.bytes.len() / 1024);
    println!("   Hash:     {}", &artifact.content_hash.to_hex()[..16]);
    println!("   Time:     {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn cmd_serve(
    config: &ParanimConfig,
    args: &AnimationArgs,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let base = args.overrides(None).apply(&config.animation);
    // Refuse to start with a base config every request would inherit as invalid.
    base.validate().context("dashboard base configuration is invalid")?;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let exporter = Exporter::new(FrameGenerator::new())
        .with_loop_mode(LoopMode::from_count(config.export.loop_count));

    run_async(dashboard::run_dashboard(
        &host,
        port,
        dashboard::AppState::new(base, exporter),
    ))
}

fn cmd_check(path: &Path, args: &AnimationArgs) -> Result<()> {
    println!("🔍 Checking {}", path.display());

    let config = load_config(path)?;
    if path.exists() {
        println!("   ✓ Parse OK");
    } else {
        println!("   ℹ️ No config file, using defaults");
    }

    let valid = match args.overrides(None).apply(&config.animation).validate() {
        Ok(valid) => valid,
        Err(e) => {
            for issue in e.issues() {
                println!("   ❌ {}", issue);
            }
            return Err(e).context("configuration check failed");
        }
    };
    resolve_format(None, None, &config.export.format)?;
    println!("   ✓ Validation OK");

    println!();
    println!("   frequency:   {}", valid.frequency());
    println!("   amplitude:   {}", valid.amplitude());
    println!("   frames:      {}", valid.frame_count());
    println!("   fps:         {}", valid.fps());
    println!("   point_size:  {}", valid.point_size());
    println!("   background:  {}", valid.background());
    println!("   dot_color:   {}", valid.dot_color());
    println!("   size:        {}x{}", valid.size(), valid.size());
    println!("   preview_t:   {}", valid.preview_t());
    println!("   format:      {}", config.export.format);
    println!("   output_dir:  {}", config.export.output_dir);
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        );
    }

    let contents = ParanimConfig::default()
        .to_toml_string()
        .context("failed to serialize default config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write config: {}", path.display()))?;

    println!("✨ Created {}", path.display());
    println!("   Run `paranim preview` or `paranim serve` to get started");
    Ok(())
}

fn cmd_info() -> Result<()> {
    let defaults = AnimationConfig::default();
    println!("🌀 Paranim");
    println!("   Version:   {}", env!("CARGO_PKG_VERSION"));
    println!("   Renderer:  CPU (single-threaded, {} points)", POINT_COUNT);
    println!("   Formats:   gif, apng");
    println!(
        "   Defaults:  {} frames @ {} fps, {}x{}",
        defaults.frame_count, defaults.fps, defaults.size, defaults.size
    );
    println!("   Config:    {}", DEFAULT_CONFIG_FILE);
    println!();
    println!("   Set RUST_LOG=debug for per-frame logging.");
    Ok(())
}

fn run_async<F>(future: F) -> Result<()>
where
    F: std::future::Future<Output = Result<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize async runtime")?;
    runtime.block_on(future)
}
