//! Wavepaint CLI - generate wave-graph paintings and run a timed SVG gallery.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use wavepaint::config::WavepaintConfig;
use wavepaint::painting::{Painting, PaintingOptions};
use wavepaint::random::Range;
use wavepaint::render::svg::SvgCanvas;
use wavepaint::render::ArtTarget;
use wavepaint::{Gallery, GalleryScheduler};

#[derive(Parser)]
#[command(name = "wavepaint")]
#[command(about = "Generate abstract paintings of nodes joined by oscillating waves")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "wavepaint.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Painting overrides shared by both subcommands.
#[derive(clap::Args, Debug)]
struct PaintingArgs {
    /// Number of nodes (overrides the config file)
    #[arg(short, long)]
    num_nodes: Option<usize>,

    /// Lower bound of links drawn per node
    #[arg(long, requires = "links_max")]
    links_min: Option<f64>,

    /// Upper bound (exclusive) of links drawn per node
    #[arg(long, requires = "links_min")]
    links_max: Option<f64>,

    /// Lower bound of the wave factor
    #[arg(long, requires = "wave_max")]
    wave_min: Option<f64>,

    /// Upper bound (exclusive) of the wave factor
    #[arg(long, requires = "wave_min")]
    wave_max: Option<f64>,

    /// Node colors (comma-separated hex values, e.g. "#80add7,#c0334d")
    #[arg(long)]
    colors: Option<String>,
}

impl PaintingArgs {
    fn apply(&self, mut opts: PaintingOptions) -> PaintingOptions {
        if let Some(n) = self.num_nodes {
            opts = opts.with_num_nodes(n);
        }
        if let (Some(min), Some(max)) = (self.links_min, self.links_max) {
            opts = opts.with_links_per_node(Range::new(min, max));
        }
        if let (Some(min), Some(max)) = (self.wave_min, self.wave_max) {
            opts = opts.with_wave_factor(Range::new(min, max));
        }
        if let Some(colors) = &self.colors {
            opts = opts.with_colors(colors.split(',').map(|s| s.trim().to_string()).collect());
        }
        opts
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate a single painting
    Generate {
        #[command(flatten)]
        painting: PaintingArgs,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for generation
        #[arg(short = 'S', long)]
        seed: Option<u64>,

        /// Also write nodes and distinct edges as JSON next to the SVG
        #[arg(long)]
        dump_json: bool,
    },

    /// Repaint a gallery of SVG slots on a timer
    Gallery {
        #[command(flatten)]
        painting: PaintingArgs,

        /// Number of slots
        #[arg(long)]
        slots: Option<usize>,

        /// Seconds between refreshes
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after this many refreshes (default: run until Ctrl-C)
        #[arg(long)]
        ticks: Option<u64>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Seed for the gallery's random stream
        #[arg(short = 'S', long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wavepaint=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = WavepaintConfig::load(Path::new(&cli.config))?;

    match cli.command {
        Commands::Generate {
            painting,
            output,
            seed,
            dump_json,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            let opts = painting.apply(config.painting.clone());
            let mut rng = StdRng::seed_from_u64(seed);

            println!("Generating painting with seed {}...", seed);
            let result = Painting::generate(&opts, &mut rng).context("generating painting")?;
            println!(
                "  {} nodes, {} distinct edges",
                result.nodes().len(),
                result.compute_distinct_edges().len()
            );

            let logical = opts.canvas.unwrap_or_default();
            let mut canvas = SvgCanvas::new(logical, config.output.width, config.output.height);
            if let Some(bg) = &config.output.background {
                canvas = canvas.with_background(bg.clone());
            }
            let mut target = ArtTarget::new(canvas)?;
            target.display(&result)?;

            let output_dir = PathBuf::from(&config.output.directory);
            fs::create_dir_all(&output_dir)?;
            let output_path =
                output.unwrap_or_else(|| output_dir.join(format!("wavepaint_{}.svg", seed)));

            target
                .canvas()
                .write_to(&output_path)
                .with_context(|| format!("writing {}", output_path.display()))?;
            println!("Saved to {}", output_path.display());

            if dump_json {
                let json_path = output_path.with_extension("json");
                let json = serde_json::to_string_pretty(&result.snapshot())?;
                fs::write(&json_path, json)?;
                println!("Saved painting to {}", json_path.display());
            }
        }

        Commands::Gallery {
            painting,
            slots,
            interval,
            ticks,
            output_dir,
            seed,
        } => {
            let mut output = config.output.clone();
            if let Some(dir) = output_dir {
                output.directory = dir.to_string_lossy().into_owned();
            }
            let slots = slots.unwrap_or(config.gallery.slots);
            let interval = Duration::from_secs(interval.unwrap_or(config.gallery.interval_secs));
            let seed = seed.unwrap_or_else(rand::random);
            let opts = painting.apply(config.painting.clone());

            let gallery = Gallery::new(&output, slots, opts, seed)?;
            println!(
                "Painting {} slots into {} every {:?} (seed {})...",
                slots,
                gallery.directory().display(),
                interval,
                seed
            );

            let scheduler = GalleryScheduler::start(gallery, interval, ticks);
            let gallery = if ticks.is_some() {
                scheduler.join().await?
            } else {
                tokio::signal::ctrl_c().await?;
                scheduler.stop().await?
            };
            println!("Stopped after {} refreshes", gallery.ticks());
        }
    }

    Ok(())
}
