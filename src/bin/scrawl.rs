use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use scrawl::{parse_matrix, Prediction, Raster, Recognizer, RecognizerConfig};

/// Recognize handwritten digits with a pre-trained network.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// JSON recognizer configuration; flags below override it.
    #[clap(long)]
    config: Option<PathBuf>,
    /// Model name, resolved to `{model}-weights-{k}.csv`.
    #[clap(short, long)]
    model: Option<String>,
    /// Directory holding the weight tables.
    #[clap(long, env = "SCRAWL_WEIGHTS_DIR")]
    weights_dir: Option<PathBuf>,
    /// Comma-separated feature vectors, one per line.
    #[clap(long, conflicts_with = "raw")]
    features: Option<PathBuf>,
    /// Raw RGBA8 pixel dump of a drawing.
    #[clap(long, requires_all = ["width", "height"])]
    raw: Option<PathBuf>,
    #[clap(long)]
    width: Option<usize>,
    #[clap(long)]
    height: Option<usize>,
    /// Log the extracted grid of each drawing.
    #[clap(long)]
    debug: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RecognizerConfig::from_json_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => RecognizerConfig::default(),
    };
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(dir) = args.weights_dir {
        config.weights_dir = dir;
    }
    config.debug |= args.debug;

    let mut recognizer = Recognizer::new(config);
    recognizer.begin_load()?;
    tracing::info!("Loading model {}...", recognizer.config().model);
    recognizer.wait().context("failed to load model")?;

    if let Some(path) = args.features {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let table = parse_matrix(&text)?;
        for (i, row) in table.view().rows().into_iter().enumerate() {
            let prediction = recognizer.predict(&row.to_vec())?;
            report(&recognizer, i, &prediction)?;
        }
    } else if let (Some(path), Some(width), Some(height)) = (args.raw, args.width, args.height) {
        let bytes = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let raster = Raster::from_rgba(width, height, bytes)?;
        let prediction = recognizer.recognize(&raster)?;
        report(&recognizer, 0, &prediction)?;
    } else {
        bail!("Must specify either --features or --raw with --width and --height");
    }

    Ok(())
}

fn report(recognizer: &Recognizer, ix: usize, prediction: &Prediction) -> Result<()> {
    let digit = recognizer.digit(prediction)?;
    let guesses = recognizer
        .guesses(prediction)
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<String>>()
        .join("  ");
    println!("{}: {}  [{}]", ix, digit, guesses);
    Ok(())
}
