use clap::{Parser, Subcommand};
use ridgematch::io::load_gray_image;
use ridgematch::{
    rank_of, ExtractConfig, Extractor, Gallery, Hit, MatchConfig, Matcher, Minutia, MinutiaKind,
    MinutiaeSet, RankTally, SearchOutcome, Smoothing, Strategy, DEFAULT_SEARCH_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Fingerprint minutiae enrollment and search")]
struct Cli {
    /// Optional JSON configuration file.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Enable tracing output for performance profiling.
    #[arg(long, global = true)]
    trace: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract minutiae from images and store them in a gallery file.
    Enroll {
        /// JSON template store (created if missing).
        #[arg(long, value_name = "FILE")]
        gallery: PathBuf,
        /// Identity to enroll under; defaults to each image's file stem.
        #[arg(long)]
        id: Option<String>,
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
    /// Identify an image against a gallery file.
    Search {
        #[arg(long, value_name = "FILE")]
        gallery: PathBuf,
        /// Minimum score for a hit to count as a match.
        #[arg(long, default_value_t = DEFAULT_SEARCH_THRESHOLD)]
        threshold: f32,
        /// Report only the best K candidates.
        #[arg(long)]
        topk: Option<usize>,
        image: PathBuf,
    },
    /// Rank-k identification accuracy of probe images against a gallery file.
    Evaluate {
        #[arg(long, value_name = "FILE")]
        gallery: PathBuf,
        /// Ranks to report, comma separated.
        #[arg(long, value_delimiter = ',', default_values_t = [1usize, 5, 10])]
        ranks: Vec<usize>,
        /// Identity is the file stem up to this character (`001_3.bmp` -> `001`
        /// with `_`); the whole stem when unset.
        #[arg(long)]
        id_separator: Option<char>,
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
    /// Score two images against each other.
    Compare { image_a: PathBuf, image_b: PathBuf },
    /// Print an example config and exit.
    ExampleConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SmoothingConfig {
    Auto,
    Always,
    Never,
}

impl From<SmoothingConfig> for Smoothing {
    fn from(value: SmoothingConfig) -> Self {
        match value {
            SmoothingConfig::Auto => Smoothing::Auto,
            SmoothingConfig::Always => Smoothing::Always,
            SmoothingConfig::Never => Smoothing::Never,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StrategyConfig {
    Greedy,
    Optimal,
}

impl From<StrategyConfig> for Strategy {
    fn from(value: StrategyConfig) -> Self {
        match value {
            StrategyConfig::Greedy => Strategy::Greedy,
            StrategyConfig::Optimal => Strategy::Optimal,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ExtractConfigJson {
    smoothing: SmoothingConfig,
    border_margin: usize,
    min_separation: f32,
    orientation_radius: usize,
    bifurcation_min_pixels: usize,
}

impl Default for ExtractConfigJson {
    fn default() -> Self {
        let cfg = ExtractConfig::default();
        Self {
            smoothing: SmoothingConfig::Auto,
            border_margin: cfg.border_margin,
            min_separation: cfg.min_separation,
            orientation_radius: cfg.orientation_radius,
            bifurcation_min_pixels: cfg.bifurcation_min_pixels,
        }
    }
}

impl From<ExtractConfigJson> for ExtractConfig {
    fn from(value: ExtractConfigJson) -> Self {
        Self {
            smoothing: value.smoothing.into(),
            border_margin: value.border_margin,
            min_separation: value.min_separation,
            orientation_radius: value.orientation_radius,
            bifurcation_min_pixels: value.bifurcation_min_pixels,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MatchConfigJson {
    distance_tolerance: Option<f32>,
    angle_tolerance: Option<f32>,
    reference_points: Option<usize>,
    strategy: Option<StrategyConfig>,
    parallel: Option<bool>,
}

impl MatchConfigJson {
    /// Overrides the fields present in the JSON on top of `base`.
    fn apply(self, base: MatchConfig) -> MatchConfig {
        MatchConfig {
            distance_tolerance: self.distance_tolerance.unwrap_or(base.distance_tolerance),
            angle_tolerance: self.angle_tolerance.unwrap_or(base.angle_tolerance),
            reference_points: self.reference_points.unwrap_or(base.reference_points),
            strategy: self.strategy.map_or(base.strategy, Strategy::from),
            parallel: self.parallel.unwrap_or(base.parallel),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    extract: ExtractConfigJson,
    /// Gallery search tolerances.
    #[serde(rename = "match")]
    match_cfg: Option<MatchConfigJson>,
    /// One-to-one comparison tolerances.
    verify: Option<MatchConfigJson>,
}

impl Config {
    fn load(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(path) => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
            None => Ok(Self::default()),
        }
    }

    fn gallery_matcher(&mut self) -> ridgematch::RidgeMatchResult<Matcher> {
        let base = MatchConfig::gallery();
        Matcher::new(match self.match_cfg.take() {
            Some(json) => json.apply(base),
            None => base,
        })
    }

    fn verify_matcher(&mut self) -> ridgematch::RidgeMatchResult<Matcher> {
        let base = MatchConfig::verification();
        Matcher::new(match self.verify.take() {
            Some(json) => json.apply(base),
            None => base,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum KindRecord {
    Ending,
    Bifurcation,
}

#[derive(Debug, Serialize, Deserialize)]
struct MinutiaRecord {
    x: usize,
    y: usize,
    kind: KindRecord,
    angles: Vec<f32>,
}

impl From<&Minutia> for MinutiaRecord {
    fn from(value: &Minutia) -> Self {
        Self {
            x: value.x(),
            y: value.y(),
            kind: match value.kind() {
                MinutiaKind::Ending => KindRecord::Ending,
                MinutiaKind::Bifurcation => KindRecord::Bifurcation,
            },
            angles: value.orientation().angles().to_vec(),
        }
    }
}

impl TryFrom<MinutiaRecord> for Minutia {
    type Error = ridgematch::RidgeMatchError;

    fn try_from(value: MinutiaRecord) -> Result<Self, Self::Error> {
        let kind = match value.kind {
            KindRecord::Ending => MinutiaKind::Ending,
            KindRecord::Bifurcation => MinutiaKind::Bifurcation,
        };
        Minutia::new(value.x, value.y, kind, &value.angles)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TemplateRecord {
    id: String,
    minutiae: Vec<MinutiaRecord>,
}

fn load_gallery(path: &Path) -> Result<Gallery, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Ok(Gallery::new());
    }
    let records: Vec<TemplateRecord> = serde_json::from_str(&fs::read_to_string(path)?)?;
    let mut gallery = Gallery::new();
    for record in records {
        let set = record
            .minutiae
            .into_iter()
            .map(Minutia::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        gallery.enroll(record.id, MinutiaeSet::new(set));
    }
    Ok(gallery)
}

fn save_gallery(path: &Path, gallery: &Gallery) -> Result<(), Box<dyn std::error::Error>> {
    let records: Vec<TemplateRecord> = gallery
        .iter()
        .map(|(id, set)| TemplateRecord {
            id: id.to_string(),
            minutiae: set.iter().map(MinutiaRecord::from).collect(),
        })
        .collect();
    fs::write(path, serde_json::to_string_pretty(&records)?)?;
    Ok(())
}

fn extract_file(extractor: &Extractor, path: &Path) -> Result<MinutiaeSet, Box<dyn std::error::Error>> {
    let image = load_gray_image(path)?;
    let set = extractor.extract(image.view())?;
    if !set.is_reliable() {
        eprintln!(
            "warning: {} yielded only {} minutiae; matching will be unreliable",
            path.display(),
            set.len()
        );
    }
    Ok(set)
}

#[derive(Debug, Serialize)]
struct HitRecord {
    id: String,
    score: f32,
    matched: usize,
}

impl From<Hit> for HitRecord {
    fn from(value: Hit) -> Self {
        Self {
            id: value.id,
            score: value.score,
            matched: value.matched,
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchOutput {
    best: Option<HitRecord>,
    max_score: f32,
    candidates: Vec<HitRecord>,
}

#[derive(Debug, Serialize)]
struct EvaluateOutput {
    total: usize,
    skipped: usize,
    accuracy: BTreeMap<usize, f32>,
    mean_genuine: Option<f32>,
    mean_impostor: Option<f32>,
}

impl From<&RankTally> for EvaluateOutput {
    fn from(value: &RankTally) -> Self {
        Self {
            total: value.total(),
            skipped: value.skipped(),
            accuracy: value.accuracy().into_iter().collect(),
            mean_genuine: value.mean_genuine(),
            mean_impostor: value.mean_impostor(),
        }
    }
}

fn stem_identity(path: &Path, separator: Option<char>) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    let id = match separator {
        Some(sep) => stem.split(sep).next().unwrap_or_default(),
        None => &*stem,
    };
    Some(id.to_string())
}

#[derive(Debug, Serialize)]
struct CompareOutput {
    score: f32,
    matched: usize,
    minutiae_a: usize,
    minutiae_b: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("ridgematch=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    let setup = || -> Result<(Config, Extractor), Box<dyn std::error::Error>> {
        let mut config = Config::load(cli.config.as_deref())?;
        let extractor = Extractor::new(std::mem::take(&mut config.extract).into())?;
        Ok((config, extractor))
    };

    match cli.command {
        Command::ExampleConfig => println!("{EXAMPLE_JSON}"),
        Command::Enroll {
            gallery: store,
            id,
            images,
        } => {
            if id.is_some() && images.len() > 1 {
                return Err("--id can only be used with a single image".into());
            }
            let (_, extractor) = setup()?;
            let mut gallery = load_gallery(&store)?;
            for path in &images {
                let identity = match &id {
                    Some(id) => id.clone(),
                    None => stem_identity(path, None).ok_or("image path has no file name")?,
                };
                let set = extract_file(&extractor, path)?;
                let count = set.len();
                let replaced = gallery.enroll(identity.clone(), set).is_some();
                tracing::info!(id = %identity, minutiae = count, replaced, "enrolled");
                println!("{identity}: {count} minutiae");
            }
            save_gallery(&store, &gallery)?;
        }
        Command::Search {
            gallery: store,
            threshold,
            topk,
            image,
        } => {
            let (mut config, extractor) = setup()?;
            let gallery = load_gallery(&store)?;
            let matcher = config.gallery_matcher()?;
            let query = extract_file(&extractor, &image)?;
            let mut hits = matcher.identify(&query, &gallery);
            let outcome = SearchOutcome::from_ranked(&hits, threshold);
            if let Some(k) = topk {
                hits.truncate(k);
            }
            let output = SearchOutput {
                best: outcome.best.map(HitRecord::from),
                max_score: outcome.max_score,
                candidates: hits.into_iter().map(HitRecord::from).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Evaluate {
            gallery: store,
            ranks,
            id_separator,
            images,
        } => {
            let (mut config, extractor) = setup()?;
            let gallery = load_gallery(&store)?;
            let matcher = config.gallery_matcher()?;
            let mut tally = RankTally::new(&ranks);
            for path in &images {
                let true_id =
                    stem_identity(path, id_separator).ok_or("image path has no file name")?;
                let query = match load_gray_image(path) {
                    Ok(image) => extractor.extract(image.view())?,
                    Err(err) => {
                        eprintln!("warning: skipping {}: {err}", path.display());
                        tally.skip();
                        continue;
                    }
                };
                if !query.is_reliable() {
                    tally.skip();
                    continue;
                }
                let hits = matcher.identify(&query, &gallery);
                tracing::info!(
                    probe = %path.display(),
                    id = %true_id,
                    rank = ?rank_of(&hits, &true_id),
                    "probe ranked"
                );
                tally.record(&hits, &true_id);
            }
            let output = EvaluateOutput::from(&tally);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Compare { image_a, image_b } => {
            let (mut config, extractor) = setup()?;
            let matcher = config.verify_matcher()?;
            let a = extract_file(&extractor, &image_a)?;
            let b = extract_file(&extractor, &image_b)?;
            let cmp = matcher.compare(&a, &b);
            let output = CompareOutput {
                score: cmp.score,
                matched: cmp.matched,
                minutiae_a: a.len(),
                minutiae_b: b.len(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::stem_identity;
    use std::path::Path;

    #[test]
    fn identity_comes_from_the_file_stem() {
        let path = Path::new("probes/001_3.bmp");
        assert_eq!(stem_identity(path, None).as_deref(), Some("001_3"));
        assert_eq!(stem_identity(path, Some('_')).as_deref(), Some("001"));
        assert_eq!(
            stem_identity(Path::new("user7.png"), Some('_')).as_deref(),
            Some("user7")
        );
        assert_eq!(stem_identity(Path::new("/"), None), None);
    }
}
