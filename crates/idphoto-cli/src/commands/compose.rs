use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use idphoto_core::compose::BackgroundColor;
use idphoto_core::consts::{DEFAULT_OUTPUT_FILENAME, PARALLEL_FILE_THRESHOLD};
use idphoto_core::crop::CropRect;
use idphoto_core::pipeline::config::PhotoConfig;
use idphoto_core::pipeline::{process_file, process_file_reported, PipelineStage, ProgressReporter};
use rayon::prelude::*;
use tracing::{debug, warn};

use super::CropArgs;

#[derive(Args)]
pub struct ComposeArgs {
    /// Input images (JPEG, PNG or GIF)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Config file (TOML); command-line options override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output file, or output directory when several inputs are given
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Background color: a preset name (see `idphoto colors`) or hex
    #[arg(long)]
    pub color: Option<String>,

    /// Manual crop as x,y,width,height in source pixels
    #[arg(long = "crop")]
    pub crop_rect: Option<String>,

    #[command(flatten)]
    pub crop: CropArgs,
}

pub fn run(args: &ComposeArgs) -> Result<()> {
    let config = build_config(args)?;
    let manual_crop = args.crop_rect.as_deref().map(parse_crop).transpose()?;

    crate::summary::print_compose_summary(&config, &args.files, manual_crop.as_ref());

    if args.files.len() < PARALLEL_FILE_THRESHOLD {
        run_single(&args.files[0], &config, manual_crop)
    } else {
        run_batch(args, &config, manual_crop)
    }
}

struct BarReporter {
    pb: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage) {
        self.pb.set_message(stage.to_string());
    }

    fn finish_stage(&self) {
        self.pb.inc(1);
    }
}

fn run_single(input: &Path, config: &PhotoConfig, manual_crop: Option<CropRect>) -> Result<()> {
    let pb = ProgressBar::new(5);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:24} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { pb };

    let output = process_file_reported(input, config, manual_crop, &reporter)
        .with_context(|| format!("Failed to process {}", input.display()))?;
    reporter.pb.finish_with_message("Done");

    crate::summary::print_photo_result(input, &config.output, &output);
    Ok(())
}

fn run_batch(args: &ComposeArgs, config: &PhotoConfig, manual_crop: Option<CropRect>) -> Result<()> {
    if let Some(ref dir) = args.output {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let outputs = batch_output_paths(&args.files, args.output.as_deref())?;

    debug!(files = args.files.len(), "Composing photos in parallel");
    let pb = ProgressBar::new(args.files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Composing [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let results: Vec<(PathBuf, Result<()>)> = args
        .files
        .par_iter()
        .zip(outputs.par_iter())
        .map(|(input, output)| {
            let mut file_config = config.clone();
            file_config.output = output.clone();
            let result = process_file(input, &file_config, manual_crop)
                .map(|_| ())
                .with_context(|| format!("Failed to process {}", input.display()));
            pb.inc(1);
            (file_config.output, result)
        })
        .collect();
    pb.finish();

    let mut failed = 0usize;
    for (output, result) in &results {
        match result {
            Ok(()) => println!("Saved {}", output.display()),
            Err(e) => {
                failed += 1;
                warn!(output = %output.display(), "Photo not written");
                eprintln!("{e:#}");
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} photos failed", results.len());
    }
    Ok(())
}

fn build_config(args: &ComposeArgs) -> Result<PhotoConfig> {
    let mut config: PhotoConfig = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid photo config")?
    } else {
        PhotoConfig::default()
    };

    args.crop.apply(&mut config.auto_crop, &mut config.removal)?;
    if let Some(ref color) = args.color {
        config.background = color
            .parse::<BackgroundColor>()
            .with_context(|| format!("Invalid background color '{color}'"))?;
    }
    if let Some(ref output) = args.output {
        config.output = output.clone();
    }
    Ok(config)
}

fn parse_crop(s: &str) -> Result<CropRect> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("Invalid crop format (expected 'x,y,width,height')")?;
    match values[..] {
        [left, top, width, height] => Ok(CropRect::new(left, top, width, height)),
        _ => bail!("Invalid crop format (expected 'x,y,width,height')"),
    }
}

fn batch_output_path(input: &Path, dir: Option<&Path>, with_extension: bool) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("photo");
    let dir = dir.unwrap_or_else(|| input.parent().unwrap_or(Path::new(".")));
    match input.extension().and_then(|e| e.to_str()) {
        Some(ext) if with_extension => dir.join(format!("{stem}_{ext}_{DEFAULT_OUTPUT_FILENAME}")),
        _ => dir.join(format!("{stem}_{DEFAULT_OUTPUT_FILENAME}")),
    }
}

/// One output path per input. Inputs sharing a stem keep their extension in
/// the name; anything still colliding is an error.
fn batch_output_paths(files: &[PathBuf], dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut counts: HashMap<PathBuf, usize> = HashMap::new();
    for input in files {
        *counts.entry(batch_output_path(input, dir, false)).or_default() += 1;
    }

    let outputs: Vec<PathBuf> = files
        .iter()
        .map(|input| {
            let plain = batch_output_path(input, dir, false);
            let clashes = counts.get(&plain).copied().unwrap_or(0) > 1;
            if clashes {
                batch_output_path(input, dir, true)
            } else {
                plain
            }
        })
        .collect();

    let mut seen = HashSet::new();
    for (input, output) in files.iter().zip(&outputs) {
        if !seen.insert(output) {
            bail!(
                "{} would overwrite {} written for another input",
                input.display(),
                output.display()
            );
        }
    }
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use idphoto_core::removal::RemovalMethod;

    #[test]
    fn test_parse_crop() {
        assert_eq!(
            parse_crop("10, 20,30,40").unwrap(),
            CropRect::new(10.0, 20.0, 30.0, 40.0)
        );
        assert!(parse_crop("10,20,30").is_err());
        assert!(parse_crop("a,b,c,d").is_err());
    }

    fn compose_args(config: Option<PathBuf>) -> ComposeArgs {
        ComposeArgs {
            files: vec![PathBuf::from("photo.jpg")],
            config,
            output: None,
            color: None,
            crop_rect: None,
            crop: CropArgs {
                aspect: None,
                width_fraction: None,
                headroom: None,
                key_color: None,
                tolerance: 24,
            },
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.toml");
        std::fs::write(
            &path,
            r##"
output = "from-file.png"
background = "#003366"

[auto_crop]
aspect_ratio = 1.0
width_fraction = 0.5
"##,
        )
        .unwrap();

        let mut args = compose_args(Some(path));
        let from_file = build_config(&args).unwrap();
        assert_eq!(from_file.output, PathBuf::from("from-file.png"));
        assert_eq!(from_file.background, BackgroundColor::rgb(0x00, 0x33, 0x66));
        assert_eq!(from_file.auto_crop.aspect_ratio, 1.0);
        assert_eq!(from_file.auto_crop.width_fraction, 0.5);

        args.output = Some(PathBuf::from("cli.png"));
        args.color = Some("light blue".into());
        args.crop.aspect = Some("3:4".into());
        args.crop.key_color = Some("#00ff00".into());
        args.crop.tolerance = 12;
        let merged = build_config(&args).unwrap();

        assert_eq!(merged.output, PathBuf::from("cli.png"));
        assert_eq!(merged.background, BackgroundColor::rgb(0xa6, 0xd8, 0xff));
        assert_eq!(merged.auto_crop.aspect_ratio, 0.75);
        // Not given on the command line: kept from the file.
        assert_eq!(merged.auto_crop.width_fraction, 0.5);
        assert_eq!(
            merged.removal,
            RemovalMethod::ColorKey {
                key: BackgroundColor::rgb(0, 255, 0),
                tolerance: 12,
            }
        );
    }

    #[test]
    fn test_bad_flag_values_are_errors() {
        let mut args = compose_args(None);
        args.color = Some("mauve".into());
        assert!(build_config(&args).is_err());

        let mut args = compose_args(None);
        args.crop.aspect = Some("0:4".into());
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_batch_output_path() {
        assert_eq!(
            batch_output_path(Path::new("/photos/anna.jpg"), None, false),
            PathBuf::from("/photos/anna_id-photo.png")
        );
        assert_eq!(
            batch_output_path(Path::new("/photos/anna.jpg"), Some(Path::new("out")), false),
            PathBuf::from("out/anna_id-photo.png")
        );
    }

    #[test]
    fn test_shared_stem_gets_distinct_outputs() {
        let files = [
            PathBuf::from("a/photo.jpg"),
            PathBuf::from("b/photo.png"),
            PathBuf::from("b/ben.jpg"),
        ];
        let outputs = batch_output_paths(&files, Some(Path::new("out"))).unwrap();
        assert_eq!(
            outputs,
            vec![
                PathBuf::from("out/photo_jpg_id-photo.png"),
                PathBuf::from("out/photo_png_id-photo.png"),
                PathBuf::from("out/ben_id-photo.png"),
            ]
        );
    }

    #[test]
    fn test_shared_stem_next_to_inputs() {
        let files = [PathBuf::from("a/photo.jpg"), PathBuf::from("b/photo.jpg")];
        let outputs = batch_output_paths(&files, None).unwrap();
        assert_ne!(outputs[0], outputs[1]);
    }

    #[test]
    fn test_same_stem_and_extension_is_rejected() {
        let files = [PathBuf::from("a/photo.jpg"), PathBuf::from("c/photo.jpg")];
        assert!(batch_output_paths(&files, Some(Path::new("out"))).is_err());
    }
}
