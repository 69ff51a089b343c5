use std::path::{Path, PathBuf};

use console::Style;
use idphoto_core::crop::{AutoCropConfig, CropRect, CropSuggestion, PixelRect};
use idphoto_core::pipeline::config::PhotoConfig;
use idphoto_core::pipeline::PhotoOutput;
use idphoto_core::raster::RasterImage;
use idphoto_core::removal::RemovalMethod;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

fn format_rect(rect: &CropRect) -> String {
    format!(
        "{:.1}x{:.1} at ({:.1}, {:.1})",
        rect.width, rect.height, rect.left, rect.top
    )
}

fn headroom_label(config: &AutoCropConfig) -> String {
    format!("{:.0}%", config.clamped_headroom_fraction() * 100.0)
}

fn removal_name(removal: &RemovalMethod) -> String {
    match removal {
        RemovalMethod::Passthrough => "input alpha".into(),
        RemovalMethod::ColorKey { key, tolerance } => format!("color key {key} \u{b1}{tolerance}"),
    }
}

pub fn print_suggestion(
    file: &Path,
    image: &RasterImage,
    config: &AutoCropConfig,
    suggestion: &CropSuggestion,
    pixels: &PixelRect,
) {
    let s = Styles::new();
    print_title(&s, "Crop Suggestion");

    println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(file.display()));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{}x{}", image.width(), image.height()))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Aspect"),
        s.value.apply_to(format!("{:.4}", config.aspect_ratio))
    );
    println!();

    println!("  {}", s.header.apply_to("Subject"));
    match (&suggestion.bounds, &suggestion.silhouette) {
        (Some(bounds), Some(silhouette)) => {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Bounds"),
                s.value.apply_to(format!(
                    "x {}..{}, y {}..{}",
                    bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y
                ))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Head end"),
                s.value.apply_to(format!("y = {:.1}", silhouette.head_end_y))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Shoulders"),
                s.value.apply_to(format!("y = {:.1}", silhouette.shoulder_end_y))
            );
        }
        _ => println!(
            "    {:<12}{}",
            s.label.apply_to("Bounds"),
            s.disabled.apply_to("no foreground, using default box")
        ),
    }
    println!();

    println!("  {}", s.header.apply_to("Crop"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Raw"),
        s.value.apply_to(format_rect(&suggestion.rect))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Pixels"),
        s.method.apply_to(format!(
            "{}x{} at ({}, {})",
            pixels.width, pixels.height, pixels.x, pixels.y
        ))
    );
    println!();
}

pub fn print_compose_summary(config: &PhotoConfig, files: &[PathBuf], manual_crop: Option<&CropRect>) {
    let s = Styles::new();
    print_title(&s, "ID Photo");

    if let [file] = files {
        println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(file.display()));
        println!(
            "  {:<14}{}",
            s.label.apply_to("Output"),
            s.path.apply_to(config.output.display())
        );
    } else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Inputs"),
            s.value.apply_to(format!("{} files", files.len()))
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Background"),
        s.value.apply_to(config.background)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Removal"),
        s.method.apply_to(removal_name(&config.removal))
    );
    println!();

    println!("  {}", s.header.apply_to("Crop"));
    match manual_crop {
        Some(rect) => println!(
            "    {:<12}{}",
            s.label.apply_to("Manual"),
            s.value.apply_to(format_rect(rect))
        ),
        None => {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Aspect"),
                s.value.apply_to(format!("{:.4}", config.auto_crop.aspect_ratio))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Size"),
                s.value
                    .apply_to(format!("{:.0}% of subject", config.auto_crop.width_fraction * 100.0))
            );
            println!(
                "    {:<12}{}",
                s.label.apply_to("Headroom"),
                s.value.apply_to(headroom_label(&config.auto_crop))
            );
        }
    }
    println!();
}

pub fn print_photo_result(input: &Path, output_path: &Path, output: &PhotoOutput) {
    let s = Styles::new();
    let source = if output.manual_crop {
        s.method.apply_to("manual")
    } else if output.suggestion.is_fallback() {
        s.disabled.apply_to("default box")
    } else {
        s.method.apply_to("estimated")
    };

    println!();
    println!(
        "  {:<14}{} ({})",
        s.label.apply_to("Crop"),
        s.value.apply_to(format_rect(&output.crop)),
        source
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Photo"),
        s.value
            .apply_to(format!("{}x{}", output.image.width(), output.image.height()))
    );
    println!(
        "  {:<14}{} -> {}",
        s.label.apply_to("Saved"),
        s.path.apply_to(input.display()),
        s.path.apply_to(output_path.display())
    );
}
