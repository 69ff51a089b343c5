mod common;

use std::sync::Mutex;

use idphoto_core::compose::BackgroundColor;
use idphoto_core::crop::{AutoCropConfig, CropRect};
use idphoto_core::error::IdPhotoError;
use idphoto_core::io::{load_image, save_png};
use idphoto_core::pipeline::config::PhotoConfig;
use idphoto_core::pipeline::{
    process_file, process_file_reported, process_photo, NoOpReporter, PipelineStage,
    ProgressReporter,
};
use idphoto_core::raster::RasterImage;
use idphoto_core::removal::RemovalMethod;

use common::{portrait, SUBJECT};

#[derive(Default)]
struct RecordingReporter {
    stages: Mutex<Vec<PipelineStage>>,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: PipelineStage) {
        self.stages.lock().unwrap().push(stage);
    }
}

#[test]
fn test_process_photo_defaults() {
    let out = process_photo(&portrait(), &PhotoConfig::default(), None, &NoOpReporter).unwrap();
    assert!(!out.manual_crop);
    assert_eq!(out.crop, out.suggestion.rect);
    assert_eq!((out.image.width(), out.image.height()), (84, 112));
    assert!(!out.image.has_transparency());
    assert_eq!(out.image.pixel(0, 0), BackgroundColor::WHITE.to_rgba());
}

#[test]
fn test_manual_crop_overrides_suggestion() {
    let manual = CropRect::new(0.0, 0.0, 150.0, 200.0);
    let out = process_photo(&portrait(), &PhotoConfig::default(), Some(manual), &NoOpReporter)
        .unwrap();
    assert!(out.manual_crop);
    assert_eq!(out.crop, manual);
    assert_ne!(out.suggestion.rect, manual);
    assert_eq!((out.image.width(), out.image.height()), (150, 200));
}

#[test]
fn test_manual_crop_outside_image_fails() {
    let manual = CropRect::new(100.0, 0.0, 150.0, 200.0);
    let err = process_photo(&portrait(), &PhotoConfig::default(), Some(manual), &NoOpReporter)
        .unwrap_err();
    assert!(matches!(err, IdPhotoError::InvalidCrop(_)));
}

#[test]
fn test_color_key_removal_on_green_screen() {
    let mut img = RasterImage::filled(120, 160, [0, 255, 0, 255]);
    for y in 40..160 {
        for x in 30..90 {
            img.set_pixel(x, y, SUBJECT);
        }
    }
    let config = PhotoConfig {
        removal: RemovalMethod::ColorKey {
            key: BackgroundColor::rgb(0, 255, 0),
            tolerance: 20,
        },
        background: BackgroundColor::rgb(0xa6, 0xd8, 0xff),
        ..PhotoConfig::default()
    };

    let out = process_photo(&img, &config, None, &NoOpReporter).unwrap();
    let bounds = out.suggestion.bounds.unwrap();
    assert_eq!((bounds.min_x, bounds.max_x), (30, 89));
    assert_eq!(bounds.min_y, 40);
    // No green left in the composited photo.
    for y in 0..out.image.height() {
        for x in 0..out.image.width() {
            assert_ne!(out.image.pixel(x, y), [0, 255, 0, 255]);
        }
    }
}

#[test]
fn test_process_file_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("upload.png");
    save_png(&portrait(), &input).unwrap();

    let config = PhotoConfig {
        output: dir.path().join("id-photo.png"),
        auto_crop: AutoCropConfig::with_aspect_ratio(1.0),
        ..PhotoConfig::default()
    };
    let reporter = RecordingReporter::default();
    let out = process_file_reported(&input, &config, None, &reporter).unwrap();

    let written = load_image(&config.output).unwrap();
    assert_eq!(written, out.image);
    assert_eq!(written.width(), written.height());
    assert_eq!(
        *reporter.stages.lock().unwrap(),
        vec![
            PipelineStage::Reading,
            PipelineStage::RemovingBackground,
            PipelineStage::ProposingCrop,
            PipelineStage::Compositing,
            PipelineStage::Writing,
        ]
    );
}

#[test]
fn test_process_file_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = PhotoConfig {
        output: dir.path().join("out.png"),
        ..PhotoConfig::default()
    };
    let err = process_file(&dir.path().join("missing.png"), &config, None).unwrap_err();
    assert!(matches!(err, IdPhotoError::Io(_)));
    assert!(!config.output.exists());
}
