//! Full interactive runs over a temporary dataset.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use starmatch::io::{gray_image_from_owned, load_gray_image, save_gray_image, FsImageSource};
use starmatch::{ErrorKind, MatchMethod, OwnedImage, SearchSettings, Session};
use std::fs;
use std::io::Cursor;
use std::path::Path;

fn write_png(path: &Path, img: &OwnedImage) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    save_gray_image(&gray_image_from_owned(img).unwrap(), path).unwrap();
}

fn random_image(rng: &mut StdRng, width: usize, height: usize) -> OwnedImage {
    let data = (0..width * height).map(|_| rng.random::<u8>()).collect();
    OwnedImage::new(data, width, height).unwrap()
}

struct Fixture {
    _dir: tempfile::TempDir,
    settings: SearchSettings,
    target: OwnedImage,
}

fn fixture(target_name: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("ConstellationDataset");
    let mut rng = StdRng::seed_from_u64(2024);

    let target = random_image(&mut rng, 40, 32);
    let target_path = root.join("TargetImages").join(target_name);
    write_png(&target_path, &target);

    write_png(&root.join("Lyra/lyra_a.png"), &target.crop(12, 7, 9, 8).unwrap());
    write_png(&root.join("Lyra/extra/lyra_b.png"), &target.crop(0, 20, 6, 6).unwrap());
    write_png(&root.join("Lyra/lyra_wide.png"), &random_image(&mut rng, 41, 5));
    fs::write(root.join("Lyra/broken.png"), b"garbage").unwrap();
    write_png(&root.join("Scorpius/scorpius_1.png"), &target.crop(3, 3, 5, 5).unwrap());
    write_png(&root.join("Gemini/gemini_1.png"), &target.crop(20, 10, 7, 6).unwrap());

    let settings = SearchSettings {
        dataset_root: root,
        target_image: target_path,
        output_dir: dir.path().join("Results_TemplateMatching"),
        ..SearchSettings::default()
    };
    Fixture {
        _dir: dir,
        settings,
        target,
    }
}

#[test]
fn run_scores_every_pattern_and_writes_annotations() {
    let fx = fixture("targetImage1.png");
    let session = Session::new(fx.settings.clone(), FsImageSource);
    let mut input = Cursor::new("pegasus\nlyra\n\n");
    let mut out = Vec::new();

    let outcome = session.run(&mut input, &mut out).unwrap();
    let transcript = String::from_utf8(out).unwrap();

    assert_eq!(outcome.category, "Lyra");
    assert_eq!(outcome.patterns_loaded, 3);
    assert_eq!(outcome.files_skipped, 1);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].0, "lyra_wide");
    assert_eq!(outcome.results.len(), 12);
    assert_eq!(outcome.top.len(), 5);

    assert!(transcript.contains("Invalid class name"));
    assert!(transcript.contains("----- <Loaded 3 images from the dataset> -----"));
    assert!(transcript.contains("----- <Top Matches> -----"));
    assert!(transcript.contains("Processed lyra_a_TM_SQDIFF.png"));

    let sqdiff = outcome
        .results
        .iter()
        .find(|r| r.pattern() == "lyra_a" && r.method() == MatchMethod::Sqdiff)
        .unwrap();
    assert_eq!(sqdiff.top_left(), (12, 7));
    assert_eq!(sqdiff.score(), 0.0);

    for result in &outcome.results {
        let path = fx
            .settings
            .output_dir
            .join(format!("{}.png", result.output_stem()));
        let annotated = load_gray_image(&path).unwrap();
        assert_eq!((annotated.width(), annotated.height()), (40, 32));
        let (x, y) = result.top_left();
        assert_eq!(annotated.data()[y * 40 + x], 255);
    }

    // The canonical target on disk is untouched by annotation.
    let reloaded = load_gray_image(&fx.settings.target_image).unwrap();
    assert_eq!(reloaded, fx.target);
}

#[test]
fn rerunning_overwrites_previous_output() {
    let fx = fixture("targetImage1.png");
    let session = Session::new(fx.settings.clone(), FsImageSource);

    for _ in 0..2 {
        let mut input = Cursor::new("Lyra\n\n");
        let outcome = session.run(&mut input, &mut Vec::<u8>::new()).unwrap();
        assert_eq!(outcome.results.len(), 12);
    }
    let written = fs::read_dir(&fx.settings.output_dir).unwrap().count();
    assert_eq!(written, 12);
}

#[test]
fn scorpius_with_second_target_is_rejected() {
    let fx = fixture("targetImage2.png");
    let session = Session::new(fx.settings.clone(), FsImageSource);
    let mut input = Cursor::new("scorpius\n\n");
    let mut out = Vec::new();

    let err = session.run(&mut input, &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TargetImageInvalid);
    assert!(!fx.settings.output_dir.exists());
}

#[test]
fn scorpius_with_first_target_runs() {
    let fx = fixture("targetImage1-NoLine.png");
    let session = Session::new(fx.settings.clone(), FsImageSource);
    let mut input = Cursor::new("SCORPIUS\n\n");

    let outcome = session.run(&mut input, &mut Vec::<u8>::new()).unwrap();
    assert_eq!(outcome.results.len(), 6);
}

#[test]
fn gemini_runs_against_first_target_only() {
    let fx = fixture("targetImage1.png");
    let session = Session::new(fx.settings.clone(), FsImageSource);
    let outcome = session
        .run(&mut Cursor::new("gemini\n\n"), &mut Vec::<u8>::new())
        .unwrap();
    assert_eq!(outcome.category, "Gemini");
    assert_eq!(outcome.results.len(), 6);

    let fx = fixture("targetImage2.png");
    let err = Session::new(fx.settings.clone(), FsImageSource)
        .run(&mut Cursor::new("Gemini\n\n"), &mut Vec::<u8>::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TargetImageInvalid);
    assert!(!fx.settings.output_dir.exists());
}

#[test]
fn missing_dataset_and_target_are_reported() {
    let fx = fixture("targetImage1.png");

    let settings = SearchSettings {
        dataset_root: fx.settings.dataset_root.join("missing"),
        ..fx.settings.clone()
    };
    let err = Session::new(settings, FsImageSource)
        .run(&mut Cursor::new(""), &mut Vec::<u8>::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DatasetNotFound);

    let settings = SearchSettings {
        target_image: fx.settings.dataset_root.join("TargetImages/targetImage9.png"),
        ..fx.settings.clone()
    };
    let err = Session::new(settings, FsImageSource)
        .run(&mut Cursor::new(""), &mut Vec::<u8>::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TargetImageNotFound);
}

#[test]
fn undecodable_target_is_invalid() {
    let fx = fixture("targetImage1.png");
    fs::write(&fx.settings.target_image, b"not a png").unwrap();

    let err = Session::new(fx.settings.clone(), FsImageSource)
        .run(&mut Cursor::new("Lyra\n\n"), &mut Vec::<u8>::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TargetImageInvalid);
}
