//! Category discovery and pattern collection over an on-disk dataset.

use starmatch::category::list_categories;
use starmatch::io::{gray_image_from_owned, save_gray_image, FsImageSource};
use starmatch::{CandidateCatalog, CategorySelector, ErrorKind, OwnedImage};
use std::fs;
use std::path::Path;

fn write_png(path: &Path, img: &OwnedImage) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    save_gray_image(&gray_image_from_owned(img).unwrap(), path).unwrap();
}

fn skip_markers() -> Vec<String> {
    vec!["TargetImages".to_string()]
}

#[test]
fn categories_are_directories_without_image_names() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("Orion")).unwrap();
    fs::create_dir_all(root.join("Leo")).unwrap();
    fs::create_dir_all(root.join("TargetImages")).unwrap();
    fs::create_dir_all(root.join("odd.png")).unwrap();
    fs::write(root.join("README.txt"), b"dataset").unwrap();
    fs::write(root.join("preview.jpg"), b"jpeg bytes").unwrap();

    let categories = list_categories(root, &skip_markers()).unwrap();
    assert_eq!(categories, vec!["Leo".to_string(), "Orion".to_string()]);

    let selector = CategorySelector::discover(root, &skip_markers()).unwrap();
    assert_eq!(selector.resolve("lEO"), Some("Leo"));
    assert_eq!(selector.resolve("targetimages"), None);
}

#[test]
fn missing_root_is_dataset_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = list_categories(&dir.path().join("nope"), &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DatasetNotFound);
}

#[test]
fn catalog_walks_recursively_and_skips_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let img = OwnedImage::new((0u8..16).collect(), 4, 4).unwrap();

    write_png(&root.join("Orion/orion_b.png"), &img);
    write_png(&root.join("Orion/orion_a.png"), &img);
    write_png(&root.join("Orion/nested/orion_c.png"), &img);
    write_png(&root.join("Orion/TargetImages/targetImage1.png"), &img);
    fs::write(root.join("Orion/notes.txt"), b"not a pattern").unwrap();
    fs::write(root.join("Orion/corrupt.jpg"), b"not a jpeg").unwrap();

    let catalog = CandidateCatalog::new(FsImageSource).with_skip_markers(skip_markers());
    let load = catalog.collect(root, "Orion");

    let names: Vec<_> = load.patterns.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["orion_c", "orion_a", "orion_b"]);
    assert!(load.patterns.iter().all(|p| p.category() == "Orion"));
    assert_eq!(load.patterns[1].image(), &img);

    assert_eq!(load.skipped.len(), 1);
    assert!(load.skipped[0].0.ends_with("corrupt.jpg"));
    assert_eq!(load.skipped[0].1.kind(), ErrorKind::MatchComputation);
}

#[test]
fn missing_category_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = CandidateCatalog::new(FsImageSource);
    let load = catalog.collect(dir.path(), "Lyra");
    assert!(load.patterns.is_empty());
    assert!(load.skipped.is_empty());
}
