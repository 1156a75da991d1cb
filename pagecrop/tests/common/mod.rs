// NOTE: every test will complain about the functions it doesn't use
#![allow(unused)]

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use photocrop_common::utils::imgutils::{fill_rect, filled};
use tempfile::TempDir;

/// Returns cargo's tmpdir
pub fn cargo_tmpdir() -> PathBuf {
    PathBuf::from(option_env!("CARGO_TARGET_TMPDIR").expect("no cargo tmpdir???"))
}

/// Returns a temporary directory inside cargo's tmpdir
pub fn tmp_dir() -> TempDir {
    tempfile::tempdir_in(cargo_tmpdir()).expect("could not create temporary directory")
}

/// A blank 120x60 slide
pub fn blank_page() -> RgbImage {
    filled(120, 60, 255, 255, 255)
}

/// A slide with a 20x20 portrait at (10, 15) on the left and a bigger 30x30 picture at
/// (80, 10) on the right
pub fn portrait_page() -> RgbImage {
    let mut img = blank_page();
    fill_rect(&mut img, 10, 15, 20, 20, Rgb([120, 80, 60]));
    fill_rect(&mut img, 80, 10, 30, 30, Rgb([30, 30, 30]));
    img
}

pub fn write_page(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).expect("could not save the page");
    path
}
