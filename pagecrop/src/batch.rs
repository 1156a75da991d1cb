use std::{
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
    time::{Duration, Instant},
};

use image::imageops::crop_imm;
use photocrop_common::{
    bin_common::{args::extract::ExtractArgs, termination::Cookie},
    subject::ExtractError,
    utils::time::Every,
};
use rayon::prelude::*;

use crate::{
    page_dir::{Page, PageDir, PageRegion},
    report::{BatchReport, Outcome, PageReport},
};

#[derive(Debug, Clone)]
pub struct BatchConf {
    pub extract_args: ExtractArgs,
    pub region: PageRegion,
    /// Must exist
    pub outdir: PathBuf,
}

/// Extracts the portrait from one page and saves it. Never falls back to some other part
/// of the page when no subject is found.
pub fn process_page(page: &Page, conf: &BatchConf) -> Outcome {
    let img = match page.load() {
        Ok(img) => img,
        Err(e) => {
            log::warn!("page {}: {e}", page.number);
            return Outcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    let rect = conf.region.rect(img.width(), img.height());
    let region = crop_imm(&img, rect.x, rect.y, rect.width, rect.height).to_image();

    let extraction = match conf.extract_args.extract(&region) {
        Ok(extraction) => extraction,
        Err(ExtractError::NoSubjectFound) => {
            log::warn!("page {}: no subject found, skipping it", page.number);
            return Outcome::NoSubject;
        }
        Err(e) => {
            log::warn!("page {}: {e}", page.number);
            return Outcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    match page.save_portrait(&extraction.image, &conf.outdir) {
        Ok(output) => {
            let bounds = extraction.bounds.translate(rect.x, rect.y);
            log::debug!("page {}: {bounds} -> {}", page.number, output.display());
            Outcome::Extracted { bounds, output }
        }
        Err(e) => {
            log::error!("page {}: {e}", page.number);
            Outcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Processes all pages in parallel. Pages that haven't started when the cookie is set
/// are skipped, and pages with a taken page number fail without being read, since their
/// portrait would overwrite another one. The reports are in page number order.
pub fn run(page_dir: &PageDir, conf: &BatchConf, cookie: &Cookie) -> BatchReport {
    let start = Instant::now();
    let pages = page_dir.pages();
    let done = AtomicUsize::new(0);
    let progress = Every::new(Duration::from_secs(10));

    let mut reports = pages
        .par_iter()
        .map(|page| {
            if cookie.is_terminating() {
                return PageReport {
                    page: page.number,
                    source: page.path.clone(),
                    outcome: Outcome::Skipped,
                    elapsed: Duration::ZERO,
                };
            }

            let page_start = Instant::now();
            let outcome = process_page(page, conf);
            let elapsed = page_start.elapsed();

            let done = done.fetch_add(1, Ordering::Relaxed) + 1;
            progress.perform(|| {
                log::info!(
                    "{done}/{} pages done ({:.1}%)",
                    pages.len(),
                    done as f64 / pages.len() as f64 * 100.0
                )
            });

            PageReport {
                page: page.number,
                source: page.path.clone(),
                outcome,
                elapsed,
            }
        })
        .collect::<Vec<_>>();

    reports.extend(page_dir.duplicates().iter().map(|page| {
        let taken_by = page_dir
            .page(page.number)
            .map(|kept| kept.path.display().to_string())
            .unwrap_or_default();
        PageReport {
            page: page.number,
            source: page.path.clone(),
            outcome: Outcome::Failed {
                reason: format!(
                    "{} is already written from {taken_by}",
                    page.output_name()
                ),
            },
            elapsed: Duration::ZERO,
        }
    }));
    reports.sort_by_key(|report| report.page);

    BatchReport {
        region: conf.region,
        pages: reports,
        elapsed: start.elapsed(),
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use image::Rgb;
    use photocrop_common::{
        bin_common::args::profile::Profile,
        subject::bounds::Bounds,
        utils::imgutils::{fill_rect, filled},
    };

    use super::*;

    fn conf(outdir: PathBuf, region: PageRegion) -> BatchConf {
        BatchConf {
            extract_args: Profile::SafeMargin.args(),
            region,
            outdir,
        }
    }

    fn write_page(dir: &std::path::Path, number: u32) -> Page {
        let mut img = filled(80, 40, 255, 255, 255);
        fill_rect(&mut img, 50, 10, 12, 12, Rgb([10, 120, 10]));
        let path = dir.join(format!("page_{number}.png"));
        img.save(&path).unwrap();
        Page::from_path(path).unwrap()
    }

    #[test]
    fn bounds_are_in_page_coordinates() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(dir.path(), 4);

        let outcome = process_page(&page, &conf(dir.path().to_owned(), PageRegion::RightHalf));
        let output = dir.path().join("player_004.png");
        assert_eq!(
            Outcome::Extracted {
                bounds: Bounds {
                    x_min: 50,
                    y_min: 10,
                    x_max: 61,
                    y_max: 21
                },
                output: output.clone(),
            },
            outcome
        );
        assert_eq!((12, 12), image::open(output).unwrap().to_rgb8().dimensions());
    }

    #[test]
    fn empty_half_has_no_subject() {
        let dir = tempfile::tempdir().unwrap();
        let page = write_page(dir.path(), 1);
        let outcome = process_page(&page, &conf(dir.path().to_owned(), PageRegion::LeftHalf));
        assert_eq!(Outcome::NoSubject, outcome);
        assert!(!dir.path().join("player_001.png").exists());
    }

    #[test]
    fn unreadable_page_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page_9.png");
        fs::write(&path, b"garbage").unwrap();
        let page = Page::from_path(path).unwrap();
        let outcome = process_page(&page, &conf(dir.path().to_owned(), PageRegion::Full));
        assert!(matches!(outcome, Outcome::Failed { .. }));
    }

    #[test]
    fn terminated_batch_skips_everything() {
        let dir = tempfile::tempdir().unwrap();
        write_page(dir.path(), 1);
        write_page(dir.path(), 2);
        let page_dir = PageDir::open(dir.path()).unwrap();
        let cookie = Cookie::inert();
        cookie.terminate();

        let report = run(&page_dir, &conf(dir.path().to_owned(), PageRegion::Full), &cookie);
        assert_eq!(2, report.summary().skipped);
        assert_eq!(vec![1, 2], report.pages.iter().map(|p| p.page).collect::<Vec<_>>());
    }
}
