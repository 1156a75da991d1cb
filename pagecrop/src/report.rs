use std::{path::PathBuf, time::Duration};

use photocrop_common::subject::bounds::Bounds;
use serde::{Deserialize, Serialize};

use crate::page_dir::PageRegion;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `bounds` are in page coordinates
    Extracted { bounds: Bounds, output: PathBuf },
    NoSubject,
    Failed { reason: String },
    /// The batch was interrupted before the page was started
    Skipped,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PageReport {
    pub page: u32,
    pub source: PathBuf,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub region: PageRegion,
    pub pages: Vec<PageReport>,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub extracted: usize,
    pub no_subject: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.extracted + self.no_subject + self.failed + self.skipped
    }

    /// Percentage of pages a portrait was extracted from
    pub fn success_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.extracted as f64 / total as f64 * 100.0,
        }
    }
}

impl BatchReport {
    pub fn summary(&self) -> Summary {
        self.pages
            .iter()
            .fold(Summary::default(), |mut sum, page| {
                match page.outcome {
                    Outcome::Extracted { .. } => sum.extracted += 1,
                    Outcome::NoSubject => sum.no_subject += 1,
                    Outcome::Failed { .. } => sum.failed += 1,
                    Outcome::Skipped => sum.skipped += 1,
                }
                sum
            })
    }

    /// Average time spent on each page that was not skipped
    pub fn per_page(&self) -> Duration {
        let started = self.summary();
        let started = started.total() - started.skipped;
        match u32::try_from(started) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(n) => self.elapsed / n,
        }
    }
}

pub fn save_to(writer: impl std::io::Write, report: &BatchReport) -> ron::Result<()> {
    let conf = ron::ser::PrettyConfig::new().struct_names(true);
    ron::ser::to_writer_pretty(writer, report, conf)
}

pub fn read_from(reader: impl std::io::Read) -> ron::error::SpannedResult<BatchReport> {
    ron::de::from_reader(reader)
}

#[cfg(test)]
mod test {
    use super::*;

    fn report() -> BatchReport {
        let page = |page, outcome| PageReport {
            page,
            source: PathBuf::from(format!("pages/page_{page}.png")),
            outcome,
            elapsed: Duration::from_millis(100),
        };
        BatchReport {
            region: PageRegion::LeftHalf,
            pages: vec![
                page(
                    1,
                    Outcome::Extracted {
                        bounds: Bounds {
                            x_min: 3,
                            y_min: 4,
                            x_max: 50,
                            y_max: 60,
                        },
                        output: PathBuf::from("players/player_001.png"),
                    },
                ),
                page(2, Outcome::NoSubject),
                page(
                    3,
                    Outcome::Failed {
                        reason: "broken".to_string(),
                    },
                ),
                page(4, Outcome::Skipped),
            ],
            elapsed: Duration::from_secs(3),
        }
    }

    #[test]
    fn summary_counts() {
        let summary = report().summary();
        assert_eq!(
            Summary {
                extracted: 1,
                no_subject: 1,
                failed: 1,
                skipped: 1
            },
            summary
        );
        assert_eq!(4, summary.total());
        assert!((summary.success_rate() - 25.0).abs() < 1e-9);
        assert_eq!(Duration::from_secs(1), report().per_page());
    }

    #[test]
    fn empty_summary() {
        let empty = BatchReport {
            region: PageRegion::Full,
            pages: vec![],
            elapsed: Duration::ZERO,
        };
        assert_eq!(0.0, empty.summary().success_rate());
        assert_eq!(Duration::ZERO, empty.per_page());
    }

    #[test]
    fn readable_after_saving() {
        let mut buf = Vec::new();
        save_to(&mut buf, &report()).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.contains("NoSubject"), "{text}");
        assert_eq!(report(), read_from(buf.as_slice()).unwrap());
    }
}
