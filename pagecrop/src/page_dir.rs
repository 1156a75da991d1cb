use std::{
    io,
    path::{Path, PathBuf},
};

use image::{math::Rect, ImageError, RgbImage};
use photocrop_common::utils::fsutils::all_files;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("Error when '{context}', apparently: {kind}")]
pub struct Error {
    context: String,
    kind: ErrorKind,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("image: {0}")]
    Image(#[from] ImageError),
}

trait ErrContext<T> {
    fn context<S: ToString, F: FnOnce() -> S>(self, provider: F) -> Result<T>;
}

impl<T, E> ErrContext<T> for std::result::Result<T, E>
where
    E: Into<ErrorKind>,
{
    fn context<S: ToString, F: FnOnce() -> S>(self, provider: F) -> Result<T> {
        self.map_err(|e| Error {
            context: provider().to_string(),
            kind: e.into(),
        })
    }
}

const EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// A rasterized slide, named `page_<number>.<png|jpg|jpeg>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub path: PathBuf,
}

impl Page {
    /// None if the file isn't named like a page
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if !EXTENSIONS.contains(&ext.as_str()) {
            return None;
        }

        let number = path
            .file_stem()?
            .to_str()?
            .strip_prefix("page_")?
            .parse()
            .ok()?;

        Some(Self { number, path })
    }

    pub fn load(&self) -> Result<RgbImage> {
        let img = image::open(&self.path).context(|| self.path.display())?;
        Ok(img.to_rgb8())
    }

    /// The file name of the portrait cut out of this page
    pub fn output_name(&self) -> String {
        format!("player_{:03}.png", self.number)
    }

    pub fn save_portrait(&self, portrait: &RgbImage, outdir: &Path) -> Result<PathBuf> {
        let output = outdir.join(self.output_name());
        portrait.save(&output).context(|| output.display())?;
        Ok(output)
    }
}

/// All pages in a directory, in page number order. Page numbers are unique, the pages
/// that share a number with an earlier one (by path) are set aside as duplicates.
#[derive(Debug)]
pub struct PageDir {
    dir: PathBuf,
    pages: Vec<Page>,
    duplicates: Vec<Page>,
}

impl PageDir {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let files: Vec<PathBuf> = all_files([&dir]).context(|| dir.display())?;

        let mut pages: Vec<Page> = files
            .into_iter()
            .filter_map(|path| {
                let page = Page::from_path(&path);
                if page.is_none() {
                    log::debug!("ignoring {path:?}, not a page");
                }
                page
            })
            .collect();
        pages.sort_by(|a, b| (a.number, &a.path).cmp(&(b.number, &b.path)));

        let mut unique: Vec<Page> = Vec::with_capacity(pages.len());
        let mut duplicates = Vec::new();
        for page in pages {
            match unique.last() {
                Some(kept) if kept.number == page.number => {
                    log::warn!(
                        "{:?} has the same page number as {:?}, not processing it",
                        page.path,
                        kept.path
                    );
                    duplicates.push(page);
                }
                _ => unique.push(page),
            }
        }

        Ok(Self {
            dir,
            pages: unique,
            duplicates,
        })
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Pages whose number was already taken
    pub fn duplicates(&self) -> &[Page] {
        &self.duplicates
    }

    /// The page with the given number
    pub fn page(&self, number: u32) -> Option<&Page> {
        self.pages
            .binary_search_by_key(&number, |page| page.number)
            .ok()
            .map(|i| &self.pages[i])
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// The part of a page the portrait is searched in
#[derive(
    clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize,
)]
pub enum PageRegion {
    Full,
    #[default]
    LeftHalf,
    RightHalf,
}

impl PageRegion {
    /// The region inside a page of the given size
    pub fn rect(self, width: u32, height: u32) -> Rect {
        let half = width / 2;
        let (x, width) = match self {
            PageRegion::Full => (0, width),
            PageRegion::LeftHalf => (0, half),
            PageRegion::RightHalf => (half, width - half),
        };
        Rect {
            x,
            y: 0,
            width,
            height,
        }
    }
}
