use std::{ffi::OsString, fs::File, io::BufWriter, path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::{self, Context};
use pagecrop::{
    batch::{self, BatchConf},
    page_dir::{PageDir, PageRegion},
    report,
};
use photocrop_common::{
    bin_common::{
        args::{
            extract::{ExtractArgs, ExtractCli},
            profile::Profile,
        },
        init::{init_eyre, init_logger},
        termination,
    },
    utils::fsutils::read_optional_file,
};

#[derive(Parser, Debug)]
#[command(allow_negative_numbers = true)]
/// Cuts the player portraits out of a directory of rasterized slides.
///
/// Pages are named `page_<N>.png` (or jpg) and the portraits are saved as
/// `player_<NNN>.png`. This uses rayon, so the `RAYON_NUM_THREADS` environment variable
/// might be of interest.
struct Cli {
    #[command(flatten)]
    extract: ExtractCli,

    /// Use a named set of settings instead of the individual ones
    #[arg(long, value_enum)]
    profile: Option<Profile>,

    /// Which part of each page the portrait is in
    #[arg(long, value_enum, default_value_t)]
    region: PageRegion,

    /// A file to additionally write the logs to
    #[arg(long)]
    logfile: Option<PathBuf>,

    /// Write what happened to each page to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Where to place the portraits
    #[arg(long, short = 'o', default_value = "players")]
    outdir: PathBuf,

    /// Folder with the pages
    #[arg(default_value = "screenshots")]
    pages_dir: PathBuf,
}

fn cli_arguments() -> eyre::Result<Cli> {
    const ARGS_FILE: &str = ".pagecroprc";
    let mut args: Vec<OsString> = std::env::args_os().collect();

    if args.len() == 1 {
        if let Some(flags) = read_optional_file(ARGS_FILE)
            .wrap_err_with(|| format!("Could not read config file at: {ARGS_FILE}"))?
        {
            args.extend(
                flags
                    .split_whitespace()
                    .map(|s| std::ffi::OsStr::new(s).to_owned()),
            );
        }
    }

    Ok(Cli::parse_from(args))
}

fn round_to_millis(d: Duration) -> Duration {
    Duration::from_millis(d.as_millis().try_into().unwrap_or(u64::MAX))
}

fn main() -> eyre::Result<()> {
    init_eyre()?;
    let cli = cli_arguments()?;
    init_logger(cli.logfile.as_deref())?;

    log::debug!("CLI arguments: {cli:#?}");

    let extract_args: ExtractArgs = match cli.profile {
        Some(profile) => {
            log::info!("Using the {profile:?} profile, ignoring the individual settings");
            profile.into()
        }
        None => cli.extract.to_args(),
    };

    let page_dir = PageDir::open(&cli.pages_dir).wrap_err("failed to list the pages")?;
    if page_dir.pages().is_empty() {
        log::warn!("No pages found in {}", page_dir.dir().display());
        return Ok(());
    }
    log::info!(
        "Found {} pages in {}",
        page_dir.pages().len(),
        page_dir.dir().display()
    );

    std::fs::create_dir_all(&cli.outdir)
        .wrap_err_with(|| format!("failed to create {}", cli.outdir.display()))?;

    let term_cookie =
        termination::Cookie::new().wrap_err("failed to create term cookie")?;

    let conf = BatchConf {
        extract_args,
        region: cli.region,
        outdir: cli.outdir,
    };
    let batch_report = batch::run(&page_dir, &conf, &term_cookie);

    if let Some(report_file) = &cli.report {
        let writer = BufWriter::new(File::create(report_file).wrap_err_with(|| {
            format!("failed to create the report at {}", report_file.display())
        })?);
        report::save_to(writer, &batch_report).wrap_err("failed to write the report")?;
        log::info!("Wrote the report to {}", report_file.display());
    }

    let summary = batch_report.summary();
    log::info!(
        "Extracted {} of {} pages ({:.1}%)",
        summary.extracted,
        summary.total(),
        summary.success_rate()
    );
    log::info!(
        "No subject: {}, failed: {}, skipped: {}",
        summary.no_subject,
        summary.failed,
        summary.skipped
    );
    log::info!(
        "Took {} in total, {} per page",
        humantime::format_duration(round_to_millis(batch_report.elapsed)),
        humantime::format_duration(round_to_millis(batch_report.per_page()))
    );

    if term_cookie.is_terminating() {
        log::warn!("Interrupted, {} pages were skipped", summary.skipped);
    }

    Ok(())
}
