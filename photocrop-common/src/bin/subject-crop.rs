use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{self, Context};
use photocrop_common::{
    bin_common::{
        args::{
            extract::{ExtractArgs, ExtractCli},
            profile::Profile,
        },
        init::{init_eyre, init_logger},
    },
    subject::ExtractError,
};

#[derive(Parser)]
#[command(allow_negative_numbers = true)]
/// Crops scanned photos to the subject in them
struct Cli {
    #[command(flatten)]
    extract: ExtractCli,

    /// Use a named set of settings instead of the individual ones
    #[arg(long, value_enum)]
    profile: Option<Profile>,

    /// Also save the mask of the subject
    #[arg(long)]
    mask: bool,

    /// Where to put the cropped images
    #[arg(short, long, default_value = ".")]
    outdir: PathBuf,

    /// The images to crop
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn output_path(outdir: &Path, input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    outdir.join(format!("{stem}_{suffix}.png"))
}

fn main() -> eyre::Result<()> {
    init_eyre()?;
    init_logger(None)?;
    let cli = Cli::parse();

    let args: ExtractArgs = match cli.profile {
        Some(profile) => {
            log::info!("using the {profile:?} profile");
            profile.into()
        }
        None => cli.extract.to_args(),
    };

    std::fs::create_dir_all(&cli.outdir)
        .wrap_err_with(|| format!("could not create {:?}", cli.outdir))?;

    for input in &cli.inputs {
        let pic = image::open(input)
            .wrap_err_with(|| format!("Could not open {:?}", input))?
            .to_rgb8();

        let subject = match args.subject_mask(&pic) {
            Ok(subject) => subject,
            Err(ExtractError::NoSubjectFound) => {
                println!("{}: no subject", input.display());
                continue;
            }
            Err(e @ ExtractError::InvalidImage(_)) => {
                log::warn!("skipping {:?}: {e}", input);
                continue;
            }
        };

        let extraction = args.extract_with_mask(&pic, &subject)?;
        let out = output_path(&cli.outdir, input, "subject");
        extraction
            .image
            .save(&out)
            .wrap_err_with(|| format!("could not save {:?}", out))?;
        println!("{}: {} -> {}", input.display(), extraction.bounds, out.display());

        if cli.mask {
            let out = output_path(&cli.outdir, input, "mask");
            subject
                .0
                .save(&out)
                .wrap_err_with(|| format!("could not save {:?}", out))?;
        }
    }

    Ok(())
}
