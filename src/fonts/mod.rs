//! Font discovery for the contract renderer.
//!
//! The document is set in the PDF built-in Helvetica family, so no font program is embedded.
//! `genpdf` still measures text with real TrueType metrics; those are read from the Liberation
//! Sans family, which shares Helvetica's advance widths.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{self, Builtin, FontData, FontFamily};
use log::{debug, warn};

/// Name of the font family providing the text metrics.
pub const METRICS_FONT_FAMILY_NAME: &str = "LiberationSans";

/// Environment variable that overrides the font search path.
pub const FONTS_DIR_ENV: &str = "CMR_SAMPLE_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "LiberationSans-Regular.ttf",
    "LiberationSans-Bold.ttf",
    "LiberationSans-Italic.ttf",
    "LiberationSans-BoldItalic.ttf",
];

const SYSTEM_FONT_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/TTF",
];

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env::var_os(FONTS_DIR_ENV) {
        if !path.is_empty() {
            candidates.push(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(&mut candidates, bin_dir.join("assets/fonts"));
        }
    }

    push_unique(
        &mut candidates,
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"),
    );

    for directory in SYSTEM_FONT_DIRECTORIES {
        push_unique(&mut candidates, PathBuf::from(directory));
    }

    candidates
}

fn missing_font_files(path: &Path) -> Vec<PathBuf> {
    FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

/// Returns the first directory holding every metrics font file.
pub fn resolve_font_directory() -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        if !candidate.is_dir() {
            debug!("Font directory {} does not exist", candidate.display());
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        let missing = missing_font_files(&candidate);
        if missing.is_empty() {
            debug!("Using font metrics from {}", candidate.display());
            return Ok(candidate);
        }

        let missing_list = missing
            .iter()
            .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
            .collect::<Vec<_>>()
            .join(", ");
        warn!(
            "Skipping font directory {}: missing [{}]",
            candidate.display(),
            missing_list
        );
        attempts.push(format!(
            "{} (missing files [{}])",
            candidate.display(),
            missing_list
        ));
    }

    Err(Error::new(
        format!(
            "Unable to locate {} font metrics. Checked: {}. Install the Liberation fonts or set {}.",
            METRICS_FONT_FAMILY_NAME,
            attempts.join(", "),
            FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "metrics fonts not found"),
    ))
}

/// Returns the Helvetica family backed by Liberation Sans metrics.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory()?;

    fonts::from_files(&directory, METRICS_FONT_FAMILY_NAME, Some(Builtin::Helvetica)).map_err(
        |err| {
            Error::new(
                format!(
                    "Failed to load font family '{}' from {}: {}",
                    METRICS_FONT_FAMILY_NAME,
                    directory.display(),
                    err
                ),
                io::Error::new(io::ErrorKind::Other, err.to_string()),
            )
        },
    )
}

/// Indicates whether the metrics fonts can be found on this machine.
pub fn default_fonts_available() -> bool {
    resolve_font_directory().is_ok()
}
