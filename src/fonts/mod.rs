//! Font loading for the report renderer.
//!
//! Text is set in an embedded TrueType family. Liberation Sans, which shares
//! Arial's metrics, is preferred when its files can be found on disk. Without
//! it the DejaVu Sans faces compiled into the crate are used, so rendering
//! never depends on the machine's font setup.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Environment variable that pins the font directory.
pub const FONTS_DIR_ENV: &str = "DG_REPORT_FONTS_DIR";

/// Name of the font family looked up on disk, as used in the file names.
pub const FONT_FAMILY_NAME: &str = "LiberationSans";

const FONT_FILES: &[&str] = &[
    "LiberationSans-Regular.ttf",
    "LiberationSans-Bold.ttf",
    "LiberationSans-Italic.ttf",
    "LiberationSans-BoldItalic.ttf",
];

const SYSTEM_FONT_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/local/share/fonts/liberation",
];

const BUNDLED_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const BUNDLED_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// Where the report font family is loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// A directory holding the four Liberation Sans files.
    Directory(PathBuf),
    /// The DejaVu Sans faces compiled into the crate.
    Bundled,
}

/// Returns the `assets/fonts` directory shipped inside the crate.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

fn pinned_directory(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    env::var_os(FONTS_DIR_ENV)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

fn search_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(&mut candidates, bin_dir.join("assets/fonts"));
        }
    }

    push_unique(&mut candidates, bundled_fonts_source_dir());

    for system in SYSTEM_FONT_DIRECTORIES {
        push_unique(&mut candidates, PathBuf::from(system));
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

fn unusable_reason(path: &Path) -> Option<String> {
    if !path.is_dir() {
        return Some("directory missing".to_owned());
    }
    let missing = missing_font_files(path);
    if missing.is_empty() {
        return None;
    }
    let missing_list = missing
        .iter()
        .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("missing files [{}]", missing_list))
}

/// Decides where the font family comes from.
///
/// A pinned directory (the explicit one, else [`FONTS_DIR_ENV`]) must hold
/// every file. Otherwise the executable's `assets/fonts`, the crate's
/// `assets/fonts` and the usual system locations are searched, and the
/// bundled faces are used when none of them qualifies.
pub fn resolve_font_source(explicit: Option<&Path>) -> Result<FontSource, Error> {
    if let Some(pinned) = pinned_directory(explicit) {
        return match unusable_reason(&pinned) {
            None => Ok(FontSource::Directory(pinned)),
            Some(reason) => Err(Error::new(
                format!(
                    "Unable to load {} from {} ({})",
                    FONT_FAMILY_NAME,
                    pinned.display(),
                    reason
                ),
                io::Error::new(io::ErrorKind::NotFound, "font directory not usable"),
            )),
        };
    }

    for candidate in search_candidates() {
        match unusable_reason(&candidate) {
            None => {
                if SYSTEM_FONT_DIRECTORIES
                    .iter()
                    .any(|system| Path::new(system) == candidate)
                {
                    warn!(
                        "Using system fonts from {}; set {} to pin a directory.",
                        candidate.display(),
                        FONTS_DIR_ENV
                    );
                }
                return Ok(FontSource::Directory(candidate));
            }
            Some(reason) => debug!("skipping font directory {} ({})", candidate.display(), reason),
        }
    }

    Ok(FontSource::Bundled)
}

/// Builds the family from the faces compiled into the crate.
///
/// The form never sets italic text, so the italic slots reuse the upright faces.
pub fn bundled_font_family() -> Result<FontFamily<FontData>, Error> {
    let regular = FontData::new(BUNDLED_REGULAR.to_vec(), None)?;
    let bold = FontData::new(BUNDLED_BOLD.to_vec(), None)?;
    Ok(FontFamily {
        italic: regular.clone(),
        bold_italic: bold.clone(),
        regular,
        bold,
    })
}

/// Loads the report font family for embedding.
pub fn report_font_family(explicit: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    match resolve_font_source(explicit)? {
        FontSource::Directory(directory) => {
            debug!("loading {} from {}", FONT_FAMILY_NAME, directory.display());
            fonts::from_files(&directory, FONT_FAMILY_NAME, None).map_err(|err| {
                Error::new(
                    format!(
                        "Failed to load font family '{}' from {}: {}",
                        FONT_FAMILY_NAME,
                        directory.display(),
                        err
                    ),
                    io::Error::new(io::ErrorKind::Other, err.to_string()),
                )
            })
        }
        FontSource::Bundled => {
            debug!("loading bundled DejaVu Sans faces");
            bundled_font_family()
        }
    }
}

/// Indicates whether a font family can be loaded without an explicit directory.
///
/// Only a broken [`FONTS_DIR_ENV`] makes this false.
pub fn report_fonts_available() -> bool {
    resolve_font_source(None).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_is_pinned() {
        let explicit = Path::new("/__dg_report_explicit__");
        let err = resolve_font_source(Some(explicit)).unwrap_err();
        assert!(err.to_string().contains("/__dg_report_explicit__ (directory missing)"));
    }

    #[test]
    fn crate_assets_are_searched() {
        assert!(search_candidates().contains(&bundled_fonts_source_dir()));
    }

    #[test]
    fn bundled_faces_load() {
        assert!(bundled_font_family().is_ok());
    }

    #[test]
    fn crate_assets_lack_liberation_files() {
        let reason = unusable_reason(&bundled_fonts_source_dir());
        assert!(reason.map_or(true, |reason| reason.contains("LiberationSans-Regular.ttf")));
    }
}
