//! Build-time utilities shared by the `es` build scripts.
//!
//! The helpers render reproducible manual page metadata and decide where the
//! generated pages land so packagers can collect them from a stable location.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use time::{OffsetDateTime, format_description::well_known::Iso8601};

const FALLBACK_DATE: &str = "1970-01-01";

enum SourceDateError {
    Missing,
    InvalidInteger { raw: String },
    InvalidTimestamp { raw: String },
}

/// Derives the manual page date from `SOURCE_DATE_EPOCH`.
///
/// Warnings are collected without the `cargo:warning=` prefix so the build
/// script decides how to surface them.
pub fn manual_date_from_env(warnings: &mut Vec<String>) -> String {
    let raw = env::var("SOURCE_DATE_EPOCH").ok();
    manual_date(raw.as_deref(), warnings)
}

/// Formats a `SOURCE_DATE_EPOCH` value as an ISO 8601 date.
///
/// Missing values fall back to the Unix epoch silently; malformed values fall
/// back with a warning.
///
/// # Examples
/// ```
/// use esm_build_util::manual_date;
///
/// let mut warnings = Vec::new();
/// assert_eq!(manual_date(Some("86400"), &mut warnings), "1970-01-02");
/// assert!(warnings.is_empty());
/// ```
pub fn manual_date(raw: Option<&str>, warnings: &mut Vec<String>) -> String {
    let value = match parse_source_date(raw) {
        Ok(value) => value,
        Err(error) => {
            push_source_date_warning(warnings, &error);
            return FALLBACK_DATE.into();
        }
    };

    value.format(&Iso8601::DATE).unwrap_or_else(|_| {
        warnings.push(format!(
            "SOURCE_DATE_EPOCH could not be formatted; falling back to {FALLBACK_DATE}"
        ));
        FALLBACK_DATE.into()
    })
}

fn parse_source_date(raw: Option<&str>) -> Result<OffsetDateTime, SourceDateError> {
    let text = raw.ok_or(SourceDateError::Missing)?.trim();
    let timestamp = text
        .parse::<i64>()
        .map_err(|_| SourceDateError::InvalidInteger {
            raw: text.to_owned(),
        })?;
    OffsetDateTime::from_unix_timestamp(timestamp).map_err(|_| {
        SourceDateError::InvalidTimestamp {
            raw: text.to_owned(),
        }
    })
}

fn push_source_date_warning(warnings: &mut Vec<String>, error: &SourceDateError) {
    match error {
        SourceDateError::Missing => {}
        SourceDateError::InvalidInteger { raw } => warnings.push(format!(
            "Invalid SOURCE_DATE_EPOCH '{raw}'; expected integer seconds since Unix epoch; \
             falling back to {FALLBACK_DATE}"
        )),
        SourceDateError::InvalidTimestamp { raw } => warnings.push(format!(
            "Invalid SOURCE_DATE_EPOCH '{raw}'; not a valid Unix timestamp; falling back to \
             {FALLBACK_DATE}"
        )),
    }
}

/// Computes the directory for generated man pages.
///
/// The workspace `target` directory is located by walking up from `out_dir`.
/// When no such ancestor exists the relative `target` directory is used.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use esm_build_util::out_dir_for_target_profile;
///
/// let out_dir = Path::new("/work/target/release/build/esm-cli-abc123/out");
/// let dir = out_dir_for_target_profile("x86_64-unknown-linux-gnu", "release", Some(out_dir));
/// assert_eq!(
///     dir,
///     Path::new("/work/target/generated-man/x86_64-unknown-linux-gnu/release"),
/// );
/// ```
#[must_use]
pub fn out_dir_for_target_profile(target: &str, profile: &str, out_dir: Option<&Path>) -> PathBuf {
    let base = out_dir
        .and_then(find_target_ancestor)
        .unwrap_or_else(|| PathBuf::from("target"));
    base.join("generated-man").join(target).join(profile)
}

fn find_target_ancestor(path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .find(|candidate| candidate.file_name().and_then(|name| name.to_str()) == Some("target"))
        .map(Path::to_path_buf)
}

/// Writes a man page into `dir`, replacing any previous copy atomically.
///
/// # Errors
///
/// Returns the underlying [`io::Error`] when the directory cannot be created
/// or the page cannot be written or renamed into place.
pub fn write_man_page(data: &[u8], dir: &Path, page_name: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let destination = dir.join(page_name);
    let staging = dir.join(format!("{page_name}.tmp"));
    fs::write(&staging, data)?;
    if destination.exists() {
        fs::remove_file(&destination)?;
    }
    fs::rename(&staging, &destination)?;
    Ok(destination)
}
