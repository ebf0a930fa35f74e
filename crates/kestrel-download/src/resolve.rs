//! Save-path resolution: filename sanitizing, extension inference and
//! collision-free naming.

use std::path::{Path, PathBuf};

/// Platform download directory, falling back to `./Downloads`.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("Downloads"))
}

/// Strip any path components from a host-supplied filename.
pub fn sanitize_file_name(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download")
        .trim();

    if name.is_empty() {
        "download".to_string()
    } else {
        name.to_string()
    }
}

/// Append an extension derived from the MIME type when the name has none
/// and the type maps to exactly one extension; otherwise the name is
/// returned unchanged.
pub fn with_inferred_extension(name: &str, mime_type: Option<&str>) -> String {
    if Path::new(name).extension().is_some() {
        return name.to_string();
    }

    let Some(mime_type) = mime_type else {
        return name.to_string();
    };

    match extensions_for_mime(mime_type) {
        [ext] => format!("{}.{}", name, ext),
        _ => name.to_string(),
    }
}

/// Resolve a path that does not collide with an existing file, suffixing
/// `name (1).ext`, `name (2).ext`, … until a free name is found.
pub fn unused_path(path: PathBuf) -> PathBuf {
    if !path.exists() {
        return path;
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("download")
        .to_string();
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_string);
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let mut counter = 1u32;
    loop {
        let candidate = match &extension {
            Some(ext) => dir.join(format!("{} ({}).{}", stem, counter, ext)),
            None => dir.join(format!("{} ({})", stem, counter)),
        };
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Full save-path policy for a new download.
///
/// An explicit `filename_override` joins the directory verbatim. Otherwise
/// the suggested name is sanitized, gains an inferred extension when the
/// MIME type pins one down, and is resolved to an unused path on disk.
pub fn resolve_save_path(
    directory: &Path,
    filename_override: Option<&str>,
    suggested: &str,
    mime_type: Option<&str>,
) -> PathBuf {
    if let Some(name) = filename_override {
        return directory.join(name);
    }

    let name = with_inferred_extension(&sanitize_file_name(suggested), mime_type);
    unused_path(directory.join(name))
}

/// Extensions registered for a MIME type. Types mapping to several
/// extensions (or none) leave extension inference alone.
fn extensions_for_mime(mime_type: &str) -> &'static [&'static str] {
    match mime_type {
        // Images
        "image/png" => &["png"],
        "image/jpeg" => &["jpg", "jpeg", "jpe"],
        "image/gif" => &["gif"],
        "image/webp" => &["webp"],
        "image/svg+xml" => &["svg"],

        // Documents
        "application/pdf" => &["pdf"],
        "application/msword" => &["doc", "dot"],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => &["docx"],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => &["xlsx"],

        // Text
        "text/plain" => &["txt", "text", "conf", "log"],
        "text/markdown" => &["md", "markdown"],
        "text/html" => &["html", "htm"],
        "text/css" => &["css"],
        "text/csv" => &["csv"],

        // Code and data
        "application/json" => &["json"],
        "application/javascript" => &["js"],
        "application/xml" => &["xml", "xsd"],

        // Archives
        "application/zip" => &["zip"],
        "application/gzip" => &["gz"],
        "application/x-tar" => &["tar"],
        "application/x-7z-compressed" => &["7z"],

        // Media
        "audio/mpeg" => &["mp3", "mpga"],
        "video/mp4" => &["mp4", "mp4v"],

        _ => &[],
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn download_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|h| PathBuf::from(h).join("Downloads"))
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Downloads"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DOWNLOAD_DIR")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join("Downloads"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
