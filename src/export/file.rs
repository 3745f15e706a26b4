//! Naming and writing exported images to disk.

use super::ImageFile;
use crate::CanvasError;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Default chrono template for exported file names.
pub const DEFAULT_FILENAME_TEMPLATE: &str = "artwork_%Y-%m-%d_%H%M%S";

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `extension` - File extension (e.g., "png")
pub fn generate_filename(template: &str, extension: &str) -> String {
    let now = Local::now();
    let stem = now.format(template).to_string();
    let stem = if stem.trim().is_empty() {
        "artwork".to_string()
    } else {
        stem.replace(['/', '\\'], "_")
    };
    format!("{stem}.{extension}")
}

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, CanvasError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }
    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());
    Ok(canonical)
}

/// Picks a path in `directory` for `name` that does not exist yet.
///
/// Two saves within the same second share a timestamped name, so later ones
/// get a `-1`, `-2`, ... suffix.
fn unique_path(directory: &Path, name: &str) -> PathBuf {
    let candidate = directory.join(name);
    if !candidate.exists() {
        return candidate;
    }
    let path = Path::new(name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let mut counter = 1u32;
    loop {
        let candidate = directory.join(format!("{stem}-{counter}{extension}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Writes an exported image into `directory` and returns its path.
///
/// The file is readable by the current user only.
pub fn save_image(image: &ImageFile, directory: &Path) -> Result<PathBuf, CanvasError> {
    let directory = ensure_directory_exists(directory)?;
    let file_path = unique_path(&directory, &image.name);

    log::info!(
        "Saving image to: {} ({} bytes)",
        file_path.display(),
        image.bytes.len()
    );
    fs::write(&file_path, &image.bytes[..])?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn image(name: &str) -> ImageFile {
        ImageFile {
            name: name.to_string(),
            mime: super::super::PNG_MIME,
            bytes: Rc::from(&b"\x89PNG"[..]),
        }
    }

    #[test]
    fn filename_uses_template_and_extension() {
        let filename = generate_filename("art_%Y", "png");
        assert!(filename.starts_with("art_2"));
        assert!(filename.ends_with(".png"));
        assert_eq!(generate_filename("", "png"), "artwork.png");
        assert_eq!(generate_filename("a/b", "png"), "a_b.png");
    }

    #[test]
    fn expand_tilde_only_touches_home_prefix() {
        assert!(!expand_tilde("~/Pictures").to_string_lossy().starts_with('~'));
        assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
    }

    #[test]
    fn save_image_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = save_image(&image("same.png"), dir.path()).unwrap();
        let second = save_image(&image("same.png"), dir.path()).unwrap();
        assert_ne!(first, second);
        assert!(second.ends_with("same-1.png"));
        assert_eq!(fs::read(&second).unwrap(), b"\x89PNG");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&first).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn save_image_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = save_image(&image("x.png"), &nested).unwrap();
        assert!(path.exists());
    }
}
