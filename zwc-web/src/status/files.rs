//! Library file counts
//!
//! Directory walks follow symlinks; a library folder may be a link to
//! external storage.

use regex::Regex;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;
use zwc_common::{Error, Result};

/// Compile a file-name pattern where `*` matches any run of characters and
/// `?` exactly one; everything else is literal
fn matcher(pattern: &str) -> Result<Regex> {
    let mut re = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            _ => re.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    re.push('$');
    Regex::new(&re).map_err(|e| Error::InvalidInput(format!("bad file pattern '{}': {}", pattern, e)))
}

/// Count regular files under `path`, optionally only those whose file name
/// matches `pattern` (`*` and `?` wildcards)
///
/// A missing directory counts as empty.
pub fn count_files(path: &Path, pattern: Option<&str>) -> Result<usize> {
    let matcher = pattern.map(matcher).transpose()?;

    let count = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping entry under {}: {}", path.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| match &matcher {
            Some(re) => re.is_match(&entry.file_name().to_string_lossy()),
            None => true,
        })
        .count();
    Ok(count)
}

/// Count directories exactly `depth` levels below `path`
fn count_dirs_at_depth(path: &Path, depth: usize) -> usize {
    WalkDir::new(path)
        .follow_links(true)
        .min_depth(depth)
        .max_depth(depth)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .count()
}

/// Number of user presets across the supported engines
///
/// LV2 presets are counted by their `manifest.ttl`, Pure Data presets are
/// directories (`puredata/<category>/<preset>`), Pianoteq presets are any
/// file and ZynAddSubFX presets are `*.xiz` files.
pub fn count_presets(path: &Path) -> Result<usize> {
    let lv2 = count_files(&path.join("lv2"), Some("manifest.ttl"))?;
    let pianoteq = count_files(&path.join("pianoteq"), None)?;
    let puredata = count_dirs_at_depth(&path.join("puredata"), 2);
    let zynaddsubfx = count_files(&path.join("zynaddsubfx"), Some("*.xiz"))?;
    debug!(
        "Presets => LV2: {}, Pianoteq: {}, Puredata: {}, ZynAddSubFX: {}",
        lv2, pianoteq, puredata, zynaddsubfx
    );
    Ok(lv2 + pianoteq + puredata + zynaddsubfx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_counts_regular_files_recursively() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.zss");
        touch(dir.path(), "sub/b.zss");
        touch(dir.path(), "sub/deeper/c.txt");
        fs::create_dir(dir.path().join("empty")).unwrap();

        assert_eq!(count_files(dir.path(), None).unwrap(), 3);
    }

    #[test]
    fn test_pattern_matches_file_name() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "take1.wav");
        touch(dir.path(), "nested/take2.wav");
        touch(dir.path(), "song.mid");

        assert_eq!(count_files(dir.path(), Some("*.wav")).unwrap(), 2);
        assert_eq!(count_files(dir.path(), Some("*.mid")).unwrap(), 1);
    }

    #[test]
    fn test_missing_directory_counts_zero() {
        assert_eq!(count_files(Path::new("/nonexistent/zwc/files"), None).unwrap(), 0);
    }

    #[test]
    fn test_pattern_is_literal_apart_from_wildcards() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.mid");
        touch(dir.path(), "ab.mid");
        touch(dir.path(), "a+mid");
        touch(dir.path(), "[x].mid");

        assert_eq!(count_files(dir.path(), Some("?.mid")).unwrap(), 1);
        assert_eq!(count_files(dir.path(), Some("[x].mid")).unwrap(), 1);
        assert_eq!(count_files(dir.path(), Some("a.mid")).unwrap(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_follows_symlinks() {
        let dir = TempDir::new().unwrap();
        let external = TempDir::new().unwrap();
        touch(external.path(), "x.sf2");
        touch(external.path(), "y.sf2");
        std::os::unix::fs::symlink(external.path(), dir.path().join("linked")).unwrap();

        assert_eq!(count_files(dir.path(), None).unwrap(), 2);
    }

    #[test]
    fn test_count_presets() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "lv2/synth_a.presets.lv2/manifest.ttl");
        touch(dir.path(), "lv2/synth_a.presets.lv2/preset1.ttl");
        touch(dir.path(), "lv2/synth_b.presets.lv2/manifest.ttl");
        touch(dir.path(), "pianoteq/My Piano.fxp");
        touch(dir.path(), "puredata/synths/drone/main.pd");
        touch(dir.path(), "puredata/synths/bells/main.pd");
        touch(dir.path(), "zynaddsubfx/banks/Pads/0001-Pad.xiz");
        touch(dir.path(), "zynaddsubfx/banks/Pads/.bankdir");

        assert_eq!(count_presets(dir.path()).unwrap(), 2 + 1 + 2 + 1);
    }

    #[test]
    fn test_count_presets_empty_library() {
        let dir = TempDir::new().unwrap();
        assert_eq!(count_presets(dir.path()).unwrap(), 0);
    }
}
