// ============================================================================
// Local Directory Source
// ============================================================================
// Every call lists the directory again and picks one entry uniformly at
// random. Picks are independent, so the same image can come up twice in a
// row. The chosen file is applied in place; nothing is copied.
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;

use crate::error::{Result, WallpaperError};

/// Directory entries in listing order
pub fn list_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(WallpaperError::filesystem(
            dir,
            "local wallpaper path not found",
        ));
    }
    let entries = fs::read_dir(dir)
        .map_err(|e| WallpaperError::io(dir, e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    Ok(entries)
}

pub fn pick(dir: &Path) -> Result<PathBuf> {
    pick_with(dir, &mut rand::thread_rng())
}

pub fn pick_with<R: Rng>(dir: &Path, rng: &mut R) -> Result<PathBuf> {
    let mut entries = list_entries(dir)?;
    if entries.is_empty() {
        return Err(WallpaperError::filesystem(dir, "local wallpaper path is empty"));
    }
    let index = rng.gen_range(0..entries.len());
    Ok(entries.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = pick(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, WallpaperError::Filesystem { .. }));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let err = pick(dir.path()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_pick_returns_an_entry_of_the_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        let picked = pick(dir.path()).unwrap();
        assert_eq!(picked, dir.path().join("a.jpg"));
    }

    #[test]
    fn test_picks_are_uniform_over_entries() {
        let dir = TempDir::new().unwrap();
        let names = ["a.jpg", "b.jpg", "c.png", "d.jpg", "e.webp"];
        for name in names {
            fs::write(dir.path().join(name), name).unwrap();
        }

        let mut rng = StdRng::seed_from_u64(0x5eed);
        let trials = 10_000;
        let mut counts: HashMap<PathBuf, usize> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(pick_with(dir.path(), &mut rng).unwrap()).or_default() += 1;
        }

        // expected 2000 per file; 1700..2300 is far outside sampling noise
        assert_eq!(counts.len(), names.len());
        for (path, count) in &counts {
            assert!(
                (1700..=2300).contains(count),
                "{} picked {} times",
                path.display(),
                count
            );
        }
    }

    #[test]
    fn test_directory_is_listed_fresh_each_time() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old.jpg"), b"old").unwrap();
        assert_eq!(pick(dir.path()).unwrap(), dir.path().join("old.jpg"));

        fs::remove_file(dir.path().join("old.jpg")).unwrap();
        fs::write(dir.path().join("new.jpg"), b"new").unwrap();
        assert_eq!(pick(dir.path()).unwrap(), dir.path().join("new.jpg"));
    }
}
