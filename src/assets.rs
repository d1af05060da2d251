//! Asset loading: sprite decoding and the quote file.
//!
//! The companion ships with three fixed-size square sprites (idle, walk,
//! gesture) and an optional plain-text quote file, one quote per line.
//! Decoding problems are fatal at startup; there is no fallback art.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::RgbaImage;

/// Which sprite a component wants displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Idle,
    Walk,
    Gesture,
}

impl SpriteId {
    /// Name used in logs and errors.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Gesture => "gesture",
        }
    }
}

/// Error type for asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {kind} sprite {path}: {source}")]
    SpriteIo {
        kind: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode {kind} sprite {path}: {source}")]
    SpriteDecode {
        kind: &'static str,
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to read quote file {path}: {source}")]
    QuoteIo {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The three decoded sprites, resized to the companion size.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    idle: RgbaImage,
    walk: RgbaImage,
    gesture: RgbaImage,
    size: u32,
}

impl AssetBundle {
    /// Load and decode the three sprites, resampling each to
    /// `size` x `size` with nearest-neighbor filtering.
    pub fn load(
        idle_path: &Path,
        walk_path: &Path,
        gesture_path: &Path,
        size: u32,
    ) -> Result<Self, AssetError> {
        Ok(Self {
            idle: load_sprite(idle_path, "idle", size)?,
            walk: load_sprite(walk_path, "walk", size)?,
            gesture: load_sprite(gesture_path, "gesture", size)?,
            size,
        })
    }

    /// Get the pixels for a sprite.
    pub fn sprite(&self, id: SpriteId) -> &RgbaImage {
        match id {
            SpriteId::Idle => &self.idle,
            SpriteId::Walk => &self.walk,
            SpriteId::Gesture => &self.gesture,
        }
    }

    /// Sprite edge length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }
}

fn load_sprite(path: &Path, kind: &'static str, size: u32) -> Result<RgbaImage, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::SpriteIo {
        kind,
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = image::load_from_memory(&bytes).map_err(|source| AssetError::SpriteDecode {
        kind,
        path: path.to_path_buf(),
        source,
    })?;

    Ok(decoded.resize_exact(size, size, FilterType::Nearest).to_rgba8())
}

/// Read quotes from a plain-text file, one per line.
///
/// Lines are trimmed; blank and whitespace-only lines are dropped. The
/// resulting order matches the file order.
pub fn load_quotes(path: &Path) -> Result<Vec<String>, AssetError> {
    let text = fs::read_to_string(path).map_err(|source| AssetError::QuoteIo {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_png(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
        let path = dir.join(name);
        let img = RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_load_bundle_resizes_to_target() {
        let dir = tempfile::tempdir().unwrap();
        let idle = write_png(dir.path(), "idle.png", 64, 64);
        let walk = write_png(dir.path(), "walk.png", 128, 32);
        let gesture = write_png(dir.path(), "gesture.png", 256, 256);

        let bundle = AssetBundle::load(&idle, &walk, &gesture, 256).unwrap();
        assert_eq!(bundle.size(), 256);
        for id in [SpriteId::Idle, SpriteId::Walk, SpriteId::Gesture] {
            let sprite = bundle.sprite(id);
            assert_eq!(sprite.dimensions(), (256, 256));
        }
    }

    #[test]
    fn test_load_bundle_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let idle = write_png(dir.path(), "idle.png", 8, 8);
        let walk = write_png(dir.path(), "walk.png", 8, 8);
        let missing = dir.path().join("nope.png");

        let err = AssetBundle::load(&idle, &walk, &missing, 256).unwrap_err();
        assert!(matches!(err, AssetError::SpriteIo { kind: "gesture", .. }));
    }

    #[test]
    fn test_load_bundle_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let idle = write_png(dir.path(), "idle.png", 8, 8);
        let walk = write_png(dir.path(), "walk.png", 8, 8);

        let bad = dir.path().join("gesture.png");
        let mut f = fs::File::create(&bad).unwrap();
        f.write_all(b"this is not a png").unwrap();

        let err = AssetBundle::load(&idle, &walk, &bad, 256).unwrap_err();
        assert!(matches!(err, AssetError::SpriteDecode { kind: "gesture", .. }));
    }

    #[test]
    fn test_load_quotes_trims_and_drops_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.txt");
        fs::write(&path, "  first quote  \n\n   \nsecond - two parts\n\t\n").unwrap();

        let quotes = load_quotes(&path).unwrap();
        assert_eq!(quotes, vec!["first quote", "second - two parts"]);
    }

    #[test]
    fn test_load_quotes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.txt");
        fs::write(&path, "").unwrap();

        assert!(load_quotes(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_quotes_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        assert!(matches!(
            load_quotes(&path),
            Err(AssetError::QuoteIo { .. })
        ));
    }

    #[test]
    fn test_sprite_id_names() {
        assert_eq!(SpriteId::Idle.name(), "idle");
        assert_eq!(SpriteId::Walk.name(), "walk");
        assert_eq!(SpriteId::Gesture.name(), "gesture");
    }
}
