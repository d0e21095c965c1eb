//! Catalog scanner - turns a folder of model directories into template data
//!
//! The asset root is expected to contain one subfolder per model, named
//! `<anything>_<W>x<H>` (e.g. `roman_4x4`). Each subfolder holds the model
//! render as `*.png` and optionally a montage as `*M.png`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Layout weight for tiles whose `WxH` components are equal.
const SQUARE_WEIGHT: f64 = 0.20;
/// Layout weight for everything else.
const RECTANGULAR_WEIGHT: f64 = 0.30;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("model folder '{dir}' has no tile format token (expected <name>_<W>x<H>)")]
    MissingFormatToken { dir: String },
    #[error("model folder '{dir}' has a malformed tile format '{token}' (expected <W>x<H>)")]
    MalformedTileFormat { dir: String, token: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Tile format of a model, derived from the `WxH` token in its folder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileCategory {
    Square,
    Rectangular,
}

impl TileCategory {
    /// Width and height are compared as raw strings, so "04" and "4" are
    /// different heights. Folder names are expected to agree on formatting.
    fn from_dimensions(width: &str, height: &str) -> Self {
        if width == height {
            TileCategory::Square
        } else {
            TileCategory::Rectangular
        }
    }

    /// Weight handed to the template for tile layout.
    pub fn weight(self) -> f64 {
        match self {
            TileCategory::Square => SQUARE_WEIGHT,
            TileCategory::Rectangular => RECTANGULAR_WEIGHT,
        }
    }
}

/// One model folder's worth of catalog data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelEntry {
    /// Montage image (`*M.png`), if the folder has one.
    pub montage: Option<String>,
    /// Primary model image (`*.png`, not a montage).
    pub model: Option<String>,
    /// Last file that matched neither pattern, kept for inspection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
    /// Tile layout weight for this model's format.
    pub size: f64,
}

/// Result of scanning an asset root. Rebuilt from disk on every scan,
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    /// Base name of the scanned root directory.
    pub root_name: String,
    /// Models keyed by sanitized folder name. The ordered map gives the
    /// template a deterministic order regardless of enumeration order.
    pub models: BTreeMap<String, ModelEntry>,
}

impl Catalog {
    /// Scan the immediate subfolders of `root`. Only one level of nesting is
    /// meaningful: each subfolder is one model, deeper structure is ignored.
    ///
    /// Filesystem errors (missing root, unreadable folder) propagate as-is.
    pub fn scan(root: &Path) -> Result<Catalog, ScanError> {
        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!(root = %root_name, "scanning catalog root");

        let mut models = BTreeMap::new();

        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                // Stray files directly in the root are not catalog data.
                continue;
            }

            let dir_name = entry.file_name().to_string_lossy().into_owned();
            if dir_name == root_name {
                // The root never catalogs itself.
                continue;
            }

            debug!(model = %dir_name, "found model folder");

            let model_entry = scan_model_dir(&entry.path(), &dir_name)?;
            let key = sanitize_model_name(&dir_name);

            // Two raw names can sanitize to the same key; last write wins.
            models.insert(key, model_entry);
        }

        Ok(Catalog { root_name, models })
    }

    /// Number of scanned models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Classify the files of one model folder.
fn scan_model_dir(dir: &Path, dir_name: &str) -> Result<ModelEntry, ScanError> {
    let category = parse_tile_category(dir_name)?;

    let mut model_entry = ModelEntry {
        size: category.weight(),
        ..ModelEntry::default()
    };

    for file in fs::read_dir(dir)? {
        let file = file?;
        if !file.file_type()?.is_file() {
            continue;
        }

        let file_name = file.file_name().to_string_lossy().into_owned();
        let path = normalize_path(&file.path());

        debug!(file = %file_name, weight = model_entry.size, "classifying");

        // Suffix match decides the slot; within one folder the last file of
        // a kind silently replaces any earlier one.
        let slot = if file_name.ends_with("M.png") {
            &mut model_entry.montage
        } else if file_name.ends_with(".png") {
            &mut model_entry.model
        } else {
            &mut model_entry.other
        };
        *slot = Some(path);
    }

    Ok(model_entry)
}

/// Derive the tile category from a model folder name.
///
/// The second underscore-delimited token carries the format; it must split on
/// `x` into exactly two components. Both shapes are checked explicitly so a
/// misnamed folder fails the whole scan with a readable error.
fn parse_tile_category(dir_name: &str) -> Result<TileCategory, ScanError> {
    let token = dir_name
        .split('_')
        .nth(1)
        .ok_or_else(|| ScanError::MissingFormatToken {
            dir: dir_name.to_string(),
        })?;

    let dimensions: Vec<&str> = token.split('x').collect();
    let [width, height] = dimensions.as_slice() else {
        return Err(ScanError::MalformedTileFormat {
            dir: dir_name.to_string(),
            token: token.to_string(),
        });
    };

    Ok(TileCategory::from_dimensions(width, height))
}

/// Model names double as template keys and LaTeX text, where underscores are
/// special. Every underscore becomes a hyphen.
pub fn sanitize_model_name(name: &str) -> String {
    name.replace('_', "-")
}

/// Paths go into the template verbatim; TeX wants forward slashes on every
/// platform.
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static TREE_COUNTER: AtomicU32 = AtomicU32::new(0);

    /// A throwaway directory tree under the system temp dir.
    struct TestTree {
        root: PathBuf,
    }

    impl TestTree {
        fn new(root_name: &str) -> Self {
            let unique = format!(
                "turbocb3k_test_{}_{}",
                std::process::id(),
                TREE_COUNTER.fetch_add(1, Ordering::Relaxed)
            );
            let root = std::env::temp_dir().join(unique).join(root_name);
            fs::create_dir_all(&root).unwrap();
            Self { root }
        }

        fn add_dir(&self, name: &str) -> &Self {
            fs::create_dir_all(self.root.join(name)).unwrap();
            self
        }

        fn add_file(&self, dir: &str, name: &str) -> &Self {
            self.add_dir(dir);
            fs::write(self.root.join(dir).join(name), b"png").unwrap();
            self
        }
    }

    impl Drop for TestTree {
        fn drop(&mut self) {
            if let Some(parent) = self.root.parent() {
                let _ = fs::remove_dir_all(parent);
            }
        }
    }

    #[test]
    fn square_model_with_montage() {
        let tree = TestTree::new("catalog");
        tree.add_file("foo_4x4", "a.png").add_file("foo_4x4", "aM.png");

        let catalog = Catalog::scan(&tree.root).unwrap();
        assert_eq!(catalog.root_name, "catalog");

        let entry = &catalog.models["foo-4x4"];
        assert!(entry.model.as_deref().unwrap().ends_with("foo_4x4/a.png"));
        assert!(entry.montage.as_deref().unwrap().ends_with("foo_4x4/aM.png"));
        assert!(entry.other.is_none());
        assert_eq!(entry.size, 0.20);
    }

    #[test]
    fn rectangular_model() {
        let tree = TestTree::new("catalog");
        tree.add_file("bar_4x6", "b.png");

        let catalog = Catalog::scan(&tree.root).unwrap();
        let entry = &catalog.models["bar-4x6"];
        assert!(entry.montage.is_none());
        assert_eq!(entry.size, 0.30);
    }

    #[test]
    fn dimensions_compare_as_strings() {
        // "04" and "4" are numerically equal but string-unequal.
        let tree = TestTree::new("catalog");
        tree.add_file("pad_04x4", "p.png");

        let catalog = Catalog::scan(&tree.root).unwrap();
        assert_eq!(catalog.models["pad-04x4"].size, 0.30);
    }

    #[test]
    fn sanitize_replaces_every_underscore() {
        assert_eq!(sanitize_model_name("a_b_c"), "a-b-c");
        assert_eq!(sanitize_model_name("plain"), "plain");
    }

    #[test]
    fn root_never_appears_as_model() {
        let tree = TestTree::new("catalog");
        // Stray file directly in the root, plus a child named like the root.
        fs::write(tree.root.join("loose.png"), b"png").unwrap();
        tree.add_file("catalog", "c.png");
        tree.add_file("ok_1x1", "x.png");

        let catalog = Catalog::scan(&tree.root).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.models.contains_key("ok-1x1"));
    }

    #[test]
    fn missing_underscore_is_an_error() {
        let tree = TestTree::new("catalog");
        tree.add_file("nounderscore", "a.png");

        let err = Catalog::scan(&tree.root).unwrap_err();
        assert!(matches!(err, ScanError::MissingFormatToken { ref dir } if dir == "nounderscore"));
    }

    #[test]
    fn extra_x_separator_is_an_error() {
        let tree = TestTree::new("catalog");
        tree.add_dir("bad_4x4x4");

        let err = Catalog::scan(&tree.root).unwrap_err();
        assert!(matches!(err, ScanError::MalformedTileFormat { ref token, .. } if token == "4x4x4"));
    }

    #[test]
    fn format_token_without_x_is_an_error() {
        let tree = TestTree::new("catalog");
        tree.add_dir("bad_44");

        assert!(matches!(
            Catalog::scan(&tree.root).unwrap_err(),
            ScanError::MalformedTileFormat { .. }
        ));
    }

    #[test]
    fn sanitized_name_collisions_collapse() {
        // Both names parse, both sanitize to "a-1x1-b"; enumeration order
        // decides which one survives.
        let tree = TestTree::new("catalog");
        tree.add_file("a_1x1_b", "one.png");
        tree.add_file("a_1x1-b", "two.png");

        let catalog = Catalog::scan(&tree.root).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.models.contains_key("a-1x1-b"));
    }

    #[test]
    fn unmatched_files_land_under_other() {
        let tree = TestTree::new("catalog");
        tree.add_file("foo_2x2", "notes.txt");

        let catalog = Catalog::scan(&tree.root).unwrap();
        let entry = &catalog.models["foo-2x2"];
        assert!(entry.model.is_none());
        assert!(entry.other.as_deref().unwrap().ends_with("notes.txt"));
    }

    #[test]
    fn rescan_is_deterministic() {
        let tree = TestTree::new("catalog");
        tree.add_file("zeta_2x3", "z.png");
        tree.add_file("alpha_2x2", "a.png").add_file("alpha_2x2", "aM.png");

        let first = Catalog::scan(&tree.root).unwrap();
        let second = Catalog::scan(&tree.root).unwrap();
        assert_eq!(first, second);

        let keys: Vec<&String> = first.models.keys().collect();
        assert_eq!(keys, ["alpha-2x2", "zeta-2x3"]);
    }

    #[test]
    fn missing_root_propagates_io_error() {
        let tree = TestTree::new("catalog");
        let gone = tree.root.join("does_not_exist");

        assert!(matches!(
            Catalog::scan(&gone).unwrap_err(),
            ScanError::Io(_)
        ));
    }

    #[test]
    fn normalize_forces_forward_slashes() {
        assert_eq!(normalize_path(Path::new("a/b/c.png")), "a/b/c.png");
        assert_eq!(normalize_path(Path::new(r"a\b\c.png")), "a/b/c.png");
    }
}
