//! Installed theme discovery
//!
//! Minimal directory scan backing the theme combo boxes. A theme is any
//! directory under one of the search roots, optionally filtered to those
//! containing a marker path (`openbox-3/themerc`, `gtk-3.0/gtk.css`,
//! `cursors`).

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Directories searched for `kind` ("themes" or "icons"), user dirs first.
fn search_roots(kind: &str) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(base) = directories::BaseDirs::new() {
        roots.push(base.home_dir().join(format!(".{}", kind)));
        roots.push(base.data_dir().join(kind));
    }
    for dir in ["/usr/share", "/usr/local/share"] {
        roots.push(PathBuf::from(dir).join(kind));
    }
    roots
}

/// Sorted, deduplicated names of installed themes of `kind`.
pub fn installed_themes(kind: &str, marker: Option<&str>) -> Vec<String> {
    themes_under(&search_roots(kind), marker)
}

fn themes_under(roots: &[PathBuf], marker: Option<&str>) -> Vec<String> {
    let mut names = BTreeSet::new();
    for root in roots {
        let Ok(entries) = std::fs::read_dir(root) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if let Some(marker) = marker {
                if !path.join(marker).exists() {
                    continue;
                }
            }
            if let Some(name) = entry.file_name().to_str() {
                names.insert(name.to_string());
            }
        }
    }
    names.into_iter().collect()
}
