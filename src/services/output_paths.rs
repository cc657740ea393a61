// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Output file naming.

use crate::models::DataType;
use std::path::{Path, PathBuf};

/// Destination files for the map and the vector drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub html: PathBuf,
    pub svg: PathBuf,
}

/// Resolve where outputs go for a user-supplied export path.
///
/// - existing directory: `<dir>/<data_type>_map.html` and `.svg`
/// - path ending in `.html` / `.svg`: used as-is for that format
/// - any other value: `<value>_map.html` / `<value>_map.svg`
/// - nothing: `<data_type>_map.html` / `.svg` in the working directory
pub fn resolve(export_path: Option<&Path>, data_type: DataType) -> OutputPaths {
    let default_name = |ext: &str| PathBuf::from(format!("{}_map.{ext}", data_type.as_str()));

    match export_path {
        Some(dir) if dir.is_dir() => OutputPaths {
            html: dir.join(default_name("html")),
            svg: dir.join(default_name("svg")),
        },
        Some(path) => OutputPaths {
            html: with_suffix(path, "html"),
            svg: with_suffix(path, "svg"),
        },
        None => OutputPaths {
            html: default_name("html"),
            svg: default_name("svg"),
        },
    }
}

fn with_suffix(path: &Path, ext: &str) -> PathBuf {
    if path.extension().is_some_and(|e| e == ext) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(format!("_map.{ext}"));
    PathBuf::from(name)
}

/// The fallback map written when an SVG cannot be rendered.
pub fn fallback_html(svg_path: &Path) -> PathBuf {
    svg_path.with_extension("html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_data_type() {
        let paths = resolve(None, DataType::Pedestrian);
        assert_eq!(paths.html, PathBuf::from("pedestrian_map.html"));
        assert_eq!(paths.svg, PathBuf::from("pedestrian_map.svg"));
    }

    #[test]
    fn test_base_name_gets_suffix() {
        let paths = resolve(Some(Path::new("out/midtown")), DataType::Traffic);
        assert_eq!(paths.html, PathBuf::from("out/midtown_map.html"));
        assert_eq!(paths.svg, PathBuf::from("out/midtown_map.svg"));
    }

    #[test]
    fn test_explicit_extension_used_as_is() {
        let paths = resolve(Some(Path::new("midtown.svg")), DataType::Traffic);
        assert_eq!(paths.svg, PathBuf::from("midtown.svg"));
        assert_eq!(paths.html, PathBuf::from("midtown.svg_map.html"));
    }

    #[test]
    fn test_existing_directory() {
        let dir = std::env::temp_dir();
        let paths = resolve(Some(&dir), DataType::Traffic);
        assert_eq!(paths.html, dir.join("traffic_map.html"));
        assert_eq!(paths.svg, dir.join("traffic_map.svg"));
    }

    #[test]
    fn test_fallback_html_replaces_extension() {
        assert_eq!(
            fallback_html(Path::new("out/traffic_map.svg")),
            PathBuf::from("out/traffic_map.html")
        );
    }
}
