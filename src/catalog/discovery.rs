//! Discovery of installed platform versions on the filesystem.

use crate::core::version::{find_closest_version, PlatformVersion};
use std::path::{Path, PathBuf};

pub const HBK_FILENAME: &str = "shcntx_ru.hbk";

/// A discovered platform version with its filesystem paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredVersion {
    /// `None` when the directory name carries no version
    pub version: Option<PlatformVersion>,
    pub hbk_path: PathBuf,
    pub platform_dir: PathBuf,
}

/// Scans an installation root for version directories with help files.
///
/// Three common layouts are supported: version subdirectories directly
/// under the root, an arch intermediary (`x86_64/8.3.25.1257/`), and a
/// root that itself is a version directory.
#[derive(Debug, Default)]
pub struct VersionDiscovery;

impl VersionDiscovery {
    pub fn new() -> Self {
        Self
    }

    /// Discover available versions, sorted ascending.
    pub fn discover(&self, platform_path: &Path) -> Vec<DiscoveredVersion> {
        if !platform_path.exists() {
            tracing::error!("Platform path does not exist: {}", platform_path.display());
            return Vec::new();
        }

        let mut versions = self.scan_version_subdirs(platform_path);
        if !versions.is_empty() {
            tracing::info!(
                "Multi-version mode: found {} versions in {}",
                versions.len(),
                platform_path.display()
            );
            sort_versions(&mut versions);
            return versions;
        }

        // One level deeper, for arch intermediaries
        for child in safe_read_dir(platform_path) {
            if child.is_dir() && PlatformVersion::parse(&dir_name(&child)).is_none() {
                versions.extend(self.scan_version_subdirs(&child));
            }
        }
        if !versions.is_empty() {
            tracing::info!(
                "Multi-version mode (nested): found {} versions under {}",
                versions.len(),
                platform_path.display()
            );
            sort_versions(&mut versions);
            return versions;
        }

        // The root itself may hold the help file
        if let Some(hbk_path) = find_hbk_in_dir(platform_path) {
            let version = PlatformVersion::parse(&dir_name(platform_path));
            tracing::info!(
                "Single-version mode: HBK found at {} (version: {})",
                hbk_path.display(),
                version.map_or_else(|| "unknown".to_string(), |v| v.to_string())
            );
            return vec![DiscoveredVersion {
                version,
                hbk_path,
                platform_dir: platform_path.to_path_buf(),
            }];
        }

        tracing::warn!("No HBK files found in {}", platform_path.display());
        Vec::new()
    }

    /// Pick the requested version (closest match) or the latest one.
    pub fn resolve(
        &self,
        platform_path: &Path,
        requested: Option<PlatformVersion>,
    ) -> Option<DiscoveredVersion> {
        let discovered = self.discover(platform_path);
        if discovered.is_empty() {
            return None;
        }

        match requested {
            None => discovered.last().cloned(),
            Some(target) => {
                let available: Vec<PlatformVersion> =
                    discovered.iter().filter_map(|d| d.version).collect();
                let closest = find_closest_version(target, &available)?;
                discovered.into_iter().find(|d| d.version == Some(closest))
            }
        }
    }

    fn scan_version_subdirs(&self, root: &Path) -> Vec<DiscoveredVersion> {
        let mut results = Vec::new();

        for child in safe_read_dir(root) {
            if !child.is_dir() {
                continue;
            }
            let version = match PlatformVersion::parse(&dir_name(&child)) {
                Some(v) => v,
                None => continue,
            };
            match find_hbk_in_dir(&child) {
                Some(hbk_path) => results.push(DiscoveredVersion {
                    version: Some(version),
                    hbk_path,
                    platform_dir: child,
                }),
                None => {
                    tracing::debug!("Version dir {} has no HBK file, skipping", child.display())
                }
            }
        }

        results
    }
}

/// Find the help file in a version directory: direct, `bin/`, then deep.
fn find_hbk_in_dir(dir: &Path) -> Option<PathBuf> {
    let direct = dir.join(HBK_FILENAME);
    if direct.is_file() {
        return Some(direct);
    }

    let bin_path = dir.join("bin").join(HBK_FILENAME);
    if bin_path.is_file() {
        return Some(bin_path);
    }

    find_hbk_recursive(dir, 0)
}

fn find_hbk_recursive(dir: &Path, depth: usize) -> Option<PathBuf> {
    if depth > 4 {
        return None;
    }
    for child in safe_read_dir(dir) {
        if child.is_file() && child.file_name().is_some_and(|n| n == HBK_FILENAME) {
            return Some(child);
        }
        if child.is_dir() {
            if let Some(found) = find_hbk_recursive(&child, depth + 1) {
                return Some(found);
            }
        }
    }
    None
}

fn sort_versions(versions: &mut [DiscoveredVersion]) {
    versions.sort_by_key(|d| d.version.unwrap_or(PlatformVersion::new(0, 0, 0)));
}

fn safe_read_dir(path: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(path) {
        Ok(entries) => {
            let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
            paths.sort();
            paths
        }
        Err(e) => {
            tracing::warn!("Cannot read directory {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
