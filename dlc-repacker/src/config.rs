//! Repack configuration
//!
//! The filename conventions and the probe list of known add-ons are plain
//! values handed to the resolver and driver, so tests can substitute their
//! own instead of patching process-wide constants.

/// Filename conventions and the ordered list of known add-on archives
#[derive(Debug, Clone)]
pub struct RepackConfig {
    /// Prefix every add-on archive name starts with
    pub archive_prefix: String,
    /// Extension every add-on archive name ends with
    pub archive_suffix: String,
    /// Suffix identifying the manifest entry inside an archive
    pub manifest_suffix: String,
    /// Ordered list of add-on base names probed for the reference version
    pub known_addons: Vec<String>,
}

impl Default for RepackConfig {
    fn default() -> Self {
        Self {
            archive_prefix: "dlc_".to_string(),
            archive_suffix: ".scs".to_string(),
            manifest_suffix: ".manifest.sii".to_string(),
            known_addons: [
                "pcg",
                "rocket_league",
                "metallics",
                "phys_flags",
                "rims",
                "hs_schoch",
                "toys",
                "oversize",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl RepackConfig {
    /// Archive file name for an add-on base name
    pub fn archive_file_name(&self, base: &str) -> String {
        format!("{}{base}{}", self.archive_prefix, self.archive_suffix)
    }

    /// Check whether a file name follows the add-on archive convention
    pub fn matches_archive_name(&self, name: &str) -> bool {
        name.starts_with(&self.archive_prefix) && name.ends_with(&self.archive_suffix)
    }
}
