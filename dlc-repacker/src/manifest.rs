//! Manifest text extraction
//!
//! A DLC manifest is a small SiiNunit text entry. Nothing here parses that
//! format structurally; the scanner does a byte-level search for a keyword
//! followed by a quoted value, which is exactly how tolerant the original
//! tooling needs to be. The version keyword is a stem (`package_version` or
//! `compatible_version`) with an optional plural `s` and an optional `[]`
//! array suffix; values may use single or double quotes.

use memchr::{memchr, memmem};

/// Extracts the version token and display name from manifest bytes
///
/// The keyword lists are plain data so tests can substitute their own.
#[derive(Debug, Clone)]
pub struct ManifestScanner {
    version_stems: Vec<String>,
    name_key: String,
    fallback_name: String,
}

impl Default for ManifestScanner {
    fn default() -> Self {
        Self {
            version_stems: vec![
                "package_version".to_string(),
                "compatible_version".to_string(),
            ],
            name_key: "display_name".to_string(),
            fallback_name: "Unknown DLC".to_string(),
        }
    }
}

impl ManifestScanner {
    /// Build a scanner with custom keywords
    pub fn new(version_stems: Vec<String>, name_key: String, fallback_name: String) -> Self {
        Self {
            version_stems,
            name_key,
            fallback_name,
        }
    }

    /// Find the version token: the quoted value of the first version field
    ///
    /// Only the first match in buffer order is used when several fields are
    /// present. Returns `None` when no accepted spelling occurs with a
    /// quoted value; callers treat that as fatal.
    pub fn version<'a>(&self, manifest: &'a [u8]) -> Option<&'a [u8]> {
        let mut best: Option<(usize, &'a [u8])> = None;

        for stem in &self.version_stems {
            for pos in memmem::find_iter(manifest, stem.as_bytes()) {
                if let Some(value) = quoted_value_after(manifest, pos + stem.len(), true) {
                    if best.map_or(true, |(earliest, _)| pos < earliest) {
                        best = Some((pos, value));
                    }
                    break;
                }
            }
        }

        best.map(|(_, value)| value)
    }

    /// Find the human-readable display name
    ///
    /// The name is advisory, used only for logging, so a manifest without
    /// one yields a placeholder instead of an error.
    pub fn display_name(&self, manifest: &[u8]) -> String {
        for pos in memmem::find_iter(manifest, self.name_key.as_bytes()) {
            if let Some(value) = quoted_value_after(manifest, pos + self.name_key.len(), false) {
                return String::from_utf8_lossy(value).into_owned();
            }
        }
        self.fallback_name.clone()
    }
}

/// Parse `[s][[]]: <ws> <quote> value <quote>` starting right after a keyword
fn quoted_value_after(manifest: &[u8], mut i: usize, version_suffixes: bool) -> Option<&[u8]> {
    if version_suffixes {
        if manifest.get(i) == Some(&b's') {
            i += 1;
        }
        if manifest.get(i) == Some(&b'[') && manifest.get(i + 1) == Some(&b']') {
            i += 2;
        }
    }

    if manifest.get(i) != Some(&b':') {
        return None;
    }
    i += 1;

    let ws_start = i;
    while matches!(manifest.get(i), Some(&(b' ' | b'\t' | b'\r' | b'\n'))) {
        i += 1;
    }
    if i == ws_start {
        return None;
    }

    let quote = *manifest.get(i)?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    i += 1;

    let rest = manifest.get(i..)?;
    let end = memchr(quote, rest)?;
    if end == 0 {
        return None;
    }
    Some(&rest[..end])
}
