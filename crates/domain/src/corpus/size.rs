use serde::Deserialize;

use super::CorpusError;

/// One species row: comma-separated name variants and an average body mass.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SizeEntry {
    pub common_names: String,
    pub mass_average_g: f64,
}

impl SizeEntry {
    /// Individual name variants, trimmed.
    pub fn name_variants(&self) -> impl Iterator<Item = &str> {
        self.common_names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct RawSizeCorpus {
    #[serde(rename = "sizeData")]
    size_data: Vec<SizeEntry>,
}

/// Average body mass by species name.
#[derive(Debug, Clone)]
pub struct SizeCorpus {
    entries: Vec<SizeEntry>,
}

impl SizeCorpus {
    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let raw: RawSizeCorpus =
            serde_json::from_str(json).map_err(|e| CorpusError::Malformed(e.to_string()))?;
        Self::new(raw.size_data)
    }

    pub fn new(entries: Vec<SizeEntry>) -> Result<Self, CorpusError> {
        if entries.is_empty() {
            return Err(CorpusError::Empty("sizes"));
        }
        for (index, entry) in entries.iter().enumerate() {
            if entry.name_variants().next().is_none() {
                return Err(CorpusError::invalid(index, "?", "common_names is empty"));
            }
            if !(entry.mass_average_g.is_finite() && entry.mass_average_g >= 0.0) {
                return Err(CorpusError::invalid(
                    index,
                    &entry.common_names,
                    "mass_average_g must be a non-negative number",
                ));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[SizeEntry] {
        &self.entries
    }
}
