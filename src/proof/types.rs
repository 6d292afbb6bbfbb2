use serde::{Deserialize, Serialize};

/// One labelled transcript entry.
///
/// Roots and authentication paths are lowercase hex; field elements and
/// indices are decimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofEntry {
    /// Protocol label, e.g. `commit_cp_merkle`.
    pub label: String,
    /// Rendered value.
    pub value: String,
}

impl ProofEntry {
    /// Creates an entry.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Finalised transcript, serialised as a JSON array of entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proof {
    entries: Vec<ProofEntry>,
}

impl Proof {
    /// Wraps an ordered list of entries.
    pub fn new(entries: Vec<ProofEntry>) -> Self {
        Self { entries }
    }

    /// Entries in transcript order.
    pub fn entries(&self) -> &[ProofEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values recorded under `label`, in order.
    pub fn values<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.label == label)
            .map(|entry| entry.value.as_str())
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses the JSON rendering produced by [`Proof::to_json_pretty`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
