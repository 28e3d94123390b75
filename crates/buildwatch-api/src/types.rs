use std::fmt;

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

/// Outcome of a project's most recent build as reported by the CI server.
///
/// Only `Success` and `Failure` drive notifications. Any other label is kept
/// verbatim so it can still be logged and compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildStatus {
    Success,
    Failure,
    Other(String),
}

impl BuildStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BuildStatus::Success => "Success",
            BuildStatus::Failure => "Failure",
            BuildStatus::Other(label) => label,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, BuildStatus::Failure)
    }
}

impl From<&str> for BuildStatus {
    fn from(label: &str) -> Self {
        match label {
            "Success" => BuildStatus::Success,
            "Failure" => BuildStatus::Failure,
            other => BuildStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for BuildStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Success" => BuildStatus::Success,
            "Failure" => BuildStatus::Failure,
            _ => BuildStatus::Other(label),
        }
    }
}

impl From<BuildStatus> for String {
    fn from(status: BuildStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last-known build of one monitored project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub name: String,
    pub web_url: String,
    /// Opaque build label, only ever compared for equality.
    pub number: String,
    pub status: BuildStatus,
}

impl BuildRecord {
    pub fn new(
        name: impl Into<String>, web_url: impl Into<String>, number: impl Into<String>,
        status: impl Into<BuildStatus>,
    ) -> Self {
        Self {
            name: name.into(),
            web_url: web_url.into(),
            number: number.into(),
            status: status.into(),
        }
    }
}

/// Snapshot of every project seen in one polling cycle, keyed by name.
///
/// Inserting a name twice keeps the first position but the last record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSet {
    builds: IndexMap<String, BuildRecord>,
}

impl BuildSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: BuildRecord) -> Option<BuildRecord> {
        self.builds.insert(record.name.clone(), record)
    }

    /// Merges `other` into this set; records from `other` win on conflict.
    pub fn extend(&mut self, other: BuildSet) {
        for (_, record) in other.builds {
            self.insert(record);
        }
    }

    pub fn get(&self, name: &str) -> Option<&BuildRecord> {
        self.builds.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builds.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildRecord> {
        self.builds.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.builds.keys().map(String::as_str)
    }
}

impl FromIterator<BuildRecord> for BuildSet {
    fn from_iter<I: IntoIterator<Item = BuildRecord>>(iter: I) -> Self {
        let mut set = BuildSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

impl<'a> IntoIterator for &'a BuildSet {
    type Item = &'a BuildRecord;
    type IntoIter = indexmap::map::Values<'a, String, BuildRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.builds.values()
    }
}
