use crate::core::{LpmError, LpmResult};
use std::fmt;

/// A requested package: `name` or `name@tag`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    pub tag: Option<String>,
}

impl PackageSpec {
    /// Split on the last `@` that is neither the first nor the last character
    ///
    /// `"pkg@1.0.0@beta"` is name `pkg@1.0.0`, tag `beta`. `"@scope"` and
    /// `"pkg@"` have no tag.
    pub fn parse(spec: &str) -> LpmResult<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(LpmError::InvalidSpec(
                "package specification cannot be empty".to_string(),
            ));
        }

        match spec.rfind('@') {
            Some(at) if at > 0 && at < spec.len() - 1 => Ok(Self {
                name: spec[..at].to_string(),
                tag: Some(spec[at + 1..].to_string()),
            }),
            _ => Ok(Self {
                name: spec.to_string(),
                tag: None,
            }),
        }
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}@{}", self.name, tag),
            None => f.write_str(&self.name),
        }
    }
}

/// One entry of the dependency manifest: a package and its installed tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    pub name: String,
    pub tag: String,
}

impl DependencyRecord {
    pub fn new(name: &str, tag: &str) -> Self {
        Self {
            name: name.to_string(),
            tag: tag.to_string(),
        }
    }

    /// The `name@tag` form accepted by [`PackageSpec::parse`]
    pub fn to_spec(&self) -> String {
        if self.tag.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{}@{}", self.name, self.tag)
        }
    }
}

/// Ordered dependency records with at most one entry per package name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyList {
    records: Vec<DependencyRecord>,
}

impl DependencyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw records; a later record for the same name replaces the earlier one
    pub fn from_records(records: Vec<DependencyRecord>) -> Self {
        let mut list = Self::new();
        for record in records {
            list.add(record);
        }
        list
    }

    /// Add a record, replacing any existing record for the same name
    ///
    /// The new record goes to the end.
    pub fn add(&mut self, record: DependencyRecord) {
        self.records.retain(|r| r.name != record.name);
        self.records.push(record);
    }

    /// Remove the record for `name`, returning whether one existed
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.name != name);
        self.records.len() != before
    }

    pub fn get(&self, name: &str) -> Option<&DependencyRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn records(&self) -> &[DependencyRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DependencyRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
