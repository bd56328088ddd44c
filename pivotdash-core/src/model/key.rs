use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::Display;

const SEPARATOR: char = '|';

/// Join key for one cell in the payload's `cellData` map.
///
/// `category|subcategory`, prefixed with `project|` when the cell belongs to
/// a project.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellKey(String);

impl CellKey {
    pub fn new(project: Option<&str>, category: &str, subcategory: &str) -> Self {
        match project {
            Some(project) => Self(format!(
                "{project}{SEPARATOR}{category}{SEPARATOR}{subcategory}"
            )),
            None => Self(format!("{category}{SEPARATOR}{subcategory}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CellKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CellKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Borrow<str> for CellKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CellKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CellKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_without_project() {
        assert_eq!(CellKey::new(None, "Sales", "North"), "Sales|North");
    }

    #[test]
    fn test_key_with_project() {
        assert_eq!(
            CellKey::new(Some("P-01"), "Sales", "North"),
            "P-01|Sales|North"
        );
    }
}
