//! Namespace identifiers and permission tokens

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between namespace segments
pub const SEPARATOR: char = '.';

/// Errors raised while building a namespace name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("namespace name is empty")]
    Empty,

    #[error("namespace '{0}' contains an empty segment")]
    EmptySegment(String),

    #[error("namespace segment '{0}' must only contain letters, digits or '_'")]
    InvalidSegment(String),
}

/// Returns true for characters allowed inside a namespace segment
pub fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// A fully qualified, dot-delimited namespace name
///
/// The name is stored as its ordered segments; `acme.example` is the child
/// of `acme`, and `acme` is a root. A name always has at least one segment
/// and no segment is ever empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamespaceName {
    segments: Vec<String>,
}

impl NamespaceName {
    /// Build a name from already split segments
    pub fn from_segments<I, S>(segments: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(NameError::Empty);
        }

        for segment in &segments {
            if segment.is_empty() {
                return Err(NameError::EmptySegment(segments.join(".")));
            }
            if !segment.chars().all(is_identifier_char) {
                return Err(NameError::InvalidSegment(segment.clone()));
            }
        }

        Ok(Self { segments })
    }

    /// The ordered segments of this name
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// A root namespace has no separator and therefore no parent
    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// The parent name, or `None` for roots
    pub fn parent(&self) -> Option<NamespaceName> {
        if self.is_root() {
            return None;
        }

        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// True if `other` is a direct child of this name
    pub fn is_parent_of(&self, other: &NamespaceName) -> bool {
        other.depth() == self.depth() + 1 && other.segments.starts_with(&self.segments)
    }
}

impl fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for NamespaceName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(NameError::Empty);
        }
        Self::from_segments(s.split(SEPARATOR))
    }
}

impl TryFrom<String> for NamespaceName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NamespaceName> for String {
    fn from(name: NamespaceName) -> Self {
        name.to_string()
    }
}

/// Permissions a role can be granted on a namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "use.namespace")]
    UseNamespace,
    #[serde(rename = "create.namespace")]
    CreateNamespace,
    #[serde(rename = "drop.namespace")]
    DropNamespace,
    #[serde(rename = "show.namespaces")]
    ShowNamespaces,
}

impl Permission {
    /// The dotted token for this permission
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::UseNamespace => "use.namespace",
            Permission::CreateNamespace => "create.namespace",
            Permission::DropNamespace => "drop.namespace",
            Permission::ShowNamespaces => "show.namespaces",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "use.namespace" => Ok(Permission::UseNamespace),
            "create.namespace" => Ok(Permission::CreateNamespace),
            "drop.namespace" => Ok(Permission::DropNamespace),
            "show.namespaces" => Ok(Permission::ShowNamespaces),
            other => Err(format!("unknown permission '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> NamespaceName {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_namespace_name() {
        let ns = name("acme.example.dynamite");
        assert_eq!(ns.segments(), &["acme", "example", "dynamite"]);
        assert_eq!(ns.depth(), 3);
        assert_eq!(ns.to_string(), "acme.example.dynamite");
        assert!(!ns.is_root());
    }

    #[test]
    fn test_reject_malformed_names() {
        assert_eq!("".parse::<NamespaceName>(), Err(NameError::Empty));
        assert!(matches!(".acme".parse::<NamespaceName>(), Err(NameError::EmptySegment(_))));
        assert!(matches!("acme.".parse::<NamespaceName>(), Err(NameError::EmptySegment(_))));
        assert!(matches!("acme..example".parse::<NamespaceName>(), Err(NameError::EmptySegment(_))));
        assert_eq!(
            "acme.ex-ample".parse::<NamespaceName>(),
            Err(NameError::InvalidSegment("ex-ample".to_string()))
        );
        assert_eq!(
            NamespaceName::from_segments(Vec::<String>::new()),
            Err(NameError::Empty)
        );
    }

    #[test]
    fn test_parent_and_children() {
        let root = name("acme");
        let child = name("acme.example");
        let grandchild = name("acme.example.dynamite");

        assert!(root.is_root());
        assert_eq!(root.parent(), None);
        assert_eq!(child.parent(), Some(root.clone()));
        assert_eq!(grandchild.parent(), Some(child.clone()));

        assert!(root.is_parent_of(&child));
        assert!(!root.is_parent_of(&grandchild));
        assert!(!root.is_parent_of(&name("acmex.example")));
    }

    #[test]
    fn test_permission_tokens() {
        for permission in [
            Permission::UseNamespace,
            Permission::CreateNamespace,
            Permission::DropNamespace,
            Permission::ShowNamespaces,
        ] {
            assert_eq!(permission.as_str().parse::<Permission>(), Ok(permission));
        }
        assert_eq!(Permission::CreateNamespace.to_string(), "create.namespace");
        assert!("create.table".parse::<Permission>().is_err());
    }
}
