use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Label prefixes that mark a node as a teacher unless configured otherwise.
pub const DEFAULT_TEACHER_PREFIXES: [&str; 2] = ["Sir", "Maam"];

/// Identifier of a node as written in the input file. Both integer and string ids are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Text(String),
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeId::Int(v) => write!(f, "{v}"),
            NodeId::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId::Int(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId::Text(value.to_string())
    }
}

impl NodeId {
    /// Parse an id typed on the command line. Anything that reads as an integer is an integer id.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(v) => NodeId::Int(v),
            Err(_) => NodeId::Text(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    /// Teachers are recognised purely by label prefix (case-sensitive).
    pub fn of<S: AsRef<str>>(label: &str, teacher_prefixes: &[S]) -> Self {
        if teacher_prefixes
            .iter()
            .any(|prefix| label.starts_with(prefix.as_ref()))
        {
            Role::Teacher
        } else {
            Role::Student
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    pub fn role<S: AsRef<str>>(&self, teacher_prefixes: &[S]) -> Role {
        Role::of(&self.label, teacher_prefixes)
    }
}
