use serde::{Deserialize, Serialize};
use std::fmt;

/// Problem severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A method, identified by its owning class and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodReference {
    pub class_name: String,
    pub name: String,
}

impl MethodReference {
    pub fn new(class_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for MethodReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class_name, self.name)
    }
}

/// A position in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextLocation {
    /// Path of the source file, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub line: u32,
}

impl TextLocation {
    pub fn new(file_name: Option<&str>, line: u32) -> Self {
        Self {
            file_name: file_name.map(str::to_string),
            line,
        }
    }
}

/// Where a problem was detected: the enclosing method and source position,
/// either of which may be unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLocation {
    pub method: Option<MethodReference>,
    pub source: Option<TextLocation>,
}

impl CallLocation {
    pub fn new(method: Option<MethodReference>, source: Option<TextLocation>) -> Self {
        Self { method, source }
    }
}

/// A compilation problem with its already rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub severity: Severity,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<CallLocation>,
}

impl Problem {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
            location: None,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: CallLocation) -> Self {
        self.location = Some(location);
        self
    }
}
