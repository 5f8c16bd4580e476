//! Attribute paths and typed sibling access.

use serde::{Serialize, Serializer};
use std::fmt;

/// One step of an [`AttributePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Named attribute (struct field / nested block).
    Attribute(Box<str>),
    /// Position within a list.
    Index(usize),
    /// Key within a map.
    Key(Box<str>),
}

/// Addressable location within a configuration object graph.
///
/// Paths are immutable values; `child`, `index` and `key` return extended
/// copies so that callers can hand out paths to nested checks freely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    /// The empty (root) path.
    #[must_use]
    pub const fn root() -> Self {
        Self { steps: Vec::new() }
    }

    /// A path made of a single attribute step.
    #[must_use]
    pub fn attribute(name: impl Into<Box<str>>) -> Self {
        Self::root().child(name)
    }

    /// Extend with a named attribute.
    #[must_use]
    pub fn child(&self, name: impl Into<Box<str>>) -> Self {
        self.with_step(PathStep::Attribute(name.into()))
    }

    /// Extend with a list index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.with_step(PathStep::Index(index))
    }

    /// Extend with a map key.
    #[must_use]
    pub fn key(&self, key: impl Into<Box<str>>) -> Self {
        self.with_step(PathStep::Key(key.into()))
    }

    /// The enclosing path, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.steps.split_last()?;
        Some(Self {
            steps: rest.to_vec(),
        })
    }

    /// A sibling attribute sharing this path's parent.
    #[must_use]
    pub fn sibling(&self, name: impl Into<Box<str>>) -> Self {
        self.parent().unwrap_or_default().child(name)
    }

    /// Name of the last attribute step, skipping trailing index/key steps.
    #[must_use]
    pub fn last_attribute(&self) -> Option<&str> {
        self.steps.iter().rev().find_map(|step| match step {
            PathStep::Attribute(name) => Some(name.as_ref()),
            PathStep::Index(_) | PathStep::Key(_) => None,
        })
    }

    /// Borrow the steps.
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Returns true for the empty path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    fn with_step(&self, step: PathStep) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step);
        Self { steps }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return formatter.write_str("<root>");
        }
        for (position, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Attribute(name) => {
                    if position > 0 {
                        formatter.write_str(".")?;
                    }
                    formatter.write_str(name)?;
                },
                PathStep::Index(index) => write!(formatter, "[{index}]")?,
                PathStep::Key(key) => write!(formatter, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for AttributePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Read-only view of the structural parent of the attribute under check.
///
/// Cross-field validators receive this instead of walking paths by name, so
/// the siblings they may read are fixed by the parent's type `P`.
#[derive(Debug)]
pub struct SiblingView<'a, P> {
    parent: &'a P,
    parent_path: &'a AttributePath,
}

impl<'a, P> SiblingView<'a, P> {
    /// Create a view over `parent`, located at `parent_path`.
    pub const fn new(parent: &'a P, parent_path: &'a AttributePath) -> Self {
        Self {
            parent,
            parent_path,
        }
    }

    /// Borrow the parent object.
    pub const fn parent(&self) -> &'a P {
        self.parent
    }

    /// Path of a sibling attribute on the parent.
    #[must_use]
    pub fn path_of(&self, name: &str) -> AttributePath {
        self.parent_path.child(name)
    }
}
