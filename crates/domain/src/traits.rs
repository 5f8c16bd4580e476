//! Validation and normalization entry points implemented by configuration objects.

use crate::finding::Diagnostics;
use crate::path::AttributePath;
use crate::value::PlanValue;

/// Read-only validation of every attribute of a configuration object.
///
/// Implementations must not short-circuit across attributes: each attached
/// check runs and its findings are concatenated.
pub trait ValidateAttributes {
    /// Validate `self`, located at `path`.
    fn validate_attributes(&self, path: &AttributePath) -> Diagnostics;
}

impl<T: ValidateAttributes> ValidateAttributes for PlanValue<T> {
    fn validate_attributes(&self, path: &AttributePath) -> Diagnostics {
        self.as_known()
            .map(|value| value.validate_attributes(path))
            .unwrap_or_default()
    }
}

impl<T: ValidateAttributes> ValidateAttributes for Option<T> {
    fn validate_attributes(&self, path: &AttributePath) -> Diagnostics {
        self.as_ref()
            .map(|value| value.validate_attributes(path))
            .unwrap_or_default()
    }
}

impl<T: ValidateAttributes> ValidateAttributes for Vec<T> {
    fn validate_attributes(&self, path: &AttributePath) -> Diagnostics {
        self.iter()
            .enumerate()
            .map(|(index, item)| item.validate_attributes(&path.index(index)))
            .collect()
    }
}

/// Outcome of normalizing a value: the (possibly rewritten) value plus any
/// findings from attributes that could not be normalized.
///
/// Attributes that fail keep their input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<T> {
    /// Canonical value.
    pub value: T,
    /// Findings raised while normalizing.
    pub diagnostics: Diagnostics,
}

impl<T> Normalized<T> {
    /// A value that needed no reporting.
    pub const fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Move the findings into `sink` and return the value.
    pub fn report_into(self, sink: &mut Diagnostics) -> T {
        sink.append(self.diagnostics);
        self.value
    }

    /// Map the value, keeping the findings.
    pub fn map<U, F>(self, op: F) -> Normalized<U>
    where
        F: FnOnce(T) -> U,
    {
        Normalized {
            value: op(self.value),
            diagnostics: self.diagnostics,
        }
    }
}

/// Plan-time canonicalization of a configuration object.
pub trait Normalize: Sized {
    /// Rewrite `self` into canonical form.
    fn normalize(self, path: &AttributePath) -> Normalized<Self>;
}

impl<T: Normalize> Normalize for PlanValue<T> {
    fn normalize(self, path: &AttributePath) -> Normalized<Self> {
        match self {
            Self::Known(value) => value.normalize(path).map(Self::Known),
            Self::Null | Self::Unknown => Normalized::clean(self),
        }
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    fn normalize(self, path: &AttributePath) -> Normalized<Self> {
        let mut diagnostics = Diagnostics::new();
        let value = self
            .into_iter()
            .enumerate()
            .map(|(index, item)| item.normalize(&path.index(index)).report_into(&mut diagnostics))
            .collect();
        Normalized { value, diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::{Finding, FindingKind};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Label(String);

    impl ValidateAttributes for Label {
        fn validate_attributes(&self, path: &AttributePath) -> Diagnostics {
            if self.0.is_empty() {
                Finding::error(FindingKind::Format, path.clone(), "must be non-empty", "").into()
            } else {
                Diagnostics::new()
            }
        }
    }

    impl Normalize for Label {
        fn normalize(self, path: &AttributePath) -> Normalized<Self> {
            if self.0.contains(' ') {
                return Normalized {
                    diagnostics: Finding::error(
                        FindingKind::MalformedInput,
                        path.clone(),
                        "contains spaces",
                        "",
                    )
                    .into(),
                    value: self,
                };
            }
            Normalized::clean(Self(self.0.to_ascii_lowercase()))
        }
    }

    #[test]
    fn collections_index_their_items() {
        let labels = vec![Label("ok".into()), Label(String::new())];
        let diagnostics = labels.validate_attributes(&AttributePath::attribute("labels"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().map(|f| f.path.to_string()),
            Some("labels[1]".to_string())
        );
    }

    #[test]
    fn unknown_and_null_values_are_skipped() {
        let path = AttributePath::attribute("label");
        assert!(PlanValue::<Label>::Unknown.validate_attributes(&path).is_empty());
        assert!(PlanValue::<Label>::Null.validate_attributes(&path).is_empty());
        assert_eq!(
            PlanValue::<Label>::Unknown.normalize(&path).value,
            PlanValue::Unknown
        );
    }

    #[test]
    fn normalization_keeps_going_after_a_failure() {
        let labels = vec![Label("a b".into()), Label("UP".into())];
        let normalized = labels.normalize(&AttributePath::attribute("labels"));
        assert_eq!(normalized.diagnostics.len(), 1);
        assert_eq!(
            normalized.value,
            vec![Label("a b".into()), Label("up".into())]
        );
    }
}
