use {
    crate::{truth::Truth, IncompatibleKeyComparisonSnafu, MismatchedTypesSnafu, Result},
    def::{KeyValue, RawValue},
    snafu::prelude::*,
};

/// The seam a query-composition collaborator builds join and filter
/// conditions on. Constructors reject ill-typed comparisons, so nothing
/// ill-typed can ever be rendered into a statement.
pub trait Evaluate {
    fn evaluate(&self) -> Truth;
}

/// Comparison over plain column values.
#[derive(Clone, Debug)]
pub enum Predicate {
    Equals { lhs: RawValue, rhs: RawValue },
    IsAbsent { value: RawValue },
}

impl Predicate {
    /// Equality with absence propagation: if either side is `Null` the
    /// comparison evaluates to `Unknown` and never matches. This is not
    /// an absence test; use [`Predicate::is_absent`] for that.
    pub fn equals(lhs: impl Into<RawValue>, rhs: impl Into<RawValue>) -> Result<Self> {
        let (lhs, rhs) = (lhs.into(), rhs.into());

        if let (Some(left), Some(right)) = (lhs.storage_type(), rhs.storage_type()) {
            ensure!(
                left == right,
                MismatchedTypesSnafu {
                    lhs: left,
                    rhs: right,
                }
            );
        }

        Ok(Self::Equals { lhs, rhs })
    }

    /// The only reliable absence test.
    pub fn is_absent(value: impl Into<RawValue>) -> Self {
        Self::IsAbsent {
            value: value.into(),
        }
    }
}

impl Evaluate for Predicate {
    fn evaluate(&self) -> Truth {
        match self {
            Self::Equals { lhs, rhs } => {
                if lhs.is_null() || rhs.is_null() {
                    Truth::Unknown
                } else {
                    Truth::from(lhs == rhs)
                }
            }
            Self::IsAbsent { value } => Truth::from(value.is_null()),
        }
    }
}

/// Equality between two key-tagged values.
///
/// Construction fails when the nominal tags differ, even if the
/// underlying storage types are identical; this is the runtime arm of
/// key distinctness, for code paths that have lost the key newtypes.
#[derive(Clone, Debug)]
pub struct KeyPredicate {
    lhs: KeyValue,
    rhs: KeyValue,
}

impl KeyPredicate {
    pub fn equals(lhs: KeyValue, rhs: KeyValue) -> Result<Self> {
        ensure!(
            lhs.tag() == rhs.tag(),
            IncompatibleKeyComparisonSnafu {
                lhs: lhs.tag(),
                rhs: rhs.tag(),
            }
        );

        if let (Some(left), Some(right)) = (lhs.raw().storage_type(), rhs.raw().storage_type()) {
            ensure!(
                left == right,
                MismatchedTypesSnafu {
                    lhs: left,
                    rhs: right,
                }
            );
        }

        Ok(Self { lhs, rhs })
    }
}

impl Evaluate for KeyPredicate {
    fn evaluate(&self) -> Truth {
        if self.lhs.raw().is_null() || self.rhs.raw().is_null() {
            Truth::Unknown
        } else {
            Truth::from(self.lhs.raw() == self.rhs.raw())
        }
    }
}
