use {
    serde::{Deserialize, Serialize},
    std::fmt::Display,
};

/// The closed set of wire representations a column can hold. Domain-level
/// variety comes from converters registered against these, never from
/// extending the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageType {
    Integer64,
    Text,
    Boolean,
    Float64,
    Binary,
    Timestamp,
}

impl Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Integer64 => "integer64",
                Self::Text => "text",
                Self::Boolean => "boolean",
                Self::Float64 => "float64",
                Self::Binary => "binary",
                Self::Timestamp => "timestamp",
            }
        )
    }
}
