mod column;
mod key;
mod types;
mod value;

pub use {
    column::ColumnSpec,
    key::{KeyTag, KeyType, KeyValue},
    types::StorageType,
    value::{RawRow, RawValue},
};
