use {
    crate::{RawValue, StorageType},
    common::pub_fields_struct,
};

pub_fields_struct! {
    /// Declares one column of a table. Immutable once the owning table is
    /// registered.
    #[derive(Clone, Debug, PartialEq)]
    struct ColumnSpec {
        name: String,
        storage_type: StorageType,
        nullable: bool,
        /// Applied by the storage engine on insert when no value is
        /// supplied; never decoded into the domain value.
        default: Option<RawValue>,
        /// Display width hint for presentation layers.
        width: Option<u16>,
    }
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, storage_type: StorageType) -> Self {
        Self {
            name: name.into(),
            storage_type,
            nullable: false,
            default: None,
            width: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<RawValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }
}
