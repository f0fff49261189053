use {
    common::pub_fields_struct,
    def::{RawValue, StorageType},
    serde::{Deserialize, Serialize},
};

pub_fields_struct! {
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct DdlColumn {
        name: String,
        storage_type: StorageType,
        nullable: bool,
        default: Option<RawValue>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct DdlPrimaryKey {
        columns: Vec<String>,
        tag: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct DdlForeignKey {
        name: String,
        columns: Vec<String>,
        referenced_table: String,
        /// Empty until the owning schema has been finished.
        referenced_columns: Vec<String>,
    }

    /// Passive structural description of one table, consumed by the
    /// storage collaborator that renders schema-definition statements.
    /// This core never emits dialect-specific text itself.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct DdlDescriptor {
        table_name: String,
        columns: Vec<DdlColumn>,
        primary_key: Option<DdlPrimaryKey>,
        foreign_keys: Vec<DdlForeignKey>,
    }
}
