use {
    crate::{
        ddl::{DdlColumn, DdlDescriptor, DdlForeignKey, DdlPrimaryKey},
        keys::{ForeignKey, PrimaryKey},
        MultiplePrimaryKeySnafu, NullableKeyColumnSnafu, Result, ShapeAccessSnafu,
        UndefinedColumnSnafu,
    },
    def::ColumnSpec,
    shape::ShapeDescriptor,
    snafu::prelude::*,
    std::any::Any,
};

/// One table declaration: name, shape, keys. Constructed once during
/// bootstrap and immutable after registration in a schema.
pub struct TableSpec {
    name: String,
    columns: Vec<ColumnSpec>,
    shape: Box<dyn Any + Send + Sync>,
    primary_key: Option<PrimaryKey>,
    foreign_keys: Vec<ForeignKey>,
}

impl std::fmt::Debug for TableSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableSpec")
            .field("name", &self.name)
            .field("columns", &self.columns)
            .field("primary_key", &self.primary_key)
            .field("foreign_keys", &self.foreign_keys)
            .finish_non_exhaustive()
    }
}

impl TableSpec {
    pub fn new<D: Send + Sync + 'static>(
        name: impl Into<String>,
        shape: ShapeDescriptor<D>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: shape.columns().to_vec(),
            shape: Box::new(shape),
            primary_key: None,
            foreign_keys: vec![],
        }
    }

    /// Declares the primary key. Key columns must exist and be
    /// non-nullable; a second declaration is rejected.
    pub fn with_primary_key(mut self, key: PrimaryKey) -> Result<Self> {
        ensure!(
            self.primary_key.is_none(),
            MultiplePrimaryKeySnafu {
                table: self.name.clone(),
            }
        );

        for column in &key.columns {
            let spec = column_spec(&self.name, &self.columns, column)?;
            ensure!(
                !spec.nullable,
                NullableKeyColumnSnafu {
                    table: self.name.clone(),
                    column: column.clone(),
                }
            );
        }

        self.primary_key = Some(key);

        Ok(self)
    }

    /// Declares a foreign key; its local columns must exist. The
    /// referenced side is checked when the schema is finished.
    pub fn with_foreign_key(mut self, key: ForeignKey) -> Result<Self> {
        for column in key.columns() {
            column_spec(&self.name, &self.columns, column)?;
        }

        self.foreign_keys.push(key);

        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn primary_key(&self) -> Option<&PrimaryKey> {
        self.primary_key.as_ref()
    }

    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    pub(crate) fn foreign_key_mut(&mut self, index: usize) -> &mut ForeignKey {
        &mut self.foreign_keys[index]
    }

    pub(crate) fn column(&self, name: &str) -> Result<&ColumnSpec> {
        column_spec(&self.name, &self.columns, name)
    }

    /// Typed access to the owned shape descriptor.
    pub fn shape<D: Send + Sync + 'static>(&self) -> Result<&ShapeDescriptor<D>> {
        self.shape
            .downcast_ref::<ShapeDescriptor<D>>()
            .context(ShapeAccessSnafu {
                table: self.name.clone(),
            })
    }

    /// The passive structural description the storage collaborator turns
    /// into schema-definition statements.
    pub fn ddl_descriptor(&self) -> DdlDescriptor {
        DdlDescriptor {
            table_name: self.name.clone(),
            columns: self
                .columns
                .iter()
                .map(|column| DdlColumn {
                    name: column.name.clone(),
                    storage_type: column.storage_type,
                    nullable: column.nullable,
                    default: column.default.clone(),
                })
                .collect(),
            primary_key: self.primary_key.as_ref().map(|key| DdlPrimaryKey {
                columns: key.columns.clone(),
                tag: key.tag.name().to_string(),
            }),
            foreign_keys: self
                .foreign_keys
                .iter()
                .map(|key| DdlForeignKey {
                    name: key.name().to_string(),
                    columns: key.columns().to_vec(),
                    referenced_table: key.referenced_table().to_string(),
                    referenced_columns: key.referenced_columns().to_vec(),
                })
                .collect(),
        }
    }
}

fn column_spec<'a>(table: &str, columns: &'a [ColumnSpec], name: &str) -> Result<&'a ColumnSpec> {
    columns
        .iter()
        .find(|column| column.name == name)
        .context(UndefinedColumnSnafu {
            table,
            column: name,
        })
}
