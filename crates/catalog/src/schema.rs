use {
    crate::{
        ddl::DdlDescriptor, table::TableSpec, DuplicateTableSnafu, KeyTypeMismatchSnafu,
        MissingPrimaryKeySnafu, Result, UnknownTableSnafu,
    },
    def::{KeyTag, StorageType},
    snafu::prelude::*,
    std::collections::HashMap,
    tracing::{debug, warn},
};

/// Accumulates table declarations during the single-threaded bootstrap
/// phase. [`SchemaBuilder::finish`] validates every key constraint and
/// freezes the graph; a schema that would let a mistyped key reach
/// runtime never comes into existence.
#[derive(Default)]
pub struct SchemaBuilder {
    tables: Vec<TableSpec>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_table(&mut self, spec: TableSpec) -> Result<()> {
        ensure!(
            self.tables.iter().all(|table| table.name() != spec.name()),
            DuplicateTableSnafu { name: spec.name() }
        );

        if spec.primary_key().is_none() {
            // legal, but no foreign key will ever be able to reference it
            warn!(table = spec.name(), "table registered without a primary key");
        }
        debug!(
            table = spec.name(),
            columns = spec.columns().len(),
            "registered table"
        );

        self.tables.push(spec);

        Ok(())
    }

    /// Resolves every foreign key against its referenced table and
    /// freezes the graph. Key-type mismatches abort construction here,
    /// before any row operation can exist.
    pub fn finish(mut self) -> Result<Schema> {
        let mut resolved = vec![];

        for (table_index, table) in self.tables.iter().enumerate() {
            for (key_index, key) in table.foreign_keys().iter().enumerate() {
                let referenced = self
                    .tables
                    .iter()
                    .find(|candidate| candidate.name() == key.referenced_table())
                    .context(UnknownTableSnafu {
                        name: key.referenced_table(),
                    })?;
                let primary_key = referenced.primary_key().context(MissingPrimaryKeySnafu {
                    constraint: key.name(),
                    table: referenced.name(),
                })?;

                let local_types = column_types(table, key.columns())?;
                let referenced_types = column_types(referenced, &primary_key.columns)?;

                ensure!(
                    key.tag() == primary_key.tag && local_types == referenced_types,
                    KeyTypeMismatchSnafu {
                        constraint: key.name(),
                        table: table.name(),
                        local: key_description(key.tag(), &local_types),
                        referenced: key_description(primary_key.tag, &referenced_types),
                    }
                );

                resolved.push((table_index, key_index, primary_key.columns.clone()));
            }
        }

        for (table_index, key_index, columns) in resolved {
            self.tables[table_index]
                .foreign_key_mut(key_index)
                .resolve_columns(columns);
        }

        let index = self
            .tables
            .iter()
            .enumerate()
            .map(|(position, table)| (table.name().to_string(), position))
            .collect();

        Ok(Schema {
            index,
            tables: self.tables,
        })
    }
}

fn column_types(table: &TableSpec, columns: &[String]) -> Result<Vec<StorageType>> {
    columns
        .iter()
        .map(|column| Ok(table.column(column)?.storage_type))
        .collect()
}

fn key_description(tag: KeyTag, types: &[StorageType]) -> String {
    let types = types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!("{} ({})", tag, types)
}

/// The frozen set of table declarations. Lookups are lock-free; the
/// graph never changes after construction.
pub struct Schema {
    index: HashMap<String, usize>,
    tables: Vec<TableSpec>,
}

impl Schema {
    pub fn table(&self, name: &str) -> Result<&TableSpec> {
        self.index
            .get(name)
            .map(|position| &self.tables[*position])
            .context(UnknownTableSnafu { name })
    }

    /// Tables in registration order.
    pub fn tables(&self) -> impl Iterator<Item = &TableSpec> {
        self.tables.iter()
    }

    pub fn ddl_descriptors(&self) -> Vec<DdlDescriptor> {
        self.tables.iter().map(TableSpec::ddl_descriptor).collect()
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field(
                "tables",
                &self.tables.iter().map(TableSpec::name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
