use {
    crate::{ProjectionTypeSnafu, Result},
    common::pub_fields_struct,
    def::{KeyTag, KeyType, RawRow},
    snafu::prelude::*,
    std::{any::Any, fmt, sync::Arc},
};

pub_fields_struct! {
    /// Primary key constraint: the ordered key columns plus the nominal
    /// tag their domain representation carries. One column forms a simple
    /// key, more a compound one.
    #[derive(Clone, Debug, PartialEq)]
    struct PrimaryKey {
        columns: Vec<String>,
        tag: KeyTag,
    }
}

impl PrimaryKey {
    pub fn new<I, S>(columns: I, tag: KeyTag) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            tag,
        }
    }
}

type KeyProjection = Arc<dyn Fn(&(dyn Any + Send + Sync)) -> Option<RawRow> + Send + Sync>;

/// Foreign key constraint.
///
/// The referenced table is named, not linked: resolution is deferred to
/// [`crate::SchemaBuilder::finish`], which lets mutually referencing
/// tables register in either order while still guaranteeing the reference
/// is resolved before any row-level operation can run.
#[derive(Clone)]
pub struct ForeignKey {
    name: String,
    columns: Vec<String>,
    referenced_table: String,
    tag: KeyTag,
    projection: KeyProjection,
    referenced_columns: Vec<String>,
}

impl fmt::Debug for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignKey")
            .field("name", &self.name)
            .field("columns", &self.columns)
            .field("referenced_table", &self.referenced_table)
            .field("tag", &self.tag)
            .finish()
    }
}

impl ForeignKey {
    /// Simple-key constraint: one local column referencing a table whose
    /// primary key is the nominal newtype `K`, with a projection from the
    /// referenced table's domain value to that key.
    pub fn to_key<D, K>(
        name: impl Into<String>,
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        project: impl Fn(&D) -> K + Send + Sync + 'static,
    ) -> Self
    where
        D: Send + Sync + 'static,
        K: KeyType,
    {
        Self::with_projection(name, vec![column.into()], referenced_table, K::TAG, move |value: &D| {
            vec![project(value).to_raw()]
        })
    }

    /// General form for compound keys: the projection yields the raw key
    /// values in referenced-key column order.
    pub fn with_projection<D>(
        name: impl Into<String>,
        columns: Vec<String>,
        referenced_table: impl Into<String>,
        tag: KeyTag,
        project: impl Fn(&D) -> RawRow + Send + Sync + 'static,
    ) -> Self
    where
        D: Send + Sync + 'static,
    {
        let projection: KeyProjection = Arc::new(move |any| {
            any.downcast_ref::<D>().map(|value| project(value))
        });

        Self {
            name: name.into(),
            columns,
            referenced_table: referenced_table.into(),
            tag,
            projection,
            referenced_columns: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn referenced_table(&self) -> &str {
        &self.referenced_table
    }

    pub fn tag(&self) -> KeyTag {
        self.tag
    }

    /// Referenced primary-key columns; filled in once the owning schema
    /// has been finished.
    pub fn referenced_columns(&self) -> &[String] {
        &self.referenced_columns
    }

    pub(crate) fn resolve_columns(&mut self, columns: Vec<String>) {
        self.referenced_columns = columns;
    }

    /// Projects a referenced-table domain value onto the raw key values a
    /// query collaborator turns into join conditions.
    pub fn project_key<D: Send + Sync + 'static>(&self, value: &D) -> Result<RawRow> {
        (self.projection)(value).context(ProjectionTypeSnafu {
            constraint: self.name.clone(),
        })
    }
}
