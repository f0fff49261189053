mod ddl;
mod keys;
mod schema;
mod table;

pub use {
    ddl::{DdlColumn, DdlDescriptor, DdlForeignKey, DdlPrimaryKey},
    keys::{ForeignKey, PrimaryKey},
    schema::{Schema, SchemaBuilder},
    table::TableSpec,
};

use snafu::{prelude::*, Backtrace};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display(r#"table "{}" already exists"#, name))]
    DuplicateTable { name: String },

    #[snafu(display(r#"table "{}" does not exist"#, name))]
    UnknownTable { name: String },

    #[snafu(display(r#"column "{}" named in a key of table "{}" does not exist"#, column, table))]
    UndefinedColumn { table: String, column: String },

    #[snafu(display("multiple primary keys for table {} are not allowed", table))]
    MultiplePrimaryKey { table: String },

    #[snafu(display("primary key column {} of table {} is nullable", column, table))]
    NullableKeyColumn { table: String, column: String },

    #[snafu(display(
        "foreign key {} references table {} which declares no primary key",
        constraint,
        table
    ))]
    MissingPrimaryKey { constraint: String, table: String },

    #[snafu(display(
        "foreign key {} on table {}: local key {} does not match referenced primary key {}",
        constraint,
        table,
        local,
        referenced
    ))]
    KeyTypeMismatch {
        constraint: String,
        table: String,
        local: String,
        referenced: String,
        backtrace: Backtrace,
    },

    #[snafu(display("table {} does not hold a shape for the requested domain type", table))]
    ShapeAccess { table: String },

    #[snafu(display(
        "foreign key {} cannot project a value of the given domain type",
        constraint
    ))]
    ProjectionType { constraint: String },
}

pub type Result<T> = std::result::Result<T, Error>;
