mod descriptor;
mod pair;
mod slot;

pub use {
    descriptor::{ShapeBuilder, ShapeDescriptor},
    pair::ShapePair,
    slot::{DomainSlot, SlotRow},
};

use {
    def::StorageType,
    snafu::{prelude::*, Backtrace},
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display(
        "shape declares {} columns but its converter pair expects {}",
        columns,
        arity
    ))]
    Arity {
        columns: usize,
        arity: usize,
        backtrace: Backtrace,
    },

    #[snafu(display("duplicate column {}", name))]
    DuplicateColumn { name: String },

    #[snafu(display(
        "column {} is declared as {} but its domain type is registered against {}",
        name,
        declared,
        registered
    ))]
    ColumnStorage {
        name: String,
        declared: StorageType,
        registered: StorageType,
    },

    #[snafu(display(
        "column {} nullability does not match the requested slot representation",
        name
    ))]
    Nullability { name: String },

    #[snafu(display("default value for column {} does not match its storage type", name))]
    DefaultType { name: String },

    #[snafu(display("slot index {} is out of range for a row of {} slots", index, len))]
    IndexOutOfRange { index: usize, len: usize },

    #[snafu(display("slot {} does not hold a value of type {}", index, expected))]
    SlotType {
        index: usize,
        expected: &'static str,
    },

    #[snafu(display("domain value cannot be decomposed into the declared columns"))]
    Unprojectable,

    #[snafu(display("value for column {} has no raw representation", column))]
    Unrepresentable { column: String },

    #[snafu(display("type mapping is missing"))]
    Registry {
        #[snafu(backtrace)]
        source: registry::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
