//! Facade over the typed relational-mapping core: declare tables, map
//! rows to domain values, and keep key types nominally distinct, all
//! checked before anything reaches a storage backend.

pub use {catalog, def, expr, registry, shape};

pub use {
    catalog::{
        DdlColumn, DdlDescriptor, DdlForeignKey, DdlPrimaryKey, ForeignKey, PrimaryKey, Schema,
        SchemaBuilder, TableSpec,
    },
    def::{key_type, ColumnSpec, KeyTag, KeyType, KeyValue, RawRow, RawValue, StorageType},
    expr::{Evaluate, KeyPredicate, Predicate, Truth},
    registry::{ConverterPair, RegistryBuilder, TypeRegistry},
    shape::{record_pair, DomainSlot, ShapeBuilder, ShapeDescriptor, ShapePair, SlotRow},
};
