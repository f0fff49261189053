use {
    crate::{
        pair::ShapePair,
        slot::{DomainSlot, SlotRow},
        AritySnafu, ColumnStorageSnafu, DefaultTypeSnafu, DuplicateColumnSnafu, Error,
        NullabilitySnafu, RegistrySnafu, Result, UnprojectableSnafu, UnrepresentableSnafu,
    },
    def::{ColumnSpec, RawRow},
    registry::{ErasedConverter, TypeRegistry},
    snafu::prelude::*,
};

/// Collects a shape's declared projection column by column, resolving
/// each column's converter from the registry as it goes. Every failure
/// here is a construction-time failure; nothing built by this type can
/// fail on arity or typing grounds later.
pub struct ShapeBuilder<'a> {
    registry: &'a TypeRegistry,
    columns: Vec<ColumnSpec>,
    converters: Vec<ErasedConverter>,
}

impl<'a> std::fmt::Debug for ShapeBuilder<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeBuilder")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

impl<'a> ShapeBuilder<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            columns: vec![],
            converters: vec![],
        }
    }

    /// Declares the next non-nullable column, mapped to domain type `D`.
    pub fn column<D: Send + Sync + 'static>(self, spec: ColumnSpec) -> Result<Self> {
        ensure!(
            !spec.nullable,
            NullabilitySnafu {
                name: spec.name.clone(),
            }
        );
        let converter = self.registry.erased::<D>().context(RegistrySnafu)?;

        self.push(spec, converter)
    }

    /// Declares the next nullable column; the slot representation becomes
    /// `Option<D>` and `RawValue::Null` maps to `None`.
    pub fn nullable_column<D: Send + Sync + 'static>(self, spec: ColumnSpec) -> Result<Self> {
        ensure!(
            spec.nullable,
            NullabilitySnafu {
                name: spec.name.clone(),
            }
        );
        let converter = self
            .registry
            .erased_optional::<D>()
            .context(RegistrySnafu)?;

        self.push(spec, converter)
    }

    fn push(mut self, spec: ColumnSpec, converter: ErasedConverter) -> Result<Self> {
        ensure!(
            self.columns.iter().all(|column| column.name != spec.name),
            DuplicateColumnSnafu {
                name: spec.name.clone(),
            }
        );
        ensure!(
            converter.storage_type() == spec.storage_type,
            ColumnStorageSnafu {
                name: spec.name.clone(),
                declared: spec.storage_type,
                registered: converter.storage_type(),
            }
        );

        if let Some(default) = &spec.default {
            let well_typed =
                default.matches(spec.storage_type) && (spec.nullable || !default.is_null());
            ensure!(
                well_typed,
                DefaultTypeSnafu {
                    name: spec.name.clone(),
                }
            );
        }

        self.columns.push(spec);
        self.converters.push(converter);

        Ok(self)
    }

    /// Closes the shape over its row-level pair. The declared column
    /// count must exactly match the pair's arity; a mismatch never
    /// truncates or pads.
    pub fn finish<D>(self, pair: ShapePair<D>) -> Result<ShapeDescriptor<D>> {
        ensure!(
            self.columns.len() == pair.arity(),
            AritySnafu {
                columns: self.columns.len(),
                arity: pair.arity(),
            }
        );

        Ok(ShapeDescriptor {
            columns: self.columns,
            converters: self.converters,
            pair,
        })
    }
}

/// The declared correspondence between one table's column list and a
/// domain value. The declared columns are the whole projection: columns
/// of the underlying table left out here simply do not exist for this
/// shape. Immutable once built; [`ShapeDescriptor::project`] and
/// [`ShapeDescriptor::unproject`] are pure and run concurrently without
/// synchronization.
pub struct ShapeDescriptor<D> {
    columns: Vec<ColumnSpec>,
    converters: Vec<ErasedConverter>,
    pair: ShapePair<D>,
}

impl<D> std::fmt::Debug for ShapeDescriptor<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeDescriptor")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

impl<D> ShapeDescriptor<D> {
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    /// Maps one raw row onto the domain value, applying each column's
    /// converter and then the row-level pair. The row's arity and value
    /// types are the storage boundary's contract; they are asserted only
    /// in debug builds.
    pub fn project(&self, row: RawRow) -> Result<D> {
        debug_assert_eq!(row.len(), self.converters.len());

        let slots = row
            .into_iter()
            .zip(self.converters.iter())
            .map(|(raw, converter)| DomainSlot::from_boxed(converter.raw_to_slot(raw)))
            .collect();

        self.pair.to_domain(SlotRow::new(slots))
    }

    /// Decomposes a domain value back into a raw row following the
    /// declared column order.
    pub fn unproject(&self, value: &D) -> Result<RawRow> {
        let slots = self.pair.to_raw(value).context(UnprojectableSnafu)?;
        ensure!(
            slots.len() == self.converters.len(),
            AritySnafu {
                columns: self.converters.len(),
                arity: slots.len(),
            }
        );

        slots
            .slots()
            .iter()
            .enumerate()
            .zip(self.converters.iter().zip(self.columns.iter()))
            .map(|((index, slot), (converter, column))| {
                converter
                    .slot_to_raw(slot.as_any())
                    .map_err(|source| match source {
                        registry::Error::MismatchedSlot { expected } => {
                            Error::SlotType { index, expected }
                        }
                        source => Error::Registry { source },
                    })?
                    .context(UnrepresentableSnafu {
                        column: column.name.clone(),
                    })
            })
            .collect()
    }
}
