use {
    crate::{
        pair::{ConverterPair, ErasedConverter},
        DuplicateMappingSnafu, MismatchedSlotSnafu, Result, UnregisteredTypeSnafu,
    },
    chrono::{DateTime, Utc},
    def::{KeyType, RawValue, StorageType},
    snafu::prelude::*,
    std::{
        any::{type_name, Any, TypeId},
        collections::HashMap,
    },
};

struct Entry {
    storage_type: StorageType,
    pair: Box<dyn Any + Send + Sync>,
}

/// Mutable column-type registry used during the single-threaded bootstrap
/// phase. [`RegistryBuilder::freeze`] turns it into the shared read-only
/// [`TypeRegistry`]; no mutation is possible afterwards.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: HashMap<TypeId, Entry>,
}

macro_rules! seed_primitives {
    ($builder:ident, $($ty:ty => $variant:ident,)*) => {
        $(
            $builder.seed::<$ty>(
                StorageType::$variant,
                ConverterPair::new(
                    |raw| match raw {
                        RawValue::$variant(value) => value,
                        // the storage boundary validates variants first
                        _ => unreachable!("raw value does not match the column's storage type"),
                    },
                    |value: &$ty| Some(RawValue::$variant(value.clone())),
                ),
            );
        )*
    };
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-seeded with the identity mapping for each storage
    /// type's native Rust representation.
    pub fn with_primitives() -> Self {
        let mut builder = Self::new();

        seed_primitives! {
            builder,
            i64 => Integer64,
            String => Text,
            bool => Boolean,
            f64 => Float64,
            Vec<u8> => Binary,
            DateTime<Utc> => Timestamp,
        }

        builder
    }

    // seeding runs on a fresh builder only, so it cannot collide
    fn seed<D: Send + Sync + 'static>(&mut self, storage_type: StorageType, pair: ConverterPair<D>) {
        self.entries.insert(
            TypeId::of::<D>(),
            Entry {
                storage_type,
                pair: Box::new(pair),
            },
        );
    }

    /// Registers a converter pair for domain type `D`. Re-registration is
    /// rejected rather than overwritten.
    pub fn register<D>(
        &mut self,
        storage_type: StorageType,
        to_domain: impl Fn(RawValue) -> D + Send + Sync + 'static,
        to_raw: impl Fn(&D) -> Option<RawValue> + Send + Sync + 'static,
    ) -> Result<()>
    where
        D: Send + Sync + 'static,
    {
        self.register_pair(storage_type, ConverterPair::new(to_domain, to_raw))
    }

    pub fn register_pair<D>(&mut self, storage_type: StorageType, pair: ConverterPair<D>) -> Result<()>
    where
        D: Send + Sync + 'static,
    {
        ensure!(
            !self.entries.contains_key(&TypeId::of::<D>()),
            DuplicateMappingSnafu {
                domain: type_name::<D>(),
            }
        );
        self.seed(storage_type, pair);

        Ok(())
    }

    /// Registers a nominal key newtype through its [`KeyType`] contract.
    pub fn register_key<K: KeyType>(&mut self) -> Result<()> {
        self.register(
            K::STORAGE,
            |raw| match K::from_raw(&raw) {
                Some(key) => key,
                // the storage boundary validates variants first
                None => unreachable!("raw value does not match the key's storage type"),
            },
            |key: &K| Some(key.to_raw()),
        )
    }

    pub fn freeze(self) -> TypeRegistry {
        TypeRegistry {
            entries: self.entries,
        }
    }
}

/// Frozen, process-wide mapping between domain types and storage types.
/// Populated once during startup; concurrent reads need no
/// synchronization because no further writes occur.
pub struct TypeRegistry {
    entries: HashMap<TypeId, Entry>,
}

impl TypeRegistry {
    fn entry<D: 'static>(&self) -> Result<&Entry> {
        self.entries
            .get(&TypeId::of::<D>())
            .context(UnregisteredTypeSnafu {
                domain: type_name::<D>(),
            })
    }

    pub fn resolve<D: Send + Sync + 'static>(&self) -> Result<ConverterPair<D>> {
        let entry = self.entry::<D>()?;

        match entry.pair.downcast_ref::<ConverterPair<D>>() {
            Some(pair) => Ok(pair.clone()),
            // entries are keyed by the pair's own type id
            None => unreachable!("registry entry holds a pair for a different type"),
        }
    }

    pub fn storage_type_of<D: 'static>(&self) -> Result<StorageType> {
        Ok(self.entry::<D>()?.storage_type)
    }

    /// Erased pair whose slot representation is `D`.
    pub fn erased<D: Send + Sync + 'static>(&self) -> Result<ErasedConverter> {
        let storage_type = self.storage_type_of::<D>()?;
        let pair = self.resolve::<D>()?;
        let forward = pair.clone();

        Ok(ErasedConverter::new(
            storage_type,
            type_name::<D>(),
            move |raw| Box::new(forward.to_domain(raw)),
            move |slot| {
                let value = slot.downcast_ref::<D>().context(MismatchedSlotSnafu {
                    expected: type_name::<D>(),
                })?;

                Ok(pair.to_raw(value))
            },
        ))
    }

    /// Erased pair for a nullable column: the slot holds `Option<D>` and
    /// `RawValue::Null` maps to `None`.
    pub fn erased_optional<D: Send + Sync + 'static>(&self) -> Result<ErasedConverter> {
        let storage_type = self.storage_type_of::<D>()?;
        let pair = self.resolve::<D>()?;
        let forward = pair.clone();

        Ok(ErasedConverter::new(
            storage_type,
            type_name::<Option<D>>(),
            move |raw| match raw {
                RawValue::Null => Box::new(None::<D>),
                raw => Box::new(Some(forward.to_domain(raw))),
            },
            move |slot| {
                let value = slot
                    .downcast_ref::<Option<D>>()
                    .context(MismatchedSlotSnafu {
                        expected: type_name::<Option<D>>(),
                    })?;

                Ok(match value {
                    None => Some(RawValue::Null),
                    Some(value) => pair.to_raw(value),
                })
            },
        ))
    }
}
