use {
    crate::Result,
    def::{RawValue, StorageType},
    std::{any::Any, sync::Arc},
};

/// Bidirectional conversion between one column's raw representation and a
/// domain type.
///
/// `to_domain` is total: the storage boundary validates the raw variant
/// against the column's storage type before conversion runs. `to_raw` may
/// refuse a domain value that has no raw form; for every value produced
/// by `to_domain(r)` it must return `Some(r)` back.
pub struct ConverterPair<D> {
    to_domain: Arc<dyn Fn(RawValue) -> D + Send + Sync>,
    to_raw: Arc<dyn Fn(&D) -> Option<RawValue> + Send + Sync>,
}

impl<D> Clone for ConverterPair<D> {
    fn clone(&self) -> Self {
        Self {
            to_domain: self.to_domain.clone(),
            to_raw: self.to_raw.clone(),
        }
    }
}

impl<D> std::fmt::Debug for ConverterPair<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterPair").finish_non_exhaustive()
    }
}

impl<D> ConverterPair<D> {
    pub fn new(
        to_domain: impl Fn(RawValue) -> D + Send + Sync + 'static,
        to_raw: impl Fn(&D) -> Option<RawValue> + Send + Sync + 'static,
    ) -> Self {
        Self {
            to_domain: Arc::new(to_domain),
            to_raw: Arc::new(to_raw),
        }
    }

    pub fn to_domain(&self, raw: RawValue) -> D {
        (self.to_domain)(raw)
    }

    pub fn to_raw(&self, value: &D) -> Option<RawValue> {
        (self.to_raw)(value)
    }
}

/// Type-erased view of a registered pair. Shape descriptors use it to
/// move values between a raw row and positional domain slots without
/// knowing the slot types.
#[derive(Clone)]
pub struct ErasedConverter {
    storage_type: StorageType,
    domain_type: &'static str,
    to_slot: Arc<dyn Fn(RawValue) -> Box<dyn Any + Send + Sync> + Send + Sync>,
    from_slot: Arc<dyn Fn(&(dyn Any + Send + Sync)) -> Result<Option<RawValue>> + Send + Sync>,
}

impl ErasedConverter {
    pub(crate) fn new(
        storage_type: StorageType,
        domain_type: &'static str,
        to_slot: impl Fn(RawValue) -> Box<dyn Any + Send + Sync> + Send + Sync + 'static,
        from_slot: impl Fn(&(dyn Any + Send + Sync)) -> Result<Option<RawValue>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            storage_type,
            domain_type,
            to_slot: Arc::new(to_slot),
            from_slot: Arc::new(from_slot),
        }
    }

    pub fn storage_type(&self) -> StorageType {
        self.storage_type
    }

    pub fn domain_type(&self) -> &'static str {
        self.domain_type
    }

    pub fn raw_to_slot(&self, raw: RawValue) -> Box<dyn Any + Send + Sync> {
        (self.to_slot)(raw)
    }

    /// `Ok(None)` means the slot value has no raw representation;
    /// `MismatchedSlot` means the slot holds a different type altogether.
    pub fn slot_to_raw(&self, slot: &(dyn Any + Send + Sync)) -> Result<Option<RawValue>> {
        (self.from_slot)(slot)
    }
}
