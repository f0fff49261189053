use {
    crate::{IndexOutOfRangeSnafu, Result, SlotTypeSnafu},
    snafu::prelude::*,
    std::any::{type_name, Any},
};

/// One type-erased domain value.
///
/// Positional access through [`SlotRow`] trades compile-time field-count
/// checking for unbounded width; prefer a record pair whenever the shape
/// fits a native struct.
pub struct DomainSlot(Box<dyn Any + Send + Sync>);

impl DomainSlot {
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self(Box::new(value))
    }

    pub(crate) fn from_boxed(value: Box<dyn Any + Send + Sync>) -> Self {
        Self(value)
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub(crate) fn as_any(&self) -> &(dyn Any + Send + Sync) {
        self.0.as_ref()
    }
}

/// An ordered heterogeneous sequence of domain slots, one per declared
/// column.
pub struct SlotRow {
    slots: Vec<DomainSlot>,
}

impl SlotRow {
    pub fn new(slots: Vec<DomainSlot>) -> Self {
        Self { slots }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn push<T: Send + Sync + 'static>(&mut self, value: T) {
        self.slots.push(DomainSlot::new(value));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Typed positional access. Out-of-range and wrongly typed access are
    /// runtime faults, not construction-time ones.
    pub fn at<T: 'static>(&self, index: usize) -> Result<&T> {
        let slot = self.slots.get(index).context(IndexOutOfRangeSnafu {
            index,
            len: self.slots.len(),
        })?;

        slot.get::<T>().context(SlotTypeSnafu {
            index,
            expected: type_name::<T>(),
        })
    }

    pub(crate) fn slots(&self) -> &[DomainSlot] {
        &self.slots
    }
}
