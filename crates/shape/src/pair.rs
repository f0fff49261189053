use {
    crate::{Result, SlotRow},
    std::sync::Arc,
};

/// The row-level half of a shape: how a full slot row becomes a domain
/// value and back. Per-column raw conversion happens before and after
/// this pair runs.
pub struct ShapePair<D> {
    arity: usize,
    to_domain: Arc<dyn Fn(SlotRow) -> Result<D> + Send + Sync>,
    to_raw: Arc<dyn Fn(&D) -> Option<SlotRow> + Send + Sync>,
}

impl<D> Clone for ShapePair<D> {
    fn clone(&self) -> Self {
        Self {
            arity: self.arity,
            to_domain: self.to_domain.clone(),
            to_raw: self.to_raw.clone(),
        }
    }
}

impl<D> ShapePair<D> {
    pub fn new(
        arity: usize,
        to_domain: impl Fn(SlotRow) -> Result<D> + Send + Sync + 'static,
        to_raw: impl Fn(&D) -> Option<SlotRow> + Send + Sync + 'static,
    ) -> Self {
        Self {
            arity,
            to_domain: Arc::new(to_domain),
            to_raw: Arc::new(to_raw),
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) fn to_domain(&self, slots: SlotRow) -> Result<D> {
        (self.to_domain)(slots)
    }

    pub(crate) fn to_raw(&self, value: &D) -> Option<SlotRow> {
        (self.to_raw)(value)
    }
}

/// Builds a [`ShapePair`] for a record whose field order matches the
/// declared column order. Fields must be `Clone`; a nullable column takes
/// an `Option` field. Reordered or nested shapes are written as explicit
/// closures through [`ShapePair::new`] instead.
#[macro_export]
macro_rules! record_pair {
    ($name:ident { $($field:ident: $ty:ty),* $(,)? }) => {{
        const ARITY: usize = [$(stringify!($field)),*].len();

        $crate::ShapePair::<$name>::new(
            ARITY,
            |slots: $crate::SlotRow| {
                let mut index = 0usize;
                let value = $name {
                    $(
                        $field: {
                            let field = slots.at::<$ty>(index)?.clone();
                            index += 1;
                            field
                        },
                    )*
                };
                let _ = index;

                Ok(value)
            },
            |value: &$name| {
                let mut slots = $crate::SlotRow::with_capacity(ARITY);
                $(slots.push::<$ty>(value.$field.clone());)*

                Some(slots)
            },
        )
    }};
}
