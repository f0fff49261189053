mod predicate;
mod truth;

pub use {
    predicate::{Evaluate, KeyPredicate, Predicate},
    truth::Truth,
};

use {
    def::{KeyTag, StorageType},
    snafu::prelude::*,
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("cannot compare a {} key against a {} key", lhs, rhs))]
    IncompatibleKeyComparison { lhs: KeyTag, rhs: KeyTag },

    #[snafu(display("cannot compare values of storage types {} and {}", lhs, rhs))]
    MismatchedTypes { lhs: StorageType, rhs: StorageType },
}

pub type Result<T> = std::result::Result<T, Error>;
