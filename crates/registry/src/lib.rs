mod pair;
mod registry;

pub use {
    pair::{ConverterPair, ErasedConverter},
    registry::{RegistryBuilder, TypeRegistry},
};

use snafu::{prelude::*, Backtrace};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("a mapping for domain type {} is already registered", domain))]
    DuplicateMapping {
        domain: &'static str,
        backtrace: Backtrace,
    },

    #[snafu(display("no mapping registered for domain type {}", domain))]
    UnregisteredType { domain: &'static str },

    #[snafu(display("slot does not hold a value of type {}", expected))]
    MismatchedSlot { expected: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
