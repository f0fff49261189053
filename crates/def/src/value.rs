use {
    crate::StorageType,
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

macro_rules! define_raw_value {
    ($($variant:ident($raw:ty),)*) => {
        /// A value in one of the fixed storage representations, as exchanged
        /// with the storage backend. `Null` marks absence in nullable
        /// columns.
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        pub enum RawValue {
            Null,
            $($variant($raw),)*
        }

        impl RawValue {
            pub fn storage_type(&self) -> Option<StorageType> {
                match self {
                    Self::Null => None,
                    $(Self::$variant(_) => Some(StorageType::$variant),)*
                }
            }
        }

        $(
            impl From<$raw> for RawValue {
                fn from(raw: $raw) -> Self {
                    RawValue::$variant(raw)
                }
            }
        )*
    };
}

define_raw_value! {
    Integer64(i64),
    Text(String),
    Boolean(bool),
    Float64(f64),
    Binary(Vec<u8>),
    Timestamp(DateTime<Utc>),
}

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `Null` matches every storage type; a present value matches only its
    /// own.
    pub fn matches(&self, ty: StorageType) -> bool {
        match self.storage_type() {
            None => true,
            Some(own) => own == ty,
        }
    }
}

impl From<&str> for RawValue {
    fn from(raw: &str) -> Self {
        RawValue::Text(raw.to_string())
    }
}

pub type RawRow = Vec<RawValue>;
