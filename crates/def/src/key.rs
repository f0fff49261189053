use {
    crate::{RawValue, StorageType},
    serde::Serialize,
    std::fmt::Display,
};

/// Nominal marker distinguishing structurally identical key types. Two
/// tags compare equal only when they are the same marker, which is what
/// keeps a message id from standing in for a user id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct KeyTag(&'static str);

impl KeyTag {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl Display for KeyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A key value carrying its nominal tag, as handed to the expression
/// layer by code paths that have lost the newtype (row buffers, query
/// plumbing).
#[derive(Clone, Debug, PartialEq)]
pub struct KeyValue {
    tag: KeyTag,
    raw: RawValue,
}

impl KeyValue {
    pub fn new(tag: KeyTag, raw: impl Into<RawValue>) -> Self {
        Self {
            tag,
            raw: raw.into(),
        }
    }

    pub fn tag(&self) -> KeyTag {
        self.tag
    }

    pub fn raw(&self) -> &RawValue {
        &self.raw
    }
}

/// A nominal key wrapper tied to one table's primary key. Implementations
/// come from [`key_type!`]; distinct implementors never unify, so comparing
/// a user key against a message key is already a type error.
pub trait KeyType: Clone + Send + Sync + 'static {
    const TAG: KeyTag;
    const STORAGE: StorageType;

    /// `None` when the raw variant does not match `STORAGE`.
    fn from_raw(raw: &RawValue) -> Option<Self>;

    fn to_raw(&self) -> RawValue;

    fn key_value(&self) -> KeyValue {
        KeyValue::new(Self::TAG, self.to_raw())
    }
}

/// Generates a nominal, nonconvertible key newtype and its [`KeyType`]
/// implementation.
///
/// ```
/// def::key_type! {
///     pub struct UserKey(i64) as Integer64, tag "user";
/// }
/// ```
#[macro_export]
macro_rules! key_type {
    (
        $(
            $(#[$attr:meta])*
            $vis:vis struct $name:ident($raw:ty) as $variant:ident, tag $tag:literal;
        )*
    ) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Debug, PartialEq, Eq, Hash)]
            $vis struct $name(pub $raw);

            impl $crate::KeyType for $name {
                const TAG: $crate::KeyTag = $crate::KeyTag::new($tag);
                const STORAGE: $crate::StorageType = $crate::StorageType::$variant;

                fn from_raw(raw: &$crate::RawValue) -> Option<Self> {
                    match raw {
                        $crate::RawValue::$variant(value) => Some(Self(value.clone())),
                        _ => None,
                    }
                }

                fn to_raw(&self) -> $crate::RawValue {
                    $crate::RawValue::$variant(self.0.clone())
                }
            }
        )*
    };
}

#[cfg(test)]
mod tests {
    use crate::{KeyType, RawValue, StorageType};

    crate::key_type! {
        struct UserKey(i64) as Integer64, tag "user";
        struct SessionKey(String) as Text, tag "session";
    }

    #[test]
    fn generated_keys_round_trip() {
        let key = UserKey(7);
        assert_eq!(key.to_raw(), RawValue::Integer64(7));
        assert_eq!(UserKey::from_raw(&key.to_raw()), Some(key));
        assert_eq!(UserKey::from_raw(&RawValue::Text("7".into())), None);
    }

    #[test]
    fn generated_keys_carry_distinct_tags() {
        assert_eq!(UserKey::STORAGE, StorageType::Integer64);
        assert_eq!(SessionKey::STORAGE, StorageType::Text);
        assert_ne!(UserKey::TAG, SessionKey::TAG);

        let tagged = UserKey(1).key_value();
        assert_eq!(tagged.tag(), UserKey::TAG);
        assert_eq!(tagged.raw(), &RawValue::Integer64(1));
    }
}
