// Three-state field for partial-update payloads.
//
// `Option<T>` with `skip_serializing_if` can say "unchanged" or "set", but
// not "clear". `Patch<T>` adds the explicit-null case.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field in a partial-update payload.
///
/// - [`Absent`](Patch::Absent): the field is omitted from the body and the
///   server leaves it unchanged.
/// - [`Clear`](Patch::Clear): the field is sent as `null`.
/// - [`Set`](Patch::Set): the field is sent with the given value.
///
/// Fields must carry `#[serde(default, skip_serializing_if = "Patch::is_absent")]`
/// so that `Absent` actually disappears from the JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }

    /// The value being set, if any.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Absent | Self::Clear => None,
        }
    }

    /// `None` means "leave unchanged", `Some` means "set".
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Set)
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Set(value) => serializer.serialize_some(value),
            Self::Absent | Self::Clear => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    /// A present key maps to `Clear` (null) or `Set`. Missing keys come
    /// from `#[serde(default)]` as `Absent`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<T>::deserialize(deserializer)?.map_or(Self::Clear, Self::Set))
    }
}
