//! Declaration-time metadata for model types.
//!
//! Every model type carries a `const` [`TypeInfo`] describing how it was
//! declared. Types declared through [`plain_data_record!`](crate::plain_data_record)
//! are tagged [`TypeKind::Record`] and list their fields in declaration order;
//! nothing else can obtain that tag without writing the metadata by hand.

use std::collections::HashSet;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// How a type was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    /// Declared with the plain data record mechanism.
    Record,
    /// A closed set of wire values.
    Enumeration,
    /// An ordinary type with its own behaviour or state.
    Opaque,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Record => write!(f, "record"),
            Self::Enumeration => write!(f, "enumeration"),
            Self::Opaque => write!(f, "opaque"),
        }
    }
}

/// A declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    /// Rust field name.
    pub name: &'static str,
    /// Declared type, as written in the declaration.
    pub type_name: &'static str,
}

/// Declaration-time description of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    /// Type name.
    pub name: &'static str,
    /// Declaration kind.
    pub kind: TypeKind,
    /// Fields in declaration order. Empty for non-records.
    pub fields: &'static [FieldInfo],
}

impl TypeInfo {
    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}

/// Types exposing declaration-time metadata.
pub trait Described {
    /// Metadata written at declaration.
    const TYPE_INFO: TypeInfo;
}

/// Marker for types declared with [`plain_data_record!`](crate::plain_data_record).
///
/// Equality, representation and (de)serialization are derived from the
/// fields and nothing else.
pub trait PlainDataRecord:
    Described + Clone + std::fmt::Debug + PartialEq + Serialize + DeserializeOwned
{
}

/// Why a type failed the plain data record predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordViolation {
    /// Declared as something other than a record.
    NotARecord(TypeKind),
    /// A field name has no characters.
    UnnamedField,
    /// The same field name appears twice.
    DuplicateField(&'static str),
}

impl std::fmt::Display for RecordViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotARecord(kind) => write!(f, "declared as {kind}, not as a record"),
            Self::UnnamedField => write!(f, "has an unnamed field"),
            Self::DuplicateField(name) => write!(f, "declares field '{name}' more than once"),
        }
    }
}

/// Check a type description against the plain data record predicate.
pub fn record_violation(info: &TypeInfo) -> Option<RecordViolation> {
    if info.kind != TypeKind::Record {
        return Some(RecordViolation::NotARecord(info.kind));
    }

    let mut seen = HashSet::with_capacity(info.fields.len());
    for field in info.fields {
        if field.name.is_empty() {
            return Some(RecordViolation::UnnamedField);
        }
        if !seen.insert(field.name) {
            return Some(RecordViolation::DuplicateField(field.name));
        }
    }

    None
}

/// Whether a type description is a plain data record.
#[must_use]
pub fn is_plain_data_record(info: &TypeInfo) -> bool {
    record_violation(info).is_none()
}

/// Declare a plain data record.
///
/// Expands to the struct with derived `Debug`, `Clone`, `PartialEq`,
/// camelCase serde, and the [`Described`] / [`PlainDataRecord`] impls.
/// Field attributes (for example `#[serde(default)]`) pass through.
#[macro_export]
macro_rules! plain_data_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::models::record::Described for $name {
            const TYPE_INFO: $crate::models::record::TypeInfo = $crate::models::record::TypeInfo {
                name: stringify!($name),
                kind: $crate::models::record::TypeKind::Record,
                fields: &[
                    $(
                        $crate::models::record::FieldInfo {
                            name: stringify!($field),
                            type_name: stringify!($ty),
                        },
                    )*
                ],
            };
        }

        impl $crate::models::record::PlainDataRecord for $name {}
    };
}

/// Attach [`TypeKind::Enumeration`] metadata to wire enums.
#[macro_export]
macro_rules! described_enum {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $crate::models::record::Described for $name {
                const TYPE_INFO: $crate::models::record::TypeInfo = $crate::models::record::TypeInfo {
                    name: stringify!($name),
                    kind: $crate::models::record::TypeKind::Enumeration,
                    fields: &[],
                };
            }
        )+
    };
}
