use std::borrow::{Borrow, Cow};
use std::fmt;

use fieldrules_check::{FieldKind, FieldValue};

/// Stable registry key for a structured-data type.
///
/// Compiled types use their `Schema::NAME`; record types declared at runtime
/// use an owned name. Keys compare by name, so two types sharing a name are
/// the same identity as far as the registry is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Cow<'static, str>);

impl TypeKey {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn of<T: Schema>() -> Self {
        Self::from_static(T::NAME)
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TypeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One field of a compiled type's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Read access to the fields of an instance, by name.
pub trait FieldAccess {
    /// Name the instance's type is registered under.
    fn type_name(&self) -> &str;

    /// Current value of `name`, or `None` if the shape has no such field.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// Compile-time shape of a type, used to check registrations.
///
/// Usually implemented with [`message_shape!`](crate::message_shape).
pub trait Schema: FieldAccess + 'static {
    const NAME: &'static str;
    const FIELDS: &'static [FieldDef];

    fn field_def(name: &str) -> Option<&'static FieldDef> {
        Self::FIELDS.iter().find(|def| def.name == name)
    }
}

/// Implement [`FieldAccess`] and [`Schema`] for a struct from a field list.
///
/// Each field is listed with its [`FieldKind`], and the field's Rust type must
/// match it: `Text` takes `String`/`str`, `List` a `Vec` or slice, `Int`,
/// `UInt`, `Float` and `Bool` the matching primitives, `Any` a
/// `serde_json::Value`. Any of these may be wrapped in `Option`, where `None`
/// reads as absent. `Message` fields must be `Option<_>`.
///
/// A field whose type does not fit its declared kind is a compile error:
///
/// ```compile_fail
/// use fieldrules_registry::message_shape;
///
/// struct Invite {
///     emails: Vec<String>,
/// }
///
/// message_shape!(Invite as "Invite" {
///     emails: Text,
/// });
/// ```
///
/// ```
/// use fieldrules_registry::{message_shape, FieldAccess, FieldValue, Schema};
///
/// struct Device {
///     id: String,
///     push_provider: Option<String>,
/// }
///
/// message_shape!(Device as "CreateDeviceRequest" {
///     id: Text,
///     push_provider: Text,
/// });
///
/// let device = Device { id: "d-1".into(), push_provider: None };
/// assert_eq!(Device::NAME, "CreateDeviceRequest");
/// assert_eq!(device.field("id"), Some(FieldValue::Text("d-1")));
/// assert_eq!(device.field("push_provider"), Some(FieldValue::Absent));
/// assert_eq!(device.field("missing"), None);
/// ```
#[macro_export]
macro_rules! message_shape {
    ($ty:ty as $name:literal { $($field:ident : $kind:ident),* $(,)? }) => {
        impl $crate::FieldAccess for $ty {
            fn type_name(&self) -> &str {
                $name
            }

            fn field(&self, name: &str) -> ::core::option::Option<$crate::FieldValue<'_>> {
                match name {
                    $(stringify!($field) => ::core::option::Option::Some(
                        $crate::__field_value!($kind, &self.$field)
                    ),)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl $crate::Schema for $ty {
            const NAME: &'static str = $name;
            const FIELDS: &'static [$crate::FieldDef] = &[
                $($crate::FieldDef::new(stringify!($field), $crate::FieldKind::$kind),)*
            ];
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_value {
    (Text, $value:expr) => {
        $crate::FieldValue::text($value)
    };
    (Int, $value:expr) => {
        $crate::FieldValue::int($value)
    };
    (UInt, $value:expr) => {
        $crate::FieldValue::uint($value)
    };
    (Float, $value:expr) => {
        $crate::FieldValue::float($value)
    };
    (Bool, $value:expr) => {
        $crate::FieldValue::bool($value)
    };
    (List, $value:expr) => {
        $crate::FieldValue::list($value)
    };
    (Message, $value:expr) => {
        $crate::FieldValue::message(::core::option::Option::as_ref($value))
    };
    (Any, $value:expr) => {
        $crate::FieldValue::from_json($value)
    };
}
