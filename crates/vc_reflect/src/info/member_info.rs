use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use thiserror::Error;

use crate::info::{TypeInfo, Typed};
use crate::value::Value;

// -----------------------------------------------------------------------------
// Accessors

/// Reads a member from a type-erased target.
pub type Getter = fn(&dyn Any) -> Result<Value, AccessError>;

/// Writes a member of a type-erased target.
///
/// The value must already be assignable to the member's declared type.
pub type Setter = fn(&mut dyn Any, Value) -> Result<(), AccessError>;

// -----------------------------------------------------------------------------
// Error

/// Failure to read or write a member through its accessors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    #[error("member `{member}` is not readable")]
    NotReadable { member: &'static str },

    #[error("member `{member}` is not writable")]
    NotWritable { member: &'static str },

    #[error("target is not a `{expected}`")]
    WrongTarget { expected: &'static str },

    #[error("a `{found}` value cannot be assigned to `{expected}`")]
    Rejected {
        expected: &'static str,
        found: &'static str,
    },
}

// -----------------------------------------------------------------------------
// MemberKind

/// Whether a member is a plain field or an accessor-backed property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
}

// -----------------------------------------------------------------------------
// MemberInfo

/// Describes one member of a [`Struct`](crate::Struct): a field or a property.
///
/// The member name is kept as declared, [`key`](MemberInfo::key) is the
/// folded name used for case-insensitive lookups. Immutable once created.
///
/// # Examples
///
/// ```
/// use vc_reflect::{derive::Reflect, info::MemberKind, value::Value, Struct};
///
/// #[derive(Reflect, Default)]
/// struct Account {
///     #[reflect(readonly)]
///     id: i64,
///     user_name: String,
/// }
///
/// let members = Account::declare_members();
/// let mut account = Account::default();
///
/// assert_eq!(members[1].key(), "user_name");
/// assert_eq!(members[1].kind(), MemberKind::Field);
///
/// members[1].set(&mut account, Value::from("root")).unwrap();
/// assert_eq!(members[1].get(&account).unwrap(), Value::from("root"));
///
/// assert!(members[0].is_readable());
/// assert!(!members[0].is_writable());
/// assert!(members[0].set(&mut account, Value::I64(7)).is_err());
/// ```
#[derive(Clone)]
pub struct MemberInfo {
    name: &'static str,
    key: Box<str>,
    kind: MemberKind,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl MemberInfo {
    /// Creates a field member of type `T`.
    ///
    /// Fields are always readable, a missing `setter` makes them read-only.
    pub fn field<T: Typed>(name: &'static str, getter: Getter, setter: Option<Setter>) -> Self {
        Self {
            name,
            key: vc_utils::fold_name(name).into(),
            kind: MemberKind::Field,
            type_info: T::type_info,
            getter: Some(getter),
            setter,
        }
    }

    /// Creates a property member of type `T`.
    pub fn property<T: Typed>(
        name: &'static str,
        getter: Option<Getter>,
        setter: Option<Setter>,
    ) -> Self {
        Self {
            name,
            key: vc_utils::fold_name(name).into(),
            kind: MemberKind::Property,
            type_info: T::type_info,
            getter,
            setter,
        }
    }

    /// Returns the declared member name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the lower-cased lookup key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the [`MemberKind`].
    #[inline]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Returns `true` for field members.
    #[inline]
    pub const fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field)
    }

    /// Returns the member's declared [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns `true` if the member can be read.
    #[inline]
    pub const fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    /// Returns `true` if the member can be written.
    #[inline]
    pub const fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Reads the member from `target`.
    pub fn get(&self, target: &dyn Any) -> Result<Value, AccessError> {
        match self.getter {
            Some(getter) => getter(target),
            None => Err(AccessError::NotReadable { member: self.name }),
        }
    }

    /// Writes `value` into the member of `target`.
    ///
    /// No coercion happens here, see `vc_data::coerce` for that.
    pub fn set(&self, target: &mut dyn Any, value: Value) -> Result<(), AccessError> {
        match self.setter {
            Some(setter) => setter(target, value),
            None => Err(AccessError::NotWritable { member: self.name }),
        }
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("type", &self.type_info().type_path())
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}
