use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::{EnumInfo, Typed};
use crate::value::{DynValue, EnumValue, OpaqueValue, Value};

// -----------------------------------------------------------------------------
// Type

/// The identity of a type: its [`TypeId`] and full type path.
///
/// Equality and hashing only consider the `TypeId`.
///
/// # Examples
///
/// ```
/// use vc_reflect::info::Type;
///
/// let ty = Type::of::<Option<String>>();
///
/// assert!(ty.is::<Option<String>>());
/// assert_eq!(ty.name(), "Option<alloc::string::String>");
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    /// Returns the [`Type`] of `T`.
    #[inline]
    pub fn of<T: ?Sized + Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    /// Returns the `TypeId`.
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path, as given by [`core::any::type_name`].
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the type path without the leading module path.
    pub fn name(&self) -> &'static str {
        let end = self.path.find('<').unwrap_or(self.path.len());
        match self.path[..end].rfind("::") {
            Some(index) => &self.path[index + 2..],
            None => self.path,
        }
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: ?Sized + Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

// -----------------------------------------------------------------------------
// ScalarKind

/// The scalar member types with built-in coercion and string codec support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    U8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Decimal,
    String,
    DateTime,
    Guid,
}

impl ScalarKind {
    /// Returns a readable name for the kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Decimal => "Decimal",
            Self::String => "String",
            Self::DateTime => "DateTime",
            Self::Guid => "Guid",
        }
    }

    /// Returns the zero value of the kind.
    ///
    /// Strings are empty, date-times are [`Value::min_date_time`] and
    /// guids are nil.
    pub fn zero(self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::U8 => Value::U8(0),
            Self::I16 => Value::I16(0),
            Self::I32 => Value::I32(0),
            Self::I64 => Value::I64(0),
            Self::F32 => Value::F32(0.0),
            Self::F64 => Value::F64(0.0),
            Self::Decimal => Value::Decimal(rust_decimal::Decimal::ZERO),
            Self::String => Value::String(String::new()),
            Self::DateTime => Value::DateTime(Value::min_date_time()),
            Self::Guid => Value::Guid(uuid::Uuid::nil()),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// TypeKind

/// The shape of a declared type.
#[derive(Clone, Debug)]
pub enum TypeKind {
    /// One of the built-in scalars.
    Scalar(ScalarKind),
    /// `Option<T>`, holding the information of `T`.
    ///
    /// `TypeInfo` is created on first access; the function pointer delays it.
    Nullable(fn() -> &'static TypeInfo),
    /// A unit-only enum.
    Enum(EnumInfo),
    /// A type with declared members, see [`Struct`](crate::Struct).
    Struct,
    /// Any other type, carried as [`OpaqueValue`].
    Opaque,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// The declared type of a member.
///
/// Obtained through [`Typed::type_info`], always with a `'static` lifetime.
///
/// # Examples
///
/// ```
/// use vc_reflect::info::{ScalarKind, Typed};
/// use vc_reflect::value::Value;
///
/// let info = <Option<i32>>::type_info();
///
/// assert!(info.is_nullable());
/// assert_eq!(info.underlying().as_scalar(), Some(ScalarKind::I32));
/// assert!(info.accepts(&Value::I32(3)));
/// assert!(info.accepts(&Value::Null));
/// assert!(!info.accepts(&Value::I64(3)));
/// ```
#[derive(Clone, Debug)]
pub struct TypeInfo {
    ty: Type,
    kind: TypeKind,
    // Only opaque types need a producer, scalars and enums derive their zero value.
    default: Option<fn() -> Value>,
}

impl TypeInfo {
    /// Creates the information of a scalar type.
    #[inline]
    pub fn scalar<T: Any>(kind: ScalarKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind: TypeKind::Scalar(kind),
            default: None,
        }
    }

    /// Creates the information of `Option<T>`.
    #[inline]
    pub fn nullable<T: Typed>() -> Self {
        Self {
            ty: Type::of::<Option<T>>(),
            kind: TypeKind::Nullable(T::type_info),
            default: None,
        }
    }

    /// Creates the information of a unit enum.
    #[inline]
    pub fn enumeration<T: Any>(info: EnumInfo) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind: TypeKind::Enum(info),
            default: None,
        }
    }

    /// Creates the information of a type with declared members.
    #[inline]
    pub fn structure<T: Any>() -> Self {
        Self {
            ty: Type::of::<T>(),
            kind: TypeKind::Struct,
            default: None,
        }
    }

    /// Creates the information of an opaque type.
    ///
    /// The type's [`Default`] value is used as its null value.
    #[inline]
    pub fn opaque<T: DynValue + Default>() -> Self {
        Self {
            ty: Type::of::<T>(),
            kind: TypeKind::Opaque,
            default: Some(|| Value::Opaque(OpaqueValue::new(T::default()))),
        }
    }

    /// Returns the [`Type`].
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the [`TypeKind`].
    #[inline]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Returns the `TypeId` of the declared type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    /// Returns the full type path of the declared type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the scalar kind, if the declared type is a scalar.
    #[inline]
    pub const fn as_scalar(&self) -> Option<ScalarKind> {
        match self.kind {
            TypeKind::Scalar(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns the enum information, if the declared type is an enum.
    #[inline]
    pub const fn as_enum(&self) -> Option<&EnumInfo> {
        match &self.kind {
            TypeKind::Enum(info) => Some(info),
            _ => None,
        }
    }

    /// Returns `true` if the declared type is `Option<T>`.
    #[inline]
    pub const fn is_nullable(&self) -> bool {
        matches!(self.kind, TypeKind::Nullable(_))
    }

    /// Returns `T` for `Option<T>`, the information itself otherwise.
    pub fn underlying(&'static self) -> &'static TypeInfo {
        match self.kind {
            TypeKind::Nullable(inner) => inner(),
            _ => self,
        }
    }

    /// Returns the value an absent source value maps to.
    ///
    /// Zero for scalars, the zero-discriminant (or first) variant for enums,
    /// [`Value::Null`] for nullable types and the [`Default`] of opaque types.
    pub fn null_value(&'static self) -> Value {
        match &self.kind {
            TypeKind::Scalar(kind) => kind.zero(),
            TypeKind::Nullable(_) => Value::Null,
            TypeKind::Enum(info) => match info.default_index() {
                Some(index) => Value::Enum(EnumValue::new(self, index)),
                None => Value::Null,
            },
            TypeKind::Struct | TypeKind::Opaque => match self.default {
                Some(default) => default(),
                None => Value::Null,
            },
        }
    }

    /// Returns `true` if `value` can be assigned to the declared type as-is.
    pub fn accepts(&self, value: &Value) -> bool {
        match &self.kind {
            TypeKind::Scalar(kind) => value.scalar_kind() == Some(*kind),
            TypeKind::Nullable(inner) => value.is_null() || inner().accepts(value),
            TypeKind::Enum(_) => match value {
                Value::Enum(e) => e.type_id() == self.type_id(),
                _ => false,
            },
            TypeKind::Struct | TypeKind::Opaque => match value {
                Value::Opaque(o) => o.value_type_id() == self.type_id(),
                _ => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ScalarKind, Type};
    use crate::info::Typed;
    use crate::value::Value;

    #[test]
    fn type_name_strips_module() {
        assert_eq!(Type::of::<String>().name(), "String");
        assert_eq!(Type::of::<i32>().name(), "i32");
        assert_eq!(Type::of::<Option<u8>>().name(), "Option<u8>");
    }

    #[test]
    fn scalar_null_value_is_zero() {
        assert_eq!(i32::type_info().null_value(), Value::I32(0));
        assert_eq!(bool::type_info().null_value(), Value::Bool(false));
        assert_eq!(
            String::type_info().null_value(),
            Value::String(Default::default())
        );
        assert_eq!(<Option<i64>>::type_info().null_value(), Value::Null);
    }

    #[test]
    fn accepts_exact_kind_only() {
        let info = i32::type_info();
        assert_eq!(info.as_scalar(), Some(ScalarKind::I32));
        assert!(info.accepts(&Value::I32(1)));
        assert!(!info.accepts(&Value::I64(1)));
        assert!(!info.accepts(&Value::Null));
    }
}
