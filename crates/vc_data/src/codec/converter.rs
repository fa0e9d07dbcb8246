use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use core::marker::PhantomData;
use core::str::FromStr;

use vc_reflect::Reflect;
use vc_reflect::value::{DynValue, OpaqueValue, Value};
use vc_utils::TypeIdMap;

use crate::codec::Culture;

/// The error a [`StringConverter`] reports.
pub type ConverterError = Box<dyn core::error::Error + Send + Sync>;

// -----------------------------------------------------------------------------
// StringConverter

/// A pluggable string conversion for one type without built-in support.
///
/// # Examples
///
/// ```
/// use vc_data::codec::{ConverterError, ConverterRegistry, StringCodec, StringConverter};
/// use vc_data::Culture;
/// use vc_reflect::{impl_reflect_opaque, info::Typed, value::{OpaqueValue, Value}};
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct Rgb(u8, u8, u8);
///
/// impl_reflect_opaque!(Rgb);
///
/// struct RgbConverter;
///
/// impl StringConverter for RgbConverter {
///     fn convert_from_string(&self, text: &str, _: &Culture) -> Result<Value, ConverterError> {
///         let hex = text.strip_prefix('#').ok_or("missing `#`")?;
///         let n = u32::from_str_radix(hex, 16)?;
///         let rgb = Rgb((n >> 16) as u8, (n >> 8) as u8, n as u8);
///         Ok(Value::Opaque(OpaqueValue::new(rgb)))
///     }
///
///     fn convert_to_string(&self, value: &Value, _: &Culture) -> Result<String, ConverterError> {
///         match value {
///             Value::Opaque(v) => {
///                 let Rgb(r, g, b) = v.downcast_ref::<Rgb>().ok_or("not an Rgb")?;
///                 Ok(format!("#{r:02x}{g:02x}{b:02x}"))
///             }
///             _ => Err("not an Rgb".into()),
///         }
///     }
/// }
///
/// let mut converters = ConverterRegistry::new();
/// converters.register::<Rgb>(RgbConverter);
///
/// let codec = StringCodec::new().with_converters(&converters);
/// let value = codec.decode("#ff8000", Rgb::type_info()).unwrap();
///
/// assert_eq!(codec.encode(&value).unwrap(), "#ff8000");
/// ```
pub trait StringConverter: Send + Sync + 'static {
    /// Returns `false` if this converter cannot decode text.
    fn can_convert_from_string(&self) -> bool {
        true
    }

    /// Returns `false` if this converter cannot encode values.
    fn can_convert_to_string(&self) -> bool {
        true
    }

    /// Decodes `text` into a value of the converter's type.
    fn convert_from_string(&self, text: &str, culture: &Culture) -> Result<Value, ConverterError>;

    /// Encodes a value of the converter's type.
    fn convert_to_string(&self, value: &Value, culture: &Culture) -> Result<String, ConverterError>;
}

// -----------------------------------------------------------------------------
// FromStrConverter

/// A [`StringConverter`] for any opaque `FromStr + Display` type.
///
/// See [`ConverterRegistry::register_from_str`].
pub struct FromStrConverter<T>(PhantomData<fn() -> T>);

impl<T> FromStrConverter<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for FromStrConverter<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StringConverter for FromStrConverter<T>
where
    T: FromStr + fmt::Display + DynValue,
    T::Err: fmt::Display,
{
    fn convert_from_string(&self, text: &str, _: &Culture) -> Result<Value, ConverterError> {
        match T::from_str(text) {
            Ok(value) => Ok(Value::Opaque(OpaqueValue::new(value))),
            Err(err) => Err(err.to_string().into()),
        }
    }

    fn convert_to_string(&self, value: &Value, _: &Culture) -> Result<String, ConverterError> {
        match value {
            Value::Opaque(opaque) => match opaque.downcast_ref::<T>() {
                Some(inner) => Ok(inner.to_string()),
                None => Err(mismatch::<T>(value)),
            },
            _ => Err(mismatch::<T>(value)),
        }
    }
}

fn mismatch<T>(value: &Value) -> ConverterError {
    format!(
        "expected a `{}` value, found `{}`",
        core::any::type_name::<T>(),
        value.type_name()
    )
    .into()
}

// -----------------------------------------------------------------------------
// ConverterRegistry

/// Pluggable converters, keyed by the type they convert.
///
/// Cheap to clone: converters are shared.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: TypeIdMap<Arc<dyn StringConverter>>,
}

impl ConverterRegistry {
    /// Create an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            converters: TypeIdMap::new(),
        }
    }

    /// Registers the converter of `T`, replacing any previous one.
    pub fn register<T: Reflect>(&mut self, converter: impl StringConverter) -> &mut Self {
        self.converters
            .insert(TypeId::of::<T>(), Arc::new(converter));
        self
    }

    /// Registers a [`FromStrConverter`] for `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::net::Ipv4Addr;
    ///
    /// use vc_data::codec::{ConverterRegistry, StringCodec};
    /// use vc_reflect::{impl_reflect_opaque, Reflect};
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Addr(Ipv4Addr);
    ///
    /// impl Default for Addr {
    ///     fn default() -> Self {
    ///         Addr(Ipv4Addr::UNSPECIFIED)
    ///     }
    /// }
    ///
    /// impl std::str::FromStr for Addr {
    ///     type Err = std::net::AddrParseError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         s.parse().map(Addr)
    ///     }
    /// }
    ///
    /// impl std::fmt::Display for Addr {
    ///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    ///         self.0.fmt(f)
    ///     }
    /// }
    ///
    /// impl_reflect_opaque!(Addr);
    ///
    /// let mut converters = ConverterRegistry::new();
    /// converters.register_from_str::<Addr>();
    ///
    /// let codec = StringCodec::new().with_converters(&converters);
    /// let addr: Addr = codec.decode_as("10.0.0.1").unwrap();
    ///
    /// assert_eq!(addr, Addr(Ipv4Addr::new(10, 0, 0, 1)));
    /// assert_eq!(codec.encode(&addr.to_value()).unwrap(), "10.0.0.1");
    /// ```
    pub fn register_from_str<T>(&mut self) -> &mut Self
    where
        T: Reflect + FromStr + fmt::Display + DynValue,
        T::Err: fmt::Display,
    {
        self.register::<T>(FromStrConverter::<T>::new())
    }

    /// Returns the converter registered for a type.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&dyn StringConverter> {
        self.converters.get(&type_id).map(|c| &**c)
    }

    /// Removes the converter of `T`.
    pub fn remove<T: Reflect>(&mut self) -> bool {
        self.converters.remove_type::<T>().is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("len", &self.converters.len())
            .finish()
    }
}
