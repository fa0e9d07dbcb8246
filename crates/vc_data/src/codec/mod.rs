//! Conversion between text and typed values.
//!
//! ## Menu
//!
//! - [`StringCodec`]: decodes text into a declared type and encodes values.
//! - [`Culture`]: number and date-time conventions, with an ambient default.
//! - [`ConverterRegistry`] / [`StringConverter`]: pluggable conversions for
//!   types without built-in support.
//!
//! ## Decoding rules
//!
//! | declared type                 | empty text            | otherwise                               |
//! |-------------------------------|-----------------------|-----------------------------------------|
//! | `String`                      | `""`                  | the text itself                         |
//! | `u8`, `i16`, `i32`, `i64`     | `0`                   | sign and digits, surrounding whitespace |
//! | `Decimal`, `f32`, `f64`       | `0`                   | culture separators                      |
//! | `NaiveDateTime`               | `0001-01-01 00:00:00` | culture formats, then ISO-8601          |
//! | `Uuid`                        | nil                   | hyphenated, simple, braced or URN hex   |
//! | `bool`                        | `false`               | `true`, `on`, `1`, `yes` (any case)     |
//! | unit enum                     | error                 | variant name or declared discriminant   |
//! | `Option<T>`                   | `None`                | `null` (any case) is `None`, else `T`   |
//! | anything else                 | converter             | converter                               |
//!
//! Booleans never fail: every text outside the truthy set is `false`.

// -----------------------------------------------------------------------------
// Modules

mod converter;
mod culture;
mod error;

// -----------------------------------------------------------------------------
// Exports

pub use converter::{ConverterError, ConverterRegistry, FromStrConverter, StringConverter};
pub use culture::Culture;
pub use error::{DecodeError, EncodeError};

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::str::FromStr;

use vc_reflect::Reflect;
use vc_reflect::info::{EnumInfo, ScalarKind, TypeInfo, TypeKind};
use vc_reflect::rust_decimal::Decimal;
use vc_reflect::uuid::Uuid;
use vc_reflect::value::{EnumValue, Value};

/// Texts decoded as `true`, compared ignoring ASCII case.
const TRUTHY: [&str; 4] = ["true", "on", "1", "yes"];

// -----------------------------------------------------------------------------
// EnumCase

/// How enum variant names are matched when decoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnumCase {
    #[default]
    Sensitive,
    Insensitive,
}

// -----------------------------------------------------------------------------
// StringCodec

/// Decodes text into declared types and encodes values as text.
///
/// # Examples
///
/// ```
/// use vc_data::{Culture, StringCodec};
/// use vc_reflect::{derive::Reflect, rust_decimal::Decimal};
///
/// #[derive(Reflect, Debug, PartialEq)]
/// enum Color {
///     Red,
///     Green,
/// }
///
/// let codec = StringCodec::new().with_culture(Culture::de_de());
///
/// assert_eq!(codec.decode_as::<i32>("").unwrap(), 0);
/// assert_eq!(codec.decode_as::<Decimal>("19,99").unwrap(), Decimal::new(1999, 2));
/// assert_eq!(codec.decode_as::<bool>("YES").unwrap(), true);
/// assert_eq!(codec.decode_as::<bool>("maybe").unwrap(), false);
/// assert_eq!(codec.decode_as::<Option<i64>>("null").unwrap(), None);
/// assert_eq!(codec.decode_as::<Color>("Green").unwrap(), Color::Green);
///
/// assert!(codec.decode_as::<i32>("12abc").is_err());
/// assert!(codec.decode_as::<Color>("green").is_err());
///
/// assert_eq!(codec.encode_as(&Decimal::new(-1999, 2)).unwrap(), "-19,99");
/// ```
#[derive(Clone, Debug)]
pub struct StringCodec<'a> {
    culture: Arc<Culture>,
    converters: Option<&'a ConverterRegistry>,
    enum_case: EnumCase,
}

impl Default for StringCodec<'_> {
    /// See [`StringCodec::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> StringCodec<'a> {
    /// Creates a codec using the ambient [`Culture::current`].
    pub fn new() -> Self {
        Self {
            culture: Culture::current(),
            converters: None,
            enum_case: EnumCase::Sensitive,
        }
    }

    /// Uses `culture` instead of the ambient one.
    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.culture = Arc::new(culture);
        self
    }

    /// Uses the given converters for types without built-in support.
    pub fn with_converters(mut self, converters: &'a ConverterRegistry) -> Self {
        self.converters = Some(converters);
        self
    }

    /// Sets how enum variant names are matched.
    pub fn enum_case(mut self, case: EnumCase) -> Self {
        self.enum_case = case;
        self
    }

    /// Returns the culture in use.
    #[inline]
    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    // -------------------------------------------------------------------------
    // Decode

    /// Decodes `text` as a value of the declared type `info`.
    pub fn decode(&self, text: &str, info: &'static TypeInfo) -> Result<Value, DecodeError> {
        match info.kind() {
            TypeKind::Scalar(kind) => self.decode_scalar(text, *kind),
            TypeKind::Nullable(_) => {
                let trimmed = text.trim();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
                    Ok(Value::Null)
                } else {
                    self.decode(text, info.underlying())
                }
            }
            TypeKind::Enum(variants) => self.decode_enum(text, info, variants),
            TypeKind::Struct | TypeKind::Opaque => self.decode_with_converter(text, info),
        }
    }

    /// Decodes `text` as a `T`.
    pub fn decode_as<T: Reflect>(&self, text: &str) -> Result<T, DecodeError> {
        let info = T::type_info();
        let value = self.decode(text, info)?;
        T::from_value(value).map_err(|_| DecodeError::Malformed {
            text: text.into(),
            ty: info.type_path(),
        })
    }

    fn decode_scalar(&self, text: &str, kind: ScalarKind) -> Result<Value, DecodeError> {
        if kind == ScalarKind::String {
            return Ok(Value::String(text.into()));
        }
        if kind == ScalarKind::Bool {
            return Ok(Value::Bool(is_truthy(text)));
        }
        if text.is_empty() {
            return Ok(kind.zero());
        }

        let culture = &*self.culture;
        let malformed = || DecodeError::Malformed {
            text: text.into(),
            ty: kind.name(),
        };

        match kind {
            ScalarKind::U8 => parse_integer::<u8>(culture, text).map(Value::U8),
            ScalarKind::I16 => parse_integer::<i16>(culture, text).map(Value::I16),
            ScalarKind::I32 => parse_integer::<i32>(culture, text).map(Value::I32),
            ScalarKind::I64 => parse_integer::<i64>(culture, text).map(Value::I64),
            ScalarKind::F32 => parse_number::<f32>(culture, text).map(Value::F32),
            ScalarKind::F64 => parse_number::<f64>(culture, text).map(Value::F64),
            ScalarKind::Decimal => parse_number::<Decimal>(culture, text).map(Value::Decimal),
            ScalarKind::DateTime => culture.parse_date_time(text).map(Value::DateTime),
            ScalarKind::Guid => Uuid::try_parse(text.trim()).ok().map(Value::Guid),
            ScalarKind::String | ScalarKind::Bool => None,
        }
        .ok_or_else(malformed)
    }

    fn decode_enum(
        &self,
        text: &str,
        info: &'static TypeInfo,
        variants: &EnumInfo,
    ) -> Result<Value, DecodeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DecodeError::Empty {
                ty: info.type_path(),
            });
        }

        let index = match parse_integer::<i64>(&self.culture, text) {
            Some(discriminant) => variants.index_of_discriminant(discriminant),
            None => match self.enum_case {
                EnumCase::Sensitive => variants.index_of(text),
                EnumCase::Insensitive => variants.index_of_ignore_case(text),
            },
        };

        match index {
            Some(index) => Ok(Value::Enum(EnumValue::new(info, index))),
            None => Err(DecodeError::UnknownVariant {
                text: text.into(),
                ty: info.type_path(),
            }),
        }
    }

    fn decode_with_converter(
        &self,
        text: &str,
        info: &'static TypeInfo,
    ) -> Result<Value, DecodeError> {
        let ty = info.type_path();
        let converter = self
            .converters
            .and_then(|c| c.get(info.type_id()))
            .filter(|c| c.can_convert_from_string())
            .ok_or(DecodeError::NoConverter { ty })?;

        converter
            .convert_from_string(text, &self.culture)
            .map_err(|source| DecodeError::Converter { ty, source })
    }

    // -------------------------------------------------------------------------
    // Encode

    /// Encodes `value` as text.
    ///
    /// [`Value::Null`] encodes as the empty string.
    pub fn encode(&self, value: &Value) -> Result<String, EncodeError> {
        let culture = &*self.culture;
        Ok(match value {
            Value::Null => String::new(),
            Value::Bool(v) => v.to_string(),
            Value::U8(v) => v.to_string(),
            Value::I16(v) => culture.localize_number(&v.to_string()),
            Value::I32(v) => culture.localize_number(&v.to_string()),
            Value::I64(v) => culture.localize_number(&v.to_string()),
            Value::F32(v) => culture.localize_number(&v.to_string()),
            Value::F64(v) => culture.localize_number(&v.to_string()),
            Value::Decimal(v) => culture.localize_number(&v.normalize().to_string()),
            Value::String(v) => v.clone(),
            Value::DateTime(v) => culture.format_date_time(v),
            Value::Guid(v) => v.hyphenated().to_string(),
            Value::Enum(v) => v.name().into(),
            Value::Opaque(v) => {
                let ty = v.value_type_name();
                let converter = self
                    .converters
                    .and_then(|c| c.get(v.value_type_id()))
                    .filter(|c| c.can_convert_to_string())
                    .ok_or(EncodeError::NoConverter { ty })?;
                converter
                    .convert_to_string(value, culture)
                    .map_err(|source| EncodeError::Converter { ty, source })?
            }
        })
    }

    /// Encodes a `T` as text.
    #[inline]
    pub fn encode_as<T: Reflect>(&self, value: &T) -> Result<String, EncodeError> {
        self.encode(&value.to_value())
    }
}

// -----------------------------------------------------------------------------
// Free functions

/// Decodes `text` as `info`, with `culture` or the ambient one.
///
/// Pluggable converters need a [`StringCodec`] built
/// [`with_converters`](StringCodec::with_converters).
pub fn decode(
    text: &str,
    info: &'static TypeInfo,
    culture: Option<&Culture>,
) -> Result<Value, DecodeError> {
    codec_for(culture).decode(text, info)
}

/// Encodes `value`, with `culture` or the ambient one.
pub fn encode(value: &Value, culture: Option<&Culture>) -> Result<String, EncodeError> {
    codec_for(culture).encode(value)
}

fn codec_for(culture: Option<&Culture>) -> StringCodec<'static> {
    match culture {
        Some(culture) => StringCodec::new().with_culture(culture.clone()),
        None => StringCodec::new(),
    }
}

fn parse_integer<T: FromStr>(culture: &Culture, text: &str) -> Option<T> {
    culture.normalize_integer(text)?.parse().ok()
}

fn parse_number<T: FromStr>(culture: &Culture, text: &str) -> Option<T> {
    culture.normalize_number(text)?.parse().ok()
}

/// Returns `true` if `text` decodes as boolean `true`.
pub fn is_truthy(text: &str) -> bool {
    let text = text.trim();
    TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(text))
}

#[cfg(test)]
mod tests {
    use vc_reflect::chrono::{NaiveDate, NaiveDateTime};
    use vc_reflect::derive::Reflect;
    use vc_reflect::info::Typed;
    use vc_reflect::rust_decimal::Decimal;
    use vc_reflect::uuid::Uuid;
    use vc_reflect::value::Value;

    use super::{Culture, DecodeError, EncodeError, EnumCase, StringCodec};

    #[derive(Reflect, Debug, PartialEq, Clone, Copy)]
    enum Status {
        Pending = 1,
        Active = 2,
        Closed = 9,
    }

    fn codec() -> StringCodec<'static> {
        StringCodec::new().with_culture(Culture::invariant())
    }

    fn sample_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 11, 5)
            .and_then(|d| d.and_hms_milli_opt(8, 30, 15, 125))
            .unwrap()
    }

    #[test]
    fn empty_text_yields_zero_values() {
        let c = codec();
        assert_eq!(c.decode_as::<i16>("").unwrap(), 0);
        assert_eq!(c.decode_as::<i32>("").unwrap(), 0);
        assert_eq!(c.decode_as::<i64>("").unwrap(), 0);
        assert_eq!(c.decode_as::<u8>("").unwrap(), 0);
        assert_eq!(c.decode_as::<f64>("").unwrap(), 0.0);
        assert_eq!(c.decode_as::<Decimal>("").unwrap(), Decimal::ZERO);
        assert_eq!(c.decode_as::<Uuid>("").unwrap(), Uuid::nil());
        assert_eq!(c.decode_as::<NaiveDateTime>("").unwrap(), Value::min_date_time());
        assert!(!c.decode_as::<bool>("").unwrap());
        assert_eq!(c.decode_as::<String>("").unwrap(), "");
    }

    #[test]
    fn malformed_numbers_fail() {
        let c = codec();
        assert!(matches!(
            c.decode("12x", i32::type_info()),
            Err(DecodeError::Malformed { ty: "i32", .. })
        ));
        assert!(c.decode_as::<u8>("256").is_err());
        assert!(c.decode_as::<i32>("1.5").is_err());
        assert!(c.decode_as::<i32>("   ").is_err());
        assert!(c.decode_as::<Decimal>("abc").is_err());
        assert!(c.decode_as::<Uuid>("not-a-guid").is_err());
        assert!(c.decode_as::<NaiveDateTime>("yesterday").is_err());
    }

    #[test]
    fn numbers_follow_culture() {
        let c = codec();
        assert_eq!(c.decode_as::<i32>(" -17 ").unwrap(), -17);
        assert_eq!(c.decode_as::<Decimal>("1,234.50").unwrap(), Decimal::new(123450, 2));
        assert_eq!(c.decode_as::<f64>("2.5e3").unwrap(), 2500.0);

        let de = StringCodec::new().with_culture(Culture::de_de());
        assert_eq!(de.decode_as::<Decimal>("1.234,50").unwrap(), Decimal::new(123450, 2));
        assert_eq!(de.encode_as(&2.5_f64).unwrap(), "2,5");
    }

    #[test]
    fn bool_is_lenient() {
        let c = codec();
        for text in ["true", "TRUE", "On", "1", "yes", " Yes "] {
            assert!(c.decode_as::<bool>(text).unwrap(), "{text}");
        }
        for text in ["false", "0", "no", "off", "2", "garbage"] {
            assert!(!c.decode_as::<bool>(text).unwrap(), "{text}");
        }
        assert!(super::is_truthy("ON"));
        assert_eq!(c.encode_as(&true).unwrap(), "true");
    }

    #[test]
    fn nullable_wrapper() {
        let c = codec();
        assert_eq!(c.decode_as::<Option<i32>>("").unwrap(), None);
        assert_eq!(c.decode_as::<Option<i32>>("NULL").unwrap(), None);
        assert_eq!(c.decode_as::<Option<i32>>("5").unwrap(), Some(5));
        assert_eq!(c.decode_as::<Option<bool>>("yes").unwrap(), Some(true));
        assert_eq!(c.encode(&Value::Null).unwrap(), "");
        assert!(c.decode_as::<Option<i32>>("five").is_err());
    }

    #[test]
    fn enum_names_and_discriminants() {
        let c = codec();
        assert_eq!(c.decode_as::<Status>("Active").unwrap(), Status::Active);
        assert_eq!(c.decode_as::<Status>("9").unwrap(), Status::Closed);
        assert!(matches!(
            c.decode("active", Status::type_info()),
            Err(DecodeError::UnknownVariant { .. })
        ));
        assert!(matches!(
            c.decode("", Status::type_info()),
            Err(DecodeError::Empty { .. })
        ));
        assert!(c.decode_as::<Status>("3").is_err());

        let relaxed = codec().enum_case(EnumCase::Insensitive);
        assert_eq!(relaxed.decode_as::<Status>("pending").unwrap(), Status::Pending);
        assert_eq!(c.encode_as(&Status::Closed).unwrap(), "Closed");
    }

    #[test]
    fn unsupported_type_without_converter_fails() {
        let c = codec();
        assert!(matches!(
            c.decode("\x01\x02", <Vec<u8>>::type_info()),
            Err(DecodeError::NoConverter { .. })
        ));
        assert!(matches!(
            c.encode_as(&vec![1_u8]),
            Err(EncodeError::NoConverter { .. })
        ));
    }

    #[test]
    fn round_trips_under_fixed_culture() {
        let guid = Uuid::from_u128(0x67e5_5044_10b1_426f_9247_bb68_0e5f_e0c8);
        for culture in [Culture::invariant(), Culture::en_us(), Culture::de_de()] {
            let c = StringCodec::new().with_culture(culture);

            for v in [0_i32, -45, i32::MAX] {
                assert_eq!(c.decode_as::<i32>(&c.encode_as(&v).unwrap()).unwrap(), v);
            }
            for v in [i64::MIN, 9_000_000_000] {
                assert_eq!(c.decode_as::<i64>(&c.encode_as(&v).unwrap()).unwrap(), v);
            }
            for v in [Decimal::new(1999, 2), Decimal::new(-5, 0), Decimal::new(10, 3)] {
                assert_eq!(c.decode_as::<Decimal>(&c.encode_as(&v).unwrap()).unwrap(), v);
            }
            for v in [true, false] {
                assert_eq!(c.decode_as::<bool>(&c.encode_as(&v).unwrap()).unwrap(), v);
            }
            assert_eq!(c.decode_as::<Uuid>(&c.encode_as(&guid).unwrap()).unwrap(), guid);

            let date = sample_date();
            assert_eq!(
                c.decode_as::<NaiveDateTime>(&c.encode_as(&date).unwrap()).unwrap(),
                date
            );
            for v in [Status::Pending, Status::Active, Status::Closed] {
                assert_eq!(c.decode_as::<Status>(&c.encode_as(&v).unwrap()).unwrap(), v);
            }
        }
    }

    #[test]
    fn custom_negative_sign_round_trips() {
        let c = StringCodec::new().with_culture(Culture::de_de().with_negative_sign('\u{2212}'));

        assert_eq!(c.encode_as(&-1234_i32).unwrap(), "\u{2212}1234");
        assert_eq!(c.decode_as::<i32>("\u{2212}1234").unwrap(), -1234);

        let price = Decimal::new(-123450, 2);
        let text = c.encode_as(&price).unwrap();
        assert_eq!(text, "\u{2212}1234,5");
        assert_eq!(c.decode_as::<Decimal>(&text).unwrap(), price);
        assert!(c.decode_as::<i32>("-1234").is_err());
    }

    #[test]
    fn ambient_culture_is_used_by_default() {
        Culture::set_current(Culture::de_de());
        let value = super::decode("0,5", f64::type_info(), None);
        let name = StringCodec::new().culture().name().to_owned();
        Culture::set_current(Culture::invariant());

        assert_eq!(value.unwrap(), Value::F64(0.5));
        assert_eq!(name, "de-DE");
        assert_eq!(
            super::encode(&Value::F64(0.5), Some(&Culture::invariant())).unwrap(),
            "0.5"
        );
    }
}
