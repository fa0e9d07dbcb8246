use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::LazyLock;

use arc_swap::ArcSwap;
use vc_reflect::chrono::{NaiveDate, NaiveDateTime};

/// Date-time formats tried after the culture's own ones.
const ISO_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

static CURRENT: LazyLock<ArcSwap<Culture>> =
    LazyLock::new(|| ArcSwap::from_pointee(Culture::invariant()));

// -----------------------------------------------------------------------------
// Culture

/// Number and date-time formatting conventions.
///
/// A culture only affects numeric and date-time text. Booleans, enums and
/// guids always use their fixed forms.
///
/// # Examples
///
/// ```
/// use vc_data::Culture;
///
/// let de = Culture::de_de();
/// assert_eq!(de.decimal_separator(), ',');
/// assert_eq!(de.normalize_number("1.234,5").as_deref(), Some("1234.5"));
///
/// let custom = Culture::new("fr-FR")
///     .with_decimal_separator(',')
///     .with_group_separator('\u{a0}')
///     .with_date_time_format("%d/%m/%Y %H:%M:%S");
/// assert_eq!(custom.name(), "fr-FR");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Culture {
    name: Cow<'static, str>,
    decimal_separator: char,
    group_separator: char,
    negative_sign: char,
    date_time_format: Cow<'static, str>,
    parse_formats: Vec<Cow<'static, str>>,
}

impl Culture {
    /// Creates a culture with the invariant conventions and the given name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            decimal_separator: '.',
            group_separator: ',',
            negative_sign: '-',
            date_time_format: Cow::Borrowed("%m/%d/%Y %H:%M:%S"),
            parse_formats: Vec::new(),
        }
    }

    /// The culture-independent conventions: `1,234.5`, `01/15/2024 13:05:00`.
    pub fn invariant() -> Self {
        Self::new("")
    }

    /// English (United States): `1,234.5`, `1/15/2024 1:05:00 PM`.
    pub fn en_us() -> Self {
        Self::new("en-US")
            .with_date_time_format("%-m/%-d/%Y %-I:%M:%S %p")
            .with_parse_format("%m/%d/%Y %H:%M:%S%.f")
            .with_parse_format("%m/%d/%Y")
    }

    /// German (Germany): `1.234,5`, `15.01.2024 13:05:00`.
    pub fn de_de() -> Self {
        Self::new("de-DE")
            .with_decimal_separator(',')
            .with_group_separator('.')
            .with_date_time_format("%d.%m.%Y %H:%M:%S")
            .with_parse_format("%d.%m.%Y")
    }

    /// Returns the ambient culture, invariant unless [`set_current`] was called.
    ///
    /// [`set_current`]: Culture::set_current
    pub fn current() -> Arc<Culture> {
        CURRENT.load_full()
    }

    /// Replaces the ambient culture for the whole process.
    pub fn set_current(culture: Culture) {
        log::debug!("ambient culture set to `{}`", culture.name);
        CURRENT.store(Arc::new(culture));
    }

    /// Sets the decimal separator.
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    /// Sets the group (thousands) separator.
    pub fn with_group_separator(mut self, separator: char) -> Self {
        self.group_separator = separator;
        self
    }

    /// Sets the negative sign.
    pub fn with_negative_sign(mut self, sign: char) -> Self {
        self.negative_sign = sign;
        self
    }

    /// Sets the `chrono` format used to encode date-times.
    ///
    /// It is also the first format tried when decoding.
    pub fn with_date_time_format(mut self, format: impl Into<Cow<'static, str>>) -> Self {
        self.date_time_format = format.into();
        self
    }

    /// Adds a `chrono` format accepted when decoding.
    ///
    /// Formats without time fields parse as midnight.
    pub fn with_parse_format(mut self, format: impl Into<Cow<'static, str>>) -> Self {
        self.parse_formats.push(format.into());
        self
    }

    /// Returns the culture name, empty for the invariant culture.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    #[inline]
    pub fn group_separator(&self) -> char {
        self.group_separator
    }

    #[inline]
    pub fn negative_sign(&self) -> char {
        self.negative_sign
    }

    #[inline]
    pub fn date_time_format(&self) -> &str {
        &self.date_time_format
    }

    /// Rewrites an integer in this culture to the form `str::parse` accepts.
    ///
    /// Only a leading sign and surrounding whitespace are allowed.
    pub fn normalize_integer(&self, text: &str) -> Option<String> {
        let text = text.trim();
        let (negative, digits) = self.split_sign(text);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let mut out = String::with_capacity(digits.len() + 1);
        if negative {
            out.push('-');
        }
        out.push_str(digits);
        Some(out)
    }

    /// Rewrites a number in this culture to the form `str::parse` accepts.
    ///
    /// Group separators are dropped and the decimal separator becomes `.`.
    /// Everything else is kept, so the target parser still rejects junk.
    pub fn normalize_number(&self, text: &str) -> Option<String> {
        let text = text.trim();
        let (negative, body) = self.split_sign(text);
        if body.is_empty() {
            return None;
        }
        let mut out = String::with_capacity(body.len() + 1);
        if negative {
            out.push('-');
        }
        for c in body.chars() {
            if c == self.group_separator {
                continue;
            }
            if c == self.decimal_separator {
                out.push('.');
            } else {
                out.push(c);
            }
        }
        Some(out)
    }

    /// Rewrites a number formatted by Rust into this culture.
    pub fn localize_number(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '.' => self.decimal_separator,
                '-' => self.negative_sign,
                c => c,
            })
            .collect()
    }

    /// Formats a date-time, adding fractional seconds only when present.
    pub fn format_date_time(&self, value: &NaiveDateTime) -> String {
        use vc_reflect::chrono::Timelike;

        if value.nanosecond() == 0 {
            value.format(&self.date_time_format).to_string()
        } else {
            let format = self.date_time_format.replace("%S", "%S%.f");
            value.format(&format).to_string()
        }
    }

    /// Parses a date-time with this culture's formats, then ISO-8601.
    pub fn parse_date_time(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        // `%.f` is optional on parse, so the encode format accepts fractions too.
        let primary = self.date_time_format.replace("%S", "%S%.f");

        core::iter::once(primary.as_str())
            .chain(self.parse_formats.iter().map(|f| &**f))
            .chain(ISO_FORMATS)
            .chain(core::iter::once(ISO_DATE_FORMAT))
            .find_map(|format| parse_with(text, format))
    }

    fn split_sign<'t>(&self, text: &'t str) -> (bool, &'t str) {
        if let Some(rest) = text.strip_prefix(self.negative_sign) {
            (true, rest)
        } else if let Some(rest) = text.strip_prefix('+') {
            (false, rest)
        } else {
            (false, text)
        }
    }
}

impl Default for Culture {
    /// See [`Culture::invariant`].
    #[inline]
    fn default() -> Self {
        Self::invariant()
    }
}

fn parse_with(text: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .map(|date| date.and_time(Default::default()))
        })
}

#[cfg(test)]
mod tests {
    use vc_reflect::chrono::{NaiveDate, NaiveDateTime};

    use super::Culture;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(13, 5, 9))
            .unwrap()
    }

    #[test]
    fn integer_normalization() {
        let c = Culture::invariant();
        assert_eq!(c.normalize_integer(" -42 ").as_deref(), Some("-42"));
        assert_eq!(c.normalize_integer("+7").as_deref(), Some("7"));
        assert_eq!(c.normalize_integer("1,000"), None);
        assert_eq!(c.normalize_integer("1.5"), None);
        assert_eq!(c.normalize_integer("-"), None);
    }

    #[test]
    fn number_normalization_per_culture() {
        assert_eq!(
            Culture::invariant().normalize_number("1,234.5").as_deref(),
            Some("1234.5")
        );
        assert_eq!(
            Culture::de_de().normalize_number("-1.234,5").as_deref(),
            Some("-1234.5")
        );
        assert_eq!(Culture::de_de().localize_number("-1234.5"), "-1234,5");
    }

    #[test]
    fn custom_negative_sign() {
        let c = Culture::new("minus").with_negative_sign('\u{2212}');

        assert_eq!(c.negative_sign(), '\u{2212}');
        assert_eq!(c.normalize_integer("\u{2212}42").as_deref(), Some("-42"));
        assert_eq!(c.normalize_integer("-42"), None);
        assert_eq!(c.normalize_number("\u{2212}1,234.5").as_deref(), Some("-1234.5"));
        assert_eq!(c.localize_number("-1234.5"), "\u{2212}1234.5");
    }

    #[test]
    fn date_time_formats() {
        let value = sample();
        assert_eq!(Culture::invariant().format_date_time(&value), "01/15/2024 13:05:09");
        assert_eq!(Culture::en_us().format_date_time(&value), "1/15/2024 1:05:09 PM");
        assert_eq!(Culture::de_de().format_date_time(&value), "15.01.2024 13:05:09");
    }

    #[test]
    fn date_time_parse_accepts_own_and_iso_forms() {
        let value = sample();
        for culture in [Culture::invariant(), Culture::en_us(), Culture::de_de()] {
            let text = culture.format_date_time(&value);
            assert_eq!(culture.parse_date_time(&text), Some(value), "{text}");
            assert_eq!(culture.parse_date_time("2024-01-15T13:05:09"), Some(value));
        }
        assert_eq!(
            Culture::invariant().parse_date_time("2024-01-15"),
            NaiveDate::from_ymd_opt(2024, 1, 15).map(|d| d.and_time(Default::default()))
        );
        assert_eq!(Culture::invariant().parse_date_time("not a date"), None);
    }

    #[test]
    fn fractional_seconds_survive() {
        let value = sample() + vc_reflect::chrono::Duration::milliseconds(250);
        let culture = Culture::en_us();
        let text = culture.format_date_time(&value);

        assert_eq!(text, "1/15/2024 1:05:09.250 PM");
        assert_eq!(culture.parse_date_time(&text), Some(value));
    }
}
