use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;

use crate::hash::HashSet;

// -----------------------------------------------------------------------------
// Name folding

/// Normalizes a member or column name for case-insensitive matching.
///
/// Names are folded to lower case. Already folded input is borrowed.
///
/// # Examples
///
/// ```
/// use vc_utils::fold_name;
///
/// assert_eq!(fold_name("IsActive"), "isactive");
/// assert!(matches!(fold_name("sku"), std::borrow::Cow::Borrowed(_)));
/// ```
pub fn fold_name(name: &str) -> Cow<'_, str> {
    if name.chars().any(char::is_uppercase) {
        Cow::Owned(name.to_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

/// Returns `true` if two names are equal after folding.
#[inline]
pub fn names_match(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.eq_ignore_ascii_case(b) || fold_name(a) == fold_name(b)
}

// -----------------------------------------------------------------------------
// NameSet

/// A set of folded names.
///
/// Used for skip-lists and exclusion lists, lookups ignore case.
///
/// # Examples
///
/// ```
/// use vc_utils::NameSet;
///
/// let skip: NameSet = ["Password", "id"].into_iter().collect();
///
/// assert!(skip.contains("password"));
/// assert!(skip.contains("ID"));
/// assert!(!skip.contains("name"));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct NameSet {
    names: HashSet<Box<str>>,
}

impl NameSet {
    /// Creates an empty set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a name, returns `false` if an equal name was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(fold_name(name).into())
    }

    /// Returns `true` if the set contains `name`, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(fold_name(name).as_ref())
    }

    /// Returns `true` if the set contains an already folded name.
    #[inline]
    pub fn contains_folded(&self, folded: &str) -> bool {
        self.names.contains(folded)
    }

    /// Returns the number of names.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates the folded names in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(AsRef::as_ref)
    }
}

impl fmt::Debug for NameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names.iter()).finish()
    }
}

impl<S: AsRef<str>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

impl<S: AsRef<str>> Extend<S> for NameSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name.as_ref());
        }
    }
}
