use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use vc_utils::hash::HashMap;

use crate::Struct;
use crate::info::{MemberInfo, Type};

/// The member lookup table of one target type.
///
/// Keys are folded to lower case, so lookups ignore case. If two members
/// fold to the same key, the later declaration replaces the earlier one.
///
/// # Examples
///
/// ```
/// use vc_reflect::{derive::Reflect, members::MemberTable};
///
/// #[derive(Reflect, Default)]
/// struct Customer {
///     first_name: String,
///     #[reflect(rename = "EMail")]
///     email: Option<String>,
/// }
///
/// let table = MemberTable::build::<Customer>();
///
/// assert!(table.is_for::<Customer>());
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get("FIRST_NAME").unwrap().name(), "first_name");
/// assert_eq!(table.get("email").unwrap().name(), "EMail");
/// assert!(table.get("last_name").is_none());
/// ```
#[derive(Clone)]
pub struct MemberTable {
    ty: Type,
    members: Vec<MemberInfo>,
    index: HashMap<Box<str>, usize>,
}

impl MemberTable {
    /// Builds the table of `T` from its declared members.
    pub fn build<T: Struct>() -> Self {
        let table = Self::from_members(Type::of::<T>(), T::declare_members());
        log::debug!(
            "built member table for `{}` with {} members",
            table.ty,
            table.len()
        );
        table
    }

    /// Creates a table from an explicit member list.
    pub fn from_members(ty: Type, declared: impl IntoIterator<Item = MemberInfo>) -> Self {
        let declared = declared.into_iter();
        let mut members: Vec<MemberInfo> = Vec::with_capacity(declared.size_hint().0);
        let mut index: HashMap<Box<str>, usize> = HashMap::default();

        for member in declared {
            match index.get(member.key()) {
                Some(&at) => members[at] = member,
                None => {
                    index.insert(member.key().into(), members.len());
                    members.push(member);
                }
            }
        }

        Self { ty, members, index }
    }

    /// Returns the target type.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Check if the table was built for `T`.
    #[inline]
    pub fn is_for<T: Any>(&self) -> bool {
        self.ty.is::<T>()
    }

    /// Looks up a member, ignoring case.
    pub fn get(&self, name: &str) -> Option<&MemberInfo> {
        self.get_folded(&vc_utils::fold_name(name))
    }

    /// Looks up a member by an already folded key.
    #[inline]
    pub fn get_folded(&self, key: &str) -> Option<&MemberInfo> {
        self.index.get(key).map(|&at| &self.members[at])
    }

    /// Check if a member with the given name exists, ignoring case.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the members in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &MemberInfo> {
        self.members.iter()
    }

    /// Returns the number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the type has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl fmt::Debug for MemberTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberTable")
            .field("ty", &self.ty)
            .field("members", &self.members)
            .finish()
    }
}
