//! Shallow, name-based copies between declared types.
//!
//! [`Copier`] walks the members of the target type in declaration order and
//! writes each one from the same-named source member or column, after
//! [coercion](crate::coerce). Excluded and read-only target members are left
//! alone; target members without a source counterpart are ignored.
//!
//! A field is copied from a source field, a property from a readable source
//! property. What happens when one member fails is chosen with
//! [`OnMemberError`].

// -----------------------------------------------------------------------------
// Modules

mod error;

// -----------------------------------------------------------------------------
// Exports

pub use error::{CopyError, MemberFailure};

use alloc::vec::Vec;
use core::any::Any;

use vc_reflect::Struct;
use vc_reflect::info::{MemberInfo, MemberKind};
use vc_reflect::registry::MappingRegistry;
use vc_reflect::value::Value;
use vc_utils::NameSet;

use crate::coerce::coerce;
use crate::source::{Row, SourceError};
use crate::tables;

// -----------------------------------------------------------------------------
// OnMemberError

/// What a [`Copier`] does when a single member cannot be copied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OnMemberError {
    /// Abort the copy and return the error.
    #[default]
    Stop,
    /// Record the failure in the [`CopyReport`], log it and go on.
    SkipAndContinue,
}

// -----------------------------------------------------------------------------
// CopyReport

/// The outcome of a copy that did not abort.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Target members written, in declaration order.
    pub copied: Vec<&'static str>,
    /// Target members skipped because of an error.
    pub failures: Vec<MemberFailure>,
}

impl CopyReport {
    /// Returns `true` if no member failed.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Copier

/// Options of one copy.
///
/// # Examples
///
/// ```
/// use vc_data::{Copier, NameSet};
/// use vc_reflect::derive::Reflect;
///
/// #[derive(Reflect, Default)]
/// struct UserRow {
///     id: i64,
///     name: String,
///     visits: i64,
/// }
///
/// #[derive(Reflect, Default)]
/// struct User {
///     id: i64,
///     name: String,
///     visits: i32,
/// }
///
/// let row = UserRow { id: 9, name: "ada".into(), visits: 3 };
/// let mut user = User { id: 1, ..Default::default() };
///
/// let exclude: NameSet = ["Id"].into_iter().collect();
/// let report = Copier::new().exclude(&exclude).copy(&row, &mut user).unwrap();
///
/// assert_eq!(user.id, 1);
/// assert_eq!(user.name, "ada");
/// assert_eq!(user.visits, 3);
/// assert_eq!(report.copied, ["name", "visits"]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Copier<'a> {
    exclude: Option<&'a NameSet>,
    on_member_error: OnMemberError,
    registry: Option<&'a MappingRegistry>,
}

impl<'a> Copier<'a> {
    /// Creates a copier that stops at the first failing member.
    #[inline]
    pub const fn new() -> Self {
        Self {
            exclude: None,
            on_member_error: OnMemberError::Stop,
            registry: None,
        }
    }

    /// Never writes the named target members.
    #[inline]
    pub fn exclude(mut self, names: &'a NameSet) -> Self {
        self.exclude = Some(names);
        self
    }

    /// Sets the per-member failure policy.
    #[inline]
    pub fn on_member_error(mut self, policy: OnMemberError) -> Self {
        self.on_member_error = policy;
        self
    }

    /// Takes member tables from `registry`, building them on first use.
    #[inline]
    pub fn with_registry(mut self, registry: &'a MappingRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Copies same-named members of `source` into `target`.
    pub fn copy<S: Struct, T: Struct>(
        &self,
        source: &S,
        target: &mut T,
    ) -> Result<CopyReport, CopyError> {
        let from = tables::lookup::<S>(self.registry);
        let to = tables::lookup::<T>(self.registry);
        let mut report = CopyReport::default();

        for member in to.iter().filter(|m| self.is_copied(m)) {
            let Some(counterpart) = from.get_folded(member.key()) else {
                continue;
            };
            if !counterparts(member, counterpart) {
                log::trace!(
                    "member `{}` of `{}` has no matching {:?} in `{}`",
                    member.name(),
                    to.ty(),
                    member.kind(),
                    from.ty()
                );
                continue;
            }

            let value = counterpart
                .get(source)
                .map_err(|source| CopyError::Access {
                    member: counterpart.name(),
                    source,
                });
            let result = assign(member, value, target);
            self.record(&mut report, member.name(), result)?;
        }
        Ok(report)
    }

    /// Copies the same-named columns of the current row into `target`.
    ///
    /// A closed or unpositioned row aborts the copy whatever the policy.
    pub fn copy_from_row<T: Struct>(
        &self,
        row: &(impl Row + ?Sized),
        target: &mut T,
    ) -> Result<CopyReport, CopyError> {
        row.check_readable().map_err(CopyError::Source)?;
        let to = tables::lookup::<T>(self.registry);
        let mut report = CopyReport::default();

        for member in to.iter().filter(|m| self.is_copied(m)) {
            let Some(ordinal) = row.ordinal(member.name()) else {
                continue;
            };
            let value = match row.value(ordinal) {
                Err(err @ (SourceError::Closed | SourceError::NotPositioned)) => {
                    return Err(CopyError::Source(err));
                }
                value => value.map_err(CopyError::Source),
            };
            let result = assign(member, value, target);
            self.record(&mut report, member.name(), result)?;
        }
        Ok(report)
    }

    fn is_copied(&self, member: &MemberInfo) -> bool {
        member.is_writable() && !self.exclude.is_some_and(|ex| ex.contains_folded(member.key()))
    }

    fn record(
        &self,
        report: &mut CopyReport,
        member: &'static str,
        result: Result<(), CopyError>,
    ) -> Result<(), CopyError> {
        match result {
            Ok(()) => report.copied.push(member),
            Err(err) => match self.on_member_error {
                OnMemberError::Stop => return Err(err),
                OnMemberError::SkipAndContinue => {
                    log::warn!("member `{member}` was not copied: {err}");
                    report.failures.push(MemberFailure { member, error: err });
                }
            },
        }
        Ok(())
    }
}

fn counterparts(target: &MemberInfo, source: &MemberInfo) -> bool {
    match target.kind() {
        MemberKind::Field => source.is_field(),
        MemberKind::Property => source.kind() == MemberKind::Property && source.is_readable(),
    }
}

fn assign(
    member: &MemberInfo,
    value: Result<Value, CopyError>,
    target: &mut dyn Any,
) -> Result<(), CopyError> {
    let value = coerce(value?, member.type_info()).map_err(|source| CopyError::Coercion {
        member: member.name(),
        source,
    })?;
    member
        .set(target, value)
        .map_err(|source| CopyError::Access {
            member: member.name(),
            source,
        })
}

// -----------------------------------------------------------------------------
// Free functions

/// Copies same-named members, aborting at the first failing member.
///
/// See [`Copier::copy`].
pub fn copy<S: Struct, T: Struct>(
    source: &S,
    target: &mut T,
    excluded: Option<&NameSet>,
) -> Result<CopyReport, CopyError> {
    Copier {
        exclude: excluded,
        ..Copier::new()
    }
    .copy(source, target)
}

/// Copies the same-named columns of a row, skipping failing members.
///
/// Returns `false` if any member failed or the row could not be read.
/// Each skipped member is logged at `warn` level.
pub fn copy_from_row<T: Struct>(
    row: &(impl Row + ?Sized),
    target: &mut T,
    excluded: Option<&NameSet>,
) -> bool {
    let copier = Copier {
        exclude: excluded,
        on_member_error: OnMemberError::SkipAndContinue,
        registry: None,
    };
    match copier.copy_from_row(row, target) {
        Ok(report) => report.is_success(),
        Err(err) => {
            log::warn!("row could not be copied: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use vc_reflect::derive::Reflect;
    use vc_reflect::info::AccessError;
    use vc_reflect::registry::MappingRegistry;
    use vc_reflect::value::Value;
    use vc_utils::NameSet;

    use super::{Copier, CopyError, OnMemberError};
    use crate::coerce::CoercionError;
    use crate::source::{DataTable, RecordSource, SourceError};

    #[derive(Reflect, Default, Debug, Clone, PartialEq)]
    #[reflect(property(name = "FullName", ty = String, get = Person::full_name))]
    struct Person {
        id: i64,
        first_name: String,
        last_name: String,
        age: i64,
        active: i64,
        email: String,
    }

    impl Person {
        fn full_name(&self) -> String {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(property(
        name = "FullName",
        ty = String,
        get = Contact::full_name,
        set = Contact::set_full_name
    ))]
    #[reflect(property(name = "last_name", ty = String, set = Contact::set_last_name))]
    struct Contact {
        id: i64,
        first_name: String,
        age: i32,
        active: bool,
        #[reflect(readonly)]
        email: String,
        display: String,
        family: String,
    }

    impl Contact {
        fn full_name(&self) -> String {
            self.display.clone()
        }

        fn set_full_name(&mut self, value: String) {
            self.display = value;
        }

        fn set_last_name(&mut self, value: String) {
            self.family = value;
        }
    }

    fn ada() -> Person {
        Person {
            id: 42,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            age: 36,
            active: 1,
            email: "ada@example.com".into(),
        }
    }

    #[test]
    fn copies_fields_and_properties() {
        let mut contact = Contact::default();
        let report = Copier::new().copy(&ada(), &mut contact).unwrap();

        assert_eq!(contact.id, 42);
        assert_eq!(contact.first_name, "Ada");
        assert_eq!(contact.age, 36);
        assert!(contact.active);
        assert_eq!(contact.display, "Ada Lovelace");
        assert_eq!(report.copied, ["id", "first_name", "age", "active", "FullName"]);
        assert!(report.is_success());
    }

    #[test]
    fn read_only_and_kind_mismatch_are_skipped() {
        let mut contact = Contact::default();
        Copier::new().copy(&ada(), &mut contact).unwrap();

        // read-only field
        assert_eq!(contact.email, "");
        // `last_name` is a property here but a field on the source
        assert_eq!(contact.family, "");
    }

    #[test]
    fn excluded_id_is_never_written() {
        let exclude: NameSet = ["Id"].into_iter().collect();
        for id in [0, 1, i64::MAX] {
            let mut contact = Contact {
                id: -5,
                ..Default::default()
            };
            let person = Person { id, ..ada() };
            super::copy(&person, &mut contact, Some(&exclude)).unwrap();

            assert_eq!(contact.id, -5);
            assert_eq!(contact.first_name, "Ada");
        }
    }

    #[test]
    fn stop_policy_aborts() {
        #[derive(Reflect, Default)]
        struct Strict {
            first_name: i64,
            age: i32,
        }

        let mut target = Strict::default();
        let err = Copier::new().copy(&ada(), &mut target).unwrap_err();

        assert!(matches!(
            err,
            CopyError::Coercion {
                member: "first_name",
                source: CoercionError::NotAssignable { .. },
            }
        ));
        assert_eq!(target.age, 0);
    }

    #[test]
    fn skip_policy_continues() {
        #[derive(Reflect, Default)]
        struct Lenient {
            first_name: i64,
            age: i32,
        }

        let mut target = Lenient::default();
        let report = Copier::new()
            .on_member_error(OnMemberError::SkipAndContinue)
            .copy(&ada(), &mut target)
            .unwrap();

        assert_eq!(target.age, 36);
        assert!(!report.is_success());
        assert_eq!(report.copied, ["age"]);
        assert_eq!(report.failures[0].member, "first_name");
    }

    #[test]
    fn copy_from_row_is_lenient() {
        let mut table = DataTable::new()
            .with_column("ID")
            .with_column("FIRST_NAME")
            .with_column("Age")
            .with_column("Active")
            .with_column("Unknown");
        table
            .push_row([
                Value::I64(3),
                Value::from("Grace"),
                Value::from("eighty"),
                Value::I64(1),
                Value::Null,
            ])
            .unwrap();

        let mut contact = Contact::default();
        let ok = super::copy_from_row(&table.row(0).unwrap(), &mut contact, None);

        assert!(!ok);
        assert_eq!(contact.id, 3);
        assert_eq!(contact.first_name, "Grace");
        assert_eq!(contact.age, 0);
        assert!(contact.active);
    }

    #[test]
    fn copy_from_row_reports_failures() {
        let mut table = DataTable::new().with_column("age").with_column("id");
        table.push_row([Value::from("x"), Value::I64(4)]).unwrap();

        let mut contact = Contact::default();
        let report = Copier::new()
            .on_member_error(OnMemberError::SkipAndContinue)
            .copy_from_row(&table.row(0).unwrap(), &mut contact)
            .unwrap();

        assert_eq!(report.copied, ["id"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].member, "age");
    }

    #[test]
    fn copy_from_row_stops_on_source_state() {
        let mut table = DataTable::new().with_column("id");
        table.push_row([Value::I64(4)]).unwrap();
        let mut reader = table.reader();
        reader.close();

        let result = Copier::new()
            .on_member_error(OnMemberError::SkipAndContinue)
            .copy_from_row(&reader, &mut Contact::default());
        assert_eq!(result, Err(CopyError::Source(SourceError::Closed)));
        assert!(!super::copy_from_row(&reader, &mut Contact::default(), None));
    }

    #[test]
    fn copy_from_row_checks_source_state_without_matching_columns() {
        let mut table = DataTable::new().with_column("nickname");
        table.push_row([Value::String("ace".into())]).unwrap();

        let reader = table.reader();
        let result = Copier::new().copy_from_row(&reader, &mut Contact::default());
        assert_eq!(result, Err(CopyError::Source(SourceError::NotPositioned)));

        let mut reader = table.reader();
        assert!(reader.advance().unwrap());
        assert!(super::copy_from_row(&reader, &mut Contact::default(), None));

        reader.close();
        assert!(!super::copy_from_row(&reader, &mut Contact::default(), None));
    }

    #[test]
    fn write_only_source_property_is_not_read() {
        #[derive(Reflect, Default)]
        #[reflect(property(
            name = "last_name",
            ty = String,
            get = Echo::last_name,
            set = Echo::set_last_name
        ))]
        struct Echo {
            surname: String,
        }

        impl Echo {
            fn last_name(&self) -> String {
                self.surname.clone()
            }

            fn set_last_name(&mut self, value: String) {
                self.surname = value;
            }
        }

        let mut echo = Echo::default();
        let source = Contact {
            family: "Hopper".into(),
            ..Default::default()
        };
        let report = Copier::new().copy(&source, &mut echo).unwrap();

        assert_eq!(echo.surname, "");
        assert!(report.copied.is_empty());
    }

    #[test]
    fn registry_tables_are_reused() {
        let registry = MappingRegistry::new();
        let copier = Copier::new().with_registry(&registry);
        copier.copy(&ada(), &mut Contact::default()).unwrap();
        copier.copy(&ada(), &mut Contact::default()).unwrap();

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn access_error_names_member() {
        let err = CopyError::Access {
            member: "id",
            source: AccessError::NotWritable { member: "id" },
        };
        assert_eq!(format!("{err}"), "member `id` could not be read or written");
    }
}
