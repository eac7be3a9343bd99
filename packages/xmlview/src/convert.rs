//! String conversions used by the typed element accessors.
//!
//! Numeric conversions fail with [`XmlViewError::NumericFormat`]. Boolean and
//! enum conversions never fail: unrecognized input yields `false` and `None`
//! respectively.
//!
//! Enum conversion looks names up in an [`EnumTable`] that is built once per
//! enum type and kept in the process-wide [`EnumCache`].

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use strum::VariantArray;

use crate::config::TRUTHY_LITERALS;
use crate::error::{NumericKind, Result, XmlViewError};

/// Convert a string to a boolean.
///
/// Returns `true` for `"true"`, `"1"`, `"yes"` and `"y"` ignoring case, and
/// `false` for everything else.
///
/// # Examples
/// ```
/// use xmlview::convert::to_bool;
///
/// assert!(to_bool("YES"));
/// assert!(!to_bool("no"));
/// assert!(!to_bool("true "));
/// ```
pub fn to_bool(value: &str) -> bool {
    TRUTHY_LITERALS
        .iter()
        .any(|literal| value.eq_ignore_ascii_case(literal))
}

/// Convert a string to a 32-bit integer.
///
/// # Arguments
/// * `value` - Decimal literal with an optional leading sign
///
/// # Returns
/// * `Ok(i32)` if `value` is a valid literal in range
/// * `Err(XmlViewError::NumericFormat)` otherwise
///
/// # Errors
/// Returns [`XmlViewError::NumericFormat`] for surrounding whitespace,
/// non-digits and values outside the `i32` range.
///
/// # Examples
/// ```
/// use xmlview::convert::to_int;
///
/// assert_eq!(to_int("-42").unwrap(), -42);
/// assert!(to_int("4294967296").is_err());
/// ```
pub fn to_int(value: &str) -> Result<i32> {
    value
        .parse()
        .map_err(|e| XmlViewError::numeric(value, NumericKind::Int, e))
}

/// Convert a string to a 64-bit integer.
///
/// # Errors
/// Returns [`XmlViewError::NumericFormat`] for surrounding whitespace,
/// non-digits and values outside the `i64` range.
pub fn to_long(value: &str) -> Result<i64> {
    value
        .parse()
        .map_err(|e| XmlViewError::numeric(value, NumericKind::Long, e))
}

/// Convert a string to a double.
///
/// Accepts the literals understood by [`f64::from_str`](std::str::FromStr),
/// including `inf` and `NaN`. Surrounding whitespace is rejected.
///
/// # Errors
/// Returns [`XmlViewError::NumericFormat`] if `value` is not a valid
/// floating point literal.
pub fn to_double(value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|e| XmlViewError::numeric(value, NumericKind::Double, e))
}

/// Convert a string to the enum member with exactly that name.
///
/// Matching is case-sensitive. Returns `None` when no member matches.
///
/// # Examples
/// ```
/// use xmlview::convert::to_enum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, strum::VariantArray, strum::IntoStaticStr)]
/// enum Color {
///     Red,
///     Green,
/// }
///
/// assert_eq!(to_enum::<Color>("Red"), Some(Color::Red));
/// assert_eq!(to_enum::<Color>("red"), None);
/// ```
pub fn to_enum<T: EnumValue>(value: &str) -> Option<T> {
    EnumCache::global().table::<T>().lookup(value)
}

/// A closed set of named values that can list its own members.
///
/// Implemented for every enum deriving [`strum::VariantArray`] and
/// [`strum::IntoStaticStr`]. Member names are the ones `IntoStaticStr`
/// produces, which is the variant name unless overridden with
/// `#[strum(serialize = "...")]`.
pub trait EnumValue: Copy + Send + Sync + 'static {
    /// Return every member of the set.
    fn members() -> &'static [Self];

    /// Return the name of this member.
    fn member_name(self) -> &'static str;
}

impl<T> EnumValue for T
where
    T: VariantArray + Into<&'static str> + Copy + Send + Sync + 'static,
{
    fn members() -> &'static [Self] {
        T::VARIANTS
    }

    fn member_name(self) -> &'static str {
        self.into()
    }
}

/// Name to member lookup for one enum type. Immutable once built.
#[derive(Debug)]
pub struct EnumTable<T> {
    by_name: HashMap<&'static str, T>,
}

impl<T: EnumValue> EnumTable<T> {
    /// Build the table from the members of `T`.
    ///
    /// When two members share a name the first one wins.
    #[must_use]
    pub fn build() -> Self {
        let mut by_name = HashMap::with_capacity(T::members().len());
        for &member in T::members() {
            by_name.entry(member.member_name()).or_insert(member);
        }
        Self { by_name }
    }

    /// Look up a member by exact name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<T> {
        self.by_name.get(name).copied()
    }

    /// Number of distinct names in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if the enum has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

type SharedTable = Arc<dyn Any + Send + Sync>;

static GLOBAL_ENUM_CACHE: LazyLock<EnumCache> = LazyLock::new(EnumCache::new);

/// Insert-once cache of [`EnumTable`]s keyed by enum type.
///
/// Concurrent first use of the same type may build the table more than once,
/// but only the first inserted table is ever handed out. Entries are never
/// evicted.
#[derive(Debug, Default)]
pub struct EnumCache {
    tables: RwLock<HashMap<TypeId, SharedTable>>,
}

impl EnumCache {
    /// Create a new empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the process-wide cache used by [`to_enum`].
    pub fn global() -> &'static EnumCache {
        &GLOBAL_ENUM_CACHE
    }

    /// Return the lookup table for `T`, building and caching it on first use.
    pub fn table<T: EnumValue>(&self) -> Arc<EnumTable<T>> {
        let key = TypeId::of::<T>();

        let cached = self
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(table) = cached {
            return downcast(table);
        }

        // Built outside the lock; a racing caller may do the same work.
        let built = EnumTable::<T>::build();
        let members = built.len();
        let candidate: SharedTable = Arc::new(built);

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let stored = tables.entry(key).or_insert_with(|| {
            tracing::debug!(enum_type = type_name::<T>(), members, "Populated enum table");
            Arc::clone(&candidate)
        });
        if !Arc::ptr_eq(stored, &candidate) {
            tracing::trace!(enum_type = type_name::<T>(), "Enum table already populated");
        }
        let table = Arc::clone(stored);
        drop(tables);

        downcast(table)
    }

    /// Number of enum types with a cached table.
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if no table has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[allow(clippy::expect_used)] // Entries are keyed by TypeId, so the stored table is always EnumTable<T>
fn downcast<T: EnumValue>(table: SharedTable) -> Arc<EnumTable<T>> {
    table
        .downcast::<EnumTable<T>>()
        .expect("enum table stored under the TypeId of its own type")
}
