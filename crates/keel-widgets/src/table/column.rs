//! Columns, cell values and the record trait.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A value read from a record for one column.
///
/// Values order `Null` below everything else, then booleans, numbers and
/// text. Integers and floats compare numerically with each other; text
/// compares by code point.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Missing value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Text(String),
}

impl CellValue {
    /// Text shown in the cell; also what filters match against and what
    /// groups are keyed by.
    pub fn display(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Whether the value is [`CellValue::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
        }
    }

    /// Total order used for sorting.
    #[allow(clippy::cast_precision_loss)]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// A row the table can display.
///
/// `field` resolves accessor keys; unknown keys should return
/// [`CellValue::Null`]. Records with children expose them through
/// `sub_rows`.
pub trait Record: Clone + Send + 'static {
    /// Value for an accessor key.
    fn field(&self, key: &str) -> CellValue;

    /// Child records, shown under this one when it is expanded.
    fn sub_rows(&self) -> &[Self] {
        &[]
    }
}

/// Derives a cell value from a record.
pub type DeriveFn<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// How a column reads its value.
pub enum Accessor<R> {
    /// A key passed to [`Record::field`].
    Key(String),
    /// A derivation closure.
    Derive(DeriveFn<R>),
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Key(k) => Self::Key(k.clone()),
            Self::Derive(f) => Self::Derive(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.debug_tuple("Key").field(k).finish(),
            Self::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

/// One table column.
///
/// # Example
///
/// ```rust
/// use keel_widgets::table::{CellValue, ColumnDefinition, Record};
///
/// #[derive(Clone)]
/// struct User { name: String, age: u32 }
///
/// impl Record for User {
///     fn field(&self, key: &str) -> CellValue {
///         match key {
///             "name" => self.name.as_str().into(),
///             "age" => self.age.into(),
///             _ => CellValue::Null,
///         }
///     }
/// }
///
/// let name = ColumnDefinition::<User>::new("name", "Name").width(20);
/// let adult = ColumnDefinition::<User>::new("adult", "Adult")
///     .derive(|u| (u.age >= 18).into())
///     .groupable(false);
/// let u = User { name: "Ada".into(), age: 36 };
/// assert_eq!(name.value(&u), CellValue::from("Ada"));
/// assert_eq!(adult.value(&u), CellValue::Bool(true));
/// ```
pub struct ColumnDefinition<R> {
    /// Unique id, also the default accessor key.
    pub id: String,
    /// Header text.
    pub header: String,
    /// Value source.
    pub accessor: Accessor<R>,
    /// Can be sorted.
    pub sortable: bool,
    /// Takes part in filtering.
    pub filterable: bool,
    /// Can be grouped by.
    pub groupable: bool,
    /// Fixed width in cells; `None` sizes to content.
    pub width: Option<usize>,
}

impl<R> Clone for ColumnDefinition<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            groupable: self.groupable,
            width: self.width,
        }
    }
}

impl<R> fmt::Debug for ColumnDefinition<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDefinition")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("groupable", &self.groupable)
            .field("width", &self.width)
            .finish()
    }
}

impl<R: Record> ColumnDefinition<R> {
    /// A column reading key `id`, sortable, filterable and groupable.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            accessor: Accessor::Key(id.clone()),
            id,
            header: header.into(),
            sortable: true,
            filterable: true,
            groupable: true,
            width: None,
        }
    }

    /// Read a different key.
    pub fn accessor(mut self, key: impl Into<String>) -> Self {
        self.accessor = Accessor::Key(key.into());
        self
    }

    /// Derive the value with a closure.
    pub fn derive<F>(mut self, f: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        self.accessor = Accessor::Derive(Arc::new(f));
        self
    }

    /// Set sortability.
    pub const fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set filterability.
    pub const fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Set groupability.
    pub const fn groupable(mut self, groupable: bool) -> Self {
        self.groupable = groupable;
        self
    }

    /// Fix the width.
    pub const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Read this column's value from a record.
    pub fn value(&self, record: &R) -> CellValue {
        match &self.accessor {
            Accessor::Key(key) => record.field(key),
            Accessor::Derive(f) => f(record),
        }
    }
}
