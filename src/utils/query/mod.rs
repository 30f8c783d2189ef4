//! Generic listing support: turns a raw query string into a filtered,
//! projected, sorted and paginated result set for any [`Listable`] resource.
//!
//! ```text
//! GET /bootcamps?average_cost[lte]=10000&careers[in]=Business,UI/UX&select=name&sort=-name&page=2
//! ```

mod filter;
mod pipeline;
mod request;

pub use filter::FilterExpression;
pub use pipeline::{advanced_results, Expansion, ListingOptions};
pub use request::ListingRequest;

use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Boolean,
    Timestamp,
    TextArray,
}

/// A queryable field: the name clients use and the column it lives in.
#[derive(Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self { name, column, kind }
    }

    /// Top-level key of the serialized document this field belongs to.
    pub fn key(&self) -> &'static str {
        match self.name.split_once('.') {
            Some((key, _)) => key,
            None => self.name,
        }
    }
}

/// A stored resource that can be listed through [`advanced_results`].
///
/// `FIELDS` is the allowlist: only these names may be used to filter, sort or
/// select, and every one of them must be backed by a column of `TABLE`.
pub trait Listable: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin {
    const TABLE: &'static str;
    const FIELDS: &'static [Field];

    fn field(name: &str) -> Option<&'static Field> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{Field, FieldKind, Listable};
    use chrono::{DateTime, Utc};
    use serde::Serialize;

    #[derive(sqlx::FromRow, Serialize)]
    pub struct Widget {
        pub id: String,
        pub name: String,
        pub rating: i32,
        pub cost: f64,
        pub stock: i32,
        pub active: bool,
        pub tags: Vec<String>,
        pub city: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    impl Listable for Widget {
        const TABLE: &'static str = "widgets";
        const FIELDS: &'static [Field] = &[
            Field::new("id", "id", FieldKind::Text),
            Field::new("name", "name", FieldKind::Text),
            Field::new("rating", "rating", FieldKind::Integer),
            Field::new("cost", "cost", FieldKind::Float),
            Field::new("stock", "stock", FieldKind::Integer),
            Field::new("active", "active", FieldKind::Boolean),
            Field::new("tags", "tags", FieldKind::TextArray),
            Field::new("location.city", "city", FieldKind::Text),
            Field::new("created_at", "created_at", FieldKind::Timestamp),
        ];
    }
}
