use super::{Field, FieldKind, FilterExpression, ListingRequest, Listable};
use crate::utils::{
    error::ApiError,
    pagination::{Paginated, Pagination},
};
use serde_json::{Map, Value};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn sql(&self) -> &'static str {
        match self {
            Self::Asc => " ASC",
            Self::Desc => " DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub keys: Vec<(&'static Field, Direction)>,
}

static CREATED_AT: Field = Field::new("created_at", "created_at", FieldKind::Timestamp);

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            keys: vec![(&CREATED_AT, Direction::Desc)],
        }
    }
}

impl SortSpec {
    /// `sort=name,-average_cost`; newest first when absent or empty.
    pub fn parse<R: Listable>(raw: Option<&str>) -> Result<Self, ApiError> {
        let keys = raw
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (name, direction) = match part.strip_prefix('-') {
                    Some(name) => (name, Direction::Desc),
                    None => (part, Direction::Asc),
                };

                R::field(name)
                    .map(|field| (field, direction))
                    .ok_or_else(|| ApiError::BadRequest(format!("Unknown sort field {}", name)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if keys.is_empty() {
            return Ok(Self::default());
        }

        Ok(Self { keys })
    }

    /// Appends `id` as a final key so rows with equal sort values keep a
    /// stable position between pages.
    pub fn push_order_by(&self, query: &mut QueryBuilder<'_, Postgres>) {
        query.push(" ORDER BY ");

        for (index, (field, direction)) in self.keys.iter().enumerate() {
            if index > 0 {
                query.push(", ");
            }
            query.push(field.column).push(direction.sql());
        }

        if !self.keys.iter().any(|(field, _)| field.column == "id") {
            let direction = self
                .keys
                .last()
                .map(|(_, direction)| *direction)
                .unwrap_or(Direction::Desc);

            query.push(", id").push(direction.sql());
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    All,
    Keys(Vec<&'static str>),
}

impl Projection {
    /// `select=name,description`; the identifier is always kept.
    pub fn parse<R: Listable>(raw: Option<&str>) -> Result<Self, ApiError> {
        let raw = match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => raw,
            None => return Ok(Self::All),
        };

        let mut keys = vec![];
        for name in raw.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            let key = R::FIELDS
                .iter()
                .find(|field| field.name == name || field.key() == name)
                .map(Field::key)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown select field {}", name)))?;

            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        Ok(Self::Keys(keys))
    }

    pub fn apply(&self, documents: &mut [Value]) {
        let keys = match self {
            Self::All => return,
            Self::Keys(keys) => keys,
        };

        for document in documents.iter_mut() {
            if let Value::Object(map) = document {
                map.retain(|key, _| {
                    key == "id" || keys.iter().any(|selected| *selected == key.as_str())
                });
            }
        }
    }
}

/// Replaces a reference id stored under `path` with a few fields of the
/// referenced row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub path: &'static str,
    pub table: &'static str,
    pub fields: &'static [&'static str],
}

impl Expansion {
    fn select_sql(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|field| format!("'{}', {}", field, field))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "SELECT id, jsonb_build_object({}) FROM {} WHERE id = ANY(",
            fields, self.table
        )
    }

    pub async fn apply(&self, pool: &PgPool, documents: &mut [Value]) -> Result<(), ApiError> {
        let mut ids = documents
            .iter()
            .filter_map(|document| document.get(self.path)?.as_str())
            .map(String::from)
            .collect::<Vec<_>>();
        ids.sort();
        ids.dedup();

        if ids.is_empty() {
            return Ok(());
        }

        let mut query = QueryBuilder::<Postgres>::new(self.select_sql());
        query.push_bind(ids).push(")");

        let related = query
            .build_query_as::<(String, Value)>()
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(|(id, fields)| {
                let mut object = Map::new();
                object.insert(String::from("id"), Value::String(id.clone()));
                if let Value::Object(fields) = fields {
                    object.extend(fields);
                }
                (id, Value::Object(object))
            })
            .collect::<HashMap<_, _>>();

        for document in documents.iter_mut() {
            if let Some(slot) = document.get_mut(self.path) {
                let expanded = slot
                    .as_str()
                    .map(|id| related.get(id).cloned().unwrap_or(Value::Null));
                if let Some(expanded) = expanded {
                    *slot = expanded;
                }
            }
        }

        Ok(())
    }
}

/// Per-route listing configuration, fixed when the route is registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingOptions {
    pub expansion: Option<Expansion>,
}

impl ListingOptions {
    pub const fn new() -> Self {
        Self { expansion: None }
    }

    pub const fn expand(expansion: Expansion) -> Self {
        Self {
            expansion: Some(expansion),
        }
    }
}

fn count_query<'args, R: Listable>(filter: &FilterExpression) -> QueryBuilder<'args, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", R::TABLE));
    filter.push_where(&mut query);
    query
}

/// Sorted in the store, then windowed.
fn find_query<'args, R: Listable>(
    filter: &FilterExpression,
    sort: &SortSpec,
    pagination: &Pagination,
) -> QueryBuilder<'args, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT * FROM {}", R::TABLE));
    filter.push_where(&mut query);
    sort.push_order_by(&mut query);
    query
        .push(" LIMIT ")
        .push_bind(pagination.take())
        .push(" OFFSET ")
        .push_bind(pagination.skip());
    query
}

/// Runs a listing request against `R`'s table.
///
/// Everything the client sent is validated before the first query, so a bad
/// request never reaches the database. `total` only decides the `next` / `prev`
/// links; `count` is the number of documents on this page.
pub async fn advanced_results<R: Listable>(
    pool: &PgPool,
    options: &ListingOptions,
    request: &ListingRequest,
) -> Result<Paginated<Value>, ApiError> {
    let filter = FilterExpression::from_request::<R>(request)?;
    let projection = Projection::parse::<R>(request.get("select"))?;
    let sort = SortSpec::parse::<R>(request.get("sort"))?;
    let pagination = Pagination::from_params(request.get("page"), request.get("limit"));

    tracing::debug!(
        "Listing {} with {:?}, {:?}, {:?}",
        R::TABLE,
        filter,
        sort,
        pagination
    );

    let mut count = count_query::<R>(&filter);
    let (total,) = count.build_query_as::<(i64,)>().fetch_one(pool).await?;

    let mut find = find_query::<R>(&filter, &sort, &pagination);
    let rows = find.build_query_as::<R>().fetch_all(pool).await?;

    let mut data = rows
        .into_iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;

    projection.apply(&mut data);

    if let Some(expansion) = &options.expansion {
        expansion.apply(pool, &mut data).await?;
    }

    Ok(Paginated::new(data, pagination.meta(total)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::query::fixtures::Widget;
    use serde_json::json;

    fn order_by(raw: Option<&str>) -> String {
        let sort = SortSpec::parse::<Widget>(raw).unwrap();
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM widgets");
        sort.push_order_by(&mut query);
        query.sql().to_string()
    }

    #[test]
    fn default_sort_is_newest_first() {
        assert_eq!(
            order_by(None),
            "SELECT * FROM widgets ORDER BY created_at DESC, id DESC"
        );
        assert_eq!(order_by(Some("")), order_by(None));
        assert_eq!(order_by(Some(" , ")), order_by(None));
    }

    #[test]
    fn sort_keys_keep_their_order_and_direction() {
        assert_eq!(
            order_by(Some("name,-cost")),
            "SELECT * FROM widgets ORDER BY name ASC, cost DESC, id DESC"
        );
        assert_eq!(
            order_by(Some("-id,name")),
            "SELECT * FROM widgets ORDER BY id DESC, name ASC"
        );
        assert_eq!(
            order_by(Some("location.city")),
            "SELECT * FROM widgets ORDER BY city ASC, id ASC"
        );
    }

    fn filter(params: &[(&str, &str)]) -> FilterExpression {
        let request = ListingRequest::new(
            params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        );
        FilterExpression::from_request::<Widget>(&request).unwrap()
    }

    #[test]
    fn count_honors_the_filter() {
        let filter = filter(&[("cost[gt]", "10"), ("active", "true"), ("page", "3")]);

        assert_eq!(
            count_query::<Widget>(&filter).sql(),
            "SELECT COUNT(*) FROM widgets WHERE cost > $1 AND active = $2"
        );
        assert_eq!(
            count_query::<Widget>(&FilterExpression::default()).sql(),
            "SELECT COUNT(*) FROM widgets"
        );
    }

    #[test]
    fn find_sorts_before_the_window() {
        let filter = filter(&[("cost[gt]", "10")]);
        let sort = SortSpec::parse::<Widget>(Some("-cost")).unwrap();
        let pagination = Pagination::from_params(Some("2"), Some("10"));

        assert_eq!(
            find_query::<Widget>(&filter, &sort, &pagination).sql(),
            "SELECT * FROM widgets WHERE cost > $1 ORDER BY cost DESC, id DESC LIMIT $2 OFFSET $3"
        );
    }

    #[test]
    fn pages_share_the_sort_and_move_the_window() {
        let filter = FilterExpression::default();
        let sort = SortSpec::parse::<Widget>(Some("name")).unwrap();
        let first = Pagination::from_params(Some("1"), Some("2"));
        let second = Pagination::from_params(Some("2"), Some("2"));

        let expected = "SELECT * FROM widgets ORDER BY name ASC, id ASC LIMIT $1 OFFSET $2";
        assert_eq!(find_query::<Widget>(&filter, &sort, &first).sql(), expected);
        assert_eq!(find_query::<Widget>(&filter, &sort, &second).sql(), expected);

        assert_eq!((first.take(), first.skip()), (2, 0));
        assert_eq!((second.take(), second.skip()), (2, 2));
        assert!(first.meta(3).next.is_some());
        assert!(second.meta(3).next.is_none());
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        assert!(matches!(
            SortSpec::parse::<Widget>(Some("-secret")),
            Err(ApiError::BadRequest(message)) if message == "Unknown sort field secret"
        ));
    }

    #[test]
    fn projection_keeps_id_and_selected_keys() {
        let projection = Projection::parse::<Widget>(Some("name, cost,name")).unwrap();
        assert_eq!(projection, Projection::Keys(vec!["name", "cost"]));

        let mut documents = vec![json!({
            "id": "01J0",
            "name": "Gear",
            "cost": 3.5,
            "stock": 2,
        })];
        projection.apply(&mut documents);

        assert_eq!(documents, vec![json!({ "id": "01J0", "name": "Gear", "cost": 3.5 })]);
    }

    #[test]
    fn nested_select_keeps_parent_object() {
        assert_eq!(
            Projection::parse::<Widget>(Some("location.city")).unwrap(),
            Projection::Keys(vec!["location"])
        );
        assert_eq!(
            Projection::parse::<Widget>(Some("location")).unwrap(),
            Projection::Keys(vec!["location"])
        );
    }

    #[test]
    fn missing_select_returns_everything() {
        let mut documents = vec![json!({ "id": "01J0", "name": "Gear" })];
        Projection::parse::<Widget>(None).unwrap().apply(&mut documents);
        assert_eq!(documents, vec![json!({ "id": "01J0", "name": "Gear" })]);
    }

    #[test]
    fn unknown_select_field_is_rejected() {
        assert!(Projection::parse::<Widget>(Some("name,password")).is_err());
    }

    #[test]
    fn expansion_query_only_uses_configured_identifiers() {
        let expansion = Expansion {
            path: "bootcamp",
            table: "bootcamps",
            fields: &["name", "description"],
        };

        assert_eq!(
            expansion.select_sql(),
            "SELECT id, jsonb_build_object('name', name, 'description', description) FROM bootcamps WHERE id = ANY("
        );
    }

    #[tokio::test]
    async fn expansion_skips_documents_without_references() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://devcamper@127.0.0.1:1/devcamper")
            .unwrap();
        let expansion = Expansion {
            path: "bootcamp",
            table: "bootcamps",
            fields: &["name"],
        };

        let mut documents = vec![json!({ "id": "01J0", "title": "Intro" })];
        expansion.apply(&pool, &mut documents).await.unwrap();

        assert_eq!(documents, vec![json!({ "id": "01J0", "title": "Intro" })]);
    }
}
