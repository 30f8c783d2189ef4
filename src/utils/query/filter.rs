use super::{Field, FieldKind, ListingRequest, Listable};
use crate::utils::error::ApiError;
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use sqlx::{Postgres, QueryBuilder};
use std::sync::OnceLock;

/// `field` or `field[token]`.
fn filter_key() -> &'static Regex {
    static FILTER_KEY: OnceLock<Regex> = OnceLock::new();
    FILTER_KEY.get_or_init(|| {
        Regex::new(r"^(?P<field>[A-Za-z_][A-Za-z0-9_.]*)(?:\[(?P<token>[^\[\]]*)\])?$")
            .expect("filter key pattern")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    fn sql(&self) -> &'static str {
        match self {
            Self::Gt => " > ",
            Self::Gte => " >= ",
            Self::Lt => " < ",
            Self::Lte => " <= ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Compare(Comparison),
    In,
}

impl Operator {
    /// Only the whole tokens are operators; `field[gtx]` is not `gt`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "gt" => Some(Self::Compare(Comparison::Gt)),
            "gte" => Some(Self::Compare(Comparison::Gte)),
            "lt" => Some(Self::Compare(Comparison::Lt)),
            "lte" => Some(Self::Compare(Comparison::Lte)),
            "in" => Some(Self::In),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum List {
    Text(Vec<String>),
    Integer(Vec<i64>),
    Float(Vec<f64>),
    Boolean(Vec<bool>),
    Timestamp(Vec<DateTime<Utc>>),
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|timestamp| timestamp.and_utc())
        })
}

impl Scalar {
    fn parse(kind: FieldKind, raw: &str) -> Option<Self> {
        match kind {
            FieldKind::Text | FieldKind::TextArray => Some(Self::Text(raw.to_string())),
            FieldKind::Integer => raw.trim().parse().ok().map(Self::Integer),
            FieldKind::Float => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Self::Float),
            FieldKind::Boolean => match raw.trim() {
                "true" => Some(Self::Boolean(true)),
                "false" => Some(Self::Boolean(false)),
                _ => None,
            },
            FieldKind::Timestamp => parse_timestamp(raw.trim()).map(Self::Timestamp),
        }
    }

    fn push_bind(&self, query: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::Text(value) => query.push_bind(value.clone()),
            Self::Integer(value) => query.push_bind(*value),
            Self::Float(value) => query.push_bind(*value),
            Self::Boolean(value) => query.push_bind(*value),
            Self::Timestamp(value) => query.push_bind(*value),
        };
    }
}

impl List {
    fn parse(kind: FieldKind, raw: &str) -> Option<Self> {
        let scalars = raw
            .split(',')
            .map(|item| Scalar::parse(kind, item.trim()))
            .collect::<Option<Vec<_>>>()?;

        macro_rules! collect {
            ($variant:ident) => {
                Self::$variant(
                    scalars
                        .into_iter()
                        .filter_map(|scalar| match scalar {
                            Scalar::$variant(value) => Some(value),
                            _ => None,
                        })
                        .collect(),
                )
            };
        }

        Some(match kind {
            FieldKind::Text | FieldKind::TextArray => collect!(Text),
            FieldKind::Integer => collect!(Integer),
            FieldKind::Float => collect!(Float),
            FieldKind::Boolean => collect!(Boolean),
            FieldKind::Timestamp => collect!(Timestamp),
        })
    }

    fn push_bind(&self, query: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::Text(values) => query.push_bind(values.clone()),
            Self::Integer(values) => query.push_bind(values.clone()),
            Self::Float(values) => query.push_bind(values.clone()),
            Self::Boolean(values) => query.push_bind(values.clone()),
            Self::Timestamp(values) => query.push_bind(values.clone()),
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(Scalar),
    Cmp(Comparison, Scalar),
    In(List),
}

impl Condition {
    fn parse(field: &Field, operator: Option<Operator>, raw: &str) -> Result<Self, ApiError> {
        let invalid = || ApiError::BadRequest(format!("Invalid value for {}: {}", field.name, raw));

        match operator {
            None => Scalar::parse(field.kind, raw)
                .map(Self::Eq)
                .ok_or_else(invalid),
            Some(Operator::In) => List::parse(field.kind, raw)
                .map(Self::In)
                .ok_or_else(invalid),
            Some(Operator::Compare(_)) if field.kind == FieldKind::TextArray => {
                Err(ApiError::BadRequest(format!(
                    "Range operators are not supported on {}",
                    field.name
                )))
            }
            Some(Operator::Compare(comparison)) => Scalar::parse(field.kind, raw)
                .map(|value| Self::Cmp(comparison, value))
                .ok_or_else(invalid),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: &'static Field,
    pub condition: Condition,
}

impl Predicate {
    fn push_sql(&self, query: &mut QueryBuilder<'_, Postgres>) {
        let column = self.field.column;
        let is_array = self.field.kind == FieldKind::TextArray;

        match &self.condition {
            Condition::Eq(value) if is_array => {
                value.push_bind(query);
                query.push(" = ANY(").push(column).push(")");
            }
            Condition::Eq(value) => {
                query.push(column).push(" = ");
                value.push_bind(query);
            }
            Condition::Cmp(comparison, value) => {
                query.push(column).push(comparison.sql());
                value.push_bind(query);
            }
            Condition::In(values) if is_array => {
                query.push(column).push(" && ");
                values.push_bind(query);
            }
            Condition::In(values) => {
                query.push(column).push(" = ANY(");
                values.push_bind(query);
                query.push(")");
            }
        }
    }
}

/// Conjunction of typed predicates over allowlisted fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterExpression {
    pub predicates: Vec<Predicate>,
}

impl FilterExpression {
    pub fn from_request<R: Listable>(request: &ListingRequest) -> Result<Self, ApiError> {
        let predicates = request
            .filters()
            .map(|(key, raw)| {
                let captures = filter_key()
                    .captures(key)
                    .ok_or_else(|| ApiError::BadRequest(format!("Invalid filter {}", key)))?;

                let name = &captures["field"];
                let field = R::field(name)
                    .ok_or_else(|| ApiError::BadRequest(format!("Unknown field {}", name)))?;

                let operator = match captures.name("token") {
                    Some(token) => Some(Operator::from_token(token.as_str()).ok_or_else(|| {
                        ApiError::BadRequest(format!("Unknown operator {}", token.as_str()))
                    })?),
                    None => None,
                };

                Ok(Predicate {
                    field,
                    condition: Condition::parse(field, operator, raw)?,
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        Ok(Self { predicates })
    }

    pub fn push_where(&self, query: &mut QueryBuilder<'_, Postgres>) {
        for (index, predicate) in self.predicates.iter().enumerate() {
            query.push(if index == 0 { " WHERE " } else { " AND " });
            predicate.push_sql(query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::query::fixtures::Widget;

    fn request(params: &[(&str, &str)]) -> ListingRequest {
        ListingRequest::new(
            params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    fn translate(params: &[(&str, &str)]) -> Result<FilterExpression, ApiError> {
        FilterExpression::from_request::<Widget>(&request(params))
    }

    fn conditions(expression: &FilterExpression) -> Vec<(&str, Condition)> {
        expression
            .predicates
            .iter()
            .map(|predicate| (predicate.field.name, predicate.condition.clone()))
            .collect()
    }

    #[test]
    fn no_filters_matches_everything() {
        let expression = translate(&[("select", "name"), ("page", "2")]).unwrap();
        assert!(expression.predicates.is_empty());

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM widgets");
        expression.push_where(&mut query);
        assert_eq!(query.sql(), "SELECT * FROM widgets");
    }

    #[test]
    fn control_keys_never_become_predicates() {
        let expression = translate(&[
            ("select", "name"),
            ("sort", "cost"),
            ("page", "1"),
            ("limit", "10"),
            ("active", "true"),
        ])
        .unwrap();

        assert_eq!(
            conditions(&expression),
            vec![("active", Condition::Eq(Scalar::Boolean(true)))]
        );
    }

    #[test]
    fn tokens_map_to_comparisons_or_membership() {
        assert_eq!(
            Operator::from_token("gte"),
            Some(Operator::Compare(Comparison::Gte))
        );
        assert_eq!(Operator::from_token("lt"), Some(Operator::Compare(Comparison::Lt)));
        assert_eq!(Operator::from_token("in"), Some(Operator::In));
        assert_eq!(Operator::from_token("ne"), None);
        assert_eq!(Operator::from_token("inx"), None);
    }

    #[test]
    fn bracket_operator_becomes_comparison() {
        let expression = translate(&[("cost[gt]", "1000")]).unwrap();
        assert_eq!(
            conditions(&expression),
            vec![("cost", Condition::Cmp(Comparison::Gt, Scalar::Float(1000.0)))]
        );
    }

    #[test]
    fn operator_words_inside_field_names_are_left_alone() {
        let expression = translate(&[("rating", "7"), ("name", "in")]).unwrap();
        assert_eq!(
            conditions(&expression),
            vec![
                ("rating", Condition::Eq(Scalar::Integer(7))),
                ("name", Condition::Eq(Scalar::Text(String::from("in")))),
            ]
        );
    }

    #[test]
    fn in_splits_on_commas() {
        let expression = translate(&[("stock[in]", "1, 2,3")]).unwrap();
        assert_eq!(
            conditions(&expression),
            vec![("stock", Condition::In(List::Integer(vec![1, 2, 3])))]
        );
    }

    #[test]
    fn range_on_both_ends() {
        let expression = translate(&[
            ("created_at[gte]", "2024-01-01"),
            ("created_at[lt]", "2024-02-01T00:00:00Z"),
        ])
        .unwrap();

        assert_eq!(expression.predicates.len(), 2);
        assert!(matches!(
            expression.predicates[0].condition,
            Condition::Cmp(Comparison::Gte, Scalar::Timestamp(_))
        ));
    }

    #[test]
    fn nested_names_map_to_their_column() {
        let expression = translate(&[("location.city", "Boston")]).unwrap();
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM widgets");
        expression.push_where(&mut query);

        assert_eq!(query.sql(), "SELECT * FROM widgets WHERE city = $1");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            translate(&[("password", "x")]),
            Err(ApiError::BadRequest(message)) if message == "Unknown field password"
        ));
    }

    #[test]
    fn unknown_operators_are_rejected() {
        assert!(matches!(
            translate(&[("cost[ne]", "1")]),
            Err(ApiError::BadRequest(message)) if message == "Unknown operator ne"
        ));
        assert!(matches!(
            translate(&[("cost[gtx]", "1")]),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn malformed_keys_are_rejected() {
        assert!(matches!(
            translate(&[("cost[gt][lt]", "1")]),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            translate(&[("cost;drop table", "1")]),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn values_must_match_the_field_kind() {
        assert!(translate(&[("stock[gte]", "many")]).is_err());
        assert!(translate(&[("active", "yes")]).is_err());
        assert!(translate(&[("cost", "NaN")]).is_err());
        assert!(translate(&[("stock[in]", "1,two")]).is_err());
    }

    #[test]
    fn range_operators_are_not_allowed_on_arrays() {
        assert!(translate(&[("tags[gt]", "a")]).is_err());
    }

    #[test]
    fn renders_parameterized_sql() {
        let expression = translate(&[
            ("cost[lte]", "10000"),
            ("tags[in]", "Business,UI/UX"),
            ("tags", "Other"),
            ("name[in]", "a,b"),
        ])
        .unwrap();

        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM widgets");
        expression.push_where(&mut query);

        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM widgets WHERE cost <= $1 AND tags && $2 AND $3 = ANY(tags) AND name = ANY($4)"
        );
    }
}
