//! Reminder query representation.
//!
//! A [`ReminderQuery`] is a plain value describing a filtered selection: base
//! table, joins, conjunctive filters and named parameters. Filters refer to
//! parameters by name; values are only bound when the query is rendered into a
//! sea-query [`SelectStatement`], so rendering is always parameterized.

use std::collections::BTreeMap;
use std::fmt;

use sea_orm::sea_query::{
    Alias, Condition, Expr, IntoColumnRef, JoinType, Query, SelectStatement, SimpleExpr,
    Value as SqlValue,
};
use sea_orm::{DbBackend, Statement};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ReminderError, Result};

/// Named query parameters.
pub type Params = BTreeMap<String, Value>;

/// Column reference, optionally qualified by a table alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Field {
    pub table: Option<String>,
    pub column: String,
}

impl Field {
    pub fn new(table: &str, column: &str) -> Self {
        Self {
            table: Some(table.to_string()),
            column: column.to_string(),
        }
    }

    /// Unqualified column.
    pub fn bare(column: &str) -> Self {
        Self {
            table: None,
            column: column.to_string(),
        }
    }

    fn column_ref(&self) -> sea_orm::sea_query::ColumnRef {
        match &self.table {
            Some(table) => {
                (Alias::new(table.as_str()), Alias::new(self.column.as_str())).into_column_ref()
            }
            None => Alias::new(self.column.as_str()).into_column_ref(),
        }
    }

    fn expr(&self) -> Expr {
        Expr::col(self.column_ref())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{table}.{}", self.column),
            None => f.write_str(&self.column),
        }
    }
}

/// Predicate tree. Leaves compare fields with each other or with named params.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Filter {
    IsNull(Field),
    IsNotNull(Field),
    /// `field IS NULL OR field = false`.
    Falsy(Field),
    /// `field IN (:param)`; the param holds a list.
    InParam(Field, String),
    /// `field = :param`.
    EqParam(Field, String),
    /// `left = right`.
    EqField(Field, Field),
    All(Vec<Filter>),
    Any(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::All(filters.into_iter().collect())
    }

    pub fn any(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Any(filters.into_iter().collect())
    }

    pub fn negate(filter: Filter) -> Self {
        Filter::Not(Box::new(filter))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JoinKind {
    Inner,
    Left,
}

impl From<JoinKind> for JoinType {
    fn from(kind: JoinKind) -> Self {
        match kind {
            JoinKind::Inner => JoinType::InnerJoin,
            JoinKind::Left => JoinType::LeftJoin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,
    pub alias: String,
    pub on: Filter,
}

impl Join {
    pub fn left(table: &str, alias: &str, on: Filter) -> Self {
        Self {
            kind: JoinKind::Left,
            table: table.to_string(),
            alias: alias.to_string(),
            on,
        }
    }
}

/// Joins, filters and params without a base table; merged into a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryFragment {
    joins: Vec<Join>,
    filters: Vec<Filter>,
    params: Params,
}

impl QueryFragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a join. A join with the same alias replaces the earlier one in place.
    pub fn join(mut self, join: Join) -> Self {
        match self.joins.iter_mut().find(|j| j.alias == join.alias) {
            Some(existing) => *existing = join,
            None => self.joins.push(join),
        }
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn params(mut self, params: &Params) -> Self {
        self.params
            .extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Append `other`'s joins and filters; its params override on name clash.
    pub fn merge(mut self, other: QueryFragment) -> Self {
        for join in other.joins {
            self = self.join(join);
        }
        self.filters.extend(other.filters);
        self.params.extend(other.params);
        self
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn get_params(&self) -> &Params {
        &self.params
    }
}

/// Filtered selection over an entity table, plus the metadata the reminder
/// scheduler needs to read recipients out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderQuery {
    table: String,
    alias: String,
    body: QueryFragment,
    contact_id_field: Field,
    entity_id_field: Field,
    date_field: Option<Field>,
    use_reference_date: bool,
}

impl ReminderQuery {
    /// Select from `table AS alias`, with recipients read from
    /// `alias.contact_id` and entities identified by `alias.id`.
    pub fn from(table: &str, alias: &str) -> Self {
        Self {
            table: table.to_string(),
            alias: alias.to_string(),
            body: QueryFragment::new(),
            contact_id_field: Field::new(alias, "contact_id"),
            entity_id_field: Field::new(alias, "id"),
            date_field: None,
            use_reference_date: false,
        }
    }

    pub fn join(mut self, join: Join) -> Self {
        self.body = self.body.join(join);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.body = self.body.filter(filter);
        self
    }

    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.body = self.body.param(name, value);
        self
    }

    pub fn params(mut self, params: &Params) -> Self {
        self.body = self.body.params(params);
        self
    }

    pub fn merge(mut self, fragment: QueryFragment) -> Self {
        self.body = self.body.merge(fragment);
        self
    }

    pub fn with_date_field(mut self, field: Option<Field>) -> Self {
        self.date_field = field;
        self
    }

    pub fn with_reference_date(mut self, use_reference_date: bool) -> Self {
        self.use_reference_date = use_reference_date;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn joins(&self) -> &[Join] {
        self.body.joins()
    }

    pub fn filters(&self) -> &[Filter] {
        self.body.filters()
    }

    pub fn get_params(&self) -> &Params {
        self.body.get_params()
    }

    pub fn get_param(&self, name: &str) -> Option<&Value> {
        self.body.get_params().get(name)
    }

    pub fn contact_id_field(&self) -> &Field {
        &self.contact_id_field
    }

    pub fn entity_id_field(&self) -> &Field {
        &self.entity_id_field
    }

    pub fn date_field(&self) -> Option<&Field> {
        self.date_field.as_ref()
    }

    pub fn use_reference_date(&self) -> bool {
        self.use_reference_date
    }

    /// Render `FROM`, joins and `WHERE`. No columns are selected.
    pub fn to_select(&self) -> Result<SelectStatement> {
        let mut select = Query::select();
        select.from_as(Alias::new(self.table.as_str()), Alias::new(self.alias.as_str()));

        for join in self.body.joins() {
            select.join_as(
                join.kind.into(),
                Alias::new(join.table.as_str()),
                Alias::new(join.alias.as_str()),
                self.condition(&join.on)?,
            );
        }

        let mut where_ = Condition::all();
        for filter in self.body.filters() {
            where_ = where_.add(self.condition(filter)?);
        }
        select.cond_where(where_);

        Ok(select)
    }

    /// Render the recipient selection: `entity_id`, `contact_id` and, when the
    /// query has a date field, `trigger_date`.
    ///
    /// Rows are distinct, so one-to-many joins yield each entity once.
    pub fn recipient_select(&self) -> Result<SelectStatement> {
        let mut select = self.to_select()?;
        select
            .distinct()
            .expr_as(self.entity_id_field.expr(), Alias::new("entity_id"))
            .expr_as(self.contact_id_field.expr(), Alias::new("contact_id"));
        if let Some(date_field) = &self.date_field {
            select.expr_as(date_field.expr(), Alias::new("trigger_date"));
        }
        Ok(select)
    }

    pub fn build(&self, backend: DbBackend) -> Result<Statement> {
        Ok(backend.build(&self.recipient_select()?))
    }

    fn condition(&self, filter: &Filter) -> Result<Condition> {
        let leaf = |expr: SimpleExpr| Condition::all().add(expr);

        let cond = match filter {
            Filter::IsNull(field) => leaf(field.expr().is_null()),
            Filter::IsNotNull(field) => leaf(field.expr().is_not_null()),
            Filter::Falsy(field) => Condition::any()
                .add(field.expr().is_null())
                .add(field.expr().eq(false)),
            Filter::InParam(field, name) => leaf(field.expr().is_in(self.list_param(name)?)),
            Filter::EqParam(field, name) => leaf(field.expr().eq(self.scalar_param(name)?)),
            Filter::EqField(left, right) => leaf(left.expr().equals(right.column_ref())),
            Filter::All(filters) => {
                let mut cond = Condition::all();
                for f in filters {
                    cond = cond.add(self.condition(f)?);
                }
                cond
            }
            Filter::Any(filters) => {
                let mut cond = Condition::any();
                for f in filters {
                    cond = cond.add(self.condition(f)?);
                }
                cond
            }
            Filter::Not(inner) => self.condition(inner)?.not(),
        };
        Ok(cond)
    }

    fn bound(&self, name: &str) -> Result<&Value> {
        self.get_param(name)
            .ok_or_else(|| ReminderError::UnboundParam(name.to_string()))
    }

    fn scalar_param(&self, name: &str) -> Result<SqlValue> {
        sql_value(name, self.bound(name)?)
    }

    fn list_param(&self, name: &str) -> Result<Vec<SqlValue>> {
        match self.bound(name)? {
            Value::Array(items) => items.iter().map(|v| sql_value(name, v)).collect(),
            scalar => Ok(vec![sql_value(name, scalar)?]),
        }
    }
}

fn sql_value(name: &str, value: &Value) -> Result<SqlValue> {
    let unsupported = || ReminderError::UnsupportedParam {
        name: name.to_string(),
        value: value.clone(),
    };

    match value {
        Value::Null => Ok(SqlValue::BigInt(None)),
        Value::Bool(b) => Ok((*b).into()),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(i.into()),
            (None, Some(f)) => Ok(f.into()),
            (None, None) => Err(unsupported()),
        },
        Value::String(s) => Ok(s.clone().into()),
        Value::Array(_) | Value::Object(_) => Err(unsupported()),
    }
}
