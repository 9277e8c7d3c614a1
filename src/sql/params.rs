//! Typed parameter values carried by a `QueryBuf` and bound onto sqlx queries.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

/// A value that can be bound to a PostgreSQL query in the position it was pushed.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Int(i32),
    Float(f64),
    Text(String),
    NullableText(Option<String>),
}

impl BindValue {
    pub fn bind_to<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            BindValue::Int(n) => query.bind(n),
            BindValue::Float(f) => query.bind(f),
            BindValue::Text(s) => query.bind(s),
            BindValue::NullableText(s) => query.bind(s),
        }
    }
}
