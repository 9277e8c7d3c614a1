//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the students table.

use crate::model::NewStudent;
use crate::sql::params::BindValue;

/// Columns returned by every statement, in `Student` field order.
const COLUMNS: &[&str] = &["id", "name", "major", "gpa"];
const PK: &str = "id";

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn select_column_list() -> String {
    COLUMNS.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

/// Escape LIKE metacharacters so the input matches literally.
pub fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Schema-qualified table the statements run against.
#[derive(Clone, Debug)]
pub struct TableRef {
    pub schema: String,
    pub table: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        TableRef {
            schema: schema.into(),
            table: table.into(),
        }
    }

    pub fn qualified(&self) -> String {
        format!("{}.{}", quoted(&self.schema), quoted(&self.table))
    }
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// SELECT every row ordered by pk.
pub fn select_all(table: &TableRef) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(),
        table.qualified(),
        quoted(PK)
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(table: &TableRef, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(),
        table.qualified(),
        quoted(PK),
        n
    );
    q
}

/// SELECT rows whose major equals the value exactly.
pub fn select_by_major(table: &TableRef, major: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Text(major.to_string()));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${} ORDER BY {}",
        select_column_list(),
        table.qualified(),
        quoted("major"),
        n,
        quoted(PK)
    );
    q
}

/// SELECT rows whose name contains the substring. The pattern is built in SQL
/// from the escaped parameter so the value itself is never spliced into the text.
pub fn select_by_name(table: &TableRef, substring: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Text(escape_like(substring)));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} LIKE '%' || ${} || '%' ESCAPE '\\' ORDER BY {}",
        select_column_list(),
        table.qualified(),
        quoted("name"),
        n,
        quoted(PK)
    );
    q
}

/// SELECT rows with gpa at or above the threshold.
pub fn select_by_min_gpa(table: &TableRef, threshold: f64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Float(threshold));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} >= ${} ORDER BY {}",
        select_column_list(),
        table.qualified(),
        quoted("gpa"),
        n,
        quoted(PK)
    );
    q
}

/// INSERT without the pk; the database assigns it.
pub fn insert(table: &TableRef, student: &NewStudent) -> QueryBuf {
    let mut q = QueryBuf::new();
    let name = q.push_param(BindValue::Text(student.name.clone()));
    let major = q.push_param(BindValue::NullableText(student.major.clone()));
    let gpa = q.push_param(BindValue::Float(student.gpa));
    q.sql = format!(
        "INSERT INTO {} ({}, {}, {}) VALUES (${}, ${}, ${}) RETURNING {}",
        table.qualified(),
        quoted("name"),
        quoted("major"),
        quoted("gpa"),
        name,
        major,
        gpa,
        select_column_list()
    );
    q
}

/// UPDATE by id: replaces every mutable column.
pub fn update(table: &TableRef, id: i32, student: &NewStudent) -> QueryBuf {
    let mut q = QueryBuf::new();
    let name = q.push_param(BindValue::Text(student.name.clone()));
    let major = q.push_param(BindValue::NullableText(student.major.clone()));
    let gpa = q.push_param(BindValue::Float(student.gpa));
    let id_param = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} = ${}, {} = ${}, {} = ${} WHERE {} = ${} RETURNING {}",
        table.qualified(),
        quoted("name"),
        name,
        quoted("major"),
        major,
        quoted("gpa"),
        gpa,
        quoted(PK),
        id_param,
        select_column_list()
    );
    q
}

/// DELETE by id, returning the removed row so absence is detectable.
pub fn delete(table: &TableRef, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(BindValue::Int(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} RETURNING {}",
        table.qualified(),
        quoted(PK),
        n,
        select_column_list()
    );
    q
}

/// DDL for the schema holding the table.
pub fn create_schema(table: &TableRef) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&table.schema))
}

/// DDL for the students table.
pub fn create_table(table: &TableRef) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            "id" SERIAL PRIMARY KEY,
            "name" TEXT NOT NULL,
            "major" TEXT,
            "gpa" DOUBLE PRECISION NOT NULL DEFAULT 0
        )
        "#,
        table.qualified()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn students() -> TableRef {
        TableRef::new("public", "students")
    }

    #[test]
    fn select_by_id_binds_the_id() {
        let q = select_by_id(&students(), 4);
        assert_eq!(
            q.sql,
            r#"SELECT "id", "name", "major", "gpa" FROM "public"."students" WHERE "id" = $1"#
        );
        assert_eq!(q.params, vec![BindValue::Int(4)]);
    }

    #[test]
    fn name_search_keeps_value_out_of_sql() {
        let q = select_by_name(&students(), "al'; drop table x; --");
        assert!(!q.sql.contains("drop table"));
        assert!(q.sql.contains(r#""name" LIKE '%' || $1 || '%'"#));
        assert_eq!(q.params, vec![BindValue::Text("al'; drop table x; --".into())]);
    }

    #[test]
    fn escape_like_escapes_metacharacters() {
        assert_eq!(escape_like("50%_a\\b"), "50\\%\\_a\\\\b");
        assert_eq!(escape_like(""), "");
    }

    #[test]
    fn update_puts_id_last() {
        let s = NewStudent::new("sampleUpdated", Some("csc"), 3.92);
        let q = update(&students(), 2, &s);
        assert!(q.sql.starts_with(r#"UPDATE "public"."students" SET "name" = $1, "major" = $2, "gpa" = $3 WHERE "id" = $4"#));
        assert_eq!(q.params.last(), Some(&BindValue::Int(2)));
        assert_eq!(q.params.len(), 4);
    }

    #[test]
    fn insert_omits_pk_column() {
        let q = insert(&students(), &NewStudent::new("Alex", Some("csc"), 3.55));
        assert!(q.sql.starts_with(r#"INSERT INTO "public"."students" ("name", "major", "gpa") VALUES ($1, $2, $3)"#));
        assert_eq!(q.params[1], BindValue::NullableText(Some("csc".into())));
    }

    #[test]
    fn identifiers_are_quoted() {
        let t = TableRef::new("we\"ird", "students");
        assert_eq!(t.qualified(), r#""we""ird"."students""#);
    }
}
