//! Student handlers: list, filter, read, create, update, delete.
//! Every response is JSON; list endpoints return bare arrays.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::model::{NewStudent, Student, StudentPayload};
use crate::response::{created, ok};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_HONORS_GPA: f64 = 3.0;

fn default_honors_gpa() -> f64 {
    DEFAULT_HONORS_GPA
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameSearch {
    /// Substring to look for in the name. Empty matches every student.
    #[serde(default)]
    pub search: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HonorsQuery {
    /// Minimum GPA, inclusive. Defaults to 3.0.
    #[serde(default = "default_honors_gpa")]
    pub gpa: f64,
}

#[utoipa::path(
    get,
    path = "/students/all",
    tag = "students",
    responses((status = 200, description = "Every student", body = [Student]))
)]
pub async fn get_all_students(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.get_all_students().await?))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 404, description = "No student with this id", body = ErrorBody)
    )
)]
pub async fn get_one_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.get_student_by_id(id).await?))
}

#[utoipa::path(
    get,
    path = "/students/name",
    tag = "students",
    params(NameSearch),
    responses((status = 200, description = "Students whose name contains the search key", body = [Student]))
)]
pub async fn get_students_by_name(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<NameSearch>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.get_students_by_name(&q.search).await?))
}

#[utoipa::path(
    get,
    path = "/students/major/{major}",
    tag = "students",
    params(("major" = String, Path, description = "Exact major")),
    responses((status = 200, description = "Students in the major", body = [Student]))
)]
pub async fn get_students_by_major(
    State(state): State<AppState>,
    ApiPath(major): ApiPath<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.get_students_by_major(&major).await?))
}

#[utoipa::path(
    get,
    path = "/students/honors",
    tag = "students",
    params(HonorsQuery),
    responses((status = 200, description = "Students at or above the GPA", body = [Student]))
)]
pub async fn get_honors_students(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<HonorsQuery>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.get_honors_students(q.gpa).await?))
}

/// Creates a student and answers with the full list.
#[utoipa::path(
    post,
    path = "/students/new",
    tag = "students",
    request_body = StudentPayload,
    responses(
        (status = 201, description = "Created; body is every student", body = [Student]),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 422, description = "Missing name", body = ErrorBody)
    )
)]
pub async fn add_new_student(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<StudentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let student = NewStudent::try_from(payload)?;
    let row = state.students.add_new_student(student).await?;
    tracing::info!(id = row.id, "student created");
    Ok(created(state.students.get_all_students().await?))
}

/// Replaces name, major and gpa. The path id wins over any id in the body.
#[utoipa::path(
    put,
    path = "/students/update/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    request_body = StudentPayload,
    responses(
        (status = 201, description = "The updated student", body = Student),
        (status = 404, description = "No student with this id", body = ErrorBody),
        (status = 422, description = "Missing name", body = ErrorBody)
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<StudentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let student = NewStudent::try_from(payload)?;
    state.students.update_student(id, student).await?;
    tracing::info!(id, "student updated");
    Ok(created(state.students.get_student_by_id(id).await?))
}

/// Deletes a student and answers with the remaining list.
#[utoipa::path(
    delete,
    path = "/students/delete/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Deleted; body is every remaining student", body = [Student]),
        (status = 404, description = "No student with this id", body = ErrorBody)
    )
)]
pub async fn delete_student_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.students.delete_student_by_id(id).await?;
    tracing::info!(id, "student deleted");
    Ok(ok(state.students.get_all_students().await?))
}
