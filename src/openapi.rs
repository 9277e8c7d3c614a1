//! OpenAPI document for the student routes, served at /openapi.json.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::students;
use crate::model::{Student, StudentPayload};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Student Registry", description = "CRUD over student records"),
    paths(
        students::get_all_students,
        students::get_one_student,
        students::get_students_by_name,
        students::get_students_by_major,
        students::get_honors_students,
        students::add_new_student,
        students::update_student,
        students::delete_student_by_id,
    ),
    components(schemas(Student, StudentPayload, ErrorBody, ErrorDetail)),
    tags((name = "students", description = "Student records"))
)]
pub struct ApiDoc;
