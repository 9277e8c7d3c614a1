//! Student routes under /students.
//! Static segments (all, name, honors) take priority over the `:id` capture.

use crate::handlers::students::{
    add_new_student, delete_student_by_id, get_all_students, get_honors_students, get_one_student,
    get_students_by_major, get_students_by_name, update_student,
};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/students/all", get(get_all_students))
        .route("/students/name", get(get_students_by_name))
        .route("/students/honors", get(get_honors_students))
        .route("/students/major/:major", get(get_students_by_major))
        .route("/students/new", post(add_new_student))
        .route("/students/update/:id", put(update_student))
        .route("/students/delete/:id", delete(delete_student_by_id))
        .route("/students/:id", get(get_one_student))
        .with_state(state)
}
