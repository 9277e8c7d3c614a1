//! StudentService: the layer between HTTP handlers and the store.

mod students;
pub use students::StudentService;
