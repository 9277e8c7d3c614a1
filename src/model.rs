//! Student record and request payloads.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the `students` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub major: Option<String>,
    pub gpa: f64,
}

/// Body of create and update requests. Fields outside `name`, `major`, `gpa`
/// (including `id` and `studentId`) are ignored.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct StudentPayload {
    pub name: Option<String>,
    pub major: Option<String>,
    pub gpa: Option<f64>,
}

/// Validated field set written by insert and update.
#[derive(Clone, Debug, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub major: Option<String>,
    pub gpa: f64,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, major: Option<&str>, gpa: f64) -> Self {
        NewStudent {
            name: name.into(),
            major: major.map(str::to_string),
            gpa,
        }
    }

    pub fn with_id(self, id: i32) -> Student {
        Student {
            id,
            name: self.name,
            major: self.major,
            gpa: self.gpa,
        }
    }
}

impl TryFrom<StudentPayload> for NewStudent {
    type Error = AppError;

    fn try_from(p: StudentPayload) -> Result<Self, Self::Error> {
        let name = p.name.ok_or_else(|| AppError::Validation("name is required".into()))?;
        Ok(NewStudent {
            name,
            major: p.major,
            gpa: p.gpa.unwrap_or(0.0),
        })
    }
}
