use crate::utils::{
    database,
    query::{Expansion, Field, FieldKind, Listable},
    validation,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;
use validator::ValidationError;

/// Replaces the `bootcamp` id with `{id, name, description}`.
pub const BOOTCAMP_SUMMARY: Expansion = Expansion {
    path: "bootcamp",
    table: "bootcamps",
    fields: &["name", "description"],
};

pub const MINIMUM_SKILLS: [&str; 3] = ["beginner", "intermediate", "advanced"];

pub fn validate_minimum_skill(skill: &str) -> Result<(), ValidationError> {
    if MINIMUM_SKILLS.contains(&skill) {
        return Ok(());
    }

    Err(validation::error(
        "minimum_skill",
        "Minimum skill must be beginner, intermediate or advanced",
    ))
}

#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub weeks: i32,
    pub tuition: i32,
    pub minimum_skill: String,
    pub scholarship_available: bool,
    #[sqlx(rename = "bootcamp_id")]
    pub bootcamp: String,
    pub created_at: DateTime<Utc>,
}

impl Listable for Course {
    const TABLE: &'static str = "courses";
    const FIELDS: &'static [Field] = &[
        Field::new("id", "id", FieldKind::Text),
        Field::new("title", "title", FieldKind::Text),
        Field::new("description", "description", FieldKind::Text),
        Field::new("weeks", "weeks", FieldKind::Integer),
        Field::new("tuition", "tuition", FieldKind::Integer),
        Field::new("minimum_skill", "minimum_skill", FieldKind::Text),
        Field::new(
            "scholarship_available",
            "scholarship_available",
            FieldKind::Boolean,
        ),
        Field::new("bootcamp", "bootcamp_id", FieldKind::Text),
        Field::new("created_at", "created_at", FieldKind::Timestamp),
    ];
}

pub struct CreateCoursePayload {
    pub title: String,
    pub description: String,
    pub weeks: i32,
    pub tuition: i32,
    pub minimum_skill: String,
    pub scholarship_available: bool,
    pub bootcamp_id: String,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateCoursePayload,
) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "
        INSERT INTO courses (
            id, title, description, weeks, tuition, minimum_skill,
            scholarship_available, bootcamp_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        ",
    )
    .bind(database::new_id())
    .bind(payload.title)
    .bind(payload.description)
    .bind(payload.weeks)
    .bind(payload.tuition)
    .bind(payload.minimum_skill)
    .bind(payload.scholarship_available)
    .bind(payload.bootcamp_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a course: {}", err);
        err
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: &str,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
        .bind(id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching course with id {}: {}", id, err);
            err
        })
}

#[derive(Default)]
pub struct UpdateCoursePayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub weeks: Option<i32>,
    pub tuition: Option<i32>,
    pub minimum_skill: Option<String>,
    pub scholarship_available: Option<bool>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: &str,
    payload: UpdateCoursePayload,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "
        UPDATE courses SET
            title = COALESCE($1, title),
            description = COALESCE($2, description),
            weeks = COALESCE($3, weeks),
            tuition = COALESCE($4, tuition),
            minimum_skill = COALESCE($5, minimum_skill),
            scholarship_available = COALESCE($6, scholarship_available)
        WHERE
            id = $7
        RETURNING *
        ",
    )
    .bind(payload.title)
    .bind(payload.description)
    .bind(payload.weeks)
    .bind(payload.tuition)
    .bind(payload.minimum_skill)
    .bind(payload.scholarship_available)
    .bind(id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update a course by id {}: {}",
            id,
            err
        );
        err
    })
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: &str,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>("DELETE FROM courses WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to delete a course by id {}: {}",
                id,
                err
            );
            err
        })
}
