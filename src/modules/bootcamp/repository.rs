use crate::utils::{
    database,
    geocoder::GeoLocation,
    query::{Field, FieldKind, Listable},
};
use chrono::{DateTime, Utc};
use serde::{ser::SerializeStruct, Serialize, Serializer};
use sqlx::PgExecutor;

pub const EARTH_RADIUS_KM: f64 = 6378.0;

#[derive(sqlx::FromRow, Clone, Debug, Default, PartialEq)]
pub struct Location {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub formatted_address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

/// GeoJSON-style point, `coordinates` is `[longitude, latitude]`.
impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let coordinates = match (self.longitude, self.latitude) {
            (Some(longitude), Some(latitude)) => vec![longitude, latitude],
            _ => vec![],
        };

        let mut location = serializer.serialize_struct("Location", 8)?;
        location.serialize_field("type", "Point")?;
        location.serialize_field("coordinates", &coordinates)?;
        location.serialize_field("formatted_address", &self.formatted_address)?;
        location.serialize_field("street", &self.street)?;
        location.serialize_field("city", &self.city)?;
        location.serialize_field("state", &self.state)?;
        location.serialize_field("zipcode", &self.zipcode)?;
        location.serialize_field("country", &self.country)?;
        location.end()
    }
}

#[derive(sqlx::FromRow, Serialize, Clone, Debug)]
pub struct Bootcamp {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: String,
    #[sqlx(flatten)]
    pub location: Location,
    pub careers: Vec<String>,
    pub average_rating: Option<f64>,
    pub average_cost: Option<f64>,
    pub photo: String,
    pub housing: bool,
    pub job_assistance: bool,
    pub job_guarantee: bool,
    pub accept_gi: bool,
    pub created_at: DateTime<Utc>,
}

impl Listable for Bootcamp {
    const TABLE: &'static str = "bootcamps";
    const FIELDS: &'static [Field] = &[
        Field::new("id", "id", FieldKind::Text),
        Field::new("name", "name", FieldKind::Text),
        Field::new("slug", "slug", FieldKind::Text),
        Field::new("description", "description", FieldKind::Text),
        Field::new("website", "website", FieldKind::Text),
        Field::new("phone", "phone", FieldKind::Text),
        Field::new("email", "email", FieldKind::Text),
        Field::new("address", "address", FieldKind::Text),
        Field::new("location.city", "city", FieldKind::Text),
        Field::new("location.state", "state", FieldKind::Text),
        Field::new("location.zipcode", "zipcode", FieldKind::Text),
        Field::new("location.country", "country", FieldKind::Text),
        Field::new("careers", "careers", FieldKind::TextArray),
        Field::new("average_rating", "average_rating", FieldKind::Float),
        Field::new("average_cost", "average_cost", FieldKind::Float),
        Field::new("photo", "photo", FieldKind::Text),
        Field::new("housing", "housing", FieldKind::Boolean),
        Field::new("job_assistance", "job_assistance", FieldKind::Boolean),
        Field::new("job_guarantee", "job_guarantee", FieldKind::Boolean),
        Field::new("accept_gi", "accept_gi", FieldKind::Boolean),
        Field::new("created_at", "created_at", FieldKind::Timestamp),
    ];
}

/// Lowercase alphanumeric words joined by `-`.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Distance along the surface converted to the central angle, in radians.
pub fn angular_radius(distance_km: f64) -> f64 {
    distance_km / EARTH_RADIUS_KM
}

pub struct CreateBootcampPayload {
    pub name: String,
    pub description: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: String,
    pub location: GeoLocation,
    pub careers: Vec<String>,
    pub average_rating: Option<f64>,
    pub housing: bool,
    pub job_assistance: bool,
    pub job_guarantee: bool,
    pub accept_gi: bool,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateBootcampPayload,
) -> Result<Bootcamp, sqlx::Error> {
    sqlx::query_as::<_, Bootcamp>(
        "
        INSERT INTO bootcamps (
            id, name, slug, description, website, phone, email, address,
            latitude, longitude, formatted_address, street, city, state, zipcode, country,
            careers, average_rating, housing, job_assistance, job_guarantee, accept_gi
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8,
            $9, $10, $11, $12, $13, $14, $15, $16,
            $17, $18, $19, $20, $21, $22
        )
        RETURNING *
        ",
    )
    .bind(database::new_id())
    .bind(&payload.name)
    .bind(slugify(&payload.name))
    .bind(payload.description)
    .bind(payload.website)
    .bind(payload.phone)
    .bind(payload.email)
    .bind(payload.address)
    .bind(payload.location.latitude)
    .bind(payload.location.longitude)
    .bind(payload.location.formatted_address)
    .bind(payload.location.street)
    .bind(payload.location.city)
    .bind(payload.location.state)
    .bind(payload.location.zipcode)
    .bind(payload.location.country)
    .bind(payload.careers)
    .bind(payload.average_rating)
    .bind(payload.housing)
    .bind(payload.job_assistance)
    .bind(payload.job_guarantee)
    .bind(payload.accept_gi)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a bootcamp: {}", err);
        err
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: &str,
) -> Result<Option<Bootcamp>, sqlx::Error> {
    sqlx::query_as::<_, Bootcamp>("SELECT * FROM bootcamps WHERE id = $1")
        .bind(id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching bootcamp with id {}: {}", id, err);
            err
        })
}

/// `None` leaves a column alone. For the nullable columns `Some(None)` clears
/// it.
#[derive(Default)]
pub struct UpdateBootcampPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub address: Option<String>,
    pub location: Option<GeoLocation>,
    pub careers: Option<Vec<String>>,
    pub average_rating: Option<Option<f64>>,
    pub housing: Option<bool>,
    pub job_assistance: Option<bool>,
    pub job_guarantee: Option<bool>,
    pub accept_gi: Option<bool>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: &str,
    payload: UpdateBootcampPayload,
) -> Result<Option<Bootcamp>, sqlx::Error> {
    let slug = payload.name.as_deref().map(slugify);
    let relocated = payload.location.is_some();
    let location = payload.location.unwrap_or(GeoLocation {
        latitude: 0.0,
        longitude: 0.0,
        formatted_address: String::new(),
        street: None,
        city: None,
        state: None,
        zipcode: None,
        country: None,
    });

    sqlx::query_as::<_, Bootcamp>(
        "
        UPDATE bootcamps SET
            name = COALESCE($1, name),
            slug = COALESCE($2, slug),
            description = COALESCE($3, description),
            website = CASE WHEN $4 THEN $5 ELSE website END,
            phone = CASE WHEN $6 THEN $7 ELSE phone END,
            email = CASE WHEN $8 THEN $9 ELSE email END,
            address = COALESCE($10, address),
            latitude = CASE WHEN $11 THEN $12 ELSE latitude END,
            longitude = CASE WHEN $11 THEN $13 ELSE longitude END,
            formatted_address = CASE WHEN $11 THEN $14 ELSE formatted_address END,
            street = CASE WHEN $11 THEN $15 ELSE street END,
            city = CASE WHEN $11 THEN $16 ELSE city END,
            state = CASE WHEN $11 THEN $17 ELSE state END,
            zipcode = CASE WHEN $11 THEN $18 ELSE zipcode END,
            country = CASE WHEN $11 THEN $19 ELSE country END,
            careers = COALESCE($20, careers),
            average_rating = CASE WHEN $21 THEN $22 ELSE average_rating END,
            housing = COALESCE($23, housing),
            job_assistance = COALESCE($24, job_assistance),
            job_guarantee = COALESCE($25, job_guarantee),
            accept_gi = COALESCE($26, accept_gi)
        WHERE
            id = $27
        RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(slug)
    .bind(payload.description)
    .bind(payload.website.is_some())
    .bind(payload.website.flatten())
    .bind(payload.phone.is_some())
    .bind(payload.phone.flatten())
    .bind(payload.email.is_some())
    .bind(payload.email.flatten())
    .bind(payload.address)
    .bind(relocated)
    .bind(location.latitude)
    .bind(location.longitude)
    .bind(location.formatted_address)
    .bind(location.street)
    .bind(location.city)
    .bind(location.state)
    .bind(location.zipcode)
    .bind(location.country)
    .bind(payload.careers)
    .bind(payload.average_rating.is_some())
    .bind(payload.average_rating.flatten())
    .bind(payload.housing)
    .bind(payload.job_assistance)
    .bind(payload.job_guarantee)
    .bind(payload.accept_gi)
    .bind(id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update a bootcamp by id {}: {}",
            id,
            err
        );
        err
    })
}

pub async fn update_photo<'e, E: PgExecutor<'e>>(
    e: E,
    id: &str,
    photo: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE bootcamps SET photo = $1 WHERE id = $2")
        .bind(photo)
        .bind(id)
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Error occurred while updating photo of bootcamp {}: {}", id, err);
            err
        })
}

/// Rounds the mean course tuition up to the next ten, or clears it when the
/// bootcamp has no courses left.
pub async fn update_average_cost<'e, E: PgExecutor<'e>>(
    e: E,
    id: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "
        UPDATE bootcamps SET
            average_cost = (
                SELECT CEIL(AVG(tuition) / 10.0) * 10
                FROM courses
                WHERE bootcamp_id = $1
            )::DOUBLE PRECISION
        WHERE
            id = $1
        ",
    )
    .bind(id)
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!(
            "Error occurred while recomputing average cost of bootcamp {}: {}",
            id,
            err
        );
        err
    })
}

/// Bootcamps whose location lies within `radius` radians of the point.
pub async fn find_within_radius<'e, E: PgExecutor<'e>>(
    e: E,
    latitude: f64,
    longitude: f64,
    radius: f64,
) -> Result<Vec<Bootcamp>, sqlx::Error> {
    sqlx::query_as::<_, Bootcamp>(
        "
        SELECT *
        FROM bootcamps
        WHERE
            latitude IS NOT NULL
            AND longitude IS NOT NULL
            AND ACOS(LEAST(1.0, GREATEST(-1.0,
                SIN(RADIANS($1)) * SIN(RADIANS(latitude))
                + COS(RADIANS($1)) * COS(RADIANS(latitude)) * COS(RADIANS(longitude) - RADIANS($2))
            ))) <= $3
        ORDER BY created_at DESC, id DESC
        ",
    )
    .bind(latitude)
    .bind(longitude)
    .bind(radius)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while searching bootcamps by radius: {}", err);
        err
    })
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: &str,
) -> Result<Option<Bootcamp>, sqlx::Error> {
    sqlx::query_as::<_, Bootcamp>("DELETE FROM bootcamps WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to delete a bootcamp by id {}: {}",
                id,
                err
            );
            err
        })
}
