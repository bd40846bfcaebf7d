use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::model::account::Account;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "arjun@student.edu")]
    pub email: String,
    #[schema(example = "secret")]
    pub password: String,
    /// Role the caller claims, must match the stored account type.
    #[serde(rename = "type")]
    #[schema(example = "student")]
    pub account_type: String,
}

#[derive(Deserialize, IntoParams)]
pub struct EmailQuery {
    /// Account email to look up
    pub email: String,
}

#[derive(Deserialize, IntoParams)]
pub struct RollNumberQuery {
    /// Student roll number to look up
    #[serde(rename = "rollNumber")]
    pub roll_number: String,
}

#[derive(Serialize, ToSchema)]
pub struct StudentProfile {
    #[schema(example = "Arjun Mehta")]
    pub name: String,
    #[schema(example = "21CS045")]
    pub rollno: Option<String>,
    #[schema(example = "CSE-3A")]
    pub class: Option<String>,
    #[schema(example = "arjun@student.edu")]
    pub email: String,
}

/// Login with plain (email, password, type) equality
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials match, returns the account record", body = Account),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "error": "Invalid credentials"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    pool: web::Data<SqlitePool>,
    payload: web::Json<LoginRequest>,
) -> impl Responder {
    let result = Account::find_by_email(pool.get_ref(), &payload.email).await;

    match result {
        Ok(Some(account))
            if account.password == payload.password
                && account.account_type == payload.account_type =>
        {
            HttpResponse::Ok().json(account)
        }
        Ok(_) => HttpResponse::Unauthorized().json(json!({
            "error": "Invalid credentials"
        })),
        Err(e) => {
            error!(error = %e, "Login failed");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error"
            }))
        }
    }
}

/// Profile subset shown on the student dashboard
#[utoipa::path(
    get,
    path = "/studentData",
    params(EmailQuery),
    responses(
        (status = 200, description = "Student found", body = StudentProfile),
        (status = 404, description = "Student not found", body = Object, example = json!({
            "error": "Student not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn student_data(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmailQuery>,
) -> impl Responder {
    match Account::find_by_email(pool.get_ref(), &query.email).await {
        Ok(Some(account)) => HttpResponse::Ok().json(StudentProfile {
            name: account.name,
            rollno: account.rollno,
            class: account.class,
            email: account.email,
        }),
        Ok(None) => HttpResponse::NotFound().json(json!({
            "error": "Student not found"
        })),
        Err(e) => {
            error!(error = %e, "Failed to fetch student data");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error"
            }))
        }
    }
}

/// Look up a student account by roll number
#[utoipa::path(
    get,
    path = "/searchStudent",
    params(RollNumberQuery),
    responses(
        (status = 200, description = "Student found", body = Account),
        (status = 404, description = "Student not found", body = Object, example = json!({
            "message": "Student not found."
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Server error."
        }))
    ),
    tag = "Students"
)]
pub async fn search_student(
    pool: web::Data<SqlitePool>,
    query: web::Query<RollNumberQuery>,
) -> impl Responder {
    match Account::find_by_rollno(pool.get_ref(), &query.roll_number).await {
        Ok(Some(account)) => HttpResponse::Ok().json(account),
        Ok(None) => HttpResponse::NotFound().json(json!({
            "message": "Student not found."
        })),
        Err(e) => {
            error!(error = %e, "Failed to search student");
            HttpResponse::InternalServerError().json(json!({
                "message": "Server error."
            }))
        }
    }
}

/// Fetch a teacher account by email
#[utoipa::path(
    get,
    path = "/teacherData",
    params(EmailQuery),
    responses(
        (status = 200, description = "Teacher found", body = Account),
        (status = 404, description = "Teacher not found", body = Object, example = json!({
            "error": "Teacher not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Teachers"
)]
pub async fn teacher_data(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmailQuery>,
) -> impl Responder {
    match Account::find_by_email(pool.get_ref(), &query.email).await {
        Ok(Some(account)) => HttpResponse::Ok().json(account),
        Ok(None) => HttpResponse::NotFound().json(json!({
            "error": "Teacher not found"
        })),
        Err(e) => {
            error!(error = %e, "Failed to fetch teacher data");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error"
            }))
        }
    }
}
