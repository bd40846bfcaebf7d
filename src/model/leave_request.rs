use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

/// A student's leave application. `status` starts at "Pending" and is
/// overwritten by teacher/HOD decisions; the column is a free string so
/// the same field doubles as the queue selector for the teacher and HOD
/// views.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "7f0763ae-7b3e-4f2c-9f59-6a8b0f3f2a11",
        "name": "Arjun Mehta",
        "rollNumber": "21CS045",
        "class": "CSE-3A",
        "email": "arjun@student.edu",
        "leaveDescription": "Fever, advised rest for three days",
        "leaveDays": 3,
        "department": "CSE",
        "status": "Pending",
        "appliedDate": "2026-01-01T00:00:00Z"
    })
)]
pub struct LeaveRequest {
    #[schema(example = "7f0763ae-7b3e-4f2c-9f59-6a8b0f3f2a11")]
    pub id: String,

    #[schema(example = "Arjun Mehta")]
    pub name: String,

    #[serde(rename = "rollNumber")]
    #[schema(example = "21CS045")]
    pub roll_number: String,

    #[schema(example = "CSE-3A")]
    pub class: String,

    #[schema(example = "arjun@student.edu")]
    pub email: String,

    #[serde(rename = "leaveDescription")]
    #[schema(example = "Fever, advised rest for three days")]
    pub leave_description: String,

    #[serde(rename = "leaveDays")]
    #[schema(example = 3)]
    pub leave_days: i64,

    #[schema(example = "CSE")]
    pub department: String,

    #[schema(example = "Pending")]
    pub status: String,

    #[serde(rename = "appliedDate")]
    #[schema(example = "2026-01-01T00:00:00Z", value_type = String, format = DateTime)]
    pub applied_date: DateTime<Utc>,
}

/// Payload a student submits to open a leave request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplyLeave {
    #[schema(example = "Arjun Mehta")]
    pub name: String,
    #[serde(rename = "rollNumber")]
    #[schema(example = "21CS045")]
    pub roll_number: String,
    #[serde(rename = "studentClass")]
    #[schema(example = "CSE-3A")]
    pub student_class: String,
    #[serde(rename = "leaveDescription")]
    #[schema(example = "Fever, advised rest for three days")]
    pub leave_description: String,
    #[serde(rename = "leaveDays")]
    #[schema(example = 3)]
    pub leave_days: i64,
    #[schema(example = "arjun@student.edu")]
    pub email: String,
    #[schema(example = "CSE")]
    pub department: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TeacherAction {
    Accept,
    Reject,
    Forward,
}

impl TeacherAction {
    pub fn as_str(&self) -> &str {
        match self {
            TeacherAction::Accept => "accept",
            TeacherAction::Reject => "reject",
            TeacherAction::Forward => "forward",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HodAction {
    AcceptedByHod,
    RejectedByHod,
}

impl HodAction {
    pub fn as_str(&self) -> &str {
        match self {
            HodAction::AcceptedByHod => "acceptedbyhod",
            HodAction::RejectedByHod => "rejectedbyhod",
        }
    }
}

impl LeaveRequest {
    pub async fn insert(&self, db: &SqlitePool) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO leave_requests
                (id, name, roll_number, class, email, leave_description, leave_days, department, status, applied_date)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&self.id)
        .bind(&self.name)
        .bind(&self.roll_number)
        .bind(&self.class)
        .bind(&self.email)
        .bind(&self.leave_description)
        .bind(self.leave_days)
        .bind(&self.department)
        .bind(&self.status)
        .bind(self.applied_date)
        .execute(db)
        .await?;

        Ok(())
    }

    /// Overwrites the status unconditionally. Returns the number of rows
    /// touched so callers can turn 0 into a not-found.
    pub async fn set_status(db: &SqlitePool, id: &str, status: &str) -> anyhow::Result<u64> {
        let result = sqlx::query(r#"UPDATE leave_requests SET status = ? WHERE id = ?"#)
            .bind(status)
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_by_id(db: &SqlitePool, id: &str) -> anyhow::Result<Option<LeaveRequest>> {
        let request = sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT id, name, roll_number, class, email, leave_description, leave_days, department, status, applied_date
            FROM leave_requests
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(request)
    }

    pub async fn for_email_newest_first(
        db: &SqlitePool,
        email: &str,
    ) -> anyhow::Result<Vec<LeaveRequest>> {
        let requests = sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT id, name, roll_number, class, email, leave_description, leave_days, department, status, applied_date
            FROM leave_requests
            WHERE email = ?
            ORDER BY applied_date DESC
            "#,
        )
        .bind(email)
        .fetch_all(db)
        .await?;

        Ok(requests)
    }

    /// History view. Unlike [`Self::for_email_newest_first`] this carries
    /// no ordering clause, rows come back in whatever order SQLite picks.
    pub async fn for_email(db: &SqlitePool, email: &str) -> anyhow::Result<Vec<LeaveRequest>> {
        let requests = sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT id, name, roll_number, class, email, leave_description, leave_days, department, status, applied_date
            FROM leave_requests
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_all(db)
        .await?;

        Ok(requests)
    }

    pub async fn pending_in_class(
        db: &SqlitePool,
        class: &str,
    ) -> anyhow::Result<Vec<LeaveRequest>> {
        let requests = sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT id, name, roll_number, class, email, leave_description, leave_days, department, status, applied_date
            FROM leave_requests
            WHERE class = ? AND status = 'Pending'
            "#,
        )
        .bind(class)
        .fetch_all(db)
        .await?;

        Ok(requests)
    }

    pub async fn forwarded_to_hod(db: &SqlitePool) -> anyhow::Result<Vec<LeaveRequest>> {
        let requests = sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT id, name, roll_number, class, email, leave_description, leave_days, department, status, applied_date
            FROM leave_requests
            WHERE status = 'forward'
            "#,
        )
        .fetch_all(db)
        .await?;

        Ok(requests)
    }

    pub async fn hod_decided(db: &SqlitePool) -> anyhow::Result<Vec<LeaveRequest>> {
        let requests = sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT id, name, roll_number, class, email, leave_description, leave_days, department, status, applied_date
            FROM leave_requests
            WHERE status IN ('acceptedbyhod', 'rejectedbyhod')
            "#,
        )
        .fetch_all(db)
        .await?;

        Ok(requests)
    }
}
