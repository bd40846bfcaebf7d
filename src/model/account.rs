use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

/// One login account, student or teacher. The profile columns that only
/// apply to students (rollno, class) stay NULL on teacher rows.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "email": "arjun@student.edu",
        "type": "student",
        "name": "Arjun Mehta",
        "rollno": "21CS045",
        "class": "CSE-3A",
        "department": "CSE",
        "phone": "+919812345678"
    })
)]
pub struct Account {
    #[schema(example = "arjun@student.edu")]
    pub email: String,

    /// Stored credential, never serialized back out.
    #[serde(skip_serializing)]
    pub password: String,

    #[serde(rename = "type")]
    #[schema(example = "student")]
    pub account_type: String,

    #[schema(example = "Arjun Mehta")]
    pub name: String,

    #[schema(example = "21CS045")]
    pub rollno: Option<String>,

    #[schema(example = "CSE-3A")]
    pub class: Option<String>,

    #[schema(example = "CSE")]
    pub department: Option<String>,

    #[schema(example = "+919812345678")]
    pub phone: String,
}

impl Account {
    /// Every profile endpoint resolves the caller by email alone, the
    /// role column is not part of the lookup.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT email, password, account_type, name, rollno, class, department, phone
            FROM accounts
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(account)
    }

    pub async fn find_by_rollno(db: &SqlitePool, rollno: &str) -> anyhow::Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT email, password, account_type, name, rollno, class, department, phone
            FROM accounts
            WHERE rollno = ?
            "#,
        )
        .bind(rollno)
        .fetch_optional(db)
        .await?;

        Ok(account)
    }
}
