use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::model::account::Account;
use crate::model::leave_request::{ApplyLeave, HodAction, LeaveRequest, TeacherAction};
use crate::notify::Notifier;

/// The leave-request state machine. Requests start at "Pending"; teacher
/// and HOD decisions overwrite the status with the action verb, and every
/// successful transition queues an SMS to the student who owns the
/// request.
pub struct LeaveLifecycle;

impl LeaveLifecycle {
    /// Opens a request on behalf of the student behind `input.email`.
    /// Returns `None` without writing anything when no such account
    /// exists.
    pub async fn apply(
        db: &SqlitePool,
        notifier: &Notifier,
        input: ApplyLeave,
    ) -> anyhow::Result<Option<LeaveRequest>> {
        let student = match Account::find_by_email(db, &input.email).await? {
            Some(account) => account,
            None => return Ok(None),
        };

        let request = LeaveRequest {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            roll_number: input.roll_number,
            class: input.student_class,
            email: input.email,
            leave_description: input.leave_description,
            leave_days: input.leave_days,
            department: input.department,
            status: "Pending".to_string(),
            applied_date: Utc::now(),
        };
        request.insert(db).await?;

        notifier.queue(
            &student.phone,
            &format!(
                "Dear {}, your leave request has been submitted successfully.",
                request.name
            ),
        );

        Ok(Some(request))
    }

    /// Applies a teacher decision. The prior status is not consulted,
    /// whatever state the request is in gets overwritten. Returns `None`
    /// when no request matches the id, otherwise the updated record.
    pub async fn teacher_decision(
        db: &SqlitePool,
        notifier: &Notifier,
        request_id: &str,
        action: TeacherAction,
    ) -> anyhow::Result<Option<LeaveRequest>> {
        let affected = LeaveRequest::set_status(db, request_id, action.as_str()).await?;
        if affected == 0 {
            return Ok(None);
        }

        let request = match LeaveRequest::find_by_id(db, request_id).await? {
            Some(request) => request,
            None => return Ok(None),
        };

        let message = match action {
            TeacherAction::Accept => "Your leave request has been approved by the teacher.",
            TeacherAction::Reject => "Your leave request has been rejected by the teacher.",
            TeacherAction::Forward => "Your leave request has been forwarded to the HOD.",
        };

        // The student is resolved through the email stored on the request.
        // A vanished account means the update stands but no SMS goes out.
        if let Some(account) = Account::find_by_email(db, &request.email).await? {
            notifier.queue(&account.phone, message);
        }

        Ok(Some(request))
    }

    /// HOD counterpart of [`Self::teacher_decision`].
    pub async fn hod_decision(
        db: &SqlitePool,
        notifier: &Notifier,
        request_id: &str,
        action: HodAction,
    ) -> anyhow::Result<Option<LeaveRequest>> {
        let affected = LeaveRequest::set_status(db, request_id, action.as_str()).await?;
        if affected == 0 {
            return Ok(None);
        }

        let request = match LeaveRequest::find_by_id(db, request_id).await? {
            Some(request) => request,
            None => return Ok(None),
        };

        let message = match action {
            HodAction::AcceptedByHod => "Your leave request has been approved by the HOD.",
            HodAction::RejectedByHod => "Your leave request has been rejected by the HOD.",
        };

        if let Some(account) = Account::find_by_email(db, &request.email).await? {
            notifier.queue(&account.phone, message);
        }

        Ok(Some(request))
    }

    pub async fn requests_for_student(
        db: &SqlitePool,
        email: &str,
    ) -> anyhow::Result<Vec<LeaveRequest>> {
        LeaveRequest::for_email_newest_first(db, email).await
    }

    pub async fn history_for_student(
        db: &SqlitePool,
        email: &str,
    ) -> anyhow::Result<Vec<LeaveRequest>> {
        LeaveRequest::for_email(db, email).await
    }

    /// The teacher's queue: still-pending requests from one class.
    pub async fn pending_for_class(
        db: &SqlitePool,
        class: &str,
    ) -> anyhow::Result<Vec<LeaveRequest>> {
        LeaveRequest::pending_in_class(db, class).await
    }

    /// The HOD's queue: everything a teacher forwarded.
    pub async fn forwarded_to_hod(db: &SqlitePool) -> anyhow::Result<Vec<LeaveRequest>> {
        LeaveRequest::forwarded_to_hod(db).await
    }

    pub async fn hod_history(db: &SqlitePool) -> anyhow::Result<Vec<LeaveRequest>> {
        LeaveRequest::hod_decided(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::OutboundSms;
    use tokio::sync::mpsc::Receiver;

    async fn seed_account(db: &SqlitePool, email: &str, class: &str, phone: &str) {
        sqlx::query(
            r#"
            INSERT INTO accounts (email, password, account_type, name, rollno, class, department, phone)
            VALUES (?, 'secret', 'student', 'Test Student', 'R-01', ?, 'CSE', ?)
            "#,
        )
        .bind(email)
        .bind(class)
        .bind(phone)
        .execute(db)
        .await
        .unwrap();
    }

    fn apply_input(email: &str, class: &str) -> ApplyLeave {
        ApplyLeave {
            name: "Test Student".to_string(),
            roll_number: "R-01".to_string(),
            student_class: class.to_string(),
            leave_description: "family function".to_string(),
            leave_days: 2,
            email: email.to_string(),
            department: "CSE".to_string(),
        }
    }

    fn test_notifier() -> (Notifier, Receiver<OutboundSms>) {
        Notifier::channel(8)
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn apply_creates_pending_request_and_notifies(pool: SqlitePool) {
        seed_account(&pool, "s1@x.com", "10A", "+15550000001").await;
        let (notifier, mut rx) = test_notifier();

        let created = LeaveLifecycle::apply(&pool, &notifier, apply_input("s1@x.com", "10A"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(created.status, "Pending");
        assert!((Utc::now() - created.applied_date).num_seconds() < 5);

        let stored = LeaveRequest::find_by_id(&pool, &created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, "Pending");
        assert_eq!(stored.email, "s1@x.com");

        let sms = rx.try_recv().unwrap();
        assert_eq!(sms.to, "+15550000001");
        assert_eq!(
            sms.body,
            "Dear Test Student, your leave request has been submitted successfully."
        );
        assert!(rx.try_recv().is_err());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn apply_for_unknown_email_writes_nothing(pool: SqlitePool) {
        let (notifier, mut rx) = test_notifier();

        let created = LeaveLifecycle::apply(&pool, &notifier, apply_input("ghost@x.com", "10A"))
            .await
            .unwrap();
        assert!(created.is_none());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leave_requests")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
        assert!(rx.try_recv().is_err());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn teacher_decision_overwrites_any_prior_status(pool: SqlitePool) {
        seed_account(&pool, "s1@x.com", "10A", "+15550000001").await;
        let (notifier, mut rx) = test_notifier();

        let created = LeaveLifecycle::apply(&pool, &notifier, apply_input("s1@x.com", "10A"))
            .await
            .unwrap()
            .unwrap();
        rx.try_recv().unwrap();

        let updated =
            LeaveLifecycle::teacher_decision(&pool, &notifier, &created.id, TeacherAction::Accept)
                .await
                .unwrap()
                .unwrap();
        assert_eq!(updated.status, "accept");

        // Not idempotent, a second accept succeeds again.
        let updated =
            LeaveLifecycle::teacher_decision(&pool, &notifier, &created.id, TeacherAction::Accept)
                .await
                .unwrap()
                .unwrap();
        assert_eq!(updated.status, "accept");

        let stored = LeaveRequest::find_by_id(&pool, &created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, "accept");

        for _ in 0..2 {
            let sms = rx.try_recv().unwrap();
            assert_eq!(
                sms.body,
                "Your leave request has been approved by the teacher."
            );
        }
        assert!(rx.try_recv().is_err());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn decision_on_unknown_id_is_not_found_and_silent(pool: SqlitePool) {
        let (notifier, mut rx) = test_notifier();

        let updated = LeaveLifecycle::teacher_decision(
            &pool,
            &notifier,
            "00000000-0000-0000-0000-000000000000",
            TeacherAction::Reject,
        )
        .await
        .unwrap();

        assert!(updated.is_none());
        assert!(rx.try_recv().is_err());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn decision_after_account_deletion_updates_without_sms(pool: SqlitePool) {
        seed_account(&pool, "s1@x.com", "10A", "+15550000001").await;
        let (notifier, mut rx) = test_notifier();

        let created = LeaveLifecycle::apply(&pool, &notifier, apply_input("s1@x.com", "10A"))
            .await
            .unwrap()
            .unwrap();
        rx.try_recv().unwrap();

        sqlx::query("DELETE FROM accounts WHERE email = ?")
            .bind("s1@x.com")
            .execute(&pool)
            .await
            .unwrap();

        let updated =
            LeaveLifecycle::teacher_decision(&pool, &notifier, &created.id, TeacherAction::Accept)
                .await
                .unwrap();
        assert!(updated.is_some());

        let stored = LeaveRequest::find_by_id(&pool, &created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, "accept");
        assert!(rx.try_recv().is_err());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn pending_for_class_filters_on_both_class_and_status(pool: SqlitePool) {
        seed_account(&pool, "a@x.com", "10A", "+15550000001").await;
        seed_account(&pool, "b@x.com", "10B", "+15550000002").await;
        let (notifier, _rx) = test_notifier();

        let in_class = LeaveLifecycle::apply(&pool, &notifier, apply_input("a@x.com", "10A"))
            .await
            .unwrap()
            .unwrap();
        let decided = LeaveLifecycle::apply(&pool, &notifier, apply_input("a@x.com", "10A"))
            .await
            .unwrap()
            .unwrap();
        LeaveLifecycle::apply(&pool, &notifier, apply_input("b@x.com", "10B"))
            .await
            .unwrap()
            .unwrap();

        LeaveLifecycle::teacher_decision(&pool, &notifier, &decided.id, TeacherAction::Reject)
            .await
            .unwrap();

        let pending = LeaveLifecycle::pending_for_class(&pool, "10A").await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, in_class.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn forwarded_request_moves_between_queues(pool: SqlitePool) {
        seed_account(&pool, "s1@x.com", "10A", "+15550000001").await;
        let (notifier, _rx) = test_notifier();

        let created = LeaveLifecycle::apply(&pool, &notifier, apply_input("s1@x.com", "10A"))
            .await
            .unwrap()
            .unwrap();

        LeaveLifecycle::teacher_decision(&pool, &notifier, &created.id, TeacherAction::Forward)
            .await
            .unwrap();

        let forwarded = LeaveLifecycle::forwarded_to_hod(&pool).await.unwrap();
        assert_eq!(forwarded.len(), 1);
        assert_eq!(forwarded[0].id, created.id);
        assert!(
            LeaveLifecycle::pending_for_class(&pool, "10A")
                .await
                .unwrap()
                .is_empty()
        );

        LeaveLifecycle::hod_decision(&pool, &notifier, &created.id, HodAction::AcceptedByHod)
            .await
            .unwrap();

        assert!(LeaveLifecycle::forwarded_to_hod(&pool).await.unwrap().is_empty());
        let history = LeaveLifecycle::hod_history(&pool).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, "acceptedbyhod");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn hod_decision_sends_hod_worded_sms(pool: SqlitePool) {
        seed_account(&pool, "s1@x.com", "10A", "+15550000001").await;
        let (notifier, mut rx) = test_notifier();

        let created = LeaveLifecycle::apply(&pool, &notifier, apply_input("s1@x.com", "10A"))
            .await
            .unwrap()
            .unwrap();
        rx.try_recv().unwrap();

        LeaveLifecycle::hod_decision(&pool, &notifier, &created.id, HodAction::RejectedByHod)
            .await
            .unwrap();

        let sms = rx.try_recv().unwrap();
        assert_eq!(sms.body, "Your leave request has been rejected by the HOD.");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn student_listing_is_newest_first_history_is_unordered(pool: SqlitePool) {
        seed_account(&pool, "s1@x.com", "10A", "+15550000001").await;

        let older = LeaveRequest {
            id: Uuid::new_v4().to_string(),
            name: "Test Student".to_string(),
            roll_number: "R-01".to_string(),
            class: "10A".to_string(),
            email: "s1@x.com".to_string(),
            leave_description: "older".to_string(),
            leave_days: 1,
            department: "CSE".to_string(),
            status: "Pending".to_string(),
            applied_date: Utc::now() - chrono::Duration::hours(2),
        };
        older.insert(&pool).await.unwrap();

        let newer = LeaveRequest {
            id: Uuid::new_v4().to_string(),
            leave_description: "newer".to_string(),
            applied_date: Utc::now(),
            ..older.clone()
        };
        newer.insert(&pool).await.unwrap();

        let listing = LeaveLifecycle::requests_for_student(&pool, "s1@x.com")
            .await
            .unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].id, newer.id);
        assert_eq!(listing[1].id, older.id);

        let history = LeaveLifecycle::history_for_student(&pool, "s1@x.com")
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
    }
}
