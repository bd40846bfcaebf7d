use sqlx::SqlitePool;

#[allow(dead_code)]
pub async fn seed_student(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    rollno: &str,
    class: &str,
    phone: &str,
) {
    sqlx::query(
        r#"
        INSERT INTO accounts (email, password, account_type, name, rollno, class, department, phone)
        VALUES (?, ?, 'student', 'Test Student', ?, ?, 'CSE', ?)
        "#,
    )
    .bind(email)
    .bind(password)
    .bind(rollno)
    .bind(class)
    .bind(phone)
    .execute(pool)
    .await
    .unwrap();
}

#[allow(dead_code)]
pub async fn seed_teacher(pool: &SqlitePool, email: &str, password: &str, class: &str) {
    sqlx::query(
        r#"
        INSERT INTO accounts (email, password, account_type, name, rollno, class, department, phone)
        VALUES (?, ?, 'teacher', 'Test Teacher', NULL, ?, 'CSE', '+15550009999')
        "#,
    )
    .bind(email)
    .bind(password)
    .bind(class)
    .execute(pool)
    .await
    .unwrap();
}
