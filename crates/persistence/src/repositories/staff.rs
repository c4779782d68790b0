//! Staff repository for identity-scope lookups.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::StaffEntity;
use crate::metrics::QueryTimer;

/// Repository for staff-related database operations.
#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    /// Creates a new StaffRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a staff member by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_staff_by_id");
        let result = sqlx::query_as::<_, StaffEntity>(
            r#"
            SELECT id, gym_id, company_id, display_name, role, is_active, created_at, updated_at
            FROM staff
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
