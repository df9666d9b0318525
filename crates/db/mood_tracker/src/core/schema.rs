use sqlx::{Error, SqlitePool};

pub async fn init_schema(pool: &SqlitePool) -> Result<(), Error> {
	sqlx::query(
		r#"
        CREATE TABLE IF NOT EXISTS mood_tracker (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            mood_status TEXT NOT NULL,
            mood_level INTEGER,
            reason TEXT DEFAULT '[]',
            date TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
	)
	.execute(pool)
	.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_mood_tracker_user_date ON mood_tracker(user_id, date)")
		.execute(pool)
		.await?;

	Ok(())
}
