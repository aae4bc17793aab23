//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Timestamps are stored by SQLite itself
//! (`datetime('now', 'localtime')`) and read back already formatted.

/// SQL statement to create the check-in table.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS check_ins (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(255) NOT NULL,
    photo_path VARCHAR(500) NOT NULL,
    points INTEGER NOT NULL DEFAULT 1,
    recorded_at DATETIME NOT NULL DEFAULT (datetime('now', 'localtime'))
);

CREATE INDEX IF NOT EXISTS idx_check_ins_recorded_at ON check_ins(recorded_at);
"#;

pub const INSERT_CHECK_IN: &str = r#"
INSERT INTO check_ins (name, photo_path, points, recorded_at)
VALUES (?1, ?2, ?3, datetime('now', 'localtime'))
"#;

pub const SELECT_CHECK_IN_BY_ID: &str = r#"
SELECT id, name, photo_path, points,
       strftime('%Y-%m-%dT%H:%M:%S', recorded_at) AS recorded_at
FROM check_ins
WHERE id = ?1
"#;

pub const SELECT_RECENT_CHECK_INS: &str = r#"
SELECT id, name, photo_path, points,
       strftime('%Y-%m-%dT%H:%M:%S', recorded_at) AS recorded_at
FROM check_ins
ORDER BY recorded_at DESC, id DESC
LIMIT ?1
"#;
