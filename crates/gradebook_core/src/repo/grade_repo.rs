//! Per-subject grade gateway contract and SQLite implementation.
//!
//! One implementation serves all three subjects; the subject picks the
//! backing table, so a math gateway can never read or delete a science row.
//!
//! # Invariants
//! - `student_id` must reference an existing student (foreign key).
//! - Rows read back must hold a grade in `[0, 100]`.

use super::{ensure_table_ready, RepoError, RepoResult};
use crate::model::grade::{GradeId, GradeRecord, Subject};
use crate::model::student::StudentId;
use rusqlite::{params, Connection};

/// Gateway over one subject's grade table.
pub trait GradeRepository {
    fn subject(&self) -> Subject;
    fn find_by_id(&self, id: GradeId) -> RepoResult<Option<GradeRecord>>;
    fn find_by_student_id(&self, student_id: StudentId) -> RepoResult<Vec<GradeRecord>>;
    /// Inserts when `record.id` is `None`, otherwise overwrites that row.
    fn save(&self, record: &GradeRecord) -> RepoResult<GradeRecord>;
    /// Removing an absent id is a no-op.
    fn delete_by_id(&self, id: GradeId) -> RepoResult<()>;
    /// Returns the number of removed rows.
    fn delete_by_student_id(&self, student_id: StudentId) -> RepoResult<usize>;
}

/// SQLite-backed grade gateway bound to one subject.
pub struct SqliteGradeRepository<'conn> {
    conn: &'conn Connection,
    subject: Subject,
}

impl<'conn> SqliteGradeRepository<'conn> {
    pub fn try_new(conn: &'conn Connection, subject: Subject) -> RepoResult<Self> {
        ensure_table_ready(conn, subject.table(), &["id", "student_id", "grade"])?;
        Ok(Self { conn, subject })
    }

    fn table(&self) -> &'static str {
        self.subject.table()
    }

    fn read_row(&self, row: &rusqlite::Row<'_>) -> RepoResult<GradeRecord> {
        let record = GradeRecord {
            id: Some(row.get("id")?),
            student_id: row.get("student_id")?,
            subject: self.subject,
            grade: row.get("grade")?,
        };
        record.validate().map_err(|_| {
            RepoError::InvalidData(format!(
                "grade {} out of range in {}.grade",
                record.grade,
                self.table()
            ))
        })?;
        Ok(record)
    }
}

impl GradeRepository for SqliteGradeRepository<'_> {
    fn subject(&self) -> Subject {
        self.subject
    }

    fn find_by_id(&self, id: GradeId) -> RepoResult<Option<GradeRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, student_id, grade FROM {} WHERE id = ?1;",
            self.table()
        ))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(self.read_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_by_student_id(&self, student_id: StudentId) -> RepoResult<Vec<GradeRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, student_id, grade FROM {} WHERE student_id = ?1 ORDER BY id ASC;",
            self.table()
        ))?;
        let mut rows = stmt.query([student_id])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(self.read_row(row)?);
        }
        Ok(records)
    }

    fn save(&self, record: &GradeRecord) -> RepoResult<GradeRecord> {
        if record.subject != self.subject {
            return Err(RepoError::InvalidData(format!(
                "{} gateway cannot store a {} grade",
                self.subject, record.subject
            )));
        }
        record.validate()?;

        let id = match record.id {
            None => {
                self.conn.execute(
                    &format!(
                        "INSERT INTO {} (student_id, grade) VALUES (?1, ?2);",
                        self.table()
                    ),
                    params![record.student_id, record.grade],
                )?;
                self.conn.last_insert_rowid()
            }
            Some(id) => {
                self.conn.execute(
                    &format!(
                        "INSERT INTO {} (id, student_id, grade) VALUES (?1, ?2, ?3)
                         ON CONFLICT (id) DO UPDATE SET
                            student_id = excluded.student_id,
                            grade = excluded.grade;",
                        self.table()
                    ),
                    params![id, record.student_id, record.grade],
                )?;
                id
            }
        };

        Ok(GradeRecord {
            id: Some(id),
            ..record.clone()
        })
    }

    fn delete_by_id(&self, id: GradeId) -> RepoResult<()> {
        self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", self.table()),
            [id],
        )?;
        Ok(())
    }

    fn delete_by_student_id(&self, student_id: StudentId) -> RepoResult<usize> {
        let removed = self.conn.execute(
            &format!("DELETE FROM {} WHERE student_id = ?1;", self.table()),
            [student_id],
        )?;
        Ok(removed)
    }
}
