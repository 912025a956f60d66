//! Student gateway contract and SQLite implementation.
//!
//! # Invariants
//! - `email_address` is unique and names are non-blank; the schema enforces
//!   both, so violations surface as store errors.
//! - Listing order is `id ASC`.

use super::{ensure_table_ready, RepoResult};
use crate::model::student::{Student, StudentId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const STUDENT_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email_address
FROM students";

/// Gateway over the `students` table.
pub trait StudentRepository {
    fn find_by_id(&self, id: StudentId) -> RepoResult<Option<Student>>;
    fn find_by_email_address(&self, email_address: &str) -> RepoResult<Option<Student>>;
    fn find_all(&self) -> RepoResult<Vec<Student>>;
    fn exists_by_id(&self, id: StudentId) -> RepoResult<bool>;
    /// Inserts when `student.id` is `None`, otherwise overwrites that row.
    fn save(&self, student: &Student) -> RepoResult<Student>;
    /// Removing an absent id is a no-op.
    fn delete_by_id(&self, id: StudentId) -> RepoResult<()>;
}

/// SQLite-backed student gateway.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(
            conn,
            "students",
            &["id", "first_name", "last_name", "email_address"],
        )?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn find_by_id(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let student = self
            .conn
            .query_row(
                &format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_student_row,
            )
            .optional()?;
        Ok(student)
    }

    fn find_by_email_address(&self, email_address: &str) -> RepoResult<Option<Student>> {
        let student = self
            .conn
            .query_row(
                &format!("{STUDENT_SELECT_SQL} WHERE email_address = ?1;"),
                [email_address],
                parse_student_row,
            )
            .optional()?;
        Ok(student)
    }

    fn find_all(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let students = stmt
            .query_map([], parse_student_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(students)
    }

    fn exists_by_id(&self, id: StudentId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM students WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn save(&self, student: &Student) -> RepoResult<Student> {
        let id = match student.id {
            None => {
                self.conn.execute(
                    "INSERT INTO students (first_name, last_name, email_address)
                     VALUES (?1, ?2, ?3);",
                    params![
                        student.first_name.as_str(),
                        student.last_name.as_str(),
                        student.email_address.as_str(),
                    ],
                )?;
                self.conn.last_insert_rowid()
            }
            Some(id) => {
                self.conn.execute(
                    "INSERT INTO students (id, first_name, last_name, email_address)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT (id) DO UPDATE SET
                        first_name = excluded.first_name,
                        last_name = excluded.last_name,
                        email_address = excluded.email_address;",
                    params![
                        id,
                        student.first_name.as_str(),
                        student.last_name.as_str(),
                        student.email_address.as_str(),
                    ],
                )?;
                id
            }
        };

        Ok(Student {
            id: Some(id),
            ..student.clone()
        })
    }

    fn delete_by_id(&self, id: StudentId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM students WHERE id = ?1;", [id])?;
        Ok(())
    }
}

fn parse_student_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: Some(row.get("id")?),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email_address: row.get("email_address")?,
    })
}
