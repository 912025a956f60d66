#![allow(dead_code)]

use gradebook_core::db::open_db_in_memory;
use rusqlite::Connection;

/// Opens a migrated in-memory store holding student 1 (`eric roby`) with one
/// grade row in each subject, every row with id 1.
pub fn seeded_db() -> Connection {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO students (id, first_name, last_name, email_address)
         VALUES (1, 'eric', 'roby', 'eric@example.com');
         INSERT INTO math_grades (id, student_id, grade) VALUES (1, 1, 100.00);
         INSERT INTO science_grades (id, student_id, grade) VALUES (1, 1, 100.00);
         INSERT INTO history_grades (id, student_id, grade) VALUES (1, 1, 100.00);",
    )
    .unwrap();
    conn
}

/// Adds four more students so the store holds five in total.
pub fn insert_more_students(conn: &Connection) {
    conn.execute_batch(
        "INSERT INTO students (first_name, last_name, email_address) VALUES
            ('student', 'one', 'student.one@example.com'),
            ('student', 'two', 'student.two@example.com'),
            ('student', 'three', 'student.three@example.com'),
            ('student', 'four', 'student.four@example.com');",
    )
    .unwrap();
}

pub fn count_rows(conn: &Connection, table: &str, student_id: i64) -> i64 {
    let column = if table == "students" { "id" } else { "student_id" };
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1;"),
        [student_id],
        |row| row.get(0),
    )
    .unwrap()
}
