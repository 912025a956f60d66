//! Command line front end for the gradebook store.
//!
//! # Responsibility
//! - Translate subcommands into `GradebookService` calls.
//! - Map not-found and rejected input to exit code 1, store failures to 2.

use clap::{Parser, Subcommand};
use gradebook_core::db::open_db;
use gradebook_core::{core_version, init_logging, GradebookConfig, GradebookService};
use log::error;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gradebook", version, about = "Student and grade bookkeeping")]
struct Cli {
    /// TOML config file (defaults to ./gradebook.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file; overrides config and environment.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the core version.
    Ping,
    /// Enroll a new student.
    AddStudent {
        first_name: String,
        last_name: String,
        email_address: String,
    },
    /// List every student.
    List,
    /// Show one student with all grades and averages as JSON.
    Show { student_id: i64 },
    /// Record a grade (subject: math|science|history).
    AddGrade {
        subject: String,
        student_id: i64,
        grade: f64,
    },
    /// Delete one grade row.
    DeleteGrade { subject: String, grade_id: i64 },
    /// Delete a student and all of their grades.
    DeleteStudent { student_id: i64 },
}

#[derive(Debug)]
enum Outcome {
    Done,
    NotFound(String),
}

const EXIT_NOT_FOUND: u8 = 1;
const EXIT_STORE_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Command::Ping = cli.command {
        println!("gradebook_core version={}", core_version());
        return ExitCode::SUCCESS;
    }

    let result = run(cli);
    match &result {
        Ok(Outcome::Done) => {}
        Ok(Outcome::NotFound(message)) => eprintln!("{message}"),
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
        }
    }
    ExitCode::from(exit_status(&result))
}

fn exit_status(result: &Result<Outcome, Box<dyn Error>>) -> u8 {
    match result {
        Ok(Outcome::Done) => 0,
        Ok(Outcome::NotFound(_)) => EXIT_NOT_FOUND,
        Err(_) => EXIT_STORE_FAILURE,
    }
}

fn run(cli: Cli) -> Result<Outcome, Box<dyn Error>> {
    let mut config = GradebookConfig::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(&config.log_level, log_dir)?;
    }

    let conn = open_db(&config.database_path)?;
    let service = GradebookService::try_new(&conn)?;

    match cli.command {
        Command::Ping => {}
        Command::AddStudent {
            first_name,
            last_name,
            email_address,
        } => {
            let student = service.create_student(first_name, last_name, email_address)?;
            println!("{}", student.id.unwrap_or_default());
        }
        Command::List => {
            for student in service.get_gradebook()? {
                println!(
                    "{}\t{}\t{}",
                    student.id.unwrap_or_default(),
                    student.full_name(),
                    student.email_address
                );
            }
        }
        Command::Show { student_id } => match service.student_information(student_id)? {
            Some(entry) => {
                let averages = serde_json::json!({
                    "math": entry.math_average(),
                    "science": entry.science_average(),
                    "history": entry.history_average(),
                });
                let mut json = serde_json::to_value(&entry)?;
                json["averages"] = averages;
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            None => return Ok(Outcome::NotFound(format!("student {student_id} not found"))),
        },
        Command::AddGrade {
            subject,
            student_id,
            grade,
        } => {
            if !service.create_grade(grade, student_id, &subject)? {
                return Ok(Outcome::NotFound(format!(
                    "grade rejected: subject `{subject}`, student {student_id}, value {grade}"
                )));
            }
        }
        Command::DeleteGrade { subject, grade_id } => {
            match service.delete_grade(grade_id, &subject)? {
                Some(student_id) => println!("{student_id}"),
                None => {
                    return Ok(Outcome::NotFound(format!(
                        "{subject} grade {grade_id} not found"
                    )))
                }
            }
        }
        Command::DeleteStudent { student_id } => {
            if !service.delete_student(student_id)? {
                return Ok(Outcome::NotFound(format!("student {student_id} not found")));
            }
        }
    }

    Ok(Outcome::Done)
}

#[cfg(test)]
mod tests {
    use super::{exit_status, run, Cli, Outcome};
    use clap::Parser;
    use std::error::Error;
    use std::path::Path;

    fn run_with(db: &Path, args: &[&str]) -> Result<Outcome, Box<dyn Error>> {
        let db = db.to_str().unwrap();
        let argv = ["gradebook", "--db", db].into_iter().chain(args.iter().copied());
        run(Cli::try_parse_from(argv).unwrap())
    }

    fn assert_done(db: &Path, args: &[&str]) {
        let result = run_with(db, args);
        assert!(matches!(result, Ok(Outcome::Done)), "{args:?}: {result:?}");
        assert_eq!(exit_status(&result), 0);
    }

    fn assert_not_found(db: &Path, args: &[&str]) {
        let result = run_with(db, args);
        assert!(matches!(result, Ok(Outcome::NotFound(_))), "{args:?}: {result:?}");
        assert_eq!(exit_status(&result), 1);
    }

    #[test]
    fn commands_succeed_for_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("gradebook.sqlite3");

        assert_done(&db, &["add-student", "eric", "roby", "eric@example.com"]);
        assert_done(&db, &["add-grade", "math", "1", "80.5"]);
        assert_done(&db, &["add-grade", "history", "1", "100"]);
        assert_done(&db, &["list"]);
        assert_done(&db, &["show", "1"]);
        assert_done(&db, &["delete-grade", "math", "1"]);
        assert_done(&db, &["delete-student", "1"]);
    }

    #[test]
    fn rejected_input_and_misses_exit_with_one() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("gradebook.sqlite3");
        assert_done(&db, &["add-student", "eric", "roby", "eric@example.com"]);

        assert_not_found(&db, &["add-grade", "literature", "1", "80"]);
        assert_not_found(&db, &["add-grade", "math", "1", "105"]);
        assert_not_found(&db, &["add-grade", "math", "2", "80"]);
        assert_not_found(&db, &["delete-grade", "math", "0"]);
        assert_not_found(&db, &["delete-grade", "literature", "1"]);
        assert_not_found(&db, &["show", "0"]);
        assert_not_found(&db, &["delete-student", "0"]);
    }

    #[test]
    fn store_failures_exit_with_two() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("gradebook.sqlite3");
        assert_done(&db, &["add-student", "eric", "roby", "eric@example.com"]);

        let duplicate = run_with(&db, &["add-student", "other", "eric", "eric@example.com"]);
        assert!(duplicate.is_err());
        assert_eq!(exit_status(&duplicate), 2);

        let unopenable = run_with(dir.path(), &["list"]);
        assert!(unopenable.is_err());
        assert_eq!(exit_status(&unopenable), 2);
    }

    #[test]
    fn subcommands_parse_typed_arguments() {
        assert!(Cli::try_parse_from(["gradebook", "show", "abc"]).is_err());
        assert!(Cli::try_parse_from(["gradebook", "add-grade", "math", "1"]).is_err());
        assert!(Cli::try_parse_from(["gradebook", "ping"]).is_ok());
    }
}
