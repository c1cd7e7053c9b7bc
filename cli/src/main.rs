//! Command-line client for the vaccination-tracker backend.
//!
//! Shares the gateway with the browser dashboard, so bearer attachment and the
//! 401 reaction behave the same here: a rejected token removes the session
//! file and the next command must `login` again.

mod http;
mod store;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use gateway::models::{DriveId, DriveInput, StudentId};
use gateway::reports::{ReportFile, ReportFormat};
use gateway::validation::{self, SignupForm, StudentForm};
use gateway::{ApiClient, ApiError, ClientConfig, ConfigError, SessionGuard, TokenStore};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::http::HttpTransport;
use crate::store::FileStore;

type Api = ApiClient<HttpTransport, Rc<RefCell<SessionGuard<FileStore>>>>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("session expired; run `vax-cli login`")]
    SessionExpired,
    #[error("not signed in; run `vax-cli login`")]
    NotSignedIn,
    #[error(transparent)]
    Api(ApiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Invalid(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::AuthorizationExpired => Self::SessionExpired,
            other => Self::Api(other),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "vax-cli", about = "School vaccination tracker CLI")]
struct Cli {
    /// Overrides `VAX_API_BASE_URL` (default `http://127.0.0.1:8000`).
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides `VAX_REQUEST_TIMEOUT_SECS` (default 15).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,

    /// Where the session is kept between commands. Defaults to `$HOME/.vax-session.json`.
    #[arg(long, env = "VAX_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        username: String,
        /// Prompted for on stderr when omitted.
        #[arg(long, env = "VAX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    Logout,
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "VAX_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Show who is signed in.
    Status,
    Drives(DriveCommand),
    Students(StudentCommand),
    Vaccinations(VaccinationCommand),
    Metrics,
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct DriveCommand {
    #[command(subcommand)]
    command: DriveSubcommand,
}

#[derive(Args, Debug)]
struct DriveFields {
    #[arg(long)]
    name: String,
    /// YYYY-MM-DD; today or later.
    #[arg(long)]
    date: String,
    /// e.g. `5-10` or `5,6,7`.
    #[arg(long)]
    target_grades: String,
}

#[derive(Subcommand, Debug)]
enum DriveSubcommand {
    List {
        #[arg(long)]
        upcoming: bool,
    },
    Create(DriveFields),
    Update {
        id: DriveId,
        #[command(flatten)]
        fields: DriveFields,
    },
    Delete {
        id: DriveId,
    },
}

#[derive(Args, Debug)]
struct StudentCommand {
    #[command(subcommand)]
    command: StudentSubcommand,
}

#[derive(Args, Debug)]
struct StudentFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    grade: String,
    #[arg(long)]
    roll_number: String,
    /// Drive the student was vaccinated in; marks the student vaccinated.
    #[arg(long)]
    drive: Option<DriveId>,
}

#[derive(Subcommand, Debug)]
enum StudentSubcommand {
    List,
    Add(StudentFields),
    Update {
        id: StudentId,
        #[command(flatten)]
        fields: StudentFields,
    },
    Delete {
        id: StudentId,
    },
    /// Bulk import from a CSV file.
    Upload {
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct VaccinationCommand {
    #[command(subcommand)]
    command: VaccinationSubcommand,
}

#[derive(Subcommand, Debug)]
enum VaccinationSubcommand {
    List,
    Record {
        #[arg(long)]
        student: StudentId,
        #[arg(long)]
        drive: DriveId,
    },
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[arg(long, conflicts_with = "all", required_unless_present = "all")]
    drive: Option<DriveId>,
    #[arg(long)]
    all: bool,
    /// pdf, csv or excel.
    #[arg(long, default_value = "pdf")]
    format: ReportFormat,
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Environment settings with any command-line overrides applied.
fn client_config(base_url: Option<&str>, timeout_secs: Option<u64>) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = base_url {
        config = ClientConfig::new(base_url)?.with_timeout(config.request_timeout);
    }
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = client_config(cli.base_url.as_deref(), cli.timeout_secs)?;
    let store = FileStore::new(cli.session_file.unwrap_or_else(store::default_session_file));
    let transport = HttpTransport::new(config.request_timeout)?;
    let api = ApiClient::new(config, transport, Rc::new(RefCell::new(SessionGuard::restore(store))));

    match cli.command {
        Command::Login { username, password } => run_login(&api, &username, password).await,
        Command::Logout => {
            api.logout().await;
            println!("signed out");
            Ok(())
        }
        Command::Signup { username, email, password } => run_signup(&api, username, email, password).await,
        Command::Status => run_status(&api),
        Command::Drives(drives) => {
            require_session(&api)?;
            run_drives(&api, drives).await
        }
        Command::Students(students) => {
            require_session(&api)?;
            run_students(&api, students).await
        }
        Command::Vaccinations(vaccinations) => {
            require_session(&api)?;
            run_vaccinations(&api, vaccinations).await
        }
        Command::Metrics => {
            require_session(&api)?;
            run_metrics(&api).await
        }
        Command::Report(report) => {
            require_session(&api)?;
            run_report(&api, report).await
        }
    }
}

/// Protected commands refuse to run signed out, the same way the dashboard
/// redirects protected pages to the login screen.
fn require_session(api: &Api) -> Result<(), CliError> {
    if api.session().borrow().is_authenticated() { Ok(()) } else { Err(CliError::NotSignedIn) }
}

async fn run_login(api: &Api, username: &str, password: Option<String>) -> Result<(), CliError> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };
    let session = api.login(username, &password).await?;
    println!("signed in as {}", session.username);
    Ok(())
}

async fn run_signup(api: &Api, username: String, email: String, password: Option<String>) -> Result<(), CliError> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };
    let confirm_password = prompt("Confirm password: ")?;
    let form = SignupForm { username, email, password, confirm_password };
    api.signup(&form).await?;
    println!("account created; run `vax-cli login` to sign in");
    Ok(())
}

fn run_status(api: &Api) -> Result<(), CliError> {
    let guard = api.session().borrow();
    let stored = guard.store().load().map_err(ApiError::from)?.is_some();
    print_json(&json!({
        "authenticated": guard.is_authenticated(),
        "username": guard.username(),
        "session_file": guard.store().path(),
        "stored": stored,
    }))
}

async fn run_drives(api: &Api, drives: DriveCommand) -> Result<(), CliError> {
    match drives.command {
        DriveSubcommand::List { upcoming } => print_json(&api.list_drives(upcoming).await?),
        DriveSubcommand::Create(fields) => {
            let input = drive_input(fields)?;
            print_json(&api.create_drive(&input).await?)
        }
        DriveSubcommand::Update { id, fields } => {
            let input = drive_input(fields)?;
            print_json(&api.update_drive(id, &input).await?)
        }
        DriveSubcommand::Delete { id } => {
            api.delete_drive(id).await?;
            println!("deleted drive {id}");
            Ok(())
        }
    }
}

fn drive_input(fields: DriveFields) -> Result<DriveInput, CliError> {
    let raw = DriveInput { name: fields.name, date: fields.date, target_grades: fields.target_grades };
    let today = time::OffsetDateTime::now_utc().date();
    validation::validate_drive(&raw, today).map_err(|e| CliError::Invalid(e.to_string()))
}

async fn run_students(api: &Api, students: StudentCommand) -> Result<(), CliError> {
    match students.command {
        StudentSubcommand::List => {
            let (students, records) = (api.list_students().await?, api.list_vaccination_records().await?);
            print_json(&gateway::listing::enrich_students(students, &records))
        }
        StudentSubcommand::Add(fields) => {
            let submission = student_submission(fields)?;
            print_json(&api.save_student(None, &submission).await?)
        }
        StudentSubcommand::Update { id, fields } => {
            let submission = student_submission(fields)?;
            print_json(&api.save_student(Some(id), &submission).await?)
        }
        StudentSubcommand::Delete { id } => {
            api.delete_student(id).await?;
            println!("deleted student {id}");
            Ok(())
        }
        StudentSubcommand::Upload { file } => {
            let filename = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            let bytes = std::fs::read(&file)?;
            let message = api.upload_students_csv(&filename, "text/csv", bytes).await?;
            println!("{}", message.as_deref().unwrap_or("Students uploaded successfully!"));
            Ok(())
        }
    }
}

fn student_submission(fields: StudentFields) -> Result<gateway::models::StudentSubmission, CliError> {
    let form = StudentForm {
        name: fields.name,
        grade: fields.grade,
        roll_number: fields.roll_number,
        vaccination_status: fields.drive.is_some(),
        vaccinated_in: fields.drive,
    };
    validation::validate_student(&form).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|(_, e)| e.to_string()).collect();
        CliError::Invalid(messages.join("; "))
    })
}

async fn run_vaccinations(api: &Api, vaccinations: VaccinationCommand) -> Result<(), CliError> {
    match vaccinations.command {
        VaccinationSubcommand::List => print_json(&api.list_vaccination_records().await?),
        VaccinationSubcommand::Record { student, drive } => {
            print_json(&api.create_vaccination_record(student, drive).await?)
        }
    }
}

async fn run_metrics(api: &Api) -> Result<(), CliError> {
    let metrics = api.dashboard_metrics().await?;
    let breakdown: Vec<_> = gateway::metrics::grade_breakdown(&metrics)
        .into_iter()
        .map(|row| json!({ "grade": row.grade, "vaccinated": row.vaccinated, "total": row.total, "percentage": row.percentage }))
        .collect();
    print_json(&json!({
        "total_students": metrics.total_students,
        "students_vaccinated": metrics.students_vaccinated,
        "vaccination_percentage": gateway::metrics::percentage(metrics.students_vaccinated, metrics.total_students),
        "by_grade": breakdown,
    }))
}

async fn run_report(api: &Api, report: ReportArgs) -> Result<(), CliError> {
    let file = match report.drive {
        Some(id) => api.download_drive_report(id, report.format).await?,
        None => api.download_all_reports(report.format).await?,
    };
    let path = write_report(&report.out, &file)?;
    println!("{}", path.display());
    Ok(())
}

fn write_report(dir: &std::path::Path, file: &ReportFile) -> Result<PathBuf, CliError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&file.filename);
    std::fs::write(&path, &file.bytes)?;
    tracing::info!(path = %path.display(), bytes = file.bytes.len(), "report saved");
    Ok(path)
}

fn prompt(label: &str) -> Result<String, CliError> {
    let mut stderr = io::stderr();
    stderr.write_all(label.as_bytes())?;
    stderr.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
