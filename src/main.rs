// SPDX-License-Identifier: MIT

//! Setoran-Tracker CLI
//!
//! Advisor-side front-end for tracking "setoran hafalan" submissions:
//! log in, inspect the advised-student roster, and record or withdraw
//! submission components for one student.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use setoran_tracker::config::Config;
use setoran_tracker::models::{
    PendingComponent, StudentDetail, SubmissionComponent, SubmissionProgress,
};
use setoran_tracker::{build_session, Session};

#[derive(Parser)]
#[command(name = "setoran-tracker")]
#[command(about = "Track advised students' memorization submissions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with university credentials
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// End the session (best-effort server logout, then local clear)
    Logout,
    /// Show the logged-in advisor's identity and roles
    Whoami,
    /// Advisor summary: cohorts and the advised-student roster
    Summary,
    /// Submission detail for one student
    Student { nim: String },
    /// Mark components as submitted
    Submit {
        nim: String,
        /// Component ids, as listed by `student`
        components: Vec<String>,
        /// Submission date (YYYY-MM-DD); server-assigned when absent
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Reverse completion for components
    Withdraw {
        nim: String,
        components: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let session = build_session(&config);

    match cli.command {
        Commands::Login { username, password } => {
            session.login(&username, &password).await?;
            match session.display_name() {
                Some(name) => println!("Logged in as {name}."),
                None => println!("Logged in."),
            }
        }
        Commands::Logout => {
            session.logout().await?;
            println!("Logged out.");
        }
        Commands::Whoami => {
            let claims = session.claims()?;
            println!(
                "Name:  {}",
                claims.display_name().unwrap_or("(unknown)")
            );
            if let Some(email) = &claims.email {
                println!("Email: {email}");
            }
            println!("Roles: {}", claims.realm_access.roles.join(", "));
        }
        Commands::Summary => {
            let summary = session.advisor_summary().await?;
            println!("Dosen PA: {} ({})", summary.nama, summary.nip);
            println!("Email:    {}", summary.email);
            println!();
            println!("Cohorts:");
            for cohort in &summary.info_mahasiswa_pa.ringkasan {
                println!("  {}: {} students", cohort.tahun, cohort.total);
            }
            println!();
            println!("Students:");
            for student in &summary.info_mahasiswa_pa.daftar_mahasiswa {
                println!(
                    "  {}  {:<30} {}",
                    student.nim,
                    student.nama,
                    progress_line(&student.info_setoran)
                );
            }
        }
        Commands::Student { nim } => {
            let fetched = session.student_submissions(&nim).await?;
            if fetched.is_snapshot() {
                println!("(backend unreachable; showing last saved snapshot)");
            }
            print_student(fetched.get());
        }
        Commands::Submit {
            nim,
            components,
            date,
        } => {
            let detail = live_detail(&session, &nim).await?;
            let staged = stage(&detail, &components, PendingComponent::submit)?;
            session.submit_components(&nim, &staged, date).await?;

            // Refetch so the printed progress reflects the write.
            let refreshed = session.student_submissions(&nim).await?;
            println!("Recorded {} component(s) for {}.", staged.len(), nim);
            print_student(refreshed.get());
        }
        Commands::Withdraw { nim, components } => {
            let detail = live_detail(&session, &nim).await?;
            let staged = stage(&detail, &components, PendingComponent::withdraw)?;
            session.withdraw_components(&nim, &staged).await?;

            let refreshed = session.student_submissions(&nim).await?;
            println!("Withdrew {} component(s) for {}.", staged.len(), nim);
            print_student(refreshed.get());
        }
    }

    Ok(())
}

/// Fetch student detail for staging a write; an offline snapshot is not
/// good enough to stage against.
async fn live_detail(session: &Session, nim: &str) -> anyhow::Result<StudentDetail> {
    let fetched = session.student_submissions(nim).await?;
    if fetched.is_snapshot() {
        anyhow::bail!("backend unreachable; cannot stage a batch from an offline snapshot");
    }
    Ok(fetched.into_inner())
}

/// Resolve component ids against the fetched detail list.
fn stage(
    detail: &StudentDetail,
    ids: &[String],
    to_pending: impl Fn(&SubmissionComponent) -> PendingComponent,
) -> anyhow::Result<Vec<PendingComponent>> {
    ids.iter()
        .map(|id| {
            let component = detail
                .find_component(id)
                .with_context(|| format!("unknown component id: {id}"))?;
            Ok(to_pending(component))
        })
        .collect()
}

fn progress_line(progress: &SubmissionProgress) -> String {
    format!(
        "{}/{} ({:.0}%)",
        progress.total_sudah_setor, progress.total_wajib_setor, progress.persentase_progres_setor
    )
}

fn print_student(detail: &StudentDetail) {
    let info = &detail.info;
    let progress = &detail.setoran.info_dasar;

    println!(
        "{} ({}) - angkatan {}, semester {}",
        info.nama, info.nim, info.angkatan, info.semester
    );
    println!("Dosen PA: {}", info.dosen_pa.nama);
    print!("Progress: {}", progress_line(progress));
    match &progress.tgl_terakhir_setor {
        Some(date) => println!(", last submission {date}"),
        None => println!(),
    }
    println!();
    for component in &detail.setoran.detail {
        let mark = if component.sudah_setor { "x" } else { " " };
        let validated = component
            .info_setoran
            .as_ref()
            .map(|e| format!("  (validated {})", e.tgl_validasi))
            .unwrap_or_default();
        println!(
            "  [{mark}] {:<6} {} - {}{validated}",
            component.id, component.nama, component.label
        );
    }
}

/// Initialize logging; diagnostics go to stderr, results to stdout.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("setoran_tracker=info".parse().unwrap()),
        )
        .with(format)
        .init();
}
