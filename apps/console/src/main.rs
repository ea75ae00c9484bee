use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use exam_core::{
    ExamDeskController, FilterCriteria, HttpExamRegistryApi, SemesterFilter, StatusFilter,
};
use shared::domain::ExamFormId;

mod config;

#[derive(Parser, Debug)]
#[command(name = "examdesk", about = "Exam-registration console for university operations")]
struct Args {
    /// Registry base URL; overrides console.toml and EXAMDESK_SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusArg {
    All,
    Verified,
    Pending,
}

impl From<StatusArg> for StatusFilter {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::All => StatusFilter::All,
            StatusArg::Verified => StatusFilter::Verified,
            StatusArg::Pending => StatusFilter::Pending,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the filtered exam-form list with population counts.
    List {
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,
        #[arg(long)]
        semester: Option<i64>,
        #[arg(long, default_value = "")]
        course: String,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Mark a submitted exam form as verified.
    Verify { form_id: i64 },
    /// Issue the hall ticket for a verified exam form.
    HallTicket { form_id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(url) = args.server_url {
        settings.server_url = url;
    }

    let api = Arc::new(HttpExamRegistryApi::new(settings.server_url));
    let controller = ExamDeskController::new(api);
    controller.refresh().await?;

    match args.command {
        Command::List {
            status,
            semester,
            course,
            search,
        } => {
            controller
                .set_filters(FilterCriteria {
                    status: status.into(),
                    semester: semester.map(SemesterFilter::Only).unwrap_or_default(),
                    course,
                    search,
                })
                .await;

            let view = controller.view().await;
            let summary = view.summary;
            println!(
                "total={} verified={} pending={} hall-tickets={}",
                summary.total, summary.verified, summary.pending, summary.hall_ticket_available
            );
            for form in &view.forms {
                let reg = &form.registration;
                println!(
                    "#{:<6} {:<24} {:<6} sem {}  verified={} hall-ticket={}{}",
                    form.form_id,
                    form.student.name,
                    form.course.code,
                    form.semester,
                    reg.is_verified,
                    reg.hall_ticket_available,
                    if reg.hall_ticket_withheld() { " (held)" } else { "" }
                );
            }
        }
        Command::Verify { form_id } => {
            controller.verify(ExamFormId(form_id)).await?;
            println!("exam form {form_id} verified");
        }
        Command::HallTicket { form_id } => {
            controller.generate_hall_ticket(ExamFormId(form_id)).await?;
            println!("hall ticket issued for exam form {form_id}");
        }
    }

    Ok(())
}
