use clap::Parser;
use planner::{CreditPolicy, Planner, Semester, SemesterSummary};
use tracing::instrument;

use super::{
    OutputFormat, Workspace,
    terminal::{Colorize, is_narrow, load_label},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Show semesters, credit totals and load warnings")]
pub struct Command {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let session = workspace.open()?;
        let policy = CreditPolicy::from(&session.config);
        let planner = &session.planner;

        if planner.semesters().is_empty() {
            println!("No semesters planned yet. Create a plan with 'plan init'.");
            return Ok(());
        }

        let summaries: Vec<SemesterSummary> = planner
            .semesters()
            .iter()
            .map(|semester| policy.summarise(semester))
            .collect();

        match self.output {
            OutputFormat::Json => Self::output_json(planner, &policy, &summaries)?,
            OutputFormat::Table if self.quiet => Self::output_quiet(&summaries),
            OutputFormat::Table => Self::output_table(planner, &policy, &summaries),
        }

        Ok(())
    }

    fn output_json(
        planner: &Planner,
        policy: &CreditPolicy,
        summaries: &[SemesterSummary],
    ) -> anyhow::Result<()> {
        use serde_json::json;

        let semesters: Vec<_> = planner
            .semesters()
            .iter()
            .zip(summaries)
            .map(|(semester, summary)| {
                let courses: Vec<_> = semester
                    .courses
                    .iter()
                    .map(|course| {
                        json!({
                            "code": course.code,
                            "credits": policy.credit_hours(&course.code),
                            "locked": course.is_locked(),
                            "prereqOverride": course.prereq_override,
                            "color": course.color,
                        })
                    })
                    .collect();

                json!({
                    "term": semester.code.compact().to_string(),
                    "name": semester.code.to_string(),
                    "credits": summary.credits,
                    "load": summary.load,
                    "warning": summary.is_warning(),
                    "locked": summary.locked,
                    "color": semester.color,
                    "courses": courses,
                })
            })
            .collect();

        let output = json!({
            "majors": planner.majors(),
            "semesters": semesters,
            "transferCredits": planner.transfer_credits(),
            "totalCredits": summaries.iter().map(|s| s.credits).sum::<u32>(),
            "warnings": summaries.iter().filter(|s| s.is_warning()).count(),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_quiet(summaries: &[SemesterSummary]) {
        let credits: u32 = summaries.iter().map(|s| s.credits).sum();
        let warnings = summaries.iter().filter(|s| s.is_warning()).count();
        println!(
            "semesters={} credits={credits} warnings={warnings}",
            summaries.len()
        );
    }

    fn output_table(planner: &Planner, policy: &CreditPolicy, summaries: &[SemesterSummary]) {
        let narrow = is_narrow();

        if !planner.majors().is_empty() {
            println!("Majors: {}", planner.majors().join(", ").info());
        }
        println!("Semester plan");
        println!("{}", "─────────────".dim());

        for (semester, summary) in planner.semesters().iter().zip(summaries) {
            print_semester(semester, summary, narrow);
            for course in &semester.courses {
                let mut flags = Vec::new();
                if course.is_locked() {
                    flags.push("locked");
                }
                if course.prereq_override {
                    flags.push("override");
                }
                let flags = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", flags.join(", ")).dim()
                };
                println!(
                    "    {:<10} {}{flags}",
                    course.code.as_str().tagged(course.color),
                    policy.credit_hours(&course.code)
                );
            }
        }

        println!();
        let total: u32 = summaries.iter().map(|s| s.credits).sum();
        println!("Total credits: {total}");

        if !planner.transfer_credits().is_empty() {
            println!(
                "Transfer credits: {}",
                planner.transfer_credits().join(", ").dim()
            );
        }

        let warnings = summaries.iter().filter(|s| s.is_warning()).count();
        if warnings == 0 {
            println!("Load warnings: {} ✅", "0".success());
        } else {
            println!("Load warnings: {} ⚠️", warnings.to_string().warning());
        }
    }
}

fn print_semester(semester: &Semester, summary: &SemesterSummary, narrow: bool) {
    let name = semester.code.to_string().tagged(semester.color);
    let lock = if summary.locked { " 🔒" } else { "" };
    let load = load_label(summary.load);

    if narrow {
        println!("{name}{lock}");
        println!("  {} credits, {load}", summary.credits);
    } else {
        println!(
            "{name:<14} {:>3} credits  {load}{lock}",
            summary.credits
        );
    }
}
