use std::{
    io::{self, BufRead},
    path::{Path, PathBuf},
};

mod add;
mod bank;
mod bulk;
mod clear;
mod color;
mod init;
mod lock;
mod major;
mod r#move;
mod prereq;
mod remove;
mod requirements;
mod status;
mod terminal;
mod transfer;

use anyhow::Context;
use clap::ArgAction;
use planner::{
    CatalogCode, Change, Color, Config, CourseId, PlanFile, PlanSink, Planner, Rejection, Season,
    SemesterCode, SemesterId,
};
use tracing::{debug, instrument};

/// Name of the configuration file looked up next to the plan file.
const CONFIG_FILE: &str = "planner.toml";

/// Parse a term code, accepting both `2024f` and `Fall 2024`.
fn parse_term(s: &str) -> Result<SemesterCode, String> {
    let s = s.trim();
    let mut words = s.split_whitespace();
    if let (Some(name), Some(year), None) = (words.next(), words.next(), words.next()) {
        let season =
            Season::from_name(name).ok_or_else(|| format!("Unknown season '{name}' in '{s}'"))?;
        let year = year
            .parse()
            .map_err(|_| format!("Invalid year '{year}' in '{s}'"))?;
        return Ok(SemesterCode::new(year, season));
    }
    s.parse().map_err(|e| format!("{e}"))
}

/// Parse a catalog code, normalizing `cs1336` to `CS 1336`.
fn parse_code(s: &str) -> Result<CatalogCode, String> {
    let upper = s.trim().to_uppercase();
    let normalized = match upper.find(|c: char| c.is_ascii_digit()) {
        Some(split) if split > 0 && !upper.contains(char::is_whitespace) => {
            format!("{} {}", &upper[..split], &upper[split..])
        }
        _ => upper,
    };
    CatalogCode::new(normalized).map_err(|e| format!("{e}"))
}

fn parse_color(s: &str) -> Result<Color, String> {
    s.parse().map_err(|e| {
        let palette: Vec<&str> = Color::PALETTE.iter().map(|c| c.name()).collect();
        format!("{e} (expected one of: {})", palette.join(", "))
    })
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The plan file to operate on
    #[arg(short, long, default_value = "plan.yaml", global = true)]
    plan: PathBuf,

    /// Configuration file (defaults to planner.toml next to the plan)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let workspace = Workspace {
            plan: self.plan,
            config: self.config,
        };
        self.command.unwrap_or_default().run(&workspace)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false)
            .with_writer(io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show semesters, credit totals and load warnings (default)
    Status(status::Command),

    /// Create a new plan spanning a range of terms
    Init(init::Command),

    /// Place catalog courses in a semester
    Add(add::Command),

    /// Move a course to another semester, or back to the bank
    Move(r#move::Command),

    /// Remove a course from a semester
    Remove(remove::Command),

    /// Remove every unlocked course from a semester
    Clear(clear::Command),

    /// Delete or move a selection of courses in one step
    #[command(subcommand)]
    Bulk(bulk::Command),

    /// Lock a semester, or a course within it
    ///
    /// Locked semesters and courses cannot be changed by moves or bulk
    /// actions.
    Lock(lock::Command),

    /// Unlock a semester, or a course within it
    Unlock(lock::Command),

    /// Set the colour tag of a semester or course
    Color(color::Command),

    /// Mark a course as taken without its prerequisites
    Override(prereq::Command),

    /// Search a requirement's eligible courses
    Bank(bank::Command),

    /// Show degree requirements and the credit hours satisfied
    Requirements(requirements::Command),

    /// Show or edit the plan's majors
    Major(major::Command),

    /// List, add or remove transfer credits
    #[command(subcommand)]
    Transfer(transfer::Command),
}

impl Default for Command {
    fn default() -> Self {
        Self::Status(status::Command::default())
    }
}

impl Command {
    fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(workspace),
            Self::Init(command) => command.run(workspace),
            Self::Add(command) => command.run(workspace),
            Self::Move(command) => command.run(workspace),
            Self::Remove(command) => command.run(workspace),
            Self::Clear(command) => command.run(workspace),
            Self::Bulk(command) => command.run(workspace),
            Self::Lock(command) => command.run(workspace, true),
            Self::Unlock(command) => command.run(workspace, false),
            Self::Color(command) => command.run(workspace),
            Self::Override(command) => command.run(workspace),
            Self::Bank(command) => command.run(workspace),
            Self::Requirements(command) => command.run(workspace),
            Self::Major(command) => command.run(workspace),
            Self::Transfer(command) => command.run(workspace),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Where the plan and its configuration live.
#[derive(Debug, Clone)]
pub struct Workspace {
    plan: PathBuf,
    config: Option<PathBuf>,
}

impl Workspace {
    #[cfg(test)]
    fn new(plan: PathBuf) -> Self {
        Self { plan, config: None }
    }

    fn plan_path(&self) -> &Path {
        &self.plan
    }

    /// The configuration file: the explicit one, or `planner.toml` next to
    /// the plan file.
    fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(|| {
            self.plan
                .parent()
                .map_or_else(|| PathBuf::from(CONFIG_FILE), |dir| dir.join(CONFIG_FILE))
        })
    }

    /// Loads the configuration.
    ///
    /// An explicit `--config` must exist. The implicit file is optional and
    /// defaults apply when it is missing.
    fn config(&self) -> anyhow::Result<Config> {
        let path = self.config_path();
        if self.config.is_none() && !path.exists() {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Config::default());
        }
        Config::load(&path).map_err(anyhow::Error::msg)
    }

    /// Loads the plan into a planning session.
    #[instrument(level = "debug", skip(self))]
    fn open(&self) -> anyhow::Result<Session> {
        let file = PlanFile::new(&self.plan);
        let snapshot = file
            .load()
            .with_context(|| format!("Failed to open plan '{}'", self.plan.display()))?;

        Ok(Session {
            file,
            planner: Planner::from_snapshot(snapshot),
            config: self.config()?,
        })
    }
}

/// A loaded plan, the file it came from, and the active configuration.
struct Session {
    file: PlanFile,
    planner: Planner,
    config: Config,
}

impl Session {
    /// Resolves a term code to the semester holding it.
    fn semester(&self, code: SemesterCode) -> anyhow::Result<SemesterId> {
        self.planner
            .semester_by_code(code)
            .map(|semester| semester.id)
            .ok_or_else(|| anyhow::anyhow!("No {code} semester in the plan"))
    }

    /// Resolves the first placement of a catalog course in a semester.
    fn course(&self, semester: SemesterId, code: &CatalogCode) -> anyhow::Result<CourseId> {
        let holder = self
            .planner
            .semester(semester)
            .ok_or_else(|| anyhow::anyhow!("Semester {semester} not found"))?;
        holder
            .courses_with_code(code)
            .next()
            .map(|course| course.id)
            .ok_or_else(|| anyhow::anyhow!("{code} is not planned in {}", holder.code))
    }

    /// Persists the plan if the change applied.
    ///
    /// Rejected changes become errors. Returns whether anything changed.
    fn commit(&mut self, change: Change) -> anyhow::Result<bool> {
        match change {
            Change::Applied => {
                self.save()?;
                Ok(true)
            }
            Change::Unchanged => Ok(false),
            Change::Rejected(rejection) => Err(anyhow::anyhow!(self.explain(&rejection))),
        }
    }

    fn save(&mut self) -> anyhow::Result<()> {
        let snapshot = self.planner.snapshot();
        self.file
            .update_plan(&snapshot)
            .with_context(|| format!("Failed to save plan '{}'", self.file.path().display()))
    }

    /// Describes a rejection using term and catalog codes instead of ids.
    fn explain(&self, rejection: &Rejection) -> String {
        match rejection {
            Rejection::SemesterLocked(id) => format!("{} is locked", self.term_name(*id)),
            Rejection::CourseLocked(id) => format!("{} is locked", self.course_name(*id)),
            Rejection::UnknownCatalogCode { semester, code } => {
                format!("{code} is not planned in {}", self.term_name(*semester))
            }
            Rejection::DuplicateCourse(id) => format!(
                "{} is already in the target semester",
                self.course_name(*id)
            ),
            Rejection::UnknownMajor(index) => format!("No major {}", index + 1),
            _ => rejection.to_string(),
        }
    }

    fn term_name(&self, id: SemesterId) -> String {
        self.planner
            .semester(id)
            .map_or_else(|| id.to_string(), |semester| semester.code.to_string())
    }

    fn course_name(&self, id: CourseId) -> String {
        self.planner
            .locate(id)
            .and_then(|semester| semester.course(id))
            .map_or_else(|| id.to_string(), |course| course.code.to_string())
    }
}

fn prompt_to_proceed() -> io::Result<()> {
    eprint!("\nProceed? (y/N) ");
    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    if !line.trim().eq_ignore_ascii_case("y") {
        println!("Cancelled");
        std::process::exit(130);
    }
    Ok(())
}
