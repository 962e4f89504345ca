use anyhow::Context;
use planner::{Change, PlanSink};
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Position of the major to edit (1 is the first)
    #[arg(requires = "name")]
    position: Option<usize>,

    /// The new name of the major
    name: Option<String>,
}

impl Command {
    /// Renames a major.
    ///
    /// The session is updated first and only the major is written back, so a
    /// failed write does not disturb the rest of the plan file.
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let mut session = workspace.open()?;

        let (Some(position), Some(name)) = (self.position, self.name) else {
            if session.planner.majors().is_empty() {
                println!("The plan has no majors");
            }
            for (index, major) in session.planner.majors().iter().enumerate() {
                println!("{} {major}", format!("{}.", index + 1).dim());
            }
            return Ok(());
        };

        let index = position
            .checked_sub(1)
            .ok_or_else(|| anyhow::anyhow!("Majors are numbered from 1"))?;

        match session.planner.set_major(index, name.clone()) {
            Change::Applied => {
                session
                    .file
                    .update_major(index, &name)
                    .context("Failed to save major")?;
                println!("{}", format!("Major {position} is now {name}").success());
            }
            Change::Unchanged => println!("Major {position} is already {name}"),
            Change::Rejected(rejection) => anyhow::bail!(session.explain(&rejection)),
        }
        Ok(())
    }
}
