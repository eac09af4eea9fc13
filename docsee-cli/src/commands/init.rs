//! `docsee init`

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use docsee_core::registry::{self, InitOutcome, CONFIG_FILENAME};

/// Create docsee.yaml with default settings.
#[derive(Args, Debug)]
pub struct InitArgs {}

impl InitArgs {
    pub fn run(self, root: &Path) -> Result<()> {
        let outcome = registry::init_at(root)
            .with_context(|| format!("failed to create {CONFIG_FILENAME} in {}", root.display()))?;
        match outcome {
            InitOutcome::Created => println!("{} Created {CONFIG_FILENAME}", "✓".green()),
            InitOutcome::AlreadyExists => println!("{CONFIG_FILENAME} already exists"),
        }
        Ok(())
    }
}
