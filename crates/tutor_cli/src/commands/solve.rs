//! `solve` subcommand: one task in, one solution out.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tutor_engine::Router;

use super::{read_json, task_from_value, EXIT_OK, EXIT_UNSOLVED};
use crate::render::render_text;

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// JSON file with a task descriptor or task-bank record
    pub file: PathBuf,

    /// Print a plain-text rendering instead of JSON
    #[arg(long, default_value_t = false)]
    pub text: bool,
}

pub fn run(args: &SolveArgs, router: &Router) -> Result<u8> {
    let task = task_from_value(read_json(&args.file)?)?;
    let core = router.dispatch(&task);

    if args.text {
        print!("{}", render_text(&core));
    } else {
        println!("{}", serde_json::to_string_pretty(&core)?);
    }

    Ok(if core.is_success() { EXIT_OK } else { EXIT_UNSOLVED })
}
