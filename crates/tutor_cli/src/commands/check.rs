//! `check` subcommand: solve a task bank and compare with its ground truth.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use serde_json::Value;
use tutor_api_models::{SolutionCore, TaskDescriptor};
use tutor_engine::{verify, Router, Verdict};

use super::{read_json, task_from_value, EXIT_OK, EXIT_UNSOLVED};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON file with an array of task records
    pub file: PathBuf,

    /// Also list tasks whose answers match
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckSummary {
    pub total: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub failed: usize,
    pub without_answer: usize,
}

impl CheckSummary {
    pub fn is_clean(&self) -> bool {
        self.mismatched == 0 && self.failed == 0
    }
}

fn report(task: &TaskDescriptor, core: &SolutionCore, verdict: &Verdict, verbose: bool) {
    match verdict {
        Verdict::Match if verbose => println!("ok       {}", task.id),
        Verdict::Match => {}
        Verdict::NoGroundTruth => println!("no-answer {} → {}", task.id, core.final_answer.value_display),
        Verdict::Mismatch { expected, actual } => {
            println!("MISMATCH {}: expected {}, got {}", task.id, expected, actual)
        }
        Verdict::Unsolved => {
            let (kind, message) = core
                .failure
                .as_ref()
                .map(|f| (f.kind.as_str(), f.message.as_str()))
                .unwrap_or(("unknown", ""));
            println!("FAILED   {} [{}]: {}", task.id, kind, message)
        }
    }
}

pub fn summarize(tasks: &[TaskDescriptor], cores: &[SolutionCore], verbose: bool) -> CheckSummary {
    let mut summary = CheckSummary {
        total: tasks.len(),
        ..CheckSummary::default()
    };
    for (task, core) in tasks.iter().zip(cores) {
        let verdict = verify(task, core);
        report(task, core, &verdict, verbose);
        match verdict {
            Verdict::Match => summary.matched += 1,
            Verdict::Mismatch { .. } => summary.mismatched += 1,
            Verdict::Unsolved => summary.failed += 1,
            Verdict::NoGroundTruth => summary.without_answer += 1,
        }
    }
    summary
}

pub fn run(args: &CheckArgs, router: &Router) -> Result<u8> {
    let tasks = match read_json(&args.file)? {
        Value::Array(items) => items
            .into_iter()
            .map(task_from_value)
            .collect::<Result<Vec<_>>>()?,
        _ => bail!("{} must contain a JSON array of task records", args.file.display()),
    };

    tracing::info!(target: "check", tasks = tasks.len(), "check_started");
    let cores = router.dispatch_batch(&tasks);
    let summary = summarize(&tasks, &cores, args.verbose);

    println!(
        "checked {}: {} matched, {} mismatched, {} failed, {} without answer",
        summary.total, summary.matched, summary.mismatched, summary.failed, summary.without_answer
    );

    Ok(if summary.is_clean() { EXIT_OK } else { EXIT_UNSOLVED })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn shifted(id: &str, answer: Value) -> TaskDescriptor {
        let params = json!({"p": 1, "m": 2, "sign": "<"});
        let parameters: Map<String, Value> = params.as_object().cloned().unwrap_or_default();
        TaskDescriptor::new(id, 13, "rational_inequalities", "shifted_square", parameters).with_answer(answer)
    }

    #[test]
    fn summary_counts_each_verdict() {
        let router = Router::with_defaults();
        let tasks = vec![
            shifted("good", json!("(1; 3)")),
            shifted("bad", json!("(1; 4)")),
            TaskDescriptor::new("unknown", 6, "fractions", "nope", Map::new()),
            TaskDescriptor::new("free", 13, "rational_inequalities", "shifted_square", {
                let mut m = Map::new();
                m.insert("p".into(), json!(0));
                m.insert("m".into(), json!(1));
                m.insert("sign".into(), json!(">"));
                m
            }),
        ];
        let cores = router.dispatch_batch(&tasks);
        let summary = summarize(&tasks, &cores, false);
        assert_eq!(
            summary,
            CheckSummary {
                total: 4,
                matched: 1,
                mismatched: 1,
                failed: 1,
                without_answer: 1,
            }
        );
        assert!(!summary.is_clean());
    }
}
