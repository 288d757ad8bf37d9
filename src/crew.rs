use tracing::info;

use crate::models::PipelineError;
use crate::tasks::{Task, TaskRecord};

/// State machine for one report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// Result of a completed run: the synthesis task's text plus the full
/// accumulated context for audit.
#[derive(Debug, Clone)]
pub struct CrewOutput {
    pub final_output: String,
    pub transcript: Vec<TaskRecord>,
}

/// Executes tasks strictly in declaration order, threading each task's output
/// into the prompt context of every later task. The dependency graph is a
/// line, so cycles and deadlock are impossible by construction.
pub struct Crew {
    tasks: Vec<Task>,
    status: RunStatus,
}

impl Crew {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            status: RunStatus::Pending,
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Run every task exactly once. A generation failure aborts the run and
    /// discards partial output; the final report needs all prior analyses,
    /// so a partial transcript is not a usable result.
    pub async fn kickoff(&mut self) -> Result<CrewOutput, PipelineError> {
        if self.tasks.is_empty() {
            self.status = RunStatus::Failed;
            return Err(PipelineError::EmptyPipeline);
        }

        self.status = RunStatus::Running;
        let mut context: Vec<TaskRecord> = Vec::with_capacity(self.tasks.len());

        for (index, task) in self.tasks.iter().enumerate() {
            let role = task.agent().role();
            info!(task = index + 1, total = self.tasks.len(), role, "executing task");

            match task.agent().execute(task, &context).await {
                Ok(output) => {
                    context.push(TaskRecord {
                        role: role.to_string(),
                        output,
                    });
                }
                Err(source) => {
                    self.status = RunStatus::Failed;
                    return Err(PipelineError::GenerationFailed {
                        role: role.to_string(),
                        source,
                    });
                }
            }
        }

        self.status = RunStatus::Completed;
        let final_output = context
            .last()
            .map(|record| record.output.clone())
            .unwrap_or_default();

        Ok(CrewOutput {
            final_output,
            transcript: context,
        })
    }
}
