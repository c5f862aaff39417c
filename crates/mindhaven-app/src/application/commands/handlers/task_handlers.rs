use async_trait::async_trait;
use log::{error, info, warn};
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::task_commands::*;
use crate::application::dtos::DailyTaskSetDto;
use crate::application::services::{TaskAssigner, UserWriteLocks};
use mindhaven_domain::daily_task::{DailyTaskRepository, DailyTaskSet, TaskTransition};
use mindhaven_domain::ledger::LedgerRepository;
use mindhaven_domain::shared::{DomainError, UserId};

#[derive(Debug, Clone, Copy)]
enum TaskAction {
    Visit,
    Complete,
    Uncomplete,
}

impl TaskAction {
    fn apply(self, set: &mut DailyTaskSet, index: usize) -> Result<TaskTransition, DomainError> {
        match self {
            TaskAction::Visit => set.visit(index),
            TaskAction::Complete => set.complete(index),
            TaskAction::Uncomplete => set.uncomplete(index),
        }
    }
}

/// Handles visit/complete/uncomplete on today's tasks.
///
/// Each accepted completion credits the ledger once and each accepted
/// un-completion debits it once. The task write and the ledger write are two
/// stores, so a failed ledger write is compensated by reverting the task, and
/// a revert that cannot be stored falls back to retrying the ledger write.
pub struct TaskCommandHandler {
    assigner: Arc<TaskAssigner>,
    task_repo: Arc<dyn DailyTaskRepository>,
    ledger_repo: Arc<dyn LedgerRepository>,
    locks: Arc<UserWriteLocks>,
    completion_points: i64,
    max_write_attempts: u32,
}

impl TaskCommandHandler {
    pub fn new(
        assigner: Arc<TaskAssigner>,
        task_repo: Arc<dyn DailyTaskRepository>,
        ledger_repo: Arc<dyn LedgerRepository>,
        locks: Arc<UserWriteLocks>,
        completion_points: i64,
        max_write_attempts: u32,
    ) -> Self {
        Self {
            assigner,
            task_repo,
            ledger_repo,
            locks,
            completion_points,
            max_write_attempts: max_write_attempts.max(1),
        }
    }

    async fn run(
        &self,
        user_id: &str,
        index: usize,
        action: TaskAction,
    ) -> Result<TaskActionResult, DomainError> {
        let user_id = UserId::from_string(user_id);
        let _guard = self.locks.acquire(&user_id).await;

        let (stored, transition) = self.write_transition(&user_id, index, action).await?;

        let points_delta = transition.credit_sign() * self.completion_points;
        if points_delta == 0 {
            return Ok(TaskActionResult {
                tasks: DailyTaskSetDto::from(&stored),
                points_delta: 0,
                balance: None,
            });
        }

        match self.ledger_repo.increment_points(&user_id, points_delta).await {
            Ok(balance) => {
                info!(
                    "[tasks] {:?} task user_id={} index={} delta={} balance={}",
                    transition, user_id, index, points_delta, balance
                );
                Ok(TaskActionResult {
                    tasks: DailyTaskSetDto::from(&stored),
                    points_delta,
                    balance: Some(balance),
                })
            }
            Err(ledger_err) => {
                warn!(
                    "[tasks] ledger update failed, reverting task user_id={} index={} err={}",
                    user_id, index, ledger_err
                );
                if self.compensate(&stored, index, transition).await {
                    return Err(DomainError::StoreUnavailable(format!(
                        "Points could not be updated, task change was reverted: {}",
                        ledger_err.message()
                    )));
                }
                self.settle_ledger(stored, index, points_delta).await
            }
        }
    }

    /// The task change is stuck in the store, so owe the ledger instead:
    /// one more attempt at the same delta keeps tasks and points in step.
    async fn settle_ledger(
        &self,
        stored: DailyTaskSet,
        index: usize,
        points_delta: i64,
    ) -> Result<TaskActionResult, DomainError> {
        match self
            .ledger_repo
            .increment_points(stored.user_id(), points_delta)
            .await
        {
            Ok(balance) => {
                warn!(
                    "[tasks] ledger settled after failed revert user_id={} index={} delta={} balance={}",
                    stored.user_id(),
                    index,
                    points_delta,
                    balance
                );
                Ok(TaskActionResult {
                    tasks: DailyTaskSetDto::from(&stored),
                    points_delta,
                    balance: Some(balance),
                })
            }
            Err(e) => {
                error!(
                    "[tasks] task and ledger out of step user_id={} index={} owed_delta={} err={}",
                    stored.user_id(),
                    index,
                    points_delta,
                    e
                );
                Err(DomainError::StoreUnavailable(format!(
                    "Points could not be updated and the task change could not be reverted: {}",
                    e.message()
                )))
            }
        }
    }

    /// Apply the action to today's set and store it with optimistic
    /// concurrency, re-reading on a lost compare-and-swap.
    async fn write_transition(
        &self,
        user_id: &UserId,
        index: usize,
        action: TaskAction,
    ) -> Result<(DailyTaskSet, TaskTransition), DomainError> {
        let mut attempt = 0;
        loop {
            attempt += 1;

            let current = self.assigner.today_tasks(user_id).await?;
            let mut next = current.clone();
            let transition = action.apply(&mut next, index)?;

            if !transition.changes_state() {
                return Ok((current, transition));
            }

            if self.task_repo.update_if_revision(&next).await? {
                return Ok((next.with_next_revision(), transition));
            }

            if attempt >= self.max_write_attempts {
                warn!(
                    "[tasks] giving up after {} conflicting writes user_id={} index={}",
                    attempt, user_id, index
                );
                return Err(DomainError::Conflict(format!(
                    "Daily tasks for {} changed concurrently, please retry",
                    user_id
                )));
            }
            warn!(
                "[tasks] revision conflict, retrying user_id={} attempt={}",
                user_id, attempt
            );
        }
    }

    /// Revert `transition` on the stored set. Lost races and failed writes
    /// re-read the set and try again, up to `max_write_attempts`.
    async fn compensate(
        &self,
        stored: &DailyTaskSet,
        index: usize,
        transition: TaskTransition,
    ) -> bool {
        let user_id = stored.user_id();
        let mut current = stored.clone();

        for attempt in 1..=self.max_write_attempts {
            if !still_applied(&current, index, transition) {
                info!(
                    "[tasks] nothing left to compensate user_id={} index={}",
                    user_id, index
                );
                return true;
            }

            let mut reverted = current.clone();
            if let Err(e) = reverted.undo(index, transition) {
                error!("[tasks] cannot build compensation user_id={} err={}", user_id, e);
                return false;
            }

            match self.task_repo.update_if_revision(&reverted).await {
                Ok(true) => {
                    info!(
                        "[tasks] compensation applied user_id={} index={} attempt={}",
                        user_id, index, attempt
                    );
                    return true;
                }
                Ok(false) => warn!(
                    "[tasks] compensation lost a revision race user_id={} attempt={}",
                    user_id, attempt
                ),
                Err(e) => warn!(
                    "[tasks] compensation write failed user_id={} attempt={} err={}",
                    user_id, attempt, e
                ),
            }

            match self.task_repo.find(user_id, stored.date()).await {
                Ok(Some(fresh)) => current = fresh,
                Ok(None) => {
                    error!(
                        "[tasks] task set vanished during compensation user_id={} date={}",
                        user_id,
                        stored.date()
                    );
                    return false;
                }
                Err(e) => warn!(
                    "[tasks] re-read before compensation failed user_id={} err={}",
                    user_id, e
                ),
            }
        }

        false
    }
}

/// Whether the stored task still shows the effect of `transition`.
fn still_applied(set: &DailyTaskSet, index: usize, transition: TaskTransition) -> bool {
    set.tasks().get(index).is_some_and(|task| match transition {
        TaskTransition::Completed => task.done,
        TaskTransition::Uncompleted => !task.done,
        TaskTransition::Visited | TaskTransition::AlreadyVisited => false,
    })
}

#[async_trait]
impl CommandHandler<VisitTaskCommand> for TaskCommandHandler {
    type Result = TaskActionResult;

    async fn handle(&self, cmd: VisitTaskCommand) -> Result<Self::Result, DomainError> {
        self.run(&cmd.user_id, cmd.task_index, TaskAction::Visit).await
    }
}

#[async_trait]
impl CommandHandler<CompleteTaskCommand> for TaskCommandHandler {
    type Result = TaskActionResult;

    async fn handle(&self, cmd: CompleteTaskCommand) -> Result<Self::Result, DomainError> {
        self.run(&cmd.user_id, cmd.task_index, TaskAction::Complete)
            .await
    }
}

#[async_trait]
impl CommandHandler<UncompleteTaskCommand> for TaskCommandHandler {
    type Result = TaskActionResult;

    async fn handle(&self, cmd: UncompleteTaskCommand) -> Result<Self::Result, DomainError> {
        self.run(&cmd.user_id, cmd.task_index, TaskAction::Uncomplete)
            .await
    }
}
