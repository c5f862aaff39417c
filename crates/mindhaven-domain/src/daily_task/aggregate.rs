use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{TaskTemplate, TASKS_PER_DAY};
use crate::check_in::DateKey;
use crate::shared::{DomainError, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTask {
    pub label: String,
    pub target_route: String,
    pub visited: bool,
    pub done: bool,
}

impl DailyTask {
    fn from_template(template: &TaskTemplate) -> Self {
        Self {
            label: template.label.clone(),
            target_route: template.target_route.clone(),
            visited: false,
            done: false,
        }
    }
}

/// What a task action actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTransition {
    Visited,
    /// Visiting an already visited task changes nothing.
    AlreadyVisited,
    Completed,
    Uncompleted,
}

impl TaskTransition {
    /// Sign of the ledger credit this transition owes: +1, -1 or 0.
    pub fn credit_sign(&self) -> i64 {
        match self {
            TaskTransition::Completed => 1,
            TaskTransition::Uncompleted => -1,
            TaskTransition::Visited | TaskTransition::AlreadyVisited => 0,
        }
    }

    pub fn changes_state(&self) -> bool {
        !matches!(self, TaskTransition::AlreadyVisited)
    }
}

/// The three tasks a user holds for one day.
///
/// `revision` is the optimistic-concurrency token: the store only accepts an
/// update whose revision matches what it holds, then bumps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTaskSet {
    user_id: UserId,
    date: DateKey,
    tasks: Vec<DailyTask>,
    revision: i64,
}

impl DailyTaskSet {
    /// Draw `TASKS_PER_DAY` distinct templates uniformly without replacement.
    pub fn draw<R: Rng + ?Sized>(
        user_id: UserId,
        date: DateKey,
        pool: &[TaskTemplate],
        rng: &mut R,
    ) -> Result<Self, DomainError> {
        if pool.len() < TASKS_PER_DAY {
            return Err(DomainError::Validation(format!(
                "Task pool needs at least {} entries, got {}",
                TASKS_PER_DAY,
                pool.len()
            )));
        }

        let tasks: Vec<DailyTask> = pool
            .choose_multiple(rng, TASKS_PER_DAY)
            .map(DailyTask::from_template)
            .collect();

        debug!(
            "[tasks] drew daily tasks user_id={} date={} labels={:?}",
            user_id,
            date,
            tasks.iter().map(|t| t.label.as_str()).collect::<Vec<_>>()
        );

        Ok(Self {
            user_id,
            date,
            tasks,
            revision: 0,
        })
    }

    pub fn restore(user_id: UserId, date: DateKey, tasks: Vec<DailyTask>, revision: i64) -> Self {
        Self {
            user_id,
            date,
            tasks,
            revision,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date(&self) -> DateKey {
        self.date
    }

    pub fn tasks(&self) -> &[DailyTask] {
        &self.tasks
    }

    pub fn revision(&self) -> i64 {
        self.revision
    }

    /// The set as stored after an accepted compare-and-swap.
    pub fn with_next_revision(mut self) -> Self {
        self.revision += 1;
        self
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }

    fn task_mut(&mut self, index: usize) -> Result<&mut DailyTask, DomainError> {
        let len = self.tasks.len();
        self.tasks.get_mut(index).ok_or_else(|| {
            DomainError::InvalidInput(format!(
                "Task index {} out of range (0..{})",
                index, len
            ))
        })
    }

    /// Mark a task visited. Monotonic: visiting twice is a no-op.
    pub fn visit(&mut self, index: usize) -> Result<TaskTransition, DomainError> {
        let task = self.task_mut(index)?;
        if task.visited {
            return Ok(TaskTransition::AlreadyVisited);
        }
        task.visited = true;
        Ok(TaskTransition::Visited)
    }

    /// Mark a visited task done. Owes exactly one credit.
    pub fn complete(&mut self, index: usize) -> Result<TaskTransition, DomainError> {
        let task = self.task_mut(index)?;
        if !task.visited {
            return Err(DomainError::InvalidTransition(format!(
                "Task {} must be visited before it can be marked done",
                index
            )));
        }
        if task.done {
            return Err(DomainError::InvalidTransition(format!(
                "Task {} is already done",
                index
            )));
        }
        task.done = true;
        Ok(TaskTransition::Completed)
    }

    /// Un-mark a done task. Owes exactly one debit.
    pub fn uncomplete(&mut self, index: usize) -> Result<TaskTransition, DomainError> {
        let task = self.task_mut(index)?;
        if !task.done {
            return Err(DomainError::InvalidTransition(format!(
                "Task {} is not done",
                index
            )));
        }
        task.done = false;
        Ok(TaskTransition::Uncompleted)
    }

    /// Reverse a transition previously applied to this set.
    ///
    /// Only done/undone are reversible; `visited` never reverts.
    pub fn undo(&mut self, index: usize, transition: TaskTransition) -> Result<(), DomainError> {
        let task = self.task_mut(index)?;
        match transition {
            TaskTransition::Completed => task.done = false,
            TaskTransition::Uncompleted => task.done = true,
            TaskTransition::Visited | TaskTransition::AlreadyVisited => {}
        }
        Ok(())
    }
}
