pub mod check_in_commands;
pub mod command_handler;
pub mod handlers;
pub mod ledger_commands;
pub mod streak_commands;
pub mod task_commands;
