//! Application Commands - CQRS 命令

pub mod handlers;

mod employee_commands;

pub use employee_commands::{CreateEmployee, DeleteEmployee, UpdateEmployee};
