//! Query Handlers

mod employee_handlers;

pub use employee_handlers::{GetEmployeeHandler, ListEmployeesHandler};
