//! Command Handlers

mod employee_handlers;

pub use employee_handlers::{
    CreateEmployeeHandler, CreateEmployeeResponse, DeleteEmployeeHandler, UpdateEmployeeHandler,
    UpdateEmployeeResponse,
};
