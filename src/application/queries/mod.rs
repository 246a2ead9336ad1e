//! Application Queries - CQRS 查询

pub mod handlers;

mod employee_queries;

pub use employee_queries::{GetEmployee, ListEmployees};
