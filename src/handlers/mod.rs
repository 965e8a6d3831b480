pub mod employee;
pub mod employees;
pub mod register;

pub use employee::employee_handler;
pub use employees::employees_handler;
pub use register::register_handler;
