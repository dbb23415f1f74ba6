pub mod employees;
pub mod planning;
