pub mod dashboard;
pub mod sales;
pub mod customers;
pub mod inventory;
pub mod staff;
