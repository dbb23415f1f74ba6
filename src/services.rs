pub mod aggregate;
pub mod calendar;
pub mod navigation;
pub mod planning;
pub mod reconcile;
