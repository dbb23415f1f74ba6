use crate::{
    errors::StoreError,
    repositories::{AssignmentStore, EmployeeDirectory},
    structs::{
        employees::Employee,
        planning::{Assignment, AssignmentDraft},
    },
};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};
use uuid::Uuid;

/// 測試用的記憶體儲存層，同時實作排班與員工兩個介面
#[derive(Default)]
pub struct MemoryStore {
    shifts: Mutex<Vec<Assignment>>,
    employees: Mutex<Vec<Employee>>,
    fail_writes: AtomicBool,
    insert_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        let store = Self::default();
        *store.employees.lock().unwrap() = employees;
        store
    }

    pub fn add_shift(&self, shift: Assignment) {
        self.shifts.lock().unwrap().push(shift);
    }

    pub fn shifts(&self) -> Vec<Assignment> {
        self.shifts.lock().unwrap().clone()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }

    fn sorted_employees(&self, filter: impl Fn(&Employee) -> bool) -> Vec<Employee> {
        let mut employees: Vec<Employee> = self
            .employees
            .lock()
            .unwrap()
            .iter()
            .filter(|employee| filter(employee))
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        employees
    }
}

#[async_trait]
impl AssignmentStore for MemoryStore {
    async fn fetch_week(&self, year: i32, week: i32) -> Result<Vec<Assignment>, StoreError> {
        Ok(self
            .shifts
            .lock()
            .unwrap()
            .iter()
            .filter(|shift| shift.year == year && shift.week == week)
            .cloned()
            .collect())
    }

    async fn insert_many(
        &self,
        drafts: Vec<AssignmentDraft>,
    ) -> Result<Vec<Assignment>, StoreError> {
        self.check_writable()?;
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        let inserted: Vec<Assignment> = drafts
            .into_iter()
            .map(|draft| draft.into_assignment(Uuid::new_v4()))
            .collect();
        self.shifts.lock().unwrap().extend(inserted.iter().cloned());

        Ok(inserted)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        self.check_writable()?;
        self.shifts.lock().unwrap().retain(|shift| shift.id != id);
        Ok(())
    }
}

#[async_trait]
impl EmployeeDirectory for MemoryStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.sorted_employees(|_| true))
    }

    async fn list_active(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.sorted_employees(|employee| employee.active))
    }

    async fn list_active_with_fixed_days(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.sorted_employees(|employee| employee.active && employee.fixed_days.is_some()))
    }
}
