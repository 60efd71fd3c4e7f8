use std::fmt;

use rusqlite::params;

use crate::data_handling::{Result, Store};
use crate::selection::Choice;
use crate::tabulate::Tabular;

/// One row of the employee listing: the employee joined to role and
/// department, with the manager's full name resolved through a self join.
/// `manager` is None for top-level employees.
#[derive(Debug, PartialEq, Eq)]
pub struct EmployeeListing {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub department: String,
    pub salary: i64,
    pub manager: Option<String>,
}

impl fmt::Display for EmployeeListing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}, {}: {} ({})",
            self.last_name, self.first_name, self.title, self.department
        )
    }
}

impl Tabular for EmployeeListing {
    fn titles() -> &'static [&'static str] {
        &[
            "id",
            "first_name",
            "last_name",
            "title",
            "department",
            "salary",
            "manager",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.title.clone(),
            self.department.clone(),
            self.salary.to_string(),
            self.manager.clone().unwrap_or_default(),
        ]
    }
}

impl Store {
    /// Every employee appears exactly once: role and department are inner
    /// joins (both required columns), the manager is a left join so
    /// employees without one still show up, with an empty manager field.
    pub fn list_employees(&self) -> Result<Vec<EmployeeListing>> {
        let mut stmt = self.conn().prepare(
            "SELECT e.id, e.first_name, e.last_name, r.title, d.name, r.salary,
                    m.first_name || ' ' || m.last_name
             FROM employee e
             JOIN role r ON e.role_id = r.id
             JOIN department d ON r.department_id = d.id
             LEFT JOIN employee m ON e.manager_id = m.id
             ORDER BY e.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(EmployeeListing {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                title: row.get(3)?,
                department: row.get(4)?,
                salary: row.get(5)?,
                manager: row.get(6)?,
            })
        })?;

        let mut employees = Vec::new();
        for row in rows {
            employees.push(row?);
        }

        Ok(employees)
    }

    /// Current employees as "First Last" labels paired with their ids.
    pub fn employee_choices(&self) -> Result<Vec<Choice<i64>>> {
        let mut stmt = self.conn().prepare(
            "SELECT first_name || ' ' || last_name, id
             FROM employee
             ORDER BY last_name, first_name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Choice::new(row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut choices = Vec::new();
        for row in rows {
            choices.push(row?);
        }

        Ok(choices)
    }

    /// Manager candidates for a new employee: the sentinel first, then the
    /// employees who have no manager of their own (top-level employees).
    pub fn manager_choices(&self) -> Result<Vec<Choice<Option<i64>>>> {
        let mut stmt = self.conn().prepare(
            "SELECT first_name || ' ' || last_name, id
             FROM employee
             WHERE manager_id IS NULL
             ORDER BY last_name, first_name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Choice::new(
                row.get::<_, String>(0)?,
                Some(row.get::<_, i64>(1)?),
            ))
        })?;

        let mut choices = vec![Choice::no_manager()];
        for row in rows {
            choices.push(row?);
        }

        Ok(choices)
    }

    /// Insert an employee under an existing role.  A stale role or manager
    /// id fails the foreign key and surfaces as DataError::Reference; no
    /// manager id stores null.
    pub fn add_employee(
        &mut self,
        first_name: &str,
        last_name: &str,
        role_id: i64,
        manager_id: Option<i64>,
    ) -> Result<()> {
        self.conn().execute(
            "INSERT INTO employee (first_name, last_name, role_id, manager_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![first_name, last_name, role_id, manager_id],
        )?;
        Ok(())
    }

    /// Reassign an employee's role, returning the affected-row count.  Zero
    /// rows means the employee vanished since it was listed; the caller
    /// reports that as "no match", not as an error.
    pub fn update_employee_role(&mut self, employee_id: i64, role_id: i64) -> Result<usize> {
        let affected = self.conn().execute(
            "UPDATE employee SET role_id = ?1 WHERE id = ?2",
            params![role_id, employee_id],
        )?;
        Ok(affected)
    }

    pub fn delete_employee(&mut self, id: i64) -> Result<usize> {
        let affected = self
            .conn()
            .execute("DELETE FROM employee WHERE id = ?1", params![id])?;
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_handling::DataError;
    use crate::selection::NO_MANAGER;

    fn store_with_role(department: &str, title: &str) -> (Store, i64) {
        let mut store = Store::open_in_memory().unwrap();
        store.add_department(department).unwrap();
        let department_id = store.department_choices().unwrap()[0].key();
        store.add_role(title, 80_000, department_id).unwrap();
        let role_id = store.role_choices().unwrap()[0].key();
        (store, role_id)
    }

    #[test]
    fn no_manager_sentinel_stores_null_and_lists_empty() {
        let (mut store, role) = store_with_role("Engineering", "Engineer");

        store.add_employee("Ada", "Lovelace", role, None).unwrap();

        let listed = store.list_employees().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].manager, None);
    }

    #[test]
    fn one_row_per_employee_with_and_without_manager() {
        let (mut store, role) = store_with_role("Engineering", "Engineer");
        store.add_employee("Ada", "Lovelace", role, None).unwrap();
        let ada = store.employee_choices().unwrap()[0].key();
        store
            .add_employee("Grace", "Hopper", role, Some(ada))
            .unwrap();
        store.add_employee("Alan", "Turing", role, None).unwrap();

        let listed = store.list_employees().unwrap();

        assert_eq!(listed.len(), 3);
        let with_manager = listed.iter().filter(|e| e.manager.is_some()).count();
        assert_eq!(with_manager, 1);
    }

    #[test]
    fn manager_candidates_are_top_level_with_sentinel_first() {
        let (mut store, role) = store_with_role("Engineering", "Engineer");
        store.add_employee("Ada", "Lovelace", role, None).unwrap();
        let ada = store.employee_choices().unwrap()[0].key();
        store
            .add_employee("Grace", "Hopper", role, Some(ada))
            .unwrap();

        let managers = store.manager_choices().unwrap();

        assert_eq!(managers[0].label(), NO_MANAGER);
        assert_eq!(managers[0].key(), None);
        // Grace reports to Ada, so only Ada remains a candidate.
        assert_eq!(managers.len(), 2);
        assert_eq!(managers[1].label(), "Ada Lovelace");
    }

    #[test]
    fn stale_role_id_fails_and_leaves_employee_table_unchanged() {
        let mut store = Store::open_in_memory().unwrap();

        let err = store.add_employee("Ada", "Lovelace", 999, None).unwrap_err();

        assert!(matches!(err, DataError::Reference(_)), "got: {}", err);
        assert!(store.list_employees().unwrap().is_empty());
    }

    #[test]
    fn update_for_a_vanished_employee_is_a_zero_row_no_op() {
        let (mut store, role) = store_with_role("Engineering", "Engineer");

        assert_eq!(store.update_employee_role(999, role).unwrap(), 0);
    }

    #[test]
    fn update_to_a_missing_role_fails_and_changes_nothing() {
        let (mut store, role) = store_with_role("Engineering", "Engineer");
        store.add_employee("Ada", "Lovelace", role, None).unwrap();
        let ada = store.employee_choices().unwrap()[0].key();

        let err = store.update_employee_role(ada, 999).unwrap_err();

        assert!(matches!(err, DataError::Reference(_)), "got: {}", err);
        assert_eq!(store.list_employees().unwrap()[0].title, "Engineer");
    }

    #[test]
    fn deleted_employee_no_longer_listed() {
        let (mut store, role) = store_with_role("Engineering", "Engineer");
        store.add_employee("Ada", "Lovelace", role, None).unwrap();
        let ada = store.employee_choices().unwrap()[0].key();

        assert_eq!(store.delete_employee(ada).unwrap(), 1);
        assert!(store.list_employees().unwrap().is_empty());
    }
}
