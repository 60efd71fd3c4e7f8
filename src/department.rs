use std::fmt;

use rusqlite::params;

use crate::data_handling::{Result, Store};
use crate::selection::Choice;
use crate::tabulate::Tabular;

#[derive(Debug, PartialEq, Eq)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Dept. #{}: {}", self.id, self.name)
    }
}

impl Tabular for Department {
    fn titles() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

impl Store {
    pub fn list_departments(&self) -> Result<Vec<Department>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, name FROM department ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Department {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut departments = Vec::new();
        for row in rows {
            departments.push(row?);
        }

        Ok(departments)
    }

    /// Current department names paired with their ids, for selection prompts.
    pub fn department_choices(&self) -> Result<Vec<Choice<i64>>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT name, id FROM department ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(Choice::new(row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut choices = Vec::new();
        for row in rows {
            choices.push(row?);
        }

        Ok(choices)
    }

    /// Insert a department as given.  No pre-check: a duplicate name is left
    /// to the store's uniqueness constraint and surfaces as
    /// DataError::Constraint.
    pub fn add_department(&mut self, name: &str) -> Result<()> {
        self.conn()
            .execute("INSERT INTO department (name) VALUES (?1)", params![name])?;
        Ok(())
    }

    /// Delete by id, returning the affected-row count.  Zero rows means the
    /// department vanished since it was listed; deleting one that still owns
    /// roles fails the foreign key and leaves it in place.
    pub fn delete_department(&mut self, id: i64) -> Result<usize> {
        let affected = self
            .conn()
            .execute("DELETE FROM department WHERE id = ?1", params![id])?;
        Ok(affected)
    }
}
