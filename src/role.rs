use std::fmt;

use rusqlite::params;

use crate::data_handling::{Result, Store};
use crate::selection::Choice;
use crate::tabulate::Tabular;

/// One row of the role listing, joined to its owning department.
#[derive(Debug, PartialEq, Eq)]
pub struct RoleListing {
    pub id: i64,
    pub title: String,
    pub department: String,
    pub salary: i64,
}

impl fmt::Display for RoleListing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.department)
    }
}

impl Tabular for RoleListing {
    fn titles() -> &'static [&'static str] {
        &["id", "title", "department", "salary"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.department.clone(),
            self.salary.to_string(),
        ]
    }
}

impl Store {
    pub fn list_roles(&self) -> Result<Vec<RoleListing>> {
        let mut stmt = self.conn().prepare(
            "SELECT r.id, r.title, d.name, r.salary
             FROM role r
             JOIN department d ON r.department_id = d.id
             ORDER BY r.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(RoleListing {
                id: row.get(0)?,
                title: row.get(1)?,
                department: row.get(2)?,
                salary: row.get(3)?,
            })
        })?;

        let mut roles = Vec::new();
        for row in rows {
            roles.push(row?);
        }

        Ok(roles)
    }

    /// Current role titles paired with their ids, for selection prompts.
    /// Titles are not unique; the id rides along so a duplicate cannot
    /// target the wrong row.
    pub fn role_choices(&self) -> Result<Vec<Choice<i64>>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT title, id FROM role ORDER BY title")?;
        let rows = stmt.query_map([], |row| {
            Ok(Choice::new(row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut choices = Vec::new();
        for row in rows {
            choices.push(row?);
        }

        Ok(choices)
    }

    /// Insert a role under an existing department.  A department id that no
    /// longer exists fails the foreign key and surfaces as
    /// DataError::Reference; a negative salary fails the schema check.
    pub fn add_role(&mut self, title: &str, salary: i64, department_id: i64) -> Result<()> {
        self.conn().execute(
            "INSERT INTO role (title, salary, department_id) VALUES (?1, ?2, ?3)",
            params![title, salary, department_id],
        )?;
        Ok(())
    }

    pub fn delete_role(&mut self, id: i64) -> Result<usize> {
        let affected = self
            .conn()
            .execute("DELETE FROM role WHERE id = ?1", params![id])?;
        Ok(affected)
    }
}
