use std::error::Error;
use std::fmt;
use std::io::{self, prelude::*, Stdin, Stdout};
use std::process;
use std::str::FromStr;

use crate::config::Config;
use crate::data_handling::{DataError, Store};
use crate::selection::{Choice, EntityKind};
use crate::tabulate;

pub type Result<T> = std::result::Result<T, TextInterfaceError>;

struct MenuAction {
    label: String,
    operation: fn(&mut TextInterface) -> Result<()>,
}

/// The interactive loop: a fixed table of menu actions over the store.
/// Every action fetches whatever choices it needs fresh, prompts for its
/// fields in order, runs exactly one catalog operation, reports, and falls
/// back to the main menu.  Nothing is cached between cycles.
pub struct TextInterface {
    io: TextIO,
    store: Store,
    actions: Vec<MenuAction>,
}

impl TextInterface {
    /// Bind the action table.  The action set is decided here, once:
    /// `config.offer_delete` controls whether Delete Entity appears at all.
    pub fn init(store: Store, config: &Config) -> Self {
        let mut actions: Vec<MenuAction> = Vec::new();

        actions.push(MenuAction {
            label: String::from("View All Employees"),
            operation: TextInterface::view_employees,
        });

        actions.push(MenuAction {
            label: String::from("Add Employee"),
            operation: TextInterface::add_employee,
        });

        actions.push(MenuAction {
            label: String::from("Update Employee Role"),
            operation: TextInterface::update_employee_role,
        });

        actions.push(MenuAction {
            label: String::from("View All Roles"),
            operation: TextInterface::view_roles,
        });

        actions.push(MenuAction {
            label: String::from("Add Role"),
            operation: TextInterface::add_role,
        });

        actions.push(MenuAction {
            label: String::from("View All Departments"),
            operation: TextInterface::view_departments,
        });

        actions.push(MenuAction {
            label: String::from("Add Department"),
            operation: TextInterface::add_department,
        });

        if config.offer_delete {
            actions.push(MenuAction {
                label: String::from("Delete Entity"),
                operation: TextInterface::delete_entity,
            });
        }

        actions.push(MenuAction {
            label: String::from("Quit"),
            operation: TextInterface::quit,
        });

        TextInterface {
            io: TextIO {
                stdin: io::stdin(),
                stdout: io::stdout(),
            },
            store,
            actions,
        }
    }

    /// Run the menu until the operator quits.  Store failures are reported
    /// and the loop continues; only a broken prompt stream gets out of here.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let labels: Vec<String> = self
                .actions
                .iter()
                .map(|action| action.label.clone())
                .collect();

            let index = select_index("What would you like to do?", &labels, &mut self.io)?;
            log::debug!("selected action: {}", self.actions[index].label);

            let op = self.actions[index].operation;
            if let Err(e) = op(self) {
                match e {
                    TextInterfaceError::Data(cause) => eprintln!("Error: {}", cause),
                    fatal => return Err(fatal),
                }
            }
        }
    }

    fn view_employees(&mut self) -> Result<()> {
        let employees = self.store.list_employees()?;
        tabulate::print_table(&employees);
        Ok(())
    }

    fn view_roles(&mut self) -> Result<()> {
        let roles = self.store.list_roles()?;
        tabulate::print_table(&roles);
        Ok(())
    }

    fn view_departments(&mut self) -> Result<()> {
        let departments = self.store.list_departments()?;
        tabulate::print_table(&departments);
        Ok(())
    }

    fn add_department(&mut self) -> Result<()> {
        let name = get_string("What is the name of the department?", &mut self.io)?;

        self.store.add_department(&name)?;
        println!("Added {} to the database.", name);
        Ok(())
    }

    fn add_role(&mut self) -> Result<()> {
        let departments = self.store.department_choices()?;
        if departments.is_empty() {
            println!("Cannot add role: no departments found.");
            return Ok(());
        }

        let title = get_string("What is the name of the role?", &mut self.io)?;
        let salary = get_number("What is the salary of the role?", &mut self.io)?;
        let department = select_choice(
            "Which department does the role belong to?",
            &departments,
            &mut self.io,
        )?;

        self.store.add_role(&title, salary, department.key())?;
        println!("Added {} to the database.", title);
        Ok(())
    }

    fn add_employee(&mut self) -> Result<()> {
        let roles = self.store.role_choices()?;
        if roles.is_empty() {
            println!("Cannot add employee: no roles found.");
            return Ok(());
        }
        let managers = self.store.manager_choices()?;

        let first_name = get_string("What is the employee's first name?", &mut self.io)?;
        let last_name = get_string("What is the employee's last name?", &mut self.io)?;
        let role = select_choice("What is the employee's role?", &roles, &mut self.io)?;
        let manager = select_choice("Who is the employee's manager?", &managers, &mut self.io)?;

        self.store
            .add_employee(&first_name, &last_name, role.key(), manager.key())?;
        println!("Added {} {} to the database.", first_name, last_name);
        Ok(())
    }

    fn update_employee_role(&mut self) -> Result<()> {
        let employees = self.store.employee_choices()?;
        if employees.is_empty() {
            println!("No employees to update.");
            return Ok(());
        }
        let roles = self.store.role_choices()?;
        if roles.is_empty() {
            println!("Cannot update: no roles found.");
            return Ok(());
        }

        let employee = select_choice(
            "Which employee's role do you want to update?",
            &employees,
            &mut self.io,
        )?;
        let role = select_choice(
            "Which role do you want to assign the selected employee?",
            &roles,
            &mut self.io,
        )?;

        let affected = self.store.update_employee_role(employee.key(), role.key())?;
        if affected == 0 {
            println!("No matching employee found; nothing updated.");
        } else {
            println!("Updated {}'s role.", employee.label());
        }
        Ok(())
    }

    fn delete_entity(&mut self) -> Result<()> {
        let labels: Vec<String> = EntityKind::ALL.iter().map(|kind| kind.to_string()).collect();
        let index = select_index(
            "Which entity would you like to delete?",
            &labels,
            &mut self.io,
        )?;

        match EntityKind::ALL[index] {
            EntityKind::Employee => self.delete_employee(),
            EntityKind::Role => self.delete_role(),
            EntityKind::Department => self.delete_department(),
        }
    }

    fn delete_employee(&mut self) -> Result<()> {
        let employees = self.store.employee_choices()?;
        if employees.is_empty() {
            println!("No employees to delete.");
            return Ok(());
        }

        let employee = select_choice(
            "Which employee would you like to delete?",
            &employees,
            &mut self.io,
        )?;

        let affected = self.store.delete_employee(employee.key())?;
        report_delete("employee", employee.label(), affected);
        Ok(())
    }

    fn delete_role(&mut self) -> Result<()> {
        let roles = self.store.role_choices()?;
        if roles.is_empty() {
            println!("No roles to delete.");
            return Ok(());
        }

        let role = select_choice("Which role would you like to delete?", &roles, &mut self.io)?;

        let affected = self.store.delete_role(role.key())?;
        report_delete("role", role.label(), affected);
        Ok(())
    }

    fn delete_department(&mut self) -> Result<()> {
        let departments = self.store.department_choices()?;
        if departments.is_empty() {
            println!("No departments to delete.");
            return Ok(());
        }

        let department = select_choice(
            "Which department would you like to delete?",
            &departments,
            &mut self.io,
        )?;

        let affected = self.store.delete_department(department.key())?;
        report_delete("department", department.label(), affected);
        Ok(())
    }

    fn quit(&mut self) -> Result<()> {
        println!("Goodbye.");
        process::exit(0);
    }
}

fn report_delete(kind: &str, label: &str, affected: usize) {
    if affected == 0 {
        println!("No matching {} found; nothing deleted.", kind);
    } else {
        println!("Deleted {}: {}", kind, label);
    }
}

fn prompt_line(prompt: &str, io: &mut TextIO) -> Result<String> {
    io.stdout.write_all(prompt.as_bytes())?;
    io.stdout.write_all(b" ")?;
    io.stdout.flush()?;

    let mut buffer = String::new();
    let read = io.stdin.read_line(&mut buffer)?;
    if read == 0 {
        return Err(TextInterfaceError::InputClosed);
    }

    Ok(String::from(buffer.trim()))
}

fn get_string(prompt: &str, io: &mut TextIO) -> Result<String> {
    loop {
        let entry = prompt_line(prompt, io)?;
        if !entry.is_empty() {
            return Ok(entry);
        }
        println!("An entry is required.");
    }
}

fn get_number(prompt: &str, io: &mut TextIO) -> Result<i64> {
    loop {
        let entry = prompt_line(prompt, io)?;
        match i64::from_str(&entry) {
            Ok(value) => return Ok(value),
            Err(_) => println!("Invalid number."),
        }
    }
}

/// Print a numbered list and loop until the operator picks a valid entry.
/// Returns the zero-based index of the pick.
fn select_index(prompt: &str, labels: &[String], io: &mut TextIO) -> Result<usize> {
    println!("{}", prompt);
    for (index, label) in labels.iter().enumerate() {
        println!("{}: {}", index + 1, label);
    }

    loop {
        let entry = prompt_line("?>", io)?;
        match usize::from_str(&entry) {
            Ok(pick) if pick >= 1 && pick <= labels.len() => return Ok(pick - 1),
            _ => println!("Enter a number between 1 and {}.", labels.len()),
        }
    }
}

fn select_choice<'a, K: Copy>(
    prompt: &str,
    choices: &'a [Choice<K>],
    io: &mut TextIO,
) -> Result<&'a Choice<K>> {
    let labels: Vec<String> = choices.iter().map(|c| c.label().to_string()).collect();
    let index = select_index(prompt, &labels, io)?;
    Ok(&choices[index])
}

struct TextIO {
    stdin: Stdin,
    stdout: Stdout,
}

#[derive(Debug)]
pub enum TextInterfaceError {
    InputClosed,
    IOError(io::Error),
    Data(DataError),
}

impl Error for TextInterfaceError {}

impl fmt::Display for TextInterfaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::TextInterfaceError::*;

        match self {
            InputClosed => write!(f, "input stream closed"),
            IOError(e) => write!(f, "IO Error({})", e),
            Data(e) => write!(f, "{}", e),
        }
    }
}

impl From<io::Error> for TextInterfaceError {
    fn from(e: io::Error) -> Self {
        TextInterfaceError::IOError(e)
    }
}

impl From<DataError> for TextInterfaceError {
    fn from(e: DataError) -> Self {
        TextInterfaceError::Data(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_action_is_a_configuration_choice() {
        let store = Store::open_in_memory().unwrap();
        let config = Config {
            offer_delete: false,
            ..Config::default()
        };
        let interface = TextInterface::init(store, &config);
        assert!(interface
            .actions
            .iter()
            .all(|action| action.label != "Delete Entity"));

        let store = Store::open_in_memory().unwrap();
        let interface = TextInterface::init(store, &Config::default());
        assert!(interface
            .actions
            .iter()
            .any(|action| action.label == "Delete Entity"));
    }

    #[test]
    fn quit_is_always_the_last_action() {
        let store = Store::open_in_memory().unwrap();
        let interface = TextInterface::init(store, &Config::default());
        assert_eq!(interface.actions.last().unwrap().label, "Quit");
    }
}
