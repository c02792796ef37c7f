use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_STATUS: &str = "Active";

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub salary: Option<f64>,
    pub status: String,
}

/// HTML form submission; every field arrives as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub status: String,
}

/// JSON API body. `salary` may be a number, a numeric string, empty or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeePayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub salary: Option<SalaryValue>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SalaryValue {
    Number(f64),
    Text(String),
}

impl From<EmployeePayload> for EmployeeForm {
    fn from(payload: EmployeePayload) -> Self {
        EmployeeForm {
            name: payload.name.unwrap_or_default(),
            email: payload.email.unwrap_or_default(),
            department: payload.department.unwrap_or_default(),
            salary: match payload.salary {
                Some(SalaryValue::Number(n)) => n.to_string(),
                Some(SalaryValue::Text(s)) => s,
                None => String::new(),
            },
            status: payload.status.unwrap_or_default(),
        }
    }
}

impl From<&Employee> for EmployeeForm {
    fn from(employee: &Employee) -> Self {
        EmployeeForm {
            name: employee.name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone().unwrap_or_default(),
            salary: employee.salary.map(|s| s.to_string()).unwrap_or_default(),
            status: employee.status.clone(),
        }
    }
}

/// Validated field set written by create and update (full replace).
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub salary: Option<f64>,
    pub status: String,
}

impl EmployeeInput {
    pub fn into_employee(self, id: i64) -> Employee {
        Employee {
            id,
            name: self.name,
            email: self.email,
            department: self.department,
            salary: self.salary,
            status: self.status,
        }
    }
}
