pub mod employee;
pub mod employee_profile;
pub mod session;
pub mod settings;
pub mod user;

pub use employee::{Employee, EmployeeForm, EmployeeInput, EmployeePayload, SalaryValue};
pub use employee_profile::{EmployeeProfile, ProfileForm, ProfileInput, ProfileSearch};
pub use session::SessionUser;
pub use settings::{SettingsForm, SettingsView, UserSettings};
pub use user::{Role, User, UserProfile};
