pub mod auth_service;
pub mod employee_service;
pub mod media_service;
pub mod profile_service;
pub mod settings_service;
pub mod token_service;
pub mod user_service;

pub use auth_service::{AuthService, AuthServiceError, LoginRequest};
pub use employee_service::{EmployeeService, EmployeeServiceError};
pub use media_service::{MediaError, MediaStore};
pub use profile_service::{ProfileService, ProfileServiceError};
pub use token_service::{Claims, TokenError, TokenService};
pub use user_service::{CreateUserRequest, UserService, UserServiceError};
