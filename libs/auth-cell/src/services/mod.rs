pub mod account;
pub mod password;
pub mod user;

pub use account::AccountService;
pub use password::PasswordService;
pub use user::UserService;
