//! Authentication utilities - JWT tokens and password hashing

mod jwt;
mod password;

pub use jwt::{Claims, JwtService};
pub use password::{hash_password, verify_password};
