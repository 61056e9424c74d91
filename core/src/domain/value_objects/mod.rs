//! Value objects carried between the domain and the HTTP layer.

pub mod auth_context;

pub use auth_context::AuthContext;
