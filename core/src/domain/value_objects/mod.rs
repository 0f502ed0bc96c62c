//! Value objects carried by domain entities.

pub mod scopes;

pub use scopes::Scopes;
