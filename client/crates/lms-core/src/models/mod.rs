pub mod identity;
pub mod language;
pub mod notification;
pub mod role;
pub mod route;
pub mod theme;
