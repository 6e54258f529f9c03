mod identity;
mod notification;
mod role;
mod theme;
