//! Fixed demo identities and the demo-grade secret check.
//!
//! Not a security boundary: any accepted secret unlocks any registered email.

use crate::{Identity, Role};

const ACCEPTED_SECRETS: [&str; 3] = ["student123", "instructor123", "admin123"];

pub fn demo_identities() -> Vec<Identity> {
    vec![
        Identity::new("1", "John Doe", "john.doe@edapp.com", Role::Student).with_about_me(
            "Passionate about continuous learning and professional development. \
             Currently focusing on cybersecurity and compliance training.",
        ),
        Identity::new("2", "Security Experts", "instructor@edapp.com", Role::Instructor)
            .with_about_me(
                "Cybersecurity and compliance training expert with 10+ years of experience.",
            ),
        Identity::new("3", "Admin User", "admin@edapp.com", Role::Admin)
            .with_about_me("Platform administrator managing the educational system."),
    ]
}

pub fn find_by_email(email: &str) -> Option<Identity> {
    demo_identities().into_iter().find(|user| user.email == email)
}

pub fn is_accepted_secret(secret: &str) -> bool {
    ACCEPTED_SECRETS.contains(&secret)
}

/// Looks up `email` and checks `secret`. `None` on any mismatch.
pub fn authenticate(email: &str, secret: &str) -> Option<Identity> {
    find_by_email(email).filter(|_| is_accepted_secret(secret))
}
