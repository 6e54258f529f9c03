use crate::Role;

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Student.as_str(), "student");
    assert_eq!(Role::Instructor.as_str(), "instructor");
    assert_eq!(Role::Admin.as_str(), "admin");
}

#[test]
fn test_role_from_str() {
    assert_eq!(Role::from_str("instructor").unwrap(), Role::Instructor);
    assert!(Role::from_str("superuser").is_err());
}

#[test]
fn test_role_rejects_unknown_value_in_json() {
    let result = serde_json::from_str::<Role>("\"guest\"");
    assert!(result.is_err());
}
