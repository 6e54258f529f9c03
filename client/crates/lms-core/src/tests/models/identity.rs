use crate::{Identity, IdentityPatch, Role};

fn sample() -> Identity {
    Identity::new("1", "John Doe", "john.doe@edapp.com", Role::Student)
}

#[test]
fn given_two_word_name_when_initials_then_returns_upper_letters() {
    let mut user = sample();
    user.name = "john ronald doe".into();
    assert_eq!(user.initials(), "JRD");
}

#[test]
fn given_patch_when_apply_then_merges_set_fields_only() {
    let mut user = sample();
    user.apply(IdentityPatch {
        name: Some("Johnny Doe".into()),
        about_me: Some("Learning Rust".into()),
        ..Default::default()
    });

    assert_eq!(user.id, "1");
    assert_eq!(user.name, "Johnny Doe");
    assert_eq!(user.email, "john.doe@edapp.com");
    assert_eq!(user.about_me.as_deref(), Some("Learning Rust"));
}

#[test]
fn given_persisted_blob_when_deserialize_then_reads_camel_case_keys() {
    let json = r#"{"id":"2","name":"Security Experts","email":"instructor@edapp.com","role":"instructor","aboutMe":"Expert"}"#;
    let user: Identity = serde_json::from_str(json).unwrap();

    assert_eq!(user.role, Role::Instructor);
    assert_eq!(user.about_me.as_deref(), Some("Expert"));
    assert!(user.avatar.is_none());
}

#[test]
fn given_identity_without_bio_when_serialize_then_omits_optional_keys() {
    let json = serde_json::to_string(&sample()).unwrap();
    assert!(!json.contains("aboutMe"));
    assert!(!json.contains("avatar"));
}

#[test]
fn given_default_patch_when_is_empty_then_true() {
    assert!(IdentityPatch::default().is_empty());
}
