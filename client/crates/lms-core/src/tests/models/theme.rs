use crate::{Language, Theme};

use std::str::FromStr;

#[test]
fn test_theme_defaults_to_light() {
    assert_eq!(Theme::default(), Theme::Light);
    assert_eq!(Language::default(), Language::English);
}

#[test]
fn test_system_theme_follows_host_preference() {
    assert_eq!(Theme::System.effective(true), Theme::Dark);
    assert_eq!(Theme::System.effective(false), Theme::Light);
    assert_eq!(Theme::Dark.effective(false), Theme::Dark);
}

#[test]
fn test_theme_and_language_parse_their_own_names() {
    for theme in [Theme::Light, Theme::Dark, Theme::System] {
        assert_eq!(Theme::from_str(theme.as_str()).unwrap(), theme);
    }
    assert_eq!(Language::from_str("French").unwrap(), Language::French);
    assert!(Language::from_str("Klingon").is_err());
    assert!(Theme::from_str("light").is_err());
}
