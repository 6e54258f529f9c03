use crate::NotificationCategory;
use crate::{NotificationRecord, fallback_set};

#[test]
fn test_fallback_set_has_three_unread_records() {
    let records = fallback_set();
    let titles: Vec<&str> = records.iter().map(|n| n.title.as_str()).collect();

    assert_eq!(
        titles,
        vec!["Course Completed!", "New Course Available", "Certificate Ready"]
    );
    assert!(records.iter().all(NotificationRecord::is_unread));
}

#[test]
fn test_fallback_ids_are_unique() {
    let records = fallback_set();
    let mut ids: Vec<u64> = records.iter().map(|n| n.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), records.len());
}

#[test]
fn test_record_reads_type_key_from_server_json() {
    let json = r#"{"id":9,"type":"system","title":"Maintenance","message":"Tonight","time":"now","read":true,"icon":"⚙"}"#;
    let record: NotificationRecord = serde_json::from_str(json).unwrap();

    assert_eq!(record.category, NotificationCategory::System);
    assert!(!record.is_unread());
}

#[test]
fn test_mark_read_sets_flag() {
    let mut record = fallback_set().remove(0);
    record.mark_read();
    record.mark_read();
    assert!(record.read);
}
