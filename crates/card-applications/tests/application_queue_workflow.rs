//! End-to-end behavior of the application queue through the public desk facade.

use card_applications::applications::{
    render_records, ApplicationDesk, ApplicationDetails, ApplicationQueue, ApplicationServiceError,
    ApplicationStore, FieldPolicy, KeyField, OutputFormat, StoreError,
};
use card_applications::config::QueueConfig;

fn applicant(name: &str, account_number: &str) -> ApplicationDetails {
    ApplicationDetails {
        name: name.to_string(),
        gender: "Male".to_string(),
        address: "7 Park Street, Kolkata".to_string(),
        date: "01/04/2025".to_string(),
        time: "09:15".to_string(),
        ifsc: "SBIN0000691".to_string(),
        account_number: account_number.to_string(),
        balance: 1200.0,
        service_type: "New Card".to_string(),
        phone: "9830012345".to_string(),
        transaction_status: "Initiated".to_string(),
        pan: "AAAPL1234C".to_string(),
        aadhar: "9999 8888 7777".to_string(),
        payment_status: "Unpaid".to_string(),
    }
}

fn pending_names<S: ApplicationStore>(desk: &ApplicationDesk<S>) -> Vec<String> {
    desk.pending()
        .map(|record| record.details.name.clone())
        .collect()
}

#[test]
fn submit_process_delete_scenario() {
    let mut desk = ApplicationDesk::new(ApplicationQueue::new(), &QueueConfig::default());

    desk.submit(applicant("A", "100")).expect("submit A");
    desk.submit(applicant("B", "200")).expect("submit B");
    desk.submit(applicant("C", "300")).expect("submit C");
    assert_eq!(pending_names(&desk), vec!["A", "B", "C"]);

    let processed = desk.process_next().expect("process A");
    assert_eq!(processed.details.name, "A");
    assert_eq!(pending_names(&desk), vec!["B", "C"]);

    let deleted = desk.delete(KeyField::Name, "C").expect("delete C");
    assert_eq!(deleted.details.account_number, "300");
    assert_eq!(pending_names(&desk), vec!["B"]);

    let processed = desk.process_next().expect("process B");
    assert_eq!(processed.details.name, "B");

    assert_eq!(
        desk.process_next(),
        Err(ApplicationServiceError::Store(StoreError::EmptyQueue))
    );
    assert!(desk.is_empty());
}

#[test]
fn update_then_search_by_account_number() {
    let config = QueueConfig {
        default_key: KeyField::AccountNumber,
        field_policy: FieldPolicy::Reject,
        ..QueueConfig::default()
    };
    let mut desk = ApplicationDesk::new(ApplicationQueue::new(), &config);
    desk.submit(applicant("A", "100")).expect("submit A");
    let b = desk.submit(applicant("B", "200")).expect("submit B");

    let mut paid = applicant("B", "200");
    paid.payment_status = "Paid".to_string();
    paid.transaction_status = "Completed".to_string();
    desk.update_by_default_key("200", paid).expect("update B");

    let found = desk.find_by_default_key("200").expect("find B");
    assert_eq!(found.id, b.id);
    assert_eq!(found.details.payment_status, "Paid");
    assert_eq!(pending_names(&desk), vec!["A", "B"]);

    match desk.delete_by_default_key("999") {
        Err(ApplicationServiceError::Store(StoreError::NotFound { field, value })) => {
            assert_eq!(field, KeyField::AccountNumber);
            assert_eq!(value, "999");
        }
        other => panic!("expected not found, got {other:?}"),
    }
    assert_eq!(desk.len(), 2);
}

#[test]
fn listing_can_be_exported_as_csv() {
    let mut desk = ApplicationDesk::new(ApplicationQueue::new(), &QueueConfig::default());
    desk.submit(applicant("A", "100")).expect("submit A");
    desk.submit(applicant("B", "200")).expect("submit B");

    let mut out = Vec::new();
    render_records(&mut out, OutputFormat::Csv, desk.pending()).expect("render csv");
    let text = String::from_utf8(out).expect("utf8");

    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].starts_with("app-000001,A,"));
    assert!(rows[2].starts_with("app-000002,B,"));
}
