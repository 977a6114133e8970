use super::common::*;
use crate::applications::render::{render_record, render_records, render_single, OutputFormat};
use crate::applications::store::ApplicationStore;

#[test]
fn text_layout_follows_field_order() {
    let queue = queue_with(&["Asha"]);
    let record = queue.records().next().expect("record present");

    let mut out = Vec::new();
    render_record(&mut out, record).expect("render");
    let text = String::from_utf8(out).expect("utf8");

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "",
            "Application app-000001",
            "Name: Asha | Gender: Female | Phone: 9876543210",
            "Address: 14 MG Road, Pune",
            "Date: 12/03/2025 | Time: 10:30",
            "IFSC: HDFC0001234 | Account No: 501000000004 | Balance: 25400.50",
            "Service: Credit Card | PAN: ABCDE1234F | Aadhar: 1234 5678 9012",
            "Transaction: Pending | Payment: Unpaid",
        ]
    );
}

#[test]
fn json_lists_records_in_queue_order() {
    let queue = queue_with(&["Asha", "Bharat"]);

    let mut out = Vec::new();
    render_records(&mut out, OutputFormat::Json, queue.records()).expect("render");
    let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");

    let entries = value.as_array().expect("array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], "app-000001");
    assert_eq!(entries[0]["name"], "Asha");
    assert_eq!(entries[1]["name"], "Bharat");
    assert_eq!(entries[1]["payment_status"], "Unpaid");
}

#[test]
fn csv_has_header_and_balance_after_account_number() {
    let queue = queue_with(&["Asha"]);

    let mut out = Vec::new();
    render_records(&mut out, OutputFormat::Csv, queue.records()).expect("render");
    let text = String::from_utf8(out).expect("utf8");
    let mut lines = text.lines();

    assert_eq!(
        lines.next(),
        Some("id,name,gender,address,date,time,ifsc,account_number,balance,service_type,phone,transaction_status,pan,aadhar,payment_status")
    );
    assert_eq!(
        lines.next(),
        Some("app-000001,Asha,Female,\"14 MG Road, Pune\",12/03/2025,10:30,HDFC0001234,501000000004,25400.50,Credit Card,9876543210,Pending,ABCDE1234F,1234 5678 9012,Unpaid")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn empty_listing_renders_per_format() {
    let queue = queue_with(&[]);

    let mut text = Vec::new();
    render_records(&mut text, OutputFormat::Text, queue.records()).expect("render");
    assert!(text.is_empty());

    let mut json = Vec::new();
    render_records(&mut json, OutputFormat::Json, queue.records()).expect("render");
    assert_eq!(String::from_utf8(json).expect("utf8").trim(), "[]");

    let mut csv = Vec::new();
    render_records(&mut csv, OutputFormat::Csv, queue.records()).expect("render");
    assert_eq!(String::from_utf8(csv).expect("utf8").lines().count(), 1);
}

#[test]
fn output_format_parses_case_insensitively() {
    assert_eq!("JSON".parse(), Ok(OutputFormat::Json));
    assert_eq!(" csv".parse(), Ok(OutputFormat::Csv));
    assert!("yaml".parse::<OutputFormat>().is_err());
}

#[test]
fn single_record_json_is_an_object() {
    let queue = queue_with(&["Asha"]);
    let record = queue.records().next().expect("record present");

    let mut out = Vec::new();
    render_single(&mut out, OutputFormat::Json, record).expect("render");
    let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");

    assert_eq!(value["id"], "app-000001");
    assert_eq!(value["balance"], 25400.5);
}
