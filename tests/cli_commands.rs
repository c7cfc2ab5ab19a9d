//! Binary-level tests for the automate CLI.
//!
//! Covers:
//! - Validation failures stopping before any network call
//! - Happy paths against a mock backend
//! - Error surfacing from backend rejections

mod common;

use common::TestContext;
use predicates::prelude::*;

const LOGIN_BODY: &str =
    r#"{"userId": 41, "firstName": "Thandi", "lastName": "Ngcobo", "email": "thandi@example.test"}"#;

const APPLICANT_BODY: &str = r#"{
    "userId": 7,
    "firstName": "Thandi",
    "lastName": "Ngcobo",
    "idNumber": "0301155082087",
    "birthDate": "2003-01-15",
    "contact": {"email": "thandi@example.test", "cellphone": "0821234567"},
    "address": {"street": "12 Loop Street", "city": "Cape Town", "province": "Western Cape", "country": "South Africa"},
    "status": "PENDING"
}"#;

const APPOINTMENT_BODY: &str = r#"{
    "appointmentId": 900,
    "applicantId": 41,
    "testType": "LEARNERS",
    "venue": "Cape Town Testing Center",
    "address": "123 Main Street, Cape Town",
    "date": "2030-10-01",
    "time": "09:00",
    "licenseCode": "0301155082087",
    "fee": 250,
    "result": null
}"#;

fn register_args(id_number: &str, birth_date: &str) -> Vec<String> {
    [
        ("--first-name", "Thandi"),
        ("--last-name", "Ngcobo"),
        ("--id-number", id_number),
        ("--email", "thandi@example.test"),
        ("--cellphone", "0821234567"),
        ("--street", "12 Loop Street"),
        ("--city", "Cape Town"),
        ("--province", "Western Cape"),
        ("--country", "South Africa"),
        ("--birth-date", birth_date),
        ("--password", "Abcdef1!"),
        ("--confirm-password", "Abcdef1!"),
    ]
    .iter()
    .flat_map(|(flag, value)| [flag.to_string(), value.to_string()])
    .collect()
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[test]
fn register_creates_the_applicant() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/applicants/create")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(APPLICANT_BODY)
        .expect(1)
        .create();

    let ctx = TestContext::new(&server.url());
    let mut args = vec!["register".to_string()];
    args.extend(register_args("0301155082087", "2003-01-15"));

    ctx.cli()
        .args(&args)
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered Thandi Ngcobo (applicant #7)"));
    mock.assert();
}

#[test]
fn register_rejects_a_bad_id_number_before_any_network_call() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/applicants/create").expect(0).create();

    let ctx = TestContext::new(&server.url());
    let mut args = vec!["register".to_string()];
    args.extend(register_args("12345", "2003-01-15"));

    ctx.cli()
        .args(&args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("13 digits"));
    mock.assert();
}

#[test]
fn register_rejects_an_id_dob_mismatch() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/applicants/create").expect(0).create();

    let ctx = TestContext::new(&server.url());
    let mut args = vec!["register".to_string()];
    args.extend(register_args("0301155082087", "2003-02-15"));

    ctx.cli()
        .args(&args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("do not match"));
    mock.assert();
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[test]
fn login_greets_the_user() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/applicants/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LOGIN_BODY)
        .create();

    let ctx = TestContext::new(&server.url());
    ctx.cli()
        .args(["login", "--email", "thandi@example.test", "--password", "Abcdef1!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome Thandi Ngcobo!"));
}

#[test]
fn rejected_credentials_are_reported() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("POST", "/applicants/login").with_status(401).create();

    let ctx = TestContext::new(&server.url());
    ctx.cli()
        .args(["login", "--email", "thandi@example.test", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email or password"));
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

fn book_args(extra: &[&str]) -> Vec<String> {
    let mut args: Vec<String> = [
        "book",
        "learners",
        "--email",
        "thandi@example.test",
        "--password",
        "Abcdef1!",
        "--date",
        "2030-10-01",
        "--time",
        "09:00",
        "--venue",
        "Cape Town Testing Center",
        "--license-code",
        "0301155082087",
    ]
    .iter()
    .map(|arg| arg.to_string())
    .collect();
    args.extend(extra.iter().map(|arg| arg.to_string()));
    args
}

#[test]
fn cash_booking_confirms_with_a_reference() {
    let mut server = mockito::Server::new();
    let _login = server
        .mock("POST", "/applicants/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LOGIN_BODY)
        .create();
    let appointment = server
        .mock("POST", "/testappointment/create")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(APPOINTMENT_BODY)
        .expect(1)
        .create();

    let ctx = TestContext::new(&server.url());
    ctx.cli()
        .args(book_args(&["--method", "cash"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("Venue address: 123 Main Street, Cape Town"))
        .stdout(predicate::str::contains("Reference BK-900"))
        .stdout(predicate::str::contains("Fee paid: R 250"));
    appointment.assert();
}

#[test]
fn malformed_card_number_stops_before_the_booking_call() {
    let mut server = mockito::Server::new();
    let _login = server
        .mock("POST", "/applicants/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LOGIN_BODY)
        .create();
    let appointment = server.mock("POST", "/testappointment/create").expect(0).create();

    let ctx = TestContext::new(&server.url());
    ctx.cli()
        .args(book_args(&[
            "--method",
            "card",
            "--card-holder",
            "T Driver",
            "--card-number",
            "123",
            "--expiry",
            "01/30",
            "--cvv",
            "123",
        ]))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Card number must be 16 digits"));
    appointment.assert();
}

#[test]
fn unknown_venues_are_refused() {
    let mut server = mockito::Server::new();
    let _login = server
        .mock("POST", "/applicants/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LOGIN_BODY)
        .create();
    let appointment = server.mock("POST", "/testappointment/create").expect(0).create();

    let ctx = TestContext::new(&server.url());
    let mut args = book_args(&["--method", "cash"]);
    let venue_at = args.iter().position(|arg| arg == "Cape Town Testing Center").unwrap();
    args[venue_at] = "Backyard Testing Center".to_string();

    ctx.cli()
        .args(&args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a known testing venue"));
    appointment.assert();
}

#[test]
fn backend_rejections_are_surfaced_verbatim() {
    let mut server = mockito::Server::new();
    let _login = server
        .mock("POST", "/applicants/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LOGIN_BODY)
        .create();
    let _appointment = server
        .mock("POST", "/testappointment/create")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"message":"slot already taken"}}"#)
        .create();

    let ctx = TestContext::new(&server.url());
    ctx.cli()
        .args(book_args(&["--method", "cash"]))
        .assert()
        .failure()
        .stderr(predicate::str::contains("slot already taken"));
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[test]
fn bookings_listing_shows_each_appointment() {
    let mut server = mockito::Server::new();
    let _login = server
        .mock("POST", "/applicants/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LOGIN_BODY)
        .create();
    let _bookings = server
        .mock("GET", "/testappointment/applicant/41")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!("[{}]", APPOINTMENT_BODY))
        .create();

    let ctx = TestContext::new(&server.url());
    ctx.cli()
        .args(["bookings", "--email", "thandi@example.test", "--password", "Abcdef1!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BK-900"))
        .stdout(predicate::str::contains("pending"));
}

// ---------------------------------------------------------------------------
// Disc renewal
// ---------------------------------------------------------------------------

#[test]
fn renewal_with_nothing_expired_is_a_clean_no_op() {
    let mut server = mockito::Server::new();
    let _login = server
        .mock("POST", "/applicants/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LOGIN_BODY)
        .create();
    let _expired = server
        .mock("GET", "/vehicle/expired")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    let ctx = TestContext::new(&server.url());
    ctx.cli()
        .args([
            "renew-disc",
            "--email",
            "thandi@example.test",
            "--password",
            "Abcdef1!",
            "--method",
            "cash",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expired discs to renew"));
}

// ---------------------------------------------------------------------------
// Traffic tickets
// ---------------------------------------------------------------------------

#[test]
fn ticket_payment_prints_the_reference() {
    let ticket_body = r#"{
        "ticketNumber": "TF123456",
        "offense": "Speeding - 20km/h over limit",
        "location": "Main Road, Cape Town",
        "date": "2025-01-15",
        "amount": 1500,
        "dueDate": "2025-03-15",
        "status": "OUTSTANDING"
    }"#;
    let payment_body = r#"{
        "paymentId": 3001,
        "paymentType": "TICKET",
        "method": "EFT",
        "amount": 1500,
        "date": "2025-09-15"
    }"#;

    let mut server = mockito::Server::new();
    let _ticket = server
        .mock("GET", "/ticket/TF123456")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ticket_body)
        .create();
    let payment = server
        .mock("POST", "/payment/create")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(payment_body)
        .expect(1)
        .create();

    let ctx = TestContext::new(&server.url());
    ctx.cli()
        .args(["pay-ticket", "tf123456", "--license-number", "D-77", "--method", "eft"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Amount due: R 1500"))
        .stdout(predicate::str::contains("overdue"))
        .stdout(predicate::str::contains("Reference TT-3001"));
    payment.assert();
}

#[test]
fn unknown_tickets_are_reported() {
    let mut server = mockito::Server::new();
    let _ticket = server.mock("GET", "/ticket/TF000000").with_status(404).create();

    let ctx = TestContext::new(&server.url());
    ctx.cli()
        .args(["pay-ticket", "TF000000", "--license-number", "D-77", "--method", "eft"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ticket 'TF000000' not found"));
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[test]
fn admin_delete_goes_through_the_admin_login() {
    let mut server = mockito::Server::new();
    let login = server
        .mock("POST", "/admin/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"userId": 1, "firstName": "Admin", "lastName": "User", "email": "admin@example.test"}"#)
        .expect(1)
        .create();
    let delete = server.mock("DELETE", "/applicants/delete/9").with_status(200).expect(1).create();

    let ctx = TestContext::new(&server.url());
    ctx.cli()
        .args([
            "admin",
            "delete",
            "applicant",
            "9",
            "--email",
            "admin@example.test",
            "--password",
            "Admin1!x",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted applicant #9"));
    login.assert();
    delete.assert();
}

#[test]
fn admin_set_status_updates_the_applicant() {
    let mut server = mockito::Server::new();
    let _login = server
        .mock("POST", "/admin/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"userId": 1, "firstName": "Admin", "lastName": "User", "email": "admin@example.test"}"#)
        .create();
    let update = server.mock("PUT", "/applicants/9/status").with_status(200).expect(1).create();

    let ctx = TestContext::new(&server.url());
    ctx.cli()
        .args([
            "admin",
            "set-status",
            "9",
            "--status",
            "accepted",
            "--reason",
            "documents verified",
            "--email",
            "admin@example.test",
            "--password",
            "Admin1!x",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applicant #9 set to ACCEPTED"));
    update.assert();
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn config_file_is_honored_when_no_env_override_is_set() {
    let mut server = mockito::Server::new();
    let _login = server.mock("POST", "/applicants/login").with_status(401).expect(1).create();

    let ctx = TestContext::new(&server.url());
    ctx.write_config(&format!("api_url = \"{}/\"\ntimeout_secs = 5\n", server.url()));

    let mut cmd = ctx.cli();
    cmd.env_remove("AUTOMATE_API_URL");
    cmd.env_remove("AUTOMATE_API_TIMEOUT_SECS");
    cmd.args(["login", "--email", "a@b.test", "--password", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email or password"));
}

#[test]
fn help_lists_the_flows() {
    let ctx = TestContext::new("http://localhost:1");
    ctx.cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("book"))
        .stdout(predicate::str::contains("renew-disc"))
        .stdout(predicate::str::contains("pay-ticket"));
}
