use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::{Command, Output};
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APPROVED: &str = "errorCode=000&transactionId=T123&authResponseText=Approved";

fn command() -> Command {
    let mut cmd = Command::new(cargo_bin!());
    for var in [
        "MES_LOGIN",
        "MES_PASSWORD",
        "MES_TEST",
        "MES_ENDPOINT",
        "MES_TIMEOUT_SECS",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

async fn run(args: Vec<String>) -> Output {
    tokio::task::spawn_blocking(move || command().args(args).output().unwrap())
        .await
        .unwrap()
}

fn args(endpoint: &str, rest: &[&str]) -> Vec<String> {
    ["--login", "941000", "--password", "profilekey", "--endpoint", endpoint]
        .iter()
        .chain(rest)
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn test_cli_info() {
    command()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merchant e-Solutions"))
        .stdout(predicate::str::contains(
            "https://cert.merchante-solutions.com/mes-api/tridentApi",
        ));
}

#[test]
fn test_cli_requires_credentials() {
    command()
        .args(["void", "--reference", "T123"])
        .assert()
        .failure();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_purchase_prints_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("transactionType=D"))
        .and(body_string_contains("transactionAmount=10.00"))
        .and(body_string_contains("cardExpDate=1230"))
        .respond_with(ResponseTemplate::new(200).set_body_string(APPROVED))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(args(
        &server.uri(),
        &[
            "purchase",
            "--amount",
            "10.00",
            "--card-number",
            "4111111111111111",
            "--exp-month",
            "12",
            "--exp-year",
            "2030",
            "--order-id",
            "A1",
            "--address1",
            "1 Main St",
            "--zip",
            "12345",
        ],
    ))
    .await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"))
        .stdout(predicate::str::contains("\"authorization\": \"T123\""))
        .stdout(predicate::str::contains("This transaction has been approved"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_missing_qualifiers_warn_on_stderr() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(APPROVED))
        .mount(&server)
        .await;

    let output = run(args(
        &server.uri(),
        &[
            "authorize",
            "--amount",
            "1",
            "--card-number",
            "4111111111111111",
            "--exp-month",
            "1",
            "--exp-year",
            "2030",
        ],
    ))
    .await;

    output
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_batch_reports_bad_rows_and_continues() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("transactionType=A"))
        .respond_with(ResponseTemplate::new(200).set_body_string("errorCode=085&transactionId=V1"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(APPROVED))
        .mount(&server)
        .await;

    let output = run(args(&server.uri(), &["batch", "tests/fixtures/requests.csv"])).await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "operation,success,authorization,message,avs_result,cvv_result",
        ))
        .stdout(predicate::str::contains(
            "purchase,true,T123,This transaction has been approved,,",
        ))
        .stdout(predicate::str::contains(
            "void,true,T123,This transaction has been approved,,",
        ))
        .stdout(predicate::str::contains(
            "verify,true,V1,This transaction has been approved,,",
        ))
        .stdout(predicate::str::contains("capture").not())
        .stderr(predicate::str::contains("Error reading request"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_batch_reports_transport_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let mut input = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        input,
        "operation,amount,reference,card_number,exp_month,exp_year,cvv,card_id,card_exp_date,order_id,address1,zip,moto"
    )
    .unwrap();
    writeln!(input, "void,,T123,,,,,,,,,,").unwrap();
    input.flush().unwrap();

    let path = input.path().to_string_lossy().into_owned();
    let output = run(args(&server.uri(), &["batch", &path])).await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("void").not())
        .stderr(predicate::str::contains("Error processing request"));
}
