//! Command tests against a mock video service.

use clap::Parser;
use serde_json::json;
use serial_test::serial;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vgen_cli::{run, Cli, CliConfig};
use vgen_client::ClientConfig;
use vgen_poller::PollerConfig;

// =============================================================================
// Test Helpers
// =============================================================================

fn job_body(status: &str) -> serde_json::Value {
    json!({
        "id": "job-1",
        "product_name": "Aroma Diffuser X1",
        "product_description": "Ultrasonic, 300ml",
        "style": "minimal",
        "status": status,
        "script": if status == "done" { json!("Meet the X1.") } else { json!(null) },
        "video_url": if status == "done" { json!("/app/outputs/job-1.mp4") } else { json!(null) },
        "error_message": if status == "failed" { json!("Rendering crashed") } else { json!(null) },
        "created_at": "2024-05-01T10:15:30.123456",
        "updated_at": "2024-05-01T10:17:02.654321"
    })
}

fn status_body(status: &str) -> serde_json::Value {
    json!({
        "id": "job-1",
        "status": status,
        "video_url": null,
        "error_message": null,
        "progress_message": ""
    })
}

async fn mount_job(server: &MockServer, status: &str, times: Option<u64>) {
    let mock = Mock::given(method("GET"))
        .and(path("/api/videos/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body(status)));
    let mock = match times {
        Some(n) => mock.up_to_n_times(n),
        None => mock,
    };
    mock.mount(server).await;
}

async fn mount_status_once(server: &MockServer, status: &str) {
    Mock::given(method("GET"))
        .and(path("/api/videos/job-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(status)))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

fn config() -> CliConfig {
    CliConfig {
        client: ClientConfig::default(),
        poller: PollerConfig::default(),
    }
}

async fn run_args(server: &MockServer, args: &[&str]) -> anyhow::Result<bool> {
    let uri = server.uri();
    let mut argv = vec!["vgen", "--api-url", uri.as_str()];
    argv.extend_from_slice(args);
    run(Cli::try_parse_from(argv).unwrap(), config()).await
}

// =============================================================================
// create
// =============================================================================

#[tokio::test]
async fn test_create_no_wait() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body("pending")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("front.png");
    std::fs::write(&image, b"fake-png-bytes").unwrap();

    let ok = assert_ok!(
        run_args(
            &server,
            &["create", "--name", "Aroma Diffuser X1", "-i", image.to_str().unwrap(), "--no-wait"],
        )
        .await
    );
    assert!(ok);
}

#[tokio::test]
async fn test_create_keeps_first_three_images() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_body("pending")))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut args = vec![
        "create".to_string(),
        "--name".to_string(),
        "Lamp".to_string(),
        "--no-wait".to_string(),
    ];
    for i in 0..4 {
        let image = dir.path().join(format!("img{i}.jpg"));
        std::fs::write(&image, b"fake-jpg-bytes").unwrap();
        args.push("-i".to_string());
        args.push(image.to_string_lossy().into_owned());
    }
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    assert!(run_args(&server, &args).await.unwrap());

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert_eq!(body.matches("name=\"images\"").count(), 3);
    assert!(!body.contains("img3.jpg"));
}

#[tokio::test]
async fn test_create_missing_image_is_an_error() {
    let server = MockServer::start().await;
    let err = assert_err!(
        run_args(&server, &["create", "--name", "Lamp", "-i", "/nonexistent/x.png"]).await
    );
    assert!(format!("{err:#}").contains("Failed to read image"));
}

// =============================================================================
// watch
// =============================================================================

#[tokio::test]
async fn test_watch_already_done_skips_polling() {
    let server = MockServer::start().await;
    mount_job(&server, "done", None).await;
    Mock::given(method("GET"))
        .and(path("/api/videos/job-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("done")))
        .expect(0)
        .mount(&server)
        .await;

    assert!(run_args(&server, &["watch", "job-1"]).await.unwrap());
}

#[tokio::test]
async fn test_watch_already_failed_exits_non_zero() {
    let server = MockServer::start().await;
    mount_job(&server, "failed", None).await;

    assert!(!run_args(&server, &["watch", "job-1"]).await.unwrap());
}

#[tokio::test]
async fn test_watch_polls_then_downloads() {
    let server = MockServer::start().await;
    mount_job(&server, "pending", Some(1)).await;
    mount_job(&server, "done", None).await;
    mount_status_once(&server, "generating_script").await;
    mount_status_once(&server, "generating_video").await;
    mount_status_once(&server, "done").await;
    Mock::given(method("GET"))
        .and(path("/api/videos/job-1/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp4-bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.mp4");

    let ok = run_args(
        &server,
        &["watch", "job-1", "--interval-ms", "20", "--download", dest.to_str().unwrap()],
    )
    .await
    .unwrap();

    assert!(ok);
    assert_eq!(std::fs::read(&dest).unwrap(), b"mp4-bytes");
}

#[tokio::test]
async fn test_watch_reports_failure() {
    let server = MockServer::start().await;
    mount_job(&server, "processing", None).await;
    Mock::given(method("GET"))
        .and(path("/api/videos/job-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "job-1",
            "status": "failed",
            "error_message": "Rendering crashed"
        })))
        .mount(&server)
        .await;

    assert!(!run_args(&server, &["watch", "job-1", "--interval-ms", "20"]).await.unwrap());
}

// =============================================================================
// status / show / download / health
// =============================================================================

#[tokio::test]
async fn test_status_of_failed_job_exits_non_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos/job-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("failed")))
        .mount(&server)
        .await;

    assert!(!run_args(&server, &["status", "job-1"]).await.unwrap());
}

#[tokio::test]
async fn test_show_missing_job_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos/job-1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Video not found"})))
        .mount(&server)
        .await;

    let err = assert_err!(run_args(&server, &["show", "job-1"]).await);
    assert!(format!("{err:#}").contains("Video not found"));
}

#[tokio::test]
#[serial]
async fn test_download_uses_suggested_file_name() {
    let server = MockServer::start().await;
    mount_job(&server, "done", None).await;
    Mock::given(method("GET"))
        .and(path("/api/videos/job-1/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp4-bytes".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let result = run_args(&server, &["download", "job-1"]).await;
    std::env::set_current_dir(previous).unwrap();

    assert!(result.unwrap());
    assert_eq!(
        std::fs::read(dir.path().join("Aroma_Diffuser_X1_review.mp4")).unwrap(),
        b"mp4-bytes"
    );
}

#[tokio::test]
async fn test_download_not_ready() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos/job-1/download"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Video is not ready yet"})),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.mp4");
    let err = assert_err!(
        run_args(&server, &["download", "job-1", "-o", dest.to_str().unwrap()]).await
    );
    assert!(err.to_string().contains("not ready"));
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "degraded"})))
        .mount(&server)
        .await;

    assert!(!run_args(&server, &["health"]).await.unwrap());
}
