#![allow(dead_code)]

use bettrackr::config::{AnalysisConfig, DatabaseConfig};
use bettrackr::database::{create_pool, run_migrations};
use bettrackr::models::*;
use bettrackr::repositories::*;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Test database backed by a throwaway SQLite file
pub struct TestDatabase {
    pub pool: SqlitePool,
    pub store: Arc<dyn KeyValueStore>,
    pub ledger_repo: LedgerRepository,
    pub settings_repo: SettingsRepository,
    // Dropping the directory deletes the database file
    pub dir: TempDir,
}

impl TestDatabase {
    /// Create a fresh, migrated database in its own temp directory
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let pool = Self::open(&dir).await;
        Self::from_pool(pool, dir)
    }

    /// Open (or reopen) the database file inside `dir`
    pub async fn open(dir: &TempDir) -> SqlitePool {
        let config = DatabaseConfig::for_path(&dir.path().join("bettrackr.db"));

        let pool = create_pool(&config)
            .await
            .expect("Failed to create test database pool");

        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    pub fn from_pool(pool: SqlitePool, dir: TempDir) -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKvStore::new(pool.clone()));
        Self {
            pool,
            ledger_repo: LedgerRepository::new(store.clone()),
            settings_repo: SettingsRepository::new(store.clone()),
            store,
            dir,
        }
    }
}

/// Fixed reference instant so dates in assertions are stable
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 18, 30, 0).unwrap()
}

/// Build a record `days` after the reference instant
pub fn bet_on_day(days: i64, stake: &str, odds: &str, result: BetResult) -> BetRecord {
    let draft = BetDraft::new(format!("Market day {}", days), stake, odds)
        .with_result(result)
        .validate()
        .expect("fixture draft must be valid");
    BetRecord::with_identity(draft, Uuid::new_v4(), base_time() + Duration::days(days))
}

/// A small mixed ledger: one win, one loss, one push, one pending
pub fn sample_ledger() -> Vec<BetRecord> {
    vec![
        bet_on_day(3, "25", "3.00", BetResult::Pending),
        bet_on_day(2, "20", "1.80", BetResult::Push),
        bet_on_day(1, "50", "2.10", BetResult::Loss),
        bet_on_day(0, "100", "1.50", BetResult::Win),
    ]
}

pub fn analysis_config(base_url: &str) -> AnalysisConfig {
    AnalysisConfig {
        api_key: Some("test-key".to_string()),
        model: "test-model".to_string(),
        base_url: base_url.to_string(),
    }
}

/// HTTP endpoint that answers a single request with a canned response and
/// hands back the raw request it received.
pub struct MockServer {
    pub url: String,
    handle: JoinHandle<String>,
}

impl MockServer {
    pub async fn respond_once(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let request = read_request(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            socket.shutdown().await.ok();

            request
        });

        Self {
            url: format!("http://{}", addr),
            handle,
        }
    }

    /// Wait for the request the server captured
    pub async fn received(self) -> String {
        self.handle.await.expect("mock server task panicked")
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.expect("read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.trim().eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);

            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// Body of a captured request
pub fn request_body(raw: &str) -> &str {
    raw.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or("")
}
