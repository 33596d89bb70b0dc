//! End-to-end probe tests: real TCP listener, canned status sources,
//! byte-exact response assertions.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use db_sentinel::check::{ClusterChecker, HealthCheck, ReplicaChecker, StatusSnapshot};
use db_sentinel::config::ListenerConfig;
use db_sentinel::db::{StatusError, StatusSource};
use db_sentinel::http::Sentinel;
use db_sentinel::lifecycle::Shutdown;
use db_sentinel::net::Listener;

/// Status source answering every query with the same canned variables.
struct CannedSource {
    vars: Vec<(String, String)>,
}

impl CannedSource {
    fn new(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl StatusSource for CannedSource {
    async fn cluster_status(&self) -> Result<StatusSnapshot, StatusError> {
        Ok(StatusSnapshot::from_pairs(self.vars.clone()))
    }

    async fn replica_status(&self) -> Result<StatusSnapshot, StatusError> {
        Ok(StatusSnapshot::from_pairs(self.vars.clone()))
    }
}

/// Status source that fails like an unreachable database.
struct UnreachableSource;

#[async_trait]
impl StatusSource for UnreachableSource {
    async fn cluster_status(&self) -> Result<StatusSnapshot, StatusError> {
        Err(StatusError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )))
    }

    async fn replica_status(&self) -> Result<StatusSnapshot, StatusError> {
        Err(StatusError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )))
    }
}

/// Spawn a sentinel on an ephemeral loopback port.
async fn start_sentinel(
    checker: Arc<dyn HealthCheck>,
) -> (SocketAddr, Shutdown, tokio::task::JoinHandle<()>) {
    let config = ListenerConfig {
        bind_ip: "127.0.0.1".to_string(),
        bind_port: 0,
        max_connections: 8,
    };
    let listener = Listener::bind(&config).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move {
        Sentinel::new(checker).run(listener, rx).await;
    });

    (addr, shutdown, handle)
}

/// Connect, optionally send some bytes, read the full response.
async fn probe(addr: SocketAddr, payload: Option<&[u8]>) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    if let Some(payload) = payload {
        stream.write_all(payload).await.unwrap();
    }
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

fn cluster_checker(source: Arc<dyn StatusSource>, accept_donor: bool) -> Arc<dyn HealthCheck> {
    Arc::new(ClusterChecker::new(
        source,
        accept_donor,
        Duration::from_secs(1),
    ))
}

#[tokio::test]
async fn healthy_cluster_probe_gets_exact_200_response() {
    let source = Arc::new(CannedSource::new(&[
        ("wsrep_cluster_size", "3"),
        ("wsrep_ready", "ON"),
        ("wsrep_local_state", "4"),
    ]));
    let (addr, shutdown, _handle) = start_sentinel(cluster_checker(source, false)).await;

    let response = probe(addr, Some(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n")).await;
    assert_eq!(
        response,
        b"HTTP/1.1 200 OK\r\nContent-type: text/plain\r\nContent-length: 0\r\n\r\n"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn unreachable_database_probe_gets_503_diagnostic() {
    let (addr, shutdown, _handle) =
        start_sentinel(cluster_checker(Arc::new(UnreachableSource), false)).await;

    // The handler never reads the payload; send nothing at all.
    let response = probe(addr, None).await;
    let expected = "HTTP/1.1 503 Service Unavailable\r\n\
                    Content-type: text/plain\r\n\
                    Content-length: 36\r\n\
                    \r\n\
                    Unable to determine cluster status\r\n";
    assert_eq!(response, expected.as_bytes());

    shutdown.trigger();
}

#[tokio::test]
async fn lagging_replica_probe_reports_lag_and_threshold() {
    let source = Arc::new(CannedSource::new(&[
        ("Slave_IO_Running", "Yes"),
        ("Seconds_Behind_Master", "140"),
    ]));
    let checker: Arc<dyn HealthCheck> =
        Arc::new(ReplicaChecker::new(source, 120, Duration::from_secs(1)));
    let (addr, shutdown, _handle) = start_sentinel(checker).await;

    // Arbitrary junk instead of HTTP; the sentinel must not care.
    let response = probe(addr, Some(b"\x00\x01garbage\xff")).await;
    let text = String::from_utf8(response).unwrap();
    assert!(text.starts_with("HTTP/1.1 503 Service Unavailable\r\n"));
    assert!(text.contains("140"));
    assert!(text.contains("120"));

    shutdown.trigger();
}

#[tokio::test]
async fn every_connection_triggers_a_fresh_check() {
    let source = Arc::new(CannedSource::new(&[
        ("wsrep_cluster_size", "3"),
        ("wsrep_ready", "ON"),
        ("wsrep_local_state", "4"),
    ]));
    let (addr, shutdown, _handle) = start_sentinel(cluster_checker(source, false)).await;

    for _ in 0..5 {
        let response = probe(addr, None).await;
        assert!(response.starts_with(b"HTTP/1.1 200 OK\r\n"));
    }

    shutdown.trigger();
}

#[tokio::test]
async fn shutdown_stops_the_accept_loop() {
    let (addr, shutdown, handle) =
        start_sentinel(cluster_checker(Arc::new(UnreachableSource), false)).await;

    // Prove the server is alive, then ask it to stop.
    let _ = probe(addr, None).await;
    shutdown.trigger();

    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("accept loop did not exit after shutdown")
        .unwrap();
}
