//! Shared helpers for integration tests.

#![allow(dead_code)]

use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// ESC/POS full cut, the last command of every ticket job.
pub const CUT: [u8; 3] = [0x1D, 0x56, 0x00];

/// A printer on localhost that accepts one job, then closes the connection.
///
/// Resolves to the bytes it received.
pub async fn fake_printer() -> (u16, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 1024];
        while !received.ends_with(&CUT) {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }
        received
    });

    (port, handle)
}

/// A localhost port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

pub fn ticket_json(extra: &str) -> String {
    format!(
        r#"{{
            "licensePlate": "245 TU 1234",
            "createdBy": "Ahmed",
            "createdAt": "2026-10-19T07:05:00Z"{}
        }}"#,
        extra
    )
}
