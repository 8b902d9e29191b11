// SPDX-FileCopyrightText: 2026 Sift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Addresses for exercising transport failures.

use std::net::TcpListener;

/// Base URL of a loopback port with nothing listening on it.
///
/// The port is reserved by binding, then released, so connections to it are
/// refused. `wiremock::MockServer` is not usable for this: dropped servers
/// return to a pool and keep answering.
pub fn closed_port_url() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(format!("http://127.0.0.1:{port}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_points_at_loopback() {
        let url = closed_port_url().unwrap();
        assert!(url.starts_with("http://127.0.0.1:"));
        let port: u16 = url.rsplit(':').next().unwrap().parse().unwrap();
        assert_ne!(port, 0);
    }

    #[test]
    fn nothing_accepts_on_the_port() {
        let url = closed_port_url().unwrap();
        let addr = url.trim_start_matches("http://");
        assert!(std::net::TcpStream::connect(addr).is_err());
    }
}
