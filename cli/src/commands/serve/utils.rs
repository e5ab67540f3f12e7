//! # Compressor HTTP Service Utilities
//!
//! File: cli/src/commands/serve/utils.rs
//!
//! ## Overview
//!
//! Helper functions for the startup banner: local IP address detection and
//! deciding whether the bound address is reachable from other machines.
//!
use std::net::{IpAddr, UdpSocket};
use tracing::{debug, warn};

/// # Get Local IP Address (`get_local_ip`)
///
/// Finds the address of the interface used for outbound traffic by "connecting"
/// a UDP socket. No packet is sent; the OS only selects a route. Falls back to
/// `"localhost"` when no route exists (offline machines, sandboxes).
pub fn get_local_ip() -> String {
    let detected = UdpSocket::bind("0.0.0.0:0")
        .and_then(|socket| {
            socket.connect("192.0.2.1:80")?;
            socket.local_addr()
        })
        .map(|addr| addr.ip());

    match detected {
        Ok(ip) if !ip.is_loopback() && !ip.is_unspecified() => {
            debug!("Found local IP: {}", ip);
            ip.to_string()
        }
        Ok(ip) => {
            debug!("Route lookup returned non-routable address {}", ip);
            "localhost".to_string()
        }
        Err(e) => {
            warn!("Could not detect local network IP ({}), falling back to 'localhost'", e);
            "localhost".to_string()
        }
    }
}

/// Returns `true` if the service is reachable from other machines.
pub fn is_network_visible(host: IpAddr) -> bool {
    !host.is_loopback()
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_get_local_ip() {
        let ip = get_local_ip();
        assert!(ip == "localhost" || ip.parse::<IpAddr>().is_ok());
    }

    #[test]
    fn test_is_network_visible() {
        assert!(!is_network_visible(Ipv4Addr::LOCALHOST.into()));
        assert!(is_network_visible(Ipv4Addr::UNSPECIFIED.into()));
        assert!(is_network_visible(Ipv4Addr::new(192, 168, 1, 10).into()));
    }
}
