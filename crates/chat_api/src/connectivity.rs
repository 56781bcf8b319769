use std::net::UdpSocket;

/// Coarse "is the network up at all" check consulted before classifying a
/// failure.
pub trait Connectivity {
    fn is_online(&self) -> bool;
}

/// Route-based probe: connecting a UDP socket selects a route without sending
/// any packet, and fails with "network unreachable" when the host has none.
#[derive(Debug, Clone)]
pub struct SystemConnectivity {
    probe_addr: String,
}

const DEFAULT_PROBE_ADDR: &str = "1.1.1.1:53";

impl Default for SystemConnectivity {
    fn default() -> Self {
        Self {
            probe_addr: DEFAULT_PROBE_ADDR.to_owned(),
        }
    }
}

impl SystemConnectivity {
    pub fn with_probe_addr(probe_addr: impl Into<String>) -> Self {
        Self {
            probe_addr: probe_addr.into(),
        }
    }
}

impl Connectivity for SystemConnectivity {
    fn is_online(&self) -> bool {
        let socket = match UdpSocket::bind("0.0.0.0:0") {
            Ok(socket) => socket,
            Err(error) => {
                tracing::debug!(%error, "connectivity probe could not bind");
                return true;
            }
        };
        match socket.connect(self.probe_addr.as_str()) {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!(%error, addr = %self.probe_addr, "no route for connectivity probe");
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}

impl<F> Connectivity for F
where
    F: Fn() -> bool,
{
    fn is_online(&self) -> bool {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::{AlwaysOnline, Connectivity, SystemConnectivity};

    #[test]
    fn closures_act_as_connectivity_probes() {
        let offline = || false;
        assert!(!offline.is_online());
        assert!(AlwaysOnline.is_online());
    }

    #[test]
    fn loopback_probe_always_has_a_route() {
        let probe = SystemConnectivity::with_probe_addr("127.0.0.1:9");
        assert!(probe.is_online());
    }
}
