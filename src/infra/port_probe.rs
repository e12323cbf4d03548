use crate::domain::{PortProbe, ServiceStatus};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Classifies a port as running when a TCP connection can be opened.
///
/// Resolution failures, refusals, timeouts and unreachable hosts all map to
/// `Stopped`.
#[derive(Debug, Clone)]
pub struct TcpPortProbe {
    timeout: Duration,
}

impl TcpPortProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpPortProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl PortProbe for TcpPortProbe {
    fn probe(&self, host: &str, port: u16) -> ServiceStatus {
        debug!("host={} port={} timeout={:?}", host, port, self.timeout);

        let addrs = match (host, port).to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                debug!("could not resolve {}: {}", host, e);
                return ServiceStatus::Stopped;
            }
        };

        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                // the stream is dropped, and the socket closed, at the end of this arm
                Ok(_stream) => {
                    debug!("socket connect to {}; result=connected", addr);
                    return ServiceStatus::Running;
                }
                Err(e) => debug!("socket connect to {}; result={}", addr, e),
            }
        }

        ServiceStatus::Stopped
    }
}
