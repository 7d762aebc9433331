//! Sources for the default machine identity
//!
//! A generator asks its [`IdentitySource`] only when it has no usable machine
//! id of its own: no config at all, or a machine id that overflows its field.

use std::net::{IpAddr, UdpSocket};

use once_cell::sync::OnceCell;

use crate::error::{IdGenError, Result};

/// Remote endpoint used to pick the outbound interface. UDP connect sends nothing.
const PROBE_ADDR: &str = "8.8.8.8:80";

/// Supplies a fallback machine identity
pub trait IdentitySource: Send + Sync {
    fn machine_id(&self) -> Result<u64>;
}

/// Derives the machine identity from the low 16 bits of the local address
/// of the outbound network interface.
///
/// The first successful lookup is cached for the lifetime of the instance.
#[derive(Debug, Default)]
pub struct OutboundIpIdentity {
    cached: OnceCell<u64>,
}

impl OutboundIpIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    fn lookup() -> Result<u64> {
        let unavailable = |e: std::io::Error| IdGenError::IdentityUnavailable {
            reason: e.to_string(),
        };
        let socket = UdpSocket::bind("0.0.0.0:0").map_err(unavailable)?;
        socket.connect(PROBE_ADDR).map_err(unavailable)?;
        let local = socket.local_addr().map_err(unavailable)?;
        Ok(low_16_bits(local.ip()))
    }
}

impl IdentitySource for OutboundIpIdentity {
    fn machine_id(&self) -> Result<u64> {
        self.cached.get_or_try_init(Self::lookup).copied()
    }
}

/// A constant machine identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIdentity(pub u64);

impl IdentitySource for FixedIdentity {
    fn machine_id(&self) -> Result<u64> {
        Ok(self.0)
    }
}

/// The last two octets of an address, most significant first
pub(crate) fn low_16_bits(ip: IpAddr) -> u64 {
    let (hi, lo) = match ip {
        IpAddr::V4(v4) => {
            let o = v4.octets();
            (o[2], o[3])
        }
        IpAddr::V6(v6) => {
            let o = v6.octets();
            (o[14], o[15])
        }
    };
    (u64::from(hi) << 8) | u64::from(lo)
}
