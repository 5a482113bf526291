use std::io;
use std::io::Write;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};

#[cfg(feature = "serde")]
use actual_serde::{Deserialize, Serialize};

use crate::consensus::{Decodable, Encodable, encode};

/// The network address a masternode announces.
///
/// The address is stored on the wire as 16 bytes, with IPv4 addresses mapped
/// into IPv6, followed by the port in network byte order.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct ServiceAddress {
    pub ip: IpAddr,
    pub port: u16,
}

impl ServiceAddress {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

impl From<SocketAddr> for ServiceAddress {
    fn from(addr: SocketAddr) -> Self {
        ServiceAddress { ip: addr.ip(), port: addr.port() }
    }
}

impl Encodable for ServiceAddress {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<usize, io::Error> {
        let ip_address = match self.ip {
            IpAddr::V4(ip) => ip.to_ipv6_mapped().octets(),
            IpAddr::V6(ip) => ip.octets(),
        };
        let mut len = ip_address.consensus_encode(writer)?;
        // port is big endian on the wire
        len += self.port.swap_bytes().consensus_encode(writer)?;
        Ok(len)
    }
}

impl Decodable for ServiceAddress {
    fn consensus_decode<R: io::Read + ?Sized>(reader: &mut R) -> Result<Self, encode::Error> {
        let ip_address: [u8; 16] = Decodable::consensus_decode(reader)?;
        let port = u16::consensus_decode(reader)?.swap_bytes();
        let ip = Ipv6Addr::from(ip_address);
        let ip = match ip.to_ipv4_mapped() {
            Some(ipv4) => IpAddr::V4(ipv4),
            None => IpAddr::V6(ip),
        };
        Ok(ServiceAddress { ip, port })
    }
}
