use std::net::SocketAddr;
use sha1::{Digest, Sha1};
use crate::cluster::enums::protocol_state::ProtocolState;

/// Hashes a socket address to the 64-bit key used throughout the tree.
///
/// The textual `ip:port` form is digested with SHA-1 and the digest is
/// reduced with [`fast_hash`]. Collisions are treated as identity
/// equality; the digest makes them unreachable in practice.
pub fn hash_socket_address(address: &SocketAddr) -> u64 {
    let text = format!("{}:{}", address.ip(), address.port());
    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    fast_hash(&hasher.finalize())
}

/// Reduces a digest to a 64-bit key.
pub fn fast_hash(data: &[u8]) -> u64 {
    let mut hash: u64 = 0;
    for byte in data {
        hash = hash.wrapping_mul(11).wrapping_add(*byte as u64);
    }
    hash
}

/// The self-discovery guard: identical tags mean the request reached the
/// local node through a loopback or alias address and must be rejected.
pub fn evaluate_discovery(own_tag: &str, request_tag: &str) -> ProtocolState {
    if own_tag == request_tag {
        ProtocolState::Reject
    } else {
        ProtocolState::Accept
    }
}

/// The one-shot port-guess retry: only an attempt against the preferred
/// well-known port earns a retry on the next port.
pub fn guess_address(address: &SocketAddr, preferred_port: u16) -> Option<SocketAddr> {
    if address.port() == preferred_port {
        Some(SocketAddr::new(address.ip(), preferred_port + 1))
    } else {
        None
    }
}
