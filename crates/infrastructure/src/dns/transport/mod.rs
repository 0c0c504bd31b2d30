pub mod resolver;
pub mod udp;

pub use resolver::resolve_upstream;
pub use udp::UdpTransport;
