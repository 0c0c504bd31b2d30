use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use stub_relay_domain::MAX_QUERY_SIZE;
use stub_relay_infrastructure::dns::DnsServerHandler;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const RECV_DEADLINE: Duration = Duration::from_secs(5);
const SOCKET_BUFFER_SIZE: usize = 65535;

/// Runs the receive loop until `shutdown` is cancelled or the socket fails.
///
/// Each datagram is handled on its own task; responses are written back
/// through the shared socket in whatever order the exchanges finish.
pub async fn start_dns_server(
    bind_addr: SocketAddr,
    handler: DnsServerHandler,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket = Arc::new(create_udp_socket(bind_addr)?);
    info!(bind_address = %socket.local_addr()?, "DNS relay listening");

    run_udp_loop(socket, handler, shutdown).await
}

async fn run_udp_loop(
    socket: Arc<UdpSocket>,
    handler: DnsServerHandler,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let mut recv_buf = [0u8; MAX_QUERY_SIZE];

    loop {
        let received = tokio::select! {
            _ = shutdown.cancelled() => break,
            received = tokio::time::timeout(RECV_DEADLINE, socket.recv_from(&mut recv_buf)) => received,
        };

        let (len, client) = match received {
            Err(_) => continue,
            Ok(Ok(datagram)) => datagram,
            Ok(Err(e)) if is_transient(&e) => {
                debug!(error = %e, "Transient UDP receive error");
                continue;
            }
            Ok(Err(e)) => {
                error!(error = %e, "UDP receive failed, stopping relay");
                return Err(e.into());
            }
        };

        let query = recv_buf[..len].to_vec();
        let socket = socket.clone();
        let handler = handler.clone();
        tokio::spawn(async move {
            if let Some(response) = handler.handle_datagram(&query, client).await {
                if let Err(e) = socket.send_to(&response, client).await {
                    warn!(client = %client, error = %e, "Failed to send response");
                }
            }
        });
    }

    info!("DNS relay stopped");
    Ok(())
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::ConnectionReset
    )
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.set_send_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
