mod helpers;

use helpers::{query, Behaviour, MockUpstreamServer};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use stub_relay_application::use_cases::RelayQueryUseCase;
use stub_relay_domain::{answers, Header, RCODE_NOTIMP};
use stub_relay_infrastructure::dns::{DnsServerHandler, UdpTransport};

fn client() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

fn make_handler(upstream: &MockUpstreamServer) -> DnsServerHandler {
    let transport = Arc::new(UdpTransport::new(upstream.addr()));
    let use_case =
        RelayQueryUseCase::new(transport).with_timeout(Duration::from_millis(300));
    DnsServerHandler::new(Arc::new(use_case))
}

#[tokio::test]
async fn test_forwarded_response_carries_client_id() {
    let upstream = MockUpstreamServer::start(Behaviour::Answer).await;
    let handler = make_handler(&upstream);

    let response = handler
        .handle_datagram(&query(0x0B0B, 0, "example.com"), client())
        .await
        .unwrap();

    let header = Header::decode(&response).unwrap();
    assert_eq!(header.id, 0x0B0B);
    assert!(!header.authoritative_answer);
    assert!(!header.recursion_available);
    assert_eq!(header.reserved, 0);
    assert_eq!(header.authority_count, 0);
    assert_eq!(header.additional_count, 0);

    let records = answers(&response).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ipv4().unwrap().to_string(), "127.0.0.1");
}

#[tokio::test]
async fn test_non_standard_query_never_reaches_upstream() {
    let upstream = MockUpstreamServer::start(Behaviour::Answer).await;
    let handler = make_handler(&upstream);
    let request = query(0x0C0C, 4, "example.com");

    let response = handler.handle_datagram(&request, client()).await.unwrap();

    let header = Header::decode(&response).unwrap();
    assert_eq!(header.id, 0x0C0C);
    assert_eq!(header.response_code, RCODE_NOTIMP);
    assert_eq!(&response[12..], &request[12..]);
    assert_eq!(upstream.query_count(), 0);
}

#[tokio::test]
async fn test_short_datagram_is_dropped() {
    let upstream = MockUpstreamServer::start(Behaviour::Answer).await;
    let handler = make_handler(&upstream);

    assert!(handler.handle_datagram(&[0x01, 0x02], client()).await.is_none());
    assert_eq!(upstream.query_count(), 0);
}

#[tokio::test]
async fn test_upstream_timeout_is_dropped() {
    let upstream = MockUpstreamServer::start(Behaviour::Silent).await;
    let handler = make_handler(&upstream);

    let response = handler
        .handle_datagram(&query(1, 0, "example.com"), client())
        .await;

    assert!(response.is_none());
}

#[tokio::test]
async fn test_garbage_upstream_reply_is_dropped() {
    let upstream = MockUpstreamServer::start(Behaviour::Garbage).await;
    let handler = make_handler(&upstream);

    let response = handler
        .handle_datagram(&query(1, 0, "example.com"), client())
        .await;

    assert!(response.is_none());
}

#[tokio::test]
async fn test_concurrent_exchanges_are_independent() {
    let good = MockUpstreamServer::start(Behaviour::Answer).await;
    let handler = make_handler(&good);

    let mut tasks = Vec::new();
    for id in 0..8u16 {
        let handler = handler.clone();
        tasks.push(tokio::spawn(async move {
            let request = if id % 2 == 0 {
                query(id, 0, "example.com")
            } else {
                vec![0xFF]
            };
            (id, handler.handle_datagram(&request, client()).await)
        }));
    }

    for task in tasks {
        let (id, response) = task.await.unwrap();
        if id % 2 == 0 {
            assert_eq!(Header::decode(&response.unwrap()).unwrap().id, id);
        } else {
            assert!(response.is_none());
        }
    }
}
