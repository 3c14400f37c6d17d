use std::io::Read;
use std::net::TcpListener;
use std::thread;
use std::time::Duration;
use urbinder_communication::{RobotConnection, TcpConnector};
use urbinder_core::TransportError;

#[test]
fn test_script_arrives_verbatim_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = thread::spawn(move || {
        let (mut client, _) = listener.accept().unwrap();
        let mut received = String::new();
        client.read_to_string(&mut received).unwrap();
        received
    });

    let mut conn = RobotConnection::new(
        TcpConnector::new().with_connect_timeout(Duration::from_secs(5)),
        Some("127.0.0.1".to_string()),
        port,
    );
    let sent = conn
        .send_script("def blender_move():\t\n\tmovej([0.00000])  \nend\n")
        .unwrap();
    assert!(conn.is_connected());
    conn.disconnect();

    let received = server.join().unwrap();
    assert_eq!(received, "def blender_move():\n\tmovej([0.00000])\nend\n");
    assert_eq!(sent, received.len());
}

#[test]
fn test_connection_refused_is_reported() {
    // Bind then drop to get a port nobody listens on
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut conn = RobotConnection::new(
        TcpConnector::new().with_connect_timeout(Duration::from_secs(2)),
        Some("127.0.0.1".to_string()),
        port,
    );

    let err = conn.send_script("end\n").unwrap_err();
    assert!(matches!(err, TransportError::ConnectFailed { .. }));
    assert!(!conn.is_connected());
}
