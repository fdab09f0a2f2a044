use std::net::TcpListener;

use keywire_server::run_server;
use keywire_transport::DEFAULT_PORT;

fn main() {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| format!("0.0.0.0:{}", DEFAULT_PORT));
    let listener = TcpListener::bind(&addr).expect("Failed to bind");
    println!("Handshake server listening on: {}", addr);
    run_server(listener);
}
