//! KeyWire listening peer.
//!
//! Accepts TCP connections and runs the responder side of the entropy
//! handshake, one thread per connection. Every handshake owns its own
//! connection and key pair; nothing is shared between threads, so a
//! failed or hung handshake never affects the others.

use std::net::{TcpListener, TcpStream};
use std::thread;

use keywire_core::frame;
use keywire_transport::{Handshake, NegotiatedSecret, TransportError};

/// Accept connections forever, answering each handshake on its own thread.
pub fn run_server(listener: TcpListener) {
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                thread::spawn(move || handle_client(stream));
            }
            Err(e) => eprintln!("accept failed: {}", e),
        }
    }
}

/// Run the responder side of one handshake over an accepted stream.
///
/// # Errors
///
/// Surfaces any transport or cryptographic failure from the handshake.
pub fn serve_handshake(stream: TcpStream) -> Result<NegotiatedSecret, TransportError> {
    Handshake::accept(stream)
}

fn handle_client(stream: TcpStream) {
    let peer = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| String::from("unknown"));

    match serve_handshake(stream) {
        Ok(secret) => {
            println!("[{}] Peer Public Key: {}{}", peer, frame::PUBLIC_KEY_TAG, secret.peer_public_key());
            println!("[{}] Shared Secret: {}{}", peer, frame::SHARED_SECRET_TAG, secret.encoded());
            println!("[{}] Fingerprint: {}", peer, secret.fingerprint());
        }
        Err(e) => eprintln!("[{}] handshake failed: {}", peer, e),
    }
}
