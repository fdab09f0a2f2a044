use keywire_core::frame;
use keywire_transport::{Handshake, HandshakeConfig, DEFAULT_PORT};

const DEFAULT_HOST: &str = "localhost";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    let mut host = DEFAULT_HOST.to_string();
    let mut port = DEFAULT_PORT;
    let mut verify = true;

    // Minimal arg parsing
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--host" if i + 1 < args.len() => {
                host = args[i + 1].clone();
                i += 1;
            }
            "--port" if i + 1 < args.len() => {
                port = args[i + 1].parse()?;
                i += 1;
            }
            "--no-verify" => verify = false,
            "--help" | "-h" => {
                println!("Usage: keywire-cli [--host HOST] [--port PORT] [--no-verify]");
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                return Ok(());
            }
        }
        i += 1;
    }

    let mut config = HandshakeConfig::initiator(host.clone(), port);
    if !verify {
        config = config.without_verification();
    }

    println!("Connecting to {}:{}", host, port);
    let secret = Handshake::connect(config)?;

    println!(
        "Local Public Key: {}{}",
        frame::PUBLIC_KEY_TAG,
        secret.local_public_key()
    );
    println!(
        "Peer Public Key: {}{}",
        frame::PUBLIC_KEY_TAG,
        secret.peer_public_key()
    );
    println!(
        "Local Shared Secret: {}{}",
        frame::SHARED_SECRET_TAG,
        secret.encoded()
    );
    println!(
        "Peer Shared Secret: {}{}",
        frame::SHARED_SECRET_TAG,
        secret.peer_encoded()
    );
    println!("Fingerprint: {}", secret.fingerprint());

    if !verify && !secret.matched() {
        eprintln!("Warning: peer confirmation does not match local derivation.");
    }

    println!("Handshake complete.");
    Ok(())
}
