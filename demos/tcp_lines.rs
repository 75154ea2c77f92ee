//! Line reader demo - prints newline-separated messages from a TCP peer.
//!
//! Start a sender, then run the demo:
//!
//! ```sh
//! # terminal 1: serve some lines
//! printf 'hello\nworld\n' | nc -l 127.0.0.1 7000
//!
//! # terminal 2
//! cargo run --example tcp_lines 127.0.0.1:7000
//! ```

use textwire::ReaderBuilder;
use tokio::net::TcpStream;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:7000".to_string());

    let stream = TcpStream::connect(&addr).await?;
    eprintln!("connected to {}", addr);

    let mut messages = ReaderBuilder::new()
        .separator("\n")
        .buffer_size(1024)
        .build_tcp(stream)?
        .read();

    while let Some(message) = messages.next().await {
        println!("{}", message?);
    }

    eprintln!("peer closed the connection");
    Ok(())
}
