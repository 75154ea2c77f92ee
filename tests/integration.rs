//! Integration tests for textwire.
//!
//! End-to-end scenarios driving the full pipeline: an in-memory duplex
//! stream stands in for the transport, a writer task plays the peer, and
//! assertions run against the message sequence the reader produces.

use textwire::{Chunk, MessageParser, ReaderBuilder, StreamReader};

use tokio::io::{duplex, AsyncWriteExt, DuplexStream};

const SEP: &str = "<TEST>";

/// Build a reader over one end of a duplex pipe, returning the peer end.
fn reader_over_duplex(buffer_size: usize) -> (textwire::Messages<DuplexStream>, DuplexStream) {
    let (local, remote) = duplex(4096);
    let parser = MessageParser::new(SEP).unwrap();
    let messages = StreamReader::new(local, parser, buffer_size)
        .unwrap()
        .read();
    (messages, remote)
}

/// Drain the sequence to completion, panicking on any I/O error.
async fn collect_all<R: tokio::io::AsyncRead + Unpin>(
    messages: &mut textwire::Messages<R>,
) -> Vec<String> {
    let mut out = Vec::new();
    while let Some(message) = messages.next().await {
        out.push(message.unwrap());
    }
    out
}

#[tokio::test]
async fn test_single_message_then_graceful_close() {
    let (mut messages, mut remote) = reader_over_duplex(64);

    remote.write_all(b"Hello World!<TEST>").await.unwrap();
    drop(remote);

    assert_eq!(collect_all(&mut messages).await, vec!["Hello World!"]);
}

#[tokio::test]
async fn test_no_separator_yields_no_messages() {
    let (mut messages, mut remote) = reader_over_duplex(64);

    remote.write_all(b"Hello World!").await.unwrap();
    drop(remote);

    // Graceful completion, no error, trailing text discarded.
    assert!(collect_all(&mut messages).await.is_empty());
}

#[tokio::test]
async fn test_unterminated_tail_is_not_emitted() {
    let (mut messages, mut remote) = reader_over_duplex(64);

    remote
        .write_all(b"Hello World!<TEST>Hello World!<TEST>Hello World!")
        .await
        .unwrap();
    drop(remote);

    assert_eq!(
        collect_all(&mut messages).await,
        vec!["Hello World!", "Hello World!"]
    );
}

#[tokio::test]
async fn test_lone_separator_yields_one_empty_message() {
    let (mut messages, mut remote) = reader_over_duplex(64);

    remote.write_all(b"<TEST>").await.unwrap();
    drop(remote);

    // The fragment before the separator is the empty string; it is a real
    // message, not an artifact.
    assert_eq!(collect_all(&mut messages).await, vec![""]);
}

#[tokio::test]
async fn test_separator_split_across_writes() {
    let (mut messages, mut remote) = reader_over_duplex(64);

    remote.write_all(b"Hello World!").await.unwrap();
    remote.write_all(b"<T").await.unwrap();
    remote.write_all(b"EST>").await.unwrap();
    drop(remote);

    assert_eq!(collect_all(&mut messages).await, vec!["Hello World!"]);
}

#[tokio::test]
async fn test_consecutive_separators_preserved() {
    let (mut messages, mut remote) = reader_over_duplex(64);

    remote.write_all(b"a<TEST><TEST>b<TEST>").await.unwrap();
    drop(remote);

    assert_eq!(collect_all(&mut messages).await, vec!["a", "", "b"]);
}

#[tokio::test]
async fn test_leading_separators_before_message() {
    let (mut messages, mut remote) = reader_over_duplex(64);

    remote
        .write_all(b"<TEST><TEST><TEST>Hello World!<TEST>")
        .await
        .unwrap();
    drop(remote);

    let received = collect_all(&mut messages).await;
    assert_eq!(received, vec!["", "", "", "Hello World!"]);
    assert_eq!(received.concat(), "Hello World!");
}

#[tokio::test]
async fn test_many_messages_coalesced_into_one_write() {
    let (mut messages, mut remote) = reader_over_duplex(1024);

    let expected: Vec<String> = (0..50).map(|i| format!("message_{}", i)).collect();
    let wire = format!("{}<TEST>", expected.join("<TEST>"));
    remote.write_all(wire.as_bytes()).await.unwrap();
    drop(remote);

    assert_eq!(collect_all(&mut messages).await, expected);
}

#[tokio::test]
async fn test_sequence_invariant_under_buffer_size() {
    let wire = "first<TEST>second<TEST><TEST>third<TEST>trailing junk";
    let expected = vec!["first", "second", "", "third"];

    for buffer_size in [1usize, 5, 10, 100, 1000] {
        let (mut messages, mut remote) = reader_over_duplex(buffer_size);

        remote.write_all(wire.as_bytes()).await.unwrap();
        drop(remote);

        assert_eq!(
            collect_all(&mut messages).await,
            expected,
            "buffer size {}",
            buffer_size
        );
    }
}

#[tokio::test]
async fn test_byte_at_a_time_reads() {
    // Buffer size 1 forces one byte per physical read, including through
    // the middle of every separator occurrence.
    let (mut messages, mut remote) = reader_over_duplex(1);

    remote.write_all(b"ab<TEST>cd<TEST>").await.unwrap();
    drop(remote);

    assert_eq!(collect_all(&mut messages).await, vec!["ab", "cd"]);
}

#[tokio::test]
async fn test_builder_end_to_end() {
    let (local, mut remote) = duplex(256);
    let mut messages = ReaderBuilder::new()
        .separator("\n")
        .buffer_size(8)
        .build(local)
        .unwrap()
        .read();

    remote.write_all(b"one\ntwo\nthree\n").await.unwrap();
    drop(remote);

    assert_eq!(collect_all(&mut messages).await, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn test_interleaved_writes_keep_arrival_order() {
    let (mut messages, mut remote) = reader_over_duplex(64);

    let writer = tokio::spawn(async move {
        for i in 0..20 {
            remote
                .write_all(format!("msg-{}<TEST>", i).as_bytes())
                .await
                .unwrap();
        }
    });

    let mut received = Vec::new();
    while let Some(message) = messages.next().await {
        received.push(message.unwrap());
    }
    writer.await.unwrap();

    let expected: Vec<String> = (0..20).map(|i| format!("msg-{}", i)).collect();
    assert_eq!(received, expected);
}

#[tokio::test]
async fn test_tcp_end_to_end() {
    use tokio::net::{TcpListener, TcpStream};

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut peer, _) = listener.accept().await.unwrap();
        peer.write_all(b"over<TEST>tcp<TEST>").await.unwrap();
    });

    let stream = TcpStream::connect(addr).await.unwrap();
    let parser = MessageParser::new(SEP).unwrap();
    let mut messages = StreamReader::from_tcp(stream, parser, 64)
        .unwrap()
        .read();

    assert_eq!(collect_all(&mut messages).await, vec!["over", "tcp"]);
    server.await.unwrap();
}

#[tokio::test]
async fn test_parser_and_reader_agree() {
    // The same wire text produces identical messages whether parsed as one
    // chunk directly or streamed through the reader in small reads.
    let wire = "x<TEST>y<TEST><TEST>z<TEST>tail";

    let mut parser = MessageParser::new(SEP).unwrap();
    let mut direct = Vec::new();
    parser.parse(&Chunk::copy_from_slice(wire.as_bytes()), &mut direct);

    let (mut messages, mut remote) = reader_over_duplex(3);
    remote.write_all(wire.as_bytes()).await.unwrap();
    drop(remote);

    assert_eq!(collect_all(&mut messages).await, direct);
}
