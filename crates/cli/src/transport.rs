use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// One inbound chat message: a command line scoped to a channel and an
/// author identity.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub channel: String,
    pub author: String,
    pub text: String,
}

/// The chat-platform seam. A real deployment adapts its SDK events into
/// [`Inbound`] values and routes outbound blocks back to the channel;
/// gating (e.g. only answering in channels named "semantle") belongs on
/// this edge too.
#[async_trait]
pub trait ChatTransport {
    /// The next inbound message, or `None` when the stream ends.
    async fn next(&mut self) -> Option<Inbound>;

    async fn send(&mut self, channel: &str, text: &str) -> io::Result<()>;
}

/// Local play over stdin/stdout: every line is a message from one fixed
/// author in one fixed channel.
pub struct ConsoleTransport {
    channel: String,
    author: String,
    lines: Lines<BufReader<Stdin>>,
}

impl ConsoleTransport {
    pub fn new(channel: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            author: author.into(),
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

#[async_trait]
impl ChatTransport for ConsoleTransport {
    async fn next(&mut self) -> Option<Inbound> {
        match self.lines.next_line().await {
            Ok(Some(text)) => Some(Inbound {
                channel: self.channel.clone(),
                author: self.author.clone(),
                text,
            }),
            Ok(None) => None,
            Err(err) => {
                log::warn!("stdin read failed: {err}");
                None
            }
        }
    }

    async fn send(&mut self, _channel: &str, text: &str) -> io::Result<()> {
        use std::io::Write;

        let mut stdout = io::stdout().lock();
        if let Err(err) = stdout
            .write_all(text.as_bytes())
            .and_then(|_| stdout.write_all(b"\n"))
            .and_then(|_| stdout.flush())
        {
            if err.kind() == io::ErrorKind::BrokenPipe {
                return Ok(());
            }
            return Err(err);
        }
        Ok(())
    }
}
