//! Byte-stream transports to a Neovim peer.
//!
//! Every transport ends up as the same [`Connection`]: a read half, a write
//! half and, for spawned backends, the child process that owns them.

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::process::{Child, Command};

use crate::error::TransportError;

/// Flag that makes Neovim speak msgpack-rpc over its stdio.
pub const EMBED_FLAG: &str = "--embed";

pub type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;
pub type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Which kind of channel a [`Connection`] runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Stdio,
    Tcp,
    LocalSocket,
    Process,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Stdio => write!(f, "stdio"),
            TransportKind::Tcp => write!(f, "tcp"),
            TransportKind::LocalSocket => write!(f, "local socket"),
            TransportKind::Process => write!(f, "process"),
        }
    }
}

/// Address of a running Neovim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerAddress {
    /// `host:port`
    Tcp(String),
    /// Unix domain socket or Windows named pipe.
    Local(PathBuf),
}

impl ServerAddress {
    /// Anything ending in `:<port>` is TCP, everything else a local socket.
    pub fn parse(address: &str) -> Self {
        match address.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => {
                ServerAddress::Tcp(address.to_string())
            }
            _ => ServerAddress::Local(PathBuf::from(address)),
        }
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerAddress::Tcp(addr) => write!(f, "{}", addr),
            ServerAddress::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Program and arguments of a backend process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl ProcessSpec {
    /// Start `program` with `params` plus `--embed`.
    ///
    /// Neovim treats everything after `--` as file names, so `--embed` goes
    /// right before the first `--`, or last when there is none.
    pub fn embedded(program: impl Into<String>, params: &[String]) -> Self {
        let mut args = Vec::with_capacity(params.len() + 1);
        match params.iter().position(|p| p == "--") {
            Some(idx) => {
                args.extend_from_slice(&params[..idx]);
                args.push(EMBED_FLAG.to_string());
                args.extend_from_slice(&params[idx..]);
            }
            None => {
                args.extend_from_slice(params);
                args.push(EMBED_FLAG.to_string());
            }
        }
        Self {
            program: program.into(),
            args,
        }
    }
}

/// One way of obtaining a channel to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Server(ServerAddress),
    Process(ProcessSpec),
}

impl Transport {
    pub fn kind(&self) -> TransportKind {
        match self {
            Transport::Stdio => TransportKind::Stdio,
            Transport::Server(ServerAddress::Tcp(_)) => TransportKind::Tcp,
            Transport::Server(ServerAddress::Local(_)) => TransportKind::LocalSocket,
            Transport::Process(_) => TransportKind::Process,
        }
    }

    /// Open the channel. Nothing is retried.
    pub async fn open(self) -> Result<Connection, TransportError> {
        match self {
            Transport::Stdio => Ok(Connection::new(
                TransportKind::Stdio,
                Box::new(tokio::io::stdin()),
                Box::new(tokio::io::stdout()),
            )),
            Transport::Server(ServerAddress::Tcp(address)) => {
                let stream = tokio::net::TcpStream::connect(address.as_str())
                    .await
                    .map_err(|source| TransportError::Connect {
                        address: address.clone(),
                        source,
                    })?;
                let (reader, writer) = stream.into_split();
                Ok(Connection::new(
                    TransportKind::Tcp,
                    Box::new(reader),
                    Box::new(writer),
                ))
            }
            Transport::Server(ServerAddress::Local(path)) => open_local(path).await,
            Transport::Process(spec) => spawn_process(spec),
        }
    }
}

#[cfg(unix)]
async fn open_local(path: PathBuf) -> Result<Connection, TransportError> {
    let stream = tokio::net::UnixStream::connect(&path)
        .await
        .map_err(|source| TransportError::Connect {
            address: path.display().to_string(),
            source,
        })?;
    let (reader, writer) = stream.into_split();
    Ok(Connection::new(
        TransportKind::LocalSocket,
        Box::new(reader),
        Box::new(writer),
    ))
}

#[cfg(windows)]
async fn open_local(path: PathBuf) -> Result<Connection, TransportError> {
    let pipe = tokio::net::windows::named_pipe::ClientOptions::new()
        .open(&path)
        .map_err(|source| TransportError::Connect {
            address: path.display().to_string(),
            source,
        })?;
    let (reader, writer) = tokio::io::split(pipe);
    Ok(Connection::new(
        TransportKind::LocalSocket,
        Box::new(reader),
        Box::new(writer),
    ))
}

#[cfg(not(any(unix, windows)))]
async fn open_local(path: PathBuf) -> Result<Connection, TransportError> {
    Err(TransportError::Unsupported { address: path })
}

fn spawn_process(spec: ProcessSpec) -> Result<Connection, TransportError> {
    tracing::info!("Spawning backend: {} {}", spec.program, spec.args.join(" "));

    let mut child = Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TransportError::ExecutableNotFound {
                    program: spec.program.clone(),
                }
            } else {
                TransportError::Spawn {
                    program: spec.program.clone(),
                    source: e,
                }
            }
        })?;

    tracing::info!("Backend process started with PID: {:?}", child.id());

    let stdin = child
        .stdin
        .take()
        .ok_or(TransportError::MissingPipe { stream: "stdin" })?;
    let stdout = child
        .stdout
        .take()
        .ok_or(TransportError::MissingPipe { stream: "stdout" })?;

    let mut connection = Connection::new(TransportKind::Process, Box::new(stdout), Box::new(stdin));
    connection.child = Some(child);
    Ok(connection)
}

/// Live channel to the backend.
///
/// A spawned backend is killed when its `Connection` is dropped.
pub struct Connection {
    kind: TransportKind,
    reader: BoxedReader,
    writer: BoxedWriter,
    child: Option<Child>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("kind", &self.kind)
            .field("pid", &self.pid())
            .finish()
    }
}

impl Connection {
    /// Wrap an already open pair of streams.
    pub fn new(kind: TransportKind, reader: BoxedReader, writer: BoxedWriter) -> Self {
        Self {
            kind,
            reader,
            writer,
            child: None,
        }
    }

    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    /// PID of the spawned backend, if this connection owns one.
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(Child::id)
    }

    pub fn reader(&mut self) -> &mut (dyn AsyncRead + Send + Unpin) {
        &mut *self.reader
    }

    pub fn writer(&mut self) -> &mut (dyn AsyncWrite + Send + Unpin) {
        &mut *self.writer
    }

    /// Take the streams apart; the child, if any, stays alive with them.
    pub fn into_split(self) -> (BoxedReader, BoxedWriter, Option<Child>) {
        (self.reader, self.writer, self.child)
    }

    /// Wait until the peer goes away.
    ///
    /// Incoming data is discarded. Returns the backend's exit code for
    /// spawned processes and `None` for stream peers. A spawned backend is
    /// gone once it exits, even if a descendant still holds its stdout.
    pub async fn closed(self) -> std::io::Result<Option<i32>> {
        let (mut reader, writer, child) = self.into_split();
        let mut sink = tokio::io::sink();
        let drain = tokio::io::copy(&mut reader, &mut sink);
        tokio::pin!(drain);

        let code = match child {
            Some(mut child) => {
                let wait = child.wait();
                tokio::pin!(wait);
                let status = tokio::select! {
                    status = &mut wait => status,
                    drained = &mut drain => {
                        if let Err(e) = drained {
                            tracing::debug!("Backend stdout closed with error: {}", e);
                        }
                        wait.await
                    }
                };
                status?.code()
            }
            None => {
                drain.await?;
                None
            }
        };
        drop(writer);
        Ok(code)
    }
}
