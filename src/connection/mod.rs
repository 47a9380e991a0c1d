//! Connection establishment.
//!
//! A validated [`ConnectionMode`] maps onto exactly one [`Transport`], which
//! is then opened. Only the Default mode consults the runtime path resolver.

mod mode;
mod transport;

pub use mode::ConnectionMode;
pub use transport::{
    BoxedReader, BoxedWriter, Connection, ProcessSpec, ServerAddress, Transport, TransportKind,
    EMBED_FLAG,
};

use crate::args::PartitionResult;
use crate::error::TransportError;
use crate::runtime::RuntimePathResolver;

/// Decide how to reach the backend. Performs no I/O besides the runtime
/// directory checks of the Default mode.
pub fn transport_for(
    mode: ConnectionMode,
    partition: &PartitionResult,
    resolver: &RuntimePathResolver,
) -> Transport {
    match mode {
        ConnectionMode::Embed => Transport::Stdio,
        ConnectionMode::Server(address) => Transport::Server(ServerAddress::parse(&address)),
        ConnectionMode::Spawn { program, args } => {
            Transport::Process(ProcessSpec::embedded(program, &args))
        }
        ConnectionMode::Default { program, files } => {
            let mut args = Vec::with_capacity(partition.neovim_args.len() + files.len() + 2);
            if let Some(runtime) = resolver.resolve() {
                args.extend(runtime.directive());
            }
            args.extend_from_slice(&partition.neovim_args);
            args.extend(files);
            Transport::Process(ProcessSpec::embedded(program, &args))
        }
    }
}

/// Open the single transport selected by `mode`.
pub async fn establish(
    mode: ConnectionMode,
    partition: &PartitionResult,
    resolver: &RuntimePathResolver,
) -> Result<Connection, TransportError> {
    let name = mode.name();
    let transport = transport_for(mode, partition, resolver);
    tracing::info!(mode = name, kind = %transport.kind(), "Establishing connection");

    let connection = transport.open().await?;
    tracing::info!(mode = name, "Connection established");
    Ok(connection)
}
