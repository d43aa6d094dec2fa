// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! `sntp-skew`: answer SNTP requests with a clock that is off by a fixed
//! offset.
//!
//! Usage:
//!   sntp-skew                          # offset from ./offset.txt, 127.0.0.1:123
//!   sntp-skew --offset -5 --port 1123  # 5 s slow, unprivileged port
//!
//! Testing:
//!   ntpdate -q -p 1 127.0.0.1

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error};

use sntp_server::config::{DEFAULT_OFFSET_FILE, OffsetConfig};
use sntp_server::error::ConfigError;
use sntp_server::protocol::{PORT, ReferenceIdentifier};
use sntp_server::server::SntpServer;

#[derive(Debug, Parser)]
#[command(version, about = "SNTP server that serves time skewed by a fixed offset")]
struct CmdLine {
    /// File whose first line holds the offset in seconds.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OFFSET_FILE)]
    offset_file: PathBuf,

    /// Offset in seconds; takes precedence over --offset-file.
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    offset: Option<String>,

    /// UDP port to listen on.
    #[arg(short, long, default_value_t = PORT)]
    port: u16,

    /// IPv4 address or host name to bind.
    #[arg(short, long, value_name = "ADDR", default_value = "127.0.0.1")]
    bind: String,

    /// Reference identifier advertised in replies (at most 4 bytes).
    #[arg(long, value_name = "TEXT", default_value = "GOES")]
    reference_id: String,

    /// Log level; overrides RUST_LOG.
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<LevelFilter>,
}

impl CmdLine {
    fn offset_config(&self) -> Result<OffsetConfig, ConfigError> {
        match &self.offset {
            Some(text) => OffsetConfig::parse(text),
            None => OffsetConfig::from_file(&self.offset_file),
        }
    }

    fn reference_id(&self) -> Result<ReferenceIdentifier, ConfigError> {
        ReferenceIdentifier::from_text(&self.reference_id).map_err(|_| {
            ConfigError::InvalidReferenceId {
                value: self.reference_id.clone(),
            }
        })
    }

    fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

async fn serve(cmd_line: &CmdLine, config: OffsetConfig) -> io::Result<()> {
    let server = SntpServer::builder()
        .listen(cmd_line.listen_addr())
        .offset(config.offset)
        .reference_id(cmd_line.reference_id()?)
        .build()
        .await?;

    server.run().await
}

fn main() -> ExitCode {
    let cmd_line = CmdLine::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = cmd_line.log_level {
        logger.filter_level(level);
    }
    logger.init();

    // Configuration problems are reported before anything is bound.
    let config = match cmd_line.offset_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(serve(&cmd_line, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server stopped: {e}");
            ExitCode::FAILURE
        }
    }
}
