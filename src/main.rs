//! RAX FTP Client - Entry Point
//!
//! Interactive FTP client: `rax-ftp-client [host [port]]`.

use log::{error, info};
use std::io::stdout;
use tokio::io::{BufReader, stdin};

use rax_ftp_client::commands::{UserCommand, handle_command, run_repl};
use rax_ftp_client::utils::logging::setup_logging;
use rax_ftp_client::{ClientConfig, FtpClient};

#[tokio::main]
async fn main() {
    setup_logging();

    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration, using defaults: {}", e);
            ClientConfig::default()
        }
    };

    info!("Launching FTP client...");
    let mut client = FtpClient::new(config);
    let mut out = stdout();

    let mut args = std::env::args().skip(1);
    if let Some(host) = args.next() {
        let port = match args.next().map(|p| p.parse::<u16>()) {
            Some(Ok(port)) => Some(port),
            Some(Err(_)) => {
                eprintln!("Invalid port number.");
                std::process::exit(2);
            }
            None => None,
        };
        handle_command(&mut client, UserCommand::Open { host, port }, &mut out).await;
    }

    run_repl(&mut client, BufReader::new(stdin()), &mut out).await;
}
