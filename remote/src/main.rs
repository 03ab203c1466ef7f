use display::client::StateClient;
use display::config::DisplayConfig;
use display::dispatcher::Dispatcher;
use display::shortcuts::Page;
use remote_lib::session::{HELP, Session, TerminalHost, parse_input};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DisplayConfig::from_env()?;
    let start_page = dotenvy::var("DISPLAY_START_PAGE").unwrap_or_else(|_| "/".to_string());

    let client = StateClient::new(&config)?;
    info!("Driving display backend at {}", client.base_url());

    let host = TerminalHost::new(Page::from_path(&start_page));
    let session = Session::new(Dispatcher::new(client, host));

    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                for out in session.handle(parse_input(&line)).await {
                    println!("{out}");
                }
            }
            () = &mut shutdown => break,
        }
    }

    info!("Remote closed after {} reload(s)", session.host().reloads());
    Ok(())
}

#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down gracefully...");
}
