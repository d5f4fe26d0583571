use std::sync::Arc;

use anyhow::Context;
use labo::config::AgentConfig;
use labo::kernel::cancel::cancel_on_ctrl_c;
use labo::kernel::{event_bus, BackgroundConsumer, Reactor, StdinOperator, MAILBOX_CAPACITY};
use labo::services::input::EnigoDevice;
use labo::services::llm::PlanningService;
use labo::services::transport::{RemoteTransport, WebSocketTransport};
use labo::vision::{save_png, ScreenSource, XcapScreen};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    tracing::info!("Labo agent booting...");
    let config = AgentConfig::load()?;

    // 2. Initial capture. Startup aborts if the screen is unreachable.
    let screen: Arc<dyn ScreenSource> = Arc::new(XcapScreen);
    let frame = screen.capture().context("initial desktop capture failed")?;
    save_png(&frame, &config.capture.dir).context("saving initial capture failed")?;

    // 3. Remote transport. Same rule: no connection, no agent.
    let transport = WebSocketTransport::connect(&config.transport.url, config.transport.read_timeout())
        .await
        .context("connecting to remote server failed")?;

    let device = EnigoDevice::new().context("input device unavailable")?;
    let planner = Arc::new(PlanningService::new(&config.planner));

    // 4. Shared cancellation + mailbox
    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());
    let (publisher, mailbox) = event_bus(MAILBOX_CAPACITY);

    // 5. Background consumer owns the transport until it stops.
    let consumer = BackgroundConsumer::new(
        mailbox,
        screen.clone(),
        config.capture.dir.clone(),
        transport,
        cancel.clone(),
    );
    let consumer_task = tokio::spawn(consumer.run());

    let mut reactor = Reactor::new(
        screen,
        planner,
        device,
        StdinOperator::new(),
        publisher,
        config.reactor_config(),
        cancel.clone(),
    );
    tracing::info!("Agent active. Press Ctrl+C to stop.");
    reactor.run().await;

    // 6. Shutdown: stop the consumer, then close the socket gracefully.
    cancel.cancel();
    match consumer_task.await {
        Ok(mut transport) => {
            if let Err(e) = transport.close().await {
                tracing::warn!("Error during WebSocket close handshake: {}", e);
            }
        }
        Err(e) => tracing::error!("Background consumer panicked: {}", e),
    }

    tracing::info!("Labo agent exit");
    Ok(())
}
