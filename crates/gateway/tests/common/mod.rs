#![allow(dead_code)]

use front_sim::{FrontScript, FrontSim, fixtures};
use hermes_gateway::{LoginConfig, TradingClient, event_queue};
use std::sync::Arc;

pub struct Harness {
    pub client: TradingClient,
    pub front: Arc<FrontSim>,
}

pub fn config() -> LoginConfig {
    LoginConfig::new(
        fixtures::FRONT,
        fixtures::BROKER_ID,
        fixtures::INVESTOR_ID,
        "secret",
    )
    .with_auth("hermes_test", "0000000000000000")
}

pub fn harness_with(config: LoginConfig, script: FrontScript) -> Harness {
    let _ = env_logger::try_init();
    let (sink, queue) = event_queue();
    let front = Arc::new(FrontSim::new(Arc::new(sink), script));
    let client = TradingClient::new(config, front.clone(), queue);
    Harness { client, front }
}

pub fn harness(script: FrontScript) -> Harness {
    harness_with(config(), script)
}

/// A client that completed its handshake against `script`
pub async fn started(script: FrontScript) -> Harness {
    let harness = harness(script);
    harness
        .client
        .start()
        .await
        .expect("handshake should complete");
    harness
}

pub fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
