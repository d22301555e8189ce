// crux-client/examples/order_board.rs
// Watch the order board of one organization until Ctrl-C

use std::sync::Arc;

use crux_client::logging::init_logger_with;
use crux_client::{ClientConfig, CruxApi, OrderBoard, SessionContext};
use shared::order::next_order_action;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger_with(Some("info"), false);

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        println!("Usage: {} <user_id> <org_name> <store_name>", args[0]);
        println!("  Example: {} ada@example.com acme downtown", args[0]);
        return Ok(());
    }

    let config = ClientConfig::from_env();
    let api = Arc::new(CruxApi::new(config.build_http_client()?));
    let ctx = SessionContext::new(args[1].as_str(), args[2].as_str(), args[3].as_str());

    let board = OrderBoard::new(api, ctx);
    board.refresh().await?;

    for entry in board.orders() {
        let order = entry.current();
        let next = next_order_action(order)
            .map(|a| a.label)
            .unwrap_or("-");
        println!(
            "{:<24} {:<12} {:>10.2}  {:<20} next: {}",
            order.id, order.status.as_str(), order.total_cost, order.customer_name, next
        );
    }

    let poller = board.start_polling(config.poll_interval_duration());
    tracing::info!("Polling every {}s, Ctrl-C to stop", config.poll_interval);

    tokio::signal::ctrl_c().await?;
    board.close();
    poller.await?;

    Ok(())
}
