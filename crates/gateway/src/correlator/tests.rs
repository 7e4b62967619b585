use super::*;
use crate::transport::Subscriber;
use crate::transport::channel::ChannelSubscriber;
use front_sim::fixtures;
use hermes_core::{InputOrder, OrderAction, OrderPolicy, OrderStatus, TransferDirection};
use hermes_ports::{Paged, TransferReport};
use rust_decimal_macros::dec;
use tokio::sync::oneshot;

fn setup() -> (Correlator, ChannelSubscriber<Notification>) {
    let _ = env_logger::try_init();
    let (publisher, subscriber) = ChannelPublisher::pair(64);
    (Correlator::new(fixtures::FRONT, publisher), subscriber)
}

async fn logged_in() -> (Correlator, ChannelSubscriber<Notification>) {
    let (mut correlator, subscriber) = setup();
    correlator
        .on_event(GatewayEvent::RspUserLogin {
            login: Some(fixtures::login_info()),
            rsp: RspInfo::ok(),
        })
        .await;
    (correlator, subscriber)
}

fn own_order(local_id: &str, order_ref: &str) -> Order {
    let input = InputOrder::with_policy(
        OrderPolicy::Limit,
        fixtures::BROKER_ID,
        fixtures::INVESTOR_ID,
        "IF2409",
        "CFFEX",
        order_ref,
        hermes_core::Direction::Buy,
        hermes_core::OffsetFlag::Open,
        dec!(3005.2),
        1,
    );
    Order::from_input(&input, local_id, fixtures::FRONT_ID, fixtures::SESSION_ID)
}

fn wait_order(correlator: &mut Correlator, order_ref: &str) -> oneshot::Receiver<Outcome<OrderLocalId>> {
    let (tx, rx) = oneshot::channel();
    correlator.on_command(Command::WaitOrder {
        order_ref: order_ref.to_string(),
        reply: tx,
    });
    rx
}

fn wait_signal(correlator: &mut Correlator) -> oneshot::Receiver<Outcome<Signal>> {
    let (tx, rx) = oneshot::channel();
    correlator.on_command(Command::WaitSignal {
        query: None,
        reply: tx,
    });
    rx
}

fn wait_query(correlator: &mut Correlator, kind: QueryKind) -> oneshot::Receiver<Outcome<Signal>> {
    let (tx, rx) = oneshot::channel();
    correlator.on_command(Command::WaitSignal {
        query: Some(kind),
        reply: tx,
    });
    rx
}

fn wait_transfer(correlator: &mut Correlator) -> oneshot::Receiver<Outcome<()>> {
    let (tx, rx) = oneshot::channel();
    correlator.on_command(Command::WaitTransfer(tx));
    rx
}

#[tokio::test]
async fn test_login_captures_session() {
    let (mut correlator, _sub) = setup();
    let mut rx = wait_signal(&mut correlator);

    correlator
        .on_event(GatewayEvent::RspUserLogin {
            login: Some(fixtures::login_info()),
            rsp: RspInfo::ok(),
        })
        .await;

    assert!(matches!(rx.try_recv(), Ok(Ok(Signal::LoggedIn(_)))));
    let session = correlator.cache.session.as_ref().unwrap();
    assert_eq!(session.front, fixtures::FRONT);
    assert!(session.owns(fixtures::FRONT_ID, fixtures::SESSION_ID));
}

#[tokio::test]
async fn test_login_error() {
    let (mut correlator, _sub) = setup();
    let mut rx = wait_signal(&mut correlator);

    correlator
        .on_event(GatewayEvent::RspUserLogin {
            login: None,
            rsp: RspInfo::new(3, "invalid login"),
        })
        .await;

    assert_eq!(rx.try_recv().unwrap().unwrap_err().error_id, 3);
    assert!(correlator.cache.session.is_none());
}

#[tokio::test]
async fn test_settlement_error_is_not_fatal() {
    let (mut correlator, _sub) = logged_in().await;
    let mut rx = wait_signal(&mut correlator);

    correlator
        .on_event(GatewayEvent::RspSettlementConfirm {
            rsp: RspInfo::new(8, "already confirmed"),
        })
        .await;

    assert_eq!(rx.try_recv().unwrap(), Ok(Signal::SettlementConfirmed));
}

#[tokio::test]
async fn test_first_own_update_completes_placement() {
    let (mut correlator, mut sub) = logged_in().await;
    let mut rx = wait_order(&mut correlator, "8");

    correlator.on_event(GatewayEvent::RtnOrder(own_order("1", "8"))).await;

    assert_eq!(rx.try_recv().unwrap(), Ok("1".to_string()));
    match sub.try_next().unwrap() {
        Some(Notification::Order(order)) => assert_eq!(order.local_id, "1"),
        other => panic!("unexpected notification: {:?}", other),
    }
}

#[tokio::test]
async fn test_later_updates_only_notify() {
    let (mut correlator, mut sub) = logged_in().await;
    correlator.on_event(GatewayEvent::RtnOrder(own_order("1", "8"))).await;

    // A waiter armed for the same reference is not completed by a repeat
    let mut rx = wait_order(&mut correlator, "8");
    let mut update = own_order("1", "8");
    update.status = OrderStatus::NoTradeQueueing;
    correlator.on_event(GatewayEvent::RtnOrder(update)).await;

    assert!(rx.try_recv().is_err());
    assert_eq!(
        correlator.cache.orders["1"].status,
        OrderStatus::NoTradeQueueing
    );
    assert!(matches!(sub.try_next(), Ok(Some(Notification::Order(_)))));
    assert!(matches!(sub.try_next(), Ok(Some(Notification::Order(_)))));
}

#[tokio::test]
async fn test_foreign_session_update_is_not_ours() {
    let (mut correlator, mut sub) = logged_in().await;
    let mut rx = wait_order(&mut correlator, "8");

    correlator
        .on_event(GatewayEvent::RtnOrder(fixtures::foreign_order("77", "8")))
        .await;

    assert!(rx.try_recv().is_err());
    assert!(correlator.cache.orders.contains_key("77"));
    assert!(matches!(sub.try_next(), Ok(Some(Notification::Order(_)))));
}

#[tokio::test]
async fn test_stale_reference_does_not_complete_newer_wait() {
    let (mut correlator, _sub) = logged_in().await;
    let mut rx = wait_order(&mut correlator, "9");

    // First update of an earlier, abandoned placement
    correlator.on_event(GatewayEvent::RtnOrder(own_order("1", "8"))).await;
    assert!(rx.try_recv().is_err());

    correlator.on_event(GatewayEvent::RtnOrder(own_order("2", "9"))).await;
    assert_eq!(rx.try_recv().unwrap(), Ok("2".to_string()));
}

#[tokio::test]
async fn test_concurrent_placements_complete_independently() {
    let (mut correlator, _sub) = logged_in().await;
    let mut first = wait_order(&mut correlator, "8");
    let mut second = wait_order(&mut correlator, "9");

    correlator.on_event(GatewayEvent::RtnOrder(own_order("1", "8"))).await;
    correlator.on_event(GatewayEvent::RtnOrder(own_order("2", "9"))).await;

    assert_eq!(first.try_recv().unwrap(), Ok("1".to_string()));
    assert_eq!(second.try_recv().unwrap(), Ok("2".to_string()));
}

#[tokio::test]
async fn test_disconnect_fails_every_placement() {
    let (mut correlator, _sub) = logged_in().await;
    let mut first = wait_order(&mut correlator, "8");
    let mut second = wait_order(&mut correlator, "9");

    correlator
        .on_event(GatewayEvent::FrontDisconnected { reason: 4097 })
        .await;

    assert_eq!(first.try_recv().unwrap().unwrap_err().error_id, 4097);
    assert_eq!(second.try_recv().unwrap().unwrap_err().error_id, 4097);
}

#[tokio::test]
async fn test_order_rejection() {
    let (mut correlator, _sub) = logged_in().await;
    let mut rx = wait_order(&mut correlator, "8");
    let input = InputOrder::with_policy(
        OrderPolicy::Fok,
        fixtures::BROKER_ID,
        fixtures::INVESTOR_ID,
        "IF2409",
        "CFFEX",
        "8",
        hermes_core::Direction::Sell,
        hermes_core::OffsetFlag::Close,
        dec!(3005),
        1,
    );

    correlator
        .on_event(GatewayEvent::RspOrderInsert {
            input,
            rsp: RspInfo::new(31, "insufficient funds"),
        })
        .await;

    assert_eq!(rx.try_recv().unwrap().unwrap_err().error_id, 31);
}

#[tokio::test]
async fn test_trades_accumulate_per_order() {
    let (mut correlator, mut sub) = logged_in().await;
    let order = own_order("1", "8");
    let first = Trade::against(&order, "t1", dec!(3005.2), 1);
    let second = Trade::against(&order, "t2", dec!(3005.4), 1);

    correlator.on_event(GatewayEvent::RtnTrade(first.clone())).await;
    correlator.on_event(GatewayEvent::RtnTrade(second)).await;
    // Replayed by the trade query
    correlator.on_event(GatewayEvent::RspQryTrade(Paged::record(first, true))).await;

    assert_eq!(correlator.cache.trades["1"].len(), 2);
    assert!(matches!(sub.try_next(), Ok(Some(Notification::Trade(_)))));
}

#[tokio::test]
async fn test_reference_query_merges_cache() {
    let (mut correlator, _sub) = logged_in().await;
    correlator.on_command(Command::BeginQuery(QueryKind::Instrument));
    let mut rx = wait_signal(&mut correlator);

    correlator
        .on_event(GatewayEvent::RspQryInstrument(Paged::record(fixtures::if2409(), false)))
        .await;
    assert!(correlator.cache.instruments.is_empty());

    correlator
        .on_event(GatewayEvent::RspQryInstrument(Paged::record(fixtures::rb2410(), true)))
        .await;

    assert_eq!(rx.try_recv().unwrap(), Ok(Signal::Loaded(QueryKind::Instrument)));
    assert_eq!(correlator.cache.instruments.len(), 2);
}

#[tokio::test]
async fn test_transient_query_snapshot() {
    let (mut correlator, _sub) = logged_in().await;
    correlator.on_command(Command::BeginQuery(QueryKind::Position));
    let mut rx = wait_query(&mut correlator, QueryKind::Position);

    correlator
        .on_event(GatewayEvent::RspQryPosition(Paged::record(fixtures::long_position(), true)))
        .await;

    match rx.try_recv().unwrap() {
        Ok(Signal::Snapshot(Snapshot::Positions(positions))) => {
            assert_eq!(positions, vec![fixtures::long_position()])
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_query_error_fails_wait() {
    let (mut correlator, _sub) = logged_in().await;
    let mut rx = wait_signal(&mut correlator);

    correlator
        .on_event(GatewayEvent::RspQryTradingAccount(Paged::failed(RspInfo::new(
            90,
            "query too frequent",
        ))))
        .await;

    assert_eq!(rx.try_recv().unwrap().unwrap_err().error_id, 90);
}

#[tokio::test]
async fn test_query_wait_ignores_other_kinds() {
    let (mut correlator, _sub) = logged_in().await;
    let mut rx = wait_query(&mut correlator, QueryKind::TradingAccount);

    // Late answer of an abandoned position query, then a reconnect
    correlator
        .on_event(GatewayEvent::RspQryPosition(Paged::failed(RspInfo::new(
            77,
            "late position error",
        ))))
        .await;
    correlator.on_event(GatewayEvent::FrontConnected).await;
    assert!(rx.try_recv().is_err());

    correlator
        .on_event(GatewayEvent::RspQryTradingAccount(Paged::record(
            fixtures::trading_account(),
            true,
        )))
        .await;
    assert!(matches!(
        rx.try_recv(),
        Ok(Ok(Signal::Snapshot(Snapshot::TradingAccounts(_))))
    ));
}

#[tokio::test]
async fn test_disconnect_fails_query_wait() {
    let (mut correlator, _sub) = logged_in().await;
    let mut rx = wait_query(&mut correlator, QueryKind::Position);

    correlator
        .on_event(GatewayEvent::FrontDisconnected { reason: 4097 })
        .await;

    assert_eq!(rx.try_recv().unwrap().unwrap_err().error_id, 4097);
}

#[tokio::test]
async fn test_transfer_first_answer_wins() {
    let (mut correlator, mut sub) = logged_in().await;
    let mut rx = wait_transfer(&mut correlator);

    correlator
        .on_event(GatewayEvent::RspTransfer {
            direction: TransferDirection::BankToFuture,
            rsp: RspInfo::ok(),
            is_last: true,
        })
        .await;
    correlator
        .on_event(GatewayEvent::RtnTransfer(TransferReport {
            direction: TransferDirection::BankToFuture,
            bank_account: fixtures::BANK_ACCOUNT.to_string(),
            account_id: fixtures::INVESTOR_ID.to_string(),
            amount: dec!(100),
            rsp: RspInfo::new(5, "late failure"),
        }))
        .await;

    assert_eq!(rx.try_recv().unwrap(), Ok(()));
    assert!(matches!(sub.try_next(), Ok(Some(Notification::Transfer(_)))));
}

#[tokio::test]
async fn test_rejected_cancel_is_published() {
    let (mut correlator, mut sub) = logged_in().await;
    let action = OrderAction::delete(&own_order("1", "8"));

    correlator
        .on_event(GatewayEvent::RspOrderAction {
            action,
            rsp: RspInfo::new(26, "order already filled"),
        })
        .await;

    match sub.try_next().unwrap() {
        Some(Notification::ActionRejected { rsp, .. }) => assert_eq!(rsp.error_id, 26),
        other => panic!("unexpected notification: {:?}", other),
    }
}

#[tokio::test]
async fn test_disconnect_fails_pending_wait() {
    let (mut correlator, mut sub) = setup();
    let mut rx = wait_signal(&mut correlator);

    correlator
        .on_event(GatewayEvent::FrontDisconnected { reason: 4097 })
        .await;

    assert_eq!(rx.try_recv().unwrap().unwrap_err().error_id, 4097);
    assert!(matches!(
        sub.try_next(),
        Ok(Some(Notification::Disconnected { reason: 4097 }))
    ));
}

#[tokio::test]
async fn test_read_command_sees_cache() {
    let (mut correlator, _sub) = logged_in().await;
    correlator.on_event(GatewayEvent::RtnOrder(own_order("1", "8"))).await;

    let (command, mut rx) = read_command(|cache| cache.orders.len());
    correlator.on_command(command);

    assert_eq!(rx.try_recv().unwrap(), 1);
}
