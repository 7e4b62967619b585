use front_sim::{FrontScript, FrontSim, OrderMode, Request, TransferMode, fixtures};
use hermes_core::{
    Direction, InputOrder, LoginRequest, OffsetFlag, OrderAction, OrderPolicy, OrderStatus,
    QueryKind, QueryRequest, RspInfo, TransferRequest,
};
use hermes_ports::{EventSink, GatewayEvent, SinkClosed, TraderApi};
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<GatewayEvent>>,
}

impl RecordingSink {
    fn take(&self) -> Vec<GatewayEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: GatewayEvent) -> Result<(), SinkClosed> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

fn setup(script: FrontScript) -> (Arc<RecordingSink>, FrontSim) {
    let _ = env_logger::try_init();
    let sink = Arc::new(RecordingSink::default());
    let front = FrontSim::new(sink.clone(), script);
    (sink, front)
}

fn limit_order(order_ref: &str) -> InputOrder {
    InputOrder::with_policy(
        OrderPolicy::Limit,
        fixtures::BROKER_ID,
        fixtures::INVESTOR_ID,
        "IF2409",
        "CFFEX",
        order_ref,
        Direction::Buy,
        OffsetFlag::Open,
        dec!(3005.2),
        2,
    )
}

fn query(kind: QueryKind) -> QueryRequest {
    QueryRequest {
        kind,
        broker_id: fixtures::BROKER_ID.to_string(),
        investor_id: fixtures::INVESTOR_ID.to_string(),
    }
}

#[tokio::test]
async fn test_login_reports_session() {
    let (sink, front) = setup(FrontScript::default());

    front.connect(fixtures::FRONT).await;
    front
        .login(&LoginRequest {
            broker_id: fixtures::BROKER_ID.into(),
            user_id: fixtures::INVESTOR_ID.into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    let events = sink.take();
    assert_eq!(events[0], GatewayEvent::FrontConnected);
    match &events[1] {
        GatewayEvent::RspUserLogin { login: Some(login), rsp } => {
            assert!(!rsp.is_error());
            assert_eq!(login.session_id, fixtures::SESSION_ID);
        }
        other => panic!("unexpected event: {:?}", other),
    }
    assert_eq!(front.request_labels().await, vec!["connect", "login"]);
}

#[tokio::test]
async fn test_query_pages_close_with_last() {
    let mut script = FrontScript::default();
    script.instruments = vec![fixtures::if2409(), fixtures::rb2410()];
    let (sink, front) = setup(script);

    front.query(&query(QueryKind::Instrument)).await.unwrap();

    let events = sink.take();
    assert_eq!(events.len(), 2);
    match (&events[0], &events[1]) {
        (GatewayEvent::RspQryInstrument(first), GatewayEvent::RspQryInstrument(last)) => {
            assert!(!first.is_last);
            assert!(last.is_last);
        }
        other => panic!("unexpected events: {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_query_sends_closing_page() {
    let mut script = FrontScript::default();
    script.trades.clear();
    let (sink, front) = setup(script);

    front.query(&query(QueryKind::Trade)).await.unwrap();

    let events = sink.take();
    assert!(matches!(
        &events[..],
        [GatewayEvent::RspQryTrade(page)] if page.is_last && page.record.is_none()
    ));
}

#[tokio::test]
async fn test_query_throttled_then_accepted() {
    let (sink, front) = setup(FrontScript::default().throttle_query(QueryKind::Position, 2));

    assert!(front.query(&query(QueryKind::Position)).await.is_err());
    assert!(front.query(&query(QueryKind::Position)).await.is_err());
    assert!(front.query(&query(QueryKind::Position)).await.is_ok());

    assert_eq!(front.throttled().await.len(), 2);
    assert_eq!(front.request_labels().await, vec!["query_position"]);
    assert_eq!(sink.take().len(), 1);
}

#[tokio::test]
async fn test_accepted_order_reports_twice() {
    let (sink, front) = setup(FrontScript::default());

    front.submit_order(&limit_order("8")).await.unwrap();

    let events = sink.take();
    assert_eq!(events.len(), 2);
    match (&events[0], &events[1]) {
        (GatewayEvent::RtnOrder(first), GatewayEvent::RtnOrder(second)) => {
            assert_eq!(first.local_id, second.local_id);
            assert_eq!(first.status, OrderStatus::Unknown);
            assert_eq!(second.status, OrderStatus::NoTradeQueueing);
            assert!(second.is_accepted());
            assert_eq!(second.session_id, fixtures::SESSION_ID);
        }
        other => panic!("unexpected events: {:?}", other),
    }
}

#[tokio::test]
async fn test_filled_order_reports_trade() {
    let (sink, front) = setup(FrontScript::default().with_order_mode(OrderMode::Fill));

    front.submit_order(&limit_order("8")).await.unwrap();

    let events = sink.take();
    assert_eq!(events.len(), 4);
    match (&events[2], &events[3]) {
        (GatewayEvent::RtnTrade(trade), GatewayEvent::RtnOrder(order)) => {
            assert_eq!(trade.local_id, order.local_id);
            assert_eq!(trade.volume, 2);
            assert_eq!(trade.price, dec!(3005.2));
            assert_eq!(order.status, OrderStatus::AllTraded);
        }
        other => panic!("unexpected events: {:?}", other),
    }
}

#[tokio::test]
async fn test_rejected_order() {
    let reject = RspInfo::new(31, "insufficient funds");
    let (sink, front) =
        setup(FrontScript::default().with_order_mode(OrderMode::Reject(reject.clone())));

    front.submit_order(&limit_order("8")).await.unwrap();

    assert_eq!(
        sink.take(),
        vec![GatewayEvent::RspOrderInsert {
            input: limit_order("8"),
            rsp: reject,
        }]
    );
}

#[tokio::test]
async fn test_cancel_resting_order() {
    let (sink, front) = setup(FrontScript::default());
    front.submit_order(&limit_order("8")).await.unwrap();
    let resting = match sink.take().pop() {
        Some(GatewayEvent::RtnOrder(order)) => order,
        other => panic!("unexpected event: {:?}", other),
    };

    front.cancel_order(&OrderAction::delete(&resting)).await.unwrap();

    match sink.take().pop() {
        Some(GatewayEvent::RtnOrder(order)) => assert_eq!(order.status, OrderStatus::Canceled),
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn test_transfer_response_then_broadcast() {
    let (sink, front) = setup(FrontScript::default());
    let req = TransferRequest::bank_to_future(&fixtures::account_register(), "1", "2", dec!(100));

    front.transfer_bank_to_future(&req).await.unwrap();

    let events = sink.take();
    assert!(matches!(events[0], GatewayEvent::RspTransfer { is_last: true, .. }));
    match &events[1] {
        GatewayEvent::RtnTransfer(report) => {
            assert_eq!(report.amount, dec!(100));
            assert_eq!(report.bank_account, fixtures::BANK_ACCOUNT);
        }
        other => panic!("unexpected event: {:?}", other),
    }
    assert!(matches!(front.requests().await[0], Request::Transfer(_)));
}

#[tokio::test]
async fn test_silent_transfer() {
    let (sink, front) = setup(FrontScript::default().with_transfer_mode(TransferMode::Silent));
    let req = TransferRequest::future_to_bank(&fixtures::account_register(), "2", dec!(100));

    front.transfer_future_to_bank(&req).await.unwrap();

    assert!(sink.take().is_empty());
}
