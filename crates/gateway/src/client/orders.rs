use super::TradingClient;
use crate::correlator::Command;
use crate::error::{GatewayError, Result};
use crate::rendezvous::await_outcome;
use hermes_core::{
    Direction, InputOrder, OffsetFlag, OrderAction, OrderLocalId, OrderPolicy, Price, Volume,
};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use tokio::sync::oneshot;

impl TradingClient {
    /// Resting limit order; the price is rounded to the instrument's tick
    pub async fn place_limit(
        &self,
        instrument_id: &str,
        direction: Direction,
        offset: OffsetFlag,
        price: Price,
        volume: Volume,
    ) -> Result<OrderLocalId> {
        self.place_order(OrderPolicy::Limit, instrument_id, direction, offset, price, volume)
            .await
    }

    /// Fill-and-kill: trade what is available at the price, cancel the rest
    pub async fn place_fak(
        &self,
        instrument_id: &str,
        direction: Direction,
        offset: OffsetFlag,
        price: Price,
        volume: Volume,
    ) -> Result<OrderLocalId> {
        self.place_order(OrderPolicy::Fak, instrument_id, direction, offset, price, volume)
            .await
    }

    /// Fill-or-kill: trade the whole volume at the price or nothing
    pub async fn place_fok(
        &self,
        instrument_id: &str,
        direction: Direction,
        offset: OffsetFlag,
        price: Price,
        volume: Volume,
    ) -> Result<OrderLocalId> {
        self.place_order(OrderPolicy::Fok, instrument_id, direction, offset, price, volume)
            .await
    }

    pub async fn place_market(
        &self,
        instrument_id: &str,
        direction: Direction,
        offset: OffsetFlag,
        volume: Volume,
    ) -> Result<OrderLocalId> {
        self.place_order(
            OrderPolicy::Market,
            instrument_id,
            direction,
            offset,
            Decimal::ZERO,
            volume,
        )
        .await
    }

    /// Submit an order and wait for the first update from this session
    ///
    /// Returns the order's local identifier. A throttled submission is not
    /// retried.
    pub async fn place_order(
        &self,
        policy: OrderPolicy,
        instrument_id: &str,
        direction: Direction,
        offset: OffsetFlag,
        price: Price,
        volume: Volume,
    ) -> Result<OrderLocalId> {
        self.ready()?;
        let instrument = self
            .instrument(instrument_id)
            .await?
            .ok_or_else(|| GatewayError::UnknownInstrument(instrument_id.to_string()))?;

        let limit_price = if policy.is_priced() {
            instrument.round_price(price)
        } else {
            Decimal::ZERO
        };
        if limit_price != price && policy.is_priced() {
            debug!(
                "Rounded {} price {} to {} (tick {})",
                instrument_id, price, limit_price, instrument.price_tick
            );
        }

        let order_ref = self.next_order_ref();
        let input = InputOrder::with_policy(
            policy,
            self.config.broker_id.clone(),
            self.config.investor_id(),
            instrument.instrument_id.clone(),
            instrument.exchange_id.clone(),
            order_ref.clone(),
            direction,
            offset,
            limit_price,
            volume,
        );

        let (tx, rx) = oneshot::channel();
        self.commands.send(Command::WaitOrder {
            order_ref: order_ref.clone(),
            reply: tx,
        })?;

        if let Err(throttled) = self.api.submit_order(&input).await {
            warn!("Order {} throttled: {}", order_ref, throttled);
            return Err(throttled.into());
        }

        let local_id = await_outcome(
            rx,
            self.config.timeouts.order(),
            &format!("order {}", order_ref),
        )
        .await?;
        info!(
            "Placed {:?} {:?} {} {} @ {} as {} (ref {})",
            policy, direction, volume, instrument_id, limit_price, local_id, order_ref
        );
        Ok(local_id)
    }

    /// Request cancellation of a known order
    ///
    /// Returns once the request is submitted; the outcome arrives as order
    /// update or rejection notifications.
    pub async fn cancel_order(&self, local_id: &str) -> Result<()> {
        self.ready()?;
        let order = self
            .order(local_id)
            .await?
            .ok_or_else(|| GatewayError::UnknownOrder(local_id.to_string()))?;

        let action = OrderAction::delete(&order);
        self.api.cancel_order(&action).await?;
        info!("Cancel requested for order {}", local_id);
        Ok(())
    }
}
