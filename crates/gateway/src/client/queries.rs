use super::TradingClient;
use crate::correlator::{Command, Signal, Snapshot};
use crate::error::{GatewayError, Result};
use crate::rendezvous::await_outcome;
use crate::retry::submit_with_retry;
use hermes_core::{Position, PositionDetail, QueryKind, QueryRequest, TradingAccount};
use log::{debug, warn};
use std::collections::HashMap;
use tokio::sync::oneshot;

impl TradingClient {
    /// Current positions
    ///
    /// `Ok(None)` when the gateway kept throttling the query or no answer
    /// arrived in time; `Err` when the gateway answered with an error.
    pub async fn query_positions(&self) -> Result<Option<Vec<Position>>> {
        match self.query_snapshot(QueryKind::Position).await? {
            Some(Snapshot::Positions(positions)) => Ok(Some(positions)),
            _ => Ok(None),
        }
    }

    /// Open position lots
    pub async fn query_position_details(&self) -> Result<Option<Vec<PositionDetail>>> {
        match self.query_snapshot(QueryKind::PositionDetail).await? {
            Some(Snapshot::PositionDetails(details)) => Ok(Some(details)),
            _ => Ok(None),
        }
    }

    /// Trading accounts keyed by account id
    pub async fn query_trading_accounts(&self) -> Result<Option<HashMap<String, TradingAccount>>> {
        match self.query_snapshot(QueryKind::TradingAccount).await? {
            Some(Snapshot::TradingAccounts(accounts)) => Ok(Some(
                accounts
                    .into_iter()
                    .map(|account| (account.account_id.clone(), account))
                    .collect(),
            )),
            _ => Ok(None),
        }
    }

    async fn query_snapshot(&self, kind: QueryKind) -> Result<Option<Snapshot>> {
        self.ready()?;
        let _guard = self.query_lock.lock().await;

        let investors = self.read(|cache| cache.investors.len()).await?;
        let budget = self.config.timeouts.query(investors);

        self.commands.send(Command::BeginQuery(kind))?;
        let (tx, rx) = oneshot::channel();
        self.commands.send(Command::WaitSignal {
            query: Some(kind),
            reply: tx,
        })?;

        let req = QueryRequest {
            kind,
            broker_id: self.config.broker_id.clone(),
            investor_id: self.config.investor_id().to_string(),
        };
        let req = &req;
        let api = self.api.as_ref();
        if submit_with_retry(&self.config.retry, kind.as_str(), move || api.query(req))
            .await
            .is_err()
        {
            return Ok(None);
        }

        match await_outcome(rx, budget, &format!("{} query", kind.as_str())).await {
            Ok(Signal::Snapshot(snapshot)) if snapshot.kind() == kind => {
                debug!("{} query completed", kind.as_str());
                Ok(Some(snapshot))
            }
            Ok(other) => {
                warn!("{} query completed by unexpected {:?}", kind.as_str(), other);
                Ok(None)
            }
            Err(GatewayError::Timeout { waited, .. }) => {
                warn!("{} query got no answer within {:?}", kind.as_str(), waited);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
