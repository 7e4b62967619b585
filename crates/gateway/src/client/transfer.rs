use super::TradingClient;
use crate::correlator::Command;
use crate::error::{GatewayError, Result};
use crate::rendezvous::await_outcome;
use hermes_core::{AccountRegister, Amount, TransferDirection, TransferRequest};
use log::info;
use tokio::sync::oneshot;

impl TradingClient {
    /// Move funds from a registered bank account into the futures account
    pub async fn transfer_bank_to_future(
        &self,
        bank_account: &str,
        bank_password: &str,
        account_password: &str,
        amount: Amount,
    ) -> Result<()> {
        let register = self.registered(bank_account).await?;
        let req = TransferRequest::bank_to_future(&register, bank_password, account_password, amount);
        self.transfer(req).await
    }

    /// Move funds from the futures account out to a registered bank account
    pub async fn transfer_future_to_bank(
        &self,
        bank_account: &str,
        account_password: &str,
        amount: Amount,
    ) -> Result<()> {
        let register = self.registered(bank_account).await?;
        let req = TransferRequest::future_to_bank(&register, account_password, amount);
        self.transfer(req).await
    }

    async fn registered(&self, bank_account: &str) -> Result<AccountRegister> {
        self.ready()?;
        self.account_register(bank_account)
            .await?
            .ok_or_else(|| GatewayError::UnregisteredBankAccount(bank_account.to_string()))
    }

    /// Transfer answers carry no request key, so transfers run one at a time
    async fn transfer(&self, req: TransferRequest) -> Result<()> {
        let _guard = self.transfer_lock.lock().await;
        let (tx, rx) = oneshot::channel();
        self.commands.send(Command::WaitTransfer(tx))?;

        match req.direction {
            TransferDirection::BankToFuture => self.api.transfer_bank_to_future(&req).await?,
            TransferDirection::FutureToBank => self.api.transfer_future_to_bank(&req).await?,
        }

        await_outcome(rx, self.config.timeouts.transfer(), "transfer").await?;
        info!(
            "Transfer {:?} of {} via {} completed",
            req.direction, req.amount, req.bank_account
        );
        Ok(())
    }
}
