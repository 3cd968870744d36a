//! Transaction preparation and submission.
//!
//! # Responsibility
//! - Fetch signing metadata and produce sign documents for the wallet.
//! - Submit externally signed transactions and surface node rejections.
//!
//! # Invariants
//! - Signing happens outside this crate; only public data passes through.
//! - A broadcast the node answers with a non-zero code is an error.
//! - A document signed for another chain id never reaches the network.

use crate::chain::{chain_config, validate_account_address, ChainKey};
use crate::lcd::{BroadcastResult, LcdError, LcdSource};
use crate::tx::{build_sign_doc, build_std_tx, AminoSignDoc, StakingMsg, TxError, TxSignature};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum TxServiceError {
    Tx(TxError),
    Lcd(LcdError),
    ChainMismatch {
        expected: String,
        actual: String,
    },
    Rejected {
        txhash: String,
        code: u32,
        raw_log: String,
    },
}

impl Display for TxServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tx(err) => write!(f, "{err}"),
            Self::Lcd(err) => write!(f, "{err}"),
            Self::ChainMismatch { expected, actual } => {
                write!(f, "sign doc is for chain id {actual}, expected {expected}")
            }
            Self::Rejected {
                txhash,
                code,
                raw_log,
            } => write!(f, "transaction {txhash} rejected with code {code}: {raw_log}"),
        }
    }
}

impl Error for TxServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Tx(err) => Some(err),
            Self::Lcd(err) => Some(err),
            Self::ChainMismatch { .. } | Self::Rejected { .. } => None,
        }
    }
}

impl From<TxError> for TxServiceError {
    fn from(value: TxError) -> Self {
        Self::Tx(value)
    }
}

impl From<LcdError> for TxServiceError {
    fn from(value: LcdError) -> Self {
        Self::Lcd(value)
    }
}

pub struct TxService<L: LcdSource> {
    lcd: L,
}

impl<L: LcdSource> TxService<L> {
    pub fn new(lcd: L) -> Self {
        Self { lcd }
    }

    /// Builds the sign document for `msgs` sent by `signer`.
    ///
    /// Account number and sequence are read from the chain at call time.
    pub fn prepare_sign_doc(
        &self,
        chain: ChainKey,
        signer: &str,
        msgs: &[StakingMsg],
        memo: &str,
    ) -> Result<AminoSignDoc, TxServiceError> {
        let config = chain_config(chain);
        let signer = validate_account_address(config, signer).map_err(TxError::from)?;
        let account = self.lcd.fetch_account(config, &signer)?;
        let doc = build_sign_doc(config, &account, msgs, memo)?;
        info!(
            "event=tx_prepare module=service status=ok chain={chain} msg_count={} sequence={}",
            msgs.len(),
            doc.sequence
        );
        Ok(doc)
    }

    /// Broadcasts a signed document.
    ///
    /// # Errors
    /// - `ChainMismatch` when `sign_doc` names a chain id other than `chain`'s.
    /// - `Rejected` when the node answers with a non-zero code.
    pub fn broadcast(
        &self,
        chain: ChainKey,
        sign_doc: &AminoSignDoc,
        signature: &TxSignature,
    ) -> Result<BroadcastResult, TxServiceError> {
        let config = chain_config(chain);
        if sign_doc.chain_id != config.chain_id {
            error!(
                "event=tx_broadcast module=service status=chain_mismatch chain={chain} chain_id={}",
                sign_doc.chain_id
            );
            return Err(TxServiceError::ChainMismatch {
                expected: config.chain_id.to_string(),
                actual: sign_doc.chain_id.clone(),
            });
        }
        let body = build_std_tx(sign_doc, signature)?;
        let result = self.lcd.broadcast_tx(config, &body)?;

        if !result.is_accepted() {
            let code = result.code.unwrap_or_default();
            error!(
                "event=tx_broadcast module=service status=rejected chain={chain} txhash={} code={code}",
                result.txhash
            );
            return Err(TxServiceError::Rejected {
                txhash: result.txhash,
                code,
                raw_log: result.raw_log.unwrap_or_default(),
            });
        }

        info!(
            "event=tx_broadcast module=service status=ok chain={chain} txhash={}",
            result.txhash
        );
        Ok(result)
    }
}
