//! # Expedition errors
//!
//! Every way a call into the expedition blueprints can be rejected. Blueprints abort with the
//! variant's message, so the message doubles as the on-ledger error text.

use std::fmt;

/// Reasons an expedition call is rejected. A rejected call never leaves partial state behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpeditionError {
    /// A start was attempted while the expedition registry is closed.
    ContractClosed,
    /// The caller did not prove ownership of a referenced general.
    NotOwner,
    /// A start was attempted on a general that is already on an expedition.
    AlreadyOnExpedition,
    /// A completion was attempted on a general that is not on an expedition.
    NotOnExpedition,
    /// A completion was attempted before the expedition duration elapsed.
    ExpeditionNotFinished,
    /// An administrative method was called without the administrator badge.
    ///
    /// Administrative methods are restricted to the `OWNER` role, so the auth module rejects such
    /// a call before the method runs. This error surfaces as that auth error, never as this message.
    NotAuthorized,
    /// The reward ledger refused to credit the controller.
    RewardLedgerRejected,
    /// A batch call was made without any general ids.
    EmptyBatch,
    /// An expedition duration below zero was supplied.
    NegativeDuration,
}

impl ExpeditionError {
    pub const fn message(&self) -> &'static str {
        match self {
            ExpeditionError::ContractClosed => "ContractClosed: expeditions are closed.",
            ExpeditionError::NotOwner => "NotOwner: you do not own this general.",
            ExpeditionError::AlreadyOnExpedition => {
                "AlreadyOnExpedition: general is already on an expedition."
            }
            ExpeditionError::NotOnExpedition => {
                "NotOnExpedition: general is not on an expedition."
            }
            ExpeditionError::ExpeditionNotFinished => {
                "ExpeditionNotFinished: expedition has not finished yet."
            }
            ExpeditionError::NotAuthorized => {
                "NotAuthorized: only the administrator can do this."
            }
            ExpeditionError::RewardLedgerRejected => {
                "RewardLedgerRejected: reward ledger refused to credit the reward."
            }
            ExpeditionError::EmptyBatch => "EmptyBatch: no generals supplied.",
            ExpeditionError::NegativeDuration => {
                "NegativeDuration: expedition duration cannot be negative."
            }
        }
    }
}

impl fmt::Display for ExpeditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
