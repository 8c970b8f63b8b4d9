//! Opt-in visibility into the comparison protocol.
//!
//! Every value reported here is a decrypted intermediate, so an observer
//! sees more than the comparison result. The default, [`NoopObserver`],
//! discards everything.

use num_bigint::BigUint;

use super::bits::BitVector;

/// Decrypted intermediates, in the order the protocol produces them.
#[derive(Clone, Copy, Debug)]
pub enum SqpEvent<'a> {
    /// Stage 2/3: the mask and the decrypted masked difference.
    Masked { mask: &'a BigUint, masked: &'a BigUint },
    /// Stage 3: low `L` bits of the masked difference.
    BitsDecomposed { bits: &'a BitVector },
    /// Stage 5: decrypted borrow terms `e_0..e_{L-1}`.
    BorrowTerms { values: &'a [BigUint] },
    /// Stage 5: `2^L + a - b`.
    Unmasked { difference: &'a BigUint },
    /// Stage 5: both derivations of the decision bit.
    Decision { circuit_bit: u8, shifted_bit: u8 },
}

pub trait SqpObserver {
    fn observe(&mut self, _event: SqpEvent<'_>) {}
}

/// Ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SqpObserver for NoopObserver {}

/// Forwards every event to `tracing` at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl SqpObserver for TracingObserver {
    fn observe(&mut self, event: SqpEvent<'_>) {
        match event {
            SqpEvent::Masked { mask, masked } => {
                tracing::debug!(%mask, %masked, "sqp masked difference");
            }
            SqpEvent::BitsDecomposed { bits } => {
                tracing::debug!(%bits, "sqp bit decomposition");
            }
            SqpEvent::BorrowTerms { values } => {
                let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                tracing::debug!(?values, "sqp borrow terms");
            }
            SqpEvent::Unmasked { difference } => {
                tracing::debug!(%difference, "sqp unmasked difference");
            }
            SqpEvent::Decision {
                circuit_bit,
                shifted_bit,
            } => {
                tracing::debug!(circuit_bit, shifted_bit, "sqp decision");
            }
        }
    }
}
