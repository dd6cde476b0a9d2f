//! Connected user's holdings in a market

use crate::market::{Market, Side};
use crate::pricing::{estimated_payout, pot_share_percent};
use crate::source::{MarketSource, SourceError};
use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::Serialize;

/// Holdings on one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SidePosition {
    /// Shares held
    pub balance: Decimal,
    /// Share of the side's supply, in percent
    pub pot_share_percent: Decimal,
    /// Payout if the side wins
    pub estimated_payout: Decimal,
}

impl SidePosition {
    fn compute(market: &Market, side: Side, balance: Decimal) -> Self {
        let circulating = market.circulating(side);
        Self {
            balance,
            pot_share_percent: pot_share_percent(balance, circulating),
            estimated_payout: estimated_payout(balance, market.pot, circulating),
        }
    }
}

/// User position across both sides
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPosition {
    /// Account holding the shares
    pub owner: Address,
    /// YES holdings
    pub yes: SidePosition,
    /// NO holdings
    pub no: SidePosition,
}

impl UserPosition {
    /// Position from raw balances
    pub fn compute(owner: Address, market: &Market, yes_balance: Decimal, no_balance: Decimal) -> Self {
        Self {
            owner,
            yes: SidePosition::compute(market, Side::Yes, yes_balance),
            no: SidePosition::compute(market, Side::No, no_balance),
        }
    }

    /// Holdings on `side`
    pub fn side(&self, side: Side) -> &SidePosition {
        match side {
            Side::Yes => &self.yes,
            Side::No => &self.no,
        }
    }

    /// Whether any shares are held
    pub fn has_position(&self) -> bool {
        self.yes.balance > Decimal::ZERO || self.no.balance > Decimal::ZERO
    }
}

/// Read `owner`'s balances and compute the position
///
/// Returns `None` without touching the source when no owner is connected.
pub async fn load_position<S: MarketSource + ?Sized>(
    source: &S,
    market: &Market,
    owner: Option<Address>,
) -> Result<Option<UserPosition>, SourceError> {
    let Some(owner) = owner else {
        return Ok(None);
    };
    let yes = source.balance_of(owner, market.token_id(Side::Yes)).await?;
    let no = source.balance_of(owner, market.token_id(Side::No)).await?;
    Ok(Some(UserPosition::compute(owner, market, yes, no)))
}
