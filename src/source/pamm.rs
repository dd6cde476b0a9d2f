//! PAMM contract reads over JSON-RPC
//!
//! View calls are ABI-encoded with `alloy-sol-types` and sent as `eth_call`
//! requests through `reqwest`.

use super::{MarketSource, SourceError};
use crate::market::{from_units, to_units, Market, MarketId, Pool, Side};
use crate::pricing::{BuyQuote, QuoteOrigin};
use crate::telemetry::{record_latency, LatencyMetric};
use alloy_primitives::{address, hex, Address, U256};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monad testnet public RPC endpoint
pub const MONAD_TESTNET_RPC: &str = "https://testnet-rpc.monad.xyz";

/// PAMM contract on Monad testnet
pub const PAMM_ADDRESS: Address = address!("97b4a6b501C55cCC7A597E259266E7E28A2d0BE0");

sol! {
    interface IPamm {
        function marketCount() external view returns (uint256);

        function getMarket(uint256 marketId) external view returns (
            uint256 yesSupply,
            uint256 noSupply,
            address resolver,
            bool resolved,
            bool outcome,
            uint256 pot,
            uint256 payoutPerShare,
            string desc,
            uint72 closeTs,
            bool canClose,
            uint256 rYes,
            uint256 rNo,
            uint256 pYesNum,
            uint256 pYesDen
        );

        function getMarkets(uint256 start, uint256 count) external view returns (
            uint256[] marketIds,
            uint256[] yesSupplies,
            uint256[] noSupplies,
            address[] resolvers,
            bool[] resolvedFlags,
            bool[] outcomes,
            uint256[] pots,
            uint256[] payoutPerShares,
            string[] descs,
            uint72[] closes,
            bool[] canCloses,
            uint256[] rYesArr,
            uint256[] rNoArr,
            uint256[] pYesNumArr,
            uint256[] pYesDenArr,
            uint256 next
        );

        function getPool(uint256 marketId) external view returns (
            uint256 poolId,
            uint256 rYes,
            uint256 rNo,
            uint32 tsLast,
            uint256 kLast,
            uint256 lpSupply
        );

        function quoteBuyYes(uint256 marketId, uint256 yesOut) external view returns (
            uint256 oppIn,
            uint256 sttInFair,
            uint256 p0Num,
            uint256 p0Den,
            uint256 p1Num,
            uint256 p1Den
        );

        function quoteBuyNo(uint256 marketId, uint256 noOut) external view returns (
            uint256 oppIn,
            uint256 sttInFair,
            uint256 p0Num,
            uint256 p0Den,
            uint256 p1Num,
            uint256 p1Den
        );

        function balanceOf(address owner, uint256 id) external view returns (uint256);

        function tradingOpen(uint256 marketId) external view returns (bool);
    }
}

/// Configuration for the PAMM client
#[derive(Debug, Clone)]
pub struct PammConfig {
    /// JSON-RPC endpoint
    pub rpc_url: String,
    /// PAMM contract address
    pub contract: Address,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for PammConfig {
    fn default() -> Self {
        Self {
            rpc_url: MONAD_TESTNET_RPC.to_string(),
            contract: PAMM_ADDRESS,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Read-only client for the PAMM view functions
pub struct PammClient {
    config: PammConfig,
    client: Client,
    next_id: AtomicU64,
}

impl PammClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, SourceError> {
        Self::with_config(PammConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: PammConfig) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    /// Client configuration
    pub fn config(&self) -> &PammConfig {
        &self.config
    }

    /// Execute a view call and decode its return data
    async fn call<C: SolCall>(&self, operation: &'static str, call: C) -> Result<C::Return, SourceError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "eth_call",
            "params": [
                {
                    "to": self.config.contract.to_string(),
                    "data": hex::encode_prefixed(call.abi_encode()),
                },
                "latest"
            ],
        });

        tracing::debug!(operation, url = %self.config.rpc_url, "PAMM eth_call");
        let started = Instant::now();

        let response = self
            .client
            .post(&self.config.rpc_url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let response: RpcResponse = response.json().await?;

        record_latency(LatencyMetric::SourceRequest, operation, started.elapsed());

        if let Some(err) = response.error {
            return Err(SourceError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        let data = response.result.ok_or(SourceError::EmptyResponse)?;
        let bytes = hex::decode(&data).map_err(|e| SourceError::Decode(e.to_string()))?;

        C::abi_decode_returns(&bytes).map_err(|e| SourceError::Decode(e.to_string()))
    }
}

fn close_time(secs: u64) -> Result<DateTime<Utc>, SourceError> {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .ok_or_else(|| SourceError::Decode(format!("close timestamp out of range: {secs}")))
}

fn uint72_secs<T: TryInto<u64>>(value: T) -> Result<u64, SourceError> {
    value
        .try_into()
        .map_err(|_| SourceError::Decode("close timestamp exceeds u64".to_string()))
}

#[allow(clippy::too_many_arguments)]
fn build_market(
    id: MarketId,
    description: String,
    resolver: Address,
    close_secs: u64,
    pot: U256,
    yes_supply: U256,
    no_supply: U256,
    resolved: bool,
    outcome: bool,
    r_yes: U256,
    r_no: U256,
) -> Result<Market, SourceError> {
    Ok(Market {
        id,
        description,
        resolver,
        close_time: close_time(close_secs)?,
        pot: from_units(pot)?,
        yes_supply: from_units(yes_supply)?,
        no_supply: from_units(no_supply)?,
        resolved,
        outcome: resolved.then_some(if outcome { Side::Yes } else { Side::No }),
        pool: Some(Pool::new(from_units(r_yes)?, from_units(r_no)?)),
    })
}

#[async_trait]
impl MarketSource for PammClient {
    fn name(&self) -> &'static str {
        "pamm"
    }

    async fn market_count(&self) -> Result<u64, SourceError> {
        let count = self
            .call("market_count", IPamm::marketCountCall {})
            .await?;
        u64::try_from(count).map_err(|_| SourceError::Decode("market count exceeds u64".to_string()))
    }

    async fn market(&self, id: MarketId) -> Result<Option<Market>, SourceError> {
        let ret = self
            .call("get_market", IPamm::getMarketCall { marketId: id })
            .await?;

        // Unknown ids decode as an all-zero record
        if ret.resolver == Address::ZERO && ret.desc.is_empty() {
            return Ok(None);
        }

        build_market(
            id,
            ret.desc,
            ret.resolver,
            uint72_secs(ret.closeTs)?,
            ret.pot,
            ret.yesSupply,
            ret.noSupply,
            ret.resolved,
            ret.outcome,
            ret.rYes,
            ret.rNo,
        )
        .map(Some)
    }

    async fn markets(&self, start: u64, count: u64) -> Result<Vec<Market>, SourceError> {
        let ret = self
            .call(
                "get_markets",
                IPamm::getMarketsCall {
                    start: U256::from(start),
                    count: U256::from(count),
                },
            )
            .await?;

        let mut markets = Vec::with_capacity(ret.marketIds.len());
        for (i, id) in ret.marketIds.iter().enumerate() {
            let field = |name: &str| SourceError::Decode(format!("getMarkets: {name}[{i}] missing"));
            markets.push(build_market(
                *id,
                ret.descs.get(i).cloned().ok_or_else(|| field("descs"))?,
                *ret.resolvers.get(i).ok_or_else(|| field("resolvers"))?,
                uint72_secs(*ret.closes.get(i).ok_or_else(|| field("closes"))?)?,
                *ret.pots.get(i).ok_or_else(|| field("pots"))?,
                *ret.yesSupplies.get(i).ok_or_else(|| field("yesSupplies"))?,
                *ret.noSupplies.get(i).ok_or_else(|| field("noSupplies"))?,
                *ret.resolvedFlags.get(i).ok_or_else(|| field("resolved"))?,
                *ret.outcomes.get(i).ok_or_else(|| field("outcomes"))?,
                *ret.rYesArr.get(i).ok_or_else(|| field("rYesArr"))?,
                *ret.rNoArr.get(i).ok_or_else(|| field("rNoArr"))?,
            )?);
        }

        tracing::debug!(count = markets.len(), start, "Fetched PAMM markets");
        Ok(markets)
    }

    async fn pool(&self, id: MarketId) -> Result<Option<Pool>, SourceError> {
        let ret = self
            .call("get_pool", IPamm::getPoolCall { marketId: id })
            .await?;
        if ret.poolId.is_zero() {
            return Ok(None);
        }
        Ok(Some(Pool::new(from_units(ret.rYes)?, from_units(ret.rNo)?)))
    }

    async fn quote_buy(
        &self,
        id: MarketId,
        side: Side,
        shares_out: Decimal,
    ) -> Result<BuyQuote, SourceError> {
        if shares_out <= Decimal::ZERO {
            return Err(SourceError::NonPositiveAmount);
        }
        let raw_out = to_units(shares_out)?;

        let (opp_in, stt_in_fair) = match side {
            Side::Yes => {
                let ret = self
                    .call(
                        "quote_buy_yes",
                        IPamm::quoteBuyYesCall {
                            marketId: id,
                            yesOut: raw_out,
                        },
                    )
                    .await?;
                (ret.oppIn, ret.sttInFair)
            }
            Side::No => {
                let ret = self
                    .call(
                        "quote_buy_no",
                        IPamm::quoteBuyNoCall {
                            marketId: id,
                            noOut: raw_out,
                        },
                    )
                    .await?;
                (ret.oppIn, ret.sttInFair)
            }
        };

        BuyQuote::from_legs(
            side,
            shares_out,
            from_units(opp_in)?,
            from_units(stt_in_fair)?,
            QuoteOrigin::Remote,
        )
        .ok_or(SourceError::NonPositiveAmount)
    }

    async fn balance_of(&self, owner: Address, token_id: U256) -> Result<Decimal, SourceError> {
        let balance = self
            .call(
                "balance_of",
                IPamm::balanceOfCall {
                    owner,
                    id: token_id,
                },
            )
            .await?;
        Ok(from_units(balance)?)
    }

    async fn trading_open(&self, id: MarketId) -> Result<bool, SourceError> {
        self.call("trading_open", IPamm::tradingOpenCall { marketId: id })
            .await
    }
}
