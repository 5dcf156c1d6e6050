use crate::analytics::profit;
use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Sport assigned to drafts that do not name one
pub const DEFAULT_SPORT: &str = "Futebol";

/// Lowest accepted decimal odds (1.01)
pub const MIN_ODDS: Decimal = Decimal::from_parts(101, 0, 0, false, 2);

/// Largest accepted stake (1 000 000 000)
pub const MAX_STAKE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest accepted decimal odds (10 000)
pub const MAX_ODDS: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Outcome of a wager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BetResult {
    Pending,
    Win,
    Loss,
    Push,
}

impl BetResult {
    pub const ALL: [BetResult; 4] = [
        BetResult::Pending,
        BetResult::Win,
        BetResult::Loss,
        BetResult::Push,
    ];

    /// Convert to the persisted tag
    pub fn as_str(&self) -> &'static str {
        match self {
            BetResult::Pending => "PENDING",
            BetResult::Win => "WIN",
            BetResult::Loss => "LOSS",
            BetResult::Push => "PUSH",
        }
    }

    /// Anything but PENDING
    pub fn is_settled(&self) -> bool {
        !matches!(self, BetResult::Pending)
    }

    /// WIN or LOSS
    pub fn is_decisive(&self) -> bool {
        matches!(self, BetResult::Win | BetResult::Loss)
    }
}

impl FromStr for BetResult {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(BetResult::Pending),
            "WIN" => Ok(BetResult::Win),
            "LOSS" => Ok(BetResult::Loss),
            "PUSH" => Ok(BetResult::Push),
            _ => Err(AppError::Validation(format!(
                "Invalid result: {}. Must be one of: PENDING, WIN, LOSS, PUSH",
                s
            ))),
        }
    }
}

impl fmt::Display for BetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged wager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetRecord {
    pub id: Uuid,
    #[serde(alias = "date")]
    pub placed_at: DateTime<Utc>,
    pub sport: String,
    pub market: String,
    pub stake: Decimal,
    pub odds: Decimal,
    pub result: BetResult,
    /// Derived from stake, odds and result; only `settle` changes it
    pub profit: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BetRecord {
    /// Create a new record from a validated draft, stamping id and time
    pub fn new(draft: ValidatedDraft) -> Self {
        Self::with_identity(draft, Uuid::new_v4(), Utc::now())
    }

    /// Create a record with an explicit id and creation time
    pub fn with_identity(draft: ValidatedDraft, id: Uuid, placed_at: DateTime<Utc>) -> Self {
        let profit = profit(draft.stake, draft.odds, draft.result);
        Self {
            id,
            placed_at,
            sport: draft.sport,
            market: draft.market,
            stake: draft.stake,
            odds: draft.odds,
            result: draft.result,
            profit,
            notes: draft.notes,
        }
    }

    /// Set a new result and recompute profit from it
    pub fn settle(&mut self, result: BetResult) {
        self.result = result;
        self.profit = profit(self.stake, self.odds, result);
    }

    /// Whether the stored profit agrees with the profit rule
    pub fn is_consistent(&self) -> bool {
        self.profit == profit(self.stake, self.odds, self.result)
    }
}

/// Raw form input for a new bet. Stake and odds stay as text until validated.
#[derive(Debug, Clone, PartialEq)]
pub struct BetDraft {
    pub sport: String,
    pub market: String,
    pub stake: String,
    pub odds: String,
    pub result: BetResult,
    pub notes: Option<String>,
}

impl BetDraft {
    pub fn new(market: impl Into<String>, stake: impl Into<String>, odds: impl Into<String>) -> Self {
        Self {
            sport: DEFAULT_SPORT.to_string(),
            market: market.into(),
            stake: stake.into(),
            odds: odds.into(),
            result: BetResult::Pending,
            notes: None,
        }
    }

    pub fn with_result(mut self, result: BetResult) -> Self {
        self.result = result;
        self
    }

    pub fn with_sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = sport.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Check market, stake and odds against the ledger's domain
    pub fn validate(&self) -> AppResult<ValidatedDraft> {
        let market = self.market.trim();
        if market.is_empty() {
            return Err(AppError::Validation("Market is required".to_string()));
        }

        let stake = parse_amount("stake", &self.stake)?;
        if stake <= Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "Stake must be greater than zero, got {}",
                stake
            )));
        }
        if stake > MAX_STAKE {
            return Err(AppError::Validation(format!(
                "Stake must be at most {}, got {}",
                MAX_STAKE, stake
            )));
        }

        let odds = parse_amount("odds", &self.odds)?;
        if odds < MIN_ODDS {
            return Err(AppError::Validation(format!(
                "Odds must be at least {}, got {}",
                MIN_ODDS, odds
            )));
        }
        if odds > MAX_ODDS {
            return Err(AppError::Validation(format!(
                "Odds must be at most {}, got {}",
                MAX_ODDS, odds
            )));
        }

        let sport = match self.sport.trim() {
            "" => DEFAULT_SPORT.to_string(),
            s => s.to_string(),
        };

        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(ValidatedDraft {
            sport,
            market: market.to_string(),
            stake,
            odds,
            result: self.result,
            notes,
        })
    }
}

/// A draft whose fields passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    pub sport: String,
    pub market: String,
    pub stake: Decimal,
    pub odds: Decimal,
    pub result: BetResult,
    pub notes: Option<String>,
}

fn parse_amount(field: &str, raw: &str) -> AppResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Decimal::from_str(trimmed)
        .map_err(|_| AppError::InvalidDecimal(format!("{} must be a number, got '{}'", field, raw)))
}
