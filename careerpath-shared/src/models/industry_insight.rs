/// IndustryInsight model and the generator payload value type
///
/// `industry_insights` rows are the only cross-principal shared resource in
/// the system. A row is created at most once per industry label, the first
/// time any user selects that industry, and is then read-shared by every
/// user of that industry. The primary key on `industry` enforces uniqueness
/// even when two onboarding transactions race to create the same label.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE industry_insights (
///     industry            TEXT PRIMARY KEY,
///     salary_ranges       JSONB,
///     growth_rate         DOUBLE PRECISION,
///     demand_level        TEXT,
///     top_skills          TEXT[] NOT NULL DEFAULT '{}',
///     market_outlook      TEXT,
///     key_trends          TEXT[] NOT NULL DEFAULT '{}',
///     recommended_skills  TEXT[] NOT NULL DEFAULT '{}',
///     next_update         TIMESTAMPTZ NOT NULL,
///     created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at          TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;

/// How long a freshly generated insight stays valid before it is due for a
/// refresh (the refresh itself is handled outside this crate).
pub const REFRESH_INTERVAL_DAYS: i64 = 7;

const INSIGHT_COLUMNS: &str = "industry, salary_ranges, growth_rate, demand_level, top_skills, \
                               market_outlook, key_trends, recommended_skills, next_update, \
                               created_at, updated_at";

/// Demand level for an industry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum DemandLevel {
    /// Strong hiring demand
    High,

    /// Steady hiring demand
    Medium,

    /// Weak hiring demand
    Low,
}

/// Overall market outlook for an industry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum MarketOutlook {
    /// Growing market
    Positive,

    /// Flat market
    Neutral,

    /// Shrinking market
    Negative,
}

/// Structured payload returned by the insight generator
///
/// This is a distinct value type with the known optional fields of the
/// generator contract. Unknown fields are rejected rather than silently
/// merged into the stored record, so a drifting generator surfaces as a
/// generation failure instead of corrupting the cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InsightPayload {
    /// Salary ranges per role (opaque JSON, shape owned by the generator)
    #[serde(default)]
    pub salary_ranges: Option<serde_json::Value>,

    /// Year-over-year growth rate in percent
    #[serde(default)]
    pub growth_rate: Option<f64>,

    /// Hiring demand level
    #[serde(default)]
    pub demand_level: Option<DemandLevel>,

    /// Most sought-after skills
    #[serde(default)]
    pub top_skills: Vec<String>,

    /// Overall market outlook
    #[serde(default)]
    pub market_outlook: Option<MarketOutlook>,

    /// Notable trends
    #[serde(default)]
    pub key_trends: Vec<String>,

    /// Skills worth learning
    #[serde(default)]
    pub recommended_skills: Vec<String>,
}

/// Cached insight record for one industry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct IndustryInsight {
    /// Industry label (natural key, also the target of `users.industry`)
    pub industry: String,

    /// Salary ranges per role
    pub salary_ranges: Option<serde_json::Value>,

    /// Year-over-year growth rate in percent
    pub growth_rate: Option<f64>,

    /// Hiring demand level
    pub demand_level: Option<DemandLevel>,

    /// Most sought-after skills
    pub top_skills: Vec<String>,

    /// Overall market outlook
    pub market_outlook: Option<MarketOutlook>,

    /// Notable trends
    pub key_trends: Vec<String>,

    /// Skills worth learning
    pub recommended_skills: Vec<String>,

    /// When this record becomes due for a refresh
    pub next_update: DateTime<Utc>,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

impl IndustryInsight {
    /// Finds an insight record by industry label
    ///
    /// # Returns
    ///
    /// The record if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_industry<'e>(
        executor: impl PgExecutor<'e>,
        industry: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let insight = sqlx::query_as::<_, IndustryInsight>(&format!(
            r#"
            SELECT {INSIGHT_COLUMNS}
            FROM industry_insights
            WHERE industry = $1
            "#,
        ))
        .bind(industry)
        .fetch_optional(executor)
        .await?;

        Ok(insight)
    }

    /// Creates an insight record from a generator payload
    ///
    /// Payload fields are copied explicitly into columns; `next_update` is
    /// set to now + [`REFRESH_INTERVAL_DAYS`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A record for this industry already exists (primary key violation)
    /// - Database connection fails
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        industry: &str,
        payload: InsightPayload,
    ) -> Result<Self, sqlx::Error> {
        let next_update = Utc::now() + Duration::days(REFRESH_INTERVAL_DAYS);

        let insight = sqlx::query_as::<_, IndustryInsight>(&format!(
            r#"
            INSERT INTO industry_insights
                (industry, salary_ranges, growth_rate, demand_level, top_skills,
                 market_outlook, key_trends, recommended_skills, next_update)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {INSIGHT_COLUMNS}
            "#,
        ))
        .bind(industry)
        .bind(payload.salary_ranges)
        .bind(payload.growth_rate)
        .bind(payload.demand_level)
        .bind(payload.top_skills)
        .bind(payload.market_outlook)
        .bind(payload.key_trends)
        .bind(payload.recommended_skills)
        .bind(next_update)
        .fetch_one(executor)
        .await?;

        Ok(insight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_deserializes_generator_output() {
        let payload: InsightPayload = serde_json::from_value(json!({
            "growthRate": 4.2,
            "demandLevel": "High",
            "topSkills": ["SQL", "Python"],
            "marketOutlook": "Positive",
            "keyTrends": ["Open banking"],
            "recommendedSkills": ["Rust"],
            "salaryRanges": [{"role": "Analyst", "min": 60000, "max": 90000}]
        }))
        .expect("valid payload");

        assert_eq!(payload.growth_rate, Some(4.2));
        assert_eq!(payload.demand_level, Some(DemandLevel::High));
        assert_eq!(payload.market_outlook, Some(MarketOutlook::Positive));
        assert_eq!(payload.top_skills, vec!["SQL", "Python"]);
        assert!(payload.salary_ranges.is_some());
    }

    #[test]
    fn test_payload_rejects_unknown_fields() {
        let result: Result<InsightPayload, _> = serde_json::from_value(json!({
            "growthRate": 1.0,
            "surpriseField": true
        }));

        assert!(result.is_err(), "unexpected fields must not be silently accepted");
    }

    #[test]
    fn test_payload_all_fields_optional() {
        let payload: InsightPayload = serde_json::from_value(json!({})).expect("empty payload");
        assert_eq!(payload, InsightPayload::default());
    }

    #[test]
    fn test_demand_level_wire_format() {
        assert_eq!(
            serde_json::to_string(&DemandLevel::High).unwrap(),
            "\"High\""
        );
        assert_eq!(
            serde_json::from_str::<MarketOutlook>("\"Negative\"").unwrap(),
            MarketOutlook::Negative
        );
    }
}
