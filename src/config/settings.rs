//! User settings for the ledger engine
//!
//! Settings are stored by the host application; this module only describes
//! their shape, fills defaults, validates them and builds services from them.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{check_date_format, Payday, PaydayAdjustment};
use crate::services::calendar::BusinessCalendar;
use crate::services::pay_period::{PayPeriodCalculator, DEFAULT_DATE_FORMAT};
use crate::services::recurring::{RecurringScheduler, ShortMonthPolicy};

/// User settings relevant to period and schedule computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Day of the month salary is paid (1-31)
    #[serde(default = "default_payday")]
    pub payday: u32,

    /// Where a payday on a weekend or holiday moves to
    #[serde(default)]
    pub payday_adjustment: PaydayAdjustment,

    /// How monthly recurring rules treat months lacking their day
    #[serde(default)]
    pub short_month_policy: ShortMonthPolicy,

    /// strftime format used for pay period display text
    #[serde(default = "default_period_display_format")]
    pub period_display_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_payday() -> u32 {
    25
}

fn default_period_display_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            payday: default_payday(),
            payday_adjustment: PaydayAdjustment::default(),
            short_month_policy: ShortMonthPolicy::default(),
            period_display_format: default_period_display_format(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from their JSON form
    pub fn from_json(contents: &str) -> LedgerResult<Self> {
        let settings: Settings = serde_json::from_str(contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> LedgerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> LedgerResult<()> {
        self.payday()?;
        if self.period_display_format.trim().is_empty() {
            return Err(LedgerError::Config(
                "period_display_format cannot be empty".into(),
            ));
        }
        check_date_format(&self.period_display_format)
    }

    /// The configured payday, validated
    pub fn payday(&self) -> LedgerResult<Payday> {
        Payday::new(self.payday)
    }

    /// Build a pay period calculator over the given business-day calendar
    pub fn pay_period_calculator<C: BusinessCalendar>(
        &self,
        calendar: C,
    ) -> LedgerResult<PayPeriodCalculator<C>> {
        PayPeriodCalculator::new(self.payday()?, self.payday_adjustment, calendar)
            .with_date_format(self.period_display_format.clone())
    }

    /// Build a recurring scheduler over the given business-day calendar
    pub fn recurring_scheduler<C: BusinessCalendar>(&self, calendar: C) -> RecurringScheduler<C> {
        RecurringScheduler::new(calendar, self.short_month_policy)
    }
}
