//! Dashboard Panels
//!
//! The dashboard shows five read-only panels. Each is fetched on its own so
//! the view can render whichever answers first; a refresh re-fetches all of
//! them. The top-spenders panel is separate and only fetches on demand.

use chrono::{NaiveDate, NaiveTime};

use crate::client::ApiClient;
use crate::error::{FormError, Result};
use crate::models::{Amounts, LocationCounts, TopSpender, BANK_A, BANK_B};

/// Ranking size when the user does not pick one
pub const DEFAULT_TOP_CUSTOMERS_LIMIT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardPanel {
    LocationCounts,
    CategorySpending,
    BankAverages(&'static str),
    OverallAverage,
}

impl DashboardPanel {
    /// Panels fetched on every dashboard load, in display order
    pub const ALL: [DashboardPanel; 5] = [
        DashboardPanel::LocationCounts,
        DashboardPanel::CategorySpending,
        DashboardPanel::BankAverages(BANK_A),
        DashboardPanel::BankAverages(BANK_B),
        DashboardPanel::OverallAverage,
    ];

    pub fn title(&self) -> String {
        match self {
            DashboardPanel::LocationCounts => "Transactions by Location".to_string(),
            DashboardPanel::CategorySpending => "Spending by Category".to_string(),
            DashboardPanel::BankAverages(bank) => format!("{} Average Spending", bank),
            DashboardPanel::OverallAverage => "Overall Platform Average".to_string(),
        }
    }
}

/// Data behind one panel
#[derive(Debug, Clone, PartialEq)]
pub enum PanelData {
    Counts(LocationCounts),
    Amounts(Amounts),
    Average(Option<f64>),
}

impl PanelData {
    /// Label/value rows ready for display
    pub fn rows(&self) -> Vec<(String, String)> {
        match self {
            PanelData::Counts(counts) => counts
                .iter()
                .map(|(k, v)| (k.clone(), v.to_string()))
                .collect(),
            PanelData::Amounts(amounts) => amounts
                .iter()
                .map(|(k, v)| (k.clone(), format_money(*v)))
                .collect(),
            PanelData::Average(Some(avg)) => vec![("Average".to_string(), format_money(*avg))],
            PanelData::Average(None) => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            PanelData::Counts(c) => c.is_empty(),
            PanelData::Amounts(a) => a.is_empty(),
            PanelData::Average(a) => a.is_none(),
        }
    }
}

/// Fetch the data behind one panel
pub async fn fetch_panel(client: &ApiClient, panel: DashboardPanel) -> Result<PanelData> {
    match panel {
        DashboardPanel::LocationCounts => client.counts_by_location().await.map(PanelData::Counts),
        DashboardPanel::CategorySpending => {
            client.spending_by_category().await.map(PanelData::Amounts)
        }
        DashboardPanel::BankAverages(bank) => {
            client.comparative_spending(bank).await.map(PanelData::Amounts)
        }
        DashboardPanel::OverallAverage => client.overall_average().await.map(PanelData::Average),
    }
}

pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Validated input of the top-spenders form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopCustomersQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub limit: u32,
}

impl TopCustomersQuery {
    /// Parse the form's `YYYY-MM-DD` dates and limit.
    ///
    /// A blank limit falls back to [`DEFAULT_TOP_CUSTOMERS_LIMIT`].
    pub fn from_inputs(start: &str, end: &str, limit: &str) -> std::result::Result<Self, FormError> {
        let start = parse_date("Start date", start)?;
        let end = parse_date("End date", end)?;
        if start > end {
            return Err(FormError::EmptyRange);
        }

        let limit = limit.trim();
        let limit = if limit.is_empty() {
            DEFAULT_TOP_CUSTOMERS_LIMIT
        } else {
            limit.parse().map_err(|_| FormError::NotANumber {
                field: "Limit",
                value: limit.to_string(),
            })?
        };

        Ok(Self { start, end, limit })
    }

    /// Run the query; the end date is inclusive
    pub async fn fetch(&self, client: &ApiClient) -> Result<Vec<TopSpender>> {
        let start = self.start.and_time(NaiveTime::default());
        let end = self.end.and_hms_opt(23, 59, 59).unwrap_or(start);
        client.top_customers(start, end, self.limit).await
    }
}

fn parse_date(field: &'static str, raw: &str) -> std::result::Result<NaiveDate, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::Missing { field });
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| FormError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}
