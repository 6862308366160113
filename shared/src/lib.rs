use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Direction of a transaction. Amounts are always non-negative; the sign of a
/// movement is carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    /// Wire value, as used in query strings and form `<select>` values.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A transaction as served by the dashboard endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// ISO 8601 date or datetime string
    pub date: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Non-negative amount; see `transaction_type` for direction
    pub amount: f64,
}

impl Transaction {
    /// Calendar date part of `date` (`YYYY-MM-DD`), whatever time suffix the
    /// backend attached.
    pub fn date_only(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date_only(), "%Y-%m-%d").ok()
    }

    /// Same calendar month as `day`. Unparseable dates belong to no month.
    pub fn is_in_month_of(&self, day: NaiveDate) -> bool {
        self.parsed_date()
            .map_or(false, |date| date.year() == day.year() && date.month() == day.month())
    }

    /// Assemble the entity the backend just created from the submitted
    /// request, so views can prepend it without refetching.
    pub fn from_created(id: i64, request: &CreateTransactionRequest, category: &str) -> Self {
        Self {
            id,
            date: request.date.format("%Y-%m-%d").to_string(),
            description: request.description.clone(),
            category: category.to_string(),
            transaction_type: request.transaction_type,
            amount: request.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

/// Categories usable for a transaction of the given type, in server order.
pub fn categories_for(categories: &[Category], transaction_type: TransactionType) -> Vec<Category> {
    categories
        .iter()
        .filter(|c| c.category_type == transaction_type)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category_id: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionResponse {
    pub id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Income and expense totals for one day of the dashboard timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub expense: f64,
}

/// Response of `GET /dashboard`: current-month totals and transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(rename = "ingresos", default)]
    pub income: f64,
    #[serde(rename = "egresos", default)]
    pub expenses: f64,
    #[serde(rename = "saldo", default)]
    pub balance: f64,
    /// Keyed by `YYYY-MM-DD`
    #[serde(default)]
    pub timeline: BTreeMap<String, DailyTotals>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Count across all months; zero means the user has never recorded
    /// anything.
    #[serde(default)]
    pub total_transactions: u64,
}

impl DashboardResponse {
    /// Fold a just-created transaction into the snapshot. The timeline and
    /// the overall count always take it; the totals and the transaction list
    /// only cover the month of `today`, so a backdated entry leaves them alone.
    pub fn record(&mut self, transaction: Transaction, today: NaiveDate) {
        let amount = transaction.amount;
        let day = self.timeline.entry(transaction.date_only().to_string()).or_default();
        match transaction.transaction_type {
            TransactionType::Income => day.income += amount,
            TransactionType::Expense => day.expense += amount,
        }
        self.total_transactions += 1;

        if !transaction.is_in_month_of(today) {
            return;
        }
        match transaction.transaction_type {
            TransactionType::Income => self.income += amount,
            TransactionType::Expense => self.expenses += amount,
        }
        self.balance = self.income - self.expenses;
        self.transactions.insert(0, transaction);
    }
}

/// One row of `GET /dashboard/overview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// 1..=12; missing, negative or fractional values decode as 0, which is
    /// rendered as an unknown month
    #[serde(default, deserialize_with = "lenient_month")]
    pub month: u32,
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub expense: f64,
}

fn lenient_month<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let month = Option::<f64>::deserialize(deserializer)?;
    Ok(month
        .filter(|m| m.fract() == 0.0 && (1.0..=12.0).contains(m))
        .map_or(0, |m| m as u32))
}

impl MonthlyAggregate {
    pub fn savings(&self) -> f64 {
        self.income - self.expense
    }
}

/// Response of `GET /dashboard/summary`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    #[serde(default)]
    pub total_balance: f64,
    /// Percent change of the balance versus last month
    #[serde(default)]
    pub balance_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub goal_name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_progress: f64,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Goal {
    /// Raw progress ratio. Not clamped: a goal can be over-funded.
    pub fn progress_ratio(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        self.current_progress / self.target_amount
    }

    /// Progress as a percentage clamped to 0..=100 for progress bars.
    pub fn display_percent(&self) -> f64 {
        (self.progress_ratio() * 100.0).clamp(0.0, 100.0)
    }

    pub fn progress_label(&self) -> String {
        format!("{:.0}%", self.display_percent())
    }

    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_progress).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGoalRequest {
    pub goal_name: String,
    pub target_amount: f64,
    pub deadline: NaiveDate,
}

/// Partial update for `PATCH /goals/{id}`; unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateGoalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Direction of a movement as the advisor service spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorFlow {
    Ingreso,
    Egreso,
}

impl From<TransactionType> for AdvisorFlow {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Income => AdvisorFlow::Ingreso,
            TransactionType::Expense => AdvisorFlow::Egreso,
        }
    }
}

pub const ADVISOR_DEFAULT_CATEGORY: &str = "Otros";
pub const ADVISOR_DEFAULT_PRIORITY: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorTransaction {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "tipo")]
    pub flow: AdvisorFlow,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "recurrente", default)]
    pub recurring: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorGoal {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "monto_objetivo")]
    pub target_amount: f64,
    #[serde(rename = "ahorro_actual", default)]
    pub saved: f64,
    #[serde(rename = "fecha_limite")]
    pub deadline: NaiveDate,
    #[serde(rename = "prioridad_usuario", default = "default_priority")]
    pub priority: u8,
}

fn default_priority() -> u8 {
    ADVISOR_DEFAULT_PRIORITY
}

/// Body of `POST /advisor/recomendar`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisorRequest {
    pub txs: Vec<AdvisorTransaction>,
    pub metas: Vec<AdvisorGoal>,
}

impl AdvisorRequest {
    /// Build the advisor payload from what the dashboard already holds.
    /// Transactions whose date cannot be read are left out.
    pub fn from_snapshot(transactions: &[Transaction], goals: &[Goal]) -> Self {
        let txs = transactions
            .iter()
            .filter_map(|t| {
                let date = NaiveDate::parse_from_str(t.date_only(), "%Y-%m-%d").ok()?;
                let category = if t.category.trim().is_empty() {
                    ADVISOR_DEFAULT_CATEGORY.to_string()
                } else {
                    t.category.clone()
                };
                Some(AdvisorTransaction {
                    date,
                    amount: t.amount.abs(),
                    flow: t.transaction_type.into(),
                    category,
                    recurring: false,
                })
            })
            .collect();

        let metas = goals
            .iter()
            .map(|g| AdvisorGoal {
                id: g.id,
                name: g.goal_name.clone(),
                target_amount: g.target_amount,
                saved: g.current_progress,
                deadline: g.deadline,
                priority: ADVISOR_DEFAULT_PRIORITY,
            })
            .collect();

        Self { txs, metas }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisorResponse {
    #[serde(rename = "recomendaciones", default)]
    pub recommendations: Vec<String>,
}

/// Error body returned by the backend on non-2xx responses. `detail` is a
/// string for handled errors and a list of `{loc, msg, type}` objects for
/// request validation failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_payload_maps_spanish_totals() {
        let body = r#"{
            "ingresos": 1200.0,
            "egresos": 450.5,
            "saldo": 749.5,
            "timeline": {"2025-06-01": {"income": 1200.0, "expense": 0}},
            "transactions": [
                {"id": 7, "amount": 450.5, "type": "expense", "category": "Housing",
                 "description": "Rent", "date": "2025-06-02T00:00:00"}
            ],
            "total_transactions": 31
        }"#;

        let dashboard: DashboardResponse = serde_json::from_str(body).unwrap();
        assert_eq!(dashboard.income, 1200.0);
        assert_eq!(dashboard.expenses, 450.5);
        assert_eq!(dashboard.balance, 749.5);
        assert_eq!(dashboard.total_transactions, 31);
        assert_eq!(dashboard.transactions[0].transaction_type, TransactionType::Expense);
        assert_eq!(dashboard.transactions[0].date_only(), "2025-06-02");
        assert_eq!(dashboard.timeline["2025-06-01"].income, 1200.0);
    }

    #[test]
    fn dashboard_payload_tolerates_missing_collections() {
        let dashboard: DashboardResponse =
            serde_json::from_str(r#"{"ingresos": 0, "egresos": 0, "saldo": 0}"#).unwrap();
        assert!(dashboard.transactions.is_empty());
        assert!(dashboard.timeline.is_empty());
        assert_eq!(dashboard.total_transactions, 0);
    }

    #[test]
    fn recording_a_transaction_prepends_and_updates_totals() {
        let mut dashboard = DashboardResponse::default();
        let request = CreateTransactionRequest {
            description: "Paycheck".to_string(),
            amount: 900.0,
            transaction_type: TransactionType::Income,
            category_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
        };
        let today = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        dashboard.record(Transaction::from_created(10, &request, "Salary"), today);

        let rent = Transaction {
            id: 11,
            date: "2025-06-05".to_string(),
            description: "Rent".to_string(),
            category: "Housing".to_string(),
            transaction_type: TransactionType::Expense,
            amount: 400.0,
        };
        dashboard.record(rent, today);

        assert_eq!(dashboard.transactions[0].id, 11);
        assert_eq!(dashboard.transactions[1].category, "Salary");
        assert_eq!(dashboard.balance, 500.0);
        assert_eq!(dashboard.total_transactions, 2);
        assert_eq!(dashboard.timeline["2025-06-05"], DailyTotals { income: 900.0, expense: 400.0 });
    }

    #[test]
    fn backdated_transaction_leaves_month_totals_alone() {
        let mut dashboard: DashboardResponse =
            serde_json::from_str(r#"{"ingresos": 100, "egresos": 40, "saldo": 60, "total_transactions": 3}"#).unwrap();
        let old_paycheck = Transaction {
            id: 12,
            date: "2020-01-01".to_string(),
            description: "Old paycheck".to_string(),
            category: "Salary".to_string(),
            transaction_type: TransactionType::Income,
            amount: 500.0,
        };
        dashboard.record(old_paycheck, NaiveDate::from_ymd_opt(2025, 6, 20).unwrap());

        assert_eq!(dashboard.income, 100.0);
        assert_eq!(dashboard.balance, 60.0);
        assert!(dashboard.transactions.is_empty());
        assert_eq!(dashboard.total_transactions, 4);
        assert_eq!(dashboard.timeline["2020-01-01"].income, 500.0);
    }

    #[test]
    fn same_month_of_another_year_is_not_current() {
        let mut transaction = Transaction {
            id: 1,
            date: "2024-06-03T09:30:00".to_string(),
            description: String::new(),
            category: String::new(),
            transaction_type: TransactionType::Expense,
            amount: 1.0,
        };
        let today = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        assert!(!transaction.is_in_month_of(today));

        transaction.date = "2025-06-03T09:30:00".to_string();
        assert!(transaction.is_in_month_of(today));

        transaction.date = "soon".to_string();
        assert!(!transaction.is_in_month_of(today));
    }

    #[test]
    fn overview_rows_without_a_valid_month_decode_as_unknown() {
        let rows: Vec<MonthlyAggregate> = serde_json::from_str(
            r#"[{"month": 3, "income": 5}, {"income": 7, "expense": 1}, {"month": -1, "income": 2}, {"month": null}, {"month": 4.0}]"#,
        )
        .unwrap();
        assert_eq!(rows.iter().map(|r| r.month).collect::<Vec<_>>(), vec![3, 0, 0, 0, 4]);
        assert_eq!(rows[1].income, 7.0);
        assert_eq!(rows[2].savings(), 2.0);
    }

    #[test]
    fn overview_rows_default_missing_totals_to_zero() {
        let rows: Vec<MonthlyAggregate> =
            serde_json::from_str(r#"[{"month": 3, "income": 500}, {"month": 4, "expense": 80}]"#).unwrap();
        assert_eq!(rows[0].expense, 0.0);
        assert_eq!(rows[1].income, 0.0);
        assert_eq!(rows[1].savings(), -80.0);
    }

    #[test]
    fn goal_progress_is_clamped_only_for_display() {
        let mut goal = Goal {
            id: 1,
            goal_name: "Laptop".to_string(),
            target_amount: 1000.0,
            current_progress: 250.0,
            deadline: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            created_at: None,
        };
        assert_eq!(goal.progress_label(), "25%");

        goal.current_progress = 1500.0;
        assert_eq!(goal.progress_ratio(), 1.5);
        assert_eq!(goal.display_percent(), 100.0);
        assert_eq!(goal.remaining(), 0.0);
    }

    #[test]
    fn goal_without_progress_defaults_to_zero() {
        let goal: Goal = serde_json::from_str(
            r#"{"id": 2, "goal_name": "Trip", "target_amount": 900, "deadline": "2026-01-15"}"#,
        )
        .unwrap();
        assert_eq!(goal.current_progress, 0.0);
        assert_eq!(goal.progress_label(), "0%");
    }

    #[test]
    fn goal_with_zero_target_has_no_progress() {
        let goal = Goal {
            id: 3,
            goal_name: "Empty".to_string(),
            target_amount: 0.0,
            current_progress: 10.0,
            deadline: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            created_at: None,
        };
        assert_eq!(goal.progress_ratio(), 0.0);
    }

    #[test]
    fn create_transaction_body_uses_backend_field_names() {
        let request = CreateTransactionRequest {
            description: "Groceries".to_string(),
            amount: 42.5,
            transaction_type: TransactionType::Expense,
            category_id: 4,
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["category_id"], 4);
        assert_eq!(value["date"], "2025-06-15");

        let created = Transaction::from_created(99, &request, "Food");
        assert_eq!(created.id, 99);
        assert_eq!(created.category, "Food");
        assert_eq!(created.date, "2025-06-15");
    }

    #[test]
    fn goal_patch_only_sends_set_fields() {
        let patch = UpdateGoalRequest {
            current_progress: Some(300.0),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"current_progress":300.0}"#);
    }

    #[test]
    fn categories_are_filtered_by_type() {
        let categories = vec![
            Category { id: 1, name: "Salary".into(), category_type: TransactionType::Income },
            Category { id: 2, name: "Food".into(), category_type: TransactionType::Expense },
            Category { id: 3, name: "Bonus".into(), category_type: TransactionType::Income },
        ];
        let income: Vec<String> = categories_for(&categories, TransactionType::Income)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(income, vec!["Salary", "Bonus"]);
    }

    #[test]
    fn advisor_payload_uses_spanish_wire_names() {
        let transactions = vec![
            Transaction {
                id: 1,
                date: "2025-06-01T10:00:00".into(),
                description: "Pay".into(),
                category: "Salary".into(),
                transaction_type: TransactionType::Income,
                amount: 2000.0,
            },
            Transaction {
                id: 2,
                date: "not a date".into(),
                description: "Broken".into(),
                category: "".into(),
                transaction_type: TransactionType::Expense,
                amount: 5.0,
            },
            Transaction {
                id: 3,
                date: "2025-06-03".into(),
                description: "Misc".into(),
                category: " ".into(),
                transaction_type: TransactionType::Expense,
                amount: 12.0,
            },
        ];
        let goals = vec![Goal {
            id: 5,
            goal_name: "Emergency fund".into(),
            target_amount: 3000.0,
            current_progress: 600.0,
            deadline: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            created_at: None,
        }];

        let request = AdvisorRequest::from_snapshot(&transactions, &goals);
        assert_eq!(request.txs.len(), 2);
        assert_eq!(request.txs[1].category, ADVISOR_DEFAULT_CATEGORY);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["txs"][0]["tipo"], "ingreso");
        assert_eq!(value["txs"][0]["fecha"], "2025-06-01");
        assert_eq!(value["metas"][0]["nombre"], "Emergency fund");
        assert_eq!(value["metas"][0]["prioridad_usuario"], 3);
    }

    #[test]
    fn advisor_response_reads_recommendations() {
        let response: AdvisorResponse =
            serde_json::from_str(r#"{"recomendaciones": ["Ahorra 10%", "Reduce ocio"]}"#).unwrap();
        assert_eq!(response.recommendations.len(), 2);
    }

    #[test]
    fn error_body_reads_string_and_validation_details() {
        let plain: ErrorBody = serde_json::from_str(r#"{"detail": "Invalid type"}"#).unwrap();
        assert_eq!(plain.message().as_deref(), Some("Invalid type"));

        let validation: ErrorBody = serde_json::from_str(
            r#"{"detail": [{"loc": ["body", "amount"], "msg": "field required", "type": "value_error.missing"}]}"#,
        )
        .unwrap();
        assert_eq!(validation.message().as_deref(), Some("field required"));

        let empty: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.message(), None);
    }
}
