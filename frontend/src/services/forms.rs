//! Form drafts and the submit state machine shared by every form.
//!
//! A submission walks `Idle → Validating → Submitting` and comes back to
//! `Idle` carrying the outcome of the last attempt. Validation failures never
//! reach `Submitting`, so no request is issued for them.

use chrono::NaiveDate;
use shared::{
    Category, CreateGoalRequest, CreateTransactionRequest, LoginRequest, TransactionType, UpdateGoalRequest,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Amount must be a number of zero or more")]
    InvalidAmount,
    #[error("Target amount must be greater than zero")]
    InvalidTarget,
    #[error("Please enter a valid date")]
    InvalidDate,
    #[error("Please choose a category for this type")]
    CategoryMismatch,
    #[error("A submission is already in progress")]
    AlreadySubmitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Success(String),
    Failure(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormStatus {
    phase: FormPhase,
    outcome: Option<FormOutcome>,
}

impl FormStatus {
    #[cfg(test)]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    #[cfg(test)]
    pub fn outcome(&self) -> Option<&FormOutcome> {
        self.outcome.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Some(FormOutcome::Failure(message)) => Some(message),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&str> {
        match &self.outcome {
            Some(FormOutcome::Success(message)) => Some(message),
            _ => None,
        }
    }

    /// Validate `draft` and, if it holds, enter `Submitting` and hand back the
    /// request to send. A second call while a request is in flight is refused
    /// without touching the current state.
    pub fn begin<D: FormDraft>(&mut self, draft: &D) -> Result<D::Request, FormError> {
        if self.is_submitting() {
            log::warn!("submit ignored: a request is already in flight");
            return Err(FormError::AlreadySubmitting);
        }

        self.phase = FormPhase::Validating;
        self.outcome = None;

        match draft.validate() {
            Ok(request) => {
                self.phase = FormPhase::Submitting;
                Ok(request)
            }
            Err(err) => {
                self.phase = FormPhase::Idle;
                self.outcome = Some(FormOutcome::Failure(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.phase = FormPhase::Idle;
        self.outcome = Some(FormOutcome::Success(message.into()));
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = FormPhase::Idle;
        self.outcome = Some(FormOutcome::Failure(message.into()));
    }

    /// Forget the last outcome, e.g. when a dialog is reopened.
    pub fn clear(&mut self) {
        if !self.is_submitting() {
            self.outcome = None;
        }
    }
}

/// Controlled-input state of a form.
pub trait FormDraft {
    type Request;

    fn validate(&self) -> Result<Self::Request, FormError>;
}

fn required(value: &str) -> Result<&str, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::MissingFields)
    } else {
        Ok(trimmed)
    }
}

fn parse_amount(value: &str) -> Result<f64, FormError> {
    let amount: f64 = required(value)?.parse().map_err(|_| FormError::InvalidAmount)?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(FormError::InvalidAmount);
    }
    Ok(amount)
}

fn parse_date(value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(required(value)?, "%Y-%m-%d").map_err(|_| FormError::InvalidDate)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: String,
    pub transaction_type: Option<TransactionType>,
    pub category_id: Option<i64>,
    pub date: String,
    /// Category names by id, for assembling the created transaction.
    categories: Vec<Category>,
}

impl TransactionDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            transaction_type: None,
            category_id: None,
            date: today.format("%Y-%m-%d").to_string(),
            categories: Vec::new(),
        }
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.drop_mismatched_category();
    }

    /// Choosing a type clears a category that belongs to the other type.
    pub fn set_type(&mut self, transaction_type: Option<TransactionType>) {
        self.transaction_type = transaction_type;
        self.drop_mismatched_category();
    }

    pub fn available_categories(&self) -> Vec<Category> {
        match self.transaction_type {
            Some(transaction_type) => shared::categories_for(&self.categories, transaction_type),
            None => Vec::new(),
        }
    }

    pub fn category_name(&self, id: i64) -> Option<&str> {
        self.categories.iter().find(|c| c.id == id).map(|c| c.name.as_str())
    }

    /// Back to defaults; the loaded categories stay.
    pub fn reset(&mut self, today: NaiveDate) {
        let categories = std::mem::take(&mut self.categories);
        *self = Self::new(today);
        self.categories = categories;
    }

    /// Toast text after a successful create.
    pub fn success_message(request: &CreateTransactionRequest) -> String {
        format!(
            "{} of ${:.2} has been added.",
            request.transaction_type.label(),
            request.amount
        )
    }

    fn drop_mismatched_category(&mut self) {
        let Some(id) = self.category_id else { return };
        let matches = match (self.transaction_type, self.categories.iter().find(|c| c.id == id)) {
            (Some(transaction_type), Some(category)) => category.category_type == transaction_type,
            // Unknown until categories load; keep the selection.
            (Some(_), None) => self.categories.is_empty(),
            (None, _) => false,
        };
        if !matches {
            self.category_id = None;
        }
    }
}

impl FormDraft for TransactionDraft {
    type Request = CreateTransactionRequest;

    fn validate(&self) -> Result<CreateTransactionRequest, FormError> {
        let description = required(&self.description)?;
        required(&self.amount)?;
        let transaction_type = self.transaction_type.ok_or(FormError::MissingFields)?;
        let category_id = self.category_id.ok_or(FormError::MissingFields)?;

        let amount = parse_amount(&self.amount)?;
        let date = parse_date(&self.date)?;

        if let Some(category) = self.categories.iter().find(|c| c.id == category_id) {
            if category.category_type != transaction_type {
                return Err(FormError::CategoryMismatch);
            }
        }

        Ok(CreateTransactionRequest {
            description: description.to_string(),
            amount,
            transaction_type,
            category_id,
            date,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalDraft {
    pub goal_name: String,
    pub target_amount: String,
    pub deadline: String,
}

impl FormDraft for GoalDraft {
    type Request = CreateGoalRequest;

    fn validate(&self) -> Result<CreateGoalRequest, FormError> {
        let goal_name = required(&self.goal_name)?;
        required(&self.target_amount)?;
        required(&self.deadline)?;

        let target_amount = parse_amount(&self.target_amount).map_err(|_| FormError::InvalidTarget)?;
        if target_amount <= 0.0 {
            return Err(FormError::InvalidTarget);
        }

        Ok(CreateGoalRequest {
            goal_name: goal_name.to_string(),
            target_amount,
            deadline: parse_date(&self.deadline)?,
        })
    }
}

/// New saved amount for an existing goal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalProgressDraft {
    pub current_progress: String,
}

impl GoalProgressDraft {
    pub fn for_progress(current_progress: f64) -> Self {
        Self {
            current_progress: format!("{}", current_progress),
        }
    }
}

impl FormDraft for GoalProgressDraft {
    type Request = UpdateGoalRequest;

    fn validate(&self) -> Result<UpdateGoalRequest, FormError> {
        Ok(UpdateGoalRequest {
            current_progress: Some(parse_amount(&self.current_progress)?),
            ..UpdateGoalRequest::default()
        })
    }
}

/// Confirmed removal of a goal. Always valid; it goes through
/// [`FormStatus`] so a double click sends one `DELETE`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalDeletion(pub i64);

impl FormDraft for GoalDeletion {
    type Request = i64;

    fn validate(&self) -> Result<i64, FormError> {
        Ok(self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

pub const LOGIN_FAILED: &str = "Login failed. Check your credentials.";

impl FormDraft for LoginDraft {
    type Request = LoginRequest;

    fn validate(&self) -> Result<LoginRequest, FormError> {
        let email = required(&self.email)?;
        if self.password.is_empty() {
            return Err(FormError::MissingFields);
        }
        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}
