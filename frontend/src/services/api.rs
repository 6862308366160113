use gloo::net::http::{Request, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    AdvisorRequest, AdvisorResponse, BalanceSummary, Category, CreateGoalRequest,
    CreateTransactionRequest, CreateTransactionResponse, DashboardResponse, ErrorBody, Goal,
    LoginRequest, MonthlyAggregate, UpdateGoalRequest,
};
use web_sys::RequestCredentials;

use super::config::AppConfig;
use super::logging::Logger;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected the session cookie (HTTP 401)
    #[error("Your session has expired. Please log in again.")]
    Unauthorized,
    #[error("{message}")]
    Server { status: u16, message: String },
    /// No response at all: offline, DNS, CORS, refused connection
    #[error("Could not reach server")]
    Network(String),
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Turn a status code and response text into a typed result.
pub fn interpret_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    check_status(status, body)?;
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Map non-2xx statuses to errors, preferring the backend's `detail` message.
pub fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 => Err(ApiError::Unauthorized),
        _ => {
            let message = serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.message())
                .unwrap_or_else(|| format!("Request failed with status {}", status));
            Err(ApiError::Server { status, message })
        }
    }
}

/// API client for the FinFlow backend. Every request carries the session
/// cookie; a bearer header is only added when one was configured.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    bearer_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.credentials(RequestCredentials::Include);
        match &self.bearer_token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn execute(&self, request: Request) -> Result<(u16, String), ApiError> {
        let method = request.method();
        let url = request.url();
        Logger::debug_with_component("api", &format!("{} {}", method, url));

        let response = request.send().await.map_err(|e| {
            Logger::warn_with_component("api", &format!("{} {} failed: {}", method, url, e));
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        // An unreadable body is treated as empty; the status still decides.
        let body = response.text().await.unwrap_or_default();
        if !(200..=299).contains(&status) {
            Logger::warn_with_component("api", &format!("{} {} returned {}", method, url, status));
        }
        Ok((status, body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self
            .prepare(Request::get(&self.url(path)))
            .build()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let (status, body) = self.execute(request).await?;
        interpret_response(status, &body)
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        payload: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .prepare(builder)
            .json(payload)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let (status, body) = self.execute(request).await?;
        interpret_response(status, &body)
    }

    // ============= Session =============

    pub async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        let request = self
            .prepare(Request::post(&self.url("/auth/login")))
            .json(request)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let (status, body) = self.execute(request).await?;
        check_status(status, &body)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let request = self
            .prepare(Request::post(&self.url("/auth/logout")))
            .build()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let (status, body) = self.execute(request).await?;
        check_status(status, &body)
    }

    // ============= Dashboard =============

    pub async fn get_dashboard(&self) -> Result<DashboardResponse, ApiError> {
        self.get_json("/dashboard").await
    }

    pub async fn get_overview(&self) -> Result<Vec<MonthlyAggregate>, ApiError> {
        self.get_json("/dashboard/overview").await
    }

    pub async fn get_balance_summary(&self) -> Result<BalanceSummary, ApiError> {
        self.get_json("/dashboard/summary").await
    }

    // ============= Transactions & categories =============

    pub async fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<CreateTransactionResponse, ApiError> {
        self.send_json(Request::post(&self.url("/transactions")), request)
            .await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json("/categories").await
    }

    // ============= Goals =============

    pub async fn get_goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.get_json("/goals/").await
    }

    pub async fn create_goal(&self, request: &CreateGoalRequest) -> Result<Goal, ApiError> {
        self.send_json(Request::post(&self.url("/goals/")), request).await
    }

    pub async fn update_goal(&self, id: i64, request: &UpdateGoalRequest) -> Result<Goal, ApiError> {
        self.send_json(Request::patch(&self.url(&format!("/goals/{}", id))), request)
            .await
    }

    pub async fn delete_goal(&self, id: i64) -> Result<(), ApiError> {
        let request = self
            .prepare(Request::delete(&self.url(&format!("/goals/{}", id))))
            .build()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let (status, body) = self.execute(request).await?;
        check_status(status, &body)
    }

    // ============= Advisor =============

    pub async fn get_recommendations(&self, request: &AdvisorRequest) -> Result<AdvisorResponse, ApiError> {
        self.send_json(Request::post(&self.url("/advisor/recomendar")), request)
            .await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Goal;

    #[test]
    fn success_bodies_are_decoded() {
        let goals: Vec<Goal> = interpret_response(
            200,
            r#"[{"id": 1, "goal_name": "Car", "target_amount": 5000, "current_progress": 100, "deadline": "2026-06-01"}]"#,
        )
        .unwrap();
        assert_eq!(goals[0].goal_name, "Car");
    }

    #[test]
    fn unauthorized_is_its_own_outcome() {
        let result: Result<Vec<Goal>, _> = interpret_response(401, r#"{"detail": "Not authenticated"}"#);
        assert_eq!(result, Err(ApiError::Unauthorized));
    }

    #[test]
    fn server_errors_surface_detail() {
        let result: Result<Vec<Goal>, _> = interpret_response(400, r#"{"detail": "Invalid type"}"#);
        assert_eq!(
            result,
            Err(ApiError::Server {
                status: 400,
                message: "Invalid type".to_string()
            })
        );
    }

    #[test]
    fn server_errors_without_detail_use_status() {
        let err = check_status(502, "<html>Bad gateway</html>").unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let result: Result<Vec<Goal>, _> = interpret_response(200, "not json");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn network_errors_read_as_unreachable() {
        let err = ApiError::Network("TypeError: Failed to fetch".to_string());
        assert_eq!(err.to_string(), "Could not reach server");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn urls_join_base_and_path() {
        let client = ApiClient::new("http://localhost:8000");
        assert_eq!(client.url("/goals/7"), "http://localhost:8000/goals/7");
        assert_eq!(ApiClient::default().base_url(), "http://localhost:8000");
    }

    #[test]
    fn bearer_token_is_opt_in() {
        let plain = ApiClient::new("http://api");
        let with_token = plain.clone().with_bearer_token("abc");
        assert_eq!(plain.bearer_token, None);
        assert_eq!(with_token.bearer_token.as_deref(), Some("abc"));
        assert_ne!(plain, with_token);
    }
}
