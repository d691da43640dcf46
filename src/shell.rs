//! Session state and the search state machine.
//!
//! `AppShell` owns everything a session has: the query text, the request
//! status, the current estimate, the error message and the food log.
//! Front-ends read it and call its methods; they never touch its fields.

use crate::food::analysis::nutrition::{NutritionClient, NutritionError, GENERIC_FAILURE_MESSAGE};
use crate::food::daily_log::FoodLog;
use crate::food::macros::{macro_breakdown, MacroShare};
use crate::food::models::{DailyTotals, LogEntry, NutritionEstimate};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Default)]
pub struct AppShell {
    query: String,
    status: RequestStatus,
    current: Option<NutritionEstimate>,
    error_message: Option<String>,
    log: FoodLog,
    search_generation: u64,
}

impl AppShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn current(&self) -> Option<&NutritionEstimate> {
        self.current.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn log(&self) -> &FoodLog {
        &self.log
    }

    pub fn totals(&self) -> DailyTotals {
        self.log.totals()
    }

    /// Macro split of the current estimate, empty when there is none.
    pub fn macro_breakdown(&self) -> Vec<MacroShare> {
        self.current.as_ref().map(macro_breakdown).unwrap_or_default()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.status != RequestStatus::Loading && !self.query.trim().is_empty()
    }

    /// Enters Loading and returns the query to send, or `None` when the
    /// query is blank or a request is already in flight.
    pub fn begin_search(&mut self) -> Option<String> {
        if !self.can_submit() {
            log::debug!("Ignoring submit in state {:?}", self.status);
            return None;
        }

        self.status = RequestStatus::Loading;
        self.search_generation += 1;
        self.error_message = None;
        self.current = None;
        log::debug!("Searching for '{}'", self.query);
        Some(self.query.clone())
    }

    /// Applies the outcome of the request started by `begin_search`.
    pub fn finish_search(&mut self, outcome: Result<NutritionEstimate, NutritionError>) -> RequestStatus {
        if self.status != RequestStatus::Loading {
            log::warn!("Dropping estimation outcome received in state {:?}", self.status);
            return self.status;
        }

        match outcome {
            Ok(estimate) => {
                self.current = Some(estimate);
                self.status = RequestStatus::Success;
            }
            Err(e) => {
                self.current = None;
                self.error_message = Some(e.user_message().to_string());
                self.status = RequestStatus::Error;
            }
        }
        log::debug!("Search finished in state {:?}", self.status);
        self.status
    }

    /// Identifies the most recent search started by `begin_search`.
    pub fn search_generation(&self) -> u64 {
        self.search_generation
    }

    /// Moves a search whose caller went away out of Loading. Only applies
    /// while that same search is still the one in flight.
    pub fn abandon_search(&mut self, generation: u64) -> bool {
        if self.status != RequestStatus::Loading || self.search_generation != generation {
            return false;
        }

        log::warn!("Search {} was abandoned before it finished", generation);
        self.current = None;
        self.error_message = Some(GENERIC_FAILURE_MESSAGE.to_string());
        self.status = RequestStatus::Error;
        true
    }

    /// Runs a whole search against `client` while holding the shell.
    pub async fn submit(&mut self, client: &NutritionClient) -> RequestStatus {
        match self.begin_search() {
            Some(query) => {
                let outcome = client.estimate(&query).await;
                self.finish_search(outcome)
            }
            None => self.status,
        }
    }

    /// Appends the displayed estimate to the log. Does nothing without one.
    pub fn add_to_log(&mut self) -> Option<LogEntry> {
        let estimate = self.current.clone()?;
        Some(self.log.append(estimate))
    }

    pub fn remove_from_log(&mut self, id: Uuid) -> Option<LogEntry> {
        self.log.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::analysis::nutrition::{NOT_FOOD_MESSAGE, NO_ESTIMATE_MESSAGE};
    use crate::food::config::FoodConfig;
    use crate::providers::scripted::{Reply, ScriptedProvider};

    const TOAST: &str = r#"{"name":"Тост с авокадо","calories":250,"protein":6,"fat":15,"carbs":22,"weight_g":150,"is_food":true}"#;
    const TABLE: &str = r#"{"name":"Стол","calories":null,"protein":null,"fat":null,"carbs":null,"weight_g":null,"is_food":false}"#;

    fn client(replies: Vec<Reply>) -> NutritionClient {
        NutritionClient::new(Box::new(ScriptedProvider::new(replies)), FoodConfig::default())
    }

    fn food(calories: f64) -> NutritionEstimate {
        NutritionEstimate {
            name: "food".to_string(),
            calories,
            protein: 1.0,
            fat: 1.0,
            carbs: 1.0,
            weight_grams: 100.0,
            description: None,
        }
    }

    #[test]
    fn test_starts_idle() {
        let shell = AppShell::new();
        assert_eq!(shell.status(), RequestStatus::Idle);
        assert!(shell.current().is_none());
        assert!(shell.error_message().is_none());
        assert!(!shell.can_submit());
    }

    #[test]
    fn test_blank_query_does_not_submit() {
        let mut shell = AppShell::new();
        shell.set_query("   \t ");
        assert!(shell.begin_search().is_none());
        assert_eq!(shell.status(), RequestStatus::Idle);
    }

    #[test]
    fn test_entering_loading_clears_previous_result_and_error() {
        let mut shell = AppShell::new();
        shell.set_query("apple");
        shell.begin_search();
        shell.finish_search(Ok(food(52.0)));
        assert!(shell.current().is_some());

        shell.begin_search();
        assert_eq!(shell.status(), RequestStatus::Loading);
        assert!(shell.current().is_none());

        shell.finish_search(Err(NutritionError::NotFood));
        assert!(shell.error_message().is_some());

        assert_eq!(shell.begin_search().as_deref(), Some("apple"));
        assert!(shell.error_message().is_none());
        assert!(shell.current().is_none());
    }

    #[test]
    fn test_submit_while_loading_is_noop() {
        let mut shell = AppShell::new();
        shell.set_query("apple");
        assert!(shell.begin_search().is_some());
        assert!(!shell.can_submit());
        assert!(shell.begin_search().is_none());
        assert_eq!(shell.status(), RequestStatus::Loading);
    }

    #[test]
    fn test_abandoned_search_leaves_loading() {
        let mut shell = AppShell::new();
        shell.set_query("apple");
        shell.begin_search();
        let generation = shell.search_generation();

        assert!(shell.abandon_search(generation));
        assert_eq!(shell.status(), RequestStatus::Error);
        assert_eq!(shell.error_message(), Some(GENERIC_FAILURE_MESSAGE));
        assert!(shell.can_submit());

        // A later search is not affected by a stale abandon
        shell.begin_search();
        assert!(!shell.abandon_search(generation));
        assert_eq!(shell.status(), RequestStatus::Loading);
        shell.finish_search(Ok(food(52.0)));
        assert!(!shell.abandon_search(shell.search_generation()));
        assert_eq!(shell.status(), RequestStatus::Success);
    }

    #[test]
    fn test_outcome_outside_loading_is_dropped() {
        let mut shell = AppShell::new();
        assert_eq!(shell.finish_search(Ok(food(52.0))), RequestStatus::Idle);
        assert!(shell.current().is_none());
    }

    #[tokio::test]
    async fn test_avocado_toast_scenario() {
        let client = client(vec![Reply::Text(TOAST.to_string())]);
        let mut shell = AppShell::new();
        shell.set_query("авокадо тост");

        assert_eq!(shell.submit(&client).await, RequestStatus::Success);
        let current = shell.current().unwrap();
        assert_eq!(current.name, "Тост с авокадо");
        assert_eq!(current.calories, 250.0);
        assert_eq!(shell.macro_breakdown().len(), 3);

        let entry = shell.add_to_log().unwrap();
        assert_eq!(shell.status(), RequestStatus::Success);
        assert_eq!(shell.log().len(), 1);
        assert_eq!(entry.estimate, *shell.current().unwrap());

        let totals = shell.totals();
        assert_eq!(totals.calories, 250.0);
        assert_eq!(totals.protein, 6.0);
        assert_eq!(totals.fat, 15.0);
        assert_eq!(totals.carbs, 22.0);
    }

    #[tokio::test]
    async fn test_not_food_scenario_leaves_log_unchanged() {
        let client = client(vec![Reply::Text(TOAST.to_string()), Reply::Text(TABLE.to_string())]);
        let mut shell = AppShell::new();
        shell.set_query("авокадо тост");
        shell.submit(&client).await;
        shell.add_to_log();

        shell.set_query("стол");
        assert_eq!(shell.submit(&client).await, RequestStatus::Error);
        assert_eq!(shell.error_message(), Some(NOT_FOOD_MESSAGE));
        assert!(shell.current().is_none());
        assert_eq!(shell.log().len(), 1);
        assert!(shell.add_to_log().is_none());
        assert_eq!(shell.log().len(), 1);
    }

    #[tokio::test]
    async fn test_service_failures_reach_error_state() {
        let client = client(vec![
            Reply::Empty,
            Reply::Text("{not json".to_string()),
            Reply::Fail("connection reset".to_string()),
        ]);
        let mut shell = AppShell::new();
        shell.set_query("apple");

        assert_eq!(shell.submit(&client).await, RequestStatus::Error);
        assert_eq!(shell.error_message(), Some(NO_ESTIMATE_MESSAGE));

        assert_eq!(shell.submit(&client).await, RequestStatus::Error);
        assert_eq!(shell.error_message(), Some(GENERIC_FAILURE_MESSAGE));

        assert_eq!(shell.submit(&client).await, RequestStatus::Error);
        assert_eq!(shell.error_message(), Some(GENERIC_FAILURE_MESSAGE));
        assert!(shell.current().is_none());
    }

    #[test]
    fn test_remove_scenario() {
        let mut shell = AppShell::new();
        shell.set_query("x");
        shell.begin_search();
        shell.finish_search(Ok(food(250.0)));
        let first = shell.add_to_log().unwrap();

        shell.begin_search();
        shell.finish_search(Ok(food(400.0)));
        shell.add_to_log();
        assert_eq!(shell.totals().calories, 650.0);

        shell.remove_from_log(first.id);
        assert_eq!(shell.totals().calories, 400.0);
        assert_eq!(shell.status(), RequestStatus::Success);
        assert_eq!(shell.current().unwrap().calories, 400.0);

        assert!(shell.remove_from_log(first.id).is_none());
        assert_eq!(shell.totals().calories, 400.0);
    }
}
