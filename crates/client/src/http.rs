use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use drill_core::model::{ExerciseId, TestId, Word};

use crate::api::{ApiError, ExerciseReport, ResultSink, TestReport, WordRow, WordSource};

/// Header carrying the opaque session credential, as the backend expects.
const AUTH_HEADER: &str = "x-auth-token";

/// Connection settings for the student-facing backend API.
///
/// The credential is an opaque value passed in explicitly by the caller;
/// how it is obtained or stored is the auth layer's concern.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub credential: String,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: Url, credential: impl Into<String>) -> Self {
        Self {
            base_url,
            credential: credential.into(),
        }
    }
}

/// `reqwest`-backed implementation of the backend boundary.
#[derive(Debug, Clone)]
pub struct StudentApi {
    client: Client,
    config: ApiConfig,
}

impl StudentApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.config
            .base_url
            .join(path)
            .map_err(|err| ApiError::InvalidResponse(format!("bad endpoint {path}: {err}")))
    }

    async fn fetch_words(&self, path: &str) -> Result<Vec<Word>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(path)?)
            .header(AUTH_HEADER, &self.config.credential)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }

        let rows: Vec<WordRow> = response.json().await?;
        rows.into_iter().map(WordRow::into_word).collect()
    }

    async fn post_report<T: serde::Serialize + Sync>(
        &self,
        path: &str,
        report: &T,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .header(AUTH_HEADER, &self.config.credential)
            .json(report)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

#[async_trait]
impl WordSource for StudentApi {
    async fn exercise_words(&self, id: ExerciseId) -> Result<Vec<Word>, ApiError> {
        self.fetch_words(&format!("exercise/{id}/words")).await
    }

    async fn test_words(&self, id: TestId) -> Result<Vec<Word>, ApiError> {
        self.fetch_words(&format!("test/{id}/words")).await
    }
}

#[async_trait]
impl ResultSink for StudentApi {
    async fn submit_exercise(&self, report: &ExerciseReport) -> Result<(), ApiError> {
        self.post_report("exerciseresult", report).await
    }

    async fn submit_test(&self, report: &TestReport) -> Result<(), ApiError> {
        self.post_report("testresult", report).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_onto_the_base_url() {
        let config = ApiConfig::new(
            Url::parse("https://api.example.test/student/").unwrap(),
            "token",
        );
        let api = StudentApi::new(config);

        assert_eq!(
            api.endpoint("exercise/3/words").unwrap().as_str(),
            "https://api.example.test/student/exercise/3/words"
        );
        assert_eq!(
            api.endpoint("testresult").unwrap().as_str(),
            "https://api.example.test/student/testresult"
        );
    }
}
