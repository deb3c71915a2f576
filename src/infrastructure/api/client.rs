use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Url};
use serde_json::Value;
use std::time::Duration;

use crate::domain::config::ApiConfig;
use crate::domain::envelope::{ApiError, ApiResponse, CREATED, NO_CONTENT, OK};
use crate::domain::traits::ResourceClient;
use crate::domain::types::{Team, User};
use crate::infrastructure::api::jsonapi::{self, MEDIA_TYPE};

/// Resource client speaking JSON:API over HTTP.
///
/// Mutations authenticate with basic auth: the requester identity as user name and the
/// shared hackbot password. Every call is a fresh request with no shared mutable state.
pub struct HttpResourceClient {
    http: reqwest::Client,
    base_url: Url,
    password: String,
}

impl HttpResourceClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(&config.url).map_err(|e| ApiError::Url(format!("{}: {e}", config.url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Url(config.url.clone()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url,
            password: config.password.clone(),
        })
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, requester: Option<&str>) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(ACCEPT, MEDIA_TYPE)
            .header(CONTENT_TYPE, MEDIA_TYPE);
        match requester {
            Some(identity) => builder.basic_auth(identity, Some(&self.password)),
            None => builder,
        }
    }

    fn with_body(builder: RequestBuilder, body: &Value) -> Result<RequestBuilder, ApiError> {
        Ok(builder.body(serde_json::to_vec(body)?))
    }

    /// Sends a request whose response body is ignored.
    async fn send(
        &self,
        operation: &str,
        builder: RequestBuilder,
        is_success: impl Fn(u16) -> bool,
    ) -> Result<ApiResponse, ApiError> {
        let status = builder.send().await?.status().as_u16();
        tracing::debug!("{} -> {}", operation, status);
        Ok(ApiResponse::new(status, is_success(status)))
    }

    /// Sends a GET and decodes the body of a 200 response.
    async fn fetch<T>(
        &self,
        operation: &str,
        url: Url,
        decode: fn(&str) -> Result<T, serde_json::Error>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = self.request(Method::GET, url, None).send().await?;
        let status = response.status().as_u16();
        tracing::debug!("{} -> {}", operation, status);
        if status != OK {
            return Ok(ApiResponse::failed(status));
        }
        let body = response.text().await?;
        Ok(ApiResponse::success(status, decode(&body)?))
    }
}

fn exactly(code: u16) -> impl Fn(u16) -> bool {
    move |status| status == code
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn check_api(&self) -> Result<ApiResponse, ApiError> {
        let url = self.url(&["api"])?;
        self.send("checkApi", self.http.get(url), exactly(OK)).await
    }

    async fn create_user(
        &self,
        id: &str,
        name: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(&["users"])?;
        let builder = Self::with_body(
            self.request(Method::POST, url, Some(requester)),
            &jsonapi::new_user(id, name),
        )?;
        self.send("createUser", builder, exactly(CREATED)).await
    }

    async fn get_user(&self, id: &str) -> Result<ApiResponse<User>, ApiError> {
        let url = self.url(&["users", id])?;
        self.fetch("getUser", url, jsonapi::decode_user).await
    }

    async fn create_team(
        &self,
        name: &str,
        member_id: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(&["teams"])?;
        let builder = Self::with_body(
            self.request(Method::POST, url, Some(requester)),
            &jsonapi::new_team(name, member_id),
        )?;
        self.send("createTeam", builder, exactly(CREATED)).await
    }

    async fn get_team(&self, id: &str) -> Result<ApiResponse<Team>, ApiError> {
        let url = self.url(&["teams", id])?;
        self.fetch("getTeam", url, jsonapi::decode_team).await
    }

    async fn find_teams(&self, name_filter: &str) -> Result<ApiResponse<Vec<Team>>, ApiError> {
        let mut url = self.url(&["teams"])?;
        url.query_pairs_mut().append_pair("filter[name]", name_filter);
        self.fetch("findTeams", url, jsonapi::decode_teams).await
    }

    async fn add_user_to_team(
        &self,
        team_id: &str,
        user_id: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(&["teams", team_id, "members"])?;
        let builder = Self::with_body(
            self.request(Method::POST, url, Some(requester)),
            &jsonapi::member_list(user_id),
        )?;
        self.send("addUserToTeam", builder, exactly(CREATED)).await
    }

    async fn remove_team_member(
        &self,
        team_id: &str,
        user_id: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(&["teams", team_id, "members"])?;
        let builder = Self::with_body(
            self.request(Method::DELETE, url, Some(requester)),
            &jsonapi::member_list(user_id),
        )?;
        self.send("removeTeamMember", builder, exactly(NO_CONTENT)).await
    }

    async fn remove_team(&self, team_id: &str, requester: &str) -> Result<ApiResponse, ApiError> {
        let url = self.url(&["teams", team_id])?;
        let builder = self.request(Method::DELETE, url, Some(requester));
        self.send("removeTeam", builder, exactly(NO_CONTENT)).await
    }

    async fn update_motto(
        &self,
        motto: &str,
        team_id: &str,
        requester: &str,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(&["teams", team_id])?;
        let builder = Self::with_body(
            self.request(Method::PATCH, url, Some(requester)),
            &jsonapi::motto_patch(team_id, motto),
        )?;
        self.send("updateMotto", builder, |status| (200..300).contains(&status))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // base64("U12345:secret")
    const BASIC_AUTH: &str = "Basic VTEyMzQ1OnNlY3JldA==";

    fn client(server: &MockServer) -> HttpResourceClient {
        HttpResourceClient::new(&ApiConfig {
            url: server.uri(),
            password: "secret".to_string(),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_check_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;
        let client = client(&server);

        let (first, second) = tokio::join!(client.check_api(), client.check_api());

        assert_eq!(first.unwrap(), ApiResponse::new(200, true));
        assert_eq!(second.unwrap(), ApiResponse::new(200, true));
    }

    #[tokio::test]
    async fn test_check_api_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let response = client(&server).check_api().await.unwrap();

        assert!(!response.ok);
        assert_eq!(response.status_code, 503);
    }

    #[tokio::test]
    async fn test_check_api_connection_failure_is_an_error() {
        // Nothing listens on a port once its listener is closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = HttpResourceClient::new(&ApiConfig {
            url: format!("http://{addr}"),
            password: "secret".to_string(),
            timeout_seconds: 5,
        })
        .unwrap();

        assert!(matches!(client.check_api().await, Err(ApiError::Http(_))));
    }

    #[tokio::test]
    async fn test_create_user_sends_json_api_body_with_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(header("authorization", BASIC_AUTH))
            .and(header("content-type", MEDIA_TYPE))
            .and(header("accept", MEDIA_TYPE))
            .and(body_json(serde_json::json!({
                "data": { "type": "users", "id": "U12345", "attributes": { "name": "Barry" } }
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .create_user("U12345", "Barry", "U12345")
            .await
            .unwrap();

        assert!(response.ok);
        assert_eq!(response.status_code, 201);
    }

    #[tokio::test]
    async fn test_create_team_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/teams"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let response = client(&server)
            .create_team("Clicky Keys", "U12345", "U12345")
            .await
            .unwrap();

        assert!(!response.ok);
        assert_eq!(response.status_code, 409);
    }

    #[tokio::test]
    async fn test_get_user_decodes_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/U12345"))
            .and(header("accept", MEDIA_TYPE))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "type": "users", "id": "U12345",
                    "attributes": { "name": "Barry" },
                    "relationships": { "team": { "data": null } }
                }
            })))
            .mount(&server)
            .await;

        let response = client(&server).get_user("U12345").await.unwrap();

        assert!(response.ok);
        let user = response.payload.unwrap();
        assert_eq!(user.name, "Barry");
        assert!(user.team.is_none());
    }

    #[tokio::test]
    async fn test_get_user_not_found_has_no_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/nobody"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let response = client(&server).get_user("nobody").await.unwrap();

        assert_eq!(response, ApiResponse::failed(404));
    }

    #[tokio::test]
    async fn test_get_team_encodes_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/a%2Fb"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server).get_team("a/b").await.unwrap();

        assert_eq!(response.status_code, 404);
    }

    #[tokio::test]
    async fn test_find_teams_uses_name_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams"))
            .and(query_param("filter[name]", "hack & slash"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    { "type": "teams", "id": "hack-hackers", "attributes": { "name": "Hack Hackers" } }
                ]
            })))
            .mount(&server)
            .await;

        let response = client(&server).find_teams("hack & slash").await.unwrap();

        let teams = response.payload.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].name, "Hack Hackers");
    }

    #[tokio::test]
    async fn test_undecodable_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/x"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client(&server).get_team("x").await;

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_membership_calls() {
        let server = MockServer::start().await;
        let members = serde_json::json!({ "data": [{ "type": "users", "id": "U67890" }] });
        Mock::given(method("POST"))
            .and(path("/teams/clicky-keys/members"))
            .and(body_json(members.clone()))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/teams/clicky-keys/members"))
            .and(body_json(members))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;
        let client = client(&server);

        let added = client
            .add_user_to_team("clicky-keys", "U67890", "U12345")
            .await
            .unwrap();
        let removed = client
            .remove_team_member("clicky-keys", "U67890", "U12345")
            .await
            .unwrap();

        assert!(added.ok);
        assert_eq!(removed, ApiResponse::failed(400));
    }

    #[tokio::test]
    async fn test_remove_team() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/teams/clicky-keys"))
            .and(header("authorization", BASIC_AUTH))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let response = client(&server)
            .remove_team("clicky-keys", "U12345")
            .await
            .unwrap();

        assert_eq!(response, ApiResponse::new(204, true));
    }

    #[tokio::test]
    async fn test_update_motto_accepts_any_2xx() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/teams/clicky-keys"))
            .and(body_json(serde_json::json!({
                "data": { "type": "teams", "id": "clicky-keys", "attributes": { "motto": "Click!" } }
            })))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let response = client(&server)
            .update_motto("Click!", "clicky-keys", "U12345")
            .await
            .unwrap();

        assert!(response.ok);
        assert_eq!(response.status_code, 200);
    }
}
