use crate::common::Saved;
use crate::entity::{Entity, FooBar};
use crate::error::{FooBarsError, Result};
use crate::extract::{JsonBody, KeyPath};
use crate::patch::PatchDocument;
use crate::repository::Repository;
use crate::validation::{ModelState, Validate};
use crate::Injectable;
use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

/// HTTP API for FooBar resources
#[derive(Injectable)]
pub struct FooBarsController {
    repository: Arc<dyn Repository<FooBar>>,
}

impl FooBarsController {
    pub fn new(repository: Arc<dyn Repository<FooBar>>) -> Self {
        Self { repository }
    }

    pub fn base_path() -> &'static str {
        "/api/FooBars"
    }

    /// URI of the GET route for `key`
    pub fn location(key: i32) -> String {
        format!("{}/{}", Self::base_path(), key)
    }

    /// Remove the resource at `id`. Succeeds whether or not it existed.
    pub async fn delete(&self, id: i32) -> Result<StatusCode> {
        self.repository.remove(id).await?;
        Ok(StatusCode::OK)
    }

    pub async fn get(&self, id: i32) -> Result<Json<FooBar>> {
        if id < 1 {
            return Err(not_found(id));
        }
        let resource = self.repository.find(id).await?.ok_or_else(|| not_found(id))?;
        Ok(Json(resource))
    }

    /// Stub: always 204 with an empty body. The repository is not queried.
    pub async fn head(&self, _id: i32) -> StatusCode {
        StatusCode::NO_CONTENT
    }

    /// Apply `patch` to the stored resource and save it if the result is valid.
    pub async fn patch(&self, id: i32, patch: PatchDocument<FooBar>) -> Result<Json<FooBar>> {
        if id < 1 {
            return Err(not_found(id));
        }
        let mut resource = self.repository.find(id).await?.ok_or_else(|| not_found(id))?;

        let mut state = ModelState::new();
        patch.apply_to(&mut resource, &mut state);
        if resource.key() != id {
            state.add_error("id", "The id of an existing FooBar cannot be changed.");
        }
        check_model(&resource, state)?;

        let updated = self.repository.update(resource).await?;
        Ok(Json(updated))
    }

    pub async fn post(&self, resource: FooBar) -> Result<Saved<FooBar>> {
        check_model(&resource, ModelState::new())?;
        let saved = self.repository.add(resource).await?;
        Ok(Saved::Created {
            location: Self::location(saved.key()),
            resource: saved,
        })
    }

    /// Add the resource if it has no key yet, otherwise update it.
    pub async fn put(&self, resource: FooBar) -> Result<Saved<FooBar>> {
        if resource.is_new() {
            return self.post(resource).await;
        }
        check_model(&resource, ModelState::new())?;
        let updated = self.repository.update(resource).await?;
        Ok(Saved::Updated(updated))
    }

    pub fn router(controller: Arc<Self>) -> Router {
        let item_path = format!("{}/{{id}}", Self::base_path());

        Router::new()
            .route(
                Self::base_path(),
                post({
                    let controller = controller.clone();
                    move |JsonBody(resource): JsonBody<FooBar>| {
                        let controller = controller.clone();
                        async move { controller.post(resource).await }
                    }
                })
                .put({
                    let controller = controller.clone();
                    move |JsonBody(resource): JsonBody<FooBar>| {
                        let controller = controller.clone();
                        async move { controller.put(resource).await }
                    }
                }),
            )
            .route(
                &item_path,
                get({
                    let controller = controller.clone();
                    move |KeyPath(id): KeyPath<i32>| {
                        let controller = controller.clone();
                        async move { controller.get(id).await }
                    }
                })
                .head({
                    let controller = controller.clone();
                    move |KeyPath(id): KeyPath<i32>| {
                        let controller = controller.clone();
                        async move { controller.head(id).await }
                    }
                })
                .patch({
                    let controller = controller.clone();
                    move |KeyPath(id): KeyPath<i32>, JsonBody(patch): JsonBody<PatchDocument<FooBar>>| {
                        let controller = controller.clone();
                        async move { controller.patch(id, patch).await }
                    }
                })
                .delete({
                    let controller = controller.clone();
                    move |KeyPath(id): KeyPath<i32>| {
                        let controller = controller.clone();
                        async move { controller.delete(id).await }
                    }
                }),
            )
    }
}

fn not_found(id: i32) -> FooBarsError {
    FooBarsError::not_found(FooBar::NAME, id)
}

/// Run entity validation on top of errors already in `state`.
fn check_model(resource: &FooBar, mut state: ModelState) -> Result<()> {
    resource.validate(&mut state);
    if state.is_valid() {
        Ok(())
    } else {
        Err(FooBarsError::InvalidModel(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MemoryRepository, RepositoryError};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{HeaderMap, Method, Request, header},
    };
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Memory repository that remembers which operations were called
    #[derive(Default)]
    struct RecordingRepository {
        inner: MemoryRepository<FooBar>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingRepository {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        async fn seed(&self, name: &str) -> FooBar {
            self.inner.add(FooBar::new(name)).await.unwrap()
        }
    }

    #[async_trait]
    impl Repository<FooBar> for RecordingRepository {
        async fn find(&self, key: i32) -> std::result::Result<Option<FooBar>, RepositoryError> {
            self.record("find");
            self.inner.find(key).await
        }

        async fn add(&self, entity: FooBar) -> std::result::Result<FooBar, RepositoryError> {
            self.record("add");
            self.inner.add(entity).await
        }

        async fn update(&self, entity: FooBar) -> std::result::Result<FooBar, RepositoryError> {
            self.record("update");
            self.inner.update(entity).await
        }

        async fn remove(&self, key: i32) -> std::result::Result<Option<FooBar>, RepositoryError> {
            self.record("remove");
            self.inner.remove(key).await
        }
    }

    fn setup() -> (Arc<RecordingRepository>, Router) {
        let repository = Arc::new(RecordingRepository::default());
        let controller = FooBarsController::new(repository.clone());
        (repository, FooBarsController::router(Arc::new(controller)))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, HeaderMap, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, json)
    }

    #[tokio::test]
    async fn test_get_non_positive_id_skips_repository() {
        let (repository, app) = setup();

        for uri in ["/api/FooBars/0", "/api/FooBars/-5"] {
            let (status, _, body) = send(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["code"], "NotFound");
        }
        assert!(repository.calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_is_404() {
        let (repository, app) = setup();

        let (status, _, _) = send(&app, Method::GET, "/api/FooBars/42", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(repository.calls(), vec!["find"]);
    }

    #[tokio::test]
    async fn test_get_existing() {
        let (repository, app) = setup();
        let saved = repository.seed("widget").await;

        let (status, _, body) = send(&app, Method::GET, &FooBarsController::location(saved.id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": saved.id, "name": "widget" }));
    }

    #[tokio::test]
    async fn test_malformed_id_is_400() {
        let (repository, app) = setup();

        let (status, _, body) = send(&app, Method::GET, "/api/FooBars/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BadRequest");
        assert!(repository.calls().is_empty());
    }

    #[tokio::test]
    async fn test_post_returns_201_with_location() {
        let (repository, app) = setup();

        let (status, headers, body) =
            send(&app, Method::POST, "/api/FooBars", Some(json!({ "id": 0, "name": "widget" }))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(headers[header::LOCATION], "/api/FooBars/1");
        assert_eq!(repository.calls(), vec!["add"]);

        let location = headers[header::LOCATION].to_str().unwrap().to_string();
        let (status, _, fetched) = send(&app, Method::GET, &location, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, body);
    }

    #[tokio::test]
    async fn test_post_malformed_body_is_400() {
        let (repository, app) = setup();

        let (status, _, _) = send(&app, Method::POST, "/api/FooBars", Some(json!({ "id": "x" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(repository.calls().is_empty());
    }

    #[tokio::test]
    async fn test_post_invalid_model_is_400() {
        let (repository, app) = setup();

        let (status, _, body) = send(&app, Method::POST, "/api/FooBars", Some(json!({ "name": "" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["name"][0], "The name field is required.");
        assert!(repository.calls().is_empty());
    }

    #[tokio::test]
    async fn test_put_invalid_model_is_400() {
        let (repository, app) = setup();
        let saved = repository.seed("widget").await;

        for resource in [json!({ "name": "" }), json!({ "id": saved.id, "name": " " })] {
            let (status, _, body) = send(&app, Method::PUT, "/api/FooBars", Some(resource)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["errors"]["name"].is_array());
        }
        assert!(repository.calls().is_empty());
        assert_eq!(repository.inner.find(saved.id).await.unwrap().unwrap().name, "widget");
    }

    #[tokio::test]
    async fn test_put_new_adds() {
        let (repository, app) = setup();

        let (status, headers, body) =
            send(&app, Method::PUT, "/api/FooBars", Some(json!({ "name": "fresh" }))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(headers[header::LOCATION], "/api/FooBars/1");
        assert_eq!(body["name"], "fresh");
        assert_eq!(repository.calls(), vec!["add"]);
    }

    #[tokio::test]
    async fn test_put_existing_updates() {
        let (repository, app) = setup();
        let saved = repository.seed("old").await;

        let (status, headers, body) = send(
            &app,
            Method::PUT,
            "/api/FooBars",
            Some(json!({ "id": saved.id, "name": "new" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers.get(header::LOCATION).is_none());
        assert_eq!(body["name"], "new");
        assert_eq!(repository.calls(), vec!["update"]);
    }

    #[tokio::test]
    async fn test_put_unknown_key_is_server_error() {
        let (repository, app) = setup();

        let (status, _, _) =
            send(&app, Method::PUT, "/api/FooBars", Some(json!({ "id": 9, "name": "ghost" }))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(repository.calls(), vec!["update"]);
    }

    #[tokio::test]
    async fn test_patch_non_positive_id_skips_repository() {
        let (repository, app) = setup();
        let patch = json!([{ "op": "replace", "path": "/name", "value": "x" }]);

        for uri in ["/api/FooBars/0", "/api/FooBars/-1"] {
            let (status, _, body) = send(&app, Method::PATCH, uri, Some(patch.clone())).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["code"], "NotFound");
        }
        assert!(repository.calls().is_empty());
    }

    #[tokio::test]
    async fn test_patch_missing_is_404_before_applying() {
        let (repository, app) = setup();

        let (status, _, _) = send(
            &app,
            Method::PATCH,
            "/api/FooBars/3",
            Some(json!([{ "op": "replace", "path": "/name", "value": "x" }])),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(repository.calls(), vec!["find"]);
    }

    #[tokio::test]
    async fn test_patch_applies_and_saves() {
        let (repository, app) = setup();
        let saved = repository.seed("before").await;

        let (status, _, body) = send(
            &app,
            Method::PATCH,
            &FooBarsController::location(saved.id),
            Some(json!([
                { "op": "replace", "path": "/name", "value": "after" },
                { "op": "add", "path": "/description", "value": "patched" },
            ])),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "id": saved.id, "name": "after", "description": "patched" }));
        assert_eq!(repository.calls(), vec!["find", "update"]);
        assert_eq!(repository.inner.find(saved.id).await.unwrap().unwrap().name, "after");
    }

    #[tokio::test]
    async fn test_patch_to_invalid_state_is_400_and_not_saved() {
        let (repository, app) = setup();
        let saved = repository.seed("before").await;

        let (status, _, body) = send(
            &app,
            Method::PATCH,
            &FooBarsController::location(saved.id),
            Some(json!([{ "op": "replace", "path": "/name", "value": "  " }])),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["name"].is_array());
        assert_eq!(repository.calls(), vec!["find"]);
        assert_eq!(repository.inner.find(saved.id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_patch_cannot_change_id() {
        let (repository, app) = setup();
        let saved = repository.seed("before").await;

        let (status, _, body) = send(
            &app,
            Method::PATCH,
            &FooBarsController::location(saved.id),
            Some(json!([{ "op": "replace", "path": "/id", "value": 77 }])),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["id"].is_array());
        assert!(repository.inner.find(77).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_patch_failed_operation_is_400() {
        let (repository, app) = setup();
        let saved = repository.seed("before").await;

        let (status, _, body) = send(
            &app,
            Method::PATCH,
            &FooBarsController::location(saved.id),
            Some(json!([{ "op": "remove", "path": "/missing" }])),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["FooBar"].is_array());
    }

    #[tokio::test]
    async fn test_delete_is_200_whether_or_not_present() {
        let (repository, app) = setup();
        let saved = repository.seed("doomed").await;

        let (status, _, _) = send(&app, Method::DELETE, &FooBarsController::location(saved.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(repository.inner.is_empty());

        let (status, _, _) = send(&app, Method::DELETE, &FooBarsController::location(saved.id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(repository.calls(), vec!["remove", "remove"]);
    }

    #[tokio::test]
    async fn test_head_is_a_stub() {
        let (repository, app) = setup();
        let saved = repository.seed("present").await;

        let (status, _, body) = send(&app, Method::HEAD, &FooBarsController::location(saved.id), None).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
        assert!(repository.calls().is_empty());
    }
}
