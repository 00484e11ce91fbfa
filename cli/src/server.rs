#[cfg(feature = "server")]
pub mod http {
    use axum::{
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
        Router,
    };
    use mamdani::{CategoryScale, Engine, LinguisticVariable, MamdaniError, Response};
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower_http::cors::CorsLayer;
    use tower_http::trace::TraceLayer;
    use tracing::{error, info};

    /// Engines are immutable, so handlers share one without locking
    type SharedEngine = Arc<Engine>;

    #[derive(Debug, Deserialize)]
    struct EvaluateRequest {
        inputs: HashMap<String, f64>,
    }

    #[derive(Debug, Serialize)]
    struct KnowledgeSummary<'a> {
        source: &'a str,
        inputs: &'a [LinguisticVariable],
        output: &'a LinguisticVariable,
        rules: Vec<String>,
        categories: &'a CategoryScale,
    }

    #[derive(Debug, Serialize)]
    struct ErrorResponse {
        error: String,
    }

    pub fn router(engine: Engine) -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route("/knowledge", get(knowledge))
            .route("/evaluate", post(evaluate))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(Arc::new(engine))
    }

    pub async fn start_server(engine: Engine, host: &str, port: u16) -> anyhow::Result<()> {
        let app = router(engine);

        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("Mamdani server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    async fn health_check() -> impl IntoResponse {
        Json(serde_json::json!({
            "status": "ok",
            "service": "mamdani",
            "version": env!("CARGO_PKG_VERSION")
        }))
    }

    async fn knowledge(
        State(engine): State<SharedEngine>,
    ) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
        let summary = KnowledgeSummary {
            source: engine.source_id(),
            inputs: engine.input_variables(),
            output: engine.output_variable(),
            rules: engine.rules().iter().map(|r| r.to_string()).collect(),
            categories: engine.categories(),
        };
        to_json(&summary)
    }

    fn to_json<T: Serialize>(
        value: &T,
    ) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
        serde_json::to_value(value).map(Json).map_err(|e| {
            error!("Serialization failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })
    }

    async fn evaluate(
        State(engine): State<SharedEngine>,
        Json(payload): Json<EvaluateRequest>,
    ) -> Result<Json<Response>, (StatusCode, Json<ErrorResponse>)> {
        let response = engine.evaluate_detailed(&payload.inputs).map_err(|e| {
            error!("Evaluation failed: {}", e);
            let status = match e {
                MamdaniError::NoRuleFired => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::BAD_REQUEST,
            };
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })?;

        info!(
            score = response.score,
            category = %response.category,
            "evaluated {} inputs",
            response.inputs.len()
        );
        Ok(Json(response))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use axum::body::{to_bytes, Body};
        use axum::http::Request;
        use tower::ServiceExt;

        const KNOWLEDGE: &str = include_str!("../../knowledge/economy.json");

        fn app() -> Router {
            router(Engine::from_json(KNOWLEDGE, "economy.json").unwrap())
        }

        async fn body_json(response: axum::response::Response) -> serde_json::Value {
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            serde_json::from_slice(&bytes).unwrap()
        }

        fn evaluate_request(body: serde_json::Value) -> Request<Body> {
            Request::builder()
                .method("POST")
                .uri("/evaluate")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        }

        fn stressed_inputs() -> serde_json::Value {
            serde_json::json!({
                "inputs": {
                    "inflation": 18.0, "unemployment": 20.0, "economic_growth": -4.0,
                    "budget_deficit": 8.0, "foreign_investment": 5.0,
                    "consumer_satisfaction": 20.0, "price_stability": 9.0, "hdi": 0.5,
                    "exports": 50.0, "imports": 250.0, "exchange_rate": 19.0,
                    "fx_reserves": 30.0
                }
            })
        }

        #[tokio::test]
        async fn test_health() {
            let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
            let response = app().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await["service"], "mamdani");
        }

        #[tokio::test]
        async fn test_knowledge_lists_variables_and_rules() {
            let request = Request::builder().uri("/knowledge").body(Body::empty()).unwrap();
            let response = app().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let json = body_json(response).await;
            assert_eq!(json["inputs"].as_array().unwrap().len(), 12);
            assert_eq!(json["output"]["name"], "economic_condition");
            assert_eq!(json["rules"].as_array().unwrap().len(), 14);
            assert_eq!(json["categories"]["otherwise"], "good");
        }

        #[tokio::test]
        async fn test_evaluate_returns_trace() {
            let response = app()
                .oneshot(evaluate_request(stressed_inputs()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let json = body_json(response).await;
            assert_eq!(json["category"], "poor");
            assert!(json["score"].as_f64().unwrap() < 3.0);
        }

        #[tokio::test]
        async fn test_evaluate_missing_inputs_is_bad_request() {
            let body = serde_json::json!({ "inputs": { "inflation": 4.0 } });
            let response = app().oneshot(evaluate_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let json = body_json(response).await;
            assert!(json["error"].as_str().unwrap().contains("Input mismatch"));
        }

        #[tokio::test]
        async fn test_evaluate_without_firing_rules() {
            // Each rule has at least one condition at zero membership
            let body = serde_json::json!({
                "inputs": {
                    "inflation": 10.0, "unemployment": 7.0, "economic_growth": 0.0,
                    "budget_deficit": 4.0, "foreign_investment": 15.0,
                    "consumer_satisfaction": 50.0, "price_stability": 0.0, "hdi": 0.65,
                    "exports": 150.0, "imports": 150.0, "exchange_rate": 14.0,
                    "fx_reserves": 110.0
                }
            });
            let response = app().oneshot(evaluate_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }

        #[test]
        fn test_serialization_failure_is_server_error() {
            let bad = std::collections::BTreeMap::from([((1, 2), "pair")]);
            let (status, Json(body)) = to_json(&bad).unwrap_err();
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body.error.contains("key must be a string"));
        }
    }
}
