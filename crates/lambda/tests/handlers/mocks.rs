//! Recording mocks for every service seam the handlers use.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use relay_athena::{
    AthenaError, OutputLocation, PresignedUrl, QueryEngine, QueryState, QueryStatus, UrlPresigner,
};
use relay_core::RelayConfig;
use relay_lambda::{Dispatcher, Responder};
use relay_notify::{ConnectionGateway, Delivery, NotifyError, SessionStore};
use relay_workflow::{WorkflowError, WorkflowInput, WorkflowStarter};

pub const QUERY_ID: &str = "9f1c2b7e-3d4a-4e5f-8a6b-7c8d9e0f1a2b";
pub const BUCKET: &str = "query-results";
pub const OUTPUT_DIR: &str = "athena";
pub const API_ID: &str = "abc123";
pub const CONNECTION_ID: &str = "L0SM9cOFvHcCIhw=";
pub const ENDPOINT: &str = "https://abc123.execute-api.us-east-1.amazonaws.com/prod";

pub fn config() -> RelayConfig {
    RelayConfig {
        profile: String::new(),
        region: "us-east-1".into(),
        bucket_name: BUCKET.into(),
        output_dir: OUTPUT_DIR.into(),
        database: "analytics".into(),
        workgroup: "primary".into(),
        state_machine_arn: "arn:aws:states:us-east-1:123456789012:stateMachine:track".into(),
        session_table: "sessions".into(),
        api_id: Some(API_ID.into()),
    }
}

// ── Query engine ──────────────────────────────────────────────

pub struct MockEngine {
    pub state: QueryState,
    pub output_location: Option<String>,
    pub fail_start: bool,
    pub fail_status: bool,
    pub started: Mutex<Vec<String>>,
    pub status_checks: Mutex<Vec<String>>,
}

impl MockEngine {
    pub fn new(state: QueryState) -> Self {
        Self {
            state,
            output_location: Some(format!("s3://{BUCKET}/{OUTPUT_DIR}/{QUERY_ID}.csv")),
            fail_start: false,
            fail_status: false,
            started: Mutex::new(Vec::new()),
            status_checks: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl QueryEngine for MockEngine {
    async fn start_query(&self, sql: &str) -> Result<String, AthenaError> {
        self.started.lock().unwrap().push(sql.to_string());
        if self.fail_start {
            return Err(AthenaError::AwsSdk("InvalidRequestException".into()));
        }
        Ok(QUERY_ID.to_string())
    }

    async fn query_status(&self, query_id: &str) -> Result<QueryStatus, AthenaError> {
        self.status_checks.lock().unwrap().push(query_id.to_string());
        if self.fail_status {
            return Err(AthenaError::AwsSdk("ThrottlingException".into()));
        }
        Ok(QueryStatus {
            query_id: query_id.to_string(),
            state: self.state.clone(),
            state_change_reason: None,
            output_location: self.output_location.clone(),
        })
    }
}

// ── Presigner ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockPresigner {
    pub fail: bool,
    pub requests: Mutex<Vec<(OutputLocation, Duration)>>,
}

#[async_trait]
impl UrlPresigner for MockPresigner {
    async fn presign_get(
        &self,
        location: &OutputLocation,
        expires_in: Duration,
    ) -> Result<PresignedUrl, AthenaError> {
        self.requests
            .lock()
            .unwrap()
            .push((location.clone(), expires_in));
        if self.fail {
            return Err(AthenaError::Presign("no credentials".into()));
        }
        Ok(PresignedUrl {
            url: format!(
                "https://{}.s3.amazonaws.com/{}?X-Amz-Expires={}",
                location.bucket,
                location.key,
                expires_in.as_secs()
            ),
            expires_in_secs: expires_in.as_secs(),
        })
    }
}

// ── Connection gateway and sessions ───────────────────────────

#[derive(Default)]
pub struct MockGateway {
    pub gone: bool,
    pub posts: Mutex<Vec<(String, String, serde_json::Value)>>,
    pub deletes: Mutex<Vec<String>>,
}

#[async_trait]
impl ConnectionGateway for MockGateway {
    async fn post_to_connection(
        &self,
        endpoint: &str,
        connection_id: &str,
        data: &[u8],
    ) -> Result<(), NotifyError> {
        let body = serde_json::from_slice(data)?;
        self.posts
            .lock()
            .unwrap()
            .push((endpoint.to_string(), connection_id.to_string(), body));
        if self.gone {
            return Err(NotifyError::Gone {
                connection_id: connection_id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_connection(
        &self,
        _endpoint: &str,
        connection_id: &str,
    ) -> Result<(), NotifyError> {
        self.deletes.lock().unwrap().push(connection_id.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockSessions {
    pub deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl SessionStore for MockSessions {
    async fn delete_session(&self, connection_id: &str) -> Result<(), NotifyError> {
        self.deleted.lock().unwrap().push(connection_id.to_string());
        Ok(())
    }
}

// ── Workflow ──────────────────────────────────────────────────

#[derive(Default)]
pub struct MockWorkflow {
    pub fail: bool,
    pub started: Mutex<Vec<WorkflowInput>>,
}

#[async_trait]
impl WorkflowStarter for MockWorkflow {
    async fn start(&self, input: &WorkflowInput) -> Result<(), WorkflowError> {
        self.started.lock().unwrap().push(input.clone());
        if self.fail {
            return Err(WorkflowError::AwsSdk("ExecutionAlreadyExists".into()));
        }
        Ok(())
    }
}

// ── Harness ───────────────────────────────────────────────────

/// All mocks wired together; tweak fields before building a handler.
pub struct Harness {
    pub config: RelayConfig,
    pub engine: Arc<MockEngine>,
    pub presigner: Arc<MockPresigner>,
    pub gateway: Arc<MockGateway>,
    pub sessions: Arc<MockSessions>,
    pub workflow: Arc<MockWorkflow>,
}

impl Harness {
    pub fn new(engine: MockEngine) -> Self {
        Self {
            config: config(),
            engine: Arc::new(engine),
            presigner: Arc::new(MockPresigner::default()),
            gateway: Arc::new(MockGateway::default()),
            sessions: Arc::new(MockSessions::default()),
            workflow: Arc::new(MockWorkflow::default()),
        }
    }

    pub fn with_presigner(mut self, presigner: MockPresigner) -> Self {
        self.presigner = Arc::new(presigner);
        self
    }

    pub fn with_gateway(mut self, gateway: MockGateway) -> Self {
        self.gateway = Arc::new(gateway);
        self
    }

    pub fn with_workflow(mut self, workflow: MockWorkflow) -> Self {
        self.workflow = Arc::new(workflow);
        self
    }

    fn delivery(&self) -> Delivery {
        Delivery::new(self.gateway.clone(), self.sessions.clone())
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(
            self.config.clone(),
            self.engine.clone(),
            self.presigner.clone(),
            self.delivery(),
            self.workflow.clone(),
        )
    }

    pub fn responder(&self) -> Responder {
        Responder::new(
            self.config.clone(),
            self.engine.clone(),
            self.presigner.clone(),
            self.delivery(),
        )
    }
}
