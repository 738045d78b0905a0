//! Repository operations against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the callback API
//! through a ureq-backed `Transport` that completes on a worker thread,
//! the way an application transport would.

use std::net::SocketAddr;
use std::sync::mpsc;
use std::time::Duration;

use octokit_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, Octokit, Response, TokenConfiguration,
    Transport, TransportCompletion, DEFAULT_PAGE, DEFAULT_PER_PAGE, INVALID_ID,
};

const TIMEOUT: Duration = Duration::from_secs(10);

/// Executes each request on its own thread with a blocking ureq agent.
///
/// Disables ureq's status-code-as-error behavior so 4xx/5xx responses are
/// returned as data and the core does the status interpretation.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest, completion: TransportCompletion) {
        let agent = self.agent.clone();
        std::thread::spawn(move || completion(send(&agent, request)));
    }
}

fn send(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    if req.method != HttpMethod::Get {
        return Err(ApiError::Transport(format!("unsupported method {}", req.method.as_str())));
    }
    let mut builder = agent.get(&req.full_url());
    for (key, value) in &req.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    let mut response = builder
        .call()
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

fn spawn_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: SocketAddr) -> Octokit {
    Octokit::new(TokenConfiguration::new("test-token").with_endpoint(&format!("http://{addr}")))
}

#[test]
fn list_repositories_first_page() {
    let client = client(spawn_server());
    let (tx, rx) = mpsc::channel();

    client.repositories(&UreqTransport::new(), DEFAULT_PAGE, DEFAULT_PER_PAGE, move |response| {
        tx.send(response).unwrap()
    });

    let repos = rx.recv_timeout(TIMEOUT).unwrap().into_result().unwrap();
    let names: Vec<_> = repos.iter().map(|r| r.name.as_deref().unwrap()).collect();
    assert_eq!(
        names,
        vec!["Hello-World", "Spoon-Knife", "git-consortium", "linguist", "secret-plans"]
    );
    assert!(repos.iter().all(|r| r.id() != INVALID_ID));
    assert_eq!(repos[1].is_fork, Some(true));
    assert!(repos[4].is_private);
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn list_repositories_second_page() {
    let client = client(spawn_server());
    let (tx, rx) = mpsc::channel();

    client.repositories(&UreqTransport::new(), "2", "2", move |response| {
        tx.send(response).unwrap()
    });

    let repos = rx.recv_timeout(TIMEOUT).unwrap().into_result().unwrap();
    let ids: Vec<i64> = repos.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![17881631, 18221276]);
}

#[test]
fn get_repository_decodes_every_field() {
    let client = client(spawn_server());
    let (tx, rx) = mpsc::channel();

    client.repository(&UreqTransport::new(), "octocat", "Hello-World", move |response| {
        tx.send(response).unwrap()
    });

    let repo = rx.recv_timeout(TIMEOUT).unwrap().into_result().unwrap();
    assert_eq!(repo.id(), 1296269);
    assert_eq!(repo.full_name.as_deref(), Some("octocat/Hello-World"));
    assert_eq!(repo.description.as_deref(), Some("My first repository on GitHub!"));
    assert_eq!(repo.is_fork, Some(false));
    assert!(!repo.is_private);
    assert_eq!(repo.ssh_url.as_deref(), Some("git@github.com:octocat/Hello-World.git"));
    assert_eq!(repo.size, 108);
    assert_eq!(repo.owner().id, 1);
    assert_eq!(repo.owner().login.as_deref(), Some("octocat"));
}

#[test]
fn get_missing_repository_is_not_found() {
    let client = client(spawn_server());
    let (tx, rx) = mpsc::channel();

    client.repository(&UreqTransport::new(), "octocat", "does-not-exist", move |response| {
        tx.send(response).unwrap()
    });

    assert_eq!(
        rx.recv_timeout(TIMEOUT).unwrap(),
        Response::Failure(ApiError::NotFound)
    );
}

#[test]
fn unreachable_server_is_a_transport_failure() {
    // Grab a free port, then close it so nothing is listening.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = client(addr);
    let (tx, rx) = mpsc::channel();

    client.repositories(&UreqTransport::new(), "1", "10", move |response| {
        tx.send(response).unwrap()
    });

    let response = rx.recv_timeout(TIMEOUT).unwrap();
    assert!(matches!(response, Response::Failure(ApiError::Transport(_))));
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}
