use anyhow::{bail, ensure, Context, Result};
use axum::{http::StatusCode, routing::get, Json, Router};
use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use usersearch::{
    api,
    client::{Error, SearchClient, SearchRequest},
    search::{
        dataset::{MemorySource, UserSource},
        Defaults, ErrorBody, OrderBy, ERROR_BAD_ORDER_FIELD,
    },
};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/dataset.json");

async fn spawn(app: Router) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(addr)
}

async fn search_server() -> Result<SearchClient> {
    let source = MemorySource::from_path(Path::new(FIXTURE)).context("load fixture dataset")?;
    let source: Arc<dyn UserSource> = Arc::new(source);
    let addr = spawn(api::router(source, Defaults::default())).await?;

    Ok(SearchClient::new(&format!("http://{addr}/v1/users"))?)
}

async fn stub_server(app: Router) -> Result<SearchClient> {
    let addr = spawn(app).await?;
    Ok(SearchClient::with_timeout(
        &format!("http://{addr}/"),
        Duration::from_millis(200),
    )?)
}

fn request(query: &str, order_field: &str, limit: i64, offset: i64) -> SearchRequest {
    SearchRequest {
        limit,
        offset,
        query: query.to_string(),
        order_field: order_field.to_string(),
        order_by: OrderBy::Ascending,
    }
}

#[tokio::test]
async fn finds_single_user_by_full_name() -> Result<()> {
    let client = search_server().await?;

    let response = client
        .find_users(&request("Lowery York", "Name", 10, 0))
        .await?;

    ensure!(response.users.len() == 1, "got {:?}", response.users);
    let user = &response.users[0];
    ensure!(user.id == 20);
    ensure!(user.name == "Lowery York");
    ensure!(user.age == 27);
    ensure!(user.gender == "male");
    ensure!(user.about.starts_with("Dolor enim sit id dolore"));
    ensure!(!response.next_page);
    Ok(())
}

#[tokio::test]
async fn rejects_unknown_order_field() -> Result<()> {
    let client = search_server().await?;

    for (limit, offset) in [(1, 0), (25, 3), (0, 100)] {
        match client
            .find_users(&request("", "InvalidField", limit, offset))
            .await
        {
            Err(Error::BadOrderField(field)) => ensure!(field == "InvalidField"),
            other => bail!("expected BadOrderField, got {other:?}"),
        }
    }
    Ok(())
}

#[tokio::test]
async fn caps_page_size_at_25() -> Result<()> {
    let client = search_server().await?;

    let response = client.find_users(&request("", "Id", 30, 0)).await?;

    ensure!(response.users.len() == 25, "got {}", response.users.len());
    ensure!(response.next_page);

    let ids: Vec<i64> = response.users.iter().map(|user| user.id).collect();
    ensure!(ids == (0..25).collect::<Vec<i64>>(), "got {ids:?}");
    Ok(())
}

#[tokio::test]
async fn zero_limit_returns_no_users() -> Result<()> {
    let client = search_server().await?;

    let response = client.find_users(&request("", "Id", 0, 0)).await?;
    ensure!(response.users.is_empty(), "got {:?}", response.users);
    ensure!(response.next_page);

    let response = client.find_users(&request("", "Id", 0, 35)).await?;
    ensure!(response.users.is_empty());
    ensure!(!response.next_page);

    let response = client
        .find_users(&request("Lowery York", "Id", 0, 0))
        .await?;
    ensure!(response.users.is_empty());
    ensure!(response.next_page);
    Ok(())
}

#[tokio::test]
async fn xml_dataset_is_served() -> Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/dataset.xml");
    let source: Arc<dyn UserSource> = Arc::new(MemorySource::from_path(Path::new(path))?);
    let addr = spawn(api::router(source, Defaults::default())).await?;
    let client = SearchClient::new(&format!("http://{addr}/"))?;

    let response = client.find_users(&request("York", "Id", 10, 0)).await?;
    ensure!(response.users.len() == 1, "got {:?}", response.users);
    ensure!(response.users[0].id == 20);
    ensure!(response.users[0].name == "Lowery York");
    ensure!(response.users[0].age == 27);

    let response = client.find_users(&request("", "Name", 10, 0)).await?;
    let names: Vec<&str> = response.users.iter().map(|user| user.name.as_str()).collect();
    ensure!(
        names == ["Boyd Wolf", "Hilda Mayer", "Lowery York"],
        "got {names:?}"
    );
    Ok(())
}

#[tokio::test]
async fn repeated_parameter_uses_first_value() -> Result<()> {
    let source = MemorySource::from_path(Path::new(FIXTURE))?;
    let source: Arc<dyn UserSource> = Arc::new(source);
    let addr = spawn(api::router(source, Defaults::default())).await?;

    let response = reqwest::get(format!(
        "http://{addr}/?order_field=Id&limit=2&limit=7&order_field=Bogus"
    ))
    .await?;
    ensure!(response.status() == reqwest::StatusCode::OK);

    let page: usersearch::search::SearchResponse = response.json().await?;
    let ids: Vec<i64> = page.users.iter().map(|user| user.id).collect();
    ensure!(ids == [0, 1], "got {ids:?}");
    ensure!(page.next_page);
    Ok(())
}

#[tokio::test]
async fn last_page_has_no_next_page() -> Result<()> {
    let client = search_server().await?;

    let response = client.find_users(&request("", "Id", 10, 30)).await?;

    ensure!(response.users.len() == 5);
    ensure!(!response.next_page);
    Ok(())
}

#[tokio::test]
async fn orders_descending_by_name() -> Result<()> {
    let client = search_server().await?;

    let mut req = request("", "Name", 3, 0);
    req.order_by = OrderBy::Descending;
    let response = client.find_users(&req).await?;

    let names: Vec<&str> = response.users.iter().map(|user| user.name.as_str()).collect();
    ensure!(
        names == ["Whitley Woodard", "Twila Harris", "Terrell Pitts"],
        "got {names:?}"
    );
    Ok(())
}

#[tokio::test]
async fn offset_past_end_is_empty() -> Result<()> {
    let client = search_server().await?;

    let response = client.find_users(&request("", "", 5, 100)).await?;

    ensure!(response.users.is_empty());
    ensure!(!response.next_page);
    Ok(())
}

#[tokio::test]
async fn unmatched_query_is_empty() -> Result<()> {
    let client = search_server().await?;

    let response = client
        .find_users(&request("no such user anywhere", "", 5, 0))
        .await?;

    ensure!(response.users.is_empty());
    ensure!(!response.next_page);
    Ok(())
}

#[tokio::test]
async fn negative_parameters_fail_locally() -> Result<()> {
    // Nothing listens here; a local rejection never reaches the network.
    let client = SearchClient::new("http://127.0.0.1:9/")?;

    match client.find_users(&request("", "", -1, 0)).await {
        Err(err @ Error::NegativeLimit(-1)) => ensure!(err.is_local()),
        other => bail!("expected NegativeLimit, got {other:?}"),
    }

    match client.find_users(&request("", "", 1, -1)).await {
        Err(err @ Error::NegativeOffset(-1)) => ensure!(err.is_local()),
        other => bail!("expected NegativeOffset, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn slow_server_times_out() -> Result<()> {
    let client = stub_server(Router::new().route(
        "/",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(usersearch::search::SearchResponse::default())
        }),
    ))
    .await?;

    match client.find_users(&request("", "", 1, 0)).await {
        Err(err @ Error::Timeout(_)) => ensure!(err.is_timeout() && err.is_transport()),
        other => bail!("expected Timeout, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn unauthorized_status() -> Result<()> {
    let client =
        stub_server(Router::new().route("/", get(|| async { StatusCode::UNAUTHORIZED }))).await?;

    match client.find_users(&request("", "", 1, 0)).await {
        Err(Error::Unauthorized) => Ok(()),
        other => bail!("expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn internal_server_error_status() -> Result<()> {
    let client = stub_server(Router::new().route(
        "/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    ))
    .await?;

    match client.find_users(&request("", "", 1, 0)).await {
        Err(Error::Server { status: 500 }) => Ok(()),
        other => bail!("expected Server, got {other:?}"),
    }
}

#[tokio::test]
async fn bad_request_with_sentinel() -> Result<()> {
    let client = stub_server(Router::new().route(
        "/",
        get(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new(ERROR_BAD_ORDER_FIELD)),
            )
        }),
    ))
    .await?;

    match client.find_users(&request("", "Age", 1, 0)).await {
        Err(Error::BadOrderField(field)) => ensure!(field == "Age"),
        other => bail!("expected BadOrderField, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn bad_request_with_other_message() -> Result<()> {
    let client = stub_server(Router::new().route(
        "/",
        get(|| async { (StatusCode::BAD_REQUEST, Json(ErrorBody::new("Unknown Error"))) }),
    ))
    .await?;

    match client.find_users(&request("", "", 1, 0)).await {
        Err(Error::UnknownBadRequest(message)) => ensure!(message == "Unknown Error"),
        other => bail!("expected UnknownBadRequest, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn bad_request_with_broken_json() -> Result<()> {
    let client = stub_server(Router::new().route(
        "/",
        get(|| async { (StatusCode::BAD_REQUEST, "{\"Error\":") }),
    ))
    .await?;

    match client.find_users(&request("", "", 1, 0)).await {
        Err(Error::Decode(_)) => Ok(()),
        other => bail!("expected Decode, got {other:?}"),
    }
}

#[tokio::test]
async fn success_with_broken_json() -> Result<()> {
    let client =
        stub_server(Router::new().route("/", get(|| async { "[{\"Id\": \"x\"" }))).await?;

    match client.find_users(&request("", "", 1, 0)).await {
        Err(Error::Decode(_)) => Ok(()),
        other => bail!("expected Decode, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_transport_error() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = SearchClient::new(&format!("http://{addr}/"))?;

    match client.find_users(&request("", "", 1, 0)).await {
        Err(err @ Error::Transport(_)) => ensure!(err.is_transport() && !err.is_timeout()),
        other => bail!("expected Transport, got {other:?}"),
    }
    Ok(())
}

#[test]
fn invalid_url_is_rejected() {
    assert!(matches!(
        SearchClient::new("not a url"),
        Err(Error::InvalidUrl(_))
    ));
}
