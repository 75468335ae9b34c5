//! Integration tests for repository pagination against a mocked GraphQL endpoint

use core::time::Duration;
use github_stats::facts::RetryPolicy;
use github_stats::facts::hosting::{Client, ProfileFetch, QueryFlags, fetch_profile};
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retry_attempts: 2,
        base_delay: Duration::from_millis(10),
        timeout: Duration::from_secs(5),
    }
}

fn repo_nodes(stars: impl IntoIterator<Item = u64>, prefix: &str) -> Vec<Value> {
    stars
        .into_iter()
        .enumerate()
        .map(|(i, count)| json!({ "name": format!("{prefix}-{i}"), "stargazers": { "totalCount": count } }))
        .collect()
}

fn connection(nodes: Vec<Value>, total: u64, has_next_page: bool, end_cursor: Option<&str>) -> Value {
    json!({
        "totalCount": total,
        "nodes": nodes,
        "pageInfo": { "hasNextPage": has_next_page, "endCursor": end_cursor }
    })
}

fn first_page(repositories: Value) -> Value {
    json!({
        "data": {
            "user": {
                "name": "Mona Lisa Octocat",
                "login": "octocat",
                "commits": { "totalCommitContributions": 10 },
                "reviews": { "totalPullRequestReviewContributions": 1 },
                "repositoriesContributedTo": { "totalCount": 2 },
                "pullRequests": { "totalCount": 3 },
                "openIssues": { "totalCount": 0 },
                "closedIssues": { "totalCount": 1 },
                "followers": { "totalCount": 4 },
                "repositories": repositories
            }
        }
    })
}

fn continuation_page(repositories: Value) -> Value {
    json!({ "data": { "user": { "repositories": repositories } } })
}

async fn mount_first_page(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query userInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn fetch(server: &MockServer, multi_page: bool) -> ProfileFetch {
    let client = Client::new(Some("test-token"), server.uri(), fast_retry()).unwrap();
    fetch_profile(&client, "octocat", QueryFlags::default(), None, multi_page).await.unwrap()
}

#[tokio::test]
async fn test_full_starred_page_requests_second_page() {
    let server = MockServer::start().await;

    let first = connection(repo_nodes((1..=100).rev(), "first"), 150, true, Some("cursor-100"));
    mount_first_page(&server, first_page(first)).await;

    let second = connection(repo_nodes([1, 1, 0], "second"), 150, true, Some("cursor-103"));
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query userRepos"))
        .and(body_string_contains(r#""after":"cursor-100""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(continuation_page(second)))
        .expect(1)
        .mount(&server)
        .await;

    let ProfileFetch::Complete(profile) = fetch(&server, true).await else {
        panic!("expected a complete profile");
    };

    assert_eq!(profile.repositories.len(), 103);
    assert_eq!(profile.total_repositories, 150);
    assert_eq!(profile.repositories[0].name, "first-0");
    assert_eq!(profile.repositories[0].star_count, 100);
    assert_eq!(profile.repositories[102].name, "second-2");
    assert_eq!(profile.user.login, "octocat");
    assert!(profile.user.repositories.is_none());
}

#[tokio::test]
async fn test_zero_star_repository_stops_after_first_page() {
    let server = MockServer::start().await;

    let mut stars: Vec<u64> = (1..=100).rev().collect();
    stars[99] = 0;
    let first = connection(repo_nodes(stars, "first"), 150, true, Some("cursor-100"));
    mount_first_page(&server, first_page(first)).await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query userRepos"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let ProfileFetch::Complete(profile) = fetch(&server, true).await else {
        panic!("expected a complete profile");
    };
    assert_eq!(profile.repositories.len(), 100);
}

#[tokio::test]
async fn test_multi_page_disabled_stops_after_first_page() {
    let server = MockServer::start().await;

    let first = connection(repo_nodes((1..=100).rev(), "first"), 150, true, Some("cursor-100"));
    mount_first_page(&server, first_page(first)).await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query userRepos"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let ProfileFetch::Complete(profile) = fetch(&server, false).await else {
        panic!("expected a complete profile");
    };
    assert_eq!(profile.repositories.len(), 100);
    assert_eq!(profile.total_repositories, 150);
}

#[tokio::test]
async fn test_errors_on_later_page_are_returned_unmerged() {
    let server = MockServer::start().await;

    let first = connection(repo_nodes((1..=100).rev(), "first"), 150, true, Some("cursor-100"));
    mount_first_page(&server, first_page(first)).await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query userRepos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "type": "RATE_LIMITED", "message": "API rate limit exceeded" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ProfileFetch::Rejected(errors) = fetch(&server, true).await else {
        panic!("expected the platform errors to be handed back");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind.as_deref(), Some("RATE_LIMITED"));
    assert_eq!(errors[0].message.as_deref(), Some("API rate limit exceeded"));
}

#[tokio::test]
async fn test_request_carries_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(wiremock::matchers::header("authorization", "bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first_page(connection(Vec::new(), 0, false, None))))
        .expect(1)
        .mount(&server)
        .await;

    let ProfileFetch::Complete(profile) = fetch(&server, true).await else {
        panic!("expected a complete profile");
    };
    assert!(profile.repositories.is_empty());
    assert_eq!(profile.total_repositories, 0);
}
