//! API integration tests
//!
//! Every test spawns its own in-memory server. Tests named `*_postgres` also
//! run the ledger against a real database and skip when `DATABASE_URL` is unset.

use std::sync::Arc;

use integration_tests::*;
use reqwest::StatusCode;
use serde_json::json;

const VOTES: &str = "/api/v1/votes";

fn votes_path(target_type: &str, target_id: i64) -> String {
    format!("{VOTES}/{target_type}/{target_id}")
}

async fn submit(server: &TestServer, user: &TestUser, request: &VoteRequest) -> VoteResponse {
    let response = server.post_auth(VOTES, &user.token, request).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

fn tally(upvotes: i64, downvotes: i64, user_vote: Option<&str>) -> VoteResponse {
    VoteResponse {
        upvotes,
        downvotes,
        user_vote: user_vote.map(str::to_string),
    }
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let body: serde_json::Value = assert_json(server.get("/health").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_check() {
    let server = TestServer::start().await.unwrap();
    let body: serde_json::Value =
        assert_json(server.get("/health/ready").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(body["checks"]["storage"], "healthy");
}

// ============================================================================
// Vote transitions
// ============================================================================

#[tokio::test]
async fn test_first_vote_is_recorded() {
    let server = TestServer::start().await.unwrap();
    let user = TestUser::unique();
    let question = unique_id();

    let result = submit(&server, &user, &VoteRequest::upvote_question(question)).await;
    assert_eq!(result, tally(1, 0, Some("upvote")));
}

#[tokio::test]
async fn test_repeat_vote_retracts() {
    let server = TestServer::start().await.unwrap();
    let user = TestUser::unique();
    let question = unique_id();

    submit(&server, &user, &VoteRequest::upvote_question(question)).await;
    let result = submit(&server, &user, &VoteRequest::upvote_question(question)).await;
    assert_eq!(result, tally(0, 0, None));
}

#[tokio::test]
async fn test_opposite_vote_switches() {
    let server = TestServer::start().await.unwrap();
    let user = TestUser::unique();
    let question = unique_id();

    submit(&server, &user, &VoteRequest::upvote_question(question)).await;
    let result = submit(&server, &user, &VoteRequest::downvote_question(question)).await;
    assert_eq!(result, tally(0, 1, Some("downvote")));
}

#[tokio::test]
async fn test_counts_reflect_other_voters() {
    let server = TestServer::start().await.unwrap();
    let question = unique_id();
    let (alice, bob, carol) = (TestUser::unique(), TestUser::unique(), TestUser::unique());

    submit(&server, &alice, &VoteRequest::upvote_question(question)).await;
    submit(&server, &bob, &VoteRequest::upvote_question(question)).await;
    let result = submit(&server, &carol, &VoteRequest::downvote_question(question)).await;

    assert_eq!(result, tally(2, 1, Some("downvote")));
}

#[tokio::test]
async fn test_question_and_answer_with_same_id_are_independent() {
    let server = TestServer::start().await.unwrap();
    let user = TestUser::unique();
    let id = unique_id();

    submit(&server, &user, &VoteRequest::upvote_question(id)).await;
    let result = submit(&server, &user, &VoteRequest::upvote_answer(id)).await;
    assert_eq!(result, tally(1, 0, Some("upvote")));

    let response = server.get(&votes_path("question", id)).await.unwrap();
    let question: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(question, tally(1, 0, None));
}

// ============================================================================
// Reading counts
// ============================================================================

#[tokio::test]
async fn test_get_votes_anonymous() {
    let server = TestServer::start().await.unwrap();
    let user = TestUser::unique();
    let answer = unique_id();

    submit(&server, &user, &VoteRequest::upvote_answer(answer)).await;

    let response = server.get(&votes_path("answer", answer)).await.unwrap();
    let result: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result, tally(1, 0, None));
}

#[tokio::test]
async fn test_get_votes_includes_viewer_vote() {
    let server = TestServer::start().await.unwrap();
    let user = TestUser::unique();
    let question = unique_id();

    submit(&server, &user, &VoteRequest::downvote_question(question)).await;

    let response = server
        .get_auth(&votes_path("question", question), &user.token)
        .await
        .unwrap();
    let result: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result, tally(0, 1, Some("downvote")));
}

#[tokio::test]
async fn test_get_votes_for_unvoted_target() {
    let server = TestServer::start().await.unwrap();

    let response = server.get(&votes_path("question", unique_id())).await.unwrap();
    let result: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result, tally(0, 0, None));
}

#[tokio::test]
async fn test_get_votes_rejects_unknown_target_type() {
    let server = TestServer::start().await.unwrap();

    let response = server.get(&format!("{VOTES}/comment/1")).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Rejections
// ============================================================================

#[tokio::test]
async fn test_vote_without_token_is_unauthorized() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post(VOTES, &VoteRequest::upvote_question(unique_id()))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_vote_with_foreign_token_is_unauthorized() {
    let server = TestServer::start().await.unwrap();
    let token = qa_common::JwtService::new("some-other-secret", 900)
        .issue_access_token(qa_core::Snowflake::new(unique_id()))
        .unwrap();

    let response = server
        .post_auth(VOTES, &token, &VoteRequest::upvote_question(unique_id()))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_invalid_vote_type_is_rejected_with_details() {
    let server = TestServer::start().await.unwrap();
    let user = TestUser::unique();

    let response = server
        .post_auth(VOTES, &user.token, &VoteRequest::new(unique_id(), "question", "sideways"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "VALIDATION_ERROR");
    let details = body.error.details.unwrap();
    assert!(details["voteType"].is_array());
    assert!(details.get("targetId").is_none());
}

#[tokio::test]
async fn test_missing_fields_are_all_reported() {
    let server = TestServer::start().await.unwrap();
    let user = TestUser::unique();

    let response = server.post_auth(VOTES, &user.token, &json!({})).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    let details = body.error.details.unwrap();
    for field in ["targetId", "targetType", "voteType"] {
        assert!(details[field].is_array(), "missing detail for {field}");
    }
}

#[tokio::test]
async fn test_wrongly_typed_fields_are_reported_together() {
    let server = TestServer::start().await.unwrap();
    let user = TestUser::unique();
    let body = json!({ "targetId": true, "targetType": 5, "voteType": "upvote" });

    let response = server.post_auth(VOTES, &user.token, &body).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "VALIDATION_ERROR");
    let details = body.error.details.unwrap();
    assert!(details["targetId"].is_array());
    assert!(details["targetType"].is_array());
    assert!(details.get("voteType").is_none());
}

#[tokio::test]
async fn test_rejected_vote_leaves_counts_untouched() {
    let server = TestServer::start().await.unwrap();
    let user = TestUser::unique();
    let question = unique_id();

    let response = server
        .post_auth(VOTES, &user.token, &VoteRequest::new(question, "question", "meh"))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get_auth(&votes_path("question", question), &user.token)
        .await
        .unwrap();
    let result: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result, tally(0, 0, None));
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_voters_are_all_counted() {
    let server = Arc::new(TestServer::start().await.unwrap());
    let question = unique_id();
    let voters: Vec<TestUser> = (0..20).map(|_| TestUser::unique()).collect();

    let handles: Vec<_> = voters
        .into_iter()
        .enumerate()
        .map(|(i, user)| {
            let server = Arc::clone(&server);
            tokio::spawn(async move {
                let request = if i % 4 == 0 {
                    VoteRequest::downvote_question(question)
                } else {
                    VoteRequest::upvote_question(question)
                };
                let response = server.post_auth(VOTES, &user.token, &request).await.unwrap();
                assert_status(response, StatusCode::OK).await.unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    let response = server.get(&votes_path("question", question)).await.unwrap();
    let result: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result, tally(15, 5, None));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_identical_votes_from_one_user_settle() {
    let server = Arc::new(TestServer::start().await.unwrap());
    let user = TestUser::unique();
    let question = unique_id();

    let vote_a = VoteRequest::upvote_question(question);
    let vote_b = VoteRequest::upvote_question(question);
    let (a, b) = tokio::join!(
        server.post_auth(VOTES, &user.token, &vote_a),
        server.post_auth(VOTES, &user.token, &vote_b),
    );
    assert_status(a.unwrap(), StatusCode::OK).await.unwrap();
    assert_status(b.unwrap(), StatusCode::OK).await.unwrap();

    // Never more than one record per user and target
    let response = server
        .get_auth(&votes_path("question", question), &user.token)
        .await
        .unwrap();
    let result: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(result.downvotes, 0);
    assert!(result.upvotes <= 1);
    assert_eq!(result.user_vote.is_some(), result.upvotes == 1);
}

// ============================================================================
// PostgreSQL backend
// ============================================================================

#[tokio::test]
async fn test_vote_lifecycle_postgres() {
    if !check_postgres_env() {
        return;
    }
    let server = TestServer::start_postgres().await.unwrap();
    let user = TestUser::unique();
    let question = unique_id();

    let first = submit(&server, &user, &VoteRequest::upvote_question(question)).await;
    assert_eq!(first, tally(1, 0, Some("upvote")));

    let switched = submit(&server, &user, &VoteRequest::downvote_question(question)).await;
    assert_eq!(switched, tally(0, 1, Some("downvote")));

    let retracted = submit(&server, &user, &VoteRequest::downvote_question(question)).await;
    assert_eq!(retracted, tally(0, 0, None));
}

#[tokio::test]
async fn test_readiness_check_postgres() {
    if !check_postgres_env() {
        return;
    }
    let server = TestServer::start_postgres().await.unwrap();
    let body: serde_json::Value =
        assert_json(server.get("/health/ready").await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(body["checks"]["storage"], "healthy");
}
