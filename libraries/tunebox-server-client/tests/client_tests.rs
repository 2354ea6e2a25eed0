//! Tests for the Tunebox server client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real server connection.

use std::sync::Arc;

use serde_json::json;
use tunebox_core::{
    Catalog, CollectionForm, CollectionId, ContentDesk, ContentManager, FileUpload, Identity,
    NewTrack, Role, TrackForm, TrackId, TuneboxError,
};
use tunebox_server_client::{ServerClientError, ServerConfig, TuneboxServerClient};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn song_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": title,
        "description": "",
        "singer": "Beatles",
        "album": "al1",
        "audio": { "url": format!("https://cdn.example.com/{}.mp3", id) }
    })
}

fn anonymous_client(server: &MockServer) -> TuneboxServerClient {
    TuneboxServerClient::new(ServerConfig::new(server.uri())).unwrap()
}

fn admin_client(server: &MockServer) -> TuneboxServerClient {
    TuneboxServerClient::new(ServerConfig::with_token(server.uri(), "secret")).unwrap()
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_empty_url_rejected() {
        match TuneboxServerClient::new(ServerConfig::new("")) {
            Err(ServerClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidUrl error, got: {:?}", other.err()),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        match TuneboxServerClient::new(ServerConfig::new("example.com")) {
            Err(ServerClientError::InvalidUrl(msg)) => {
                assert!(msg.contains("http://") || msg.contains("https://"));
            }
            other => panic!("Expected InvalidUrl error, got: {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_url_normalization_trailing_slash() {
        let client = TuneboxServerClient::new(ServerConfig::new("https://example.com/")).unwrap();
        assert_eq!(client.url().await, "https://example.com");
    }
}

// =============================================================================
// Catalog Tests
// =============================================================================

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_list_tracks() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                song_json("s1", "Let It Be"),
                song_json("s2", "Yesterday"),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let tracks = anonymous_client(&server).list_tracks().await.unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "Let It Be");
        assert_eq!(tracks[1].artist_name, "Beatles");
        assert_eq!(tracks[1].collection_id, Some(CollectionId::new("al1")));
        assert_eq!(tracks[0].media_uri, "https://cdn.example.com/s1.mp3");
    }

    #[tokio::test]
    async fn test_list_collections() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/albums"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "_id": "al1",
                "title": "Let It Be",
                "description": "1970",
                "thumbnail": { "url": "https://cdn.example.com/al1.jpg" },
                "songs": ["s1", "s2"]
            }])))
            .mount(&server)
            .await;

        let albums = anonymous_client(&server).list_collections().await.unwrap();

        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].thumbnail_uri, "https://cdn.example.com/al1.jpg");
        assert_eq!(albums[0].track_ids.len(), 2);
    }

    #[tokio::test]
    async fn test_token_sent_when_configured() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let tracks = admin_client(&server).list_tracks().await.unwrap();
        assert!(tracks.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_missing_track() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs/nope"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "message": "Song not found" })),
            )
            .mount(&server)
            .await;

        let err = anonymous_client(&server)
            .fetch_track(&TrackId::new("nope"))
            .await
            .unwrap_err();

        assert!(matches!(err, TuneboxError::TrackNotFound(ref id) if id.as_str() == "nope"));
    }

    #[tokio::test]
    async fn test_fetch_track() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs/s1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(song_json("s1", "Let It Be")))
            .mount(&server)
            .await;

        let track = anonymous_client(&server)
            .fetch_track(&TrackId::new("s1"))
            .await
            .unwrap();
        assert_eq!(track.title, "Let It Be");
    }

    #[tokio::test]
    async fn test_fetch_track_with_space_in_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs/a%20b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(song_json("a b", "Help!")))
            .expect(1)
            .mount(&server)
            .await;

        let track = anonymous_client(&server)
            .fetch_track(&TrackId::new("a b"))
            .await
            .unwrap();
        assert_eq!(track.id.as_str(), "a b");
    }

    #[tokio::test]
    async fn test_invalid_json_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&server)
            .await;

        let handle = anonymous_client(&server).catalog().await;
        match handle.client().list_songs().await {
            Err(ServerClientError::ParseError(_)) => {}
            other => panic!("Expected ParseError, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/albums"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let handle = anonymous_client(&server).catalog().await;
        match handle.client().list_albums().await {
            Err(ServerClientError::ServerError { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("Internal Server Error"));
            }
            other => panic!("Expected ServerError, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "5"))
            .mount(&server)
            .await;

        let handle = anonymous_client(&server).catalog().await;
        match handle.client().list_songs().await {
            Err(ServerClientError::RateLimited { retry_after_secs }) => {
                assert_eq!(retry_after_secs, 5);
            }
            other => panic!("Expected RateLimited, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let client = TuneboxServerClient::new(ServerConfig::new("http://127.0.0.1:9")).unwrap();

        let handle = client.catalog().await;
        match handle.client().list_songs().await {
            Err(ServerClientError::ServerUnreachable(_) | ServerClientError::Request(_)) => {}
            other => panic!("Expected ServerUnreachable or Request error, got: {:?}", other),
        }
    }
}

// =============================================================================
// Identity Tests
// =============================================================================

mod identity {
    use super::*;

    #[tokio::test]
    async fn test_no_token_is_anonymous() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let user = anonymous_client(&server).current_user().await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_admin_user() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "u1",
                "name": "Ann",
                "email": "ann@example.com",
                "role": "admin"
            })))
            .mount(&server)
            .await;

        let user = admin_client(&server).current_user().await.unwrap().unwrap();
        assert_eq!(user.name, "Ann");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.email.as_deref(), Some("ann@example.com"));
    }

    #[tokio::test]
    async fn test_unknown_role_is_regular_user() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "u3",
                "name": "Cy",
                "role": "moderator"
            })))
            .mount(&server)
            .await;

        let user = admin_client(&server).current_user().await.unwrap().unwrap();
        assert_eq!(user.role, Role::Other);
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn test_rejected_token_is_anonymous() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let user = admin_client(&server).current_user().await.unwrap();
        assert!(user.is_none());
    }
}

// =============================================================================
// Content Tests
// =============================================================================

mod content {
    use super::*;

    #[tokio::test]
    async fn test_content_requires_token() {
        let server = MockServer::start().await;

        let err = anonymous_client(&server)
            .delete_track(&TrackId::new("s1"))
            .await
            .unwrap_err();
        assert!(matches!(err, TuneboxError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn test_create_track_sends_multipart_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/songs"))
            .and(header("authorization", "Bearer secret"))
            .and(body_string_contains("name=\"singer\""))
            .and(body_string_contains("Beatles"))
            .and(body_string_contains("filename=\"let-it-be.mp3\""))
            .respond_with(ResponseTemplate::new(201).set_body_json(song_json("s9", "Let It Be")))
            .expect(1)
            .mount(&server)
            .await;

        let track = admin_client(&server)
            .create_track(NewTrack {
                title: "Let It Be".into(),
                description: "1970".into(),
                artist_name: "Beatles".into(),
                collection_id: Some(CollectionId::new("al1")),
                media: FileUpload::new("let-it-be.mp3", b"ID3".to_vec()),
            })
            .await
            .unwrap();

        assert_eq!(track.id.as_str(), "s9");
    }

    #[tokio::test]
    async fn test_attach_thumbnail() {
        let server = MockServer::start().await;

        let mut body = song_json("s1", "Let It Be");
        body["thumbnail"] = json!({ "url": "https://cdn.example.com/s1.jpg" });

        Mock::given(method("POST"))
            .and(path("/api/songs/s1/thumbnail"))
            .and(body_string_contains("filename=\"s1.jpg\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let track = admin_client(&server)
            .attach_thumbnail(&TrackId::new("s1"), FileUpload::new("s1.jpg", b"JFIF".to_vec()))
            .await
            .unwrap();

        assert_eq!(track.thumbnail_or_placeholder(), "https://cdn.example.com/s1.jpg");
    }

    #[tokio::test]
    async fn test_delete_missing_album_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/albums/gone"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = admin_client(&server)
            .delete_collection(&CollectionId::new("gone"))
            .await
            .unwrap_err();

        assert!(matches!(err, TuneboxError::CollectionNotFound(ref id) if id.as_str() == "gone"));
    }

    #[tokio::test]
    async fn test_delete_missing_song_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/songs/gone"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "message": "Song not found" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = admin_client(&server)
            .delete_track(&TrackId::new("gone"))
            .await
            .unwrap_err();

        assert!(matches!(err, TuneboxError::TrackNotFound(ref id) if id.as_str() == "gone"));
    }

    #[tokio::test]
    async fn test_forbidden_delete() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/songs/s1"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({ "message": "Admins only" })),
            )
            .mount(&server)
            .await;

        let handle = admin_client(&server).content().await.unwrap();
        match handle.client().delete_song("s1").await {
            Err(ServerClientError::Forbidden(msg)) => assert_eq!(msg, "Admins only"),
            other => panic!("Expected Forbidden, got: {:?}", other),
        }
    }
}

// =============================================================================
// Content desk over HTTP
// =============================================================================

mod content_desk {
    use super::*;

    async fn mount_me(server: &MockServer, role: &str) {
        Mock::given(method("GET"))
            .and(path("/api/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "u1",
                "name": "Ann",
                "role": role
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_regular_user_cannot_open_desk() {
        let server = MockServer::start().await;
        mount_me(&server, "user").await;

        let client = Arc::new(admin_client(&server));
        let result = ContentDesk::open(client.as_ref(), client.clone()).await;

        assert!(matches!(result, Err(TuneboxError::PermissionDenied(_))));
    }

    #[tokio::test]
    async fn test_add_album_success_clears_form() {
        let server = MockServer::start().await;
        mount_me(&server, "admin").await;

        Mock::given(method("POST"))
            .and(path("/api/albums"))
            .and(body_string_contains("Abbey Road"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "_id": "al2",
                "title": "Abbey Road",
                "description": "1969",
                "thumbnail": { "url": "https://cdn.example.com/al2.jpg" }
            })))
            .mount(&server)
            .await;

        let client = Arc::new(admin_client(&server));
        let desk = ContentDesk::open(client.as_ref(), client.clone()).await.unwrap();

        let mut form = CollectionForm {
            title: "Abbey Road".into(),
            description: "1969".into(),
            thumbnail: Some(FileUpload::new("abbey.jpg", b"JFIF".to_vec())),
        };
        let submission = desk.submit_collection(&mut form).await;

        assert!(submission.is_success());
        assert_eq!(submission.notice.message, "Album added successfully!");
        assert_eq!(form, CollectionForm::default());
    }

    #[tokio::test]
    async fn test_add_song_failure_keeps_form() {
        let server = MockServer::start().await;
        mount_me(&server, "admin").await;

        Mock::given(method("POST"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
            .mount(&server)
            .await;

        let client = Arc::new(admin_client(&server));
        let desk = ContentDesk::open(client.as_ref(), client.clone()).await.unwrap();

        let mut form = TrackForm {
            title: "Something".into(),
            description: "1969".into(),
            artist_name: "Beatles".into(),
            collection_id: None,
            media: Some(FileUpload::new("something.mp3", b"ID3".to_vec())),
        };
        let before = form.clone();
        let submission = desk.submit_track(&mut form).await;

        assert!(!submission.is_success());
        assert_eq!(submission.notice.message, "Failed to add song.");
        assert_eq!(form, before);
    }

    #[tokio::test]
    async fn test_delete_missing_song_shows_error_notice() {
        let server = MockServer::start().await;
        mount_me(&server, "admin").await;

        Mock::given(method("DELETE"))
            .and(path("/api/songs/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = Arc::new(admin_client(&server));
        let desk = ContentDesk::open(client.as_ref(), client.clone()).await.unwrap();

        let submission = desk.delete_track(&TrackId::new("ghost")).await;

        assert!(!submission.is_success());
        assert_eq!(submission.notice.message, "Failed to delete song.");
    }
}
