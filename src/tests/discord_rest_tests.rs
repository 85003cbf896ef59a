#[cfg(test)]
pub mod tests {
    use crate::host::platform::{CommandApi, CommandScope, PlatformError};
    use crate::host::{CommandSchema, OptionKind, OptionSchema};
    use crate::utils::discord::DiscordRest;
    use crate::utils::report;
    use httpmock::Method::{GET, PUT};
    use httpmock::MockServer;
    use serde_json::json;

    fn client(server: &MockServer) -> DiscordRest {
        DiscordRest::new(&server.url("/"), "secret-token", 123).unwrap()
    }

    fn api_error(status: u16) -> PlatformError {
        PlatformError::Api {
            status,
            code: None,
            message: "failure".to_string(),
            method: "GET".to_string(),
            path: "/applications/123/commands".to_string(),
        }
    }

    // Group 1: request shape
    mod request_tests {
        use super::*;

        #[tokio::test]
        async fn test_fetch_global_commands() {
            let server = MockServer::start();
            let mock = server.mock(|when, then| {
                when.method(GET)
                    .path("/applications/123/commands")
                    .header("authorization", "Bot secret-token");
                then.status(200).json_body(json!([
                    {
                        "id": "1001",
                        "application_id": "123",
                        "version": "1",
                        "type": 1,
                        "name": "ping",
                        "description": "Replies with Pong!",
                        "dm_permission": true,
                        "nsfw": false
                    }
                ]));
            });

            let commands = client(&server)
                .fetch_commands(CommandScope::Global)
                .await
                .unwrap();

            mock.assert();
            assert_eq!(commands, vec![CommandSchema::new("ping", "Replies with Pong!")]);
        }

        #[tokio::test]
        async fn test_fetch_guild_commands_with_options() {
            let server = MockServer::start();
            let mock = server.mock(|when, then| {
                when.method(GET).path("/applications/123/guilds/77/commands");
                then.status(200).json_body(json!([
                    {
                        "id": "1002",
                        "name": "ban",
                        "description": "Bans a member",
                        "default_member_permissions": "4",
                        "options": [
                            { "type": 6, "name": "user", "description": "Member to ban", "required": true }
                        ]
                    }
                ]));
            });

            let commands = client(&server)
                .fetch_commands(CommandScope::Guild(77))
                .await
                .unwrap();

            mock.assert();
            let expected = CommandSchema::new("ban", "Bans a member")
                .add_option(OptionSchema::new(OptionKind::User, "user", "Member to ban").required(true))
                .default_member_permissions(4);
            assert_eq!(commands, vec![expected]);
        }

        #[tokio::test]
        async fn test_replace_puts_the_full_list() {
            let server = MockServer::start();
            let mock = server.mock(|when, then| {
                when.method(PUT)
                    .path("/applications/123/commands")
                    .json_body(json!([
                        { "name": "help", "description": "Lists commands" },
                        { "name": "ping", "description": "Replies with Pong!" }
                    ]));
                then.status(200).json_body(json!([
                    { "id": "1", "name": "help", "description": "Lists commands" },
                    { "id": "2", "name": "ping", "description": "Replies with Pong!" }
                ]));
            });

            let stored = client(&server)
                .replace_commands(
                    CommandScope::Global,
                    &[
                        CommandSchema::new("help", "Lists commands"),
                        CommandSchema::new("ping", "Replies with Pong!"),
                    ],
                )
                .await
                .unwrap();

            mock.assert();
            assert_eq!(stored.len(), 2);
        }

        #[tokio::test]
        async fn test_delete_all_puts_an_empty_list() {
            let server = MockServer::start();
            let mock = server.mock(|when, then| {
                when.method(PUT)
                    .path("/applications/123/guilds/5/commands")
                    .json_body(json!([]));
                then.status(200).json_body(json!([]));
            });

            client(&server)
                .delete_all_commands(CommandScope::Guild(5))
                .await
                .unwrap();

            mock.assert();
        }

        #[test]
        fn test_invalid_base_url() {
            let result = DiscordRest::new("not a url", "token", 1);

            assert!(matches!(result, Err(PlatformError::Url(_))));
        }
    }

    // Group 2: error responses
    mod error_tests {
        use super::*;

        #[tokio::test]
        async fn test_api_error_body_is_parsed() {
            let server = MockServer::start();
            let _mock = server.mock(|when, then| {
                when.method(GET).path("/applications/123/commands");
                then.status(401)
                    .json_body(json!({ "code": 0, "message": "401: Unauthorized" }));
            });

            let err = client(&server)
                .fetch_commands(CommandScope::Global)
                .await
                .unwrap_err();

            match err {
                PlatformError::Api {
                    status,
                    code,
                    message,
                    method,
                    path,
                } => {
                    assert_eq!(status, 401);
                    assert_eq!(code, Some(0));
                    assert_eq!(message, "401: Unauthorized");
                    assert_eq!(method, "GET");
                    assert_eq!(path, "/applications/123/commands");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_error_without_body_uses_reason_phrase() {
            let server = MockServer::start();
            let _mock = server.mock(|when, then| {
                when.method(GET).path("/applications/123/commands");
                then.status(503);
            });

            let err = client(&server)
                .fetch_commands(CommandScope::Global)
                .await
                .unwrap_err();

            assert_eq!(err.status(), Some(503));
            assert!(err.to_string().contains("Service Unavailable"));
        }
    }

    // Group 3: diagnostics
    mod report_tests {
        use super::*;

        #[test]
        fn test_explain_known_and_unknown_status() {
            assert!(report::explain_status(401).unwrap().contains("token"));
            assert_eq!(report::explain_status(418), None);
        }

        #[test]
        fn test_suggestions_per_status() {
            assert_eq!(report::suggestions(&api_error(401)).len(), 2);
            assert!(report::suggestions(&api_error(429))[0].contains("Wait"));
            assert!(report::suggestions(&api_error(418)).is_empty());
        }

        #[test]
        fn test_recoverable_statuses() {
            assert!(report::is_recoverable(&api_error(429)));
            assert!(report::is_recoverable(&api_error(502)));
            assert!(!report::is_recoverable(&api_error(403)));
        }

        #[test]
        fn test_user_friendly_message() {
            let forbidden = anyhow::Error::new(api_error(403)).context("banning member");
            let unavailable = anyhow::Error::new(api_error(500));
            let form = anyhow::anyhow!("Invalid Form Body: reason too long");
            let other = anyhow::anyhow!("something else");

            assert_eq!(
                report::user_friendly_message(&forbidden, "default"),
                "I don't have permission to do that."
            );
            assert_eq!(
                report::user_friendly_message(&unavailable, "default"),
                "The platform is having trouble. Please try again later."
            );
            assert_eq!(
                report::user_friendly_message(&form, "default"),
                "Invalid data was provided."
            );
            assert_eq!(report::user_friendly_message(&other, "default"), "default");
        }
    }
}
