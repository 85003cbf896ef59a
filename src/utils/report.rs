use crate::host::platform::PlatformError;

/// Plain-language meaning of a platform HTTP status.
pub fn explain_status(status: u16) -> Option<&'static str> {
    Some(match status {
        400 => "Bad request - check the parameters that were sent",
        401 => "Unauthorized - check the bot token",
        403 => "Forbidden - the bot lacks permission for this action",
        404 => "Not found - the requested resource does not exist",
        429 => "Rate limited - too many requests, wait a moment",
        500 => "Internal platform error - try again later",
        502 => "Bad gateway - the platform is temporarily unavailable",
        503 => "Service unavailable - the platform is under maintenance",
        _ => return None,
    })
}

pub fn suggestions(error: &PlatformError) -> Vec<&'static str> {
    match error {
        PlatformError::Api { status, .. } => match status {
            401 => vec![
                "Check that DISCORD_TOKEN in .env is correct",
                "Make sure the bot has not been removed from the server",
            ],
            403 => vec![
                "Check the bot's permissions in the server",
                "Make sure the bot was invited with the applications.commands scope",
            ],
            404 => vec!["Check that CLIENT_ID and TEST_GUILD_ID point to existing resources"],
            429 => vec![
                "Wait a few seconds before trying again",
                "Avoid re-registering commands on every restart",
            ],
            500 | 502 | 503 => vec![
                "This is a platform-side error, try again later",
                "Check the platform status page",
            ],
            _ => Vec::new(),
        },
        PlatformError::Network(e) if e.is_connect() || e.is_timeout() => vec![
            "Check network connectivity to the platform API",
            "Check DISCORD_API_URL if it was overridden",
        ],
        PlatformError::Url(_) => vec!["Check DISCORD_API_URL in .env"],
        PlatformError::Network(_) => Vec::new(),
    }
}

/// Server-side and rate-limit failures may succeed on a later attempt.
pub fn is_recoverable(error: &PlatformError) -> bool {
    matches!(error.status(), Some(status) if status >= 500 || status == 429)
}

/// Message safe to show an end user, falling back to `default`.
pub fn user_friendly_message<'a>(error: &anyhow::Error, default: &'a str) -> &'a str {
    let status = error
        .chain()
        .find_map(|cause| {
            if let Some(platform) = cause.downcast_ref::<PlatformError>() {
                platform.status()
            } else if let Some(serenity::Error::Http(http)) = cause.downcast_ref::<serenity::Error>() {
                http.status_code().map(|status| status.as_u16())
            } else {
                None
            }
        });

    match status {
        Some(403) => "I don't have permission to do that.",
        Some(404) => "Resource not found.",
        Some(429) => "I'm being rate limited. Please wait a moment.",
        Some(status) if status >= 500 => "The platform is having trouble. Please try again later.",
        _ => {
            let text = error.to_string();
            if text.contains("Missing Permissions") {
                "I don't have permission to do that."
            } else if text.contains("Invalid Form Body") {
                "Invalid data was provided."
            } else {
                default
            }
        }
    }
}

/// Logs a platform failure with its context and details.
pub fn report(error: &PlatformError, context: &str) {
    match error {
        PlatformError::Api {
            status,
            code,
            message,
            method,
            path,
        } => tracing::error!(
            context,
            status,
            code = code.unwrap_or_default(),
            method = method.as_str(),
            path = path.as_str(),
            explanation = explain_status(*status).unwrap_or("-"),
            "[ERROR] Platform API error: {}",
            message
        ),
        other => tracing::error!(context, "[ERROR] {}", other),
    }
}

/// [`report`], followed by remediation hints when there are any.
pub fn report_with_suggestions(error: &PlatformError, context: &str) {
    report(error, context);

    for (index, suggestion) in suggestions(error).iter().enumerate() {
        tracing::error!("[ERROR] Suggestion {}: {}", index + 1, suggestion);
    }

    if is_recoverable(error) {
        tracing::error!("[ERROR] This error is recoverable - the operation can be retried");
    }
}
