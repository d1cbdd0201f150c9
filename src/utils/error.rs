use std::{fmt::Write, iter};

pub fn format_error_report(err: &(impl std::error::Error + ?Sized)) -> String {
    let mut output = String::new();
    let _ = write!(&mut output, "{err}");

    if let Some(cause) = err.source() {
        let _ = write!(&mut output, ". Caused by:");
        for (i, err) in iter::successors(Some(cause), |err| err.source()).enumerate() {
            let _ = write!(&mut output, " {i}: {err}");
        }
    }

    output
}

/// Client errors may embed the request URL, which carries the bot token.
pub fn hide_token(text: &str, token: &str) -> String {
    if token.is_empty() {
        text.to_owned()
    } else {
        text.replace(token, "...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, thiserror::Error)]
    #[error("inner")]
    struct Inner;

    #[test]
    fn test_format_error_report() {
        assert_eq!(format_error_report(&Inner), "inner");
        assert_eq!(format_error_report(&Outer(Inner)), "outer. Caused by: 0: inner");
    }

    #[test]
    fn test_hide_token() {
        assert_eq!(
            hide_token("error sending request for url (https://api.telegram.org/bot123:abc/getMe)", "123:abc"),
            "error sending request for url (https://api.telegram.org/bot.../getMe)"
        );
        assert_eq!(hide_token("text", ""), "text");
    }
}
