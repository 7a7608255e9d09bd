use crate::{
    formatting::{capitalize, escape_html},
    messaging::types::MessagingCapabilities,
    PLUGIN_DISPLAY_NAME,
};

use super::event::LogEvent;

/// Destination-shaped payload for one accepted event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderedPayload {
    Html(String),
    Plain(String),
}

/// Human-readable label for a logger target: drop the root segment,
/// capitalize the rest, join with spaces.
///
/// `botutils_core::sub::thing` becomes `Sub Thing`; a bare root becomes an
/// empty label.
pub fn display_label(target: &str) -> String {
    target
        .split("::")
        .skip(1)
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_event(event: &LogEvent, caps: &MessagingCapabilities) -> RenderedPayload {
    let label = display_label(&event.target);

    if caps.supports_html {
        let mut html = format!(
            "<b>{}</b>\n\n<pre>{}</pre>",
            escape_html(&label),
            escape_html(&event.message)
        );
        if let Some(error) = &event.error {
            html.push_str(&format!(
                "\n\n<b>Exception, see your logs for more</b>\n<code>{}</code>",
                escape_html(error)
            ));
        }
        html.push_str(&format!("\n\n<i>{PLUGIN_DISPLAY_NAME}</i>"));
        RenderedPayload::Html(html)
    } else {
        let mut text = format!("{label}\n\n```\n{}\n```", event.message);
        if let Some(error) = &event.error {
            text.push_str(&format!(
                "\n\nException, see your logs for more: {error}"
            ));
        }
        text.push_str(&format!("\n\n{PLUGIN_DISPLAY_NAME}"));
        RenderedPayload::Plain(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(html: bool) -> MessagingCapabilities {
        MessagingCapabilities {
            supports_html: html,
            supports_chat_actions: true,
            max_message_len: 4096,
        }
    }

    fn event(error: Option<&str>) -> LogEvent {
        LogEvent {
            target: "botutils_core::sub::thing".to_string(),
            level: 20,
            message: "hello".to_string(),
            fields: Vec::new(),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn label_drops_root_and_capitalizes() {
        assert_eq!(display_label("botutils_core::sub::thing"), "Sub Thing");
        assert_eq!(display_label("botutils"), "");
    }

    #[test]
    fn html_payload_has_label_and_body() {
        let RenderedPayload::Html(html) = render_event(&event(None), &caps(true)) else {
            panic!("expected html payload");
        };
        assert!(html.contains("<b>Sub Thing</b>"));
        assert!(html.contains("hello"));
        assert!(!html.contains("Exception"));
    }

    #[test]
    fn html_payload_names_the_exception() {
        let RenderedPayload::Html(html) =
            render_event(&event(Some("connection reset")), &caps(true))
        else {
            panic!("expected html payload");
        };
        assert!(html.contains("Exception, see your logs for more"));
        assert!(html.contains("connection reset"));
    }

    #[test]
    fn plain_payload_quotes_message_in_fence() {
        let RenderedPayload::Plain(text) = render_event(&event(None), &caps(false)) else {
            panic!("expected plain payload");
        };
        assert!(text.starts_with("Sub Thing\n\n```"));
        assert!(text.contains("hello"));
        assert!(!text.contains("Exception"));
    }

    #[test]
    fn plain_payload_appends_exception_line() {
        let RenderedPayload::Plain(text) =
            render_event(&event(Some("connection reset")), &caps(false))
        else {
            panic!("expected plain payload");
        };
        assert!(text.contains("Exception, see your logs for more: connection reset"));
    }

    #[test]
    fn html_body_is_escaped() {
        let mut ev = event(None);
        ev.message = "<oops>".to_string();
        let RenderedPayload::Html(html) = render_event(&ev, &caps(true)) else {
            panic!("expected html payload");
        };
        assert!(html.contains("&lt;oops&gt;"));
    }
}
