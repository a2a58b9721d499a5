/// A detected version change. Lives for one run only; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub source_id: String,
    pub name: String,
    pub old_version: String,
    pub new_version: String,
    pub url: String,
}

/// A single push notification as handed to a `Notifier`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub title: Option<String>,
    pub body: String,
    pub url: Option<String>,
}

pub const DISABLED_TITLE: &str = "patchpulse disabled";

pub const DISABLED_BODY: &str = "Too many consecutive errors occurred while checking game \
client versions, and the service has been shut down. Correct the configuration and turn the \
service back on.";

impl Message {
    pub fn for_change(event: &ChangeEvent) -> Self {
        Self {
            title: Some(event.name.clone()),
            body: format!(
                "A new patch has been released on the {} client ({} -> {}).",
                event.name, event.old_version, event.new_version
            ),
            url: Some(event.url.clone()),
        }
    }

    pub fn service_disabled() -> Self {
        Self {
            title: Some(DISABLED_TITLE.to_string()),
            body: DISABLED_BODY.to_string(),
            url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_message_carries_name_and_link() {
        let event = ChangeEvent {
            source_id: "ow".into(),
            name: "Live".into(),
            old_version: "1.0".into(),
            new_version: "1.1".into(),
            url: "https://blizztrack.com/patch_notes/ow/latest".into(),
        };
        let msg = Message::for_change(&event);
        assert_eq!(msg.title.as_deref(), Some("Live"));
        assert!(msg.body.contains("Live"));
        assert!(msg.body.contains("1.1"));
        assert_eq!(msg.url.as_deref(), Some(event.url.as_str()));
    }

    #[test]
    fn disabled_message_has_no_link() {
        let msg = Message::service_disabled();
        assert!(msg.url.is_none());
        assert_eq!(msg.body, DISABLED_BODY);
    }
}
