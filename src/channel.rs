/// Channel identity extraction from links and markup
use crate::block_item::NewBlockItem;
use crate::block_set::BlockSet;
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

const SITE_ROOT: &str = "https://www.youtube.com/";

/// What a layout managed to recover about the channel behind a node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl ChannelRef {
    pub fn from_id(id: impl Into<String>) -> Self {
        ChannelRef {
            id: Some(id.into()),
            name: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.id.is_some() || self.name.is_some()
    }

    pub fn is_blocked(&self, blocks: &BlockSet) -> bool {
        blocks.is_blocked(self.id.as_deref()) || blocks.is_blocked(self.name.as_deref())
    }

    /// Short label for logs and the modal header
    pub fn label(&self) -> &str {
        self.name.as_deref().or(self.id.as_deref()).unwrap_or("unknown channel")
    }

    /// A channel typed by hand: canonical ids are ids, anything else is a name
    pub fn from_input(input: &str) -> Self {
        let input = input.trim();
        if looks_like_channel_id(input) {
            ChannelRef::from_id(input)
        } else {
            ChannelRef {
                id: None,
                name: Some(input.to_string()),
            }
        }
    }

    /// The item submitted to block this channel. A scraped id is kept in
    /// any shape so the node it came from matches once stored.
    pub fn to_new_item(&self, video_title: Option<String>, reason: Option<String>) -> NewBlockItem {
        NewBlockItem {
            channel_id: self.id.clone(),
            channel_name: self.name.clone(),
            video_title,
            reason,
        }
        .normalized()
    }
}

/// Parse a channel link into the identity it names
///
/// Examples:
/// - /channel/UCekQr9znsk2vWxBo3YiLq2w → UCekQr9znsk2vWxBo3YiLq2w
/// - https://www.youtube.com/user/thunderf00t/videos → thunderf00t
/// - /c/TopLists → TopLists
/// - /@PewDiePie → @PewDiePie
/// - /watch?v=abc → None
pub fn identity_from_href(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let base = Url::parse(SITE_ROOT).ok()?;
    let url = base.join(href).ok()?;
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let first = segments.next()?;
    let identity = match first {
        "channel" | "user" | "c" => segments.next()?.to_string(),
        handle if handle.starts_with('@') && handle.len() > 1 => handle.to_string(),
        _ => return None,
    };

    Some(percent_decode(&identity))
}

/// True for canonical channel ids: "UC" followed by 22 URL-safe base64 characters
pub fn looks_like_channel_id(s: &str) -> bool {
    static CHANNEL_ID: OnceLock<Regex> = OnceLock::new();
    CHANNEL_ID
        .get_or_init(|| Regex::new(r"^UC[0-9A-Za-z_-]{22}$").expect("valid channel id pattern"))
        .is_match(s)
}

/// Build a reference from a channel link and its visible text
pub fn channel_from_link(href: Option<&str>, text: &str) -> ChannelRef {
    let identity = href.and_then(identity_from_href);
    let text = text.trim();
    let name = if text.is_empty() { None } else { Some(text.to_string()) };

    ChannelRef { id: identity, name }
}

fn percent_decode(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}
