/// Data structures for block-list entries
use serde::{Deserialize, Serialize};

/// A stored block-list entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockItem {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl BlockItem {
    /// The channel id if known, otherwise the channel name
    pub fn identity(&self) -> Option<&str> {
        identity_of(&self.channel_id, &self.channel_name)
    }

    /// Label shown in tables: the name when there is one
    pub fn display_name(&self) -> &str {
        self.channel_name
            .as_deref()
            .or(self.channel_id.as_deref())
            .unwrap_or("")
    }

    /// Overwrite the fields present in `data`, like `Object.assign`
    pub fn apply(&mut self, data: BlockItemData) {
        let data = data.normalized();
        if data.channel_id.is_some() {
            self.channel_id = data.channel_id;
        }
        if data.channel_name.is_some() {
            self.channel_name = data.channel_name;
        }
        if let Some(title) = data.video_title {
            self.video_title = non_empty(title);
        }
        if let Some(reason) = data.reason {
            self.reason = non_empty(reason);
        }
    }
}

/// A block item as submitted by the user, before an id is assigned
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBlockItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl NewBlockItem {
    pub fn normalized(self) -> NewBlockItem {
        NewBlockItem {
            channel_id: self.channel_id.and_then(non_empty),
            channel_name: self.channel_name.and_then(non_empty),
            video_title: self.video_title.and_then(non_empty),
            reason: self.reason.and_then(non_empty),
        }
    }

    pub fn identity(&self) -> Option<&str> {
        identity_of(&self.channel_id, &self.channel_name)
    }

    pub fn into_item(self, id: u32) -> BlockItem {
        BlockItem {
            id,
            channel_id: self.channel_id,
            channel_name: self.channel_name,
            video_title: self.video_title,
            reason: self.reason,
        }
    }
}

/// Partial update of a block item. Absent fields are left alone.
///
/// `video_title` and `reason` may be cleared by sending an empty string;
/// the identity fields cannot be cleared this way.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockItemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl BlockItemData {
    pub fn normalized(self) -> BlockItemData {
        BlockItemData {
            channel_id: self.channel_id.and_then(non_empty),
            channel_name: self.channel_name.and_then(non_empty),
            video_title: self.video_title.map(|s| s.trim().to_string()),
            reason: self.reason.map(|s| s.trim().to_string()),
        }
    }
}

fn identity_of<'a>(id: &'a Option<String>, name: &'a Option<String>) -> Option<&'a str> {
    id.as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| name.as_deref().filter(|s| !s.is_empty()))
}

pub(crate) fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == s.len() {
        Some(s)
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, channel_id: Option<&str>, channel_name: Option<&str>) -> BlockItem {
        BlockItem {
            id,
            channel_id: channel_id.map(String::from),
            channel_name: channel_name.map(String::from),
            video_title: None,
            reason: None,
        }
    }

    #[test]
    fn test_identity_prefers_channel_id() {
        let both = item(1, Some("UC-lHJZR3Gqxm24_Vd_AJ5Yw"), Some("PewDiePie"));
        assert_eq!(both.identity(), Some("UC-lHJZR3Gqxm24_Vd_AJ5Yw"));

        let name_only = item(2, None, Some("Top Lists"));
        assert_eq!(name_only.identity(), Some("Top Lists"));

        let empty_id = item(3, Some(""), Some("Rags"));
        assert_eq!(empty_id.identity(), Some("Rags"));

        assert_eq!(item(4, None, None).identity(), None);
    }

    #[test]
    fn test_new_item_normalization() {
        let new = NewBlockItem {
            channel_id: Some("   ".to_string()),
            channel_name: Some("  thunderf00t ".to_string()),
            video_title: Some(String::new()),
            reason: Some("spoilers".to_string()),
        }
        .normalized();

        assert_eq!(new.channel_id, None);
        assert_eq!(new.channel_name.as_deref(), Some("thunderf00t"));
        assert_eq!(new.video_title, None);
        assert_eq!(new.reason.as_deref(), Some("spoilers"));
        assert_eq!(new.identity(), Some("thunderf00t"));
    }

    #[test]
    fn test_apply_overwrites_only_present_fields() {
        let mut existing = item(7, None, Some("Old Name"));
        existing.reason = Some("meh".to_string());
        existing.video_title = Some("Some video".to_string());

        existing.apply(BlockItemData {
            channel_name: Some("New Name".to_string()),
            video_title: Some(String::new()),
            ..Default::default()
        });

        assert_eq!(existing.id, 7);
        assert_eq!(existing.channel_name.as_deref(), Some("New Name"));
        assert_eq!(existing.video_title, None);
        assert_eq!(existing.reason.as_deref(), Some("meh"));
    }

    #[test]
    fn test_apply_ignores_blank_identity() {
        let mut existing = item(1, None, Some("Keep Me"));
        existing.apply(BlockItemData {
            channel_name: Some("  ".to_string()),
            ..Default::default()
        });
        assert_eq!(existing.channel_name.as_deref(), Some("Keep Me"));
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let stored = BlockItem {
            id: 3,
            channel_id: None,
            channel_name: Some("Ultimate Gamerz".to_string()),
            video_title: Some("Top 10".to_string()),
            reason: None,
        };

        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["channelName"], "Ultimate Gamerz");
        assert_eq!(json["videoTitle"], "Top 10");
        assert!(json.get("channelId").is_none());
        assert!(json.get("reason").is_none());
    }

    #[test]
    fn test_deserialize_legacy_entry() {
        let json = r#"{"id":2,"channelName":"tenaciousskeet","videoTitle":"","reason":"flash"}"#;
        let parsed: BlockItem = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, 2);
        assert_eq!(parsed.channel_id, None);
        assert_eq!(parsed.identity(), Some("tenaciousskeet"));
    }
}
