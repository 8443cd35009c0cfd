/// Matching rendered videos against the block set
///
/// General workflow:
/// 1. Walk each known page layout from the root element
/// 2. Recover a channel for every video or shelf found
/// 3. Hide blocked ones, report the rest as candidates for a block button
/// 4. Hide end-of-video recommendations outright when configured
mod legacy;
mod polymer;

use crate::block_set::BlockSet;
use crate::channel::ChannelRef;
use crate::config::Settings;
use crate::page::PageNode;

/// Class that hides an element (see extension/content.css)
pub const BLOCKED_CLASS: &str = "blocked-video";

const ENDSCREEN_CLASSES: [&str; 2] = ["html5-endscreen", "ytp-endscreen-content"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideReason {
    /// A whole feed shelf owned by a blocked channel
    Shelf,
    Video,
    Endscreen,
}

#[derive(Debug, Clone)]
pub struct Hidden<N> {
    pub node: N,
    pub reason: HideReason,
    pub channel: Option<ChannelRef>,
}

/// A visible video with a recognised channel
#[derive(Debug, Clone)]
pub struct Candidate<N> {
    pub node: N,
    pub channel: ChannelRef,
    pub video_title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScanReport<N> {
    pub hidden: Vec<Hidden<N>>,
    pub candidates: Vec<Candidate<N>>,
}

impl<N> Default for ScanReport<N> {
    fn default() -> Self {
        ScanReport {
            hidden: Vec::new(),
            candidates: Vec::new(),
        }
    }
}

impl<N> ScanReport<N> {
    pub fn hidden_count(&self, reason: HideReason) -> usize {
        self.hidden.iter().filter(|h| h.reason == reason).count()
    }
}

pub struct Matcher<'a> {
    blocks: &'a BlockSet,
    settings: &'a Settings,
}

impl<'a> Matcher<'a> {
    pub fn new(blocks: &'a BlockSet, settings: &'a Settings) -> Self {
        Matcher { blocks, settings }
    }

    pub fn scan<N: PageNode>(&self, root: &N) -> ScanReport<N> {
        let mut scan = Scan {
            matcher: self,
            report: ScanReport::default(),
        };

        legacy::check_feeds(root, &mut scan);
        legacy::check_sidebars(root, &mut scan);
        polymer::check_renderers(root, &mut scan);

        if self.settings.hide_endscreen {
            for class in ENDSCREEN_CLASSES {
                for endscreen in root.descendants_by_class(class) {
                    scan.hide(endscreen, HideReason::Endscreen, None);
                }
            }
        }

        scan.report
    }
}

/// State threaded through the layout walkers during one scan
pub(crate) struct Scan<'m, 'a, N> {
    matcher: &'m Matcher<'a>,
    report: ScanReport<N>,
}

impl<N: PageNode> Scan<'_, '_, N> {
    pub(crate) fn is_blocked(&self, channel: &ChannelRef) -> bool {
        channel.is_blocked(self.matcher.blocks)
    }

    /// Hide `node` if its channel is blocked, otherwise record it as a candidate.
    /// Returns true when the node ends up hidden.
    pub(crate) fn check(&mut self, node: N, channel: ChannelRef, video_title: Option<String>) -> bool {
        if self.is_blocked(&channel) {
            self.hide(node, HideReason::Video, Some(channel));
            true
        } else {
            if channel.is_known() {
                self.report.candidates.push(Candidate {
                    node,
                    channel,
                    video_title,
                });
            }
            false
        }
    }

    pub(crate) fn hide(&mut self, node: N, reason: HideReason, channel: Option<ChannelRef>) {
        if node.has_class(BLOCKED_CLASS) {
            return;
        }

        if self.matcher.settings.log_blocks {
            match &channel {
                Some(channel) => log::info!("Blocking {:?} by {}", reason, channel.label()),
                None => log::info!("Blocking {:?}", reason),
            }
        }

        node.add_class(BLOCKED_CLASS);
        self.report.hidden.push(Hidden { node, reason, channel });
    }
}

/// Skip nodes hidden by an earlier scan
pub(crate) fn already_hidden<N: PageNode>(node: &N) -> bool {
    node.has_class(BLOCKED_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_item::BlockItem;
    use crate::page::fake::FakeNode;

    pub(crate) fn blocks(identities: &[&str]) -> BlockSet {
        let items: Vec<BlockItem> = identities
            .iter()
            .enumerate()
            .map(|(i, identity)| BlockItem {
                id: i as u32 + 1,
                channel_id: None,
                channel_name: Some(identity.to_string()),
                video_title: None,
                reason: None,
            })
            .collect();
        BlockSet::from_items(&items)
    }

    #[test]
    fn test_endscreen_hidden_when_enabled() {
        let root = FakeNode::new("body")
            .with_child(FakeNode::new("div").class("html5-endscreen"))
            .with_child(FakeNode::new("div").class("ytp-endscreen-content"));
        let set = blocks(&[]);
        let settings = Settings::default();

        let report = Matcher::new(&set, &settings).scan(&root);

        assert_eq!(report.hidden_count(HideReason::Endscreen), 2);
        assert!(root.children().iter().all(|n| n.has_class(BLOCKED_CLASS)));
    }

    #[test]
    fn test_endscreen_kept_when_disabled() {
        let root = FakeNode::new("body").with_child(FakeNode::new("div").class("html5-endscreen"));
        let set = blocks(&[]);
        let settings = Settings {
            hide_endscreen: false,
            ..Settings::default()
        };

        let report = Matcher::new(&set, &settings).scan(&root);

        assert!(report.hidden.is_empty());
    }

    #[test]
    fn test_rescan_does_not_hide_twice() {
        let root = FakeNode::new("body").with_child(FakeNode::new("div").class("html5-endscreen"));
        let set = blocks(&[]);
        let settings = Settings::default();
        let matcher = Matcher::new(&set, &settings);

        assert_eq!(matcher.scan(&root).hidden.len(), 1);
        assert_eq!(matcher.scan(&root).hidden.len(), 0);
    }

    #[test]
    fn test_empty_page() {
        let root = FakeNode::new("body");
        let set = blocks(&["anyone"]);
        let settings = Settings::default();

        let report = Matcher::new(&set, &settings).scan(&root);

        assert!(report.hidden.is_empty());
        assert!(report.candidates.is_empty());
    }
}
