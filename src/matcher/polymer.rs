//! Polymer markup: `ytd-*` renderers with channel links in `ytd-channel-name`

use super::{Scan, already_hidden};
use crate::channel::{ChannelRef, channel_from_link, identity_from_href};
use crate::page::PageNode;

const RENDERERS: [&str; 4] = [
    "ytd-rich-item-renderer",
    "ytd-video-renderer",
    "ytd-compact-video-renderer",
    "ytd-grid-video-renderer",
];

pub(super) fn check_renderers<N: PageNode>(root: &N, scan: &mut Scan<'_, '_, N>) {
    for tag in RENDERERS {
        for video in root.descendants_by_tag(tag) {
            if already_hidden(&video) {
                continue;
            }

            // A rich item wraps a video renderer; the inner one is checked on its own
            if tag == "ytd-rich-item-renderer" && video.first_by_tag("ytd-video-renderer").is_some() {
                continue;
            }

            if let Some(channel) = channel_of(&video) {
                let title = title_of(&video);
                scan.check(video, channel, title);
            }
        }
    }
}

fn channel_of<N: PageNode>(video: &N) -> Option<ChannelRef> {
    let from_name = video.first_by_tag("ytd-channel-name").and_then(|name| {
        let channel = match name.first_by_tag("a") {
            Some(link) => channel_from_link(link.attr("href").as_deref(), &link.text()),
            // Compact renderers show the name without a link
            None => channel_from_link(None, &name.text()),
        };
        Some(channel).filter(ChannelRef::is_known)
    });

    from_name.or_else(|| {
        video
            .descendants_by_tag("a")
            .into_iter()
            .find_map(|link| {
                let href = link.attr("href")?;
                identity_from_href(&href)?;
                Some(channel_from_link(Some(&href), ""))
            })
    })
}

fn title_of<N: PageNode>(video: &N) -> Option<String> {
    let title = video.find_by_id("video-title")?;
    title
        .attr("title")
        .or_else(|| Some(title.text()))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
