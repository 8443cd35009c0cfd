//! Pre-Polymer markup: `data-ytid` attributes on user links

use super::{HideReason, Scan, already_hidden};
use crate::channel::ChannelRef;
use crate::page::PageNode;

fn channel_of<N: PageNode>(link: &N) -> Option<ChannelRef> {
    link.data("ytid").filter(|id| !id.is_empty()).map(ChannelRef::from_id)
}

fn title_of<N: PageNode>(video: &N) -> Option<String> {
    video
        .first_by_class("yt-lockup-title")
        .or_else(|| video.first_by_class("title"))
        .map(|node| node.text().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Home page feeds: a blocked shelf owner hides the whole shelf
pub(super) fn check_feeds<N: PageNode>(root: &N, scan: &mut Scan<'_, '_, N>) {
    for feed in root.descendants_by_class("feed-item-dismissable") {
        if already_hidden(&feed) {
            continue;
        }

        let owner = feed
            .child(0)
            .and_then(|header| header.first_by_tag("a"))
            .and_then(|link| channel_of(&link));

        match owner {
            Some(owner) if scan.is_blocked(&owner) => {
                scan.hide(feed, HideReason::Shelf, Some(owner));
            }
            _ => {
                for video in feed.descendants_by_class("yt-shelf-grid-item") {
                    check_feed_video(video, scan);
                }
            }
        }
    }
}

fn check_feed_video<N: PageNode>(video: N, scan: &mut Scan<'_, '_, N>) {
    if already_hidden(&video) {
        return;
    }

    let channel = video
        .first_by_class("yt-lockup-content")
        .and_then(|content| content.child(1))
        .and_then(|details| details.child(0))
        .and_then(|link| channel_of(&link));

    if let Some(channel) = channel {
        let title = title_of(&video);
        scan.check(video, channel, title);
    }
}

/// Watch page sidebar: sections of related videos
pub(super) fn check_sidebars<N: PageNode>(root: &N, scan: &mut Scan<'_, '_, N>) {
    for sidebar in root.descendants_by_class("watch-sidebar") {
        let sections = sidebar
            .child(1)
            .and_then(|column| column.child(2))
            .map(|container| container.children())
            .unwrap_or_default();

        for section in sections {
            let videos = section
                .first_by_class("watch-sidebar-body")
                .and_then(|body| body.child(0))
                .map(|list| list.children())
                .unwrap_or_default();

            for video in videos {
                check_sidebar_video(video, scan);
            }
        }
    }
}

/// The "Show more" block wraps further videos, so recurse into it
fn check_sidebar_video<N: PageNode>(video: N, scan: &mut Scan<'_, '_, N>) {
    if video.node_name() == "LI" {
        if already_hidden(&video) {
            return;
        }

        let channel = video
            .first_by_class("attribution")
            .and_then(|attribution| attribution.child(0))
            .and_then(|user| channel_of(&user));

        if let Some(channel) = channel {
            let title = title_of(&video);
            scan.check(video, channel, title);
        }
    } else if video.id() == "watch-more-related" {
        for child in video.children() {
            check_sidebar_video(child, scan);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Settings;
    use crate::matcher::tests::blocks;
    use crate::matcher::{BLOCKED_CLASS, HideReason, Matcher};
    use crate::page::PageNode;
    use crate::page::fake::FakeNode;

    fn user_link(ytid: &str) -> FakeNode {
        FakeNode::new("a").with_data("ytid", ytid)
    }

    fn feed_video(ytid: &str, title: &str) -> FakeNode {
        FakeNode::new("li").class("yt-shelf-grid-item").with_child(
            FakeNode::new("div")
                .class("yt-lockup-content")
                .with_child(FakeNode::new("h3").class("yt-lockup-title").with_text(title))
                .with_child(FakeNode::new("div").with_child(user_link(ytid))),
        )
    }

    fn feed(owner: &str, videos: Vec<FakeNode>) -> FakeNode {
        let mut grid = FakeNode::new("ul");
        for video in videos {
            grid = grid.with_child(video);
        }
        FakeNode::new("div")
            .class("feed-item-dismissable")
            .with_child(FakeNode::new("h2").with_child(user_link(owner)))
            .with_child(grid)
    }

    fn sidebar_video(ytid: &str) -> FakeNode {
        FakeNode::new("li").with_child(
            FakeNode::new("div")
                .class("content-wrapper")
                .with_child(FakeNode::new("span").class("title").with_text("Related"))
                .with_child(FakeNode::new("span").class("attribution").with_child(FakeNode::new("span").with_data("ytid", ytid))),
        )
    }

    fn sidebar(videos: Vec<FakeNode>) -> FakeNode {
        let mut list = FakeNode::new("ul");
        for video in videos {
            list = list.with_child(video);
        }
        let section = FakeNode::new("div").with_child(FakeNode::new("div").class("watch-sidebar-body").with_child(list));
        FakeNode::new("div")
            .class("watch-sidebar")
            .with_child(FakeNode::new("div"))
            .with_child(
                FakeNode::new("div")
                    .with_child(FakeNode::new("div"))
                    .with_child(FakeNode::new("div"))
                    .with_child(FakeNode::new("div").with_child(section)),
            )
    }

    #[test]
    fn test_blocked_owner_hides_whole_shelf() {
        let shelf = feed("thunderf00t", vec![feed_video("someone", "a"), feed_video("else", "b")]);
        let root = FakeNode::new("body").with_child(shelf.clone());
        let set = blocks(&["thunderf00t", "someone"]);
        let settings = Settings::default();

        let report = Matcher::new(&set, &settings).scan(&root);

        assert!(shelf.has_class(BLOCKED_CLASS));
        assert_eq!(report.hidden_count(HideReason::Shelf), 1);
        assert_eq!(report.hidden_count(HideReason::Video), 0);
    }

    #[test]
    fn test_feed_videos_checked_individually() {
        let blocked = feed_video("UCJUSr7xT6mgyz0Xj2rMD5CA", "FINAL FANTASY X-3");
        let kept = feed_video("friendly", "Cooking");
        let root = FakeNode::new("body").with_child(feed("owner", vec![blocked.clone(), kept.clone()]));
        let set = blocks(&["UCJUSr7xT6mgyz0Xj2rMD5CA"]);
        let settings = Settings::default();

        let report = Matcher::new(&set, &settings).scan(&root);

        assert!(blocked.has_class(BLOCKED_CLASS));
        assert!(!kept.has_class(BLOCKED_CLASS));
        assert_eq!(report.hidden_count(HideReason::Video), 1);
        assert_eq!(report.candidates.len(), 1);
        assert!(report.candidates[0].node.same(&kept));
        assert_eq!(report.candidates[0].video_title.as_deref(), Some("Cooking"));
    }

    #[test]
    fn test_malformed_feed_video_is_not_blocked() {
        let broken = FakeNode::new("li")
            .class("yt-shelf-grid-item")
            .with_child(FakeNode::new("div").class("yt-lockup-content"));
        let root = FakeNode::new("body").with_child(feed("owner", vec![broken.clone()]));
        let set = blocks(&["owner-not-blocked"]);
        let settings = Settings::default();

        let report = Matcher::new(&set, &settings).scan(&root);

        assert!(!broken.has_class(BLOCKED_CLASS));
        assert!(report.hidden.is_empty());
        assert!(report.candidates.is_empty());
    }

    #[test]
    fn test_feed_without_owner_link_still_checks_videos() {
        let video = feed_video("Rags", "Cracked");
        let shelf = FakeNode::new("div")
            .class("feed-item-dismissable")
            .with_child(FakeNode::new("h2").with_text("Recommended"))
            .with_child(video.clone());
        let root = FakeNode::new("body").with_child(shelf);
        let set = blocks(&["Rags"]);
        let settings = Settings::default();

        Matcher::new(&set, &settings).scan(&root);

        assert!(video.has_class(BLOCKED_CLASS));
    }

    #[test]
    fn test_sidebar_videos() {
        let blocked = sidebar_video("UCrKPVYH-80qUVt_7Kvbtxtg");
        let kept = sidebar_video("fine");
        let root = FakeNode::new("body").with_child(sidebar(vec![blocked.clone(), kept.clone()]));
        let set = blocks(&["UCrKPVYH-80qUVt_7Kvbtxtg"]);
        let settings = Settings::default();

        let report = Matcher::new(&set, &settings).scan(&root);

        assert!(blocked.has_class(BLOCKED_CLASS));
        assert!(!kept.has_class(BLOCKED_CLASS));
        assert_eq!(report.candidates.len(), 1);
    }

    #[test]
    fn test_sidebar_show_more_recurses() {
        let hidden_inside = sidebar_video("PewDiePie");
        let more = FakeNode::new("div").with_id("watch-more-related").with_child(hidden_inside.clone());
        let root = FakeNode::new("body").with_child(sidebar(vec![sidebar_video("fine"), more]));
        let set = blocks(&["PewDiePie"]);
        let settings = Settings::default();

        Matcher::new(&set, &settings).scan(&root);

        assert!(hidden_inside.has_class(BLOCKED_CLASS));
    }

    #[test]
    fn test_truncated_sidebar_is_ignored() {
        let root = FakeNode::new("body").with_child(FakeNode::new("div").class("watch-sidebar").with_child(FakeNode::new("div")));
        let set = blocks(&["anyone"]);
        let settings = Settings::default();

        let report = Matcher::new(&set, &settings).scan(&root);

        assert!(report.hidden.is_empty());
    }
}
