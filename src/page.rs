/// The slice of the DOM the matcher walks
use web_sys::{Element, HtmlCollection};

/// Read access to an element plus the one mutation the matcher needs.
///
/// Lookups return empty collections or `None` rather than failing, so a
/// layout that changed under us degrades to "nothing matched".
pub trait PageNode: Clone {
    /// Upper-case tag name, e.g. "LI"
    fn node_name(&self) -> String;
    fn id(&self) -> String;
    fn children(&self) -> Vec<Self>;
    /// Descendants with the class, excluding `self`
    fn descendants_by_class(&self, class: &str) -> Vec<Self>;
    /// Descendants with the tag, excluding `self`; "*" matches all
    fn descendants_by_tag(&self, tag: &str) -> Vec<Self>;
    fn has_class(&self, class: &str) -> bool;
    fn attr(&self, name: &str) -> Option<String>;
    fn text(&self) -> String;
    fn add_class(&self, class: &str);

    fn child(&self, index: usize) -> Option<Self> {
        self.children().into_iter().nth(index)
    }

    fn first_by_class(&self, class: &str) -> Option<Self> {
        self.descendants_by_class(class).into_iter().next()
    }

    fn first_by_tag(&self, tag: &str) -> Option<Self> {
        self.descendants_by_tag(tag).into_iter().next()
    }

    /// `data-*` attribute, the equivalent of `dataset[key]`
    fn data(&self, key: &str) -> Option<String> {
        self.attr(&format!("data-{}", key))
    }

    fn find_by_id(&self, id: &str) -> Option<Self> {
        self.descendants_by_tag("*").into_iter().find(|node| node.id() == id)
    }
}

fn collect(collection: HtmlCollection) -> Vec<Element> {
    (0..collection.length()).filter_map(|i| collection.item(i)).collect()
}

impl PageNode for Element {
    fn node_name(&self) -> String {
        self.tag_name().to_uppercase()
    }

    fn id(&self) -> String {
        Element::id(self)
    }

    fn children(&self) -> Vec<Self> {
        collect(Element::children(self))
    }

    fn descendants_by_class(&self, class: &str) -> Vec<Self> {
        collect(self.get_elements_by_class_name(class))
    }

    fn descendants_by_tag(&self, tag: &str) -> Vec<Self> {
        collect(self.get_elements_by_tag_name(tag))
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn text(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn add_class(&self, class: &str) {
        if let Err(e) = self.class_list().add_1(class) {
            log::warn!("Failed to add class {}: {:?}", class, e);
        }
    }
}
