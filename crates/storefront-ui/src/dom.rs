//! Minimal retained element tree standing in for the page DOM.
//!
//! An [`Element`] is a shared handle; clones refer to the same node. Only
//! single-class selectors (`.name`) are understood by [`Element::query_selector`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type ClickListener = Rc<dyn Fn()>;

#[derive(Clone)]
pub struct Element {
    node: Rc<RefCell<Node>>,
}

struct Node {
    tag: String,
    classes: Vec<String>,
    text: String,
    children: Vec<Element>,
    click_listeners: Vec<ClickListener>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            node: Rc::new(RefCell::new(Node {
                tag: tag.to_string(),
                classes: Vec::new(),
                text: String::new(),
                children: Vec::new(),
                click_listeners: Vec::new(),
            })),
        }
    }

    pub fn with_class(self, class: &str) -> Self {
        self.node.borrow_mut().classes.push(class.to_string());
        self
    }

    pub fn with_child(self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    pub fn tag(&self) -> String {
        self.node.borrow().tag.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.node.borrow().classes.iter().any(|c| c == class)
    }

    pub fn text_content(&self) -> String {
        self.node.borrow().text.clone()
    }

    pub fn set_text_content(&self, text: &str) {
        self.node.borrow_mut().text = text.to_string();
    }

    pub fn append_child(&self, child: Element) {
        self.node.borrow_mut().children.push(child);
    }

    pub fn children(&self) -> Vec<Element> {
        self.node.borrow().children.clone()
    }

    pub fn replace_children(&self, children: Vec<Element>) {
        self.node.borrow_mut().children = children;
    }

    /// First descendant (depth-first, document order) matching `.class`.
    pub fn query_selector(&self, selector: &str) -> Option<Element> {
        let class = selector.strip_prefix('.')?;
        self.children().into_iter().find_map(|child| {
            if child.has_class(class) {
                Some(child)
            } else {
                child.query_selector(selector)
            }
        })
    }

    pub fn add_click_listener<F>(&self, listener: F)
    where
        F: Fn() + 'static,
    {
        self.node.borrow_mut().click_listeners.push(Rc::new(listener));
    }

    /// Runs the click listeners in registration order.
    pub fn click(&self) {
        let listeners = self.node.borrow().click_listeners.clone();
        for listener in listeners {
            listener();
        }
    }

    /// Copies structure, classes and text. Listeners are not copied.
    pub fn deep_clone(&self) -> Element {
        let node = self.node.borrow();
        let copy = Element::new(&node.tag);
        {
            let mut target = copy.node.borrow_mut();
            target.classes = node.classes.clone();
            target.text = node.text.clone();
            target.children = node.children.iter().map(Element::deep_clone).collect();
        }
        copy
    }

    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node.borrow();
        f.debug_struct("Element")
            .field("tag", &node.tag)
            .field("classes", &node.classes)
            .field("text", &node.text)
            .field("children", &node.children)
            .finish()
    }
}
