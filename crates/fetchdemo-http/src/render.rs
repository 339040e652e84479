use fetchdemo_core::{Error, Result, User};
use std::fmt::Write as _;
use tracing::debug;

/// Id of the list that receives the fetched users.
pub const USER_LIST_ID: &str = "userList";
/// Heading shown on the default page.
pub const DEFAULT_HEADING: &str = "Fetch API demo";

/// An unordered list element that items are appended to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListContainer {
    /// Element id used for lookups.
    id: String,
    /// Text of every appended item, in insertion order.
    items: Vec<String>,
}

impl ListContainer {
    /// Creates an empty list with the given id.
    pub fn new<T: Into<String>>(id: T) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
        }
    }

    /// Element id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Appended item texts.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends one item.
    pub fn append<T: Into<String>>(&mut self, text: T) {
        self.items.push(text.into());
    }

    /// Renders the list as `<ul>` markup with escaped item text.
    pub fn to_html(&self) -> String {
        let mut html = format!("<ul id=\"{}\">\n", escape_html(&self.id));
        for item in &self.items {
            // Writing to a String cannot fail.
            let _ignored = writeln!(html, "  <li>{}</li>", escape_html(item));
        }
        html.push_str("</ul>");
        html
    }
}

/// The page the demo renders into: a heading and lists addressed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Text of the `<h1>` element.
    heading: String,
    /// List elements on the page.
    containers: Vec<ListContainer>,
}

impl Page {
    /// Creates a page with a heading and no lists.
    pub fn new<T: Into<String>>(heading: T) -> Self {
        Self {
            heading: heading.into(),
            containers: Vec::new(),
        }
    }

    /// Adds an empty list with the given id.
    #[must_use]
    pub fn with_container<T: Into<String>>(mut self, id: T) -> Self {
        self.containers.push(ListContainer::new(id));
        self
    }

    /// Heading text.
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Looks up a list by id.
    pub fn container(&self, id: &str) -> Option<&ListContainer> {
        self.containers.iter().find(|container| container.id == id)
    }

    /// Looks up a list by id for appending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingElement`] if no list has that id.
    pub fn container_mut(&mut self, id: &str) -> Result<&mut ListContainer> {
        self.containers
            .iter_mut()
            .find(|container| container.id == id)
            .ok_or_else(|| Error::MissingElement(id.to_owned()))
    }

    /// Renders the heading followed by every list.
    pub fn to_html(&self) -> String {
        let mut html = format!("<h1>{}</h1>", escape_html(&self.heading));
        for container in &self.containers {
            html.push('\n');
            html.push_str(&container.to_html());
        }
        html
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_HEADING).with_container(USER_LIST_ID)
    }
}

/// Appends one `<name> - <email>` item per user to the list `container_id`.
///
/// Returns the number of items appended.
///
/// # Errors
///
/// Returns [`Error::MissingElement`] if the page has no such list.
pub fn render_users(page: &mut Page, container_id: &str, users: &[User]) -> Result<usize> {
    let container = page.container_mut(container_id)?;
    for user in users {
        container.append(user.display_line());
    }
    debug!("Rendered {} users into #{container_id}", users.len());
    Ok(users.len())
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
