use std::fmt;

use crate::MountError;

/// A page with named elements that views can be mounted into.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HostDocument {
    elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq)]
struct Element {
    id: String,
    content: Option<String>,
}

impl HostDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty element.
    #[must_use]
    pub fn with_element(mut self, id: impl Into<String>) -> Self {
        self.elements.push(Element {
            id: id.into(),
            content: None,
        });
        self
    }

    /// The content mounted into `id`, if any.
    pub fn content(&self, id: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.content.as_deref())
    }

    /// Fails unless `id` exists and nothing has been mounted into it.
    pub(crate) fn ensure_vacant(&self, id: &str) -> Result<(), MountError> {
        let element = self
            .element(id)
            .ok_or_else(|| MountError::ElementNotFound(id.to_owned()))?;

        if element.content.is_some() {
            return Err(MountError::AlreadyMounted(id.to_owned()));
        }

        Ok(())
    }

    /// Mounts `content` into `id`. An element is filled exactly once.
    pub(crate) fn fill(&mut self, id: &str, content: String) -> Result<(), MountError> {
        self.ensure_vacant(id)?;
        self.replace(id, content)
    }

    /// Re-renders an element in place.
    pub(crate) fn replace(&mut self, id: &str, content: String) -> Result<(), MountError> {
        let element = self
            .elements
            .iter_mut()
            .find(|element| element.id == id)
            .ok_or_else(|| MountError::ElementNotFound(id.to_owned()))?;

        element.content = Some(content);

        Ok(())
    }

    fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.id == id)
    }
}

impl fmt::Display for HostDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            writeln!(f, "<div id=\"{}\">", element.id)?;

            if let Some(content) = &element.content {
                f.write_str(content)?;
            }

            writeln!(f, "</div>")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_once() {
        let mut document = HostDocument::new().with_element("container");

        document.fill("container", "hello\n".into()).unwrap();

        assert_eq!(document.content("container"), Some("hello\n"));
        assert!(matches!(
            document.fill("container", "again\n".into()),
            Err(MountError::AlreadyMounted(id)) if id == "container"
        ));
        assert_eq!(document.to_string(), "<div id=\"container\">\nhello\n</div>\n");
    }

    #[test]
    fn unknown_element() {
        let mut document = HostDocument::new().with_element("container");

        assert!(matches!(
            document.fill("root", String::new()),
            Err(MountError::ElementNotFound(id)) if id == "root"
        ));
        assert_eq!(document.content("container"), None);
    }
}
