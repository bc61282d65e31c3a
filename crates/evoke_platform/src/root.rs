//! Style root abstraction
//!
//! A style root is the element whose inline custom properties, classes and
//! attributes carry the active theme (`<html>` in a browser).

use std::cell::{Cell, RefCell};

use indexmap::IndexMap;

use crate::error::{PlatformError, Result};

/// Element that receives theme CSS variables
pub trait StyleRoot {
    /// Set an inline style property (custom properties included)
    fn set_property(&self, name: &str, value: &str) -> Result<()>;

    /// Current inline value of a property
    fn property(&self, name: &str) -> Option<String>;

    /// Remove an inline style property
    fn remove_property(&self, name: &str) -> Result<()>;

    /// Names of all inline style properties, in declaration order
    fn property_names(&self) -> Vec<String>;

    fn add_class(&self, class: &str) -> Result<()>;

    fn remove_class(&self, class: &str) -> Result<()>;

    fn has_class(&self, class: &str) -> bool;

    fn set_attribute(&self, name: &str, value: &str) -> Result<()>;

    fn remove_attribute(&self, name: &str) -> Result<()>;

    fn attribute(&self, name: &str) -> Option<String>;
}

/// In-memory style root for headless rendering and tests
#[derive(Debug, Default)]
pub struct MemoryRoot {
    properties: RefCell<IndexMap<String, String>>,
    classes: RefCell<Vec<String>>,
    attributes: RefCell<IndexMap<String, String>>,
    read_only: Cell<bool>,
}

impl MemoryRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, simulating a detached or locked root
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    /// Snapshot of all inline properties
    pub fn properties(&self) -> IndexMap<String, String> {
        self.properties.borrow().clone()
    }

    /// Snapshot of the class list
    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().clone()
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only.get() {
            Err(PlatformError::Style("style root is read-only".to_string()))
        } else {
            Ok(())
        }
    }
}

impl StyleRoot for MemoryRoot {
    fn set_property(&self, name: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.properties
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn property(&self, name: &str) -> Option<String> {
        self.properties.borrow().get(name).cloned()
    }

    fn remove_property(&self, name: &str) -> Result<()> {
        self.check_writable()?;
        self.properties.borrow_mut().shift_remove(name);
        Ok(())
    }

    fn property_names(&self) -> Vec<String> {
        self.properties.borrow().keys().cloned().collect()
    }

    fn add_class(&self, class: &str) -> Result<()> {
        self.check_writable()?;
        let mut classes = self.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&self, class: &str) -> Result<()> {
        self.check_writable()?;
        self.classes.borrow_mut().retain(|c| c != class);
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&self, name: &str) -> Result<()> {
        self.check_writable()?;
        self.attributes.borrow_mut().shift_remove(name);
        Ok(())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_keep_declaration_order() {
        let root = MemoryRoot::new();
        root.set_property("--ui-b", "2").unwrap();
        root.set_property("--ui-a", "1").unwrap();
        root.set_property("--ui-b", "3").unwrap();
        assert_eq!(root.property_names(), vec!["--ui-b", "--ui-a"]);
        assert_eq!(root.property("--ui-b").as_deref(), Some("3"));

        root.remove_property("--ui-b").unwrap();
        assert_eq!(root.property_names(), vec!["--ui-a"]);
    }

    #[test]
    fn test_classes_are_a_set() {
        let root = MemoryRoot::new();
        root.add_class("dark").unwrap();
        root.add_class("dark").unwrap();
        assert_eq!(root.classes(), vec!["dark"]);
        root.remove_class("dark").unwrap();
        assert!(!root.has_class("dark"));
    }

    #[test]
    fn test_read_only_root_rejects_writes() {
        let root = MemoryRoot::new();
        root.set_attribute("data-theme", "light").unwrap();
        root.set_read_only(true);
        assert!(root.set_property("--ui-x", "1").is_err());
        assert!(root.remove_attribute("data-theme").is_err());
        assert_eq!(root.attribute("data-theme").as_deref(), Some("light"));
    }
}
