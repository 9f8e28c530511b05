//! Row projections
//!
//! A row is the table-facing projection of one domain object: the thing
//! itself plus the display fields the table shows (name, container name,
//! write permission). Each tracked thing type maps to exactly one row type
//! through [`Row::from_item`], an explicit factory function per type instead
//! of a reflective constructor lookup.

use cdm_model::Thing;

/// A table row projecting one domain object
pub trait Row: Send + Sync + 'static {
    /// The projected thing type
    type Item: Thing + Clone + Send + Sync + 'static;

    /// Project a thing into a fresh row
    ///
    /// This is the per-type factory: the table never constructs rows any
    /// other way.
    fn from_item(item: &Self::Item) -> Self;

    /// The projected thing
    fn item(&self) -> &Self::Item;

    /// Display name, captured at projection time
    fn name(&self) -> &str;

    /// Display name of the direct container
    fn container_name(&self) -> &str;

    /// Update the displayed container name
    fn set_container_name(&mut self, name: &str);

    /// Whether the current user may write this row's thing
    fn is_allowed_to_write(&self) -> bool;

    /// Set the write-permission flag
    fn set_allowed_to_write(&mut self, allowed: bool);
}

/// Ready-made row for plain data items
///
/// Projects the thing's user-friendly name; the container name starts empty
/// and is filled by container-name refreshes.
#[derive(Debug, Clone)]
pub struct DataItemRow<T> {
    item: T,
    name: String,
    container_name: String,
    allowed_to_write: bool,
}

impl<T: Thing + Clone + Send + Sync + 'static> Row for DataItemRow<T> {
    type Item = T;

    fn from_item(item: &T) -> Self {
        Self {
            item: item.clone(),
            name: item.user_friendly_name().to_string(),
            container_name: String::new(),
            allowed_to_write: false,
        }
    }

    fn item(&self) -> &T {
        &self.item
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn container_name(&self) -> &str {
        &self.container_name
    }

    fn set_container_name(&mut self, name: &str) {
        self.container_name = name.to_string();
    }

    fn is_allowed_to_write(&self) -> bool {
        self.allowed_to_write
    }

    fn set_allowed_to_write(&mut self, allowed: bool) {
        self.allowed_to_write = allowed;
    }
}
