//! Id-addressed mutation of embedded lists.
//!
//! Lookups and updates act on the first element with a matching id; removal
//! drops every element with that id.

use crate::database::models::{ListItem, Patch};

pub fn append<T: ListItem + Clone>(list: &mut Vec<T>, item: T) -> T {
    list.push(item.clone());
    item
}

pub fn find_by_id<'a, T: ListItem>(list: &'a [T], id: &str) -> Option<&'a T> {
    list.iter().find(|item| item.id() == id)
}

pub fn find_by_id_mut<'a, T: ListItem>(list: &'a mut [T], id: &str) -> Option<&'a mut T> {
    list.iter_mut().find(|item| item.id() == id)
}

/// Apply `patch` to the first item with `id`, stamp it, and return a copy
pub fn update_by_id<T, P>(list: &mut [T], id: &str, patch: P) -> Option<T>
where
    T: ListItem + Clone,
    P: Patch<T>,
{
    let item = find_by_id_mut(list, id)?;
    patch.apply_to(item);
    item.touch();
    Some(item.clone())
}

/// Remove every item with `id`. Returns how many were removed.
pub fn remove_by_id<T: ListItem>(list: &mut Vec<T>, id: &str) -> usize {
    let before = list.len();
    list.retain(|item| item.id() != id);
    before - list.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        value: u32,
        touched: bool,
    }

    impl ListItem for Row {
        fn id(&self) -> &str {
            &self.id
        }

        fn touch(&mut self) {
            self.touched = true;
        }
    }

    struct SetValue(u32);

    impl Patch<Row> for SetValue {
        fn apply_to(self, target: &mut Row) {
            target.value = self.0;
        }
    }

    fn row(id: &str, value: u32) -> Row {
        Row { id: id.to_string(), value, touched: false }
    }

    #[test]
    fn update_hits_first_duplicate_only() {
        let mut list = vec![row("a", 1), row("dup", 2), row("dup", 3)];
        let updated = update_by_id(&mut list, "dup", SetValue(9)).unwrap();

        assert_eq!(updated.value, 9);
        assert!(updated.touched);
        assert_eq!(list[1].value, 9);
        assert_eq!(list[2].value, 3);
    }

    #[test]
    fn remove_drops_all_duplicates() {
        let mut list = vec![row("dup", 1), row("a", 2), row("dup", 3)];
        assert_eq!(remove_by_id(&mut list, "dup"), 2);
        assert_eq!(list, vec![row("a", 2)]);
    }

    #[test]
    fn missing_ids() {
        let mut list = vec![row("a", 1)];
        assert!(update_by_id(&mut list, "zzz", SetValue(5)).is_none());
        assert_eq!(remove_by_id(&mut list, "zzz"), 0);
        assert_eq!(list, vec![row("a", 1)]);
        assert!(find_by_id(&list, "zzz").is_none());
    }

    #[test]
    fn append_initializes_and_returns_item() {
        let mut list: Vec<Row> = Vec::new();
        let added = append(&mut list, row("n", 0));
        assert_eq!(added, list[0]);
    }
}
