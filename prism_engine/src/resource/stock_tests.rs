//! Unit tests for stock.rs

use super::*;
use std::cell::Cell;

/// Resource that counts its drops
struct Tracked<'a> {
    id: u32,
    drops: &'a Cell<u32>,
}

impl Drop for Tracked<'_> {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

#[test]
fn test_add_and_find() {
    let mut stock = ResourceStock::new();
    stock.add("a", 1u32).add("b", 2u32);

    assert_eq!(stock.len(), 2);
    assert_eq!(*stock.find("a").unwrap(), 1);
    assert_eq!(*stock.find("b").unwrap(), 2);
    assert!(stock.find("c").is_none());
    assert!(stock.contains("a"));
}

#[test]
fn test_add_replaces_existing_entry() {
    let drops = Cell::new(0);
    let mut stock = ResourceStock::new();
    stock.add("x", Tracked { id: 1, drops: &drops });
    stock.add("x", Tracked { id: 2, drops: &drops });

    assert_eq!(stock.len(), 1);
    assert_eq!(stock.find("x").unwrap().id, 2);
    assert_eq!(drops.get(), 1);
}

#[test]
fn test_insert_returns_shared_handle() {
    let mut stock = ResourceStock::new();
    let handle = stock.insert("tex", String::from("pixels"));
    assert!(Rc::ptr_eq(&handle, &stock.find("tex").unwrap()));
}

#[test]
fn test_remove_and_clear() {
    let mut stock = ResourceStock::new();
    stock.add("a", 1).add("b", 2).add("c", 3);

    assert_eq!(stock.remove("b").map(|r| *r), Some(2));
    assert!(stock.remove("b").is_none());
    assert_eq!(stock.len(), 2);

    stock.clear();
    assert!(stock.is_empty());
}

#[test]
fn test_names_are_sorted() {
    let mut stock = ResourceStock::new();
    stock.add("zeta", ()).add("alpha", ()).add("mid", ());
    assert_eq!(stock.names(), vec!["alpha", "mid", "zeta"]);
    assert_eq!(stock.iter().count(), 3);
}

#[test]
fn test_drop_releases_entries() {
    let drops = Cell::new(0);
    {
        let mut stock = ResourceStock::new();
        stock.add("a", Tracked { id: 1, drops: &drops });
        stock.add("b", Tracked { id: 2, drops: &drops });
    }
    assert_eq!(drops.get(), 2);
}

#[test]
fn test_outstanding_handle_outlives_stock() {
    let drops = Cell::new(0);
    let handle = {
        let mut stock = ResourceStock::new();
        stock.insert("a", Tracked { id: 7, drops: &drops })
    };
    assert_eq!(drops.get(), 0);
    assert_eq!(handle.id, 7);
    drop(handle);
    assert_eq!(drops.get(), 1);
}
