use crate::{err, Result, Scan, Value};

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

/// A value allocated by a bind phase and filled in by the following scan.
///
/// The [`Row`](crate::Row) only ever holds weak targets into a slot, so once
/// the row has been scanned the slot's owner can take the value out.
pub struct Slot<T> {
    cell: Rc<RefCell<T>>,
}

impl<T: 'static> Slot<T> {
    pub fn new(value: T) -> Slot<T> {
        Slot {
            cell: Rc::new(RefCell::new(value)),
        }
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.cell.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.cell.borrow_mut()
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<T>> {
        Rc::downgrade(&self.cell)
    }

    /// Takes the value out. Fails if the slot was cloned.
    pub fn into_inner(self) -> Result<T> {
        Rc::try_unwrap(self.cell)
            .map(RefCell::into_inner)
            .map_err(|_| err!("slot is still shared"))
    }
}

impl<T: Scan + 'static> Slot<T> {
    /// A scan target writing into this slot.
    pub fn target(&self) -> SlotTarget<T> {
        SlotTarget {
            cell: self.downgrade(),
        }
    }
}

impl<T: Default + 'static> Default for Slot<T> {
    fn default() -> Slot<T> {
        Slot::new(T::default())
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Slot<T> {
        Slot {
            cell: self.cell.clone(),
        }
    }
}

/// Weak scan target into a [`Slot`].
pub struct SlotTarget<T> {
    cell: Weak<RefCell<T>>,
}

impl<T: Scan> Scan for SlotTarget<T> {
    fn scan(&mut self, value: Value) -> Result<()> {
        let cell = self
            .cell
            .upgrade()
            .ok_or_else(|| err!("scan target outlived its slot"))?;
        let mut dest = cell.borrow_mut();
        dest.scan(value)
    }
}

/// Opaque state handed from a bind phase to its materialize phase.
pub struct Link(Box<dyn Any>);

impl Link {
    pub fn new<T: 'static>(value: T) -> Link {
        Link(Box::new(value))
    }

    /// A link carrying nothing.
    pub fn none() -> Link {
        Link::new(())
    }

    pub fn is<T: 'static>(&self) -> bool {
        self.0.is::<T>()
    }

    pub fn downcast<T: 'static>(self) -> Result<T> {
        self.0
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| err!("link does not hold a `{}`", std::any::type_name::<T>()))
    }
}

impl core::fmt::Debug for Link {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("Link(..)")
    }
}
