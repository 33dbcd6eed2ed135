use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

/// A single-threaded reactive value container.
///
/// Subscribers are invoked synchronously, in subscription order, every time
/// the value is replaced (even with an equal value). A new subscriber is
/// invoked immediately with the current value, so late subscribers still see
/// state. Cloning an `Observable` clones the handle, not the value: all
/// clones share one slot and one subscriber list.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

struct Inner<T> {
    value: T,
    listeners: Vec<(u64, Listener<T>)>,
    next_listener_id: u64,
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
        }
    }

    /// Returns a clone of the current value. No side effects.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Replaces the value, then notifies every subscriber with the new value.
    ///
    /// No borrow is held while listeners run, so a listener may read from or
    /// write back into this container.
    pub fn set(&self, value: T) {
        let (snapshot, listeners) = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            let listeners: Vec<Listener<T>> =
                inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
            (inner.value.clone(), listeners)
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Equivalent to `set(f(get()))`.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let next = f(self.get());
        self.set(next);
    }

    /// Registers `listener` and immediately invokes it once with the current
    /// value. The returned handle deregisters it; dropping the handle without
    /// calling [`Subscription::unsubscribe`] leaves the listener registered
    /// for the lifetime of the container.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription<T> {
        let listener: Listener<T> = Rc::new(listener);
        let (id, snapshot) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, Rc::clone(&listener)));
            (id, inner.value.clone())
        };
        listener(&snapshot);
        Subscription {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Handle returned by [`Observable::subscribe`]. Deregistration is explicit;
/// there is no `Drop` glue.
pub struct Subscription<T> {
    id: u64,
    inner: Weak<RefCell<Inner<T>>>,
}

impl<T> Subscription<T> {
    /// Deregisters the listener this handle was created for.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
