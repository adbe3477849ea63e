//! DOM and navigation seams.
//!
//! Every lookup is by element id and is a no-op when the element is absent;
//! the boolean results report whether the element was found.

pub trait Page {
    /// Replace the inner markup of `id`.
    fn set_inner_html(&self, id: &str, html: &str) -> bool;

    /// Remove the `hidden` attribute from `id`.
    fn reveal(&self, id: &str) -> bool;

    /// Attach `handler` as a click listener on `id`. The default action is
    /// suppressed.
    fn on_click(&self, id: &str, handler: Box<dyn Fn()>) -> bool;
}

pub trait Navigator {
    fn navigate(&self, path: &str);
}
