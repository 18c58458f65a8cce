/// The address the user is looking at, as a browser would expose it.
pub trait Location: Send {
    fn href(&self) -> String;

    /// Rewrites the current address without adding a history entry.
    fn replace(&mut self, href: &str);

    /// Navigates away, adding a history entry.
    fn assign(&mut self, href: &str);
}

pub type LocationBox = Box<dyn Location>;
