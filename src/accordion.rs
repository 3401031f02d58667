//! Project "tech stack" accordion

/// Open/closed state of the project detail panels. At most one is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accordion {
    open: Option<usize>,
    len: usize,
}

impl Accordion {
    /// The first panel starts open
    pub fn new(len: usize) -> Self {
        Accordion {
            open: if len > 0 { Some(0) } else { None },
            len,
        }
    }

    /// Close every panel, then open `idx` unless it was the open one.
    ///
    /// Returns whether `idx` is open afterwards.
    pub fn toggle(&mut self, idx: usize) -> bool {
        if idx >= self.len {
            return false;
        }

        let was_open = self.open == Some(idx);
        self.open = if was_open { None } else { Some(idx) };
        tracing::debug!(
            "Accordion {} {}",
            idx,
            if was_open { "closed" } else { "opened" }
        );
        !was_open
    }

    pub fn close_all(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self, idx: usize) -> bool {
        self.open == Some(idx)
    }

    /// The emphasized button is the one whose panel is open
    pub fn is_emphasized(&self, idx: usize) -> bool {
        self.is_open(idx)
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_panel_open_by_default() {
        let accordion = Accordion::new(3);
        assert!(accordion.is_open(0));
        assert_eq!(Accordion::new(0).open_index(), None);
    }

    #[test]
    fn test_toggle_opens_one_and_closes_others() {
        let mut accordion = Accordion::new(3);
        assert!(accordion.toggle(2));
        assert!(!accordion.is_open(0));
        assert!(accordion.is_open(2));
        assert!(accordion.is_emphasized(2));
        assert!(!accordion.is_emphasized(0));
    }

    #[test]
    fn test_toggle_open_panel_closes_it() {
        let mut accordion = Accordion::new(3);
        assert!(!accordion.toggle(0));
        assert_eq!(accordion.open_index(), None);
    }

    #[test]
    fn test_close_all_and_out_of_range() {
        let mut accordion = Accordion::new(2);
        accordion.close_all();
        assert_eq!(accordion.open_index(), None);
        assert!(!accordion.toggle(5));
        assert_eq!(accordion.open_index(), None);
    }
}
