/// In-progress, unsubmitted name/wish pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishDraft {
    pub name: String,
    pub wish: String,
}

impl WishDraft {
    pub fn new(name: impl Into<String>, wish: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wish: wish.into(),
        }
    }

    /// Trimmed `(name, wish)` when both are non-empty.
    pub fn validated(&self) -> Option<(&str, &str)> {
        let name = self.name.trim();
        let wish = self.wish.trim();
        if name.is_empty() || wish.is_empty() {
            None
        } else {
            Some((name, wish))
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.wish.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.wish.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_trims_both_fields() {
        let draft = WishDraft::new("  Maria ", "\tgood health\n");
        assert_eq!(draft.validated(), Some(("Maria", "good health")));
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(WishDraft::new("", "wish").validated(), None);
        assert_eq!(WishDraft::new("name", "   ").validated(), None);
        assert_eq!(WishDraft::new(" \n", "\t").validated(), None);
    }
}
