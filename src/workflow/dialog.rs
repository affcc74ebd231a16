use serde::Serialize;

/// A dialog's visibility and the draft it edits.
///
/// Closing always resets the draft, whatever the outcome of the action.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct DialogState<D> {
    visible: bool,
    draft: D,
}

impl<D: Default> DialogState<D> {
    pub fn open(&mut self) {
        self.visible = true;
    }

    /// Opens the dialog pre-filled with `draft`.
    pub fn open_with(&mut self, draft: D) {
        self.draft = draft;
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.draft = D::default();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_resets_the_draft() {
        let mut dialog = DialogState::<String>::default();
        dialog.open_with("draft".into());
        assert!(dialog.is_visible());
        dialog.draft_mut().push('!');
        assert_eq!(dialog.draft(), "draft!");

        dialog.close();
        assert!(!dialog.is_visible());
        assert!(dialog.draft().is_empty());
    }
}
