use courier_message::{Document, SlotId};
use courier_tree::TreeView;

/// A document seen as a navigable tree
///
/// The document root is the single top-level node. A component's tree
/// children are its `children` followed by its accessory.
#[derive(Debug, Clone, Copy)]
pub struct DocumentOutline<'a> {
    document: &'a Document,
}

impl<'a> DocumentOutline<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }
}

impl TreeView for DocumentOutline<'_> {
    type Id = SlotId;

    fn roots(&self) -> Vec<SlotId> {
        vec![self.document.root_id().clone()]
    }

    fn children(&self, id: &SlotId) -> Vec<SlotId> {
        self.document
            .find(id)
            .map(|component| component.nested().map(|child| child.id.clone()).collect())
            .unwrap_or_default()
    }

    fn parent(&self, id: &SlotId) -> Option<SlotId> {
        self.document.parent_of(id).map(|parent| parent.id.clone())
    }
}
