//! # Builder Session
//!
//! One open message builder: the document being edited, the outline's
//! focus/selection/expansion, the current problems and the preview article.
//!
//! ```text
//! keyboard ──► TreeInteractionState ──► Activate / Escape to the host
//! edits    ──► Mutation::apply ──► document + selection hint ──► validate
//! preview  ──► PreviewState / resolution warnings
//! save     ──► problems gate ──► ConnectionDetails
//! ```
//!
//! Edits that name a component which no longer exists are dropped quietly:
//! a properties panel may commit after its component was deleted.

use courier_message::{
    details_from_document, document_from_details, extract_resolution_warnings, validate_document,
    ComponentKind, ComponentType, ConnectionDetails, Document, Mutation, MutationError, Problem,
    RootSettings, RootType, Severity, SlotId,
};
use courier_tree::{Key, KeyResponse, NodeView, TreeInteractionState};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{BuilderError, BuilderOptions, DocumentOutline, FetchError, PreviewArticle, PreviewState};

pub struct BuilderSession {
    /// Document being edited
    document: Document,

    /// Last loaded or saved document; `reset_message` returns here
    baseline: Document,

    tree: TreeInteractionState<SlotId>,

    /// Validation problems for `document`
    problems: Vec<Problem>,

    /// Placeholder warnings from the last resolved preview
    resolution_warnings: Vec<Problem>,

    preview: PreviewState,

    options: BuilderOptions,
}

impl BuilderSession {
    pub fn new(document: Document, options: BuilderOptions) -> Self {
        let tree = TreeInteractionState::new().with_expanded([document.root_id().clone()]);

        let mut session = Self {
            baseline: document.clone(),
            document,
            tree,
            problems: Vec::new(),
            resolution_warnings: Vec::new(),
            preview: PreviewState::new(),
            options,
        };

        session.revalidate();
        session
    }

    /// Open a session on a stored payload
    pub fn from_details(details: &ConnectionDetails, options: BuilderOptions) -> Self {
        Self::new(document_from_details(details), options)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    pub fn tree_state(&self) -> &TreeInteractionState<SlotId> {
        &self.tree
    }

    pub fn outline(&self) -> DocumentOutline<'_> {
        DocumentOutline::new(&self.document)
    }

    pub fn selected_id(&self) -> Option<&SlotId> {
        self.tree.selected_id()
    }

    pub fn node_view(&self, id: &SlotId) -> NodeView {
        self.tree.node_view(&self.outline(), id)
    }

    pub fn is_dirty(&self) -> bool {
        self.document != self.baseline
    }

    /// Validation problems followed by placeholder warnings
    pub fn problems(&self) -> Vec<&Problem> {
        self.problems
            .iter()
            .chain(self.resolution_warnings.iter())
            .collect()
    }

    /// Run validation now, regardless of `validate_on_change`
    pub fn validate(&mut self) -> Vec<&Problem> {
        self.problems = validate_document(&self.document);
        self.problems()
    }

    /// Apply one structural edit
    ///
    /// Stale ids and refused shapes leave the session untouched and return
    /// `Ok`; only contract violations are reported as errors.
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), BuilderError> {
        let outcome = match mutation.apply(&self.document) {
            Ok(outcome) => outcome,
            Err(err) => return self.recover(&mutation, err),
        };

        let root_switched = matches!(mutation, Mutation::SwitchRootType { .. })
            && outcome.document.root_id() != self.document.root_id();

        self.document = outcome.document;

        if root_switched {
            self.tree = TreeInteractionState::new();
            self.tree.reset_expanded([self.document.root_id().clone()]);
        } else if self.options.expand_created_components {
            self.tree.expand_all(outcome.expand);
        }

        if let Some(id) = outcome.select {
            self.follow(id);
        }

        self.drop_stale_state();
        self.revalidate();

        Ok(())
    }

    fn recover(&self, mutation: &Mutation, err: MutationError) -> Result<(), BuilderError> {
        match err {
            MutationError::NodeNotFound(_) | MutationError::ParentNotFound(_) => {
                debug!(?mutation, error = %err, "ignored edit for stale component");
                Ok(())
            }
            MutationError::InvalidStructure(_) | MutationError::CannotDeleteRoot => {
                debug!(?mutation, error = %err, "ignored edit");
                Ok(())
            }
            MutationError::RootNotInsertable(_) => {
                error!(?mutation, error = %err, "rejected edit");
                Err(err.into())
            }
        }
    }

    pub fn add_child(
        &mut self,
        parent_id: &SlotId,
        child_type: ComponentType,
        as_accessory: bool,
    ) -> Result<(), BuilderError> {
        self.apply(Mutation::AddChild {
            parent_id: parent_id.clone(),
            child_type,
            as_accessory,
        })
    }

    pub fn delete(&mut self, target_id: &SlotId) -> Result<(), BuilderError> {
        self.apply(Mutation::Delete {
            target_id: target_id.clone(),
        })
    }

    pub fn move_up(&mut self, target_id: &SlotId) -> Result<(), BuilderError> {
        self.apply(Mutation::MoveUp {
            target_id: target_id.clone(),
        })
    }

    pub fn move_down(&mut self, target_id: &SlotId) -> Result<(), BuilderError> {
        self.apply(Mutation::MoveDown {
            target_id: target_id.clone(),
        })
    }

    pub fn switch_root_type(&mut self, root_type: RootType) -> Result<(), BuilderError> {
        self.apply(Mutation::SwitchRootType { root_type })
    }

    pub fn update(&mut self, target_id: &SlotId, kind: ComponentKind) -> Result<(), BuilderError> {
        self.apply(Mutation::Update {
            target_id: target_id.clone(),
            kind,
        })
    }

    /// Update the selected component; no-op without a selection
    pub fn update_selected(&mut self, kind: ComponentKind) -> Result<(), BuilderError> {
        match self.tree.selected_id().cloned() {
            Some(id) => self.update(&id, kind),
            None => Ok(()),
        }
    }

    pub fn update_settings(&mut self, edit: impl FnOnce(&mut RootSettings)) {
        edit(&mut self.document.settings);
        self.revalidate();
    }

    /// Select `id` and expand everything above it, e.g. to jump to a problem
    ///
    /// Returns `false` for ids that are not in the document.
    pub fn navigate_to_component(&mut self, id: &SlotId) -> bool {
        let Some(ancestors) = self.document.ancestor_ids(id) else {
            debug!(component_id = %id, "navigate to missing component");
            return false;
        };

        self.tree.expand_all(ancestors);
        self.tree.select(id.clone());
        true
    }

    /// Run one key press through the outline
    pub fn handle_key(&mut self, key: Key) -> KeyResponse<SlotId> {
        let tree = std::mem::take(&mut self.tree);
        let (tree, response) = tree.handle_key(&DocumentOutline::new(&self.document), key);
        self.tree = tree;
        response
    }

    pub fn focus(&mut self, id: &SlotId) {
        if self.document.contains(id) {
            self.tree.focus(id.clone());
        }
    }

    pub fn blur(&mut self) {
        self.tree.blur();
    }

    /// Throw away unsaved edits
    pub fn reset_message(&mut self) {
        self.document = self.baseline.clone();
        self.resolution_warnings.clear();
        self.drop_stale_state();
        self.revalidate();
        info!("message reset");
    }

    /// Produce the payload to store, unless blocking problems remain
    ///
    /// Validation always runs here, even with `validate_on_change` off. On
    /// success the saved document becomes the new reset point.
    pub fn save(&mut self) -> Result<ConnectionDetails, BuilderError> {
        self.problems = validate_document(&self.document);

        let blocking: Vec<Problem> = self
            .problems()
            .into_iter()
            .filter(|problem| {
                problem.severity == Severity::Error
                    || (self.options.warnings_block_save && problem.severity == Severity::Warning)
            })
            .cloned()
            .collect();

        if !blocking.is_empty() {
            warn!(count = blocking.len(), "save blocked by problems");
            return Err(BuilderError::SaveBlocked { problems: blocking });
        }

        let details = details_from_document(&self.document);
        self.baseline = self.document.clone();
        info!("message saved");

        Ok(details)
    }

    /// [`save`](Self::save), serialized as JSON
    pub fn save_json(&mut self) -> Result<String, BuilderError> {
        let details = self.save()?;
        Ok(serde_json::to_string(&details)?)
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn begin_article_fetch(&mut self, article_id: Option<String>) {
        debug!(?article_id, "fetching preview article");
        self.preview.begin_fetch(article_id);
    }

    pub fn receive_articles(&mut self, result: Result<Vec<PreviewArticle>, FetchError>) {
        if let Err(err) = &result {
            warn!(error = %err, description = ?err.description, "preview article fetch failed");
        }

        self.preview.receive(result);
    }

    /// Compare the document with the messages it resolved to for the
    /// current article
    pub fn receive_resolved_preview(&mut self, resolved_messages: &[Value]) {
        self.resolution_warnings = extract_resolution_warnings(&self.document, resolved_messages);
        debug!(count = self.resolution_warnings.len(), "resolution warnings");
    }

    /// Selection moves along with focus when the outline has focus; the
    /// followed node is always left visible
    fn follow(&mut self, id: SlotId) {
        if let Some(ancestors) = self.document.ancestor_ids(&id) {
            self.tree.expand_all(ancestors);
        }

        if self.tree.focused_id().is_some() {
            self.tree.focus(id);
        } else {
            self.tree.select(id);
        }
    }

    /// Forget ids the document no longer has
    fn drop_stale_state(&mut self) {
        let document = &self.document;

        if self.tree.selected_id().is_some_and(|id| !document.contains(id)) {
            self.tree.select(document.root_id().clone());
        }

        if self.tree.focused_id().is_some_and(|id| !document.contains(id)) {
            self.tree.focus(document.root_id().clone());
        }

        let expanded: Vec<SlotId> = self
            .tree
            .expanded_ids()
            .iter()
            .filter(|id| document.contains(id))
            .cloned()
            .collect();
        self.tree.reset_expanded(expanded);

        self.resolution_warnings
            .retain(|warning| document.contains(&warning.component_id));
    }

    fn revalidate(&mut self) {
        if self.options.validate_on_change {
            self.problems = validate_document(&self.document);
        }
    }
}
