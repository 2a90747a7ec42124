//! Drill-down stack. Transitions are pure: they take the current state and
//! return the next one, leaving the caller to decide when to redraw.

use std::sync::Arc;

use super::error::PieError;
use super::types::CategoryNode;

/// Something the user asked the drill stack to do.
#[derive(Clone, Debug)]
pub enum NavEvent {
	/// Back to level 1.
	GoToRoot,
	/// One level up.
	GoLevelUp,
	/// Show the children of a branch.
	DrillInto(Arc<CategoryNode>),
	/// Breadcrumb jump to an ancestor level (1 = root).
	JumpTo(usize),
}

/// `current_level` is derived from the chain, so it is always
/// `ancestor_chain().len() + 1`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationState {
	chain: Vec<Arc<CategoryNode>>,
}

impl NavigationState {
	/// 1 for the root.
	pub fn current_level(&self) -> usize {
		self.chain.len() + 1
	}

	/// Drilled-into categories, oldest first.
	pub fn ancestor_chain(&self) -> &[Arc<CategoryNode>] {
		&self.chain
	}

	/// Whether no category has been drilled into.
	pub fn is_root(&self) -> bool {
		self.chain.is_empty()
	}

	/// The sibling set on screen: the root level, or the children of the
	/// nearest ancestor.
	pub fn visible<'a>(&'a self, root: &'a [Arc<CategoryNode>]) -> &'a [Arc<CategoryNode>] {
		match self.chain.last() {
			Some(parent) => parent.children.as_deref().unwrap_or_default(),
			None => root,
		}
	}

	/// The root state.
	pub fn go_to_root(&self) -> Self {
		Self::default()
	}

	/// Pushes `node`. Leaves cannot be drilled into.
	pub fn drill_into(&self, node: &Arc<CategoryNode>) -> Result<Self, PieError> {
		if node.is_leaf() {
			return Err(PieError::InvalidDrillTarget {
				title: node.title.clone(),
			});
		}
		let mut chain = self.chain.clone();
		chain.push(Arc::clone(node));
		Ok(Self { chain })
	}

	/// Levels two and below always land on the root.
	pub fn go_level_up(&self) -> Self {
		if self.current_level() <= 2 {
			return self.go_to_root();
		}
		let mut chain = self.chain.clone();
		chain.pop();
		Self { chain }
	}

	/// Pops whole ancestors until `level` is on screen. Levels at or below
	/// the current one are the only reachable targets; deeper ones leave the
	/// state unchanged.
	pub fn jump_to(&self, level: usize) -> Self {
		if level <= 1 {
			return self.go_to_root();
		}
		let mut chain = self.chain.clone();
		chain.truncate(level - 1);
		Self { chain }
	}

	/// Applies one event. `Ok` means the new state must be rendered, `Err`
	/// means nothing changed and nothing should be redrawn.
	pub fn apply(&self, event: &NavEvent) -> Result<Self, PieError> {
		match event {
			NavEvent::GoToRoot => Ok(self.go_to_root()),
			NavEvent::GoLevelUp => Ok(self.go_level_up()),
			NavEvent::DrillInto(node) => self.drill_into(node),
			NavEvent::JumpTo(level) => Ok(self.jump_to(*level)),
		}
	}
}
