//! Immutable, shareable node handle

use super::{Node, NodeData, NodeKind, NodeType};
use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::validation::Validatable;
use crate::visitor::{Visitable, Visitor};
use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{Arc, OnceLock};

/// A built node.
///
/// Cloning is cheap and shares the underlying record, which is never mutated
/// after construction. Equality is structural; the structural hash is
/// computed once and cached.
pub struct Frozen<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    data: T,
    hash: OnceLock<u64>,
}

impl<T: NodeData> Frozen<T> {
    /// Final step of every `build()`: run the catalog against the staged
    /// record and freeze it, or report the first violation.
    pub fn finish(staged: Result<T>, config: &ModelConfig) -> Result<Self> {
        let result = staged.and_then(|data| {
            if T::KIND.requires_value_or_children() && !data.has_value() && !data.has_children()
            {
                return Err(Error::EmptyElement(T::TYPE_NAME));
            }
            data.validate(config)?;
            Ok(Self {
                inner: Arc::new(Inner {
                    data,
                    hash: OnceLock::new(),
                }),
            })
        });

        if let Err(err) = &result {
            tracing::debug!(node = T::TYPE_NAME, error = %err, "node construction failed");
        }

        result
    }

    /// True when both handles share the same record.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    fn structural_hash(&self) -> u64 {
        *self.inner.hash.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            self.inner.data.hash(&mut hasher);
            hasher.finish()
        })
    }
}

impl<T> Clone for Frozen<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Deref for Frozen<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner.data
    }
}

impl<T: NodeData> PartialEq for Frozen<T> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
            || (self.structural_hash() == other.structural_hash()
                && self.inner.data == other.inner.data)
    }
}

impl<T: NodeData> Eq for Frozen<T> {}

impl<T: NodeData> Hash for Frozen<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

impl<T: fmt::Debug> fmt::Debug for Frozen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.data.fmt(f)
    }
}

impl<T: NodeData> Visitable for Frozen<T> {
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
        if !visitor.pre_visit(self) {
            return;
        }
        visitor.visit_start(name, index, self);
        if visitor.visit(name, index, self) {
            self.inner.data.accept_children(visitor);
        }
        visitor.visit_end(name, index, self);
        visitor.post_visit(self);
    }
}

impl<T: NodeData> Node for Frozen<T> {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn kind(&self) -> NodeKind {
        T::KIND
    }

    fn has_value(&self) -> bool {
        self.inner.data.has_value()
    }

    fn has_children(&self) -> bool {
        self.inner.data.has_children()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_node(&self) -> Box<dyn Node> {
        Box::new(self.clone())
    }
}

impl<T: NodeData> NodeType for Frozen<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;
}
