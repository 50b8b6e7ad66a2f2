//! Fixed-list data source.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::FetchResult;
use crate::model::ParentKey;
use crate::model::RegularNode;

use super::ChildSource;

/// Shape of one child produced by [`TemplateSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildTemplate {
    /// Display name, also used to derive the child id.
    pub name: String,
    /// Whether the produced child can be expanded further.
    pub has_children: bool,
}

impl ChildTemplate {
    /// Template for an expandable child.
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_children: true,
        }
    }

    /// Template for a leaf child.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_children: false,
        }
    }
}

/// Answers every fetch with fresh copies of the same child list.
///
/// Children of parent `p` get ids `p/<name>`, so expanding a produced
/// branch yields another level with distinct ids.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    templates: Vec<ChildTemplate>,
    latency: Duration,
}

impl TemplateSource {
    /// Creates a source producing these children, without latency.
    pub fn new(templates: Vec<ChildTemplate>) -> Self {
        Self {
            templates,
            latency: Duration::ZERO,
        }
    }

    /// `child1` (expandable) and `child2`.
    pub fn demo() -> Self {
        Self::new(vec![ChildTemplate::branch("child1"), ChildTemplate::leaf("child2")])
    }

    /// Sets the delay before each answer.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl ChildSource for TemplateSource {
    async fn fetch(
        &self,
        parent: &ParentKey,
        skip: usize,
        limit: usize,
    ) -> Result<FetchResult, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let items = self
            .templates
            .iter()
            .skip(skip)
            .take(limit)
            .map(|template| {
                let id = format!("{parent}/{}", template.name);
                let mut node = RegularNode::leaf(id, template.name.clone());
                node.has_children = template.has_children;
                node
            })
            .collect();

        Ok(FetchResult::new(items, self.templates.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_copies_templates() {
        let source = TemplateSource::demo();

        let page = source.fetch(&ParentKey::node("root2"), 0, 100).await.unwrap();

        assert_eq!(page.total(), 2);
        assert_eq!(page.items()[0].id.as_str(), "root2/child1");
        assert!(page.items()[0].has_children);
        assert!(!page.items()[0].is_loaded());
        assert_eq!(page.items()[1].name, "child2");
        assert!(!page.items()[1].has_children);
    }

    #[tokio::test]
    async fn test_respects_skip_and_limit() {
        let source = TemplateSource::new(vec![
            ChildTemplate::leaf("a"),
            ChildTemplate::leaf("b"),
            ChildTemplate::leaf("c"),
        ]);

        let page = source.fetch(&ParentKey::Root, 1, 1).await.unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page.items()[0].id.as_str(), "root/b");
    }
}
